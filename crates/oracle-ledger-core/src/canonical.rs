//! Canonical CBOR encoding for blocks, transactions and snapshots.
//!
//! Structs encode as maps in field declaration order and sequences keep their
//! order, so equal values always produce identical bytes. Callers that encode
//! sets must sort them first.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::block::Block;
use crate::error::CoreError;
use crate::transaction::Transaction;

/// Encode any serializable value to CBOR bytes.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| CoreError::EncodingError(e.to_string()))?;
    Ok(buf)
}

/// Decode a value previously produced by [`to_canonical_bytes`].
pub fn from_canonical_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CoreError> {
    ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
}

/// Canonical bytes of a transaction, as handed to an external transport.
pub fn transaction_bytes(tx: &Transaction) -> Result<Vec<u8>, CoreError> {
    to_canonical_bytes(tx)
}

/// Canonical bytes of a block, as handed to an external transport.
pub fn block_bytes(block: &Block) -> Result<Vec<u8>, CoreError> {
    to_canonical_bytes(block)
}
