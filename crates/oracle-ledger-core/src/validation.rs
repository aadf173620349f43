//! Transaction and block validation that needs no ledger state.

use crate::block::Block;
use crate::crypto::CryptoScheme;
use crate::error::{BlockError, ValidationError};
use crate::transaction::Transaction;

/// Check a transaction's internal consistency.
///
/// This performs, stopping at the first failure:
/// 1. Content digest verification
/// 2. Signature verification
pub fn validate_transaction<C: CryptoScheme + ?Sized>(
    scheme: &C,
    tx: &Transaction,
) -> Result<(), ValidationError> {
    if scheme.digest(&tx.payload) != tx.digest {
        return Err(ValidationError::BadDigest);
    }

    if !scheme.verify(&tx.payload, &tx.sender, &tx.signature) {
        return Err(ValidationError::BadSignature);
    }

    Ok(())
}

/// Validate the parts of a block that do not depend on the chain tip.
///
/// 1. Every transaction passes [`validate_transaction`]
/// 2. The recomputed hash equals `block.hash`
///
/// Linkage (index, previous hash) and mined-digest checks belong to the ledger.
pub fn validate_block_contents<C: CryptoScheme + ?Sized>(
    scheme: &C,
    block: &Block,
) -> Result<(), BlockError> {
    for (position, tx) in block.transactions.iter().enumerate() {
        validate_transaction(scheme, tx)
            .map_err(|source| BlockError::InvalidTx { position, source })?;
    }

    let computed = block.compute_hash(scheme);
    if computed != block.hash {
        return Err(BlockError::HashMismatch {
            expected: computed,
            got: block.hash.clone(),
        });
    }

    Ok(())
}
