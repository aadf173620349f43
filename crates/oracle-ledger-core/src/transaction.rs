//! Transaction: a signed, opaque payload submitted by an external sender.
//!
//! A transaction is immutable once constructed. Its identity is the content
//! digest of the payload.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::crypto::CryptoScheme;
use crate::error::CoreError;
use crate::types::{Digest, PrivateKey, PublicKey, Signature};

/// A pending or mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The sender's public key.
    pub sender: PublicKey,

    /// Opaque application payload.
    pub payload: Bytes,

    /// Digest of `payload` under the active scheme.
    pub digest: Digest,

    /// Sender's signature over `payload`.
    pub signature: Signature,
}

impl Transaction {
    /// Build a consistent transaction signed by `private_key`.
    pub fn sign<C: CryptoScheme + ?Sized>(
        scheme: &C,
        private_key: &PrivateKey,
        payload: impl Into<Bytes>,
    ) -> Result<Self, CoreError> {
        let payload = payload.into();
        let sender = scheme.derive_public_key(private_key)?;
        let digest = scheme.digest(&payload);
        let signature = scheme.sign(&payload, private_key)?;
        Ok(Self {
            sender,
            payload,
            digest,
            signature,
        })
    }

    /// Assemble a transaction from externally supplied fields.
    ///
    /// Nothing is checked; run the transaction validator before trusting it.
    pub fn from_parts(
        sender: PublicKey,
        payload: impl Into<Bytes>,
        digest: Digest,
        signature: Signature,
    ) -> Self {
        Self {
            sender,
            payload: payload.into(),
            digest,
            signature,
        }
    }

    /// The content digest (transaction identity).
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// The sender's public key.
    pub fn sender(&self) -> &PublicKey {
        &self.sender
    }

    /// The payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}
