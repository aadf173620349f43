//! Block: an ordered batch of transactions linked to its predecessor.

use serde::{Deserialize, Serialize};

use crate::crypto::CryptoScheme;
use crate::transaction::Transaction;
use crate::types::{Digest, PublicKey};

/// A candidate or accepted block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Height of this block (chain length at proposal time).
    pub index: u64,

    /// Hash of the previous block, or [`Digest::genesis`] for the first block.
    pub previous_hash: Digest,

    /// `digest(producer || previous_hash || tx digests...)`.
    pub hash: Digest,

    /// Public key of the producer that assembled the block.
    pub producer: PublicKey,

    /// Transactions in mempool insertion order.
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Assemble a block and compute its hash.
    pub fn assemble<C: CryptoScheme + ?Sized>(
        scheme: &C,
        index: u64,
        previous_hash: Digest,
        producer: PublicKey,
        transactions: Vec<Transaction>,
    ) -> Self {
        let hash = compute_block_hash(scheme, &producer, &previous_hash, &transactions);
        Self {
            index,
            previous_hash,
            hash,
            producer,
            transactions,
        }
    }

    /// Recompute the hash from the block's own fields.
    pub fn compute_hash<C: CryptoScheme + ?Sized>(&self, scheme: &C) -> Digest {
        compute_block_hash(
            scheme,
            &self.producer,
            &self.previous_hash,
            &self.transactions,
        )
    }

    /// Iterate over the content digests of the block's transactions.
    pub fn tx_digests(&self) -> impl Iterator<Item = &Digest> {
        self.transactions.iter().map(Transaction::digest)
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the block carries no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// The bytes a block hash commits to: `producer || previous_hash || digests`.
pub fn block_hash_material(
    producer: &PublicKey,
    previous_hash: &Digest,
    transactions: &[Transaction],
) -> Vec<u8> {
    let tx_len: usize = transactions.iter().map(|tx| tx.digest.as_bytes().len()).sum();
    let mut buf =
        Vec::with_capacity(producer.as_bytes().len() + previous_hash.as_bytes().len() + tx_len);
    buf.extend_from_slice(producer.as_bytes());
    buf.extend_from_slice(previous_hash.as_bytes());
    for tx in transactions {
        buf.extend_from_slice(tx.digest.as_bytes());
    }
    buf
}

/// Hash a block's committed fields under `scheme`.
pub fn compute_block_hash<C: CryptoScheme + ?Sized>(
    scheme: &C,
    producer: &PublicKey,
    previous_hash: &Digest,
    transactions: &[Transaction],
) -> Digest {
    scheme.digest(&block_hash_material(producer, previous_hash, transactions))
}
