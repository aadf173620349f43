//! Error types for the Oracle Ledger Core.

use thiserror::Error;

use crate::types::{Digest, PublicKey};

/// Core errors raised by the crypto capability and the canonical encoder.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid private key: expected {expected} bytes, got {got}")]
    InvalidPrivateKey { expected: usize, got: usize },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Why a transaction is internally inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("content digest does not match payload")]
    BadDigest,

    #[error("signature verification failed")]
    BadSignature,
}

/// Why a transaction was refused admission to the mempool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MempoolError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(#[from] ValidationError),

    #[error("transaction {0} is already pending")]
    DuplicatePending(Digest),

    #[error("transaction {0} is already mined")]
    AlreadyMined(Digest),
}

/// Why a candidate block was refused by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("transaction {position} is invalid: {source}")]
    InvalidTx {
        position: usize,
        source: ValidationError,
    },

    #[error("block hash mismatch: expected {expected}, got {got}")]
    HashMismatch { expected: Digest, got: Digest },

    #[error("invalid block index: expected {expected}, got {got}")]
    IndexMismatch { expected: u64, got: u64 },

    #[error("invalid previous hash: expected {expected}, got {got}")]
    PrevHashMismatch { expected: Digest, got: Digest },

    #[error("transaction {0} is already mined")]
    DoubleMined(Digest),

    #[error("producer {got} is not scheduled at height {height} (expected {expected})")]
    UnauthorizedProducer {
        height: u64,
        expected: PublicKey,
        got: PublicKey,
    },
}

/// Invalid producer schedule parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("producer roster is empty")]
    EmptyRoster,

    #[error("blocks per producer must be positive")]
    ZeroCadence,
}
