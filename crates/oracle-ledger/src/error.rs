//! Error types for the Ledger.

use oracle_ledger_core::{BlockError, CoreError, MempoolError, ScheduleError};
use thiserror::Error;

/// Errors that can occur while building or restoring a ledger.
///
/// `submit_transaction` and `apply_block` return the narrower
/// [`MempoolError`] and [`BlockError`] directly; both convert into this type.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Crypto capability or encoding error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Invalid roster or cadence.
    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),

    /// Transaction refused by the mempool.
    #[error("transaction rejected: {0}")]
    Mempool(#[from] MempoolError),

    /// Block refused by the ledger.
    #[error("block rejected: {0}")]
    Block(#[from] BlockError),

    /// Configuration rejected before the ledger was created.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Snapshot does not match the configuration or its own blocks.
    #[error("snapshot mismatch: {0}")]
    Snapshot(String),
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
