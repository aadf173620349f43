//! Thread-safe handle around a [`Ledger`].
//!
//! Every mutating call takes the write lock for its whole duration, so
//! concurrent callers observe each operation as atomic. Reads share the lock.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use oracle_ledger_core::{
    Block, BlockError, CoreError, CryptoScheme, Digest, MempoolError, PrivateKey, Transaction,
};

use crate::error::Result;
use crate::ledger::{Applied, Ledger};
use crate::snapshot::LedgerSnapshot;

/// Cloneable, shareable ledger handle.
pub struct SharedLedger<C: CryptoScheme> {
    inner: Arc<RwLock<Ledger<C>>>,
}

impl<C: CryptoScheme> Clone for SharedLedger<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: CryptoScheme> SharedLedger<C> {
    /// Wrap an owned ledger.
    pub fn new(ledger: Ledger<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    // A panic while holding the lock cannot leave the ledger half-updated:
    // every mutation validates before it writes.
    fn read_guard(&self) -> RwLockReadGuard<'_, Ledger<C>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Ledger<C>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Ledger::submit_transaction`].
    pub fn submit_transaction(&self, tx: Transaction) -> std::result::Result<Digest, MempoolError> {
        self.write_guard().submit_transaction(tx)
    }

    /// See [`Ledger::propose_block`].
    pub fn propose_block(&self, producer_key: &PrivateKey) -> std::result::Result<Block, CoreError> {
        self.read_guard().propose_block(producer_key)
    }

    /// See [`Ledger::apply_block`].
    pub fn apply_block(&self, block: Block) -> std::result::Result<Applied, BlockError> {
        self.write_guard().apply_block(block)
    }

    /// Propose from the current mempool and apply under one write lock.
    ///
    /// No submission can interleave between proposal and application.
    pub fn propose_and_apply(&self, producer_key: &PrivateKey) -> Result<Applied> {
        let mut ledger = self.write_guard();
        let block = ledger.propose_block(producer_key)?;
        Ok(ledger.apply_block(block)?)
    }

    /// See [`Ledger::current_height`].
    pub fn current_height(&self) -> u64 {
        self.read_guard().current_height()
    }

    /// See [`Ledger::current_tip_hash`].
    pub fn current_tip_hash(&self) -> Digest {
        self.read_guard().current_tip_hash()
    }

    /// See [`Ledger::producer_index_for_height`].
    pub fn producer_index_for_height(&self, height: Option<u64>) -> usize {
        self.read_guard().producer_index_for_height(height)
    }

    /// Number of pending transactions.
    pub fn mempool_len(&self) -> usize {
        self.read_guard().mempool().len()
    }

    /// See [`Ledger::snapshot`].
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.read_guard().snapshot()
    }

    /// Run `f` against a consistent view of the ledger.
    pub fn read<R>(&self, f: impl FnOnce(&Ledger<C>) -> R) -> R {
        f(&self.read_guard())
    }
}

impl<C: CryptoScheme> From<Ledger<C>> for SharedLedger<C> {
    fn from(ledger: Ledger<C>) -> Self {
        Self::new(ledger)
    }
}
