//! The Ledger: the authoritative, append-only block log.
//!
//! A `Ledger` exclusively owns the chain, the mempool and the mined-digest
//! index. The only mutating entry points are [`Ledger::submit_transaction`]
//! and [`Ledger::apply_block`]; both either complete or leave every piece of
//! state untouched.

use std::collections::HashSet;

use oracle_ledger_core::{
    validate_block_contents, Block, BlockError, CoreError, CryptoScheme, Digest, MempoolError,
    PrivateKey, ProducerSchedule, PublicKey, Transaction,
};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::index::{MinedArchive, MinedIndex};
use crate::mempool::Mempool;
use crate::observer::BlockObserver;
use crate::snapshot::LedgerSnapshot;

/// Outcome of a successful [`Ledger::apply_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Index of the appended block.
    pub index: u64,
    /// Hash of the appended block (the new tip).
    pub hash: Digest,
    /// Number of transactions the block mined.
    pub mined: usize,
    /// Number of pending transactions pruned from the mempool.
    pub pruned: usize,
}

/// Single-writer ledger over a pluggable crypto scheme.
#[derive(Debug)]
pub struct Ledger<C: CryptoScheme> {
    scheme: C,
    config: LedgerConfig,
    schedule: ProducerSchedule,
    blocks: Vec<Block>,
    mempool: Mempool,
    mined: MinedIndex,
}

impl<C: CryptoScheme> Ledger<C> {
    /// Create an empty ledger. Evicted mined digests go to an in-memory archive.
    pub fn new(scheme: C, config: LedgerConfig) -> Result<Self> {
        let mined = MinedIndex::new(config.retention);
        Self::build(scheme, config, mined)
    }

    /// Create an empty ledger whose mined-digest window evicts into `archive`.
    pub fn with_archive(
        scheme: C,
        config: LedgerConfig,
        archive: Box<dyn MinedArchive>,
    ) -> Result<Self> {
        let mined = MinedIndex::with_archive(config.retention, archive);
        Self::build(scheme, config, mined)
    }

    fn build(scheme: C, config: LedgerConfig, mined: MinedIndex) -> Result<Self> {
        let schedule = config.schedule()?;
        Ok(Self {
            scheme,
            config,
            schedule,
            blocks: Vec::new(),
            mempool: Mempool::new(),
            mined,
        })
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// Every block is re-validated and re-applied and every pending
    /// transaction resubmitted, so a tampered snapshot is rejected.
    pub fn from_snapshot(scheme: C, config: LedgerConfig, snapshot: LedgerSnapshot) -> Result<Self> {
        if snapshot.roster != config.roster {
            return Err(LedgerError::Snapshot(
                "producer roster differs from configuration".into(),
            ));
        }
        if snapshot.blocks_per_producer != config.blocks_per_producer {
            return Err(LedgerError::Snapshot(format!(
                "blocks per producer is {}, configuration says {}",
                snapshot.blocks_per_producer, config.blocks_per_producer
            )));
        }

        let mut ledger = Self::new(scheme, config)?;
        for block in snapshot.blocks {
            ledger.apply_block(block)?;
        }

        let mut mined = snapshot.mined;
        mined.sort();
        if mined != ledger.mined_digests() {
            return Err(LedgerError::Snapshot(
                "mined digest set does not match blocks".into(),
            ));
        }

        for tx in snapshot.mempool {
            ledger.submit_transaction(tx)?;
        }

        Ok(ledger)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutating Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Admit a transaction to the mempool.
    pub fn submit_transaction(&mut self, tx: Transaction) -> std::result::Result<Digest, MempoolError> {
        match self.mempool.submit(&self.scheme, tx, &self.mined) {
            Ok(digest) => {
                tracing::debug!(%digest, pending = self.mempool.len(), "transaction accepted");
                Ok(digest)
            }
            Err(e) => {
                tracing::debug!("transaction rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Validate and append a block.
    ///
    /// On success the block's digests join the mined index and the mempool is
    /// pruned of them. On failure nothing changes.
    pub fn apply_block(&mut self, block: Block) -> std::result::Result<Applied, BlockError> {
        if let Err(e) = self.validate_block(&block) {
            tracing::warn!(index = block.index, hash = %block.hash, "block rejected: {}", e);
            return Err(e);
        }

        let digests: Vec<Digest> = block.tx_digests().cloned().collect();
        let pruned = {
            let just_mined: HashSet<&Digest> = digests.iter().collect();
            self.mempool.remove_mined(&just_mined)
        };
        let applied = Applied {
            index: block.index,
            hash: block.hash.clone(),
            mined: digests.len(),
            pruned,
        };

        self.mined.record_block(digests);
        self.blocks.push(block);

        tracing::info!(
            index = applied.index,
            hash = %applied.hash,
            txs = applied.mined,
            pruned = applied.pruned,
            "block applied"
        );
        Ok(applied)
    }

    /// Apply a block and, on success, notify `observer` exactly once.
    pub fn apply_block_observed<O: BlockObserver + ?Sized>(
        &mut self,
        block: Block,
        observer: &mut O,
    ) -> std::result::Result<Applied, BlockError> {
        let applied = self.apply_block(block)?;
        if let Some(tip) = self.blocks.last() {
            observer.block_applied(tip, self.current_height());
        }
        Ok(applied)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Block Factory
    // ─────────────────────────────────────────────────────────────────────────

    /// Assemble a candidate block from the whole mempool.
    ///
    /// The candidate is not part of the ledger until [`Ledger::apply_block`]
    /// accepts it.
    pub fn propose_block(&self, producer_key: &PrivateKey) -> std::result::Result<Block, CoreError> {
        let producer = self.scheme.derive_public_key(producer_key)?;
        let block = Block::assemble(
            &self.scheme,
            self.current_height(),
            self.current_tip_hash(),
            producer,
            self.mempool.pending().to_vec(),
        );
        tracing::debug!(index = block.index, txs = block.len(), "candidate assembled");
        Ok(block)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Run every acceptance check against the current tip without mutating.
    ///
    /// Order: transactions, hash, index, previous hash, double-mined digests,
    /// then (if enabled) the producer schedule.
    pub fn validate_block(&self, block: &Block) -> std::result::Result<(), BlockError> {
        validate_block_contents(&self.scheme, block)?;

        let height = self.current_height();
        if block.index != height {
            return Err(BlockError::IndexMismatch {
                expected: height,
                got: block.index,
            });
        }

        let tip = self.current_tip_hash();
        if block.previous_hash != tip {
            return Err(BlockError::PrevHashMismatch {
                expected: tip,
                got: block.previous_hash.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(block.len());
        for digest in block.tx_digests() {
            // A digest repeated inside the block is mined twice as well.
            if self.mined.contains(digest) || !seen.insert(digest) {
                return Err(BlockError::DoubleMined(digest.clone()));
            }
        }

        if self.config.enforce_schedule {
            let expected = self.schedule.producer_for_height(block.index);
            if *expected != block.producer {
                return Err(BlockError::UnauthorizedProducer {
                    height: block.index,
                    expected: expected.clone(),
                    got: block.producer.clone(),
                });
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of accepted blocks.
    pub fn current_height(&self) -> u64 {
        self.blocks.len() as u64
    }

    /// Hash of the last block, or the genesis sentinel when empty.
    pub fn current_tip_hash(&self) -> Digest {
        self.blocks
            .last()
            .map(|b| b.hash.clone())
            .unwrap_or_else(Digest::genesis)
    }

    /// Roster index entitled to produce at `height` (default: current height).
    pub fn producer_index_for_height(&self, height: Option<u64>) -> usize {
        self.schedule
            .producer_index(height.unwrap_or_else(|| self.current_height()))
    }

    /// Public key entitled to produce at `height` (default: current height).
    pub fn scheduled_producer(&self, height: Option<u64>) -> &PublicKey {
        self.schedule
            .producer_for_height(height.unwrap_or_else(|| self.current_height()))
    }

    /// All accepted blocks in order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The block at `index`, if accepted.
    pub fn block(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    /// Read access to the mempool.
    pub fn mempool(&self) -> &Mempool {
        &self.mempool
    }

    /// Read access to the mined-digest index.
    pub fn mined_index(&self) -> &MinedIndex {
        &self.mined
    }

    /// Whether a transaction digest has been mined.
    pub fn is_mined(&self, digest: &Digest) -> bool {
        self.mined.contains(digest)
    }

    /// The producer schedule.
    pub fn schedule(&self) -> &ProducerSchedule {
        &self.schedule
    }

    /// The configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The crypto scheme.
    pub fn scheme(&self) -> &C {
        &self.scheme
    }

    /// Capture the persisted-state shape.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            blocks: self.blocks.clone(),
            mempool: self.mempool.pending().to_vec(),
            mined: self.mined_digests(),
            roster: self.schedule.roster().to_vec(),
            blocks_per_producer: self.schedule.blocks_per_producer(),
        }
    }

    /// Sorted union of all transaction digests in accepted blocks.
    fn mined_digests(&self) -> Vec<Digest> {
        let mut digests: Vec<Digest> = self
            .blocks
            .iter()
            .flat_map(|b| b.tx_digests().cloned())
            .collect();
        digests.sort();
        digests
    }
}
