//! Mined-digest index.
//!
//! Answers "has this transaction digest been mined?" for the mempool and the
//! block validator. Under [`RetentionPolicy::RecentBlocks`] only the most
//! recent blocks stay in memory; older digests are delegated to a
//! [`MinedArchive`], so a lookup is always answered against the full history.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use oracle_ledger_core::Digest;

use crate::config::RetentionPolicy;

/// External index for digests that left the in-memory window.
///
/// Implementations can be an in-process set, a key-value store, or a remote
/// lookup service. `archive` is only called for digests of accepted blocks.
pub trait MinedArchive: Send + Sync {
    /// Whether `digest` has been archived.
    fn contains(&self, digest: &Digest) -> bool;

    /// Take ownership of the digests of one evicted block.
    fn archive(&mut self, digests: Vec<Digest>);

    /// Number of archived digests.
    fn len(&self) -> usize;

    /// Whether nothing has been archived.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process archive backed by a hash set.
#[derive(Debug, Default, Clone)]
pub struct MemoryArchive {
    digests: HashSet<Digest>,
}

impl MemoryArchive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MinedArchive for MemoryArchive {
    fn contains(&self, digest: &Digest) -> bool {
        self.digests.contains(digest)
    }

    fn archive(&mut self, digests: Vec<Digest>) {
        self.digests.extend(digests);
    }

    fn len(&self) -> usize {
        self.digests.len()
    }
}

/// The set of mined transaction digests.
pub struct MinedIndex {
    /// Digests held in memory.
    recent: HashSet<Digest>,
    /// Per-block digests inside the window (only for `RecentBlocks`).
    window: VecDeque<Vec<Digest>>,
    retention: RetentionPolicy,
    archive: Box<dyn MinedArchive>,
    total: usize,
}

impl MinedIndex {
    /// Create an index backed by a [`MemoryArchive`].
    pub fn new(retention: RetentionPolicy) -> Self {
        Self::with_archive(retention, Box::new(MemoryArchive::new()))
    }

    /// Create an index that evicts into `archive`.
    pub fn with_archive(retention: RetentionPolicy, archive: Box<dyn MinedArchive>) -> Self {
        Self {
            recent: HashSet::new(),
            window: VecDeque::new(),
            retention,
            archive,
            total: 0,
        }
    }

    /// Whether `digest` has ever been mined.
    pub fn contains(&self, digest: &Digest) -> bool {
        self.recent.contains(digest) || self.archive.contains(digest)
    }

    /// Total number of mined digests.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Whether nothing has been mined yet.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of digests currently held in memory.
    pub fn in_memory(&self) -> usize {
        self.recent.len()
    }

    /// Number of digests handed to the archive.
    pub fn archived(&self) -> usize {
        self.archive.len()
    }

    /// The retention policy in force.
    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Record the digests of one accepted block.
    ///
    /// The caller guarantees none of them is already present.
    pub(crate) fn record_block(&mut self, digests: Vec<Digest>) {
        self.total += digests.len();
        self.recent.extend(digests.iter().cloned());

        if let RetentionPolicy::RecentBlocks(limit) = self.retention {
            self.window.push_back(digests);
            while self.window.len() > limit {
                if let Some(evicted) = self.window.pop_front() {
                    for digest in &evicted {
                        self.recent.remove(digest);
                    }
                    self.archive.archive(evicted);
                }
            }
        }
    }
}

impl fmt::Debug for MinedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinedIndex")
            .field("retention", &self.retention)
            .field("total", &self.total)
            .field("in_memory", &self.recent.len())
            .field("archived", &self.archive.len())
            .finish()
    }
}
