//! Round-robin producer schedule.
//!
//! Each roster entry produces `blocks_per_producer` consecutive blocks before
//! the turn passes to the next entry; the schedule repeats every
//! `blocks_per_producer * roster.len()` heights.

use std::num::{NonZeroU64, NonZeroUsize};

use crate::error::ScheduleError;
use crate::types::PublicKey;

/// Roster index entitled to produce the block at `height`.
///
/// `floor(height / blocks_per_producer) mod roster_size`
pub fn producer_index_for_height(
    height: u64,
    roster_size: NonZeroUsize,
    blocks_per_producer: NonZeroU64,
) -> usize {
    let slot = height / blocks_per_producer.get();
    // roster_size fits in u64 on every supported target
    (slot % roster_size.get() as u64) as usize
}

/// A validated producer roster plus cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerSchedule {
    roster: Vec<PublicKey>,
    roster_size: NonZeroUsize,
    blocks_per_producer: NonZeroU64,
}

impl ProducerSchedule {
    /// Create a schedule. Rejects an empty roster or a zero cadence.
    pub fn new(roster: Vec<PublicKey>, blocks_per_producer: u64) -> Result<Self, ScheduleError> {
        let roster_size = NonZeroUsize::new(roster.len()).ok_or(ScheduleError::EmptyRoster)?;
        let blocks_per_producer =
            NonZeroU64::new(blocks_per_producer).ok_or(ScheduleError::ZeroCadence)?;
        Ok(Self {
            roster,
            roster_size,
            blocks_per_producer,
        })
    }

    /// The ordered roster.
    pub fn roster(&self) -> &[PublicKey] {
        &self.roster
    }

    /// Consecutive heights assigned to one roster entry.
    pub fn blocks_per_producer(&self) -> u64 {
        self.blocks_per_producer.get()
    }

    /// Roster index entitled to produce at `height`.
    pub fn producer_index(&self, height: u64) -> usize {
        producer_index_for_height(height, self.roster_size, self.blocks_per_producer)
    }

    /// Public key entitled to produce at `height`.
    pub fn producer_for_height(&self, height: u64) -> &PublicKey {
        &self.roster[self.producer_index(height)]
    }

    /// Number of heights after which the schedule repeats.
    pub fn period(&self) -> u64 {
        self.blocks_per_producer
            .get()
            .saturating_mul(self.roster_size.get() as u64)
    }

    /// Number of roster entries; never zero.
    pub fn roster_size(&self) -> NonZeroUsize {
        self.roster_size
    }
}
