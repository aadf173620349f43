//! Hook for consumers that react to accepted blocks.

use oracle_ledger_core::Block;

/// Called once per accepted block, after the ledger state has been updated.
///
/// Never called for rejected blocks.
pub trait BlockObserver {
    /// `height` is the chain height after `block` was appended.
    fn block_applied(&mut self, block: &Block, height: u64);
}

impl<F> BlockObserver for F
where
    F: FnMut(&Block, u64),
{
    fn block_applied(&mut self, block: &Block, height: u64) {
        self(block, height)
    }
}
