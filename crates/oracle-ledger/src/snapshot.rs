//! Persisted-state shape of a ledger.
//!
//! A snapshot carries everything needed to rebuild a [`crate::Ledger`]:
//! the chain, the pending transactions in order, the mined digests and the
//! schedule parameters. It is encoded as CBOR through the canonical codec.
//! [`crate::Ledger::from_snapshot`] re-validates it rather than trusting it.

use serde::{Deserialize, Serialize};

use oracle_ledger_core::{
    from_canonical_bytes, to_canonical_bytes, Block, CoreError, Digest, PublicKey, Transaction,
};

/// Serializable ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Accepted blocks in chain order.
    pub blocks: Vec<Block>,
    /// Pending transactions in submission order.
    pub mempool: Vec<Transaction>,
    /// Every mined digest, sorted.
    pub mined: Vec<Digest>,
    /// Producer roster.
    pub roster: Vec<PublicKey>,
    /// Consecutive blocks per producer.
    pub blocks_per_producer: u64,
}

impl LedgerSnapshot {
    /// Encode to CBOR.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        to_canonical_bytes(self)
    }

    /// Decode from CBOR.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        from_canonical_bytes(bytes)
    }

    /// Chain height recorded in the snapshot.
    pub fn height(&self) -> u64 {
        self.blocks.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::error::LedgerError;
    use crate::ledger::Ledger;
    use oracle_ledger_core::{CryptoScheme, PrivateKey, ReferenceScheme};

    fn key(name: &str) -> PrivateKey {
        PrivateKey::from_bytes(name.as_bytes().to_vec())
    }

    fn config() -> LedgerConfig {
        let roster = ["A", "B"]
            .iter()
            .map(|n| ReferenceScheme.derive_public_key(&key(n)).unwrap())
            .collect();
        LedgerConfig::new(roster, 2)
    }

    fn populated() -> Ledger<ReferenceScheme> {
        let mut ledger = Ledger::new(ReferenceScheme, config()).unwrap();
        let sender = key("sender");
        for payload in ["a", "bb"] {
            let tx = Transaction::sign(&ReferenceScheme, &sender, payload.as_bytes().to_vec())
                .unwrap();
            ledger.submit_transaction(tx).unwrap();
        }
        let block = ledger.propose_block(&key("A")).unwrap();
        ledger.apply_block(block).unwrap();

        let pending =
            Transaction::sign(&ReferenceScheme, &sender, b"ccc".to_vec()).unwrap();
        ledger.submit_transaction(pending).unwrap();
        ledger
    }

    #[test]
    fn test_snapshot_restore() {
        let ledger = populated();
        let bytes = ledger.snapshot().to_bytes().unwrap();

        let snapshot = LedgerSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(snapshot.height(), 1);
        assert_eq!(snapshot.mined.len(), 2);

        let restored = Ledger::from_snapshot(ReferenceScheme, config(), snapshot).unwrap();
        assert_eq!(restored.current_height(), ledger.current_height());
        assert_eq!(restored.current_tip_hash(), ledger.current_tip_hash());
        assert_eq!(restored.mempool().pending(), ledger.mempool().pending());
        assert_eq!(restored.snapshot(), ledger.snapshot());
    }

    #[test]
    fn test_tampered_block_rejected() {
        let mut snapshot = populated().snapshot();
        snapshot.blocks[0].index = 7;

        let result = Ledger::from_snapshot(ReferenceScheme, config(), snapshot);
        assert!(matches!(result, Err(LedgerError::Block(_))));
    }

    #[test]
    fn test_mined_set_mismatch_rejected() {
        let mut snapshot = populated().snapshot();
        snapshot.mined.pop();

        let result = Ledger::from_snapshot(ReferenceScheme, config(), snapshot);
        assert!(matches!(result, Err(LedgerError::Snapshot(_))));
    }

    #[test]
    fn test_roster_mismatch_rejected() {
        let snapshot = populated().snapshot();
        let other = LedgerConfig::new(config().roster[..1].to_vec(), 2);

        let result = Ledger::from_snapshot(ReferenceScheme, other, snapshot);
        assert!(matches!(result, Err(LedgerError::Snapshot(_))));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(LedgerSnapshot::from_bytes(&[0xff, 0x00, 0x13]).is_err());
    }
}
