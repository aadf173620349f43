//! Mempool: validated transactions waiting to be mined.
//!
//! Insertion order is the canonical order: the block factory drains pending
//! transactions exactly as they were submitted. Nothing is evicted or
//! reordered implicitly; transactions leave only when a block mines them.

use std::collections::HashSet;

use oracle_ledger_core::{validate_transaction, CryptoScheme, Digest, MempoolError, Transaction};

use crate::index::MinedIndex;

/// Pending transactions in submission order.
#[derive(Debug, Clone, Default)]
pub struct Mempool {
    pending: Vec<Transaction>,
    digests: HashSet<Digest>,
}

impl Mempool {
    /// Create an empty mempool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a transaction.
    ///
    /// Checks, in order: internal consistency, duplicate pending digest,
    /// already-mined digest. Returns the digest on acceptance.
    pub(crate) fn submit<C: CryptoScheme + ?Sized>(
        &mut self,
        scheme: &C,
        tx: Transaction,
        mined: &MinedIndex,
    ) -> Result<Digest, MempoolError> {
        validate_transaction(scheme, &tx)?;

        if self.digests.contains(&tx.digest) {
            return Err(MempoolError::DuplicatePending(tx.digest));
        }

        if mined.contains(&tx.digest) {
            return Err(MempoolError::AlreadyMined(tx.digest));
        }

        let digest = tx.digest.clone();
        self.digests.insert(digest.clone());
        self.pending.push(tx);
        Ok(digest)
    }

    /// Drop every pending transaction whose digest is in `mined`.
    ///
    /// Returns how many were removed.
    pub(crate) fn remove_mined(&mut self, mined: &HashSet<&Digest>) -> usize {
        let before = self.pending.len();
        self.pending.retain(|tx| !mined.contains(&tx.digest));
        for digest in mined {
            self.digests.remove(*digest);
        }
        before - self.pending.len()
    }

    /// Number of pending transactions.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether a transaction with this digest is pending.
    pub fn contains(&self, digest: &Digest) -> bool {
        self.digests.contains(digest)
    }

    /// Pending transactions in submission order.
    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Iterate over pending transactions in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetentionPolicy;
    use oracle_ledger_core::{PrivateKey, ReferenceScheme, Signature, ValidationError};
    use proptest::prelude::*;

    fn make_tx(payload: &str) -> Transaction {
        Transaction::sign(
            &ReferenceScheme,
            &PrivateKey::from_bytes(b"alice".to_vec()),
            payload.as_bytes().to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn test_submit_preserves_order() {
        let mut pool = Mempool::new();
        let mined = MinedIndex::new(RetentionPolicy::Unbounded);

        for payload in ["a", "bb", "ccc"] {
            pool.submit(&ReferenceScheme, make_tx(payload), &mined).unwrap();
        }

        let payloads: Vec<&[u8]> = pool.iter().map(|tx| tx.payload()).collect();
        assert_eq!(payloads, vec![&b"a"[..], &b"bb"[..], &b"ccc"[..]]);
    }

    #[test]
    fn test_duplicate_pending_rejected() {
        let mut pool = Mempool::new();
        let mined = MinedIndex::new(RetentionPolicy::Unbounded);
        let tx = make_tx("a");

        let digest = pool.submit(&ReferenceScheme, tx.clone(), &mined).unwrap();
        assert_eq!(
            pool.submit(&ReferenceScheme, tx, &mined),
            Err(MempoolError::DuplicatePending(digest))
        );
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_already_mined_rejected() {
        let mut pool = Mempool::new();
        let mut mined = MinedIndex::new(RetentionPolicy::Unbounded);
        let tx = make_tx("a");
        mined.record_block(vec![tx.digest.clone()]);

        assert_eq!(
            pool.submit(&ReferenceScheme, tx.clone(), &mined),
            Err(MempoolError::AlreadyMined(tx.digest))
        );
        assert!(pool.is_empty());
    }

    #[test]
    fn test_invalid_checked_before_duplicate() {
        let mut pool = Mempool::new();
        let mined = MinedIndex::new(RetentionPolicy::Unbounded);
        let tx = make_tx("a");
        pool.submit(&ReferenceScheme, tx.clone(), &mined).unwrap();

        let mut forged = tx;
        forged.signature = Signature::from_bytes(b"forged".to_vec());
        assert_eq!(
            pool.submit(&ReferenceScheme, forged, &mined),
            Err(MempoolError::InvalidTransaction(ValidationError::BadSignature))
        );
    }

    #[test]
    fn test_remove_mined_keeps_order_of_rest() {
        let mut pool = Mempool::new();
        let mined = MinedIndex::new(RetentionPolicy::Unbounded);
        let txs: Vec<_> = ["a", "bb", "ccc", "dddd"].iter().map(|p| make_tx(p)).collect();
        for tx in &txs {
            pool.submit(&ReferenceScheme, tx.clone(), &mined).unwrap();
        }

        let gone: HashSet<&Digest> = [&txs[0].digest, &txs[2].digest].into_iter().collect();
        assert_eq!(pool.remove_mined(&gone), 2);

        let left: Vec<&Digest> = pool.iter().map(|tx| tx.digest()).collect();
        assert_eq!(left, vec![&txs[1].digest, &txs[3].digest]);
        assert!(!pool.contains(&txs[0].digest));
        assert!(pool.contains(&txs[1].digest));
    }

    proptest! {
        #[test]
        fn test_remove_mined_preserves_relative_order(
            mask in prop::collection::vec(any::<bool>(), 1..40),
        ) {
            let mut pool = Mempool::new();
            let mined = MinedIndex::new(RetentionPolicy::Unbounded);
            // n + 1 ones: a distinct byte sum, hence a distinct digest, per n.
            let txs: Vec<Transaction> = (0..mask.len())
                .map(|n| {
                    Transaction::sign(
                        &ReferenceScheme,
                        &PrivateKey::from_bytes(b"alice".to_vec()),
                        vec![1u8; n + 1],
                    )
                    .unwrap()
                })
                .collect();
            for tx in &txs {
                pool.submit(&ReferenceScheme, tx.clone(), &mined).unwrap();
            }

            let submitted: Vec<&Digest> = pool.iter().map(|tx| tx.digest()).collect();
            let expected: Vec<&Digest> = txs.iter().map(|tx| tx.digest()).collect();
            prop_assert_eq!(submitted, expected);

            let gone: HashSet<&Digest> = txs
                .iter()
                .zip(&mask)
                .filter(|(_, remove)| **remove)
                .map(|(tx, _)| &tx.digest)
                .collect();
            let kept: Vec<&Digest> = txs
                .iter()
                .zip(&mask)
                .filter(|(_, remove)| !**remove)
                .map(|(tx, _)| &tx.digest)
                .collect();

            prop_assert_eq!(pool.remove_mined(&gone), gone.len());
            let left: Vec<&Digest> = pool.iter().map(|tx| tx.digest()).collect();
            prop_assert_eq!(left, kept);
            prop_assert_eq!(pool.len(), pool.pending().len());
            for digest in &gone {
                prop_assert!(!pool.contains(digest));
            }
        }
    }
}
