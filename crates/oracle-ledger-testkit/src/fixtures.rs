//! Test fixtures and helpers.
//!
//! A fixture owns a scheme, a roster of producer keys and a sender key, and
//! builds ledgers, transactions and blocks from them.

use oracle_ledger::{Applied, Ledger, LedgerConfig, OraclePayload};
use oracle_ledger_core::{
    CryptoScheme, Ed25519Scheme, PrivateKey, PublicKey, ReferenceScheme, Transaction,
};

/// Producer keys plus a sender key under one scheme.
pub struct TestFixture<C: CryptoScheme = ReferenceScheme> {
    pub scheme: C,
    pub producers: Vec<PrivateKey>,
    pub sender: PrivateKey,
}

impl TestFixture<ReferenceScheme> {
    /// Reference-scheme fixture with `roster_size` producers named `producer-<i>`.
    pub fn new(roster_size: usize) -> Self {
        Self {
            scheme: ReferenceScheme,
            producers: (0..roster_size)
                .map(|i| PrivateKey::from_bytes(format!("producer-{i}").into_bytes()))
                .collect(),
            sender: PrivateKey::from_bytes(b"sender".to_vec()),
        }
    }
}

impl Default for TestFixture<ReferenceScheme> {
    fn default() -> Self {
        Self::new(3)
    }
}

impl TestFixture<Ed25519Scheme> {
    /// Ed25519 fixture with deterministic seeds.
    pub fn ed25519(roster_size: usize) -> Self {
        Self {
            scheme: Ed25519Scheme,
            producers: (0..roster_size)
                .map(|i| {
                    let mut seed = [0u8; 32];
                    seed[0] = i as u8;
                    seed[31] = 0x01;
                    PrivateKey::from(seed)
                })
                .collect(),
            sender: PrivateKey::from([0xAA; 32]),
        }
    }
}

impl<C: CryptoScheme + Clone> TestFixture<C> {
    /// Public keys of the producers, in roster order.
    pub fn roster(&self) -> Vec<PublicKey> {
        self.producers
            .iter()
            .map(|k| {
                self.scheme
                    .derive_public_key(k)
                    .expect("fixture producer key is valid")
            })
            .collect()
    }

    /// Configuration over the fixture roster.
    pub fn config(&self, blocks_per_producer: u64) -> LedgerConfig {
        LedgerConfig::new(self.roster(), blocks_per_producer)
    }

    /// Empty ledger over the fixture roster.
    pub fn ledger(&self, blocks_per_producer: u64) -> Ledger<C> {
        self.ledger_with(self.config(blocks_per_producer))
    }

    /// Empty ledger with a custom configuration.
    pub fn ledger_with(&self, config: LedgerConfig) -> Ledger<C> {
        Ledger::new(self.scheme.clone(), config).expect("fixture config is valid")
    }

    /// Private key of producer `i`.
    pub fn producer_key(&self, i: usize) -> &PrivateKey {
        &self.producers[i]
    }

    /// Private key of the producer scheduled at the ledger's current height.
    pub fn scheduled_key(&self, ledger: &Ledger<C>) -> &PrivateKey {
        self.producer_key(ledger.producer_index_for_height(None))
    }

    /// Transaction signed by the fixture sender.
    pub fn make_tx(&self, payload: impl Into<Vec<u8>>) -> Transaction {
        Transaction::sign(&self.scheme, &self.sender, payload.into())
            .expect("fixture sender key is valid")
    }

    /// Integer `provide_data` report signed by the fixture sender.
    pub fn make_report(&self, key: &str, provider: &str, value: i64) -> Transaction {
        let payload = OraclePayload::integer(key, provider, value)
            .to_bytes()
            .expect("payload serializes");
        self.make_tx(payload)
    }

    /// Propose from the whole mempool with the scheduled producer and apply.
    pub fn mine_next(&self, ledger: &mut Ledger<C>) -> Applied {
        let block = ledger
            .propose_block(self.scheduled_key(ledger))
            .expect("fixture producer key is valid");
        ledger.apply_block(block).expect("proposed block applies")
    }
}

/// Payload whose reference digest is unique per `n`.
///
/// The reference digest is a byte sum, so payloads that merely differ in
/// content can still collide; `n + 1` ones never do.
pub fn unique_payload(n: usize) -> Vec<u8> {
    vec![1u8; n + 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_ledger_core::Digest;

    #[test]
    fn test_fixture_roster_is_distinct() {
        let fixture = TestFixture::new(3);
        let roster = fixture.roster();
        assert_ne!(roster[0], roster[1]);
        assert_ne!(roster[1], roster[2]);
        assert_ne!(roster[0], roster[2]);
    }

    #[test]
    fn test_mine_next_follows_schedule() {
        let fixture = TestFixture::new(2);
        let mut ledger = fixture.ledger(1);

        fixture.mine_next(&mut ledger);
        fixture.mine_next(&mut ledger);

        let roster = fixture.roster();
        assert_eq!(ledger.blocks()[0].producer, roster[0]);
        assert_eq!(ledger.blocks()[1].producer, roster[1]);
    }

    #[test]
    fn test_unique_payload_digests_differ() {
        let fixture = TestFixture::default();
        let digests: Vec<Digest> = (0..10)
            .map(|n| fixture.make_tx(unique_payload(n)).digest)
            .collect();
        for (i, a) in digests.iter().enumerate() {
            for b in &digests[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_ed25519_fixture_mines() {
        let fixture = TestFixture::ed25519(2);
        let mut ledger = fixture.ledger(2);
        ledger.submit_transaction(fixture.make_tx(b"hello".to_vec())).unwrap();

        let applied = fixture.mine_next(&mut ledger);
        assert_eq!(applied.mined, 1);
        assert_eq!(applied.hash.as_bytes().len(), 32);
    }
}
