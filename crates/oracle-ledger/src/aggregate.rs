//! Reference aggregator over oracle data reports.
//!
//! Providers submit transactions whose payload is a JSON `provide_data`
//! message:
//!
//! ```json
//! {"type":"provide_data","data":{"type":"integer","data":"42"},"key":"btc-usd","provider":"p1"}
//! ```
//!
//! The aggregator keeps the latest report per `(key, provider)` and, after
//! every accepted block, recomputes one value per key: the median of integer
//! reports, or the most frequent value when any report for the key is a string.
//! It runs outside the ledger as a [`BlockObserver`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use oracle_ledger_core::Block;

use crate::observer::BlockObserver;

/// Transaction payload understood by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OraclePayload {
    /// A provider reporting a value for a key.
    ProvideData {
        data: ReportValue,
        key: String,
        provider: String,
    },
}

impl OraclePayload {
    /// An integer report.
    pub fn integer(key: impl Into<String>, provider: impl Into<String>, value: i64) -> Self {
        Self::ProvideData {
            data: ReportValue::Integer(value.to_string()),
            key: key.into(),
            provider: provider.into(),
        }
    }

    /// A string report.
    pub fn string(
        key: impl Into<String>,
        provider: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::ProvideData {
            data: ReportValue::String(value.into()),
            key: key.into(),
            provider: provider.into(),
        }
    }

    /// JSON bytes suitable as a transaction payload.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decode a transaction payload.
    pub fn from_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

/// A reported value. Integers travel as decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ReportValue {
    Integer(String),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Report {
    Integer(i64),
    Text(String),
}

impl Report {
    fn render(&self) -> String {
        match self {
            Report::Integer(v) => v.to_string(),
            Report::Text(s) => s.clone(),
        }
    }
}

/// Aggregated value for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateValue {
    /// Lower median of integer reports.
    Median(i64),
    /// Most frequent rendered value (ties go to the smallest).
    MostFrequent(String),
}

/// Lower median of `values`, or `None` when empty.
pub fn median(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    Some(sorted[(sorted.len() - 1) / 2])
}

/// Most frequent value; ties resolve to the lexicographically smallest.
pub fn most_frequent<S: AsRef<str>>(values: &[S]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value.as_ref()).or_default() += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value.to_string())
}

/// Per-key aggregation of provider reports.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    /// key -> provider -> latest report
    reports: BTreeMap<String, BTreeMap<String, Report>>,
    results: BTreeMap<String, AggregateValue>,
    blocks_seen: u64,
    last_height: u64,
}

impl Aggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one accepted block into the aggregate state.
    pub fn ingest_block(&mut self, block: &Block, height: u64) {
        let mut touched = Vec::new();

        for tx in &block.transactions {
            let payload = match OraclePayload::from_bytes(tx.payload()) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::debug!(digest = %tx.digest, "skipping non-oracle payload: {}", e);
                    continue;
                }
            };

            let OraclePayload::ProvideData {
                data,
                key,
                provider,
            } = payload;

            let report = match data {
                ReportValue::Integer(text) => match text.trim().parse::<i64>() {
                    Ok(v) => Report::Integer(v),
                    Err(_) => {
                        tracing::debug!(%key, %provider, "skipping malformed integer report");
                        continue;
                    }
                },
                ReportValue::String(s) => Report::Text(s),
            };

            self.reports
                .entry(key.clone())
                .or_default()
                .insert(provider, report);
            touched.push(key);
        }

        touched.sort();
        touched.dedup();
        for key in touched {
            if let Some(value) = self.reports.get(&key).and_then(aggregate) {
                self.results.insert(key, value);
            }
        }

        self.blocks_seen += 1;
        self.last_height = height;
    }

    /// Current aggregate for `key`.
    pub fn value(&self, key: &str) -> Option<&AggregateValue> {
        self.results.get(key)
    }

    /// All current aggregates, ordered by key.
    pub fn results(&self) -> &BTreeMap<String, AggregateValue> {
        &self.results
    }

    /// Number of providers that reported on `key`.
    pub fn provider_count(&self, key: &str) -> usize {
        self.reports.get(key).map_or(0, BTreeMap::len)
    }

    /// Number of blocks ingested.
    pub fn blocks_seen(&self) -> u64 {
        self.blocks_seen
    }

    /// Ledger height after the last ingested block.
    pub fn last_height(&self) -> u64 {
        self.last_height
    }
}

fn aggregate(reports: &BTreeMap<String, Report>) -> Option<AggregateValue> {
    let integers: Option<Vec<i64>> = reports
        .values()
        .map(|r| match r {
            Report::Integer(v) => Some(*v),
            Report::Text(_) => None,
        })
        .collect();

    match integers {
        Some(values) => median(&values).map(AggregateValue::Median),
        None => {
            let rendered: Vec<String> = reports.values().map(Report::render).collect();
            most_frequent(&rendered).map(AggregateValue::MostFrequent)
        }
    }
}

impl BlockObserver for Aggregator {
    fn block_applied(&mut self, block: &Block, height: u64) {
        self.ingest_block(block, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_ledger_core::{CryptoScheme, Digest, PrivateKey, ReferenceScheme, Transaction};

    fn block_of(payloads: Vec<Vec<u8>>) -> Block {
        let scheme = ReferenceScheme;
        let key = PrivateKey::from_bytes(b"provider".to_vec());
        let txs = payloads
            .into_iter()
            .map(|p| Transaction::sign(&scheme, &key, p).unwrap())
            .collect();
        let producer = scheme.derive_public_key(&key).unwrap();
        Block::assemble(&scheme, 0, Digest::genesis(), producer, txs)
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[5, 1, 3]), Some(3));
        assert_eq!(median(&[4, 1, 3, 2]), Some(2));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_most_frequent_tie_breaks_smallest() {
        assert_eq!(most_frequent(&["b", "a", "b", "a"]), Some("a".to_string()));
        assert_eq!(most_frequent(&["x", "y", "y"]), Some("y".to_string()));
        assert_eq!(most_frequent::<&str>(&[]), None);
    }

    #[test]
    fn test_payload_wire_shape() {
        let json = br#"{"type":"provide_data","data":{"type":"integer","data":"42"},"key":"xxx","provider":"pro_test_1"}"#;
        let payload = OraclePayload::from_bytes(json).unwrap();
        assert_eq!(payload, OraclePayload::integer("xxx", "pro_test_1", 42));
    }

    #[test]
    fn test_integer_reports_use_median() {
        let mut agg = Aggregator::new();
        let block = block_of(vec![
            OraclePayload::integer("price", "p1", 10).to_bytes().unwrap(),
            OraclePayload::integer("price", "p2", 30).to_bytes().unwrap(),
            OraclePayload::integer("price", "p3", 20).to_bytes().unwrap(),
        ]);
        agg.ingest_block(&block, 1);

        assert_eq!(agg.value("price"), Some(&AggregateValue::Median(20)));
        assert_eq!(agg.provider_count("price"), 3);
        assert_eq!(agg.last_height(), 1);
    }

    #[test]
    fn test_latest_report_per_provider_wins() {
        let mut agg = Aggregator::new();
        agg.ingest_block(
            &block_of(vec![OraclePayload::integer("k", "p1", 1).to_bytes().unwrap()]),
            1,
        );
        agg.ingest_block(
            &block_of(vec![OraclePayload::integer("k", "p1", 9).to_bytes().unwrap()]),
            2,
        );

        assert_eq!(agg.provider_count("k"), 1);
        assert_eq!(agg.value("k"), Some(&AggregateValue::Median(9)));
        assert_eq!(agg.blocks_seen(), 2);
    }

    #[test]
    fn test_string_reports_use_most_frequent() {
        let mut agg = Aggregator::new();
        let block = block_of(vec![
            OraclePayload::string("weather", "p1", "rain").to_bytes().unwrap(),
            OraclePayload::string("weather", "p2", "sun").to_bytes().unwrap(),
            OraclePayload::string("weather", "p3", "rain").to_bytes().unwrap(),
        ]);
        agg.ingest_block(&block, 1);

        assert_eq!(
            agg.value("weather"),
            Some(&AggregateValue::MostFrequent("rain".to_string()))
        );
    }

    #[test]
    fn test_non_oracle_payloads_skipped() {
        let mut agg = Aggregator::new();
        let block = block_of(vec![
            b"not json".to_vec(),
            br#"{"type":"provide_data","data":{"type":"integer","data":"abc"},"key":"k","provider":"p"}"#.to_vec(),
        ]);
        agg.ingest_block(&block, 1);

        assert!(agg.results().is_empty());
        assert_eq!(agg.blocks_seen(), 1);
    }
}
