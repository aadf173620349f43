//! Ledger configuration.

use serde::{Deserialize, Serialize};

use oracle_ledger_core::{ProducerSchedule, PublicKey};

use crate::error::{LedgerError, Result};

/// How long mined digests stay in the in-memory index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep every mined digest in memory.
    #[default]
    Unbounded,
    /// Keep the digests of the most recent `n` blocks in memory and hand older
    /// ones to the configured [`MinedArchive`](crate::index::MinedArchive).
    RecentBlocks(usize),
}

/// Configuration for the Ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Public keys eligible to produce blocks, in rotation order.
    pub roster: Vec<PublicKey>,
    /// Consecutive heights assigned to one roster entry.
    pub blocks_per_producer: u64,
    /// Retention of the mined-digest index.
    #[serde(default)]
    pub retention: RetentionPolicy,
    /// Reject blocks whose producer is not the scheduled one.
    #[serde(default)]
    pub enforce_schedule: bool,
}

impl LedgerConfig {
    /// Create a configuration with unbounded retention and no schedule enforcement.
    pub fn new(roster: Vec<PublicKey>, blocks_per_producer: u64) -> Self {
        Self {
            roster,
            blocks_per_producer,
            retention: RetentionPolicy::default(),
            enforce_schedule: false,
        }
    }

    /// Set the retention policy.
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Turn producer-schedule enforcement on or off.
    pub fn with_schedule_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_schedule = enforce;
        self
    }

    /// Check the configuration and build the producer schedule from it.
    pub fn schedule(&self) -> Result<ProducerSchedule> {
        if self.retention == RetentionPolicy::RecentBlocks(0) {
            return Err(LedgerError::InvalidConfig(
                "retention window must hold at least one block".into(),
            ));
        }
        Ok(ProducerSchedule::new(
            self.roster.clone(),
            self.blocks_per_producer,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_ledger_core::ScheduleError;

    fn roster() -> Vec<PublicKey> {
        vec![PublicKey::from_bytes(b"A".to_vec())]
    }

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::new(roster(), 1);
        assert_eq!(config.retention, RetentionPolicy::Unbounded);
        assert!(!config.enforce_schedule);
        assert!(config.schedule().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = LedgerConfig::new(roster(), 1).with_retention(RetentionPolicy::RecentBlocks(0));
        assert!(matches!(config.schedule(), Err(LedgerError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_roster_rejected() {
        let config = LedgerConfig::new(Vec::new(), 1);
        assert!(matches!(
            config.schedule(),
            Err(LedgerError::Schedule(ScheduleError::EmptyRoster))
        ));
    }

    #[test]
    fn test_from_json_with_defaults() {
        let json = r#"{"roster": [[65], [66]], "blocks_per_producer": 2}"#;
        let config: LedgerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.roster.len(), 2);
        assert_eq!(config.retention, RetentionPolicy::Unbounded);
        assert!(!config.enforce_schedule);
    }

    #[test]
    fn test_from_json_with_window() {
        let json = r#"{
            "roster": [[65]],
            "blocks_per_producer": 1,
            "retention": {"recent_blocks": 8},
            "enforce_schedule": true
        }"#;
        let config: LedgerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.retention, RetentionPolicy::RecentBlocks(8));
        assert!(config.enforce_schedule);
    }
}
