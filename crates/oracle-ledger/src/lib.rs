//! # Oracle Ledger
//!
//! A single-writer, append-only ledger for oracle data reports.
//!
//! ## Overview
//!
//! - **Mempool**: validated transactions waiting in submission order
//! - **Blocks**: batches proposed from the whole mempool and accepted only if
//!   they extend the tip and mine nothing twice
//! - **Schedule**: producers rotate round-robin, a fixed number of blocks each
//! - **Aggregation**: an observer folds `provide_data` reports into per-key values
//!
//! ## Usage
//!
//! ```rust
//! use oracle_ledger::{Ledger, LedgerConfig};
//! use oracle_ledger::core::{CryptoScheme, PrivateKey, ReferenceScheme, Transaction};
//!
//! let scheme = ReferenceScheme;
//! let producer_key = PrivateKey::from_bytes(b"producer".to_vec());
//! let producer = scheme.derive_public_key(&producer_key).unwrap();
//!
//! let mut ledger = Ledger::new(scheme, LedgerConfig::new(vec![producer], 2)).unwrap();
//!
//! let sender = PrivateKey::from_bytes(b"sender".to_vec());
//! let tx = Transaction::sign(&scheme, &sender, b"hello".to_vec()).unwrap();
//! ledger.submit_transaction(tx).unwrap();
//!
//! let block = ledger.propose_block(&producer_key).unwrap();
//! ledger.apply_block(block).unwrap();
//! assert_eq!(ledger.current_height(), 1);
//! assert!(ledger.mempool().is_empty());
//! ```
//!
//! ## Re-exports
//!
//! - `oracle_ledger::core` - Primitives (Transaction, Block, CryptoScheme, ...)

pub mod aggregate;
pub mod config;
pub mod error;
pub mod index;
pub mod ledger;
pub mod mempool;
pub mod observer;
pub mod shared;
pub mod snapshot;

pub use oracle_ledger_core as core;

pub use aggregate::{AggregateValue, Aggregator, OraclePayload, ReportValue};
pub use config::{LedgerConfig, RetentionPolicy};
pub use error::{LedgerError, Result};
pub use index::{MemoryArchive, MinedArchive, MinedIndex};
pub use ledger::{Applied, Ledger};
pub use mempool::Mempool;
pub use observer::BlockObserver;
pub use shared::SharedLedger;
pub use snapshot::LedgerSnapshot;

pub use oracle_ledger_core::{
    Block, BlockError, CryptoScheme, Digest, Ed25519Scheme, MempoolError, PrivateKey, PublicKey,
    ReferenceScheme, Transaction,
};
