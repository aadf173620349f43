//! # Oracle Ledger Core
//!
//! Pure primitives for the Oracle Ledger: transactions, blocks, validators and
//! the producer schedule.
//!
//! This crate contains no I/O, no storage, no networking and no ledger state.
//!
//! ## Key Types
//!
//! - [`CryptoScheme`] - The pluggable digest/signature capability
//! - [`Transaction`] - A signed payload identified by its content [`Digest`]
//! - [`Block`] - An ordered batch of transactions linked to its predecessor
//! - [`ProducerSchedule`] - Round-robin assignment of heights to producers
//!
//! ## Schemes
//!
//! [`ReferenceScheme`] reproduces a placeholder scheme with no security
//! whatsoever. [`Ed25519Scheme`] uses Blake3 and Ed25519. Everything else is
//! generic over [`CryptoScheme`].

pub mod block;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod schedule;
pub mod transaction;
pub mod types;
pub mod validation;

pub use block::{block_hash_material, compute_block_hash, Block};
pub use canonical::{block_bytes, from_canonical_bytes, to_canonical_bytes, transaction_bytes};
pub use crypto::{CryptoScheme, Ed25519Scheme, ReferenceScheme};
pub use error::{BlockError, CoreError, MempoolError, ScheduleError, ValidationError};
pub use schedule::{producer_index_for_height, ProducerSchedule};
pub use transaction::Transaction;
pub use types::{Digest, PrivateKey, PublicKey, Signature, GENESIS_PREV_HASH};
pub use validation::{validate_block_contents, validate_transaction};
