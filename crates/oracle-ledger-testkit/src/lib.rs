//! # Oracle Ledger Testkit
//!
//! Testing utilities for the Oracle Ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Vectors**: Known answers for the reference digest/signature arithmetic
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Producer rosters, ledgers and signed transactions
//!
//! ## Test Fixtures
//!
//! ```rust
//! use oracle_ledger_testkit::fixtures::{unique_payload, TestFixture};
//!
//! let fixture = TestFixture::new(3);
//! let mut ledger = fixture.ledger(2);
//! ledger.submit_transaction(fixture.make_tx(unique_payload(0))).unwrap();
//! let applied = fixture.mine_next(&mut ledger);
//! assert_eq!(applied.mined, 1);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use oracle_ledger_testkit::generators::{tx_from_params, TxParams};
//!
//! proptest! {
//!     #[test]
//!     fn digest_is_deterministic(params: TxParams) {
//!         prop_assert_eq!(tx_from_params(&params).digest, tx_from_params(&params).digest);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{unique_payload, TestFixture};
pub use generators::{tx_from_params, TxParams};
pub use vectors::{all_vectors, verify_all_vectors, ReferenceVector};
