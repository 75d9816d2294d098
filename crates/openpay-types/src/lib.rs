//! # openpay-types
//!
//! Shared types, errors, and configuration for the **OpenPay** wallet
//! payment core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`WalletId`], [`TransactionId`], [`EntryId`], [`VerdictId`], [`VaNumber`]
//! - **Wallet model**: [`Wallet`], [`WalletStatus`]
//! - **Mutation log**: [`MutationLogEntry`], [`EntryDirection`]
//! - **Transaction model**: [`Transaction`], [`TransactionKind`], [`TransactionStatus`], [`FailureKind`]
//! - **Fraud model**: [`FraudVerdict`], [`RiskLabel`]
//! - **Audit model**: [`AuditRecord`]
//! - **Settlement model**: [`SettlementOutcome`]
//! - **Configuration**: [`RiskThresholds`], [`CallTimeouts`], [`OutboxConfig`]
//! - **Errors**: [`OpenpayError`] with `OP_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod audit;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod settlement;
pub mod transaction;
pub mod verdict;
pub mod wallet;

// Re-export all primary types at crate root for ergonomic imports:
//   use openpay_types::{Wallet, Transaction, FraudVerdict, ...};

pub use audit::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use settlement::*;
pub use transaction::*;
pub use verdict::*;
pub use wallet::*;

// Constants are accessed via `openpay_types::constants::FOO`
// (not re-exported to avoid name collisions).
