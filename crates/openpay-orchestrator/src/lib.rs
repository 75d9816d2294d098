//! # openpay-orchestrator
//!
//! **Orchestration Plane**: drives a transaction from initiation through
//! fraud screening, settlement confirmation, balance mutation, and audit
//! recording, tolerating partial failures of every collaborator.
//!
//! ## Architecture
//!
//! The orchestrator sits between the API layer and the other planes:
//! 1. **Ports**: `FraudCheck`, `LedgerGateway`, `SettlementGateway` —
//!    async boundaries the orchestrator calls with explicit timeouts
//! 2. **TransactionStore**: persists transactions and enforces the
//!    state machine's transition table on every status change
//! 3. **Orchestrator**: the state machine itself
//! 4. **StaticSettlementDirectory**: reference settlement adapter for
//!    virtual-account confirmation
//!
//! ## Transaction Flow
//!
//! ```text
//! caller → validate → PENDING → FRAUD_CHECK
//!        → verdict FRAUD            → REJECTED
//!        → verdict SAFE/SUSPICIOUS  → (PAYMENT: confirm settlement)
//!        → ledger credit/debit      → SUCCESS | FAILED
//!        → audit record (fire-and-forget, outcome already decided)
//! ```
//!
//! Business refusals come back as data in the transaction's terminal
//! status; only malformed requests surface as errors.

pub mod orchestrator;
pub mod ports;
pub mod settlement;
pub mod txstore;

pub use orchestrator::{CancelHandle, Orchestrator};
pub use ports::{FraudCheck, LedgerGateway, SettlementGateway};
pub use settlement::StaticSettlementDirectory;
pub use txstore::TransactionStore;
