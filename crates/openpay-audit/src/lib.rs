//! # openpay-audit
//!
//! **Audit Plane**: after-the-fact recording of transaction outcomes.
//!
//! ## Architecture
//!
//! 1. **AuditSink**: the recording contract — idempotent on transaction
//!    id to tolerate at-least-once delivery
//! 2. **AuditLog**: in-memory sink with per-transaction and recency
//!    queries
//! 3. **AuditOutbox**: bounded queue + worker task between the
//!    orchestrator and the sink, so a slow or broken sink can never
//!    stall the transaction critical path
//!
//! ## Delivery Flow
//!
//! ```text
//! Orchestrator → AuditOutbox.submit()   (try_send, never blocks)
//!              → worker task → AuditSink.record()  (bounded retries)
//!              → on exhaustion: warn + drop, transaction unaffected
//! ```

pub mod outbox;
pub mod recorder;

pub use outbox::AuditOutbox;
pub use recorder::{AuditLog, AuditSink};
