//! # openpay-risk
//!
//! **Risk Gate**: fraud evaluation for proposed transactions.
//!
//! ## Design Principles
//!
//! - **Deterministic**: the threshold policy is a pure function of the
//!   amount; the same request always classifies the same way
//! - **No side effects beyond the verdict**: the evaluator persists its
//!   verdict and nothing else — it never calls back into the ledger or
//!   the orchestrator
//! - **Pluggable**: the orchestrator consumes the evaluator through a
//!   port, so stateful or model-based scoring can replace the threshold
//!   policy without touching the transaction flow
//!
//! ## Evaluation Flow
//!
//! ```text
//! Orchestrator → ThresholdEvaluator.evaluate(tx, account, amount)
//!              → classify against RiskThresholds
//!              → persist FraudVerdict in the VerdictLog
//!              → return the verdict
//! ```

pub mod evaluator;
pub mod verdict_log;

pub use evaluator::ThresholdEvaluator;
pub use verdict_log::VerdictLog;
