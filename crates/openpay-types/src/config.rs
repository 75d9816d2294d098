//! Configuration types for OpenPay components.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Threshold policy for the fraud evaluator.
///
/// - amount ≤ `suspicious_above` → SAFE
/// - `suspicious_above` < amount ≤ `fraud_above` → SUSPICIOUS
/// - amount > `fraud_above` → FRAUD
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskThresholds {
    pub suspicious_above: Decimal,
    pub fraud_above: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            suspicious_above: Decimal::new(constants::DEFAULT_SUSPICIOUS_ABOVE, 0),
            fraud_above: Decimal::new(constants::DEFAULT_FRAUD_ABOVE, 0),
        }
    }
}

/// Per-collaborator timeout budget for the orchestrator's outbound calls.
/// Every call is bounded; an elapsed timeout surfaces as the retryable
/// "unavailable" failure for that collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallTimeouts {
    pub fraud_ms: u64,
    pub ledger_ms: u64,
    pub settlement_ms: u64,
}

impl CallTimeouts {
    #[must_use]
    pub fn fraud(&self) -> Duration {
        Duration::from_millis(self.fraud_ms)
    }

    #[must_use]
    pub fn ledger(&self) -> Duration {
        Duration::from_millis(self.ledger_ms)
    }

    #[must_use]
    pub fn settlement(&self) -> Duration {
        Duration::from_millis(self.settlement_ms)
    }
}

impl Default for CallTimeouts {
    fn default() -> Self {
        Self {
            fraud_ms: constants::DEFAULT_FRAUD_TIMEOUT_MS,
            ledger_ms: constants::DEFAULT_LEDGER_TIMEOUT_MS,
            settlement_ms: constants::DEFAULT_SETTLEMENT_TIMEOUT_MS,
        }
    }
}

/// Audit outbox tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboxConfig {
    /// Bounded queue depth; submissions against a full queue are dropped
    /// with a warning, never blocking the transaction path.
    pub queue_depth: usize,
    /// Delivery attempts after the first failure.
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl OutboxConfig {
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for OutboxConfig {
    fn default() -> Self {
        Self {
            queue_depth: constants::DEFAULT_AUDIT_QUEUE_DEPTH,
            max_retries: constants::DEFAULT_AUDIT_MAX_RETRIES,
            retry_delay_ms: constants::DEFAULT_AUDIT_RETRY_DELAY_MS,
        }
    }
}
