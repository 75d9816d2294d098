//! Threshold fraud evaluator — hard gate in front of the ledger.
//!
//! Classification is a pure function of the amount against two
//! configurable thresholds. Every evaluation persists a write-once
//! verdict; a FRAUD label means no wallet may be touched for that
//! transaction.

use std::sync::Arc;

use openpay_types::{AccountId, FraudVerdict, RiskLabel, RiskThresholds, Result, TransactionId};
use rust_decimal::Decimal;

use crate::verdict_log::VerdictLog;

/// Deterministic threshold policy over (account, amount).
pub struct ThresholdEvaluator {
    thresholds: RiskThresholds,
    log: Arc<VerdictLog>,
}

impl ThresholdEvaluator {
    /// Create an evaluator with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_thresholds(RiskThresholds::default())
    }

    /// Create an evaluator with custom thresholds.
    #[must_use]
    pub fn with_thresholds(thresholds: RiskThresholds) -> Self {
        Self {
            thresholds,
            log: Arc::new(VerdictLog::new()),
        }
    }

    /// Classify an amount against the threshold policy.
    #[must_use]
    pub fn classify(&self, amount: Decimal) -> (RiskLabel, String) {
        if amount > self.thresholds.fraud_above {
            (
                RiskLabel::Fraud,
                format!(
                    "amount {amount} exceeds fraud threshold {}",
                    self.thresholds.fraud_above
                ),
            )
        } else if amount > self.thresholds.suspicious_above {
            (
                RiskLabel::Suspicious,
                format!(
                    "amount {amount} exceeds suspicious threshold {}",
                    self.thresholds.suspicious_above
                ),
            )
        } else {
            (RiskLabel::Safe, "transaction looks safe".to_string())
        }
    }

    /// Evaluate a proposed transaction and persist the verdict.
    pub async fn evaluate(
        &self,
        transaction_id: TransactionId,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<FraudVerdict> {
        let (label, reason) = self.classify(amount);
        let verdict = FraudVerdict::new(transaction_id, account_id, amount, label, reason);
        if label != RiskLabel::Safe {
            tracing::warn!(
                tx = %transaction_id,
                account = %account_id,
                %amount,
                %label,
                "transaction flagged by risk gate"
            );
        }
        self.log.record(verdict.clone()).await;
        Ok(verdict)
    }

    /// Handle to the verdict log for queries.
    #[must_use]
    pub fn verdict_log(&self) -> Arc<VerdictLog> {
        Arc::clone(&self.log)
    }
}

impl Default for ThresholdEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
