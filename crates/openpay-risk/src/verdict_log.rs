//! Write-once storage for fraud verdicts.
//!
//! Verdicts are appended as they are produced and never updated or
//! deleted afterwards.

use openpay_types::{FraudVerdict, OpenpayError, Result, TransactionId, VerdictId};
use tokio::sync::RwLock;

/// Append-only verdict store with id and transaction lookups.
pub struct VerdictLog {
    verdicts: RwLock<Vec<FraudVerdict>>,
}

impl VerdictLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            verdicts: RwLock::new(Vec::new()),
        }
    }

    /// Append a verdict.
    pub async fn record(&self, verdict: FraudVerdict) {
        self.verdicts.write().await.push(verdict);
    }

    /// Fetch a verdict by id.
    ///
    /// # Errors
    /// `VerdictNotFound` if absent.
    pub async fn get(&self, id: VerdictId) -> Result<FraudVerdict> {
        self.verdicts
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(OpenpayError::VerdictNotFound(id))
    }

    /// The verdict produced for a transaction, if any.
    pub async fn for_transaction(&self, tx: TransactionId) -> Option<FraudVerdict> {
        self.verdicts
            .read()
            .await
            .iter()
            .find(|v| v.transaction_id == tx)
            .cloned()
    }

    /// Most recent verdicts first, up to `limit`.
    pub async fn recent(&self, limit: usize) -> Vec<FraudVerdict> {
        self.verdicts
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.verdicts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.verdicts.read().await.is_empty()
    }
}

impl Default for VerdictLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use openpay_types::{AccountId, RiskLabel};
    use rust_decimal::Decimal;

    use super::*;

    fn verdict(label: RiskLabel) -> FraudVerdict {
        FraudVerdict::new(
            TransactionId::new(),
            AccountId::new(),
            Decimal::new(1_000, 0),
            label,
            "test",
        )
    }

    #[tokio::test]
    async fn record_and_get() {
        let log = VerdictLog::new();
        let v = verdict(RiskLabel::Safe);
        log.record(v.clone()).await;
        assert_eq!(log.get(v.id).await.unwrap(), v);
        assert_eq!(log.len().await, 1);
    }

    #[tokio::test]
    async fn missing_verdict_not_found() {
        let log = VerdictLog::new();
        let err = log.get(VerdictId::new()).await.unwrap_err();
        assert!(matches!(err, OpenpayError::VerdictNotFound(_)));
    }

    #[tokio::test]
    async fn lookup_by_transaction() {
        let log = VerdictLog::new();
        let v = verdict(RiskLabel::Fraud);
        log.record(v.clone()).await;
        assert_eq!(log.for_transaction(v.transaction_id).await, Some(v));
        assert_eq!(log.for_transaction(TransactionId::new()).await, None);
    }

    #[tokio::test]
    async fn recent_is_newest_first() {
        let log = VerdictLog::new();
        let a = verdict(RiskLabel::Safe);
        let b = verdict(RiskLabel::Suspicious);
        let c = verdict(RiskLabel::Fraud);
        log.record(a).await;
        log.record(b.clone()).await;
        log.record(c.clone()).await;

        let recent = log.recent(2).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0], c);
        assert_eq!(recent[1], b);
    }
}
