//! The audit recording contract and the in-memory audit log.
//!
//! Recording is idempotent on transaction id: the outbox delivers
//! at-least-once, so re-delivery of an already-recorded outcome must be
//! a no-op success, never a duplicate row.

use std::collections::HashMap;

use async_trait::async_trait;
use openpay_types::{AuditRecord, Result, TransactionId};
use tokio::sync::RwLock;

/// Destination for audit records. Implementations must be idempotent on
/// the record's transaction id.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, record: AuditRecord) -> Result<()>;
}

struct AuditLogInner {
    by_tx: HashMap<TransactionId, AuditRecord>,
    /// Insertion order, oldest first.
    order: Vec<TransactionId>,
}

/// In-memory audit log.
pub struct AuditLog {
    inner: RwLock<AuditLogInner>,
}

impl AuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(AuditLogInner {
                by_tx: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    /// The recorded outcome for a transaction, if any.
    pub async fn for_transaction(&self, tx: TransactionId) -> Option<AuditRecord> {
        self.inner.read().await.by_tx.get(&tx).cloned()
    }

    /// Most recently recorded outcomes first, up to `limit`.
    pub async fn recent(&self, limit: usize) -> Vec<AuditRecord> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .rev()
            .take(limit)
            .filter_map(|tx| inner.by_tx.get(tx).cloned())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_tx.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.by_tx.is_empty()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for AuditLog {
    async fn record(&self, record: AuditRecord) -> Result<()> {
        let mut inner = self.inner.write().await;
        // Idempotent: the first recorded outcome for a transaction wins.
        if inner.by_tx.contains_key(&record.transaction_id) {
            return Ok(());
        }
        inner.order.push(record.transaction_id);
        inner.by_tx.insert(record.transaction_id, record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use openpay_types::{Transaction, TransactionKind, TransactionStatus};
    use rust_decimal::Decimal;

    use super::*;

    fn record_for(status: TransactionStatus) -> AuditRecord {
        let mut tx = Transaction::dummy(TransactionKind::Deposit, Decimal::new(1_000, 0));
        tx.status = status;
        AuditRecord::from_transaction(&tx)
    }

    #[tokio::test]
    async fn record_and_lookup() {
        let log = AuditLog::new();
        let record = record_for(TransactionStatus::Success);
        log.record(record.clone()).await.unwrap();
        assert_eq!(log.for_transaction(record.transaction_id).await, Some(record));
        assert_eq!(log.len().await, 1);
    }

    #[tokio::test]
    async fn redelivery_is_a_noop() {
        let log = AuditLog::new();
        let first = record_for(TransactionStatus::Success);
        log.record(first.clone()).await.unwrap();

        // Same transaction id delivered again with a different snapshot:
        // the original outcome is kept.
        let mut replay = first.clone();
        replay.status = TransactionStatus::Failed;
        log.record(replay).await.unwrap();

        assert_eq!(log.len().await, 1);
        let stored = log.for_transaction(first.transaction_id).await.unwrap();
        assert_eq!(stored.status, TransactionStatus::Success);
    }

    #[tokio::test]
    async fn recent_is_newest_first() {
        let log = AuditLog::new();
        let a = record_for(TransactionStatus::Success);
        let b = record_for(TransactionStatus::Failed);
        let c = record_for(TransactionStatus::Rejected);
        log.record(a).await.unwrap();
        log.record(b.clone()).await.unwrap();
        log.record(c.clone()).await.unwrap();

        let recent = log.recent(2).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].transaction_id, c.transaction_id);
        assert_eq!(recent[1].transaction_id, b.transaction_id);
    }
}
