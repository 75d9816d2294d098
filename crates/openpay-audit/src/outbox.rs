//! Audit outbox — decouples the transaction path from the audit sink.
//!
//! Submission is a non-blocking `try_send` into a bounded queue; a
//! worker task drains the queue and delivers to the sink with bounded
//! retries. A full queue or a dead sink costs a warning and a dropped
//! record, never a failed transaction.

use std::sync::Arc;

use openpay_types::{AuditRecord, OutboxConfig};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::recorder::AuditSink;

/// Submission handle for audit records. Cheap to clone.
#[derive(Clone)]
pub struct AuditOutbox {
    tx: mpsc::Sender<AuditRecord>,
}

impl AuditOutbox {
    /// Spawn the outbox worker delivering into `sink`. Returns the
    /// submission handle and the worker's join handle; the worker exits
    /// once every submission handle is dropped and the queue is drained.
    #[must_use]
    pub fn spawn(sink: Arc<dyn AuditSink>, config: OutboxConfig) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<AuditRecord>(config.queue_depth);
        let worker = tokio::spawn(async move {
            while let Some(record) = rx.recv().await {
                deliver(&*sink, record, &config).await;
            }
        });
        (Self { tx }, worker)
    }

    /// Submit a record, fire-and-forget. A full queue drops the record
    /// with a warning; the caller's outcome is already decided and must
    /// not change.
    pub fn submit(&self, record: AuditRecord) {
        if let Err(err) = self.tx.try_send(record) {
            let record = match err {
                mpsc::error::TrySendError::Full(r) | mpsc::error::TrySendError::Closed(r) => r,
            };
            tracing::warn!(
                tx = %record.transaction_id,
                status = %record.status,
                "audit outbox rejected record, dropping"
            );
        }
    }
}

async fn deliver(sink: &dyn AuditSink, record: AuditRecord, config: &OutboxConfig) {
    let mut attempts = 0;
    loop {
        match sink.record(record.clone()).await {
            Ok(()) => return,
            Err(err) => {
                attempts += 1;
                if attempts > config.max_retries {
                    tracing::warn!(
                        tx = %record.transaction_id,
                        status = %record.status,
                        %err,
                        attempts,
                        "audit recording failed, giving up"
                    );
                    return;
                }
                tokio::time::sleep(config.retry_delay()).await;
            }
        }
    }
}
