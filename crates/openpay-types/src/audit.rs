//! Audit trail types.
//!
//! An [`AuditRecord`] captures a transaction's terminal outcome for the
//! history plane. It is written after the fact, best-effort: its absence
//! must never block or reverse a completed transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Transaction, TransactionId, TransactionKind, TransactionStatus, WalletId};

/// Write-once snapshot of a transaction outcome, keyed by transaction id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditRecord {
    pub transaction_id: TransactionId,
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub kind: TransactionKind,
    /// Terminal status at the time of recording.
    pub status: TransactionStatus,
    pub recorded_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Snapshot a transaction's outcome.
    #[must_use]
    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            transaction_id: tx.id,
            wallet_id: tx.wallet_id,
            amount: tx.amount,
            kind: tx.kind,
            status: tx.status,
            recorded_at: Utc::now(),
        }
    }
}
