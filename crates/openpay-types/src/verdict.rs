//! Fraud verdict types.
//!
//! A verdict is produced once per evaluation, persisted by the evaluator,
//! and consumed by the orchestrator. It is never updated or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, TransactionId, VerdictId};

/// Risk classification of a proposed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Safe,
    /// Allowed to proceed, but flagged and logged.
    Suspicious,
    /// Must not debit or credit any wallet.
    Fraud,
}

impl RiskLabel {
    /// Whether a transaction with this label may touch the ledger.
    #[must_use]
    pub fn allows_mutation(&self) -> bool {
        !matches!(self, Self::Fraud)
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Suspicious => write!(f, "SUSPICIOUS"),
            Self::Fraud => write!(f, "FRAUD"),
        }
    }
}

/// Write-once record of a fraud evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FraudVerdict {
    pub id: VerdictId,
    pub transaction_id: TransactionId,
    pub account_id: AccountId,
    pub amount: Decimal,
    pub label: RiskLabel,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl FraudVerdict {
    #[must_use]
    pub fn new(
        transaction_id: TransactionId,
        account_id: AccountId,
        amount: Decimal,
        label: RiskLabel,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: VerdictId::new(),
            transaction_id,
            account_id,
            amount,
            label,
            reason: reason.into(),
            created_at: Utc::now(),
        }
    }
}
