//! Transaction model and the orchestration state machine's vocabulary.
//!
//! A transaction's status moves only along the transitions enumerated in
//! [`TransactionStatus::can_transition_to`]; the orchestrator is the sole
//! driver. Terminal states never change.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, TransactionId, VaNumber, WalletId};

/// What kind of money movement a transaction performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Credit the wallet from an external source.
    Deposit,
    /// Debit the wallet against a third-party virtual-account reference.
    Payment,
    /// Debit the wallet toward another wallet or account.
    Transfer,
}

impl TransactionKind {
    /// Payments must carry a virtual-account reference; other kinds must not.
    #[must_use]
    pub fn requires_va(&self) -> bool {
        matches!(self, Self::Payment)
    }

    /// Whether this kind debits the wallet (as opposed to crediting it).
    #[must_use]
    pub fn is_debit(&self) -> bool {
        matches!(self, Self::Payment | Self::Transfer)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "DEPOSIT"),
            Self::Payment => write!(f, "PAYMENT"),
            Self::Transfer => write!(f, "TRANSFER"),
        }
    }
}

/// Lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Persisted, fraud check not yet started.
    Pending,
    /// Waiting on the fraud evaluator.
    FraudCheck,
    /// Cleared by the evaluator; ledger mutation pending.
    Safe,
    /// Cleared but flagged by the evaluator; ledger mutation pending.
    Suspicious,
    /// Fraud verdict; no ledger mutation ever occurred. Terminal.
    Rejected,
    /// Ledger mutation applied. Terminal.
    Success,
    /// Did not complete; `failure` carries the kind. Terminal.
    Failed,
}

impl TransactionStatus {
    /// No further transition occurs from a terminal status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Success | Self::Failed)
    }

    /// The transition table of the orchestration state machine.
    #[must_use]
    pub fn can_transition_to(&self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::FraudCheck | Self::Failed)
                | (
                    Self::FraudCheck,
                    Self::Safe | Self::Suspicious | Self::Rejected | Self::Failed
                )
                | (Self::Safe | Self::Suspicious, Self::Success | Self::Failed)
        )
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::FraudCheck => write!(f, "FRAUD_CHECK"),
            Self::Safe => write!(f, "SAFE"),
            Self::Suspicious => write!(f, "SUSPICIOUS"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Success => write!(f, "SUCCESS"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Why a transaction ended `Failed` (or `Rejected`, for fraud).
///
/// Retryable kinds mean the system could not evaluate or apply the
/// transaction; the caller may resubmit **under a fresh transaction id**.
/// Non-retryable kinds mean the transaction was evaluated and refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    FraudRejected,
    FraudCheckUnavailable,
    InsufficientBalance,
    WalletFrozen,
    WalletNotFound,
    SettlementMismatch,
    SettlementUnavailable,
    LedgerUnavailable,
    Cancelled,
}

impl FailureKind {
    /// Infrastructure failures are retryable; business refusals are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::FraudCheckUnavailable | Self::SettlementUnavailable | Self::LedgerUnavailable
        )
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FraudRejected => write!(f, "FRAUD_REJECTED"),
            Self::FraudCheckUnavailable => write!(f, "FRAUD_CHECK_UNAVAILABLE"),
            Self::InsufficientBalance => write!(f, "INSUFFICIENT_BALANCE"),
            Self::WalletFrozen => write!(f, "WALLET_FROZEN"),
            Self::WalletNotFound => write!(f, "WALLET_NOT_FOUND"),
            Self::SettlementMismatch => write!(f, "SETTLEMENT_MISMATCH"),
            Self::SettlementUnavailable => write!(f, "SETTLEMENT_UNAVAILABLE"),
            Self::LedgerUnavailable => write!(f, "LEDGER_UNAVAILABLE"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A single money movement, created by the orchestrator on request and
/// driven to a terminal status by its state machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub kind: TransactionKind,
    /// Present iff `kind == Payment`.
    pub va_number: Option<VaNumber>,
    pub status: TransactionStatus,
    /// Set when `status` is `Failed` (and to `FraudRejected` on `Rejected`).
    pub failure: Option<FailureKind>,
    /// Wallet balance right after a successful mutation.
    pub balance_after: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction in `Pending`.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        wallet_id: WalletId,
        amount: Decimal,
        kind: TransactionKind,
        va_number: Option<VaNumber>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            account_id,
            wallet_id,
            amount,
            kind,
            va_number,
            status: TransactionStatus::Pending,
            failure: None,
            balance_after: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Transaction {
    pub fn dummy(kind: TransactionKind, amount: Decimal) -> Self {
        let va = kind
            .requires_va()
            .then(|| VaNumber::new("8808-0000-0000"));
        Self::new(AccountId::new(), WalletId::new(), amount, kind, va)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(TransactionStatus::Success.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
        assert!(TransactionStatus::Rejected.is_terminal());
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(!TransactionStatus::FraudCheck.is_terminal());
        assert!(!TransactionStatus::Safe.is_terminal());
        assert!(!TransactionStatus::Suspicious.is_terminal());
    }

    #[test]
    fn allowed_transitions() {
        use TransactionStatus::*;
        assert!(Pending.can_transition_to(FraudCheck));
        assert!(Pending.can_transition_to(Failed));
        assert!(FraudCheck.can_transition_to(Safe));
        assert!(FraudCheck.can_transition_to(Suspicious));
        assert!(FraudCheck.can_transition_to(Rejected));
        assert!(FraudCheck.can_transition_to(Failed));
        assert!(Safe.can_transition_to(Success));
        assert!(Suspicious.can_transition_to(Failed));
    }

    #[test]
    fn forbidden_transitions() {
        use TransactionStatus::*;
        // Terminal states never move.
        assert!(!Success.can_transition_to(Failed));
        assert!(!Rejected.can_transition_to(Success));
        assert!(!Failed.can_transition_to(Pending));
        // No skipping the fraud check.
        assert!(!Pending.can_transition_to(Success));
        assert!(!Pending.can_transition_to(Safe));
        // No mutation after a fraud rejection.
        assert!(!Rejected.can_transition_to(Safe));
    }

    #[test]
    fn payment_requires_va() {
        assert!(TransactionKind::Payment.requires_va());
        assert!(!TransactionKind::Deposit.requires_va());
        assert!(!TransactionKind::Transfer.requires_va());
    }

    #[test]
    fn debit_kinds() {
        assert!(TransactionKind::Payment.is_debit());
        assert!(TransactionKind::Transfer.is_debit());
        assert!(!TransactionKind::Deposit.is_debit());
    }

    #[test]
    fn retryable_failures() {
        assert!(FailureKind::FraudCheckUnavailable.is_retryable());
        assert!(FailureKind::LedgerUnavailable.is_retryable());
        assert!(FailureKind::SettlementUnavailable.is_retryable());
        assert!(!FailureKind::InsufficientBalance.is_retryable());
        assert!(!FailureKind::FraudRejected.is_retryable());
        assert!(!FailureKind::SettlementMismatch.is_retryable());
        assert!(!FailureKind::Cancelled.is_retryable());
    }

    #[test]
    fn new_transaction_is_pending() {
        let tx = Transaction::dummy(TransactionKind::Deposit, Decimal::new(1000, 0));
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.failure.is_none());
        assert!(tx.balance_after.is_none());
        assert!(!tx.is_terminal());
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", TransactionStatus::FraudCheck), "FRAUD_CHECK");
        assert_eq!(format!("{}", TransactionStatus::Success), "SUCCESS");
        assert_eq!(
            format!("{}", FailureKind::InsufficientBalance),
            "INSUFFICIENT_BALANCE"
        );
    }

    #[test]
    fn transaction_serde_roundtrip() {
        let tx = Transaction::dummy(TransactionKind::Payment, Decimal::new(20000, 0));
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, back);
    }
}
