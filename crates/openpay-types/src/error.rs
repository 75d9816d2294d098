//! Error types for the OpenPay wallet payment core.
//!
//! All errors use the `OP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Wallet / ledger errors
//! - 2xx: Transaction errors
//! - 3xx: Fraud evaluation errors
//! - 4xx: Settlement errors
//! - 5xx: Audit errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{TransactionId, TransactionStatus, VerdictId, WalletId};

/// Central error enum for all OpenPay operations.
#[derive(Debug, Error)]
pub enum OpenpayError {
    // =================================================================
    // Wallet / Ledger Errors (1xx)
    // =================================================================
    /// The requested wallet does not exist.
    #[error("OP_ERR_100: Wallet not found: {0}")]
    WalletNotFound(WalletId),

    /// The wallet is frozen and accepts no balance mutation.
    #[error("OP_ERR_101: Wallet is frozen: {0}")]
    WalletFrozen(WalletId),

    /// Not enough balance to perform the debit.
    #[error("OP_ERR_102: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// Mutation amounts must be strictly positive.
    #[error("OP_ERR_103: Invalid amount: {0}")]
    InvalidAmount(Decimal),

    /// A wallet holding funds cannot be deleted.
    #[error("OP_ERR_104: Wallet {wallet_id} still holds balance {balance}")]
    WalletHasBalance {
        wallet_id: WalletId,
        balance: Decimal,
    },

    /// Stored balance disagrees with the replayed mutation log —
    /// a fatal integrity fault, never silently tolerated.
    #[error("OP_ERR_105: Ledger drift on wallet {wallet_id}: balance {actual} != replayed {expected}")]
    LedgerDrift {
        wallet_id: WalletId,
        expected: Decimal,
        actual: Decimal,
    },

    /// The ledger store could not be reached or timed out. Retryable.
    #[error("OP_ERR_106: Ledger unavailable: {reason}")]
    LedgerUnavailable { reason: String },

    // =================================================================
    // Transaction Errors (2xx)
    // =================================================================
    /// Malformed request (bad amount, wrong kind shape, ownership
    /// mismatch). Not retryable as-is.
    #[error("OP_ERR_200: Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// The requested transaction was not found for this account.
    #[error("OP_ERR_201: Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// An illegal state machine transition was attempted.
    #[error("OP_ERR_202: Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    /// The caller cancelled before the ledger mutation was issued.
    #[error("OP_ERR_203: Transaction cancelled: {0}")]
    Cancelled(TransactionId),

    // =================================================================
    // Fraud Evaluation Errors (3xx)
    // =================================================================
    /// The evaluator returned a FRAUD verdict. Terminal.
    #[error("OP_ERR_300: Fraud rejected: {reason}")]
    FraudRejected { reason: String },

    /// The evaluator timed out or errored. Retryable; distinct from a
    /// FRAUD verdict.
    #[error("OP_ERR_301: Fraud check unavailable: {reason}")]
    FraudCheckUnavailable { reason: String },

    /// The requested verdict was not found in the verdict log.
    #[error("OP_ERR_302: Verdict not found: {0}")]
    VerdictNotFound(VerdictId),

    // =================================================================
    // Settlement Errors (4xx)
    // =================================================================
    /// The settlement adapter reported the reference unknown or already
    /// settled. Terminal; no ledger mutation occurred.
    #[error("OP_ERR_400: Settlement mismatch: {reason}")]
    SettlementMismatch { reason: String },

    /// The settlement adapter could not be reached or timed out. Retryable.
    #[error("OP_ERR_401: Settlement unavailable: {reason}")]
    SettlementUnavailable { reason: String },

    // =================================================================
    // Audit Errors (5xx)
    // =================================================================
    /// The audit sink refused a record. Logged only; never surfaced as
    /// a transaction failure.
    #[error("OP_ERR_500: Audit recording failed: {reason}")]
    AuditRecordingFailed { reason: String },

    /// The audit outbox queue is full; the record was dropped.
    #[error("OP_ERR_501: Audit outbox queue full")]
    AuditQueueFull,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OP_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("OP_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenpayError>;
