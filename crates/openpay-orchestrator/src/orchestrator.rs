//! The transaction orchestrator — an explicit finite-state machine over
//! the fraud, settlement, ledger, and audit boundaries.
//!
//! Suspension happens only at the outbound call boundaries, one call at
//! a time per transaction, each bounded by a configured timeout. The
//! ledger mutation is issued at most once per transaction lifecycle with
//! no internal retry, so a transaction id can never double-apply.
//! Business refusals (fraud, insufficient balance, frozen wallet,
//! settlement mismatch) end as data in the transaction's terminal
//! status; only malformed requests surface as errors to the caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use openpay_audit::AuditOutbox;
use openpay_types::{
    AccountId, AuditRecord, CallTimeouts, FailureKind, OpenpayError, Result, RiskLabel,
    Transaction, TransactionId, TransactionKind, TransactionStatus, VaNumber, WalletId,
};
use rust_decimal::Decimal;
use tokio::time::timeout;

use crate::ports::{FraudCheck, LedgerGateway, SettlementGateway};
use crate::txstore::TransactionStore;

/// Cooperative cancellation flag for an in-flight transaction.
///
/// Checked at every call boundary up to the point the ledger mutation is
/// issued; after that the transaction runs to completion and the ledger
/// outcome is authoritative.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect only before the ledger call.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drives transactions through fraud screening, settlement confirmation,
/// balance mutation, and audit recording.
pub struct Orchestrator {
    fraud: Arc<dyn FraudCheck>,
    ledger: Arc<dyn LedgerGateway>,
    settlement: Arc<dyn SettlementGateway>,
    audit: AuditOutbox,
    store: TransactionStore,
    timeouts: CallTimeouts,
}

impl Orchestrator {
    #[must_use]
    pub fn new(
        fraud: Arc<dyn FraudCheck>,
        ledger: Arc<dyn LedgerGateway>,
        settlement: Arc<dyn SettlementGateway>,
        audit: AuditOutbox,
        timeouts: CallTimeouts,
    ) -> Self {
        Self {
            fraud,
            ledger,
            settlement,
            audit,
            store: TransactionStore::new(),
            timeouts,
        }
    }

    /// Create and drive a transaction to a terminal status.
    ///
    /// # Errors
    /// `InvalidRequest` for malformed input (non-positive amount, wrong
    /// kind shape, wallet owned by another account) — rejected before
    /// any fraud check or ledger call, with nothing persisted.
    pub async fn create_transaction(
        &self,
        account_id: AccountId,
        wallet_id: WalletId,
        amount: Decimal,
        kind: TransactionKind,
        va_number: Option<VaNumber>,
    ) -> Result<Transaction> {
        self.create_transaction_with_cancel(
            account_id,
            wallet_id,
            amount,
            kind,
            va_number,
            &CancelHandle::new(),
        )
        .await
    }

    /// [`Self::create_transaction`] with a caller-held cancellation flag.
    pub async fn create_transaction_with_cancel(
        &self,
        account_id: AccountId,
        wallet_id: WalletId,
        amount: Decimal,
        kind: TransactionKind,
        va_number: Option<VaNumber>,
        cancel: &CancelHandle,
    ) -> Result<Transaction> {
        self.validate(account_id, wallet_id, amount, kind, va_number.as_ref())
            .await?;

        let tx = Transaction::new(account_id, wallet_id, amount, kind, va_number.clone());
        let id = tx.id;
        self.store.insert(tx).await;
        self.store.transition(id, TransactionStatus::FraudCheck).await?;

        if cancel.is_cancelled() {
            return self.finish(id, TransactionStatus::Failed, Some(FailureKind::Cancelled), None)
                .await;
        }

        // Fraud screening. A timeout or evaluator error is a retryable
        // failure, never conflated with a FRAUD verdict.
        let verdict = match timeout(
            self.timeouts.fraud(),
            self.fraud.evaluate(id, account_id, amount),
        )
        .await
        {
            Ok(Ok(verdict)) => verdict,
            Ok(Err(err)) => {
                tracing::warn!(tx = %id, %err, "fraud evaluator failed");
                return self
                    .finish(
                        id,
                        TransactionStatus::Failed,
                        Some(FailureKind::FraudCheckUnavailable),
                        None,
                    )
                    .await;
            }
            Err(_) => {
                tracing::warn!(tx = %id, "fraud evaluator timed out");
                return self
                    .finish(
                        id,
                        TransactionStatus::Failed,
                        Some(FailureKind::FraudCheckUnavailable),
                        None,
                    )
                    .await;
            }
        };

        match verdict.label {
            RiskLabel::Fraud => {
                return self
                    .finish(
                        id,
                        TransactionStatus::Rejected,
                        Some(FailureKind::FraudRejected),
                        None,
                    )
                    .await;
            }
            RiskLabel::Safe => {
                self.store.transition(id, TransactionStatus::Safe).await?;
            }
            RiskLabel::Suspicious => {
                self.store.transition(id, TransactionStatus::Suspicious).await?;
            }
        }

        if cancel.is_cancelled() {
            return self.finish(id, TransactionStatus::Failed, Some(FailureKind::Cancelled), None)
                .await;
        }

        // Settlement confirmation precedes the ledger mutation for
        // payments: a mismatched reference must leave the wallet untouched.
        if kind == TransactionKind::Payment {
            let va = va_number
                .as_ref()
                .ok_or_else(|| OpenpayError::Internal("payment without va".to_string()))?;
            match timeout(self.timeouts.settlement(), self.settlement.confirm(va, amount)).await {
                Ok(Ok(outcome)) if outcome.is_confirmed() => {}
                Ok(Ok(outcome)) => {
                    tracing::warn!(tx = %id, %va, %outcome, "settlement refused");
                    return self
                        .finish(
                            id,
                            TransactionStatus::Failed,
                            Some(FailureKind::SettlementMismatch),
                            None,
                        )
                        .await;
                }
                Ok(Err(err)) => {
                    tracing::warn!(tx = %id, %va, %err, "settlement adapter failed");
                    return self
                        .finish(
                            id,
                            TransactionStatus::Failed,
                            Some(FailureKind::SettlementUnavailable),
                            None,
                        )
                        .await;
                }
                Err(_) => {
                    tracing::warn!(tx = %id, %va, "settlement adapter timed out");
                    return self
                        .finish(
                            id,
                            TransactionStatus::Failed,
                            Some(FailureKind::SettlementUnavailable),
                            None,
                        )
                        .await;
                }
            }
        }

        if cancel.is_cancelled() {
            return self.finish(id, TransactionStatus::Failed, Some(FailureKind::Cancelled), None)
                .await;
        }

        // The single ledger mutation for this transaction. No retry:
        // retrying here could double-apply under an ambiguous timeout.
        let reason = format!("{kind} {id}");
        let mutation = if kind.is_debit() {
            self.ledger.debit(wallet_id, amount, Some(id), &reason)
        } else {
            self.ledger.credit(wallet_id, amount, Some(id), &reason)
        };
        match timeout(self.timeouts.ledger(), mutation).await {
            Ok(Ok(entry)) => {
                self.finish(id, TransactionStatus::Success, None, Some(entry.balance_after))
                    .await
            }
            Ok(Err(err)) => {
                let failure = ledger_failure(&err);
                tracing::warn!(tx = %id, %err, %failure, "ledger mutation refused");
                self.finish(id, TransactionStatus::Failed, Some(failure), None)
                    .await
            }
            Err(_) => {
                tracing::warn!(tx = %id, "ledger mutation timed out");
                self.finish(
                    id,
                    TransactionStatus::Failed,
                    Some(FailureKind::LedgerUnavailable),
                    None,
                )
                .await
            }
        }
    }

    /// Fetch a transaction owned by `account_id`.
    ///
    /// # Errors
    /// `TransactionNotFound` if absent or owned by another account.
    pub async fn get_transaction(
        &self,
        account_id: AccountId,
        id: TransactionId,
    ) -> Result<Transaction> {
        self.store.get(account_id, id).await
    }

    /// All transactions of an account, most recent first.
    pub async fn list_transactions(&self, account_id: AccountId) -> Vec<Transaction> {
        self.store.list_for_account(account_id).await
    }

    /// Request shape checks, performed before anything is persisted.
    async fn validate(
        &self,
        account_id: AccountId,
        wallet_id: WalletId,
        amount: Decimal,
        kind: TransactionKind,
        va_number: Option<&VaNumber>,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(OpenpayError::InvalidRequest {
                reason: format!("amount must be positive, got {amount}"),
            });
        }
        match (kind.requires_va(), va_number) {
            (true, None) => {
                return Err(OpenpayError::InvalidRequest {
                    reason: "payment requires a virtual-account reference".to_string(),
                });
            }
            (false, Some(_)) => {
                return Err(OpenpayError::InvalidRequest {
                    reason: format!("{kind} does not take a virtual-account reference"),
                });
            }
            _ => {}
        }
        // Ownership guard: a wallet held by another account is a
        // malformed request, not a ledger failure. An absent or
        // unreachable wallet is left to the mutation path, which owns
        // those outcomes.
        if let Ok(Ok(wallet)) = timeout(self.timeouts.ledger(), self.ledger.get_wallet(wallet_id)).await
        {
            if wallet.account_id != account_id {
                return Err(OpenpayError::InvalidRequest {
                    reason: "wallet does not belong to the calling account".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Terminal bookkeeping: finalize the status, then submit the audit
    /// record. The outcome is already decided — audit failure cannot
    /// change it.
    async fn finish(
        &self,
        id: TransactionId,
        status: TransactionStatus,
        failure: Option<FailureKind>,
        balance_after: Option<Decimal>,
    ) -> Result<Transaction> {
        let tx = self.store.finalize(id, status, failure, balance_after).await?;
        self.audit.submit(AuditRecord::from_transaction(&tx));
        tracing::info!(
            tx = %tx.id,
            status = %tx.status,
            failure = ?tx.failure,
            "transaction finished"
        );
        Ok(tx)
    }
}

/// Map a ledger error to the failure kind captured on the transaction.
fn ledger_failure(err: &OpenpayError) -> FailureKind {
    match err {
        OpenpayError::InsufficientBalance { .. } => FailureKind::InsufficientBalance,
        OpenpayError::WalletFrozen(_) => FailureKind::WalletFrozen,
        OpenpayError::WalletNotFound(_) => FailureKind::WalletNotFound,
        _ => FailureKind::LedgerUnavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_handle_flags() {
        let handle = CancelHandle::new();
        assert!(!handle.is_cancelled());
        let clone = handle.clone();
        clone.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn ledger_errors_map_to_failure_kinds() {
        let wallet = WalletId::new();
        assert_eq!(
            ledger_failure(&OpenpayError::InsufficientBalance {
                needed: Decimal::ONE,
                available: Decimal::ZERO,
            }),
            FailureKind::InsufficientBalance
        );
        assert_eq!(
            ledger_failure(&OpenpayError::WalletFrozen(wallet)),
            FailureKind::WalletFrozen
        );
        assert_eq!(
            ledger_failure(&OpenpayError::WalletNotFound(wallet)),
            FailureKind::WalletNotFound
        );
        assert_eq!(
            ledger_failure(&OpenpayError::Internal("boom".to_string())),
            FailureKind::LedgerUnavailable
        );
    }
}
