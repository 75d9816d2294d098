//! Collaborator ports — the orchestrator's outbound boundaries.
//!
//! Each port is an async trait so production components and test doubles
//! (slow, unavailable, misbehaving collaborators) plug in the same way.
//! The orchestrator wraps every port call in a timeout; implementations
//! do not need their own deadline handling.

use async_trait::async_trait;
use openpay_ledger::LedgerStore;
use openpay_risk::ThresholdEvaluator;
use openpay_types::{
    AccountId, FraudVerdict, MutationLogEntry, Result, SettlementOutcome, TransactionId, VaNumber,
    Wallet, WalletId,
};
use rust_decimal::Decimal;

use crate::settlement::StaticSettlementDirectory;

/// Fraud evaluation boundary. Must have no side effect beyond producing
/// and persisting the verdict.
#[async_trait]
pub trait FraudCheck: Send + Sync {
    async fn evaluate(
        &self,
        transaction_id: TransactionId,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<FraudVerdict>;
}

/// Ledger store boundary.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    async fn get_wallet(&self, wallet_id: WalletId) -> Result<Wallet>;

    async fn credit(
        &self,
        wallet_id: WalletId,
        amount: Decimal,
        reference: Option<TransactionId>,
        reason: &str,
    ) -> Result<MutationLogEntry>;

    async fn debit(
        &self,
        wallet_id: WalletId,
        amount: Decimal,
        reference: Option<TransactionId>,
        reason: &str,
    ) -> Result<MutationLogEntry>;
}

/// External settlement boundary, consulted for PAYMENT transactions
/// before any wallet is debited.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    async fn confirm(&self, va: &VaNumber, amount: Decimal) -> Result<SettlementOutcome>;
}

#[async_trait]
impl FraudCheck for ThresholdEvaluator {
    async fn evaluate(
        &self,
        transaction_id: TransactionId,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<FraudVerdict> {
        ThresholdEvaluator::evaluate(self, transaction_id, account_id, amount).await
    }
}

#[async_trait]
impl LedgerGateway for LedgerStore {
    async fn get_wallet(&self, wallet_id: WalletId) -> Result<Wallet> {
        LedgerStore::get_wallet(self, wallet_id).await
    }

    async fn credit(
        &self,
        wallet_id: WalletId,
        amount: Decimal,
        reference: Option<TransactionId>,
        reason: &str,
    ) -> Result<MutationLogEntry> {
        LedgerStore::credit(self, wallet_id, amount, reference, reason).await
    }

    async fn debit(
        &self,
        wallet_id: WalletId,
        amount: Decimal,
        reference: Option<TransactionId>,
        reason: &str,
    ) -> Result<MutationLogEntry> {
        LedgerStore::debit(self, wallet_id, amount, reference, reason).await
    }
}

#[async_trait]
impl SettlementGateway for StaticSettlementDirectory {
    async fn confirm(&self, va: &VaNumber, amount: Decimal) -> Result<SettlementOutcome> {
        StaticSettlementDirectory::confirm(self, va, amount).await
    }
}
