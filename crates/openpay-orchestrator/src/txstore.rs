//! Transaction persistence with state machine enforcement.
//!
//! Every status change goes through [`TransactionStore::transition`] or
//! [`TransactionStore::finalize`], which validate the move against
//! [`TransactionStatus::can_transition_to`]. There is no other write
//! path, so a terminal transaction can never change again and re-querying
//! it always returns the same status and amount.

use std::collections::HashMap;

use chrono::Utc;
use openpay_types::{
    AccountId, FailureKind, OpenpayError, Result, Transaction, TransactionId, TransactionStatus,
};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

struct TxIndex {
    by_id: HashMap<TransactionId, Transaction>,
    by_account: HashMap<AccountId, Vec<TransactionId>>,
}

/// In-memory transaction store, scoped by owning account on reads.
pub struct TransactionStore {
    inner: RwLock<TxIndex>,
}

impl TransactionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TxIndex {
                by_id: HashMap::new(),
                by_account: HashMap::new(),
            }),
        }
    }

    /// Persist a freshly created transaction.
    pub async fn insert(&self, tx: Transaction) {
        let mut inner = self.inner.write().await;
        inner
            .by_account
            .entry(tx.account_id)
            .or_default()
            .push(tx.id);
        inner.by_id.insert(tx.id, tx);
    }

    /// Move a transaction to a non-terminal stage.
    ///
    /// # Errors
    /// `TransactionNotFound` if absent; `InvalidTransition` if the state
    /// machine forbids the move.
    pub async fn transition(
        &self,
        id: TransactionId,
        to: TransactionStatus,
    ) -> Result<Transaction> {
        self.update(id, to, None, None).await
    }

    /// Move a transaction to a terminal status, recording the failure
    /// kind and final balance context.
    ///
    /// # Errors
    /// Same as [`Self::transition`].
    pub async fn finalize(
        &self,
        id: TransactionId,
        to: TransactionStatus,
        failure: Option<FailureKind>,
        balance_after: Option<Decimal>,
    ) -> Result<Transaction> {
        self.update(id, to, failure, balance_after).await
    }

    /// Fetch a transaction owned by `account`. Transactions of other
    /// accounts are indistinguishable from absent ones.
    ///
    /// # Errors
    /// `TransactionNotFound` if absent or foreign.
    pub async fn get(&self, account: AccountId, id: TransactionId) -> Result<Transaction> {
        self.inner
            .read()
            .await
            .by_id
            .get(&id)
            .filter(|tx| tx.account_id == account)
            .cloned()
            .ok_or(OpenpayError::TransactionNotFound(id))
    }

    /// All transactions of an account, most recent first.
    pub async fn list_for_account(&self, account: AccountId) -> Vec<Transaction> {
        let inner = self.inner.read().await;
        let Some(ids) = inner.by_account.get(&account) else {
            return Vec::new();
        };
        let mut txs: Vec<Transaction> = ids
            .iter()
            .filter_map(|id| inner.by_id.get(id).cloned())
            .collect();
        txs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        txs
    }

    async fn update(
        &self,
        id: TransactionId,
        to: TransactionStatus,
        failure: Option<FailureKind>,
        balance_after: Option<Decimal>,
    ) -> Result<Transaction> {
        let mut inner = self.inner.write().await;
        let tx = inner
            .by_id
            .get_mut(&id)
            .ok_or(OpenpayError::TransactionNotFound(id))?;
        if !tx.status.can_transition_to(to) {
            return Err(OpenpayError::InvalidTransition {
                from: tx.status,
                to,
            });
        }
        tracing::debug!(tx = %id, from = %tx.status, to = %to, "transaction transition");
        tx.status = to;
        tx.failure = failure;
        if balance_after.is_some() {
            tx.balance_after = balance_after;
        }
        tx.updated_at = Utc::now();
        Ok(tx.clone())
    }
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}
