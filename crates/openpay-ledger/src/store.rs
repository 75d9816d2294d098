//! The wallet store — balances, mutation log, and wallet lifecycle.
//!
//! Every wallet lives behind its own async mutex. A mutation acquires
//! that mutex, checks preconditions, writes the new balance, bumps the
//! revision, and appends the log entry before releasing it — so two
//! concurrent mutations on one wallet are strictly serialized, and a
//! mutation can never half-apply. Wallets not sharing a mutex proceed
//! independently.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use openpay_types::{
    constants, AccountId, EntryDirection, EntryId, MutationLogEntry, OpenpayError, Result,
    TransactionId, Wallet, WalletId, WalletStatus,
};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, RwLock};

use crate::reconcile;

/// A wallet and its append-only mutation log, guarded as one unit.
struct WalletAccount {
    wallet: Wallet,
    log: Vec<MutationLogEntry>,
}

/// Source of truth for wallet balances.
pub struct LedgerStore {
    /// Registry of per-wallet slots. The outer lock only guards the map
    /// shape (create/delete/lookup); balance state is guarded per wallet.
    wallets: RwLock<HashMap<WalletId, Arc<Mutex<WalletAccount>>>>,
}

impl LedgerStore {
    /// Create an empty ledger store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wallets: RwLock::new(HashMap::new()),
        }
    }

    /// Create a fresh active wallet with zero balance for an account.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the display name is empty or too long.
    pub async fn create_wallet(&self, account_id: AccountId, name: &str) -> Result<Wallet> {
        if name.is_empty() || name.len() > constants::MAX_WALLET_NAME_LEN {
            return Err(OpenpayError::InvalidRequest {
                reason: format!(
                    "wallet name must be 1..={} bytes",
                    constants::MAX_WALLET_NAME_LEN
                ),
            });
        }
        let wallet = Wallet::new(account_id, name);
        let slot = Arc::new(Mutex::new(WalletAccount {
            wallet: wallet.clone(),
            log: Vec::new(),
        }));
        self.wallets.write().await.insert(wallet.id, slot);
        tracing::debug!(wallet = %wallet.id, account = %account_id, "wallet created");
        Ok(wallet)
    }

    /// Rename a wallet.
    ///
    /// # Errors
    /// `WalletNotFound` if absent; `InvalidRequest` on a bad name.
    pub async fn rename_wallet(&self, wallet_id: WalletId, name: &str) -> Result<Wallet> {
        if name.is_empty() || name.len() > constants::MAX_WALLET_NAME_LEN {
            return Err(OpenpayError::InvalidRequest {
                reason: format!(
                    "wallet name must be 1..={} bytes",
                    constants::MAX_WALLET_NAME_LEN
                ),
            });
        }
        let slot = self.slot(wallet_id).await?;
        let mut acct = slot.lock().await;
        acct.wallet.name = name.to_string();
        acct.wallet.updated_at = Utc::now();
        Ok(acct.wallet.clone())
    }

    /// Delete a wallet and its mutation log.
    ///
    /// # Errors
    /// `WalletNotFound` if absent; `WalletHasBalance` while balance > 0.
    pub async fn delete_wallet(&self, wallet_id: WalletId) -> Result<()> {
        let mut wallets = self.wallets.write().await;
        let slot = wallets
            .get(&wallet_id)
            .ok_or(OpenpayError::WalletNotFound(wallet_id))?;
        {
            let acct = slot.lock().await;
            if acct.wallet.balance > Decimal::ZERO {
                return Err(OpenpayError::WalletHasBalance {
                    wallet_id,
                    balance: acct.wallet.balance,
                });
            }
        }
        wallets.remove(&wallet_id);
        tracing::debug!(wallet = %wallet_id, "wallet deleted");
        Ok(())
    }

    /// Look up a wallet snapshot.
    ///
    /// # Errors
    /// `WalletNotFound` if absent.
    pub async fn get_wallet(&self, wallet_id: WalletId) -> Result<Wallet> {
        let slot = self.slot(wallet_id).await?;
        let acct = slot.lock().await;
        Ok(acct.wallet.clone())
    }

    /// All wallets owned by an account, oldest first.
    pub async fn wallets_for_account(&self, account_id: AccountId) -> Vec<Wallet> {
        let slots: Vec<Arc<Mutex<WalletAccount>>> =
            self.wallets.read().await.values().cloned().collect();
        let mut owned = Vec::new();
        for slot in slots {
            let acct = slot.lock().await;
            if acct.wallet.account_id == account_id {
                owned.push(acct.wallet.clone());
            }
        }
        owned.sort_by_key(|w| w.created_at);
        owned
    }

    /// Credit a wallet.
    ///
    /// # Errors
    /// `InvalidAmount` if amount ≤ 0; `WalletFrozen` if frozen;
    /// `WalletNotFound` otherwise.
    pub async fn credit(
        &self,
        wallet_id: WalletId,
        amount: Decimal,
        reference: Option<TransactionId>,
        reason: &str,
    ) -> Result<MutationLogEntry> {
        self.mutate(wallet_id, EntryDirection::Credit, amount, reference, reason)
            .await
    }

    /// Debit a wallet.
    ///
    /// # Errors
    /// Same as [`Self::credit`] plus `InsufficientBalance` if the wallet
    /// holds less than `amount`.
    pub async fn debit(
        &self,
        wallet_id: WalletId,
        amount: Decimal,
        reference: Option<TransactionId>,
        reason: &str,
    ) -> Result<MutationLogEntry> {
        self.mutate(wallet_id, EntryDirection::Debit, amount, reference, reason)
            .await
    }

    /// Freeze a wallet. Idempotent: freezing a frozen wallet is a no-op
    /// success.
    ///
    /// # Errors
    /// `WalletNotFound` if absent.
    pub async fn freeze(&self, wallet_id: WalletId) -> Result<Wallet> {
        self.set_status(wallet_id, WalletStatus::Frozen).await
    }

    /// Unfreeze a wallet. Idempotent.
    ///
    /// # Errors
    /// `WalletNotFound` if absent.
    pub async fn unfreeze(&self, wallet_id: WalletId) -> Result<Wallet> {
        self.set_status(wallet_id, WalletStatus::Active).await
    }

    /// A wallet's mutation log, most recent first.
    ///
    /// # Errors
    /// `WalletNotFound` if absent.
    pub async fn history(&self, wallet_id: WalletId) -> Result<Vec<MutationLogEntry>> {
        let slot = self.slot(wallet_id).await?;
        let acct = slot.lock().await;
        Ok(acct.log.iter().rev().cloned().collect())
    }

    /// Check one wallet's balance against its replayed mutation log.
    ///
    /// # Errors
    /// `LedgerDrift` on mismatch — a fatal integrity fault.
    pub async fn reconcile(&self, wallet_id: WalletId) -> Result<()> {
        let slot = self.slot(wallet_id).await?;
        let acct = slot.lock().await;
        reconcile::verify_wallet(&acct.wallet, &acct.log)
    }

    /// Reconcile every wallet in the store.
    ///
    /// # Errors
    /// `LedgerDrift` for the first wallet found out of balance.
    pub async fn reconcile_all(&self) -> Result<()> {
        let ids: Vec<WalletId> = self.wallets.read().await.keys().copied().collect();
        for id in ids {
            self.reconcile(id).await?;
        }
        Ok(())
    }

    async fn slot(&self, wallet_id: WalletId) -> Result<Arc<Mutex<WalletAccount>>> {
        self.wallets
            .read()
            .await
            .get(&wallet_id)
            .cloned()
            .ok_or(OpenpayError::WalletNotFound(wallet_id))
    }

    async fn set_status(&self, wallet_id: WalletId, status: WalletStatus) -> Result<Wallet> {
        let slot = self.slot(wallet_id).await?;
        let mut acct = slot.lock().await;
        if acct.wallet.status != status {
            acct.wallet.status = status;
            acct.wallet.updated_at = Utc::now();
            tracing::info!(wallet = %wallet_id, %status, "wallet status changed");
        }
        Ok(acct.wallet.clone())
    }

    /// The one place a balance changes. Holds the wallet mutex across
    /// the precondition checks, the balance write, and the log append.
    async fn mutate(
        &self,
        wallet_id: WalletId,
        direction: EntryDirection,
        amount: Decimal,
        reference: Option<TransactionId>,
        reason: &str,
    ) -> Result<MutationLogEntry> {
        if amount <= Decimal::ZERO {
            return Err(OpenpayError::InvalidAmount(amount));
        }
        let slot = self.slot(wallet_id).await?;
        let mut acct = slot.lock().await;

        if acct.wallet.is_frozen() {
            return Err(OpenpayError::WalletFrozen(wallet_id));
        }
        if direction == EntryDirection::Debit && acct.wallet.balance < amount {
            return Err(OpenpayError::InsufficientBalance {
                needed: amount,
                available: acct.wallet.balance,
            });
        }

        let balance_before = acct.wallet.balance;
        let balance_after = match direction {
            EntryDirection::Credit => balance_before + amount,
            EntryDirection::Debit => balance_before - amount,
        };
        acct.wallet.balance = balance_after;
        acct.wallet.revision += 1;
        acct.wallet.updated_at = Utc::now();

        let entry = MutationLogEntry {
            id: EntryId::new(),
            wallet_id,
            transaction_id: reference,
            direction,
            amount,
            balance_before,
            balance_after,
            reason: reason.to_string(),
            created_at: acct.wallet.updated_at,
        };
        acct.log.push(entry.clone());

        tracing::debug!(
            wallet = %wallet_id,
            %direction,
            %amount,
            %balance_after,
            revision = acct.wallet.revision,
            "ledger mutation applied"
        );
        Ok(entry)
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_wallet(balance: Decimal) -> (LedgerStore, WalletId) {
        let store = LedgerStore::new();
        let wallet = store
            .create_wallet(AccountId::new(), "Main")
            .await
            .unwrap();
        if balance > Decimal::ZERO {
            store
                .credit(wallet.id, balance, None, "initial funding")
                .await
                .unwrap();
        }
        (store, wallet.id)
    }

    #[tokio::test]
    async fn credit_increases_balance_and_logs() {
        let (store, id) = store_with_wallet(Decimal::ZERO).await;
        let entry = store
            .credit(id, Decimal::new(500_000, 0), None, "deposit")
            .await
            .unwrap();
        assert_eq!(entry.direction, EntryDirection::Credit);
        assert_eq!(entry.balance_before, Decimal::ZERO);
        assert_eq!(entry.balance_after, Decimal::new(500_000, 0));

        let wallet = store.get_wallet(id).await.unwrap();
        assert_eq!(wallet.balance, Decimal::new(500_000, 0));
        assert_eq!(wallet.revision, 1);
    }

    #[tokio::test]
    async fn debit_decreases_balance() {
        let (store, id) = store_with_wallet(Decimal::new(100_000, 0)).await;
        let entry = store
            .debit(id, Decimal::new(20_000, 0), None, "payment")
            .await
            .unwrap();
        assert_eq!(entry.balance_after, Decimal::new(80_000, 0));
        let wallet = store.get_wallet(id).await.unwrap();
        assert_eq!(wallet.balance, Decimal::new(80_000, 0));
    }

    #[tokio::test]
    async fn debit_insufficient_fails_unchanged() {
        let (store, id) = store_with_wallet(Decimal::new(10_000, 0)).await;
        let err = store
            .debit(id, Decimal::new(25_000, 0), None, "payment")
            .await
            .unwrap_err();
        assert!(matches!(err, OpenpayError::InsufficientBalance { .. }));
        let wallet = store.get_wallet(id).await.unwrap();
        assert_eq!(wallet.balance, Decimal::new(10_000, 0));
        assert_eq!(wallet.revision, 1);
        assert_eq!(store.history(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_positive_amounts_rejected() {
        let (store, id) = store_with_wallet(Decimal::new(1_000, 0)).await;
        let err = store.credit(id, Decimal::ZERO, None, "x").await.unwrap_err();
        assert!(matches!(err, OpenpayError::InvalidAmount(_)));
        let err = store
            .debit(id, Decimal::new(-5, 0), None, "x")
            .await
            .unwrap_err();
        assert!(matches!(err, OpenpayError::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn frozen_wallet_accepts_no_mutation() {
        let (store, id) = store_with_wallet(Decimal::new(1_000, 0)).await;
        store.freeze(id).await.unwrap();

        let err = store
            .credit(id, Decimal::new(10, 0), None, "x")
            .await
            .unwrap_err();
        assert!(matches!(err, OpenpayError::WalletFrozen(_)));
        let err = store
            .debit(id, Decimal::new(10, 0), None, "x")
            .await
            .unwrap_err();
        assert!(matches!(err, OpenpayError::WalletFrozen(_)));

        store.unfreeze(id).await.unwrap();
        store.credit(id, Decimal::new(10, 0), None, "x").await.unwrap();
    }

    #[tokio::test]
    async fn freeze_is_idempotent() {
        let (store, id) = store_with_wallet(Decimal::ZERO).await;
        let first = store.freeze(id).await.unwrap();
        let second = store.freeze(id).await.unwrap();
        assert_eq!(first.status, WalletStatus::Frozen);
        assert_eq!(second.status, WalletStatus::Frozen);
        // The no-op freeze must not touch updated_at.
        assert_eq!(first.updated_at, second.updated_at);
    }

    #[tokio::test]
    async fn unknown_wallet_not_found() {
        let store = LedgerStore::new();
        let err = store.get_wallet(WalletId::new()).await.unwrap_err();
        assert!(matches!(err, OpenpayError::WalletNotFound(_)));
        let err = store.freeze(WalletId::new()).await.unwrap_err();
        assert!(matches!(err, OpenpayError::WalletNotFound(_)));
    }

    #[tokio::test]
    async fn delete_requires_zero_balance() {
        let (store, id) = store_with_wallet(Decimal::new(500, 0)).await;
        let err = store.delete_wallet(id).await.unwrap_err();
        assert!(matches!(err, OpenpayError::WalletHasBalance { .. }));

        store.debit(id, Decimal::new(500, 0), None, "drain").await.unwrap();
        store.delete_wallet(id).await.unwrap();
        let err = store.get_wallet(id).await.unwrap_err();
        assert!(matches!(err, OpenpayError::WalletNotFound(_)));
    }

    #[tokio::test]
    async fn rename_validates_name() {
        let (store, id) = store_with_wallet(Decimal::ZERO).await;
        let err = store.rename_wallet(id, "").await.unwrap_err();
        assert!(matches!(err, OpenpayError::InvalidRequest { .. }));
        let wallet = store.rename_wallet(id, "Rainy Day").await.unwrap();
        assert_eq!(wallet.name, "Rainy Day");
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let (store, id) = store_with_wallet(Decimal::ZERO).await;
        store.credit(id, Decimal::new(100, 0), None, "first").await.unwrap();
        store.credit(id, Decimal::new(200, 0), None, "second").await.unwrap();
        store.debit(id, Decimal::new(50, 0), None, "third").await.unwrap();

        let history = store.history(id).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].reason, "third");
        assert_eq!(history[2].reason, "first");
    }

    #[tokio::test]
    async fn wallets_for_account_scoped() {
        let store = LedgerStore::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        store.create_wallet(alice, "A1").await.unwrap();
        store.create_wallet(alice, "A2").await.unwrap();
        store.create_wallet(bob, "B1").await.unwrap();

        let wallets = store.wallets_for_account(alice).await;
        assert_eq!(wallets.len(), 2);
        assert!(wallets.iter().all(|w| w.account_id == alice));
    }

    #[tokio::test]
    async fn reconcile_passes_after_mutations() {
        let (store, id) = store_with_wallet(Decimal::new(1_000, 0)).await;
        store.debit(id, Decimal::new(300, 0), None, "x").await.unwrap();
        store.credit(id, Decimal::new(50, 0), None, "y").await.unwrap();
        store.reconcile(id).await.unwrap();
        store.reconcile_all().await.unwrap();
    }
}
