//! Wallet model for the OpenPay ledger.
//!
//! A wallet holds a single non-negative balance. Balance changes happen
//! exclusively through ledger operations, each of which bumps `revision`
//! and appends a [`crate::MutationLogEntry`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, WalletId};

/// Lifecycle status of a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletStatus {
    /// Accepts debits and credits.
    Active,
    /// Administratively frozen; accepts no balance mutation.
    Frozen,
}

impl std::fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Frozen => write!(f, "FROZEN"),
        }
    }
}

/// An account's store of monetary balance. Accounts may own several
/// wallets; each is mutated only through the ledger store.
///
/// Invariants:
/// - `balance` is never negative
/// - a `Frozen` wallet accepts no debit or credit
/// - `revision` increases by exactly one per applied mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wallet {
    pub id: WalletId,
    pub account_id: AccountId,
    /// Display name chosen by the owner (e.g. "Groceries").
    pub name: String,
    pub balance: Decimal,
    pub status: WalletStatus,
    /// Monotonically increasing mutation counter.
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a fresh active wallet with zero balance.
    #[must_use]
    pub fn new(account_id: AccountId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: WalletId::new(),
            account_id,
            name: name.into(),
            balance: Decimal::ZERO,
            status: WalletStatus::Active,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.status == WalletStatus::Frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_wallet_is_active_and_empty() {
        let wallet = Wallet::new(AccountId::new(), "Savings");
        assert_eq!(wallet.balance, Decimal::ZERO);
        assert_eq!(wallet.status, WalletStatus::Active);
        assert_eq!(wallet.revision, 0);
        assert!(!wallet.is_frozen());
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", WalletStatus::Active), "ACTIVE");
        assert_eq!(format!("{}", WalletStatus::Frozen), "FROZEN");
    }

    #[test]
    fn wallet_serde_roundtrip() {
        let wallet = Wallet::new(AccountId::new(), "Daily");
        let json = serde_json::to_string(&wallet).unwrap();
        let back: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(wallet, back);
    }
}
