//! Mutation log types — the append-only record of balance changes.
//!
//! One entry is written per successful balance change, never updated or
//! deleted afterwards. The log is the sole source of truth for balance
//! reconstruction: `balance == Σ credits − Σ debits` from genesis.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EntryId, TransactionId, WalletId};

/// Direction of a balance mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryDirection {
    /// Money leaves the wallet.
    Debit,
    /// Money enters the wallet.
    Credit,
}

impl std::fmt::Display for EntryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => write!(f, "DEBIT"),
            Self::Credit => write!(f, "CREDIT"),
        }
    }
}

/// A single immutable entry in a wallet's mutation log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutationLogEntry {
    pub id: EntryId,
    pub wallet_id: WalletId,
    /// The transaction that caused this mutation, if any. Administrative
    /// corrections carry no reference.
    pub transaction_id: Option<TransactionId>,
    pub direction: EntryDirection,
    /// Always positive; the direction carries the sign.
    pub amount: Decimal,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl MutationLogEntry {
    /// The entry's contribution to the wallet balance: positive for a
    /// credit, negative for a debit.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            EntryDirection::Credit => self.amount,
            EntryDirection::Debit => -self.amount,
        }
    }
}
