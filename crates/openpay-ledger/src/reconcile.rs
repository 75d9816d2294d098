//! Ledger reconciliation — the balance integrity invariant.
//!
//! Invariant checked for every wallet:
//! ```text
//! balance == Σ(CREDIT amounts) − Σ(DEBIT amounts)  over the mutation log
//! ```
//!
//! If this ever breaks, a mutation half-applied or state was corrupted
//! outside the ledger path — the ultimate safety net, reported as
//! [`OpenpayError::LedgerDrift`] and never tolerated.

use openpay_types::{MutationLogEntry, OpenpayError, Result, Wallet};
use rust_decimal::Decimal;

/// Replay a mutation log from genesis: Σ credits − Σ debits.
#[must_use]
pub fn replayed_balance(log: &[MutationLogEntry]) -> Decimal {
    log.iter().map(MutationLogEntry::signed_amount).sum()
}

/// Verify a wallet's stored balance against its replayed log, and the
/// internal chaining of the log itself (each entry's balance-after must
/// equal the next entry's balance-before).
///
/// # Errors
/// Returns [`OpenpayError::LedgerDrift`] on any disagreement.
pub fn verify_wallet(wallet: &Wallet, log: &[MutationLogEntry]) -> Result<()> {
    let expected = replayed_balance(log);
    if wallet.balance != expected {
        return Err(OpenpayError::LedgerDrift {
            wallet_id: wallet.id,
            expected,
            actual: wallet.balance,
        });
    }
    let mut running = Decimal::ZERO;
    for entry in log {
        if entry.balance_before != running || entry.balance_after != running + entry.signed_amount()
        {
            return Err(OpenpayError::LedgerDrift {
                wallet_id: wallet.id,
                expected: running,
                actual: entry.balance_before,
            });
        }
        running = entry.balance_after;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use openpay_types::{AccountId, EntryDirection, EntryId, WalletId};

    use super::*;

    fn entry(
        wallet_id: WalletId,
        direction: EntryDirection,
        amount: Decimal,
        before: Decimal,
    ) -> MutationLogEntry {
        let signed = match direction {
            EntryDirection::Credit => amount,
            EntryDirection::Debit => -amount,
        };
        MutationLogEntry {
            id: EntryId::new(),
            wallet_id,
            transaction_id: None,
            direction,
            amount,
            balance_before: before,
            balance_after: before + signed,
            reason: "test".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_log_replays_to_zero() {
        assert_eq!(replayed_balance(&[]), Decimal::ZERO);
    }

    #[test]
    fn replay_sums_directions() {
        let id = WalletId::new();
        let log = vec![
            entry(id, EntryDirection::Credit, Decimal::new(1_000, 0), Decimal::ZERO),
            entry(
                id,
                EntryDirection::Debit,
                Decimal::new(300, 0),
                Decimal::new(1_000, 0),
            ),
        ];
        assert_eq!(replayed_balance(&log), Decimal::new(700, 0));
    }

    #[test]
    fn verify_passes_when_balanced() {
        let mut wallet = Wallet::new(AccountId::new(), "Main");
        let log = vec![
            entry(wallet.id, EntryDirection::Credit, Decimal::new(500, 0), Decimal::ZERO),
            entry(
                wallet.id,
                EntryDirection::Debit,
                Decimal::new(200, 0),
                Decimal::new(500, 0),
            ),
        ];
        wallet.balance = Decimal::new(300, 0);
        verify_wallet(&wallet, &log).unwrap();
    }

    #[test]
    fn verify_detects_balance_drift() {
        let mut wallet = Wallet::new(AccountId::new(), "Main");
        let log = vec![entry(
            wallet.id,
            EntryDirection::Credit,
            Decimal::new(500, 0),
            Decimal::ZERO,
        )];
        wallet.balance = Decimal::new(501, 0);
        let err = verify_wallet(&wallet, &log).unwrap_err();
        assert!(matches!(err, OpenpayError::LedgerDrift { .. }));
    }

    #[test]
    fn verify_detects_broken_chain() {
        let mut wallet = Wallet::new(AccountId::new(), "Main");
        let mut log = vec![
            entry(wallet.id, EntryDirection::Credit, Decimal::new(500, 0), Decimal::ZERO),
            entry(
                wallet.id,
                EntryDirection::Credit,
                Decimal::new(100, 0),
                Decimal::new(500, 0),
            ),
        ];
        // Tamper with the middle of the chain but keep the sum intact.
        log[0].balance_after = Decimal::new(400, 0);
        log[1].balance_before = Decimal::new(400, 0);
        wallet.balance = Decimal::new(600, 0);
        let err = verify_wallet(&wallet, &log).unwrap_err();
        assert!(matches!(err, OpenpayError::LedgerDrift { .. }));
    }
}
