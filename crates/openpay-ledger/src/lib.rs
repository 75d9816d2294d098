//! # openpay-ledger
//!
//! **Ledger Plane**: wallet balances and the append-only mutation log,
//! with atomic per-wallet mutations.
//!
//! ## Architecture
//!
//! The Ledger Plane is the single mandatory exclusive-access boundary in
//! the system:
//! 1. **LedgerStore**: wallet lifecycle + credit/debit/freeze, one async
//!    mutex per wallet so mutations on a wallet are strictly serialized
//!    while different wallets proceed independently
//! 2. **Reconciliation**: replays the mutation log against the stored
//!    balance; any disagreement is a fatal integrity fault
//!
//! ## Mutation Flow
//!
//! ```text
//! caller → LedgerStore.debit() → wallet mutex
//!        → check status + balance → write balance → append log entry
//! ```
//!
//! The balance read, balance write, revision bump, and log append happen
//! under one lock acquisition: a mutation either fully applies or does
//! not apply at all.

pub mod reconcile;
pub mod store;

pub use reconcile::{replayed_balance, verify_wallet};
pub use store::LedgerStore;
