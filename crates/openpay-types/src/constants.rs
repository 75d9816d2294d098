//! System-wide constants for the OpenPay wallet payment core.

/// Default threshold above which an amount is flagged SUSPICIOUS
/// (whole currency units).
pub const DEFAULT_SUSPICIOUS_ABOVE: i64 = 10_000_000;

/// Default threshold above which an amount is classified FRAUD
/// (whole currency units).
pub const DEFAULT_FRAUD_ABOVE: i64 = 50_000_000;

/// Default fraud evaluator call timeout in milliseconds.
pub const DEFAULT_FRAUD_TIMEOUT_MS: u64 = 2_000;

/// Default ledger store call timeout in milliseconds.
pub const DEFAULT_LEDGER_TIMEOUT_MS: u64 = 2_000;

/// Default settlement adapter call timeout in milliseconds.
pub const DEFAULT_SETTLEMENT_TIMEOUT_MS: u64 = 3_000;

/// Default audit outbox queue depth.
pub const DEFAULT_AUDIT_QUEUE_DEPTH: usize = 1_024;

/// Default number of delivery retries for a failed audit record.
pub const DEFAULT_AUDIT_MAX_RETRIES: u32 = 3;

/// Default delay between audit delivery retries in milliseconds.
pub const DEFAULT_AUDIT_RETRY_DELAY_MS: u64 = 50;

/// Maximum wallet display name length.
pub const MAX_WALLET_NAME_LEN: usize = 100;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenPay";
