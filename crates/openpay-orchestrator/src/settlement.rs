//! Reference settlement adapter backed by a static directory.
//!
//! The external settlement network issues virtual-account references and
//! expects each to be settled exactly once, for the exact registered
//! amount. This in-process directory mirrors that contract for local
//! deployments and tests; a network-backed adapter implements the same
//! [`crate::SettlementGateway`] port.

use std::collections::HashMap;

use openpay_types::{Result, SettlementOutcome, VaNumber};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

struct VaEntry {
    amount: Decimal,
    settled: bool,
}

/// In-memory directory of virtual-account references.
pub struct StaticSettlementDirectory {
    entries: RwLock<HashMap<String, VaEntry>>,
}

impl StaticSettlementDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a reference awaiting settlement for `amount`.
    pub async fn register(&self, va: &VaNumber, amount: Decimal) {
        self.entries.write().await.insert(
            va.as_str().to_string(),
            VaEntry {
                amount,
                settled: false,
            },
        );
    }

    /// Confirm a reference. Settles it on success; a settled reference
    /// or a differing amount answers `Mismatch`, an unregistered one
    /// answers `Unknown`.
    pub async fn confirm(&self, va: &VaNumber, amount: Decimal) -> Result<SettlementOutcome> {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(va.as_str()) else {
            return Ok(SettlementOutcome::Unknown);
        };
        if entry.settled || entry.amount != amount {
            return Ok(SettlementOutcome::Mismatch);
        }
        entry.settled = true;
        Ok(SettlementOutcome::Confirmed)
    }

    /// Whether a reference has been settled.
    pub async fn is_settled(&self, va: &VaNumber) -> bool {
        self.entries
            .read()
            .await
            .get(va.as_str())
            .is_some_and(|e| e.settled)
    }
}

impl Default for StaticSettlementDirectory {
    fn default() -> Self {
        Self::new()
    }
}
