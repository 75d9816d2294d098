//! Settlement confirmation types.
//!
//! A PAYMENT must be confirmed against the external settlement network
//! before any wallet is debited. The adapter answers with one of the
//! outcomes below; only `Confirmed` lets the payment proceed.

use serde::{Deserialize, Serialize};

/// Answer from the external settlement adapter for a virtual-account
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementOutcome {
    /// Reference is valid and unpaid; it is now marked settled.
    Confirmed,
    /// Reference exists but cannot be settled (already paid, or the
    /// amount differs from what was registered).
    Mismatch,
    /// Reference is not known to the settlement network.
    Unknown,
}

impl SettlementOutcome {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl std::fmt::Display for SettlementOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Mismatch => write!(f, "MISMATCH"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_confirmed_proceeds() {
        assert!(SettlementOutcome::Confirmed.is_confirmed());
        assert!(!SettlementOutcome::Mismatch.is_confirmed());
        assert!(!SettlementOutcome::Unknown.is_confirmed());
    }

    #[test]
    fn outcome_serde_roundtrip() {
        let outcome = SettlementOutcome::Mismatch;
        let json = serde_json::to_string(&outcome).unwrap();
        let back: SettlementOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
