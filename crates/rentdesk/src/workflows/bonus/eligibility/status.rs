use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::{Amount, TransactionType};

/// Outcome of the eligibility guard chain. Only `Eligible` carries a discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    NoClient,
    NoGrant,
    MalformedBonusType,
    TypeMismatch {
        expected: TransactionType,
        actual: TransactionType,
    },
    MissingWindow,
    NotYetActive {
        starts_at: DateTime<Utc>,
    },
    Expired {
        ended_at: DateTime<Utc>,
    },
    BelowTarget {
        target: Amount,
        total: Amount,
    },
    NoDiscountConfigured,
}

impl EligibilityStatus {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityStatus::Eligible)
    }

    pub fn summary(&self) -> String {
        match self {
            EligibilityStatus::Eligible => "bonus applies".to_string(),
            EligibilityStatus::NoClient => "no client selected".to_string(),
            EligibilityStatus::NoGrant => "client has no bonus".to_string(),
            EligibilityStatus::MalformedBonusType => {
                "bonus program details are incomplete".to_string()
            }
            EligibilityStatus::TypeMismatch { expected, actual } => format!(
                "bonus is for {} transactions, not {}",
                actual.label(),
                expected.label()
            ),
            EligibilityStatus::MissingWindow => "bonus validity dates are missing".to_string(),
            EligibilityStatus::NotYetActive { starts_at } => {
                format!("bonus starts on {}", starts_at.format("%Y-%m-%d"))
            }
            EligibilityStatus::Expired { ended_at } => {
                format!("bonus expired on {}", ended_at.format("%Y-%m-%d"))
            }
            EligibilityStatus::BelowTarget { target, total } => format!(
                "selected total {} is below the bonus target {}",
                total, target
            ),
            EligibilityStatus::NoDiscountConfigured => {
                "bonus carries no discount amount".to_string()
            }
        }
    }
}
