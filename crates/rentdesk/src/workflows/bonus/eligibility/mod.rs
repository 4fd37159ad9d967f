mod rules;
mod status;

pub use status::EligibilityStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{selection_total, Amount, Client, LineItem, TransactionType};

/// Stateless evaluator bound to the transaction category being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusEvaluator {
    kind: TransactionType,
}

impl BonusEvaluator {
    pub fn new(kind: TransactionType) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn evaluate(
        &self,
        client: Option<&Client>,
        items: &[LineItem],
        now: DateTime<Utc>,
    ) -> BonusEligibility {
        let total_selected = selection_total(items);

        let active = match rules::active_grant(client, self.kind, now) {
            Ok(active) => active,
            Err(status) => {
                debug!(kind = self.kind.label(), reason = %status.summary(), "bonus not applicable");
                return BonusEligibility::ineligible(self.kind, total_selected, None, status);
            }
        };

        let target = active.bonus_type.target_amount;
        if total_selected < target {
            let status = EligibilityStatus::BelowTarget {
                target,
                total: total_selected,
            };
            return BonusEligibility::ineligible(self.kind, total_selected, Some(target), status);
        }

        let discount = active.grant.client_discount_amount;
        if discount == 0 {
            return BonusEligibility::ineligible(
                self.kind,
                total_selected,
                Some(target),
                EligibilityStatus::NoDiscountConfigured,
            );
        }

        BonusEligibility {
            transaction_type: self.kind,
            max_discount: discount,
            total_selected,
            target_amount: Some(target),
            bonus_name: Some(active.bonus_type.bonus_name.clone())
                .filter(|name| !name.is_empty()),
            status: EligibilityStatus::Eligible,
        }
    }
}

/// Maximum discount `client` may receive for `items` in a `kind` transaction at `now`.
pub fn compute_max_discount(
    client: Option<&Client>,
    items: &[LineItem],
    kind: TransactionType,
    now: DateTime<Utc>,
) -> Amount {
    BonusEvaluator::new(kind)
        .evaluate(client, items, now)
        .max_discount
}

/// Evaluation output with the reason trail the dashboard shows next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusEligibility {
    pub transaction_type: TransactionType,
    pub max_discount: Amount,
    pub total_selected: Amount,
    pub target_amount: Option<Amount>,
    pub bonus_name: Option<String>,
    pub status: EligibilityStatus,
}

impl BonusEligibility {
    fn ineligible(
        transaction_type: TransactionType,
        total_selected: Amount,
        target_amount: Option<Amount>,
        status: EligibilityStatus,
    ) -> Self {
        Self {
            transaction_type,
            max_discount: 0,
            total_selected,
            target_amount,
            bonus_name: None,
            status,
        }
    }

    /// Starting point for a session before anything was evaluated.
    pub fn none(transaction_type: TransactionType) -> Self {
        Self::ineligible(transaction_type, 0, None, EligibilityStatus::NoClient)
    }

    pub fn is_eligible(&self) -> bool {
        self.status.is_eligible()
    }
}
