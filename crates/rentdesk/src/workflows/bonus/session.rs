//! Discount field state for one transaction-creation session.
//!
//! The session owns the held maximum and the input's value/display pair. It
//! is recomputed explicitly whenever the client or the selection changes and
//! reports every discount change to a [`DiscountListener`] (usually the form
//! that submits the transaction).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Amount, Client, LineItem, TransactionType};
use super::eligibility::{BonusEligibility, BonusEvaluator};
use super::format::{format_thousands, parse_digits, DiscountFormatter};

/// Receives the numeric discount whenever the session changes it.
pub trait DiscountListener {
    fn discount_changed(&mut self, discount: Amount);
}

impl<F> DiscountListener for F
where
    F: FnMut(Amount),
{
    fn discount_changed(&mut self, discount: Amount) {
        self(discount)
    }
}

/// Who last wrote the discount field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    /// Nobody has written the field yet.
    Pristine,
    /// The session filled in the maximum; the user has not touched it.
    AutoFilled,
    /// The user typed into the field, including clearing it.
    Edited,
}

/// Numeric discount and the text shown in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountInput {
    pub value: Amount,
    pub display: String,
    pub state: FieldState,
}

impl DiscountInput {
    fn pristine() -> Self {
        Self {
            value: 0,
            display: String::new(),
            state: FieldState::Pristine,
        }
    }
}

/// Advisory result of checking a candidate discount against the held maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DiscountValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: String) -> Self {
        Self {
            is_valid: false,
            message: Some(message),
        }
    }
}

/// Checks `candidate` against `max_discount`. A zero maximum means no bonus
/// constraint applies.
pub fn validate_discount(
    candidate: Amount,
    max_discount: Amount,
    formatter: &DiscountFormatter,
) -> DiscountValidation {
    if max_discount == 0 || candidate <= max_discount {
        DiscountValidation::valid()
    } else {
        DiscountValidation::invalid(formatter.exceeds_max_message(max_discount))
    }
}

pub struct DiscountSession<L> {
    evaluator: BonusEvaluator,
    formatter: DiscountFormatter,
    eligibility: BonusEligibility,
    input: DiscountInput,
    listener: L,
}

impl<L> DiscountSession<L>
where
    L: DiscountListener,
{
    pub fn new(kind: TransactionType, formatter: DiscountFormatter, listener: L) -> Self {
        Self {
            evaluator: BonusEvaluator::new(kind),
            formatter,
            eligibility: BonusEligibility::none(kind),
            input: DiscountInput::pristine(),
            listener,
        }
    }

    /// Re-evaluates the bonus after the client or the selection changed.
    ///
    /// A new non-zero maximum fills the field only while it is pristine, so
    /// auto-fill happens once per activation. Losing eligibility clears the
    /// field; a field the user edited stays edited and is not refilled later.
    pub fn recompute(
        &mut self,
        client: Option<&Client>,
        items: &[LineItem],
        now: DateTime<Utc>,
    ) -> &BonusEligibility {
        let previous = self.eligibility.max_discount;
        self.eligibility = self.evaluator.evaluate(client, items, now);
        let current = self.eligibility.max_discount;

        if current != previous {
            if current == 0 {
                let state = match self.input.state {
                    FieldState::Edited => FieldState::Edited,
                    FieldState::Pristine | FieldState::AutoFilled => FieldState::Pristine,
                };
                self.input = DiscountInput {
                    state,
                    ..DiscountInput::pristine()
                };
                self.listener.discount_changed(0);
            } else if self.input.state == FieldState::Pristine {
                self.input = DiscountInput {
                    value: current,
                    display: self.formatter.display(current),
                    state: FieldState::AutoFilled,
                };
                self.listener.discount_changed(current);
            }
        }

        &self.eligibility
    }

    /// Handles a keystroke in the discount input. No clamping happens here;
    /// see [`DiscountSession::validate`].
    pub fn input_changed(&mut self, raw: &str) {
        let value = parse_digits(raw);
        self.input = DiscountInput {
            value: value.unwrap_or(0),
            display: value
                .map(|amount| format_thousands(amount, self.formatter.separator()))
                .unwrap_or_default(),
            state: FieldState::Edited,
        };
        self.listener.discount_changed(self.input.value);
    }

    /// Normalizes the display once the input loses focus.
    pub fn input_blurred(&mut self, current: Amount) {
        self.input.value = current;
        self.input.display = self.formatter.display(current);
    }

    pub fn validate(&self, candidate: Amount) -> DiscountValidation {
        validate_discount(candidate, self.max_discount(), &self.formatter)
    }

    pub fn validate_current(&self) -> DiscountValidation {
        self.validate(self.input.value)
    }

    pub fn max_discount(&self) -> Amount {
        self.eligibility.max_discount
    }

    pub fn max_discount_display(&self) -> String {
        self.formatter.display(self.max_discount())
    }

    pub fn eligibility(&self) -> &BonusEligibility {
        &self.eligibility
    }

    pub fn input(&self) -> &DiscountInput {
        &self.input
    }

    pub fn discount(&self) -> Amount {
        self.input.value
    }

    pub fn display(&self) -> &str {
        &self.input.display
    }

    pub fn field_state(&self) -> FieldState {
        self.input.state
    }

    pub fn formatter(&self) -> &DiscountFormatter {
        &self.formatter
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }
}
