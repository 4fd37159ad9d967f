use serde::{Deserialize, Serialize};

use super::domain::Amount;

/// Groups the digits of `value` in threes from the right.
pub fn format_thousands(value: Amount, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }

    grouped
}

/// Keeps only ASCII digits and reads them as an amount.
///
/// Returns `None` when nothing numeric was typed. Absurdly long input
/// saturates at `Amount::MAX` instead of failing.
pub fn parse_digits(raw: &str) -> Option<Amount> {
    let mut seen_digit = false;
    let mut value: Amount = 0;

    for digit in raw.chars().filter_map(|c| c.to_digit(10)) {
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(Amount::from(digit));
    }

    seen_digit.then_some(value)
}

/// Localized wording for the discount field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusMessages {
    pub currency_label: String,
    /// Template with `{max}` and `{currency}` placeholders.
    pub discount_exceeds_max: String,
}

impl Default for BonusMessages {
    fn default() -> Self {
        Self {
            currency_label: "so'm".to_string(),
            discount_exceeds_max: "Discount cannot exceed {max} {currency}".to_string(),
        }
    }
}

/// Renders amounts and validation messages for the discount field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountFormatter {
    separator: char,
    messages: BonusMessages,
}

impl Default for DiscountFormatter {
    fn default() -> Self {
        Self::new(' ', BonusMessages::default())
    }
}

impl DiscountFormatter {
    pub fn new(separator: char, messages: BonusMessages) -> Self {
        Self {
            separator,
            messages,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn messages(&self) -> &BonusMessages {
        &self.messages
    }

    /// Display text for the input: empty for zero, grouped digits otherwise.
    pub fn display(&self, value: Amount) -> String {
        if value == 0 {
            String::new()
        } else {
            format_thousands(value, self.separator)
        }
    }

    pub fn amount_with_currency(&self, value: Amount) -> String {
        format!(
            "{} {}",
            format_thousands(value, self.separator),
            self.messages.currency_label
        )
    }

    pub fn exceeds_max_message(&self, max: Amount) -> String {
        self.messages
            .discount_exceeds_max
            .replace("{max}", &format_thousands(max, self.separator))
            .replace("{currency}", &self.messages.currency_label)
    }
}
