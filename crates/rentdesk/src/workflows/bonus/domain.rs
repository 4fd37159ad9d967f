//! Client, bonus grant and line item records as the dashboard backend serves them.
//!
//! The backend frequently returns bonus metadata half-populated (a bare id in
//! place of the `bonus_type` object, string amounts, missing dates). Decoding
//! never fails on those details; they surface as `None` or `0` and the
//! evaluator treats them as "no bonus applies".

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Whole currency units. The dashboard never deals in fractional amounts.
pub type Amount = u64;

/// Identifier wrapper for client records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

/// Transaction category a bonus grant is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Service,
    Rent,
    Sale,
    #[serde(other)]
    Unknown,
}

impl TransactionType {
    pub const fn label(self) -> &'static str {
        match self {
            TransactionType::Service => "SERVICE",
            TransactionType::Rent => "RENT",
            TransactionType::Sale => "SALE",
            TransactionType::Unknown => "UNKNOWN",
        }
    }

    /// Parses a tag the way the backend spells it, case-insensitively.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SERVICE" => Self::Service,
            "RENT" => Self::Rent,
            "SALE" => Self::Sale,
            _ => Self::Unknown,
        }
    }
}

/// Bonus program reference embedded in a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusType {
    #[serde(default)]
    pub bonus_name: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub target_amount: Amount,
}

/// Client-specific discount entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientBonusGrant {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, deserialize_with = "lenient_bonus_type")]
    pub bonus_type: Option<BonusType>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub client_discount_amount: Amount,
    #[serde(default, deserialize_with = "lenient_window_start")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_window_end")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Client record as delivered by the clients endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, deserialize_with = "lenient_client_id")]
    pub id: Option<ClientId>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_grant")]
    pub bonus: Option<ClientBonusGrant>,
}

/// Product row picked in the order/service builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub unit_price: Amount,
}

impl LineItem {
    pub fn new(quantity: u32, unit_price: Amount) -> Self {
        Self {
            product_id: None,
            name: None,
            quantity,
            unit_price,
        }
    }

    pub fn subtotal(&self) -> Amount {
        Amount::from(self.quantity).saturating_mul(self.unit_price)
    }
}

/// Sum of `quantity × unit_price` over the selection, saturating on overflow.
pub fn selection_total(items: &[LineItem]) -> Amount {
    items
        .iter()
        .fold(0, |total: Amount, item| total.saturating_add(item.subtotal()))
}

pub(crate) fn amount_from_value(value: &Value) -> Option<Amount> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(round_to_amount)),
        Value::String(raw) => amount_from_text(raw),
        _ => None,
    }
}

/// Reads a plain decimal amount. Fractions are rounded to whole units here,
/// before anything is multiplied or summed.
pub(crate) fn amount_from_text(raw: &str) -> Option<Amount> {
    let trimmed = raw.trim();
    trimmed
        .parse::<Amount>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(round_to_amount))
}

fn round_to_amount(float: f64) -> Option<Amount> {
    (float.is_finite() && float >= 0.0).then(|| float.round().min(Amount::MAX as f64) as Amount)
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value).unwrap_or_else(|| {
        if !value.is_null() {
            debug!(%value, "unusable amount, treating as 0");
        }
        0
    }))
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value)
        .map(|amount| u32::try_from(amount).unwrap_or(u32::MAX))
        .unwrap_or(0))
}

fn lenient_bonus_type<'de, D>(deserializer: D) -> Result<Option<BonusType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(bonus_type_from_value(value))
}

pub(crate) fn bonus_type_from_value(value: Value) -> Option<BonusType> {
    let object = match &value {
        Value::Object(object) => object,
        Value::Null => return None,
        other => {
            debug!(value = %other, "bonus_type is not an object");
            return None;
        }
    };

    let target_amount = match object.get("target_amount").and_then(amount_from_value) {
        Some(amount) => amount,
        None => {
            debug!(%value, "bonus_type has no usable target_amount");
            return None;
        }
    };

    let bonus_name = object
        .get("bonus_name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(BonusType {
        bonus_name,
        target_amount,
    })
}

fn lenient_grant<'de, D>(deserializer: D) -> Result<Option<ClientBonusGrant>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match serde_json::from_value::<ClientBonusGrant>(value) {
        Ok(grant) => Ok(Some(grant)),
        Err(err) => {
            debug!(error = %err, "client bonus could not be decoded, ignoring it");
            Ok(None)
        }
    }
}

fn lenient_client_id<'de, D>(deserializer: D) -> Result<Option<ClientId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(raw) if !raw.trim().is_empty() => Some(ClientId(raw)),
        Value::Number(number) => Some(ClientId(number.to_string())),
        _ => None,
    })
}

fn lenient_window_start<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|value| parse_window_bound(value, NaiveTime::MIN)))
}

fn lenient_window_end<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|value| parse_window_bound(value, end_of_day)))
}

/// Accepts RFC 3339 timestamps or bare dates; a bare date takes `time_of_day`.
pub(crate) fn parse_window_bound(value: &str, time_of_day: NaiveTime) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(time_of_day).and_utc());
    }

    debug!(value = trimmed, "unparseable bonus window bound");
    None
}
