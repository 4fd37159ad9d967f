use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::super::domain::{amount_from_text, Amount, LineItem};
use super::super::format::parse_digits;

pub(crate) fn parse_line_items<R: Read>(reader: R) -> Result<Vec<LineItem>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut items = Vec::new();

    for record in csv_reader.deserialize::<LineItemRow>() {
        let row = record?;
        items.push(row.into_line_item());
    }

    Ok(items)
}

#[derive(Debug, Deserialize)]
struct LineItemRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    product_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    quantity: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    unit_price: Option<String>,
}

impl LineItemRow {
    fn into_line_item(self) -> LineItem {
        let quantity = self
            .quantity
            .as_deref()
            .and_then(parse_cell)
            .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
            .unwrap_or(0);
        let unit_price = self.unit_price.as_deref().and_then(parse_cell).unwrap_or(0);

        LineItem {
            product_id: self.product_id,
            name: self.name,
            quantity,
            unit_price,
        }
    }
}

/// Exports carry grouped amounts ("600 000", "600,000") and sometimes a
/// decimal part ("250000.50"), which rounds to a whole unit. A sign makes
/// the cell unusable.
fn parse_cell(value: &str) -> Option<Amount> {
    if value.contains('-') {
        return None;
    }

    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    match cleaned.matches('.').count() {
        1 => amount_from_text(&cleaned),
        // No decimal point, or dots used as group separators ("1.250.000").
        _ => parse_digits(&cleaned),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
