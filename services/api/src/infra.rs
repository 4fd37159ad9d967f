use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use rentdesk::error::AppError;
use rentdesk::workflows::bonus::{Client, TransactionType};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reads a client record saved from the clients endpoint.
pub(crate) fn load_client(path: &Path) -> Result<Client, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let client = serde_json::from_str(&raw)?;
    Ok(client)
}

pub(crate) fn parse_transaction_type(raw: &str) -> Result<TransactionType, String> {
    match TransactionType::parse(raw) {
        TransactionType::Unknown => Err(format!(
            "unsupported transaction type '{raw}' (expected SERVICE, RENT or SALE)"
        )),
        kind => Ok(kind),
    }
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}
