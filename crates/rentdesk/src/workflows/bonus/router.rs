use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Amount, Client, LineItem, TransactionType};
use super::eligibility::{BonusEvaluator, EligibilityStatus};
use super::format::DiscountFormatter;
use super::session::{validate_discount, DiscountValidation};

/// Shared, read-only state for the bonus endpoints.
#[derive(Debug, Clone, Default)]
pub struct BonusApiState {
    pub formatter: DiscountFormatter,
}

impl BonusApiState {
    pub fn new(formatter: DiscountFormatter) -> Self {
        Self { formatter }
    }
}

/// Router builder exposing the evaluator to the dashboard.
pub fn bonus_router(state: Arc<BonusApiState>) -> Router {
    Router::new()
        .route("/api/v1/bonus/evaluate", post(evaluate_handler))
        .route("/api/v1/bonus/validate", post(validate_handler))
        .with_state(state)
}

/// Snapshot of the order/service builder sent for evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub transaction_type: TransactionType,
    /// Evaluation instant; the server clock is used when absent.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub transaction_type: TransactionType,
    pub eligible: bool,
    pub max_discount: Amount,
    pub max_discount_display: String,
    pub total_selected: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_name: Option<String>,
    pub status: EligibilityStatus,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
    pub discount: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub discount: Amount,
    pub max_discount: Amount,
    #[serde(flatten)]
    pub validation: DiscountValidation,
}

pub(crate) async fn evaluate_handler(
    State(state): State<Arc<BonusApiState>>,
    Json(request): Json<EvaluateRequest>,
) -> Json<EvaluateResponse> {
    let now = request.at.unwrap_or_else(Utc::now);
    let eligibility = BonusEvaluator::new(request.transaction_type).evaluate(
        request.client.as_ref(),
        &request.line_items,
        now,
    );

    Json(EvaluateResponse {
        transaction_type: eligibility.transaction_type,
        eligible: eligibility.is_eligible(),
        max_discount: eligibility.max_discount,
        max_discount_display: state.formatter.display(eligibility.max_discount),
        total_selected: eligibility.total_selected,
        target_amount: eligibility.target_amount,
        bonus_name: eligibility.bonus_name,
        reason: eligibility.status.summary(),
        status: eligibility.status,
    })
}

pub(crate) async fn validate_handler(
    State(state): State<Arc<BonusApiState>>,
    Json(request): Json<ValidateRequest>,
) -> Json<ValidateResponse> {
    let now = request.at.unwrap_or_else(Utc::now);
    let max_discount = BonusEvaluator::new(request.transaction_type)
        .evaluate(request.client.as_ref(), &request.line_items, now)
        .max_discount;

    Json(ValidateResponse {
        discount: request.discount,
        max_discount,
        validation: validate_discount(request.discount, max_discount, &state.formatter),
    })
}
