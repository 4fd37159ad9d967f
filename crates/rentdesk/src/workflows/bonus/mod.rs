//! Client bonus eligibility and the discount field of the service/rent builder.
//!
//! A client may hold one bonus grant scoped to a transaction type and a
//! validity window. When the selected line items reach the grant's target
//! amount, the client's discount ceiling becomes the maximum discount for the
//! transaction. Malformed or missing bonus data always means "no bonus".

pub mod domain;
pub(crate) mod eligibility;
pub mod format;
pub mod import;
pub mod router;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    selection_total, Amount, BonusType, Client, ClientBonusGrant, ClientId, LineItem,
    TransactionType,
};
pub use eligibility::{compute_max_discount, BonusEligibility, BonusEvaluator, EligibilityStatus};
pub use format::{format_thousands, parse_digits, BonusMessages, DiscountFormatter};
pub use import::{LineItemImportError, LineItemImporter};
pub use router::{
    bonus_router, BonusApiState, EvaluateRequest, EvaluateResponse, ValidateRequest,
    ValidateResponse,
};
pub use session::{
    validate_discount, DiscountInput, DiscountListener, DiscountSession, DiscountValidation,
    FieldState,
};
