use chrono::{DateTime, Utc};

use super::super::domain::{BonusType, Client, ClientBonusGrant, TransactionType};
use super::status::EligibilityStatus;

/// Grant that passed every structural and temporal guard.
pub(crate) struct ActiveGrant<'a> {
    pub grant: &'a ClientBonusGrant,
    pub bonus_type: &'a BonusType,
}

pub(crate) fn active_grant<'a>(
    client: Option<&'a Client>,
    kind: TransactionType,
    now: DateTime<Utc>,
) -> Result<ActiveGrant<'a>, EligibilityStatus> {
    let client = client.ok_or(EligibilityStatus::NoClient)?;
    let grant = client.bonus.as_ref().ok_or(EligibilityStatus::NoGrant)?;
    let bonus_type = grant
        .bonus_type
        .as_ref()
        .ok_or(EligibilityStatus::MalformedBonusType)?;

    if grant.kind != kind || kind == TransactionType::Unknown {
        return Err(EligibilityStatus::TypeMismatch {
            expected: kind,
            actual: grant.kind,
        });
    }

    check_window(grant, now)?;

    Ok(ActiveGrant { grant, bonus_type })
}

/// Both bounds are inclusive.
fn check_window(grant: &ClientBonusGrant, now: DateTime<Utc>) -> Result<(), EligibilityStatus> {
    let (starts_at, ended_at) = match (grant.start_date, grant.end_date) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(EligibilityStatus::MissingWindow),
    };

    if now < starts_at {
        return Err(EligibilityStatus::NotYetActive { starts_at });
    }
    if now > ended_at {
        return Err(EligibilityStatus::Expired { ended_at });
    }

    Ok(())
}
