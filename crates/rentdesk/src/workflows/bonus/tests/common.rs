use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::workflows::bonus::domain::{
    Amount, BonusType, Client, ClientBonusGrant, ClientId, LineItem, TransactionType,
};
use crate::workflows::bonus::format::DiscountFormatter;
use crate::workflows::bonus::session::{DiscountListener, DiscountSession};

pub(super) const TARGET: Amount = 1_000_000;
pub(super) const DISCOUNT: Amount = 50_000;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn grant(kind: TransactionType) -> ClientBonusGrant {
    ClientBonusGrant {
        kind,
        bonus_type: Some(BonusType {
            bonus_name: "Service Gold".to_string(),
            target_amount: TARGET,
        }),
        client_discount_amount: DISCOUNT,
        start_date: Some(now() - Duration::days(1)),
        end_date: Some(now() + Duration::days(1)),
    }
}

pub(super) fn client_with(grant: Option<ClientBonusGrant>) -> Client {
    Client {
        id: Some(ClientId("client-17".to_string())),
        full_name: Some("Aziza Karimova".to_string()),
        phone: Some("+998 90 123 45 67".to_string()),
        bonus: grant,
    }
}

pub(super) fn service_client() -> Client {
    client_with(Some(grant(TransactionType::Service)))
}

/// 2 × 600 000 + 1 × 500 000 = 1 700 000.
pub(super) fn qualifying_items() -> Vec<LineItem> {
    vec![LineItem::new(2, 600_000), LineItem::new(1, 500_000)]
}

pub(super) fn small_items() -> Vec<LineItem> {
    vec![LineItem::new(1, 100_000)]
}

#[derive(Debug, Default)]
pub(super) struct RecordingListener {
    pub(super) events: Vec<Amount>,
}

impl DiscountListener for RecordingListener {
    fn discount_changed(&mut self, discount: Amount) {
        self.events.push(discount);
    }
}

pub(super) fn service_session() -> DiscountSession<RecordingListener> {
    DiscountSession::new(
        TransactionType::Service,
        DiscountFormatter::default(),
        RecordingListener::default(),
    )
}
