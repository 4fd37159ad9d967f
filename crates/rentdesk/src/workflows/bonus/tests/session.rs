use super::common::*;
use chrono::Duration;

use crate::workflows::bonus::domain::{Amount, LineItem, TransactionType};
use crate::workflows::bonus::format::{BonusMessages, DiscountFormatter};
use crate::workflows::bonus::session::{DiscountSession, FieldState};

#[test]
fn pristine_field_is_filled_once_when_bonus_activates() {
    let client = service_client();
    let items = qualifying_items();
    let mut session = service_session();

    session.recompute(Some(&client), &items, now());

    assert_eq!(session.max_discount(), DISCOUNT);
    assert_eq!(session.discount(), DISCOUNT);
    assert_eq!(session.display(), "50 000");
    assert_eq!(session.field_state(), FieldState::AutoFilled);
    assert_eq!(session.listener().events, vec![DISCOUNT]);

    session.recompute(Some(&client), &items, now());
    session.recompute(Some(&client), &items, now() + Duration::minutes(5));

    assert_eq!(session.listener().events, vec![DISCOUNT]);
    assert_eq!(session.display(), "50 000");
}

#[test]
fn ineligible_selection_leaves_field_untouched() {
    let client = service_client();
    let mut session = service_session();

    let eligibility = session.recompute(Some(&client), &small_items(), now());

    assert_eq!(eligibility.max_discount, 0);
    assert_eq!(session.display(), "");
    assert_eq!(session.field_state(), FieldState::Pristine);
    assert!(session.listener().events.is_empty());
}

#[test]
fn user_value_survives_recomputation() {
    let client = service_client();
    let items = qualifying_items();
    let mut session = service_session();

    session.recompute(Some(&client), &items, now());
    session.input_changed("30000");
    session.recompute(Some(&client), &items, now());

    assert_eq!(session.discount(), 30_000);
    assert_eq!(session.display(), "30 000");
    assert_eq!(session.field_state(), FieldState::Edited);
    assert_eq!(session.listener().events, vec![DISCOUNT, 30_000]);
}

#[test]
fn user_value_survives_a_new_maximum() {
    let mut client = service_client();
    let items = qualifying_items();
    let mut session = service_session();

    session.recompute(Some(&client), &items, now());
    session.input_changed("20 000");

    if let Some(bonus) = client.bonus.as_mut() {
        bonus.client_discount_amount = 80_000;
    }
    session.recompute(Some(&client), &items, now());

    assert_eq!(session.max_discount(), 80_000);
    assert_eq!(session.discount(), 20_000);
    assert_eq!(session.listener().events, vec![DISCOUNT, 20_000]);
}

#[test]
fn cleared_field_is_not_refilled() {
    let client = service_client();
    let mut session = service_session();

    session.input_changed("");
    assert_eq!(session.field_state(), FieldState::Edited);

    session.recompute(Some(&client), &qualifying_items(), now());

    assert_eq!(session.max_discount(), DISCOUNT);
    assert_eq!(session.display(), "");
    assert_eq!(session.discount(), 0);
    assert_eq!(session.listener().events, vec![0]);
}

#[test]
fn auto_fill_is_one_shot_when_the_maximum_moves() {
    let mut client = service_client();
    let items = qualifying_items();
    let mut session = service_session();

    session.recompute(Some(&client), &items, now());
    if let Some(bonus) = client.bonus.as_mut() {
        bonus.client_discount_amount = 80_000;
    }
    session.recompute(Some(&client), &items, now());

    assert_eq!(session.max_discount(), 80_000);
    assert_eq!(session.discount(), DISCOUNT);
    assert_eq!(session.display(), "50 000");
    assert_eq!(session.field_state(), FieldState::AutoFilled);
    assert_eq!(session.listener().events, vec![DISCOUNT]);
}

#[test]
fn losing_eligibility_clears_an_auto_filled_field_for_the_next_activation() {
    let client = service_client();
    let mut session = service_session();

    session.recompute(Some(&client), &qualifying_items(), now());
    session.recompute(Some(&client), &small_items(), now());

    assert_eq!(session.max_discount(), 0);
    assert_eq!(session.display(), "");
    assert_eq!(session.field_state(), FieldState::Pristine);
    assert_eq!(session.listener().events, vec![DISCOUNT, 0]);

    session.recompute(Some(&client), &qualifying_items(), now());
    assert_eq!(session.display(), "50 000");
    assert_eq!(session.listener().events, vec![DISCOUNT, 0, DISCOUNT]);
}

#[test]
fn losing_eligibility_clears_a_typed_value_but_keeps_it_user_owned() {
    let client = service_client();
    let mut session = service_session();

    session.recompute(Some(&client), &qualifying_items(), now());
    session.input_changed("45000");
    session.recompute(Some(&client), &small_items(), now());

    assert_eq!(session.max_discount(), 0);
    assert_eq!(session.discount(), 0);
    assert_eq!(session.display(), "");
    assert_eq!(session.field_state(), FieldState::Edited);
    assert_eq!(session.listener().events, vec![DISCOUNT, 45_000, 0]);

    session.recompute(Some(&client), &qualifying_items(), now());
    assert_eq!(session.max_discount(), DISCOUNT);
    assert_eq!(session.discount(), 0);
    assert_eq!(session.display(), "");
    assert_eq!(session.listener().events, vec![DISCOUNT, 45_000, 0]);
}

#[test]
fn cleared_field_stays_empty_across_eligibility_loss_and_return() {
    let client = service_client();
    let mut session = service_session();

    session.recompute(Some(&client), &qualifying_items(), now());
    session.input_changed("");
    assert_eq!(session.field_state(), FieldState::Edited);

    session.recompute(Some(&client), &small_items(), now());
    assert_eq!(session.field_state(), FieldState::Edited);
    assert_eq!(session.display(), "");

    session.recompute(Some(&client), &qualifying_items(), now());

    assert_eq!(session.max_discount(), DISCOUNT);
    assert_eq!(session.discount(), 0);
    assert_eq!(session.display(), "");
    assert_eq!(session.field_state(), FieldState::Edited);
    assert!(session.validate_current().is_valid);
    assert_eq!(session.listener().events, vec![DISCOUNT, 0, 0]);
}

#[test]
fn switching_to_a_client_without_bonus_resets_the_field() {
    let client = service_client();
    let plain = client_with(None);
    let items = qualifying_items();
    let mut session = service_session();

    session.recompute(Some(&client), &items, now());
    session.recompute(Some(&plain), &items, now());

    assert_eq!(session.display(), "");
    assert_eq!(session.listener().events, vec![DISCOUNT, 0]);
}

#[test]
fn empty_input_notifies_zero() {
    let mut session = service_session();

    session.input_changed("");

    assert_eq!(session.display(), "");
    assert_eq!(session.discount(), 0);
    assert_eq!(session.listener().events, vec![0]);
}

#[test]
fn input_is_digit_filtered_and_grouped_without_clamping() {
    let client = service_client();
    let mut session = service_session();
    session.recompute(Some(&client), &qualifying_items(), now());

    session.input_changed("1a2b3c4567");

    assert_eq!(session.discount(), 1_234_567);
    assert_eq!(session.display(), "1 234 567");
    assert!(!session.validate_current().is_valid);
}

#[test]
fn non_numeric_input_behaves_like_empty_input() {
    let mut session = service_session();

    session.input_changed("abc");

    assert_eq!(session.display(), "");
    assert_eq!(session.listener().events, vec![0]);
}

#[test]
fn blur_reformats_display() {
    let mut session = service_session();

    session.input_changed("0");
    assert_eq!(session.display(), "0");

    session.input_blurred(0);
    assert_eq!(session.display(), "");

    session.input_blurred(1_500);
    assert_eq!(session.display(), "1 500");
    assert_eq!(session.discount(), 1_500);
}

#[test]
fn validation_enforces_the_held_maximum() {
    let client = service_client();
    let mut session = service_session();
    session.recompute(Some(&client), &qualifying_items(), now());

    assert!(session.validate(DISCOUNT).is_valid);
    assert!(session.validate(0).is_valid);

    let rejected = session.validate(DISCOUNT + 1);
    assert!(!rejected.is_valid);
    assert_eq!(
        rejected.message.as_deref(),
        Some("Discount cannot exceed 50 000 so'm")
    );
}

#[test]
fn validation_is_open_without_a_bonus() {
    let session = service_session();

    assert!(session.validate(10_000_000).is_valid);
    assert!(session.validate(0).is_valid);
}

#[test]
fn closures_can_listen() {
    let client = service_client();
    let mut seen: Vec<Amount> = Vec::new();
    {
        let mut session = DiscountSession::new(
            TransactionType::Service,
            DiscountFormatter::new(
                ',',
                BonusMessages {
                    currency_label: "UZS".to_string(),
                    discount_exceeds_max: "max {max} {currency}".to_string(),
                },
            ),
            |discount: Amount| seen.push(discount),
        );
        session.recompute(Some(&client), &[LineItem::new(3, 400_000)], now());
        assert_eq!(session.display(), "50,000");
        assert_eq!(
            session.validate(60_000).message.as_deref(),
            Some("max 50,000 UZS")
        );
    }

    assert_eq!(seen, vec![DISCOUNT]);
}
