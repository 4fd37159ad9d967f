use crate::infra::{load_client, parse_instant, parse_transaction_type};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use rentdesk::config::AppConfig;
use rentdesk::error::AppError;
use rentdesk::workflows::bonus::{
    validate_discount, Amount, BonusEligibility, BonusEvaluator, BonusType, Client,
    ClientBonusGrant, ClientId, DiscountFormatter, DiscountSession, LineItem, LineItemImporter,
    TransactionType,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct BonusEvaluateArgs {
    /// Client JSON as returned by the clients endpoint
    #[arg(long)]
    pub(crate) client: PathBuf,
    /// Line item CSV (product_id,name,quantity,unit_price)
    #[arg(long)]
    pub(crate) items: PathBuf,
    /// Transaction type being built (SERVICE, RENT or SALE)
    #[arg(long = "type", value_parser = parse_transaction_type, default_value = "SERVICE")]
    pub(crate) transaction_type: TransactionType,
    /// Evaluation instant, RFC 3339 or YYYY-MM-DD (defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) at: Option<DateTime<Utc>>,
    /// Discount to check against the computed maximum
    #[arg(long)]
    pub(crate) discount: Option<Amount>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference instant for the demo, RFC 3339 or YYYY-MM-DD (defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub(crate) today: Option<DateTime<Utc>>,
    /// Text the demo cashier types into the discount field
    #[arg(long, default_value = "60 000")]
    pub(crate) typed_discount: String,
}

pub(crate) fn run_bonus_evaluate(args: BonusEvaluateArgs) -> Result<(), AppError> {
    let BonusEvaluateArgs {
        client,
        items,
        transaction_type,
        at,
        discount,
    } = args;

    let config = AppConfig::load()?;
    let formatter = config.bonus.formatter();
    let client = load_client(&client)?;
    let items = LineItemImporter::from_path(items)?;
    let now = at.unwrap_or_else(Utc::now);

    let eligibility =
        BonusEvaluator::new(transaction_type).evaluate(Some(&client), &items, now);
    render_eligibility(&client, &eligibility, &formatter, now);

    if let Some(candidate) = discount {
        let validation = validate_discount(candidate, eligibility.max_discount, &formatter);
        if validation.is_valid {
            println!(
                "Discount {}: accepted",
                formatter.amount_with_currency(candidate)
            );
        } else {
            println!(
                "Discount {}: rejected ({})",
                formatter.amount_with_currency(candidate),
                validation.message.unwrap_or_default()
            );
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        typed_discount,
    } = args;

    let config = AppConfig::load()?;
    let formatter = config.bonus.formatter();
    let now = today.unwrap_or_else(Utc::now);
    let client = demo_client(now);

    println!("Bonus discount demo");
    println!(
        "Client {} holds \"Repair loyalty\": {} off SERVICE orders from {}",
        client.full_name.as_deref().unwrap_or("(unnamed)"),
        formatter.amount_with_currency(50_000),
        formatter.amount_with_currency(1_000_000)
    );

    let listener_formatter = formatter.clone();
    let mut session = DiscountSession::new(
        TransactionType::Service,
        formatter.clone(),
        move |discount: Amount| {
            println!(
                "    -> form discount set to {}",
                listener_formatter.amount_with_currency(discount)
            );
        },
    );

    let mut items = vec![demo_item("drill-01", "Hammer drill repair", 1, 600_000)];
    println!("\n1. Client picked, one repair on the order");
    session.recompute(Some(&client), &items, now);
    render_session_step(session.eligibility(), session.display(), &formatter);

    println!("\n2. Second repair and a blade service added");
    items.push(demo_item("drill-02", "Hammer drill repair", 1, 600_000));
    items.push(demo_item("blade-14", "Blade sharpening", 1, 500_000));
    session.recompute(Some(&client), &items, now);
    render_session_step(session.eligibility(), session.display(), &formatter);

    println!("\n3. Cashier types \"{}\"", typed_discount);
    session.input_changed(&typed_discount);
    let validation = session.validate_current();
    println!("    display \"{}\"", session.display());
    if validation.is_valid {
        println!("    within the bonus limit");
    } else {
        println!("    warning: {}", validation.message.unwrap_or_default());
    }
    session.input_blurred(session.discount());

    println!("\n4. Quantity change keeps the cashier's value");
    items[2].quantity = 2;
    session.recompute(Some(&client), &items, now);
    render_session_step(session.eligibility(), session.display(), &formatter);

    println!("\n5. Repairs removed, order drops below the target");
    items.truncate(1);
    session.recompute(Some(&client), &items, now);
    render_session_step(session.eligibility(), session.display(), &formatter);

    Ok(())
}

fn demo_client(now: DateTime<Utc>) -> Client {
    Client {
        id: Some(ClientId("demo-1".to_string())),
        full_name: Some("Demo Client".to_string()),
        phone: None,
        bonus: Some(ClientBonusGrant {
            kind: TransactionType::Service,
            bonus_type: Some(BonusType {
                bonus_name: "Repair loyalty".to_string(),
                target_amount: 1_000_000,
            }),
            client_discount_amount: 50_000,
            start_date: Some(now - Duration::days(1)),
            end_date: Some(now + Duration::days(1)),
        }),
    }
}

fn demo_item(product_id: &str, name: &str, quantity: u32, unit_price: Amount) -> LineItem {
    LineItem {
        product_id: Some(product_id.to_string()),
        name: Some(name.to_string()),
        quantity,
        unit_price,
    }
}

fn render_session_step(
    eligibility: &BonusEligibility,
    display: &str,
    formatter: &DiscountFormatter,
) {
    println!(
        "    total {} | max discount {} | {}",
        formatter.amount_with_currency(eligibility.total_selected),
        formatter.amount_with_currency(eligibility.max_discount),
        eligibility.status.summary()
    );
    println!("    discount field \"{}\"", display);
}

fn render_eligibility(
    client: &Client,
    eligibility: &BonusEligibility,
    formatter: &DiscountFormatter,
    now: DateTime<Utc>,
) {
    println!("Bonus evaluation ({})", eligibility.transaction_type.label());
    println!(
        "Client: {} ({})",
        client.full_name.as_deref().unwrap_or("(unnamed)"),
        client
            .id
            .as_ref()
            .map(|id| id.0.as_str())
            .unwrap_or("no id")
    );
    println!("Evaluated at: {}", now.to_rfc3339());
    println!(
        "Selected total: {}",
        formatter.amount_with_currency(eligibility.total_selected)
    );
    if let Some(target) = eligibility.target_amount {
        println!("Bonus target: {}", formatter.amount_with_currency(target));
    }
    println!(
        "Max discount: {}",
        formatter.amount_with_currency(eligibility.max_discount)
    );
    println!("Status: {}", eligibility.status.summary());
}
