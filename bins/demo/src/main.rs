//! Tally demo
//!
//! Seeds the in-memory collaborators with a sample user, prints the
//! monthly summary for the current month, and drives one over-budget
//! write through the alert dispatcher.
//!
//! Usage: cargo run --bin demo

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::category::Category;
use tally_core::expense::{ExpenseInput, ExpenseService};
use tally_core::notify::{AlertRecipient, BudgetAlertService};
use tally_core::period::Month;
use tally_core::report::ReportService;
use tally_core::store::CategoryRegistry;
use tally_shared::AppConfig;
use tally_shared::types::{CategoryId, UserId};
use tally_store::{InMemoryCategoryRegistry, InMemoryTransactionStore, RecordingChannel};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    info!(alerts_enabled = config.alerts.enabled, "configuration loaded");

    let transactions = Arc::new(InMemoryTransactionStore::new());
    let categories = Arc::new(InMemoryCategoryRegistry::new());
    let channel = Arc::new(RecordingChannel::new());

    let reports = ReportService::new(transactions.clone(), categories.clone());
    let alerts = BudgetAlertService::new(
        reports.clone(),
        categories.clone(),
        channel.clone(),
        config.alerts.clone(),
    );
    let expenses = ExpenseService::new(transactions.clone(), categories.clone(), alerts);

    let user = AlertRecipient {
        user_id: UserId::new(),
        email: "demo@tally.dev".to_string(),
        name: "Demo User".to_string(),
    };

    let today = Utc::now().date_naive();
    let month = Month::containing(today);
    let first = month.period().start;

    let now = Utc::now();
    let food = Category {
        id: CategoryId::new(),
        name: "Food".to_string(),
        owner_id: Some(user.user_id),
        monthly_budget: Decimal::from(1000),
        created_at: now,
        updated_at: now,
    };
    let travel = Category {
        id: CategoryId::new(),
        name: "Travel".to_string(),
        owner_id: Some(user.user_id),
        monthly_budget: Decimal::ZERO,
        created_at: now,
        updated_at: now,
    };
    categories.insert(food.clone()).await?;
    categories.insert(travel.clone()).await?;
    info!("seeded categories: Food (budget 1000), Travel (untracked)");

    for (category_id, amount, day) in [
        (food.id, Decimal::from(400), 5),
        (food.id, Decimal::from(500), 12),
        (travel.id, Decimal::from(200), 20),
    ] {
        let date = first.with_day(day).unwrap_or(first);
        expenses
            .create(
                &user,
                ExpenseInput {
                    amount,
                    category_id,
                    date,
                    note: None,
                },
            )
            .await?;
    }

    let summary = reports.monthly_summary(user.user_id, month).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    // One more write pushes Food over its budget and triggers a detached
    // dispatch.
    expenses
        .create(
            &user,
            ExpenseInput {
                amount: Decimal::from(150),
                category_id: food.id,
                date: today,
                note: Some("dinner out".to_string()),
            },
        )
        .await?;

    tokio::time::sleep(Duration::from_millis(100)).await;
    for message in channel.sent().await {
        info!(to = %message.to, subject = %message.subject, "alert dispatched");
    }

    Ok(())
}
