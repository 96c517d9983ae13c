//! Shared harness for engine integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use tally_core::category::{Category, CategoryService};
use tally_core::expense::{Expense, ExpenseInput, ExpenseService};
use tally_core::notify::{AlertRecipient, BudgetAlertService};
use tally_core::report::ReportService;
use tally_shared::AlertConfig;
use tally_shared::types::{CategoryId, UserId};
use tally_store::{InMemoryCategoryRegistry, InMemoryTransactionStore, RecordingChannel};

/// Fully wired engine over in-memory collaborators.
pub struct Harness {
    pub transactions: Arc<InMemoryTransactionStore>,
    pub categories: Arc<InMemoryCategoryRegistry>,
    pub channel: Arc<RecordingChannel>,
    pub reports: ReportService,
    pub alerts: BudgetAlertService,
    pub expenses: ExpenseService,
    pub category_service: CategoryService,
    pub user: AlertRecipient,
}

impl Harness {
    /// Harness with background alert dispatch enabled.
    pub fn new() -> Self {
        Self::with_alerts(true)
    }

    /// Harness with background dispatch switched on or off.
    ///
    /// Tests that assert on aggregates usually disable dispatch so the
    /// recording channel stays quiet.
    pub fn with_alerts(enabled: bool) -> Self {
        let transactions = Arc::new(InMemoryTransactionStore::new());
        let categories = Arc::new(InMemoryCategoryRegistry::new());
        let channel = Arc::new(RecordingChannel::new());

        let reports = ReportService::new(transactions.clone(), categories.clone());
        let alerts = BudgetAlertService::new(
            reports.clone(),
            categories.clone(),
            channel.clone(),
            AlertConfig { enabled },
        );
        let expenses = ExpenseService::new(transactions.clone(), categories.clone(), alerts.clone());
        let category_service = CategoryService::new(categories.clone(), transactions.clone());

        let user = AlertRecipient {
            user_id: UserId::new(),
            email: "sam@example.com".to_string(),
            name: "Sam".to_string(),
        };

        Self {
            transactions,
            categories,
            channel,
            reports,
            alerts,
            expenses,
            category_service,
            user,
        }
    }

    /// Inserts a category directly into the registry.
    pub async fn seed_category(
        &self,
        name: &str,
        owner_id: Option<UserId>,
        monthly_budget: Decimal,
    ) -> Category {
        use tally_core::store::CategoryRegistry;

        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            name: name.to_string(),
            owner_id,
            monthly_budget,
            created_at: now,
            updated_at: now,
        };
        self.categories.insert(category.clone()).await.unwrap();
        category
    }

    /// Records an expense for the harness user through the service.
    pub async fn add_expense(
        &self,
        category_id: CategoryId,
        amount: Decimal,
        date: NaiveDate,
    ) -> Expense {
        self.expenses
            .create(
                &self.user,
                ExpenseInput {
                    amount,
                    category_id,
                    date,
                    note: None,
                },
            )
            .await
            .unwrap()
    }

    /// Polls until the recording channel has at least `n` messages.
    pub async fn wait_for_sends(&self, n: usize) {
        for _ in 0..100 {
            if self.channel.sent().await.len() >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "timed out waiting for {n} sends, got {}",
            self.channel.sent().await.len()
        );
    }
}

/// Shorthand date constructor.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
