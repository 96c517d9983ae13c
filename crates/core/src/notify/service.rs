//! Budget alert dispatcher.
//!
//! Dispatch is fire-and-forget: the triggering write returns to its caller
//! without waiting for, or learning about, the outcome. Failures are
//! logged and dropped. No state suppresses repeats - every qualifying
//! write re-evaluates and may re-send an identical alert.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use tally_shared::AlertConfig;
use tally_shared::types::CategoryId;

use super::error::AlertError;
use super::types::AlertRecipient;
use crate::budget::{BudgetService, ThresholdState};
use crate::category::Category;
use crate::period::Month;
use crate::report::ReportService;
use crate::store::{CategoryRegistry, NotificationChannel};

/// Budget alert service.
#[derive(Clone)]
pub struct BudgetAlertService {
    reports: ReportService,
    categories: Arc<dyn CategoryRegistry>,
    channel: Arc<dyn NotificationChannel>,
    config: AlertConfig,
}

impl BudgetAlertService {
    /// Creates a new alert service.
    #[must_use]
    pub fn new(
        reports: ReportService,
        categories: Arc<dyn CategoryRegistry>,
        channel: Arc<dyn NotificationChannel>,
        config: AlertConfig,
    ) -> Self {
        Self {
            reports,
            categories,
            channel,
            config,
        }
    }

    /// Evaluates the category's month and sends an alert if warranted,
    /// detached from the caller.
    ///
    /// Returns immediately; the evaluation runs on a spawned task whose
    /// failure is logged and never surfaced.
    pub fn notify_if_needed(
        &self,
        recipient: AlertRecipient,
        category_id: CategoryId,
        date: NaiveDate,
    ) {
        if !self.config.enabled {
            return;
        }
        let service = self.clone();
        tokio::spawn(async move {
            match service
                .evaluate_and_send(&recipient, category_id, date)
                .await
            {
                Ok(Some(state)) => {
                    info!(user = %recipient.user_id, category = %category_id, ?state, "budget alert sent");
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(user = %recipient.user_id, category = %category_id, %error, "budget alert dispatch failed");
                }
            }
        });
    }

    /// One synchronous evaluation pass: resolve the category, total the
    /// month's spend, classify, and send on `Warning`/`Exceeded`.
    ///
    /// Returns the state an alert was sent for, or `None` when no alert
    /// was warranted (category missing, tracking disabled, or spend below
    /// the warning band).
    pub async fn evaluate_and_send(
        &self,
        recipient: &AlertRecipient,
        category_id: CategoryId,
        date: NaiveDate,
    ) -> Result<Option<ThresholdState>, AlertError> {
        let Some(category) = self.categories.find_by_id(category_id).await? else {
            return Ok(None);
        };
        if !category.has_budget() {
            return Ok(None);
        }

        let month = Month::containing(date);
        let spent = self
            .reports
            .category_spend(recipient.user_id, category_id, month)
            .await?;

        let state = BudgetService::classify_spend(spent, category.monthly_budget);
        if state == ThresholdState::None {
            return Ok(None);
        }

        let (subject, body) = compose_alert(&recipient.name, &category, spent, state);
        self.channel.send(&recipient.email, &subject, &body).await?;
        Ok(Some(state))
    }
}

/// Builds the alert subject and plain-text body.
fn compose_alert(
    recipient_name: &str,
    category: &Category,
    spent: Decimal,
    state: ThresholdState,
) -> (String, String) {
    let is_warning = state == ThresholdState::Warning;
    let subject = if is_warning {
        format!("Budget warning: {} nearly reached", category.name)
    } else {
        format!("Budget alert: {} limit exceeded", category.name)
    };

    let verdict = if is_warning {
        "reached 90% of"
    } else {
        "exceeded"
    };
    let percent = BudgetService::spend_percent(spent, category.monthly_budget);
    let body = format!(
        r"Hello {recipient_name},

This is an automated alert from Tally.

You have {verdict} your monthly budget for: {category_name}.

Budget: {budget:.2}
Total spent: {spent:.2} ({percent}%)

Please check your dashboard to review your recent expenses.

This is an automated message. Please do not reply.",
        category_name = category.name,
        budget = category.monthly_budget.round_dp(2),
        spent = spent.round_dp(2),
    );

    (subject, body)
}
