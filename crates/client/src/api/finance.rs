//! Income, expense, category and summary endpoints under `/api/finance`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use finnote_core::finance::{Expense, ExpenseCategory, Income, MonthlySummary, Period};
use finnote_shared::AppResult;
use finnote_shared::types::{ExpenseId, GoalId, IncomeId};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::IgnoredAny;
use validator::Validate;

use super::{non_negative, not_blank};
use crate::http::{ApiClient, validate_payload};

const INCOMES: &str = "/api/finance/incomes";
const EXPENSES: &str = "/api/finance/expenses";
const CATEGORIES: &str = "/api/finance/categories";
const SUMMARY: &str = "/api/finance/summary";

/// New income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct IncomePayload {
    /// Where it came from.
    #[validate(custom(function = "not_blank", message = "Source is required"))]
    pub source: String,
    /// Amount.
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    /// When it was received.
    pub received_at: DateTime<Utc>,
}

impl IncomePayload {
    /// Creates an income payload.
    #[must_use]
    pub fn new(source: impl Into<String>, amount: Decimal, received_at: DateTime<Utc>) -> Self {
        Self {
            source: source.into(),
            amount,
            received_at,
        }
    }
}

/// Partial income update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct IncomeUpdate {
    /// Source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Amount.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[validate(custom(function = "non_negative"))]
    pub amount: Option<Decimal>,
    /// Received date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
}

/// New expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ExpensePayload {
    /// Expense category name.
    #[validate(
        custom(function = "not_blank", message = "Category is required"),
        length(max = 100)
    )]
    pub category: String,
    /// Free text.
    pub description: String,
    /// Amount.
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    /// When it was spent.
    pub spent_at: DateTime<Utc>,
    /// Goal the money went to.
    pub goal_id: Option<GoalId>,
}

impl ExpensePayload {
    /// Creates an expense with no description or goal.
    #[must_use]
    pub fn new(category: impl Into<String>, amount: Decimal, spent_at: DateTime<Utc>) -> Self {
        Self {
            category: category.into(),
            description: String::new(),
            amount,
            spent_at,
            goal_id: None,
        }
    }

    /// Attributes the expense to a goal.
    #[must_use]
    pub fn for_goal(mut self, goal_id: GoalId) -> Self {
        self.goal_id = Some(goal_id);
        self
    }
}

/// Partial expense update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct ExpenseUpdate {
    /// Category.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Amount.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[validate(custom(function = "non_negative"))]
    pub amount: Option<Decimal>,
    /// Spent date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent_at: Option<DateTime<Utc>>,
    /// `Some(None)` unlinks the expense from its goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<Option<GoalId>>,
}

#[derive(Debug, Serialize, Validate)]
struct CategoryPayload {
    #[validate(length(min = 1, max = 100))]
    name: String,
}

/// Finance endpoints.
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// Recent incomes.
    async fn list_incomes(&self) -> AppResult<Vec<Income>>;

    /// Records an income.
    async fn create_income(&self, payload: &IncomePayload) -> AppResult<Income>;

    /// Updates an income.
    async fn update_income(&self, id: IncomeId, update: &IncomeUpdate) -> AppResult<()>;

    /// Deletes an income.
    async fn delete_income(&self, id: IncomeId) -> AppResult<()>;

    /// Recent expenses.
    async fn list_expenses(&self) -> AppResult<Vec<Expense>>;

    /// Records an expense.
    async fn create_expense(&self, payload: &ExpensePayload) -> AppResult<Expense>;

    /// Updates an expense.
    async fn update_expense(&self, id: ExpenseId, update: &ExpenseUpdate) -> AppResult<()>;

    /// Deletes an expense.
    async fn delete_expense(&self, id: ExpenseId) -> AppResult<()>;

    /// Expense categories.
    async fn list_categories(&self) -> AppResult<Vec<ExpenseCategory>>;

    /// Adds an expense category.
    async fn create_category(&self, name: &str) -> AppResult<ExpenseCategory>;

    /// Server-computed summary for one month.
    async fn monthly_summary(&self, period: Period) -> AppResult<MonthlySummary>;
}

#[async_trait]
impl FinanceApi for ApiClient {
    async fn list_incomes(&self) -> AppResult<Vec<Income>> {
        self.get_list(INCOMES, &[]).await
    }

    async fn create_income(&self, payload: &IncomePayload) -> AppResult<Income> {
        validate_payload(payload)?;
        self.post(INCOMES, payload).await
    }

    async fn update_income(&self, id: IncomeId, update: &IncomeUpdate) -> AppResult<()> {
        validate_payload(update)?;
        let _: IgnoredAny = self.put(&format!("{INCOMES}/{id}"), update).await?;
        Ok(())
    }

    async fn delete_income(&self, id: IncomeId) -> AppResult<()> {
        self.delete(&format!("{INCOMES}/{id}")).await
    }

    async fn list_expenses(&self) -> AppResult<Vec<Expense>> {
        self.get_list(EXPENSES, &[]).await
    }

    async fn create_expense(&self, payload: &ExpensePayload) -> AppResult<Expense> {
        validate_payload(payload)?;
        self.post(EXPENSES, payload).await
    }

    async fn update_expense(&self, id: ExpenseId, update: &ExpenseUpdate) -> AppResult<()> {
        validate_payload(update)?;
        let _: IgnoredAny = self.put(&format!("{EXPENSES}/{id}"), update).await?;
        Ok(())
    }

    async fn delete_expense(&self, id: ExpenseId) -> AppResult<()> {
        self.delete(&format!("{EXPENSES}/{id}")).await
    }

    async fn list_categories(&self) -> AppResult<Vec<ExpenseCategory>> {
        self.get_list(CATEGORIES, &[]).await
    }

    async fn create_category(&self, name: &str) -> AppResult<ExpenseCategory> {
        let payload = CategoryPayload {
            name: name.trim().to_string(),
        };
        validate_payload(&payload)?;
        self.post(CATEGORIES, &payload).await
    }

    async fn monthly_summary(&self, period: Period) -> AppResult<MonthlySummary> {
        let query = [
            ("year", period.year().to_string()),
            ("month", period.month().to_string()),
        ];
        self.get_with_query(SUMMARY, &query).await
    }
}
