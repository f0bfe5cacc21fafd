//! Finance data types: incomes, expenses, contributions, categories and summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use finnote_shared::types::{CategoryId, ContributionId, ExpenseId, GoalExpenseId, GoalId, IncomeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::goals::types::null_as_default;

/// An income entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    /// Income ID.
    pub id: IncomeId,
    /// Where the money came from.
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    /// Amount received.
    pub amount: Decimal,
    /// Date received.
    pub received_at: DateTime<Utc>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A spending entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Free-text category label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Date spent.
    pub spent_at: DateTime<Utc>,
    /// Goal the expense was charged to, if any.
    #[serde(default)]
    pub goal_id: Option<GoalId>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Money allocated to a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalContribution {
    /// Contribution ID.
    pub id: ContributionId,
    /// Goal receiving the contribution.
    pub goal_id: GoalId,
    /// Amount contributed.
    pub amount: Decimal,
    /// Date contributed.
    pub contributed_at: DateTime<Utc>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An expense linked to a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalExpense {
    /// Link ID.
    pub id: GoalExpenseId,
    /// Goal.
    pub goal_id: GoalId,
    /// Underlying expense.
    pub expense_id: ExpenseId,
    /// Amount charged to the goal.
    pub amount: Decimal,
    /// Description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A user-defined expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Sum of incomes.
    #[serde(default)]
    pub total_income: Decimal,
    /// Sum of expenses.
    #[serde(default)]
    pub total_expenses: Decimal,
    /// Income minus expenses. May be negative.
    #[serde(default)]
    pub total_savings: Decimal,
    /// Expense totals per category. Categories without expenses are absent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_breakdown: BTreeMap<String, Decimal>,
    /// Expense totals per goal, for expenses charged to a goal.
    #[serde(default, deserialize_with = "null_as_default")]
    pub goal_spending: BTreeMap<GoalId, Decimal>,
    /// Contribution totals per goal.
    #[serde(default, deserialize_with = "null_as_default")]
    pub goal_contributions: BTreeMap<GoalId, Decimal>,
}

/// One KPI bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpi {
    /// Label.
    pub name: &'static str,
    /// Value.
    pub value: Decimal,
}

/// One category of the breakdown, with its share of all expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    /// Category name.
    pub name: String,
    /// Total spent.
    pub amount: Decimal,
    /// Percent of the month's categorized expenses.
    pub share_pct: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_deserializes_null_maps() {
        let json = r#"{
            "year": 2026,
            "month": 3,
            "total_income": 1500,
            "total_expenses": 350.25,
            "total_savings": 1149.75,
            "category_breakdown": {"food": 300.25, "transport": 50},
            "goal_spending": null
        }"#;

        let summary: MonthlySummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_expenses, dec!(350.25));
        assert_eq!(summary.category_breakdown["food"], dec!(300.25));
        assert!(summary.goal_spending.is_empty());
        assert!(summary.goal_contributions.is_empty());
    }

    #[test]
    fn test_expense_goal_link_optional() {
        let json = r#"{
            "id": "0191b7a0-0000-7000-8000-000000000002",
            "category": "food",
            "description": null,
            "amount": 12.5,
            "spent_at": "2026-03-04T00:00:00Z",
            "goal_id": null
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount, dec!(12.5));
        assert!(expense.goal_id.is_none());
        assert!(expense.description.is_empty());
    }
}
