//! Goal endpoints under `/api/finance/goals`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use finnote_core::finance::{GoalContribution, GoalExpense};
use finnote_core::goals::{Goal, GoalCategory, GoalType, GoalWithProgress, GoalWithSubgoals};
use finnote_shared::AppResult;
use finnote_shared::types::{ExpenseId, GoalId};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::IgnoredAny;
use validator::Validate;

use super::{non_negative, not_blank, positive};
use crate::http::{ApiClient, validate_payload};

const GOALS: &str = "/api/finance/goals";

/// New goal or sub-goal.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct GoalPayload {
    /// Name.
    #[validate(
        custom(function = "not_blank", message = "Goal name is required"),
        length(min = 1, max = 200, message = "Goal name must be 1-200 characters")
    )]
    pub name: String,
    /// Description.
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,
    /// Category label.
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: String,
    /// Kind of goal.
    pub goal_type: GoalType,
    /// Target.
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "non_negative"))]
    pub target_amount: Decimal,
    /// Deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    /// Parent goal for a sub-goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_goal_id: Option<GoalId>,
    /// True for a top-level goal.
    pub is_main_goal: bool,
}

impl GoalPayload {
    /// A financial main goal with no category or deadline.
    #[must_use]
    pub fn new(name: impl Into<String>, target_amount: Decimal) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: String::new(),
            goal_type: GoalType::default(),
            target_amount,
            target_date: None,
            parent_goal_id: None,
            is_main_goal: true,
        }
    }

    /// Sets the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the goal type.
    #[must_use]
    pub fn with_type(mut self, goal_type: GoalType) -> Self {
        self.goal_type = goal_type;
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub fn with_target_date(mut self, target_date: DateTime<Utc>) -> Self {
        self.target_date = Some(target_date);
        self
    }

    /// Turns this into a sub-goal of `parent`.
    #[must_use]
    pub fn sub_goal_of(mut self, parent: GoalId) -> Self {
        self.parent_goal_id = Some(parent);
        self.is_main_goal = false;
        self
    }
}

/// Partial goal update. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct GoalUpdate {
    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "not_blank", message = "Goal name is required"),
        length(min = 1, max = 200, message = "Goal name must be 1-200 characters")
    )]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    /// Category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// Target.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[validate(custom(function = "non_negative"))]
    pub target_amount: Option<Decimal>,
    /// Deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    /// `Some(None)` detaches a sub-goal from its parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_goal_id: Option<Option<GoalId>>,
    /// Main goal flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_main_goal: Option<bool>,
}

/// New value for a goal's accumulated progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Validate)]
pub struct ProgressUpdate {
    /// Accumulated progress.
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "non_negative"))]
    pub current_progress: Decimal,
}

/// Money put towards a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Validate)]
pub struct ContributionPayload {
    /// Goal.
    pub goal_id: GoalId,
    /// Amount.
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "positive", message = "Contribution must be greater than zero"))]
    pub amount: Decimal,
    /// When it was contributed.
    pub contributed_at: DateTime<Utc>,
}

impl ContributionPayload {
    /// A contribution made now.
    #[must_use]
    pub fn now(goal_id: GoalId, amount: Decimal) -> Self {
        Self {
            goal_id,
            amount,
            contributed_at: Utc::now(),
        }
    }
}

/// Links an expense to a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct GoalExpensePayload {
    /// Goal.
    pub goal_id: GoalId,
    /// Expense.
    pub expense_id: ExpenseId,
    /// Amount attributed to the goal.
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    /// Note.
    #[validate(length(max = 500))]
    pub description: String,
}

/// Goal endpoints.
#[async_trait]
pub trait GoalsApi: Send + Sync {
    /// Goals with their contribution and expense sums.
    async fn list_goals(&self) -> AppResult<Vec<GoalWithProgress>>;

    /// Main goals with their sub-goals.
    async fn list_hierarchical(&self) -> AppResult<Vec<GoalWithSubgoals>>;

    /// Goal category reference list.
    async fn list_goal_categories(&self) -> AppResult<Vec<GoalCategory>>;

    /// Creates a goal.
    async fn create_goal(&self, payload: &GoalPayload) -> AppResult<Goal>;

    /// Updates a goal.
    async fn update_goal(&self, id: GoalId, update: &GoalUpdate) -> AppResult<()>;

    /// Deletes a goal.
    async fn delete_goal(&self, id: GoalId) -> AppResult<()>;

    /// Marks a goal completed.
    async fn complete_goal(&self, id: GoalId) -> AppResult<()>;

    /// Sets a goal's accumulated progress.
    async fn update_progress(&self, id: GoalId, update: &ProgressUpdate) -> AppResult<()>;

    /// Records a contribution.
    async fn contribute(&self, payload: &ContributionPayload) -> AppResult<GoalContribution>;

    /// Links an expense to a goal.
    async fn create_goal_expense(&self, payload: &GoalExpensePayload) -> AppResult<GoalExpense>;

    /// Expenses linked to a goal.
    async fn list_goal_expenses(&self, id: GoalId) -> AppResult<Vec<GoalExpense>>;
}

#[async_trait]
impl GoalsApi for ApiClient {
    async fn list_goals(&self) -> AppResult<Vec<GoalWithProgress>> {
        self.get_list(GOALS, &[]).await
    }

    async fn list_hierarchical(&self) -> AppResult<Vec<GoalWithSubgoals>> {
        self.get_list(&format!("{GOALS}/hierarchical"), &[]).await
    }

    async fn list_goal_categories(&self) -> AppResult<Vec<GoalCategory>> {
        self.get_list(&format!("{GOALS}/categories"), &[]).await
    }

    async fn create_goal(&self, payload: &GoalPayload) -> AppResult<Goal> {
        validate_payload(payload)?;
        self.post(GOALS, payload).await
    }

    async fn update_goal(&self, id: GoalId, update: &GoalUpdate) -> AppResult<()> {
        validate_payload(update)?;
        let _: IgnoredAny = self.put(&format!("{GOALS}/{id}"), update).await?;
        Ok(())
    }

    async fn delete_goal(&self, id: GoalId) -> AppResult<()> {
        self.delete(&format!("{GOALS}/{id}")).await
    }

    async fn complete_goal(&self, id: GoalId) -> AppResult<()> {
        let _: IgnoredAny = self
            .post(&format!("{GOALS}/{id}/complete"), &serde_json::json!({}))
            .await?;
        Ok(())
    }

    async fn update_progress(&self, id: GoalId, update: &ProgressUpdate) -> AppResult<()> {
        validate_payload(update)?;
        let _: IgnoredAny = self.post(&format!("{GOALS}/{id}/progress"), update).await?;
        Ok(())
    }

    async fn contribute(&self, payload: &ContributionPayload) -> AppResult<GoalContribution> {
        validate_payload(payload)?;
        self.post(&format!("{GOALS}/contributions"), payload).await
    }

    async fn create_goal_expense(&self, payload: &GoalExpensePayload) -> AppResult<GoalExpense> {
        validate_payload(payload)?;
        self.post(&format!("{GOALS}/expenses"), payload).await
    }

    async fn list_goal_expenses(&self, id: GoalId) -> AppResult<Vec<GoalExpense>> {
        self.get_list(&format!("{GOALS}/{id}/expenses"), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_goal_payload_wire_format() {
        let parent = GoalId::new();
        let payload = GoalPayload::new("Laptop", dec!(1200.50))
            .with_category("Technology")
            .sub_goal_of(parent);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["target_amount"], serde_json::json!(1200.5));
        assert_eq!(json["goal_type"], "financial");
        assert_eq!(json["parent_goal_id"], parent.to_string());
        assert_eq!(json["is_main_goal"], false);
        assert!(json.get("target_date").is_none());
    }

    #[test]
    fn test_goal_payload_validation() {
        assert!(validate_payload(&GoalPayload::new("Trip", dec!(0))).is_ok());
        assert!(validate_payload(&GoalPayload::new("  ", dec!(10))).is_err());
        assert!(validate_payload(&GoalPayload::new("x".repeat(201), dec!(10))).is_err());
        assert!(validate_payload(&GoalPayload::new("Trip", dec!(-1))).is_err());

        let long_category = GoalPayload::new("Trip", dec!(1)).with_category("c".repeat(101));
        assert!(validate_payload(&long_category).is_err());
    }

    #[test]
    fn test_goal_update_serializes_only_set_fields() {
        let update = GoalUpdate {
            target_amount: Some(dec!(300)),
            parent_goal_id: Some(None),
            ..GoalUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"target_amount": 300.0, "parent_goal_id": null}));
    }

    #[test]
    fn test_contribution_must_be_positive() {
        let goal_id = GoalId::new();
        assert!(validate_payload(&ContributionPayload::now(goal_id, dec!(25))).is_ok());
        assert!(validate_payload(&ContributionPayload::now(goal_id, dec!(0))).is_err());
    }
}
