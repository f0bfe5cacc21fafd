//! Goal data types.

use chrono::{DateTime, Utc};
use finnote_shared::types::{CategoryId, GoalId};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// What a goal measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Monetary target (savings, debt payoff).
    #[default]
    Financial,
    /// Countable target (books read, courses completed).
    Numeric,
    /// Done / not done.
    Boolean,
    /// Recurring practice.
    Habit,
}

impl GoalType {
    /// Returns true if values of this goal are money.
    #[must_use]
    pub const fn is_monetary(self) -> bool {
        matches!(self, Self::Financial)
    }

    /// Wire name of the goal type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Habit => "habit",
        }
    }
}

/// How progress on a goal is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressType {
    /// Accumulated amount.
    #[default]
    Amount,
    /// Percentage points.
    Percentage,
    /// Accumulated count.
    Count,
    /// Binary completion.
    Completion,
}

/// A goal or sub-goal as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal ID.
    pub id: GoalId,
    /// Goal name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-form description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Free-text category label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// What the goal measures. Missing or null means financial.
    #[serde(default, deserialize_with = "null_as_default")]
    pub goal_type: GoalType,
    /// How progress is recorded. Missing or null means amount.
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress_type: ProgressType,
    /// Monetary target.
    #[serde(default)]
    pub target_amount: Option<Decimal>,
    /// Non-monetary target, used when `target_amount` is absent.
    #[serde(default)]
    pub target_value: Option<Decimal>,
    /// Accumulated progress.
    #[serde(default)]
    pub current_progress: Option<Decimal>,
    /// Optional deadline.
    #[serde(default)]
    pub target_date: Option<DateTime<Utc>>,
    /// Whether the goal has been marked complete.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,
    /// Whether this is a top-level goal.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_main_goal: bool,
    /// Parent goal, for sub-goals. Not an ownership link.
    #[serde(default)]
    pub parent_goal_id: Option<GoalId>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Goal {
    /// Creates a main goal with the given name and no targets.
    #[must_use]
    pub fn new(id: GoalId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category: String::new(),
            goal_type: GoalType::default(),
            progress_type: ProgressType::default(),
            target_amount: None,
            target_value: None,
            current_progress: None,
            target_date: None,
            is_completed: false,
            is_main_goal: true,
            parent_goal_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Target used for aggregation: `target_amount`, then `target_value`, then zero.
    #[must_use]
    pub fn target(&self) -> Decimal {
        self.target_amount
            .or(self.target_value)
            .unwrap_or(Decimal::ZERO)
    }

    /// Accumulated progress, zero when absent.
    #[must_use]
    pub fn progress(&self) -> Decimal {
        self.current_progress.unwrap_or(Decimal::ZERO)
    }

    /// Returns true for goals that are either done or not, ignoring numbers.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.goal_type == GoalType::Boolean || self.progress_type == ProgressType::Completion
    }
}

/// A main goal and its sub-goals, grouped by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalWithSubgoals {
    /// The main goal.
    pub goal: Goal,
    /// Sub-goals whose `parent_goal_id` is the main goal's id, in API order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subgoals: Vec<Goal>,
}

impl GoalWithSubgoals {
    /// Iterates the main goal followed by its sub-goals.
    pub fn members(&self) -> impl Iterator<Item = &Goal> {
        std::iter::once(&self.goal).chain(self.subgoals.iter())
    }
}

/// Goal category reference data, used for icon and color lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalCategory {
    /// Category ID.
    pub id: CategoryId,
    /// Category name, matched against `Goal::category`.
    pub name: String,
    /// Description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Icon name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    /// Hex color.
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A goal with its contribution and expense sums, from the flat goal listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalWithProgress {
    /// The goal.
    #[serde(alias = "Goal")]
    pub goal: Goal,
    /// Sum of contributions to the goal.
    #[serde(default, alias = "ContributedSum")]
    pub contributed_sum: Decimal,
    /// Sum of expenses charged to the goal.
    #[serde(default, alias = "ExpenseSum")]
    pub expense_sum: Decimal,
    /// Server-side percentage, when provided.
    #[serde(default)]
    pub progress: Option<Decimal>,
}

/// Flattened per-goal progress, recomputed from `GoalWithProgress` on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressRow {
    /// Goal ID.
    pub id: GoalId,
    /// Display name.
    pub name: String,
    /// Amount saved so far.
    pub saved: Decimal,
    /// Target amount.
    pub target: Decimal,
    /// Whole percent in 0..=100.
    pub pct: u8,
    /// Optional deadline.
    pub target_date: Option<DateTime<Utc>>,
    /// Category label, when known.
    pub category: Option<String>,
}

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_goal_deserializes_with_missing_fields() {
        let json = r#"{
            "id": "0191b7a0-0000-7000-8000-000000000001",
            "name": "Emergency fund",
            "category": "Emergency Fund",
            "target_amount": 1000,
            "target_date": "2026-12-31T00:00:00Z",
            "parent_goal_id": null,
            "is_main_goal": true
        }"#;

        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.goal_type, GoalType::Financial);
        assert_eq!(goal.progress_type, ProgressType::Amount);
        assert_eq!(goal.target_amount, Some(dec!(1000)));
        assert_eq!(goal.current_progress, None);
        assert!(goal.description.is_empty());
        assert!(!goal.is_completed);
    }

    #[test]
    fn test_goal_null_type_defaults_to_financial() {
        let json = r#"{"id": "0191b7a0-0000-7000-8000-000000000001", "name": "x", "goal_type": null}"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.goal_type, GoalType::Financial);
    }

    #[test]
    fn test_goal_rejects_unknown_type() {
        let json = r#"{"id": "0191b7a0-0000-7000-8000-000000000001", "name": "x", "goal_type": "lottery"}"#;
        assert!(serde_json::from_str::<Goal>(json).is_err());
    }

    #[test]
    fn test_null_subgoals_become_empty() {
        let json = r#"{
            "goal": {"id": "0191b7a0-0000-7000-8000-000000000001", "name": "Trip"},
            "subgoals": null
        }"#;
        let group: GoalWithSubgoals = serde_json::from_str(json).unwrap();
        assert!(group.subgoals.is_empty());
        assert_eq!(group.members().count(), 1);
    }

    #[test]
    fn test_goal_with_progress_accepts_both_casings() {
        let snake = r#"{
            "goal": {"id": "0191b7a0-0000-7000-8000-000000000001", "name": "Car"},
            "contributed_sum": 250.5,
            "expense_sum": 10
        }"#;
        let pascal = r#"{
            "Goal": {"id": "0191b7a0-0000-7000-8000-000000000001", "name": "Car"},
            "ContributedSum": 250.5,
            "ExpenseSum": 10
        }"#;

        let a: GoalWithProgress = serde_json::from_str(snake).unwrap();
        let b: GoalWithProgress = serde_json::from_str(pascal).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.contributed_sum, dec!(250.5));
    }

    #[test]
    fn test_target_prefers_amount_over_value() {
        let mut goal = Goal::new(GoalId::new(), "Read");
        assert_eq!(goal.target(), Decimal::ZERO);

        goal.target_value = Some(dec!(12));
        assert_eq!(goal.target(), dec!(12));

        goal.target_amount = Some(dec!(0));
        assert_eq!(goal.target(), dec!(0));
    }

    #[test]
    fn test_is_binary() {
        let mut goal = Goal::new(GoalId::new(), "Checkup");
        assert!(!goal.is_binary());

        goal.progress_type = ProgressType::Completion;
        assert!(goal.is_binary());

        goal.progress_type = ProgressType::Amount;
        goal.goal_type = GoalType::Boolean;
        assert!(goal.is_binary());
    }
}
