//! Goal board: the goal lists plus the mutations that change them.

use finnote_core::finance::{GoalContribution, GoalExpense};
use finnote_core::goals::{
    Goal, GoalAnalytics, GoalCategory, GoalWithProgress, GoalWithSubgoals, ProgressRow,
    progress_rows,
};
use finnote_core::guard::InFlightGuard;
use finnote_core::notify::Notifier;
use finnote_shared::AppResult;
use finnote_shared::types::GoalId;
use tokio::sync::RwLock;

use super::{Outcome, run_mutation};
use crate::api::{
    ContributionPayload, GoalExpensePayload, GoalPayload, GoalUpdate, GoalsApi, ProgressUpdate,
};

const CREATE: Outcome = Outcome {
    success: "Goal created successfully",
    failure: "Failed to create goal",
};
const UPDATE: Outcome = Outcome {
    success: "Goal updated successfully",
    failure: "Failed to update goal",
};
const DELETE: Outcome = Outcome {
    success: "Goal deleted successfully",
    failure: "Failed to delete goal",
};
const COMPLETE: Outcome = Outcome {
    success: "Goal completed! 🎉",
    failure: "Failed to complete goal",
};
const CONTRIBUTE: Outcome = Outcome {
    success: "Contribution added",
    failure: "Failed to contribute",
};
const PROGRESS: Outcome = Outcome {
    success: "Progress updated",
    failure: "Failed to update progress",
};
const LINK_EXPENSE: Outcome = Outcome {
    success: "Expense linked to goal",
    failure: "Failed to link expense",
};

/// What the board currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    /// Flat list with contribution sums.
    pub goals: Vec<GoalWithProgress>,
    /// Main goals with their sub-goals.
    pub hierarchical: Vec<GoalWithSubgoals>,
    /// Category reference list.
    pub categories: Vec<GoalCategory>,
}

/// Goal board view model.
pub struct GoalBoard<A, N> {
    api: A,
    notifier: N,
    guard: InFlightGuard,
    state: RwLock<BoardState>,
}

impl<A: GoalsApi, N: Notifier> GoalBoard<A, N> {
    /// Creates an empty board.
    pub fn new(api: A, notifier: N) -> Self {
        Self::with_guard(api, notifier, InFlightGuard::new())
    }

    /// Creates an empty board sharing an existing in-flight guard.
    pub fn with_guard(api: A, notifier: N, guard: InFlightGuard) -> Self {
        Self {
            api,
            notifier,
            guard,
            state: RwLock::new(BoardState::default()),
        }
    }

    /// Reloads the flat goal list.
    pub async fn load_goals(&self) -> AppResult<()> {
        let goals = self
            .api
            .list_goals()
            .await
            .inspect_err(|e| {
                tracing::error!(code = e.error_code(), error = %e, "Failed to load goals");
            })?;
        tracing::debug!(count = goals.len(), "Goals loaded");
        self.state.write().await.goals = goals;
        Ok(())
    }

    /// Reloads the hierarchical goal list.
    pub async fn load_hierarchical(&self) -> AppResult<()> {
        let groups = self
            .api
            .list_hierarchical()
            .await
            .inspect_err(|e| {
                tracing::error!(code = e.error_code(), error = %e, "Failed to load hierarchical goals");
            })?;
        tracing::debug!(count = groups.len(), "Hierarchical goals loaded");
        self.state.write().await.hierarchical = groups;
        Ok(())
    }

    /// Reloads the goal categories.
    pub async fn load_categories(&self) -> AppResult<()> {
        let categories = self
            .api
            .list_goal_categories()
            .await
            .inspect_err(|e| {
                tracing::error!(code = e.error_code(), error = %e, "Failed to load goal categories");
            })?;
        self.state.write().await.categories = categories;
        Ok(())
    }

    /// Loads everything the board shows.
    pub async fn load_all(&self) -> AppResult<()> {
        self.load_goals().await?;
        self.load_hierarchical().await?;
        self.load_categories().await
    }

    /// Creates a goal.
    pub async fn create_goal(&self, payload: &GoalPayload) -> AppResult<Goal> {
        let key = format!("goal:new:{}", payload.name.trim().to_lowercase());
        let goal = run_mutation(
            &self.guard,
            &self.notifier,
            &key,
            CREATE,
            self.api.create_goal(payload),
        )
        .await?;
        self.refresh().await;
        Ok(goal)
    }

    /// Updates a goal.
    pub async fn update_goal(&self, id: GoalId, update: &GoalUpdate) -> AppResult<()> {
        run_mutation(
            &self.guard,
            &self.notifier,
            &goal_key(id),
            UPDATE,
            self.api.update_goal(id, update),
        )
        .await?;
        self.refresh().await;
        Ok(())
    }

    /// Deletes a goal.
    pub async fn delete_goal(&self, id: GoalId) -> AppResult<()> {
        run_mutation(
            &self.guard,
            &self.notifier,
            &goal_key(id),
            DELETE,
            self.api.delete_goal(id),
        )
        .await?;
        self.refresh().await;
        Ok(())
    }

    /// Marks a goal completed.
    pub async fn complete_goal(&self, id: GoalId) -> AppResult<()> {
        run_mutation(
            &self.guard,
            &self.notifier,
            &goal_key(id),
            COMPLETE,
            self.api.complete_goal(id),
        )
        .await?;
        self.refresh().await;
        Ok(())
    }

    /// Records a contribution towards a goal.
    pub async fn contribute(&self, payload: &ContributionPayload) -> AppResult<GoalContribution> {
        let contribution = run_mutation(
            &self.guard,
            &self.notifier,
            &goal_key(payload.goal_id),
            CONTRIBUTE,
            self.api.contribute(payload),
        )
        .await?;
        self.refresh().await;
        Ok(contribution)
    }

    /// Sets a goal's accumulated progress.
    pub async fn update_progress(&self, id: GoalId, update: &ProgressUpdate) -> AppResult<()> {
        run_mutation(
            &self.guard,
            &self.notifier,
            &goal_key(id),
            PROGRESS,
            self.api.update_progress(id, update),
        )
        .await?;
        self.refresh().await;
        Ok(())
    }

    /// Links an expense to a goal.
    pub async fn link_expense(&self, payload: &GoalExpensePayload) -> AppResult<GoalExpense> {
        let expense = run_mutation(
            &self.guard,
            &self.notifier,
            &goal_key(payload.goal_id),
            LINK_EXPENSE,
            self.api.create_goal_expense(payload),
        )
        .await?;
        self.refresh().await;
        Ok(expense)
    }

    /// Expenses linked to a goal. Not cached.
    pub async fn goal_expenses(&self, id: GoalId) -> AppResult<Vec<GoalExpense>> {
        self.api
            .list_goal_expenses(id)
            .await
            .inspect_err(|e| {
                tracing::error!(goal_id = %id, error = %e, "Failed to load goal expenses");
            })
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> BoardState {
        self.state.read().await.clone()
    }

    /// Progress rows derived from the flat goal list.
    pub async fn progress_rows(&self) -> Vec<ProgressRow> {
        progress_rows(&self.state.read().await.goals)
    }

    /// Analytics over the current state.
    pub async fn analytics(&self) -> GoalAnalytics {
        let state = self.state.read().await;
        GoalAnalytics::new(state.hierarchical.clone(), progress_rows(&state.goals))
    }

    /// Re-fetches both goal lists after a mutation. Failures keep the old lists.
    async fn refresh(&self) {
        if let Err(e) = self.load_goals().await {
            tracing::warn!(error = %e, "Goal list is stale after mutation");
        }
        if let Err(e) = self.load_hierarchical().await {
            tracing::warn!(error = %e, "Hierarchical goals are stale after mutation");
        }
    }
}

fn goal_key(id: GoalId) -> String {
    format!("goal:{id}")
}
