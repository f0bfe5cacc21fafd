//! Finance ledger: the selected month, its summary, and the transaction lists.

use finnote_core::finance::{
    CategoryRow, Expense, ExpenseCategory, Income, Kpi, MonthlySummary, Period, dedup_categories,
    validate_new_category,
};
use finnote_core::guard::InFlightGuard;
use finnote_core::notify::Notifier;
use finnote_shared::types::{ExpenseId, IncomeId};
use finnote_shared::{AppError, AppResult};
use tokio::sync::RwLock;

use super::{Outcome, run_mutation};
use crate::api::{ExpensePayload, ExpenseUpdate, FinanceApi, IncomePayload, IncomeUpdate};

const ADD_INCOME: Outcome = Outcome {
    success: "Income added",
    failure: "Failed to add income",
};
const UPDATE_INCOME: Outcome = Outcome {
    success: "Income updated",
    failure: "Failed to update income",
};
const DELETE_INCOME: Outcome = Outcome {
    success: "Income deleted",
    failure: "Failed to delete income",
};
const ADD_EXPENSE: Outcome = Outcome {
    success: "Expense added",
    failure: "Failed to add expense",
};
const UPDATE_EXPENSE: Outcome = Outcome {
    success: "Expense updated",
    failure: "Failed to update expense",
};
const DELETE_EXPENSE: Outcome = Outcome {
    success: "Expense deleted",
    failure: "Failed to delete expense",
};
const ADD_CATEGORY: Outcome = Outcome {
    success: "Category added",
    failure: "Failed to add category",
};

/// What the ledger currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    /// Selected month.
    pub period: Period,
    /// Summary for `period`, once loaded.
    pub summary: Option<MonthlySummary>,
    /// Recent incomes.
    pub incomes: Vec<Income>,
    /// Recent expenses.
    pub expenses: Vec<Expense>,
    /// Deduplicated expense categories.
    pub categories: Vec<ExpenseCategory>,
}

impl LedgerState {
    fn new(period: Period) -> Self {
        Self {
            period,
            summary: None,
            incomes: Vec::new(),
            expenses: Vec::new(),
            categories: Vec::new(),
        }
    }
}

/// Finance page view model.
pub struct FinanceLedger<A, N> {
    api: A,
    notifier: N,
    guard: InFlightGuard,
    state: RwLock<LedgerState>,
}

impl<A: FinanceApi, N: Notifier> FinanceLedger<A, N> {
    /// Creates a ledger showing `period`. Nothing is loaded yet.
    pub fn new(api: A, notifier: N, period: Period) -> Self {
        Self::with_guard(api, notifier, period, InFlightGuard::new())
    }

    /// Creates a ledger sharing an existing in-flight guard.
    pub fn with_guard(api: A, notifier: N, period: Period, guard: InFlightGuard) -> Self {
        Self {
            api,
            notifier,
            guard,
            state: RwLock::new(LedgerState::new(period)),
        }
    }

    /// The selected month.
    pub async fn period(&self) -> Period {
        self.state.read().await.period
    }

    /// Switches to `period` and reloads its summary.
    pub async fn select_period(&self, period: Period) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            state.period = period;
            state.summary = None;
        }
        self.refresh().await
    }

    /// Steps back one month.
    pub async fn previous_month(&self) -> AppResult<()> {
        let period = self.period().await.previous();
        self.select_period(period).await
    }

    /// Steps forward one month.
    pub async fn next_month(&self) -> AppResult<()> {
        let period = self.period().await.next();
        self.select_period(period).await
    }

    /// Reloads the summary for the selected month, then the transaction lists.
    ///
    /// A failed summary load toasts once and keeps the lists as they were. A
    /// summary that arrives after another month was selected is dropped.
    pub async fn refresh(&self) -> AppResult<()> {
        let period = self.period().await;
        match self.api.monthly_summary(period).await {
            Ok(summary) => {
                let mut state = self.state.write().await;
                if state.period != period {
                    tracing::debug!(
                        period = %period,
                        selected = %state.period,
                        "Discarding summary for a deselected month"
                    );
                    return Ok(());
                }
                tracing::debug!(period = %period, "Monthly summary loaded");
                state.summary = Some(summary);
            }
            Err(e) => {
                tracing::error!(period = %period, code = e.error_code(), error = %e, "Failed to load summary");
                self.notifier.error("Failed to load summary", Some(&e.user_message()));
                return Err(e);
            }
        }
        self.load_lists().await
    }

    /// Reloads incomes and expenses.
    pub async fn load_lists(&self) -> AppResult<()> {
        let (incomes, expenses) =
            tokio::try_join!(self.api.list_incomes(), self.api.list_expenses())
                .inspect_err(|e| {
                    tracing::error!(code = e.error_code(), error = %e, "Failed to load transactions");
                })?;
        let mut state = self.state.write().await;
        state.incomes = incomes;
        state.expenses = expenses;
        Ok(())
    }

    /// Reloads and deduplicates the expense categories.
    pub async fn load_categories(&self) -> AppResult<()> {
        let categories = self
            .api
            .list_categories()
            .await
            .inspect_err(|e| {
                tracing::error!(code = e.error_code(), error = %e, "Failed to load categories");
            })?;
        self.state.write().await.categories = dedup_categories(&categories);
        Ok(())
    }

    /// Records an income, then refreshes.
    pub async fn add_income(&self, payload: &IncomePayload) -> AppResult<Income> {
        let income = run_mutation(
            &self.guard,
            &self.notifier,
            "income:new",
            ADD_INCOME,
            self.api.create_income(payload),
        )
        .await?;
        self.refresh_after_mutation().await;
        Ok(income)
    }

    /// Updates an income, then refreshes.
    pub async fn update_income(&self, id: IncomeId, update: &IncomeUpdate) -> AppResult<()> {
        run_mutation(
            &self.guard,
            &self.notifier,
            &format!("income:{id}"),
            UPDATE_INCOME,
            self.api.update_income(id, update),
        )
        .await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Deletes an income, then refreshes.
    pub async fn delete_income(&self, id: IncomeId) -> AppResult<()> {
        run_mutation(
            &self.guard,
            &self.notifier,
            &format!("income:{id}"),
            DELETE_INCOME,
            self.api.delete_income(id),
        )
        .await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Records an expense, then refreshes.
    pub async fn add_expense(&self, payload: &ExpensePayload) -> AppResult<Expense> {
        let expense = run_mutation(
            &self.guard,
            &self.notifier,
            "expense:new",
            ADD_EXPENSE,
            self.api.create_expense(payload),
        )
        .await?;
        self.refresh_after_mutation().await;
        Ok(expense)
    }

    /// Updates an expense, then refreshes.
    pub async fn update_expense(&self, id: ExpenseId, update: &ExpenseUpdate) -> AppResult<()> {
        run_mutation(
            &self.guard,
            &self.notifier,
            &format!("expense:{id}"),
            UPDATE_EXPENSE,
            self.api.update_expense(id, update),
        )
        .await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Deletes an expense, then refreshes.
    pub async fn delete_expense(&self, id: ExpenseId) -> AppResult<()> {
        run_mutation(
            &self.guard,
            &self.notifier,
            &format!("expense:{id}"),
            DELETE_EXPENSE,
            self.api.delete_expense(id),
        )
        .await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Adds an expense category unless the name is blank or already taken.
    pub async fn add_category(&self, name: &str) -> AppResult<ExpenseCategory> {
        let name = {
            let state = self.state.read().await;
            validate_new_category(name, &state.categories)
        };
        let name = match name {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(error = %e, "Category rejected");
                self.notifier.error(ADD_CATEGORY.failure, Some(&e.to_string()));
                return Err(AppError::from(e));
            }
        };

        let category = run_mutation(
            &self.guard,
            &self.notifier,
            &format!("category:{}", name.to_lowercase()),
            ADD_CATEGORY,
            self.api.create_category(&name),
        )
        .await?;
        if let Err(e) = self.load_categories().await {
            tracing::warn!(error = %e, "Categories are stale after mutation");
        }
        Ok(category)
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> LedgerState {
        self.state.read().await.clone()
    }

    /// Income, expenses and savings for the loaded summary.
    pub async fn kpis(&self) -> Option<[Kpi; 3]> {
        self.state.read().await.summary.as_ref().map(MonthlySummary::kpis)
    }

    /// Category breakdown rows for the loaded summary.
    pub async fn category_rows(&self) -> Vec<CategoryRow> {
        self.state
            .read()
            .await
            .summary
            .as_ref()
            .map(MonthlySummary::category_rows)
            .unwrap_or_default()
    }

    async fn refresh_after_mutation(&self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Ledger is stale after mutation");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use finnote_core::finance::{FinanceError, SummaryReducer};
    use finnote_core::notify::ToastKind;
    use finnote_shared::types::CategoryId;
    use rust_decimal_macros::dec;

    use tracing::Level;

    use super::*;
    use crate::services::testing::{CapturedLogs, RecordingNotifier};

    #[derive(Default)]
    struct FakeFinance {
        incomes: Mutex<Vec<Income>>,
        expenses: Mutex<Vec<Expense>>,
        categories: Mutex<Vec<ExpenseCategory>>,
        summary_down: bool,
        lists_down: bool,
        held_period: Option<Period>,
        release: tokio::sync::Notify,
    }

    #[async_trait]
    impl FinanceApi for FakeFinance {
        async fn list_incomes(&self) -> AppResult<Vec<Income>> {
            if self.lists_down {
                return Err(AppError::Server("Internal Server Error".into()));
            }
            Ok(self.incomes.lock().unwrap().clone())
        }

        async fn create_income(&self, payload: &IncomePayload) -> AppResult<Income> {
            let income = Income {
                id: IncomeId::new(),
                source: payload.source.clone(),
                amount: payload.amount,
                received_at: payload.received_at,
                created_at: None,
            };
            self.incomes.lock().unwrap().push(income.clone());
            Ok(income)
        }

        async fn update_income(&self, _id: IncomeId, _update: &IncomeUpdate) -> AppResult<()> {
            Ok(())
        }

        async fn delete_income(&self, id: IncomeId) -> AppResult<()> {
            self.incomes.lock().unwrap().retain(|income| income.id != id);
            Ok(())
        }

        async fn list_expenses(&self) -> AppResult<Vec<Expense>> {
            Ok(self.expenses.lock().unwrap().clone())
        }

        async fn create_expense(&self, payload: &ExpensePayload) -> AppResult<Expense> {
            let expense = Expense {
                id: ExpenseId::new(),
                category: payload.category.clone(),
                description: payload.description.clone(),
                amount: payload.amount,
                spent_at: payload.spent_at,
                goal_id: payload.goal_id,
                created_at: None,
            };
            self.expenses.lock().unwrap().push(expense.clone());
            Ok(expense)
        }

        async fn update_expense(&self, _id: ExpenseId, _update: &ExpenseUpdate) -> AppResult<()> {
            Ok(())
        }

        async fn delete_expense(&self, id: ExpenseId) -> AppResult<()> {
            self.expenses.lock().unwrap().retain(|expense| expense.id != id);
            Ok(())
        }

        async fn list_categories(&self) -> AppResult<Vec<ExpenseCategory>> {
            Ok(self.categories.lock().unwrap().clone())
        }

        async fn create_category(&self, name: &str) -> AppResult<ExpenseCategory> {
            let category = ExpenseCategory {
                id: CategoryId::new(),
                name: name.to_string(),
                created_at: None,
            };
            self.categories.lock().unwrap().push(category.clone());
            Ok(category)
        }

        async fn monthly_summary(&self, period: Period) -> AppResult<MonthlySummary> {
            if self.summary_down {
                return Err(AppError::Network("connection refused".into()));
            }
            if self.held_period == Some(period) {
                self.release.notified().await;
            }
            let incomes = self.incomes.lock().unwrap().clone();
            let expenses = self.expenses.lock().unwrap().clone();
            Ok(SummaryReducer::for_month(period, &incomes, &expenses, &[]))
        }
    }

    fn march() -> Period {
        Period::new(2024, 3).unwrap()
    }

    fn day(month: u32, day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_add_transactions_refreshes_summary() {
        let ledger = FinanceLedger::new(FakeFinance::default(), RecordingNotifier::default(), march());

        ledger
            .add_income(&IncomePayload::new("salary", dec!(1000), day(3, 1)))
            .await
            .unwrap();
        ledger
            .add_income(&IncomePayload::new("freelance", dec!(500), day(3, 15)))
            .await
            .unwrap();
        for (category, amount) in [("food", dec!(200)), ("food", dec!(100)), ("transport", dec!(50))] {
            ledger
                .add_expense(&ExpensePayload::new(category, amount, day(3, 10)))
                .await
                .unwrap();
        }

        let state = ledger.snapshot().await;
        let summary = state.summary.unwrap();
        assert_eq!(summary.total_income, dec!(1500));
        assert_eq!(summary.total_expenses, dec!(350));
        assert_eq!(summary.total_savings, dec!(1150));
        assert_eq!(state.expenses.len(), 3);

        let rows = ledger.category_rows().await;
        assert_eq!(rows[0].name, "food");
        assert_eq!(rows[0].amount, dec!(300));
        assert_eq!(ledger.kpis().await.unwrap()[2].value, dec!(1150));
    }

    #[tokio::test]
    async fn test_period_navigation() {
        let fake = FakeFinance::default();
        fake.incomes.lock().unwrap().push(Income {
            id: IncomeId::new(),
            source: "salary".into(),
            amount: dec!(900),
            received_at: day(2, 20),
            created_at: None,
        });
        let ledger = FinanceLedger::new(fake, RecordingNotifier::default(), march());

        ledger.refresh().await.unwrap();
        assert_eq!(ledger.snapshot().await.summary.unwrap().total_income, dec!(0));

        ledger.previous_month().await.unwrap();
        let state = ledger.snapshot().await;
        assert_eq!(state.period, Period::new(2024, 2).unwrap());
        assert_eq!(state.summary.unwrap().total_income, dec!(900));
    }

    #[tokio::test]
    async fn test_late_summary_for_previous_month_is_dropped() {
        let fake = FakeFinance {
            held_period: Some(march()),
            ..FakeFinance::default()
        };
        fake.incomes.lock().unwrap().push(Income {
            id: IncomeId::new(),
            source: "salary".into(),
            amount: dec!(700),
            received_at: day(4, 2),
            created_at: None,
        });
        let ledger = FinanceLedger::new(fake, RecordingNotifier::default(), march());
        let april = march().next();

        let (late, ()) = tokio::join!(ledger.refresh(), async {
            ledger.select_period(april).await.unwrap();
            ledger.api.release.notify_one();
        });
        late.unwrap();

        let state = ledger.snapshot().await;
        assert_eq!(state.period, april);
        let summary = state.summary.unwrap();
        assert_eq!(summary.month, 4);
        assert_eq!(summary.total_income, dec!(700));
    }

    #[tokio::test]
    async fn test_list_failure_is_logged_as_error() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let fake = FakeFinance {
            lists_down: true,
            ..FakeFinance::default()
        };
        let ledger = FinanceLedger::new(fake, RecordingNotifier::default(), march());

        let err = ledger.load_lists().await.unwrap_err();
        assert_eq!(err.error_code(), "SERVER");
        assert_eq!(logs.at(Level::ERROR), vec!["Failed to load transactions"]);
        assert!(ledger.notifier.titles().is_empty());
    }

    #[tokio::test]
    async fn test_summary_failure_toasts_once() {
        let fake = FakeFinance {
            summary_down: true,
            ..FakeFinance::default()
        };
        let ledger = FinanceLedger::new(fake, RecordingNotifier::default(), march());

        let err = ledger.refresh().await.unwrap_err();
        assert_eq!(err.error_code(), "NETWORK");
        assert_eq!(
            ledger.notifier.titles(),
            vec![(ToastKind::Error, "Failed to load summary".to_string())]
        );
        assert!(ledger.snapshot().await.summary.is_none());
    }

    #[tokio::test]
    async fn test_add_category_rejects_duplicates() {
        let ledger = FinanceLedger::new(FakeFinance::default(), RecordingNotifier::default(), march());

        ledger.add_category("  Food ").await.unwrap();
        assert_eq!(ledger.snapshot().await.categories[0].name, "Food");

        let err = ledger.add_category("food").await.unwrap_err();
        assert_eq!(
            err,
            AppError::from(FinanceError::DuplicateCategory("food".to_string()))
        );
        assert_eq!(ledger.api.categories.lock().unwrap().len(), 1);

        let titles = ledger.notifier.titles();
        assert_eq!(titles[0], (ToastKind::Success, "Category added".to_string()));
        assert_eq!(titles[1], (ToastKind::Error, "Failed to add category".to_string()));
    }
}
