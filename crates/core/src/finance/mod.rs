//! Monthly income and expense summaries.

pub mod error;
pub mod summary;
pub mod types;


pub use error::FinanceError;
pub use summary::{Period, SummaryReducer, dedup_categories, validate_new_category};
pub use types::{
    CategoryRow, Expense, ExpenseCategory, GoalContribution, GoalExpense, Income, Kpi,
    MonthlySummary,
};
