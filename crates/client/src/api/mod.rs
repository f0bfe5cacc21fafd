//! Endpoint traits and their `ApiClient` implementations.
//!
//! Services depend on the traits, not on `ApiClient`, so they can be driven
//! by in-memory fakes in tests.

pub mod finance;
pub mod goals;
pub mod notes;

use rust_decimal::Decimal;
use validator::ValidationError;

pub use finance::{ExpensePayload, ExpenseUpdate, FinanceApi, IncomePayload, IncomeUpdate};
pub use goals::{
    ContributionPayload, GoalExpensePayload, GoalPayload, GoalUpdate, GoalsApi, ProgressUpdate,
};
pub use notes::{NoteUpdate, NotesApi};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("must not be blank".into()));
    }
    Ok(())
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("range").with_message("must not be negative".into()));
    }
    Ok(())
}

fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("range").with_message("must be greater than zero".into()));
    }
    Ok(())
}
