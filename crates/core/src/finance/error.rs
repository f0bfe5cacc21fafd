//! Finance error types.

use finnote_shared::AppError;
use thiserror::Error;

/// Finance-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinanceError {
    /// Month outside 1..=12, or a year chrono cannot represent.
    #[error("Invalid period: {year}-{month:02}")]
    InvalidPeriod {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },

    /// An expense category with the same name already exists.
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    /// Category name is blank.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,
}

impl From<FinanceError> for AppError {
    fn from(err: FinanceError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_finance_error_is_a_validation_error() {
        let errors = [
            FinanceError::InvalidPeriod { year: 2024, month: 13 },
            FinanceError::DuplicateCategory("food".to_string()),
            FinanceError::EmptyCategoryName,
        ];
        for err in errors {
            assert_eq!(AppError::from(err).error_code(), "VALIDATION");
        }
    }
}
