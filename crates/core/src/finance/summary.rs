//! Monthly summary reduction.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::FinanceError;
use super::types::{
    CategoryRow, Expense, ExpenseCategory, GoalContribution, Income, Kpi, MonthlySummary,
};
use crate::goals::progress::percent_of;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::InvalidPeriod` if the month is outside 1..=12
    /// or the year cannot be represented.
    pub fn new(year: i32, month: u32) -> Result<Self, FinanceError> {
        let period = Self { year, month };
        if period.start().is_none() || period.end().is_none() {
            return Err(FinanceError::InvalidPeriod { year, month });
        }
        Ok(period)
    }

    /// The month containing `now`.
    #[must_use]
    pub fn containing(now: DateTime<Utc>) -> Self {
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    /// Year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month, 1-12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month.
    #[must_use]
    pub fn start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// First day of the following month.
    #[must_use]
    pub fn end(&self) -> Option<NaiveDate> {
        self.start()?.checked_add_months(Months::new(1))
    }

    /// Returns true if `at` falls in `[start, end)`.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => start <= day && day < end,
            _ => false,
        }
    }

    /// The previous month.
    #[must_use]
    pub fn previous(&self) -> Self {
        if self.month <= 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next month.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Reduces transaction lists to a monthly summary.
pub struct SummaryReducer;

impl SummaryReducer {
    /// Sums records already selected for `period`.
    ///
    /// Savings are income minus expenses and may be negative. The category
    /// breakdown only has entries for categories that have expenses.
    #[must_use]
    pub fn reduce(
        period: Period,
        incomes: &[Income],
        expenses: &[Expense],
        contributions: &[GoalContribution],
    ) -> MonthlySummary {
        let total_income = sum(incomes.iter().map(|income| income.amount));
        let total_expenses = sum(expenses.iter().map(|expense| expense.amount));

        let mut category_breakdown = BTreeMap::new();
        let mut goal_spending = BTreeMap::new();
        for expense in expenses {
            add_to(&mut category_breakdown, expense.category.clone(), expense.amount);
            if let Some(goal_id) = expense.goal_id {
                add_to(&mut goal_spending, goal_id, expense.amount);
            }
        }

        let mut goal_contributions = BTreeMap::new();
        for contribution in contributions {
            add_to(&mut goal_contributions, contribution.goal_id, contribution.amount);
        }

        MonthlySummary {
            year: period.year,
            month: period.month,
            total_income,
            total_expenses,
            total_savings: total_income.saturating_sub(total_expenses),
            category_breakdown,
            goal_spending,
            goal_contributions,
        }
    }

    /// Selects the records dated inside `period`, then reduces them.
    #[must_use]
    pub fn for_month(
        period: Period,
        incomes: &[Income],
        expenses: &[Expense],
        contributions: &[GoalContribution],
    ) -> MonthlySummary {
        let incomes: Vec<_> = incomes
            .iter()
            .filter(|income| period.contains(income.received_at))
            .cloned()
            .collect();
        let expenses: Vec<_> = expenses
            .iter()
            .filter(|expense| period.contains(expense.spent_at))
            .cloned()
            .collect();
        let contributions: Vec<_> = contributions
            .iter()
            .filter(|contribution| period.contains(contribution.contributed_at))
            .cloned()
            .collect();

        Self::reduce(period, &incomes, &expenses, &contributions)
    }
}

fn sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

fn add_to<K: Ord>(totals: &mut BTreeMap<K, Decimal>, key: K, amount: Decimal) {
    let total = totals.entry(key).or_insert(Decimal::ZERO);
    *total = total.saturating_add(amount);
}

impl MonthlySummary {
    /// The period this summary covers.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::InvalidPeriod` if the server sent a bad month.
    pub fn period(&self) -> Result<Period, FinanceError> {
        Period::new(self.year, self.month)
    }

    /// Income, expenses and savings, in that order.
    #[must_use]
    pub fn kpis(&self) -> [Kpi; 3] {
        [
            Kpi {
                name: "Income",
                value: self.total_income,
            },
            Kpi {
                name: "Expenses",
                value: self.total_expenses,
            },
            Kpi {
                name: "Savings",
                value: self.total_savings,
            },
        ]
    }

    /// Category breakdown rows, sorted by name, with each category's share.
    #[must_use]
    pub fn category_rows(&self) -> Vec<CategoryRow> {
        let total = sum(self.category_breakdown.values().copied());
        self.category_breakdown
            .iter()
            .map(|(name, &amount)| CategoryRow {
                name: name.clone(),
                amount,
                share_pct: percent_of(amount, total),
            })
            .collect()
    }
}

/// Cleans up the expense category list for a selector.
///
/// Names are trimmed, case-insensitive duplicates dropped (first wins) and the
/// result sorted by name.
#[must_use]
pub fn dedup_categories(categories: &[ExpenseCategory]) -> Vec<ExpenseCategory> {
    let mut seen = HashSet::new();
    let mut unique: Vec<_> = categories
        .iter()
        .filter_map(|category| {
            let name = category.name.trim();
            if name.is_empty() || !seen.insert(name.to_lowercase()) {
                return None;
            }
            Some(ExpenseCategory {
                name: name.to_string(),
                ..category.clone()
            })
        })
        .collect();

    unique.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    unique
}

/// Checks a new category name against the existing list.
///
/// # Errors
///
/// Returns an error for blank names or case-insensitive duplicates.
pub fn validate_new_category(name: &str, existing: &[ExpenseCategory]) -> Result<String, FinanceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FinanceError::EmptyCategoryName);
    }
    let lowered = name.to_lowercase();
    if existing.iter().any(|c| c.name.trim().to_lowercase() == lowered) {
        return Err(FinanceError::DuplicateCategory(name.to_string()));
    }
    Ok(name.to_string())
}
