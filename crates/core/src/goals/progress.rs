//! Goal progress aggregation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{GoalWithProgress, GoalWithSubgoals, ProgressRow};

/// Calculates a goal group's overall progress as a percentage in `0..=100`.
///
/// Binary goals (boolean type or completion progress) are 100 when completed
/// and 0 otherwise, whatever their numbers say. Everything else sums the main
/// goal's and sub-goals' targets and progress, then divides once. A zero total
/// target yields 0. Only the final percentage is clamped; individual sub-goals
/// may overshoot their own targets.
#[must_use]
pub fn calculate_overall_progress(group: &GoalWithSubgoals) -> Decimal {
    let main = &group.goal;
    if main.is_binary() {
        return if main.is_completed {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }

    let (total_target, total_progress) = group.subgoals.iter().fold(
        (main.target(), main.progress()),
        |(target, progress), sub| {
            (
                target.saturating_add(sub.target()),
                progress.saturating_add(sub.progress()),
            )
        },
    );

    percent_of(total_progress, total_target).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// `part / whole * 100`, or 0 when `whole` is not positive.
///
/// Saturates at 100 if the division overflows.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ONE_HUNDRED)
}

impl ProgressRow {
    /// Builds a progress row from the flat goal listing.
    ///
    /// `pct` is rounded to a whole number and capped at 100.
    #[must_use]
    pub fn from_progress(entry: &GoalWithProgress) -> Self {
        let goal = &entry.goal;
        let saved = entry.contributed_sum;
        let target = goal.target_amount.unwrap_or(Decimal::ZERO);

        let pct = percent_of(saved, target)
            .min(Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u8()
            .unwrap_or(0);

        let name = if goal.name.trim().is_empty() {
            "Unnamed Goal".to_string()
        } else {
            goal.name.clone()
        };

        let category = if goal.category.is_empty() {
            None
        } else {
            Some(goal.category.clone())
        };

        Self {
            id: goal.id,
            name,
            saved,
            target,
            pct,
            target_date: goal.target_date,
            category,
        }
    }

    /// Returns true once the goal's savings reach its target.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.pct >= 100
    }
}

/// Derives progress rows for every entry of the flat goal listing.
#[must_use]
pub fn progress_rows(entries: &[GoalWithProgress]) -> Vec<ProgressRow> {
    entries.iter().map(ProgressRow::from_progress).collect()
}
