//! Progress status and deadline priority classification.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discrete progress status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    /// Below 25%.
    NotStarted,
    /// 25% to below 50%.
    Started,
    /// 50% to below 75%.
    Good,
    /// 75% to below 100%.
    Excellent,
    /// 100% or more.
    Completed,
}

impl GoalStatus {
    /// Wire / display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Started => "started",
            Self::Good => "good",
            Self::Excellent => "excellent",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status with its presentation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressStatus {
    /// The status.
    pub status: GoalStatus,
    /// Foreground color token.
    pub color: &'static str,
    /// Background color token.
    pub background: &'static str,
    /// Icon name.
    pub icon: &'static str,
}

impl ProgressStatus {
    /// Classifies a percentage. Total over all inputs; negatives are not started.
    #[must_use]
    pub fn for_percentage(pct: Decimal) -> Self {
        let status = if pct >= Decimal::ONE_HUNDRED {
            GoalStatus::Completed
        } else if pct >= Decimal::from(75) {
            GoalStatus::Excellent
        } else if pct >= Decimal::from(50) {
            GoalStatus::Good
        } else if pct >= Decimal::from(25) {
            GoalStatus::Started
        } else {
            GoalStatus::NotStarted
        };
        Self::from_status(status)
    }

    /// Presentation tokens for a status.
    #[must_use]
    pub const fn from_status(status: GoalStatus) -> Self {
        let (color, background, icon) = match status {
            GoalStatus::Completed => ("text-green-600", "bg-green-100", "check-circle"),
            GoalStatus::Excellent => ("text-blue-600", "bg-blue-100", "award"),
            GoalStatus::Good => ("text-yellow-600", "bg-yellow-100", "trending-up"),
            GoalStatus::Started => ("text-orange-600", "bg-orange-100", "clock"),
            GoalStatus::NotStarted => ("text-gray-600", "bg-gray-100", "alert-circle"),
        };
        Self {
            status,
            color,
            background,
            icon,
        }
    }
}

/// Urgency of a goal, derived from its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Due in under 30 days, or overdue.
    High,
    /// Due in under 90 days.
    Medium,
    /// Due later, due today, or no deadline.
    Low,
}

impl Priority {
    /// Wire / display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A priority with its presentation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalPriority {
    /// The priority.
    pub priority: Priority,
    /// Foreground color token.
    pub color: &'static str,
    /// Background color token.
    pub background: &'static str,
    /// Icon name.
    pub icon: &'static str,
}

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

impl GoalPriority {
    /// Classifies a deadline relative to `now`.
    ///
    /// Days until target are rounded up. Zero days counts as no deadline, so a
    /// goal due within the next instant is low priority, while an overdue one
    /// is high.
    #[must_use]
    pub fn for_target_date(target_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let priority = match target_date.map(|date| days_until(date, now)) {
            Some(days) if days != 0 && days < 30 => Priority::High,
            Some(days) if days != 0 && days < 90 => Priority::Medium,
            _ => Priority::Low,
        };
        Self::from_priority(priority)
    }

    /// Presentation tokens for a priority.
    #[must_use]
    pub const fn from_priority(priority: Priority) -> Self {
        let (color, background, icon) = match priority {
            Priority::High => ("text-red-600", "bg-red-100", "flag"),
            Priority::Medium => ("text-yellow-600", "bg-yellow-100", "clock"),
            Priority::Low => ("text-green-600", "bg-green-100", "star"),
        };
        Self {
            priority,
            color,
            background,
            icon,
        }
    }
}

/// Whole days from `now` until `date`, rounded towards positive infinity.
fn days_until(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = date.signed_duration_since(now).num_milliseconds();
    // Integer division truncates towards zero, which is already the ceiling for negatives.
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 { days + 1 } else { days }
}
