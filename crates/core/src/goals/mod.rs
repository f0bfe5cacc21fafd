//! Goal progress aggregation, classification, category lookup and analytics.

pub mod category;
pub mod filter;
pub mod progress;
pub mod status;
pub mod types;


pub use category::{
    CategoryKind, CategorySuggestion, DEFAULT_CATEGORY_COLOR, DefaultCategory, category_color,
    default_categories,
};
pub use filter::{
    AnalyticsView, CategoryFilter, ChartSeries, GoalAnalytics, GoalIndex, OverviewTotals,
    ShareDatum, TargetDatum, available_categories, filter_groups, filter_rows,
};
pub use progress::{calculate_overall_progress, percent_of, progress_rows};
pub use status::{GoalPriority, GoalStatus, Priority, ProgressStatus};
pub use types::{
    Goal, GoalCategory, GoalType, GoalWithProgress, GoalWithSubgoals, ProgressRow, ProgressType,
};
