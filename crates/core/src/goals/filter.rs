//! Category filtering and chart projection over goal groups and progress rows.

use std::collections::{BTreeSet, HashMap};
use std::convert::Infallible;
use std::str::FromStr;

use finnote_shared::types::GoalId;
use rust_decimal::Decimal;
use serde::Serialize;

use super::progress::percent_of;
use super::types::{GoalType, GoalWithSubgoals, ProgressRow};

/// Chart slice colors, assigned by position.
pub const CHART_PALETTE: [&str; 7] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#84cc16",
];

/// Selected category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// No filtering.
    #[default]
    All,
    /// Exact category label.
    Named(String),
}

impl CategoryFilter {
    /// Returns true if a category label passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }

    /// Returns true for `All`.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Distinct category labels across main goals and sub-goals, sorted.
#[must_use]
pub fn available_categories(groups: &[GoalWithSubgoals]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|group| group.members())
        .map(|goal| goal.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Lookup from goal id to category and goal type, built from the hierarchy.
#[derive(Debug, Clone, Default)]
pub struct GoalIndex {
    categories: HashMap<GoalId, String>,
    types: HashMap<GoalId, GoalType>,
}

impl GoalIndex {
    /// Indexes every main goal and sub-goal.
    #[must_use]
    pub fn build(groups: &[GoalWithSubgoals]) -> Self {
        let mut index = Self::default();
        for goal in groups.iter().flat_map(|group| group.members()) {
            index.categories.insert(goal.id, goal.category.clone());
            index.types.insert(goal.id, goal.goal_type);
        }
        index
    }

    /// Category of a goal, if indexed.
    #[must_use]
    pub fn category(&self, id: GoalId) -> Option<&str> {
        self.categories.get(&id).map(String::as_str)
    }

    /// Goal type, if indexed.
    #[must_use]
    pub fn goal_type(&self, id: GoalId) -> Option<GoalType> {
        self.types.get(&id).copied()
    }

    /// Goal type, defaulting to financial for unindexed ids.
    #[must_use]
    pub fn goal_type_or_default(&self, id: GoalId) -> GoalType {
        self.goal_type(id).unwrap_or_default()
    }

    /// Number of indexed goals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Filters goal groups by category.
///
/// A group survives if its main goal or any sub-goal matches. When the main
/// goal matches, all its sub-goals are kept; otherwise only matching ones.
#[must_use]
pub fn filter_groups(groups: &[GoalWithSubgoals], filter: &CategoryFilter) -> Vec<GoalWithSubgoals> {
    if filter.is_all() {
        return groups.to_vec();
    }

    groups
        .iter()
        .filter_map(|group| {
            if filter.matches(&group.goal.category) {
                return Some(group.clone());
            }

            let subgoals: Vec<_> = group
                .subgoals
                .iter()
                .filter(|sub| filter.matches(&sub.category))
                .cloned()
                .collect();

            (!subgoals.is_empty()).then(|| GoalWithSubgoals {
                goal: group.goal.clone(),
                subgoals,
            })
        })
        .collect()
}

/// Filters progress rows by the category indexed for their id.
///
/// Rows missing from the index never match a named filter.
#[must_use]
pub fn filter_rows(rows: &[ProgressRow], index: &GoalIndex, filter: &CategoryFilter) -> Vec<ProgressRow> {
    if filter.is_all() {
        return rows.to_vec();
    }

    rows.iter()
        .filter(|row| index.category(row.id).is_some_and(|c| filter.matches(c)))
        .cloned()
        .collect()
}

/// One slice of the share-of-total chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareDatum {
    /// Goal name.
    pub name: String,
    /// Saved amount, floored at zero.
    pub value: Decimal,
    /// Currency formatting applies.
    pub is_monetary: bool,
    /// Slice color.
    pub color: &'static str,
}

/// One bar pair of the saved-vs-target chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetDatum {
    /// Goal name.
    pub name: String,
    /// Saved amount.
    pub saved: Decimal,
    /// Target amount.
    pub target: Decimal,
    /// Currency formatting applies.
    pub is_monetary: bool,
}

/// Chart-ready series derived from progress rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    /// Share-of-total series.
    pub share: Vec<ShareDatum>,
    /// Saved-vs-target series.
    pub progress: Vec<TargetDatum>,
    /// Any row is a known financial goal. Drives chart axis labels.
    pub has_monetary_goals: bool,
}

impl ChartSeries {
    /// Projects rows into both chart series.
    #[must_use]
    pub fn project(rows: &[ProgressRow], index: &GoalIndex) -> Self {
        let mut series = Self::default();

        for (i, row) in rows.iter().enumerate() {
            let is_monetary = index.goal_type_or_default(row.id).is_monetary();

            series.share.push(ShareDatum {
                name: row.name.clone(),
                value: row.saved.max(Decimal::ZERO),
                is_monetary,
                color: CHART_PALETTE[i % CHART_PALETTE.len()],
            });
            series.progress.push(TargetDatum {
                name: row.name.clone(),
                saved: row.saved,
                target: row.target,
                is_monetary,
            });
        }

        // Unindexed rows get monetary formatting but do not count here.
        series.has_monetary_goals = rows
            .iter()
            .any(|row| index.goal_type(row.id).is_some_and(GoalType::is_monetary));

        series
    }
}

/// Totals for the overview cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverviewTotals {
    /// Sum of saved amounts.
    pub total_saved: Decimal,
    /// Sum of targets.
    pub total_target: Decimal,
    /// `total_saved / total_target * 100`, zero without a target. Not clamped.
    pub overall_pct: Decimal,
    /// Rows at or above 100%.
    pub completed: usize,
    /// Number of rows.
    pub count: usize,
}

impl OverviewTotals {
    /// Sums the given rows.
    #[must_use]
    pub fn from_rows(rows: &[ProgressRow]) -> Self {
        let (total_saved, total_target) = rows.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(saved, target), row| (saved.saturating_add(row.saved), target.saturating_add(row.target)),
        );

        Self {
            total_saved,
            total_target,
            overall_pct: percent_of(total_saved, total_target),
            completed: rows.iter().filter(|row| row.is_complete()).count(),
            count: rows.len(),
        }
    }
}

/// Goal hierarchy and progress rows, ready to be viewed through a category filter.
#[derive(Debug, Clone, Default)]
pub struct GoalAnalytics {
    groups: Vec<GoalWithSubgoals>,
    rows: Vec<ProgressRow>,
    index: GoalIndex,
}

/// Everything the analytics panel shows for one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsView {
    /// Filtered goal groups.
    pub groups: Vec<GoalWithSubgoals>,
    /// Filtered progress rows.
    pub rows: Vec<ProgressRow>,
    /// Chart series for `rows`.
    pub charts: ChartSeries,
    /// Overview totals for `rows`.
    pub totals: OverviewTotals,
}

impl GoalAnalytics {
    /// Builds analytics over a snapshot of the goal board.
    #[must_use]
    pub fn new(groups: Vec<GoalWithSubgoals>, rows: Vec<ProgressRow>) -> Self {
        let index = GoalIndex::build(&groups);
        Self { groups, rows, index }
    }

    /// Categories for the filter selector.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        available_categories(&self.groups)
    }

    /// The id index.
    #[must_use]
    pub const fn index(&self) -> &GoalIndex {
        &self.index
    }

    /// Returns true if there are no progress rows to chart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Applies a filter and derives charts and totals.
    #[must_use]
    pub fn view(&self, filter: &CategoryFilter) -> AnalyticsView {
        let groups = filter_groups(&self.groups, filter);
        let rows = filter_rows(&self.rows, &self.index, filter);
        let charts = ChartSeries::project(&rows, &self.index);
        let totals = OverviewTotals::from_rows(&rows);

        AnalyticsView {
            groups,
            rows,
            charts,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::types::Goal;
    use rust_decimal_macros::dec;

    fn goal(name: &str, category: &str) -> Goal {
        let mut goal = Goal::new(GoalId::new(), name);
        goal.category = category.to_string();
        goal
    }

    fn row(goal: &Goal, saved: Decimal, target: Decimal) -> ProgressRow {
        ProgressRow {
            id: goal.id,
            name: goal.name.clone(),
            saved,
            target,
            pct: 0,
            target_date: None,
            category: Some(goal.category.clone()),
        }
    }

    fn sample() -> Vec<GoalWithSubgoals> {
        vec![
            GoalWithSubgoals {
                goal: goal("Trip", "Travel"),
                subgoals: vec![goal("Flights", "Travel"), goal("Camera", "Hobbies")],
            },
            GoalWithSubgoals {
                goal: goal("House", "Home"),
                subgoals: vec![goal("Paint", "Home"), goal("Guitar", "Hobbies")],
            },
            GoalWithSubgoals {
                goal: goal("Fund", "Emergency Fund"),
                subgoals: vec![],
            },
        ]
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from("Travel"),
            CategoryFilter::Named("Travel".to_string())
        );
        assert_eq!(CategoryFilter::from("All").to_string(), "All");
    }

    #[test]
    fn test_available_categories_sorted_and_unique() {
        assert_eq!(
            available_categories(&sample()),
            ["Emergency Fund", "Hobbies", "Home", "Travel"]
        );
    }

    #[test]
    fn test_main_match_keeps_all_subgoals() {
        let filtered = filter_groups(&sample(), &CategoryFilter::from("Travel"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].goal.name, "Trip");
        assert_eq!(filtered[0].subgoals.len(), 2);
    }

    #[test]
    fn test_subgoal_match_restricts_subgoals() {
        let filtered = filter_groups(&sample(), &CategoryFilter::from("Hobbies"));
        assert_eq!(filtered.len(), 2);
        for group in &filtered {
            assert_eq!(group.subgoals.len(), 1);
            assert_eq!(group.subgoals[0].category, "Hobbies");
        }
        assert_eq!(filtered[0].goal.name, "Trip");
    }

    #[test]
    fn test_no_match_drops_everything() {
        assert!(filter_groups(&sample(), &CategoryFilter::from("Music")).is_empty());
    }

    #[test]
    fn test_filter_rows_uses_index() {
        let groups = sample();
        let index = GoalIndex::build(&groups);
        let stray = goal("Stray", "Travel");
        let rows = vec![
            row(&groups[0].goal, dec!(10), dec!(100)),
            row(&groups[1].goal, dec!(10), dec!(100)),
            row(&stray, dec!(10), dec!(100)),
        ];

        let filtered = filter_rows(&rows, &index, &CategoryFilter::from("Travel"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Trip");

        let all = filter_rows(&rows, &index, &CategoryFilter::All);
        assert_eq!(all, rows);
    }

    #[test]
    fn test_chart_projection() {
        let mut groups = sample();
        groups[0].goal.goal_type = GoalType::Numeric;
        let index = GoalIndex::build(&groups);
        let stray = goal("Stray", "Travel");
        let rows = vec![
            row(&groups[0].goal, dec!(-5), dec!(10)),
            row(&stray, dec!(40), dec!(100)),
        ];

        let charts = ChartSeries::project(&rows, &index);
        assert_eq!(charts.share[0].value, Decimal::ZERO);
        assert!(!charts.share[0].is_monetary);
        assert_eq!(charts.share[1].color, CHART_PALETTE[1]);
        assert!(charts.share[1].is_monetary);
        assert_eq!(charts.progress[0].saved, dec!(-5));
        assert_eq!(charts.progress[1].target, dec!(100));
        assert!(!charts.has_monetary_goals);
    }

    #[test]
    fn test_overview_totals() {
        let groups = sample();
        let mut rows = vec![
            row(&groups[0].goal, dec!(150), dec!(100)),
            row(&groups[1].goal, dec!(50), dec!(300)),
        ];
        rows[0].pct = 100;
        rows[1].pct = 17;

        let totals = OverviewTotals::from_rows(&rows);
        assert_eq!(totals.total_saved, dec!(200));
        assert_eq!(totals.total_target, dec!(400));
        assert_eq!(totals.overall_pct, dec!(50));
        assert_eq!(totals.completed, 1);
        assert_eq!(totals.count, 2);

        assert_eq!(OverviewTotals::from_rows(&[]), OverviewTotals::default());
    }

    #[test]
    fn test_analytics_view() {
        let groups = sample();
        let rows = vec![
            row(&groups[0].goal, dec!(10), dec!(100)),
            row(&groups[0].subgoals[1], dec!(5), dec!(50)),
            row(&groups[1].goal, dec!(30), dec!(100)),
        ];
        let analytics = GoalAnalytics::new(groups, rows);

        assert_eq!(analytics.categories().len(), 4);
        assert_eq!(analytics.index().len(), 7);

        let view = analytics.view(&CategoryFilter::from("Hobbies"));
        assert_eq!(view.groups.len(), 2);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].name, "Camera");
        assert_eq!(view.charts.share.len(), 1);
        assert_eq!(view.totals.total_target, dec!(50));

        let everything = analytics.view(&CategoryFilter::All);
        assert_eq!(everything.rows.len(), 3);
        assert_eq!(everything.totals.overall_pct, dec!(18));
    }
}
