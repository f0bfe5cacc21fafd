//! Goal category lookup: icons, colors, suggested goal types.
//!
//! Category labels on goals are free text. `CategoryKind::from_name` maps a
//! label onto the known set and everything else onto `CategoryKind::Unknown`,
//! so every lookup below is a total function over the enum.

use serde::Serialize;

use super::types::{GoalCategory, GoalType};

/// Color used when a category has none assigned.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

/// Icon used for unknown categories.
pub const DEFAULT_CATEGORY_ICON: &str = "target";

macro_rules! category_kinds {
    ($($variant:ident => $name:literal, $icon:literal;)+) => {
        /// A known goal category, or `Unknown`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CategoryKind {
            $(
                #[doc = $name]
                $variant,
            )+
            /// Any label outside the known set.
            Unknown,
        }

        impl CategoryKind {
            /// Every known category, excluding `Unknown`.
            pub const KNOWN: &'static [Self] = &[$(Self::$variant),+];

            /// Maps a category label to its kind. Matching is exact.
            #[must_use]
            pub fn from_name(name: &str) -> Self {
                match name {
                    $($name => Self::$variant,)+
                    _ => Self::Unknown,
                }
            }

            /// Canonical label, `None` for `Unknown`.
            #[must_use]
            pub const fn name(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($name),)+
                    Self::Unknown => None,
                }
            }

            /// Icon name for the category.
            #[must_use]
            pub const fn icon(self) -> &'static str {
                match self {
                    $(Self::$variant => $icon,)+
                    Self::Unknown => DEFAULT_CATEGORY_ICON,
                }
            }
        }
    };
}

category_kinds! {
    FinancialGoals => "Financial Goals", "dollar-sign";
    Investment => "Investment", "trending-up";
    Savings => "Savings", "dollar-sign";
    EmergencyFund => "Emergency Fund", "shield";
    DailyLifeGoals => "Daily Life Goals", "calendar";
    LongTermGoals => "Long Term Goals", "flag";
    ShortTermGoals => "Short Term Goals", "zap";
    PersonalGrowth => "Personal Growth", "star";
    Education => "Education", "graduation-cap";
    Learning => "Learning", "book";
    Career => "Career", "briefcase";
    ProfessionalDevelopment => "Professional Development", "briefcase";
    SkillsDevelopment => "Skills Development", "zap";
    Health => "Health", "heart";
    Fitness => "Fitness", "dumbbell";
    Wellness => "Wellness", "heart";
    MentalHealth => "Mental Health", "heart";
    Travel => "Travel", "plane";
    Lifestyle => "Lifestyle", "home";
    Home => "Home", "home";
    Family => "Family", "users";
    Relationships => "Relationships", "users";
    Social => "Social", "users";
    Hobbies => "Hobbies", "palette";
    Creative => "Creative", "palette";
    Art => "Art", "palette";
    Music => "Music", "music";
    Photography => "Photography", "camera";
    Gaming => "Gaming", "gamepad-2";
    Sports => "Sports", "dumbbell";
    Technology => "Technology", "smartphone";
    Environmental => "Environmental", "leaf";
    Sustainability => "Sustainability", "leaf";
    Emergency => "Emergency", "shield";
    General => "General", "target";
    Custom => "Custom", "target";
}

/// Suggested goal type and examples for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategorySuggestion {
    /// Goal type that usually fits the category.
    pub suggested_type: GoalType,
    /// Example goals.
    pub examples: &'static [&'static str],
    /// One-line description.
    pub description: &'static str,
}

impl CategoryKind {
    /// Suggested goal type for a new goal in this category.
    ///
    /// Categories without a curated suggestion fall back to a numeric goal
    /// with no examples.
    #[must_use]
    pub const fn suggestion(self) -> CategorySuggestion {
        match self {
            Self::FinancialGoals => suggest(
                GoalType::Financial,
                &[
                    "Save $10,000 for emergency fund",
                    "Pay off credit card debt",
                    "Save for down payment",
                ],
                "Track monetary targets and financial milestones",
            ),
            Self::Career => suggest(
                GoalType::Numeric,
                &[
                    "Complete 5 certification courses",
                    "Attend 10 networking events",
                    "Apply to 20 companies",
                ],
                "Track professional achievements and milestones",
            ),
            Self::Health => suggest(
                GoalType::Boolean,
                &[
                    "Complete annual health checkup",
                    "Get vaccinated",
                    "Schedule dental appointment",
                ],
                "Track health-related tasks and milestones",
            ),
            Self::Fitness => suggest(
                GoalType::Habit,
                &[
                    "Exercise 3 times per week",
                    "Run 5km daily",
                    "Do 100 push-ups per week",
                ],
                "Build and maintain fitness habits",
            ),
            Self::Education => suggest(
                GoalType::Numeric,
                &[
                    "Read 12 books this year",
                    "Complete 5 online courses",
                    "Learn 100 new words",
                ],
                "Track learning progress and educational achievements",
            ),
            Self::PersonalGrowth => suggest(
                GoalType::Boolean,
                &[
                    "Start daily meditation practice",
                    "Write in journal daily",
                    "Practice gratitude",
                ],
                "Track personal development and self-improvement",
            ),
            Self::Travel => suggest(
                GoalType::Financial,
                &[
                    "Save $5,000 for Europe trip",
                    "Book flights to Japan",
                    "Save for travel insurance",
                ],
                "Plan and save for travel adventures",
            ),
            Self::Relationships => suggest(
                GoalType::Habit,
                &[
                    "Call family weekly",
                    "Date night twice a month",
                    "Send birthday cards on time",
                ],
                "Nurture relationships and maintain connections",
            ),
            Self::Hobbies => suggest(
                GoalType::Habit,
                &[
                    "Practice guitar 30 min daily",
                    "Paint 2 paintings per month",
                    "Complete one puzzle per week",
                ],
                "Pursue interests and creative activities",
            ),
            Self::Home => suggest(
                GoalType::Boolean,
                &["Organize garage", "Repaint living room", "Install new lighting"],
                "Track home improvement projects",
            ),
            Self::Technology => suggest(
                GoalType::Numeric,
                &[
                    "Complete 10 coding projects",
                    "Learn 5 new frameworks",
                    "Build 3 apps",
                ],
                "Track tech learning and projects",
            ),
            Self::Creative => suggest(
                GoalType::Habit,
                &[
                    "Write 500 words daily",
                    "Create one artwork per week",
                    "Practice piano 20 min daily",
                ],
                "Track creative practice and output",
            ),
            Self::DailyLifeGoals => suggest(
                GoalType::Habit,
                &[
                    "Wake up at 6 AM daily",
                    "Drink 8 glasses of water",
                    "Read before bed",
                ],
                "Establish daily routines and habits",
            ),
            Self::LongTermGoals => suggest(
                GoalType::Financial,
                &["Save for retirement", "Buy a house", "Start a business"],
                "Plan for major life milestones",
            ),
            Self::EmergencyFund => suggest(
                GoalType::Financial,
                &["Save 6 months of expenses", "Build $10,000 emergency fund"],
                "Build financial security and safety net",
            ),
            Self::Investment => suggest(
                GoalType::Financial,
                &[
                    "Invest $500 monthly",
                    "Reach $50,000 portfolio value",
                    "Max out 401k",
                ],
                "Grow wealth through investments",
            ),
            Self::Sports => suggest(
                GoalType::Habit,
                &[
                    "Play soccer twice a week",
                    "Run 5km three times per week",
                    "Attend gym 4x weekly",
                ],
                "Track athletic training and sports activities",
            ),
            Self::Music => suggest(
                GoalType::Habit,
                &[
                    "Practice 1 hour daily",
                    "Learn 12 new songs",
                    "Perform at open mic",
                ],
                "Track musical practice and achievements",
            ),
            Self::Learning => suggest(
                GoalType::Numeric,
                &["Complete 20 courses", "Learn 1000 new words", "Read 50 books"],
                "Track continuous learning progress",
            ),
            Self::Environmental => suggest(
                GoalType::Habit,
                &[
                    "Reduce plastic use",
                    "Plant 20 trees",
                    "Use bike for commute 3x weekly",
                ],
                "Track environmental actions and sustainability",
            ),
            _ => suggest(GoalType::Numeric, &[], "Set and track your goal progress"),
        }
    }
}

const fn suggest(
    suggested_type: GoalType,
    examples: &'static [&'static str],
    description: &'static str,
) -> CategorySuggestion {
    CategorySuggestion {
        suggested_type,
        examples,
        description,
    }
}

/// A predefined category offered when creating goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefaultCategory {
    /// Kind.
    #[serde(skip)]
    pub kind: CategoryKind,
    /// Label.
    pub name: &'static str,
    /// Description.
    pub description: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Hex color.
    pub color: &'static str,
}

const DEFAULT_CATEGORIES: &[(CategoryKind, &str, &str)] = &[
    (CategoryKind::FinancialGoals, "Money, savings, and financial objectives", "#10b981"),
    (CategoryKind::Career, "Professional and career development goals", "#3b82f6"),
    (CategoryKind::Health, "Health and wellness goals", "#ef4444"),
    (CategoryKind::Fitness, "Physical fitness and exercise goals", "#f59e0b"),
    (CategoryKind::Education, "Learning and educational goals", "#8b5cf6"),
    (CategoryKind::PersonalGrowth, "Self-improvement and personal development", "#f59e0b"),
    (CategoryKind::Travel, "Travel and adventure goals", "#06b6d4"),
    (CategoryKind::Relationships, "Family, friends, and relationship goals", "#ec4899"),
    (CategoryKind::Hobbies, "Hobbies and recreational activities", "#a855f7"),
    (CategoryKind::Home, "Home improvement and lifestyle goals", "#84cc16"),
    (CategoryKind::Technology, "Tech-related goals and learning", "#6366f1"),
    (CategoryKind::Creative, "Artistic and creative pursuits", "#f97316"),
    (CategoryKind::DailyLifeGoals, "Daily habits and routines", "#3b82f6"),
    (CategoryKind::LongTermGoals, "Long-term life objectives", "#8b5cf6"),
    (CategoryKind::EmergencyFund, "Emergency savings and safety nets", "#06b6d4"),
    (CategoryKind::Investment, "Investment and wealth building", "#84cc16"),
    (CategoryKind::Sports, "Sports and athletic goals", "#14b8a6"),
    (CategoryKind::Music, "Musical goals and learning", "#f43f5e"),
    (CategoryKind::Learning, "Continuous learning goals", "#6366f1"),
    (CategoryKind::Environmental, "Environmental and sustainability goals", "#22c55e"),
];

/// The predefined categories, in display order.
#[must_use]
pub fn default_categories() -> Vec<DefaultCategory> {
    DEFAULT_CATEGORIES
        .iter()
        .filter_map(|&(kind, description, color)| {
            Some(DefaultCategory {
                kind,
                name: kind.name()?,
                description,
                icon: kind.icon(),
                color,
            })
        })
        .collect()
}

/// Color of a category as stored in the category list, or the default color.
///
/// An empty stored color also falls back to the default.
#[must_use]
pub fn category_color<'a>(name: &str, categories: &'a [GoalCategory]) -> &'a str {
    categories
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.color.as_str())
        .filter(|color| !color.is_empty())
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finnote_shared::types::CategoryId;

    #[test]
    fn test_from_name_is_total() {
        assert_eq!(CategoryKind::from_name("Travel"), CategoryKind::Travel);
        assert_eq!(CategoryKind::from_name("travel"), CategoryKind::Unknown);
        assert_eq!(CategoryKind::from_name(""), CategoryKind::Unknown);
        assert_eq!(CategoryKind::Unknown.icon(), "target");
        assert_eq!(CategoryKind::Unknown.name(), None);
    }

    #[test]
    fn test_known_names_roundtrip() {
        for &kind in CategoryKind::KNOWN {
            let name = kind.name().unwrap();
            assert_eq!(CategoryKind::from_name(name), kind);
        }
    }

    #[test]
    fn test_icons() {
        assert_eq!(CategoryKind::EmergencyFund.icon(), "shield");
        assert_eq!(CategoryKind::Gaming.icon(), "gamepad-2");
        assert_eq!(CategoryKind::Savings.icon(), "dollar-sign");
    }

    #[test]
    fn test_suggestions() {
        let health = CategoryKind::Health.suggestion();
        assert_eq!(health.suggested_type, GoalType::Boolean);
        assert_eq!(health.examples.len(), 3);

        let unknown = CategoryKind::Unknown.suggestion();
        assert_eq!(unknown.suggested_type, GoalType::Numeric);
        assert!(unknown.examples.is_empty());

        // Known for icons but without a curated suggestion.
        assert_eq!(CategoryKind::Gaming.suggestion(), unknown);
    }

    #[test]
    fn test_default_categories() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 20);
        assert_eq!(defaults[0].name, "Financial Goals");
        assert_eq!(defaults[0].icon, "dollar-sign");
        assert_eq!(defaults[19].color, "#22c55e");
    }

    #[test]
    fn test_category_color() {
        let categories = vec![
            GoalCategory {
                id: CategoryId::new(),
                name: "Travel".to_string(),
                description: String::new(),
                icon: "plane".to_string(),
                color: "#06b6d4".to_string(),
                created_at: None,
            },
            GoalCategory {
                id: CategoryId::new(),
                name: "Home".to_string(),
                description: String::new(),
                icon: String::new(),
                color: String::new(),
                created_at: None,
            },
        ];

        assert_eq!(category_color("Travel", &categories), "#06b6d4");
        assert_eq!(category_color("Home", &categories), DEFAULT_CATEGORY_COLOR);
        assert_eq!(category_color("Pets", &categories), DEFAULT_CATEGORY_COLOR);
        assert_eq!(category_color("Travel", &[]), DEFAULT_CATEGORY_COLOR);
    }
}
