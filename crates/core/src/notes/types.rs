//! Note data types.

use chrono::{DateTime, Utc};
use finnote_shared::types::NoteId;
use serde::{Deserialize, Serialize};

use crate::goals::types::null_as_default;

/// Note category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteCategory {
    /// Bullet point lists.
    BulletPoints,
    /// Plans.
    Plans,
    /// Strategies.
    Strategies,
    /// Wishlist.
    Wishlist,
    /// Anything else, including labels this client does not know.
    #[default]
    #[serde(other)]
    Other,
}

impl NoteCategory {
    /// Every category, in selector order.
    pub const ALL: [Self; 5] = [
        Self::BulletPoints,
        Self::Plans,
        Self::Strategies,
        Self::Wishlist,
        Self::Other,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BulletPoints => "bullet-points",
            Self::Plans => "plans",
            Self::Strategies => "strategies",
            Self::Wishlist => "wishlist",
            Self::Other => "other",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BulletPoints => "Bullet Points",
            Self::Plans => "Plans",
            Self::Strategies => "Strategies",
            Self::Wishlist => "Wishlist",
            Self::Other => "Other",
        }
    }

    /// Parses a wire name. Unlike deserialization, unknown names are `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for NoteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category selector state for the notes list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NoteFilter {
    /// All notes.
    #[default]
    All,
    /// One category.
    Category(NoteCategory),
}

impl NoteFilter {
    /// Returns true if a note in `category` passes.
    #[must_use]
    pub fn matches(self, category: NoteCategory) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => wanted == category,
        }
    }

    /// The category, when filtering.
    #[must_use]
    pub const fn category(self) -> Option<NoteCategory> {
        match self {
            Self::All => None,
            Self::Category(category) => Some(category),
        }
    }
}

/// A note. `content` is opaque HTML from the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Note ID.
    pub id: NoteId,
    /// Title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// HTML content, stored and shown as-is.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Category.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: NoteCategory,
    /// Tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Favorite flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorite: bool,
    /// Archived flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_archived: bool,
    /// Creation timestamp.
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&NoteCategory::BulletPoints).unwrap();
        assert_eq!(json, "\"bullet-points\"");

        let parsed: NoteCategory = serde_json::from_str("\"wishlist\"").unwrap();
        assert_eq!(parsed, NoteCategory::Wishlist);
    }

    #[test]
    fn test_unknown_category_is_other() {
        let parsed: NoteCategory = serde_json::from_str("\"recipes\"").unwrap();
        assert_eq!(parsed, NoteCategory::Other);
        assert_eq!(NoteCategory::parse("recipes"), None);
        assert_eq!(NoteCategory::parse("plans"), Some(NoteCategory::Plans));
    }

    #[test]
    fn test_note_filter() {
        assert!(NoteFilter::All.matches(NoteCategory::Plans));
        assert!(NoteFilter::Category(NoteCategory::Plans).matches(NoteCategory::Plans));
        assert!(!NoteFilter::Category(NoteCategory::Plans).matches(NoteCategory::Other));
    }

    #[test]
    fn test_note_deserializes_camel_case_timestamps() {
        let json = r#"{
            "id": "0191b7a0-0000-7000-8000-000000000003",
            "title": "Budget",
            "content": "<p>hi</p>",
            "category": "plans",
            "tags": null,
            "createdAt": "2024-01-10T09:00:00Z"
        }"#;

        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.category, NoteCategory::Plans);
        assert!(note.tags.is_empty());
        assert!(note.created_at.is_some());
        assert!(!note.is_archived);
    }
}
