//! Note form validation.

use finnote_shared::AppError;
use serde::Serialize;
use validator::{Validate, ValidationError};

use super::types::NoteCategory;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: u64 = 200;
/// Maximum content length in characters.
pub const MAX_CONTENT_LENGTH: u64 = 10_000;
/// Maximum number of tags.
pub const MAX_TAGS: u64 = 20;
/// Maximum tag length in characters.
pub const MAX_TAG_LENGTH: usize = 50;

/// A note as entered in the editor, before it is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct NoteDraft {
    /// Title.
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = MAX_TITLE_LENGTH, message = "Title must be less than 200 characters long")
    )]
    pub title: String,
    /// HTML content.
    #[validate(length(max = MAX_CONTENT_LENGTH, message = "Content must be less than 10,000 characters long"))]
    pub content: String,
    /// Category.
    pub category: NoteCategory,
    /// Tags.
    #[validate(
        length(max = MAX_TAGS, message = "Maximum 20 tags allowed"),
        custom(function = "valid_tags")
    )]
    pub tags: Vec<String>,
}

impl NoteDraft {
    /// Creates a draft with no tags.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>, category: NoteCategory) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category,
            tags: Vec::new(),
        }
    }

    /// Validates the draft, mapping failures to `AppError::Validation`.
    ///
    /// # Errors
    ///
    /// Returns the first-reported field problems as a validation error.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|errors| AppError::Validation(errors.to_string()))
    }
}

/// Validates a title and content pair.
///
/// # Errors
///
/// Returns `AppError::Validation` for a blank or overlong title, or overlong content.
pub fn validate_note(title: &str, content: &str) -> Result<(), AppError> {
    NoteDraft::new(title, content, NoteCategory::default()).check()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Checks each tag is non-blank and at most `MAX_TAG_LENGTH` characters.
///
/// # Errors
///
/// Returns the first offending tag's problem.
pub fn valid_tags(tags: &[String]) -> Result<(), ValidationError> {
    for tag in tags {
        if tag.trim().is_empty() {
            return Err(ValidationError::new("empty_tag").with_message("Tag cannot be empty".into()));
        }
        if tag.chars().count() > MAX_TAG_LENGTH {
            return Err(ValidationError::new("tag_length")
                .with_message("Tag must be 50 characters or less".into()));
        }
    }
    Ok(())
}
