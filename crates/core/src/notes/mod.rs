//! Notes: categories, HTML previews, validation and search.

pub mod content;
pub mod search;
pub mod types;
pub mod validation;

pub use content::{PREVIEW_LENGTH, content_preview, strip_html_tags};
pub use search::SearchNotesParams;
pub use types::{Note, NoteCategory, NoteFilter};
pub use validation::{
    MAX_CONTENT_LENGTH, MAX_TAG_LENGTH, MAX_TAGS, MAX_TITLE_LENGTH, NoteDraft, valid_tags,
    validate_note,
};
