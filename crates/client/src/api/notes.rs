//! Note endpoints under `/api/notes`.

use async_trait::async_trait;
use finnote_core::notes::{
    MAX_CONTENT_LENGTH, MAX_TAGS, MAX_TITLE_LENGTH, Note, NoteCategory, NoteDraft,
    SearchNotesParams, valid_tags,
};
use finnote_shared::AppResult;
use finnote_shared::types::NoteId;
use serde::Serialize;
use validator::Validate;

use super::not_blank;
use crate::http::{ApiClient, validate_payload};

const NOTES: &str = "/api/notes";

/// Partial note update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct NoteUpdate {
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = MAX_TITLE_LENGTH, message = "Title must be less than 200 characters long")
    )]
    pub title: Option<String>,
    /// HTML content.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = MAX_CONTENT_LENGTH, message = "Content must be less than 10,000 characters long"))]
    pub content: Option<String>,
    /// Category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<NoteCategory>,
    /// Tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        length(max = MAX_TAGS, message = "Maximum 20 tags allowed"),
        custom(function = "valid_tags")
    )]
    pub tags: Option<Vec<String>>,
    /// Favorite flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    /// Archived flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl From<&NoteDraft> for NoteUpdate {
    fn from(draft: &NoteDraft) -> Self {
        Self {
            title: Some(draft.title.clone()),
            content: Some(draft.content.clone()),
            category: Some(draft.category),
            tags: Some(draft.tags.clone()),
            ..Self::default()
        }
    }
}

/// Note endpoints.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Notes matching the search parameters.
    async fn list_notes(&self, params: &SearchNotesParams) -> AppResult<Vec<Note>>;

    /// One note.
    async fn get_note(&self, id: NoteId) -> AppResult<Note>;

    /// Creates a note.
    async fn create_note(&self, draft: &NoteDraft) -> AppResult<Note>;

    /// Updates a note.
    async fn update_note(&self, id: NoteId, update: &NoteUpdate) -> AppResult<Note>;

    /// Deletes a note.
    async fn delete_note(&self, id: NoteId) -> AppResult<()>;

    /// Sets the favorite flag.
    async fn toggle_favorite(&self, id: NoteId, is_favorite: bool) -> AppResult<Note> {
        let update = NoteUpdate {
            is_favorite: Some(is_favorite),
            ..NoteUpdate::default()
        };
        self.update_note(id, &update).await
    }

    /// Sets the archived flag.
    async fn toggle_archive(&self, id: NoteId, is_archived: bool) -> AppResult<Note> {
        let update = NoteUpdate {
            is_archived: Some(is_archived),
            ..NoteUpdate::default()
        };
        self.update_note(id, &update).await
    }
}

#[async_trait]
impl NotesApi for ApiClient {
    async fn list_notes(&self, params: &SearchNotesParams) -> AppResult<Vec<Note>> {
        self.get_list(NOTES, &params.query_pairs()).await
    }

    async fn get_note(&self, id: NoteId) -> AppResult<Note> {
        self.get(&format!("{NOTES}/{id}")).await
    }

    async fn create_note(&self, draft: &NoteDraft) -> AppResult<Note> {
        draft.check()?;
        self.post(NOTES, draft).await
    }

    async fn update_note(&self, id: NoteId, update: &NoteUpdate) -> AppResult<Note> {
        validate_payload(update)?;
        self.put(&format!("{NOTES}/{id}"), update).await
    }

    async fn delete_note(&self, id: NoteId) -> AppResult<()> {
        self.delete(&format!("{NOTES}/{id}")).await
    }
}
