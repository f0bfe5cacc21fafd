//! Notes desk: the filtered note list and note mutations.

use finnote_core::guard::InFlightGuard;
use finnote_core::notes::{Note, NoteCategory, NoteDraft, NoteFilter, SearchNotesParams};
use finnote_core::notify::Notifier;
use finnote_shared::types::NoteId;
use finnote_shared::{AppError, AppResult};
use tokio::sync::RwLock;

use super::{Outcome, run_mutation};
use crate::api::{NoteUpdate, NotesApi};

const CREATE: Outcome = Outcome {
    success: "Note created successfully!",
    failure: "Failed to create note",
};
const UPDATE: Outcome = Outcome {
    success: "Note updated successfully!",
    failure: "Failed to update note",
};
const DELETE: Outcome = Outcome {
    success: "Note deleted",
    failure: "Failed to delete note",
};

/// What the desk currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeskState {
    /// Active search.
    pub params: SearchNotesParams,
    /// Notes returned for `params`.
    pub notes: Vec<Note>,
}

impl DeskState {
    /// The category selector value for the active search.
    #[must_use]
    pub fn filter(&self) -> NoteFilter {
        self.params.category.map_or(NoteFilter::All, NoteFilter::Category)
    }
}

/// Notes page view model.
pub struct NotesDesk<A, N> {
    api: A,
    notifier: N,
    guard: InFlightGuard,
    state: RwLock<DeskState>,
}

impl<A: NotesApi, N: Notifier> NotesDesk<A, N> {
    /// Creates an empty desk.
    pub fn new(api: A, notifier: N) -> Self {
        Self::with_guard(api, notifier, InFlightGuard::new())
    }

    /// Creates an empty desk sharing an existing in-flight guard.
    pub fn with_guard(api: A, notifier: N, guard: InFlightGuard) -> Self {
        Self {
            api,
            notifier,
            guard,
            state: RwLock::new(DeskState::default()),
        }
    }

    /// Runs a new search and keeps it as the active one.
    pub async fn search(&self, params: SearchNotesParams) -> AppResult<()> {
        self.state.write().await.params = params;
        self.reload().await
    }

    /// Narrows the active search to a category, or clears the category.
    pub async fn set_filter(&self, filter: NoteFilter) -> AppResult<()> {
        let mut params = self.state.read().await.params.clone();
        params.category = filter.category();
        self.search(params).await
    }

    /// Re-runs the active search.
    pub async fn reload(&self) -> AppResult<()> {
        let params = self.state.read().await.params.clone();
        let notes = self
            .api
            .list_notes(&params)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error loading notes"))?;
        tracing::debug!(count = notes.len(), "Notes loaded");
        self.state.write().await.notes = notes;
        Ok(())
    }

    /// Fetches one note.
    pub async fn open(&self, id: NoteId) -> AppResult<Note> {
        self.api
            .get_note(id)
            .await
            .inspect_err(|e| tracing::error!(note_id = %id, error = %e, "Error loading note"))
    }

    /// Validates and creates a note.
    pub async fn create(&self, draft: &NoteDraft) -> AppResult<Note> {
        self.check(draft, CREATE)?;
        let key = format!("note:new:{}", draft.title.trim().to_lowercase());
        let note = run_mutation(
            &self.guard,
            &self.notifier,
            &key,
            CREATE,
            self.api.create_note(draft),
        )
        .await?;
        self.reload_after_mutation().await;
        Ok(note)
    }

    /// Validates and saves an edited note.
    pub async fn save(&self, id: NoteId, draft: &NoteDraft) -> AppResult<Note> {
        self.check(draft, UPDATE)?;
        self.update(id, self.api.update_note(id, &NoteUpdate::from(draft)))
            .await
    }

    /// Deletes a note.
    pub async fn delete(&self, id: NoteId) -> AppResult<()> {
        run_mutation(
            &self.guard,
            &self.notifier,
            &note_key(id),
            DELETE,
            self.api.delete_note(id),
        )
        .await?;
        self.reload_after_mutation().await;
        Ok(())
    }

    /// Flips the favorite flag of a listed note.
    pub async fn toggle_favorite(&self, id: NoteId) -> AppResult<Note> {
        let current = self.listed(id).await?;
        self.update(id, self.api.toggle_favorite(id, !current.is_favorite))
            .await
    }

    /// Flips the archived flag of a listed note.
    pub async fn toggle_archive(&self, id: NoteId) -> AppResult<Note> {
        let current = self.listed(id).await?;
        self.update(id, self.api.toggle_archive(id, !current.is_archived))
            .await
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> DeskState {
        self.state.read().await.clone()
    }

    /// Listed notes in one category.
    pub async fn in_category(&self, category: NoteCategory) -> Vec<Note> {
        self.state
            .read()
            .await
            .notes
            .iter()
            .filter(|note| note.category == category)
            .cloned()
            .collect()
    }

    async fn update(
        &self,
        id: NoteId,
        call: impl Future<Output = AppResult<Note>>,
    ) -> AppResult<Note> {
        let note = run_mutation(&self.guard, &self.notifier, &note_key(id), UPDATE, call).await?;
        self.reload_after_mutation().await;
        Ok(note)
    }

    fn check(&self, draft: &NoteDraft, outcome: Outcome) -> AppResult<()> {
        draft.check().inspect_err(|e| {
            tracing::warn!(error = %e, "Note rejected");
            self.notifier.error(outcome.failure, Some(&e.user_message()));
        })
    }

    async fn listed(&self, id: NoteId) -> AppResult<Note> {
        self.state
            .read()
            .await
            .notes
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("note {id} is not listed")))
    }

    async fn reload_after_mutation(&self) {
        if let Err(e) = self.reload().await {
            tracing::warn!(error = %e, "Note list is stale after mutation");
        }
    }
}

fn note_key(id: NoteId) -> String {
    format!("note:{id}")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use finnote_core::notify::ToastKind;

    use super::*;
    use crate::services::testing::RecordingNotifier;

    #[derive(Default)]
    struct FakeNotes {
        notes: Mutex<Vec<Note>>,
        creates: AtomicUsize,
        flag_calls: Mutex<Vec<(&'static str, bool)>>,
    }

    #[async_trait]
    impl NotesApi for FakeNotes {
        async fn list_notes(&self, params: &SearchNotesParams) -> AppResult<Vec<Note>> {
            Ok(params.apply(&self.notes.lock().unwrap()))
        }

        async fn get_note(&self, id: NoteId) -> AppResult<Note> {
            self.notes
                .lock()
                .unwrap()
                .iter()
                .find(|note| note.id == id)
                .cloned()
                .ok_or_else(|| AppError::NotFound("Note not found".into()))
        }

        async fn create_note(&self, draft: &NoteDraft) -> AppResult<Note> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            let note = Note {
                id: NoteId::new(),
                title: draft.title.clone(),
                content: draft.content.clone(),
                category: draft.category,
                tags: draft.tags.clone(),
                is_favorite: false,
                is_archived: false,
                created_at: Some(Utc::now()),
                updated_at: Some(Utc::now()),
            };
            self.notes.lock().unwrap().push(note.clone());
            Ok(note)
        }

        async fn update_note(&self, id: NoteId, update: &NoteUpdate) -> AppResult<Note> {
            let mut notes = self.notes.lock().unwrap();
            let note = notes
                .iter_mut()
                .find(|note| note.id == id)
                .ok_or_else(|| AppError::NotFound("Note not found".into()))?;
            if let Some(title) = &update.title {
                note.title.clone_from(title);
            }
            if let Some(is_favorite) = update.is_favorite {
                note.is_favorite = is_favorite;
            }
            if let Some(is_archived) = update.is_archived {
                note.is_archived = is_archived;
            }
            Ok(note.clone())
        }

        async fn delete_note(&self, id: NoteId) -> AppResult<()> {
            self.notes.lock().unwrap().retain(|note| note.id != id);
            Ok(())
        }

        async fn toggle_favorite(&self, id: NoteId, is_favorite: bool) -> AppResult<Note> {
            self.flag_calls.lock().unwrap().push(("favorite", is_favorite));
            let update = NoteUpdate {
                is_favorite: Some(is_favorite),
                ..NoteUpdate::default()
            };
            self.update_note(id, &update).await
        }

        async fn toggle_archive(&self, id: NoteId, is_archived: bool) -> AppResult<Note> {
            self.flag_calls.lock().unwrap().push(("archive", is_archived));
            let update = NoteUpdate {
                is_archived: Some(is_archived),
                ..NoteUpdate::default()
            };
            self.update_note(id, &update).await
        }
    }

    fn desk() -> NotesDesk<FakeNotes, RecordingNotifier> {
        NotesDesk::new(FakeNotes::default(), RecordingNotifier::default())
    }

    #[tokio::test]
    async fn test_create_and_filter() {
        let desk = desk();
        desk.create(&NoteDraft::new("Monthly Budget", "<p>rent</p>", NoteCategory::Plans))
            .await
            .unwrap();
        desk.create(&NoteDraft::new("Tech Wishlist", "<li>keyboard</li>", NoteCategory::Wishlist))
            .await
            .unwrap();
        assert_eq!(desk.snapshot().await.notes.len(), 2);

        desk.set_filter(NoteFilter::Category(NoteCategory::Wishlist))
            .await
            .unwrap();
        let state = desk.snapshot().await;
        assert_eq!(state.filter(), NoteFilter::Category(NoteCategory::Wishlist));
        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.notes[0].title, "Tech Wishlist");

        desk.search(SearchNotesParams::query("rent")).await.unwrap();
        assert_eq!(desk.snapshot().await.notes[0].title, "Monthly Budget");
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_api() {
        let desk = desk();
        let err = desk
            .create(&NoteDraft::new("   ", "body", NoteCategory::Other))
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION");
        assert_eq!(desk.api.creates.load(Ordering::SeqCst), 0);
        assert_eq!(
            desk.notifier.titles(),
            vec![(ToastKind::Error, "Failed to create note".to_string())]
        );
    }

    #[tokio::test]
    async fn test_toggles_flip_flags() {
        let desk = desk();
        let note = desk
            .create(&NoteDraft::new("Ideas", "", NoteCategory::Strategies))
            .await
            .unwrap();

        assert!(desk.toggle_favorite(note.id).await.unwrap().is_favorite);
        assert!(!desk.toggle_favorite(note.id).await.unwrap().is_favorite);
        assert!(desk.toggle_archive(note.id).await.unwrap().is_archived);
        assert_eq!(
            *desk.api.flag_calls.lock().unwrap(),
            vec![("favorite", true), ("favorite", false), ("archive", true)]
        );

        let err = desk.toggle_favorite(NoteId::new()).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_save_and_delete() {
        let desk = desk();
        let note = desk
            .create(&NoteDraft::new("Draft", "", NoteCategory::Other))
            .await
            .unwrap();

        let saved = desk
            .save(note.id, &NoteDraft::new("Final", "", NoteCategory::Other))
            .await
            .unwrap();
        assert_eq!(saved.title, "Final");
        assert_eq!(desk.open(note.id).await.unwrap().title, "Final");

        desk.delete(note.id).await.unwrap();
        assert!(desk.snapshot().await.notes.is_empty());
        assert_eq!(desk.open(note.id).await.unwrap_err().error_code(), "NOT_FOUND");
    }
}
