//! Note search parameters and local matching.

use finnote_shared::types::PageRequest;

use super::content::strip_html_tags;
use super::types::{Note, NoteCategory};

/// Search, filter and page parameters for the notes list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchNotesParams {
    /// Free-text query over title and content.
    pub query: Option<String>,
    /// Category filter.
    pub category: Option<NoteCategory>,
    /// Page.
    pub page: Option<PageRequest>,
}

impl SearchNotesParams {
    /// Search by text only.
    #[must_use]
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Restricts to a category.
    #[must_use]
    pub fn with_category(mut self, category: NoteCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Requests one page.
    #[must_use]
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    /// Query-string pairs: `q`, `category`, `page`, `limit`. Empty values are left out.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("q", query.to_string()));
        }
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        if let Some(page) = &self.page {
            pairs.extend(page.query_pairs());
        }
        pairs
    }

    /// Returns true if a note satisfies the query and category.
    ///
    /// The query matches case-insensitively against the title or the
    /// tag-stripped content.
    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        if self.category.is_some_and(|category| category != note.category) {
            return false;
        }

        match self.query.as_deref().filter(|q| !q.is_empty()) {
            None => true,
            Some(query) => {
                let query = query.to_lowercase();
                note.title.to_lowercase().contains(&query)
                    || strip_html_tags(&note.content).to_lowercase().contains(&query)
            }
        }
    }

    /// Filters notes locally, newest update first, then applies the page.
    #[must_use]
    pub fn apply(&self, notes: &[Note]) -> Vec<Note> {
        let mut matching: Vec<_> = notes.iter().filter(|note| self.matches(note)).cloned().collect();
        matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        match &self.page {
            Some(page) => page.slice(&matching).to_vec(),
            None => matching,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use finnote_shared::types::NoteId;

    fn note(title: &str, content: &str, category: NoteCategory, day: u32) -> Note {
        Note {
            id: NoteId::new(),
            title: title.to_string(),
            content: content.to_string(),
            category,
            tags: Vec::new(),
            is_favorite: false,
            is_archived: false,
            created_at: None,
            updated_at: Some(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()),
        }
    }

    fn sample() -> Vec<Note> {
        vec![
            note("Investment Strategy", "<p>index funds</p>", NoteCategory::Strategies, 20),
            note("Monthly Budget", "<ul><li>Rent</li></ul>", NoteCategory::Plans, 18),
            note("Tech Wishlist", "<li>keyboard</li>", NoteCategory::Wishlist, 12),
        ]
    }

    #[test]
    fn test_query_pairs() {
        let params = SearchNotesParams::query("rent")
            .with_category(NoteCategory::BulletPoints)
            .with_page(PageRequest::new(2, 10));

        assert_eq!(
            params.query_pairs(),
            vec![
                ("q", "rent".to_string()),
                ("category", "bullet-points".to_string()),
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
            ]
        );
        assert!(SearchNotesParams::query("").query_pairs().is_empty());
    }

    #[test]
    fn test_matches_title_and_stripped_content() {
        let notes = sample();
        assert!(SearchNotesParams::query("BUDGET").matches(&notes[1]));
        assert!(SearchNotesParams::query("rent").matches(&notes[1]));
        // Tag names are not content.
        assert!(!SearchNotesParams::query("li").matches(&notes[1]));
    }

    #[test]
    fn test_category_filter() {
        let params = SearchNotesParams::default().with_category(NoteCategory::Wishlist);
        let found = params.apply(&sample());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Tech Wishlist");
    }

    #[test]
    fn test_apply_sorts_and_pages() {
        let mut notes = sample();
        notes.reverse();

        let all = SearchNotesParams::default().apply(&notes);
        assert_eq!(all[0].title, "Investment Strategy");

        let second = SearchNotesParams::default()
            .with_page(PageRequest::new(2, 2))
            .apply(&notes);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].title, "Tech Wishlist");
    }
}
