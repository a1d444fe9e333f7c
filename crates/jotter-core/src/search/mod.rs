//! List-view filtering for Jotter
//!
//! Filtering is a linear scan over the tag-joined notes: a case-insensitive
//! title substring plus an "all of these tags" constraint.

use crate::models::{Note, TagId};

/// Title and tag constraints applied to the note list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Case-insensitive substring; empty matches every title.
    pub title: String,
    /// Every listed tag must be present on the note.
    pub tag_ids: Vec<TagId>,
}

impl NoteFilter {
    #[must_use]
    pub fn new(title: impl Into<String>, tag_ids: Vec<TagId>) -> Self {
        Self {
            title: title.into(),
            tag_ids,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.tag_ids.is_empty()
    }

    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        let title_matches = self.title.is_empty()
            || note
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase());
        title_matches && self.tag_ids.iter().all(|id| note.has_tag(id))
    }
}

/// Keep the notes matching `filter`, in their original order.
#[must_use]
pub fn filter_notes(notes: &[Note], filter: &NoteFilter) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| filter.matches(note))
        .cloned()
        .collect()
}
