//! Notebook service: the note and tag collections over an injected store.

use std::collections::HashSet;
use std::sync::Arc;

use crate::collection;
use crate::models::{AttachmentKey, Note, NoteData, NoteId, RawNote, Tag, TagId};
use crate::persisted::Persisted;
use crate::search::{filter_notes, NoteFilter};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::Result;

/// Store key holding the JSON array of raw notes.
pub const NOTES_KEY: &str = "NOTES";
/// Store key holding the JSON array of tags.
pub const TAGS_KEY: &str = "TAGS";

/// Notes and tags persisted under [`NOTES_KEY`] and [`TAGS_KEY`].
///
/// Each mutation computes the next collection with the pure functions in
/// [`crate::collection`] and writes it through immediately.
pub struct Notebook {
    store: Arc<dyn KeyValueStore>,
    notes: Persisted<Vec<RawNote>>,
    tags: Persisted<Vec<Tag>>,
}

impl Notebook {
    /// Load both collections from `store`, defaulting each to empty.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let notes = Persisted::load_with(Arc::clone(&store), NOTES_KEY, Vec::new)?;
        let tags = Persisted::load_with(Arc::clone(&store), TAGS_KEY, Vec::new)?;
        tracing::debug!(
            notes = notes.get().len(),
            tags = tags.get().len(),
            "Opened notebook"
        );
        Ok(Self { store, notes, tags })
    }

    /// Open a notebook over a fresh in-memory store (primarily for tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::open(Arc::new(MemoryStore::new()))
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    #[must_use]
    pub fn raw_notes(&self) -> &[RawNote] {
        self.notes.get()
    }

    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        self.tags.get()
    }

    /// Every note joined with the current tags.
    #[must_use]
    pub fn notes(&self) -> Vec<Note> {
        collection::join_notes_with_tags(self.notes.get(), self.tags.get())
    }

    #[must_use]
    pub fn note(&self, id: &NoteId) -> Option<Note> {
        self.notes
            .get()
            .iter()
            .find(|note| &note.id == id)
            .map(|note| Note::from_raw(note, self.tags.get()))
    }

    #[must_use]
    pub fn filter_notes(&self, filter: &NoteFilter) -> Vec<Note> {
        filter_notes(&self.notes(), filter)
    }

    /// First tag whose label equals `label`, ignoring case and surrounding
    /// whitespace.
    #[must_use]
    pub fn tag_by_label(&self, label: &str) -> Option<&Tag> {
        let wanted = label.trim().to_lowercase();
        self.tags
            .get()
            .iter()
            .find(|tag| tag.label.trim().to_lowercase() == wanted)
    }

    #[must_use]
    pub fn tag(&self, id: &TagId) -> Option<&Tag> {
        self.tags.get().iter().find(|tag| &tag.id == id)
    }

    pub fn create_note(&mut self, data: NoteData) -> Result<NoteId> {
        let (next, id) = collection::create_note(self.notes.get(), data);
        self.notes.set(next)?;
        tracing::debug!(note_id = %id, "Created note");
        Ok(id)
    }

    pub fn update_note(&mut self, id: &NoteId, data: NoteData) -> Result<()> {
        self.notes
            .update(|notes| collection::update_note(notes, id, data))
    }

    pub fn delete_note(&mut self, id: &NoteId) -> Result<()> {
        self.notes.update(|notes| collection::delete_note(notes, id))
    }

    pub fn add_tag(&mut self, tag: Tag) -> Result<()> {
        self.tags.update(|tags| collection::add_tag(tags, tag))
    }

    /// Build a tag with a fresh id from `label` and add it.
    pub fn create_tag(&mut self, label: &str) -> Result<Tag> {
        let tag = Tag::new(label.trim());
        self.add_tag(tag.clone())?;
        Ok(tag)
    }

    pub fn update_tag_label(&mut self, id: &TagId, label: &str) -> Result<()> {
        self.tags
            .update(|tags| collection::update_tag_label(tags, id, label))
    }

    /// Remove a tag. Notes keep the stale id; the join hides it.
    pub fn delete_tag(&mut self, id: &TagId) -> Result<()> {
        self.tags.update(|tags| collection::delete_tag(tags, id))
    }

    /// Stored attachment slots that no note references any more.
    pub fn orphaned_attachment_keys(&self) -> Result<Vec<String>> {
        let referenced: HashSet<&str> = self
            .notes
            .get()
            .iter()
            .flat_map(RawNote::attachment_keys)
            .map(AttachmentKey::as_str)
            .collect();

        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter(|key| AttachmentKey::is_attachment_slot(key) && !referenced.contains(key.as_str()))
            .collect())
    }

    /// Delete orphaned attachment slots and return the removed keys.
    ///
    /// Never called implicitly by note or tag operations.
    pub fn prune_orphaned_attachments(&self) -> Result<Vec<String>> {
        let orphaned = self.orphaned_attachment_keys()?;
        for key in &orphaned {
            self.store.remove_item(key)?;
        }
        tracing::info!("Pruned {} orphaned attachment(s)", orphaned.len());
        Ok(orphaned)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::FileStore;

    fn shared_store() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn tag_and_note_scenario() {
        let mut notebook = Notebook::open_in_memory().unwrap();
        let work = Tag::with_id("t1", "work");
        notebook.add_tag(work.clone()).unwrap();

        let id = notebook
            .create_note(NoteData::new("A", "x", vec![work.clone()]))
            .unwrap();

        let raw = &notebook.raw_notes()[0];
        assert_eq!(raw.tag_ids, vec![TagId::from("t1")]);

        let joined = notebook.note(&id).unwrap();
        assert_eq!(joined.tags, vec![work]);
    }

    #[test]
    fn collections_persist_across_reopen() {
        let store = shared_store();
        let id = {
            let mut notebook = Notebook::open(Arc::clone(&store)).unwrap();
            let tag = notebook.create_tag("  home ").unwrap();
            assert_eq!(tag.label, "home");
            notebook
                .create_note(NoteData::new("Groceries", "- milk", vec![tag]))
                .unwrap()
        };

        let reopened = Notebook::open(store).unwrap();
        let note = reopened.note(&id).unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.tags[0].label, "home");
    }

    #[test]
    fn collections_persist_in_file_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = Arc::new(FileStore::open(dir.path()).unwrap());
            let mut notebook = Notebook::open(store).unwrap();
            notebook.create_note(NoteData::new("On disk", "body", vec![])).unwrap();
        }

        let store = Arc::new(FileStore::open(dir.path()).unwrap());
        let notebook = Notebook::open(store).unwrap();
        assert_eq!(notebook.raw_notes()[0].title, "On disk");
    }

    #[test]
    fn every_mutation_is_written_through() {
        let store = shared_store();
        let mut notebook = Notebook::open(Arc::clone(&store)).unwrap();
        assert_eq!(store.get_item(NOTES_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get_item(TAGS_KEY).unwrap().as_deref(), Some("[]"));

        notebook.add_tag(Tag::with_id("t1", "work")).unwrap();
        assert_eq!(
            store.get_item(TAGS_KEY).unwrap().as_deref(),
            Some(r#"[{"id":"t1","label":"work"}]"#)
        );

        notebook.update_tag_label(&"t1".into(), "office").unwrap();
        assert_eq!(
            store.get_item(TAGS_KEY).unwrap().as_deref(),
            Some(r#"[{"id":"t1","label":"office"}]"#)
        );
    }

    #[test]
    fn update_missing_note_leaves_slot_unchanged() {
        let store = shared_store();
        let mut notebook = Notebook::open(Arc::clone(&store)).unwrap();
        notebook.create_note(NoteData::new("A", "x", vec![])).unwrap();
        let before = store.get_item(NOTES_KEY).unwrap();

        notebook
            .update_note(&"missing-id".into(), NoteData::new("B", "y", vec![]))
            .unwrap();
        assert_eq!(store.get_item(NOTES_KEY).unwrap(), before);
    }

    #[test]
    fn delete_tag_keeps_note_references() {
        let mut notebook = Notebook::open_in_memory().unwrap();
        let tag = notebook.create_tag("work").unwrap();
        let id = notebook
            .create_note(NoteData::new("A", "x", vec![tag.clone()]))
            .unwrap();

        notebook.delete_tag(&tag.id).unwrap();

        assert!(notebook.tags().is_empty());
        assert_eq!(notebook.raw_notes()[0].tag_ids, vec![tag.id]);
        assert!(notebook.note(&id).unwrap().tags.is_empty());
    }

    #[test]
    fn malformed_notes_slot_recovers_to_empty() {
        let store = shared_store();
        store.set_item(NOTES_KEY, "not json at all").unwrap();
        store.set_item(TAGS_KEY, r#"[{"id":"t1","label":"kept"}]"#).unwrap();

        let notebook = Notebook::open(store).unwrap();
        assert!(notebook.raw_notes().is_empty());
        assert_eq!(notebook.tags()[0].label, "kept");
    }

    #[test]
    fn filter_and_label_lookup() {
        let mut notebook = Notebook::open_in_memory().unwrap();
        let work = notebook.create_tag("Work").unwrap();
        notebook
            .create_note(NoteData::new("Standup", "", vec![work.clone()]))
            .unwrap();
        notebook.create_note(NoteData::new("Standing desk", "", vec![])).unwrap();

        assert_eq!(notebook.tag_by_label("work").map(|tag| &tag.id), Some(&work.id));
        assert!(notebook.tag_by_label("play").is_none());

        let filter = NoteFilter::new("stand", vec![work.id]);
        let found = notebook.filter_notes(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Standup");
    }

    #[test]
    fn orphaned_attachments_are_listed_and_pruned_on_request() {
        let store = shared_store();
        let mut notebook = Notebook::open(Arc::clone(&store)).unwrap();
        store.set_item("image-kept", "data:image/png;base64,AA==").unwrap();
        store.set_item("image-orphan", "data:image/png;base64,AA==").unwrap();
        let id = notebook
            .create_note(NoteData::new("A", "x", vec![]).with_attachments(vec!["image-kept".into()]))
            .unwrap();

        assert_eq!(notebook.orphaned_attachment_keys().unwrap(), vec!["image-orphan"]);

        notebook.delete_note(&id).unwrap();
        assert_eq!(
            store.get_item("image-kept").unwrap().as_deref(),
            Some("data:image/png;base64,AA==")
        );

        let pruned = notebook.prune_orphaned_attachments().unwrap();
        assert_eq!(pruned, vec!["image-kept", "image-orphan"]);
        assert_eq!(store.get_item("image-kept").unwrap(), None);
        assert_eq!(store.get_item(NOTES_KEY).unwrap().as_deref(), Some("[]"));
    }
}
