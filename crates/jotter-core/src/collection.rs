//! Pure note and tag collection operations.
//!
//! Every function takes the prior collection and returns a new one; nothing
//! is mutated in place. Lookup misses are no-ops. Persistence lives in
//! [`crate::services::Notebook`].

use crate::models::{Note, NoteData, NoteId, RawNote, Tag, TagId};

/// Append a note built from `data` under a fresh id.
///
/// Tags are reduced to their ids; a missing attachment list is stored as
/// empty.
#[must_use]
pub fn create_note(notes: &[RawNote], data: NoteData) -> (Vec<RawNote>, NoteId) {
    let NoteData {
        title,
        markdown,
        tags,
        attachments,
    } = data;
    let id = NoteId::new();

    let mut next = notes.to_vec();
    next.push(RawNote {
        id: id.clone(),
        title,
        markdown,
        tag_ids: tags.into_iter().map(|tag| tag.id).collect(),
        attachments: Some(attachments.unwrap_or_default()),
    });
    (next, id)
}

/// Replace title, markdown and tag ids of the note with `id`.
///
/// The attachment list is replaced only when `data.attachments` is `Some`;
/// otherwise the existing list is kept as is.
#[must_use]
pub fn update_note(notes: &[RawNote], id: &NoteId, data: NoteData) -> Vec<RawNote> {
    let NoteData {
        title,
        markdown,
        tags,
        attachments,
    } = data;
    let tag_ids: Vec<TagId> = tags.into_iter().map(|tag| tag.id).collect();

    notes
        .iter()
        .map(|note| {
            if &note.id == id {
                RawNote {
                    id: note.id.clone(),
                    title: title.clone(),
                    markdown: markdown.clone(),
                    tag_ids: tag_ids.clone(),
                    attachments: attachments.clone().or_else(|| note.attachments.clone()),
                }
            } else {
                note.clone()
            }
        })
        .collect()
}

#[must_use]
pub fn delete_note(notes: &[RawNote], id: &NoteId) -> Vec<RawNote> {
    notes.iter().filter(|note| &note.id != id).cloned().collect()
}

/// Append a tag whose id was generated by the caller.
#[must_use]
pub fn add_tag(tags: &[Tag], tag: Tag) -> Vec<Tag> {
    let mut next = tags.to_vec();
    next.push(tag);
    next
}

#[must_use]
pub fn update_tag_label(tags: &[Tag], id: &TagId, label: &str) -> Vec<Tag> {
    tags.iter()
        .map(|tag| {
            if &tag.id == id {
                Tag {
                    id: tag.id.clone(),
                    label: label.to_string(),
                }
            } else {
                tag.clone()
            }
        })
        .collect()
}

/// Remove a tag. Notes keep the id in their `tag_ids`.
#[must_use]
pub fn delete_tag(tags: &[Tag], id: &TagId) -> Vec<Tag> {
    tags.iter().filter(|tag| &tag.id != id).cloned().collect()
}

/// Attach resolved tags to every note, in tag-collection order.
#[must_use]
pub fn join_notes_with_tags(notes: &[RawNote], tags: &[Tag]) -> Vec<Note> {
    notes.iter().map(|note| Note::from_raw(note, tags)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttachmentKey;
    use pretty_assertions::assert_eq;

    fn work() -> Tag {
        Tag::with_id("t1", "work")
    }

    fn keys(raw: &[&str]) -> Vec<AttachmentKey> {
        raw.iter().map(|key| AttachmentKey::from(*key)).collect()
    }

    fn seeded() -> (Vec<RawNote>, NoteId) {
        let data = NoteData::new("A", "x", vec![work()]).with_attachments(keys(&["image-1"]));
        create_note(&[], data)
    }

    #[test]
    fn create_note_maps_tags_to_ids() {
        let tags = add_tag(&[], work());
        let (notes, id) = create_note(&[], NoteData::new("A", "x", vec![work()]));

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, id);
        assert_eq!(notes[0].tag_ids, vec![TagId::from("t1")]);
        assert_eq!(notes[0].attachments, Some(Vec::new()));

        let joined = join_notes_with_tags(&notes, &tags);
        assert_eq!(joined[0].tags, vec![work()]);
    }

    #[test]
    fn create_note_appends_and_keeps_prior() {
        let (first, first_id) = seeded();
        let (second, second_id) = create_note(&first, NoteData::new("B", "y", vec![]));

        assert_ne!(first_id, second_id);
        assert_eq!(second.len(), 2);
        assert_eq!(second[0], first[0]);
        assert_eq!(second[1].title, "B");
    }

    #[test]
    fn update_without_attachments_preserves_list() {
        let (notes, id) = seeded();
        let updated = update_note(&notes, &id, NoteData::new("A2", "x2", vec![]));

        assert_eq!(updated[0].title, "A2");
        assert_eq!(updated[0].markdown, "x2");
        assert!(updated[0].tag_ids.is_empty());
        assert_eq!(updated[0].attachments, Some(keys(&["image-1"])));
    }

    #[test]
    fn update_with_attachments_replaces_list() {
        let (notes, id) = seeded();
        let data = NoteData::new("A", "x", vec![work()]).with_attachments(keys(&["image-2", "image-3"]));
        let updated = update_note(&notes, &id, data);
        assert_eq!(updated[0].attachments, Some(keys(&["image-2", "image-3"])));

        let cleared = update_note(&updated, &id, NoteData::new("A", "x", vec![]).with_attachments(vec![]));
        assert_eq!(cleared[0].attachments, Some(Vec::new()));
    }

    #[test]
    fn update_missing_id_changes_nothing() {
        let (notes, _) = seeded();
        let before = serde_json::to_string(&notes).unwrap();

        let updated = update_note(&notes, &"missing-id".into(), NoteData::new("Z", "z", vec![]));
        assert_eq!(serde_json::to_string(&updated).unwrap(), before);
    }

    #[test]
    fn update_only_touches_matching_note() {
        let (notes, id) = seeded();
        let (notes, other) = create_note(&notes, NoteData::new("B", "y", vec![]));
        let updated = update_note(&notes, &id, NoteData::new("A2", "x", vec![]));

        let untouched = updated.iter().find(|note| note.id == other).unwrap();
        assert_eq!(untouched.title, "B");
    }

    #[test]
    fn delete_note_removes_match_and_ignores_missing() {
        let (notes, id) = seeded();
        assert_eq!(delete_note(&notes, &"nope".into()), notes);
        assert!(delete_note(&notes, &id).is_empty());
    }

    #[test]
    fn update_tag_label_relabels_match_only() {
        let tags = add_tag(&add_tag(&[], work()), Tag::with_id("t2", "home"));
        let tags = update_tag_label(&tags, &"t1".into(), "office");
        assert_eq!(tags[0].label, "office");
        assert_eq!(tags[1].label, "home");
        assert_eq!(update_tag_label(&tags, &"t9".into(), "x"), tags);
    }

    #[test]
    fn delete_tag_leaves_orphan_ids_on_notes() {
        let (notes, _) = seeded();
        let tags = delete_tag(&[work()], &"t1".into());

        assert!(tags.is_empty());
        assert_eq!(notes[0].tag_ids, vec![TagId::from("t1")]);

        let joined = join_notes_with_tags(&notes, &tags);
        assert!(joined[0].tags.is_empty());
    }

    #[test]
    fn join_reflects_latest_labels() {
        let (notes, _) = seeded();
        let tags = update_tag_label(&[work()], &"t1".into(), "deep work");
        let joined = join_notes_with_tags(&notes, &tags);
        assert_eq!(joined[0].tags[0].label, "deep work");
    }
}
