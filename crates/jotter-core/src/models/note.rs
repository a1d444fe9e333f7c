//! Note models: the persisted record and the tag-joined view

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::attachment::AttachmentKey;
use super::tag::{Tag, TagId};

/// A unique identifier for a note
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A note as persisted under the `NOTES` key.
///
/// `tag_ids` has set semantics and may hold ids of tags that were deleted
/// since; those are dropped when the note is joined with the tag collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNote {
    pub id: NoteId,
    pub title: String,
    pub markdown: String,
    pub tag_ids: Vec<TagId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentKey>>,
}

impl RawNote {
    /// Attachment keys in display order; empty when the list was never set.
    #[must_use]
    pub fn attachment_keys(&self) -> &[AttachmentKey] {
        self.attachments.as_deref().unwrap_or_default()
    }
}

/// Payload produced by the note form for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteData {
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
    /// `None` means "no new attachments supplied".
    pub attachments: Option<Vec<AttachmentKey>>,
}

impl NoteData {
    #[must_use]
    pub fn new(title: impl Into<String>, markdown: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
            tags,
            attachments: None,
        }
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<AttachmentKey>) -> Self {
        self.attachments = Some(attachments);
        self
    }
}

/// A note joined with its resolved tags, derived on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentKey>>,
}

impl Note {
    /// Resolve a raw note against the tag collection.
    ///
    /// Tags come out in collection order; ids with no matching tag are
    /// skipped.
    #[must_use]
    pub fn from_raw(raw: &RawNote, tags: &[Tag]) -> Self {
        Self {
            id: raw.id.clone(),
            title: raw.title.clone(),
            markdown: raw.markdown.clone(),
            tags: tags
                .iter()
                .filter(|tag| raw.tag_ids.contains(&tag.id))
                .cloned()
                .collect(),
            attachments: raw.attachments.clone(),
        }
    }

    #[must_use]
    pub fn attachment_keys(&self) -> &[AttachmentKey] {
        self.attachments.as_deref().unwrap_or_default()
    }

    /// Whether the note carries a tag with this id.
    #[must_use]
    pub fn has_tag(&self, id: &TagId) -> bool {
        self.tags.iter().any(|tag| &tag.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(tag_ids: &[&str]) -> RawNote {
        RawNote {
            id: "n1".into(),
            title: "A".to_string(),
            markdown: "x".to_string(),
            tag_ids: tag_ids.iter().map(|id| TagId::from(*id)).collect(),
            attachments: None,
        }
    }

    #[test]
    fn test_note_id_unique() {
        assert_ne!(NoteId::new(), NoteId::new());
    }

    #[test]
    fn test_raw_note_uses_camel_case_fields() {
        let note = RawNote {
            attachments: Some(vec!["image-1".into()]),
            ..raw(&["t1"])
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "n1",
                "title": "A",
                "markdown": "x",
                "tagIds": ["t1"],
                "attachments": ["image-1"],
            })
        );
    }

    #[test]
    fn test_raw_note_without_attachments_field_parses() {
        let note: RawNote =
            serde_json::from_str(r#"{"id":"n1","title":"A","markdown":"x","tagIds":[]}"#).unwrap();
        assert_eq!(note.attachments, None);
        assert!(note.attachment_keys().is_empty());
    }

    #[test]
    fn test_from_raw_follows_tag_collection_order() {
        let tags = vec![
            Tag::with_id("t2", "second"),
            Tag::with_id("t1", "first"),
            Tag::with_id("t3", "unused"),
        ];
        let note = Note::from_raw(&raw(&["t1", "t2"]), &tags);
        let labels: Vec<&str> = note.tags.iter().map(|tag| tag.label.as_str()).collect();
        assert_eq!(labels, vec!["second", "first"]);
    }

    #[test]
    fn test_from_raw_drops_stale_ids() {
        let tags = vec![Tag::with_id("t1", "work")];
        let note = Note::from_raw(&raw(&["t1", "gone"]), &tags);
        assert_eq!(note.tags, vec![Tag::with_id("t1", "work")]);
        assert!(note.has_tag(&"t1".into()));
        assert!(!note.has_tag(&"gone".into()));
    }
}
