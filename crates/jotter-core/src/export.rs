//! Note export helpers shared by front ends.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::Note;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable note representation with tag labels instead of ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNote {
    pub id: String,
    pub title: String,
    pub markdown: String,
    pub tags: Vec<String>,
    pub attachments: Vec<String>,
}

#[must_use]
pub fn note_to_export_item(note: &Note) -> ExportNote {
    ExportNote {
        id: note.id.to_string(),
        title: note.title.clone(),
        markdown: note.markdown.clone(),
        tags: note.tags.iter().map(|tag| tag.label.clone()).collect(),
        attachments: note
            .attachment_keys()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

/// Render notes as pretty-printed JSON.
pub fn render_json_export(notes: &[Note]) -> serde_json::Result<String> {
    let items = notes
        .iter()
        .map(note_to_export_item)
        .collect::<Vec<ExportNote>>();
    serde_json::to_string_pretty(&items)
}

/// Render notes in Markdown, one front-matter block per note.
#[must_use]
pub fn render_markdown_export(notes: &[Note]) -> String {
    let mut output = String::new();

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let export_note = note_to_export_item(note);
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", export_note.id);
        let _ = writeln!(output, "tags:");
        for tag in export_note.tags {
            let _ = writeln!(output, "  - {tag}");
        }
        if !export_note.attachments.is_empty() {
            let _ = writeln!(output, "attachments:");
            for key in export_note.attachments {
                let _ = writeln!(output, "  - {key}");
            }
        }
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        let _ = writeln!(output, "# {}", export_note.title);
        let _ = writeln!(output);
        output.push_str(&export_note.markdown);
        output.push('\n');
    }

    output
}

/// Render notes based on selected export format.
pub fn render_notes_export(notes: &[Note], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => Ok(render_markdown_export(notes)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("jotter-export-{timestamp_ms}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    fn sample() -> Note {
        Note {
            id: "n1".into(),
            title: "Weekly review".to_string(),
            markdown: "- shipped\n- planned".to_string(),
            tags: vec![Tag::with_id("t1", "work"), Tag::with_id("t2", "review")],
            attachments: Some(vec!["image-1".into()]),
        }
    }

    #[test]
    fn export_item_uses_labels() {
        let export = note_to_export_item(&sample());
        assert_eq!(export.tags, vec!["work", "review"]);
        assert_eq!(export.attachments, vec!["image-1"]);
    }

    #[test]
    fn render_markdown_export_includes_frontmatter_and_content() {
        let rendered = render_markdown_export(&[sample()]);
        assert!(rendered.contains("id: n1"));
        assert!(rendered.contains("tags:\n  - work\n  - review"));
        assert!(rendered.contains("attachments:\n  - image-1"));
        assert!(rendered.contains("# Weekly review\n\n- shipped\n- planned\n"));
    }

    #[test]
    fn render_json_export_is_an_array() {
        let rendered = render_notes_export(&[sample()], ExportFormat::Json).unwrap();
        let parsed: Vec<ExportNote> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0].title, "Weekly review");
    }

    #[test]
    fn suggested_export_file_name_uses_format_extension() {
        assert_eq!(
            suggested_export_file_name(ExportFormat::Json, 123),
            "jotter-export-123.json"
        );
        assert_eq!(
            suggested_export_file_name(ExportFormat::Markdown, 456),
            "jotter-export-456.md"
        );
    }
}
