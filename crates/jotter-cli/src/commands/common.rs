use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jotter_core::config::{load_config, resolve_storage_dir, STORAGE_DIR_ENV};
use jotter_core::media::{resolve_gallery, AttachmentEncoder, StagedFile};
use jotter_core::{FileStore, KeyValueStore, Note, NoteId, Notebook, Tag, TagId};
use serde::Serialize;

use crate::error::CliError;

const SHORT_ID_LEN: usize = 13;

/// Where the notebook lives and how long attachment reads may take.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub storage_dir: PathBuf,
    pub read_timeout: Duration,
}

impl Workspace {
    /// Resolve the workspace from the CLI flag, environment and config file.
    pub fn resolve(cli_storage_dir: Option<PathBuf>) -> Self {
        let config = load_config();
        let env_value = env::var(STORAGE_DIR_ENV).ok();
        let storage_dir = resolve_storage_dir(cli_storage_dir, env_value, &config);
        tracing::debug!("Using storage directory {}", storage_dir.display());
        Self {
            storage_dir,
            read_timeout: config.attachment_read_timeout(),
        }
    }

    pub fn open_notebook(&self) -> Result<Notebook, CliError> {
        let store = FileStore::open(&self.storage_dir)?;
        Ok(Notebook::open(Arc::new(store))?)
    }

    pub fn encoder(&self) -> AttachmentEncoder {
        AttachmentEncoder::new().read_timeout(self.read_timeout)
    }
}

/// Title, body, tag labels and files collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct NoteInput {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Vec<String>,
    pub attachments: Vec<PathBuf>,
}

impl NoteInput {
    /// Nothing beyond the target note was given.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.tags.is_empty()
            && self.attachments.is_empty()
    }

    pub fn staged_files(&self) -> Vec<StagedFile> {
        self.attachments
            .iter()
            .map(|path| StagedFile::from_path(path.clone()))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub tags: Vec<String>,
    /// Attachments that resolve to a stored image.
    pub images: usize,
}

#[derive(Debug, Serialize)]
pub struct NoteDetail<'a> {
    #[serde(flatten)]
    pub note: &'a Note,
    pub images: Vec<String>,
}

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

/// Find a note by exact id, then by unique id prefix.
pub fn resolve_note(query: &str, notebook: &Notebook) -> Result<Note, CliError> {
    if let Some(note) = notebook.note(&NoteId::from(query)) {
        return Ok(note);
    }

    let mut matching = notebook
        .notes()
        .into_iter()
        .filter(|note| note.id.as_str().starts_with(query))
        .collect::<Vec<Note>>();

    match matching.len() {
        0 => Err(CliError::NoteNotFound(query.to_string())),
        1 => Ok(matching.remove(0)),
        _ => Err(ambiguous(
            query,
            matching.iter().map(|note| note.id.as_str()),
        )),
    }
}

/// Find a tag by exact id, then label, then unique id prefix.
pub fn resolve_tag(query: &str, notebook: &Notebook) -> Result<Tag, CliError> {
    if let Some(tag) = notebook.tag(&TagId::from(query)) {
        return Ok(tag.clone());
    }
    if let Some(tag) = notebook.tag_by_label(query) {
        return Ok(tag.clone());
    }

    let mut matching = notebook
        .tags()
        .iter()
        .filter(|tag| tag.id.as_str().starts_with(query))
        .cloned()
        .collect::<Vec<Tag>>();

    match matching.len() {
        0 => Err(CliError::TagNotFound(query.to_string())),
        1 => Ok(matching.remove(0)),
        _ => Err(ambiguous(query, matching.iter().map(|tag| tag.id.as_str()))),
    }
}

fn ambiguous<'a>(query: &str, ids: impl Iterator<Item = &'a str>) -> CliError {
    let options = ids.take(3).map(short_id).collect::<Vec<_>>().join(", ");
    CliError::AmbiguousId(format!(
        "ID prefix '{query}' is ambiguous; matches: {options}"
    ))
}

/// Map labels to tags, creating the ones that do not exist yet.
///
/// Blank labels are skipped and repeated labels collapse to one tag.
pub fn resolve_tag_labels(labels: &[String], notebook: &mut Notebook) -> Result<Vec<Tag>, CliError> {
    let mut tags: Vec<Tag> = Vec::new();

    for label in labels {
        let Some(label) = normalize_content(label) else {
            continue;
        };
        let tag = match notebook.tag_by_label(&label) {
            Some(tag) => tag.clone(),
            None => notebook.create_tag(&label)?,
        };
        if !tags.iter().any(|existing| existing.id == tag.id) {
            tags.push(tag);
        }
    }

    Ok(tags)
}

/// Map labels to existing tag ids; unknown labels are an error.
pub fn existing_tag_ids(labels: &[String], notebook: &Notebook) -> Result<Vec<TagId>, CliError> {
    labels
        .iter()
        .filter_map(|label| normalize_content(label))
        .map(|label| {
            notebook
                .tag_by_label(&label)
                .map(|tag| tag.id.clone())
                .ok_or(CliError::TagNotFound(label))
        })
        .collect()
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let short_id = short_id(note.id.as_str());
            let title = truncate_line(&note.title, 40);
            let tags = render_tags(note);

            if tags.is_empty() {
                format!("{short_id:<13}  {title}")
            } else {
                format!("{short_id:<13}  {title:<40}  {tags}")
            }
        })
        .collect()
}

pub fn format_tag_lines(tags: &[Tag]) -> Vec<String> {
    tags.iter()
        .map(|tag| format!("{:<13}  {}", short_id(tag.id.as_str()), tag.label))
        .collect()
}

pub fn note_to_list_item(note: &Note, store: &dyn KeyValueStore) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        tags: note.tags.iter().map(|tag| tag.label.clone()).collect(),
        images: resolve_gallery(store, note.attachment_keys()).len(),
    }
}

/// First non-empty line of the body, collapsed and truncated.
pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let first_line = note
        .markdown
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");
    truncate_line(first_line, max_chars)
}

fn truncate_line(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn render_tags(note: &Note) -> String {
    note.tags
        .iter()
        .map(|tag| format!("#{}", tag.label))
        .collect::<Vec<String>>()
        .join(" ")
}

/// `image/png, 1234 bytes encoded` summary of a stored data URI.
pub fn describe_data_uri(data_uri: &str) -> String {
    let mime_type = data_uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split([';', ',']).next())
        .unwrap_or("unknown");
    let payload_len = data_uri
        .split_once(',')
        .map_or(0, |(_, payload)| payload.len());
    format!("{mime_type}, {payload_len} bytes encoded")
}

/// Body from the command line, then piped stdin, then `$VISUAL`/`$EDITOR`.
pub fn resolve_note_body(body: Option<&str>) -> Result<String, CliError> {
    if let Some(content) = body.and_then(normalize_content) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = capture_editor_input_with_initial("")? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_identifier(id: &str) -> Result<String, CliError> {
    normalize_content(id).ok_or(CliError::EmptyNoteId)
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("jotter-note-{}-{now}.md", std::process::id()))
}
