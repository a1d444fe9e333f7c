use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] jotter_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note title cannot be empty")]
    EmptyTitle,
    #[error("No note body provided")]
    EmptyContent,
    #[error("Edited note body cannot be empty")]
    EmptyEditedContent,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Tag label cannot be empty")]
    EmptyTagLabel,
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("Tag not found for id/prefix/label: {0}")]
    TagNotFound(String),
    #[error("{0}")]
    AmbiguousId(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
}
