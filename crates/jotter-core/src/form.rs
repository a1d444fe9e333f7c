//! Note form submission flow.
//!
//! A form collects a draft (title, body, selected tags, staged files). On
//! submit the staged files are encoded first; only once every attachment is
//! stored is the note created or updated. Progress is published on a
//! `tokio::sync::watch` channel:
//!
//! `Idle -> FilesStaged -> Encoding { pending } -> AllEncoded -> Persisted`
//!
//! with `Failed` reachable from any step after submit.

use std::sync::Arc;

use tokio::sync::watch;

use crate::media::{AttachmentEncoder, FileReader, StagedFile};
use crate::models::{AttachmentKey, NoteData, NoteId, Tag};
use crate::routes::Route;
use crate::services::Notebook;
use crate::{Error, Result};

/// Whether the form creates a note or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Edit(NoteId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteDraft {
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
    pub files: Vec<StagedFile>,
}

impl NoteDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Title and body are both required.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("Note title cannot be empty".to_string()));
        }
        if self.markdown.trim().is_empty() {
            return Err(Error::InvalidInput("Note body cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    FilesStaged { count: usize },
    Encoding { pending: usize },
    AllEncoded { keys: Vec<AttachmentKey> },
    Persisted { note_id: NoteId },
    Failed { reason: String },
}

/// Outcome of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub note_id: NoteId,
    /// Where the front end should navigate next.
    pub next: Route,
}

pub struct NoteForm {
    target: FormTarget,
    draft: NoteDraft,
    state: watch::Sender<SubmissionState>,
}

impl NoteForm {
    #[must_use]
    pub fn new(target: FormTarget, draft: NoteDraft) -> Self {
        let initial = staged_state(draft.files.len());
        let (state, _) = watch::channel(initial);
        Self {
            target,
            draft,
            state,
        }
    }

    #[must_use]
    pub const fn target(&self) -> &FormTarget {
        &self.target
    }

    #[must_use]
    pub const fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Follow state changes, e.g. to render a progress indicator.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn stage_files(&mut self, files: Vec<StagedFile>) {
        self.draft.files.extend(files);
        self.state.send_replace(staged_state(self.draft.files.len()));
    }

    /// Encode staged files, then create or update the note.
    ///
    /// With no staged files the note is saved without new attachments, so an
    /// edit keeps its existing list. A failed encoding saves nothing.
    pub async fn submit<R: FileReader>(
        &mut self,
        notebook: &mut Notebook,
        encoder: &AttachmentEncoder<R>,
    ) -> Result<Submission> {
        match self.try_submit(notebook, encoder).await {
            Ok(submission) => {
                self.state.send_replace(SubmissionState::Persisted {
                    note_id: submission.note_id.clone(),
                });
                Ok(submission)
            }
            Err(error) => {
                self.state.send_replace(SubmissionState::Failed {
                    reason: error.to_string(),
                });
                Err(error)
            }
        }
    }

    async fn try_submit<R: FileReader>(
        &self,
        notebook: &mut Notebook,
        encoder: &AttachmentEncoder<R>,
    ) -> Result<Submission> {
        self.draft.validate()?;
        if let FormTarget::Edit(id) = &self.target {
            if notebook.note(id).is_none() {
                return Err(Error::NotFound(format!("note {id}")));
            }
        }

        let attachments = if self.draft.files.is_empty() {
            None
        } else {
            let store = Arc::clone(notebook.store());
            let keys = encoder
                .encode_with_progress(store.as_ref(), self.draft.files.clone(), |pending| {
                    self.state.send_replace(SubmissionState::Encoding { pending });
                })
                .await?;
            self.state
                .send_replace(SubmissionState::AllEncoded { keys: keys.clone() });
            Some(keys)
        };

        let data = NoteData {
            title: self.draft.title.trim().to_string(),
            markdown: self.draft.markdown.clone(),
            tags: self.draft.tags.clone(),
            attachments,
        };

        match &self.target {
            FormTarget::Create => {
                let note_id = notebook.create_note(data)?;
                Ok(Submission {
                    note_id,
                    next: Route::List,
                })
            }
            FormTarget::Edit(id) => {
                notebook.update_note(id, data)?;
                Ok(Submission {
                    note_id: id.clone(),
                    next: Route::Show(id.clone()),
                })
            }
        }
    }
}

const fn staged_state(count: usize) -> SubmissionState {
    if count == 0 {
        SubmissionState::Idle
    } else {
        SubmissionState::FilesStaged { count }
    }
}
