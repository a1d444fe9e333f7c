use jotter_core::form::{FormTarget, NoteDraft, NoteForm};
use jotter_core::NoteId;

use crate::commands::common::{
    capture_editor_input_with_initial, normalize_content, normalize_identifier, resolve_note,
    resolve_tag_labels, NoteInput, Workspace,
};
use crate::error::CliError;

/// Update a note. Tags and attachments are only replaced when given.
pub async fn run_edit(
    id: &str,
    input: &NoteInput,
    workspace: &Workspace,
) -> Result<NoteId, CliError> {
    let normalized_id = normalize_identifier(id)?;
    let mut notebook = workspace.open_notebook()?;
    let note = resolve_note(&normalized_id, &notebook)?;

    let (title, body) = if input.is_empty() {
        let Some(edited) = capture_editor_input_with_initial(&note.markdown)? else {
            return Err(CliError::EmptyEditedContent);
        };
        (note.title.clone(), edited)
    } else {
        let title = match input.title.as_deref() {
            Some(title) => normalize_content(title).ok_or(CliError::EmptyTitle)?,
            None => note.title.clone(),
        };
        let body = match input.body.as_deref() {
            Some(body) => normalize_content(body).ok_or(CliError::EmptyEditedContent)?,
            None => note.markdown.clone(),
        };
        (title, body)
    };

    let tags = if input.tags.is_empty() {
        note.tags.clone()
    } else {
        resolve_tag_labels(&input.tags, &mut notebook)?
    };

    let mut form = NoteForm::new(
        FormTarget::Edit(note.id.clone()),
        NoteDraft::new(title, body).with_tags(tags),
    );
    form.stage_files(input.staged_files());
    let submission = form.submit(&mut notebook, &workspace.encoder()).await?;

    println!("{}", submission.note_id);
    Ok(submission.note_id)
}
