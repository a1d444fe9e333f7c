use jotter_core::form::{FormTarget, NoteDraft, NoteForm};
use jotter_core::NoteId;

use crate::commands::common::{
    normalize_content, resolve_note_body, resolve_tag_labels, NoteInput, Workspace,
};
use crate::error::CliError;

pub async fn run_new(input: &NoteInput, workspace: &Workspace) -> Result<NoteId, CliError> {
    let title = input
        .title
        .as_deref()
        .and_then(normalize_content)
        .ok_or(CliError::EmptyTitle)?;
    let body = resolve_note_body(input.body.as_deref())?;

    let mut notebook = workspace.open_notebook()?;
    let tags = resolve_tag_labels(&input.tags, &mut notebook)?;

    let mut form = NoteForm::new(
        FormTarget::Create,
        NoteDraft::new(title, body).with_tags(tags),
    );
    form.stage_files(input.staged_files());
    let submission = form.submit(&mut notebook, &workspace.encoder()).await?;

    println!("{}", submission.note_id);
    Ok(submission.note_id)
}
