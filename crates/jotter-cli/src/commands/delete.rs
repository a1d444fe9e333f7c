use crate::commands::common::{normalize_identifier, resolve_note, Workspace};
use crate::error::CliError;

pub fn run_delete(id: &str, workspace: &Workspace) -> Result<(), CliError> {
    let normalized_id = normalize_identifier(id)?;
    let mut notebook = workspace.open_notebook()?;
    let note = resolve_note(&normalized_id, &notebook)?;

    notebook.delete_note(&note.id)?;
    println!("{}", note.id);
    Ok(())
}
