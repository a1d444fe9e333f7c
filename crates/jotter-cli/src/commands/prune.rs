use crate::commands::common::Workspace;
use crate::error::CliError;

/// Remove attachment blobs no note references and print their keys.
pub fn run_prune(dry_run: bool, workspace: &Workspace) -> Result<Vec<String>, CliError> {
    let notebook = workspace.open_notebook()?;
    let keys = if dry_run {
        notebook.orphaned_attachment_keys()?
    } else {
        notebook.prune_orphaned_attachments()?
    };

    for key in &keys {
        println!("{key}");
    }
    Ok(keys)
}
