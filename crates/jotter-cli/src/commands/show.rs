use jotter_core::media::resolve_gallery;

use crate::commands::common::{
    describe_data_uri, normalize_identifier, render_tags, resolve_note, NoteDetail, Workspace,
};
use crate::error::CliError;

pub fn run_show(id: &str, as_json: bool, workspace: &Workspace) -> Result<(), CliError> {
    let normalized_id = normalize_identifier(id)?;
    let notebook = workspace.open_notebook()?;
    let note = resolve_note(&normalized_id, &notebook)?;
    let images = resolve_gallery(notebook.store().as_ref(), note.attachment_keys());

    if as_json {
        let detail = NoteDetail {
            note: &note,
            images,
        };
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!("{}", note.id);
    println!("# {}", note.title);
    let tags = render_tags(&note);
    if !tags.is_empty() {
        println!("{tags}");
    }
    for image in &images {
        println!("[image] {}", describe_data_uri(image));
    }
    println!();
    println!("{}", note.markdown);
    Ok(())
}
