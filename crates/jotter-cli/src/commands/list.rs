use jotter_core::search::NoteFilter;

use crate::commands::common::{
    existing_tag_ids, format_note_lines, note_to_list_item, NoteListItem, Workspace,
};
use crate::error::CliError;

pub fn run_list(
    title: Option<&str>,
    tags: &[String],
    as_json: bool,
    workspace: &Workspace,
) -> Result<(), CliError> {
    let notebook = workspace.open_notebook()?;
    let filter = NoteFilter::new(title.unwrap_or_default().trim(), existing_tag_ids(tags, &notebook)?);
    let notes = notebook.filter_notes(&filter);

    if as_json {
        let json_items = notes
            .iter()
            .map(|note| note_to_list_item(note, notebook.store().as_ref()))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}
