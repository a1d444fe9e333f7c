use crate::cli::TagCommands;
use crate::commands::common::{
    format_tag_lines, normalize_content, normalize_identifier, resolve_tag, Workspace,
};
use crate::error::CliError;

pub fn run_tags(command: Option<TagCommands>, workspace: &Workspace) -> Result<(), CliError> {
    let mut notebook = workspace.open_notebook()?;

    match command.unwrap_or(TagCommands::List) {
        TagCommands::List => {
            for line in format_tag_lines(notebook.tags()) {
                println!("{line}");
            }
        }
        TagCommands::Add { label } => {
            let label = normalize_content(&label).ok_or(CliError::EmptyTagLabel)?;
            let tag = match notebook.tag_by_label(&label) {
                Some(existing) => existing.clone(),
                None => notebook.create_tag(&label)?,
            };
            println!("{}", tag.id);
        }
        TagCommands::Rename { id, label } => {
            let label = normalize_content(&label).ok_or(CliError::EmptyTagLabel)?;
            let tag = resolve_tag(&normalize_identifier(&id)?, &notebook)?;
            notebook.update_tag_label(&tag.id, &label)?;
            println!("{}", tag.id);
        }
        TagCommands::Delete { id } => {
            let tag = resolve_tag(&normalize_identifier(&id)?, &notebook)?;
            notebook.delete_tag(&tag.id)?;
            println!("{}", tag.id);
        }
    }

    Ok(())
}
