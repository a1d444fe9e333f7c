//! Jotter CLI - tagged markdown notes from the command line
//!
//! Notes, tags and image attachments live in a local key-value store
//! directory shared with other Jotter front ends.

mod cli;
mod commands;
mod error;


use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::{normalize_content, NoteInput, Workspace};
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::list::run_list;
use crate::commands::new::run_new;
use crate::commands::prune::run_prune;
use crate::commands::show::run_show;
use crate::commands::tags::run_tags;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jotter=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let workspace = Workspace::resolve(cli.storage_dir);

    match cli.command {
        Some(Commands::New {
            title,
            tags,
            attachments,
            body,
        }) => {
            let input = NoteInput {
                title: Some(title),
                body: normalize_content(&body.join(" ")),
                tags,
                attachments,
            };
            run_new(&input, &workspace).await?;
        }
        Some(Commands::List { title, tags, json }) => {
            run_list(title.as_deref(), &tags, json, &workspace)?;
        }
        Some(Commands::Show { id, json }) => run_show(&id, json, &workspace)?,
        Some(Commands::Edit {
            id,
            title,
            body,
            tags,
            attachments,
        }) => {
            let input = NoteInput {
                title,
                body,
                tags,
                attachments,
            };
            run_edit(&id, &input, &workspace).await?;
        }
        Some(Commands::Delete { id }) => run_delete(&id, &workspace)?,
        Some(Commands::Tags { command }) => run_tags(command, &workspace)?,
        Some(Commands::Export { format, output }) => {
            run_export(format, output.as_deref(), &workspace)?;
        }
        Some(Commands::Prune { dry_run }) => {
            run_prune(dry_run, &workspace)?;
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}
