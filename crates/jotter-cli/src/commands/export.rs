use std::path::{Path, PathBuf};

use chrono::Utc;
use jotter_core::export::{render_notes_export, suggested_export_file_name};

use crate::cli::ExportFormat;
use crate::commands::common::Workspace;
use crate::error::CliError;

pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    workspace: &Workspace,
) -> Result<(), CliError> {
    let notebook = workspace.open_notebook()?;
    let rendered = render_notes_export(&notebook.notes(), format.into())?;

    if let Some(path) = output_path {
        let path = export_target(format, path);
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// A directory target gets a timestamped file name inside it.
fn export_target(format: ExportFormat, path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_export_file_name(
            format.into(),
            Utc::now().timestamp_millis(),
        ))
    } else {
        path.to_path_buf()
    }
}
