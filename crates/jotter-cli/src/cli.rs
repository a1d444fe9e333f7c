use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "jotter")]
#[command(about = "Tagged markdown notes with image attachments")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the note store
    #[arg(long, global = true, value_name = "PATH")]
    pub storage_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "add")]
    New {
        /// Note title
        #[arg(short, long)]
        title: String,
        /// Tag label (created when missing); repeatable
        #[arg(long = "tag", value_name = "LABEL")]
        tags: Vec<String>,
        /// Image file to attach; repeatable
        #[arg(short, long = "attach", value_name = "PATH")]
        attachments: Vec<PathBuf>,
        /// Markdown body (stdin or $EDITOR when omitted)
        body: Vec<String>,
    },
    /// List notes
    List {
        /// Case-insensitive title filter
        #[arg(long)]
        title: Option<String>,
        /// Only notes carrying every given tag label
        #[arg(long = "tag", value_name = "LABEL")]
        tags: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a note with its tags and images
    Show {
        /// Note ID or unique ID prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing note
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New markdown body
        #[arg(short, long)]
        body: Option<String>,
        /// Replace tags with these labels; repeatable
        #[arg(long = "tag", value_name = "LABEL")]
        tags: Vec<String>,
        /// Replace attachments with these files; repeatable
        #[arg(short, long = "attach", value_name = "PATH")]
        attachments: Vec<PathBuf>,
    },
    /// Delete an existing note
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Manage tags
    Tags {
        #[command(subcommand)]
        command: Option<TagCommands>,
    },
    /// Export notes
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Remove stored attachments no note references
    Prune {
        /// Only list what would be removed
        #[arg(long)]
        dry_run: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// List tags
    List,
    /// Create a tag
    Add {
        /// Tag label
        label: String,
    },
    /// Rename a tag
    Rename {
        /// Tag ID, unique ID prefix or current label
        id: String,
        /// New label
        label: String,
    },
    /// Delete a tag (notes keep their tag ids)
    Delete {
        /// Tag ID, unique ID prefix or label
        id: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for jotter_core::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

impl From<CompletionShell> for clap_complete::Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Self::Bash,
            CompletionShell::Zsh => Self::Zsh,
            CompletionShell::Fish => Self::Fish,
            CompletionShell::PowerShell => Self::PowerShell,
        }
    }
}
