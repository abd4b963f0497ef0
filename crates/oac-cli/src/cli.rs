use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "oac",
    about = "OpenAPI changelog generator",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a human-readable changelog between two documents
    Changelog(ChangelogArgs),
    /// Emit the change set between two documents as JSON
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct ChangelogArgs {
    /// Old document (JSON or YAML)
    pub old: PathBuf,
    /// New document (JSON or YAML)
    pub new: PathBuf,
    /// Include a detail block under each change
    #[arg(short, long)]
    pub detailed: bool,
    /// Wrap output lines at this column
    #[arg(long, value_name = "COLS")]
    pub print_width: Option<usize>,
    /// Omit changes with this kind tag (repeatable)
    #[arg(long, value_name = "TAG")]
    pub exclude: Vec<String>,
    /// TOML file overriding headings, bullets, and indentation
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,
    /// Write the changelog to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Old document (JSON or YAML)
    pub old: PathBuf,
    /// New document (JSON or YAML)
    pub new: PathBuf,
    /// Write the change set to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
