use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use oac_changelog::{FormatOptions, Template};
use oac_ir::DocumentIr;
use oac_model::Document;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Changelog(args) => cmd_changelog(args),
        Command::Diff(args) => cmd_diff(args),
    }
}

fn cmd_changelog(args: ChangelogArgs) -> anyhow::Result<()> {
    let (old_ir, new_ir) = load_pair(&args.old, &args.new)?;
    let set = oac_diff::diff(&old_ir, &new_ir);
    debug!(
        breaking = set.breaking.len(),
        non_breaking = set.non_breaking.len(),
        "computed change set"
    );

    let template = match &args.template {
        Some(path) => Some(Template::from_path(path)?),
        None => None,
    };
    let options = FormatOptions {
        detailed: args.detailed,
        print_width: args.print_width,
        exclude: args.exclude,
        template,
    };
    let changelog = oac_changelog::format(&old_ir, &new_ir, &set, &options);

    match &args.output {
        Some(path) => {
            fs::write(path, changelog + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} Wrote changelog to {}",
                "✓".green(),
                path.display().to_string().bold()
            );
        }
        None => println!("{changelog}"),
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let (old_ir, new_ir) = load_pair(&args.old, &args.new)?;
    let set = oac_diff::diff(&old_ir, &new_ir);
    let json = serde_json::to_string_pretty(&set)?;

    match &args.output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} Wrote change set to {}",
                "✓".green(),
                path.display().to_string().bold()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn load_pair(old: &Path, new: &Path) -> anyhow::Result<(DocumentIr, DocumentIr)> {
    let old_doc =
        Document::from_path(old).with_context(|| format!("failed to load {}", old.display()))?;
    let new_doc =
        Document::from_path(new).with_context(|| format!("failed to load {}", new.display()))?;
    Ok((oac_ir::extract(&old_doc), oac_ir::extract(&new_doc)))
}
