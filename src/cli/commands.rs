use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::parsers::{Recovery, Strategy, recover_commits};
use crate::render::{RenderOptions, render_changelog};
use crate::source::fetch_document;

#[derive(Parser)]
#[command(name = "changelog-viewer")]
#[command(version = "0.1.0")]
#[command(about = "Render a commit changelog from a JSON document", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the changelog list
    Show {
        /// Path to the commits JSON document
        #[arg(default_value = "commits.json")]
        path: PathBuf,
        /// Show the changed-file list under each commit
        #[arg(long)]
        files: bool,
    },
    /// Show statistics about a changelog document
    Stats {
        /// Path to the commits JSON document
        #[arg(default_value = "commits.json")]
        path: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Show { path, files }) => {
            show_changelog(path, *files)?;
        }
        Some(Commands::Stats { path }) => {
            show_stats(path)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Fetch and recover a document, warning on stderr when a fallback tier
/// had to kick in so operators can see the document needs fixing.
fn load_document(path: &Path) -> Result<Recovery> {
    let raw = fetch_document(path)
        .with_context(|| format!("Failed to fetch changelog document: {}", path.display()))?;

    let recovery = recover_commits(&raw)
        .with_context(|| format!("Failed to parse changelog document: {}", path.display()))?;

    if recovery.strategy != Strategy::Strict {
        eprintln!(
            "Warning: {} is not well-formed JSON; recovered {} commits via {}",
            path.display(),
            recovery.records.len(),
            recovery.strategy.describe()
        );
    }

    Ok(recovery)
}

fn show_changelog(path: &Path, show_files: bool) -> Result<()> {
    let recovery = load_document(path)?;
    print!("{}", render_changelog(&recovery.records, &RenderOptions { show_files }));
    Ok(())
}

fn show_stats(path: &Path) -> Result<()> {
    let recovery = load_document(path)?;
    let records = &recovery.records;

    let with_message = records.iter().filter(|r| r.message.is_some()).count();
    let with_author = records.iter().filter(|r| r.author.is_some()).count();
    let with_date = records.iter().filter(|r| r.date.is_some()).count();
    let with_files = records.iter().filter(|r| r.files.is_some()).count();

    println!("Changelog Statistics");
    println!("================================");
    println!("Total commits: {}", records.len());
    println!("  With message: {}", with_message);
    println!("  With author: {}", with_author);
    println!("  With date: {}", with_date);
    println!("  With file list: {}", with_files);
    println!();
    println!("Recovery strategy: {}", recovery.strategy.describe());

    Ok(())
}
