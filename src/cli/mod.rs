pub mod ids;
pub mod refresh;
pub mod report;
pub mod search;
pub mod source;
pub mod status;

use clap::{Parser, Subcommand};
use colored::Colorize;

pub(crate) const MAX_SUGGESTIONS: usize = 10;

/// Shared not-found handling: a yellow notice plus any prefix suggestions.
pub(crate) fn print_not_found(ids: &[String], query: &str) {
    let matches = crate::index::suggest(ids, query);
    if matches.is_empty() {
        println!(
            "{}",
            format!("No consumer found with account id '{query}'.").yellow()
        );
        return;
    }
    println!("No exact match for '{query}'. Suggestions:");
    for id in matches.iter().take(MAX_SUGGESTIONS) {
        println!("  {id}");
    }
    if matches.len() > MAX_SUGGESTIONS {
        println!("  ... and {} more", matches.len() - MAX_SUGGESTIONS);
    }
}

#[derive(Parser)]
#[command(
    name = "gridlook",
    about = "Consumer search-and-report CLI for utility billing spreadsheets."
)]
pub struct Cli {
    /// Override the workbook source URL for this invocation
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up one consumer and print the sectioned report.
    Report {
        /// Account identifier (ACCT_ID) to look up
        acct_id: String,
        /// Re-download the workbook even if the cache is fresh
        #[arg(long)]
        refresh: bool,
    },
    /// List account identifiers.
    Ids {
        /// Only identifiers starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Search interactively with prefix suggestions.
    Search,
    /// Force a fresh download of the workbook.
    Refresh,
    /// Show source, cache and table status.
    Status,
    /// Show or persist the workbook source URL.
    Source {
        /// New source URL to save in settings
        #[arg(long)]
        set: Option<String>,
    },
}
