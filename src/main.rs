mod cli;
mod error;
mod fmt;
mod index;
mod loader;
mod reports;
mod settings;
mod table;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let url = cli.url.as_deref();

    let result = match cli.command {
        Commands::Report { acct_id, refresh } => cli::report::run(url, &acct_id, refresh),
        Commands::Ids { prefix } => cli::ids::run(url, prefix.as_deref()),
        Commands::Search => cli::search::run(url),
        Commands::Refresh => cli::refresh::run(url),
        Commands::Status => cli::status::run(),
        Commands::Source { set } => cli::source::run(set.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
