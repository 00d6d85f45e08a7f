use std::io::{self, Write};

use crate::cli::print_not_found;
use crate::cli::report::format_report;
use crate::error::Result;
use crate::index::IdentifierCache;
use crate::loader::{self, TableCache, CACHE_TTL};
use crate::reports;
use crate::settings::load_settings;

/// Interactive lookup loop. The table stays cached in memory for the
/// session (1 h TTL) and the identifier list is memoized per table.
pub fn run(url: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let mut tables = TableCache::new(CACHE_TTL);
    let mut ids = IdentifierCache::new();

    println!("Enter an account id, or a prefix to see suggestions. Blank line exits.");
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            break;
        }

        let table = tables.get_or_load(|| loader::load(&settings, url, false))?;
        match reports::build_report(&table, query) {
            Some(report) => println!("{}", format_report(&report)),
            None => print_not_found(&ids.get_or_build(&table), query),
        }
    }
    Ok(())
}
