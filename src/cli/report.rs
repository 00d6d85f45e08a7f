use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::print_not_found;
use crate::error::Result;
use crate::index;
use crate::loader;
use crate::reports::{self, Report};
use crate::settings::load_settings;

pub fn run(url: Option<&str>, acct_id: &str, refresh: bool) -> Result<()> {
    let settings = load_settings();
    let table = loader::load(&settings, url, refresh)?;
    match reports::build_report(&table, acct_id) {
        Some(report) => println!("{}", format_report(&report)),
        None => {
            let ids = index::list_identifiers(&table);
            print_not_found(&ids, acct_id);
        }
    }
    Ok(())
}

/// Render a report as one table with bold section header rows.
pub fn format_report(report: &Report) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    let mut first = true;
    for section in &report.sections {
        if !first {
            table.add_row(vec![Cell::new(""), Cell::new("")]);
        }
        first = false;
        table.add_row(vec![Cell::new(section.title.green().bold()), Cell::new("")]);
        for (field, value) in &section.fields {
            table.add_row(vec![Cell::new(format!("  {field}")), Cell::new(value)]);
        }
    }
    table.to_string()
}
