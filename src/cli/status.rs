use crate::error::Result;
use crate::fmt::{format_age, format_bytes};
use crate::index;
use crate::loader;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let path = loader::workbook_cache_path(&settings);

    println!("Source URL: {}", settings.source_url);
    println!("Cache file: {}", path.display());

    if path.exists() {
        let size = std::fs::metadata(&path)?.len();
        println!("Cache size: {}", format_bytes(size));
        if let Some(age) = loader::cache_file_age(&path) {
            let state = if age < loader::CACHE_TTL { "fresh" } else { "expired" };
            println!("Cache age:  {} ({state})", format_age(age));
        }

        match loader::parse_workbook(&std::fs::read(&path)?) {
            Ok(table) => {
                println!();
                println!("Rows:        {}", table.len());
                println!("Columns:     {}", table.columns().len());
                println!("Account ids: {}", index::list_identifiers(&table).len());
            }
            Err(e) => {
                println!();
                println!("Cached workbook unreadable: {e}");
            }
        }
    } else {
        println!();
        println!("No cached workbook. Run `gridlook refresh` to download one.");
    }

    Ok(())
}
