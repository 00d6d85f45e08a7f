use crate::error::Result;
use crate::index;
use crate::loader;
use crate::settings::load_settings;

pub fn run(url: Option<&str>, prefix: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let table = loader::load(&settings, url, false)?;
    let ids = index::list_identifiers(&table);
    let shown = index::suggest(&ids, prefix.unwrap_or(""));
    for id in &shown {
        println!("{id}");
    }
    if shown.is_empty() {
        if let Some(p) = prefix {
            eprintln!("No identifiers start with '{p}'.");
        }
    }
    Ok(())
}
