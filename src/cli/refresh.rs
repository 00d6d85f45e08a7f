use crate::error::Result;
use crate::index;
use crate::loader;
use crate::settings::load_settings;

pub fn run(url: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let table = loader::load(&settings, url, true)?;
    let ids = index::list_identifiers(&table);
    println!(
        "Downloaded {} rows, {} columns, {} distinct account ids.",
        table.len(),
        table.columns().len(),
        ids.len()
    );
    Ok(())
}
