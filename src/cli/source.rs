use crate::error::Result;
use crate::settings::{load_settings, save_settings};

pub fn run(set: Option<&str>) -> Result<()> {
    let mut settings = load_settings();
    match set {
        Some(url) => {
            settings.source_url = url.to_string();
            save_settings(&settings)?;
            println!("Source URL set to {url}");
        }
        None => println!("{}", settings.source_url),
    }
    Ok(())
}
