use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GridlookError, Result};

/// Published workbook of consumer records; the GitHub web URL is normalized
/// to raw form at fetch time.
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/aditya-gupta-andc/Securepin/blob/6d06d3f715f14b8ec34c5d98d8f511f7b99ca702/Ghosi_IDF_Jan.xlsx";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_source_url")]
    pub source_url: String,
    #[serde(default = "default_cache_dir_string")]
    pub cache_dir: String,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_cache_dir_string() -> String {
    default_cache_dir().to_string_lossy().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            cache_dir: default_cache_dir_string(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("gridlook")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gridlook")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| GridlookError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.source_url, DEFAULT_SOURCE_URL);
        assert!(settings.cache_dir.ends_with("gridlook"));
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"source_url": "https://example.com/data.xlsx"}"#).unwrap();
        assert_eq!(settings.source_url, "https://example.com/data.xlsx");
        assert!(!settings.cache_dir.is_empty());
    }
}
