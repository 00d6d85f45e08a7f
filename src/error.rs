use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridlookError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Schema error: required column '{0}' not found")]
    Schema(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, GridlookError>;
