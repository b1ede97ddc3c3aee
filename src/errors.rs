use thiserror::Error;

/// Errors raised by the collaborators around the ranking core
/// (store, configuration, ingestion). The core operations themselves never fail.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Page not found: {0}")]
    PageNotFound(u64),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("No page ids left after {0}")]
    IdSpaceExhausted(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
