//! Error types for render-doc.

use std::path::PathBuf;

use titiktemu_core::CoreError;
use titiktemu_docs::RenderError;

/// Failures surfaced by the command line tool.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Usage: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid input: {0}")]
    Input(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// Shown as "error kind + message".
    #[error("{} error: {}", .0.kind(), .0)]
    Render(#[from] RenderError),
}

pub type AppResult<T> = Result<T, AppError>;
