//! Error types for component graph generation.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while scanning a project, building the
/// component registry, or emitting the rendered graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The configured root component matches no module in the compilation.
    #[error("Root component not found. No component with name \"{0}\"")]
    RootNotFound(String),

    /// A component was requested from the registry but never registered.
    #[error("component \"{0}\" is not in the registry")]
    UnknownComponent(String),

    /// The configuration is internally inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be parsed.
    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A tree-sitter grammar could not be loaded.
    #[error("failed to load {language} grammar: {message}")]
    Parse { language: &'static str, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
