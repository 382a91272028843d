//! Error types for the corpus reader.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for reading and validating the content tree.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Identifier (category, law or article) is empty or contains forbidden characters.
    #[error("Invalid identifier: '{0}'. Expected 1-100 characters of [A-Za-z0-9_-]")]
    InvalidIdentifier(String),

    /// IO error while reading a file or directory.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML document could not be parsed.
    #[error("YAML parse error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Legacy JSON document could not be parsed.
    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document exceeds the size limit.
    #[error("{path} is too large ({size} bytes, max {max})")]
    TooLarge { path: PathBuf, size: usize, max: usize },

    /// Document parsed but failed content validation.
    #[error("Invalid content in {path}: {}", problems.join(", "))]
    Invalid {
        path: PathBuf,
        problems: Vec<String>,
    },

    /// Directory walk failed.
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;
