//! Error types for the reader.
//!
//! Library operations that talk to an upstream source return `Result<T>`.
//! The public, non-`try_` operations of the repository, catalog, search
//! engine and resolver never surface these: they log and degrade to an empty
//! or absent result instead.

use thiserror::Error;

/// Main error type for the reader library.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Invalid spreadsheet identifier.
    #[error("Invalid spreadsheet ID: '{0}'. Expected 20-100 characters of [A-Za-z0-9_-]")]
    InvalidSpreadsheetId(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("Source returned {status}: {body}")]
    Source { status: u16, body: String },

    /// All retry attempts for a transient failure were used up.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Response body was not the expected JSON.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Relation table could not be parsed.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A source URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReaderError {
    /// Whether this error means the upstream source could not be reached or
    /// refused the request.
    ///
    /// These are the failures that callers degrade to "source returned
    /// empty" rather than report as bugs.
    #[must_use]
    pub fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Source { .. } | Self::RetriesExhausted { .. }
        )
    }
}

/// Result type alias for reader operations.
pub type Result<T> = std::result::Result<T, ReaderError>;
