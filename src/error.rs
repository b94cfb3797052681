//! Error taxonomy for loading, comparing and reporting.
//!
//! Core operations return [`CompareError`]; the command layer wraps it in
//! `anyhow` with file/operation context before it reaches `main`.

use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum CompareError {
    /// A header or mapping cell did not hold a string value.
    #[error("Malformed header cell in {table} at row {row}, column {column}: expected text, found {found}")]
    MalformedHeaderCell {
        table: String,
        row: usize,
        column: usize,
        found: &'static str,
    },
    #[error("Cannot {operation} source {path:?}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("Cannot {operation} report {path:?}: {source}")]
    SinkUnavailable {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl CompareError {
    pub fn source_unavailable(
        path: impl Into<PathBuf>,
        operation: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        CompareError::SourceUnavailable {
            path: path.into(),
            operation,
            source: source.into(),
        }
    }

    pub fn sink_unavailable(
        path: impl Into<PathBuf>,
        operation: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        CompareError::SinkUnavailable {
            path: path.into(),
            operation,
            source: source.into(),
        }
    }
}
