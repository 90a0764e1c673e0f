//! Error types.
//!
//! - `AppError`: application-level failure carrying a process exit code
//! - `LoadError`: why a single export file was skipped during a directory load

use std::path::PathBuf;

use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// A per-file ingest failure. Never fatal to a directory load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },

    #[error("no `TIME;` or `GEO (Labels)` header line found")]
    HeaderNotFound,

    #[error("header found at line {header_line} but no numeric year columns")]
    NoYearColumns { header_line: usize },

    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
}

impl LoadError {
    /// Short machine-friendly label used in diagnostics output.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "io",
            LoadError::Encoding { .. } => "encoding",
            LoadError::HeaderNotFound => "header-not-found",
            LoadError::NoYearColumns { .. } => "no-year-columns",
            LoadError::Csv(_) => "csv",
        }
    }
}
