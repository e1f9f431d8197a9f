//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, ConstgovErrorCode};

/// Errors that abort a scan of the whole root.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Scan root not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Scan root is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Walk error under {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Scan cancelled")]
    Cancelled,
}

impl ConstgovErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::SCAN_ERROR,
        }
    }
}
