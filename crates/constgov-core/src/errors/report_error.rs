//! Report persistence errors.

use std::path::PathBuf;

use super::error_code::{self, ConstgovErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {message}")]
    Serialize { message: String },
}

impl ConstgovErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
