//! Top-level validation errors.

use super::error_code::{self, ConstgovErrorCode};
use super::{ConfigError, ParseError, ReportError, RuleError, ScanError};

/// Errors that abort a validation run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Validation cancelled")]
    Cancelled,
}

impl ConstgovErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
