//! Rule table errors.

use super::error_code::{self, ConstgovErrorCode};

/// Errors raised while building rule tables (category patterns, reference mapping).
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid naming pattern for category {category}: {message}")]
    InvalidPattern { category: String, message: String },

    #[error("Reference mapping for {name} is inconsistent: reference value {reference_value}, local value {local_value}")]
    InconsistentMapping {
        name: String,
        reference_value: i64,
        local_value: i64,
    },

    #[error("Constant {name} is mapped more than once in the reference table")]
    DuplicateMapping { name: String },
}

impl ConstgovErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
