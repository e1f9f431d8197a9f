//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, ConstgovErrorCode};

/// Errors that abort extraction of a single file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Grammar could not be loaded for {language}: {message}")]
    GrammarNotFound { language: String, message: String },

    #[error("Unsupported source file: {path}")]
    UnsupportedLanguage { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Tree-sitter produced no tree for {path}")]
    NoTree { path: PathBuf },

    #[error("Syntax error in {path} at {line}:{column}")]
    Syntax {
        path: PathBuf,
        line: u32,
        column: u32,
    },
}

impl ConstgovErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => error_code::UNSUPPORTED_LANGUAGE,
            _ => error_code::PARSE_ERROR,
        }
    }
}
