//! constgov-analysis: constant-governance static analysis for Go sources.
//!
//! - Scanner: file discovery with gitignore-style ignores and generated-file filtering
//! - Parsers: `DeclarationExtractor` trait, tree-sitter Go implementation
//! - Rules: category table, canonical reference mapping, allow-lists
//! - Validators: magic numbers, reference alignment, naming & placement,
//!   duplicates, documentation
//! - Tool: `ValidationTool` orchestrator, statistics and report rendering

pub mod parsers;
pub mod rules;
pub mod scanner;
pub mod tool;
pub mod validators;

pub use parsers::{DeclarationExtractor, GoExtractor};
pub use rules::RuleSet;
pub use scanner::Scanner;
pub use tool::{ComprehensiveValidationReport, FileValidationReport, ValidationTool};
