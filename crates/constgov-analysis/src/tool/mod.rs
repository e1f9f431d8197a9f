//! Validation orchestrator: runs the stages in order, aggregates findings,
//! computes statistics and renders reports.

pub mod report;
pub mod types;
pub mod validation_tool;

pub use report::{render_file_report, render_itemized, render_summary, save_report, to_json};
pub use types::{
    ComprehensiveValidationReport, FileValidationReport, StageError, Statistics, ValidationResult,
};
pub use validation_tool::ValidationTool;
