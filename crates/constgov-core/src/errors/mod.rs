//! Error handling for constgov.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod parse_error;
pub mod report_error;
pub mod rule_error;
pub mod scan_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::ConstgovErrorCode;
pub use parse_error::ParseError;
pub use report_error::ReportError;
pub use rule_error::RuleError;
pub use scan_error::ScanError;
pub use validation_error::ValidationError;
