//! ConstgovErrorCode trait: stable machine-readable error codes.

/// Every error enum implements this to expose a structured code string,
/// used in log fields and in the JSON report's stage errors.
pub trait ConstgovErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;
}

pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const RULE_ERROR: &str = "RULE_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const CANCELLED: &str = "CANCELLED";
