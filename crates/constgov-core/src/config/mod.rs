//! Configuration system for constgov.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod constgov_config;
pub mod documentation_config;
pub mod report_config;
pub mod scan_config;

pub use constgov_config::{CliOverrides, ConstgovConfig, PROJECT_CONFIG_FILE};
pub use documentation_config::DocumentationConfig;
pub use report_config::ReportConfig;
pub use scan_config::ScanConfig;
