//! Report output configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// File to write the report to. No file is written when unset.
    pub output: Option<String>,
    /// Print the itemized report instead of the summary. Default: false.
    pub verbose: Option<bool>,
    /// Render the report as JSON. Default: false.
    pub json: Option<bool>,
}

impl ReportConfig {
    pub fn effective_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn effective_json(&self) -> bool {
        self.json.unwrap_or(false)
    }
}
