//! Access history configuration.

use serde::{Deserialize, Serialize};

/// Controls which actions land in the access history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Record a `view` entry whenever a document's detail is read.
    #[serde(default = "default_log_views")]
    pub log_views: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_views: default_log_views(),
        }
    }
}

fn default_log_views() -> bool {
    true
}
