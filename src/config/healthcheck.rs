// ABOUTME: Container health check declaration.
// ABOUTME: Durations stay raw strings and are parsed leniently at translation time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthcheckSpec {
    /// e.g. `["CMD", "curl", "-f", "http://localhost/"]`
    pub test: Vec<String>,

    #[serde(default = "default_duration")]
    pub interval: String,

    #[serde(default = "default_duration")]
    pub timeout: String,

    #[serde(default = "default_duration")]
    pub start_period: String,

    #[serde(default)]
    pub retries: u32,
}

fn default_duration() -> String {
    "0s".to_string()
}

impl HealthcheckSpec {
    pub fn new(test: Vec<String>) -> Self {
        Self {
            test,
            interval: default_duration(),
            timeout: default_duration(),
            start_period: default_duration(),
            retries: 0,
        }
    }
}
