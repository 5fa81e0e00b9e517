// ABOUTME: Tuning knobs for the reconciler's readiness polling.
// ABOUTME: Defaults reproduce a 30 x 500ms wait after create.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerSettings {
    /// Inspect attempts made while waiting for a freshly created container.
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,

    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Network the daemon attaches new containers to. It is detached before
    /// declared networks are connected.
    #[serde(default = "default_network")]
    pub default_network: String,
}

fn default_poll_attempts() -> u32 {
    30
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(500)
}

fn default_network() -> String {
    "bridge".to_string()
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        ReconcilerSettings {
            poll_attempts: default_poll_attempts(),
            poll_interval: default_poll_interval(),
            default_network: default_network(),
        }
    }
}

impl ReconcilerSettings {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
