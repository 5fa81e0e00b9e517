// ABOUTME: Lifecycle flags that steer create/read/delete without touching the container.
// ABOUTME: These are the only attributes that can change in place.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    /// The daemon removes the container itself once it stops.
    #[serde(default)]
    pub rm: bool,

    /// Start the container right after creating it.
    #[serde(default = "default_true")]
    pub start: bool,

    /// Block creation until the container exits.
    #[serde(default)]
    pub attach: bool,

    /// Capture the output while attached.
    #[serde(default)]
    pub logs: bool,

    /// A stopped container counts as drift and is replaced.
    #[serde(default = "default_true")]
    pub must_run: bool,

    /// Stop timeout applied before removal.
    #[serde(default, with = "humantime_serde")]
    pub destroy_grace_period: Option<Duration>,
}

fn default_true() -> bool {
    true
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle {
            rm: false,
            start: true,
            attach: false,
            logs: false,
            must_run: true,
            destroy_grace_period: None,
        }
    }
}
