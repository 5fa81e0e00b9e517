// ABOUTME: Resource limits as declared by the user.
// ABOUTME: Memory values are megabytes; the translator converts them to bytes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Memory limit in MB.
    #[serde(default)]
    pub memory: Option<i64>,

    /// Memory plus swap in MB; `-1` means unlimited swap.
    #[serde(default)]
    pub memory_swap: Option<i64>,

    #[serde(default)]
    pub cpu_shares: Option<i64>,

    /// CPUs the container may run on, e.g. `0-3` or `0,2`.
    #[serde(default)]
    pub cpu_set: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ulimit {
    pub name: String,
    pub soft: i64,
    pub hard: i64,
}
