// ABOUTME: Validation errors raised while translating desired state.
// ABOUTME: Each variant is a contradiction detectable without calling the daemon.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error("volume entry without container path or source container")]
    VolumeWithoutTarget,

    #[error("both a container and a path specified in a volume entry")]
    VolumeWithBothTargets,

    #[error("values for command may not be empty")]
    EmptyCommandValue,

    #[error("invalid cpu_set '{0}': expected a list or range of CPUs such as 0-3 or 0,2")]
    InvalidCpuSet(String),

    #[error("memory must be at least 0, got {0}")]
    NegativeMemory(i64),

    #[error("memory value {0} MB does not fit in bytes")]
    MemoryTooLarge(i64),

    #[error("memory_swap must be at least -1, got {0}")]
    InvalidMemorySwap(i64),

    #[error("cpu_shares must be at least 0, got {0}")]
    NegativeCpuShares(i64),
}
