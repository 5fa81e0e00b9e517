// ABOUTME: Resource limits to host-config values, with range validation.
// ABOUTME: Memory and swap arrive in megabytes and leave in bytes.

use super::convert::megabytes;
use super::error::TranslateError;
use crate::config::ResourceLimits;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTranslation {
    pub memory: Option<i64>,
    pub memory_swap: Option<i64>,
    pub cpu_shares: Option<i64>,
    pub cpu_set: Option<String>,
}

pub fn translate_resources(limits: &ResourceLimits) -> Result<ResourceTranslation, TranslateError> {
    let memory = match limits.memory {
        Some(m) if m < 0 => return Err(TranslateError::NegativeMemory(m)),
        Some(m) => Some(megabytes(m).ok_or(TranslateError::MemoryTooLarge(m))?),
        None => None,
    };

    // -1 (unlimited) and 0 are sentinels and pass through as-is.
    let memory_swap = match limits.memory_swap {
        Some(s) if s < -1 => return Err(TranslateError::InvalidMemorySwap(s)),
        Some(s) if s > 0 => Some(megabytes(s).ok_or(TranslateError::MemoryTooLarge(s))?),
        other => other,
    };

    let cpu_shares = match limits.cpu_shares {
        Some(c) if c < 0 => return Err(TranslateError::NegativeCpuShares(c)),
        other => other,
    };

    let cpu_set = match &limits.cpu_set {
        Some(set) if !is_valid_cpu_set(set) => {
            return Err(TranslateError::InvalidCpuSet(set.clone()));
        }
        other => other.clone(),
    };

    Ok(ResourceTranslation {
        memory,
        memory_swap,
        cpu_shares,
        cpu_set,
    })
}

/// Digits separated by single `,` or `-`, e.g. `0-3`, `0,2`, `0-1,4`.
fn is_valid_cpu_set(set: &str) -> bool {
    let mut expect_digit = true;
    for c in set.chars() {
        match c {
            '0'..='9' => expect_digit = false,
            ',' | '-' if !expect_digit => expect_digit = true,
            _ => return false,
        }
    }
    !expect_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ResourceLimits {
        ResourceLimits::default()
    }

    #[test]
    fn memory_megabytes_become_bytes() {
        let t = translate_resources(&ResourceLimits {
            memory: Some(512),
            ..limits()
        })
        .unwrap();
        assert_eq!(t.memory, Some(536_870_912));
    }

    #[test]
    fn unlimited_swap_passes_through() {
        let t = translate_resources(&ResourceLimits {
            memory_swap: Some(-1),
            ..limits()
        })
        .unwrap();
        assert_eq!(t.memory_swap, Some(-1));
    }

    #[test]
    fn positive_swap_is_converted() {
        let t = translate_resources(&ResourceLimits {
            memory_swap: Some(1024),
            ..limits()
        })
        .unwrap();
        assert_eq!(t.memory_swap, Some(1_073_741_824));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(
            translate_resources(&ResourceLimits {
                memory: Some(-5),
                ..limits()
            }),
            Err(TranslateError::NegativeMemory(-5))
        );
        assert_eq!(
            translate_resources(&ResourceLimits {
                memory_swap: Some(-2),
                ..limits()
            }),
            Err(TranslateError::InvalidMemorySwap(-2))
        );
        assert_eq!(
            translate_resources(&ResourceLimits {
                cpu_shares: Some(-1),
                ..limits()
            }),
            Err(TranslateError::NegativeCpuShares(-1))
        );
    }

    #[test]
    fn memory_overflowing_bytes_is_rejected() {
        assert_eq!(
            translate_resources(&ResourceLimits {
                memory: Some(9_000_000_000_000),
                ..limits()
            }),
            Err(TranslateError::MemoryTooLarge(9_000_000_000_000))
        );
    }

    #[test]
    fn swap_overflowing_bytes_is_rejected() {
        assert_eq!(
            translate_resources(&ResourceLimits {
                memory_swap: Some(i64::MAX),
                ..limits()
            }),
            Err(TranslateError::MemoryTooLarge(i64::MAX))
        );
    }

    #[test]
    fn largest_representable_memory_is_accepted() {
        let max_mb = i64::MAX / (1024 * 1024);
        let t = translate_resources(&ResourceLimits {
            memory: Some(max_mb),
            ..limits()
        })
        .unwrap();
        assert_eq!(t.memory, Some(max_mb * 1024 * 1024));
    }

    #[test]
    fn cpu_set_syntax() {
        for ok in ["0", "0-3", "0,2", "0-1,4", "12"] {
            assert!(is_valid_cpu_set(ok), "{ok} should be accepted");
        }
        for bad in ["", "a", "0-", ",1", "0,,1", "0 1"] {
            assert!(!is_valid_cpu_set(bad), "{bad:?} should be rejected");
        }
    }
}
