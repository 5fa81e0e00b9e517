// ABOUTME: Health check declaration to the daemon's nanosecond-based config.
// ABOUTME: Duration strings are parsed leniently; malformed values become zero.

use crate::config::HealthcheckSpec;
use bollard::models::HealthConfig;
use std::time::Duration;

pub fn translate_healthcheck(spec: &HealthcheckSpec) -> HealthConfig {
    HealthConfig {
        test: Some(spec.test.clone()),
        interval: Some(nanos(parse_lenient_duration(&spec.interval))),
        timeout: Some(nanos(parse_lenient_duration(&spec.timeout))),
        start_period: Some(nanos(parse_lenient_duration(&spec.start_period))),
        retries: Some(i64::from(spec.retries)),
        start_interval: None,
    }
}

/// Parse a human-readable duration such as `30s` or `1m 30s`.
///
/// Malformed input yields zero, which the daemon reads as "use the default".
pub fn parse_lenient_duration(raw: &str) -> Duration {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "0" {
        return Duration::ZERO;
    }
    match humantime::parse_duration(trimmed) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(value = raw, error = %e, "unparseable health check duration, using 0");
            Duration::ZERO
        }
    }
}

fn nanos(d: Duration) -> i64 {
    i64::try_from(d.as_nanos()).unwrap_or(i64::MAX)
}
