// ABOUTME: Port equivalence check used to suppress reorder-only port diffs.
// ABOUTME: Order-insensitive comparison keyed by internal port.

use crate::config::PortSpec;

/// Whether `new` declares the same ports as `old`, ignoring order.
///
/// Each old entry is matched to the first new entry with the same internal
/// port; external port, bind address and protocol must then agree. New
/// entries are only checked through the length comparison, so two lists of
/// equal length where `new` repeats an internal port can still compare equal.
pub fn ports_equivalent(old: &[PortSpec], new: &[PortSpec]) -> bool {
    if old.len() != new.len() {
        tracing::debug!(old = old.len(), new = new.len(), "port count changed");
        return false;
    }

    for old_port in old {
        let Some(new_port) = new.iter().find(|p| p.internal == old_port.internal) else {
            tracing::debug!(internal = old_port.internal, "port no longer declared");
            return false;
        };

        if old_port.external != new_port.external
            || old_port.host_ip() != new_port.host_ip()
            || old_port.protocol != new_port.protocol
        {
            tracing::debug!(internal = old_port.internal, "port binding changed");
            return false;
        }
    }

    true
}
