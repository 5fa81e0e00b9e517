// ABOUTME: Port declarations to exposed ports and host bindings.
// ABOUTME: Bindings default to 0.0.0.0 and are grouped by port key.

use crate::config::PortSpec;
use crate::runtime::PortMap;
use bollard::models::PortBinding;

/// Exposed-port keys for the process config and bindings for the host config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortTranslation {
    pub exposed: Vec<String>,
    pub bindings: PortMap,
}

/// Expand declarations keyed by `<internal>/<protocol>`.
///
/// Two declarations of the same key publish one exposed port with two
/// bindings. An unset external port is left for the daemon to allocate.
pub fn translate_ports(ports: &[PortSpec]) -> PortTranslation {
    let mut out = PortTranslation::default();

    for port in ports {
        let key = port.key();
        if !out.exposed.contains(&key) {
            out.exposed.push(key.clone());
        }

        let binding = PortBinding {
            host_ip: Some(port.host_ip().to_string()),
            host_port: port.external.map(|p| p.to_string()),
        };
        out.bindings
            .entry(key)
            .or_insert_with(|| Some(Vec::new()))
            .get_or_insert_with(Vec::new)
            .push(binding);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Protocol;

    #[test]
    fn unset_external_and_ip_leave_allocation_to_daemon() {
        let t = translate_ports(&[PortSpec::tcp(80)]);
        assert_eq!(t.exposed, vec!["80/tcp".to_string()]);
        let binding = &t.bindings["80/tcp"].as_ref().unwrap()[0];
        assert_eq!(binding.host_ip.as_deref(), Some("0.0.0.0"));
        assert_eq!(binding.host_port, None);
    }

    #[test]
    fn same_key_collects_multiple_bindings() {
        let t = translate_ports(&[
            PortSpec::tcp(53).with_external(5353),
            PortSpec::tcp(53).with_external(5354).with_ip("127.0.0.1"),
            PortSpec::tcp(53).with_protocol(Protocol::Udp),
        ]);
        assert_eq!(t.exposed, vec!["53/tcp".to_string(), "53/udp".to_string()]);
        assert_eq!(t.bindings["53/tcp"].as_ref().unwrap().len(), 2);
        assert_eq!(t.bindings["53/udp"].as_ref().unwrap().len(), 1);
    }
}
