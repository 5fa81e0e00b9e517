// ABOUTME: Flattens runtime-reported ports and network addressing into records.
// ABOUTME: Port output is ordered by internal port; network output is unordered.

use crate::config::{PortSpec, Protocol};
use crate::runtime::{NetworkEndpoint, PortMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Addressing of the container on one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkData {
    pub network_name: String,
    pub ip_address: String,
    pub ip_prefix_length: i64,
    pub gateway: String,
}

/// One record per realized binding, sorted numerically by internal port.
///
/// Keys the daemon reports without bindings (exposed but unpublished) yield
/// nothing. Keys that cannot be parsed are skipped with a warning.
pub fn flatten_ports(ports: &PortMap) -> Vec<PortSpec> {
    let mut keys: Vec<(u16, Protocol, &String)> = ports
        .keys()
        .filter_map(|key| match parse_port_key(key) {
            Some((internal, protocol)) => Some((internal, protocol, key)),
            None => {
                tracing::warn!(key = %key, "ignoring unparseable port key");
                None
            }
        })
        .collect();
    keys.sort();

    let mut out = Vec::new();
    for (internal, protocol, key) in keys {
        let Some(Some(bindings)) = ports.get(key) else {
            continue;
        };
        for binding in bindings {
            out.push(PortSpec {
                internal,
                external: binding
                    .host_port
                    .as_deref()
                    .and_then(|p| p.parse().ok()),
                ip: binding.host_ip.clone(),
                protocol,
            });
        }
    }
    out
}

/// `"8080/tcp"` to `(8080, Tcp)`. A bare port number defaults to tcp.
fn parse_port_key(key: &str) -> Option<(u16, Protocol)> {
    let (port, protocol) = match key.split_once('/') {
        Some((port, protocol)) => (port, protocol.parse().ok()?),
        None => (key, Protocol::Tcp),
    };
    Some((port.parse().ok()?, protocol))
}

/// One record per attached network, in no particular order.
pub fn flatten_networks(networks: &HashMap<String, NetworkEndpoint>) -> Vec<NetworkData> {
    networks
        .iter()
        .map(|(name, endpoint)| NetworkData {
            network_name: name.clone(),
            ip_address: endpoint.ip_address.clone(),
            ip_prefix_length: endpoint.ip_prefix_len,
            gateway: endpoint.gateway.clone(),
        })
        .collect()
}
