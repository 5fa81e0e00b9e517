// ABOUTME: Declared networks to post-create connect calls.
// ABOUTME: Advanced attachments replace the legacy name list entirely.

use crate::config::DesiredContainer;
use crate::runtime::EndpointConfig;
use crate::types::NetworkId;

/// One network connect call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAttach {
    pub network: NetworkId,
    pub endpoint: EndpointConfig,
}

pub fn translate_networks(desired: &DesiredContainer) -> Vec<NetworkAttach> {
    if !desired.networks_advanced.is_empty() {
        return desired
            .networks_advanced
            .iter()
            .map(|attachment| NetworkAttach {
                network: NetworkId::new(attachment.name.clone()),
                endpoint: EndpointConfig {
                    aliases: attachment.aliases.iter().map(|a| a.to_string()).collect(),
                    ipv4_address: attachment.ipv4_address.clone(),
                    ipv6_address: attachment.ipv6_address.clone(),
                },
            })
            .collect();
    }

    let aliases: Vec<String> = desired
        .network_aliases
        .iter()
        .map(|a| a.to_string())
        .collect();

    desired
        .networks
        .iter()
        .map(|name| NetworkAttach {
            network: NetworkId::new(name.clone()),
            endpoint: EndpointConfig {
                aliases: aliases.clone(),
                ipv4_address: None,
                ipv6_address: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkAttachment;
    use crate::types::{ContainerName, NetworkAlias};

    fn desired() -> DesiredContainer {
        DesiredContainer::new(ContainerName::new("api").unwrap(), "api:latest")
    }

    #[test]
    fn legacy_networks_share_aliases() {
        let mut d = desired();
        d.networks.insert("front".into());
        d.networks.insert("back".into());
        d.network_aliases.insert(NetworkAlias::new("api").unwrap());

        let plan = translate_networks(&d);
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|n| n.endpoint.aliases == vec!["api".to_string()]));
    }

    #[test]
    fn advanced_networks_take_precedence() {
        let mut d = desired();
        d.networks.insert("legacy".into());
        let mut attachment = NetworkAttachment::named("mesh");
        attachment.ipv4_address = Some("172.20.0.10".into());
        d.networks_advanced.push(attachment);

        let plan = translate_networks(&d);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].network.as_str(), "mesh");
        assert_eq!(plan[0].endpoint.ipv4_address.as_deref(), Some("172.20.0.10"));
    }

    #[test]
    fn no_declared_networks_means_no_attach() {
        assert!(translate_networks(&desired()).is_empty());
    }
}
