// ABOUTME: Network attachment and extra-host declarations.
// ABOUTME: Attachments are connected after the default network is dropped.

use crate::types::NetworkAlias;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A network the container joins, with per-network aliases and addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAttachment {
    pub name: String,

    #[serde(default)]
    pub aliases: BTreeSet<NetworkAlias>,

    #[serde(default)]
    pub ipv4_address: Option<String>,

    #[serde(default)]
    pub ipv6_address: Option<String>,
}

impl NetworkAttachment {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: BTreeSet::new(),
            ipv4_address: None,
            ipv6_address: None,
        }
    }
}

/// An `/etc/hosts` entry added to the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraHost {
    pub host: String,
    pub ip: String,
}
