// ABOUTME: Published port declarations.
// ABOUTME: An unset external port lets the daemon pick an ephemeral one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bind address used when a port declaration leaves `ip` empty.
pub const DEFAULT_HOST_IP: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    pub internal: u16,

    #[serde(default)]
    pub external: Option<u16>,

    #[serde(default)]
    pub ip: Option<String>,

    #[serde(default)]
    pub protocol: Protocol,
}

impl PortSpec {
    pub fn tcp(internal: u16) -> Self {
        Self {
            internal,
            external: None,
            ip: None,
            protocol: Protocol::Tcp,
        }
    }

    pub fn with_external(mut self, external: u16) -> Self {
        self.external = Some(external);
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// The bind address, with empty or missing values normalised to `0.0.0.0`.
    pub fn host_ip(&self) -> &str {
        match self.ip.as_deref() {
            Some(ip) if !ip.is_empty() => ip,
            _ => DEFAULT_HOST_IP,
        }
    }

    /// The `<internal>/<protocol>` key the runtime uses for exposed ports.
    pub fn key(&self) -> String {
        format!("{}/{}", self.internal, self.protocol)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
    Sctp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
            Protocol::Sctp => write!(f, "sctp"),
        }
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            "sctp" => Ok(Protocol::Sctp),
            _ => Err(format!("unknown protocol: {}", s)),
        }
    }
}
