// ABOUTME: Type-safe identifiers and validated names for runtime objects.
// ABOUTME: Phantom-typed IDs keep container and network identities apart.

mod container_name;
mod id;
mod network_alias;

pub use container_name::{ContainerName, ContainerNameError};
pub use id::{ContainerId, NetworkId};
pub use network_alias::{NetworkAlias, NetworkAliasError};
