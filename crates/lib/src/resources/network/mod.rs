//! Networking resources.

mod network_interface;
mod security_group;
mod subnet;
mod virtual_network;

pub use network_interface::*;
pub use security_group::*;
pub use subnet::*;
pub use virtual_network::*;

use serde::Serialize;

/// Reference to another resource by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubResource {
  pub id: String,
}

impl SubResource {
  pub fn new(id: impl Into<String>) -> Self {
    Self { id: id.into() }
  }
}

/// Whether network policies apply to private endpoints or private link
/// services in a subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NetworkPolicies {
  #[default]
  Enabled,
  Disabled,
}
