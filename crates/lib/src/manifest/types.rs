//! Manifest types.
//!
//! # Structure
//!
//! - `resources`: every registered resource keyed by URN
//!
//! # Ordering
//!
//! Uses [`BTreeMap`] so serialization is deterministic, which keeps manifest
//! hashes reproducible.
//!
//! # Example
//!
//! ```json
//! {
//!   "resources": {
//!     "urn:stratum:azure-native:network:VirtualNetwork::vnet1": {
//!       "type_token": "azure-native:network:VirtualNetwork",
//!       "logical_name": "vnet1",
//!       "name": "vnet1",
//!       "id": "vnet1_id",
//!       "inputs": { "virtualNetworkName": "vnet1", ... },
//!       ...
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::ResourceRequest;
use crate::util::hash::Hashable;

/// One resource as registered with the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
  pub type_token: String,
  pub logical_name: String,
  pub name: String,
  pub id: String,
  /// URN of the parent resource, if any.
  pub parent: Option<String>,
  pub provider: Option<String>,
  /// URNs of explicit dependencies.
  pub depends_on: Vec<String>,
  pub protect: bool,
  pub retain_on_delete: bool,
  pub aliases: Vec<String>,
  pub ignore_changes: Vec<String>,
  /// The finished argument record.
  pub inputs: serde_json::Value,
}

impl Hashable for ResourceRecord {}

impl ResourceRecord {
  pub fn from_request(request: &ResourceRequest, id: &str) -> Self {
    Self {
      type_token: request.type_token.to_string(),
      logical_name: request.logical_name.clone(),
      name: request.name.clone(),
      id: id.to_string(),
      parent: request.parent.as_ref().map(|p| p.urn().to_string()),
      provider: request.provider.as_ref().map(|p| p.name.clone()),
      depends_on: request.options.depends_on.iter().map(|d| d.urn().to_string()).collect(),
      protect: request.options.protect,
      retain_on_delete: request.options.retain_on_delete,
      aliases: request.options.aliases.clone(),
      ignore_changes: request.options.ignore_changes.clone(),
      inputs: request.inputs.clone(),
    }
  }

  /// Look up a top-level input property.
  pub fn input(&self, key: &str) -> Option<&serde_json::Value> {
    self.inputs.get(key)
  }
}

/// All resources registered with an engine, keyed by URN.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  pub resources: BTreeMap<String, ResourceRecord>,
}

impl Hashable for Manifest {}

impl Manifest {
  pub fn len(&self) -> usize {
    self.resources.len()
  }

  pub fn is_empty(&self) -> bool {
    self.resources.is_empty()
  }

  pub fn get(&self, urn: &str) -> Option<&ResourceRecord> {
    self.resources.get(urn)
  }

  pub fn of_type<'a>(&'a self, type_token: &'a str) -> impl Iterator<Item = &'a ResourceRecord> + 'a {
    self.resources.values().filter(move |r| r.type_token == type_token)
  }

  pub fn find(&self, type_token: &str, logical_name: &str) -> Option<&ResourceRecord> {
    self
      .resources
      .values()
      .find(|r| r.type_token == type_token && r.logical_name == logical_name)
  }
}
