//! A recording engine that never leaves the process.
//!
//! [`InMemoryEngine`] registers every request in a [`Manifest`] and resolves
//! outputs immediately: all inputs are forwarded as outputs, `id` defaults to
//! `<logical name>_id` and `name` carries the resolved physical name. It is
//! what previews and the test-suite run against.

use std::sync::Mutex;

use tracing::info;

use super::{Engine, EngineError, OutputMap, Outputs, ResourceHandle, ResourceRequest};
use crate::manifest::{Manifest, ResourceRecord};

#[derive(Debug, Default)]
pub struct InMemoryEngine {
  manifest: Mutex<Manifest>,
}

impl InMemoryEngine {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of everything registered so far.
  pub fn manifest(&self) -> Manifest {
    self.lock().clone()
  }

  pub fn resources_of_type(&self, type_token: &str) -> Vec<ResourceRecord> {
    self.lock().of_type(type_token).cloned().collect()
  }

  pub fn find(&self, type_token: &str, logical_name: &str) -> Option<ResourceRecord> {
    self.lock().find(type_token, logical_name).cloned()
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, Manifest> {
    self.manifest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl Engine for InMemoryEngine {
  fn create_resource(&self, request: ResourceRequest) -> Result<ResourceHandle, EngineError> {
    let urn = request.urn();
    let Some(inputs) = request.inputs.as_object() else {
      return Err(EngineError::InvalidInputs { urn });
    };

    let id = format!("{}_id", request.logical_name);
    let mut outputs: OutputMap = inputs.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    outputs.insert("id".to_string(), serde_json::Value::String(id.clone()));
    outputs.insert("name".to_string(), serde_json::Value::String(request.name.clone()));

    {
      let mut manifest = self.lock();
      if manifest.resources.contains_key(&urn) {
        return Err(EngineError::DuplicateUrn(urn));
      }
      manifest
        .resources
        .insert(urn.clone(), ResourceRecord::from_request(&request, &id));
    }
    info!(urn = %urn, "registered resource");

    let (resolver, handle_outputs) = Outputs::channel(&urn);
    resolver.resolve(outputs);

    Ok(ResourceHandle::new(
      urn,
      request.type_token,
      request.logical_name,
      request.name,
      handle_outputs,
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::context::ResourceOptions;

  fn request(logical_name: &str, inputs: serde_json::Value) -> ResourceRequest {
    ResourceRequest {
      type_token: "azure-native:network:VirtualNetwork",
      logical_name: logical_name.to_string(),
      name: format!("stz-{}", logical_name),
      inputs,
      parent: None,
      provider: None,
      options: ResourceOptions::default(),
    }
  }

  #[tokio::test]
  async fn forwards_inputs_as_outputs() {
    let engine = InMemoryEngine::new();
    let handle = engine
      .create_resource(request("vnet1", serde_json::json!({ "location": "westeurope" })))
      .unwrap();

    assert_eq!(handle.name(), "stz-vnet1");
    assert_eq!(handle.id().await.unwrap().as_deref(), Some("vnet1_id"));
    assert_eq!(
      handle.outputs().get("location").await.unwrap(),
      Some(serde_json::json!("westeurope"))
    );
    assert_eq!(
      handle.outputs().get("name").await.unwrap(),
      Some(serde_json::json!("stz-vnet1"))
    );
  }

  #[test]
  fn records_resource_in_manifest() {
    let engine = InMemoryEngine::new();
    engine.create_resource(request("vnet1", serde_json::json!({}))).unwrap();

    let manifest = engine.manifest();
    assert_eq!(manifest.len(), 1);
    let record = engine.find("azure-native:network:VirtualNetwork", "vnet1").unwrap();
    assert_eq!(record.id, "vnet1_id");
    assert_eq!(record.name, "stz-vnet1");
  }

  #[test]
  fn duplicate_urn_is_rejected() {
    let engine = InMemoryEngine::new();
    engine.create_resource(request("vnet1", serde_json::json!({}))).unwrap();
    let err = engine.create_resource(request("vnet1", serde_json::json!({}))).unwrap_err();
    assert!(matches!(err, EngineError::DuplicateUrn(_)));
    assert_eq!(engine.manifest().len(), 1);
  }

  #[test]
  fn non_object_inputs_are_rejected() {
    let engine = InMemoryEngine::new();
    let err = engine.create_resource(request("vnet1", serde_json::json!([1, 2]))).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInputs { .. }));
    assert!(engine.manifest().is_empty());
  }
}
