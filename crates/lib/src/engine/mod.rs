//! The provisioning engine boundary.
//!
//! Builders never talk to a cloud provider. Once a builder has resolved its
//! name, merged its tags and folded its fragments, it hands a finished
//! [`ResourceRequest`] to an [`Engine`] and gets back a [`ResourceHandle`].
//! Everything past that point (network calls, retries, generated IDs) is the
//! engine's business; generated values surface asynchronously through
//! [`Outputs`].
//!
//! # Submodules
//!
//! - [`memory`] - a recording engine that forwards inputs as outputs

pub mod memory;

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::consts::APP_NAME;
use crate::context::{ProviderRef, ResourceOptions};

pub type OutputMap = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
  #[error("duplicate resource URN: {0}")]
  DuplicateUrn(String),

  #[error("inputs for {urn} must serialize to an object")]
  InvalidInputs { urn: String },

  #[error("outputs for {urn} were dropped before they resolved")]
  OutputsUnavailable { urn: String },
}

/// Contract of the external provisioning engine.
pub trait Engine: Send + Sync {
  fn create_resource(&self, request: ResourceRequest) -> Result<ResourceHandle, EngineError>;
}

/// A finished argument record plus everything the engine needs to register it.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
  pub type_token: &'static str,
  pub logical_name: String,
  /// Physical name produced by the naming strategy.
  pub name: String,
  pub inputs: serde_json::Value,
  pub parent: Option<ResourceHandle>,
  pub provider: Option<ProviderRef>,
  pub options: ResourceOptions,
}

impl ResourceRequest {
  /// `urn:stratum:<parent type>$<type>::<logical name>`
  pub fn urn(&self) -> String {
    let qualified = match &self.parent {
      Some(parent) => format!("{}${}", parent.type_token(), self.type_token),
      None => self.type_token.to_string(),
    };
    format!("urn:{}:{}::{}", APP_NAME, qualified, self.logical_name)
  }
}

/// Receiving side of a resource's asynchronous outputs.
#[derive(Debug, Clone)]
pub struct Outputs {
  urn: String,
  rx: watch::Receiver<Option<Arc<OutputMap>>>,
}

/// Sending side held by the engine until the outputs are known.
#[derive(Debug)]
pub struct OutputsResolver {
  tx: watch::Sender<Option<Arc<OutputMap>>>,
}

impl OutputsResolver {
  pub fn resolve(self, outputs: OutputMap) {
    self.tx.send_replace(Some(Arc::new(outputs)));
  }
}

impl Outputs {
  pub fn channel(urn: &str) -> (OutputsResolver, Outputs) {
    let (tx, rx) = watch::channel(None);
    (
      OutputsResolver { tx },
      Outputs {
        urn: urn.to_string(),
        rx,
      },
    )
  }

  /// Wait for the engine to resolve every output.
  pub async fn all(&self) -> Result<Arc<OutputMap>, EngineError> {
    let mut rx = self.rx.clone();
    let guard = rx
      .wait_for(Option::is_some)
      .await
      .map_err(|_| EngineError::OutputsUnavailable { urn: self.urn.clone() })?;
    let resolved: Option<Arc<OutputMap>> = Option::clone(&guard);
    resolved.ok_or_else(|| EngineError::OutputsUnavailable { urn: self.urn.clone() })
  }

  /// Wait for the outputs and return a single value.
  pub async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, EngineError> {
    Ok(self.all().await?.get(key).cloned())
  }

  /// Read a value without waiting; `None` while unresolved.
  pub fn try_get(&self, key: &str) -> Option<serde_json::Value> {
    self.rx.borrow().as_ref().and_then(|outputs| outputs.get(key).cloned())
  }

  pub fn is_resolved(&self) -> bool {
    self.rx.borrow().is_some()
  }
}

#[derive(Debug)]
struct HandleInner {
  urn: String,
  type_token: &'static str,
  logical_name: String,
  name: String,
  outputs: Outputs,
}

/// A live resource as returned by the engine.
///
/// Handles are cheap to clone and are shared freely as parents and
/// dependencies of other resources.
#[derive(Debug, Clone)]
pub struct ResourceHandle {
  inner: Arc<HandleInner>,
}

impl ResourceHandle {
  pub fn new(urn: String, type_token: &'static str, logical_name: String, name: String, outputs: Outputs) -> Self {
    Self {
      inner: Arc::new(HandleInner {
        urn,
        type_token,
        logical_name,
        name,
        outputs,
      }),
    }
  }

  pub fn urn(&self) -> &str {
    &self.inner.urn
  }

  pub fn type_token(&self) -> &'static str {
    self.inner.type_token
  }

  pub fn logical_name(&self) -> &str {
    &self.inner.logical_name
  }

  /// The resolved physical name, known as soon as the builder finished.
  pub fn name(&self) -> &str {
    &self.inner.name
  }

  pub fn outputs(&self) -> &Outputs {
    &self.inner.outputs
  }

  /// The provider-assigned ID, once the engine has produced it.
  pub async fn id(&self) -> Result<Option<String>, EngineError> {
    Ok(
      self
        .outputs()
        .get("id")
        .await?
        .and_then(|value| value.as_str().map(str::to_string)),
    )
  }
}
