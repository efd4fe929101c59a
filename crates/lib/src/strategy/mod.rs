//! Naming and tagging strategies.
//!
//! A [`StrategyContext`] carries the two deployment-wide policies that every
//! builder consults when it is finalized:
//!
//! - a [`NamingStrategy`] mapping a logical name token to a physical name
//! - a [`TaggingStrategy`] supplying base tags merged into every taggable resource
//!
//! Both slots are optional. An empty slot falls back to the identity: the
//! token is used as the name, and the caller's tags are returned unchanged.
//!
//! The context is immutable once built and cheap to clone, so independent
//! builders may read it concurrently.

mod convention;
mod types;

pub use convention::*;
pub use types::*;

use std::sync::Arc;

use tracing::debug;

#[derive(Clone, Default)]
pub struct StrategyContext {
  naming: Option<Arc<dyn NamingStrategy>>,
  tagging: Option<Arc<dyn TaggingStrategy>>,
}

impl std::fmt::Debug for StrategyContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StrategyContext")
      .field("naming", &self.naming.is_some())
      .field("tagging", &self.tagging.is_some())
      .finish()
  }
}

impl StrategyContext {
  /// A context with neither strategy configured.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_naming(mut self, naming: impl NamingStrategy + 'static) -> Self {
    self.naming = Some(Arc::new(naming));
    self
  }

  pub fn with_tagging(mut self, tagging: impl TaggingStrategy + 'static) -> Self {
    self.tagging = Some(Arc::new(tagging));
    self
  }

  pub fn has_naming(&self) -> bool {
    self.naming.is_some()
  }

  pub fn has_tagging(&self) -> bool {
    self.tagging.is_some()
  }

  /// Resolve the physical name for `token`.
  pub fn resolve_name(&self, token: &str) -> Result<String, StrategyError> {
    let Some(naming) = &self.naming else {
      return Ok(token.to_string());
    };
    let name = naming.generate_name(token)?;
    debug!(token, name = %name, "resolved resource name");
    Ok(name)
  }

  /// Merge the tagging strategy's base tags into `existing`.
  ///
  /// Keys present in `existing` keep their value; policy keys fill the gaps.
  pub fn merge_tags(&self, existing: Tags) -> Result<Tags, StrategyError> {
    let Some(tagging) = &self.tagging else {
      return Ok(existing);
    };
    let mut merged = tagging.add_tags(&existing)?;
    let policy_keys = merged.len();
    merged.extend(existing);
    debug!(policy_keys, total = merged.len(), "merged tags");
    Ok(merged)
  }
}
