//! Explicit parent, provider and option carriers.
//!
//! A [`ResourceContext`] is handed to a builder at construction time (or
//! assembled through its fluent setters) and travels with the finished
//! argument record to the engine. It replaces any ambient lookup of "the
//! current parent": relationships are always spelled out.

use serde::{Deserialize, Serialize};

use crate::engine::ResourceHandle;

/// Reference to an explicitly configured provider instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRef {
  pub name: String,
}

impl ProviderRef {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }
}

/// Options forwarded to the engine alongside the argument record.
#[derive(Debug, Clone, Default)]
pub struct ResourceOptions {
  /// Refuse deletion of the live resource.
  pub protect: bool,
  /// Leave the live resource in place when it is removed from the deployment.
  pub retain_on_delete: bool,
  /// Resources that must exist before this one.
  pub depends_on: Vec<ResourceHandle>,
  /// Previous URNs this resource was known under.
  pub aliases: Vec<String>,
  /// Input properties whose drift the engine should ignore.
  pub ignore_changes: Vec<String>,
}

impl ResourceOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn protect(mut self) -> Self {
    self.protect = true;
    self
  }

  pub fn retain_on_delete(mut self) -> Self {
    self.retain_on_delete = true;
    self
  }

  pub fn depends_on(mut self, dependency: &ResourceHandle) -> Self {
    self.depends_on.push(dependency.clone());
    self
  }

  pub fn alias(mut self, urn: impl Into<String>) -> Self {
    self.aliases.push(urn.into());
    self
  }

  pub fn ignore_changes(mut self, property: impl Into<String>) -> Self {
    self.ignore_changes.push(property.into());
    self
  }

  /// Combine two option sets: flags are or-ed, lists are concatenated with
  /// `self` first.
  pub fn merge(mut self, other: ResourceOptions) -> Self {
    self.protect |= other.protect;
    self.retain_on_delete |= other.retain_on_delete;
    self.depends_on.extend(other.depends_on);
    self.aliases.extend(other.aliases);
    self.ignore_changes.extend(other.ignore_changes);
    self
  }
}

/// Parent, provider and options for one resource.
///
/// The parent handle is shared and only used for lifecycle ordering; it is
/// never mutated through the context.
#[derive(Debug, Clone, Default)]
pub struct ResourceContext {
  pub parent: Option<ResourceHandle>,
  pub provider: Option<ProviderRef>,
  pub options: ResourceOptions,
}

impl ResourceContext {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_parent(mut self, parent: &ResourceHandle) -> Self {
    self.parent = Some(parent.clone());
    self
  }

  pub fn with_provider(mut self, provider: ProviderRef) -> Self {
    self.provider = Some(provider);
    self
  }

  pub fn with_options(mut self, options: ResourceOptions) -> Self {
    self.options = options;
    self
  }
}
