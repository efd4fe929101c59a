//! The builder core shared by every resource kind.
//!
//! A concrete builder owns a [`BuilderBase`] holding its logical name, the
//! [`Deployment`] it was created from, an optional [`ResourceContext`] and
//! its argument record. The [`ResourceBuilder`] trait supplies the setters
//! every resource kind has in common and the terminal `build`, which always
//! runs the same sequence:
//!
//! 1. resolve the physical name through the deployment's naming strategy
//! 2. merge caller tags with the tagging strategy's base tags
//! 3. fold pending sub-profiles into the argument record
//! 4. check required fields
//! 5. hand the finished record to the engine
//!
//! `build` takes the builder by value, so a finished builder cannot be
//! touched again.
//!
//! # Submodules
//!
//! - [`nested`] - child builders folded into a parent (agent pools, IP configurations)

mod deployment;
pub mod nested;
mod types;

pub use deployment::*;
pub use types::*;

use tracing::{debug, info};

use crate::context::{ProviderRef, ResourceContext, ResourceOptions};
use crate::engine::{ResourceHandle, ResourceRequest};
use crate::strategy::Tags;

/// State shared by all concrete builders.
#[derive(Debug)]
pub struct BuilderBase<A> {
  logical_name: String,
  deployment: Deployment,
  context: ResourceContext,
  /// Tags set by the caller, merged into the record at build time.
  tags: Tags,
  args: A,
}

impl<A: Arguments> BuilderBase<A> {
  pub fn new(deployment: &Deployment, logical_name: impl Into<String>, context: ResourceContext, args: A) -> Self {
    Self {
      logical_name: logical_name.into(),
      deployment: deployment.clone(),
      context,
      tags: Tags::new(),
      args,
    }
  }

  pub fn logical_name(&self) -> &str {
    &self.logical_name
  }

  pub fn args(&self) -> &A {
    &self.args
  }

  pub fn args_mut(&mut self) -> &mut A {
    &mut self.args
  }

  /// Write the resolved name and the merged tags into the record.
  ///
  /// The name token is the explicit name if one was set, otherwise the
  /// logical name.
  fn apply_strategies(&mut self) -> Result<(), BuildError> {
    let strategies = self.deployment.strategies();

    let slot = self.args.name_slot();
    let token = slot.take().unwrap_or_else(|| self.logical_name.clone());
    *slot = Some(strategies.resolve_name(&token)?);

    let caller_tags = std::mem::take(&mut self.tags);
    match self.args.tags_slot() {
      Some(slot) => {
        let mut existing = std::mem::take(slot);
        existing.extend(caller_tags);
        *slot = strategies.merge_tags(existing)?;
      }
      None if !caller_tags.is_empty() => {
        return Err(BuildError::configuration(
          A::KIND,
          self.logical_name.as_str(),
          "this resource kind does not carry tags",
        ));
      }
      None => {}
    }
    Ok(())
  }

  fn validate(&self) -> Result<(), BuildError> {
    match self.args.missing_field() {
      Some(field) => Err(BuildError::Validation {
        resource: A::KIND,
        name: self.logical_name.clone(),
        field,
      }),
      None => Ok(()),
    }
  }

  fn materialize(mut self, options: ResourceOptions) -> Result<ResourceHandle, BuildError> {
    let name = self.args.name_slot().clone().unwrap_or_else(|| self.logical_name.clone());
    let inputs = serde_json::to_value(&self.args)?;
    let BuilderBase {
      logical_name,
      deployment,
      context,
      ..
    } = self;

    let request = ResourceRequest {
      type_token: A::TYPE_TOKEN,
      logical_name,
      name,
      inputs,
      parent: context.parent,
      provider: context.provider,
      options: context.options.merge(options),
    };
    info!(
      kind = A::KIND,
      logical_name = %request.logical_name,
      name = %request.name,
      "creating resource"
    );
    Ok(deployment.engine().create_resource(request)?)
  }
}

/// Contract implemented by every top-level resource builder.
///
/// Implementors provide access to their [`BuilderBase`] and, when they
/// collect sub-profiles, override [`ResourceBuilder::fold_fragments`].
/// Everything else is provided.
pub trait ResourceBuilder: Sized {
  type Args: Arguments;

  fn base(&self) -> &BuilderBase<Self::Args>;

  fn base_mut(&mut self) -> &mut BuilderBase<Self::Args>;

  fn into_base(self) -> BuilderBase<Self::Args>;

  /// Move pending sub-profiles into the argument record.
  ///
  /// Runs after the strategies were applied and before required fields are
  /// checked. Uniqueness violations are reported here.
  fn fold_fragments(&mut self) -> Result<(), BuildError> {
    Ok(())
  }

  fn arguments(&self) -> &Self::Args {
    self.base().args()
  }

  fn logical_name(&self) -> &str {
    self.base().logical_name()
  }

  /// Explicit name token, used instead of the logical name when the naming
  /// strategy runs.
  fn name(mut self, name: impl Into<String>) -> Self {
    *self.base_mut().args_mut().name_slot() = Some(name.into());
    self
  }

  fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.base_mut().tags.insert(key.into(), value.into());
    self
  }

  fn tags<I, K, V>(mut self, tags: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    self
      .base_mut()
      .tags
      .extend(tags.into_iter().map(|(k, v)| (k.into(), v.into())));
    self
  }

  fn parent(mut self, parent: &ResourceHandle) -> Self {
    self.base_mut().context.parent = Some(parent.clone());
    self
  }

  fn provider(mut self, provider: ProviderRef) -> Self {
    self.base_mut().context.provider = Some(provider);
    self
  }

  fn depends_on(mut self, dependency: &ResourceHandle) -> Self {
    self.base_mut().context.options.depends_on.push(dependency.clone());
    self
  }

  fn protect(mut self) -> Self {
    self.base_mut().context.options.protect = true;
    self
  }

  /// Finalize with no extra options.
  fn build(self) -> Result<ResourceHandle, BuildError> {
    self.build_with(ResourceOptions::default())
  }

  /// Finalize, merging `options` over the ones carried by the context.
  fn build_with(mut self, options: ResourceOptions) -> Result<ResourceHandle, BuildError> {
    self.base_mut().apply_strategies()?;
    self.fold_fragments()?;
    let base = self.into_base();
    base.validate()?;
    debug!(kind = Self::Args::KIND, logical_name = base.logical_name(), "builder validated");
    base.materialize(options)
  }
}
