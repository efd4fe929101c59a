//! Nested builders for sub-resources that only exist inside a parent.
//!
//! An agent pool has no lifecycle of its own: it is a profile embedded in a
//! managed cluster's argument record. It is still configured with the same
//! fluent idiom as a top-level resource:
//!
//! ```ignore
//! let cluster = deployment
//!   .managed_cluster("mc1")
//!   .location("westeurope")
//!   .add_agent_pool()      // Nested<ManagedClusterBuilder, AgentPoolBuilder>
//!   .name("ap1")
//!   .availability_zones([1, 2, 3])
//!   .build()?              // folds the profile, returns the cluster builder
//!   .dns_prefix("mc1-dns")
//!   .build()?;
//! ```
//!
//! The pieces:
//!
//! - [`Fragment`]: a child builder that can hand over its finished item once
//! - [`Composite`]: a parent builder that collects items of a fragment type
//! - [`Nested`]: owns the parent while the child is configured, and gives it
//!   back from [`Nested::build`]
//! - [`AsChild`]: lets fluent extension traits target both a detached child
//!   builder and one nested inside a parent

use tracing::debug;

use super::types::BuildError;

/// A child builder whose accumulated item is folded into a parent.
pub trait Fragment {
  type Item;

  /// Kind used in errors and logs.
  const KIND: &'static str;

  /// Validate and hand over the finished item.
  ///
  /// Fails with [`BuildError::Configuration`] when required fields are unset
  /// or when the item has already been taken.
  fn take_fragment(&mut self) -> Result<Self::Item, BuildError>;

  /// Fold this fragment into `parent` exactly once.
  fn fold_into<P>(&mut self, parent: &mut P) -> Result<(), BuildError>
  where
    Self: Sized,
    P: Composite<Self>,
  {
    let item = self.take_fragment()?;
    parent.push_fragment(item);
    debug!(kind = Self::KIND, "folded fragment into parent");
    Ok(())
  }
}

/// A parent builder that collects fragments of type `F`.
pub trait Composite<F: Fragment> {
  fn push_fragment(&mut self, item: F::Item);
}

/// Access to the child builder a fluent setter should mutate.
pub trait AsChild<C> {
  fn child_mut(&mut self) -> &mut C;
}

/// A child builder `C` opened from, and owning, its parent builder `P`.
#[derive(Debug)]
pub struct Nested<P, C> {
  parent: P,
  child: C,
}

impl<P, C> Nested<P, C> {
  pub(crate) fn new(parent: P, child: C) -> Self {
    Self { parent, child }
  }
}

impl<P, C> Nested<P, C>
where
  C: Fragment,
  P: Composite<C>,
{
  /// Fold the child into the parent and return the parent.
  ///
  /// The parent is consumed: when the fold fails it is dropped together with
  /// everything configured on it. Configure the child detached and call
  /// [`Fragment::fold_into`] to keep the parent on failure.
  pub fn build(self) -> Result<P, BuildError> {
    let Nested { mut parent, mut child } = self;
    child.fold_into(&mut parent)?;
    Ok(parent)
  }
}

impl<P, C> AsChild<C> for Nested<P, C> {
  fn child_mut(&mut self) -> &mut C {
    &mut self.child
  }
}
