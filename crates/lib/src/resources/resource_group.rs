use serde::Serialize;

use crate::builder::{Arguments, BuilderBase, Deployment, ResourceBuilder, first_missing};
use crate::context::ResourceContext;
use crate::strategy::Tags;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupArgs {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_group_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub managed_by: Option<String>,
  #[serde(skip_serializing_if = "Tags::is_empty")]
  pub tags: Tags,
}

impl Arguments for ResourceGroupArgs {
  const TYPE_TOKEN: &'static str = "azure-native:resources:ResourceGroup";
  const KIND: &'static str = "resource group";

  fn name_slot(&mut self) -> &mut Option<String> {
    &mut self.resource_group_name
  }

  fn tags_slot(&mut self) -> Option<&mut Tags> {
    Some(&mut self.tags)
  }

  fn missing_field(&self) -> Option<&'static str> {
    first_missing(&[("location", self.location.is_some())])
  }
}

#[derive(Debug)]
pub struct ResourceGroupBuilder {
  base: BuilderBase<ResourceGroupArgs>,
}

impl ResourceGroupBuilder {
  pub fn new(deployment: &Deployment, logical_name: &str) -> Self {
    Self::with_context(deployment, logical_name, ResourceContext::new())
  }

  pub fn with_context(deployment: &Deployment, logical_name: &str, context: ResourceContext) -> Self {
    Self {
      base: BuilderBase::new(deployment, logical_name, context, ResourceGroupArgs::default()),
    }
  }

  pub fn location(mut self, location: impl Into<String>) -> Self {
    self.base.args_mut().location = Some(location.into());
    self
  }

  /// ID of the resource that manages this group.
  pub fn managed_by(mut self, resource_id: impl Into<String>) -> Self {
    self.base.args_mut().managed_by = Some(resource_id.into());
    self
  }
}

impl ResourceBuilder for ResourceGroupBuilder {
  type Args = ResourceGroupArgs;

  fn base(&self) -> &BuilderBase<ResourceGroupArgs> {
    &self.base
  }

  fn base_mut(&mut self) -> &mut BuilderBase<ResourceGroupArgs> {
    &mut self.base
  }

  fn into_base(self) -> BuilderBase<ResourceGroupArgs> {
    self.base
  }
}
