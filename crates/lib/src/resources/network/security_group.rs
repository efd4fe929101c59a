use serde::Serialize;

use crate::builder::{Arguments, BuilderBase, Deployment, ResourceBuilder, first_missing};
use crate::context::ResourceContext;
use crate::strategy::Tags;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSecurityGroupArgs {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub application_security_group_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_group_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(skip_serializing_if = "Tags::is_empty")]
  pub tags: Tags,
}

impl Arguments for ApplicationSecurityGroupArgs {
  const TYPE_TOKEN: &'static str = "azure-native:network:ApplicationSecurityGroup";
  const KIND: &'static str = "application security group";

  fn name_slot(&mut self) -> &mut Option<String> {
    &mut self.application_security_group_name
  }

  fn tags_slot(&mut self) -> Option<&mut Tags> {
    Some(&mut self.tags)
  }

  fn missing_field(&self) -> Option<&'static str> {
    first_missing(&[
      ("resourceGroupName", self.resource_group_name.is_some()),
      ("location", self.location.is_some()),
    ])
  }
}

#[derive(Debug)]
pub struct ApplicationSecurityGroupBuilder {
  base: BuilderBase<ApplicationSecurityGroupArgs>,
}

impl ApplicationSecurityGroupBuilder {
  pub fn new(deployment: &Deployment, logical_name: &str) -> Self {
    Self::with_context(deployment, logical_name, ResourceContext::new())
  }

  pub fn with_context(deployment: &Deployment, logical_name: &str, context: ResourceContext) -> Self {
    Self {
      base: BuilderBase::new(deployment, logical_name, context, ApplicationSecurityGroupArgs::default()),
    }
  }

  pub fn resource_group(mut self, resource_group_name: impl Into<String>) -> Self {
    self.base.args_mut().resource_group_name = Some(resource_group_name.into());
    self
  }

  pub fn location(mut self, location: impl Into<String>) -> Self {
    self.base.args_mut().location = Some(location.into());
    self
  }
}

impl ResourceBuilder for ApplicationSecurityGroupBuilder {
  type Args = ApplicationSecurityGroupArgs;

  fn base(&self) -> &BuilderBase<ApplicationSecurityGroupArgs> {
    &self.base
  }

  fn base_mut(&mut self) -> &mut BuilderBase<ApplicationSecurityGroupArgs> {
    &mut self.base
  }

  fn into_base(self) -> BuilderBase<ApplicationSecurityGroupArgs> {
    self.base
  }
}
