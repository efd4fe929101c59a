use serde::Serialize;

use crate::builder::{Arguments, BuilderBase, Deployment, ResourceBuilder, first_missing};
use crate::context::ResourceContext;
use crate::strategy::Tags;

pub const DEFAULT_SQL_SERVER_VERSION: &str = "12.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MinimalTlsVersion {
  #[serde(rename = "1.0")]
  Tls1_0,
  #[serde(rename = "1.1")]
  Tls1_1,
  #[serde(rename = "1.2")]
  Tls1_2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PublicNetworkAccess {
  Enabled,
  Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlServerArgs {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub server_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_group_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub administrator_login: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub administrator_login_password: Option<String>,
  pub version: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub minimal_tls_version: Option<MinimalTlsVersion>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub public_network_access: Option<PublicNetworkAccess>,
  #[serde(skip_serializing_if = "Tags::is_empty")]
  pub tags: Tags,
}

impl Default for SqlServerArgs {
  fn default() -> Self {
    Self {
      server_name: None,
      resource_group_name: None,
      location: None,
      administrator_login: None,
      administrator_login_password: None,
      version: DEFAULT_SQL_SERVER_VERSION.to_string(),
      minimal_tls_version: None,
      public_network_access: None,
      tags: Tags::new(),
    }
  }
}

impl Arguments for SqlServerArgs {
  const TYPE_TOKEN: &'static str = "azure-native:sql:Server";
  const KIND: &'static str = "sql server";

  fn name_slot(&mut self) -> &mut Option<String> {
    &mut self.server_name
  }

  fn tags_slot(&mut self) -> Option<&mut Tags> {
    Some(&mut self.tags)
  }

  fn missing_field(&self) -> Option<&'static str> {
    first_missing(&[
      ("resourceGroupName", self.resource_group_name.is_some()),
      ("location", self.location.is_some()),
      ("administratorLogin", self.administrator_login.is_some()),
      ("administratorLoginPassword", self.administrator_login_password.is_some()),
    ])
  }
}

#[derive(Debug)]
pub struct SqlServerBuilder {
  base: BuilderBase<SqlServerArgs>,
}

impl SqlServerBuilder {
  pub fn new(deployment: &Deployment, logical_name: &str) -> Self {
    Self::with_context(deployment, logical_name, ResourceContext::new())
  }

  pub fn with_context(deployment: &Deployment, logical_name: &str, context: ResourceContext) -> Self {
    Self {
      base: BuilderBase::new(deployment, logical_name, context, SqlServerArgs::default()),
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

  pub fn administrator(mut self, login: impl Into<String>, password: impl Into<String>) -> Self {
    let args = self.base.args_mut();
    args.administrator_login = Some(login.into());
    args.administrator_login_password = Some(password.into());
    self
  }

  pub fn version(mut self, version: impl Into<String>) -> Self {
    self.base.args_mut().version = version.into();
    self
  }

  pub fn minimal_tls_version(mut self, version: MinimalTlsVersion) -> Self {
    self.base.args_mut().minimal_tls_version = Some(version);
    self
  }

  pub fn public_network_access(mut self, access: PublicNetworkAccess) -> Self {
    self.base.args_mut().public_network_access = Some(access);
    self
  }
}

impl ResourceBuilder for SqlServerBuilder {
  type Args = SqlServerArgs;

  fn base(&self) -> &BuilderBase<SqlServerArgs> {
    &self.base
  }

  fn base_mut(&mut self) -> &mut BuilderBase<SqlServerArgs> {
    &mut self.base
  }

  fn into_base(self) -> BuilderBase<SqlServerArgs> {
    self.base
  }
}
