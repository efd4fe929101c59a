use serde::Serialize;

use crate::builder::{Arguments, BuilderBase, Deployment, ResourceBuilder, first_missing};
use crate::context::ResourceContext;
use crate::strategy::Tags;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseSku {
  /// Service objective, e.g. `S0` or `GP_Gen5_2`.
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tier: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlDatabaseArgs {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub database_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_group_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub server_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sku: Option<DatabaseSku>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_size_bytes: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub collation: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub zone_redundant: Option<bool>,
  #[serde(skip_serializing_if = "Tags::is_empty")]
  pub tags: Tags,
}

impl Arguments for SqlDatabaseArgs {
  const TYPE_TOKEN: &'static str = "azure-native:sql:Database";
  const KIND: &'static str = "sql database";

  fn name_slot(&mut self) -> &mut Option<String> {
    &mut self.database_name
  }

  fn tags_slot(&mut self) -> Option<&mut Tags> {
    Some(&mut self.tags)
  }

  fn missing_field(&self) -> Option<&'static str> {
    first_missing(&[
      ("resourceGroupName", self.resource_group_name.is_some()),
      ("serverName", self.server_name.is_some()),
      ("location", self.location.is_some()),
      ("sku.name", self.sku.as_ref().is_none_or(|sku| !sku.name.is_empty())),
    ])
  }
}

#[derive(Debug)]
pub struct SqlDatabaseBuilder {
  base: BuilderBase<SqlDatabaseArgs>,
}

impl SqlDatabaseBuilder {
  pub fn new(deployment: &Deployment, logical_name: &str) -> Self {
    Self::with_context(deployment, logical_name, ResourceContext::new())
  }

  pub fn with_context(deployment: &Deployment, logical_name: &str, context: ResourceContext) -> Self {
    Self {
      base: BuilderBase::new(deployment, logical_name, context, SqlDatabaseArgs::default()),
    }
  }

  pub fn resource_group(mut self, resource_group_name: impl Into<String>) -> Self {
    self.base.args_mut().resource_group_name = Some(resource_group_name.into());
    self
  }

  /// Name of the server hosting the database.
  pub fn on_server(mut self, server_name: impl Into<String>) -> Self {
    self.base.args_mut().server_name = Some(server_name.into());
    self
  }

  pub fn location(mut self, location: impl Into<String>) -> Self {
    self.base.args_mut().location = Some(location.into());
    self
  }

  pub fn service_objective(mut self, name: impl Into<String>) -> Self {
    self.sku_mut().name = name.into();
    self
  }

  pub fn tier(mut self, tier: impl Into<String>) -> Self {
    self.sku_mut().tier = Some(tier.into());
    self
  }

  pub fn capacity(mut self, capacity: u32) -> Self {
    self.sku_mut().capacity = Some(capacity);
    self
  }

  pub fn max_size_bytes(mut self, bytes: u64) -> Self {
    self.base.args_mut().max_size_bytes = Some(bytes);
    self
  }

  pub fn collation(mut self, collation: impl Into<String>) -> Self {
    self.base.args_mut().collation = Some(collation.into());
    self
  }

  pub fn zone_redundant(mut self) -> Self {
    self.base.args_mut().zone_redundant = Some(true);
    self
  }

  fn sku_mut(&mut self) -> &mut DatabaseSku {
    self.base.args_mut().sku.get_or_insert_with(DatabaseSku::default)
  }
}

impl ResourceBuilder for SqlDatabaseBuilder {
  type Args = SqlDatabaseArgs;

  fn base(&self) -> &BuilderBase<SqlDatabaseArgs> {
    &self.base
  }

  fn base_mut(&mut self) -> &mut BuilderBase<SqlDatabaseArgs> {
    &mut self.base
  }

  fn into_base(self) -> BuilderBase<SqlDatabaseArgs> {
    self.base
  }
}
