use serde::Serialize;

use crate::builder::{Arguments, BuilderBase, Deployment, ResourceBuilder, first_missing};
use crate::context::ResourceContext;
use crate::strategy::Tags;

use super::SubResource;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSpace {
  pub address_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DhcpOptions {
  pub dns_servers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetworkArgs {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub virtual_network_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_group_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  pub address_space: AddressSpace,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dhcp_options: Option<DhcpOptions>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub enable_ddos_protection: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ddos_protection_plan: Option<SubResource>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub enable_vm_protection: Option<bool>,
  #[serde(skip_serializing_if = "Tags::is_empty")]
  pub tags: Tags,
}

impl Arguments for VirtualNetworkArgs {
  const TYPE_TOKEN: &'static str = "azure-native:network:VirtualNetwork";
  const KIND: &'static str = "virtual network";

  fn name_slot(&mut self) -> &mut Option<String> {
    &mut self.virtual_network_name
  }

  fn tags_slot(&mut self) -> Option<&mut Tags> {
    Some(&mut self.tags)
  }

  fn missing_field(&self) -> Option<&'static str> {
    first_missing(&[
      ("location", self.location.is_some()),
      ("addressSpace", !self.address_space.address_prefixes.is_empty()),
    ])
  }
}

#[derive(Debug)]
pub struct VirtualNetworkBuilder {
  base: BuilderBase<VirtualNetworkArgs>,
}

impl VirtualNetworkBuilder {
  pub fn new(deployment: &Deployment, logical_name: &str) -> Self {
    Self::with_context(deployment, logical_name, ResourceContext::new())
  }

  pub fn with_context(deployment: &Deployment, logical_name: &str, context: ResourceContext) -> Self {
    Self {
      base: BuilderBase::new(deployment, logical_name, context, VirtualNetworkArgs::default()),
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

  /// Add a CIDR block to the address space. Repeated calls accumulate.
  pub fn address_space(mut self, cidr: impl Into<String>) -> Self {
    self.base.args_mut().address_space.address_prefixes.push(cidr.into());
    self
  }

  /// Add a custom DNS server. Repeated calls accumulate.
  pub fn dns_server(mut self, address: impl Into<String>) -> Self {
    self
      .base
      .args_mut()
      .dhcp_options
      .get_or_insert_with(DhcpOptions::default)
      .dns_servers
      .push(address.into());
    self
  }

  pub fn ddos_protection_plan(mut self, plan_id: impl Into<String>) -> Self {
    let args = self.base.args_mut();
    args.enable_ddos_protection = Some(true);
    args.ddos_protection_plan = Some(SubResource::new(plan_id));
    self
  }

  pub fn enable_vm_protection(mut self) -> Self {
    self.base.args_mut().enable_vm_protection = Some(true);
    self
  }
}

impl ResourceBuilder for VirtualNetworkBuilder {
  type Args = VirtualNetworkArgs;

  fn base(&self) -> &BuilderBase<VirtualNetworkArgs> {
    &self.base
  }

  fn base_mut(&mut self) -> &mut BuilderBase<VirtualNetworkArgs> {
    &mut self.base
  }

  fn into_base(self) -> BuilderBase<VirtualNetworkArgs> {
    self.base
  }
}
