use serde::Serialize;

use crate::builder::{Arguments, BuilderBase, Deployment, ResourceBuilder, first_missing};
use crate::context::ResourceContext;

use super::{NetworkPolicies, SubResource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEndpoint {
  pub service: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
  pub name: String,
  pub service_name: String,
}

/// Subnet arguments. Subnets are child resources of a virtual network and
/// carry no tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetArgs {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subnet_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_group_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub virtual_network_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address_prefix: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub network_security_group: Option<SubResource>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub route_table: Option<SubResource>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub service_endpoints: Vec<ServiceEndpoint>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub delegations: Vec<Delegation>,
  pub private_endpoint_network_policies: NetworkPolicies,
  pub private_link_service_network_policies: NetworkPolicies,
}

impl Default for SubnetArgs {
  fn default() -> Self {
    Self {
      subnet_name: None,
      resource_group_name: None,
      virtual_network_name: None,
      address_prefix: None,
      network_security_group: None,
      route_table: None,
      service_endpoints: Vec::new(),
      delegations: Vec::new(),
      private_endpoint_network_policies: NetworkPolicies::Enabled,
      private_link_service_network_policies: NetworkPolicies::Enabled,
    }
  }
}

impl Arguments for SubnetArgs {
  const TYPE_TOKEN: &'static str = "azure-native:network:Subnet";
  const KIND: &'static str = "subnet";

  fn name_slot(&mut self) -> &mut Option<String> {
    &mut self.subnet_name
  }

  fn missing_field(&self) -> Option<&'static str> {
    first_missing(&[
      ("resourceGroupName", self.resource_group_name.is_some()),
      ("virtualNetworkName", self.virtual_network_name.is_some()),
      ("addressPrefix", self.address_prefix.is_some()),
    ])
  }
}

#[derive(Debug)]
pub struct SubnetBuilder {
  base: BuilderBase<SubnetArgs>,
}

impl SubnetBuilder {
  pub fn new(deployment: &Deployment, logical_name: &str) -> Self {
    Self::with_context(deployment, logical_name, ResourceContext::new())
  }

  pub fn with_context(deployment: &Deployment, logical_name: &str, context: ResourceContext) -> Self {
    Self {
      base: BuilderBase::new(deployment, logical_name, context, SubnetArgs::default()),
    }
  }

  pub fn resource_group(mut self, resource_group_name: impl Into<String>) -> Self {
    self.base.args_mut().resource_group_name = Some(resource_group_name.into());
    self
  }

  /// Name of the virtual network the subnet belongs to.
  pub fn in_vnet(mut self, virtual_network_name: impl Into<String>) -> Self {
    self.base.args_mut().virtual_network_name = Some(virtual_network_name.into());
    self
  }

  pub fn address_prefix(mut self, cidr: impl Into<String>) -> Self {
    self.base.args_mut().address_prefix = Some(cidr.into());
    self
  }

  pub fn network_security_group(mut self, nsg_id: impl Into<String>) -> Self {
    self.base.args_mut().network_security_group = Some(SubResource::new(nsg_id));
    self
  }

  pub fn route_table(mut self, route_table_id: impl Into<String>) -> Self {
    self.base.args_mut().route_table = Some(SubResource::new(route_table_id));
    self
  }

  /// Add a service endpoint, e.g. `Microsoft.Sql`. Repeated calls accumulate.
  pub fn service_endpoint(mut self, service: impl Into<String>) -> Self {
    self.base.args_mut().service_endpoints.push(ServiceEndpoint {
      service: service.into(),
      locations: Vec::new(),
    });
    self
  }

  /// Delegate the subnet to a service, e.g. `Microsoft.Web/serverFarms`.
  pub fn delegate(mut self, name: impl Into<String>, service_name: impl Into<String>) -> Self {
    self.base.args_mut().delegations.push(Delegation {
      name: name.into(),
      service_name: service_name.into(),
    });
    self
  }

  pub fn private_endpoint_network_policies(mut self, policies: NetworkPolicies) -> Self {
    self.base.args_mut().private_endpoint_network_policies = policies;
    self
  }

  pub fn private_link_service_network_policies(mut self, policies: NetworkPolicies) -> Self {
    self.base.args_mut().private_link_service_network_policies = policies;
    self
  }
}

impl ResourceBuilder for SubnetBuilder {
  type Args = SubnetArgs;

  fn base(&self) -> &BuilderBase<SubnetArgs> {
    &self.base
  }

  fn base_mut(&mut self) -> &mut BuilderBase<SubnetArgs> {
    &mut self.base
  }

  fn into_base(self) -> BuilderBase<SubnetArgs> {
    self.base
  }
}
