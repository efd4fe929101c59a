//! Network interfaces and their IP configurations.
//!
//! IP configurations are sub-resources of the interface. They are opened
//! with [`NetworkInterfaceBuilder::add_ip_configuration`], configured through
//! [`IpConfigurationExt`] and folded back when the nested builder is built.
//! At the interface's build:
//!
//! - configuration names must be unique
//! - at most one configuration may be primary; with none marked, the first
//!   one becomes primary
//! - at least one configuration is required

use std::collections::BTreeSet;

use serde::Serialize;

use crate::builder::nested::{AsChild, Composite, Fragment, Nested};
use crate::builder::{
  Arguments, BuildError, BuilderBase, Deployment, ResourceBuilder, first_missing, replace_choice,
};
use crate::context::ResourceContext;
use crate::strategy::Tags;

use super::SubResource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IpAllocationMethod {
  Dynamic,
  Static,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpConfiguration {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subnet: Option<SubResource>,
  #[serde(rename = "privateIPAddress", skip_serializing_if = "Option::is_none")]
  pub private_ip_address: Option<String>,
  #[serde(rename = "privateIPAllocationMethod")]
  pub private_ip_allocation_method: IpAllocationMethod,
  #[serde(rename = "publicIPAddress", skip_serializing_if = "Option::is_none")]
  pub public_ip_address: Option<SubResource>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub primary: Option<bool>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub application_security_groups: Vec<SubResource>,
}

/// Builder for one IP configuration.
///
/// Usually opened from [`NetworkInterfaceBuilder::add_ip_configuration`]; a
/// detached builder can be folded with [`Fragment::fold_into`].
#[derive(Debug, Clone, Default)]
pub struct IpConfigurationBuilder {
  name: Option<String>,
  subnet: Option<SubResource>,
  private_ip_address: Option<String>,
  allocation: Option<IpAllocationMethod>,
  public_ip_address: Option<SubResource>,
  primary: bool,
  application_security_groups: Vec<SubResource>,
  folded: bool,
}

impl IpConfigurationBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  fn label(&self) -> &str {
    self.name.as_deref().unwrap_or("<unnamed>")
  }
}

impl AsChild<IpConfigurationBuilder> for IpConfigurationBuilder {
  fn child_mut(&mut self) -> &mut IpConfigurationBuilder {
    self
  }
}

impl Fragment for IpConfigurationBuilder {
  type Item = IpConfiguration;
  const KIND: &'static str = "ip configuration";

  fn take_fragment(&mut self) -> Result<IpConfiguration, BuildError> {
    if self.folded {
      return Err(BuildError::configuration(Self::KIND, self.label(), "already folded into its parent"));
    }
    let Some(name) = self.name.clone() else {
      return Err(BuildError::configuration(Self::KIND, self.label(), "a name is required"));
    };
    let allocation = self.allocation.unwrap_or(IpAllocationMethod::Dynamic);
    if allocation == IpAllocationMethod::Static && self.private_ip_address.is_none() {
      return Err(BuildError::configuration(
        Self::KIND,
        name,
        "static allocation requires a private IP address",
      ));
    }

    let taken = std::mem::take(self);
    self.folded = true;
    Ok(IpConfiguration {
      name,
      subnet: taken.subnet,
      private_ip_address: taken.private_ip_address,
      private_ip_allocation_method: allocation,
      public_ip_address: taken.public_ip_address,
      primary: taken.primary.then_some(true),
      application_security_groups: taken.application_security_groups,
    })
  }
}

/// Setters for an IP configuration, detached or nested in an interface.
pub trait IpConfigurationExt: AsChild<IpConfigurationBuilder> + Sized {
  fn name(mut self, name: impl Into<String>) -> Self {
    self.child_mut().name = Some(name.into());
    self
  }

  fn subnet(mut self, subnet_id: impl Into<String>) -> Self {
    self.child_mut().subnet = Some(SubResource::new(subnet_id));
    self
  }

  /// Use a fixed private address. Replaces an earlier dynamic choice.
  fn static_private_ip(mut self, address: impl Into<String>) -> Self {
    let child = self.child_mut();
    let label = child.label().to_string();
    replace_choice(
      IpConfigurationBuilder::KIND,
      &label,
      "privateIPAllocationMethod",
      &mut child.allocation,
      IpAllocationMethod::Static,
    );
    child.private_ip_address = Some(address.into());
    self
  }

  /// Let the platform assign the private address. Replaces an earlier static
  /// choice and drops its address.
  fn dynamic_private_ip(mut self) -> Self {
    let child = self.child_mut();
    let label = child.label().to_string();
    replace_choice(
      IpConfigurationBuilder::KIND,
      &label,
      "privateIPAllocationMethod",
      &mut child.allocation,
      IpAllocationMethod::Dynamic,
    );
    child.private_ip_address = None;
    self
  }

  fn public_ip(mut self, public_ip_id: impl Into<String>) -> Self {
    self.child_mut().public_ip_address = Some(SubResource::new(public_ip_id));
    self
  }

  fn primary(mut self) -> Self {
    self.child_mut().primary = true;
    self
  }

  /// Add an application security group. Repeated calls accumulate.
  fn application_security_group(mut self, asg_id: impl Into<String>) -> Self {
    self
      .child_mut()
      .application_security_groups
      .push(SubResource::new(asg_id));
    self
  }
}

impl<T: AsChild<IpConfigurationBuilder>> IpConfigurationExt for T {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceDnsSettings {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub dns_servers: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub internal_dns_name_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedLocation {
  pub name: String,
  #[serde(rename = "type")]
  pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceArgs {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub network_interface_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_group_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub ip_configurations: Vec<IpConfiguration>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dns_settings: Option<NetworkInterfaceDnsSettings>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub enable_accelerated_networking: Option<bool>,
  #[serde(rename = "enableIPForwarding", skip_serializing_if = "Option::is_none")]
  pub enable_ip_forwarding: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub extended_location: Option<ExtendedLocation>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub network_security_group: Option<SubResource>,
  #[serde(skip_serializing_if = "Tags::is_empty")]
  pub tags: Tags,
}

impl Arguments for NetworkInterfaceArgs {
  const TYPE_TOKEN: &'static str = "azure-native:network:NetworkInterface";
  const KIND: &'static str = "network interface";

  fn name_slot(&mut self) -> &mut Option<String> {
    &mut self.network_interface_name
  }

  fn tags_slot(&mut self) -> Option<&mut Tags> {
    Some(&mut self.tags)
  }

  fn missing_field(&self) -> Option<&'static str> {
    first_missing(&[
      ("resourceGroupName", self.resource_group_name.is_some()),
      ("location", self.location.is_some()),
      ("ipConfigurations", !self.ip_configurations.is_empty()),
    ])
  }
}

#[derive(Debug)]
pub struct NetworkInterfaceBuilder {
  base: BuilderBase<NetworkInterfaceArgs>,
  ip_configurations: Vec<IpConfiguration>,
}

impl NetworkInterfaceBuilder {
  pub fn new(deployment: &Deployment, logical_name: &str) -> Self {
    Self::with_context(deployment, logical_name, ResourceContext::new())
  }

  pub fn with_context(deployment: &Deployment, logical_name: &str, context: ResourceContext) -> Self {
    Self {
      base: BuilderBase::new(deployment, logical_name, context, NetworkInterfaceArgs::default()),
      ip_configurations: Vec::new(),
    }
  }

  /// IP configurations folded so far, in the order they were added.
  pub fn ip_configurations(&self) -> &[IpConfiguration] {
    &self.ip_configurations
  }

  pub fn resource_group(mut self, resource_group_name: impl Into<String>) -> Self {
    self.base.args_mut().resource_group_name = Some(resource_group_name.into());
    self
  }

  pub fn location(mut self, location: impl Into<String>) -> Self {
    self.base.args_mut().location = Some(location.into());
    self
  }

  /// Open a nested IP configuration builder.
  pub fn add_ip_configuration(self) -> Nested<Self, IpConfigurationBuilder> {
    Nested::new(self, IpConfigurationBuilder::new())
  }

  /// Add a custom DNS server. Repeated calls accumulate.
  pub fn dns_server(mut self, address: impl Into<String>) -> Self {
    self
      .base
      .args_mut()
      .dns_settings
      .get_or_insert_with(NetworkInterfaceDnsSettings::default)
      .dns_servers
      .push(address.into());
    self
  }

  pub fn internal_dns_name_label(mut self, label: impl Into<String>) -> Self {
    self
      .base
      .args_mut()
      .dns_settings
      .get_or_insert_with(NetworkInterfaceDnsSettings::default)
      .internal_dns_name_label = Some(label.into());
    self
  }

  pub fn enable_accelerated_networking(mut self) -> Self {
    self.base.args_mut().enable_accelerated_networking = Some(true);
    self
  }

  pub fn enable_ip_forwarding(mut self) -> Self {
    self.base.args_mut().enable_ip_forwarding = Some(true);
    self
  }

  /// Place the interface in an edge zone.
  pub fn edge_zone(mut self, name: impl Into<String>) -> Self {
    self.base.args_mut().extended_location = Some(ExtendedLocation {
      name: name.into(),
      kind: "EdgeZone".to_string(),
    });
    self
  }

  pub fn network_security_group(mut self, nsg_id: impl Into<String>) -> Self {
    self.base.args_mut().network_security_group = Some(SubResource::new(nsg_id));
    self
  }
}

impl Composite<IpConfigurationBuilder> for NetworkInterfaceBuilder {
  fn push_fragment(&mut self, item: IpConfiguration) {
    self.ip_configurations.push(item);
  }
}

impl ResourceBuilder for NetworkInterfaceBuilder {
  type Args = NetworkInterfaceArgs;

  fn base(&self) -> &BuilderBase<NetworkInterfaceArgs> {
    &self.base
  }

  fn base_mut(&mut self) -> &mut BuilderBase<NetworkInterfaceArgs> {
    &mut self.base
  }

  fn into_base(self) -> BuilderBase<NetworkInterfaceArgs> {
    self.base
  }

  fn fold_fragments(&mut self) -> Result<(), BuildError> {
    let mut configurations = std::mem::take(&mut self.ip_configurations);
    let logical_name = self.base.logical_name();

    let mut seen = BTreeSet::new();
    for config in &configurations {
      if !seen.insert(config.name.as_str()) {
        return Err(BuildError::configuration(
          NetworkInterfaceArgs::KIND,
          logical_name,
          format!("duplicate ip configuration name '{}'", config.name),
        ));
      }
    }

    let primaries = configurations.iter().filter(|c| c.primary == Some(true)).count();
    if primaries > 1 {
      return Err(BuildError::configuration(
        NetworkInterfaceArgs::KIND,
        logical_name,
        format!("{} ip configurations are marked primary", primaries),
      ));
    }
    if primaries == 0 {
      if let Some(first) = configurations.first_mut() {
        first.primary = Some(true);
      }
    }

    self.base.args_mut().ip_configurations = configurations;
    Ok(())
  }
}
