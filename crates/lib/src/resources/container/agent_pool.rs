//! Agent pool profiles.
//!
//! An agent pool only exists inside a managed cluster's argument record.
//! [`AgentPoolBuilder`] accumulates one [`AgentPoolProfile`] and is folded
//! into its cluster either through
//! [`ManagedClusterBuilder::add_agent_pool`](super::ManagedClusterBuilder::add_agent_pool)
//! or detached, with [`Fragment::fold_into`].
//!
//! A fresh profile carries the defaults:
//!
//! | field        | default                   |
//! |--------------|---------------------------|
//! | vmSize       | `Standard_Ds2_v2`         |
//! | count        | 3                         |
//! | mode         | `System`                  |
//! | maxPods      | 110                       |
//! | osDiskType   | `Managed`                 |
//! | osDiskSizeGB | 128                       |
//! | osType       | `Linux`                   |
//! | type         | `VirtualMachineScaleSets` |

use std::collections::BTreeMap;

use serde::Serialize;

use crate::builder::nested::{AsChild, Fragment};
use crate::builder::{BuildError, replace_choice};

pub const DEFAULT_VM_SIZE: &str = "Standard_Ds2_v2";
pub const DEFAULT_NODE_COUNT: u32 = 3;
pub const DEFAULT_MAX_PODS: u32 = 110;
pub const DEFAULT_OS_DISK_SIZE_GB: u32 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AgentPoolMode {
  #[default]
  System,
  User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OsDiskType {
  #[default]
  Managed,
  Ephemeral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OsType {
  #[default]
  Linux,
  Windows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OsSku {
  Ubuntu,
  #[serde(rename = "CBLMariner")]
  CblMariner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AgentPoolType {
  #[default]
  VirtualMachineScaleSets,
  AvailabilitySet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScaleSetPriority {
  Spot,
  Regular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScaleSetEvictionPolicy {
  Delete,
  Deallocate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GpuInstanceProfile {
  #[serde(rename = "MIG1g")]
  Mig1g,
  #[serde(rename = "MIG2g")]
  Mig2g,
  #[serde(rename = "MIG3g")]
  Mig3g,
  #[serde(rename = "MIG4g")]
  Mig4g,
  #[serde(rename = "MIG7g")]
  Mig7g,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KubeletDiskType {
  #[serde(rename = "OS")]
  Os,
  Temporary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSettings {
  pub max_surge: String,
}

/// One agent pool as embedded in a managed cluster's argument record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPoolProfile {
  pub name: String,
  pub count: u32,
  pub vm_size: String,
  pub mode: AgentPoolMode,
  pub max_pods: u32,
  pub os_disk_type: OsDiskType,
  #[serde(rename = "osDiskSizeGB")]
  pub os_disk_size_gb: u32,
  pub os_type: OsType,
  #[serde(rename = "osSKU", skip_serializing_if = "Option::is_none")]
  pub os_sku: Option<OsSku>,
  #[serde(rename = "type")]
  pub pool_type: AgentPoolType,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub availability_zones: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub enable_auto_scaling: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_count: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_count: Option<u32>,
  #[serde(rename = "enableNodePublicIP", skip_serializing_if = "Option::is_none")]
  pub enable_node_public_ip: Option<bool>,
  #[serde(rename = "nodePublicIPPrefixID", skip_serializing_if = "Option::is_none")]
  pub node_public_ip_prefix_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub enable_encryption_at_host: Option<bool>,
  #[serde(rename = "enableFIPS", skip_serializing_if = "Option::is_none")]
  pub enable_fips: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub gpu_instance_profile: Option<GpuInstanceProfile>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub kubelet_disk_type: Option<KubeletDiskType>,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub node_labels: BTreeMap<String, String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub node_taints: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub orchestrator_version: Option<String>,
  #[serde(rename = "vnetSubnetID", skip_serializing_if = "Option::is_none")]
  pub vnet_subnet_id: Option<String>,
  #[serde(rename = "podSubnetID", skip_serializing_if = "Option::is_none")]
  pub pod_subnet_id: Option<String>,
  #[serde(rename = "proximityPlacementGroupID", skip_serializing_if = "Option::is_none")]
  pub proximity_placement_group_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scale_set_priority: Option<ScaleSetPriority>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scale_set_eviction_policy: Option<ScaleSetEvictionPolicy>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub spot_max_price: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub upgrade_settings: Option<UpgradeSettings>,
}

impl Default for AgentPoolProfile {
  fn default() -> Self {
    Self {
      name: String::new(),
      count: DEFAULT_NODE_COUNT,
      vm_size: DEFAULT_VM_SIZE.to_string(),
      mode: AgentPoolMode::System,
      max_pods: DEFAULT_MAX_PODS,
      os_disk_type: OsDiskType::Managed,
      os_disk_size_gb: DEFAULT_OS_DISK_SIZE_GB,
      os_type: OsType::Linux,
      os_sku: None,
      pool_type: AgentPoolType::VirtualMachineScaleSets,
      availability_zones: Vec::new(),
      enable_auto_scaling: None,
      min_count: None,
      max_count: None,
      enable_node_public_ip: None,
      node_public_ip_prefix_id: None,
      enable_encryption_at_host: None,
      enable_fips: None,
      gpu_instance_profile: None,
      kubelet_disk_type: None,
      node_labels: BTreeMap::new(),
      node_taints: Vec::new(),
      orchestrator_version: None,
      vnet_subnet_id: None,
      pod_subnet_id: None,
      proximity_placement_group_id: None,
      scale_set_priority: None,
      scale_set_eviction_policy: None,
      spot_max_price: None,
      upgrade_settings: None,
    }
  }
}

impl AgentPoolProfile {
  fn check(&self) -> Result<(), String> {
    if let (Some(min), Some(max)) = (self.min_count, self.max_count) {
      if min > max {
        return Err(format!("minCount {} is greater than maxCount {}", min, max));
      }
    }
    if self.enable_auto_scaling == Some(true) {
      let (Some(min), Some(max)) = (self.min_count, self.max_count) else {
        return Err("auto-scaling requires both minCount and maxCount".to_string());
      };
      if self.count < min || self.count > max {
        return Err(format!("count {} is outside [{}, {}]", self.count, min, max));
      }
    }
    let spot_settings = self.spot_max_price.is_some() || self.scale_set_eviction_policy.is_some();
    if spot_settings && self.scale_set_priority != Some(ScaleSetPriority::Spot) {
      return Err("spotMaxPrice and scaleSetEvictionPolicy require Spot priority".to_string());
    }
    Ok(())
  }
}

/// Builder for one agent pool.
#[derive(Debug, Clone, Default)]
pub struct AgentPoolBuilder {
  name: Option<String>,
  profile: AgentPoolProfile,
  /// Explicit OS choice, tracked separately from the defaulted profile field.
  os_choice: Option<OsType>,
  folded: bool,
}

impl AgentPoolBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// A pool named `name` with all defaults.
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
      ..Self::default()
    }
  }

  pub fn profile(&self) -> &AgentPoolProfile {
    &self.profile
  }

  fn label(&self) -> &str {
    self.name.as_deref().unwrap_or("<unnamed>")
  }
}

impl AsChild<AgentPoolBuilder> for AgentPoolBuilder {
  fn child_mut(&mut self) -> &mut AgentPoolBuilder {
    self
  }
}

impl Fragment for AgentPoolBuilder {
  type Item = AgentPoolProfile;
  const KIND: &'static str = "agent pool";

  fn take_fragment(&mut self) -> Result<AgentPoolProfile, BuildError> {
    if self.folded {
      return Err(BuildError::configuration(Self::KIND, self.label(), "already folded into its cluster"));
    }
    let Some(name) = self.name.clone() else {
      return Err(BuildError::configuration(Self::KIND, self.label(), "a name is required"));
    };
    self
      .profile
      .check()
      .map_err(|message| BuildError::configuration(Self::KIND, name.as_str(), message))?;

    let mut profile = std::mem::take(&mut self.profile);
    profile.name = name;
    self.folded = true;
    Ok(profile)
  }
}

/// Fluent setters for an agent pool, detached or nested in a cluster.
pub trait AgentPoolExt: AsChild<AgentPoolBuilder> + Sized {
  fn name(mut self, name: impl Into<String>) -> Self {
    self.child_mut().name = Some(name.into());
    self
  }

  /// Add availability zones. Repeated calls accumulate in call order.
  fn availability_zones<I>(mut self, zones: I) -> Self
  where
    I: IntoIterator<Item = u32>,
  {
    self
      .child_mut()
      .profile
      .availability_zones
      .extend(zones.into_iter().map(|zone| zone.to_string()));
    self
  }

  fn node_count(mut self, count: u32) -> Self {
    self.child_mut().profile.count = count;
    self
  }

  fn enable_auto_scaling(mut self) -> Self {
    self.child_mut().profile.enable_auto_scaling = Some(true);
    self
  }

  fn min_count(mut self, min: u32) -> Self {
    self.child_mut().profile.min_count = Some(min);
    self
  }

  fn max_count(mut self, max: u32) -> Self {
    self.child_mut().profile.max_count = Some(max);
    self
  }

  /// Give every node a public IP, optionally drawn from a prefix.
  fn enable_node_public_ip(mut self, prefix_id: Option<&str>) -> Self {
    let profile = &mut self.child_mut().profile;
    profile.enable_node_public_ip = Some(true);
    profile.node_public_ip_prefix_id = prefix_id.map(str::to_string);
    self
  }

  fn max_pods(mut self, max_pods: u32) -> Self {
    self.child_mut().profile.max_pods = max_pods;
    self
  }

  fn mode(mut self, mode: AgentPoolMode) -> Self {
    self.child_mut().profile.mode = mode;
    self
  }

  fn os_disk_size(mut self, size_gb: u32) -> Self {
    self.child_mut().profile.os_disk_size_gb = size_gb;
    self
  }

  fn os_disk_type(mut self, disk_type: OsDiskType) -> Self {
    self.child_mut().profile.os_disk_type = disk_type;
    self
  }

  /// Run Linux nodes. Replaces an earlier Windows choice.
  fn with_linux(mut self, sku: OsSku) -> Self {
    let child = self.child_mut();
    let label = child.label().to_string();
    replace_choice(AgentPoolBuilder::KIND, &label, "osType", &mut child.os_choice, OsType::Linux);
    child.profile.os_type = OsType::Linux;
    child.profile.os_sku = Some(sku);
    self
  }

  /// Run Windows nodes. Replaces an earlier Linux choice and its SKU.
  fn with_windows(mut self) -> Self {
    let child = self.child_mut();
    let label = child.label().to_string();
    replace_choice(AgentPoolBuilder::KIND, &label, "osType", &mut child.os_choice, OsType::Windows);
    child.profile.os_type = OsType::Windows;
    child.profile.os_sku = None;
    self
  }

  fn pool_type(mut self, pool_type: AgentPoolType) -> Self {
    self.child_mut().profile.pool_type = pool_type;
    self
  }

  fn vm_size(mut self, size: impl Into<String>) -> Self {
    self.child_mut().profile.vm_size = size.into();
    self
  }

  fn enable_encryption_at_host(self) -> Self {
    self.set_encryption_at_host(true)
  }

  fn disable_encryption_at_host(self) -> Self {
    self.set_encryption_at_host(false)
  }

  #[doc(hidden)]
  fn set_encryption_at_host(mut self, enabled: bool) -> Self {
    let child = self.child_mut();
    let label = child.label().to_string();
    replace_choice(
      AgentPoolBuilder::KIND,
      &label,
      "enableEncryptionAtHost",
      &mut child.profile.enable_encryption_at_host,
      enabled,
    );
    self
  }

  fn enable_fips(self) -> Self {
    self.set_fips(true)
  }

  fn disable_fips(self) -> Self {
    self.set_fips(false)
  }

  #[doc(hidden)]
  fn set_fips(mut self, enabled: bool) -> Self {
    let child = self.child_mut();
    let label = child.label().to_string();
    replace_choice(
      AgentPoolBuilder::KIND,
      &label,
      "enableFIPS",
      &mut child.profile.enable_fips,
      enabled,
    );
    self
  }

  fn gpu_instance_profile(mut self, profile: GpuInstanceProfile) -> Self {
    self.child_mut().profile.gpu_instance_profile = Some(profile);
    self
  }

  fn kubelet_disk_type(mut self, disk_type: KubeletDiskType) -> Self {
    self.child_mut().profile.kubelet_disk_type = Some(disk_type);
    self
  }

  /// Add a node label. A repeated key keeps the last value.
  fn add_node_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.child_mut().profile.node_labels.insert(key.into(), value.into());
    self
  }

  /// Add a taint such as `sku=gpu:NoSchedule`. Repeated calls accumulate.
  fn add_node_taint(mut self, taint: impl Into<String>) -> Self {
    self.child_mut().profile.node_taints.push(taint.into());
    self
  }

  fn orchestrator_version(mut self, version: impl Into<String>) -> Self {
    self.child_mut().profile.orchestrator_version = Some(version.into());
    self
  }

  fn pod_subnet_id(mut self, subnet_id: impl Into<String>) -> Self {
    self.child_mut().profile.pod_subnet_id = Some(subnet_id.into());
    self
  }

  fn proximity_placement_group_id(mut self, group_id: impl Into<String>) -> Self {
    self.child_mut().profile.proximity_placement_group_id = Some(group_id.into());
    self
  }

  fn scale_set_eviction_policy(mut self, policy: ScaleSetEvictionPolicy) -> Self {
    self.child_mut().profile.scale_set_eviction_policy = Some(policy);
    self
  }

  fn scale_set_priority(mut self, priority: ScaleSetPriority) -> Self {
    let child = self.child_mut();
    let label = child.label().to_string();
    replace_choice(
      AgentPoolBuilder::KIND,
      &label,
      "scaleSetPriority",
      &mut child.profile.scale_set_priority,
      priority,
    );
    self
  }

  /// Maximum price for Spot nodes; `-1.0` means the on-demand price.
  fn spot_max_price(mut self, price: f64) -> Self {
    self.child_mut().profile.spot_max_price = Some(price);
    self
  }

  /// Count or percentage of extra nodes added during an upgrade.
  fn nodes_added_on_upgrade(mut self, max_surge: impl Into<String>) -> Self {
    self.child_mut().profile.upgrade_settings = Some(UpgradeSettings {
      max_surge: max_surge.into(),
    });
    self
  }

  fn subnet_id(mut self, subnet_id: impl Into<String>) -> Self {
    self.child_mut().profile.vnet_subnet_id = Some(subnet_id.into());
    self
  }
}

impl<T: AsChild<AgentPoolBuilder>> AgentPoolExt for T {}
