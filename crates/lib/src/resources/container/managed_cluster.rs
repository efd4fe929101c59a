//! Managed Kubernetes clusters.
//!
//! Sub-profiles (network, load balancer, API server access, auto-scaler,
//! add-ons, AAD) are collected on the builder and only written into the
//! argument record when the cluster is built, together with the agent pools
//! folded in through [`ManagedClusterBuilder::add_agent_pool`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::builder::nested::{Composite, Nested};
use crate::builder::{
  Arguments, BuildError, BuilderBase, Deployment, ResourceBuilder, first_missing, replace_choice,
};
use crate::context::ResourceContext;
use crate::resources::network::SubResource;
use crate::strategy::Tags;

use super::agent_pool::{AgentPoolBuilder, AgentPoolMode, AgentPoolProfile};

pub const DEFAULT_KUBERNETES_VERSION: &str = "1.19.9";
pub const DEFAULT_AGENT_POOL_NAME: &str = "agentpool";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ManagedClusterSkuName {
  Basic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ManagedClusterSkuTier {
  Free,
  Paid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedClusterSku {
  pub name: ManagedClusterSkuName,
  pub tier: ManagedClusterSkuTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrincipalProfile {
  pub client_id: String,
  pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedClusterIdentity {
  #[serde(rename = "type")]
  pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SshPublicKey {
  pub key_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SshConfiguration {
  pub public_keys: Vec<SshPublicKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinuxProfile {
  pub admin_username: String,
  pub ssh: SshConfiguration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkPlugin {
  #[default]
  Kubenet,
  Azure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkPolicy {
  Calico,
  Azure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutboundType {
  LoadBalancer,
  UserDefinedRouting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedOutboundIps {
  pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundIps {
  #[serde(rename = "publicIPs")]
  pub public_ips: Vec<SubResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerProfile {
  #[serde(rename = "managedOutboundIPs", skip_serializing_if = "Option::is_none")]
  pub managed_outbound_ips: Option<ManagedOutboundIps>,
  #[serde(rename = "outboundIPs", skip_serializing_if = "Option::is_none")]
  pub outbound_ips: Option<OutboundIps>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub allocated_outbound_ports: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub idle_timeout_in_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
  pub network_plugin: NetworkPlugin,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub network_policy: Option<NetworkPolicy>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pod_cidr: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub service_cidr: Option<String>,
  #[serde(rename = "dnsServiceIP", skip_serializing_if = "Option::is_none")]
  pub dns_service_ip: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub docker_bridge_cidr: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub outbound_type: Option<OutboundType>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub load_balancer_profile: Option<LoadBalancerProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiServerAccessProfile {
  #[serde(rename = "authorizedIPRanges", skip_serializing_if = "Vec::is_empty")]
  pub authorized_ip_ranges: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub enable_private_cluster: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddonProfile {
  pub enabled: bool,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub config: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AadProfile {
  pub managed: bool,
  #[serde(rename = "enableAzureRBAC", skip_serializing_if = "Option::is_none")]
  pub enable_azure_rbac: Option<bool>,
  #[serde(rename = "adminGroupObjectIDs", skip_serializing_if = "Vec::is_empty")]
  pub admin_group_object_ids: Vec<String>,
  #[serde(rename = "tenantID", skip_serializing_if = "Option::is_none")]
  pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterArgs {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_group_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dns_prefix: Option<String>,
  pub kubernetes_version: String,
  #[serde(rename = "enableRBAC")]
  pub enable_rbac: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sku: Option<ManagedClusterSku>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub agent_pool_profiles: Vec<AgentPoolProfile>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub service_principal_profile: Option<ServicePrincipalProfile>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub identity: Option<ManagedClusterIdentity>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub linux_profile: Option<LinuxProfile>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub node_resource_group: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub network_profile: Option<NetworkProfile>,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub auto_scaler_profile: BTreeMap<String, String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub api_server_access_profile: Option<ApiServerAccessProfile>,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub addon_profiles: BTreeMap<String, AddonProfile>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub aad_profile: Option<AadProfile>,
  #[serde(skip_serializing_if = "Tags::is_empty")]
  pub tags: Tags,
}

impl Default for ManagedClusterArgs {
  fn default() -> Self {
    Self {
      resource_name: None,
      resource_group_name: None,
      location: None,
      dns_prefix: None,
      kubernetes_version: DEFAULT_KUBERNETES_VERSION.to_string(),
      enable_rbac: true,
      sku: None,
      agent_pool_profiles: Vec::new(),
      service_principal_profile: None,
      identity: None,
      linux_profile: None,
      node_resource_group: None,
      network_profile: None,
      auto_scaler_profile: BTreeMap::new(),
      api_server_access_profile: None,
      addon_profiles: BTreeMap::new(),
      aad_profile: None,
      tags: Tags::new(),
    }
  }
}

impl Arguments for ManagedClusterArgs {
  const TYPE_TOKEN: &'static str = "azure-native:containerservice:ManagedCluster";
  const KIND: &'static str = "managed cluster";

  fn name_slot(&mut self) -> &mut Option<String> {
    &mut self.resource_name
  }

  fn tags_slot(&mut self) -> Option<&mut Tags> {
    Some(&mut self.tags)
  }

  fn missing_field(&self) -> Option<&'static str> {
    first_missing(&[
      ("resourceGroupName", self.resource_group_name.is_some()),
      ("location", self.location.is_some()),
      ("dnsPrefix", self.dns_prefix.is_some()),
    ])
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClusterIdentity {
  ServicePrincipal,
  SystemAssigned,
}

#[derive(Debug)]
pub struct ManagedClusterBuilder {
  base: BuilderBase<ManagedClusterArgs>,
  agent_pools: Vec<AgentPoolProfile>,
  network: NetworkProfile,
  load_balancer: Option<LoadBalancerProfile>,
  api_server_access: Option<ApiServerAccessProfile>,
  auto_scaler: BTreeMap<String, String>,
  addons: BTreeMap<String, AddonProfile>,
  aad: Option<AadProfile>,
  identity: Option<ClusterIdentity>,
}

impl ManagedClusterBuilder {
  pub fn new(deployment: &Deployment, logical_name: &str) -> Self {
    Self::with_context(deployment, logical_name, ResourceContext::new())
  }

  pub fn with_context(deployment: &Deployment, logical_name: &str, context: ResourceContext) -> Self {
    Self {
      base: BuilderBase::new(deployment, logical_name, context, ManagedClusterArgs::default()),
      agent_pools: Vec::new(),
      network: NetworkProfile::default(),
      load_balancer: None,
      api_server_access: None,
      auto_scaler: BTreeMap::new(),
      addons: BTreeMap::new(),
      aad: None,
      identity: None,
    }
  }

  /// Agent pools folded so far, in the order they were added.
  pub fn agent_pools(&self) -> &[AgentPoolProfile] {
    &self.agent_pools
  }

  pub fn resource_group(mut self, resource_group_name: impl Into<String>) -> Self {
    self.base.args_mut().resource_group_name = Some(resource_group_name.into());
    self
  }

  pub fn location(mut self, location: impl Into<String>) -> Self {
    self.base.args_mut().location = Some(location.into());
    self
  }

  pub fn dns_prefix(mut self, dns_prefix: impl Into<String>) -> Self {
    self.base.args_mut().dns_prefix = Some(dns_prefix.into());
    self
  }

  pub fn kubernetes_version(mut self, version: impl Into<String>) -> Self {
    self.base.args_mut().kubernetes_version = version.into();
    self
  }

  pub fn disable_rbac(mut self) -> Self {
    self.base.args_mut().enable_rbac = false;
    self
  }

  pub fn cluster_sku(mut self, name: ManagedClusterSkuName, tier: ManagedClusterSkuTier) -> Self {
    self.base.args_mut().sku = Some(ManagedClusterSku { name, tier });
    self
  }

  /// Authenticate the cluster with an existing service principal. Replaces a
  /// system-assigned identity.
  pub fn with_existing_service_principal(mut self, client_id: impl Into<String>, secret: impl Into<String>) -> Self {
    self.choose_identity(ClusterIdentity::ServicePrincipal);
    let args = self.base.args_mut();
    args.identity = None;
    args.service_principal_profile = Some(ServicePrincipalProfile {
      client_id: client_id.into(),
      secret: secret.into(),
    });
    self
  }

  /// Use a system-assigned managed identity. Replaces a service principal.
  pub fn with_system_assigned_identity(mut self) -> Self {
    self.choose_identity(ClusterIdentity::SystemAssigned);
    let args = self.base.args_mut();
    args.service_principal_profile = None;
    args.identity = Some(ManagedClusterIdentity {
      kind: "SystemAssigned".to_string(),
    });
    self
  }

  fn choose_identity(&mut self, identity: ClusterIdentity) {
    let name = self.base.logical_name().to_string();
    replace_choice(ManagedClusterArgs::KIND, &name, "identity", &mut self.identity, identity);
  }

  /// Admin user and SSH key for Linux nodes. Repeated calls keep the last
  /// user and accumulate keys.
  pub fn linux_profile(mut self, admin_username: impl Into<String>, ssh_public_key: impl Into<String>) -> Self {
    let admin_username = admin_username.into();
    let key = SshPublicKey {
      key_data: ssh_public_key.into(),
    };
    let profile = self.base.args_mut().linux_profile.get_or_insert_with(|| LinuxProfile {
      admin_username: admin_username.clone(),
      ssh: SshConfiguration::default(),
    });
    profile.admin_username = admin_username;
    profile.ssh.public_keys.push(key);
    self
  }

  pub fn node_resource_group(mut self, name: impl Into<String>) -> Self {
    self.base.args_mut().node_resource_group = Some(name.into());
    self
  }

  /// Open a nested agent pool builder.
  pub fn add_agent_pool(self) -> Nested<Self, AgentPoolBuilder> {
    Nested::new(self, AgentPoolBuilder::new())
  }

  /// Replace all agent pools with a single default pool named `agentpool`.
  pub fn with_default_agent_pool(mut self) -> Self {
    self.agent_pools = vec![AgentPoolProfile {
      name: DEFAULT_AGENT_POOL_NAME.to_string(),
      ..AgentPoolProfile::default()
    }];
    self
  }

  pub fn network_plugin(mut self, plugin: NetworkPlugin) -> Self {
    self.network.network_plugin = plugin;
    self
  }

  pub fn network_policy(mut self, policy: NetworkPolicy) -> Self {
    self.network.network_policy = Some(policy);
    self
  }

  pub fn pod_cidr(mut self, cidr: impl Into<String>) -> Self {
    self.network.pod_cidr = Some(cidr.into());
    self
  }

  pub fn service_cidr(mut self, cidr: impl Into<String>) -> Self {
    self.network.service_cidr = Some(cidr.into());
    self
  }

  pub fn dns_service_ip(mut self, address: impl Into<String>) -> Self {
    self.network.dns_service_ip = Some(address.into());
    self
  }

  pub fn docker_bridge_cidr(mut self, cidr: impl Into<String>) -> Self {
    self.network.docker_bridge_cidr = Some(cidr.into());
    self
  }

  pub fn outbound_type(mut self, outbound_type: OutboundType) -> Self {
    self.network.outbound_type = Some(outbound_type);
    self
  }

  pub fn managed_outbound_ips(mut self, count: u32) -> Self {
    self.load_balancer.get_or_insert_with(LoadBalancerProfile::default).managed_outbound_ips =
      Some(ManagedOutboundIps { count });
    self
  }

  /// Add a public IP for outbound traffic. Repeated calls accumulate.
  pub fn outbound_ip(mut self, public_ip_id: impl Into<String>) -> Self {
    self
      .load_balancer
      .get_or_insert_with(LoadBalancerProfile::default)
      .outbound_ips
      .get_or_insert_with(|| OutboundIps { public_ips: Vec::new() })
      .public_ips
      .push(SubResource::new(public_ip_id));
    self
  }

  pub fn allocated_outbound_ports(mut self, ports: u32) -> Self {
    self.load_balancer.get_or_insert_with(LoadBalancerProfile::default).allocated_outbound_ports = Some(ports);
    self
  }

  pub fn outbound_idle_timeout(mut self, minutes: u32) -> Self {
    self.load_balancer.get_or_insert_with(LoadBalancerProfile::default).idle_timeout_in_minutes = Some(minutes);
    self
  }

  /// Allow API server access from `cidr`. Repeated calls accumulate.
  pub fn authorized_ip_range(mut self, cidr: impl Into<String>) -> Self {
    self
      .api_server_access
      .get_or_insert_with(ApiServerAccessProfile::default)
      .authorized_ip_ranges
      .push(cidr.into());
    self
  }

  pub fn enable_private_cluster(mut self) -> Self {
    self
      .api_server_access
      .get_or_insert_with(ApiServerAccessProfile::default)
      .enable_private_cluster = Some(true);
    self
  }

  /// Set a cluster auto-scaler option such as `scan-interval`.
  pub fn auto_scaler_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.auto_scaler.insert(key.into(), value.into());
    self
  }

  pub fn addon(mut self, name: impl Into<String>, enabled: bool) -> Self {
    self.addons.entry(name.into()).or_default().enabled = enabled;
    self
  }

  /// Set an add-on config value. Enables the add-on.
  pub fn addon_config(mut self, name: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
    let addon = self.addons.entry(name.into()).or_default();
    addon.enabled = true;
    addon.config.insert(key.into(), value.into());
    self
  }

  /// Integrate with Azure AD; `admin_group_ids` get cluster-admin rights.
  pub fn managed_aad<I, S>(mut self, admin_group_ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let aad = self.aad.get_or_insert_with(AadProfile::default);
    aad.managed = true;
    aad.admin_group_object_ids.extend(admin_group_ids.into_iter().map(Into::into));
    self
  }

  pub fn enable_azure_rbac(mut self) -> Self {
    let aad = self.aad.get_or_insert_with(AadProfile::default);
    aad.managed = true;
    aad.enable_azure_rbac = Some(true);
    self
  }

  pub fn aad_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
    self.aad.get_or_insert_with(AadProfile::default).tenant_id = Some(tenant_id.into());
    self
  }

  fn check_agent_pools(&self) -> Result<(), BuildError> {
    let mut seen = BTreeSet::new();
    for pool in &self.agent_pools {
      if !seen.insert(pool.name.as_str()) {
        return Err(BuildError::configuration(
          ManagedClusterArgs::KIND,
          self.base.logical_name(),
          format!("duplicate agent pool name '{}'", pool.name),
        ));
      }
    }
    let has_system_pool = self.agent_pools.iter().any(|p| p.mode == AgentPoolMode::System);
    if !self.agent_pools.is_empty() && !has_system_pool {
      return Err(BuildError::configuration(
        ManagedClusterArgs::KIND,
        self.base.logical_name(),
        "at least one agent pool must run in System mode",
      ));
    }
    Ok(())
  }

  fn check_api_server_access(&self) -> Result<(), BuildError> {
    if let Some(access) = &self.api_server_access {
      if access.enable_private_cluster == Some(true) && !access.authorized_ip_ranges.is_empty() {
        return Err(BuildError::configuration(
          ManagedClusterArgs::KIND,
          self.base.logical_name(),
          "authorized IP ranges cannot be combined with a private cluster",
        ));
      }
    }
    Ok(())
  }
}

impl Composite<AgentPoolBuilder> for ManagedClusterBuilder {
  fn push_fragment(&mut self, item: AgentPoolProfile) {
    self.agent_pools.push(item);
  }
}

impl ResourceBuilder for ManagedClusterBuilder {
  type Args = ManagedClusterArgs;

  fn base(&self) -> &BuilderBase<ManagedClusterArgs> {
    &self.base
  }

  fn base_mut(&mut self) -> &mut BuilderBase<ManagedClusterArgs> {
    &mut self.base
  }

  fn into_base(self) -> BuilderBase<ManagedClusterArgs> {
    self.base
  }

  fn fold_fragments(&mut self) -> Result<(), BuildError> {
    self.check_agent_pools()?;
    self.check_api_server_access()?;

    let mut network = std::mem::take(&mut self.network);
    network.load_balancer_profile = self.load_balancer.take();

    let args = self.base.args_mut();
    args.agent_pool_profiles = std::mem::take(&mut self.agent_pools);
    args.network_profile = Some(network);
    args.api_server_access_profile = self.api_server_access.take();
    args.auto_scaler_profile = std::mem::take(&mut self.auto_scaler);
    args.addon_profiles = std::mem::take(&mut self.addons);
    args.aad_profile = self.aad.take();
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::builder::nested::Fragment;
  use crate::engine::memory::InMemoryEngine;
  use crate::resources::container::AgentPoolExt;
  use tracing_test::traced_test;

  fn deployment() -> (Arc<InMemoryEngine>, Deployment) {
    let engine = Arc::new(InMemoryEngine::new());
    (engine.clone(), Deployment::new(engine))
  }

  fn cluster(deployment: &Deployment) -> ManagedClusterBuilder {
    deployment
      .managed_cluster("mc1")
      .resource_group("rg1")
      .location("westeurope")
      .dns_prefix("mc1")
  }

  fn inputs(engine: &InMemoryEngine) -> serde_json::Value {
    engine
      .find(ManagedClusterArgs::TYPE_TOKEN, "mc1")
      .map(|record| record.inputs)
      .unwrap_or_default()
  }

  #[test]
  fn defaults_reach_the_record() {
    let (engine, deployment) = deployment();
    cluster(&deployment).build().unwrap();

    let inputs = inputs(&engine);
    assert_eq!(inputs["kubernetesVersion"], serde_json::json!("1.19.9"));
    assert_eq!(inputs["enableRBAC"], serde_json::json!(true));
    assert_eq!(inputs["networkProfile"], serde_json::json!({ "networkPlugin": "kubenet" }));
    assert!(inputs.get("agentPoolProfiles").is_none());
  }

  #[test]
  fn nested_pool_returns_to_cluster() {
    let (_, deployment) = deployment();
    let builder = cluster(&deployment)
      .add_agent_pool()
      .name("ap1")
      .build()
      .unwrap()
      .kubernetes_version("1.20.7");

    assert_eq!(builder.agent_pools().len(), 1);
    assert_eq!(builder.agent_pools()[0].name, "ap1");
    assert_eq!(builder.arguments().kubernetes_version, "1.20.7");
  }

  #[test]
  fn detached_pool_folds_once() {
    let (_, deployment) = deployment();
    let mut builder = cluster(&deployment);
    let mut pool = AgentPoolBuilder::new().name("ap1");

    pool.fold_into(&mut builder).unwrap();
    let err = pool.fold_into(&mut builder).unwrap_err();

    assert!(matches!(err, BuildError::Configuration { .. }));
    assert_eq!(builder.agent_pools().len(), 1);
  }

  #[test]
  fn duplicate_pool_names_fail_the_build() {
    let (engine, deployment) = deployment();
    let err = cluster(&deployment)
      .add_agent_pool()
      .name("ap1")
      .build()
      .unwrap()
      .add_agent_pool()
      .name("ap1")
      .build()
      .unwrap()
      .build()
      .unwrap_err();

    assert!(err.to_string().contains("duplicate agent pool name 'ap1'"));
    assert!(engine.manifest().is_empty());
  }

  #[test]
  fn user_pools_need_a_system_pool() {
    let (_, deployment) = deployment();
    let err = cluster(&deployment)
      .add_agent_pool()
      .name("user1")
      .mode(AgentPoolMode::User)
      .build()
      .unwrap()
      .build()
      .unwrap_err();
    assert!(matches!(err, BuildError::Configuration { .. }));
  }

  #[test]
  fn default_agent_pool_replaces_pools() {
    let (engine, deployment) = deployment();
    cluster(&deployment)
      .add_agent_pool()
      .name("ap1")
      .build()
      .unwrap()
      .with_default_agent_pool()
      .build()
      .unwrap();

    let inputs = inputs(&engine);
    let pools = &inputs["agentPoolProfiles"];
    assert_eq!(pools.as_array().map(Vec::len), Some(1));
    assert_eq!(pools[0]["name"], serde_json::json!("agentpool"));
    assert_eq!(pools[0]["vmSize"], serde_json::json!("Standard_Ds2_v2"));
  }

  #[test]
  fn sub_profiles_are_folded_at_build() {
    let (engine, deployment) = deployment();
    cluster(&deployment)
      .network_plugin(NetworkPlugin::Azure)
      .network_policy(NetworkPolicy::Calico)
      .service_cidr("10.2.0.0/16")
      .dns_service_ip("10.2.0.10")
      .managed_outbound_ips(2)
      .authorized_ip_range("1.2.3.0/24")
      .authorized_ip_range("5.6.7.0/24")
      .auto_scaler_setting("scan-interval", "20s")
      .addon_config("omsagent", "logAnalyticsWorkspaceResourceID", "/workspaces/w1")
      .managed_aad(["group-1"])
      .build()
      .unwrap();

    let inputs = inputs(&engine);
    assert_eq!(
      inputs["networkProfile"],
      serde_json::json!({
        "networkPlugin": "azure",
        "networkPolicy": "calico",
        "serviceCidr": "10.2.0.0/16",
        "dnsServiceIP": "10.2.0.10",
        "loadBalancerProfile": { "managedOutboundIPs": { "count": 2 } }
      })
    );
    assert_eq!(
      inputs["apiServerAccessProfile"],
      serde_json::json!({ "authorizedIPRanges": ["1.2.3.0/24", "5.6.7.0/24"] })
    );
    assert_eq!(inputs["autoScalerProfile"], serde_json::json!({ "scan-interval": "20s" }));
    assert_eq!(inputs["addonProfiles"]["omsagent"]["enabled"], serde_json::json!(true));
    assert_eq!(
      inputs["aadProfile"],
      serde_json::json!({ "managed": true, "adminGroupObjectIDs": ["group-1"] })
    );
  }

  #[test]
  fn private_cluster_rejects_authorized_ranges() {
    let (_, deployment) = deployment();
    let err = cluster(&deployment)
      .enable_private_cluster()
      .authorized_ip_range("1.2.3.0/24")
      .build()
      .unwrap_err();
    assert!(matches!(err, BuildError::Configuration { .. }));
  }

  #[test]
  #[traced_test]
  fn identity_choice_is_last_write_wins() {
    let (engine, deployment) = deployment();
    cluster(&deployment)
      .with_existing_service_principal("client", "secret")
      .with_system_assigned_identity()
      .build()
      .unwrap();

    let inputs = inputs(&engine);
    assert!(inputs.get("servicePrincipalProfile").is_none());
    assert_eq!(inputs["identity"], serde_json::json!({ "type": "SystemAssigned" }));
    assert!(logs_contain("overriding earlier choice"));
  }

  #[test]
  fn linux_profile_accumulates_keys() {
    let (engine, deployment) = deployment();
    cluster(&deployment)
      .linux_profile("azureuser", "ssh-rsa AAA1")
      .linux_profile("stratum", "ssh-rsa AAA2")
      .build()
      .unwrap();

    assert_eq!(
      inputs(&engine)["linuxProfile"],
      serde_json::json!({
        "adminUsername": "stratum",
        "ssh": { "publicKeys": [{ "keyData": "ssh-rsa AAA1" }, { "keyData": "ssh-rsa AAA2" }] }
      })
    );
  }

  #[test]
  fn dns_prefix_is_required() {
    let (_, deployment) = deployment();
    let err = deployment
      .managed_cluster("mc1")
      .resource_group("rg1")
      .location("westeurope")
      .build()
      .unwrap_err();
    assert!(matches!(err, BuildError::Validation { field: "dnsPrefix", .. }));
  }
}
