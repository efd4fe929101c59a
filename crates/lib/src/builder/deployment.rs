use std::sync::Arc;

use crate::config::StrategyConfig;
use crate::engine::Engine;
use crate::resources::container::ManagedClusterBuilder;
use crate::resources::network::{
  ApplicationSecurityGroupBuilder, NetworkInterfaceBuilder, SubnetBuilder, VirtualNetworkBuilder,
};
use crate::resources::resource_group::ResourceGroupBuilder;
use crate::resources::sql::{SqlDatabaseBuilder, SqlServerBuilder};
use crate::strategy::StrategyContext;

/// One deployment: the engine resources are handed to and the strategies
/// every builder applies.
///
/// Cloning is cheap; every builder keeps its own clone.
#[derive(Clone)]
pub struct Deployment {
  engine: Arc<dyn Engine>,
  strategies: StrategyContext,
}

impl std::fmt::Debug for Deployment {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Deployment")
      .field("strategies", &self.strategies)
      .finish_non_exhaustive()
  }
}

impl Deployment {
  /// A deployment with identity naming and no base tags.
  pub fn new(engine: Arc<dyn Engine>) -> Self {
    Self {
      engine,
      strategies: StrategyContext::new(),
    }
  }

  pub fn with_strategies(mut self, strategies: StrategyContext) -> Self {
    self.strategies = strategies;
    self
  }

  pub fn from_config(engine: Arc<dyn Engine>, config: &StrategyConfig) -> Self {
    Self::new(engine).with_strategies(config.to_context())
  }

  pub fn engine(&self) -> &dyn Engine {
    self.engine.as_ref()
  }

  pub fn strategies(&self) -> &StrategyContext {
    &self.strategies
  }

  pub fn resource_group(&self, logical_name: &str) -> ResourceGroupBuilder {
    ResourceGroupBuilder::new(self, logical_name)
  }

  pub fn virtual_network(&self, logical_name: &str) -> VirtualNetworkBuilder {
    VirtualNetworkBuilder::new(self, logical_name)
  }

  pub fn subnet(&self, logical_name: &str) -> SubnetBuilder {
    SubnetBuilder::new(self, logical_name)
  }

  pub fn network_interface(&self, logical_name: &str) -> NetworkInterfaceBuilder {
    NetworkInterfaceBuilder::new(self, logical_name)
  }

  pub fn application_security_group(&self, logical_name: &str) -> ApplicationSecurityGroupBuilder {
    ApplicationSecurityGroupBuilder::new(self, logical_name)
  }

  pub fn managed_cluster(&self, logical_name: &str) -> ManagedClusterBuilder {
    ManagedClusterBuilder::new(self, logical_name)
  }

  pub fn sql_server(&self, logical_name: &str) -> SqlServerBuilder {
    SqlServerBuilder::new(self, logical_name)
  }

  pub fn sql_database(&self, logical_name: &str) -> SqlDatabaseBuilder {
    SqlDatabaseBuilder::new(self, logical_name)
  }
}
