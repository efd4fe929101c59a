//! Managed Kubernetes clusters and their agent pools.

mod agent_pool;
mod managed_cluster;

pub use agent_pool::*;
pub use managed_cluster::*;
