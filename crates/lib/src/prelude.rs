//! Traits needed to drive the builders fluently.
//!
//! ```ignore
//! use stratum_lib::prelude::*;
//! ```

pub use crate::builder::nested::Fragment;
pub use crate::builder::{BuildError, Deployment, ResourceBuilder};
pub use crate::context::{ProviderRef, ResourceContext, ResourceOptions};
pub use crate::engine::ResourceHandle;
pub use crate::resources::container::AgentPoolExt;
pub use crate::resources::network::IpConfigurationExt;
pub use crate::strategy::StrategyContext;
