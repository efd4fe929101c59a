//! Concrete resource builders.
//!
//! Every builder here wraps one argument record and implements
//! [`ResourceBuilder`](crate::builder::ResourceBuilder); the setters specific
//! to a resource kind are plain methods on its builder. Sub-resources that
//! live inside a parent record (agent pools, IP configurations) are
//! configured through extension traits so the same setters work on a
//! detached builder and on one opened from its parent.
//!
//! # Submodules
//!
//! - [`resource_group`] - resource groups
//! - [`network`] - virtual networks, subnets, network interfaces, application security groups
//! - [`container`] - managed Kubernetes clusters and their agent pools
//! - [`sql`] - SQL servers and databases

pub mod container;
pub mod network;
pub mod resource_group;
pub mod sql;
