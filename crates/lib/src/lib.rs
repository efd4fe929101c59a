//! stratum-lib: Fluent builders for declarative cloud resources
//!
//! This crate assembles argument records for cloud resources and hands them
//! to a provisioning engine:
//! - `Deployment`: the engine plus the naming and tagging strategies applied to every resource
//! - `ResourceBuilder`: the shared build contract (resolve name, merge tags, fold sub-profiles, validate)
//! - `Nested`: child builders (agent pools, IP configurations) that fold back into their parent
//! - `InMemoryEngine`: a recording engine producing a hashable `Manifest`

pub mod builder;
pub mod config;
pub mod consts;
pub mod context;
pub mod engine;
pub mod manifest;
pub mod prelude;
pub mod resources;
pub mod strategy;
pub mod util;
