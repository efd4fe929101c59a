//! Shared helpers for library integration tests.

use std::sync::Arc;

use stratum_lib::builder::Deployment;
use stratum_lib::engine::memory::InMemoryEngine;
use stratum_lib::strategy::{StrategyContext, Tags};

/// A deployment backed by a fresh recording engine, without strategies.
pub fn deployment() -> (Arc<InMemoryEngine>, Deployment) {
  deployment_with(StrategyContext::new())
}

pub fn deployment_with(strategies: StrategyContext) -> (Arc<InMemoryEngine>, Deployment) {
  let engine = Arc::new(InMemoryEngine::new());
  let deployment = Deployment::new(engine.clone()).with_strategies(strategies);
  (engine, deployment)
}

/// Inputs recorded for one resource; panics when it was never registered.
pub fn recorded_inputs(engine: &InMemoryEngine, type_token: &str, logical_name: &str) -> serde_json::Value {
  engine
    .find(type_token, logical_name)
    .unwrap_or_else(|| panic!("{} '{}' was not registered", type_token, logical_name))
    .inputs
}

pub fn tags(pairs: &[(&str, &str)]) -> Tags {
  pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
