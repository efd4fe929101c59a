use std::io::Write;
use std::sync::Arc;

use stratum_lib::builder::Arguments;
use stratum_lib::config::StrategyConfig;
use stratum_lib::engine::memory::InMemoryEngine;
use stratum_lib::prelude::*;
use stratum_lib::resources::network::VirtualNetworkArgs;
use stratum_lib::resources::resource_group::ResourceGroupArgs;
use stratum_lib::strategy::{ConventionNaming, NamingStrategy, StaticTagging, StrategyError, Tags};
use tempfile::NamedTempFile;

use super::common::{deployment_with, recorded_inputs, tags};

const TOKENS: &[&str] = &["vnet1", "MyCluster", "sql-primary", "a", "rg_shared_01"];

#[test]
fn resolve_name_matches_strategy_for_every_token() {
  let naming = ConventionNaming {
    prefix: Some("stz".to_string()),
    suffix: Some("weu".to_string()),
    ..Default::default()
  };
  let ctx = StrategyContext::new().with_naming(naming.clone());

  for token in TOKENS {
    assert_eq!(ctx.resolve_name(token).unwrap(), naming.generate_name(token).unwrap());
  }
}

#[test]
fn resolve_name_is_identity_without_strategy() {
  let ctx = StrategyContext::new();
  for token in TOKENS {
    assert_eq!(ctx.resolve_name(token).unwrap(), *token);
  }
}

#[test]
fn merge_tags_keeps_caller_values_and_fills_policy_gaps() {
  let policy = tags(&[("env", "dev"), ("owner", "platform"), ("cost-center", "42")]);
  let ctx = StrategyContext::new().with_tagging(StaticTagging::new(policy.clone()));

  let cases: [Tags; 3] = [
    Tags::new(),
    tags(&[("env", "prod")]),
    tags(&[("env", "prod"), ("owner", "data"), ("extra", "1")]),
  ];

  for existing in cases {
    let merged = ctx.merge_tags(existing.clone()).unwrap();
    for (key, value) in &existing {
      assert_eq!(merged.get(key), Some(value));
    }
    for (key, value) in &policy {
      if !existing.contains_key(key) {
        assert_eq!(merged.get(key), Some(value));
      }
    }
  }
}

#[test]
fn one_context_applies_uniformly_to_every_resource_kind() {
  let ctx = StrategyContext::new()
    .with_naming(ConventionNaming {
      prefix: Some("stz".to_string()),
      ..Default::default()
    })
    .with_tagging(StaticTagging::new(tags(&[("env", "dev")])));
  let (engine, deployment) = deployment_with(ctx);

  let rg = deployment.resource_group("core").location("westeurope").build().unwrap();
  let vnet = deployment
    .virtual_network("vnet1")
    .resource_group(rg.name())
    .location("westeurope")
    .address_space("10.0.0.0/16")
    .build()
    .unwrap();

  assert_eq!(rg.name(), "stz-core");
  assert_eq!(vnet.name(), "stz-vnet1");
  let vnet_inputs = recorded_inputs(&engine, VirtualNetworkArgs::TYPE_TOKEN, "vnet1");
  assert_eq!(vnet_inputs["resourceGroupName"], serde_json::json!("stz-core"));
  for type_token in [ResourceGroupArgs::TYPE_TOKEN, VirtualNetworkArgs::TYPE_TOKEN] {
    let record = engine.resources_of_type(type_token).pop().unwrap();
    assert_eq!(record.input("tags"), Some(&serde_json::json!({ "env": "dev" })));
  }
}

#[test]
fn failing_strategy_aborts_the_build() {
  let naming = ConventionNaming {
    max_length: Some(8),
    ..Default::default()
  };
  let (engine, deployment) = deployment_with(StrategyContext::new().with_naming(naming));

  let err = deployment
    .resource_group("a-very-long-group-name")
    .location("westeurope")
    .build()
    .unwrap_err();

  assert!(matches!(err, BuildError::Strategy(StrategyError::NameTooLong { .. })));
  assert!(engine.manifest().is_empty());
}

#[test]
fn context_is_shared_across_threads() {
  let (engine, deployment) = deployment_with(StrategyContext::new().with_naming(ConventionNaming {
    suffix: Some("dev".to_string()),
    ..Default::default()
  }));

  let handles: Vec<_> = (0..4)
    .map(|i| {
      let deployment = deployment.clone();
      std::thread::spawn(move || {
        deployment
          .resource_group(&format!("rg{}", i))
          .location("westeurope")
          .build()
          .map(|handle| handle.name().to_string())
      })
    })
    .collect();

  let mut names: Vec<String> = handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect();
  names.sort();
  assert_eq!(names, vec!["rg0-dev", "rg1-dev", "rg2-dev", "rg3-dev"]);
  assert_eq!(engine.manifest().len(), 4);
}

#[test]
fn deployment_from_config_file() {
  let mut file = NamedTempFile::new().unwrap();
  write!(file, "naming:\n  prefix: ops\n  suffix: prd\ntags:\n  env: prod\n").unwrap();
  let config = StrategyConfig::from_path(file.path()).unwrap();

  let engine = Arc::new(InMemoryEngine::new());
  let deployment = Deployment::from_config(engine.clone(), &config);
  let handle = deployment.resource_group("Core").location("westeurope").build().unwrap();

  assert_eq!(handle.name(), "ops-core-prd");
  let inputs = recorded_inputs(&engine, ResourceGroupArgs::TYPE_TOKEN, "Core");
  assert_eq!(inputs["tags"], serde_json::json!({ "env": "prod" }));
}

#[test]
fn manifest_hash_is_stable_for_identical_deployments() {
  use stratum_lib::util::hash::Hashable;

  let build = || {
    let (engine, deployment) = super::common::deployment();
    deployment
      .resource_group("rg1")
      .location("westeurope")
      .tag("env", "dev")
      .build()
      .unwrap();
    engine.manifest().compute_hash().unwrap()
  };

  assert_eq!(build(), build());
}
