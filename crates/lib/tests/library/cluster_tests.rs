use std::collections::BTreeMap;

use stratum_lib::builder::Arguments;
use stratum_lib::prelude::*;
use stratum_lib::resources::container::{AgentPoolBuilder, AgentPoolMode, ManagedClusterArgs, ManagedClusterBuilder};

use super::common::{deployment, recorded_inputs};

fn cluster(deployment: &Deployment) -> ManagedClusterBuilder {
  deployment
    .managed_cluster("mc1")
    .resource_group("rg1")
    .location("westeurope")
    .dns_prefix("mc1")
}

#[test]
fn nested_agent_pool_lands_in_cluster_record() {
  let (engine, deployment) = deployment();

  let builder = cluster(&deployment)
    .add_agent_pool()
    .name("ap1")
    .availability_zones([1, 2, 3])
    .add_node_label("test", "label")
    .build()
    .unwrap();

  let pools = builder.agent_pools();
  assert_eq!(pools.len(), 1);
  assert_eq!(pools[0].name, "ap1");
  assert_eq!(pools[0].availability_zones, vec!["1", "2", "3"]);
  assert_eq!(
    pools[0].node_labels,
    BTreeMap::from([("test".to_string(), "label".to_string())])
  );

  builder.build().unwrap();
  let inputs = recorded_inputs(&engine, ManagedClusterArgs::TYPE_TOKEN, "mc1");
  assert_eq!(inputs["agentPoolProfiles"][0]["name"], serde_json::json!("ap1"));
  assert_eq!(
    inputs["agentPoolProfiles"][0]["availabilityZones"],
    serde_json::json!(["1", "2", "3"])
  );
  assert_eq!(
    inputs["agentPoolProfiles"][0]["nodeLabels"],
    serde_json::json!({ "test": "label" })
  );
}

#[test]
fn duplicate_agent_pool_names_fail_with_configuration_error() {
  let (engine, deployment) = deployment();

  let result = cluster(&deployment)
    .add_agent_pool()
    .name("ap1")
    .build()
    .unwrap()
    .add_agent_pool()
    .name("ap1")
    .build()
    .unwrap()
    .build();

  assert!(matches!(result, Err(BuildError::Configuration { .. })));
  assert!(engine.manifest().is_empty());
}

#[test]
fn each_fold_adds_exactly_one_pool() {
  let (_, deployment) = deployment();
  let mut builder = cluster(&deployment);

  for (expected, name) in ["system", "user1", "user2"].into_iter().enumerate() {
    let mode = if name == "system" { AgentPoolMode::System } else { AgentPoolMode::User };
    let mut pool = AgentPoolBuilder::named(name).mode(mode);
    pool.fold_into(&mut builder).unwrap();
    assert_eq!(builder.agent_pools().len(), expected + 1);

    assert!(matches!(pool.fold_into(&mut builder), Err(BuildError::Configuration { .. })));
    assert_eq!(builder.agent_pools().len(), expected + 1);
  }

  assert!(builder.build().is_ok());
}

#[test]
fn unnamed_pool_cannot_close() {
  let (_, deployment) = deployment();
  let result = cluster(&deployment).add_agent_pool().node_count(5).build();
  assert!(matches!(result, Err(BuildError::Configuration { .. })));
}

#[test]
fn cluster_configuration_continues_after_pool() {
  let (engine, deployment) = deployment();

  cluster(&deployment)
    .add_agent_pool()
    .name("ap1")
    .build()
    .unwrap()
    .with_system_assigned_identity()
    .kubernetes_version("1.21.2")
    .tag("team", "platform")
    .build()
    .unwrap();

  let inputs = recorded_inputs(&engine, ManagedClusterArgs::TYPE_TOKEN, "mc1");
  assert_eq!(inputs["kubernetesVersion"], serde_json::json!("1.21.2"));
  assert_eq!(inputs["identity"]["type"], serde_json::json!("SystemAssigned"));
  assert_eq!(inputs["tags"], serde_json::json!({ "team": "platform" }));
}
