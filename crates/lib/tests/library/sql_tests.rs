use stratum_lib::builder::Arguments;
use stratum_lib::prelude::*;
use stratum_lib::resources::sql::{PublicNetworkAccess, SqlDatabaseArgs, SqlServerArgs};

use super::common::{deployment, recorded_inputs};

#[tokio::test]
async fn database_references_server_output_name() {
  let (engine, deployment) = deployment();
  let rg = deployment.resource_group("rg1").location("westeurope").build().unwrap();

  let server = deployment
    .sql_server("sql1")
    .resource_group(rg.name())
    .location("westeurope")
    .administrator("sqladmin", "P@ssw0rd!")
    .public_network_access(PublicNetworkAccess::Disabled)
    .depends_on(&rg)
    .build()
    .unwrap();

  let server_name = server.outputs().get("name").await.unwrap();
  assert_eq!(server_name, Some(serde_json::json!("sql1")));

  deployment
    .sql_database("db1")
    .resource_group(rg.name())
    .on_server(server.name())
    .location("westeurope")
    .service_objective("S0")
    .build()
    .unwrap();

  let server_inputs = recorded_inputs(&engine, SqlServerArgs::TYPE_TOKEN, "sql1");
  assert_eq!(server_inputs["publicNetworkAccess"], serde_json::json!("Disabled"));
  assert_eq!(server_inputs["version"], serde_json::json!("12.0"));

  let db_inputs = recorded_inputs(&engine, SqlDatabaseArgs::TYPE_TOKEN, "db1");
  assert_eq!(db_inputs["serverName"], serde_json::json!("sql1"));
  assert_eq!(db_inputs["sku"], serde_json::json!({ "name": "S0" }));
  assert_eq!(engine.manifest().len(), 3);
}

#[test]
fn sku_without_service_objective_is_invalid() {
  let (_, deployment) = deployment();
  let err = deployment
    .sql_database("db1")
    .resource_group("rg1")
    .on_server("sql1")
    .location("westeurope")
    .tier("Standard")
    .build()
    .unwrap_err();
  assert!(matches!(err, BuildError::Validation { field: "sku.name", .. }));
}
