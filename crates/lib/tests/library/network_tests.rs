use stratum_lib::builder::Arguments;
use stratum_lib::prelude::*;
use stratum_lib::resources::network::{NetworkInterfaceArgs, NetworkInterfaceBuilder, SubnetArgs, VirtualNetworkArgs};

use super::common::{deployment, recorded_inputs};

#[test]
fn vnet_builds_from_location_and_address_space_alone() {
  let (engine, deployment) = deployment();

  let vnet = deployment
    .virtual_network("vnet1")
    .location("westeurope")
    .address_space("172.16.0.0/24")
    .build()
    .unwrap();

  assert_eq!(vnet.name(), "vnet1");
  let inputs = recorded_inputs(&engine, VirtualNetworkArgs::TYPE_TOKEN, "vnet1");
  assert_eq!(inputs["addressSpace"], serde_json::json!({ "addressPrefixes": ["172.16.0.0/24"] }));
  assert!(inputs.get("resourceGroupName").is_none());
  assert_eq!(engine.manifest().get(vnet.urn()).map(|r| r.id.as_str()), Some("vnet1_id"));
}

#[tokio::test]
async fn vnet_with_single_address_space() {
  let (engine, deployment) = deployment();

  let vnet = deployment
    .virtual_network("vnet1")
    .resource_group("rg1")
    .location("westeurope")
    .address_space("172.16.0.0/24")
    .build()
    .unwrap();

  assert_eq!(vnet.name(), "vnet1");
  assert_eq!(vnet.id().await.unwrap().as_deref(), Some("vnet1_id"));
  assert_eq!(
    vnet.outputs().get("addressSpace").await.unwrap(),
    Some(serde_json::json!({ "addressPrefixes": ["172.16.0.0/24"] }))
  );

  let inputs = recorded_inputs(&engine, VirtualNetworkArgs::TYPE_TOKEN, "vnet1");
  assert_eq!(inputs["virtualNetworkName"], serde_json::json!("vnet1"));
  assert_eq!(inputs["location"], serde_json::json!("westeurope"));
}

#[test]
fn subnet_is_parented_to_its_vnet() {
  let (engine, deployment) = deployment();
  let vnet = deployment
    .virtual_network("vnet1")
    .resource_group("rg1")
    .location("westeurope")
    .address_space("172.16.0.0/24")
    .build()
    .unwrap();

  let subnet = deployment
    .subnet("subnet1")
    .parent(&vnet)
    .resource_group("rg1")
    .in_vnet(vnet.name())
    .address_prefix("172.16.0.0/28")
    .build()
    .unwrap();

  assert_eq!(
    subnet.urn(),
    "urn:stratum:azure-native:network:VirtualNetwork$azure-native:network:Subnet::subnet1"
  );
  let record = engine.find(SubnetArgs::TYPE_TOKEN, "subnet1").unwrap();
  assert_eq!(record.parent.as_deref(), Some(vnet.urn()));
}

#[test]
fn nic_with_context_and_nested_ip_configuration() {
  let (engine, deployment) = deployment();
  let asg = deployment
    .application_security_group("web")
    .resource_group("rg1")
    .location("westeurope")
    .build()
    .unwrap();

  let context = ResourceContext::new()
    .with_provider(ProviderRef::new("azure-westeurope"))
    .with_options(ResourceOptions::new().depends_on(&asg).protect());

  NetworkInterfaceBuilder::with_context(&deployment, "nic1", context)
    .resource_group("rg1")
    .location("westeurope")
    .add_ip_configuration()
    .name("ipconfig1")
    .subnet("/subnets/subnet1")
    .application_security_group(asg.name())
    .build()
    .unwrap()
    .build()
    .unwrap();

  let record = engine.find(NetworkInterfaceArgs::TYPE_TOKEN, "nic1").unwrap();
  assert!(record.protect);
  assert_eq!(record.provider.as_deref(), Some("azure-westeurope"));
  assert_eq!(record.depends_on, vec![asg.urn().to_string()]);

  let inputs = recorded_inputs(&engine, NetworkInterfaceArgs::TYPE_TOKEN, "nic1");
  assert_eq!(inputs["ipConfigurations"][0]["primary"], serde_json::json!(true));
  assert_eq!(
    inputs["ipConfigurations"][0]["applicationSecurityGroups"],
    serde_json::json!([{ "id": "web" }])
  );
}

#[test]
fn duplicate_logical_names_are_rejected_by_the_engine() {
  let (_, deployment) = deployment();
  let vnet = || {
    deployment
      .virtual_network("vnet1")
      .resource_group("rg1")
      .location("westeurope")
      .address_space("10.0.0.0/16")
  };

  vnet().build().unwrap();
  let err = vnet().build().unwrap_err();
  assert!(matches!(err, BuildError::Engine(_)));
}

mod required_fields {
  use super::*;

  #[test]
  fn vnet_succeeds_with_all_required_setters() {
    let (_, deployment) = deployment();
    assert!(
      deployment
        .virtual_network("vnet1")
        .resource_group("rg1")
        .location("westeurope")
        .address_space("10.0.0.0/16")
        .build()
        .is_ok()
    );
  }

  #[test]
  fn vnet_fails_when_any_required_setter_is_omitted() {
    let (_, deployment) = deployment();
    let cases = [
      (
        "location",
        deployment
          .virtual_network("b")
          .resource_group("rg1")
          .address_space("10.0.0.0/16"),
      ),
      (
        "addressSpace",
        deployment.virtual_network("c").resource_group("rg1").location("westeurope"),
      ),
    ];

    for (expected, builder) in cases {
      match builder.build() {
        Err(BuildError::Validation { field, .. }) => assert_eq!(field, expected),
        other => panic!("expected validation error for {expected}, got {other:?}"),
      }
    }
  }
}
