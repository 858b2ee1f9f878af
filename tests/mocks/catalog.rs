//! In-memory service catalog.
//!
//! `MockCatalog::azure()` models one broker ("azure") offering one class
//! ("azure-mysqldb") with two plans; "standard800" has two instances.

use std::cell::RefCell;
use svcat::catalog::client::single_match;
use svcat::catalog::types::{
    ClusterServiceBroker, ClusterServiceBrokerSpec, ClusterServiceBrokerStatus, ClusterServiceClass,
    ClusterServiceClassSpec, ClusterServicePlan, ClusterServicePlanSpec, Condition, ObjectMeta,
    ObjectReference, ServiceInstance, ServiceInstanceSpec, ServiceInstanceStatus,
};
use svcat::{ServiceCatalog, SvcatError};

pub const CLASS_UUID: &str = "997b8372-8dac-40ac-ae65-758b4a5075a5";
pub const BASIC_PLAN_UUID: &str = "427559f1-bf2a-45d3-8844-32374a3e58aa";
pub const STANDARD_PLAN_UUID: &str = "08e4b43a-36bc-447e-a81f-8202b13e339c";

#[derive(Debug, Default)]
pub struct MockCatalog {
    pub classes: Vec<ClusterServiceClass>,
    pub plans: Vec<ClusterServicePlan>,
    pub brokers: Vec<ClusterServiceBroker>,
    pub instances: Vec<ServiceInstance>,
    /// Lookup (method name) that returns an API error
    pub fail_on: Option<&'static str>,
    calls: RefCell<Vec<&'static str>>,
}

fn meta(name: &str) -> ObjectMeta {
    ObjectMeta {
        name: name.to_string(),
        ..Default::default()
    }
}

fn condition(type_: &str, status: &str) -> Condition {
    Condition {
        type_: type_.to_string(),
        status: status.to_string(),
        ..Default::default()
    }
}

pub fn plan(external_name: &str, uuid: &str, description: &str) -> ClusterServicePlan {
    ClusterServicePlan {
        metadata: meta(uuid),
        spec: ClusterServicePlanSpec {
            cluster_service_broker_name: "azure".to_string(),
            external_name: external_name.to_string(),
            description: description.to_string(),
            free: false,
            cluster_service_class_ref: ObjectReference {
                name: CLASS_UUID.to_string(),
            },
        },
    }
}

pub fn instance(name: &str, namespace: &str, plan_uuid: &str, conditions: Vec<Condition>) -> ServiceInstance {
    ServiceInstance {
        metadata: ObjectMeta {
            name: name.to_string(),
            namespace: Some(namespace.to_string()),
        },
        spec: ServiceInstanceSpec {
            cluster_service_plan_ref: Some(ObjectReference {
                name: plan_uuid.to_string(),
            }),
        },
        status: ServiceInstanceStatus { conditions },
    }
}

impl MockCatalog {
    pub fn azure() -> Self {
        MockCatalog {
            classes: vec![ClusterServiceClass {
                metadata: meta(CLASS_UUID),
                spec: ClusterServiceClassSpec {
                    cluster_service_broker_name: "azure".to_string(),
                    external_name: "azure-mysqldb".to_string(),
                    description: "Azure Database for MySQL".to_string(),
                    bindable: true,
                    plan_updatable: false,
                    tags: vec!["database".to_string(), "mysql".to_string()],
                },
            }],
            plans: vec![
                plan("basic50", BASIC_PLAN_UUID, "Basic tier"),
                plan("standard800", STANDARD_PLAN_UUID, "Standard tier"),
            ],
            brokers: vec![ClusterServiceBroker {
                metadata: meta("azure"),
                spec: ClusterServiceBrokerSpec {
                    url: "https://azure-broker.example.com".to_string(),
                },
                status: ClusterServiceBrokerStatus {
                    conditions: vec![condition("Ready", "True")],
                },
            }],
            instances: vec![
                instance(
                    "mysql-prod",
                    "production",
                    STANDARD_PLAN_UUID,
                    vec![condition("Ready", "True")],
                ),
                instance(
                    "mysql-dev",
                    "default",
                    STANDARD_PLAN_UUID,
                    vec![condition("Ready", "False"), condition("Failed", "True")],
                ),
            ],
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(mut self, lookup: &'static str) -> Self {
        self.fail_on = Some(lookup);
        self
    }

    /// Lookups made so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, lookup: &'static str) -> Result<(), SvcatError> {
        self.calls.borrow_mut().push(lookup);
        if self.fail_on == Some(lookup) {
            return Err(SvcatError::Api {
                status: 500,
                message: format!("{} exploded", lookup),
            });
        }
        Ok(())
    }

    fn class_named(&self, uuid: &str) -> Result<ClusterServiceClass, SvcatError> {
        self.classes
            .iter()
            .find(|c| c.metadata.name == uuid)
            .cloned()
            .ok_or_else(|| not_found("clusterserviceclasses", uuid))
    }
}

fn not_found(resource: &str, name: &str) -> SvcatError {
    SvcatError::Api {
        status: 404,
        message: format!("{} \"{}\" not found", resource, name),
    }
}

impl ServiceCatalog for MockCatalog {
    fn retrieve_class_by_name(&self, name: &str) -> Result<ClusterServiceClass, SvcatError> {
        self.record("retrieve_class_by_name")?;
        let matches: Vec<_> = self
            .classes
            .iter()
            .filter(|c| c.spec.external_name == name)
            .cloned()
            .collect();
        single_match(matches, "class", name)
    }

    fn retrieve_class_by_id(&self, uuid: &str) -> Result<ClusterServiceClass, SvcatError> {
        self.record("retrieve_class_by_id")?;
        self.class_named(uuid)
    }

    fn retrieve_class_by_plan(&self, plan: &ClusterServicePlan) -> Result<ClusterServiceClass, SvcatError> {
        self.record("retrieve_class_by_plan")?;
        self.class_named(&plan.spec.cluster_service_class_ref.name)
    }

    fn retrieve_plans_by_class(&self, class: &ClusterServiceClass) -> Result<Vec<ClusterServicePlan>, SvcatError> {
        self.record("retrieve_plans_by_class")?;
        Ok(self
            .plans
            .iter()
            .filter(|p| p.spec.cluster_service_class_ref.name == class.metadata.name)
            .cloned()
            .collect())
    }

    fn retrieve_broker_by_class(&self, class: &ClusterServiceClass) -> Result<ClusterServiceBroker, SvcatError> {
        self.record("retrieve_broker_by_class")?;
        self.brokers
            .iter()
            .find(|b| b.metadata.name == class.spec.cluster_service_broker_name)
            .cloned()
            .ok_or_else(|| not_found("clusterservicebrokers", &class.spec.cluster_service_broker_name))
    }

    fn retrieve_plan_by_name(&self, name: &str) -> Result<ClusterServicePlan, SvcatError> {
        self.record("retrieve_plan_by_name")?;
        let matches: Vec<_> = self
            .plans
            .iter()
            .filter(|p| p.spec.external_name == name)
            .cloned()
            .collect();
        single_match(matches, "plan", name)
    }

    fn retrieve_plan_by_id(&self, uuid: &str) -> Result<ClusterServicePlan, SvcatError> {
        self.record("retrieve_plan_by_id")?;
        self.plans
            .iter()
            .find(|p| p.metadata.name == uuid)
            .cloned()
            .ok_or_else(|| not_found("clusterserviceplans", uuid))
    }

    fn retrieve_instances_by_plan(&self, plan: &ClusterServicePlan) -> Result<Vec<ServiceInstance>, SvcatError> {
        self.record("retrieve_instances_by_plan")?;
        Ok(self
            .instances
            .iter()
            .filter(|i| {
                i.spec
                    .cluster_service_plan_ref
                    .as_ref()
                    .is_some_and(|r| r.name == plan.metadata.name)
            })
            .cloned()
            .collect())
    }
}
