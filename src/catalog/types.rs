//! Service-catalog resource model (`servicecatalog.k8s.io/v1beta1`).
//!
//! Only the fields svcat displays or follows are decoded; everything else in
//! the API object is ignored. Missing fields and explicit `null`s decode as
//! their defaults.

use serde::{Deserialize, Deserializer};

/// Decode `null` as `T::default()`
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Common Kubernetes object metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub namespace: Option<String>,
}

/// Reference to a cluster-scoped object by name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObjectReference {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
}

/// A status condition reported by the controller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub type_: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
}

/// Display status for a list of conditions.
///
/// The type of the last condition whose status is `True`, otherwise the type
/// of the last condition, otherwise empty.
pub fn condition_status(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .rev()
        .find(|c| c.status == "True")
        .or_else(|| conditions.last())
        .map(|c| c.type_.clone())
        .unwrap_or_default()
}

/// Collection response wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct List<T> {
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterServiceClassSpec {
    #[serde(deserialize_with = "nullable")]
    pub cluster_service_broker_name: String,
    #[serde(deserialize_with = "nullable")]
    pub external_name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub bindable: bool,
    #[serde(deserialize_with = "nullable")]
    pub plan_updatable: bool,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

/// A service offering advertised by a broker. Its UUID is `metadata.name`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClusterServiceClass {
    #[serde(deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "nullable")]
    pub spec: ClusterServiceClassSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterServicePlanSpec {
    #[serde(deserialize_with = "nullable")]
    pub cluster_service_broker_name: String,
    #[serde(deserialize_with = "nullable")]
    pub external_name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub free: bool,
    #[serde(deserialize_with = "nullable")]
    pub cluster_service_class_ref: ObjectReference,
}

/// A tier of a service class. Its UUID is `metadata.name`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClusterServicePlan {
    #[serde(deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "nullable")]
    pub spec: ClusterServicePlanSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClusterServiceBrokerSpec {
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClusterServiceBrokerStatus {
    #[serde(deserialize_with = "nullable")]
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClusterServiceBroker {
    #[serde(deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "nullable")]
    pub spec: ClusterServiceBrokerSpec,
    #[serde(deserialize_with = "nullable")]
    pub status: ClusterServiceBrokerStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceInstanceSpec {
    pub cluster_service_plan_ref: Option<ObjectReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceInstanceStatus {
    #[serde(deserialize_with = "nullable")]
    pub conditions: Vec<Condition>,
}

/// A provisioned instance of a plan, living in a namespace.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceInstance {
    #[serde(deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "nullable")]
    pub spec: ServiceInstanceSpec,
    #[serde(deserialize_with = "nullable")]
    pub status: ServiceInstanceStatus,
}

/// Body of a non-success API response (`kind: Status`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Status {
    #[serde(deserialize_with = "nullable")]
    pub message: String,
}
