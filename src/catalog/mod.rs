//! Service-catalog access layer.
//!
//! Provides:
//! - The resource model (`types`)
//! - Kubeconfig loading and TLS setup (`kubeconfig`)
//! - The HTTPS API client (`client`)
//!
//! Commands only talk to the `ServiceCatalog` trait, so tests can substitute
//! a fixed in-memory catalog.

pub mod client;
pub mod kubeconfig;
pub mod types;

use crate::SvcatError;
use types::{ClusterServiceBroker, ClusterServiceClass, ClusterServicePlan, ServiceInstance};

/// Lookups used by the describe commands.
///
/// Implementations return errors unchanged to the caller; there is no retry.
pub trait ServiceCatalog {
    /// Find a class by its external (human-readable) name
    fn retrieve_class_by_name(&self, name: &str) -> Result<ClusterServiceClass, SvcatError>;

    /// Get a class by UUID
    fn retrieve_class_by_id(&self, uuid: &str) -> Result<ClusterServiceClass, SvcatError>;

    /// Get the class a plan belongs to
    fn retrieve_class_by_plan(&self, plan: &ClusterServicePlan) -> Result<ClusterServiceClass, SvcatError>;

    /// List the plans of a class
    fn retrieve_plans_by_class(&self, class: &ClusterServiceClass) -> Result<Vec<ClusterServicePlan>, SvcatError>;

    /// Get the broker offering a class
    fn retrieve_broker_by_class(&self, class: &ClusterServiceClass) -> Result<ClusterServiceBroker, SvcatError>;

    /// Find a plan by its external name
    fn retrieve_plan_by_name(&self, name: &str) -> Result<ClusterServicePlan, SvcatError>;

    /// Get a plan by UUID
    fn retrieve_plan_by_id(&self, uuid: &str) -> Result<ClusterServicePlan, SvcatError>;

    /// List instances provisioned from a plan, across all namespaces
    fn retrieve_instances_by_plan(&self, plan: &ClusterServicePlan) -> Result<Vec<ServiceInstance>, SvcatError>;
}
