//! HTTPS client for the service-catalog API.
//!
//! Implements `ServiceCatalog` with plain GET requests against the
//! `servicecatalog.k8s.io/v1beta1` API group. Name searches use field
//! selectors; UUID lookups fetch the object directly.
//!
//! # Error handling
//!
//! - Transport failures: `SvcatError::Http`
//! - Non-2xx status: `SvcatError::Api` with the server's `Status.message`
//! - Undecodable body: `SvcatError::Decode`
//! - Name search with no match: `SvcatError::NotFound`
//! - Name search with several matches: `SvcatError::Ambiguous`
//!
//! Requests are never retried.

use crate::catalog::kubeconfig::{self, ClusterConnection, Credentials, KubeconfigOptions};
use crate::catalog::types::{
    ClusterServiceBroker, ClusterServiceClass, ClusterServicePlan, List, ServiceInstance, Status,
};
use crate::catalog::ServiceCatalog;
use crate::SvcatError;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_GROUP_PATH: [&str; 3] = ["apis", "servicecatalog.k8s.io", "v1beta1"];

pub const CLASSES: &str = "clusterserviceclasses";
pub const PLANS: &str = "clusterserviceplans";
pub const BROKERS: &str = "clusterservicebrokers";
pub const INSTANCES: &str = "serviceinstances";

pub const FIELD_EXTERNAL_NAME: &str = "spec.externalName";
pub const FIELD_CLASS_REF: &str = "spec.clusterServiceClassRef.name";
pub const FIELD_PLAN_REF: &str = "spec.clusterServicePlanRef.name";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blocking API client bound to one cluster.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
    credentials: Credentials,
}

impl ApiClient {
    /// Create a client from resolved connection settings
    pub fn new(connection: ClusterConnection, timeout: Duration) -> Result<Self, SvcatError> {
        let base = Url::parse(&connection.server)
            .map_err(|e| SvcatError::kubeconfig(&connection.server, format!("invalid server URL: {}", e)))?;
        if base.cannot_be_a_base() {
            return Err(SvcatError::kubeconfig(&connection.server, "server URL cannot carry a path"));
        }

        let http = Client::builder()
            .use_preconfigured_tls(connection.tls_config()?)
            .timeout(timeout)
            .build()?;

        Ok(ApiClient {
            http,
            base,
            credentials: connection.credentials,
        })
    }

    /// Create a client from a kubeconfig with the default request timeout
    pub fn from_kubeconfig(options: &KubeconfigOptions) -> Result<Self, SvcatError> {
        Self::from_kubeconfig_with_timeout(options, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn from_kubeconfig_with_timeout(
        options: &KubeconfigOptions,
        timeout: Duration,
    ) -> Result<Self, SvcatError> {
        let connection = kubeconfig::load_connection(options)?;
        Self::new(connection, timeout)
    }

    /// URL of a resource collection, or of one object when `name` is given
    pub fn resource_url(&self, resource: &str, name: Option<&str>) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base() was rejected in new(), so this always succeeds
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(API_GROUP_PATH).push(resource);
            if let Some(name) = name {
                segments.push(name);
            }
        }
        url
    }

    fn get_object<T: DeserializeOwned>(&self, resource: &str, name: &str) -> Result<T, SvcatError> {
        self.get(self.resource_url(resource, Some(name)), None)
    }

    fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<T>, SvcatError> {
        let selector = field_selector(field, value);
        let list: List<T> = self.get(self.resource_url(resource, None), Some(&selector))?;
        Ok(list.items)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(url = %url, selector = ?field_selector))]
    fn get<T: DeserializeOwned>(&self, url: Url, field_selector: Option<&str>) -> Result<T, SvcatError> {
        let mut request = self.http.get(url).header(ACCEPT, "application/json");
        if let Some(selector) = field_selector {
            request = request.query(&[("fieldSelector", selector)]);
        }
        request = match self.credentials {
            Credentials::Bearer(ref token) => request.bearer_auth(token),
            Credentials::Basic {
                ref username,
                ref password,
            } => request.basic_auth(username, Some(password)),
            Credentials::None => request,
        };

        let response = request.send()?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "GET completed");

        let body = response.text()?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Single-term equality field selector
pub fn field_selector(field: &str, value: &str) -> String {
    format!("{}={}", field, value)
}

/// Reduce a name search to exactly one result
pub fn single_match<T>(mut items: Vec<T>, kind: &'static str, name: &str) -> Result<T, SvcatError> {
    match items.len() {
        0 => Err(SvcatError::NotFound {
            kind,
            name: name.to_string(),
        }),
        1 => Ok(items.remove(0)),
        count => Err(SvcatError::Ambiguous {
            kind,
            name: name.to_string(),
            count,
        }),
    }
}

/// Build an API error from a non-success response body
pub fn api_error(status: u16, body: &str) -> SvcatError {
    let message = serde_json::from_str::<Status>(body)
        .ok()
        .map(|s| s.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.to_string()
            }
        });
    SvcatError::Api { status, message }
}

impl ServiceCatalog for ApiClient {
    fn retrieve_class_by_name(&self, name: &str) -> Result<ClusterServiceClass, SvcatError> {
        let classes = self.list(CLASSES, FIELD_EXTERNAL_NAME, name)?;
        single_match(classes, "class", name)
    }

    fn retrieve_class_by_id(&self, uuid: &str) -> Result<ClusterServiceClass, SvcatError> {
        self.get_object(CLASSES, uuid)
    }

    fn retrieve_class_by_plan(&self, plan: &ClusterServicePlan) -> Result<ClusterServiceClass, SvcatError> {
        self.get_object(CLASSES, &plan.spec.cluster_service_class_ref.name)
    }

    fn retrieve_plans_by_class(&self, class: &ClusterServiceClass) -> Result<Vec<ClusterServicePlan>, SvcatError> {
        self.list(PLANS, FIELD_CLASS_REF, &class.metadata.name)
    }

    fn retrieve_broker_by_class(&self, class: &ClusterServiceClass) -> Result<ClusterServiceBroker, SvcatError> {
        self.get_object(BROKERS, &class.spec.cluster_service_broker_name)
    }

    fn retrieve_plan_by_name(&self, name: &str) -> Result<ClusterServicePlan, SvcatError> {
        let plans = self.list(PLANS, FIELD_EXTERNAL_NAME, name)?;
        single_match(plans, "plan", name)
    }

    fn retrieve_plan_by_id(&self, uuid: &str) -> Result<ClusterServicePlan, SvcatError> {
        self.get_object(PLANS, uuid)
    }

    fn retrieve_instances_by_plan(&self, plan: &ClusterServicePlan) -> Result<Vec<ServiceInstance>, SvcatError> {
        self.list(INSTANCES, FIELD_PLAN_REF, &plan.metadata.name)
    }
}
