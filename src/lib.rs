//! svcat library
//!
//! Command-line client for the service-catalog API (`servicecatalog.k8s.io`).
//!
//! This library provides:
//! - The read-only resource model for classes, plans, brokers and instances
//! - A client facade (`ServiceCatalog`) and its HTTPS implementation
//! - Text table output for describe sections
//! - The `describe class` and `describe plan` commands
//!
//! # Example
//!
//! ```no_run
//! use svcat::catalog::client::ApiClient;
//! use svcat::catalog::kubeconfig::KubeconfigOptions;
//! use svcat::commands::describe_class::DescribeClassCmd;
//!
//! let client = ApiClient::from_kubeconfig(&KubeconfigOptions::default())?;
//! let cmd = DescribeClassCmd { traverse: true, lookup_by_uuid: false };
//! cmd.run(&client, &mut std::io::stdout(), Some("azure-mysqldb"))?;
//! # Ok::<(), svcat::SvcatError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod version;

pub use catalog::ServiceCatalog;

/// Error types for svcat operations.
#[derive(Debug, thiserror::Error)]
pub enum SvcatError {
    /// Describe was invoked without a positional argument
    #[error("name or uuid is required")]
    MissingArgument,

    /// A by-name search matched nothing
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// A by-name search matched more than one resource
    #[error("more than one matching {kind} found for '{name}' ({count})")]
    Ambiguous {
        kind: &'static str,
        name: String,
        count: usize,
    },

    /// The API server answered with a non-success status
    #[error("API request failed with HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unable to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Missing or malformed kubeconfig
    #[error("kubeconfig {path}: {message}")]
    Kubeconfig { path: String, message: String },

    #[error("TLS configuration error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SvcatError {
    pub(crate) fn kubeconfig(path: impl Into<String>, message: impl Into<String>) -> Self {
        SvcatError::Kubeconfig {
            path: path.into(),
            message: message.into(),
        }
    }
}
