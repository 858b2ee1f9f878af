//! Kubeconfig loading and TLS setup.
//!
//! Resolves the API server address and credentials for one context of a
//! kubeconfig file, then turns them into a rustls client configuration.
//!
//! # Lookup order
//!
//! - File: `--kubeconfig`, else the first entry of `$KUBECONFIG`, else
//!   `~/.kube/config`
//! - Context: `--context`, else `current-context`
//!
//! Relative certificate, key and token paths are resolved against the
//! directory holding the kubeconfig file.

use crate::SvcatError;
use base64::Engine;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where to find the kubeconfig and which context to use.
#[derive(Debug, Clone, Default)]
pub struct KubeconfigOptions {
    pub path: Option<PathBuf>,
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Kubeconfig {
    pub clusters: Vec<NamedCluster>,
    pub contexts: Vec<NamedContext>,
    pub users: Vec<NamedUser>,
    pub current_context: String,
    #[serde(skip)]
    path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: Cluster,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Cluster {
    pub server: String,
    pub certificate_authority: Option<String>,
    pub certificate_authority_data: Option<String>,
    pub insecure_skip_tls_verify: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedContext {
    pub name: String,
    pub context: Context,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Context {
    pub cluster: String,
    pub user: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedUser {
    pub name: String,
    #[serde(default)]
    pub user: User,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct User {
    pub token: Option<String>,
    pub token_file: Option<String>,
    pub client_certificate: Option<String>,
    pub client_certificate_data: Option<String>,
    pub client_key: Option<String>,
    pub client_key_data: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Credentials sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub enum Credentials {
    None,
    Bearer(String),
    Basic { username: String, password: String },
}

/// Resolved connection settings for one context.
#[derive(Debug, Clone)]
pub struct ClusterConnection {
    /// API server base URL, without a trailing slash
    pub server: String,
    /// PEM bundle of the cluster CA, if the kubeconfig names one
    pub ca_pem: Option<Vec<u8>>,
    pub insecure_skip_tls_verify: bool,
    /// PEM client certificate chain and private key
    pub client_identity: Option<(Vec<u8>, Vec<u8>)>,
    pub credentials: Credentials,
}

/// Pick the kubeconfig path from options, `$KUBECONFIG` or the home directory.
pub fn resolve_path(options: &KubeconfigOptions) -> Result<PathBuf, SvcatError> {
    if let Some(ref path) = options.path {
        return Ok(path.clone());
    }

    if let Some(value) = env::var_os("KUBECONFIG") {
        if let Some(first) = env::split_paths(&value).find(|p| !p.as_os_str().is_empty()) {
            return Ok(first);
        }
    }

    dirs::home_dir()
        .map(|home| home.join(".kube").join("config"))
        .ok_or_else(|| SvcatError::kubeconfig("~/.kube/config", "unable to determine home directory"))
}

/// Load the kubeconfig selected by `options` and resolve its context.
pub fn load_connection(options: &KubeconfigOptions) -> Result<ClusterConnection, SvcatError> {
    let path = resolve_path(options)?;
    let kubeconfig = Kubeconfig::load(&path)?;
    kubeconfig.connection(options.context.as_deref())
}

impl Kubeconfig {
    /// Read and parse a kubeconfig file
    pub fn load(path: &Path) -> Result<Self, SvcatError> {
        tracing::debug!(path = %path.display(), "loading kubeconfig");

        let contents = fs::read_to_string(path)
            .map_err(|e| SvcatError::kubeconfig(path.display().to_string(), e.to_string()))?;
        Self::parse(&contents, path)
    }

    /// Parse kubeconfig YAML; `path` anchors relative file references
    pub fn parse(contents: &str, path: &Path) -> Result<Self, SvcatError> {
        let mut config: Kubeconfig = serde_yaml::from_str(contents)
            .map_err(|e| SvcatError::kubeconfig(path.display().to_string(), e.to_string()))?;
        config.path = path.to_path_buf();
        Ok(config)
    }

    /// Resolve the named context, or `current-context` when `None`
    pub fn connection(&self, context: Option<&str>) -> Result<ClusterConnection, SvcatError> {
        let context_name = context.unwrap_or(&self.current_context);
        if context_name.is_empty() {
            return Err(self.error("no context selected and current-context is not set"));
        }

        let context = self
            .contexts
            .iter()
            .find(|c| c.name == context_name)
            .map(|c| &c.context)
            .ok_or_else(|| self.error(format!("context '{}' not found", context_name)))?;

        let cluster = self
            .clusters
            .iter()
            .find(|c| c.name == context.cluster)
            .map(|c| &c.cluster)
            .ok_or_else(|| self.error(format!("cluster '{}' not found", context.cluster)))?;

        if cluster.server.is_empty() {
            return Err(self.error(format!("cluster '{}' has no server", context.cluster)));
        }

        // A context may legitimately have no user (anonymous access).
        let user = if context.user.is_empty() {
            User::default()
        } else {
            self.users
                .iter()
                .find(|u| u.name == context.user)
                .map(|u| u.user.clone())
                .ok_or_else(|| self.error(format!("user '{}' not found", context.user)))?
        };

        tracing::debug!(
            context = context_name,
            cluster = %context.cluster,
            server = %cluster.server,
            "resolved kubeconfig context"
        );

        let ca_pem = self.inline_or_file(
            cluster.certificate_authority_data.as_deref(),
            cluster.certificate_authority.as_deref(),
            "certificate-authority",
        )?;

        let cert = self.inline_or_file(
            user.client_certificate_data.as_deref(),
            user.client_certificate.as_deref(),
            "client-certificate",
        )?;
        let key = self.inline_or_file(
            user.client_key_data.as_deref(),
            user.client_key.as_deref(),
            "client-key",
        )?;
        let client_identity = match (cert, key) {
            (Some(cert), Some(key)) => Some((cert, key)),
            (None, None) => None,
            _ => {
                return Err(self.error(format!(
                    "user '{}' needs both a client certificate and a client key",
                    context.user
                )))
            }
        };

        Ok(ClusterConnection {
            server: cluster.server.trim_end_matches('/').to_string(),
            ca_pem,
            insecure_skip_tls_verify: cluster.insecure_skip_tls_verify,
            client_identity,
            credentials: self.credentials(&user)?,
        })
    }

    fn credentials(&self, user: &User) -> Result<Credentials, SvcatError> {
        if let Some(ref token) = user.token {
            return Ok(Credentials::Bearer(token.clone()));
        }
        if let Some(ref token_file) = user.token_file {
            let path = self.relative(token_file);
            let token = fs::read_to_string(&path)
                .map_err(|e| self.error(format!("token-file {}: {}", path.display(), e)))?;
            return Ok(Credentials::Bearer(token.trim().to_string()));
        }
        if let Some(ref username) = user.username {
            return Ok(Credentials::Basic {
                username: username.clone(),
                password: user.password.clone().unwrap_or_default(),
            });
        }
        Ok(Credentials::None)
    }

    /// Inline base64 data wins over a file reference
    fn inline_or_file(
        &self,
        data: Option<&str>,
        file: Option<&str>,
        field: &str,
    ) -> Result<Option<Vec<u8>>, SvcatError> {
        if let Some(data) = data {
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(data.trim())
                .map_err(|e| self.error(format!("{}-data is not valid base64: {}", field, e)))?;
            return Ok(Some(decoded));
        }
        match file {
            Some(file) => {
                let path = self.relative(file);
                fs::read(&path)
                    .map(Some)
                    .map_err(|e| self.error(format!("{} {}: {}", field, path.display(), e)))
            }
            None => Ok(None),
        }
    }

    fn relative(&self, file: &str) -> PathBuf {
        let file = Path::new(file);
        match self.path.parent() {
            Some(dir) if file.is_relative() => dir.join(file),
            _ => file.to_path_buf(),
        }
    }

    fn error(&self, message: impl Into<String>) -> SvcatError {
        SvcatError::kubeconfig(self.path.display().to_string(), message)
    }
}

impl ClusterConnection {
    /// Build the rustls configuration for this cluster.
    ///
    /// Uses the ring provider explicitly so the result does not depend on a
    /// process-wide default provider.
    pub fn tls_config(&self) -> Result<ClientConfig, SvcatError> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let builder = ClientConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()?;

        let builder = if self.insecure_skip_tls_verify {
            tracing::warn!(server = %self.server, "TLS certificate verification is disabled");
            builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert(provider)))
        } else {
            builder.with_root_certificates(self.root_store()?)
        };

        let config = match self.client_identity {
            Some((ref cert_pem, ref key_pem)) => {
                let chain = CertificateDer::pem_slice_iter(cert_pem)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| pem_error("client certificate", e))?;
                let key = PrivateKeyDer::from_pem_slice(key_pem).map_err(|e| pem_error("client key", e))?;
                builder.with_client_auth_cert(chain, key)?
            }
            None => builder.with_no_client_auth(),
        };

        Ok(config)
    }

    fn root_store(&self) -> Result<RootCertStore, SvcatError> {
        let mut roots = RootCertStore::empty();
        match self.ca_pem {
            Some(ref pem) => {
                for cert in CertificateDer::pem_slice_iter(pem) {
                    roots.add(cert.map_err(|e| pem_error("certificate authority", e))?)?;
                }
            }
            None => roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned()),
        }
        Ok(roots)
    }
}

fn pem_error(what: &str, e: rustls::pki_types::pem::Error) -> SvcatError {
    SvcatError::Tls(rustls::Error::General(format!("invalid {} PEM: {:?}", what, e)))
}

/// Verifier for `insecure-skip-tls-verify`: accepts any server certificate
/// but still checks handshake signatures.
#[derive(Debug)]
struct AcceptAnyServerCert(Arc<CryptoProvider>);

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}
