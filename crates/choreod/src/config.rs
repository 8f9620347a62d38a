//! choreod.toml configuration.
//!
//! ```toml
//! listen = "0.0.0.0:51000"
//! log_format = "json"
//!
//! [[tenants]]
//! namespace = "default"
//! name = "edge"
//! endpoint = "http://10.0.0.12:9443"
//! ```

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use choreo_backend::AdapterConfig;
use choreo_proxy::{RelayConfig, TenantId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonic::transport::Endpoint;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("tenant #{index}: {field} must not be empty")]
    EmptyField { index: usize, field: &'static str },

    #[error("tenant {0} is configured more than once")]
    DuplicateTenant(TenantId),

    #[error("tenant {tenant}: endpoint {endpoint:?} must start with http:// or https://")]
    InvalidEndpoint { tenant: TenantId, endpoint: String },

    #[error("tenant {tenant}: endpoint {endpoint:?} is not a valid URI: {source}")]
    InvalidUri {
        tenant: TenantId,
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("tenant {tenant}: TLS setup failed: {source}")]
    Tls {
        tenant: TenantId,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_watch_backoff_ms")]
    pub watch_backoff_ms: u64,
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
    #[serde(default = "default_readiness_interval_secs")]
    pub readiness_interval_secs: u64,
    pub tenants: Vec<TenantConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub namespace: String,
    pub name: String,
    /// Backend gRPC endpoint, e.g. `http://10.0.0.12:9443`.
    pub endpoint: String,
}

impl TenantConfig {
    pub fn id(&self) -> TenantId {
        TenantId::new(self.namespace.as_str(), self.name.as_str())
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 51000))
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_watch_backoff_ms() -> u64 {
    1000
}

fn default_send_timeout_ms() -> u64 {
    5000
}

fn default_readiness_interval_secs() -> u64 {
    5
}

impl ProxyConfig {
    /// Read, parse and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ProxyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("request_timeout_secs", self.request_timeout_secs),
            ("watch_backoff_ms", self.watch_backoff_ms),
            ("send_timeout_ms", self.send_timeout_ms),
            ("readiness_interval_secs", self.readiness_interval_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration(field));
            }
        }

        let mut seen = HashSet::new();
        for (index, tenant) in self.tenants.iter().enumerate() {
            if tenant.namespace.trim().is_empty() {
                return Err(ConfigError::EmptyField { index, field: "namespace" });
            }
            if tenant.name.trim().is_empty() {
                return Err(ConfigError::EmptyField { index, field: "name" });
            }
            let id = tenant.id();
            if !(tenant.endpoint.starts_with("http://") || tenant.endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidEndpoint {
                    tenant: id,
                    endpoint: tenant.endpoint.clone(),
                });
            }
            if let Err(source) = Endpoint::from_shared(tenant.endpoint.clone()) {
                return Err(ConfigError::InvalidUri {
                    tenant: id,
                    endpoint: tenant.endpoint.clone(),
                    source,
                });
            }
            if !seen.insert(id.clone()) {
                return Err(ConfigError::DuplicateTenant(id));
            }
        }
        Ok(())
    }

    pub fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig::default()
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_watch_backoff(Duration::from_millis(self.watch_backoff_ms))
    }

    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            send_timeout: Duration::from_millis(self.send_timeout_ms),
        }
    }

    pub fn readiness_interval(&self) -> Duration {
        Duration::from_secs(self.readiness_interval_secs)
    }
}
