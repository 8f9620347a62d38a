//! Tenant registration and readiness probing.
//!
//! Every configured tenant is inserted not-ready. A probe task per tenant
//! then issues a discovery `Get` through the tenant's own adapter on an
//! interval and flips readiness on each success/failure transition.

use std::time::Duration;

use choreo_proto::{DiscoveryGetRequest, Options};
use choreo_proxy::{Adapters, TenantContext, TenantId, TenantStore};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tonic::transport::{ClientTlsConfig, Endpoint};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ProxyConfig};

/// A tenant that has been inserted into the store.
#[derive(Debug, Clone)]
pub struct RegisteredTenant {
    pub id: TenantId,
    /// Whether the backend channel negotiates TLS (`https://` endpoints).
    pub tls: bool,
}

/// Insert a not-ready context for every configured tenant.
///
/// Channels connect lazily, so registration never touches the network.
pub fn register_tenants(config: &ProxyConfig, store: &TenantStore) -> Result<Vec<RegisteredTenant>, ConfigError> {
    let adapter_config = config.adapter_config();
    let mut registered = Vec::with_capacity(config.tenants.len());

    for tenant in &config.tenants {
        let id = tenant.id();
        let mut endpoint = Endpoint::from_shared(tenant.endpoint.clone())
            .map_err(|source| ConfigError::InvalidUri {
                tenant: id.clone(),
                endpoint: tenant.endpoint.clone(),
                source,
            })?
            .connect_timeout(adapter_config.request_timeout);

        let tls = endpoint.uri().scheme_str() == Some("https");
        if tls {
            endpoint = endpoint
                .tls_config(ClientTlsConfig::new().with_webpki_roots())
                .map_err(|source| ConfigError::Tls {
                    tenant: id.clone(),
                    source,
                })?;
        }

        let adapters = Adapters::grpc(endpoint.connect_lazy(), adapter_config);
        store.insert(id.clone(), TenantContext::new(adapters));
        debug!(tenant = %id, endpoint = %tenant.endpoint, tls, "tenant adapters created");
        registered.push(RegisteredTenant { id, tls });
    }

    info!(count = registered.len(), "tenants registered");
    Ok(registered)
}

/// Spawn one readiness probe per tenant. All stop when `token` is cancelled.
pub fn spawn_probes(
    store: &TenantStore,
    tenants: Vec<RegisteredTenant>,
    interval: Duration,
    token: &CancellationToken,
) -> Vec<JoinHandle<()>> {
    tenants
        .into_iter()
        .map(|tenant| tokio::spawn(run_probe(store.clone(), tenant, interval, token.child_token())))
        .collect()
}

async fn run_probe(store: TenantStore, tenant: RegisteredTenant, interval: Duration, token: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut failures: u64 = 0;
    let id = tenant.id;

    debug!(tenant = %id, ?interval, tls = tenant.tls, "readiness probe starting");

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let Some(context) = store.lookup(&id) else {
            debug!(tenant = %id, "tenant removed, stopping probe");
            return;
        };
        let request = DiscoveryGetRequest {
            options: Some(Options::for_proxy(id.namespace.as_str(), id.name.as_str())),
        };

        // Bounded by the adapter's request timeout.
        let ready = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = context.adapters().discovery.get(request) => match result {
                Ok(_) => true,
                Err(status) => {
                    failures += 1;
                    if failures == 1 {
                        warn!(tenant = %id, code = ?status.code(), error = %status.message(), "backend not serving");
                    } else {
                        debug!(tenant = %id, code = ?status.code(), failures, "backend still not serving");
                    }
                    false
                }
            },
        };
        if ready {
            failures = 0;
        }

        if !store.set_ready(&id, ready) {
            debug!(tenant = %id, "tenant removed, stopping probe");
            return;
        }
    }

    debug!(tenant = %id, "readiness probe shutting down");
}
