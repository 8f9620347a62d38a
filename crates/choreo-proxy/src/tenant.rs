//! Tenant context store.
//!
//! Maps a tenant id (`namespace/name`) to the adapters for that tenant's
//! backend. The proxy only reads from the store; registration, removal and
//! readiness changes belong to whoever owns the tenant sessions.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use choreo_backend::{
    AdapterConfig, BranchBackend, BranchClient, ChoreoBackend, ChoreoClient, DiscoveryBackend,
    DiscoveryClient, ResourceBackend, ResourceClient, RunnerBackend, RunnerClient,
    SnapshotBackend, SnapshotClient,
};
use tonic::transport::Channel;
use tracing::{debug, info};

use crate::error::RouteError;

/// Addresses exactly one tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TenantId {
    pub namespace: String,
    pub name: String,
}

impl TenantId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// One adapter per domain.
#[derive(Clone)]
pub struct Adapters {
    pub branch: Arc<dyn BranchBackend>,
    pub discovery: Arc<dyn DiscoveryBackend>,
    pub resource: Arc<dyn ResourceBackend>,
    pub runner: Arc<dyn RunnerBackend>,
    pub choreo: Arc<dyn ChoreoBackend>,
    pub snapshot: Arc<dyn SnapshotBackend>,
}

impl Adapters {
    /// gRPC adapters for every domain, all sharing `channel`.
    pub fn grpc(channel: Channel, config: AdapterConfig) -> Self {
        Self {
            branch: Arc::new(BranchClient::new(channel.clone(), config)),
            discovery: Arc::new(DiscoveryClient::new(channel.clone(), config)),
            resource: Arc::new(ResourceClient::new(channel.clone(), config)),
            runner: Arc::new(RunnerClient::new(channel.clone(), config)),
            choreo: Arc::new(ChoreoClient::new(channel.clone(), config)),
            snapshot: Arc::new(SnapshotClient::new(channel, config)),
        }
    }
}

/// Everything the proxy needs to serve one tenant.
///
/// A context always carries all adapters; it starts not ready.
pub struct TenantContext {
    ready: AtomicBool,
    adapters: Adapters,
}

impl TenantContext {
    pub fn new(adapters: Adapters) -> Self {
        Self {
            ready: AtomicBool::new(false),
            adapters,
        }
    }

    pub fn adapters(&self) -> &Adapters {
        &self.adapters
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Flip readiness. Returns the previous value.
    pub fn set_ready(&self, ready: bool) -> bool {
        self.ready.swap(ready, Ordering::AcqRel)
    }
}

impl fmt::Debug for TenantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantContext")
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}

/// Concurrent tenant lookup table. Cheap to clone.
#[derive(Clone, Default)]
pub struct TenantStore {
    tenants: Arc<RwLock<HashMap<TenantId, Arc<TenantContext>>>>,
}

impl TenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a tenant. Returns the replaced context.
    pub fn insert(&self, id: TenantId, context: TenantContext) -> Option<Arc<TenantContext>> {
        let mut tenants = self.tenants.write().expect("tenants lock");
        let ready = context.is_ready();
        let previous = tenants.insert(id.clone(), Arc::new(context));
        info!(tenant = %id, ready, replaced = previous.is_some(), "tenant registered");
        previous
    }

    /// Tear a tenant down. In-flight requests keep their `Arc`.
    pub fn remove(&self, id: &TenantId) -> Option<Arc<TenantContext>> {
        let mut tenants = self.tenants.write().expect("tenants lock");
        let removed = tenants.remove(id);
        if removed.is_some() {
            info!(tenant = %id, "tenant removed");
        }
        removed
    }

    /// Toggle readiness. Returns false if the tenant is unknown.
    pub fn set_ready(&self, id: &TenantId, ready: bool) -> bool {
        let Some(context) = self.lookup(id) else {
            return false;
        };
        if context.set_ready(ready) != ready {
            info!(tenant = %id, ready, "tenant readiness changed");
        }
        true
    }

    /// Pure lookup, no readiness check.
    pub fn lookup(&self, id: &TenantId) -> Option<Arc<TenantContext>> {
        let tenants = self.tenants.read().expect("tenants lock");
        tenants.get(id).cloned()
    }

    /// Lookup plus readiness check, as used on every routed request.
    pub fn resolve(&self, id: &TenantId) -> Result<Arc<TenantContext>, RouteError> {
        let context = self
            .lookup(id)
            .ok_or_else(|| RouteError::NotFound(id.clone()))?;
        if !context.is_ready() {
            debug!(tenant = %id, "tenant not ready");
            return Err(RouteError::Unavailable(id.clone()));
        }
        Ok(context)
    }

    /// All registered tenant ids, sorted.
    pub fn list(&self) -> Vec<TenantId> {
        let tenants = self.tenants.read().expect("tenants lock");
        let mut ids: Vec<TenantId> = tenants.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.tenants.read().expect("tenants lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
