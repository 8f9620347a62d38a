//! Tenant routing — resolve the tenant, then delegate to its adapter.
//!
//! Every domain service goes through [`Proxy::unary`] or [`Proxy::stream`];
//! the per-domain code only says which adapter method to call.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use choreo_backend::{
    BranchBackend, ChoreoBackend, DiscoveryBackend, EventReceiver, ResourceBackend, RunnerBackend,
    SnapshotBackend,
};
use choreo_proto::*;
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status};
use tracing::debug;

use crate::relay::{RelayConfig, RelayStream, RelayTarget, spawn_relay};
use crate::tenant::{TenantContext, TenantId, TenantStore};

/// A request that names the tenant it is meant for.
pub trait TenantAddressed {
    /// The target tenant. Missing routing fields give an empty id, which
    /// never resolves.
    fn tenant_id(&self) -> TenantId;
}

macro_rules! addressed_by_options {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TenantAddressed for $ty {
                fn tenant_id(&self) -> TenantId {
                    self.options
                        .as_ref()
                        .map(|o| TenantId::new(o.proxy_namespace.as_str(), o.proxy_name.as_str()))
                        .unwrap_or_default()
                }
            }
        )+
    };
}

macro_rules! addressed_by_choreo_context {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TenantAddressed for $ty {
                fn tenant_id(&self) -> TenantId {
                    self.choreo_context
                        .as_ref()
                        .map(|c| TenantId::new(c.namespace.as_str(), c.name.as_str()))
                        .unwrap_or_default()
                }
            }
        )+
    };
}

addressed_by_options!(
    BranchGetRequest,
    BranchCreateRequest,
    BranchDeleteRequest,
    BranchMergeRequest,
    BranchDiffRequest,
    BranchStashRequest,
    BranchCheckoutRequest,
    BranchWatchRequest,
    BranchFilesRequest,
    ResourceGetRequest,
    ResourceListRequest,
    ResourceCreateRequest,
    ResourceUpdateRequest,
    ResourceApplyRequest,
    ResourceDeleteRequest,
    ResourceWatchRequest,
    DiscoveryGetRequest,
    DiscoveryWatchRequest,
    RunnerStartRequest,
    RunnerStopRequest,
    RunnerOnceRequest,
    RunnerLoadRequest,
    SnapshotGetRequest,
    SnapshotListRequest,
    SnapshotDeleteRequest,
    SnapshotWatchRequest,
);

addressed_by_choreo_context!(ChoreoGetRequest, ChoreoApplyRequest, ChoreoWatchRequest);

/// Selects one domain's adapter out of a tenant context.
pub trait Domain: Send + Sync + 'static {
    const NAME: &'static str;
    type Backend: ?Sized + Send + Sync + 'static;

    fn backend(context: &TenantContext) -> Arc<Self::Backend>;
}

macro_rules! domain {
    ($marker:ident, $name:literal, $backend:ident, $field:ident) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $marker;

        impl Domain for $marker {
            const NAME: &'static str = $name;
            type Backend = dyn $backend;

            fn backend(context: &TenantContext) -> Arc<Self::Backend> {
                Arc::clone(&context.adapters().$field)
            }
        }
    };
}

domain!(Branch, "branch", BranchBackend, branch);
domain!(Resource, "resource", ResourceBackend, resource);
domain!(Discovery, "discovery", DiscoveryBackend, discovery);
domain!(Runner, "runner", RunnerBackend, runner);
domain!(Choreo, "choreo", ChoreoBackend, choreo);
domain!(Snapshot, "snapshot", SnapshotBackend, snapshot);

/// State shared by every domain service.
#[derive(Clone)]
pub struct ProxyState {
    store: TenantStore,
    relay: RelayConfig,
    shutdown: CancellationToken,
}

impl ProxyState {
    pub fn new(store: TenantStore, relay: RelayConfig, shutdown: CancellationToken) -> Self {
        Self {
            store,
            relay,
            shutdown,
        }
    }
}

/// Routing service for one domain. Stateless across calls.
pub struct Proxy<D> {
    state: ProxyState,
    _domain: PhantomData<fn() -> D>,
}

impl<D> Clone for Proxy<D> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            _domain: PhantomData,
        }
    }
}

impl<D: Domain> Proxy<D> {
    pub fn new(state: ProxyState) -> Self {
        Self {
            state,
            _domain: PhantomData,
        }
    }

    fn resolve(&self, id: &TenantId) -> Result<Arc<D::Backend>, Status> {
        match self.state.store.resolve(id) {
            Ok(context) => Ok(D::backend(&context)),
            Err(err) => {
                debug!(domain = D::NAME, tenant = %id, error = %err, "routing failed");
                Err(err.into())
            }
        }
    }

    /// Route a unary call. The request reaches the adapter unmodified and
    /// its result comes back unmodified.
    pub async fn unary<Req, Resp, F, Fut>(&self, request: Request<Req>, call: F) -> Result<Response<Resp>, Status>
    where
        Req: TenantAddressed,
        F: FnOnce(Arc<D::Backend>, Req) -> Fut,
        Fut: Future<Output = Result<Resp, Status>>,
    {
        let request = request.into_inner();
        let id = request.tenant_id();
        let backend = self.resolve(&id)?;
        debug!(domain = D::NAME, tenant = %id, "forwarding unary call");
        call(backend, request).await.map(Response::new)
    }

    /// Route a server-streaming call through a relay.
    ///
    /// The relay token is a child of the server's shutdown token and is
    /// handed to the adapter, so ending the relay ends the backend stream.
    pub fn stream<Req, M, F>(&self, request: Request<Req>, open: F) -> Result<Response<RelayStream<M>>, Status>
    where
        Req: TenantAddressed,
        M: Send + 'static,
        F: FnOnce(&D::Backend, CancellationToken, Req) -> EventReceiver<M>,
    {
        let peer = request.remote_addr();
        let request = request.into_inner();
        let id = request.tenant_id();
        let backend = self.resolve(&id)?;

        let token = self.state.shutdown.child_token();
        let events = open(backend.as_ref(), token.clone(), request);
        let target = RelayTarget {
            domain: D::NAME,
            tenant: id,
            peer,
        };
        let session = spawn_relay(self.state.relay, token, events, target);
        Ok(Response::new(session.stream))
    }
}
