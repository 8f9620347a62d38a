//! gRPC service implementations, one per domain.
//!
//! Each method is a one-line delegation through [`Proxy::unary`] or
//! [`Proxy::stream`].

use choreo_proto::branch_service_server::{BranchService, BranchServiceServer};
use choreo_proto::choreo_service_server::{ChoreoService, ChoreoServiceServer};
use choreo_proto::discovery_service_server::{DiscoveryService, DiscoveryServiceServer};
use choreo_proto::resource_service_server::{ResourceService, ResourceServiceServer};
use choreo_proto::runner_service_server::{RunnerService, RunnerServiceServer};
use choreo_proto::snapshot_service_server::{SnapshotService, SnapshotServiceServer};
use choreo_proto::*;
use tonic::transport::Server;
use tonic::transport::server::Router;
use tonic::{Request, Response, Status};

use crate::relay::RelayStream;
use crate::route::{Branch, Choreo, Discovery, Proxy, ProxyState, Resource, Runner, Snapshot};

/// Mount all six domain services on `server`.
pub fn build_router(server: &mut Server, state: ProxyState) -> Router {
    server
        .add_service(Proxy::<Branch>::new(state.clone()).into_service())
        .add_service(Proxy::<Resource>::new(state.clone()).into_service())
        .add_service(Proxy::<Discovery>::new(state.clone()).into_service())
        .add_service(Proxy::<Runner>::new(state.clone()).into_service())
        .add_service(Proxy::<Choreo>::new(state.clone()).into_service())
        .add_service(Proxy::<Snapshot>::new(state).into_service())
}

// ── Branch ─────────────────────────────────────────────────────────

impl Proxy<Branch> {
    pub fn into_service(self) -> BranchServiceServer<Self> {
        BranchServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl BranchService for Proxy<Branch> {
    async fn get(&self, request: Request<BranchGetRequest>) -> Result<Response<BranchGetResponse>, Status> {
        self.unary(request, |b, req| async move { b.get(req).await }).await
    }

    async fn create(&self, request: Request<BranchCreateRequest>) -> Result<Response<BranchCreateResponse>, Status> {
        self.unary(request, |b, req| async move { b.create(req).await }).await
    }

    async fn delete(&self, request: Request<BranchDeleteRequest>) -> Result<Response<BranchDeleteResponse>, Status> {
        self.unary(request, |b, req| async move { b.delete(req).await }).await
    }

    async fn merge(&self, request: Request<BranchMergeRequest>) -> Result<Response<BranchMergeResponse>, Status> {
        self.unary(request, |b, req| async move { b.merge(req).await }).await
    }

    async fn diff(&self, request: Request<BranchDiffRequest>) -> Result<Response<BranchDiffResponse>, Status> {
        self.unary(request, |b, req| async move { b.diff(req).await }).await
    }

    async fn stash(&self, request: Request<BranchStashRequest>) -> Result<Response<BranchStashResponse>, Status> {
        self.unary(request, |b, req| async move { b.stash(req).await }).await
    }

    async fn checkout(&self, request: Request<BranchCheckoutRequest>) -> Result<Response<BranchCheckoutResponse>, Status> {
        self.unary(request, |b, req| async move { b.checkout(req).await }).await
    }

    type WatchStream = RelayStream<BranchWatchResponse>;

    async fn watch(&self, request: Request<BranchWatchRequest>) -> Result<Response<Self::WatchStream>, Status> {
        self.stream(request, |b, token, req| b.watch(token, req))
    }

    type StreamFilesStream = RelayStream<BranchFileResponse>;

    async fn stream_files(&self, request: Request<BranchFilesRequest>) -> Result<Response<Self::StreamFilesStream>, Status> {
        self.stream(request, |b, token, req| b.stream_files(token, req))
    }
}

// ── Resource ───────────────────────────────────────────────────────

impl Proxy<Resource> {
    pub fn into_service(self) -> ResourceServiceServer<Self> {
        ResourceServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl ResourceService for Proxy<Resource> {
    async fn get(&self, request: Request<ResourceGetRequest>) -> Result<Response<ResourceGetResponse>, Status> {
        self.unary(request, |b, req| async move { b.get(req).await }).await
    }

    async fn list(&self, request: Request<ResourceListRequest>) -> Result<Response<ResourceListResponse>, Status> {
        self.unary(request, |b, req| async move { b.list(req).await }).await
    }

    async fn create(&self, request: Request<ResourceCreateRequest>) -> Result<Response<ResourceCreateResponse>, Status> {
        self.unary(request, |b, req| async move { b.create(req).await }).await
    }

    async fn update(&self, request: Request<ResourceUpdateRequest>) -> Result<Response<ResourceUpdateResponse>, Status> {
        self.unary(request, |b, req| async move { b.update(req).await }).await
    }

    async fn apply(&self, request: Request<ResourceApplyRequest>) -> Result<Response<ResourceApplyResponse>, Status> {
        self.unary(request, |b, req| async move { b.apply(req).await }).await
    }

    async fn delete(&self, request: Request<ResourceDeleteRequest>) -> Result<Response<ResourceDeleteResponse>, Status> {
        self.unary(request, |b, req| async move { b.delete(req).await }).await
    }

    type WatchStream = RelayStream<ResourceWatchResponse>;

    async fn watch(&self, request: Request<ResourceWatchRequest>) -> Result<Response<Self::WatchStream>, Status> {
        self.stream(request, |b, token, req| b.watch(token, req))
    }
}

// ── Discovery ──────────────────────────────────────────────────────

impl Proxy<Discovery> {
    pub fn into_service(self) -> DiscoveryServiceServer<Self> {
        DiscoveryServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl DiscoveryService for Proxy<Discovery> {
    async fn get(&self, request: Request<DiscoveryGetRequest>) -> Result<Response<DiscoveryGetResponse>, Status> {
        self.unary(request, |b, req| async move { b.get(req).await }).await
    }

    type WatchStream = RelayStream<DiscoveryWatchResponse>;

    async fn watch(&self, request: Request<DiscoveryWatchRequest>) -> Result<Response<Self::WatchStream>, Status> {
        self.stream(request, |b, token, req| b.watch(token, req))
    }
}

// ── Runner ─────────────────────────────────────────────────────────

impl Proxy<Runner> {
    pub fn into_service(self) -> RunnerServiceServer<Self> {
        RunnerServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl RunnerService for Proxy<Runner> {
    async fn start(&self, request: Request<RunnerStartRequest>) -> Result<Response<RunnerStartResponse>, Status> {
        self.unary(request, |b, req| async move { b.start(req).await }).await
    }

    async fn stop(&self, request: Request<RunnerStopRequest>) -> Result<Response<RunnerStopResponse>, Status> {
        self.unary(request, |b, req| async move { b.stop(req).await }).await
    }

    async fn once(&self, request: Request<RunnerOnceRequest>) -> Result<Response<RunnerOnceResponse>, Status> {
        self.unary(request, |b, req| async move { b.once(req).await }).await
    }

    async fn load(&self, request: Request<RunnerLoadRequest>) -> Result<Response<RunnerLoadResponse>, Status> {
        self.unary(request, |b, req| async move { b.load(req).await }).await
    }
}

// ── Choreo ─────────────────────────────────────────────────────────

impl Proxy<Choreo> {
    pub fn into_service(self) -> ChoreoServiceServer<Self> {
        ChoreoServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl ChoreoService for Proxy<Choreo> {
    async fn get(&self, request: Request<ChoreoGetRequest>) -> Result<Response<ChoreoGetResponse>, Status> {
        self.unary(request, |b, req| async move { b.get(req).await }).await
    }

    async fn apply(&self, request: Request<ChoreoApplyRequest>) -> Result<Response<ChoreoApplyResponse>, Status> {
        self.unary(request, |b, req| async move { b.apply(req).await }).await
    }

    type WatchStream = RelayStream<ChoreoWatchResponse>;

    async fn watch(&self, request: Request<ChoreoWatchRequest>) -> Result<Response<Self::WatchStream>, Status> {
        self.stream(request, |b, token, req| b.watch(token, req))
    }
}

// ── Snapshot ───────────────────────────────────────────────────────

impl Proxy<Snapshot> {
    pub fn into_service(self) -> SnapshotServiceServer<Self> {
        SnapshotServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl SnapshotService for Proxy<Snapshot> {
    async fn get(&self, request: Request<SnapshotGetRequest>) -> Result<Response<SnapshotGetResponse>, Status> {
        self.unary(request, |b, req| async move { b.get(req).await }).await
    }

    async fn list(&self, request: Request<SnapshotListRequest>) -> Result<Response<SnapshotListResponse>, Status> {
        self.unary(request, |b, req| async move { b.list(req).await }).await
    }

    async fn delete(&self, request: Request<SnapshotDeleteRequest>) -> Result<Response<SnapshotDeleteResponse>, Status> {
        self.unary(request, |b, req| async move { b.delete(req).await }).await
    }

    type WatchStream = RelayStream<SnapshotWatchResponse>;

    async fn watch(&self, request: Request<SnapshotWatchRequest>) -> Result<Response<Self::WatchStream>, Status> {
        self.stream(request, |b, token, req| b.watch(token, req))
    }
}
