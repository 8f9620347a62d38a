//! Shared fixtures: an in-memory fake backend and helpers that call every
//! routed method once.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use choreo_backend::*;
use choreo_proto::branch_service_server::BranchService;
use choreo_proto::choreo_service_server::ChoreoService;
use choreo_proto::discovery_service_server::DiscoveryService;
use choreo_proto::resource_service_server::ResourceService;
use choreo_proto::runner_service_server::RunnerService;
use choreo_proto::snapshot_service_server::SnapshotService;
use choreo_proto::*;
use choreo_proxy::*;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tonic::{Request, Status};

/// Records every call and answers from canned data.
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<String>>,
    fail_with: Mutex<Option<Status>>,
    resource_events: Mutex<Vec<ResourceWatchResponse>>,
    watch_tokens: Mutex<Vec<CancellationToken>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every unary call fail with `status`.
    pub fn fail_with(&self, status: Status) {
        *self.fail_with.lock().unwrap() = Some(status);
    }

    pub fn set_resource_events(&self, events: Vec<ResourceWatchResponse>) {
        *self.resource_events.lock().unwrap() = events;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn watch_tokens(&self) -> Vec<CancellationToken> {
        self.watch_tokens.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), Status> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().clone() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    fn stream<T: Send + 'static>(&self, token: CancellationToken, events: Vec<T>) -> EventReceiver<T> {
        self.watch_tokens.lock().unwrap().push(token.clone());
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            for event in events {
                if tx.send(Ok(event)).await.is_err() {
                    return;
                }
            }
            token.cancelled().await;
        });
        rx
    }
}

pub fn adapters(fake: &Arc<FakeBackend>) -> Adapters {
    Adapters {
        branch: fake.clone(),
        discovery: fake.clone(),
        resource: fake.clone(),
        runner: fake.clone(),
        choreo: fake.clone(),
        snapshot: fake.clone(),
    }
}

pub fn register(store: &TenantStore, id: &TenantId, fake: &Arc<FakeBackend>, ready: bool) {
    store.insert(id.clone(), TenantContext::new(adapters(fake)));
    store.set_ready(id, ready);
}

pub fn state(store: TenantStore) -> ProxyState {
    ProxyState::new(store, RelayConfig::default(), CancellationToken::new())
}

pub fn resource_event(kind: WatchEventType, tag: &str) -> ResourceWatchResponse {
    ResourceWatchResponse {
        object: tag.as_bytes().to_vec(),
        event_type: kind.into(),
    }
}

// ── Fake adapter impls ─────────────────────────────────────────────

#[tonic::async_trait]
impl BranchBackend for FakeBackend {
    async fn get(&self, request: BranchGetRequest) -> Result<BranchGetResponse, Status> {
        self.record(format!("branch.get {request:?}"))?;
        Ok(BranchGetResponse {
            branch_objects: vec![BranchObject {
                name: "main".into(),
                checked_out: true,
            }],
        })
    }
    async fn create(&self, request: BranchCreateRequest) -> Result<BranchCreateResponse, Status> {
        self.record(format!("branch.create {request:?}"))?;
        Ok(BranchCreateResponse {})
    }
    async fn delete(&self, request: BranchDeleteRequest) -> Result<BranchDeleteResponse, Status> {
        self.record(format!("branch.delete {request:?}"))?;
        Ok(BranchDeleteResponse {})
    }
    async fn merge(&self, request: BranchMergeRequest) -> Result<BranchMergeResponse, Status> {
        self.record(format!("branch.merge {request:?}"))?;
        Ok(BranchMergeResponse {})
    }
    async fn diff(&self, request: BranchDiffRequest) -> Result<BranchDiffResponse, Status> {
        self.record(format!("branch.diff {request:?}"))?;
        Ok(BranchDiffResponse { diffs: vec![] })
    }
    async fn stash(&self, request: BranchStashRequest) -> Result<BranchStashResponse, Status> {
        self.record(format!("branch.stash {request:?}"))?;
        Ok(BranchStashResponse {})
    }
    async fn checkout(&self, request: BranchCheckoutRequest) -> Result<BranchCheckoutResponse, Status> {
        self.record(format!("branch.checkout {request:?}"))?;
        Ok(BranchCheckoutResponse {})
    }
    fn watch(&self, token: CancellationToken, _request: BranchWatchRequest) -> EventReceiver<BranchWatchResponse> {
        self.stream(token, vec![])
    }
    fn stream_files(&self, token: CancellationToken, _request: BranchFilesRequest) -> EventReceiver<BranchFileResponse> {
        self.stream(token, vec![])
    }
}

#[tonic::async_trait]
impl ResourceBackend for FakeBackend {
    async fn get(&self, request: ResourceGetRequest) -> Result<ResourceGetResponse, Status> {
        self.record(format!("resource.get {request:?}"))?;
        Ok(ResourceGetResponse { object: request.object })
    }
    async fn list(&self, request: ResourceListRequest) -> Result<ResourceListResponse, Status> {
        self.record(format!("resource.list {request:?}"))?;
        Ok(ResourceListResponse { object: request.object })
    }
    async fn create(&self, request: ResourceCreateRequest) -> Result<ResourceCreateResponse, Status> {
        self.record(format!("resource.create {request:?}"))?;
        Ok(ResourceCreateResponse { object: request.object })
    }
    async fn update(&self, request: ResourceUpdateRequest) -> Result<ResourceUpdateResponse, Status> {
        self.record(format!("resource.update {request:?}"))?;
        Ok(ResourceUpdateResponse { object: request.object })
    }
    async fn apply(&self, request: ResourceApplyRequest) -> Result<ResourceApplyResponse, Status> {
        self.record(format!("resource.apply {request:?}"))?;
        Ok(ResourceApplyResponse { object: request.object })
    }
    async fn delete(&self, request: ResourceDeleteRequest) -> Result<ResourceDeleteResponse, Status> {
        self.record(format!("resource.delete {request:?}"))?;
        Ok(ResourceDeleteResponse {})
    }
    fn watch(&self, token: CancellationToken, _request: ResourceWatchRequest) -> EventReceiver<ResourceWatchResponse> {
        let events = self.resource_events.lock().unwrap().clone();
        self.stream(token, events)
    }
}

#[tonic::async_trait]
impl DiscoveryBackend for FakeBackend {
    async fn get(&self, request: DiscoveryGetRequest) -> Result<DiscoveryGetResponse, Status> {
        self.record(format!("discovery.get {request:?}"))?;
        Ok(DiscoveryGetResponse { api_resources: vec![] })
    }
    fn watch(&self, token: CancellationToken, _request: DiscoveryWatchRequest) -> EventReceiver<DiscoveryWatchResponse> {
        self.stream(token, vec![])
    }
}

#[tonic::async_trait]
impl RunnerBackend for FakeBackend {
    async fn start(&self, request: RunnerStartRequest) -> Result<RunnerStartResponse, Status> {
        self.record(format!("runner.start {request:?}"))?;
        Ok(RunnerStartResponse {})
    }
    async fn stop(&self, request: RunnerStopRequest) -> Result<RunnerStopResponse, Status> {
        self.record(format!("runner.stop {request:?}"))?;
        Ok(RunnerStopResponse {})
    }
    async fn once(&self, request: RunnerOnceRequest) -> Result<RunnerOnceResponse, Status> {
        self.record(format!("runner.once {request:?}"))?;
        Ok(RunnerOnceResponse {
            success: true,
            results: vec![],
        })
    }
    async fn load(&self, request: RunnerLoadRequest) -> Result<RunnerLoadResponse, Status> {
        self.record(format!("runner.load {request:?}"))?;
        Ok(RunnerLoadResponse {})
    }
}

#[tonic::async_trait]
impl ChoreoBackend for FakeBackend {
    async fn get(&self, request: ChoreoGetRequest) -> Result<ChoreoGetResponse, Status> {
        self.record(format!("choreo.get {request:?}"))?;
        Ok(ChoreoGetResponse { object: b"choreo".to_vec() })
    }
    async fn apply(&self, request: ChoreoApplyRequest) -> Result<ChoreoApplyResponse, Status> {
        self.record(format!("choreo.apply {request:?}"))?;
        Ok(ChoreoApplyResponse {})
    }
    fn watch(&self, token: CancellationToken, _request: ChoreoWatchRequest) -> EventReceiver<ChoreoWatchResponse> {
        self.stream(token, vec![])
    }
}

#[tonic::async_trait]
impl SnapshotBackend for FakeBackend {
    async fn get(&self, request: SnapshotGetRequest) -> Result<SnapshotGetResponse, Status> {
        self.record(format!("snapshot.get {request:?}"))?;
        Ok(SnapshotGetResponse { object: vec![] })
    }
    async fn list(&self, request: SnapshotListRequest) -> Result<SnapshotListResponse, Status> {
        self.record(format!("snapshot.list {request:?}"))?;
        Ok(SnapshotListResponse { objects: vec![] })
    }
    async fn delete(&self, request: SnapshotDeleteRequest) -> Result<SnapshotDeleteResponse, Status> {
        self.record(format!("snapshot.delete {request:?}"))?;
        Ok(SnapshotDeleteResponse {})
    }
    fn watch(&self, token: CancellationToken, _request: SnapshotWatchRequest) -> EventReceiver<SnapshotWatchResponse> {
        self.stream(token, vec![])
    }
}

// ── Calling every routed method ────────────────────────────────────

fn outcome<T>(result: Result<T, Status>) -> Result<(), Status> {
    result.map(|_| ())
}

/// Call every method of every domain service once, addressed to
/// `namespace/name`. Returns `(method, outcome)` pairs.
pub async fn call_every_method(state: &ProxyState, namespace: &str, name: &str) -> Vec<(&'static str, Result<(), Status>)> {
    let opts = || Some(Options::for_proxy(namespace, name));
    let ctx = || Some(ChoreoContext::new(namespace, name));

    let branch = Proxy::<Branch>::new(state.clone());
    let resource = Proxy::<Resource>::new(state.clone());
    let discovery = Proxy::<Discovery>::new(state.clone());
    let runner = Proxy::<Runner>::new(state.clone());
    let choreo = Proxy::<Choreo>::new(state.clone());
    let snapshot = Proxy::<Snapshot>::new(state.clone());

    let mut out = Vec::new();

    out.push(("branch.get", outcome(BranchService::get(&branch, Request::new(BranchGetRequest { options: opts() })).await)));
    out.push(("branch.create", outcome(BranchService::create(&branch, Request::new(BranchCreateRequest { options: opts(), branch: "dev".into() })).await)));
    out.push(("branch.delete", outcome(BranchService::delete(&branch, Request::new(BranchDeleteRequest { options: opts(), branch: "dev".into() })).await)));
    out.push(("branch.merge", outcome(BranchService::merge(&branch, Request::new(BranchMergeRequest { options: opts(), src_branch: "dev".into(), dst_branch: "main".into() })).await)));
    out.push(("branch.diff", outcome(BranchService::diff(&branch, Request::new(BranchDiffRequest { options: opts(), src_branch: "dev".into(), dst_branch: "main".into() })).await)));
    out.push(("branch.stash", outcome(BranchService::stash(&branch, Request::new(BranchStashRequest { options: opts(), branch: "dev".into() })).await)));
    out.push(("branch.checkout", outcome(BranchService::checkout(&branch, Request::new(BranchCheckoutRequest { options: opts(), branch: "dev".into() })).await)));
    out.push(("branch.watch", outcome(BranchService::watch(&branch, Request::new(BranchWatchRequest { options: opts(), id: "w".into() })).await)));
    out.push(("branch.stream_files", outcome(BranchService::stream_files(&branch, Request::new(BranchFilesRequest { options: opts(), branch: "main".into() })).await)));

    out.push(("resource.get", outcome(ResourceService::get(&resource, Request::new(ResourceGetRequest { options: opts(), object: vec![1] })).await)));
    out.push(("resource.list", outcome(ResourceService::list(&resource, Request::new(ResourceListRequest { options: opts(), object: vec![2] })).await)));
    out.push(("resource.create", outcome(ResourceService::create(&resource, Request::new(ResourceCreateRequest { options: opts(), object: vec![3] })).await)));
    out.push(("resource.update", outcome(ResourceService::update(&resource, Request::new(ResourceUpdateRequest { options: opts(), object: vec![4] })).await)));
    out.push(("resource.apply", outcome(ResourceService::apply(&resource, Request::new(ResourceApplyRequest { options: opts(), object: vec![5] })).await)));
    out.push(("resource.delete", outcome(ResourceService::delete(&resource, Request::new(ResourceDeleteRequest { options: opts(), object: vec![6] })).await)));
    out.push(("resource.watch", outcome(ResourceService::watch(&resource, Request::new(ResourceWatchRequest { options: opts(), object: vec![], id: "w".into() })).await)));

    out.push(("discovery.get", outcome(DiscoveryService::get(&discovery, Request::new(DiscoveryGetRequest { options: opts() })).await)));
    out.push(("discovery.watch", outcome(DiscoveryService::watch(&discovery, Request::new(DiscoveryWatchRequest { options: opts() })).await)));

    out.push(("runner.start", outcome(RunnerService::start(&runner, Request::new(RunnerStartRequest { options: opts() })).await)));
    out.push(("runner.stop", outcome(RunnerService::stop(&runner, Request::new(RunnerStopRequest { options: opts() })).await)));
    out.push(("runner.once", outcome(RunnerService::once(&runner, Request::new(RunnerOnceRequest { options: opts() })).await)));
    out.push(("runner.load", outcome(RunnerService::load(&runner, Request::new(RunnerLoadRequest { options: opts() })).await)));

    out.push(("choreo.get", outcome(ChoreoService::get(&choreo, Request::new(ChoreoGetRequest { choreo_context: ctx() })).await)));
    out.push(("choreo.apply", outcome(ChoreoService::apply(&choreo, Request::new(ChoreoApplyRequest { choreo_context: ctx(), object: vec![7] })).await)));
    out.push(("choreo.watch", outcome(ChoreoService::watch(&choreo, Request::new(ChoreoWatchRequest { choreo_context: ctx() })).await)));

    out.push(("snapshot.get", outcome(SnapshotService::get(&snapshot, Request::new(SnapshotGetRequest { options: opts(), id: "s1".into() })).await)));
    out.push(("snapshot.list", outcome(SnapshotService::list(&snapshot, Request::new(SnapshotListRequest { options: opts() })).await)));
    out.push(("snapshot.delete", outcome(SnapshotService::delete(&snapshot, Request::new(SnapshotDeleteRequest { options: opts(), id: "s1".into() })).await)));
    out.push(("snapshot.watch", outcome(SnapshotService::watch(&snapshot, Request::new(SnapshotWatchRequest { options: opts() })).await)));

    out
}
