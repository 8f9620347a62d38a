//! Snapshot domain adapter.

use choreo_proto::snapshot_service_client::SnapshotServiceClient;
use choreo_proto::*;
use tokio_util::sync::CancellationToken;
use tonic::transport::Channel;
use tonic::{Status, Streaming};

use crate::config::AdapterConfig;
use crate::timeout::call_with_timeout;
use crate::watch::{EventReceiver, WatchSource, spawn_watch};

#[tonic::async_trait]
pub trait SnapshotBackend: Send + Sync + 'static {
    async fn get(&self, request: SnapshotGetRequest) -> Result<SnapshotGetResponse, Status>;
    async fn list(&self, request: SnapshotListRequest) -> Result<SnapshotListResponse, Status>;
    async fn delete(&self, request: SnapshotDeleteRequest) -> Result<SnapshotDeleteResponse, Status>;
    fn watch(&self, token: CancellationToken, request: SnapshotWatchRequest) -> EventReceiver<SnapshotWatchResponse>;
}

/// gRPC snapshot adapter.
#[derive(Clone)]
pub struct SnapshotClient {
    client: SnapshotServiceClient<Channel>,
    config: AdapterConfig,
}

impl SnapshotClient {
    pub fn new(channel: Channel, config: AdapterConfig) -> Self {
        Self {
            client: SnapshotServiceClient::new(channel),
            config,
        }
    }
}

#[tonic::async_trait]
impl SnapshotBackend for SnapshotClient {
    async fn get(&self, request: SnapshotGetRequest) -> Result<SnapshotGetResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().get(request)).await
    }

    async fn list(&self, request: SnapshotListRequest) -> Result<SnapshotListResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().list(request)).await
    }

    async fn delete(&self, request: SnapshotDeleteRequest) -> Result<SnapshotDeleteResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().delete(request)).await
    }

    fn watch(&self, token: CancellationToken, request: SnapshotWatchRequest) -> EventReceiver<SnapshotWatchResponse> {
        let source = SnapshotWatch {
            client: self.client.clone(),
            request,
        };
        spawn_watch(source, token, self.config.watch_backoff)
    }
}

struct SnapshotWatch {
    client: SnapshotServiceClient<Channel>,
    request: SnapshotWatchRequest,
}

#[tonic::async_trait]
impl WatchSource for SnapshotWatch {
    const KIND: &'static str = "snapshot";
    type Item = SnapshotWatchResponse;
    type Stream = Streaming<SnapshotWatchResponse>;

    async fn open(&mut self) -> Result<Self::Stream, Status> {
        Ok(self.client.watch(self.request.clone()).await?.into_inner())
    }
}
