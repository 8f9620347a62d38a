//! Choreo domain adapter (the tenant's own choreo object).

use choreo_proto::choreo_service_client::ChoreoServiceClient;
use choreo_proto::*;
use tokio_util::sync::CancellationToken;
use tonic::transport::Channel;
use tonic::{Status, Streaming};

use crate::config::AdapterConfig;
use crate::timeout::call_with_timeout;
use crate::watch::{EventReceiver, WatchSource, spawn_watch};

#[tonic::async_trait]
pub trait ChoreoBackend: Send + Sync + 'static {
    async fn get(&self, request: ChoreoGetRequest) -> Result<ChoreoGetResponse, Status>;
    async fn apply(&self, request: ChoreoApplyRequest) -> Result<ChoreoApplyResponse, Status>;
    fn watch(&self, token: CancellationToken, request: ChoreoWatchRequest) -> EventReceiver<ChoreoWatchResponse>;
}

/// gRPC choreo adapter.
#[derive(Clone)]
pub struct ChoreoClient {
    client: ChoreoServiceClient<Channel>,
    config: AdapterConfig,
}

impl ChoreoClient {
    pub fn new(channel: Channel, config: AdapterConfig) -> Self {
        Self {
            client: ChoreoServiceClient::new(channel),
            config,
        }
    }
}

#[tonic::async_trait]
impl ChoreoBackend for ChoreoClient {
    async fn get(&self, request: ChoreoGetRequest) -> Result<ChoreoGetResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().get(request)).await
    }

    async fn apply(&self, request: ChoreoApplyRequest) -> Result<ChoreoApplyResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().apply(request)).await
    }

    fn watch(&self, token: CancellationToken, request: ChoreoWatchRequest) -> EventReceiver<ChoreoWatchResponse> {
        let source = ChoreoWatch {
            client: self.client.clone(),
            request,
        };
        spawn_watch(source, token, self.config.watch_backoff)
    }
}

struct ChoreoWatch {
    client: ChoreoServiceClient<Channel>,
    request: ChoreoWatchRequest,
}

#[tonic::async_trait]
impl WatchSource for ChoreoWatch {
    const KIND: &'static str = "choreo";
    type Item = ChoreoWatchResponse;
    type Stream = Streaming<ChoreoWatchResponse>;

    async fn open(&mut self) -> Result<Self::Stream, Status> {
        Ok(self.client.watch(self.request.clone()).await?.into_inner())
    }
}
