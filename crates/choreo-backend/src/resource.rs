//! Resource domain adapter.

use choreo_proto::resource_service_client::ResourceServiceClient;
use choreo_proto::*;
use tokio_util::sync::CancellationToken;
use tonic::transport::Channel;
use tonic::{Status, Streaming};

use crate::config::AdapterConfig;
use crate::timeout::call_with_timeout;
use crate::watch::{EventReceiver, WatchSource, spawn_watch};

/// Operations a tenant's resource backend offers.
#[tonic::async_trait]
pub trait ResourceBackend: Send + Sync + 'static {
    async fn get(&self, request: ResourceGetRequest) -> Result<ResourceGetResponse, Status>;
    async fn list(&self, request: ResourceListRequest) -> Result<ResourceListResponse, Status>;
    async fn create(&self, request: ResourceCreateRequest) -> Result<ResourceCreateResponse, Status>;
    async fn update(&self, request: ResourceUpdateRequest) -> Result<ResourceUpdateResponse, Status>;
    async fn apply(&self, request: ResourceApplyRequest) -> Result<ResourceApplyResponse, Status>;
    async fn delete(&self, request: ResourceDeleteRequest) -> Result<ResourceDeleteResponse, Status>;
    fn watch(&self, token: CancellationToken, request: ResourceWatchRequest) -> EventReceiver<ResourceWatchResponse>;
}

/// gRPC resource adapter.
#[derive(Clone)]
pub struct ResourceClient {
    client: ResourceServiceClient<Channel>,
    config: AdapterConfig,
}

impl ResourceClient {
    pub fn new(channel: Channel, config: AdapterConfig) -> Self {
        Self {
            client: ResourceServiceClient::new(channel),
            config,
        }
    }
}

#[tonic::async_trait]
impl ResourceBackend for ResourceClient {
    async fn get(&self, request: ResourceGetRequest) -> Result<ResourceGetResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().get(request)).await
    }

    async fn list(&self, request: ResourceListRequest) -> Result<ResourceListResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().list(request)).await
    }

    async fn create(&self, request: ResourceCreateRequest) -> Result<ResourceCreateResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().create(request)).await
    }

    async fn update(&self, request: ResourceUpdateRequest) -> Result<ResourceUpdateResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().update(request)).await
    }

    async fn apply(&self, request: ResourceApplyRequest) -> Result<ResourceApplyResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().apply(request)).await
    }

    async fn delete(&self, request: ResourceDeleteRequest) -> Result<ResourceDeleteResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().delete(request)).await
    }

    fn watch(&self, token: CancellationToken, request: ResourceWatchRequest) -> EventReceiver<ResourceWatchResponse> {
        let source = ResourceWatch {
            client: self.client.clone(),
            request,
        };
        spawn_watch(source, token, self.config.watch_backoff)
    }
}

struct ResourceWatch {
    client: ResourceServiceClient<Channel>,
    request: ResourceWatchRequest,
}

#[tonic::async_trait]
impl WatchSource for ResourceWatch {
    const KIND: &'static str = "resource";
    type Item = ResourceWatchResponse;
    type Stream = Streaming<ResourceWatchResponse>;

    async fn open(&mut self) -> Result<Self::Stream, Status> {
        Ok(self.client.watch(self.request.clone()).await?.into_inner())
    }
}
