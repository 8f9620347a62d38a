//! Discovery domain adapter.

use choreo_proto::discovery_service_client::DiscoveryServiceClient;
use choreo_proto::*;
use tokio_util::sync::CancellationToken;
use tonic::transport::Channel;
use tonic::{Status, Streaming};

use crate::config::AdapterConfig;
use crate::timeout::call_with_timeout;
use crate::watch::{EventReceiver, WatchSource, spawn_watch};

/// API discovery for a tenant's backend.
#[tonic::async_trait]
pub trait DiscoveryBackend: Send + Sync + 'static {
    async fn get(&self, request: DiscoveryGetRequest) -> Result<DiscoveryGetResponse, Status>;
    fn watch(&self, token: CancellationToken, request: DiscoveryWatchRequest) -> EventReceiver<DiscoveryWatchResponse>;
}

/// gRPC discovery adapter.
#[derive(Clone)]
pub struct DiscoveryClient {
    client: DiscoveryServiceClient<Channel>,
    config: AdapterConfig,
}

impl DiscoveryClient {
    pub fn new(channel: Channel, config: AdapterConfig) -> Self {
        Self {
            client: DiscoveryServiceClient::new(channel),
            config,
        }
    }
}

#[tonic::async_trait]
impl DiscoveryBackend for DiscoveryClient {
    async fn get(&self, request: DiscoveryGetRequest) -> Result<DiscoveryGetResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().get(request)).await
    }

    fn watch(&self, token: CancellationToken, request: DiscoveryWatchRequest) -> EventReceiver<DiscoveryWatchResponse> {
        let source = DiscoveryWatch {
            client: self.client.clone(),
            request,
        };
        spawn_watch(source, token, self.config.watch_backoff)
    }
}

struct DiscoveryWatch {
    client: DiscoveryServiceClient<Channel>,
    request: DiscoveryWatchRequest,
}

#[tonic::async_trait]
impl WatchSource for DiscoveryWatch {
    const KIND: &'static str = "discovery";
    type Item = DiscoveryWatchResponse;
    type Stream = Streaming<DiscoveryWatchResponse>;

    async fn open(&mut self) -> Result<Self::Stream, Status> {
        Ok(self.client.watch(self.request.clone()).await?.into_inner())
    }
}
