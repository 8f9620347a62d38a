//! Runner domain adapter. Unary only.

use choreo_proto::runner_service_client::RunnerServiceClient;
use choreo_proto::*;
use tonic::Status;
use tonic::transport::Channel;

use crate::config::AdapterConfig;
use crate::timeout::call_with_timeout;

/// Reconciler runner controls for a tenant.
#[tonic::async_trait]
pub trait RunnerBackend: Send + Sync + 'static {
    async fn start(&self, request: RunnerStartRequest) -> Result<RunnerStartResponse, Status>;
    async fn stop(&self, request: RunnerStopRequest) -> Result<RunnerStopResponse, Status>;
    async fn once(&self, request: RunnerOnceRequest) -> Result<RunnerOnceResponse, Status>;
    async fn load(&self, request: RunnerLoadRequest) -> Result<RunnerLoadResponse, Status>;
}

/// gRPC runner adapter.
#[derive(Clone)]
pub struct RunnerClient {
    client: RunnerServiceClient<Channel>,
    config: AdapterConfig,
}

impl RunnerClient {
    pub fn new(channel: Channel, config: AdapterConfig) -> Self {
        Self {
            client: RunnerServiceClient::new(channel),
            config,
        }
    }
}

#[tonic::async_trait]
impl RunnerBackend for RunnerClient {
    async fn start(&self, request: RunnerStartRequest) -> Result<RunnerStartResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().start(request)).await
    }

    async fn stop(&self, request: RunnerStopRequest) -> Result<RunnerStopResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().stop(request)).await
    }

    async fn once(&self, request: RunnerOnceRequest) -> Result<RunnerOnceResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().once(request)).await
    }

    async fn load(&self, request: RunnerLoadRequest) -> Result<RunnerLoadResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().load(request)).await
    }
}
