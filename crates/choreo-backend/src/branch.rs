//! Branch domain adapter.

use choreo_proto::branch_service_client::BranchServiceClient;
use choreo_proto::*;
use tokio_util::sync::CancellationToken;
use tonic::transport::Channel;
use tonic::{Status, Streaming};

use crate::config::AdapterConfig;
use crate::timeout::call_with_timeout;
use crate::watch::{EventReceiver, WatchSource, spawn_stream, spawn_watch};

/// Operations a tenant's branch backend offers.
#[tonic::async_trait]
pub trait BranchBackend: Send + Sync + 'static {
    async fn get(&self, request: BranchGetRequest) -> Result<BranchGetResponse, Status>;
    async fn create(&self, request: BranchCreateRequest) -> Result<BranchCreateResponse, Status>;
    async fn delete(&self, request: BranchDeleteRequest) -> Result<BranchDeleteResponse, Status>;
    async fn merge(&self, request: BranchMergeRequest) -> Result<BranchMergeResponse, Status>;
    async fn diff(&self, request: BranchDiffRequest) -> Result<BranchDiffResponse, Status>;
    async fn stash(&self, request: BranchStashRequest) -> Result<BranchStashResponse, Status>;
    async fn checkout(&self, request: BranchCheckoutRequest) -> Result<BranchCheckoutResponse, Status>;

    /// Reconnecting branch watch. Never fails; the channel closes once
    /// `token` is cancelled.
    fn watch(&self, token: CancellationToken, request: BranchWatchRequest) -> EventReceiver<BranchWatchResponse>;

    /// Stream the files of one branch. The channel closes after the last
    /// file or after a single error.
    fn stream_files(&self, token: CancellationToken, request: BranchFilesRequest) -> EventReceiver<BranchFileResponse>;
}

/// gRPC branch adapter.
#[derive(Clone)]
pub struct BranchClient {
    client: BranchServiceClient<Channel>,
    config: AdapterConfig,
}

impl BranchClient {
    pub fn new(channel: Channel, config: AdapterConfig) -> Self {
        Self {
            client: BranchServiceClient::new(channel),
            config,
        }
    }
}

#[tonic::async_trait]
impl BranchBackend for BranchClient {
    async fn get(&self, request: BranchGetRequest) -> Result<BranchGetResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().get(request)).await
    }

    async fn create(&self, request: BranchCreateRequest) -> Result<BranchCreateResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().create(request)).await
    }

    async fn delete(&self, request: BranchDeleteRequest) -> Result<BranchDeleteResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().delete(request)).await
    }

    async fn merge(&self, request: BranchMergeRequest) -> Result<BranchMergeResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().merge(request)).await
    }

    async fn diff(&self, request: BranchDiffRequest) -> Result<BranchDiffResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().diff(request)).await
    }

    async fn stash(&self, request: BranchStashRequest) -> Result<BranchStashResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().stash(request)).await
    }

    async fn checkout(&self, request: BranchCheckoutRequest) -> Result<BranchCheckoutResponse, Status> {
        call_with_timeout(self.config.request_timeout, self.client.clone().checkout(request)).await
    }

    fn watch(&self, token: CancellationToken, request: BranchWatchRequest) -> EventReceiver<BranchWatchResponse> {
        let source = BranchWatch {
            client: self.client.clone(),
            request,
        };
        spawn_watch(source, token, self.config.watch_backoff)
    }

    fn stream_files(&self, token: CancellationToken, request: BranchFilesRequest) -> EventReceiver<BranchFileResponse> {
        let source = BranchFiles {
            client: self.client.clone(),
            request,
        };
        spawn_stream(source, token)
    }
}

struct BranchWatch {
    client: BranchServiceClient<Channel>,
    request: BranchWatchRequest,
}

#[tonic::async_trait]
impl WatchSource for BranchWatch {
    const KIND: &'static str = "branch";
    type Item = BranchWatchResponse;
    type Stream = Streaming<BranchWatchResponse>;

    async fn open(&mut self) -> Result<Self::Stream, Status> {
        Ok(self.client.watch(self.request.clone()).await?.into_inner())
    }
}

struct BranchFiles {
    client: BranchServiceClient<Channel>,
    request: BranchFilesRequest,
}

#[tonic::async_trait]
impl WatchSource for BranchFiles {
    const KIND: &'static str = "branch-files";
    type Item = BranchFileResponse;
    type Stream = Streaming<BranchFileResponse>;

    async fn open(&mut self) -> Result<Self::Stream, Status> {
        Ok(self.client.stream_files(self.request.clone()).await?.into_inner())
    }
}
