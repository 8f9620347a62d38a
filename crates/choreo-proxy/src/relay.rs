//! Stream relay — pumps adapter events into an outbound gRPC stream.
//!
//! One relay task runs per in-flight streaming RPC. The outbound side is an
//! mpsc channel whose receiver tonic owns as the response body; when the
//! client goes away tonic drops it and the relay notices via
//! `Sender::closed`. The relay then cancels its token, which stops the
//! adapter's watch task.
//!
//! ```text
//! adapter task ──events──▶ relay task ──tx──▶ ReceiverStream ──▶ client
//!      ▲                       │
//!      └──── token.cancel() ◀──┘ (on any exit)
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use choreo_backend::EventReceiver;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendTimeoutError;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tonic::Status;
use tracing::{debug, warn};

use crate::tenant::TenantId;

/// Outbound half of a relayed RPC, handed to tonic as the response body.
pub type RelayStream<M> = ReceiverStream<Result<M, Status>>;

/// Relay tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    /// How long one event may wait for a slow consumer before the relay is
    /// dropped.
    pub send_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            send_timeout: Duration::from_secs(5),
        }
    }
}

/// Identifies a relay in logs.
#[derive(Debug, Clone)]
pub struct RelayTarget {
    pub domain: &'static str,
    pub tenant: TenantId,
    pub peer: Option<SocketAddr>,
}

impl RelayTarget {
    fn peer_label(&self) -> String {
        self.peer
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Why a relay stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayExit {
    /// The relay token (or the server's shutdown token) was cancelled.
    Cancelled,
    /// The adapter closed its channel.
    BackendClosed,
    /// The client disconnected.
    ConsumerGone,
    /// The client did not take an event within `send_timeout`.
    ConsumerStalled,
}

/// A running relay.
pub struct RelaySession<M> {
    pub stream: RelayStream<M>,
    pub task: JoinHandle<RelayExit>,
}

/// Start relaying `events` to a new outbound stream.
///
/// `token` is the relay's own cancellation scope; it is cancelled when the
/// relay exits for any reason.
pub fn spawn_relay<M>(
    config: RelayConfig,
    token: CancellationToken,
    events: EventReceiver<M>,
    target: RelayTarget,
) -> RelaySession<M>
where
    M: Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    debug!(domain = target.domain, tenant = %target.tenant, peer = %target.peer_label(), "relay started");
    let task = tokio::spawn(pump(config, token, events, tx, target));
    RelaySession {
        stream: ReceiverStream::new(rx),
        task,
    }
}

async fn pump<M>(
    config: RelayConfig,
    token: CancellationToken,
    mut events: EventReceiver<M>,
    tx: mpsc::Sender<Result<M, Status>>,
    target: RelayTarget,
) -> RelayExit {
    let exit = loop {
        let item = tokio::select! {
            biased;
            _ = token.cancelled() => break RelayExit::Cancelled,
            _ = tx.closed() => break RelayExit::ConsumerGone,
            item = events.recv() => item,
        };
        let Some(item) = item else {
            break RelayExit::BackendClosed;
        };

        let sent = tokio::select! {
            biased;
            _ = token.cancelled() => break RelayExit::Cancelled,
            sent = tx.send_timeout(item, config.send_timeout) => sent,
        };
        match sent {
            Ok(()) => {}
            Err(SendTimeoutError::Timeout(_)) => {
                warn!(
                    domain = target.domain,
                    tenant = %target.tenant,
                    peer = %target.peer_label(),
                    timeout = ?config.send_timeout,
                    "consumer too slow, dropping stream"
                );
                break RelayExit::ConsumerStalled;
            }
            Err(SendTimeoutError::Closed(_)) => {
                warn!(
                    domain = target.domain,
                    tenant = %target.tenant,
                    peer = %target.peer_label(),
                    "failed to send event, consumer gone"
                );
                break RelayExit::ConsumerGone;
            }
        }
    };

    token.cancel();
    debug!(domain = target.domain, tenant = %target.tenant, ?exit, "relay finished");
    exit
}
