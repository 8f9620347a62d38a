//! Reconnecting watch streams.
//!
//! A backend may reset or restart long-lived streams at any time. The
//! watch task hides that from its consumer: the event channel it feeds only
//! closes when the watch is cancelled, never because the backend went away.
//!
//! The reconnect policy lives in [`WatchMachine`], a pure transition table
//! with no I/O. [`run_watch`] drives it against a [`WatchSource`].
//!
//! ```text
//!                 Connect                Connected
//!  Disconnected ─────────▶ Connecting ─────────────▶ Streaming ──┐
//!       ▲                      │                      │   ▲      │ Event(non-error)
//!       │    ConnectFailed     │   Event(Error)       │   └──────┘ (forward)
//!       ├──────────────────────┘   ReceiveFailed      │
//!       └────────── Backoff ◀──────StreamEnded ───────┘
//!
//!  any state ── Cancelled ──▶ Closed
//! ```

use std::time::Duration;

use choreo_proto::{WatchEvent, WatchEventType};
use tokio::sync::mpsc;
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tonic::Status;
use tracing::{debug, warn};

/// Receiving half of an adapter stream.
///
/// Watch channels only ever carry `Ok` items. Finite streams (see
/// [`pump_once`]) may end with a single `Err`.
pub type EventReceiver<T> = mpsc::Receiver<Result<T, Status>>;

/// Lifecycle of one watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Disconnected,
    Connecting,
    Streaming,
    Closed,
}

/// Something that happened to the watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchInput {
    /// Time to (re)open the backend stream.
    Connect,
    Connected,
    ConnectFailed,
    /// A message arrived on the open stream.
    Event(WatchEventType),
    /// The last forwarded event reached the consumer.
    Delivered,
    ReceiveFailed,
    /// The backend closed the stream without an error.
    StreamEnded,
    Cancelled,
}

/// What the driver has to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchAction {
    Open,
    Receive,
    Forward,
    /// Drop any stream handle and wait for the backoff interval.
    Backoff,
    Close,
    /// The input does not apply in the current state.
    Ignore,
}

/// Explicit watch state machine.
#[derive(Debug)]
pub struct WatchMachine {
    state: WatchState,
    retries: u64,
}

impl WatchMachine {
    pub fn new() -> Self {
        Self {
            state: WatchState::Disconnected,
            retries: 0,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Number of times the machine has backed off so far.
    pub fn retries(&self) -> u64 {
        self.retries
    }

    /// Apply one input and return the action the driver must perform.
    pub fn step(&mut self, input: WatchInput) -> WatchAction {
        use WatchAction as A;
        use WatchInput as I;
        use WatchState as S;

        if self.state == S::Closed {
            return A::Ignore;
        }
        if input == I::Cancelled {
            self.state = S::Closed;
            return A::Close;
        }

        let (next, action) = match (self.state, input) {
            (S::Disconnected, I::Connect) => (S::Connecting, A::Open),
            (S::Connecting, I::Connected) => (S::Streaming, A::Receive),
            (S::Connecting, I::ConnectFailed) => (S::Disconnected, A::Backoff),
            (S::Streaming, I::Event(WatchEventType::Error)) => (S::Disconnected, A::Backoff),
            (S::Streaming, I::Event(_)) => (S::Streaming, A::Forward),
            (S::Streaming, I::Delivered) => (S::Streaming, A::Receive),
            (S::Streaming, I::ReceiveFailed | I::StreamEnded) => (S::Disconnected, A::Backoff),
            (state, _) => (state, A::Ignore),
        };

        if action == A::Backoff {
            self.retries += 1;
        }
        self.state = next;
        action
    }
}

impl Default for WatchMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens backend streams on demand.
///
/// Implemented once per domain over the generated tonic client, and by
/// scripted fakes in tests.
#[tonic::async_trait]
pub trait WatchSource: Send + 'static {
    /// Short label used in logs, e.g. `"branch"`.
    const KIND: &'static str;

    type Item: Send + 'static;
    type Stream: Stream<Item = Result<Self::Item, Status>> + Send + Unpin + 'static;

    /// Open a fresh backend stream.
    async fn open(&mut self) -> Result<Self::Stream, Status>;
}

/// Spawn a reconnecting watch task and return its event channel.
pub fn spawn_watch<S>(source: S, token: CancellationToken, backoff: Duration) -> EventReceiver<S::Item>
where
    S: WatchSource,
    S::Item: WatchEvent,
{
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(run_watch(source, token, tx, backoff));
    rx
}

/// Spawn a one-shot stream task (no reconnect) and return its channel.
pub fn spawn_stream<S>(source: S, token: CancellationToken) -> EventReceiver<S::Item>
where
    S: WatchSource,
{
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(pump_once(source, token, tx));
    rx
}

/// Drive a [`WatchMachine`] against `source` until `token` is cancelled
/// or the consumer drops its receiver.
///
/// Backend `ERROR` events are swallowed and trigger a reconnect. Connect
/// and receive failures are retried forever with a fixed `backoff`.
pub async fn run_watch<S>(
    mut source: S,
    token: CancellationToken,
    tx: mpsc::Sender<Result<S::Item, Status>>,
    backoff: Duration,
) where
    S: WatchSource,
    S::Item: WatchEvent,
{
    let kind = S::KIND;
    let mut machine = WatchMachine::new();
    let mut stream: Option<S::Stream> = None;
    let mut pending: Option<S::Item> = None;
    let mut action = machine.step(WatchInput::Connect);

    loop {
        let input = match action {
            WatchAction::Open => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => WatchInput::Cancelled,
                    _ = tx.closed() => WatchInput::Cancelled,
                    opened = source.open() => match opened {
                        Ok(s) => {
                            debug!(kind, retries = machine.retries(), "watch stream opened");
                            stream = Some(s);
                            WatchInput::Connected
                        }
                        Err(status) => {
                            warn!(kind, code = ?status.code(), error = %status.message(), "watch connect failed");
                            WatchInput::ConnectFailed
                        }
                    },
                }
            }
            WatchAction::Receive => {
                let Some(open) = stream.as_mut() else {
                    // Receive is only issued after Connected stored a stream.
                    action = machine.step(WatchInput::StreamEnded);
                    continue;
                };
                tokio::select! {
                    biased;
                    _ = token.cancelled() => WatchInput::Cancelled,
                    _ = tx.closed() => WatchInput::Cancelled,
                    item = open.next() => match item {
                        Some(Ok(event)) => {
                            let event_kind = event.kind();
                            if event_kind == WatchEventType::Error {
                                warn!(kind, "backend reported watch error, reconnecting");
                            } else {
                                pending = Some(event);
                            }
                            WatchInput::Event(event_kind)
                        }
                        Some(Err(status)) => {
                            warn!(kind, code = ?status.code(), error = %status.message(), "watch receive failed");
                            WatchInput::ReceiveFailed
                        }
                        None => {
                            debug!(kind, "backend ended watch stream");
                            WatchInput::StreamEnded
                        }
                    },
                }
            }
            WatchAction::Forward => match pending.take() {
                Some(event) => {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => WatchInput::Cancelled,
                        sent = tx.send(Ok(event)) => match sent {
                            Ok(()) => WatchInput::Delivered,
                            Err(_) => WatchInput::Cancelled,
                        },
                    }
                }
                None => WatchInput::Delivered,
            },
            WatchAction::Backoff => {
                stream = None;
                pending = None;
                tokio::select! {
                    biased;
                    _ = token.cancelled() => WatchInput::Cancelled,
                    _ = tx.closed() => WatchInput::Cancelled,
                    _ = tokio::time::sleep(backoff) => WatchInput::Connect,
                }
            }
            WatchAction::Close | WatchAction::Ignore => break,
        };

        action = machine.step(input);
    }

    debug!(kind, retries = machine.retries(), "watch closed");
}

/// Forward one backend stream to `tx` without reconnecting.
///
/// Used for finite streams. A connect failure or a stream error is
/// forwarded as the last item; the channel then closes.
pub async fn pump_once<S>(
    mut source: S,
    token: CancellationToken,
    tx: mpsc::Sender<Result<S::Item, Status>>,
) where
    S: WatchSource,
{
    let kind = S::KIND;

    let mut stream = tokio::select! {
        biased;
        _ = token.cancelled() => return,
        opened = source.open() => match opened {
            Ok(s) => s,
            Err(status) => {
                warn!(kind, code = ?status.code(), "stream open failed");
                let _ = tx.send(Err(status)).await;
                return;
            }
        },
    };

    loop {
        let item = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            item = stream.next() => item,
        };
        let Some(item) = item else {
            break;
        };
        let last = item.is_err();
        let sent = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            sent = tx.send(item) => sent,
        };
        if sent.is_err() || last {
            break;
        }
    }

    debug!(kind, "stream finished");
}
