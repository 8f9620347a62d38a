//! choreo-backend — per-domain adapters for a tenant's backend.
//!
//! Each domain (branch, resource, discovery, runner, choreo, snapshot) has
//! a capability trait and a gRPC implementation of it. The proxy only sees
//! the traits, so tests can swap in fakes.
//!
//! # Behaviour
//!
//! - Unary calls are bounded by [`AdapterConfig::request_timeout`]; backend
//!   errors pass through unchanged.
//! - Watches never fail synchronously. They return a channel fed by a task
//!   that reconnects after [`AdapterConfig::watch_backoff`] on any failure
//!   and closes only when its `CancellationToken` fires (see [`watch`]).

pub mod branch;
pub mod choreo;
pub mod config;
pub mod discovery;
pub mod resource;
pub mod runner;
pub mod snapshot;
pub mod timeout;
pub mod watch;

pub use branch::{BranchBackend, BranchClient};
pub use choreo::{ChoreoBackend, ChoreoClient};
pub use config::AdapterConfig;
pub use discovery::{DiscoveryBackend, DiscoveryClient};
pub use resource::{ResourceBackend, ResourceClient};
pub use runner::{RunnerBackend, RunnerClient};
pub use snapshot::{SnapshotBackend, SnapshotClient};
pub use timeout::call_with_timeout;
pub use watch::{
    EventReceiver, WatchAction, WatchInput, WatchMachine, WatchSource, WatchState, pump_once,
    run_watch, spawn_stream, spawn_watch,
};
