//! choreo-proto — the `choreo.v1` wire contract.
//!
//! Message types live in [`messages`] and are re-exported at the crate
//! root. The tonic stubs are generated by `build.rs`, one client module and
//! one server module per service:
//!
//! ```text
//! BranchService     → branch_service_client / branch_service_server
//! ResourceService   → resource_service_client / resource_service_server
//! DiscoveryService  → discovery_service_client / discovery_service_server
//! RunnerService     → runner_service_client / runner_service_server
//! ChoreoService     → choreo_service_client / choreo_service_server
//! SnapshotService   → snapshot_service_client / snapshot_service_server
//! ```

pub mod messages;

pub use messages::*;

mod services {
    include!(concat!(env!("OUT_DIR"), "/choreo.v1.BranchService.rs"));
    include!(concat!(env!("OUT_DIR"), "/choreo.v1.ResourceService.rs"));
    include!(concat!(env!("OUT_DIR"), "/choreo.v1.DiscoveryService.rs"));
    include!(concat!(env!("OUT_DIR"), "/choreo.v1.RunnerService.rs"));
    include!(concat!(env!("OUT_DIR"), "/choreo.v1.ChoreoService.rs"));
    include!(concat!(env!("OUT_DIR"), "/choreo.v1.SnapshotService.rs"));
}

pub use services::*;

/// A message delivered on a watch stream.
pub trait WatchEvent {
    /// The change kind. Unknown wire values decode as `Unspecified`.
    fn kind(&self) -> WatchEventType;
}

macro_rules! impl_watch_event {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl WatchEvent for $ty {
                fn kind(&self) -> WatchEventType {
                    WatchEventType::try_from(self.event_type).unwrap_or(WatchEventType::Unspecified)
                }
            }
        )+
    };
}

impl_watch_event!(
    BranchWatchResponse,
    ResourceWatchResponse,
    DiscoveryWatchResponse,
    ChoreoWatchResponse,
    SnapshotWatchResponse,
);

impl Options {
    /// Options addressing the tenant `namespace/name`.
    pub fn for_proxy(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            proxy_namespace: namespace.into(),
            proxy_name: name.into(),
            ..Default::default()
        }
    }
}

impl ChoreoContext {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}
