//! choreo-proxy — multi-tenant gRPC routing for choreo backends.
//!
//! One network endpoint serves many tenants ("choreos"). Each request names
//! its tenant; the proxy looks the tenant up, checks that it is ready, and
//! forwards the call to that tenant's backend adapter.
//!
//! # Architecture
//!
//! ```text
//! client ──▶ Proxy<D> (tonic service, one per domain)
//!              ├── TenantStore::resolve(tenant)   NotFound / Unavailable
//!              ├── unary:  adapter.method(req)     result passed through
//!              └── stream: adapter.watch(token, req) ──▶ relay task ──▶ client
//! ```
//!
//! Cancellation flows top-down only: server shutdown → relay token →
//! adapter watch task.

pub mod error;
pub mod relay;
pub mod route;
pub mod services;
pub mod tenant;

pub use error::RouteError;
pub use relay::{RelayConfig, RelayExit, RelaySession, RelayStream, RelayTarget, spawn_relay};
pub use route::{
    Branch, Choreo, Discovery, Domain, Proxy, ProxyState, Resource, Runner, Snapshot,
    TenantAddressed,
};
pub use services::build_router;
pub use tenant::{Adapters, TenantContext, TenantId, TenantStore};
