//! Message types for the `choreo.v1` package.
//!
//! Resource documents travel as opaque `bytes`; neither the proxy nor the
//! adapters look inside them.

// ── Common ─────────────────────────────────────────────────────────

/// Routing and selection options embedded in most requests.
///
/// `proxy_namespace`/`proxy_name` address the tenant the proxy forwards to.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Options {
    #[prost(string, tag = "1")]
    pub proxy_namespace: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub proxy_name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub branch: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub r#ref: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub show_managed_field: bool,
}

/// Names a choreo instance directly (used by the choreo service).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChoreoContext {
    #[prost(string, tag = "1")]
    pub namespace: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
}

/// Kind of change carried by a watch response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum WatchEventType {
    Unspecified = 0,
    Added = 1,
    Modified = 2,
    Deleted = 3,
    Error = 4,
}

// ── Branch ─────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchObject {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub checked_out: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchGetRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchGetResponse {
    #[prost(message, repeated, tag = "1")]
    pub branch_objects: ::prost::alloc::vec::Vec<BranchObject>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchCreateRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(string, tag = "2")]
    pub branch: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchCreateResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchDeleteRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(string, tag = "2")]
    pub branch: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchDeleteResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchMergeRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(string, tag = "2")]
    pub src_branch: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub dst_branch: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchMergeResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchDiffRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(string, tag = "2")]
    pub src_branch: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub dst_branch: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDiff {
    #[prost(string, tag = "1")]
    pub path: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub action: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchDiffResponse {
    #[prost(message, repeated, tag = "1")]
    pub diffs: ::prost::alloc::vec::Vec<FileDiff>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchStashRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(string, tag = "2")]
    pub branch: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchStashResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchCheckoutRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(string, tag = "2")]
    pub branch: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchCheckoutResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchWatchRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(string, tag = "2")]
    pub id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchWatchResponse {
    #[prost(message, optional, tag = "1")]
    pub branch_obj: ::core::option::Option<BranchObject>,
    #[prost(enumeration = "WatchEventType", tag = "2")]
    pub event_type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchFilesRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(string, tag = "2")]
    pub branch: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchFileResponse {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}

// ── Resource ───────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceGetRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(bytes = "vec", tag = "2")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceGetResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceListRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(bytes = "vec", tag = "2")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceListResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceCreateRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(bytes = "vec", tag = "2")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceCreateResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceUpdateRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(bytes = "vec", tag = "2")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceUpdateResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceApplyRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(bytes = "vec", tag = "2")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceApplyResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceDeleteRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(bytes = "vec", tag = "2")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceDeleteResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceWatchRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(bytes = "vec", tag = "2")]
    pub object: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "3")]
    pub id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceWatchResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub object: ::prost::alloc::vec::Vec<u8>,
    #[prost(enumeration = "WatchEventType", tag = "2")]
    pub event_type: i32,
}

// ── Discovery ──────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ApiResource {
    #[prost(string, tag = "1")]
    pub group: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub version: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub kind: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub resource: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub namespaced: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DiscoveryGetRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DiscoveryGetResponse {
    #[prost(message, repeated, tag = "1")]
    pub api_resources: ::prost::alloc::vec::Vec<ApiResource>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DiscoveryWatchRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DiscoveryWatchResponse {
    #[prost(message, repeated, tag = "1")]
    pub api_resources: ::prost::alloc::vec::Vec<ApiResource>,
    #[prost(enumeration = "WatchEventType", tag = "2")]
    pub event_type: i32,
}

// ── Runner ─────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunnerStartRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunnerStartResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunnerStopRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunnerStopResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunnerOnceRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunnerOnceResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    /// Serialized per-reconciler execution results.
    #[prost(bytes = "vec", tag = "2")]
    pub results: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunnerLoadRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunnerLoadResponse {}

// ── Choreo ─────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChoreoGetRequest {
    #[prost(message, optional, tag = "1")]
    pub choreo_context: ::core::option::Option<ChoreoContext>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChoreoGetResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChoreoApplyRequest {
    #[prost(message, optional, tag = "1")]
    pub choreo_context: ::core::option::Option<ChoreoContext>,
    #[prost(bytes = "vec", tag = "2")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChoreoApplyResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChoreoWatchRequest {
    #[prost(message, optional, tag = "1")]
    pub choreo_context: ::core::option::Option<ChoreoContext>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChoreoWatchResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub object: ::prost::alloc::vec::Vec<u8>,
    #[prost(enumeration = "WatchEventType", tag = "2")]
    pub event_type: i32,
}

// ── Snapshot ───────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotGetRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(string, tag = "2")]
    pub id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotGetResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub object: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotListRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotListResponse {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub objects: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotDeleteRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
    #[prost(string, tag = "2")]
    pub id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotDeleteResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotWatchRequest {
    #[prost(message, optional, tag = "1")]
    pub options: ::core::option::Option<Options>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotWatchResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub object: ::prost::alloc::vec::Vec<u8>,
    #[prost(enumeration = "WatchEventType", tag = "2")]
    pub event_type: i32,
}
