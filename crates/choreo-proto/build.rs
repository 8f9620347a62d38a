//! Generates the tonic client/server stubs for the `choreo.v1` services.
//!
//! Message types are hand-written prost structs (see `src/messages.rs`), so
//! the services are described with tonic-build's manual builder and no
//! `protoc` is required at build time.

use tonic_build::manual::{Builder, Method, Service};

const PACKAGE: &str = "choreo.v1";
const CODEC: &str = "tonic::codec::ProstCodec";

fn unary(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::{input}"))
        .output_type(format!("crate::{output}"))
        .codec_path(CODEC)
        .build()
}

fn server_streaming(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::{input}"))
        .output_type(format!("crate::{output}"))
        .codec_path(CODEC)
        .server_streaming()
        .build()
}

fn service(name: &str, methods: Vec<Method>) -> Service {
    methods
        .into_iter()
        .fold(Service::builder().name(name).package(PACKAGE), |builder, method| {
            builder.method(method)
        })
        .build()
}

fn main() {
    let branch = service(
        "BranchService",
        vec![
            unary("get", "Get", "BranchGetRequest", "BranchGetResponse"),
            unary("create", "Create", "BranchCreateRequest", "BranchCreateResponse"),
            unary("delete", "Delete", "BranchDeleteRequest", "BranchDeleteResponse"),
            unary("merge", "Merge", "BranchMergeRequest", "BranchMergeResponse"),
            unary("diff", "Diff", "BranchDiffRequest", "BranchDiffResponse"),
            unary("stash", "Stash", "BranchStashRequest", "BranchStashResponse"),
            unary("checkout", "Checkout", "BranchCheckoutRequest", "BranchCheckoutResponse"),
            server_streaming("watch", "Watch", "BranchWatchRequest", "BranchWatchResponse"),
            server_streaming("stream_files", "StreamFiles", "BranchFilesRequest", "BranchFileResponse"),
        ],
    );

    let resource = service(
        "ResourceService",
        vec![
            unary("get", "Get", "ResourceGetRequest", "ResourceGetResponse"),
            unary("list", "List", "ResourceListRequest", "ResourceListResponse"),
            unary("create", "Create", "ResourceCreateRequest", "ResourceCreateResponse"),
            unary("update", "Update", "ResourceUpdateRequest", "ResourceUpdateResponse"),
            unary("apply", "Apply", "ResourceApplyRequest", "ResourceApplyResponse"),
            unary("delete", "Delete", "ResourceDeleteRequest", "ResourceDeleteResponse"),
            server_streaming("watch", "Watch", "ResourceWatchRequest", "ResourceWatchResponse"),
        ],
    );

    let discovery = service(
        "DiscoveryService",
        vec![
            unary("get", "Get", "DiscoveryGetRequest", "DiscoveryGetResponse"),
            server_streaming("watch", "Watch", "DiscoveryWatchRequest", "DiscoveryWatchResponse"),
        ],
    );

    let runner = service(
        "RunnerService",
        vec![
            unary("start", "Start", "RunnerStartRequest", "RunnerStartResponse"),
            unary("stop", "Stop", "RunnerStopRequest", "RunnerStopResponse"),
            unary("once", "Once", "RunnerOnceRequest", "RunnerOnceResponse"),
            unary("load", "Load", "RunnerLoadRequest", "RunnerLoadResponse"),
        ],
    );

    let choreo = service(
        "ChoreoService",
        vec![
            unary("get", "Get", "ChoreoGetRequest", "ChoreoGetResponse"),
            unary("apply", "Apply", "ChoreoApplyRequest", "ChoreoApplyResponse"),
            server_streaming("watch", "Watch", "ChoreoWatchRequest", "ChoreoWatchResponse"),
        ],
    );

    let snapshot = service(
        "SnapshotService",
        vec![
            unary("get", "Get", "SnapshotGetRequest", "SnapshotGetResponse"),
            unary("list", "List", "SnapshotListRequest", "SnapshotListResponse"),
            unary("delete", "Delete", "SnapshotDeleteRequest", "SnapshotDeleteResponse"),
            server_streaming("watch", "Watch", "SnapshotWatchRequest", "SnapshotWatchResponse"),
        ],
    );

    Builder::new().compile(&[branch, resource, discovery, runner, choreo, snapshot]);

    println!("cargo:rerun-if-changed=build.rs");
}
