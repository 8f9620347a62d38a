//! Routing behaviour across every domain: tenant lookup, readiness gate,
//! and exact pass-through of requests, responses and errors.

mod common;

use choreo_proto::choreo_service_server::ChoreoService;
use choreo_proto::resource_service_server::ResourceService;
use choreo_proto::runner_service_server::RunnerService;
use choreo_proto::*;
use choreo_proxy::*;
use common::{FakeBackend, call_every_method, register, state};
use tonic::{Code, Request, Status};

const METHOD_COUNT: usize = 29;
const UNARY_COUNT: usize = 23;
const STREAMING: [&str; 6] = [
    "branch.watch",
    "branch.stream_files",
    "resource.watch",
    "discovery.watch",
    "choreo.watch",
    "snapshot.watch",
];

#[tokio::test]
async fn unknown_tenant_is_not_found_on_every_method() {
    let store = TenantStore::new();
    let fake = FakeBackend::new();
    register(&store, &TenantId::new("default", "known"), &fake, true);
    let state = state(store);

    let outcomes = call_every_method(&state, "default", "missing").await;
    assert_eq!(outcomes.len(), METHOD_COUNT);
    for (method, outcome) in outcomes {
        let status = outcome.expect_err(method);
        assert_eq!(status.code(), Code::NotFound, "{method}");
        assert!(status.message().contains("default/missing"), "{method}: {}", status.message());
    }
    assert!(fake.calls().is_empty());
    assert!(fake.watch_tokens().is_empty());
}

#[tokio::test]
async fn not_ready_tenant_is_unavailable_on_every_method() {
    let store = TenantStore::new();
    let fake = FakeBackend::new();
    register(&store, &TenantId::new("default", "warming"), &fake, false);
    let state = state(store);

    let outcomes = call_every_method(&state, "default", "warming").await;
    assert_eq!(outcomes.len(), METHOD_COUNT);
    for (method, outcome) in outcomes {
        let status = outcome.expect_err(method);
        assert_eq!(status.code(), Code::Unavailable, "{method}");
    }
    assert!(fake.calls().is_empty());
    assert!(fake.watch_tokens().is_empty());
}

#[tokio::test]
async fn ready_tenant_reaches_its_adapter_on_every_method() {
    let store = TenantStore::new();
    let fake = FakeBackend::new();
    register(&store, &TenantId::new("default", "ready"), &fake, true);
    let state = state(store);

    let outcomes = call_every_method(&state, "default", "ready").await;
    for (method, outcome) in &outcomes {
        assert!(outcome.is_ok(), "{method}: {outcome:?}");
    }

    // Every unary method was forwarded exactly once, every streaming
    // method opened exactly one adapter watch.
    let calls = fake.calls();
    assert_eq!(calls.len(), UNARY_COUNT);
    assert_eq!(fake.watch_tokens().len(), METHOD_COUNT - UNARY_COUNT);
    for (method, _) in &outcomes {
        if STREAMING.contains(method) {
            continue;
        }
        let hits = calls.iter().filter(|c| c.starts_with(&format!("{method} "))).count();
        assert_eq!(hits, 1, "{method} forwarded {hits} times");
    }
}

#[tokio::test]
async fn tenants_are_isolated() {
    let store = TenantStore::new();
    let a = FakeBackend::new();
    let b = FakeBackend::new();
    register(&store, &TenantId::new("team-a", "edge"), &a, true);
    register(&store, &TenantId::new("team-b", "edge"), &b, true);
    let proxy = Proxy::<Runner>::new(state(store));

    let request = RunnerStartRequest {
        options: Some(Options::for_proxy("team-b", "edge")),
    };
    RunnerService::start(&proxy, Request::new(request)).await.unwrap();

    assert!(a.calls().is_empty());
    assert_eq!(b.calls().len(), 1);
}

#[tokio::test]
async fn request_and_response_pass_through_unmodified() {
    let store = TenantStore::new();
    let fake = FakeBackend::new();
    register(&store, &TenantId::new("default", "ready"), &fake, true);
    let proxy = Proxy::<Resource>::new(state(store));

    let request = ResourceApplyRequest {
        options: Some(Options {
            proxy_namespace: "default".into(),
            proxy_name: "ready".into(),
            branch: "feature".into(),
            r#ref: "abc123".into(),
            show_managed_field: true,
        }),
        object: br#"{"kind":"Config"}"#.to_vec(),
    };
    let response = ResourceService::apply(&proxy, Request::new(request.clone()))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.object, request.object);
    assert_eq!(fake.calls(), vec![format!("resource.apply {request:?}")]);
}

#[tokio::test]
async fn backend_error_passes_through_unchanged() {
    let store = TenantStore::new();
    let fake = FakeBackend::new();
    fake.fail_with(Status::failed_precondition("branch is locked"));
    register(&store, &TenantId::new("default", "ready"), &fake, true);
    let proxy = Proxy::<Choreo>::new(state(store));

    let request = ChoreoGetRequest {
        choreo_context: Some(ChoreoContext::new("default", "ready")),
    };
    let status = ChoreoService::get(&proxy, Request::new(request)).await.unwrap_err();

    assert_eq!(status.code(), Code::FailedPrecondition);
    assert_eq!(status.message(), "branch is locked");
    assert_eq!(fake.calls().len(), 1);
}

#[tokio::test]
async fn missing_routing_fields_are_not_found() {
    let store = TenantStore::new();
    let fake = FakeBackend::new();
    register(&store, &TenantId::new("default", "ready"), &fake, true);
    let state = state(store);

    let resource = Proxy::<Resource>::new(state.clone());
    let status = ResourceService::get(&resource, Request::new(ResourceGetRequest::default()))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let choreo = Proxy::<Choreo>::new(state);
    let status = ChoreoService::get(&choreo, Request::new(ChoreoGetRequest::default()))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn readiness_change_takes_effect_on_next_call() {
    let store = TenantStore::new();
    let fake = FakeBackend::new();
    let id = TenantId::new("default", "flaky");
    register(&store, &id, &fake, true);
    let proxy = Proxy::<Runner>::new(state(store.clone()));
    let request = || {
        Request::new(RunnerLoadRequest {
            options: Some(Options::for_proxy("default", "flaky")),
        })
    };

    RunnerService::load(&proxy, request()).await.unwrap();

    store.set_ready(&id, false);
    let status = RunnerService::load(&proxy, request()).await.unwrap_err();
    assert_eq!(status.code(), Code::Unavailable);

    store.set_ready(&id, true);
    RunnerService::load(&proxy, request()).await.unwrap();

    store.remove(&id);
    let status = RunnerService::load(&proxy, request()).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    assert_eq!(fake.calls().len(), 2);
}
