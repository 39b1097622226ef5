use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::response::IntoResponse;
use serde_json::{json, Value};
use test_utils::upstream::MockCloudNet;

use crate::model::cloudnet::{DegradedDto, UnavailableDto, CODE_CLOUDNET_DISABLED, CODE_CLOUDNET_UNAVAILABLE};
use crate::server::{
    config::CloudNetConfig,
    error::AppError,
    middleware::fallback::{FallbackGateway, GatewayOutcome},
    service::cloudnet::{
        cache::{ResourceKind, ResponseCache},
        monitor::ConnectivityMonitor,
        CloudNetClient,
    },
};

fn cloudnet_config(base_url: &str, enabled: bool) -> CloudNetConfig {
    CloudNetConfig {
        enabled,
        base_url: base_url.to_string(),
        api_key: None,
        username: Some("panel".to_string()),
        password: Some("secret".to_string()),
        timeout: Duration::from_secs(1),
        retries: 0,
        retry_delay: Duration::from_millis(10),
    }
}

fn monitor_for(base_url: &str, enabled: bool) -> ConnectivityMonitor {
    let client = Arc::new(CloudNetClient::new(
        reqwest::Client::new(),
        cloudnet_config(base_url, enabled),
    ));
    ConnectivityMonitor::with_interval(client, Duration::from_secs(60))
}

async fn read_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Tests the disabled short-circuit.
///
/// With integration disabled the gateway answers immediately: the fetch
/// closure never runs, no network request is made, and the cache stays
/// untouched.
///
/// Expected: Disabled outcome with the fetch closure uninvoked
#[tokio::test(flavor = "multi_thread")]
async fn disabled_integration_short_circuits() {
    let monitor = monitor_for("http://127.0.0.1:9", false);
    let cache = ResponseCache::new();
    let invoked = Arc::new(AtomicBool::new(false));

    let gateway = FallbackGateway::from_parts(&monitor, &cache);
    let flag = invoked.clone();
    let outcome: GatewayOutcome<Value> = gateway
        .fetch(ResourceKind::Servers, || async move {
            flag.store(true, Ordering::SeqCst);
            Ok(json!([]))
        })
        .await
        .unwrap();

    assert!(matches!(outcome, GatewayOutcome::Disabled { .. }));
    assert!(!invoked.load(Ordering::SeqCst));
    assert!(cache.get(ResourceKind::Servers).is_none());
}

/// Tests the disabled response shape.
///
/// Expected: status 503 with error code CLOUDNET_DISABLED and the
/// connectivity state attached
#[tokio::test(flavor = "multi_thread")]
async fn disabled_outcome_serializes_to_503() {
    let monitor = monitor_for("http://127.0.0.1:9", false);
    let cache = ResponseCache::new();

    let gateway = FallbackGateway::from_parts(&monitor, &cache);
    let outcome: GatewayOutcome<Value> = gateway
        .fetch(ResourceKind::Servers, || async move { Ok(json!([])) })
        .await
        .unwrap();

    let response = outcome.into_response();
    assert_eq!(response.status(), 503);

    let body: UnavailableDto = serde_json::from_value(read_body(response).await).unwrap();
    assert!(!body.success);
    assert_eq!(body.error.code, CODE_CLOUDNET_DISABLED);
    assert!(!body.cloudnet_status.unwrap().enabled);
}

/// Tests the healthy live path.
///
/// Expected: Live outcome and the cache refreshed under the resource kind
#[tokio::test(flavor = "multi_thread")]
async fn live_fetch_updates_cache() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_ok();

    let monitor = monitor_for(&cloudnet.base_url(), true);
    let cache = ResponseCache::new();

    let gateway = FallbackGateway::from_parts(&monitor, &cache);
    let outcome: GatewayOutcome<Value> = gateway
        .fetch(ResourceKind::Servers, || async move {
            Ok(json!([{"id": "lobby-1"}]))
        })
        .await
        .unwrap();

    assert!(matches!(outcome, GatewayOutcome::Live(_)));
    assert_eq!(
        cache.get(ResourceKind::Servers).unwrap().data,
        json!([{"id": "lobby-1"}])
    );
}

/// Tests degraded service from a valid cache entry while disconnected.
///
/// Expected: Degraded outcome carrying the cached payload; the fetch
/// closure never runs
#[tokio::test(flavor = "multi_thread")]
async fn disconnected_serves_valid_cache() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_failure();

    let monitor = monitor_for(&cloudnet.base_url(), true);
    let cache = ResponseCache::new();
    cache.set(ResourceKind::Servers, json!([{"id": "lobby-1"}]));

    let invoked = Arc::new(AtomicBool::new(false));
    let gateway = FallbackGateway::from_parts(&monitor, &cache);
    let flag = invoked.clone();
    let outcome: GatewayOutcome<Value> = gateway
        .fetch(ResourceKind::Servers, || async move {
            flag.store(true, Ordering::SeqCst);
            Ok(json!([]))
        })
        .await
        .unwrap();

    match outcome {
        GatewayOutcome::Degraded { data, status, .. } => {
            assert_eq!(data, json!([{"id": "lobby-1"}]));
            assert!(!status.connected);
        }
        other => panic!("expected degraded outcome, got {}", outcome_name(&other)),
    }
    assert!(!invoked.load(Ordering::SeqCst));
}

/// Tests the degraded envelope on the wire.
///
/// Expected: status 200 with success=true, fallbackMode=true, a warning,
/// and the cache timestamp
#[tokio::test(flavor = "multi_thread")]
async fn degraded_outcome_serializes_to_200_envelope() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_failure();

    let monitor = monitor_for(&cloudnet.base_url(), true);
    let cache = ResponseCache::new();
    cache.set(ResourceKind::Servers, json!([{"id": "lobby-1"}]));

    let gateway = FallbackGateway::from_parts(&monitor, &cache);
    let outcome: GatewayOutcome<Value> = gateway
        .fetch(ResourceKind::Servers, || async move { Ok(json!([])) })
        .await
        .unwrap();

    let response = outcome.into_response();
    assert_eq!(response.status(), 200);

    let body: DegradedDto = serde_json::from_value(read_body(response).await).unwrap();
    assert!(body.success);
    assert!(body.fallback_mode);
    assert!(body.warning.contains("servers"));
    assert!(!body.cloudnet_status.connected);
}

/// Tests total unavailability once the cached entry has expired.
///
/// Expected: Unavailable outcome (503 with code CLOUDNET_UNAVAILABLE)
#[tokio::test(flavor = "multi_thread")]
async fn disconnected_with_expired_cache_is_unavailable() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_failure();

    let monitor = monitor_for(&cloudnet.base_url(), true);
    let cache = ResponseCache::with_ttl(Duration::from_millis(30));
    cache.set(ResourceKind::Servers, json!([{"id": "lobby-1"}]));
    tokio::time::sleep(Duration::from_millis(60)).await;

    let gateway = FallbackGateway::from_parts(&monitor, &cache);
    let outcome: GatewayOutcome<Value> = gateway
        .fetch(ResourceKind::Servers, || async move { Ok(json!([])) })
        .await
        .unwrap();

    let response = outcome.into_response();
    assert_eq!(response.status(), 503);

    let body: UnavailableDto = serde_json::from_value(read_body(response).await).unwrap();
    assert!(!body.success);
    assert_eq!(body.error.code, CODE_CLOUDNET_UNAVAILABLE);
}

/// Tests that a live-fetch failure after a connected verdict falls back.
///
/// The monitor just said connected, but the fetch itself fails; the gateway
/// treats that as a fresh disconnection and serves the cache instead of a
/// raw 500.
///
/// Expected: Degraded outcome with the cached payload
#[tokio::test(flavor = "multi_thread")]
async fn live_fetch_error_falls_back_to_cache() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_ok();

    let monitor = monitor_for(&cloudnet.base_url(), true);
    let cache = ResponseCache::new();
    cache.set(ResourceKind::Servers, json!([{"id": "lobby-1"}]));

    let gateway = FallbackGateway::from_parts(&monitor, &cache);
    let outcome: GatewayOutcome<Value> = gateway
        .fetch(ResourceKind::Servers, || async move {
            Err(AppError::InternalError("fetch exploded".to_string()))
        })
        .await
        .unwrap();

    match outcome {
        GatewayOutcome::Degraded { data, .. } => {
            assert_eq!(data, json!([{"id": "lobby-1"}]));
        }
        other => panic!("expected degraded outcome, got {}", outcome_name(&other)),
    }
}

/// Tests a live-fetch failure with nothing cached.
///
/// Expected: Unavailable outcome rather than a raw 500
#[tokio::test(flavor = "multi_thread")]
async fn live_fetch_error_without_cache_is_unavailable() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_ok();

    let monitor = monitor_for(&cloudnet.base_url(), true);
    let cache = ResponseCache::new();

    let gateway = FallbackGateway::from_parts(&monitor, &cache);
    let outcome: GatewayOutcome<Value> = gateway
        .fetch(ResourceKind::Servers, || async move {
            Err(AppError::InternalError("fetch exploded".to_string()))
        })
        .await
        .unwrap();

    assert!(matches!(outcome, GatewayOutcome::Unavailable { .. }));
}

/// Tests that non-cacheable operations never serve from cache.
///
/// Even with a valid servers entry present, a disconnected lifecycle
/// operation reports unavailability.
///
/// Expected: Unavailable outcome with the operation uninvoked
#[tokio::test(flavor = "multi_thread")]
async fn execute_never_serves_from_cache() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_failure();

    let monitor = monitor_for(&cloudnet.base_url(), true);
    let cache = ResponseCache::new();
    cache.set(ResourceKind::Servers, json!([{"id": "lobby-1"}]));

    let invoked = Arc::new(AtomicBool::new(false));
    let gateway = FallbackGateway::from_parts(&monitor, &cache);
    let flag = invoked.clone();
    let outcome: GatewayOutcome<Value> = gateway
        .execute(|| async move {
            flag.store(true, Ordering::SeqCst);
            Ok(json!({"success": true}))
        })
        .await
        .unwrap();

    assert!(matches!(outcome, GatewayOutcome::Unavailable { .. }));
    assert!(!invoked.load(Ordering::SeqCst));
}

/// Tests the connected path for non-cacheable operations.
///
/// Expected: Live outcome without touching the cache
#[tokio::test(flavor = "multi_thread")]
async fn execute_runs_live_when_connected() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_ok();

    let monitor = monitor_for(&cloudnet.base_url(), true);
    let cache = ResponseCache::new();

    let gateway = FallbackGateway::from_parts(&monitor, &cache);
    let outcome: GatewayOutcome<Value> = gateway
        .execute(|| async move { Ok(json!({"success": true})) })
        .await
        .unwrap();

    assert!(matches!(outcome, GatewayOutcome::Live(_)));
    assert!(cache.get(ResourceKind::Servers).is_none());
}

fn outcome_name<T>(outcome: &GatewayOutcome<T>) -> &'static str {
    match outcome {
        GatewayOutcome::Live(_) => "live",
        GatewayOutcome::Degraded { .. } => "degraded",
        GatewayOutcome::Unavailable { .. } => "unavailable",
        GatewayOutcome::Disabled { .. } => "disabled",
    }
}
