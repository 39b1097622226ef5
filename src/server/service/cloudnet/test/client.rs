use httpmock::Method::GET;
use test_utils::{factory, upstream::MockCloudNet};

use super::*;
use crate::server::error::upstream::UpstreamError;

/// Tests the happy path for listing services.
///
/// Verifies that the client authenticates with the configured credentials,
/// attaches the obtained bearer token, and unwraps the `{"services": [...]}`
/// response shape.
///
/// Expected: Ok with one decoded service snapshot
#[tokio::test(flavor = "multi_thread")]
async fn lists_services_after_authenticating() {
    let cloudnet = MockCloudNet::start().await;
    let auth = cloudnet.mock_auth_ok("tok-1", "refresh-1");
    let services = cloudnet.mock_services_for_token(
        "tok-1",
        vec![factory::create_service_snapshot("Lobby", 1)],
    );

    let client = test_client(&cloudnet.base_url());
    let result = client.get_services().await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].service_id.task_name.as_deref(), Some("Lobby"));
    assert_eq!(auth.hits(), 1);
    assert_eq!(services.hits(), 1);
}

/// Tests that an established session is reused across calls.
///
/// Verifies that the second request does not re-authenticate while the
/// access token is still comfortably within its lifetime.
///
/// Expected: Ok twice with a single token acquisition
#[tokio::test(flavor = "multi_thread")]
async fn reuses_session_across_calls() {
    let cloudnet = MockCloudNet::start().await;
    let auth = cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_services_for_token("tok-1", vec![]);

    let client = test_client(&cloudnet.base_url());
    client.get_services().await.unwrap();
    client.get_services().await.unwrap();

    assert_eq!(auth.hits(), 1);
}

/// Tests the silent-refresh window.
///
/// A token expiring within 30 seconds is not usable; the client refreshes it
/// before sending the actual request instead of waiting for a 401.
///
/// Expected: Ok via the refreshed token, one refresh call, no full re-auth
#[tokio::test(flavor = "multi_thread")]
async fn refreshes_token_expiring_within_margin() {
    let cloudnet = MockCloudNet::start().await;
    let refresh = cloudnet.mock_refresh_ok("tok-2", "refresh-2");
    let services = cloudnet.mock_services_for_token("tok-2", vec![]);

    let client = test_client(&cloudnet.base_url());
    client.set_session("tok-old", "refresh-1", 10).await;

    client.get_services().await.unwrap();

    assert_eq!(refresh.hits(), 1);
    assert_eq!(services.hits(), 1);
}

/// Tests the reactive 401 path (scenario: refresh succeeds).
///
/// The first attempt is rejected with 401; the client performs exactly one
/// refresh and retries the original request once with the new token. The
/// caller never observes the 401.
///
/// Expected: Ok, with one hit on each of the 401 mock, the refresh endpoint,
/// and the retried request
#[tokio::test(flavor = "multi_thread")]
async fn retries_once_with_refreshed_token_after_unauthorized() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    let refresh = cloudnet.mock_refresh_ok("tok-2", "refresh-2");
    let rejected = cloudnet.mock_services_unauthorized_for("tok-1");
    let accepted = cloudnet.mock_services_for_token(
        "tok-2",
        vec![factory::create_service_snapshot("Lobby", 1)],
    );

    let client = test_client(&cloudnet.base_url());
    let result = client.get_services().await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(rejected.hits(), 1);
    assert_eq!(refresh.hits(), 1);
    assert_eq!(accepted.hits(), 1);
}

/// Tests that a 401 triggers at most one refresh and one retry.
///
/// The upstream keeps answering 401 even after a successful refresh. The
/// client must not loop: one refresh, one retry, then the authentication
/// error propagates.
///
/// Expected: Err(Auth), exactly one refresh call and two request attempts
#[tokio::test(flavor = "multi_thread")]
async fn at_most_one_refresh_per_request() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    let refresh = cloudnet.mock_refresh_ok("tok-2", "refresh-2");
    let rejected = cloudnet.server.mock(|when, then| {
        when.method(GET).path("/service");
        then.status(401);
    });

    let client = test_client(&cloudnet.base_url());
    let err = client.get_services().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Auth { status: 401 }));
    assert_eq!(refresh.hits(), 1);
    assert_eq!(rejected.hits(), 2);
}

/// Tests the reactive 401 path (scenario: refresh fails).
///
/// When the refresh itself fails, the whole session is cleared so the next
/// call must re-authenticate from scratch, and the original 401 propagates.
///
/// Expected: Err(Auth) with an empty session afterwards
#[tokio::test(flavor = "multi_thread")]
async fn clears_session_when_refresh_fails() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_refresh_failure();
    cloudnet.server.mock(|when, then| {
        when.method(GET).path("/service");
        then.status(401);
    });

    let client = test_client(&cloudnet.base_url());
    let err = client.get_services().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Auth { status: 401 }));
    assert!(client.session_is_empty().await);
}

/// Tests the bounded retry loop for 5xx responses.
///
/// With 2 configured retries the client makes three attempts in total, then
/// propagates the last error instead of retrying forever.
///
/// Expected: Err(UnexpectedStatus 500) after exactly three attempts
#[tokio::test(flavor = "multi_thread")]
async fn retries_server_errors_up_to_configured_count() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    let failing = cloudnet.mock_services_failure(500);

    let client = test_client(&cloudnet.base_url());
    let err = client.get_services().await.unwrap_err();

    assert!(matches!(err, UpstreamError::UnexpectedStatus { status: 500, .. }));
    assert_eq!(failing.hits(), 3);
}

/// Tests that client errors other than 401 are not retried.
///
/// Expected: Err(UnexpectedStatus 404) after a single attempt
#[tokio::test(flavor = "multi_thread")]
async fn does_not_retry_client_errors() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    let failing = cloudnet.mock_services_failure(404);

    let client = test_client(&cloudnet.base_url());
    let err = client.get_services().await.unwrap_err();

    assert!(matches!(err, UpstreamError::UnexpectedStatus { status: 404, .. }));
    assert_eq!(failing.hits(), 1);
}

/// Tests the disabled short-circuit.
///
/// With integration disabled, no request is ever attempted; the configured
/// base URL here points at a closed port and must never be contacted.
///
/// Expected: Err(Disabled) immediately
#[tokio::test(flavor = "multi_thread")]
async fn disabled_integration_fails_without_network() {
    let client = disabled_client();

    let err = client.get_services().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Disabled));
}

/// Tests that missing credentials surface as a configuration error.
///
/// Expected: Err(MissingCredentials) without contacting the upstream
#[tokio::test(flavor = "multi_thread")]
async fn missing_credentials_is_a_configuration_error() {
    let config = CloudNetConfig {
        username: None,
        password: None,
        ..test_config("http://127.0.0.1:9")
    };
    let client = CloudNetClient::new(reqwest::Client::new(), config);

    let err = client.get_services().await.unwrap_err();

    assert!(matches!(err, UpstreamError::MissingCredentials));
}

/// Tests the static API-key credential path.
///
/// A configured API key bypasses the token lifecycle entirely and is sent
/// as the bearer credential on every request.
///
/// Expected: Ok with the key attached and no token endpoint traffic
#[tokio::test(flavor = "multi_thread")]
async fn api_key_is_used_directly() {
    let cloudnet = MockCloudNet::start().await;
    let services = cloudnet.mock_services_for_token("static-key", vec![]);

    let config = CloudNetConfig {
        api_key: Some("static-key".to_string()),
        username: None,
        password: None,
        ..test_config(&cloudnet.base_url())
    };
    let client = CloudNetClient::new(reqwest::Client::new(), config);

    client.get_services().await.unwrap();

    assert_eq!(services.hits(), 1);
}

/// Tests lifecycle transitions against the PATCH endpoint.
///
/// Expected: Ok for an empty 204 response body
#[tokio::test(flavor = "multi_thread")]
async fn sends_lifecycle_transitions() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    let lifecycle = cloudnet.mock_lifecycle("lobby-1-uid");

    let client = test_client(&cloudnet.base_url());
    client.start_service("lobby-1-uid").await.unwrap();

    assert_eq!(lifecycle.hits(), 1);
}

/// Tests decoding of the wrapped `/cluster` response.
///
/// Expected: Ok with the node entry decoded from the wrapper object
#[tokio::test(flavor = "multi_thread")]
async fn lists_cluster_nodes() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_nodes(vec![factory::create_node_entry("Node-1")]);

    let client = test_client(&cloudnet.base_url());
    let nodes = client.get_nodes().await.unwrap();

    assert_eq!(nodes.len(), 1);
    assert_eq!(
        nodes[0]
            .node
            .as_ref()
            .and_then(|n| n.unique_id.as_deref()),
        Some("Node-1")
    );
}
