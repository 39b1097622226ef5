use std::sync::Arc;
use std::time::Duration;

use test_utils::upstream::MockCloudNet;

use super::*;
use crate::server::service::cloudnet::monitor::ConnectivityMonitor;

/// Tests that a successful probe marks the state connected.
///
/// Expected: probe returns true; state has connected=true, a check
/// timestamp, and no error
#[tokio::test(flavor = "multi_thread")]
async fn probe_success_marks_connected() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_ok();

    let monitor = ConnectivityMonitor::new(Arc::new(test_client(&cloudnet.base_url())));

    assert!(monitor.probe().await);

    let state = monitor.state();
    assert!(state.connected);
    assert!(state.enabled);
    assert!(state.last_check.is_some());
    assert!(state.last_error.is_none());
}

/// Tests that a failing probe records the error message.
///
/// Expected: probe returns false; state has connected=false and the error
/// preserved for the panel's status surface
#[tokio::test(flavor = "multi_thread")]
async fn probe_failure_records_error() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_failure();

    let monitor = ConnectivityMonitor::new(Arc::new(test_client(&cloudnet.base_url())));

    assert!(!monitor.probe().await);

    let state = monitor.state();
    assert!(!state.connected);
    assert!(state.enabled);
    assert!(state.last_check.is_some());
    assert!(state.last_error.is_some());
}

/// Tests the disabled probe path.
///
/// With integration disabled the probe records the disabled state without
/// any network call; the error explains the disablement, not a fault.
///
/// Expected: probe returns false with enabled=false and a disablement
/// message
#[tokio::test(flavor = "multi_thread")]
async fn disabled_probe_skips_network() {
    let monitor = ConnectivityMonitor::new(Arc::new(disabled_client()));

    assert!(!monitor.probe().await);

    let state = monitor.state();
    assert!(!state.connected);
    assert!(!state.enabled);
    assert!(state.last_check.is_some());
    assert!(state
        .last_error
        .as_deref()
        .is_some_and(|msg| msg.contains("disabled")));
}

/// Tests that state() alone never triggers a probe.
///
/// Expected: initial state with no check timestamp and no upstream traffic
#[tokio::test(flavor = "multi_thread")]
async fn state_read_does_not_probe() {
    let cloudnet = MockCloudNet::start().await;
    let ping = cloudnet.mock_ping_ok();

    let monitor = ConnectivityMonitor::new(Arc::new(test_client(&cloudnet.base_url())));

    let state = monitor.state();
    assert!(state.last_check.is_none());
    assert_eq!(ping.hits(), 0);
}

/// Tests that probe_if_stale trusts a fresh probe result.
///
/// Expected: no second health request within the interval
#[tokio::test(flavor = "multi_thread")]
async fn probe_if_stale_skips_fresh_state() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    let ping = cloudnet.mock_ping_ok();

    let monitor = ConnectivityMonitor::with_interval(
        Arc::new(test_client(&cloudnet.base_url())),
        Duration::from_secs(60),
    );

    monitor.probe().await;
    assert!(monitor.probe_if_stale().await);

    assert_eq!(ping.hits(), 1);
}

/// Tests that probe_if_stale re-probes once the interval has passed.
///
/// Expected: a second health request after the (zero-length) interval
#[tokio::test(flavor = "multi_thread")]
async fn probe_if_stale_reprobes_stale_state() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    let ping = cloudnet.mock_ping_ok();

    let monitor = ConnectivityMonitor::with_interval(
        Arc::new(test_client(&cloudnet.base_url())),
        Duration::from_millis(0),
    );

    monitor.probe().await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert!(monitor.probe_if_stale().await);

    assert_eq!(ping.hits(), 2);
}

/// Tests the explicit scheduler lifecycle.
///
/// Starting twice is a no-op, and stop clears the timer so the monitor can
/// be started again.
///
/// Expected: Ok on every transition
#[tokio::test(flavor = "multi_thread")]
async fn start_and_stop_are_idempotent() {
    let cloudnet = MockCloudNet::start().await;
    cloudnet.mock_auth_ok("tok-1", "refresh-1");
    cloudnet.mock_ping_ok();

    let monitor = Arc::new(ConnectivityMonitor::new(Arc::new(test_client(
        &cloudnet.base_url(),
    ))));

    monitor.clone().start().await.unwrap();
    monitor.clone().start().await.unwrap();
    monitor.stop().await.unwrap();
    monitor.stop().await.unwrap();
}
