use std::time::Duration;

use serde_json::json;

use crate::server::service::cloudnet::cache::{ResourceKind, ResponseCache};

/// Tests reading an empty cache.
///
/// Expected: None for every kind
#[test]
fn empty_cache_returns_none() {
    let cache = ResponseCache::new();

    assert!(cache.get(ResourceKind::Servers).is_none());
    assert!(cache.get(ResourceKind::Nodes).is_none());
}

/// Tests that a stored payload is returned while within its TTL.
///
/// Expected: the exact payload with a stored_at timestamp
#[test]
fn stores_and_returns_payload() {
    let cache = ResponseCache::new();
    cache.set(ResourceKind::Servers, json!([{"id": "lobby-1"}]));

    let cached = cache.get(ResourceKind::Servers).unwrap();
    assert_eq!(cached.data, json!([{"id": "lobby-1"}]));
}

/// Tests TTL expiry.
///
/// Once the TTL elapses past the last set, the entry reads as absent until
/// the next set overwrites it.
///
/// Expected: Some before expiry, None after, Some again after a fresh set
#[test]
fn entry_expires_after_ttl() {
    let cache = ResponseCache::with_ttl(Duration::from_millis(30));
    cache.set(ResourceKind::Servers, json!(["old"]));

    assert!(cache.get(ResourceKind::Servers).is_some());

    std::thread::sleep(Duration::from_millis(60));
    assert!(cache.get(ResourceKind::Servers).is_none());

    cache.set(ResourceKind::Servers, json!(["new"]));
    let cached = cache.get(ResourceKind::Servers).unwrap();
    assert_eq!(cached.data, json!(["new"]));
}

/// Tests that a set overwrites both data and timestamp.
///
/// Expected: the second payload with a refreshed stored_at
#[test]
fn set_overwrites_entry() {
    let cache = ResponseCache::new();
    cache.set(ResourceKind::Servers, json!(["first"]));
    let first = cache.get(ResourceKind::Servers).unwrap();

    cache.set(ResourceKind::Servers, json!(["second"]));
    let second = cache.get(ResourceKind::Servers).unwrap();

    assert_eq!(second.data, json!(["second"]));
    assert!(second.stored_at >= first.stored_at);
}

/// Tests that entries of different kinds do not interfere.
///
/// Expected: each kind returns only its own payload
#[test]
fn kinds_are_independent() {
    let cache = ResponseCache::new();
    cache.set(ResourceKind::Servers, json!(["server"]));
    cache.set(ResourceKind::Nodes, json!(["node"]));

    assert_eq!(cache.get(ResourceKind::Servers).unwrap().data, json!(["server"]));
    assert_eq!(cache.get(ResourceKind::Nodes).unwrap().data, json!(["node"]));
}
