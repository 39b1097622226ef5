use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// How long a cached payload stays servable after the last successful live
/// fetch.
const DEFAULT_TTL: StdDuration = StdDuration::from_secs(30);

/// Logical category of cached upstream data, used as the cache key.
///
/// Kinds are an explicit enumeration rather than being derived from request
/// paths, so parameterized routes cannot alias into the wrong entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Servers,
    Nodes,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Servers => "servers",
            ResourceKind::Nodes => "nodes",
        }
    }
}

struct CacheEntry {
    data: Value,
    stored_at: DateTime<Utc>,
}

/// A cache hit: the stored payload and when it was stored.
pub struct CachedPayload {
    pub data: Value,
    pub stored_at: DateTime<Utc>,
}

/// Last-known-good responses per resource kind.
///
/// Written only by the fallback gateway after a successful live fetch and
/// read only while CloudNet is unreachable. Entries are overwritten, never
/// merged; an entry past its TTL reads as absent but stays overwritable.
/// The TTL is fixed at construction.
pub struct ResponseCache {
    entries: RwLock<HashMap<ResourceKind, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: StdDuration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
        }
    }

    /// Returns the payload for `kind` while it is still within its TTL.
    ///
    /// Expired entries are not purged here; they simply read as absent until
    /// the next `set` replaces them.
    pub fn get(&self, kind: ResourceKind) -> Option<CachedPayload> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let entry = entries.get(&kind)?;

        if Utc::now() - entry.stored_at <= self.ttl {
            Some(CachedPayload {
                data: entry.data.clone(),
                stored_at: entry.stored_at,
            })
        } else {
            None
        }
    }

    /// Unconditionally replaces the entry for `kind` with fresh data.
    pub fn set(&self, kind: ResourceKind, data: Value) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            kind,
            CacheEntry {
                data,
                stored_at: Utc::now(),
            },
        );
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
