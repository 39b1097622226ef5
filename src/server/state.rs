//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The connectivity monitor, upstream client, and response cache are injected
//! here rather than living as module-level globals, so tests construct
//! isolated instances instead of sharing process-wide singletons.

use std::sync::Arc;

use crate::server::{
    middleware::auth::TokenValidator,
    service::cloudnet::{cache::ResponseCache, monitor::ConnectivityMonitor, CloudNetClient},
};

/// Application state containing shared resources and dependencies.
///
/// Initialized once during server startup and cloned (cheaply, all fields
/// are reference-counted) for each incoming request via Axum's state
/// extraction.
#[derive(Clone)]
pub struct AppState {
    /// Authenticated client for the CloudNet REST API.
    ///
    /// Owns the upstream token lifecycle; handlers reach CloudNet only
    /// through it.
    pub cloudnet: Arc<CloudNetClient>,

    /// Single source of truth for CloudNet reachability.
    ///
    /// Mutated only by its own probes; everything else reads.
    pub monitor: Arc<ConnectivityMonitor>,

    /// Last-known-good responses per resource kind, serving degraded
    /// requests while CloudNet is unreachable.
    pub cache: Arc<ResponseCache>,

    /// Validator for panel bearer credentials.
    ///
    /// Token issuance lives outside this application; the seam is injected
    /// so tests can install their own validator.
    pub token_validator: Arc<dyn TokenValidator>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    pub fn new(
        cloudnet: Arc<CloudNetClient>,
        monitor: Arc<ConnectivityMonitor>,
        cache: Arc<ResponseCache>,
        token_validator: Arc<dyn TokenValidator>,
    ) -> Self {
        Self {
            cloudnet,
            monitor,
            cache,
            token_validator,
        }
    }
}
