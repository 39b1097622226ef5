//! Fallback gateway wrapping every route that needs live CloudNet data.
//!
//! The gateway decides, per request, between four outcomes: live data,
//! cached data with a degradation warning, a structured unavailability
//! error, and a structured disabled error. The decision is driven entirely
//! by the connectivity monitor and the response cache; route handlers only
//! supply the live-fetch closure and never see upstream failures.

use std::future::Future;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use serde::Serialize;

use crate::{
    model::cloudnet::{
        CloudNetStatusDto, DegradedDto, GatewayErrorDto, UnavailableDto, CODE_CLOUDNET_DISABLED,
        CODE_CLOUDNET_UNAVAILABLE,
    },
    server::{
        error::AppError,
        service::cloudnet::{
            cache::{ResourceKind, ResponseCache},
            monitor::ConnectivityMonitor,
        },
        state::AppState,
    },
};

/// Outcome of a gated request, convertible into the panel's wire shapes.
///
/// `Live` serializes the payload bare (status 200), exactly as if no gateway
/// existed. The other variants carry the connectivity state so every
/// non-live response tells the client what the panel currently knows about
/// CloudNet.
pub enum GatewayOutcome<T> {
    Live(T),
    Degraded {
        data: serde_json::Value,
        kind: ResourceKind,
        last_update: DateTime<Utc>,
        status: CloudNetStatusDto,
    },
    Unavailable {
        message: String,
        details: Option<String>,
        status: CloudNetStatusDto,
    },
    Disabled {
        status: CloudNetStatusDto,
    },
}

impl<T: Serialize> IntoResponse for GatewayOutcome<T> {
    fn into_response(self) -> Response {
        match self {
            GatewayOutcome::Live(data) => (StatusCode::OK, Json(data)).into_response(),
            GatewayOutcome::Degraded {
                data,
                kind,
                last_update,
                status,
            } => (
                StatusCode::OK,
                Json(DegradedDto {
                    success: true,
                    data,
                    warning: format!(
                        "CloudNet API is unreachable - serving cached {}",
                        kind.as_str()
                    ),
                    fallback_mode: true,
                    last_update,
                    cloudnet_status: status,
                }),
            )
                .into_response(),
            GatewayOutcome::Unavailable {
                message,
                details,
                status,
            } => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnavailableDto {
                    success: false,
                    error: GatewayErrorDto {
                        code: CODE_CLOUDNET_UNAVAILABLE.to_string(),
                        message,
                        details,
                    },
                    cloudnet_status: Some(status),
                }),
            )
                .into_response(),
            GatewayOutcome::Disabled { status } => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnavailableDto {
                    success: false,
                    error: GatewayErrorDto {
                        code: CODE_CLOUDNET_DISABLED.to_string(),
                        message: "CloudNet API is disabled in configuration".to_string(),
                        details: None,
                    },
                    cloudnet_status: Some(status),
                }),
            )
                .into_response(),
        }
    }
}

/// Per-request decision layer between route handlers and the upstream
/// client.
///
/// Constructed in controllers the same way the auth guard is; holds no state
/// of its own beyond borrows of the shared monitor and cache.
pub struct FallbackGateway<'a> {
    monitor: &'a ConnectivityMonitor,
    cache: &'a ResponseCache,
}

impl<'a> FallbackGateway<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self::from_parts(&state.monitor, &state.cache)
    }

    pub fn from_parts(monitor: &'a ConnectivityMonitor, cache: &'a ResponseCache) -> Self {
        Self { monitor, cache }
    }

    /// Serves a cacheable read.
    ///
    /// Disabled integration short-circuits without consulting the cache or
    /// the network. Otherwise the monitor is probed if its state is stale;
    /// when connected, `fetch` runs and its result both refreshes the cache
    /// under `kind` and is returned live. When disconnected - or when the
    /// live fetch fails despite a connected verdict - the cache-or-error
    /// branch answers instead of a raw 500.
    pub async fn fetch<T, F, Fut>(
        &self,
        kind: ResourceKind,
        fetch: F,
    ) -> Result<GatewayOutcome<T>, AppError>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let state = self.monitor.state();
        if !state.enabled {
            return Ok(GatewayOutcome::Disabled {
                status: state.into(),
            });
        }

        if self.monitor.probe_if_stale().await {
            match fetch().await {
                Ok(data) => {
                    let value = serde_json::to_value(&data).map_err(|e| {
                        AppError::InternalError(format!(
                            "Failed to serialize {} payload for caching: {}",
                            kind.as_str(),
                            e
                        ))
                    })?;
                    self.cache.set(kind, value);
                    return Ok(GatewayOutcome::Live(data));
                }
                Err(err) => {
                    // The probe said connected but the fetch disagreed;
                    // treat it as a fresh disconnection signal.
                    tracing::warn!(
                        "Live fetch for {} failed despite connected state: {}",
                        kind.as_str(),
                        err
                    );
                }
            }
        }

        Ok(self.degraded(kind))
    }

    /// Runs a non-cacheable operation (single-resource reads, lifecycle
    /// transitions) under connectivity gating.
    ///
    /// Mutations have no meaningful degraded mode, so a disconnected state
    /// or a failed operation yields the unavailable shape directly.
    pub async fn execute<T, F, Fut>(&self, op: F) -> Result<GatewayOutcome<T>, AppError>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let state = self.monitor.state();
        if !state.enabled {
            return Ok(GatewayOutcome::Disabled {
                status: state.into(),
            });
        }

        if self.monitor.probe_if_stale().await {
            match op().await {
                Ok(data) => return Ok(GatewayOutcome::Live(data)),
                Err(err) => {
                    tracing::warn!("CloudNet operation failed despite connected state: {}", err);
                    return Ok(GatewayOutcome::Unavailable {
                        message: "CloudNet API not available".to_string(),
                        details: Some(err.to_string()),
                        status: self.monitor.state().into(),
                    });
                }
            }
        }

        let status: CloudNetStatusDto = self.monitor.state().into();
        Ok(GatewayOutcome::Unavailable {
            message: "CloudNet API not available".to_string(),
            details: status.last_error.clone(),
            status,
        })
    }

    /// The disconnected branch: a still-valid cache entry answers with a
    /// warning, anything else is a structured unavailability error.
    fn degraded<T>(&self, kind: ResourceKind) -> GatewayOutcome<T> {
        let status: CloudNetStatusDto = self.monitor.state().into();

        match self.cache.get(kind) {
            Some(cached) => {
                tracing::warn!(
                    "Serving cached {} from {} (CloudNet unreachable)",
                    kind.as_str(),
                    cached.stored_at
                );
                GatewayOutcome::Degraded {
                    data: cached.data,
                    kind,
                    last_update: cached.stored_at,
                    status,
                }
            }
            None => GatewayOutcome::Unavailable {
                message: "CloudNet API not available".to_string(),
                details: status.last_error.clone(),
                status,
            },
        }
    }
}
