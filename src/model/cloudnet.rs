//! Wire types for the CloudNet connectivity surface.
//!
//! These DTOs are shared between the axum backend and the WASM client. The
//! field names follow the panel's JSON contract (camelCase), so both sides
//! serialize and parse the exact same shapes: the health endpoint body, the
//! degraded-response envelope served from cache, and the structured
//! unavailability error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "server")]
use utoipa::ToSchema;

/// Error code for requests rejected because CloudNet integration is turned
/// off in configuration.
pub const CODE_CLOUDNET_DISABLED: &str = "CLOUDNET_DISABLED";

/// Error code for requests that could not be served live or from cache.
pub const CODE_CLOUDNET_UNAVAILABLE: &str = "CLOUDNET_UNAVAILABLE";

/// Snapshot of the CloudNet connectivity state, mirrored into gated
/// responses as `cloudnetStatus`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CloudNetStatusDto {
    pub connected: bool,
    pub enabled: bool,
    pub last_check: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

/// Body of `GET /api/cloudnet/health`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub connected: bool,
    pub enabled: bool,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Successful response served from the last-known-good cache while CloudNet
/// is unreachable. Status 200; `fallback_mode` marks it as degraded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DegradedDto {
    pub success: bool,
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub data: Value,
    pub warning: String,
    pub fallback_mode: bool,
    pub last_update: DateTime<Utc>,
    pub cloudnet_status: CloudNetStatusDto,
}

/// Structured error body for gated requests that cannot be served at all,
/// status 503. `error.code` is one of [`CODE_CLOUDNET_DISABLED`] or
/// [`CODE_CLOUDNET_UNAVAILABLE`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UnavailableDto {
    pub success: bool,
    pub error: GatewayErrorDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudnet_status: Option<CloudNetStatusDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct GatewayErrorDto {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
