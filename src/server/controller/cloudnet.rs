use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::cloudnet::HealthDto,
    server::{error::AppError, state::AppState},
};

pub const CLOUDNET_TAG: &str = "cloudnet";

/// GET /api/cloudnet/health - Check CloudNet API connectivity
///
/// Runs a fresh connectivity probe and reports the resulting state. With
/// integration disabled this reports `connected: false` without any network
/// call; the `error` field then explains the disablement rather than a
/// network fault.
///
/// # Authentication
/// None - the health endpoint is used by the client before login.
///
/// # Returns
/// - `200 OK`: CloudNet reachable, or integration disabled
/// - `503 Service Unavailable`: integration enabled but CloudNet unreachable
#[utoipa::path(
    get,
    path = "/api/cloudnet/health",
    tag = CLOUDNET_TAG,
    responses(
        (status = 200, description = "CloudNet reachable or integration disabled", body = HealthDto),
        (status = 503, description = "CloudNet enabled but unreachable", body = HealthDto)
    ),
)]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.monitor.probe().await;
    let connectivity = state.monitor.state();

    let status_code = if connectivity.enabled && !connectivity.connected {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    Ok((
        status_code,
        Json(HealthDto {
            connected: connectivity.connected,
            enabled: connectivity.enabled,
            base_url: state.cloudnet.base_url().to_string(),
            error: connectivity.last_error,
        }),
    ))
}
