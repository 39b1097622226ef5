use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        cloudnet::UnavailableDto,
        server::ServerDto,
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, fallback::FallbackGateway},
        service::cloudnet::{cache::ResourceKind, transform::transform_server},
        state::AppState,
    },
};

pub const SERVER_TAG: &str = "servers";

/// GET /api/servers - List all game servers
///
/// Returns the transformed list of CloudNet services. While CloudNet is
/// unreachable, a still-valid cached list is served inside the degraded
/// envelope instead; with neither live data nor cache the structured
/// unavailability error is returned.
///
/// # Authentication
/// Requires a valid panel bearer token.
///
/// # Returns
/// - `200 OK`: JSON array of servers, or the degraded envelope with `fallbackMode: true`
/// - `401 Unauthorized`: Missing or invalid panel token
/// - `503 Service Unavailable`: CloudNet disabled or unreachable with no cached data
#[utoipa::path(
    get,
    path = "/api/servers",
    tag = SERVER_TAG,
    responses(
        (status = 200, description = "Live server list, or a DegradedDto envelope when served from cache", body = Vec<ServerDto>),
        (status = 401, description = "Missing or invalid panel token", body = ErrorDto),
        (status = 503, description = "CloudNet disabled or unavailable", body = UnavailableDto)
    ),
)]
pub async fn get_servers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(state.token_validator.as_ref(), &headers).require()?;

    let cloudnet = state.cloudnet.clone();
    let outcome = FallbackGateway::new(&state)
        .fetch(ResourceKind::Servers, || async move {
            let services = cloudnet.get_services().await?;
            let now = Utc::now();
            Ok(services
                .iter()
                .map(|service| transform_server(service, now))
                .collect::<Vec<_>>())
        })
        .await?;

    Ok(outcome)
}

/// GET /api/servers/{id} - Get a single game server
///
/// Single-resource reads are served live or not at all; they do not
/// participate in the response cache.
///
/// # Authentication
/// Requires a valid panel bearer token.
///
/// # Path Parameters
/// - `id`: CloudNet service unique id
///
/// # Returns
/// - `200 OK`: The transformed server
/// - `401 Unauthorized`: Missing or invalid panel token
/// - `503 Service Unavailable`: CloudNet disabled or unreachable
#[utoipa::path(
    get,
    path = "/api/servers/{id}",
    tag = SERVER_TAG,
    params(
        ("id" = String, Path, description = "CloudNet service unique id")
    ),
    responses(
        (status = 200, description = "The transformed server", body = ServerDto),
        (status = 401, description = "Missing or invalid panel token", body = ErrorDto),
        (status = 503, description = "CloudNet disabled or unavailable", body = UnavailableDto)
    ),
)]
pub async fn get_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(state.token_validator.as_ref(), &headers).require()?;

    let cloudnet = state.cloudnet.clone();
    let outcome = FallbackGateway::new(&state)
        .execute(|| async move {
            let service = cloudnet.get_service(&id).await?;
            Ok(transform_server(&service, Utc::now()))
        })
        .await?;

    Ok(outcome)
}

/// POST /api/servers/{id}/start - Start a game server
///
/// # Authentication
/// Requires a valid panel bearer token.
///
/// # Returns
/// - `200 OK`: Start signal accepted by CloudNet
/// - `401 Unauthorized`: Missing or invalid panel token
/// - `503 Service Unavailable`: CloudNet disabled or unreachable
#[utoipa::path(
    post,
    path = "/api/servers/{id}/start",
    tag = SERVER_TAG,
    params(
        ("id" = String, Path, description = "CloudNet service unique id")
    ),
    responses(
        (status = 200, description = "Start signal accepted", body = MessageDto),
        (status = 401, description = "Missing or invalid panel token", body = ErrorDto),
        (status = 503, description = "CloudNet disabled or unavailable", body = UnavailableDto)
    ),
)]
pub async fn start_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    lifecycle(state, headers, id, "start").await
}

/// POST /api/servers/{id}/stop - Stop a game server
///
/// # Authentication
/// Requires a valid panel bearer token.
///
/// # Returns
/// - `200 OK`: Stop signal accepted by CloudNet
/// - `401 Unauthorized`: Missing or invalid panel token
/// - `503 Service Unavailable`: CloudNet disabled or unreachable
#[utoipa::path(
    post,
    path = "/api/servers/{id}/stop",
    tag = SERVER_TAG,
    params(
        ("id" = String, Path, description = "CloudNet service unique id")
    ),
    responses(
        (status = 200, description = "Stop signal accepted", body = MessageDto),
        (status = 401, description = "Missing or invalid panel token", body = ErrorDto),
        (status = 503, description = "CloudNet disabled or unavailable", body = UnavailableDto)
    ),
)]
pub async fn stop_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    lifecycle(state, headers, id, "stop").await
}

/// POST /api/servers/{id}/restart - Restart a game server
///
/// # Authentication
/// Requires a valid panel bearer token.
///
/// # Returns
/// - `200 OK`: Restart signal accepted by CloudNet
/// - `401 Unauthorized`: Missing or invalid panel token
/// - `503 Service Unavailable`: CloudNet disabled or unreachable
#[utoipa::path(
    post,
    path = "/api/servers/{id}/restart",
    tag = SERVER_TAG,
    params(
        ("id" = String, Path, description = "CloudNet service unique id")
    ),
    responses(
        (status = 200, description = "Restart signal accepted", body = MessageDto),
        (status = 401, description = "Missing or invalid panel token", body = ErrorDto),
        (status = 503, description = "CloudNet disabled or unavailable", body = UnavailableDto)
    ),
)]
pub async fn restart_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    lifecycle(state, headers, id, "restart").await
}

/// Shared lifecycle-transition path. Mutations are gated by connectivity but
/// never served from cache.
async fn lifecycle(
    state: AppState,
    headers: HeaderMap,
    id: String,
    target: &'static str,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(state.token_validator.as_ref(), &headers).require()?;

    let cloudnet = state.cloudnet.clone();
    let outcome = FallbackGateway::new(&state)
        .execute(|| async move {
            match target {
                "start" => cloudnet.start_service(&id).await?,
                "stop" => cloudnet.stop_service(&id).await?,
                _ => cloudnet.restart_service(&id).await?,
            }

            Ok(MessageDto {
                success: true,
                message: format!("{} signal sent to server {}", target, id),
            })
        })
        .await?;

    Ok(outcome)
}
