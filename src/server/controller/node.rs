use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    model::{
        api::ErrorDto,
        cloudnet::UnavailableDto,
        node::NodeDto,
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, fallback::FallbackGateway},
        service::cloudnet::{cache::ResourceKind, transform::transform_node},
        state::AppState,
    },
};

pub const NODE_TAG: &str = "nodes";

/// GET /api/nodes - List all cluster nodes
///
/// Returns the transformed CloudNet cluster view. While CloudNet is
/// unreachable, a still-valid cached list is served inside the degraded
/// envelope; with neither live data nor cache the structured unavailability
/// error is returned.
///
/// # Authentication
/// Requires a valid panel bearer token.
///
/// # Returns
/// - `200 OK`: JSON array of nodes, or the degraded envelope with `fallbackMode: true`
/// - `401 Unauthorized`: Missing or invalid panel token
/// - `503 Service Unavailable`: CloudNet disabled or unreachable with no cached data
#[utoipa::path(
    get,
    path = "/api/nodes",
    tag = NODE_TAG,
    responses(
        (status = 200, description = "Live node list, or a DegradedDto envelope when served from cache", body = Vec<NodeDto>),
        (status = 401, description = "Missing or invalid panel token", body = ErrorDto),
        (status = 503, description = "CloudNet disabled or unavailable", body = UnavailableDto)
    ),
)]
pub async fn get_nodes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(state.token_validator.as_ref(), &headers).require()?;

    let cloudnet = state.cloudnet.clone();
    let outcome = FallbackGateway::new(&state)
        .fetch(ResourceKind::Nodes, || async move {
            let nodes = cloudnet.get_nodes().await?;
            let now = Utc::now();
            Ok(nodes
                .iter()
                .map(|node| transform_node(node, now))
                .collect::<Vec<_>>())
        })
        .await?;

    Ok(outcome)
}

/// GET /api/nodes/{id} - Get a single cluster node
///
/// Single-resource reads are served live or not at all; they do not
/// participate in the response cache.
///
/// # Authentication
/// Requires a valid panel bearer token.
///
/// # Path Parameters
/// - `id`: CloudNet node unique id
///
/// # Returns
/// - `200 OK`: The transformed node
/// - `401 Unauthorized`: Missing or invalid panel token
/// - `503 Service Unavailable`: CloudNet disabled or unreachable
#[utoipa::path(
    get,
    path = "/api/nodes/{id}",
    tag = NODE_TAG,
    params(
        ("id" = String, Path, description = "CloudNet node unique id")
    ),
    responses(
        (status = 200, description = "The transformed node", body = NodeDto),
        (status = 401, description = "Missing or invalid panel token", body = ErrorDto),
        (status = 503, description = "CloudNet disabled or unavailable", body = UnavailableDto)
    ),
)]
pub async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(state.token_validator.as_ref(), &headers).require()?;

    let cloudnet = state.cloudnet.clone();
    let outcome = FallbackGateway::new(&state)
        .execute(|| async move {
            let node = cloudnet.get_node(&id).await?;
            Ok(transform_node(&node, Utc::now()))
        })
        .await?;

    Ok(outcome)
}
