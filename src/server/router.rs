use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, state::AppState};

#[derive(OpenApi)]
#[openapi(info(
    title = "CloudPanel API",
    description = "Administrative panel API for a CloudNet game-server cluster"
))]
struct ApiDoc;

pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::cloudnet::health))
        .routes(routes!(controller::server::get_servers))
        .routes(routes!(controller::server::get_server))
        .routes(routes!(controller::server::start_server))
        .routes(routes!(controller::server::stop_server))
        .routes(routes!(controller::server::restart_server))
        .routes(routes!(controller::node::get_nodes))
        .routes(routes!(controller::node::get_node))
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
