use crate::{
    client::{
        api::helper::{get, parse_gated, parse_response, post, send_request},
        model::{cloudnet::Gated, error::ApiError},
    },
    model::{api::MessageDto, server::ServerDto},
};

pub async fn get_servers() -> Result<Gated<Vec<ServerDto>>, ApiError> {
    let response = send_request(get("/api/servers")).await?;
    parse_gated(response).await
}

pub async fn start_server(id: &str) -> Result<MessageDto, ApiError> {
    let url = format!("/api/servers/{}/start", id);
    let response = send_request(post(&url)).await?;
    parse_response(response).await
}

pub async fn stop_server(id: &str) -> Result<MessageDto, ApiError> {
    let url = format!("/api/servers/{}/stop", id);
    let response = send_request(post(&url)).await?;
    parse_response(response).await
}

pub async fn restart_server(id: &str) -> Result<MessageDto, ApiError> {
    let url = format!("/api/servers/{}/restart", id);
    let response = send_request(post(&url)).await?;
    parse_response(response).await
}
