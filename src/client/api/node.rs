use crate::{
    client::{
        api::helper::{get, parse_gated, send_request},
        model::{cloudnet::Gated, error::ApiError},
    },
    model::node::NodeDto,
};

pub async fn get_nodes() -> Result<Gated<Vec<NodeDto>>, ApiError> {
    let response = send_request(get("/api/nodes")).await?;
    parse_gated(response).await
}
