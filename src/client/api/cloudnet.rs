use crate::{
    client::{
        api::helper::{get, send_request},
        model::error::ApiError,
    },
    model::cloudnet::HealthDto,
};

/// Queries the CloudNet health endpoint.
///
/// The backend answers with the same body shape on 200 and 503, so both are
/// parsed rather than routed through the generic error path.
pub async fn get_health() -> Result<HealthDto, ApiError> {
    let response = send_request(get("/api/cloudnet/health")).await?;
    let status = response.status() as u64;

    let text = response.text().await.map_err(|e| ApiError {
        status: 500,
        message: format!("Failed to read response: {}", e),
    })?;

    serde_json::from_str(&text).map_err(|_| ApiError {
        status,
        message: "Unable to check CloudNet status".to_string(),
    })
}
