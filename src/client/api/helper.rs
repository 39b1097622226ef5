//! Request/response helpers shared by every API call.
//!
//! Outgoing requests pick up the stored panel credential automatically.
//! Incoming responses pass through a single detection point
//! ([`error_from_response`]) that recognizes the backend's structured
//! connectivity errors and session expiry, broadcasting the matching
//! process-wide signal so call sites never re-implement detection. The
//! client never retries; retry policy lives server-side in the upstream
//! client.

use dioxus::prelude::ReadableExt;
use reqwasm::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::{
    client::model::{
        auth,
        cloudnet::{broadcast, CloudNetSignal, FallbackInfo, Gated},
        error::ApiError,
    },
    model::{
        api::ErrorDto,
        cloudnet::{
            DegradedDto, UnavailableDto, CODE_CLOUDNET_DISABLED, CODE_CLOUDNET_UNAVAILABLE,
        },
    },
};

/// Attaches the stored panel credential, if any.
fn with_auth(request: Request) -> Request {
    match auth::AUTH_TOKEN.read().as_ref() {
        Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
        None => request,
    }
}

/// Create a GET request carrying the panel credential
pub fn get(url: &str) -> Request {
    with_auth(Request::get(url))
}

/// Create a POST request carrying the panel credential
pub fn post(url: &str) -> Request {
    with_auth(Request::post(url)).header("Content-Type", "application/json")
}

/// Send a request and handle common errors
pub async fn send_request(request: Request) -> Result<Response, ApiError> {
    request.send().await.map_err(|e| ApiError {
        status: 500,
        message: format!("Failed to send request: {}", e),
    })
}

/// Parse an API response with consistent error handling
pub async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status() as u64;

    if (200..300).contains(&status) {
        response.json::<T>().await.map_err(|e| ApiError {
            status: 500,
            message: format!("Failed to parse response: {}", e),
        })
    } else {
        Err(error_from_response(status, response).await)
    }
}

/// Parse a gated response, unwrapping the degraded envelope when the backend
/// served cached data.
pub async fn parse_gated<T: DeserializeOwned>(response: Response) -> Result<Gated<T>, ApiError> {
    let status = response.status() as u64;

    if !(200..300).contains(&status) {
        return Err(error_from_response(status, response).await);
    }

    let text = response.text().await.map_err(|e| ApiError {
        status: 500,
        message: format!("Failed to read response: {}", e),
    })?;

    // Degraded payloads arrive wrapped; live ones are the bare DTO.
    if let Ok(envelope) = serde_json::from_str::<DegradedDto>(&text) {
        if envelope.fallback_mode {
            let data = serde_json::from_value(envelope.data).map_err(|e| ApiError {
                status: 500,
                message: format!("Failed to parse cached payload: {}", e),
            })?;
            return Ok(Gated {
                data,
                fallback: Some(FallbackInfo {
                    warning: envelope.warning,
                    last_update: envelope.last_update,
                    status: envelope.cloudnet_status,
                }),
            });
        }
    }

    let data = serde_json::from_str(&text).map_err(|e| ApiError {
        status: 500,
        message: format!("Failed to parse response: {}", e),
    })?;

    Ok(Gated {
        data,
        fallback: None,
    })
}

/// The single detection point for error responses.
///
/// Recognizes the structured 503 connectivity shapes and 401 session
/// failures, broadcasts the matching signal, and converts everything into
/// an [`ApiError`] for the call site.
async fn error_from_response(status: u64, response: Response) -> ApiError {
    let text = response.text().await.unwrap_or_default();

    if status == 503 {
        if let Ok(unavailable) = serde_json::from_str::<UnavailableDto>(&text) {
            match unavailable.error.code.as_str() {
                CODE_CLOUDNET_UNAVAILABLE => broadcast(CloudNetSignal::Unavailable {
                    error: unavailable.error.message.clone(),
                    message: unavailable.error.details.clone(),
                }),
                CODE_CLOUDNET_DISABLED => broadcast(CloudNetSignal::Disabled {
                    error: unavailable.error.message.clone(),
                }),
                _ => {}
            }

            return ApiError {
                status,
                message: unavailable.error.message,
            };
        }
    }

    let message = match serde_json::from_str::<ErrorDto>(&text) {
        Ok(dto) => dto.error,
        Err(_) if !text.is_empty() => text,
        Err(_) => "Unknown error".to_string(),
    };

    if status == 401
        && (message == "Access token required" || message == "Invalid or expired token")
    {
        auth::broadcast_session_expired();
    }

    ApiError { status, message }
}
