use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no bearer credential.
    ///
    /// Every gated panel endpoint requires an `Authorization: Bearer` header.
    /// Results in a 401 Unauthorized response.
    #[error("Access token required")]
    MissingToken,

    /// The bearer credential was rejected by the token validator.
    ///
    /// Results in a 401 Unauthorized response. The client treats this
    /// message as a session-expiry signal, so the wording is part of the
    /// wire contract.
    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Converts authentication errors into HTTP responses.
///
/// Both variants map to 401 Unauthorized. The error strings are matched
/// verbatim by the browser client to distinguish session expiry from
/// upstream unavailability, so they must not change without updating the
/// client's response interceptor.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
