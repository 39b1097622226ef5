use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::server::error::{auth::AuthError, AppError};

/// A panel user as established by the token validator.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub name: String,
    pub admin: bool,
}

/// Validates panel bearer credentials.
///
/// Token issuance and verification live outside this service; the guard only
/// needs something that can turn a presented credential into a user. The
/// application installs one implementation at startup, tests install their
/// own.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Validator comparing against the single shared panel token from
/// configuration.
pub struct StaticTokenValidator {
    token: String,
}

impl StaticTokenValidator {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

impl TokenValidator for StaticTokenValidator {
    fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if token == self.token {
            Ok(AuthenticatedUser {
                name: "panel-admin".to_string(),
                admin: true,
            })
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

/// Per-request authentication guard for gated endpoints.
///
/// Extracts the bearer credential from the request headers and delegates
/// validation to the injected [`TokenValidator`].
pub struct AuthGuard<'a> {
    validator: &'a dyn TokenValidator,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(validator: &'a dyn TokenValidator, headers: &'a HeaderMap) -> Self {
        Self { validator, headers }
    }

    /// Requires a valid bearer token, returning the authenticated user.
    pub fn require(&self) -> Result<AuthenticatedUser, AppError> {
        let token = self
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;

        Ok(self.validator.validate(token)?)
    }
}
