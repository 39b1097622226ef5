//! CloudNet REST API integration and connectivity resilience.
//!
//! This module owns everything that talks to, or reasons about, the external
//! CloudNet control plane:
//!
//! - **Client** (`CloudNetClient`) - Authenticated HTTP client with token
//!   lifecycle and bounded retry for transient failures
//! - **Monitor** (`monitor`) - Periodic health probing and the shared
//!   connectivity state
//! - **Cache** (`cache`) - Last-known-good responses per resource kind for
//!   degraded service
//! - **Transform** (`transform`) - Pure mappers from CloudNet record shapes
//!   to panel view models
//!
//! Controllers never use the client directly for gated data; they go through
//! the fallback gateway in `middleware::fallback`, which consults the monitor
//! and cache around every live fetch.

pub mod cache;
pub mod monitor;
pub mod session;
pub mod transform;

#[cfg(test)]
mod test;

use chrono::Utc;
use dioxus_logger::tracing;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::server::{
    config::CloudNetConfig,
    error::upstream::UpstreamError,
    service::cloudnet::{
        session::{AuthSession, TokenPairDto},
        transform::{NodeEntry, ServiceSnapshot},
    },
};

/// Authenticated HTTP client for the CloudNet REST API.
///
/// Hides the token lifecycle (obtain, silent refresh, retry-once on 401) and
/// transient-failure retry from callers. The auth session is private to this
/// client; nothing outside it ever sees a token.
pub struct CloudNetClient {
    http: reqwest::Client,
    config: CloudNetConfig,
    session: Mutex<AuthSession>,
}

impl CloudNetClient {
    pub fn new(http: reqwest::Client, config: CloudNetConfig) -> Self {
        Self {
            http,
            config,
            session: Mutex::new(AuthSession::default()),
        }
    }

    /// Whether CloudNet integration is turned on in configuration.
    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Performs an authenticated JSON request against CloudNet.
    ///
    /// Guarantees before the request leaves: integration is enabled and a
    /// usable bearer token is attached (obtained or refreshed as needed).
    /// Failure handling:
    ///
    /// - 401: one token refresh followed by one retry of the original call.
    ///   A failed refresh clears the whole session and propagates the 401.
    /// - Connection refused, timeout, 5xx: retried up to the configured
    ///   count with a fixed delay between attempts.
    /// - Any other non-success status or a malformed body fails immediately.
    ///
    /// An empty response body maps to `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, UpstreamError> {
        if !self.config.enabled {
            return Err(UpstreamError::Disabled);
        }

        let url = format!("{}{}", self.config.base_url, path);
        let mut attempts_left = self.config.retries;
        let mut refreshed = false;

        loop {
            let token = self.ensure_token().await?;

            let mut request = self.http.request(method.clone(), &url).bearer_auth(&token);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::UNAUTHORIZED && !refreshed {
                        refreshed = true;
                        if self.refresh_after_unauthorized().await {
                            continue;
                        }
                        return Err(UpstreamError::Auth {
                            status: status.as_u16(),
                        });
                    }

                    if status.is_server_error() && attempts_left > 0 {
                        attempts_left -= 1;
                        tracing::warn!(
                            "CloudNet returned {} for {} {}, retrying ({} attempts remaining)",
                            status,
                            method,
                            path,
                            attempts_left + 1
                        );
                        tokio::time::sleep(self.config.retry_delay).await;
                        continue;
                    }

                    if status == StatusCode::UNAUTHORIZED {
                        return Err(UpstreamError::Auth {
                            status: status.as_u16(),
                        });
                    }

                    if !status.is_success() {
                        let body = response.text().await.unwrap_or_default();
                        return Err(UpstreamError::UnexpectedStatus {
                            status: status.as_u16(),
                            body,
                        });
                    }

                    let text = response.text().await?;
                    if text.is_empty() {
                        return Ok(Value::Null);
                    }
                    return Ok(serde_json::from_str(&text)?);
                }
                Err(err) if (err.is_connect() || err.is_timeout()) && attempts_left > 0 => {
                    attempts_left -= 1;
                    tracing::warn!(
                        "CloudNet request {} {} failed ({}), retrying ({} attempts remaining)",
                        method,
                        path,
                        err,
                        attempts_left + 1
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(err) => return Err(UpstreamError::Http(err)),
            }
        }
    }

    /// Lightweight reachability check used by the connectivity monitor.
    pub async fn health(&self) -> Result<(), UpstreamError> {
        self.request(Method::GET, "/ping", None).await?;
        Ok(())
    }

    /// Lists all services. CloudNet wraps the list as `{"services": [...]}`.
    pub async fn get_services(&self) -> Result<Vec<ServiceSnapshot>, UpstreamError> {
        let response = self.request(Method::GET, "/service", None).await?;
        Ok(unwrap_list(response, "services")?)
    }

    pub async fn get_service(&self, id: &str) -> Result<ServiceSnapshot, UpstreamError> {
        let response = self
            .request(Method::GET, &format!("/service/{}", id), None)
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    pub async fn start_service(&self, id: &str) -> Result<(), UpstreamError> {
        self.lifecycle(id, "start").await
    }

    pub async fn stop_service(&self, id: &str) -> Result<(), UpstreamError> {
        self.lifecycle(id, "stop").await
    }

    pub async fn restart_service(&self, id: &str) -> Result<(), UpstreamError> {
        self.lifecycle(id, "restart").await
    }

    /// Lists all cluster nodes. CloudNet wraps the list as `{"nodes": [...]}`.
    pub async fn get_nodes(&self) -> Result<Vec<NodeEntry>, UpstreamError> {
        let response = self.request(Method::GET, "/cluster", None).await?;
        Ok(unwrap_list(response, "nodes")?)
    }

    pub async fn get_node(&self, id: &str) -> Result<NodeEntry, UpstreamError> {
        let response = self
            .request(Method::GET, &format!("/cluster/{}", id), None)
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn lifecycle(&self, id: &str, target: &str) -> Result<(), UpstreamError> {
        self.request(
            Method::PATCH,
            &format!("/service/{}/lifecycle?target={}", id, target),
            None,
        )
        .await?;
        Ok(())
    }

    /// Returns a bearer credential that is valid for at least the refresh
    /// margin.
    ///
    /// A configured API key is used as-is. Otherwise the session token is
    /// reused while usable; an expiring token is silently refreshed, falling
    /// back to full authentication when no refresh token exists or the
    /// refresh fails.
    async fn ensure_token(&self) -> Result<String, UpstreamError> {
        if let Some(api_key) = &self.config.api_key {
            return Ok(api_key.clone());
        }

        let mut session = self.session.lock().await;

        if let Some(token) = session.usable_token(Utc::now()) {
            return Ok(token);
        }

        if let Some(refresh_token) = session.refresh_token() {
            match self.refresh_locked(&mut session, &refresh_token).await {
                Ok(token) => return Ok(token),
                Err(err) => {
                    tracing::warn!("CloudNet token refresh failed, re-authenticating: {}", err);
                }
            }
        }

        self.authenticate_locked(&mut session).await
    }

    /// Reacts to a 401 on a live request: one refresh attempt, nothing more.
    ///
    /// Returns true when the refresh succeeded and the original request
    /// should be retried. On failure (including a missing refresh token) the
    /// whole session is cleared so the next call re-authenticates from
    /// scratch.
    async fn refresh_after_unauthorized(&self) -> bool {
        if self.config.api_key.is_some() {
            // Static keys cannot be refreshed.
            return false;
        }

        let mut session = self.session.lock().await;

        let Some(refresh_token) = session.refresh_token() else {
            session.clear();
            return false;
        };

        match self.refresh_locked(&mut session, &refresh_token).await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!("CloudNet token refresh after 401 failed: {}", err);
                session.clear();
                false
            }
        }
    }

    async fn authenticate_locked(
        &self,
        session: &mut AuthSession,
    ) -> Result<String, UpstreamError> {
        let (Some(username), Some(password)) = (&self.config.username, &self.config.password)
        else {
            return Err(UpstreamError::MissingCredentials);
        };

        let response = self
            .http
            .post(format!("{}/auth", self.config.base_url))
            .basic_auth(username, Some(password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Auth {
                status: status.as_u16(),
            });
        }

        let pair: TokenPairDto = serde_json::from_str(&response.text().await?)?;
        Ok(session.install(pair, Utc::now()))
    }

    async fn refresh_locked(
        &self,
        session: &mut AuthSession,
        refresh_token: &str,
    ) -> Result<String, UpstreamError> {
        let response = self
            .http
            .post(format!("{}/auth/refresh", self.config.base_url))
            .bearer_auth(refresh_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Auth {
                status: status.as_u16(),
            });
        }

        let pair: TokenPairDto = serde_json::from_str(&response.text().await?)?;
        Ok(session.install(pair, Utc::now()))
    }

    /// Test seam: whether the auth session currently holds any token state.
    #[cfg(test)]
    pub(crate) async fn session_is_empty(&self) -> bool {
        self.session.lock().await.is_empty()
    }

    /// Test seam: installs a token pair as if it had just been obtained.
    #[cfg(test)]
    pub(crate) async fn set_session(&self, access_token: &str, refresh_token: &str, expires_in: i64) {
        use crate::server::service::cloudnet::session::{AccessTokenDto, RefreshTokenDto};

        let mut session = self.session.lock().await;
        session.install(
            TokenPairDto {
                access_token: AccessTokenDto {
                    token: access_token.to_string(),
                    expires_in,
                },
                refresh_token: RefreshTokenDto {
                    token: refresh_token.to_string(),
                },
            },
            Utc::now(),
        );
    }
}

/// CloudNet list endpoints wrap their payload (`{"services": [...]}`); older
/// deployments return the bare array. Accept both.
fn unwrap_list<T: serde::de::DeserializeOwned>(
    response: Value,
    key: &str,
) -> Result<Vec<T>, serde_json::Error> {
    let list = match response {
        Value::Object(mut map) => match map.remove(key) {
            Some(list) => list,
            None => Value::Object(map),
        },
        other => other,
    };
    serde_json::from_value(list)
}
