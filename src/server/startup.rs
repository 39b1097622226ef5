use std::sync::Arc;

use crate::server::{
    config::Config,
    error::AppError,
    middleware::auth::StaticTokenValidator,
    service::cloudnet::{cache::ResponseCache, monitor::ConnectivityMonitor, CloudNetClient},
    state::AppState,
};

/// Builds the HTTP client used for CloudNet API requests.
///
/// Configured with the request timeout from configuration and with redirects
/// disabled to prevent SSRF vulnerabilities.
///
/// # Arguments
/// - `config` - Application configuration containing the CloudNet timeout
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured HTTP client
/// - `Err(AppError)` - Client construction failed
pub fn setup_reqwest_client(config: &Config) -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .timeout(config.cloudnet.timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Wires the CloudNet resilience services into the shared application state.
///
/// Constructs the upstream client, the connectivity monitor around it, the
/// response cache, and the panel token validator. The monitor is returned
/// unstarted; the bootstrap decides when probing begins.
pub fn setup_app_state(config: &Config, http_client: reqwest::Client) -> AppState {
    let cloudnet = Arc::new(CloudNetClient::new(http_client, config.cloudnet.clone()));
    let monitor = Arc::new(ConnectivityMonitor::new(cloudnet.clone()));
    let cache = Arc::new(ResponseCache::new());
    let token_validator = Arc::new(StaticTokenValidator::new(config.panel_api_token.clone()));

    AppState::new(cloudnet, monitor, cache, token_validator)
}
