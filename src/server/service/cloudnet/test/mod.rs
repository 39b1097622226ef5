mod cache;
mod client;
mod monitor;

use std::time::Duration;

use super::CloudNetClient;
use crate::server::config::CloudNetConfig;

/// CloudNet settings pointed at a mock upstream, with short timeouts and
/// delays so retry behavior is observable without slowing the suite down.
pub(crate) fn test_config(base_url: &str) -> CloudNetConfig {
    CloudNetConfig {
        enabled: true,
        base_url: base_url.to_string(),
        api_key: None,
        username: Some("panel".to_string()),
        password: Some("secret".to_string()),
        timeout: Duration::from_secs(1),
        retries: 2,
        retry_delay: Duration::from_millis(20),
    }
}

pub(crate) fn test_client(base_url: &str) -> CloudNetClient {
    CloudNetClient::new(reqwest::Client::new(), test_config(base_url))
}

pub(crate) fn disabled_client() -> CloudNetClient {
    let config = CloudNetConfig {
        enabled: false,
        ..test_config("http://127.0.0.1:9")
    };
    CloudNetClient::new(reqwest::Client::new(), config)
}
