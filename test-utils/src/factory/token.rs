use serde_json::{json, Value};

/// Builds a CloudNet token-endpoint response body.
pub fn token_pair(access_token: &str, refresh_token: &str, expires_in: i64) -> Value {
    json!({
        "accessToken": {
            "token": access_token,
            "expiresIn": expires_in,
        },
        "refreshToken": {
            "token": refresh_token,
        },
    })
}
