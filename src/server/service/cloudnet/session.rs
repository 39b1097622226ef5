use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Tokens must outlive this margin to be considered usable; anything closer
/// to expiry is refreshed before the request is sent.
const REFRESH_MARGIN_SECONDS: i64 = 30;

/// Token pair returned by CloudNet's `/auth` and `/auth/refresh` endpoints.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairDto {
    pub access_token: AccessTokenDto,
    pub refresh_token: RefreshTokenDto,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenDto {
    pub token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
}

#[derive(Deserialize, Debug)]
pub struct RefreshTokenDto {
    pub token: String,
}

/// The CloudNet token session owned by the upstream client.
///
/// A non-empty `access_token` always has `expiry` set (both are installed
/// together from a token pair). The session is cleared wholesale when a
/// refresh fails, forcing full re-authentication on the next call.
#[derive(Default)]
pub struct AuthSession {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expiry: Option<DateTime<Utc>>,
}

impl AuthSession {
    /// Returns the access token if it is present and not within the refresh
    /// margin of its expiry.
    pub fn usable_token(&self, now: DateTime<Utc>) -> Option<String> {
        let token = self.access_token.as_ref()?;
        let expiry = self.expiry?;

        if expiry - now > Duration::seconds(REFRESH_MARGIN_SECONDS) {
            Some(token.clone())
        } else {
            None
        }
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.refresh_token.clone()
    }

    /// Installs a freshly obtained token pair, replacing any previous state.
    pub fn install(&mut self, pair: TokenPairDto, now: DateTime<Utc>) -> String {
        let token = pair.access_token.token.clone();
        self.expiry = Some(now + Duration::seconds(pair.access_token.expires_in));
        self.access_token = Some(pair.access_token.token);
        self.refresh_token = Some(pair.refresh_token.token);
        token
    }

    /// Drops the whole session. The next request will re-authenticate from
    /// configured credentials.
    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.expiry = None;
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.expiry.is_none()
    }
}
