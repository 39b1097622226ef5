use thiserror::Error;

/// Failures talking to the CloudNet REST API.
///
/// The variants split along the retry policy: `Http` errors that are
/// connection or timeout failures and 5xx `UnexpectedStatus` responses are
/// retried by the client's bounded retry loop; everything else fails the
/// request immediately.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// CloudNet integration is turned off in configuration.
    ///
    /// Returned before any network attempt. Surfaced to the panel as the
    /// `CLOUDNET_DISABLED` error shape.
    #[error("CloudNet API is disabled in configuration")]
    Disabled,

    /// Neither an API key nor basic-auth credentials are configured.
    ///
    /// Token acquisition cannot proceed; never retried.
    #[error("CloudNet API credentials are not configured")]
    MissingCredentials,

    /// CloudNet rejected our credentials.
    ///
    /// Reached after the single refresh-and-retry pass for a 401, or when
    /// token acquisition itself fails.
    #[error("CloudNet API rejected the request credentials (HTTP {status})")]
    Auth { status: u16 },

    /// CloudNet answered with a non-success status outside the retry policy,
    /// or retries were exhausted on a 5xx.
    #[error("CloudNet API returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Response body was not the JSON shape we expected.
    #[error("Failed to decode CloudNet API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Transport-level failure from reqwest (connection refused, timeout,
    /// TLS, ...). Connection and timeout failures are retried before this
    /// propagates.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
