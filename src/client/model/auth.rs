//! Panel credential storage on the browser side.
//!
//! The panel token is deposited here by whatever login flow issued it and is
//! attached to every outgoing API request by the request helpers. A
//! session-expiry broadcast clears it so stale credentials are never
//! re-sent.

use dioxus::prelude::*;

/// The stored panel bearer credential, if any.
pub static AUTH_TOKEN: GlobalSignal<Option<String>> = Signal::global(|| None);

/// Raised when the backend rejects our credential; consumers redirect to
/// login or show a prompt.
pub static SESSION_EXPIRED: GlobalSignal<bool> = Signal::global(|| false);

pub fn store_credentials(token: String) {
    *AUTH_TOKEN.write() = Some(token);
    *SESSION_EXPIRED.write() = false;
}

/// Clears the stored credential and raises the session-expired signal.
pub fn broadcast_session_expired() {
    *AUTH_TOKEN.write() = None;
    *SESSION_EXPIRED.write() = true;
}
