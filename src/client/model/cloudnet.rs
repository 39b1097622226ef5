//! Browser-side CloudNet connectivity state and broadcasts.
//!
//! Every UI consumer learns about upstream unavailability the same way: the
//! response helpers detect the structured 503 shapes once, then broadcast a
//! process-wide signal here. Components subscribe to the signal (or to the
//! polled status context) instead of re-implementing detection per call
//! site.

use chrono::{DateTime, Utc};
use dioxus::prelude::*;

use crate::model::cloudnet::CloudNetStatusDto;

#[cfg(feature = "web")]
use crate::client::api::cloudnet::get_health;

/// A gated payload as unwrapped for page consumption: the data itself plus
/// degradation metadata when it was served from the backend cache.
#[derive(Clone)]
pub struct Gated<T> {
    pub data: T,
    pub fallback: Option<FallbackInfo>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FallbackInfo {
    pub warning: String,
    pub last_update: DateTime<Utc>,
    pub status: CloudNetStatusDto,
}

/// What the client currently knows about CloudNet, fed by the health
/// endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct CloudNetStatus {
    pub connected: bool,
    pub enabled: bool,
    pub base_url: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for CloudNetStatus {
    fn default() -> Self {
        Self {
            connected: false,
            enabled: false,
            base_url: None,
            error: None,
            loading: true,
        }
    }
}

/// Process-wide connectivity broadcasts, the equivalent of the custom
/// browser events a JS panel would dispatch on `window`.
#[derive(Clone, Debug, PartialEq)]
pub enum CloudNetSignal {
    /// CloudNet is enabled but could not be reached and no cached data was
    /// available.
    Unavailable {
        error: String,
        message: Option<String>,
    },
    /// CloudNet integration is turned off in the panel configuration.
    Disabled { error: String },
}

/// The most recent broadcast, if any. Cleared when connectivity recovers.
pub static CLOUDNET_SIGNAL: GlobalSignal<Option<CloudNetSignal>> = Signal::global(|| None);

pub fn broadcast(signal: CloudNetSignal) {
    *CLOUDNET_SIGNAL.write() = Some(signal);
}

pub fn clear_signal() {
    *CLOUDNET_SIGNAL.write() = None;
}

/// Shared connectivity context provided at the app root.
///
/// Holds the polled health status and whether the full error page is shown.
/// The error page is only triggered explicitly; the banner alone covers
/// ordinary degraded operation so cached views stay reachable.
#[derive(Clone, Copy)]
pub struct CloudNetContext {
    status: Signal<CloudNetStatus>,
    show_error_page: Signal<bool>,
}

impl CloudNetContext {
    pub fn new() -> Self {
        Self {
            status: Signal::new(CloudNetStatus::default()),
            show_error_page: Signal::new(false),
        }
    }

    pub fn status(&self) -> CloudNetStatus {
        self.status.read().clone()
    }

    pub fn show_error_page(&self) -> bool {
        *self.show_error_page.read()
    }

    pub fn set_show_error_page(&mut self, show: bool) {
        self.show_error_page.set(show);
    }

    /// Re-queries the health endpoint and stores the result.
    ///
    /// A recovered connection also clears any lingering unavailability
    /// broadcast so the banner disappears.
    #[cfg(feature = "web")]
    pub async fn refresh(&mut self) {
        self.status.write().loading = true;

        let next = match get_health().await {
            Ok(health) => CloudNetStatus {
                connected: health.connected,
                enabled: health.enabled,
                base_url: Some(health.base_url),
                error: health.error,
                loading: false,
            },
            Err(err) => CloudNetStatus {
                connected: false,
                enabled: false,
                base_url: None,
                error: Some(err.message),
                loading: false,
            },
        };

        if next.connected {
            clear_signal();
        }
        self.status.set(next);
    }
}

impl Default for CloudNetContext {
    fn default() -> Self {
        Self::new()
    }
}
