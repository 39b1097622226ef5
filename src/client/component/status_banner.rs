use dioxus::prelude::*;
use dioxus_free_icons::{
    icons::fa_solid_icons::{FaRotate, FaTriangleExclamation},
    Icon,
};

use crate::client::model::cloudnet::{CloudNetContext, CloudNetSignal, CLOUDNET_SIGNAL};

/// Persistent banner shown while CloudNet is unreachable.
///
/// Deliberately not a full-page block: degraded/cached views stay usable
/// underneath. Renders nothing while everything is connected.
#[component]
pub fn CloudNetStatusBanner() -> Element {
    let context = use_context::<CloudNetContext>();
    let status = context.status();

    let signal = CLOUDNET_SIGNAL.read().clone();
    let disconnected = status.enabled && !status.connected && !status.loading;

    if !disconnected && signal.is_none() {
        return rsx! {};
    }

    let detail = match &signal {
        Some(CloudNetSignal::Unavailable { error, .. }) => error.clone(),
        Some(CloudNetSignal::Disabled { error }) => error.clone(),
        None => status
            .error
            .clone()
            .unwrap_or_else(|| "Unable to connect to the CloudNet REST API.".to_string()),
    };

    rsx! {
        div {
            class: "alert alert-error rounded-none flex items-center justify-between px-4 py-3",
            div {
                class: "flex items-center gap-3",
                Icon { icon: FaTriangleExclamation, width: 20, height: 20 }
                div {
                    p {
                        class: "font-medium",
                        "CloudNet API Connection Lost"
                    }
                    p {
                        class: "text-sm",
                        "{detail} Some features may be unavailable."
                    }
                }
            }
            button {
                class: "btn btn-sm",
                onclick: move |_| {
                    #[cfg(feature = "web")]
                    {
                        let mut context = context;
                        spawn(async move {
                            context.refresh().await;
                        });
                    }
                },
                Icon { icon: FaRotate, width: 16, height: 16 }
                "Retry"
            }
        }
    }
}
