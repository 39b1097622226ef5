use dioxus::prelude::*;
use dioxus_free_icons::{icons::fa_solid_icons::FaTriangleExclamation, Icon};

use crate::client::model::cloudnet::CloudNetContext;

/// Full-page error view for total CloudNet unavailability.
///
/// Shown only when explicitly triggered through the connectivity context;
/// ordinary disconnections keep the banner so cached views stay reachable.
#[component]
pub fn CloudNetErrorPage() -> Element {
    let mut context = use_context::<CloudNetContext>();
    let status = context.status();

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen gap-4 p-8 text-center",
            Icon { icon: FaTriangleExclamation, width: 48, height: 48 }
            h1 {
                class: "text-2xl font-bold",
                "CloudNet Is Not Available"
            }
            p {
                class: "max-w-md",
                if status.enabled {
                    "The panel could not reach the CloudNet REST API and no cached data is available."
                } else {
                    "CloudNet integration is disabled in the panel configuration."
                }
            }
            if let Some(error) = status.error.clone() {
                p {
                    class: "text-sm opacity-70",
                    "{error}"
                }
            }
            if let Some(base_url) = status.base_url.clone() {
                p {
                    class: "text-sm opacity-70",
                    "API endpoint: {base_url}"
                }
            }
            button {
                class: "btn btn-primary",
                onclick: move |_| {
                    context.set_show_error_page(false);
                    #[cfg(feature = "web")]
                    {
                        let mut context = context;
                        spawn(async move {
                            context.refresh().await;
                        });
                    }
                },
                "Back to panel"
            }
        }
    }
}
