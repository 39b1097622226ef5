use dioxus::prelude::*;
use dioxus_free_icons::{
    icons::fa_solid_icons::{FaNetworkWired, FaServer},
    Icon,
};

use crate::client::{
    constant::SITE_NAME,
    model::auth::{store_credentials, AUTH_TOKEN, SESSION_EXPIRED},
    router::Route,
};

#[component]
pub fn Header() -> Element {
    let has_token = AUTH_TOKEN.read().is_some();
    let session_expired = *SESSION_EXPIRED.read();

    rsx! {
        div {
            class: "navbar bg-base-300 px-4",
            div {
                class: "flex-1",
                Link {
                    class: "text-lg font-bold",
                    to: Route::Servers {},
                    "{SITE_NAME}"
                }
            }
            div {
                class: "flex-none flex items-center gap-2",
                if session_expired {
                    span { class: "badge badge-warning", "Session expired" }
                }
                // The login flow lives outside this panel; it deposits the
                // issued token here.
                if !has_token {
                    input {
                        class: "input input-sm input-bordered w-44",
                        r#type: "password",
                        placeholder: "API token",
                        onchange: move |event| {
                            let token = event.value();
                            if !token.is_empty() {
                                store_credentials(token);
                            }
                        },
                    }
                }
                Link {
                    class: "btn btn-ghost btn-sm",
                    to: Route::Servers {},
                    Icon { icon: FaServer, width: 16, height: 16 }
                    "Servers"
                }
                Link {
                    class: "btn btn-ghost btn-sm",
                    to: Route::Nodes {},
                    Icon { icon: FaNetworkWired, width: 16, height: 16 }
                    "Nodes"
                }
            }
        }
    }
}
