use dioxus::prelude::*;

use crate::client::{constant::SITE_NAME, model::cloudnet::CloudNetContext, router::Route};

#[component]
pub fn App() -> Element {
    let context = use_context_provider(CloudNetContext::new);

    // Check CloudNet connectivity on first load.
    #[cfg(feature = "web")]
    {
        use_future(move || {
            let mut context = context;
            async move {
                context.refresh().await;
            }
        });
    }
    #[cfg(not(feature = "web"))]
    let _ = context;

    rsx! {
        Title { "{SITE_NAME}" }
        document::Meta {
            name: "description",
            content: " Web-based administrative panel for a CloudNet game-server cluster "
        }
        Router::<Route> {}
    }
}
