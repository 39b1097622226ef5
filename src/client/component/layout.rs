use dioxus::prelude::*;

use crate::client::{
    component::{CloudNetErrorPage, CloudNetStatusBanner, Header},
    model::cloudnet::{CloudNetContext, CloudNetSignal, CLOUDNET_SIGNAL},
    router::Route,
};

#[component]
pub fn Layout() -> Element {
    let mut context = use_context::<CloudNetContext>();

    // A disabled broadcast is the explicit trigger for the full error page;
    // plain unavailability keeps the banner so cached views stay reachable.
    use_effect(move || {
        if let Some(CloudNetSignal::Disabled { .. }) = &*CLOUDNET_SIGNAL.read() {
            context.set_show_error_page(true);
        }
    });

    if context.show_error_page() {
        return rsx! { CloudNetErrorPage {} };
    }

    rsx!(div {
        Header {}
        CloudNetStatusBanner {}
        Outlet::<Route> {}
    })
}
