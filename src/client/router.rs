use dioxus::prelude::*;

use crate::client::component::Layout;
use crate::client::route::{Nodes, NotFound, Servers};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Servers {},

    #[route("/nodes")]
    Nodes {},

    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
