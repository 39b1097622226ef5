use dioxus::prelude::*;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen gap-2",
            h1 {
                class: "text-3xl font-bold",
                "404"
            }
            p { "This page does not exist." }
        }
    }
}
