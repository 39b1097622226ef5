use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::{
    client::{
        constant::SITE_NAME,
        model::{cache::Cache, cloudnet::Gated},
    },
    model::{node::NodeDto, server::ServerStatus},
};

#[cfg(feature = "web")]
use crate::client::api::node::get_nodes;

#[component]
pub fn Nodes() -> Element {
    let mut cache = use_signal(Cache::<Gated<Vec<NodeDto>>>::default);

    #[cfg(feature = "web")]
    let future = use_resource(move || async move { get_nodes().await });

    #[cfg(feature = "web")]
    use_effect(move || {
        if let Some(result) = future.read_unchecked().as_ref() {
            match result {
                Ok(nodes) => cache.set(Cache::Fetched(nodes.clone())),
                Err(err) => {
                    tracing::error!("Failed to fetch nodes: {}", err);
                    cache.set(Cache::Error(err.clone()));
                }
            }
        }
    });

    rsx! {
        Title { "Nodes | {SITE_NAME}" }
        div {
            class: "p-6 flex flex-col gap-4",
            h1 {
                class: "text-2xl font-bold",
                "Cluster Nodes"
            }
            if let Some(gated) = cache.read().data().cloned() {
                if let Some(fallback) = &gated.fallback {
                    div {
                        class: "alert alert-warning",
                        "{fallback.warning} (last update {fallback.last_update})"
                    }
                }
                NodeTable { nodes: gated.data.clone() }
            } else if let Some(err) = cache.read().error().cloned() {
                div {
                    class: "alert alert-error",
                    "{err.message}"
                }
            } else {
                span { class: "loading loading-spinner loading-lg self-center" }
            }
        }
    }
}

#[component]
fn NodeTable(nodes: Vec<NodeDto>) -> Element {
    rsx! {
        div {
            class: "card bg-base-200",
            div {
                class: "card-body overflow-x-auto",
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Status" }
                            th { "IP" }
                            th { "CPU" }
                            th { "RAM" }
                            th { "Servers" }
                            th { "Uptime" }
                            th { "Location" }
                        }
                    }
                    tbody {
                        for node in nodes {
                            NodeRow { node }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NodeRow(node: NodeDto) -> Element {
    let badge = if node.status == ServerStatus::Online {
        "badge badge-success"
    } else {
        "badge badge-error"
    };
    let status_text = node.status.as_str();

    rsx! {
        tr {
            td { "{node.name}" }
            td {
                span { class: "{badge}", "{status_text}" }
            }
            td { "{node.ip}" }
            td { "{node.cpu}%" }
            td { "{node.ram} GB" }
            td { "{node.servers}/{node.max_servers}" }
            td { "{node.uptime}" }
            td { "{node.location}" }
        }
    }
}
