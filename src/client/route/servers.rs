use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::{
    client::{
        constant::SITE_NAME,
        model::{cache::Cache, cloudnet::Gated},
    },
    model::server::{ServerDto, ServerStatus},
};

#[cfg(feature = "web")]
use crate::client::api::server::{get_servers, restart_server, start_server, stop_server};

#[component]
pub fn Servers() -> Element {
    let mut cache = use_signal(Cache::<Gated<Vec<ServerDto>>>::default);
    let refetch_trigger = use_signal(|| 0u32);

    #[cfg(feature = "web")]
    let future = use_resource(move || async move {
        let _ = refetch_trigger();
        get_servers().await
    });

    #[cfg(feature = "web")]
    use_effect(move || {
        if let Some(result) = future.read_unchecked().as_ref() {
            match result {
                Ok(servers) => cache.set(Cache::Fetched(servers.clone())),
                Err(err) => {
                    tracing::error!("Failed to fetch servers: {}", err);
                    cache.set(Cache::Error(err.clone()));
                }
            }
        }
    });

    rsx! {
        Title { "Servers | {SITE_NAME}" }
        div {
            class: "p-6 flex flex-col gap-4",
            h1 {
                class: "text-2xl font-bold",
                "Servers"
            }
            if let Some(gated) = cache.read().data().cloned() {
                if let Some(fallback) = &gated.fallback {
                    div {
                        class: "alert alert-warning",
                        "{fallback.warning} (last update {fallback.last_update})"
                    }
                }
                ServerTable { servers: gated.data.clone(), refetch_trigger }
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
fn ServerTable(servers: Vec<ServerDto>, refetch_trigger: Signal<u32>) -> Element {
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
                            th { "Type" }
                            th { "Status" }
                            th { "Players" }
                            th { "Node" }
                            th { "Address" }
                            th { "Uptime" }
                            th { "" }
                        }
                    }
                    tbody {
                        for server in servers {
                            ServerRow { server, refetch_trigger }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ServerRow(server: ServerDto, refetch_trigger: Signal<u32>) -> Element {
    let badge = match server.status {
        ServerStatus::Online => "badge badge-success",
        ServerStatus::Offline => "badge badge-error",
        ServerStatus::Starting => "badge badge-warning",
        ServerStatus::Unknown => "badge badge-ghost",
    };
    let status_text = server.status.as_str();

    rsx! {
        tr {
            td { "{server.name}" }
            td { "{server.server_type}" }
            td {
                span { class: "{badge}", "{status_text}" }
            }
            td { "{server.players}/{server.max_players}" }
            td { "{server.node}" }
            td { "{server.ip}:{server.port}" }
            td { "{server.uptime}" }
            td {
                class: "flex gap-1",
                LifecycleButton { label: "Start", server_id: server.id.clone(), action: Lifecycle::Start, refetch_trigger }
                LifecycleButton { label: "Stop", server_id: server.id.clone(), action: Lifecycle::Stop, refetch_trigger }
                LifecycleButton { label: "Restart", server_id: server.id, action: Lifecycle::Restart, refetch_trigger }
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Lifecycle {
    Start,
    Stop,
    Restart,
}

#[component]
fn LifecycleButton(
    label: &'static str,
    server_id: String,
    action: Lifecycle,
    refetch_trigger: Signal<u32>,
) -> Element {
    rsx! {
        button {
            class: "btn btn-xs",
            onclick: move |_| {
                #[cfg(feature = "web")]
                {
                    let id = server_id.clone();
                    let mut trigger = refetch_trigger;
                    spawn(async move {
                        let result = match action {
                            Lifecycle::Start => start_server(&id).await,
                            Lifecycle::Stop => stop_server(&id).await,
                            Lifecycle::Restart => restart_server(&id).await,
                        };
                        match result {
                            Ok(_) => trigger += 1,
                            Err(err) => tracing::error!("Lifecycle action failed: {}", err),
                        }
                    });
                }
            },
            "{label}"
        }
    }
}
