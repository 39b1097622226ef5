//! Pure mappers from CloudNet's native record shapes to the panel's view
//! models.
//!
//! CloudNet snapshots arrive with most fields optional; every mapping here is
//! total over that shape and substitutes explicit defaults (0, "Unknown")
//! instead of failing. The fallback gateway caches the *transformed* payload,
//! so these functions run only on the live path.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::{
    node::NodeDto,
    server::{ServerDto, ServerStatus},
};

const UNKNOWN: &str = "Unknown";

/// A CloudNet service as returned by `GET /service`.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceSnapshot {
    pub service_id: ServiceId,
    pub configuration: ServiceConfiguration,
    pub life_cycle: Option<String>,
    pub properties: ServiceProperties,
    pub process_snapshot: ProcessSnapshot,
    /// Unix timestamp in milliseconds.
    pub creation_time: Option<i64>,
    pub address: Option<HostAndPort>,
    pub connect_address: Option<HostAndPort>,
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceId {
    pub unique_id: Option<String>,
    pub name: Option<String>,
    pub task_name: Option<String>,
    pub task_service_id: Option<i64>,
    pub name_splitter: Option<String>,
    pub node_unique_id: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfiguration {
    pub groups: Vec<String>,
    pub process_config: ProcessConfig,
    pub max_heap_memory_size: Option<i64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessConfig {
    pub max_heap_memory_size: Option<i64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceProperties {
    pub online_count: Option<u32>,
    pub max_players: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessSnapshot {
    pub cpu_usage: Option<f64>,
    pub heap_usage_memory: Option<i64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct HostAndPort {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// One entry of the `GET /cluster` response. The REST API wraps the network
/// node and its latest info snapshot; older payloads inline the same fields,
/// so every location is tried in order.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeEntry {
    pub node: Option<NetworkNode>,
    pub node_info_snapshot: Option<NodeInfoSnapshot>,
    pub available: Option<bool>,
    pub unique_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkNode {
    pub unique_id: Option<String>,
    pub listeners: Vec<HostAndPort>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeInfoSnapshot {
    pub node: Option<NetworkNode>,
    pub process_snapshot: ProcessSnapshot,
    pub current_services_count: Option<u32>,
    /// Total memory assignable to services, in MB.
    pub max_memory: Option<i64>,
    /// Unix timestamp in milliseconds.
    pub startup_time: Option<i64>,
}

/// Maps a CloudNet service snapshot to the panel's server view.
///
/// `now` anchors the uptime computation so the mapping stays deterministic
/// for a given input.
pub fn transform_server(service: &ServiceSnapshot, now: DateTime<Utc>) -> ServerDto {
    let id = &service.service_id;

    let fallback_name = service.name.clone().unwrap_or_else(|| UNKNOWN.to_string());
    let task_qualified = id.task_name.as_ref().and_then(|task| {
        id.task_service_id
            .map(|n| format!("{}{}{}", task, id.name_splitter.as_deref().unwrap_or("-"), n))
    });

    let memory = service
        .configuration
        .process_config
        .max_heap_memory_size
        .or(service.configuration.max_heap_memory_size)
        .unwrap_or(0);

    let address = service
        .address
        .as_ref()
        .or(service.connect_address.as_ref());

    ServerDto {
        id: id
            .unique_id
            .clone()
            .or_else(|| task_qualified.clone())
            .unwrap_or_else(|| fallback_name.clone()),
        name: id
            .name
            .clone()
            .or(task_qualified)
            .unwrap_or(fallback_name),
        server_type: service
            .configuration
            .groups
            .first()
            .cloned()
            .or_else(|| id.task_name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        status: map_server_status(service.life_cycle.as_deref()),
        players: service.properties.online_count.unwrap_or(0),
        max_players: service.properties.max_players.unwrap_or(0),
        memory: format!("{} MB", memory),
        node: id
            .node_unique_id
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        ip: address
            .and_then(|a| a.host.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        port: address.and_then(|a| a.port).unwrap_or(0),
        cpu: round2(service.process_snapshot.cpu_usage.unwrap_or(0.0)),
        ram: round2(service.process_snapshot.heap_usage_memory.unwrap_or(0) as f64 / MIB),
        uptime: format_uptime(elapsed_ms(service.creation_time, now)),
    }
}

/// Maps a CloudNet cluster entry to the panel's node view.
pub fn transform_node(entry: &NodeEntry, now: DateTime<Utc>) -> NodeDto {
    let info = entry.node_info_snapshot.as_ref();
    let network = entry
        .node
        .as_ref()
        .or_else(|| info.and_then(|i| i.node.as_ref()));

    let id = network
        .and_then(|n| n.unique_id.clone())
        .or_else(|| entry.unique_id.clone())
        .or_else(|| entry.name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let status = if entry.available != Some(false) {
        ServerStatus::Online
    } else {
        ServerStatus::Offline
    };

    let heap = info
        .and_then(|i| i.process_snapshot.heap_usage_memory)
        .unwrap_or(0);

    NodeDto {
        name: id.clone(),
        id,
        status,
        ip: network
            .and_then(|n| n.listeners.first())
            .and_then(|l| l.host.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        cpu: round2(
            info.and_then(|i| i.process_snapshot.cpu_usage)
                .unwrap_or(0.0),
        ),
        ram: round2(heap as f64 / GIB),
        // CloudNet does not report disk usage.
        disk: 0.0,
        servers: info.and_then(|i| i.current_services_count).unwrap_or(0),
        max_servers: info
            .and_then(|i| i.max_memory)
            .map(|memory| (memory / 512).max(0) as u32)
            .unwrap_or(10),
        uptime: format_uptime(elapsed_ms(info.and_then(|i| i.startup_time), now)),
        location: "CloudNet Cluster".to_string(),
    }
}

/// Maps CloudNet lifecycle values onto the panel's fixed status enumeration.
pub fn map_server_status(life_cycle: Option<&str>) -> ServerStatus {
    match life_cycle {
        Some("RUNNING") => ServerStatus::Online,
        Some("STOPPED") | Some("DELETED") => ServerStatus::Offline,
        Some("PREPARED") => ServerStatus::Starting,
        _ => ServerStatus::Unknown,
    }
}

/// Renders a millisecond duration as "1d 2h 3m" / "2h 3m" / "3m".
pub fn format_uptime(milliseconds: i64) -> String {
    let seconds = milliseconds.max(0) / 1_000;
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Milliseconds since `start_ms`; an absent or future start maps to 0.
fn elapsed_ms(start_ms: Option<i64>, now: DateTime<Utc>) -> i64 {
    match start_ms {
        Some(start) => (now.timestamp_millis() - start).max(0),
        None => 0,
    }
}
