use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

/// Lifecycle status of a game server or node as shown in the panel.
///
/// CloudNet's internal lifecycle values are mapped onto this fixed
/// enumeration; anything unrecognized becomes `Unknown`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    Offline,
    Starting,
    Unknown,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Online => "online",
            ServerStatus::Offline => "offline",
            ServerStatus::Starting => "starting",
            ServerStatus::Unknown => "unknown",
        }
    }
}

/// Panel view of a single game server (a CloudNet service).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ServerDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub server_type: String,
    pub status: ServerStatus,
    pub players: u32,
    pub max_players: u32,
    /// Configured heap size, e.g. "512 MB".
    pub memory: String,
    /// Unique id of the node the service runs on.
    pub node: String,
    pub ip: String,
    pub port: u16,
    /// CPU usage in percent, rounded to two decimals.
    pub cpu: f64,
    /// Heap usage in MB, rounded to two decimals.
    pub ram: f64,
    /// Human-readable uptime, e.g. "1d 4h 12m".
    pub uptime: String,
}
