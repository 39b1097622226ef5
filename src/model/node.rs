use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

use crate::model::server::ServerStatus;

/// Panel view of a cluster node.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NodeDto {
    pub id: String,
    pub name: String,
    pub status: ServerStatus,
    pub ip: String,
    /// CPU usage in percent, rounded to two decimals.
    pub cpu: f64,
    /// Heap usage in GB, rounded to two decimals.
    pub ram: f64,
    /// Disk usage in percent. CloudNet does not report disk usage, so this
    /// is always 0.
    pub disk: f64,
    pub servers: u32,
    pub max_servers: u32,
    pub uptime: String,
    pub location: String,
}
