use serde_json::{json, Value};

/// Builder for CloudNet service snapshots as returned by `GET /service`.
pub struct ServiceSnapshotFactory {
    task_name: String,
    task_service_id: u32,
    unique_id: String,
    life_cycle: String,
    groups: Vec<String>,
    node_unique_id: String,
    online_count: u32,
    max_players: u32,
    max_heap_memory_size: u32,
    host: String,
    port: u16,
    cpu_usage: f64,
    heap_usage_memory: u64,
    creation_time: i64,
}

impl ServiceSnapshotFactory {
    pub fn new(task_name: &str, task_service_id: u32) -> Self {
        Self {
            task_name: task_name.to_string(),
            task_service_id,
            unique_id: format!("{}-{}-uid", task_name.to_lowercase(), task_service_id),
            life_cycle: "RUNNING".to_string(),
            groups: vec![task_name.to_string()],
            node_unique_id: "Node-1".to_string(),
            online_count: 5,
            max_players: 20,
            max_heap_memory_size: 512,
            host: "127.0.0.1".to_string(),
            port: 25565,
            cpu_usage: 12.25,
            heap_usage_memory: 256 * 1024 * 1024,
            creation_time: 1_700_000_000_000,
        }
    }

    pub fn with_life_cycle(mut self, life_cycle: &str) -> Self {
        self.life_cycle = life_cycle.to_string();
        self
    }

    pub fn with_unique_id(mut self, unique_id: &str) -> Self {
        self.unique_id = unique_id.to_string();
        self
    }

    pub fn with_players(mut self, online: u32, max: u32) -> Self {
        self.online_count = online;
        self.max_players = max;
        self
    }

    pub fn with_node(mut self, node_unique_id: &str) -> Self {
        self.node_unique_id = node_unique_id.to_string();
        self
    }

    pub fn build(self) -> Value {
        json!({
            "serviceId": {
                "uniqueId": self.unique_id,
                "taskName": self.task_name,
                "taskServiceId": self.task_service_id,
                "nameSplitter": "-",
                "name": format!("{}-{}", self.task_name, self.task_service_id),
                "nodeUniqueId": self.node_unique_id,
            },
            "configuration": {
                "groups": self.groups,
                "processConfig": {
                    "maxHeapMemorySize": self.max_heap_memory_size,
                },
            },
            "lifeCycle": self.life_cycle,
            "properties": {
                "onlineCount": self.online_count,
                "maxPlayers": self.max_players,
            },
            "processSnapshot": {
                "cpuUsage": self.cpu_usage,
                "heapUsageMemory": self.heap_usage_memory,
            },
            "creationTime": self.creation_time,
            "address": {
                "host": self.host,
                "port": self.port,
            },
        })
    }
}

/// Creates a running service snapshot with default values.
pub fn create_service_snapshot(task_name: &str, task_service_id: u32) -> Value {
    ServiceSnapshotFactory::new(task_name, task_service_id).build()
}
