use serde_json::{json, Value};

/// Builder for CloudNet cluster entries as returned by `GET /cluster`.
pub struct NodeEntryFactory {
    unique_id: String,
    available: bool,
    host: String,
    cpu_usage: f64,
    heap_usage_memory: u64,
    current_services_count: u32,
    max_memory: u32,
    startup_time: i64,
}

impl NodeEntryFactory {
    pub fn new(unique_id: &str) -> Self {
        Self {
            unique_id: unique_id.to_string(),
            available: true,
            host: "10.0.0.1".to_string(),
            cpu_usage: 25.5,
            heap_usage_memory: 2 * 1024 * 1024 * 1024,
            current_services_count: 3,
            max_memory: 8192,
            startup_time: 1_700_000_000_000,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn with_services(mut self, count: u32) -> Self {
        self.current_services_count = count;
        self
    }

    pub fn with_max_memory(mut self, max_memory: u32) -> Self {
        self.max_memory = max_memory;
        self
    }

    pub fn build(self) -> Value {
        json!({
            "node": {
                "uniqueId": self.unique_id,
                "listeners": [
                    { "host": self.host, "port": 1410 }
                ],
            },
            "nodeInfoSnapshot": {
                "processSnapshot": {
                    "cpuUsage": self.cpu_usage,
                    "heapUsageMemory": self.heap_usage_memory,
                },
                "currentServicesCount": self.current_services_count,
                "maxMemory": self.max_memory,
                "startupTime": self.startup_time,
            },
            "available": self.available,
        })
    }
}

/// Creates an available cluster entry with default values.
pub fn create_node_entry(unique_id: &str) -> Value {
    NodeEntryFactory::new(unique_id).build()
}
