//! Factory methods for creating CloudNet test payloads.
//!
//! This module provides factory methods for creating CloudNet API response bodies with
//! sensible defaults, reducing boilerplate in tests. Each shape has a `Factory` struct
//! for customization and a `create_*` convenience function for quick default creation.
//!
//! All factories produce `serde_json::Value`s in CloudNet's native camelCase wire
//! form, so the payloads exercise the same deserialization path as real responses.

pub mod node_snapshot;
pub mod service_snapshot;
pub mod token;

pub use node_snapshot::{create_node_entry, NodeEntryFactory};
pub use service_snapshot::{create_service_snapshot, ServiceSnapshotFactory};
pub use token::token_pair;
