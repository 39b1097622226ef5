//! HTTP request handlers for the panel API.
//!
//! Controllers validate access through the auth guard, route gated reads
//! through the fallback gateway, and convert CloudNet snapshots into panel
//! DTOs. They contain no upstream-specific error handling of their own: the
//! gateway either hands them usable data or answers for them.

pub mod cloudnet;
pub mod node;
pub mod server;
