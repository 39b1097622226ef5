//! CloudPanel Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the
//! panel's CloudNet resilience layer. This crate offers payload factories for CloudNet
//! record shapes and a mock CloudNet server harness built on `httpmock`.
//!
//! # Overview
//!
//! The test utilities consist of two main components:
//! - **factory**: Builders producing CloudNet service/node snapshots and token bodies
//!   as `serde_json::Value`s, with sensible defaults
//! - **MockCloudNet**: A mock CloudNet REST API (`/auth`, `/auth/refresh`, `/ping`,
//!   `/service`, `/cluster`) with helpers for the common response setups
//!
//! # Usage
//!
//! Point a `CloudNetClient` at the harness and shape the upstream per test:
//!
//! ```rust,ignore
//! use test_utils::{factory, upstream::MockCloudNet};
//!
//! #[tokio::test(flavor = "multi_thread")]
//! async fn lists_services() {
//!     let cloudnet = MockCloudNet::start().await;
//!     cloudnet.mock_auth_ok("token-1", "refresh-1");
//!     cloudnet.mock_services(vec![factory::create_service_snapshot("Lobby", 1)]);
//!
//!     // construct a client against cloudnet.base_url() ...
//! }
//! ```

pub mod factory;
pub mod upstream;
