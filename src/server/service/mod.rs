//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the external CloudNet control plane. Services are
//! responsible for:
//!
//! - **Upstream access**: Authenticated calls to the CloudNet REST API
//! - **Resilience**: Connectivity monitoring, response caching, and data
//!   transformation backing the panel's fallback behavior
//! - **Domain Models**: Converting CloudNet record shapes into the panel's
//!   stable view models

pub mod cloudnet;
