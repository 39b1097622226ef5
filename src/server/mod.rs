//! Server-side API backend and business logic.
//!
//! This module contains the complete backend implementation for the panel,
//! including API endpoints, the CloudNet resilience layer, and infrastructure
//! services. The backend uses Axum as the web framework and reqwest for
//! calls to the external CloudNet control plane.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - CloudNet client, connectivity monitor, response cache, transforms
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Authentication guard and the fallback gateway
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (CloudNet client, monitor, cache)
//! - **Startup** (`startup`) - Initialization of the HTTP client and resilience services
//! - **Router** (`router`) - Axum route configuration and API documentation
//!
//! # Request Flow
//!
//! A typical gated request flows through these layers:
//!
//! 1. **Router** receives the HTTP request and routes to the controller
//! 2. **Auth guard** validates the panel bearer credential
//! 3. **Fallback gateway** consults the connectivity monitor and decides:
//!    live fetch, cached degraded response, or structured unavailability
//! 4. **CloudNet client** performs the live fetch with token and retry handling
//! 5. **Transforms** map CloudNet snapshots into panel DTOs
//! 6. **Gateway** refreshes the cache and returns the typed response envelope
//!
//! # Feature Gates
//!
//! This module is only available with the `server` feature flag enabled.

pub mod config;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
