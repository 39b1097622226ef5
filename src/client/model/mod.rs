pub mod auth;
pub mod cache;
pub mod cloudnet;
pub mod error;
