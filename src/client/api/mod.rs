#[cfg(feature = "web")]
pub mod helper;

#[cfg(feature = "web")]
pub mod cloudnet;

#[cfg(feature = "web")]
pub mod node;

#[cfg(feature = "web")]
pub mod server;
