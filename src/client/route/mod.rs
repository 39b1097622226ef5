pub mod nodes;
pub mod not_found;
pub mod servers;

pub use nodes::Nodes;
pub use not_found::NotFound;
pub use servers::Servers;
