pub mod network;
pub mod topology;

pub use network::{Network, ForwardPass};
pub use topology::Topology;
