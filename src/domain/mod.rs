// Domain layer: value types and the ports to external collaborators.

pub mod model;
pub mod ports;
