// Domain layer: request/exception models and the ports the engine talks to.

pub mod model;
pub mod ports;
