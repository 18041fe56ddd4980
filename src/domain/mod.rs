// Domain layer: stream/audit models and the ports the forwarder is written against.

pub mod model;
pub mod ports;
