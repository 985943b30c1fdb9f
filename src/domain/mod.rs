// Domain layer: value objects and ports (interfaces). No scoring logic here.

pub mod model;
pub mod ports;
