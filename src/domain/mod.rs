// Domain layer: submission/notification models and ports. No HTTP types here.

pub mod model;
pub mod ports;
