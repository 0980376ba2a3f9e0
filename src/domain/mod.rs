// Domain layer: step descriptions, results and the ports the runner talks through.

pub mod model;
pub mod ports;
