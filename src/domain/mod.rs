// Domain layer: cart models and the ports the cart manager talks through.
// No I/O here; adapters implement the ports.

pub mod model;
pub mod ports;
