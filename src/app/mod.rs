// Application layer: wires configured adapters to the cart manager.

pub mod session;

pub use session::{open_cart, render_cart, FileBackedCart};
#[cfg(feature = "cli")]
pub use session::run_command;
