//! Input probe application
//!
//! Opens a window and drives the input manager from real keyboard and mouse
//! input for manual testing.

mod runner;
mod window;

pub use runner::ProbeApp;
pub use window::window_attributes_from_config;
