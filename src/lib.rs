//! Oil Input
//!
//! Named, rebindable input axes grouped into switchable configurations,
//! with an input scanner for runtime rebinding.

/// Input probe application - window, event loop and hotkeys
pub mod app;

/// Build-time information (timestamp, target, compiler version)
pub mod build_info;

/// Layered settings (profile files and environment variables)
pub mod config;

/// Lint rules and reporting for bindings
pub mod diagnostics;

/// Axes, configurations, scanning and persistence
pub mod input;
