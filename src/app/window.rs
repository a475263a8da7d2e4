//! Probe window attributes

use winit::dpi::LogicalSize;
use winit::window::WindowAttributes;

use crate::config::WindowConfig;

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
}
