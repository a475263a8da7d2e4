//! Raw input collection from winit events

use tracing::trace;
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::device::DeviceState;
use super::key_code::KeyCode;

/// Pixels per scroll "line" when converting pixel deltas into wheel steps
const PIXELS_PER_LINE: f32 = 20.0;

/// Collects raw input from winit events into a [`DeviceState`]
///
/// Joysticks are not reported by winit; hosts that read a gamepad library
/// feed its samples in through [`InputCollector::state_mut`].
pub struct InputCollector {
    state: DeviceState,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self {
            state: DeviceState::new(),
        }
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key
                    && let Some(key) = KeyCode::from_winit(code)
                {
                    trace!(%key, state = ?event.state, "Key event");
                    self.state
                        .set_key(key, event.state == ElementState::Pressed);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(key) = KeyCode::from_mouse_button(*button) {
                    self.state.set_key(key, *state == ElementState::Pressed);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Wheel is reported in lines
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.state.add_mouse_delta(2, lines);
            }

            WindowEvent::Focused(false) => {
                // Key-up events are lost while unfocused
                self.state.release_all();
            }

            _ => {}
        }
    }

    /// Handle a winit device event (raw mouse motion)
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.add_mouse_delta(0, delta.0 as f32);
            // Screen Y grows downwards; axis Y is positive upwards
            self.state.add_mouse_delta(1, -delta.1 as f32);
        }
    }

    /// Advance to next frame (clears per-frame motion)
    pub fn advance_frame(&mut self) {
        self.state.advance_frame();
    }

    /// Get current device state
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Borrow state mutably
    pub fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::device::DeviceSampler;

    #[test]
    fn test_mouse_motion_accumulates() {
        let mut collector = InputCollector::new();
        collector.handle_device_event(&DeviceEvent::MouseMotion { delta: (3.0, 4.0) });
        collector.handle_device_event(&DeviceEvent::MouseMotion { delta: (1.0, 0.0) });
        assert_eq!(collector.state().raw_mouse_axis(0), 4.0);
        assert_eq!(collector.state().raw_mouse_axis(1), -4.0);

        collector.advance_frame();
        assert_eq!(collector.state().raw_mouse_axis(0), 0.0);
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut collector = InputCollector::new();
        collector.state_mut().press(KeyCode::W);
        collector.handle_window_event(&WindowEvent::Focused(false));
        assert!(!collector.state().is_key_down(KeyCode::W));
    }
}
