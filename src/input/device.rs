//! Raw device sampling
//!
//! The core never polls hardware itself. Each frame it reads whatever a
//! [`DeviceSampler`] reports.

use std::collections::HashSet;

use super::key_code::{KeyCode, MAX_JOYSTICK_AXES, MAX_JOYSTICKS, MAX_MOUSE_AXES};

/// Per-frame view of the physical devices
pub trait DeviceSampler {
    /// Returns true while `key` is held
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Mouse movement this frame for axis 0 (X), 1 (Y) or 2 (wheel)
    fn raw_mouse_axis(&self, axis: usize) -> f32;

    /// Raw joystick axis sample, nominally in [-1, 1]
    fn raw_joystick_axis(&self, joystick: usize, axis: usize) -> f32;

    /// Number of axis slots per joystick
    fn joystick_axis_slot_count(&self) -> usize {
        MAX_JOYSTICK_AXES
    }

    /// Ordered enumeration of every key code the sampler can report
    fn key_codes(&self) -> &[KeyCode] {
        KeyCode::all()
    }
}

/// Raw device snapshot for a single frame
///
/// Hosts either fill this in directly or let an
/// [`InputCollector`](super::InputCollector) do it from window events.
#[derive(Debug, Clone, Default)]
pub struct DeviceState {
    keys: HashSet<KeyCode>,
    mouse_delta: [f32; MAX_MOUSE_AXES],
    joystick_axes: [[f32; MAX_JOYSTICK_AXES]; MAX_JOYSTICKS],
}

impl DeviceState {
    /// Creates an empty snapshot (nothing held, no motion)
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as held
    pub fn press(&mut self, key: KeyCode) {
        if !key.is_none() {
            self.keys.insert(key);
        }
    }

    /// Marks a key as released
    pub fn release(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    /// Sets the held state of a key
    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Releases every key (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    /// Keys currently held
    pub fn held_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys.iter().copied()
    }

    /// Accumulates mouse movement for this frame; out-of-range axes are ignored
    pub fn add_mouse_delta(&mut self, axis: usize, delta: f32) {
        if let Some(slot) = self.mouse_delta.get_mut(axis) {
            *slot += delta;
        }
    }

    /// Overwrites mouse movement for this frame
    pub fn set_mouse_delta(&mut self, axis: usize, delta: f32) {
        if let Some(slot) = self.mouse_delta.get_mut(axis) {
            *slot = delta;
        }
    }

    /// Sets a joystick axis sample; out-of-range slots are ignored
    pub fn set_joystick_axis(&mut self, joystick: usize, axis: usize, value: f32) {
        if let Some(slot) = self
            .joystick_axes
            .get_mut(joystick)
            .and_then(|axes| axes.get_mut(axis))
        {
            *slot = value;
        }
    }

    /// Clears per-frame state (mouse motion) for the next frame
    pub fn advance_frame(&mut self) {
        self.mouse_delta = [0.0; MAX_MOUSE_AXES];
    }
}

impl DeviceSampler for DeviceState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    fn raw_mouse_axis(&self, axis: usize) -> f32 {
        self.mouse_delta.get(axis).copied().unwrap_or(0.0)
    }

    fn raw_joystick_axis(&self, joystick: usize, axis: usize) -> f32 {
        self.joystick_axes
            .get(joystick)
            .and_then(|axes| axes.get(axis))
            .copied()
            .unwrap_or(0.0)
    }
}
