//! Logical axes and buttons
//!
//! An [`AxisConfiguration`] pairs a name with an [`AxisBinding`] and the
//! runtime state the binding's algorithm needs from one frame to the next.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::device::DeviceSampler;
use super::error::{InputError, Result, check_name, check_range};
use super::key_code::{KeyCode, MAX_JOYSTICK_AXES, MAX_JOYSTICKS, MAX_MOUSE_AXES};
use super::state::ButtonState;

const AXIS_NEUTRAL: f32 = 0.0;
const AXIS_POSITIVE: f32 = 1.0;
const AXIS_NEGATIVE: f32 = -1.0;

fn default_rate() -> f32 {
    1.0
}

/// A button driven by up to two keys
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ButtonBinding {
    #[serde(default)]
    pub positive: KeyCode,
    #[serde(default)]
    pub alt_positive: KeyCode,
}

impl ButtonBinding {
    pub fn new(positive: KeyCode, alt_positive: KeyCode) -> Self {
        Self {
            positive,
            alt_positive,
        }
    }

    fn validate(&self) -> Result<()> {
        self.positive.validate()?;
        self.alt_positive.validate()
    }
}

/// A keyboard-driven axis that accelerates toward ±1 and falls back to 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalAxisBinding {
    #[serde(default)]
    pub positive: KeyCode,
    #[serde(default)]
    pub negative: KeyCode,
    #[serde(default)]
    pub alt_positive: KeyCode,
    #[serde(default)]
    pub alt_negative: KeyCode,
    /// Units per second the value returns to neutral when nothing is held
    #[serde(default = "default_rate")]
    pub gravity: f32,
    /// Units per second the value moves while a key is held
    #[serde(default = "default_rate")]
    pub sensitivity: f32,
    /// Jump to neutral before reversing direction
    #[serde(default)]
    pub snap: bool,
    #[serde(default)]
    pub invert: bool,
}

impl DigitalAxisBinding {
    /// Creates a binding with unit gravity and sensitivity
    pub fn new(positive: KeyCode, negative: KeyCode) -> Self {
        Self {
            positive,
            negative,
            alt_positive: KeyCode::None,
            alt_negative: KeyCode::None,
            gravity: default_rate(),
            sensitivity: default_rate(),
            snap: false,
            invert: false,
        }
    }

    pub fn with_alternates(mut self, alt_positive: KeyCode, alt_negative: KeyCode) -> Self {
        self.alt_positive = alt_positive;
        self.alt_negative = alt_negative;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// All four bound keys (positive, negative, alt positive, alt negative)
    pub fn keys(&self) -> [KeyCode; 4] {
        [
            self.positive,
            self.negative,
            self.alt_positive,
            self.alt_negative,
        ]
    }

    fn validate(&self) -> Result<()> {
        for key in self.keys() {
            key.validate()?;
        }
        check_sensitivity(self.sensitivity)?;
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(InputError::invalid(format!(
                "gravity must be finite and >= 0, got {}",
                self.gravity
            )));
        }
        Ok(())
    }
}

/// Per-frame mouse movement along one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseAxisBinding {
    /// 0 = X, 1 = Y, 2 = wheel
    pub axis: usize,
    #[serde(default = "default_rate")]
    pub sensitivity: f32,
    #[serde(default)]
    pub invert: bool,
}

impl MouseAxisBinding {
    pub fn new(axis: usize, sensitivity: f32) -> Self {
        Self {
            axis,
            sensitivity,
            invert: false,
        }
    }

    fn validate(&self) -> Result<()> {
        check_range("mouse axis", self.axis, MAX_MOUSE_AXES)?;
        check_sensitivity(self.sensitivity)
    }
}

/// One joystick axis slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogAxisBinding {
    pub joystick: usize,
    pub axis: usize,
    #[serde(default = "default_rate")]
    pub sensitivity: f32,
    /// Samples with a smaller magnitude read as zero
    #[serde(default)]
    pub dead_zone: f32,
    #[serde(default)]
    pub invert: bool,
}

impl AnalogAxisBinding {
    pub fn new(joystick: usize, axis: usize, sensitivity: f32, dead_zone: f32) -> Self {
        Self {
            joystick,
            axis,
            sensitivity,
            dead_zone,
            invert: false,
        }
    }

    fn validate(&self) -> Result<()> {
        check_range("joystick", self.joystick, MAX_JOYSTICKS)?;
        check_range("joystick axis", self.axis, MAX_JOYSTICK_AXES)?;
        check_sensitivity(self.sensitivity)?;
        if !(0.0..1.0).contains(&self.dead_zone) {
            return Err(InputError::invalid(format!(
                "dead zone must be in [0, 1), got {}",
                self.dead_zone
            )));
        }
        Ok(())
    }
}

fn check_sensitivity(sensitivity: f32) -> Result<()> {
    if sensitivity.is_finite() && sensitivity > 0.0 {
        Ok(())
    } else {
        Err(InputError::invalid(format!(
            "sensitivity must be finite and > 0, got {sensitivity}"
        )))
    }
}

/// What drives an axis, with only the fields that kind of input needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AxisBinding {
    Button(ButtonBinding),
    DigitalAxis(DigitalAxisBinding),
    MouseAxis(MouseAxisBinding),
    AnalogAxis(AnalogAxisBinding),
    /// Value injected by external code
    RemoteAxis,
    /// Button state injected by external code
    RemoteButton,
    /// Placeholder with nothing bound
    Empty,
}

impl AxisBinding {
    /// Kind of input this binding reads
    pub fn axis_type(&self) -> AxisType {
        match self {
            Self::Button(_) => AxisType::Button,
            Self::DigitalAxis(_) => AxisType::DigitalAxis,
            Self::MouseAxis(_) => AxisType::MouseAxis,
            Self::AnalogAxis(_) => AxisType::AnalogAxis,
            Self::RemoteAxis => AxisType::RemoteAxis,
            Self::RemoteButton => AxisType::RemoteButton,
            Self::Empty => AxisType::Empty,
        }
    }

    /// Checks indices against hardware limits and rates against their domains
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Button(b) => b.validate(),
            Self::DigitalAxis(b) => b.validate(),
            Self::MouseAxis(b) => b.validate(),
            Self::AnalogAxis(b) => b.validate(),
            Self::RemoteAxis | Self::RemoteButton | Self::Empty => Ok(()),
        }
    }

    /// Key codes this binding reads (excluding unbound slots)
    pub fn bound_keys(&self) -> Vec<KeyCode> {
        let keys = match self {
            Self::Button(b) => vec![b.positive, b.alt_positive],
            Self::DigitalAxis(b) => b.keys().to_vec(),
            _ => Vec::new(),
        };
        keys.into_iter().filter(|k| !k.is_none()).collect()
    }
}

/// Discriminant of [`AxisBinding`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisType {
    Button,
    DigitalAxis,
    MouseAxis,
    AnalogAxis,
    RemoteAxis,
    RemoteButton,
    Empty,
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Button => "button",
            Self::DigitalAxis => "digital axis",
            Self::MouseAxis => "mouse axis",
            Self::AnalogAxis => "analog axis",
            Self::RemoteAxis => "remote axis",
            Self::RemoteButton => "remote button",
            Self::Empty => "empty axis",
        };
        f.write_str(name)
    }
}

/// Runtime state, never persisted
#[derive(Debug, Clone, Copy, Default)]
struct AxisState {
    value: f32,
    raw_value: f32,
    button: ButtonState,
}

/// One logical control: a name, its binding and its per-frame state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisConfiguration {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    binding: AxisBinding,
    #[serde(skip)]
    state: AxisState,
}

impl AxisConfiguration {
    /// Creates an axis after validating its name and binding
    pub fn new(name: impl Into<String>, binding: AxisBinding) -> Result<Self> {
        let name = name.into();
        check_name("Axis", &name)?;
        binding.validate()?;
        Ok(Self {
            name,
            description: String::new(),
            binding,
            state: AxisState::default(),
        })
    }

    /// Creates a `Button` axis
    pub fn new_button(
        name: impl Into<String>,
        positive: KeyCode,
        alt_positive: KeyCode,
    ) -> Result<Self> {
        Self::new(
            name,
            AxisBinding::Button(ButtonBinding::new(positive, alt_positive)),
        )
    }

    pub fn digital_axis(name: impl Into<String>, binding: DigitalAxisBinding) -> Result<Self> {
        Self::new(name, AxisBinding::DigitalAxis(binding))
    }

    pub fn mouse_axis(name: impl Into<String>, axis: usize, sensitivity: f32) -> Result<Self> {
        Self::new(
            name,
            AxisBinding::MouseAxis(MouseAxisBinding::new(axis, sensitivity)),
        )
    }

    pub fn analog_axis(
        name: impl Into<String>,
        joystick: usize,
        axis: usize,
        sensitivity: f32,
        dead_zone: f32,
    ) -> Result<Self> {
        Self::new(
            name,
            AxisBinding::AnalogAxis(AnalogAxisBinding::new(joystick, axis, sensitivity, dead_zone)),
        )
    }

    pub fn remote_axis(name: impl Into<String>) -> Result<Self> {
        Self::new(name, AxisBinding::RemoteAxis)
    }

    pub fn remote_button(name: impl Into<String>) -> Result<Self> {
        Self::new(name, AxisBinding::RemoteButton)
    }

    pub fn empty(name: impl Into<String>) -> Result<Self> {
        Self::new(name, AxisBinding::Empty)
    }

    /// Builder method to attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn binding(&self) -> &AxisBinding {
        &self.binding
    }

    pub fn axis_type(&self) -> AxisType {
        self.binding.axis_type()
    }

    /// Replaces the binding (e.g. after a rebinding scan) and resets state
    pub fn set_binding(&mut self, binding: AxisBinding) -> Result<()> {
        binding.validate()?;
        self.binding = binding;
        self.reset();
        Ok(())
    }

    /// Validates the binding and clears runtime state; run before the first update
    pub fn initialize(&mut self) -> Result<()> {
        self.binding.validate()?;
        self.reset();
        Ok(())
    }

    /// Zeroes value, raw value and button edges
    pub fn reset(&mut self) {
        self.state = AxisState::default();
    }

    /// Refreshes the runtime state from this frame's device samples
    pub fn update(&mut self, devices: &dyn DeviceSampler, delta_time: f32) {
        let Self { binding, state, .. } = self;
        match binding {
            AxisBinding::Button(b) => {
                let down = is_held(devices, b.positive) || is_held(devices, b.alt_positive);
                state.button = state.button.next(down);
                state.value = if down { AXIS_POSITIVE } else { AXIS_NEUTRAL };
                state.raw_value = state.value;
            }
            AxisBinding::DigitalAxis(b) => update_digital(state, b, devices, delta_time),
            AxisBinding::MouseAxis(b) => {
                let mut value = devices.raw_mouse_axis(b.axis) * b.sensitivity;
                if b.invert {
                    value = -value;
                }
                state.value = value;
                state.raw_value = value;
            }
            AxisBinding::AnalogAxis(b) => {
                let sample = devices.raw_joystick_axis(b.joystick, b.axis);
                let sample = if sample.abs() < b.dead_zone {
                    AXIS_NEUTRAL
                } else {
                    sample
                };
                let sign = if b.invert { -1.0 } else { 1.0 };
                state.raw_value = sample * sign;
                state.value = (sample * b.sensitivity).clamp(AXIS_NEGATIVE, AXIS_POSITIVE) * sign;
            }
            AxisBinding::RemoteAxis => {}
            AxisBinding::RemoteButton => {
                state.button = state.button.advance();
            }
            AxisBinding::Empty => *state = AxisState::default(),
        }
    }

    /// Smoothed value
    pub fn axis(&self) -> f32 {
        match &self.binding {
            AxisBinding::DigitalAxis(b) if b.invert => -self.state.value,
            _ => self.state.value,
        }
    }

    /// Instantaneous value, without smoothing or sensitivity
    pub fn axis_raw(&self) -> f32 {
        match &self.binding {
            AxisBinding::DigitalAxis(b) if b.invert => -self.state.raw_value,
            _ => self.state.raw_value,
        }
    }

    /// True while the button is held
    pub fn button(&self) -> bool {
        self.state.button.is_down()
    }

    /// True only on the frame the button went down
    pub fn button_down(&self) -> bool {
        self.state.button.is_just_pressed()
    }

    /// True only on the frame the button came up
    pub fn button_up(&self) -> bool {
        self.state.button.is_just_released()
    }

    /// True if this axis currently reports a non-neutral value or a held button
    pub fn any_input(&self) -> bool {
        match self.binding {
            AxisBinding::Button(_) | AxisBinding::RemoteButton => self.state.button.is_down(),
            _ => self.state.value != AXIS_NEUTRAL || self.state.raw_value != AXIS_NEUTRAL,
        }
    }

    /// Overwrites the value of a remote axis, visible immediately
    pub fn set_remote_axis_value(&mut self, value: f32) -> Result<()> {
        if !matches!(self.binding, AxisBinding::RemoteAxis) {
            return Err(self.mismatch(AxisType::RemoteAxis));
        }
        self.state.value = value;
        self.state.raw_value = value;
        Ok(())
    }

    /// Overwrites the state of a remote button, visible immediately
    ///
    /// `just_changed` marks this as the frame of the transition; the edge is
    /// cleared by the next update.
    pub fn set_remote_button_value(&mut self, down: bool, just_changed: bool) -> Result<()> {
        if !matches!(self.binding, AxisBinding::RemoteButton) {
            return Err(self.mismatch(AxisType::RemoteButton));
        }
        self.state.button = ButtonState::from_level(down, just_changed);
        self.state.value = if down { AXIS_POSITIVE } else { AXIS_NEUTRAL };
        self.state.raw_value = self.state.value;
        Ok(())
    }

    fn mismatch(&self, expected: AxisType) -> InputError {
        InputError::BindingMismatch {
            axis: self.name.clone(),
            expected: match expected {
                AxisType::RemoteButton => "remote button",
                _ => "remote axis",
            },
        }
    }
}

fn is_held(devices: &dyn DeviceSampler, key: KeyCode) -> bool {
    !key.is_none() && devices.is_key_down(key)
}

fn update_digital(
    state: &mut AxisState,
    binding: &DigitalAxisBinding,
    devices: &dyn DeviceSampler,
    delta_time: f32,
) {
    let positive = is_held(devices, binding.positive) || is_held(devices, binding.alt_positive);
    let negative = is_held(devices, binding.negative) || is_held(devices, binding.alt_negative);

    match (positive, negative) {
        // Opposing keys cancel out; the value holds where it is
        (true, true) => state.raw_value = AXIS_NEUTRAL,
        (true, false) => {
            if binding.snap && state.value < AXIS_NEUTRAL {
                state.value = AXIS_NEUTRAL;
            }
            state.value = (state.value + binding.sensitivity * delta_time).min(AXIS_POSITIVE);
            state.raw_value = AXIS_POSITIVE;
        }
        (false, true) => {
            if binding.snap && state.value > AXIS_NEUTRAL {
                state.value = AXIS_NEUTRAL;
            }
            state.value = (state.value - binding.sensitivity * delta_time).max(AXIS_NEGATIVE);
            state.raw_value = AXIS_NEGATIVE;
        }
        (false, false) => {
            state.raw_value = AXIS_NEUTRAL;
            let step = binding.gravity * delta_time;
            if state.value > AXIS_NEUTRAL {
                state.value = (state.value - step).max(AXIS_NEUTRAL);
            } else if state.value < AXIS_NEUTRAL {
                state.value = (state.value + step).min(AXIS_NEUTRAL);
            }
        }
    }
}
