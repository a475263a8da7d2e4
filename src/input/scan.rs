//! "Press a key to bind" input scanning
//!
//! While a scan is active the scanner inspects the raw device samples once per
//! frame and offers every qualifying input to a handler until the handler
//! accepts one, the scan times out, or it is cancelled.
//!
//! Candidates are offered in a fixed precedence order: keys, joystick
//! buttons, joystick axes, mouse axes. Within each kind they are offered in
//! enumeration order.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;

use enum_map::{Enum, EnumMap};
use tracing::{debug, warn};

use super::device::DeviceSampler;
use super::error::{InputError, Result, check_range};
use super::key_code::{KeyCode, MAX_JOYSTICK_AXES, MAX_JOYSTICKS, MAX_MOUSE_AXES};

/// Scan timeout used when none is given
pub const DEFAULT_SCAN_TIMEOUT: f32 = 10.0;

/// Magnitude a joystick axis must reach to count as deliberate
const JOYSTICK_AXIS_THRESHOLD: f32 = 1.0;

/// Kind of physical input a scan looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum ScanKind {
    Key,
    JoystickButton,
    JoystickAxis,
    MouseAxis,
}

/// Set of [`ScanKind`]s; iteration follows scan precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanKinds(EnumMap<ScanKind, bool>);

impl ScanKinds {
    /// The empty set
    pub fn none() -> Self {
        Self::default()
    }

    /// Every kind
    pub fn all() -> Self {
        Self(EnumMap::from_fn(|_| true))
    }

    pub fn with(mut self, kind: ScanKind) -> Self {
        self.insert(kind);
        self
    }

    pub fn insert(&mut self, kind: ScanKind) {
        self.0[kind] = true;
    }

    pub fn remove(&mut self, kind: ScanKind) {
        self.0[kind] = false;
    }

    pub fn contains(&self, kind: ScanKind) -> bool {
        self.0[kind]
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|set| !set)
    }

    /// Members in precedence order
    pub fn iter(&self) -> impl Iterator<Item = ScanKind> + '_ {
        self.0.iter().filter(|(_, set)| **set).map(|(kind, _)| kind)
    }
}

impl From<ScanKind> for ScanKinds {
    fn from(kind: ScanKind) -> Self {
        Self::none().with(kind)
    }
}

impl FromIterator<ScanKind> for ScanKinds {
    fn from_iter<I: IntoIterator<Item = ScanKind>>(iter: I) -> Self {
        let mut kinds = Self::none();
        for kind in iter {
            kinds.insert(kind);
        }
        kinds
    }
}

/// What a scan is looking for
#[derive(Debug)]
pub struct ScanSettings {
    pub kinds: ScanKinds,
    /// Joystick whose axes are inspected for [`ScanKind::JoystickAxis`]
    pub joystick: usize,
    /// Button axis in the active configuration that aborts the scan
    pub cancel_button: Option<String>,
    /// Seconds before the scan gives up; `f32::INFINITY` never times out
    pub timeout: f32,
    /// Opaque value echoed back to the handler
    pub user_data: Option<Box<dyn Any>>,
}

impl ScanSettings {
    pub fn new(kinds: impl Into<ScanKinds>) -> Self {
        Self {
            kinds: kinds.into(),
            joystick: 0,
            cancel_button: None,
            timeout: DEFAULT_SCAN_TIMEOUT,
            user_data: None,
        }
    }

    /// Starts from the timeout and cancel button in application settings
    pub fn from_defaults(kinds: impl Into<ScanKinds>, defaults: &crate::config::ScanDefaults) -> Self {
        let mut settings = Self::new(kinds).with_timeout(defaults.timeout);
        settings.cancel_button = defaults.cancel_button.clone();
        settings
    }

    pub fn with_joystick(mut self, joystick: usize) -> Self {
        self.joystick = joystick;
        self
    }

    pub fn with_cancel_button(mut self, button: impl Into<String>) -> Self {
        self.cancel_button = Some(button.into());
        self
    }

    pub fn with_timeout(mut self, seconds: f32) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_user_data<T: Any>(mut self, data: T) -> Self {
        self.user_data = Some(Box::new(data));
        self
    }

    /// Checks everything that does not need the active configuration
    pub fn validate(&self) -> Result<()> {
        if self.kinds.is_empty() {
            return Err(InputError::invalid("scan must look for at least one input kind"));
        }
        if self.timeout.is_nan() || self.timeout <= 0.0 {
            return Err(InputError::invalid(format!(
                "scan timeout must be > 0, got {}",
                self.timeout
            )));
        }
        if self.kinds.contains(ScanKind::JoystickAxis) {
            check_range("joystick", self.joystick, MAX_JOYSTICKS)?;
        }
        if let Some(button) = &self.cancel_button
            && button.trim().is_empty()
        {
            return Err(InputError::invalid("cancel button name must not be empty"));
        }
        Ok(())
    }
}

/// Physical input detected by a scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScannedInput {
    /// Nothing (timeout, cancellation or replacement)
    None,
    Key(KeyCode),
    JoystickButton(KeyCode),
    JoystickAxis { joystick: usize, axis: usize, value: f32 },
    MouseAxis { axis: usize, value: f32 },
}

impl fmt::Display for ScannedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Key(key) | Self::JoystickButton(key) => write!(f, "{key}"),
            Self::JoystickAxis { joystick, axis, .. } => {
                write!(f, "joystick {joystick} axis {axis}")
            }
            Self::MouseAxis { axis, .. } => write!(f, "mouse axis {axis}"),
        }
    }
}

/// Why the handler is being called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// A candidate is offered; return true to accept it
    Candidate,
    TimedOut,
    /// Cancel button pressed or the scan was cancelled explicitly
    Cancelled,
    /// A new scan was started before this one finished
    Replaced,
}

/// Value passed to the scan handler
#[derive(Debug)]
pub struct ScanResult<'a> {
    pub input: ScannedInput,
    pub status: ScanStatus,
    pub user_data: Option<&'a dyn Any>,
}

impl ScanResult<'_> {
    /// True when the scan ended without an input
    pub fn is_none(&self) -> bool {
        matches!(self.input, ScannedInput::None)
    }

    /// Downcasts the user data
    pub fn user_data_as<T: Any>(&self) -> Option<&T> {
        self.user_data.and_then(|data| data.downcast_ref::<T>())
    }
}

/// Scan callback; returns true to accept a candidate and end the scan
pub type ScanHandler = Box<dyn FnMut(&ScanResult<'_>) -> bool>;

struct ActiveScan {
    settings: ScanSettings,
    handler: ScanHandler,
    started_at: f64,
}

impl ActiveScan {
    /// Offers this frame's candidates; returns true once one is accepted
    ///
    /// A key is newly pressed when it is in `held` but not in `previously_held`.
    fn scan_frame(
        &mut self,
        devices: &dyn DeviceSampler,
        previously_held: &HashSet<KeyCode>,
        held: &HashSet<KeyCode>,
    ) -> bool {
        let user_data = self.settings.user_data.as_deref();
        let handler = &mut self.handler;

        for kind in self.settings.kinds.iter() {
            match kind {
                ScanKind::Key | ScanKind::JoystickButton => {
                    let joystick = kind == ScanKind::JoystickButton;
                    let pressed = devices.key_codes().iter().copied().filter(|code| {
                        code.is_joystick_button() == joystick
                            && held.contains(code)
                            && !previously_held.contains(code)
                    });
                    for code in pressed {
                        let input = if joystick {
                            ScannedInput::JoystickButton(code)
                        } else {
                            ScannedInput::Key(code)
                        };
                        if offer(handler, user_data, input) {
                            return true;
                        }
                    }
                }
                ScanKind::JoystickAxis => {
                    let joystick = self.settings.joystick;
                    let slots = devices.joystick_axis_slot_count().min(MAX_JOYSTICK_AXES);
                    for axis in 0..slots {
                        let value = devices.raw_joystick_axis(joystick, axis);
                        if value.abs() >= JOYSTICK_AXIS_THRESHOLD {
                            let input = ScannedInput::JoystickAxis {
                                joystick,
                                axis,
                                value,
                            };
                            if offer(handler, user_data, input) {
                                return true;
                            }
                        }
                    }
                }
                ScanKind::MouseAxis => {
                    for axis in 0..MAX_MOUSE_AXES {
                        let value = devices.raw_mouse_axis(axis);
                        if value != 0.0 && offer(handler, user_data, ScannedInput::MouseAxis { axis, value }) {
                            return true;
                        }
                    }
                }
            }
        }

        false
    }
}

fn offer(handler: &mut ScanHandler, user_data: Option<&dyn Any>, input: ScannedInput) -> bool {
    handler(&ScanResult {
        input,
        status: ScanStatus::Candidate,
        user_data,
    })
}

/// Single-shot input scanner (Idle ⇄ Scanning)
///
/// Keys are tracked on every update, scanning or not, so a scan started
/// between frames compares against the keys held on the frame before it.
#[derive(Default)]
pub struct InputScanner {
    active: Option<ActiveScan>,
    /// Keys held on the last update
    held: HashSet<KeyCode>,
}

impl InputScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scanning(&self) -> bool {
        self.active.is_some()
    }

    /// Name of the cancel button of the active scan, if any
    pub fn cancel_button(&self) -> Option<&str> {
        self.active
            .as_ref()
            .and_then(|scan| scan.settings.cancel_button.as_deref())
    }

    /// Starts a scan at time `now`
    ///
    /// A scan already in progress is ended first and its handler receives a
    /// [`ScanStatus::Replaced`] result.
    pub fn start(&mut self, settings: ScanSettings, handler: ScanHandler, now: f64) -> Result<()> {
        settings.validate()?;

        if self.is_scanning() {
            warn!("Input scan replaced by a new scan before it finished");
            self.finish(ScanStatus::Replaced);
        }

        debug!(
            kinds = ?settings.kinds.iter().collect::<Vec<_>>(),
            timeout = settings.timeout,
            cancel_button = ?settings.cancel_button,
            "Input scan started"
        );

        self.active = Some(ActiveScan {
            settings,
            handler,
            started_at: now,
        });
        Ok(())
    }

    /// Ends the active scan, if any, with a "none" result; returns true if one was active
    pub fn cancel(&mut self) -> bool {
        self.finish(ScanStatus::Cancelled)
    }

    /// Runs one frame of scanning
    ///
    /// Must be called every frame, including while idle. `cancel_pressed`
    /// reports whether the scan's cancel button went down this frame.
    pub fn update(&mut self, devices: &dyn DeviceSampler, now: f64, cancel_pressed: bool) {
        let held: HashSet<KeyCode> = devices
            .key_codes()
            .iter()
            .copied()
            .filter(|&code| devices.is_key_down(code))
            .collect();
        let previously_held = std::mem::replace(&mut self.held, held);

        let Some(scan) = self.active.as_mut() else {
            return;
        };

        if cancel_pressed {
            self.finish(ScanStatus::Cancelled);
            return;
        }

        if now - scan.started_at >= scan.settings.timeout as f64 {
            self.finish(ScanStatus::TimedOut);
            return;
        }

        if scan.scan_frame(devices, &previously_held, &self.held) {
            debug!("Input scan accepted a candidate");
            self.active = None;
        }
    }

    fn finish(&mut self, status: ScanStatus) -> bool {
        let Some(mut scan) = self.active.take() else {
            return false;
        };
        debug!(?status, "Input scan ended without input");
        (scan.handler)(&ScanResult {
            input: ScannedInput::None,
            status,
            user_data: scan.settings.user_data.as_deref(),
        });
        true
    }
}
