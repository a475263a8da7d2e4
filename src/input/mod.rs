//! Named, rebindable input axes
//!
//! Provides a configuration-driven input layer that:
//! - Groups named axes into switchable configurations ("Keyboard", "Gamepad")
//! - Maps keys, mouse motion, joystick axes and remote values onto each axis
//! - Scans for the next physical input to support runtime rebinding
//! - Saves and loads configurations through pluggable savers and loaders
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → InputCollector → DeviceState (DeviceSampler)
//!                                            ↓
//!                                      InputManager ← Clock
//!                                     ↙            ↘
//!                     active InputConfiguration    InputScanner
//!                     (AxisConfiguration::update)  (scan handler)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut input = InputManager::new(&settings.input);
//! input.load(&mut TomlBindingsFile::new(&settings.input.bindings_path))?;
//!
//! // In window_event() / device_event()
//! collector.handle_window_event(&event);
//!
//! // Each frame
//! input.update(collector.state(), frame_delta);
//! let horizontal = input.axis("Horizontal")?;
//! collector.advance_frame();
//! ```

pub mod axis;
pub mod clock;
mod collector;
pub mod configuration;
pub mod device;
pub mod error;
pub mod events;
pub mod key_code;
mod manager;
pub mod persistence;
pub mod scan;
mod state;

// Re-export public API
pub use axis::{
    AnalogAxisBinding, AxisBinding, AxisConfiguration, AxisType, ButtonBinding,
    DigitalAxisBinding, MouseAxisBinding,
};
pub use clock::{Clock, ScaledClock, UnscaledClock, clock_for};
pub use collector::InputCollector;
pub use configuration::InputConfiguration;
pub use device::{DeviceSampler, DeviceState};
pub use error::{ErrorKind, InputError, Result};
pub use events::{InputListener, InputManagerEvent, Subscription};
pub use key_code::{
    KeyCode, MAX_JOYSTICK_AXES, MAX_JOYSTICK_BUTTONS, MAX_JOYSTICKS, MAX_MOUSE_AXES,
};
pub use manager::InputManager;
pub use persistence::{InputBindings, InputLoader, InputSaver, TomlBindingsFile};
pub use scan::{
    DEFAULT_SCAN_TIMEOUT, InputScanner, ScanHandler, ScanKind, ScanKinds, ScanResult,
    ScanSettings, ScanStatus, ScannedInput,
};
pub use state::ButtonState;
