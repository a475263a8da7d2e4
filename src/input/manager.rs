//! Configuration registry and per-frame driver

use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

use super::axis::{AxisConfiguration, DigitalAxisBinding};
use super::clock::{Clock, ScaledClock, clock_for};
use super::configuration::InputConfiguration;
use super::device::DeviceSampler;
use super::error::{InputError, Result, check_name};
use super::events::{EventDispatcher, InputListener, InputManagerEvent, Subscription};
use super::key_code::KeyCode;
use super::persistence::{InputBindings, InputLoader, InputSaver};
use super::scan::{InputScanner, ScanResult, ScanSettings};
use crate::config::InputOptions;

/// Owns every input configuration, tracks the active one and drives the
/// per-frame axis and scan passes
///
/// # Usage
///
/// ```ignore
/// let mut input = InputManager::new(&settings.input);
/// input.create_configuration("Keyboard")?;
/// input.create_button("Keyboard", "Jump", KeyCode::Space, KeyCode::None)?;
///
/// // Each frame
/// input.update(collector.state(), delta_time);
/// if input.button_down("Jump")? { /* ... */ }
/// collector.advance_frame();
/// ```
pub struct InputManager {
    configurations: IndexMap<String, InputConfiguration>,
    current: Option<String>,
    default_configuration: Option<String>,
    clock: Box<dyn Clock>,
    scanner: InputScanner,
    events: EventDispatcher,
}

impl InputManager {
    /// Creates an empty manager using the clock selected by `options`
    pub fn new(options: &InputOptions) -> Self {
        let mut manager = Self::with_clock(clock_for(options.ignore_timescale, options.time_scale));
        manager.default_configuration = options.default_configuration.clone();
        manager
    }

    /// Creates an empty manager with an explicit clock
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            configurations: IndexMap::new(),
            current: None,
            default_configuration: None,
            clock,
            scanner: InputScanner::new(),
            events: EventDispatcher::default(),
        }
    }

    // ---------------------------------------------------------------------
    // Frame driver
    // ---------------------------------------------------------------------

    /// Runs one frame: advances the clock, updates every axis of the active
    /// configuration, then runs the scan pass
    pub fn update(&mut self, devices: &dyn DeviceSampler, frame_delta: f32) {
        self.clock.advance(frame_delta);
        self.update_axes(devices);
        self.update_scan(devices);
    }

    fn update_axes(&mut self, devices: &dyn DeviceSampler) {
        let delta_time = self.clock.delta_time();
        if let Some(config) = self.current_configuration_mut() {
            trace!(configuration = config.name(), delta_time, "Updating axes");
            config.update(devices, delta_time);
        }
    }

    fn update_scan(&mut self, devices: &dyn DeviceSampler) {
        let cancel_pressed = self
            .scanner
            .cancel_button()
            .and_then(|name| self.current_configuration()?.axis(name))
            .is_some_and(AxisConfiguration::button_down);
        self.scanner
            .update(devices, self.clock.time(), cancel_pressed);
    }

    /// Sets the time scale used by a scaled clock
    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    /// Seconds elapsed on the manager's clock
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    // ---------------------------------------------------------------------
    // Configurations
    // ---------------------------------------------------------------------

    /// Creates an empty configuration
    ///
    /// If no configuration is active the new one becomes active.
    pub fn create_configuration(&mut self, name: &str) -> Result<&mut InputConfiguration> {
        if self.configurations.contains_key(name) {
            return Err(InputError::DuplicateConfiguration {
                name: name.to_string(),
            });
        }
        let config = InputConfiguration::new(name)?;
        self.configurations.insert(name.to_string(), config);
        debug!(configuration = name, "Created input configuration");

        if self.current.is_none() {
            self.activate(name.to_string());
        }
        self.configuration_mut(name)
    }

    /// Deletes a configuration
    ///
    /// When the active configuration is deleted, the default configuration (if
    /// known) becomes active, else the first remaining one, else none.
    pub fn delete_configuration(&mut self, name: &str) -> Result<()> {
        if self.configurations.shift_remove(name).is_none() {
            return Err(self.configuration_not_found(name));
        }
        debug!(configuration = name, "Deleted input configuration");

        if self.current.as_deref() == Some(name) {
            self.current = None;
            match self.fallback_configuration() {
                Some(next) => {
                    warn!(
                        deleted = name,
                        next = %next,
                        "Active input configuration deleted, switching"
                    );
                    self.activate(next);
                }
                None => warn!(deleted = name, "Last input configuration deleted"),
            }
        }
        Ok(())
    }

    /// Makes `name` the active configuration
    ///
    /// A no-op if it is already active. Otherwise every axis of the new
    /// configuration is reset so held keys from the previous one do not leak.
    pub fn set_configuration(&mut self, name: &str) -> Result<()> {
        if self.current.as_deref() == Some(name) {
            return Ok(());
        }
        if !self.configurations.contains_key(name) {
            return Err(self.configuration_not_found(name));
        }
        self.activate(name.to_string());
        Ok(())
    }

    fn activate(&mut self, name: String) {
        if let Some(config) = self.configurations.get_mut(&name) {
            config.reset();
        }
        info!(configuration = %name, "Input configuration changed");
        self.current = Some(name.clone());
        self.events
            .emit(&InputManagerEvent::ConfigurationChanged { name });
    }

    fn fallback_configuration(&self) -> Option<String> {
        self.default_configuration
            .as_ref()
            .filter(|name| self.configurations.contains_key(name.as_str()))
            .cloned()
            .or_else(|| self.configurations.keys().next().cloned())
    }

    pub fn current_configuration(&self) -> Option<&InputConfiguration> {
        self.current
            .as_deref()
            .and_then(|name| self.configurations.get(name))
    }

    pub fn current_configuration_mut(&mut self) -> Option<&mut InputConfiguration> {
        let name = self.current.as_deref()?;
        self.configurations.get_mut(name)
    }

    pub fn current_configuration_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn configuration(&self, name: &str) -> Result<&InputConfiguration> {
        self.configurations
            .get(name)
            .ok_or_else(|| self.configuration_not_found(name))
    }

    pub fn configuration_mut(&mut self, name: &str) -> Result<&mut InputConfiguration> {
        self.configurations
            .get_mut(name)
            .ok_or_else(|| InputError::ConfigurationNotFound {
                name: name.to_string(),
            })
    }

    /// Configurations in creation (or load) order
    pub fn configurations(&self) -> impl Iterator<Item = &InputConfiguration> {
        self.configurations.values()
    }

    pub fn configuration_count(&self) -> usize {
        self.configurations.len()
    }

    pub fn default_configuration(&self) -> Option<&str> {
        self.default_configuration.as_deref()
    }

    /// Sets the configuration preferred when loading or after deleting the active one
    pub fn set_default_configuration(&mut self, name: Option<&str>) {
        self.default_configuration = name.map(str::to_string);
    }

    /// Signals that a configuration was modified at runtime
    pub fn mark_configuration_dirty(&mut self, name: &str) -> Result<()> {
        if !self.configurations.contains_key(name) {
            return Err(self.configuration_not_found(name));
        }
        self.events.emit(&InputManagerEvent::ConfigurationDirty {
            name: name.to_string(),
        });
        Ok(())
    }

    fn configuration_not_found(&self, name: &str) -> InputError {
        InputError::ConfigurationNotFound {
            name: name.to_string(),
        }
    }

    // ---------------------------------------------------------------------
    // Axis factories
    // ---------------------------------------------------------------------

    /// Adds a fully built axis to a configuration
    pub fn create_axis(
        &mut self,
        configuration: &str,
        axis: AxisConfiguration,
    ) -> Result<&mut AxisConfiguration> {
        let config = self.configuration_mut(configuration)?;
        let name = config.add_axis(axis)?.name().to_string();
        debug!(configuration, axis = %name, "Created axis");
        self.mark_configuration_dirty(configuration)?;
        self.configuration_mut(configuration)?.require_axis_mut(&name)
    }

    pub fn create_button(
        &mut self,
        configuration: &str,
        name: &str,
        positive: KeyCode,
        alt_positive: KeyCode,
    ) -> Result<&mut AxisConfiguration> {
        self.create_axis(
            configuration,
            AxisConfiguration::new_button(name, positive, alt_positive)?,
        )
    }

    pub fn create_digital_axis(
        &mut self,
        configuration: &str,
        name: &str,
        positive: KeyCode,
        negative: KeyCode,
        gravity: f32,
        sensitivity: f32,
    ) -> Result<&mut AxisConfiguration> {
        let binding = DigitalAxisBinding::new(positive, negative)
            .with_gravity(gravity)
            .with_sensitivity(sensitivity);
        self.create_axis(configuration, AxisConfiguration::digital_axis(name, binding)?)
    }

    pub fn create_mouse_axis(
        &mut self,
        configuration: &str,
        name: &str,
        axis: usize,
        sensitivity: f32,
    ) -> Result<&mut AxisConfiguration> {
        self.create_axis(
            configuration,
            AxisConfiguration::mouse_axis(name, axis, sensitivity)?,
        )
    }

    pub fn create_analog_axis(
        &mut self,
        configuration: &str,
        name: &str,
        joystick: usize,
        axis: usize,
        sensitivity: f32,
        dead_zone: f32,
    ) -> Result<&mut AxisConfiguration> {
        self.create_axis(
            configuration,
            AxisConfiguration::analog_axis(name, joystick, axis, sensitivity, dead_zone)?,
        )
    }

    pub fn create_remote_axis(
        &mut self,
        configuration: &str,
        name: &str,
    ) -> Result<&mut AxisConfiguration> {
        self.create_axis(configuration, AxisConfiguration::remote_axis(name)?)
    }

    pub fn create_remote_button(
        &mut self,
        configuration: &str,
        name: &str,
    ) -> Result<&mut AxisConfiguration> {
        self.create_axis(configuration, AxisConfiguration::remote_button(name)?)
    }

    pub fn create_empty_axis(
        &mut self,
        configuration: &str,
        name: &str,
    ) -> Result<&mut AxisConfiguration> {
        self.create_axis(configuration, AxisConfiguration::empty(name)?)
    }

    /// Removes an axis from a configuration
    pub fn delete_axis(&mut self, configuration: &str, name: &str) -> Result<()> {
        self.configuration_mut(configuration)?.remove_axis(name)?;
        debug!(configuration, axis = name, "Deleted axis");
        self.mark_configuration_dirty(configuration)
    }

    // ---------------------------------------------------------------------
    // Queries against the active configuration
    // ---------------------------------------------------------------------

    /// Looks up an axis in the active configuration
    pub fn axis_configuration(&self, name: &str) -> Result<&AxisConfiguration> {
        self.current_configuration()
            .ok_or(InputError::NoActiveConfiguration)?
            .require_axis(name)
    }

    pub fn axis(&self, name: &str) -> Result<f32> {
        Ok(self.axis_configuration(name)?.axis())
    }

    pub fn axis_raw(&self, name: &str) -> Result<f32> {
        Ok(self.axis_configuration(name)?.axis_raw())
    }

    pub fn button(&self, name: &str) -> Result<bool> {
        Ok(self.axis_configuration(name)?.button())
    }

    pub fn button_down(&self, name: &str) -> Result<bool> {
        Ok(self.axis_configuration(name)?.button_down())
    }

    pub fn button_up(&self, name: &str) -> Result<bool> {
        Ok(self.axis_configuration(name)?.button_up())
    }

    /// True if any axis of the named (or active) configuration reports input
    ///
    /// With no name and no active configuration there is nothing to report.
    pub fn any_input(&self, configuration: Option<&str>) -> Result<bool> {
        match configuration {
            Some(name) => Ok(self.configuration(name)?.any_input()),
            None => Ok(self
                .current_configuration()
                .is_some_and(InputConfiguration::any_input)),
        }
    }

    // ---------------------------------------------------------------------
    // Remote value injection
    // ---------------------------------------------------------------------

    /// Sets the value of a remote axis; visible to the very next query
    pub fn set_remote_axis_value(&mut self, configuration: &str, axis: &str, value: f32) -> Result<()> {
        self.configuration_mut(configuration)?
            .require_axis_mut(axis)?
            .set_remote_axis_value(value)
    }

    /// Sets the state of a remote button; visible to the very next query
    pub fn set_remote_button_value(
        &mut self,
        configuration: &str,
        button: &str,
        down: bool,
        just_changed: bool,
    ) -> Result<()> {
        self.configuration_mut(configuration)?
            .require_axis_mut(button)?
            .set_remote_button_value(down, just_changed)
    }

    // ---------------------------------------------------------------------
    // Scanning
    // ---------------------------------------------------------------------

    /// Starts scanning for the next physical input
    ///
    /// The handler is called with candidates until it returns true, or once
    /// with a "none" result on timeout or cancellation. Starting a scan while
    /// one is running ends the old one with a `Replaced` result.
    pub fn start_scan<F>(&mut self, settings: ScanSettings, handler: F) -> Result<()>
    where
        F: FnMut(&ScanResult<'_>) -> bool + 'static,
    {
        if let Some(cancel) = &settings.cancel_button {
            check_name("Cancel button", cancel)?;
            self.axis_configuration(cancel)?;
        }
        let now = self.clock.time();
        self.scanner.start(settings, Box::new(handler), now)
    }

    /// Cancels the active scan; a no-op when idle
    pub fn cancel_scan(&mut self) {
        self.scanner.cancel();
    }

    pub fn is_scanning(&self) -> bool {
        self.scanner.is_scanning()
    }

    // ---------------------------------------------------------------------
    // Notifications
    // ---------------------------------------------------------------------

    /// Registers a listener for [`InputManagerEvent`]s
    pub fn subscribe(&mut self, listener: impl InputListener + 'static) -> Subscription {
        self.events.subscribe(Box::new(listener))
    }

    /// Removes a listener; returns false if it was already removed
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn listener_count(&self) -> usize {
        self.events.len()
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Snapshot of the persisted shape
    pub fn bindings(&self) -> InputBindings {
        InputBindings {
            default_configuration: self.default_configuration.clone(),
            configurations: self.configurations.values().cloned().collect(),
        }
    }

    /// Hands every configuration to `saver`
    pub fn save(&mut self, saver: &mut dyn InputSaver) -> Result<()> {
        saver.save(&self.bindings())?;
        info!(
            configurations = self.configurations.len(),
            "Saved input configurations"
        );
        self.events.emit(&InputManagerEvent::Saved);
        Ok(())
    }

    /// Replaces every configuration with those from `loader`
    ///
    /// Nothing changes unless the whole set is valid. A default configuration
    /// named by the loaded bindings replaces the current one; otherwise the
    /// current default is kept. Afterwards the default configuration (or the
    /// first one) is active.
    pub fn load(&mut self, loader: &mut dyn InputLoader) -> Result<()> {
        let bindings = loader.load()?;
        self.apply_bindings(bindings)
    }

    fn apply_bindings(&mut self, bindings: InputBindings) -> Result<()> {
        let mut configurations = IndexMap::with_capacity(bindings.configurations.len());
        for mut config in bindings.configurations {
            config.initialize()?;
            let name = config.name().to_string();
            if configurations.contains_key(&name) {
                return Err(InputError::DuplicateConfiguration { name });
            }
            configurations.insert(name, config);
        }

        if self.scanner.is_scanning() {
            self.scanner.cancel();
        }
        self.configurations = configurations;
        if let Some(name) = bindings.default_configuration {
            self.default_configuration = Some(name);
        }
        self.current = None;

        info!(
            configurations = self.configurations.len(),
            default = ?self.default_configuration,
            "Loaded input configurations"
        );
        self.events.emit(&InputManagerEvent::Loaded);

        if let Some(name) = self.fallback_configuration() {
            self.activate(name);
        }
        Ok(())
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::with_clock(Box::new(ScaledClock::new()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::input::clock::UnscaledClock;
    use crate::input::device::DeviceState;
    use crate::input::error::ErrorKind;
    use crate::input::scan::{ScanKind, ScanStatus, ScannedInput};

    fn manager() -> InputManager {
        let mut input = InputManager::with_clock(Box::new(UnscaledClock::new()));
        input.create_configuration("Keyboard").unwrap();
        input
            .create_button("Keyboard", "Jump", KeyCode::Space, KeyCode::None)
            .unwrap();
        input
            .create_button("Keyboard", "Cancel", KeyCode::Escape, KeyCode::None)
            .unwrap();
        input
            .create_digital_axis("Keyboard", "Horizontal", KeyCode::D, KeyCode::A, 3.0, 3.0)
            .unwrap();
        input.create_configuration("Gamepad").unwrap();
        input
            .create_analog_axis("Gamepad", "Horizontal", 0, 0, 1.0, 0.1)
            .unwrap();
        input
    }

    fn record_events(input: &mut InputManager) -> Rc<RefCell<Vec<InputManagerEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let _ = input.subscribe(move |event: &InputManagerEvent| sink.borrow_mut().push(event.clone()));
        log
    }

    #[test]
    fn test_first_configuration_becomes_active() {
        let input = manager();
        assert_eq!(input.current_configuration_name(), Some("Keyboard"));
        assert_eq!(input.configuration_count(), 2);
    }

    #[test]
    fn test_duplicate_configuration_rejected() {
        let mut input = manager();
        let err = input.create_configuration("Gamepad").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
        assert_eq!(input.configuration("Gamepad").unwrap().len(), 1);
    }

    #[test]
    fn test_set_configuration_resets_and_notifies() {
        let mut input = manager();
        let events = record_events(&mut input);
        let mut devices = DeviceState::new();
        devices.set_joystick_axis(0, 0, 0.8);

        input.set_configuration("Gamepad").unwrap();
        input.update(&devices, 0.1);
        assert!(input.axis("Horizontal").unwrap() > 0.0);

        input.set_configuration("Keyboard").unwrap();
        input.set_configuration("Gamepad").unwrap();
        assert_eq!(input.axis("Horizontal").unwrap(), 0.0);

        // Same name again is a no-op
        input.set_configuration("Gamepad").unwrap();
        let changes = events
            .borrow()
            .iter()
            .filter(|e| matches!(e, InputManagerEvent::ConfigurationChanged { .. }))
            .count();
        assert_eq!(changes, 3);

        assert_eq!(
            input.set_configuration("Wheel").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(input.current_configuration_name(), Some("Gamepad"));
    }

    #[test]
    fn test_delete_active_falls_back_to_default_then_first() {
        let mut input = manager();
        input.create_configuration("Touch").unwrap();
        input.set_default_configuration(Some("Touch"));

        input.delete_configuration("Keyboard").unwrap();
        assert_eq!(input.current_configuration_name(), Some("Touch"));

        input.delete_configuration("Touch").unwrap();
        assert_eq!(input.current_configuration_name(), Some("Gamepad"));

        input.delete_configuration("Gamepad").unwrap();
        assert_eq!(input.current_configuration_name(), None);
        assert_eq!(
            input.axis("Horizontal").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert!(!input.any_input(None).unwrap());

        assert!(input.delete_configuration("Gamepad").is_err());
    }

    #[test]
    fn test_unknown_axis_is_not_found() {
        let input = manager();
        let err = input.button("Crouch").unwrap_err();
        assert!(matches!(err, InputError::AxisNotFound { .. }));
    }

    #[test]
    fn test_axis_creation_marks_dirty() {
        let mut input = manager();
        let events = record_events(&mut input);
        input.create_empty_axis("Gamepad", "Spare").unwrap();
        input.delete_axis("Gamepad", "Spare").unwrap();
        assert_eq!(
            *events.borrow(),
            vec![
                InputManagerEvent::ConfigurationDirty {
                    name: "Gamepad".into()
                };
                2
            ]
        );
    }

    #[test]
    fn test_failed_creation_leaves_state_unchanged() {
        let mut input = manager();
        let err = input
            .create_analog_axis("Gamepad", "Vertical", 0, 10, 1.0, 0.1)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        let err = input
            .create_analog_axis("Gamepad", "Vertical", 4, 1, 1.0, 0.1)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(!input.configuration("Gamepad").unwrap().contains("Vertical"));
    }

    #[test]
    fn test_any_input_named_and_active() {
        let mut input = manager();
        let mut devices = DeviceState::new();
        devices.press(KeyCode::Space);
        input.update(&devices, 0.1);
        assert!(input.any_input(None).unwrap());
        assert!(!input.any_input(Some("Gamepad")).unwrap());
        assert!(input.any_input(Some("Missing")).is_err());
    }

    #[test]
    fn test_remote_injection_is_immediate() {
        let mut input = manager();
        input.create_remote_axis("Keyboard", "Throttle").unwrap();
        input.create_remote_button("Keyboard", "Horn").unwrap();

        input
            .set_remote_axis_value("Keyboard", "Throttle", 0.5)
            .unwrap();
        assert_eq!(input.axis("Throttle").unwrap(), 0.5);

        input
            .set_remote_button_value("Keyboard", "Horn", true, true)
            .unwrap();
        assert!(input.button_down("Horn").unwrap());

        let err = input
            .set_remote_axis_value("Keyboard", "Jump", 1.0)
            .unwrap_err();
        assert!(matches!(err, InputError::BindingMismatch { .. }));
        let err = input
            .set_remote_axis_value("Keyboard", "Missing", 1.0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_scan_cancel_button() {
        let mut input = manager();
        let results = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&results);
        input
            .start_scan(
                ScanSettings::new(ScanKind::Key).with_cancel_button("Cancel"),
                move |result: &ScanResult<'_>| {
                    sink.borrow_mut().push((result.input, result.status));
                    true
                },
            )
            .unwrap();

        let mut devices = DeviceState::new();
        input.update(&devices, 0.1);
        devices.press(KeyCode::Escape);
        input.update(&devices, 0.1);

        assert_eq!(
            *results.borrow(),
            vec![(ScannedInput::None, ScanStatus::Cancelled)]
        );
        assert!(!input.is_scanning());
    }

    #[test]
    fn test_scan_rejects_unknown_cancel_button() {
        let mut input = manager();
        let err = input
            .start_scan(
                ScanSettings::new(ScanKind::Key).with_cancel_button("Back"),
                |_: &ScanResult<'_>| true,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!input.is_scanning());
    }

    #[test]
    fn test_load_is_all_or_nothing() {
        let mut input = manager();
        let mut bad = input.bindings();
        bad.configurations.push(bad.configurations[0].clone());

        let err = input.load(&mut bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
        assert_eq!(input.configuration_count(), 2);
        assert_eq!(input.current_configuration_name(), Some("Keyboard"));
    }

    #[test]
    fn test_load_without_default_keeps_configured_default() {
        let options = InputOptions {
            default_configuration: Some("Gamepad".into()),
            ..InputOptions::default()
        };
        let mut input = InputManager::new(&options);
        let mut store = manager().bindings();
        store.default_configuration = None;

        input.load(&mut store).unwrap();
        assert_eq!(input.default_configuration(), Some("Gamepad"));
        assert_eq!(input.current_configuration_name(), Some("Gamepad"));
    }

    #[test]
    fn test_save_then_load_selects_default() {
        let mut input = manager();
        input.set_default_configuration(Some("Gamepad"));
        let mut store = InputBindings::default();
        input.save(&mut store).unwrap();

        let mut fresh = InputManager::with_clock(Box::new(UnscaledClock::new()));
        let events = record_events(&mut fresh);
        fresh.load(&mut store).unwrap();

        assert_eq!(fresh.current_configuration_name(), Some("Gamepad"));
        let names: Vec<_> = fresh.configurations().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["Keyboard", "Gamepad"]);
        assert_eq!(
            *events.borrow(),
            vec![
                InputManagerEvent::Loaded,
                InputManagerEvent::ConfigurationChanged {
                    name: "Gamepad".into()
                }
            ]
        );
    }
}
