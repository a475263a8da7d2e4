//! Main application handler for the input probe

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{Window, WindowId};

use super::window::window_attributes_from_config;
use crate::config::InputSettings;
use crate::input::{
    AxisBinding, AxisType, ButtonBinding, InputCollector, InputManager, InputManagerEvent,
    KeyCode, Result as InputResult, ScanKind, ScanKinds, ScanResult, ScanSettings, ScanStatus,
    ScannedInput, Subscription, TomlBindingsFile,
};

/// Smallest change in an axis value worth logging
const LOG_EPSILON: f32 = 1e-3;

/// Scan result waiting to be applied: the axis to rebind and what was pressed
type PendingRebind = Rc<RefCell<Option<(String, ScannedInput)>>>;

/// Window that feeds real keyboard and mouse input into an [`InputManager`]
///
/// Hotkeys:
/// - F1 scans for a key and rebinds the first button of the active configuration
/// - Tab cycles configurations
/// - F5 saves the bindings
pub struct ProbeApp {
    settings: InputSettings,
    window: Option<Window>,
    last_update: Option<Instant>,
    collector: InputCollector,
    input: InputManager,
    bindings_file: TomlBindingsFile,
    subscription: Option<Subscription>,
    pending_rebind: PendingRebind,
    /// F1 seen since the last frame; the scan starts after the next update
    rebind_requested: bool,
    last_values: HashMap<String, f32>,
}

impl ProbeApp {
    pub fn new(settings: InputSettings, mut input: InputManager, bindings_file: TomlBindingsFile) -> Self {
        info!(profile = %settings.profile, "Starting input probe");

        let subscription = input.subscribe(|event: &InputManagerEvent| {
            info!(?event, "Input manager event");
        });

        Self {
            settings,
            window: None,
            last_update: None,
            collector: InputCollector::new(),
            input,
            bindings_file,
            subscription: Some(subscription),
            pending_rebind: Rc::new(RefCell::new(None)),
            rebind_requested: false,
            last_values: HashMap::new(),
        }
    }

    fn handle_hotkey(&mut self, key: WinitKey) {
        let outcome = match key {
            WinitKey::F1 => {
                self.rebind_requested = true;
                Ok(())
            }
            WinitKey::Tab => self.cycle_configuration(),
            WinitKey::F5 => self.input.save(&mut self.bindings_file),
            _ => Ok(()),
        };
        if let Err(e) = outcome {
            warn!(error = %e, ?key, "Hotkey failed");
        }
    }

    fn start_rebind_scan(&mut self) -> InputResult<()> {
        let Some(target) = self.input.current_configuration().and_then(|config| {
            config
                .axes()
                .iter()
                .find(|axis| axis.axis_type() == AxisType::Button)
                .map(|axis| axis.name().to_string())
        }) else {
            warn!("Active configuration has no button to rebind");
            return Ok(());
        };

        let kinds: ScanKinds = [ScanKind::Key, ScanKind::JoystickButton, ScanKind::MouseAxis]
            .into_iter()
            .collect();
        let settings = ScanSettings::from_defaults(kinds, &self.settings.scan).with_user_data(target.clone());

        let pending = Rc::clone(&self.pending_rebind);
        self.input.start_scan(settings, move |result: &ScanResult<'_>| {
            match (result.status, result.input) {
                (ScanStatus::Candidate, ScannedInput::MouseAxis { .. }) => {
                    info!(input = %result.input, "Ignoring mouse motion while rebinding");
                    false
                }
                (ScanStatus::Candidate, input) => {
                    if let Some(axis) = result.user_data_as::<String>() {
                        *pending.borrow_mut() = Some((axis.clone(), input));
                    }
                    true
                }
                (status, _) => {
                    info!(?status, "Rebind scan ended without input");
                    false
                }
            }
        })?;
        info!(axis = %target, "Press a key to rebind");
        Ok(())
    }

    fn apply_pending_rebind(&mut self) -> InputResult<()> {
        let Some((axis, input)) = self.pending_rebind.borrow_mut().take() else {
            return Ok(());
        };
        let key = match input {
            ScannedInput::Key(key) | ScannedInput::JoystickButton(key) => key,
            _ => return Ok(()),
        };
        let Some(configuration) = self.input.current_configuration_name().map(str::to_string)
        else {
            return Ok(());
        };

        let target = self
            .input
            .configuration_mut(&configuration)?
            .require_axis_mut(&axis)?;
        let alt_positive = match target.binding() {
            AxisBinding::Button(binding) => binding.alt_positive,
            _ => KeyCode::None,
        };
        target.set_binding(AxisBinding::Button(ButtonBinding::new(key, alt_positive)))?;
        info!(configuration = %configuration, axis = %axis, %key, "Rebound button");
        self.input.mark_configuration_dirty(&configuration)
    }

    fn cycle_configuration(&mut self) -> InputResult<()> {
        let names: Vec<String> = self
            .input
            .configurations()
            .map(|config| config.name().to_string())
            .collect();
        if names.is_empty() {
            return Ok(());
        }
        let current = self
            .input
            .current_configuration_name()
            .and_then(|name| names.iter().position(|n| n == name));
        let next = current.map_or(0, |index| (index + 1) % names.len());
        self.input.set_configuration(&names[next])
    }

    fn log_changed_axes(&mut self) {
        let Some(config) = self.input.current_configuration() else {
            return;
        };
        for axis in config.axes() {
            let value = axis.axis();
            let last = self.last_values.entry(axis.name().to_string()).or_insert(0.0);
            if (value - *last).abs() > LOG_EPSILON {
                info!(
                    configuration = config.name(),
                    axis = axis.name(),
                    value,
                    raw = axis.axis_raw(),
                    "Axis changed"
                );
                *last = value;
            }
            if axis.button_down() {
                info!(axis = axis.name(), "Button pressed");
            }
        }
    }
}

impl ApplicationHandler for ProbeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(window_attributes_from_config(&self.settings.window)) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created successfully"
                );
                self.window = Some(window);
                self.last_update = Some(Instant::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };
        let now = Instant::now();
        let frame_delta = (now - last_update).as_secs_f32();
        self.last_update = Some(now);

        // Axis pass then scan pass, both against this frame's samples
        self.input.update(self.collector.state(), frame_delta);
        if let Err(e) = self.apply_pending_rebind() {
            warn!(error = %e, "Failed to apply scanned binding");
        }
        // Started after the update so the held F1 is not offered as a candidate
        if std::mem::take(&mut self.rebind_requested)
            && let Err(e) = self.start_rebind_scan()
        {
            warn!(error = %e, "Failed to start rebind scan");
        }
        self.log_changed_axes();

        // Mouse deltas are per frame
        self.collector.advance_frame();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.collector.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state.is_pressed() && !event.repeat =>
            {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.handle_hotkey(key);
                }
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        self.collector.handle_device_event(&event);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(subscription) = self.subscription.take() {
            self.input.unsubscribe(subscription);
        }
        if self.input.is_scanning() {
            self.input.cancel_scan();
        }
    }
}
