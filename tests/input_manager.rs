//! Integration tests for the input manager frame loop

use std::cell::RefCell;
use std::rc::Rc;

use oil_input::config::InputOptions;
use oil_input::input::{
    DeviceState, ErrorKind, InputManager, KeyCode, ScaledClock, ScanKind, ScanResult,
    ScanSettings, ScanStatus, ScannedInput, UnscaledClock,
};

const FRAME: f32 = 1.0 / 60.0;

fn keyboard_manager() -> InputManager {
    let mut input = InputManager::with_clock(Box::new(UnscaledClock::new()));
    input.create_configuration("Keyboard").unwrap();
    input
        .create_digital_axis("Keyboard", "Horizontal", KeyCode::A, KeyCode::D, 3.0, 3.0)
        .unwrap();
    input
        .create_button("Keyboard", "Fire", KeyCode::Mouse0, KeyCode::LeftControl)
        .unwrap();
    input
}

#[test]
fn test_digital_axis_reaches_one_then_decays_to_zero() {
    let mut input = keyboard_manager();
    let mut devices = DeviceState::new();

    devices.press(KeyCode::A);
    for _ in 0..60 {
        input.update(&devices, FRAME);
    }
    assert_eq!(input.axis("Horizontal").unwrap(), 1.0);
    assert_eq!(input.axis_raw("Horizontal").unwrap(), 1.0);

    devices.release(KeyCode::A);
    let mut previous = input.axis("Horizontal").unwrap();
    for _ in 0..21 {
        input.update(&devices, FRAME);
        let value = input.axis("Horizontal").unwrap();
        assert!(value <= previous, "decay must be monotonic");
        assert!(value >= 0.0, "decay must not overshoot zero");
        previous = value;
    }
    assert_eq!(input.axis("Horizontal").unwrap(), 0.0);
    assert_eq!(input.axis_raw("Horizontal").unwrap(), 0.0);
}

#[test]
fn test_button_edges_last_one_frame() {
    let mut input = keyboard_manager();
    let mut devices = DeviceState::new();

    devices.press(KeyCode::LeftControl);
    input.update(&devices, FRAME);
    assert!(input.button_down("Fire").unwrap());
    assert!(input.button("Fire").unwrap());

    input.update(&devices, FRAME);
    assert!(!input.button_down("Fire").unwrap());
    assert!(input.button("Fire").unwrap());

    devices.release(KeyCode::LeftControl);
    input.update(&devices, FRAME);
    assert!(input.button_up("Fire").unwrap());
    assert!(!input.button("Fire").unwrap());

    input.update(&devices, FRAME);
    assert!(!input.button_up("Fire").unwrap());
}

#[test]
fn test_switching_configuration_resets_every_axis() {
    let mut input = keyboard_manager();
    input.create_configuration("Alt").unwrap();
    let mut devices = DeviceState::new();
    devices.press(KeyCode::A);
    devices.press(KeyCode::Mouse0);
    for _ in 0..10 {
        input.update(&devices, FRAME);
    }
    assert!(input.axis("Horizontal").unwrap() > 0.0);
    assert!(input.any_input(None).unwrap());

    for _ in 0..3 {
        input.set_configuration("Alt").unwrap();
        input.set_configuration("Keyboard").unwrap();
        assert_eq!(input.axis("Horizontal").unwrap(), 0.0);
        assert!(!input.button("Fire").unwrap());
        assert!(!input.any_input(None).unwrap());
    }
}

#[test]
fn test_duplicate_names_leave_state_unchanged() {
    let mut input = keyboard_manager();
    let err = input
        .create_button("Keyboard", "Horizontal", KeyCode::Space, KeyCode::None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateName);

    let config = input.configuration("Keyboard").unwrap();
    assert_eq!(config.len(), 2);
    assert_eq!(
        config.axis("Horizontal").unwrap().axis_type().to_string(),
        "digital axis"
    );
}

#[test]
fn test_analog_axis_ranges() {
    let mut input = keyboard_manager();
    for (joystick, axis) in [(0, 10), (4, 0), (7, 12)] {
        let err = input
            .create_analog_axis("Keyboard", "Stick", joystick, axis, 1.0, 0.1)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }
    assert!(!input.configuration("Keyboard").unwrap().contains("Stick"));

    input
        .create_analog_axis("Keyboard", "Stick", 3, 9, 1.0, 0.1)
        .unwrap();
}

#[test]
fn test_remote_axis_example() {
    let mut input = InputManager::with_clock(Box::new(UnscaledClock::new()));
    input.create_configuration("cfg").unwrap();
    input.create_remote_axis("cfg", "throttle").unwrap();
    input
        .create_button("cfg", "brake", KeyCode::B, KeyCode::None)
        .unwrap();

    input.set_remote_axis_value("cfg", "throttle", 0.5).unwrap();
    assert_eq!(input.axis("throttle").unwrap(), 0.5);

    assert!(input.set_remote_axis_value("cfg", "brake", 0.5).is_err());
}

#[test]
fn test_time_scale_pauses_digital_axis() {
    let mut input = InputManager::with_clock(Box::new(ScaledClock::new().with_time_scale(0.0)));
    input.create_configuration("Keyboard").unwrap();
    input
        .create_digital_axis("Keyboard", "Horizontal", KeyCode::A, KeyCode::D, 3.0, 3.0)
        .unwrap();
    let mut devices = DeviceState::new();
    devices.press(KeyCode::A);

    input.update(&devices, 0.1);
    assert_eq!(input.axis("Horizontal").unwrap(), 0.0);
    assert_eq!(input.axis_raw("Horizontal").unwrap(), 1.0);

    input.set_time_scale(1.0);
    input.update(&devices, 0.1);
    assert!((input.axis("Horizontal").unwrap() - 0.3).abs() < 1e-5);
}

#[test]
fn test_ignore_timescale_uses_real_time() {
    let options = InputOptions {
        ignore_timescale: true,
        time_scale: 0.0,
        ..InputOptions::default()
    };
    let mut input = InputManager::new(&options);
    input.create_configuration("Keyboard").unwrap();
    input
        .create_digital_axis("Keyboard", "Horizontal", KeyCode::A, KeyCode::D, 3.0, 3.0)
        .unwrap();
    let mut devices = DeviceState::new();
    devices.press(KeyCode::A);

    input.set_time_scale(0.0);
    input.update(&devices, 0.1);
    assert!((input.axis("Horizontal").unwrap() - 0.3).abs() < 1e-5);
}

type Calls = Rc<RefCell<Vec<(ScannedInput, ScanStatus, f64)>>>;

#[test]
fn test_scan_timeout_reports_none_once() {
    let mut input = InputManager::with_clock(Box::new(ScaledClock::new()));
    input.create_configuration("Keyboard").unwrap();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let time = Rc::new(RefCell::new(0.0_f64));
    let clock_view = Rc::clone(&time);

    input
        .start_scan(
            ScanSettings::new(ScanKind::Key).with_timeout(1.0),
            move |result: &ScanResult<'_>| {
                sink.borrow_mut()
                    .push((result.input, result.status, *clock_view.borrow()));
                true
            },
        )
        .unwrap();

    let devices = DeviceState::new();
    for _ in 0..8 {
        *time.borrow_mut() = input.time() + 0.25;
        input.update(&devices, 0.25);
    }

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    let (scanned, status, at) = calls[0];
    assert_eq!(scanned, ScannedInput::None);
    assert_eq!(status, ScanStatus::TimedOut);
    assert!(at >= 1.0);
    assert!(!input.is_scanning());
}

#[test]
fn test_scan_offers_each_frame_until_accepted() {
    let mut input = keyboard_manager();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);

    input
        .start_scan(
            ScanSettings::new(ScanKind::MouseAxis).with_timeout(f32::INFINITY),
            move |result: &ScanResult<'_>| {
                let mut calls = sink.borrow_mut();
                calls.push((result.input, result.status, 0.0));
                calls.len() == 3
            },
        )
        .unwrap();

    let mut devices = DeviceState::new();
    for _ in 0..6 {
        devices.set_mouse_delta(0, 4.0);
        input.update(&devices, FRAME);
        devices.advance_frame();
    }

    let calls = calls.borrow();
    assert_eq!(calls.len(), 3);
    for (scanned, status, _) in calls.iter() {
        assert_eq!(*status, ScanStatus::Candidate);
        assert_eq!(*scanned, ScannedInput::MouseAxis { axis: 0, value: 4.0 });
    }
    assert!(!input.is_scanning());
}

#[test]
fn test_key_held_before_scan_is_not_reported() {
    let mut input = keyboard_manager();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);

    let mut devices = DeviceState::new();
    devices.press(KeyCode::Space);
    input.update(&devices, FRAME);

    input
        .start_scan(ScanSettings::new(ScanKind::Key), move |result: &ScanResult<'_>| {
            sink.borrow_mut().push((result.input, result.status, 0.0));
            true
        })
        .unwrap();

    input.update(&devices, FRAME);
    input.update(&devices, FRAME);
    assert!(calls.borrow().is_empty());

    devices.press(KeyCode::J);
    input.update(&devices, FRAME);
    assert_eq!(
        calls.borrow().as_slice(),
        &[(ScannedInput::Key(KeyCode::J), ScanStatus::Candidate, 0.0)]
    );
}

#[test]
fn test_key_pressed_on_first_scanning_frame_is_offered_once() {
    let mut input = keyboard_manager();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);

    let mut devices = DeviceState::new();
    input.update(&devices, FRAME);

    input
        .start_scan(ScanSettings::new(ScanKind::Key), move |result: &ScanResult<'_>| {
            sink.borrow_mut().push((result.input, result.status, 0.0));
            true
        })
        .unwrap();

    devices.press(KeyCode::J);
    for _ in 0..30 {
        input.update(&devices, FRAME);
    }

    assert_eq!(
        calls.borrow().as_slice(),
        &[(ScannedInput::Key(KeyCode::J), ScanStatus::Candidate, 0.0)]
    );
    assert!(!input.is_scanning());
}

#[test]
fn test_joystick_button_scan_skips_keyboard_keys() {
    let mut input = keyboard_manager();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);

    let mut devices = DeviceState::new();
    input.update(&devices, FRAME);

    input
        .start_scan(
            ScanSettings::new(ScanKind::JoystickButton),
            move |result: &ScanResult<'_>| {
                sink.borrow_mut().push((result.input, result.status, 0.0));
                true
            },
        )
        .unwrap();

    let pad: KeyCode = "Joystick1Button4".parse().unwrap();
    devices.press(KeyCode::Space);
    devices.press(pad);
    input.update(&devices, FRAME);

    assert_eq!(
        calls.borrow().as_slice(),
        &[(ScannedInput::JoystickButton(pad), ScanStatus::Candidate, 0.0)]
    );
    assert!(!input.is_scanning());
}

#[test]
fn test_new_scan_replaces_old_and_notifies_it() {
    let mut input = keyboard_manager();
    let first: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&first);

    input
        .start_scan(ScanSettings::new(ScanKind::Key), move |result: &ScanResult<'_>| {
            sink.borrow_mut().push((result.input, result.status, 0.0));
            true
        })
        .unwrap();
    input
        .start_scan(ScanSettings::new(ScanKind::MouseAxis), |_: &ScanResult<'_>| true)
        .unwrap();

    assert_eq!(
        first.borrow().as_slice(),
        &[(ScannedInput::None, ScanStatus::Replaced, 0.0)]
    );
    assert!(input.is_scanning());

    input.cancel_scan();
    assert!(!input.is_scanning());
    input.cancel_scan();
}
