//! Settings profiles shipped in config/

use oil_input::config::InputSettings;
use oil_input::input::{InputManager, ScanKind, ScanSettings};

#[test]
fn test_shipped_profiles_load() {
    for profile in ["debug", "release"] {
        let settings = InputSettings::load(profile)
            .unwrap_or_else(|e| panic!("profile '{profile}' failed to load: {e}"));
        assert_eq!(settings.profile, profile);
        assert_eq!(settings.scan.cancel_button.as_deref(), Some("Cancel"));
        assert_eq!(
            settings.input.default_configuration.as_deref(),
            Some("Keyboard")
        );
        assert!(settings.scan.timeout > 0.0);
    }
}

#[test]
fn test_debug_profile_ignores_timescale() {
    let settings = InputSettings::load("debug").unwrap();
    assert!(settings.input.ignore_timescale);
    assert!(settings.logging.filter.contains("oil_input=debug"));
}

#[test]
fn test_scan_defaults_flow_into_settings() {
    let settings = InputSettings::load("release").unwrap();
    let scan = ScanSettings::from_defaults(ScanKind::Key, &settings.scan);
    assert_eq!(scan.timeout, settings.scan.timeout);
    assert_eq!(scan.cancel_button.as_deref(), Some("Cancel"));

    // The cancel button must exist in the active configuration
    let mut input = InputManager::new(&settings.input);
    input.create_configuration("Keyboard").unwrap();
    assert!(input.start_scan(scan, |_: &oil_input::input::ScanResult<'_>| true).is_err());
    assert!(!input.is_scanning());
}
