//! Saving and loading input configurations
//!
//! The manager only knows the [`InputSaver`] and [`InputLoader`] traits; the
//! on-disk format lives entirely in the implementations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::configuration::InputConfiguration;
use super::error::Result;

/// Everything that is persisted: the configurations and which one is the default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputBindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_configuration: Option<String>,
    #[serde(default)]
    pub configurations: Vec<InputConfiguration>,
}

impl InputBindings {
    /// Serializes to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parses TOML produced by [`to_toml_string`](Self::to_toml_string) or written by hand
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn configuration(&self, name: &str) -> Option<&InputConfiguration> {
        self.configurations.iter().find(|c| c.name() == name)
    }
}

/// Destination for [`InputBindings`]
pub trait InputSaver {
    fn save(&mut self, bindings: &InputBindings) -> Result<()>;
}

/// Source of [`InputBindings`]
pub trait InputLoader {
    fn load(&mut self) -> Result<InputBindings>;
}

/// In-memory bindings act as both saver and loader
impl InputSaver for InputBindings {
    fn save(&mut self, bindings: &InputBindings) -> Result<()> {
        *self = bindings.clone();
        Ok(())
    }
}

impl InputLoader for InputBindings {
    fn load(&mut self) -> Result<InputBindings> {
        Ok(self.clone())
    }
}

/// Bindings stored as a TOML file
#[derive(Debug, Clone)]
pub struct TomlBindingsFile {
    path: PathBuf,
}

impl TomlBindingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputSaver for TomlBindingsFile {
    fn save(&mut self, bindings: &InputBindings) -> Result<()> {
        let text = bindings.to_toml_string()?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), "Wrote input bindings");
        Ok(())
    }
}

impl InputLoader for TomlBindingsFile {
    fn load(&mut self) -> Result<InputBindings> {
        let text = fs::read_to_string(&self.path)?;
        let bindings = InputBindings::from_toml_str(&text)?;
        debug!(
            path = %self.path.display(),
            configurations = bindings.configurations.len(),
            "Read input bindings"
        );
        Ok(bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::axis::{AxisBinding, AxisType};
    use crate::input::error::ErrorKind;
    use crate::input::key_code::KeyCode;

    const SAMPLE: &str = r#"
default_configuration = "Keyboard"

[[configurations]]
name = "Keyboard"

[[configurations.axes]]
name = "Jump"
description = "Leave the ground"
binding = { type = "Button", positive = "Space", alt_positive = "Joystick0Button0" }

[[configurations.axes]]
name = "Horizontal"
binding = { type = "DigitalAxis", positive = "D", negative = "A", gravity = 3.0, sensitivity = 3.0, snap = true }

[[configurations.axes]]
name = "Throttle"
binding = { type = "RemoteAxis" }
"#;

    #[test]
    fn test_parse_hand_written_bindings() {
        let bindings = InputBindings::from_toml_str(SAMPLE).unwrap();
        assert_eq!(bindings.default_configuration.as_deref(), Some("Keyboard"));

        let keyboard = bindings.configuration("Keyboard").unwrap();
        let names: Vec<_> = keyboard.axes().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Jump", "Horizontal", "Throttle"]);

        let jump = keyboard.axis("Jump").unwrap();
        assert_eq!(jump.description(), "Leave the ground");
        match jump.binding() {
            AxisBinding::Button(b) => {
                assert_eq!(b.positive, KeyCode::Space);
                assert!(b.alt_positive.is_joystick_button());
            }
            other => panic!("unexpected binding {other:?}"),
        }

        match keyboard.axis("Horizontal").unwrap().binding() {
            AxisBinding::DigitalAxis(b) => {
                assert_eq!(b.gravity, 3.0);
                assert!(b.snap);
                assert!(!b.invert);
                assert_eq!(b.alt_positive, KeyCode::None);
            }
            other => panic!("unexpected binding {other:?}"),
        }
        assert_eq!(
            keyboard.axis("Throttle").unwrap().axis_type(),
            AxisType::RemoteAxis
        );
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        let text = r#"
[[configurations]]
name = "Keyboard"

[[configurations.axes]]
name = "Jump"
binding = { type = "Button", positive = "Spacebar" }
"#;
        let err = InputBindings::from_toml_str(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = TomlBindingsFile::new(dir.path().join("nested").join("bindings.toml"));

        let original = InputBindings::from_toml_str(SAMPLE).unwrap();
        file.save(&original).unwrap();
        let reloaded = file.load().unwrap();

        assert_eq!(reloaded.default_configuration, original.default_configuration);
        let before = &original.configurations[0];
        let after = &reloaded.configurations[0];
        assert_eq!(before.name(), after.name());
        for (a, b) in before.axes().iter().zip(after.axes()) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.binding(), b.binding());
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut file = TomlBindingsFile::new("/nonexistent/dir/bindings.toml");
        assert_eq!(file.load().unwrap_err().kind(), ErrorKind::Persistence);
    }
}
