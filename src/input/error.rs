//! Error types for the input system
//!
//! Every variant here is a programmer or configuration error. Transient
//! conditions such as a scan timing out are reported through the scan
//! handler instead.

use thiserror::Error;

/// Errors raised by the input system
#[derive(Error, Debug)]
pub enum InputError {
    /// Referenced configuration does not exist
    #[error("Input configuration '{name}' does not exist")]
    ConfigurationNotFound { name: String },

    /// Referenced axis does not exist in the configuration
    #[error("Axis '{axis}' does not exist in input configuration '{configuration}'")]
    AxisNotFound { configuration: String, axis: String },

    /// A query was made against the active configuration but none is active
    #[error("No input configuration is active")]
    NoActiveConfiguration,

    /// A configuration with this name already exists
    #[error("An input configuration named '{name}' already exists")]
    DuplicateConfiguration { name: String },

    /// An axis with this name already exists in the configuration
    #[error("An axis named '{axis}' already exists in input configuration '{configuration}'")]
    DuplicateAxis { configuration: String, axis: String },

    /// Joystick, axis or button index outside the supported hardware range
    #[error("{what} {value} is out of range (0..={max})")]
    OutOfRange {
        what: &'static str,
        value: usize,
        max: usize,
    },

    /// Missing or malformed argument
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Remote value injected into an axis that is not a remote axis/button
    #[error("Axis '{axis}' is not a {expected}")]
    BindingMismatch { axis: String, expected: &'static str },

    /// Bindings file could not be read or written
    #[error("Bindings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Bindings file could not be parsed
    #[error("Failed to parse bindings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Bindings could not be serialized
    #[error("Failed to serialize bindings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Broad category of an [`InputError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DuplicateName,
    OutOfRange,
    InvalidArgument,
    Persistence,
}

impl InputError {
    /// Shorthand for an `InvalidArgument` error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns the category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigurationNotFound { .. }
            | Self::AxisNotFound { .. }
            | Self::NoActiveConfiguration
            | Self::BindingMismatch { .. } => ErrorKind::NotFound,
            Self::DuplicateConfiguration { .. } | Self::DuplicateAxis { .. } => {
                ErrorKind::DuplicateName
            }
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Io(_) | Self::Parse(_) | Self::Serialize(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type used throughout the input system
pub type Result<T> = std::result::Result<T, InputError>;

/// Checks that `value` lies within `0..limit`
pub(crate) fn check_range(what: &'static str, value: usize, limit: usize) -> Result<()> {
    if value < limit {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            what,
            value,
            max: limit - 1,
        })
    }
}

/// Rejects empty (or whitespace-only) names
pub(crate) fn check_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        Err(InputError::invalid(format!("{what} name must not be empty")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(InputError::NoActiveConfiguration.kind(), ErrorKind::NotFound);
        assert_eq!(
            InputError::DuplicateAxis {
                configuration: "kb".into(),
                axis: "Jump".into()
            }
            .kind(),
            ErrorKind::DuplicateName
        );
        assert_eq!(InputError::invalid("x").kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("joystick", 3, 4).is_ok());
        let err = check_range("joystick", 4, 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(err.to_string(), "joystick 4 is out of range (0..=3)");
    }

    #[test]
    fn test_check_name() {
        assert!(check_name("Axis", "Jump").is_ok());
        assert!(check_name("Axis", "  ").is_err());
    }
}
