//! Input settings
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::input::scan::DEFAULT_SCAN_TIMEOUT;

/// Environment variable prefix, e.g. `OIL_INPUT_INPUT__TIME_SCALE=0.5`
pub const ENV_PREFIX: &str = "OIL_INPUT";

/// Environment variable selecting the profile
pub const PROFILE_ENV: &str = "OIL_INPUT_PROFILE";

/// Timing and bindings settings for the input manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputOptions {
    /// Use real time for axis decay and scan timeouts, ignoring the time scale
    pub ignore_timescale: bool,
    /// Initial time scale of the scaled clock
    pub time_scale: f32,
    /// Configuration preferred on load and after deleting the active one
    pub default_configuration: Option<String>,
    /// Where bindings are saved and loaded
    pub bindings_path: PathBuf,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            ignore_timescale: false,
            time_scale: 1.0,
            default_configuration: None,
            bindings_path: PathBuf::from("config/bindings.toml"),
        }
    }
}

/// Defaults applied by `ScanSettings::from_defaults`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanDefaults {
    /// Seconds before a scan gives up
    pub timeout: f32,
    /// Button axis that aborts a scan
    pub cancel_button: Option<String>,
}

impl Default for ScanDefaults {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_SCAN_TIMEOUT,
            cancel_button: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Probe window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Oil Input Probe".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSettings {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    #[serde(default)]
    pub input: InputOptions,
    #[serde(default)]
    pub scan: ScanDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

impl InputSettings {
    /// Loads settings for the specified profile
    ///
    /// Sources, in order:
    /// 1. config/{profile}.toml
    /// 2. Environment variables with prefix OIL_INPUT_ (e.g., OIL_INPUT_SCAN__TIMEOUT=5)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(dir) = Self::find_config_dir() {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{profile}")).required(false));
        }

        // Use __ as separator for nested fields (e.g., OIL_INPUT_INPUT__TIME_SCALE)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    pub fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads settings using the OIL_INPUT_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Built-in settings used when no file can be loaded
    pub fn fallback(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            input: InputOptions::default(),
            scan: ScanDefaults::default(),
            logging: LoggingConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::fallback("release"))
    }
}
