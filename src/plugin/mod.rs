//! Background-geolocation plugin interface.
//!
//! The settings view talks to the plugin only through [`GeolocationPlugin`].
//! [`DefaultGeolocationPlugin`] is an in-process implementation holding its
//! configuration in memory.

pub mod catalog;
pub mod default;
pub mod descriptor;
pub mod geofence;
pub mod log_level;
pub mod sound;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Re-export main types
pub use default::DefaultGeolocationPlugin;
pub use descriptor::{
    DataType, InputType, SettingDescriptor, SettingValue, SettingsSection, SettingsState,
};
pub use geofence::{Geofence, GeofenceTemplate};
pub use log_level::{LogLevel, LogLevelCodec, LogLevelConstants};
pub use sound::Sound;

/// Plugin-related errors
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Plugin contract changed: {0}")]
    ContractDrift(String),

    #[error("Unknown geofence set: {0}")]
    UnknownGeofenceSet(String),

    #[error("Geofence operation failed: {0}")]
    GeofenceFailed(String),

    #[error("Audio error: {0}")]
    Audio(String),
}

/// Single-key configuration change forwarded to the plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigPatch {
    pub key: String,
    pub value: SettingValue,
}

impl ConfigPatch {
    pub fn new(key: impl Into<String>, value: SettingValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Plugin operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    /// Continuous location tracking
    #[default]
    Location,
    /// Geofence-only monitoring
    Geofence,
}

impl TrackingMode {
    /// Normalise a raw plugin value. Only `1` and `"location"` mean location tracking.
    pub fn decode(value: Option<&SettingValue>) -> TrackingMode {
        match value {
            Some(SettingValue::Integer(1)) => TrackingMode::Location,
            Some(SettingValue::Text(s)) if s == "location" => TrackingMode::Location,
            _ => TrackingMode::Geofence,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingMode::Location => "location",
            TrackingMode::Geofence => "geofence",
        }
    }
}

impl fmt::Display for TrackingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackingMode {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "location" => Ok(TrackingMode::Location),
            "geofence" => Ok(TrackingMode::Geofence),
            other => Err(PluginError::InvalidValue {
                key: "trackingMode".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Trait for background-geolocation plugin implementations
pub trait GeolocationPlugin: Send + Sync {
    /// Snapshot of the plugin's current configuration and runtime state
    fn get_state(&self) -> Result<SettingsState, PluginError>;

    /// Descriptors for platform settings, optionally filtered by section
    fn platform_settings(&self, section: Option<SettingsSection>) -> Vec<SettingDescriptor>;

    /// Apply a configuration change, returning the updated state
    fn set_config(&self, patch: ConfigPatch) -> Result<SettingsState, PluginError>;

    /// Start location tracking
    fn start(&self) -> Result<(), PluginError>;

    /// Start geofence-only monitoring
    fn start_geofences(&self) -> Result<(), PluginError>;

    /// Load a canned set of demonstration geofences
    fn load_test_geofences(
        &self,
        name: &str,
        app_settings: &SettingsState,
    ) -> impl std::future::Future<Output = Result<usize, PluginError>> + Send;

    /// Remove every monitored geofence
    fn remove_geofences(&self) -> Result<(), PluginError>;

    /// Play a UI sound effect
    fn play_sound(&self, sound: Sound);

    /// The plugin's `LOG_LEVEL_*` constants
    fn log_level_constants(&self) -> LogLevelConstants;
}
