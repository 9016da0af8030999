//! In-process plugin implementation.
//!
//! Holds the plugin configuration in memory, validates patches against the
//! platform catalog and simulates the latency of the native bridge for
//! geofence loading.

use super::catalog;
use super::descriptor::{DataType, InputType, SettingDescriptor, SettingValue, SettingsSection, SettingsState};
use super::geofence::{self, Geofence, GeofenceTemplate};
use super::log_level::{LogLevel, LogLevelConstants};
use super::sound::{Sound, SoundPlayer};
use super::{ConfigPatch, GeolocationPlugin, PluginError, TrackingMode};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Default plugin implementation
pub struct DefaultGeolocationPlugin {
    state: Arc<Mutex<SettingsState>>,
    geofences: Arc<Mutex<Vec<Geofence>>>,
    sounds: SoundPlayer,
    constants: LogLevelConstants,
    latency: Duration,
}

impl Default for DefaultGeolocationPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultGeolocationPlugin {
    /// Create a plugin with catalog defaults.
    pub fn new() -> Self {
        let mut state = SettingsState::from_defaults(&catalog::platform_settings());

        // Native plugin stores the numeric level, not the name
        state.insert("logLevel", SettingValue::Integer(LogLevel::Verbose as i64));
        state.insert("trackingMode", SettingValue::Integer(1));
        state.insert("enabled", SettingValue::Bool(false));

        Self {
            state: Arc::new(Mutex::new(state)),
            geofences: Arc::new(Mutex::new(Vec::new())),
            sounds: SoundPlayer::default(),
            constants: LogLevelConstants::default(),
            latency: Duration::from_millis(300),
        }
    }

    /// Set the simulated bridge latency for asynchronous operations.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the sound player (e.g. a muted one).
    pub fn with_sounds(mut self, sounds: SoundPlayer) -> Self {
        self.sounds = sounds;
        self
    }

    /// Override the reported log-level constants.
    pub fn with_log_level_constants(mut self, constants: LogLevelConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Geofences currently monitored.
    pub fn geofences(&self) -> Vec<Geofence> {
        self.geofences.lock().unwrap().clone()
    }

    fn validate(descriptor: &SettingDescriptor, value: &SettingValue) -> Result<(), PluginError> {
        let invalid = || PluginError::InvalidValue {
            key: descriptor.name.clone(),
            value: value.to_string(),
        };

        // logLevel arrives encoded as a number
        if descriptor.name == "logLevel" {
            return match value.as_integer() {
                Some(n) if LogLevel::all().iter().any(|l| *l as i64 == n) => Ok(()),
                _ => Err(invalid()),
            };
        }

        let type_ok = match descriptor.data_type {
            DataType::Integer => value.as_integer().is_some(),
            DataType::Boolean => value.as_bool().is_some(),
            DataType::String => matches!(value, SettingValue::Text(_)),
        };
        if !type_ok {
            return Err(invalid());
        }

        if descriptor.input_type == InputType::Select && !descriptor.values.contains(value) {
            return Err(invalid());
        }

        Ok(())
    }

    fn set_tracking_mode(&self, mode: TrackingMode) {
        let mut state = self.state.lock().unwrap();
        let raw = match mode {
            TrackingMode::Location => 1,
            TrackingMode::Geofence => 0,
        };
        state.insert("trackingMode", SettingValue::Integer(raw));
        state.insert("enabled", SettingValue::Bool(true));
    }
}

impl GeolocationPlugin for DefaultGeolocationPlugin {
    fn get_state(&self) -> Result<SettingsState, PluginError> {
        Ok(self.state.lock().unwrap().clone())
    }

    fn platform_settings(&self, section: Option<SettingsSection>) -> Vec<SettingDescriptor> {
        catalog::settings_for(section)
    }

    fn set_config(&self, patch: ConfigPatch) -> Result<SettingsState, PluginError> {
        let descriptor = catalog::platform_settings()
            .into_iter()
            .find(|d| d.name == patch.key)
            .ok_or_else(|| PluginError::UnknownKey(patch.key.clone()))?;

        Self::validate(&descriptor, &patch.value)?;

        let mut state = self.state.lock().unwrap();
        tracing::debug!("setConfig {} = {}", patch.key, patch.value);
        state.insert(patch.key, patch.value);
        Ok(state.clone())
    }

    fn start(&self) -> Result<(), PluginError> {
        tracing::info!("Starting location tracking");
        self.set_tracking_mode(TrackingMode::Location);
        Ok(())
    }

    fn start_geofences(&self) -> Result<(), PluginError> {
        tracing::info!("Starting geofence-only monitoring");
        self.set_tracking_mode(TrackingMode::Geofence);
        Ok(())
    }

    async fn load_test_geofences(
        &self,
        name: &str,
        app_settings: &SettingsState,
    ) -> Result<usize, PluginError> {
        let template = GeofenceTemplate::from_settings(app_settings);
        let set = geofence::build_test_set(name, &template)?;

        tokio::time::sleep(self.latency).await;

        let count = set.len();
        let mut geofences = self.geofences.lock().unwrap();
        for fence in set {
            // Re-adding an identifier replaces the existing region
            geofences.retain(|g| g.identifier != fence.identifier);
            geofences.push(fence);
        }

        tracing::info!(
            "Loaded {} geofences from '{}' (radius {}m)",
            count,
            name,
            template.radius
        );
        Ok(count)
    }

    fn remove_geofences(&self) -> Result<(), PluginError> {
        let mut geofences = self.geofences.lock().unwrap();
        tracing::info!("Removing {} geofences", geofences.len());
        geofences.clear();
        Ok(())
    }

    fn play_sound(&self, sound: Sound) {
        self.sounds.play(sound);
    }

    fn log_level_constants(&self) -> LogLevelConstants {
        self.constants
    }
}
