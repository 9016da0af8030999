//! App settings store.
//!
//! Key/value settings owned by the application rather than the plugin
//! (geofence test options, log email), plus the toast notification channel
//! the settings panel reports through.

use crate::plugin::descriptor::{SettingDescriptor, SettingValue, SettingsSection, SettingsState};
use chrono::{DateTime, Utc};
use crossbeam::channel::{unbounded, Receiver, Sender};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Settings store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

/// Short-lived notification shown over the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Trait for app settings store implementations
pub trait SettingsStore: Send + Sync {
    /// Current values of all app settings
    fn get_state(&self) -> SettingsState;

    /// Descriptors for app settings, optionally filtered by section
    fn settings(&self, section: Option<SettingsSection>) -> Vec<SettingDescriptor>;

    /// Record a changed value
    fn on_change(&self, name: &str, value: SettingValue) -> Result<(), StoreError>;

    /// Show a toast notification
    fn toast(&self, message: &str);
}

/// App setting descriptors.
pub fn app_settings() -> Vec<SettingDescriptor> {
    use SettingsSection::*;

    vec![
        SettingDescriptor::text("email", Debug, ""),
        SettingDescriptor::string_select("radius", Geofence, "200", &["100", "150", "200", "500", "1000", "5000"]),
        SettingDescriptor::toggle("notifyOnEntry", Geofence, true),
        SettingDescriptor::toggle("notifyOnExit", Geofence, false),
        SettingDescriptor::toggle("notifyOnDwell", Geofence, false),
        SettingDescriptor::integer_select("loiteringDelay", Geofence, 0, &[0, 10000, 30000, 60000]),
    ]
}

/// Default settings store, optionally persisted as TOML.
pub struct DefaultSettingsStore {
    state: Mutex<SettingsState>,
    path: Option<PathBuf>,
    toast_tx: Sender<Toast>,
    toast_rx: Receiver<Toast>,
}

impl DefaultSettingsStore {
    /// Create a store that keeps values in memory only.
    pub fn in_memory() -> Self {
        Self::with_state(SettingsState::from_defaults(&app_settings()), None)
    }

    /// Open a store persisted at `path`, creating defaults if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut state = SettingsState::from_defaults(&app_settings());

        if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|e| StoreError::IoError(e.to_string()))?;
            let saved: SettingsState =
                toml::from_str(&content).map_err(|e| StoreError::ParseError(e.to_string()))?;

            for (name, value) in saved.iter() {
                if state.contains(name) {
                    state.insert(name.clone(), value.clone());
                } else {
                    tracing::debug!("Ignoring stale app setting '{}'", name);
                }
            }
            tracing::info!("Loaded app settings from {}", path.display());
        }

        Ok(Self::with_state(state, Some(path)))
    }

    fn with_state(state: SettingsState, path: Option<PathBuf>) -> Self {
        let (toast_tx, toast_rx) = unbounded();
        Self {
            state: Mutex::new(state),
            path,
            toast_tx,
            toast_rx,
        }
    }

    /// Receiver for toasts raised through [`SettingsStore::toast`].
    pub fn toast_receiver(&self) -> Receiver<Toast> {
        self.toast_rx.clone()
    }

    fn persist(path: &Path, state: &SettingsState) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::IoError(e.to_string()))?;
        }
        let content =
            toml::to_string_pretty(state).map_err(|e| StoreError::SerializeError(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| StoreError::IoError(e.to_string()))
    }
}

impl SettingsStore for DefaultSettingsStore {
    fn get_state(&self) -> SettingsState {
        self.state.lock().unwrap().clone()
    }

    fn settings(&self, section: Option<SettingsSection>) -> Vec<SettingDescriptor> {
        app_settings()
            .into_iter()
            .filter(|d| section.map_or(true, |s| d.section == s))
            .collect()
    }

    fn on_change(&self, name: &str, value: SettingValue) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if !state.contains(name) {
            return Err(StoreError::UnknownSetting(name.to_string()));
        }

        tracing::debug!("App setting {} = {}", name, value);
        let mut updated = state.clone();
        updated.insert(name, value);

        // Memory only changes once the file is written
        if let Some(path) = &self.path {
            Self::persist(path, &updated)?;
        }
        *state = updated;
        Ok(())
    }

    fn toast(&self, message: &str) {
        tracing::info!("Toast: {}", message);
        let _ = self.toast_tx.send(Toast::new(message));
    }
}
