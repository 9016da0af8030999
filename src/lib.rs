//! BgGeo - Background Geolocation Settings
//!
//! A settings panel for a background-geolocation plugin. Setting descriptors
//! published by the plugin and the app settings store are rendered as form
//! controls; edits are coerced, debounced and written back to the plugin one
//! key at a time.

pub mod form;
pub mod plugin;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use form::{ChangeDebouncer, FormState};
pub use plugin::{DefaultGeolocationPlugin, GeolocationPlugin, LogLevelCodec};
pub use storage::{AppConfig, DefaultSettingsStore, SettingsStore};
pub use ui::screens::{SettingsAction, SettingsView};
