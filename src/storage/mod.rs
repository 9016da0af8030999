//! Storage module for configuration and app settings.

pub mod config;
pub mod settings_store;

pub use config::{AppConfig, ConfigError, PluginSettings, ThemePreference, UiSettings};
pub use settings_store::{DefaultSettingsStore, SettingsStore, StoreError, Toast};
