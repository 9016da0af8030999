//! UI screens for the application.

pub mod home;
pub mod settings;

pub use home::{HomeScreen, HomeStatus};
pub use settings::{SettingsAction, SettingsView, GEOFENCES_LOADED_TOAST};
