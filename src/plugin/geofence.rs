//! Demonstration geofences.
//!
//! The "city_drive" set is a fixed list of intersections. Radius and
//! notification flags come from the app settings at load time.

use super::descriptor::{SettingValue, SettingsState};
use super::PluginError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the bundled test set.
pub const CITY_DRIVE: &str = "city_drive";

const CITY_DRIVE_JSON: &str = include_str!("../../assets/geofences/city_drive.json");

/// A monitored circular region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    pub identifier: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in meters
    pub radius: f64,
    pub notify_on_entry: bool,
    pub notify_on_exit: bool,
    pub notify_on_dwell: bool,
    /// Dwell time before a DWELL transition, in milliseconds
    pub loitering_delay: i64,
    pub loaded_at: DateTime<Utc>,
}

/// Options applied to every geofence in a test set.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceTemplate {
    pub radius: f64,
    pub notify_on_entry: bool,
    pub notify_on_exit: bool,
    pub notify_on_dwell: bool,
    pub loitering_delay: i64,
}

impl Default for GeofenceTemplate {
    fn default() -> Self {
        Self {
            radius: 200.0,
            notify_on_entry: true,
            notify_on_exit: false,
            notify_on_dwell: false,
            loitering_delay: 0,
        }
    }
}

impl GeofenceTemplate {
    /// Read template options from app settings, falling back to defaults.
    pub fn from_settings(state: &SettingsState) -> Self {
        let defaults = Self::default();

        let radius = match state.get("radius") {
            Some(SettingValue::Integer(i)) => *i as f64,
            Some(SettingValue::Float(f)) => *f,
            Some(SettingValue::Text(s)) => s.trim().parse().unwrap_or(defaults.radius),
            _ => defaults.radius,
        };
        let flag = |name: &str, default: bool| {
            state
                .get(name)
                .and_then(SettingValue::as_bool)
                .unwrap_or(default)
        };
        let loitering_delay = match state.get("loiteringDelay") {
            Some(SettingValue::Text(s)) => s.trim().parse().unwrap_or(defaults.loitering_delay),
            Some(value) => value.as_integer().unwrap_or(defaults.loitering_delay),
            None => defaults.loitering_delay,
        };

        Self {
            radius,
            notify_on_entry: flag("notifyOnEntry", defaults.notify_on_entry),
            notify_on_exit: flag("notifyOnExit", defaults.notify_on_exit),
            notify_on_dwell: flag("notifyOnDwell", defaults.notify_on_dwell),
            loitering_delay,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Waypoint {
    identifier: String,
    latitude: f64,
    longitude: f64,
}

/// Build the named test set using `template` for every region.
pub fn build_test_set(name: &str, template: &GeofenceTemplate) -> Result<Vec<Geofence>, PluginError> {
    let source = match name {
        CITY_DRIVE => CITY_DRIVE_JSON,
        other => return Err(PluginError::UnknownGeofenceSet(other.to_string())),
    };

    let waypoints: Vec<Waypoint> =
        serde_json::from_str(source).map_err(|e| PluginError::GeofenceFailed(e.to_string()))?;

    let now = Utc::now();
    Ok(waypoints
        .into_iter()
        .map(|w| Geofence {
            identifier: w.identifier,
            latitude: w.latitude,
            longitude: w.longitude,
            radius: template.radius,
            notify_on_entry: template.notify_on_entry,
            notify_on_exit: template.notify_on_exit,
            notify_on_dwell: template.notify_on_dwell,
            loitering_delay: template.loitering_delay,
            loaded_at: now,
        })
        .collect())
}
