//! Platform settings catalog.
//!
//! Descriptors for every plugin option the settings panel exposes.

use super::descriptor::{SettingDescriptor, SettingsSection};
use super::log_level::LogLevel;

/// All platform setting descriptors, grouped by section.
pub fn platform_settings() -> Vec<SettingDescriptor> {
    use SettingsSection::*;

    let log_levels: Vec<&str> = LogLevel::all().iter().map(|l| l.name()).collect();

    vec![
        // Geolocation
        SettingDescriptor::integer_select("desiredAccuracy", Geolocation, 0, &[-1, 0, 10, 100, 1000]),
        SettingDescriptor::integer_select("distanceFilter", Geolocation, 10, &[0, 10, 20, 50, 100, 500]),
        SettingDescriptor::integer_select("stationaryRadius", Geolocation, 25, &[0, 25, 50, 100, 500, 1000]),
        SettingDescriptor::toggle("disableElasticity", Geolocation, false),
        // Activity Recognition
        SettingDescriptor::integer_select(
            "activityRecognitionInterval",
            ActivityRecognition,
            10000,
            &[0, 1000, 5000, 10000, 30000],
        ),
        SettingDescriptor::integer_select("stopTimeout", ActivityRecognition, 1, &[0, 1, 5, 10, 15]),
        SettingDescriptor::integer_select("stopDetectionDelay", ActivityRecognition, 0, &[0, 1, 5, 10]),
        SettingDescriptor::toggle("disableStopDetection", ActivityRecognition, false),
        // HTTP & Persistence
        SettingDescriptor::text("url", Http, "http://localhost:9000/locations"),
        SettingDescriptor::toggle("autoSync", Http, true),
        SettingDescriptor::toggle("batchSync", Http, false),
        SettingDescriptor::integer_select("maxBatchSize", Http, -1, &[-1, 50, 100, 250, 500]),
        SettingDescriptor::integer_select("maxDaysToPersist", Http, 1, &[1, 2, 3, 5, 7, 14]),
        // Application
        SettingDescriptor::toggle("stopOnTerminate", Application, true),
        SettingDescriptor::toggle("startOnBoot", Application, false),
        SettingDescriptor::integer_select("heartbeatInterval", Application, 60, &[-1, 60, 600, 900, 1800]),
        SettingDescriptor::toggle("foregroundService", Application, false),
        // Logging & Debug
        SettingDescriptor::toggle("debug", Debug, true),
        SettingDescriptor::string_select("logLevel", Debug, LogLevel::Verbose.name(), &log_levels),
        SettingDescriptor::integer_select("logMaxDays", Debug, 3, &[1, 2, 3, 4, 5, 6, 7]),
    ]
}

/// Catalog filtered to one section, or the whole catalog when `section` is `None`.
pub fn settings_for(section: Option<SettingsSection>) -> Vec<SettingDescriptor> {
    platform_settings()
        .into_iter()
        .filter(|d| section.map_or(true, |s| d.section == s))
        .collect()
}
