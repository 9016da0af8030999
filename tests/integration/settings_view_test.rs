//! Settings view integration tests against a recording plugin.

use super::plugin_mock::{descriptor, open_view, MockPlugin};
use bggeo::form::FieldValue;
use bggeo::plugin::catalog;
use bggeo::plugin::{
    ConfigPatch, InputType, SettingDescriptor, SettingValue, SettingsSection, Sound, TrackingMode,
};
use bggeo::ui::screens::{SettingsAction, GEOFENCES_LOADED_TOAST};
use bggeo::SettingsStore;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

fn choice(s: &str) -> FieldValue {
    FieldValue::Choice(s.to_string())
}

#[tokio::test]
async fn test_open_populates_select_fields_as_strings() {
    let (view, _plugin, _store) = open_view(MockPlugin::new());

    for d in catalog::platform_settings() {
        if d.input_type == InputType::Select {
            let shown = view.form().value(&d.name).expect("select populated");
            assert!(matches!(shown, FieldValue::Choice(_)), "{} not a choice", d.name);
        }
    }
    assert_eq!(view.form().value("distanceFilter"), Some(&choice("10")));
    assert_eq!(view.form().value("debug"), Some(&FieldValue::Toggle(true)));
}

#[tokio::test]
async fn test_open_decodes_log_level_and_tracking_mode() {
    let (view, _plugin, _store) = open_view(MockPlugin::new());

    assert_eq!(view.form().value("logLevel"), Some(&choice("VERBOSE")));
    assert_eq!(
        view.plugin_state().get("trackingMode"),
        Some(&SettingValue::from("location"))
    );
    assert_eq!(view.tracking_mode(), TrackingMode::Location);
}

#[tokio::test]
async fn test_missing_or_unrecognized_log_level_shows_verbose() {
    let missing = MockPlugin::new();
    {
        let mut state = missing.state.lock().unwrap();
        *state = state
            .iter()
            .filter(|(name, _)| name.as_str() != "logLevel")
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
    }
    let (view, _plugin, _store) = open_view(missing);
    assert_eq!(view.form().value("logLevel"), Some(&choice("VERBOSE")));

    let garbled = MockPlugin::new();
    garbled
        .state
        .lock()
        .unwrap()
        .insert("logLevel", SettingValue::from("chatty"));
    let (view, _plugin, _store) = open_view(garbled);
    assert_eq!(view.form().value("logLevel"), Some(&choice("VERBOSE")));

    let flag = MockPlugin::new();
    flag.state
        .lock()
        .unwrap()
        .insert("logLevel", SettingValue::Bool(true));
    let (view, _plugin, _store) = open_view(flag);
    assert_eq!(
        view.plugin_state().get("logLevel"),
        Some(&SettingValue::from("VERBOSE"))
    );
}

#[tokio::test]
async fn test_open_populates_app_settings() {
    let (view, _plugin, _store) = open_view(MockPlugin::new());

    assert_eq!(view.form().value("radius"), Some(&choice("200")));
    assert_eq!(view.form().value("notifyOnEntry"), Some(&FieldValue::Toggle(true)));
    assert_eq!(
        view.form().value("email"),
        Some(&FieldValue::Text(String::new()))
    );
}

#[tokio::test]
async fn test_setting_without_rendered_field_is_skipped() {
    let mut descriptors = catalog::platform_settings();
    // Published by the plugin but in no rendered plugin section
    descriptors.push(SettingDescriptor::toggle("hiddenOption", SettingsSection::Geofence, true));

    let (view, _plugin, _store) = open_view(MockPlugin::with_descriptors(descriptors));

    assert!(view.form().field("hiddenOption").is_none());
    assert_eq!(view.form().value("distanceFilter"), Some(&choice("10")));
}

#[tokio::test]
async fn test_unknown_input_type_renders_placeholder_only() {
    let mut descriptors = catalog::platform_settings();
    descriptors.push(SettingDescriptor {
        name: "geofenceProximityRadius".to_string(),
        section: SettingsSection::Geolocation,
        input_type: InputType::Unknown("slider".to_string()),
        data_type: Default::default(),
        default_value: SettingValue::Integer(1000),
        values: Vec::new(),
    });

    let (view, _plugin, _store) = open_view(MockPlugin::with_descriptors(descriptors));

    let field = view.form().field("geofenceProximityRadius").unwrap();
    assert!(field.value.is_none());
}

#[tokio::test]
async fn test_burst_of_edits_commits_last_value_once() {
    let (mut view, plugin, _store) = open_view(MockPlugin::new());
    let distance = descriptor("distanceFilter");
    let t0 = Instant::now();

    view.on_field_change(&distance, choice("50"), t0);
    view.on_field_change(&distance, choice("100"), t0 + Duration::from_millis(100));
    view.on_field_change(&distance, choice("500"), t0 + Duration::from_millis(200));

    assert_eq!(view.tick(t0 + Duration::from_millis(600)), None);
    assert!(plugin.writes().is_empty());

    let patch = view.tick(t0 + Duration::from_millis(700));
    assert_eq!(
        patch,
        Some(ConfigPatch::new("distanceFilter", SettingValue::Integer(500)))
    );
    assert_eq!(plugin.writes().len(), 1);
    assert_eq!(
        view.plugin_state().get("distanceFilter"),
        Some(&SettingValue::Integer(500))
    );

    assert_eq!(view.tick(t0 + Duration::from_secs(5)), None);
    assert_eq!(plugin.writes().len(), 1);
}

#[tokio::test]
async fn test_edits_to_different_fields_collapse_to_latest() {
    let (mut view, plugin, _store) = open_view(MockPlugin::new());
    let t0 = Instant::now();

    view.on_field_change(&descriptor("distanceFilter"), choice("50"), t0);
    view.on_field_change(
        &descriptor("stopTimeout"),
        choice("5"),
        t0 + Duration::from_millis(100),
    );
    view.tick(t0 + Duration::from_secs(1));

    assert_eq!(
        plugin.writes(),
        vec![ConfigPatch::new("stopTimeout", SettingValue::Integer(5))]
    );
    assert_eq!(
        view.plugin_state().get("distanceFilter"),
        Some(&SettingValue::Integer(10))
    );
}

#[tokio::test]
async fn test_same_integer_value_is_noop() {
    let (mut view, plugin, _store) = open_view(MockPlugin::new());
    let t0 = Instant::now();

    view.on_field_change(&descriptor("distanceFilter"), choice("10"), t0);
    assert!(view.pending_change().is_none());

    view.tick(t0 + Duration::from_secs(1));
    assert!(plugin.writes().is_empty());
}

#[tokio::test]
async fn test_invalid_integer_edit_is_dropped() {
    let (mut view, plugin, _store) = open_view(MockPlugin::new());
    let t0 = Instant::now();

    view.on_field_change(
        &descriptor("distanceFilter"),
        FieldValue::Text("far".to_string()),
        t0,
    );
    assert!(view.pending_change().is_none());
    view.tick(t0 + Duration::from_secs(1));
    assert!(plugin.writes().is_empty());
}

#[tokio::test]
async fn test_log_level_is_encoded_for_plugin() {
    let (mut view, plugin, _store) = open_view(MockPlugin::new());
    let t0 = Instant::now();

    view.on_field_change(&descriptor("logLevel"), choice("DEBUG"), t0);
    view.tick(t0 + Duration::from_millis(500));

    assert_eq!(
        plugin.writes(),
        vec![ConfigPatch::new("logLevel", SettingValue::Integer(4))]
    );
    // The view keeps the name
    assert_eq!(
        view.plugin_state().get("logLevel"),
        Some(&SettingValue::from("DEBUG"))
    );
}

#[tokio::test]
async fn test_toggle_edit_is_written() {
    let (mut view, plugin, _store) = open_view(MockPlugin::new());
    let t0 = Instant::now();

    view.on_field_change(&descriptor("debug"), FieldValue::Toggle(false), t0);
    view.tick(t0 + Duration::from_millis(500));

    assert_eq!(
        plugin.writes(),
        vec![ConfigPatch::new("debug", SettingValue::Bool(false))]
    );
}

#[tokio::test]
async fn test_pending_write_lands_after_close() {
    let (mut view, plugin, _store) = open_view(MockPlugin::new());
    let t0 = Instant::now();

    view.on_field_change(&descriptor("stopTimeout"), choice("15"), t0);
    view.close();
    assert!(!view.is_open());
    assert_eq!(plugin.sounds(), vec![Sound::Close]);

    view.update(t0 + Duration::from_millis(500));
    assert_eq!(plugin.writes().len(), 1);
}

#[tokio::test]
async fn test_reopen_rebuilds_from_plugin_state() {
    let (mut view, _plugin, _store) = open_view(MockPlugin::new());
    let t0 = Instant::now();

    view.on_field_change(&descriptor("distanceFilter"), choice("50"), t0);
    view.tick(t0 + Duration::from_millis(500));
    view.close();
    view.open();

    assert_eq!(view.form().value("distanceFilter"), Some(&choice("50")));
}

#[tokio::test]
async fn test_set_tracking_mode_notifies_parent() {
    let (mut view, plugin, _store) = open_view(MockPlugin::new());

    let action = view.set_tracking_mode(TrackingMode::Geofence);

    assert_eq!(
        action,
        SettingsAction::Changed {
            key: "trackingMode".to_string(),
            value: SettingValue::from("geofence"),
        }
    );
    assert_eq!(view.tracking_mode(), TrackingMode::Geofence);
    assert_eq!(*plugin.modes.lock().unwrap(), vec![TrackingMode::Geofence]);
    assert_eq!(plugin.sounds(), vec![Sound::ButtonClick]);

    view.set_tracking_mode(TrackingMode::Location);
    assert_eq!(
        *plugin.modes.lock().unwrap(),
        vec![TrackingMode::Geofence, TrackingMode::Location]
    );
}

#[tokio::test]
async fn test_app_field_change_goes_to_store() {
    let (mut view, plugin, store) = open_view(MockPlugin::new());
    let radius = store
        .settings(Some(SettingsSection::Geofence))
        .into_iter()
        .find(|d| d.name == "radius")
        .unwrap();

    view.on_app_field_change(&radius, choice("1000"));

    assert_eq!(store.get_state().get("radius"), Some(&SettingValue::from("1000")));
    assert_eq!(view.app_state().get("radius"), Some(&SettingValue::from("1000")));
    assert!(view.pending_change().is_none());
    assert!(plugin.writes().is_empty());
}

async fn wait_for_load(view: &mut super::plugin_mock::MockView) {
    for _ in 0..100 {
        view.poll_events();
        if !view.is_loading_geofences() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("geofence load did not complete");
}

#[tokio::test]
async fn test_load_geofences_ignored_while_in_flight() {
    let (mut view, plugin, store) = open_view(MockPlugin::new());
    let toasts = store.toast_receiver();

    assert!(view.load_geofences());
    assert!(view.is_loading_geofences());
    assert!(!view.load_geofences());

    plugin.release_load.notify_one();
    wait_for_load(&mut view).await;

    assert_eq!(plugin.loads.load(Ordering::SeqCst), 1);
    assert_eq!(toasts.try_recv().unwrap().message, GEOFENCES_LOADED_TOAST);

    // A new load is accepted once the first completed
    assert!(view.load_geofences());
    plugin.release_load.notify_one();
    wait_for_load(&mut view).await;
    assert_eq!(plugin.loads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_load_clears_flag_without_toast() {
    let plugin = MockPlugin {
        fail_loads: true,
        ..MockPlugin::new()
    };
    let (mut view, plugin, store) = open_view(plugin);
    let toasts = store.toast_receiver();

    assert!(view.load_geofences());
    plugin.release_load.notify_one();
    wait_for_load(&mut view).await;

    assert!(toasts.try_recv().is_err());
}

#[tokio::test]
async fn test_clear_geofences_is_fire_and_forget() {
    let (mut view, plugin, _store) = open_view(MockPlugin::new());

    view.clear_geofences();
    view.clear_geofences();

    assert_eq!(plugin.removals.load(Ordering::SeqCst), 2);
    assert!(!view.is_loading_geofences());
}
