//! End-to-end tests of the settings view over the in-process plugin.

use bggeo::form::FieldValue;
use bggeo::plugin::sound::SoundPlayer;
use bggeo::plugin::{
    catalog, DefaultGeolocationPlugin, GeolocationPlugin, LogLevelCodec, SettingValue,
    SettingsSection, TrackingMode,
};
use bggeo::storage::DefaultSettingsStore;
use bggeo::ui::screens::{SettingsView, GEOFENCES_LOADED_TOAST};
use bggeo::SettingsStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::tempdir;

type View = SettingsView<DefaultGeolocationPlugin, DefaultSettingsStore>;

fn build(store: DefaultSettingsStore) -> (View, Arc<DefaultGeolocationPlugin>, Arc<DefaultSettingsStore>) {
    let plugin = Arc::new(
        DefaultGeolocationPlugin::new()
            .with_latency(Duration::from_millis(10))
            .with_sounds(SoundPlayer::muted()),
    );
    let store = Arc::new(store);
    let codec = LogLevelCodec::validate(&plugin.log_level_constants()).unwrap();

    let mut view = SettingsView::new(
        plugin.clone(),
        store.clone(),
        codec,
        tokio::runtime::Handle::current(),
        Duration::from_millis(500),
    );
    view.open();
    (view, plugin, store)
}

fn plugin_descriptor(name: &str) -> bggeo::plugin::SettingDescriptor {
    catalog::platform_settings()
        .into_iter()
        .find(|d| d.name == name)
        .unwrap()
}

#[tokio::test]
async fn test_log_level_edit_reaches_plugin_as_number() {
    let (mut view, plugin, _store) = build(DefaultSettingsStore::in_memory());
    let t0 = Instant::now();

    view.on_field_change(
        &plugin_descriptor("logLevel"),
        FieldValue::Choice("WARN".to_string()),
        t0,
    );
    view.tick(t0 + Duration::from_millis(500));

    let state = plugin.get_state().unwrap();
    assert_eq!(state.get("logLevel"), Some(&SettingValue::Integer(2)));

    // Reopening shows the name again
    view.close();
    view.open();
    assert_eq!(
        view.form().value("logLevel"),
        Some(&FieldValue::Choice("WARN".to_string()))
    );
}

#[tokio::test]
async fn test_rejected_write_is_logged_not_fatal() {
    let (mut view, plugin, _store) = build(DefaultSettingsStore::in_memory());
    let t0 = Instant::now();

    // 7 is not one of the offered distance filters
    view.on_field_change(
        &plugin_descriptor("distanceFilter"),
        FieldValue::Choice("7".to_string()),
        t0,
    );
    let patch = view.tick(t0 + Duration::from_millis(500));

    assert!(patch.is_some());
    assert_eq!(
        plugin.get_state().unwrap().get("distanceFilter"),
        Some(&SettingValue::Integer(10))
    );
}

#[tokio::test]
async fn test_tracking_mode_switch_updates_plugin() {
    let (mut view, plugin, _store) = build(DefaultSettingsStore::in_memory());

    view.set_tracking_mode(TrackingMode::Geofence);

    let state = plugin.get_state().unwrap();
    assert_eq!(TrackingMode::decode(state.get("trackingMode")), TrackingMode::Geofence);
    assert_eq!(state.get("enabled"), Some(&SettingValue::Bool(true)));

    view.open();
    assert_eq!(view.tracking_mode(), TrackingMode::Geofence);
}

#[tokio::test]
async fn test_geofences_use_app_settings() {
    let (mut view, plugin, store) = build(DefaultSettingsStore::in_memory());
    let toasts = store.toast_receiver();
    let radius = store
        .settings(Some(SettingsSection::Geofence))
        .into_iter()
        .find(|d| d.name == "radius")
        .unwrap();

    view.on_app_field_change(&radius, FieldValue::Choice("500".to_string()));
    assert!(view.load_geofences());

    for _ in 0..200 {
        view.poll_events();
        if !view.is_loading_geofences() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(!view.is_loading_geofences());

    let geofences = plugin.geofences();
    assert_eq!(geofences.len(), 10);
    assert!(geofences.iter().all(|g| g.radius == 500.0));
    assert_eq!(toasts.try_recv().unwrap().message, GEOFENCES_LOADED_TOAST);

    view.clear_geofences();
    assert!(plugin.geofences().is_empty());
}

#[tokio::test]
async fn test_app_settings_survive_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app_settings.toml");

    {
        let (mut view, _plugin, store) = build(DefaultSettingsStore::open(&path).unwrap());
        let email = store
            .settings(Some(SettingsSection::Debug))
            .into_iter()
            .find(|d| d.name == "email")
            .unwrap();
        view.on_app_field_change(&email, FieldValue::Text("ops@example.com".to_string()));
    }

    let (view, _plugin, _store) = build(DefaultSettingsStore::open(&path).unwrap());
    assert_eq!(
        view.form().value("email"),
        Some(&FieldValue::Text("ops@example.com".to_string()))
    );
}
