//! BgGeo - Background Geolocation Settings
//!
//! Main entry point for the application.

use anyhow::Context;
use bggeo::plugin::sound::SoundPlayer;
use bggeo::plugin::{DefaultGeolocationPlugin, GeolocationPlugin, LogLevelCodec};
use bggeo::storage::config::{self, AppConfig};
use bggeo::storage::DefaultSettingsStore;
use eframe::egui;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BgGeo v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load_config().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig {
            data_dir: config::get_data_dir(),
            ..Default::default()
        }
    });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let sounds = if config.plugin.sounds_enabled {
        SoundPlayer::new(config.plugin.sound_volume)
    } else {
        SoundPlayer::muted()
    };
    let plugin = Arc::new(
        DefaultGeolocationPlugin::new()
            .with_latency(Duration::from_millis(config.plugin.latency_ms))
            .with_sounds(sounds),
    );

    // Refuse to start against a plugin whose log levels no longer match
    let codec = LogLevelCodec::validate(&plugin.log_level_constants())
        .context("plugin log level contract check failed")?;

    let store = match DefaultSettingsStore::open(config.app_settings_path()) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("Failed to open app settings, using defaults: {}", e);
            DefaultSettingsStore::in_memory()
        }
    };
    let store = Arc::new(store);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([560.0, 600.0])
            .with_title("BgGeo"),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "BgGeo",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::BgGeoApp::new(
                cc, config, plugin, store, codec, handle,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))
}
