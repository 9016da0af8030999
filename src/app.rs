//! Main application state and egui integration.

use eframe::egui;

use bggeo::plugin::{DefaultGeolocationPlugin, LogLevelCodec, TrackingMode};
use bggeo::storage::{AppConfig, DefaultSettingsStore};
use bggeo::ui::screens::{HomeScreen, HomeStatus, SettingsAction, SettingsView};
use bggeo::ui::theme::Theme;
use bggeo::ui::widgets::ToastOverlay;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Main application state.
pub struct BgGeoApp {
    /// UI theme
    theme: Theme,
    /// Settings modal
    settings_view: SettingsView<DefaultGeolocationPlugin, DefaultSettingsStore>,
    /// Toasts raised by the settings store
    toasts: ToastOverlay,
    /// Home screen summary
    home_status: HomeStatus,
}

impl BgGeoApp {
    /// Create a new application instance.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        plugin: Arc<DefaultGeolocationPlugin>,
        store: Arc<DefaultSettingsStore>,
        codec: LogLevelCodec,
        runtime: Handle,
    ) -> Self {
        let theme = Theme::from(config.ui.theme);
        cc.egui_ctx.set_visuals(theme.visuals());
        cc.egui_ctx.set_zoom_factor(config.ui.font_scale);

        let toasts = ToastOverlay::new(
            store.toast_receiver(),
            Duration::from_secs_f32(config.ui.toast_secs.max(0.5)),
        );

        let settings_view = SettingsView::new(
            plugin,
            store,
            codec,
            runtime,
            config.debounce_window(),
        );

        Self {
            theme,
            settings_view,
            toasts,
            home_status: HomeStatus::default(),
        }
    }

    /// Toggle between dark and light theme.
    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = match self.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        ctx.set_visuals(self.theme.visuals());
    }

    fn handle_settings_action(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::Changed { key, value } => {
                tracing::info!("Setting changed: {} = {}", key, value);
                if key == "trackingMode" {
                    if let Some(mode) = value.as_str().and_then(|s| s.parse::<TrackingMode>().ok()) {
                        self.home_status.tracking_mode = mode;
                    }
                }
                self.home_status.last_change = Some(format!("{} → {}", key, value));
            }
            SettingsAction::Closed => {
                tracing::debug!("Settings closed");
            }
            SettingsAction::None => {}
        }
    }
}

impl eframe::App for BgGeoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("BgGeo");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.theme {
                        Theme::Dark => "Light",
                        Theme::Light => "Dark",
                    };
                    if ui.button(theme_label).clicked() {
                        self.toggle_theme(ctx);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if HomeScreen::show(ui, &self.home_status) {
                self.settings_view.open();
                self.home_status.tracking_mode = self.settings_view.tracking_mode();
            }
        });

        let action = self.settings_view.show(ctx);
        self.handle_settings_action(action);

        self.toasts.show(ctx);
    }
}
