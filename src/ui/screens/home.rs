//! Home screen implementation.

use egui::{RichText, Ui, Vec2};

use crate::plugin::TrackingMode;

/// Summary shown on the home screen.
#[derive(Debug, Clone, Default)]
pub struct HomeStatus {
    /// Tracking mode last reported by the settings view
    pub tracking_mode: TrackingMode,
    /// Most recent parent-visible setting change
    pub last_change: Option<String>,
}

/// Home screen UI.
pub struct HomeScreen;

impl HomeScreen {
    /// Render the home screen. Returns `true` when settings should open.
    pub fn show(ui: &mut Ui, status: &HomeStatus) -> bool {
        let mut open_settings = false;

        ui.vertical_centered(|ui| {
            ui.add_space(40.0);

            ui.label(RichText::new("BgGeo").size(48.0).strong());
            ui.add_space(8.0);
            ui.label(RichText::new("Background Geolocation").size(18.0).weak());

            ui.add_space(60.0);

            let button_size = Vec2::new(280.0, 60.0);
            if ui
                .add_sized(
                    button_size,
                    egui::Button::new(RichText::new("Settings").size(20.0)),
                )
                .clicked()
            {
                open_settings = true;
            }

            ui.add_space(40.0);
            ui.separator();
            ui.add_space(16.0);

            ui.label(RichText::new(format!("Tracking mode: {}", status.tracking_mode)).weak());
            if let Some(change) = &status.last_change {
                ui.label(RichText::new(change).weak().small());
            }
        });

        open_settings
    }
}
