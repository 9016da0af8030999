//! Toast overlay.
//!
//! Shows settings-store toasts in the bottom-center of the screen for a fixed
//! time, newest on top.

use crate::storage::Toast;
use crossbeam::channel::Receiver;
use egui::{Align2, Color32, Context, Frame, RichText};
use std::time::{Duration, Instant};

/// Collects toasts from a channel and draws the ones still visible.
pub struct ToastOverlay {
    rx: Receiver<Toast>,
    visible: Vec<(Toast, Instant)>,
    lifetime: Duration,
}

impl ToastOverlay {
    pub fn new(rx: Receiver<Toast>, lifetime: Duration) -> Self {
        Self {
            rx,
            visible: Vec::new(),
            lifetime,
        }
    }

    /// Pull new toasts and drop expired ones.
    pub fn update(&mut self, now: Instant) {
        while let Ok(toast) = self.rx.try_recv() {
            self.visible.push((toast, now));
        }
        let lifetime = self.lifetime;
        self.visible.retain(|(_, shown)| now.duration_since(*shown) < lifetime);
    }

    /// Messages currently on screen, oldest first.
    pub fn messages(&self) -> Vec<&str> {
        self.visible.iter().map(|(t, _)| t.message.as_str()).collect()
    }

    /// Draw the overlay and schedule a repaint for the next expiry.
    pub fn show(&mut self, ctx: &Context) {
        let now = Instant::now();
        self.update(now);

        if self.visible.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toast_overlay"))
            .anchor(Align2::CENTER_BOTTOM, [0.0, -32.0])
            .show(ctx, |ui| {
                for (toast, _) in self.visible.iter().rev() {
                    Frame::popup(ui.style())
                        .fill(Color32::from_rgba_unmultiplied(20, 20, 20, 220))
                        .show(ui, |ui| {
                            ui.label(RichText::new(&toast.message).color(Color32::WHITE));
                        });
                    ui.add_space(4.0);
                }
            });

        if let Some(next_expiry) = self
            .visible
            .iter()
            .map(|(_, shown)| (*shown + self.lifetime).saturating_duration_since(now))
            .min()
        {
            ctx.request_repaint_after(next_expiry);
        }
    }
}
