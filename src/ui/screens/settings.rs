//! Settings modal.
//!
//! Mirrors the plugin's configuration into a descriptor-driven form. Plugin
//! field edits are coerced, debounced and written back one key at a time;
//! app-setting edits go straight to the settings store.
//!
//! The view state is rebuilt every time the modal opens. The debouncer keeps
//! running while the modal is closed so a pending write still lands.

use crate::form::{
    coerce_edit, present, ChangeDebouncer, FieldOrigin, FieldValue, FormState, PendingChange,
};
use crate::plugin::geofence::CITY_DRIVE;
use crate::plugin::{
    ConfigPatch, GeolocationPlugin, LogLevel, LogLevelCodec, SettingDescriptor, SettingValue,
    SettingsSection, SettingsState, Sound, TrackingMode,
};
use crate::storage::SettingsStore;
use crate::ui::theme::form_colors;
use crate::ui::widgets::show_setting_field;
use crossbeam::channel::{unbounded, Receiver, Sender};
use egui::{Align, Button, Color32, Context, Layout, RichText, ScrollArea, Ui};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use uuid::Uuid;

/// Toast shown after the test geofences are loaded.
pub const GEOFENCES_LOADED_TOAST: &str = "Loaded City Drive geofences";

/// Actions the settings view reports to its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    /// No action
    None,
    /// Modal was closed
    Closed,
    /// A parent-visible setting changed (tracking mode)
    Changed { key: String, value: SettingValue },
}

/// Completions delivered from background tasks.
#[derive(Debug)]
enum ViewEvent {
    GeofencesLoaded(Result<usize, String>),
}

/// A field edit collected while rendering, applied after the frame's UI pass.
struct FieldEdit {
    descriptor: SettingDescriptor,
    origin: FieldOrigin,
    value: FieldValue,
}

/// Settings view state.
pub struct SettingsView<P: GeolocationPlugin + 'static, S: SettingsStore + 'static> {
    plugin: Arc<P>,
    store: Arc<S>,
    codec: LogLevelCodec,
    runtime: Handle,
    /// Identifies the current modal session in logs
    session_id: Uuid,
    is_open: bool,
    show_about: bool,
    form: FormState,
    /// Mirror of the plugin state, with `logLevel` decoded to a name
    plugin_state: SettingsState,
    /// Mirror of the settings store
    app_state: SettingsState,
    debouncer: ChangeDebouncer,
    tracking_mode: TrackingMode,
    is_loading_geofences: bool,
    event_tx: Sender<ViewEvent>,
    event_rx: Receiver<ViewEvent>,
}

impl<P: GeolocationPlugin + 'static, S: SettingsStore + 'static> SettingsView<P, S> {
    /// Create a closed settings view.
    pub fn new(
        plugin: Arc<P>,
        store: Arc<S>,
        codec: LogLevelCodec,
        runtime: Handle,
        debounce_window: Duration,
    ) -> Self {
        let (event_tx, event_rx) = unbounded();

        Self {
            plugin,
            store,
            codec,
            runtime,
            session_id: Uuid::new_v4(),
            is_open: false,
            show_about: false,
            form: FormState::new(),
            plugin_state: SettingsState::new(),
            app_state: SettingsState::new(),
            debouncer: ChangeDebouncer::new(debounce_window),
            tracking_mode: TrackingMode::default(),
            is_loading_geofences: false,
            event_tx,
            event_rx,
        }
    }

    /// Show the modal, rebuilding the form and loading current values.
    pub fn open(&mut self) {
        self.session_id = Uuid::new_v4();
        self.is_open = true;
        self.show_about = false;
        tracing::debug!(session = %self.session_id, "Opening settings");

        self.build_form();
        self.load();
    }

    /// Dismiss the modal. Pending writes are kept.
    pub fn close(&mut self) {
        self.plugin.play_sound(Sound::Close);
        self.is_open = false;
        self.show_about = false;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn plugin_state(&self) -> &SettingsState {
        &self.plugin_state
    }

    pub fn app_state(&self) -> &SettingsState {
        &self.app_state
    }

    pub fn tracking_mode(&self) -> TrackingMode {
        self.tracking_mode
    }

    pub fn is_loading_geofences(&self) -> bool {
        self.is_loading_geofences
    }

    pub fn pending_change(&self) -> Option<&PendingChange> {
        self.debouncer.pending()
    }

    /// Register a control for every descriptor in a rendered section.
    fn build_form(&mut self) {
        self.form = FormState::new();

        for section in SettingsSection::plugin_sections() {
            for descriptor in self.plugin.platform_settings(Some(*section)) {
                self.form.register(descriptor, FieldOrigin::Plugin);
            }
        }
        for section in [SettingsSection::Debug, SettingsSection::Geofence] {
            for descriptor in self.store.settings(Some(section)) {
                self.form.register(descriptor, FieldOrigin::App);
            }
        }
    }

    /// Fetch plugin and app state and push values into the form controls.
    pub fn load(&mut self) {
        match self.plugin.get_state() {
            Ok(state) => {
                self.plugin_state = self.decode_plugin_state(state);
                self.tracking_mode = TrackingMode::decode(self.plugin_state.get("trackingMode"));

                let state = self.plugin_state.clone();
                for descriptor in self.plugin.platform_settings(None) {
                    self.populate(&descriptor, &state);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to fetch plugin state: {}", e);
            }
        }

        self.app_state = self.store.get_state();
        let state = self.app_state.clone();
        for descriptor in self.store.settings(None) {
            self.populate(&descriptor, &state);
        }
    }

    fn decode_plugin_state(&self, mut state: SettingsState) -> SettingsState {
        let level = match state.get("logLevel") {
            Some(SettingValue::Text(name)) => name.parse().unwrap_or(LogLevel::Verbose),
            Some(value) => value
                .as_integer()
                .map_or(LogLevel::Verbose, |n| self.codec.decode(n)),
            None => LogLevel::Verbose,
        };
        state.insert("logLevel", SettingValue::from(level.name()));
        let mode = TrackingMode::decode(state.get("trackingMode"));
        state.insert("trackingMode", SettingValue::from(mode.as_str()));
        state
    }

    fn populate(&mut self, descriptor: &SettingDescriptor, state: &SettingsState) {
        let Some(field) = self.form.field_mut(&descriptor.name) else {
            tracing::warn!("Failed to find field for setting: {}", descriptor.name);
            return;
        };
        let Some(value) = state.get(&descriptor.name) else {
            tracing::warn!("No value for setting: {}", descriptor.name);
            return;
        };

        match present(descriptor, value) {
            Ok(shown) => field.value = Some(shown),
            Err(e) => tracing::warn!("Cannot show {}: {}", descriptor.name, e),
        }
    }

    /// Handle an edit to a plugin setting control.
    pub fn on_field_change(&mut self, descriptor: &SettingDescriptor, raw: FieldValue, now: Instant) {
        let value = match coerce_edit(descriptor.data_type, &raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring edit to {}: {}", descriptor.name, e);
                return;
            }
        };

        if self.plugin_state.get(&descriptor.name) == Some(&value) {
            tracing::trace!("{} unchanged", descriptor.name);
            return;
        }

        let change = PendingChange {
            key: descriptor.name.clone(),
            value,
        };
        if let Some(superseded) = self.debouncer.submit(change, now) {
            tracing::debug!(
                "Pending change to {} superseded by {}",
                superseded.key,
                descriptor.name
            );
        }
    }

    /// Handle an edit to an app setting control.
    pub fn on_app_field_change(&mut self, descriptor: &SettingDescriptor, raw: FieldValue) {
        let value = match coerce_edit(descriptor.data_type, &raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring edit to {}: {}", descriptor.name, e);
                return;
            }
        };

        match self.store.on_change(&descriptor.name, value.clone()) {
            Ok(()) => {
                self.app_state.insert(descriptor.name.clone(), value);
            }
            Err(e) => tracing::warn!("Failed to save {}: {}", descriptor.name, e),
        }
    }

    /// Commit the pending change if its quiet period has elapsed.
    ///
    /// Returns the patch sent to the plugin, if any.
    pub fn tick(&mut self, now: Instant) -> Option<ConfigPatch> {
        let change = self.debouncer.poll(now)?;
        self.commit(change)
    }

    fn commit(&mut self, change: PendingChange) -> Option<ConfigPatch> {
        self.plugin_state.insert(change.key.clone(), change.value.clone());

        let value = match self.encode_for_plugin(&change.key, change.value) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to encode {}: {}", change.key, e);
                return None;
            }
        };

        let patch = ConfigPatch::new(change.key, value);
        match self.plugin.set_config(patch.clone()) {
            Ok(state) => tracing::info!(
                session = %self.session_id,
                "- setConfig success {} = {} ({} keys)",
                patch.key,
                patch.value,
                state.len()
            ),
            Err(e) => tracing::warn!(session = %self.session_id, "- setConfig failed: {}", e),
        }
        Some(patch)
    }

    fn encode_for_plugin(
        &self,
        key: &str,
        value: SettingValue,
    ) -> Result<SettingValue, crate::plugin::PluginError> {
        match (key, &value) {
            ("logLevel", SettingValue::Text(name)) => {
                self.codec.encode_name(name).map(SettingValue::Integer)
            }
            _ => Ok(value),
        }
    }

    /// Switch between location tracking and geofence-only monitoring.
    pub fn set_tracking_mode(&mut self, mode: TrackingMode) -> SettingsAction {
        self.plugin.play_sound(Sound::ButtonClick);
        self.tracking_mode = mode;
        self.plugin_state
            .insert("trackingMode", SettingValue::from(mode.as_str()));

        let result = match mode {
            TrackingMode::Location => self.plugin.start(),
            TrackingMode::Geofence => self.plugin.start_geofences(),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to switch tracking mode to {}: {}", mode, e);
        }

        SettingsAction::Changed {
            key: "trackingMode".to_string(),
            value: SettingValue::from(mode.as_str()),
        }
    }

    /// Start loading the test geofences. Returns `false` if a load is already
    /// in flight.
    pub fn load_geofences(&mut self) -> bool {
        if self.is_loading_geofences {
            return false;
        }
        self.is_loading_geofences = true;

        let app_settings = self.store.get_state();
        let plugin = self.plugin.clone();
        let event_tx = self.event_tx.clone();

        self.runtime.spawn(async move {
            let result = plugin
                .load_test_geofences(CITY_DRIVE, &app_settings)
                .await
                .map_err(|e| e.to_string());
            let _ = event_tx.send(ViewEvent::GeofencesLoaded(result));
        });

        true
    }

    /// Remove all geofences. No loading state.
    pub fn clear_geofences(&mut self) {
        if let Err(e) = self.plugin.remove_geofences() {
            tracing::warn!("Failed to remove geofences: {}", e);
        }
    }

    /// Apply completions from background tasks.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                ViewEvent::GeofencesLoaded(Ok(count)) => {
                    tracing::debug!("{} test geofences loaded", count);
                    self.is_loading_geofences = false;
                    self.store.toast(GEOFENCES_LOADED_TOAST);
                }
                ViewEvent::GeofencesLoaded(Err(e)) => {
                    self.is_loading_geofences = false;
                    tracing::warn!("Failed to load test geofences: {}", e);
                }
            }
        }
    }

    /// Per-frame housekeeping; runs whether or not the modal is open.
    pub fn update(&mut self, now: Instant) {
        self.tick(now);
        self.poll_events();
    }

    /// Render the modal if open.
    pub fn show(&mut self, ctx: &Context) -> SettingsAction {
        let now = Instant::now();
        self.update(now);

        if let Some(remaining) = self.debouncer.time_remaining(now) {
            ctx.request_repaint_after(remaining);
        }
        if self.is_loading_geofences {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        if !self.is_open {
            return SettingsAction::None;
        }

        let mut action = SettingsAction::None;
        let mut edits = Vec::new();

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(520.0);
            self.render_toolbar(ui, &mut action);
            ui.separator();

            ScrollArea::vertical().max_height(560.0).show(ui, |ui| {
                self.render_tracking_mode(ui, &mut action);

                for section in SettingsSection::plugin_sections() {
                    self.render_section_heading(ui, *section);
                    if *section == SettingsSection::Debug {
                        self.render_fields(ui, FieldOrigin::App, *section, &mut edits);
                    }
                    self.render_fields(ui, FieldOrigin::Plugin, *section, &mut edits);
                }

                self.render_section_heading(ui, SettingsSection::Geofence);
                self.render_geofence_actions(ui);
                self.render_fields(ui, FieldOrigin::App, SettingsSection::Geofence, &mut edits);
            });
        });

        // Escape or a backdrop click dismisses the modal like the close button
        if modal.should_close() && !self.show_about {
            action = SettingsAction::Closed;
        }

        if self.show_about {
            self.render_about(ctx);
        }

        for edit in edits {
            match edit.origin {
                FieldOrigin::Plugin => self.on_field_change(&edit.descriptor, edit.value, now),
                FieldOrigin::App => self.on_app_field_change(&edit.descriptor, edit.value),
            }
        }

        if action == SettingsAction::Closed {
            self.close();
        }
        action
    }

    fn render_toolbar(&mut self, ui: &mut Ui, action: &mut SettingsAction) {
        ui.horizontal(|ui| {
            if ui.button("⏷").on_hover_text("Close").clicked() {
                *action = SettingsAction::Closed;
            }
            ui.heading("Settings");

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("About").clicked() {
                    self.show_about = true;
                }
            });
        });
    }

    fn render_section_heading(&self, ui: &mut Ui, section: SettingsSection) {
        ui.add_space(12.0);
        ui.label(RichText::new(section.title()).size(16.0).strong());
        ui.scope(|ui| {
            form_colors::apply_separator(ui.visuals_mut());
            ui.separator();
        });
    }

    fn render_tracking_mode(&mut self, ui: &mut Ui, action: &mut SettingsAction) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("trackingMode").color(form_colors::LABEL));
            let mut mode = self.tracking_mode;
            ui.selectable_value(&mut mode, TrackingMode::Location, "Location");
            ui.selectable_value(&mut mode, TrackingMode::Geofence, "Geofence");
            if mode != self.tracking_mode {
                *action = self.set_tracking_mode(mode);
            }
        });
    }

    fn render_fields(
        &mut self,
        ui: &mut Ui,
        origin: FieldOrigin,
        section: SettingsSection,
        edits: &mut Vec<FieldEdit>,
    ) {
        let grid_id = format!("{:?}_{:?}_grid", origin, section);
        egui::Grid::new(grid_id)
            .num_columns(2)
            .spacing([16.0, 8.0])
            .striped(true)
            .show(ui, |ui| {
                for field in self.form.section_fields_mut(origin, section) {
                    if let Some(value) = show_setting_field(ui, field) {
                        edits.push(FieldEdit {
                            descriptor: field.descriptor.clone(),
                            origin,
                            value,
                        });
                    }
                }
            });
    }

    fn render_geofence_actions(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let clear = Button::new(RichText::new("Clear").color(form_colors::BUTTON_TEXT))
                .fill(form_colors::RED_BUTTON)
                .min_size(egui::vec2(120.0, 32.0));
            if ui.add(clear).clicked() {
                self.clear_geofences();
            }

            ui.add_space(12.0);

            if self.is_loading_geofences {
                ui.add(egui::Spinner::new());
            } else {
                let load = Button::new(RichText::new("Load").color(form_colors::BUTTON_TEXT))
                    .fill(form_colors::BLUE_BUTTON)
                    .min_size(egui::vec2(120.0, 32.0));
                if ui.add(load).clicked() {
                    self.load_geofences();
                }
            }
        });
        ui.add_space(8.0);
    }

    fn render_about(&mut self, ctx: &Context) {
        let response = egui::Modal::new(egui::Id::new("about_modal")).show(ctx, |ui| {
            ui.set_width(320.0);
            ui.heading("BgGeo");
            ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
            ui.add_space(8.0);
            ui.label(format!("Tracking mode: {}", self.tracking_mode));
            if let Some(level) = self.plugin_state.get("logLevel") {
                ui.label(format!("Log level: {}", level));
            }
            ui.label(
                RichText::new(format!("Session {}", self.session_id))
                    .small()
                    .color(Color32::GRAY),
            );
            ui.add_space(8.0);
            ui.button("Close").clicked()
        });

        if response.inner || response.should_close() {
            self.show_about = false;
        }
    }
}
