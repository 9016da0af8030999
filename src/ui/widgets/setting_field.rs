//! Renders a form field built from a setting descriptor.

use crate::form::{FieldValue, FieldWidget, FormField};
use crate::ui::theme::form_colors;
use egui::{ComboBox, RichText, TextEdit, Ui};

/// Draw one row of a settings grid for `field`.
///
/// Returns the raw control value when the user changed it. The field's own
/// value is updated so the control reflects the edit on the next frame.
pub fn show_setting_field(ui: &mut Ui, field: &mut FormField) -> Option<FieldValue> {
    let id = field.descriptor.name.clone();

    let edited = match &field.widget {
        FieldWidget::TextInput { placeholder } => {
            ui.label(RichText::new(&id).color(form_colors::LABEL));
            let mut text = field
                .value
                .as_ref()
                .and_then(FieldValue::as_text)
                .unwrap_or_default()
                .to_string();
            let response = ui.add(
                TextEdit::singleline(&mut text)
                    .hint_text(placeholder.as_str())
                    .desired_width(220.0),
            );
            response.changed().then_some(FieldValue::Text(text))
        }
        FieldWidget::Picker { label, options } => {
            ui.label(RichText::new(label).color(form_colors::LABEL));
            let current = field
                .value
                .as_ref()
                .and_then(FieldValue::as_text)
                .unwrap_or_default()
                .to_string();
            let mut selected = current.clone();
            ui.scope(|ui| {
                form_colors::apply_picker(ui.visuals_mut());
                ComboBox::from_id_salt(("setting", &id))
                    .selected_text(RichText::new(&selected).color(form_colors::PICKER_TEXT))
                    .width(140.0)
                    .show_ui(ui, |ui| {
                        for option in options {
                            ui.selectable_value(&mut selected, option.clone(), option);
                        }
                    });
            });
            (selected != current).then_some(FieldValue::Choice(selected))
        }
        FieldWidget::Switch { label } => {
            ui.label(RichText::new(label).color(form_colors::LABEL));
            let mut on = matches!(field.value, Some(FieldValue::Toggle(true)));
            let response = ui.checkbox(&mut on, "");
            response.changed().then_some(FieldValue::Toggle(on))
        }
        FieldWidget::Placeholder { message } => {
            ui.label(RichText::new(message).color(form_colors::PLACEHOLDER));
            ui.label("");
            None
        }
    };
    ui.end_row();

    if let Some(value) = &edited {
        field.value = Some(value.clone());
    }
    edited
}
