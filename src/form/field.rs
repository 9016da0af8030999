//! Field builder: descriptor to control description.

use crate::plugin::descriptor::{InputType, SettingDescriptor};

/// Control description for one setting. Rendering lives in
/// `ui::widgets::setting_field`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    /// Single line text input
    TextInput { placeholder: String },
    /// Single-select picker
    Picker { label: String, options: Vec<String> },
    /// Boolean switch
    Switch { label: String },
    /// Visible notice for an input type with no control
    Placeholder { message: String },
}

/// Map a descriptor to its control.
pub fn build_field(descriptor: &SettingDescriptor) -> FieldWidget {
    match &descriptor.input_type {
        InputType::Text => FieldWidget::TextInput {
            placeholder: descriptor.default_value.to_string(),
        },
        InputType::Select => FieldWidget::Picker {
            label: descriptor.name.clone(),
            options: descriptor.values.iter().map(ToString::to_string).collect(),
        },
        InputType::Toggle => FieldWidget::Switch {
            label: descriptor.name.clone(),
        },
        InputType::Unknown(kind) => FieldWidget::Placeholder {
            message: format!("Unknown field-type for {} {}", descriptor.name, kind),
        },
    }
}
