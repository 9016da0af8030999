//! Form model for descriptor-driven settings.
//!
//! A [`FormState`] is the registry of controls built for one modal session.
//! Each [`FormField`] pairs a descriptor with the control built for it and the
//! value the control currently shows.

pub mod coerce;
pub mod debounce;
pub mod field;

use crate::plugin::descriptor::{SettingDescriptor, SettingsSection};
use thiserror::Error;

pub use coerce::{coerce_edit, parse_leading_int, present};
pub use debounce::{ChangeDebouncer, PendingChange};
pub use field::{build_field, FieldWidget};

/// Form coercion errors
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("'{0}' is not an integer")]
    InvalidInteger(String),

    #[error("'{0}' is not a boolean")]
    InvalidBoolean(String),

    #[error("{control} control cannot show value {value}")]
    TypeMismatch { control: &'static str, value: String },
}

/// Value held by a rendered control.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text input contents
    Text(String),
    /// Selected picker option (always the string form)
    Choice(String),
    /// Switch position
    Toggle(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => Some(s),
            FieldValue::Toggle(_) => None,
        }
    }
}

/// Which service owns a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrigin {
    /// Plugin configuration; edits go through the debouncer
    Plugin,
    /// App settings store; edits are forwarded immediately
    App,
}

/// One registered control.
#[derive(Debug, Clone)]
pub struct FormField {
    pub descriptor: SettingDescriptor,
    pub widget: FieldWidget,
    pub origin: FieldOrigin,
    /// Current control value; `None` until loaded
    pub value: Option<FieldValue>,
}

impl FormField {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// Registry of the controls rendered in one modal session.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    fields: Vec<FormField>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register a control for `descriptor`, replacing any previous
    /// control of the same name.
    pub fn register(&mut self, descriptor: SettingDescriptor, origin: FieldOrigin) {
        let widget = build_field(&descriptor);
        self.fields.retain(|f| f.descriptor.name != descriptor.name);
        self.fields.push(FormField {
            descriptor,
            widget,
            origin,
            value: None,
        });
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.descriptor.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.descriptor.name == name)
    }

    /// Current value of a control.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).and_then(|f| f.value.as_ref())
    }

    /// Set a control's value. Returns `false` if no such control is registered.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.value = Some(value);
                true
            }
            None => false,
        }
    }

    /// Controls of `origin` in `section`, in registration order.
    pub fn section_fields(&self, origin: FieldOrigin, section: SettingsSection) -> Vec<&FormField> {
        self.fields
            .iter()
            .filter(|f| f.origin == origin && f.descriptor.section == section)
            .collect()
    }

    /// Mutable controls of `origin` in `section`, for rendering.
    pub fn section_fields_mut(
        &mut self,
        origin: FieldOrigin,
        section: SettingsSection,
    ) -> impl Iterator<Item = &mut FormField> {
        self.fields
            .iter_mut()
            .filter(move |f| f.origin == origin && f.descriptor.section == section)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
