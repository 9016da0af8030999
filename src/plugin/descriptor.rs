//! Setting descriptors and values.
//!
//! A descriptor is the metadata a service publishes for one configurable
//! setting. The view consumes descriptors read-only and builds one form
//! control per descriptor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of control a setting is edited with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputType {
    /// Free-form single line text input
    Text,
    /// Single-select picker over the descriptor's allowed values
    Select,
    /// Boolean switch
    Toggle,
    /// Anything the view does not know how to render
    Unknown(String),
}

impl From<String> for InputType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => InputType::Text,
            "select" => InputType::Select,
            "toggle" => InputType::Toggle,
            _ => InputType::Unknown(value),
        }
    }
}

impl From<InputType> for String {
    fn from(value: InputType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::Text => write!(f, "text"),
            InputType::Select => write!(f, "select"),
            InputType::Toggle => write!(f, "toggle"),
            InputType::Unknown(other) => write!(f, "{}", other),
        }
    }
}

/// Declared data type of a setting's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Integer,
    Boolean,
}

/// Settings section a descriptor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsSection {
    Geolocation,
    #[serde(rename = "activity recognition")]
    ActivityRecognition,
    Http,
    Application,
    Debug,
    Geofence,
}

impl SettingsSection {
    /// Plugin sections in the order they are rendered.
    pub fn plugin_sections() -> &'static [SettingsSection] {
        &[
            SettingsSection::Geolocation,
            SettingsSection::ActivityRecognition,
            SettingsSection::Http,
            SettingsSection::Application,
            SettingsSection::Debug,
        ]
    }

    /// Heading shown above the section.
    pub fn title(&self) -> &'static str {
        match self {
            SettingsSection::Geolocation => "Geolocation",
            SettingsSection::ActivityRecognition => "Activity Recognition",
            SettingsSection::Http => "HTTP & Persistence",
            SettingsSection::Application => "Application",
            SettingsSection::Debug => "Logging & Debug",
            SettingsSection::Geofence => "Geofence Test (City Drive)",
        }
    }
}

/// A setting value as stored by the plugin or the settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            SettingValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Float(v) => write!(f, "{}", v),
            SettingValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

/// Metadata describing one configurable setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDescriptor {
    /// Setting identifier, also the key in the state map
    pub name: String,
    /// Section the setting is grouped under
    pub section: SettingsSection,
    /// UI control kind
    pub input_type: InputType,
    /// Declared value type
    #[serde(default)]
    pub data_type: DataType,
    /// Default value, shown as placeholder for text inputs
    pub default_value: SettingValue,
    /// Allowed values for select inputs
    #[serde(default)]
    pub values: Vec<SettingValue>,
}

impl SettingDescriptor {
    /// Create a text-input descriptor.
    pub fn text(name: &str, section: SettingsSection, default_value: &str) -> Self {
        Self {
            name: name.to_string(),
            section,
            input_type: InputType::Text,
            data_type: DataType::String,
            default_value: default_value.into(),
            values: Vec::new(),
        }
    }

    /// Create a select descriptor over integer values.
    pub fn integer_select(
        name: &str,
        section: SettingsSection,
        default_value: i64,
        values: &[i64],
    ) -> Self {
        Self {
            name: name.to_string(),
            section,
            input_type: InputType::Select,
            data_type: DataType::Integer,
            default_value: default_value.into(),
            values: values.iter().copied().map(SettingValue::from).collect(),
        }
    }

    /// Create a select descriptor over string values.
    pub fn string_select(
        name: &str,
        section: SettingsSection,
        default_value: &str,
        values: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            section,
            input_type: InputType::Select,
            data_type: DataType::String,
            default_value: default_value.into(),
            values: values.iter().copied().map(SettingValue::from).collect(),
        }
    }

    /// Create a toggle descriptor.
    pub fn toggle(name: &str, section: SettingsSection, default_value: bool) -> Self {
        Self {
            name: name.to_string(),
            section,
            input_type: InputType::Toggle,
            data_type: DataType::Boolean,
            default_value: default_value.into(),
            values: Vec::new(),
        }
    }
}

/// Mapping from setting name to its current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsState(BTreeMap<String, SettingValue>);

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state holding each descriptor's default value.
    pub fn from_defaults(descriptors: &[SettingDescriptor]) -> Self {
        descriptors
            .iter()
            .map(|d| (d.name.clone(), d.default_value.clone()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: SettingValue) -> Option<SettingValue> {
        self.0.insert(name.into(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, SettingValue)> for SettingsState {
    fn from_iter<T: IntoIterator<Item = (String, SettingValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
