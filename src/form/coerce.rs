//! Value coercion between settings state and form controls.

use super::{FieldValue, FormError};
use crate::plugin::descriptor::{DataType, InputType, SettingDescriptor, SettingValue};

/// Convert a stored value into what the descriptor's control displays.
///
/// Pickers always receive the string form of the value.
pub fn present(descriptor: &SettingDescriptor, value: &SettingValue) -> Result<FieldValue, FormError> {
    match &descriptor.input_type {
        InputType::Select => Ok(FieldValue::Choice(value.to_string())),
        InputType::Text => Ok(FieldValue::Text(value.to_string())),
        InputType::Toggle => value.as_bool().map(FieldValue::Toggle).ok_or_else(|| {
            FormError::TypeMismatch {
                control: "toggle",
                value: value.to_string(),
            }
        }),
        InputType::Unknown(_) => Err(FormError::TypeMismatch {
            control: "placeholder",
            value: value.to_string(),
        }),
    }
}

/// Convert a raw control edit into a value of the declared data type.
pub fn coerce_edit(data_type: DataType, raw: &FieldValue) -> Result<SettingValue, FormError> {
    match (data_type, raw) {
        (DataType::Integer, FieldValue::Text(s) | FieldValue::Choice(s)) => parse_leading_int(s)
            .map(SettingValue::Integer)
            .ok_or_else(|| FormError::InvalidInteger(s.clone())),
        (DataType::Integer, FieldValue::Toggle(b)) => Err(FormError::InvalidInteger(b.to_string())),

        (DataType::Boolean, FieldValue::Toggle(b)) => Ok(SettingValue::Bool(*b)),
        (DataType::Boolean, FieldValue::Text(s) | FieldValue::Choice(s)) => match s.trim() {
            "true" => Ok(SettingValue::Bool(true)),
            "false" => Ok(SettingValue::Bool(false)),
            _ => Err(FormError::InvalidBoolean(s.clone())),
        },

        (DataType::String, FieldValue::Text(s) | FieldValue::Choice(s)) => {
            Ok(SettingValue::Text(s.clone()))
        }
        (DataType::String, FieldValue::Toggle(b)) => Ok(SettingValue::Bool(*b)),
    }
}

/// Base-10 integer parse of the leading part of `s`.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit, so `"50 m"` is 50. Returns `None` if no digits lead the string
/// or the number overflows.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
