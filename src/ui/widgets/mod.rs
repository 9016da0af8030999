//! UI widgets for reusable components.

pub mod setting_field;
pub mod toast;

pub use setting_field::show_setting_field;
pub use toast::ToastOverlay;
