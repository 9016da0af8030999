//! Integration test modules.

mod default_plugin_test;
mod settings_view_test;
