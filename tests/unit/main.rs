//! Unit test modules.

mod debounce_test;
mod log_level_test;
