//! Log-level codec.
//!
//! The form shows severity names while the plugin stores numeric constants.
//! The mapping is declared statically here and checked once against the
//! constants the plugin reports, so a plugin that renumbers its levels is
//! caught at startup instead of silently receiving wrong values.

use super::PluginError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Plugin log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Verbose,
}

/// Static level table, in ascending severity-detail order.
const LEVEL_TABLE: [(LogLevel, i64); 6] = [
    (LogLevel::Off, 0),
    (LogLevel::Error, 1),
    (LogLevel::Warn, 2),
    (LogLevel::Info, 3),
    (LogLevel::Debug, 4),
    (LogLevel::Verbose, 5),
];

impl LogLevel {
    /// All levels in picker order.
    pub fn all() -> [LogLevel; 6] {
        LEVEL_TABLE.map(|(level, _)| level)
    }

    /// Display name used by the form.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Off => "OFF",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
        }
    }

    /// Decode a numeric plugin level. Unrecognized values map to `Verbose`.
    pub fn decode(value: i64) -> LogLevel {
        LEVEL_TABLE
            .iter()
            .find(|(_, constant)| *constant == value)
            .map(|(level, _)| *level)
            .unwrap_or(LogLevel::Verbose)
    }

    fn table_constant(&self) -> i64 {
        LEVEL_TABLE
            .iter()
            .find(|(level, _)| level == self)
            .map(|(_, constant)| *constant)
            .unwrap_or_default()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OFF" => Ok(LogLevel::Off),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "VERBOSE" => Ok(LogLevel::Verbose),
            other => Err(PluginError::InvalidValue {
                key: "logLevel".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// `LOG_LEVEL_*` constants as reported by a live plugin instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLevelConstants {
    pub off: i64,
    pub error: i64,
    pub warning: i64,
    pub info: i64,
    pub debug: i64,
    pub verbose: i64,
}

impl Default for LogLevelConstants {
    fn default() -> Self {
        Self {
            off: 0,
            error: 1,
            warning: 2,
            info: 3,
            debug: 4,
            verbose: 5,
        }
    }
}

impl LogLevelConstants {
    fn reported(&self, level: LogLevel) -> i64 {
        match level {
            LogLevel::Off => self.off,
            LogLevel::Error => self.error,
            LogLevel::Warn => self.warning,
            LogLevel::Info => self.info,
            LogLevel::Debug => self.debug,
            LogLevel::Verbose => self.verbose,
        }
    }
}

/// Validated bidirectional mapping between level names and plugin constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevelCodec {
    _validated: (),
}

impl LogLevelCodec {
    /// Check the static table against the plugin's reported constants.
    pub fn validate(constants: &LogLevelConstants) -> Result<Self, PluginError> {
        for (level, expected) in LEVEL_TABLE {
            let reported = constants.reported(level);
            if reported != expected {
                return Err(PluginError::ContractDrift(format!(
                    "LOG_LEVEL_{} is {} but {} was expected",
                    level.name(),
                    reported,
                    expected
                )));
            }
        }

        tracing::debug!("Log level constants validated against plugin");
        Ok(Self { _validated: () })
    }

    /// Numeric constant to level name.
    pub fn decode(&self, value: i64) -> LogLevel {
        LogLevel::decode(value)
    }

    /// Level to numeric plugin constant.
    pub fn encode(&self, level: LogLevel) -> i64 {
        level.table_constant()
    }

    /// Level name to numeric plugin constant.
    pub fn encode_name(&self, name: &str) -> Result<i64, PluginError> {
        name.parse::<LogLevel>().map(|level| self.encode(level))
    }
}
