//! Unit tests for the log level table and its startup check.

use bggeo::plugin::{
    DefaultGeolocationPlugin, GeolocationPlugin, LogLevel, LogLevelCodec, LogLevelConstants,
    PluginError,
};

#[test]
fn test_table_round_trips_every_level() {
    let codec = LogLevelCodec::validate(&LogLevelConstants::default()).unwrap();

    for level in LogLevel::all() {
        let encoded = codec.encode(level);
        assert_eq!(codec.decode(encoded), level);
        assert_eq!(codec.encode_name(level.name()).unwrap(), encoded);
    }
}

#[test]
fn test_levels_are_ordered_by_verbosity() {
    let codec = LogLevelCodec::validate(&LogLevelConstants::default()).unwrap();
    let encoded: Vec<i64> = LogLevel::all().iter().map(|l| codec.encode(*l)).collect();
    assert_eq!(encoded, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_drift_in_any_constant_is_detected() {
    let drifted = [
        LogLevelConstants { off: 9, ..Default::default() },
        LogLevelConstants { error: 9, ..Default::default() },
        LogLevelConstants { warning: 9, ..Default::default() },
        LogLevelConstants { info: 9, ..Default::default() },
        LogLevelConstants { debug: 9, ..Default::default() },
        LogLevelConstants { verbose: 9, ..Default::default() },
    ];

    for constants in drifted {
        let err = LogLevelCodec::validate(&constants).unwrap_err();
        assert!(matches!(err, PluginError::ContractDrift(_)), "{:?}", constants);
    }
}

#[test]
fn test_swapped_constants_are_detected() {
    let constants = LogLevelConstants {
        debug: 5,
        verbose: 4,
        ..Default::default()
    };
    let err = LogLevelCodec::validate(&constants).unwrap_err();
    assert!(err.to_string().contains("DEBUG"));
}

#[test]
fn test_unmapped_number_shows_verbose() {
    let codec = LogLevelCodec::validate(&LogLevelConstants::default()).unwrap();
    assert_eq!(codec.decode(6), LogLevel::Verbose);
    assert_eq!(codec.decode(i64::MIN), LogLevel::Verbose);
}

#[test]
fn test_unknown_name_is_rejected() {
    let codec = LogLevelCodec::validate(&LogLevelConstants::default()).unwrap();
    assert!(matches!(
        codec.encode_name("TRACE"),
        Err(PluginError::InvalidValue { .. })
    ));
}

#[test]
fn test_startup_check_against_plugin_constants() {
    let plugin = DefaultGeolocationPlugin::new();
    assert!(LogLevelCodec::validate(&plugin.log_level_constants()).is_ok());

    let drifted = DefaultGeolocationPlugin::new().with_log_level_constants(LogLevelConstants {
        verbose: 6,
        ..Default::default()
    });
    let err = LogLevelCodec::validate(&drifted.log_level_constants()).unwrap_err();
    assert!(matches!(err, PluginError::ContractDrift(_)));
    assert!(err.to_string().contains("VERBOSE"));
}
