// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use tracing::Level;

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::from_u8(4), Some(LogLevel::DEBUG));
    assert_eq!(LogLevel::from_u8(9), None);
}

#[test]
fn test_log_level_filter_strings() {
    insta::assert_snapshot!(LogLevel::SILENT.to_filter_string(), @"off");
    insta::assert_snapshot!(LogLevel::INFO.to_filter_string(), @"ipkeep=info,warn");
    insta::assert_snapshot!(LogLevel::TRACE.to_filter_string(), @"ipkeep=trace,info");
    insta::assert_snapshot!(LogLevel::DUMP.to_filter_string(), @"trace");
}

#[test]
fn test_log_level_to_tracing_level() {
    assert_eq!(LogLevel::SILENT.to_tracing_level(), None);
    assert_eq!(LogLevel::WARN.to_tracing_level(), Some(Level::WARN));
    assert_eq!(LogLevel::DUMP.to_tracing_level(), Some(Level::TRACE));
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: Result<LogLevel, _> = serde_json::from_str("2");
    assert_eq!(ok.unwrap(), LogLevel::WARN);

    let err: Result<LogLevel, _> = serde_json::from_str("12");
    assert!(err.is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(config.show_timestamps());
}

#[test]
fn test_log_config_builder_optional_file() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .maybe_with_log_file(Some("logs/ipkeep.log".to_string()))
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.log_file(), Some("logs/ipkeep.log"));
}
