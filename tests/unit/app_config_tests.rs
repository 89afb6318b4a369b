/*!
 * Tests for configuration loading, defaults and validation
 */

use autosubs::app_config::{Config, LogLevel};
use autosubs::text_format::CaseMode;

/// Defaults mirror the control panel's initial values
#[test]
fn test_default_shouldMatchControlPanelDefaults() {
    let config = Config::default();

    assert_eq!(config.segmentation.max_words, 6);
    assert_eq!(config.segmentation.max_chars, 20);
    assert!((config.segmentation.max_gap_seconds - 0.4).abs() < f64::EPSILON);
    assert_eq!(config.timeline.video_track, 2);
    assert!(config.refine_timestamps);
    assert_eq!(config.formatting.case_mode, CaseMode::AsIs);
    assert!(!config.formatting.remove_punctuation);
    assert!(config.formatting.censor_list().is_empty());
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Out-of-range values fail validation
#[test]
fn test_validate_withBadValues_shouldFail() {
    let mut config = Config::default();
    config.segmentation.max_words = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.segmentation.max_gap_seconds = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.timeline.video_track = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.timeline.frame_rate = -24.0;
    assert!(config.validate().is_err());
}

/// Save and reload round-trips through JSON on disk
#[test]
fn test_save_thenFromFile_shouldRoundTrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.segmentation.max_words = 4;
    config.formatting.censor_words = "darn,heck".to_string();
    config.formatting.case_mode = CaseMode::Sentence;
    config.save(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.segmentation.max_words, 4);
    assert_eq!(loaded.formatting.censor_list(), vec!["darn", "heck"]);
    assert_eq!(loaded.formatting.case_mode, CaseMode::Sentence);
}

/// Missing fields fall back to their defaults
#[test]
fn test_fromJson_withPartialConfig_shouldUseDefaults() {
    let config: Config =
        serde_json::from_str(r#"{"segmentation": {"max_words": 3}}"#).unwrap();

    assert_eq!(config.segmentation.max_words, 3);
    assert_eq!(config.segmentation.max_chars, 20);
    assert_eq!(config.timeline.video_track, 2);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Enum fields use lowercase spellings in JSON
#[test]
fn test_fromJson_withLowercaseEnums_shouldParse() {
    let config: Config = serde_json::from_str(
        r#"{"formatting": {"case_mode": "sentence"}, "log_level": "debug"}"#,
    )
    .unwrap();

    assert_eq!(config.formatting.case_mode, CaseMode::Sentence);
    assert_eq!(config.log_level, LogLevel::Debug);
}
