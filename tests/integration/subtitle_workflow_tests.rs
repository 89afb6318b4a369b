/*!
 * End-to-end tests: transcript JSON to SRT file to timeline frames
 */

use autosubs::app_config::Config;
use autosubs::app_controller::Controller;
use autosubs::subtitle_processor::SubtitleCollection;
use autosubs::timecode::Timecode;

use crate::common::init_test_logging;

fn write_transcript(dir: &tempfile::TempDir, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, json).unwrap();
    path
}

const TRANSCRIPT: &str = r#"[
    {"word": "Welcome", "start": 0.0, "end": 0.4, "probability": 0.98},
    {"word": "back", "start": 0.45, "end": 0.7, "probability": 0.99},
    {"word": "everyone", "start": 0.75, "end": 1.2, "probability": 0.95},
    {"word": "today", "start": 3.0, "end": 3.3, "probability": 0.97},
    {"word": "we", "start": 3.35, "end": 3.45, "probability": 0.99},
    {"word": "start", "start": 3.5, "end": 3.9, "probability": 0.98}
]"#;

/// Generate writes an SRT next to the transcript and returns the cues
#[test]
fn test_generate_withTranscriptJson_shouldWriteSrt() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let transcript = write_transcript(&dir, "clip.json", TRANSCRIPT);

    let controller = Controller::with_config(Config::default()).unwrap();
    let collection = controller.generate(&transcript, None).unwrap();

    // The 20-char limit splits the first phrase; the 2.3s silence before
    // "today" forces the second break
    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.entries[0].text, "Welcome back");
    assert_eq!(collection.entries[1].text, "everyone");
    assert_eq!(collection.entries[2].text, "today we start");

    let srt_path = dir.path().join("clip.srt");
    let reloaded = SubtitleCollection::parse_srt_file(&srt_path).unwrap();
    assert_eq!(reloaded.entries, collection.entries);
}

/// Censorship and case formatting flow through the full pipeline
#[test]
fn test_generate_withFormatting_shouldApplyPolicy() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = write_transcript(&dir, "clip.json", TRANSCRIPT);
    let output = dir.path().join("formatted.srt");

    let mut config = Config::default();
    config.formatting.censor_words = "everyone".to_string();
    config.formatting.case_mode = "upper".parse().unwrap();

    let controller = Controller::with_config(config).unwrap();
    let collection = controller.generate(&transcript, Some(&output)).unwrap();

    // Censorship masks before case formatting uppercases the cue
    assert_eq!(collection.entries[0].text, "WELCOME BACK");
    assert_eq!(collection.entries[1].text, "E******E");
    assert!(output.exists());
}

/// Shifting a generated file backward clamps early cues and reports it
#[test]
fn test_shiftFile_withNegativeOffset_shouldClampEarlyCues() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let transcript = write_transcript(&dir, "clip.json", TRANSCRIPT);
    let srt_in = dir.path().join("clip.srt");
    let srt_out = dir.path().join("clip.shifted.srt");

    let controller = Controller::with_config(Config::default()).unwrap();
    controller.generate(&transcript, None).unwrap();

    let outcome = controller.shift_file(&srt_in, &srt_out, -2_000).unwrap();

    assert!(outcome.clamped());
    let shifted = SubtitleCollection::parse_srt_file(&srt_out).unwrap();
    assert_eq!(shifted.entries[0].start, Timecode::ZERO);
    assert_eq!(shifted.entries[1].start, Timecode::ZERO);
    // The last cue started at 3.0s and shifts cleanly to 1.0s
    assert_eq!(shifted.entries[2].start, Timecode::from_millis(1_000));
}

/// Sync maps the generated cues onto absolute timeline frames
#[test]
fn test_syncFile_withInPoint_shouldProduceFrameWindows() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = write_transcript(&dir, "clip.json", TRANSCRIPT);
    let srt_path = dir.path().join("clip.srt");

    let controller = Controller::with_config(Config::default()).unwrap();
    controller.generate(&transcript, None).unwrap();

    let clips = controller.sync_file(&srt_path, 24.0, 86_400).unwrap();

    assert_eq!(clips.len(), 3);
    assert_eq!(clips[0].start_frame, 86_400);
    // 0.7s at 24 fps rounds to 17 frames
    assert_eq!(clips[0].end_frame, 86_417);
    assert_eq!(clips[1].start_frame, 86_418);
    assert_eq!(clips[2].start_frame, 86_472);
}

/// Invalid configuration is rejected when the controller is built
#[test]
fn test_withConfig_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.segmentation.max_chars = 0;

    assert!(Controller::with_config(config).is_err());
}
