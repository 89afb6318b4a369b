/*!
 * Shared helpers for the autosubs test suite
 */

#![allow(dead_code)]

use autosubs::segmenter::SegmentationOptions;
use autosubs::text_format::TextFormatOptions;
use autosubs::timecode::Timecode;
use autosubs::transcript::{RawWord, Word};

/// Initialize captured test logging; safe to call from any test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a normalized word with second-resolution timing
pub fn word(text: &str, start_secs: f64, end_secs: f64) -> Word {
    Word::new(
        text,
        Timecode::from_seconds(start_secs),
        Timecode::from_seconds(end_secs),
    )
}

/// Build a raw engine word with second-resolution timing
pub fn raw_word(text: &str, start_secs: f64, end_secs: f64) -> RawWord {
    RawWord {
        text: text.to_string(),
        start: start_secs,
        end: end_secs,
        confidence: None,
    }
}

/// Segmentation options with generous limits so only the overridden
/// constraint can force a break
pub fn loose_options() -> SegmentationOptions {
    SegmentationOptions {
        max_words: 100,
        max_chars: 10_000,
        max_gap_seconds: 1_000.0,
    }
}

/// Formatting options that leave text untouched
pub fn plain_format() -> TextFormatOptions {
    TextFormatOptions::default()
}
