/*!
 * # autosubs - AI subtitles for the editing timeline
 *
 * A Rust library for turning word-level speech-to-text output into timed
 * subtitle cues placed on a video editing timeline.
 *
 * ## Features
 *
 * - Normalize raw word-timestamp streams from a transcription engine
 * - Greedy cue segmentation under word, character and silence-gap limits
 * - Text post-processing: censorship masking, punctuation stripping, case modes
 * - SRT rendering, parsing and bulk timestamp shifting
 * - Clip-relative to timeline-absolute frame synchronization
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `timecode`: Millisecond-exact timestamps and frame conversion
 * - `transcript`: Word stream normalization
 * - `text_format`: Per-word and per-cue text post-processing
 * - `segmenter`: The word-to-cue segmentation engine
 * - `subtitle_processor`: SRT rendering, parsing and shifting
 * - `timeline`: Cue-to-frame synchronization for the editing timeline
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod segmenter;
pub mod subtitle_processor;
pub mod text_format;
pub mod timecode;
pub mod timeline;
pub mod transcript;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ClockUnderflow, SegmentationError, SubtitleError, TranscriptError};
pub use segmenter::{SegmentationOptions, segment};
pub use subtitle_processor::{ShiftOutcome, SubtitleCollection, SubtitleEntry, shift_srt};
pub use text_format::{CaseMode, TextFormatOptions};
pub use timecode::Timecode;
pub use timeline::{TimedTextClip, TimedTextTrack, TimelineSynchronizer};
pub use transcript::{RawWord, Word, normalize_words};
