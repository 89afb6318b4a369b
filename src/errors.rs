/*!
 * Error types for the autosubs application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

use crate::timecode::Timecode;

/// Errors that can occur while normalizing raw transcription output
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// A retained word ends before it starts
    #[error("word {index} ('{text}') starts at {start} but ends at {end}")]
    InvalidTimeRange {
        /// Zero-based position in the raw word list
        index: usize,
        /// The offending word text
        text: String,
        /// Word start time
        start: Timecode,
        /// Word end time
        end: Timecode,
    },

    /// A word carries a negative timestamp
    #[error("word {index} ('{text}') has a negative timestamp")]
    NegativeTimestamp {
        /// Zero-based position in the raw word list
        index: usize,
        /// The offending word text
        text: String,
    },

    /// The engine produced words but none survived cleaning
    #[error("transcript contained {raw_count} words but none were usable")]
    EmptyTranscript {
        /// Number of words before cleaning
        raw_count: usize,
    },
}

/// Errors that can occur during cue segmentation
#[derive(Error, Debug)]
pub enum SegmentationError {
    /// A caller-supplied constraint is out of range
    #[error("invalid segmentation constraint: {0}")]
    InvalidConstraint(String),
}

/// Errors that can occur while parsing or shifting SRT content
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A line containing "-->" does not match the timestamp grammar
    #[error("line {line}: malformed timestamp range '{content}'")]
    MalformedTimestampLine {
        /// One-based line number in the file
        line: usize,
        /// The offending line
        content: String,
    },

    /// A cue block starts with something other than a numeric index
    #[error("line {line}: expected a numeric cue index, found '{content}'")]
    InvalidIndex {
        /// One-based line number in the file
        line: usize,
        /// The offending line
        content: String,
    },

    /// A cue block has no timestamp line after its index
    #[error("line {line}: cue block is missing its timestamp line")]
    MissingTimestamp {
        /// One-based line number in the file
        line: usize,
    },

    /// A timestamp string could not be parsed
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// Warning emitted when a shift would push a timestamp below zero.
///
/// The offending timestamp is clamped to zero rather than failing the whole
/// file; callers decide whether to surface the warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockUnderflow {
    /// One-based line number of the clamped timestamp range
    pub line: usize,
    /// How far below zero the adjusted timestamp landed, in milliseconds
    pub overshoot_ms: i64,
}

impl std::fmt::Display for ClockUnderflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: timestamp clamped to zero ({}ms below start of clip)",
            self.line, self.overshoot_ms
        )
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from transcript normalization
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Error from cue segmentation
    #[error("Segmentation error: {0}")]
    Segmentation(#[from] SegmentationError),

    /// Error from subtitle parsing or shifting
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
