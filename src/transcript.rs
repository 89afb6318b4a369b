use log::debug;
use serde::Deserialize;

use crate::errors::TranscriptError;
use crate::timecode::Timecode;

// @module: Word stream normalization for raw transcription output

/// One word as emitted by the speech-to-text engine.
///
/// Matches the word-level JSON produced by whisper-style transcribers: text
/// plus start/end in seconds, with an optional confidence score.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWord {
    /// Spoken text, possibly padded with whitespace
    #[serde(alias = "word")]
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Engine confidence in [0, 1], when reported
    #[serde(default, alias = "probability")]
    pub confidence: Option<f64>,
}

/// A cleaned word with exact millisecond timing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Trimmed, non-empty text
    pub text: String,

    /// Word start time
    pub start: Timecode,

    /// Word end time, never before `start`
    pub end: Timecode,
}

impl Word {
    /// Convenience constructor used by tests and callers building words directly
    pub fn new(text: impl Into<String>, start: Timecode, end: Timecode) -> Self {
        Word {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Normalize raw transcription output into an ordered word stream.
///
/// Empty and whitespace-only tokens are dropped. The boundary is not trusted:
/// a retained word whose start is after its end, or a negative timestamp,
/// fails with a `TranscriptError`, and out-of-order words (left behind by
/// upstream refinement passes) are re-sorted by start time.
pub fn normalize_words(raw: &[RawWord]) -> Result<Vec<Word>, TranscriptError> {
    let mut words = Vec::with_capacity(raw.len());

    for (index, entry) in raw.iter().enumerate() {
        let text = entry.text.trim();
        if text.is_empty() {
            debug!("Dropping empty word at position {}", index);
            continue;
        }

        if entry.start < 0.0 || entry.end < 0.0 {
            return Err(TranscriptError::NegativeTimestamp {
                index,
                text: text.to_string(),
            });
        }

        let start = Timecode::from_seconds(entry.start);
        let end = Timecode::from_seconds(entry.end);
        if start > end {
            return Err(TranscriptError::InvalidTimeRange {
                index,
                text: text.to_string(),
                start,
                end,
            });
        }

        words.push(Word {
            text: text.to_string(),
            start,
            end,
        });
    }

    if words.is_empty() && !raw.is_empty() {
        return Err(TranscriptError::EmptyTranscript {
            raw_count: raw.len(),
        });
    }

    // Canonical order by start time; refinement passes occasionally reorder words
    words.sort_by_key(|w| w.start);

    Ok(words)
}

/// Parse a word-timestamp JSON document (an array of word objects)
pub fn parse_word_json(content: &str) -> anyhow::Result<Vec<RawWord>> {
    use anyhow::Context;
    serde_json::from_str(content).context("Failed to parse word-timestamp JSON")
}
