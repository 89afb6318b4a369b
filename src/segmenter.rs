use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::SegmentationError;
use crate::subtitle_processor::SubtitleEntry;
use crate::text_format::{self, TextFormatOptions};
use crate::timecode::Timecode;
use crate::transcript::Word;

// @module: Greedy word-to-cue segmentation engine

/// Floor applied to cues built from zero-duration words.
///
/// The floored end never crosses the next cue's start, so the no-overlap
/// invariant holds even when consecutive words share a timestamp.
const MIN_CUE_DURATION_MS: u64 = 100;

/// User-supplied limits for one segmentation run
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct SegmentationOptions {
    /// Maximum words accumulated into one cue
    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Maximum characters in one cue's text, spaces included
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Silence between words that forces a cue break, in seconds
    #[serde(default = "default_max_gap_seconds")]
    pub max_gap_seconds: f64,
}

impl Default for SegmentationOptions {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
            max_chars: default_max_chars(),
            max_gap_seconds: default_max_gap_seconds(),
        }
    }
}

impl SegmentationOptions {
    /// Validate the caller contract: `max_words >= 1`, `max_chars >= 1`,
    /// `max_gap_seconds > 0`
    pub fn validate(&self) -> Result<(), SegmentationError> {
        if self.max_words < 1 {
            return Err(SegmentationError::InvalidConstraint(format!(
                "max_words must be at least 1, got {}",
                self.max_words
            )));
        }
        if self.max_chars < 1 {
            return Err(SegmentationError::InvalidConstraint(format!(
                "max_chars must be at least 1, got {}",
                self.max_chars
            )));
        }
        if !(self.max_gap_seconds > 0.0) {
            return Err(SegmentationError::InvalidConstraint(format!(
                "max_gap_seconds must be positive, got {}",
                self.max_gap_seconds
            )));
        }
        Ok(())
    }

    /// Gap threshold in whole milliseconds
    fn max_gap_ms(&self) -> u64 {
        (self.max_gap_seconds * 1000.0).round() as u64
    }
}

fn default_max_words() -> usize {
    6
}

fn default_max_chars() -> usize {
    20
}

fn default_max_gap_seconds() -> f64 {
    0.4
}

/// Open cue accumulator for the forward scan
struct CueBuffer {
    text: String,
    word_count: usize,
    start: Timecode,
    last_end: Timecode,
}

impl CueBuffer {
    fn open(word: &Word, formatted: String) -> Self {
        CueBuffer {
            text: formatted,
            word_count: 1,
            start: word.start,
            last_end: word.end,
        }
    }

    fn append(&mut self, word: &Word, formatted: &str) {
        if !self.text.is_empty() && !formatted.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(formatted);
        self.word_count += 1;
        self.last_end = word.end;
    }

    /// Character count the buffer would have after appending `formatted`
    fn candidate_chars(&self, formatted: &str) -> usize {
        let separator = if !self.text.is_empty() && !formatted.is_empty() {
            1
        } else {
            0
        };
        self.text.chars().count() + separator + formatted.chars().count()
    }

    fn close(self, seq_num: usize, options: &TextFormatOptions) -> SubtitleEntry {
        let text = text_format::apply_case(&self.text, options.case_mode);
        SubtitleEntry::new(seq_num, self.start, self.last_end, text)
    }
}

/// Fold a normalized word stream into an ordered cue sequence.
///
/// Single greedy pass: a cue is closed when the silence before the next word
/// exceeds the gap threshold (strictly), or when adding the word would push
/// the cue over the word or character limit. The limits bound accumulation
/// only; a single word that alone violates them is still emitted whole as its
/// own cue, never dropped or truncated.
pub fn segment(
    words: &[Word],
    options: &SegmentationOptions,
    format: &TextFormatOptions,
) -> Result<Vec<SubtitleEntry>, SegmentationError> {
    options.validate()?;

    let censor_list = format.censor_list();
    let max_gap_ms = options.max_gap_ms();

    let mut entries: Vec<SubtitleEntry> = Vec::new();
    let mut buffer: Option<CueBuffer> = None;

    for word in words {
        let formatted = text_format::format_word(&word.text, format, &censor_list);

        if let Some(buf) = buffer.as_mut() {
            let gap_ms = word.start.saturating_since(buf.last_end);
            let over_gap = gap_ms > max_gap_ms;
            let over_words = buf.word_count + 1 > options.max_words;
            let over_chars = buf.candidate_chars(&formatted) > options.max_chars;

            if over_gap || over_words || over_chars {
                let mut finished = std::mem::replace(buf, CueBuffer::open(word, formatted));
                // Engines may report a word overrunning its successor; the
                // closed cue must still end before the next one starts
                finished.last_end = finished.last_end.min(word.start);
                let seq_num = entries.len() + 1;
                entries.push(finished.close(seq_num, format));
            } else {
                buf.append(word, &formatted);
            }
        } else {
            buffer = Some(CueBuffer::open(word, formatted));
        }
    }

    if let Some(buf) = buffer {
        entries.push(buf.close(entries.len() + 1, format));
    }

    enforce_min_duration(&mut entries);

    debug!(
        "Segmented {} words into {} cues (max_words={}, max_chars={}, max_gap={}s)",
        words.len(),
        entries.len(),
        options.max_words,
        options.max_chars,
        options.max_gap_seconds
    );

    Ok(entries)
}

/// Give zero-duration cues a visible display window.
///
/// A cue built from a zero-duration word gets its end raised by up to
/// `MIN_CUE_DURATION_MS`, bounded by the following cue's start so display
/// windows never overlap.
fn enforce_min_duration(entries: &mut [SubtitleEntry]) {
    for i in 0..entries.len() {
        if entries[i].end > entries[i].start {
            continue;
        }

        let mut floored = entries[i]
            .start
            .saturating_offset(MIN_CUE_DURATION_MS as i64);
        if let Some(next) = entries.get(i + 1) {
            floored = floored.min(next.start);
        }

        if floored > entries[i].start {
            warn!(
                "Cue {} has zero duration, extending to {}",
                entries[i].seq_num, floored
            );
        }
        entries[i].end = floored.max(entries[i].start);
    }
}
