use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;

// @module: Frame-rate-aware timestamp representation

/// A non-negative point in time, exact to the millisecond.
///
/// All arithmetic stays in integer milliseconds so repeated conversions never
/// accumulate rounding drift. Conversion to editing-timeline frames is done
/// per value from the original milliseconds, never incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timecode {
    millis: u64,
}

impl Timecode {
    /// The zero timestamp
    pub const ZERO: Timecode = Timecode { millis: 0 };

    /// Create a timecode from a millisecond count
    pub fn from_millis(millis: u64) -> Self {
        Timecode { millis }
    }

    /// Create a timecode from seconds, as delivered by the transcription engine.
    ///
    /// Negative inputs clamp to zero; callers that care reject them beforehand.
    pub fn from_seconds(seconds: f64) -> Self {
        let millis = (seconds * 1000.0).round();
        Timecode {
            millis: if millis.is_sign_negative() { 0 } else { millis as u64 },
        }
    }

    /// Total milliseconds
    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Total seconds as a float
    pub fn as_seconds(&self) -> f64 {
        self.millis as f64 / 1000.0
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`, `.` accepted as separator)
    pub fn parse(timestamp: &str) -> Result<Self, SubtitleError> {
        let parts: Vec<&str> = timestamp.split(&[':', ',', '.'][..]).collect();
        if parts.len() != 4 {
            return Err(SubtitleError::InvalidTimestamp(timestamp.to_string()));
        }

        let mut fields = [0u64; 4];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| SubtitleError::InvalidTimestamp(timestamp.to_string()))?;
        }
        let [hours, minutes, seconds, millis] = fields;

        // Validate time components
        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(SubtitleError::InvalidTimestamp(timestamp.to_string()));
        }

        Ok(Timecode::from_millis(
            hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis,
        ))
    }

    /// Add a signed millisecond offset, or `None` if the result would be negative
    pub fn checked_offset(self, delta_ms: i64) -> Option<Timecode> {
        let shifted = self.millis as i64 + delta_ms;
        if shifted < 0 {
            None
        } else {
            Some(Timecode::from_millis(shifted as u64))
        }
    }

    /// Add a signed millisecond offset, clamping at zero
    pub fn saturating_offset(self, delta_ms: i64) -> Timecode {
        self.checked_offset(delta_ms).unwrap_or(Timecode::ZERO)
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is later
    pub fn saturating_since(self, earlier: Timecode) -> u64 {
        self.millis.saturating_sub(earlier.millis)
    }

    /// Convert to a frame index at the given frame rate.
    ///
    /// Computed from the full millisecond value so fractional rates such as
    /// 23.976 fps cannot accumulate truncation error across a long timeline.
    pub fn to_frame(self, frame_rate: f64) -> i64 {
        (self.as_seconds() * frame_rate).round() as i64
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hours = self.millis / 3_600_000;
        let minutes = (self.millis % 3_600_000) / 60_000;
        let seconds = (self.millis % 60_000) / 1_000;
        let millis = self.millis % 1_000;

        write!(f, "{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}
