use anyhow::{Result, anyhow};
use log::debug;
use serde::Serialize;

use crate::subtitle_processor::SubtitleEntry;

// @module: Cue-to-timeline frame synchronization

/// One timed text object ready to be placed on a video track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedTextClip {
    /// Absolute timeline frame where the clip starts
    pub start_frame: i64,

    /// Absolute timeline frame where the clip ends
    pub end_frame: i64,

    /// Cue text to render
    pub text: String,
}

/// Seam to the editing application's timed-text API.
///
/// The application-side implementation instantiates a text object on a video
/// track; tests use a buffering implementation.
pub trait TimedTextTrack {
    /// Place one clip on the track
    fn add_clip(&mut self, clip: TimedTextClip) -> Result<()>;
}

/// In-memory track implementation collecting placed clips
#[derive(Debug, Default)]
pub struct ClipBuffer {
    /// Clips in placement order
    pub clips: Vec<TimedTextClip>,
}

impl TimedTextTrack for ClipBuffer {
    fn add_clip(&mut self, clip: TimedTextClip) -> Result<()> {
        self.clips.push(clip);
        Ok(())
    }
}

/// Maps clip-relative cue times onto absolute timeline frames.
///
/// The transcribed clip may start at a non-zero in-point; every conversion is
/// `round(seconds * frame_rate) + in_point`, computed from the cue's original
/// timecode so fractional frame rates never accumulate drift across cues.
#[derive(Debug, Clone, Copy)]
pub struct TimelineSynchronizer {
    frame_rate: f64,
    in_point_frames: i64,
}

impl TimelineSynchronizer {
    /// Create a synchronizer for a timeline frame rate and clip in-point
    pub fn new(frame_rate: f64, in_point_frames: i64) -> Result<Self> {
        if !(frame_rate > 0.0) {
            return Err(anyhow!("Frame rate must be positive, got {}", frame_rate));
        }
        Ok(TimelineSynchronizer {
            frame_rate,
            in_point_frames,
        })
    }

    /// Convert one cue to an absolute frame window
    pub fn place(&self, entry: &SubtitleEntry) -> TimedTextClip {
        TimedTextClip {
            start_frame: entry.start.to_frame(self.frame_rate) + self.in_point_frames,
            end_frame: entry.end.to_frame(self.frame_rate) + self.in_point_frames,
            text: entry.text.clone(),
        }
    }

    /// Convert a cue sequence to frame windows in order
    pub fn place_all(&self, entries: &[SubtitleEntry]) -> Vec<TimedTextClip> {
        let clips: Vec<TimedTextClip> = entries.iter().map(|e| self.place(e)).collect();
        debug!(
            "Synchronized {} cues at {} fps with in-point {}",
            clips.len(),
            self.frame_rate,
            self.in_point_frames
        );
        clips
    }

    /// Place a cue sequence onto a track implementation
    pub fn place_onto(&self, entries: &[SubtitleEntry], track: &mut dyn TimedTextTrack) -> Result<()> {
        for entry in entries {
            track.add_clip(self.place(entry))?;
        }
        Ok(())
    }
}
