use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::segmenter;
use crate::subtitle_processor::{self, ShiftOutcome, SubtitleCollection};
use crate::timeline::{TimedTextClip, TimelineSynchronizer};
use crate::transcript::{self, RawWord};

// @module: Application controller for subtitle generation

/// Stateless orchestrator for the generate / shift / sync workflows.
///
/// Holds only the validated configuration; every run is a pure pass over the
/// inputs, so independent runs need no coordination.
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Access the active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Segment an in-memory word list into a cue collection
    pub fn segment_words(
        &self,
        raw_words: &[RawWord],
        source_file: PathBuf,
    ) -> Result<SubtitleCollection> {
        let words = transcript::normalize_words(raw_words)?;
        let entries = segmenter::segment(
            &words,
            &self.config.segmentation,
            &self.config.formatting,
        )?;
        Ok(SubtitleCollection::from_entries(source_file, entries))
    }

    /// Generate an SRT file from a word-timestamp JSON transcript.
    ///
    /// When no output path is given the SRT lands next to the transcript.
    pub fn generate(
        &self,
        transcript_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<SubtitleCollection> {
        let content = FileManager::read_to_string(transcript_path)?;
        let raw_words = transcript::parse_word_json(&content)?;
        info!(
            "Loaded {} words from {:?}",
            raw_words.len(),
            transcript_path
        );

        let collection = self.segment_words(&raw_words, transcript_path.to_path_buf())?;

        let output_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| FileManager::generate_output_path(transcript_path, "srt"));
        collection.write_to_srt(&output_path)?;
        info!(
            "Wrote {} cues to {:?}",
            collection.entries.len(),
            output_path
        );

        Ok(collection)
    }

    /// Shift every timestamp in an SRT file by a fixed millisecond offset.
    ///
    /// Used when re-aligning a transcript generated from an extracted, trimmed
    /// clip back onto the full timeline.
    pub fn shift_file(
        &self,
        input_path: &Path,
        output_path: &Path,
        offset_ms: i64,
    ) -> Result<ShiftOutcome> {
        let content = FileManager::read_to_string(input_path)?;
        let outcome = subtitle_processor::shift_srt(&content, offset_ms)?;

        for underflow in &outcome.underflows {
            warn!("{}", underflow);
        }

        FileManager::write_to_file(output_path, &outcome.content)?;
        info!(
            "Shifted {:?} by {}ms into {:?}{}",
            input_path,
            offset_ms,
            output_path,
            if outcome.clamped() {
                " (some timestamps clamped to zero)"
            } else {
                ""
            }
        );

        Ok(outcome)
    }

    /// Convert an SRT file into absolute timeline frame windows
    pub fn sync_file(
        &self,
        input_path: &Path,
        frame_rate: f64,
        in_point_frames: i64,
    ) -> Result<Vec<TimedTextClip>> {
        let collection = SubtitleCollection::parse_srt_file(input_path)?;
        let synchronizer = TimelineSynchronizer::new(frame_rate, in_point_frames)?;
        Ok(synchronizer.place_all(&collection.entries))
    }
}
