use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ClockUnderflow, SubtitleError};
use crate::timecode::Timecode;

// @module: SRT rendering, parsing and bulk timestamp shifting

// @const: SRT timestamp-range regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}:\d{2},\d{3}) --> (\d{2}:\d{2}:\d{2},\d{3})$").unwrap()
});

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: 1-based sequence number in emission order
    pub seq_num: usize,

    // @field: Display window start
    pub start: Timecode,

    // @field: Display window end
    pub end: Timecode,

    // @field: Cue text
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start: Timecode, end: Timecode, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start,
            end,
            text,
        }
    }

    /// Display duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end.saturating_since(self.start)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered cue sequence tied to the file it came from
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle cues
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create an empty collection for a source file
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Create a collection from already-segmented cues
    pub fn from_entries(source_file: PathBuf, entries: Vec<SubtitleEntry>) -> Self {
        SubtitleCollection {
            source_file,
            entries,
        }
    }

    /// Render all cues to SRT text
    pub fn render_to_string(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            // Display never fails when writing to a String
            let _ = fmt::write(&mut out, format_args!("{}", entry));
        }
        out
    }

    /// Write cues to an SRT file, creating parent directories as needed
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)?;
        }

        Ok(())
    }

    /// Parse an SRT file into a collection
    pub fn parse_srt_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        let entries = Self::parse_srt_string(&content)?;
        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Parse SRT text into cues.
    ///
    /// Tolerant of CRLF line endings, trailing whitespace and blank-line
    /// spacing between blocks; structurally invalid blocks (non-numeric index,
    /// missing or malformed timestamp line) fail with a `SubtitleError`
    /// carrying the line number.
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let lines: Vec<&str> = content.lines().map(|l| l.trim_end()).collect();
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < lines.len() {
            // Skip blank separator lines
            if lines[pos].trim().is_empty() {
                pos += 1;
                continue;
            }

            let index_line = pos;
            let seq_num: usize = lines[pos].trim().parse().map_err(|_| {
                SubtitleError::InvalidIndex {
                    line: index_line + 1,
                    content: lines[pos].to_string(),
                }
            })?;
            pos += 1;

            let ts_line = lines.get(pos).map(|l| l.trim()).unwrap_or("");
            let caps = TIMESTAMP_REGEX.captures(ts_line).ok_or(
                SubtitleError::MissingTimestamp {
                    // Point at the index line when the file ends right after it
                    line: if pos < lines.len() { pos + 1 } else { index_line + 1 },
                },
            )?;
            let start = Timecode::parse(&caps[1])?;
            let end = Timecode::parse(&caps[2])?;
            pos += 1;

            let mut text = String::new();
            while pos < lines.len() && !lines[pos].trim().is_empty() {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(lines[pos].trim());
                pos += 1;
            }

            if text.is_empty() {
                warn!("Cue {} at line {} has no text", seq_num, index_line + 1);
            }

            entries.push(SubtitleEntry::new(seq_num, start, end, text));
        }

        debug!("Parsed {} cues from SRT content", entries.len());
        Ok(entries)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}

/// Result of shifting an SRT document by a fixed offset
#[derive(Debug)]
pub struct ShiftOutcome {
    /// The shifted SRT text
    pub content: String,

    /// One warning per timestamp range that was clamped at zero
    pub underflows: Vec<ClockUnderflow>,
}

impl ShiftOutcome {
    /// Whether any timestamp had to be clamped
    pub fn clamped(&self) -> bool {
        !self.underflows.is_empty()
    }
}

/// Split one raw line into its body and its original line terminator
fn split_line_terminator(raw: &str) -> (&str, &str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, "\n")
    } else {
        (raw, "")
    }
}

/// Shift every timestamp range in an SRT document by a signed offset.
///
/// Only timestamp-shaped lines (leading digit plus `-->`) are rewritten; all
/// other lines, including their CRLF or LF terminators, pass through
/// byte-untouched, so shifting by +d then -d reproduces the input whenever
/// nothing was clamped. A timestamp-shaped line that does not match the
/// grammar fails the whole call; a range that would go negative is clamped to
/// zero and reported as a `ClockUnderflow` warning instead.
pub fn shift_srt(content: &str, offset_ms: i64) -> Result<ShiftOutcome, SubtitleError> {
    let mut content_out = String::with_capacity(content.len());
    let mut underflows = Vec::new();

    for (line_idx, raw_line) in content.split_inclusive('\n').enumerate() {
        let (line, terminator) = split_line_terminator(raw_line);

        let trimmed = line.trim();
        let timestamp_shaped =
            trimmed.contains("-->") && trimmed.starts_with(|c: char| c.is_ascii_digit());
        if !timestamp_shaped {
            content_out.push_str(raw_line);
            continue;
        }

        let caps = TIMESTAMP_REGEX.captures(trimmed).ok_or_else(|| {
            SubtitleError::MalformedTimestampLine {
                line: line_idx + 1,
                content: line.to_string(),
            }
        })?;

        let start = Timecode::parse(&caps[1])?;
        let end = Timecode::parse(&caps[2])?;

        let shifted_start = start.as_millis() as i64 + offset_ms;
        let shifted_end = end.as_millis() as i64 + offset_ms;
        let overshoot = shifted_start.min(shifted_end);
        if overshoot < 0 {
            warn!(
                "Shift of {}ms pushes line {} below zero, clamping",
                offset_ms,
                line_idx + 1
            );
            underflows.push(ClockUnderflow {
                line: line_idx + 1,
                overshoot_ms: -overshoot,
            });
        }

        content_out.push_str(&format!(
            "{} --> {}{}",
            start.saturating_offset(offset_ms),
            end.saturating_offset(offset_ms),
            terminator
        ));
    }

    Ok(ShiftOutcome {
        content: content_out,
        underflows,
    })
}
