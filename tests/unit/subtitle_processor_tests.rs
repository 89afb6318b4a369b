/*!
 * Tests for SRT rendering, parsing and timestamp shifting
 */

use std::fmt::Write;

use autosubs::errors::SubtitleError;
use autosubs::subtitle_processor::{SubtitleCollection, SubtitleEntry, shift_srt};
use autosubs::timecode::Timecode;

fn entry(seq: usize, start_ms: u64, end_ms: u64, text: &str) -> SubtitleEntry {
    SubtitleEntry::new(
        seq,
        Timecode::from_millis(start_ms),
        Timecode::from_millis(end_ms),
        text.to_string(),
    )
}

/// Test subtitle entry display formatting
#[test]
fn test_entry_display_withValidEntry_shouldFormatCorrectly() {
    let cue = entry(1, 5_000, 10_000, "Test subtitle");
    let mut output = String::new();
    write!(output, "{}", cue).unwrap();

    assert_eq!(output, "1\n00:00:05,000 --> 00:00:10,000\nTest subtitle\n\n");
}

/// Zero-padding is fixed at 2/2/2/3 digits
#[test]
fn test_render_withLargeTimestamps_shouldZeroPad() {
    let collection = SubtitleCollection::from_entries(
        "test.json".into(),
        vec![entry(1, 3_661_001, 3_662_090, "late cue")],
    );

    let rendered = collection.render_to_string();

    assert!(rendered.contains("01:01:01,001 --> 01:01:02,090"));
}

/// Round-trip: parse(render(cues)) == cues
#[test]
fn test_parse_afterRender_shouldRoundTrip() {
    let cues = vec![
        entry(1, 0, 1_000, "First cue"),
        entry(2, 1_500, 2_750, "Second cue\nwith two lines"),
        entry(3, 3_000, 4_000, "Third"),
    ];
    let collection = SubtitleCollection::from_entries("test.json".into(), cues.clone());

    let parsed = SubtitleCollection::parse_srt_string(&collection.render_to_string()).unwrap();

    assert_eq!(parsed, cues);
}

/// Parsing tolerates CRLF line endings and trailing whitespace
#[test]
fn test_parse_withCrlfAndTrailingWhitespace_shouldSucceed() {
    let content = "1 \r\n00:00:00,000 --> 00:00:01,000 \r\nHello \r\n\r\n2\r\n00:00:02,000 --> 00:00:03,000\r\nWorld\r\n";

    let parsed = SubtitleCollection::parse_srt_string(content).unwrap();

    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].text, "Hello");
    assert_eq!(parsed[1].start, Timecode::from_millis(2_000));
}

/// A non-numeric index line fails with its line number
#[test]
fn test_parse_withNonNumericIndex_shouldFail() {
    let content = "one\n00:00:00,000 --> 00:00:01,000\nHello\n";

    let result = SubtitleCollection::parse_srt_string(content);

    assert!(matches!(
        result,
        Err(SubtitleError::InvalidIndex { line: 1, .. })
    ));
}

/// A block without a timestamp line fails with its line number
#[test]
fn test_parse_withMissingTimestamp_shouldFail() {
    let content = "1\nHello there\n\n";

    let result = SubtitleCollection::parse_srt_string(content);

    assert!(matches!(
        result,
        Err(SubtitleError::MissingTimestamp { line: 2 })
    ));
}

/// Shifting forward then backward by the same offset reproduces the input
#[test]
fn test_shift_withInverseOffsets_shouldBeIdentity() {
    let content = "1\n00:00:10,000 --> 00:00:12,500\nHello\n\n2\n00:01:00,250 --> 00:01:02,000\nWorld\n";

    let forward = shift_srt(content, 7_321).unwrap();
    assert!(!forward.clamped());
    let back = shift_srt(&forward.content, -7_321).unwrap();

    assert!(!back.clamped());
    assert_eq!(back.content, content);
}

/// Shifting only rewrites timestamp lines
#[test]
fn test_shift_shouldLeaveTextLinesUntouched() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nA line that mentions 00:00:01,000\n";

    let shifted = shift_srt(content, 1_000).unwrap();

    assert!(shifted.content.contains("00:00:02,000 --> 00:00:03,000"));
    assert!(shifted.content.contains("mentions 00:00:01,000"));
}

/// A shift below zero clamps and reports the underflow instead of failing
#[test]
fn test_shift_withUnderflow_shouldClampAndWarn() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nEarly\n";

    let shifted = shift_srt(content, -5_000).unwrap();

    assert!(shifted.clamped());
    assert_eq!(shifted.underflows.len(), 1);
    assert_eq!(shifted.underflows[0].line, 2);
    assert_eq!(shifted.underflows[0].overshoot_ms, 4_000);
    assert!(shifted.content.contains("00:00:00,000 --> 00:00:00,000"));
}

/// A timestamp-shaped line that does not match the grammar fails the call
#[test]
fn test_shift_withMalformedTimestampLine_shouldFail() {
    let content = "1\n00:00:01 --> 00:00:02\nBad padding\n";

    let result = shift_srt(content, 1_000);

    assert!(matches!(
        result,
        Err(SubtitleError::MalformedTimestampLine { line: 2, .. })
    ));
}

/// An arrow inside dialogue text is not a timestamp line
#[test]
fn test_shift_withArrowInTextLine_shouldPassThrough() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\ngo left --> then right\n";

    let shifted = shift_srt(content, 1_000).unwrap();

    assert!(shifted.content.contains("00:00:02,000 --> 00:00:03,000"));
    assert!(shifted.content.contains("go left --> then right"));
}

/// CRLF line terminators survive a shift and the round trip is exact
#[test]
fn test_shift_withCrlfContent_shouldPreserveTerminators() {
    let content = "1\r\n00:00:10,000 --> 00:00:12,000\r\nHello\r\n\r\n";

    let forward = shift_srt(content, 2_500).unwrap();
    assert!(forward.content.contains("00:00:12,500 --> 00:00:14,500\r\n"));

    let back = shift_srt(&forward.content, -2_500).unwrap();
    assert_eq!(back.content, content);
}

/// A cue index on the file's last line reports the index line itself
#[test]
fn test_parse_withIndexAtEndOfFile_shouldReportIndexLine() {
    let content = "1";

    let result = SubtitleCollection::parse_srt_string(content);

    assert!(matches!(
        result,
        Err(SubtitleError::MissingTimestamp { line: 1 })
    ));
}
