use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

// @module: Per-word censorship/punctuation and per-cue case formatting

/// Character used to mask censored words
const MASK_CHAR: char = '*';

/// Case formatting applied to each finished cue
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    // @mode: Leave text as transcribed
    #[default]
    AsIs,
    // @mode: Capitalize the first letter of each cue
    Sentence,
    // @mode: Every character uppercase
    Upper,
    // @mode: Every character lowercase
    Lower,
}

impl CaseMode {
    // @returns: Lowercase mode identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::AsIs => "asis".to_string(),
            Self::Sentence => "sentence".to_string(),
            Self::Upper => "upper".to_string(),
            Self::Lower => "lower".to_string(),
        }
    }
}

impl std::fmt::Display for CaseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for CaseMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asis" | "as-is" | "none" => Ok(Self::AsIs),
            "sentence" => Ok(Self::Sentence),
            "upper" | "uppercase" => Ok(Self::Upper),
            "lower" | "lowercase" => Ok(Self::Lower),
            _ => Err(anyhow!("Invalid case mode: {}", s)),
        }
    }
}

/// Text post-processing policy, constant for one segmentation run
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TextFormatOptions {
    /// Words to censor, comma-separated as entered in the control panel
    #[serde(default)]
    pub censor_words: String,

    /// Strip trailing commas and full stops from each word
    #[serde(default)]
    pub remove_punctuation: bool,

    /// Case formatting applied per cue after concatenation
    #[serde(default)]
    pub case_mode: CaseMode,
}

impl TextFormatOptions {
    /// Parse the comma-separated censor field into a cleaned word list
    pub fn censor_list(&self) -> Vec<String> {
        self.censor_words
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Apply per-word post-processing: censorship first, then punctuation removal.
///
/// Case formatting is deliberately absent here; it is a cue-level step run
/// after concatenation (see `apply_case`).
pub fn format_word(word: &str, options: &TextFormatOptions, censor_list: &[String]) -> String {
    let mut text = censor_word(word, censor_list);

    if options.remove_punctuation {
        text.truncate(text.trim_end_matches([',', '.']).len());
    }

    text
}

/// Mask a word when it matches the censor list.
///
/// Matching is case-insensitive against the word minus trailing punctuation;
/// the punctuation is re-appended after masking. All but the first and last
/// character are replaced, length preserved; words of one or two characters
/// are masked in full.
fn censor_word(word: &str, censor_list: &[String]) -> String {
    if censor_list.is_empty() {
        return word.to_string();
    }

    let core = word.trim_end_matches(|c: char| c.is_ascii_punctuation());
    let trailing = &word[core.len()..];

    let lowered = core.to_lowercase();
    let banned = censor_list
        .iter()
        .any(|entry| entry.to_lowercase() == lowered);
    if !banned {
        return word.to_string();
    }

    let chars: Vec<char> = core.chars().collect();
    let mut masked = String::with_capacity(word.len());
    if chars.len() <= 2 {
        masked.extend(std::iter::repeat(MASK_CHAR).take(chars.len()));
    } else {
        masked.push(chars[0]);
        masked.extend(std::iter::repeat(MASK_CHAR).take(chars.len() - 2));
        masked.push(chars[chars.len() - 1]);
    }
    masked.push_str(trailing);
    masked
}

/// Apply the cue-level case policy to a finished cue's text
pub fn apply_case(text: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::AsIs => text.to_string(),
        CaseMode::Upper => text.to_uppercase(),
        CaseMode::Lower => text.to_lowercase(),
        CaseMode::Sentence => {
            let mut out = String::with_capacity(text.len());
            let mut capitalized = false;
            for c in text.chars() {
                if !capitalized && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                    capitalized = true;
                } else {
                    out.push(c);
                }
            }
            out
        }
    }
}
