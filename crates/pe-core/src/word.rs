//! The looked-up word and the local file name derived from it.

use std::fmt;

use crate::error::PeError;

/// Extension of downloaded pronunciation files.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Linux NAME_MAX, minus room for `.mp3.part`.
const STEM_MAX: usize = 255 - 9;

/// A trimmed, lower-cased, non-empty word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word(String);

impl Word {
    /// Normalizes user input. Fails with [`PeError::EmptyWord`] when nothing is left.
    pub fn parse(raw: &str) -> Result<Self, PeError> {
        let word = raw.trim().to_lowercase();
        if word.is_empty() {
            return Err(PeError::EmptyWord);
        }
        Ok(Word(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name the pronunciation is stored under, e.g. `hello.mp3`.
    ///
    /// The same word always maps to the same name, so repeated lookups
    /// overwrite one file instead of accumulating new ones.
    pub fn audio_file_name(&self) -> String {
        let stem = sanitize_stem(&self.0);
        let stem = if stem.is_empty() { "word" } else { stem.as_str() };
        format!("{}.{}", stem, AUDIO_EXTENSION)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replaces path separators, NUL, whitespace and control characters with `_`,
/// collapses runs of `_`, trims dots and underscores, and caps the length.
fn sanitize_stem(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_underscore = false;

    for c in word.chars() {
        let replaced = c == '/' || c == '\\' || c == '\0' || c.is_control() || c.is_whitespace();
        if replaced || c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut take = trimmed.len().min(STEM_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
