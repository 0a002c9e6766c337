//! Text normalization for heading candidates.
//!
//! Strips decorative numbering and marker prefixes (Western, Roman,
//! alphabetic, East-Asian numerals, bullet glyphs), collapses whitespace
//! runs, and applies Unicode NFC normalization. Stripping iterates to a
//! fixpoint, which makes `clean` idempotent by construction.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WESTERN_NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)*[.)]?\s+").expect("western numbering regex"));
// Mixed case: a Western numeral run directly followed by CJK text has no
// separating space; the run is stripped as one unit.
static WESTERN_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)*[.)]?\s*").expect("western run regex"));
static ALPHA_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]\d*[.)]\s+").expect("alpha marker regex"));
static ROMAN_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[IVXLCDMivxl]+[.)]\s+").expect("roman marker regex"));
static PAREN_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\([A-Za-z0-9]+\)\s*").expect("paren marker regex"));
static BRACKET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\d+\]\s*").expect("bracket marker regex"));
static BULLET_GLYPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•■◦○●▪]\s*").expect("bullet glyph regex"));
static DASH_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-–—*]\s+").expect("dash marker regex"));
static ASIAN_NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[一二三四五六七八九十百千]+[、。.\s]\s*").expect("asian numbering regex"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Stateless normalizer; all patterns are compiled once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Strip marker prefixes and collapse whitespace.
    ///
    /// Idempotent: `clean(clean(x)) == clean(x)` for all inputs.
    pub fn clean(&self, raw_text: &str) -> String {
        let normalized: String = raw_text.nfc().collect();
        let mut text = normalized.trim().to_string();

        loop {
            let stripped = strip_leading_marker(&text);
            if stripped == text {
                break;
            }
            text = stripped;
        }

        WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
    }
}

fn strip_leading_marker(text: &str) -> String {
    // Western numbering directly followed by CJK text is stripped as one
    // unit even without a separating space.
    if let Some(m) = WESTERN_RUN.find(text) {
        if m.end() < text.len() {
            let rest = &text[m.end()..];
            if rest.chars().next().is_some_and(is_cjk) {
                return rest.trim_start().to_string();
            }
        }
    }

    for re in [
        &*WESTERN_NUMBERING,
        &*ASIAN_NUMBERING,
        &*ROMAN_MARKER,
        &*ALPHA_MARKER,
        &*PAREN_MARKER,
        &*BRACKET_MARKER,
        &*BULLET_GLYPH,
        &*DASH_MARKER,
    ] {
        if let Some(m) = re.find(text) {
            if m.end() < text.len() {
                return text[m.end()..].trim_start().to_string();
            }
        }
    }

    text.to_string()
}

fn is_cjk(c: char) -> bool {
    c as u32 > 0x3000
}
