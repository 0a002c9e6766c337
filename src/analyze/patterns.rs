//! Numbering/marker pattern rules.
//!
//! Explicit numbering is an author-intended signal and outranks font size,
//! which is why these rules sit first in classification precedence. The
//! table is ordered: the first matching rule wins, and a given marker class
//! always maps to the same level within a document.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyze::classify::PatternLookup;
use crate::model::HeadingLevel;

static SEG6: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+){5,}[.)]?\s+\S").expect("seg6 regex"));
static SEG5: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+){4}[.)]?\s+\S").expect("seg5 regex"));
static SEG4: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+){3}[.)]?\s+\S").expect("seg4 regex"));
static SEG3: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+){2}[.)]?\s+\S").expect("seg3 regex"));
static SEG2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+[.)]?\s+\S").expect("seg2 regex"));
static SINGLE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]?\s+\S").expect("single number regex"));
// Strict Roman form; the captured numeral must be non-empty since every
// group is individually optional.
static ROMAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(M*(?:C[MD]|D?C{0,3})(?:X[CL]|L?X{0,3})(?:I[XV]|V?I{0,3}))[.)]\s+\S")
        .expect("roman regex")
});
static LETTER_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]\d+\.\s+\S").expect("letter number regex"));
static ALPHA_DOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]\.\s+\S").expect("alpha dot regex"));
static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\([A-Za-z0-9]+\)\s+\S").expect("parenthesized regex"));
static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\d+\]\s+\S").expect("bracketed regex"));
static LOWER_ROMAN_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ivx]{2,}\)\s+\S").expect("lower roman paren regex"));
static LOWER_ALPHA_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]\)\s+\S").expect("lower alpha paren regex"));

/// Ordered rule set mapping leading numbering/marker syntax to a level hint.
///
/// Stateless; all rules are compiled once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternClassifier;

impl PatternClassifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        Self
    }
}

impl PatternLookup for PatternClassifier {
    fn level_hint(&self, text: &str) -> Option<HeadingLevel> {
        let text = text.trim_start();

        // Dot-separated numbering, deepest first; 6+ segments cap at H6.
        if SEG6.is_match(text) {
            return Some(HeadingLevel::H6);
        }
        if SEG5.is_match(text) {
            return Some(HeadingLevel::H5);
        }
        if SEG4.is_match(text) {
            return Some(HeadingLevel::H4);
        }
        if SEG3.is_match(text) {
            return Some(HeadingLevel::H3);
        }
        if SEG2.is_match(text) {
            return Some(HeadingLevel::H2);
        }
        if SINGLE_NUMBER.is_match(text) {
            return Some(HeadingLevel::H1);
        }
        if ROMAN
            .captures(text)
            .is_some_and(|c| !c.get(1).map_or("", |m| m.as_str()).is_empty())
        {
            return Some(HeadingLevel::H1);
        }
        if ALPHA_DOT.is_match(text) {
            return Some(HeadingLevel::H2);
        }
        if LETTER_NUMBER.is_match(text) {
            return Some(HeadingLevel::H3);
        }
        if PARENTHESIZED.is_match(text) || BRACKETED.is_match(text) {
            return Some(HeadingLevel::H2);
        }
        if LOWER_ROMAN_PAREN.is_match(text) {
            return Some(HeadingLevel::H6);
        }
        if LOWER_ALPHA_PAREN.is_match(text) {
            return Some(HeadingLevel::H5);
        }

        None
    }
}
