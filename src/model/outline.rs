//! Outline output types.

use serde::{Deserialize, Serialize};

/// Heading rank, ordered shallow (TITLE) to deep (H6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    #[serde(rename = "TITLE")]
    Title,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Nesting depth: TITLE = 0, H1 = 1 .. H6 = 6.
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::Title => 0,
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }

    /// Level for a nesting depth, clamped into H1..H6.
    pub fn from_depth(depth: u8) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            4 => HeadingLevel::H4,
            5 => HeadingLevel::H5,
            _ => HeadingLevel::H6,
        }
    }

    /// String form as used in the serialized outline.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::Title => "TITLE",
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
            HeadingLevel::H5 => "H5",
            HeadingLevel::H6 => "H6",
        }
    }
}

/// Which detection rule produced a candidate.
///
/// Recorded for debuggability; hierarchy repair keeps it on the candidate it
/// demotes so downstream consumers can still see what fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingSource {
    /// Explicit numbering/marker syntax
    Pattern,
    /// Font-size ratio against the document median
    Font,
    /// Boldness of the dominant font
    Style,
}

/// A classified line that may end up in the outline.
#[derive(Debug, Clone)]
pub struct HeadingCandidate {
    /// Normalized text (numbering and markers stripped)
    pub text: String,
    /// Detected level
    pub level: HeadingLevel,
    /// Page the line appeared on (1-indexed)
    pub page: u32,
    /// Dominant font size of the source line
    pub raw_font_size: f32,
    /// Rule that fired
    pub source: HeadingSource,
}

/// One entry of the final outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level ("H1".."H6" in serialized form)
    pub level: HeadingLevel,
    /// Heading text, normalized
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

/// The final artifact: a title plus the ordered heading sequence.
///
/// Ordering is strictly by page number ascending, then by original
/// within-page order. The title is never repeated inside `outline`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (fallback-derived when no candidate qualifies)
    pub title: String,
    /// Ordered headings
    pub outline: Vec<OutlineEntry>,
}

impl Outline {
    /// Create an outline with a title and no headings.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> crate::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl From<HeadingCandidate> for OutlineEntry {
    fn from(c: HeadingCandidate) -> Self {
        Self {
            level: c.level,
            text: c.text,
            page: c.page,
        }
    }
}
