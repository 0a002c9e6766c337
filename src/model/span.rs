//! Span-level input types.
//!
//! Spans are produced by an external PDF decoder that has already resolved
//! font substitutions and Unicode-normalized the text. The core never
//! mutates them; it only merges them into logical lines for classification.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

use crate::error::{Error, Result};

/// One run of text sharing a single font and position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Font name as reported by the decoder (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Page this span belongs to (1-indexed)
    pub page_number: u32,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline, larger = higher on the page)
    pub y: f32,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(
        text: impl Into<String>,
        font_name: impl Into<String>,
        font_size: f32,
        page_number: u32,
        x: f32,
        y: f32,
    ) -> Self {
        Self {
            text: text.into(),
            font_name: font_name.into(),
            font_size,
            page_number,
            x,
            y,
        }
    }

    /// Whether the span carries data the pipeline can work with.
    ///
    /// Decoders occasionally emit spans with NaN geometry or empty text for
    /// damaged content streams; those are skipped, not treated as errors.
    pub fn is_well_formed(&self) -> bool {
        !self.text.trim().is_empty()
            && self.font_size.is_finite()
            && self.font_size > 0.0
            && self.x.is_finite()
            && self.y.is_finite()
    }
}

/// All spans belonging to one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpans {
    /// Page number (1-indexed)
    pub number: u32,
    /// Spans on this page, in decoder order
    pub spans: Vec<TextSpan>,
}

impl PageSpans {
    /// Create a new page with no spans.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            spans: Vec::new(),
        }
    }

    /// Check if the page has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// A full document as delivered by the decoder: spans grouped per page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanDocument {
    /// Pages in ascending page-number order
    pub pages: Vec<PageSpans>,
}

impl SpanDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a flat span list into pages, sorted by page number.
    ///
    /// Within-page span order is preserved as given; a decoder failing on a
    /// page simply contributes no spans for it.
    pub fn from_spans(spans: Vec<TextSpan>) -> Self {
        let mut pages: BTreeMap<u32, Vec<TextSpan>> = BTreeMap::new();
        for span in spans {
            pages.entry(span.page_number).or_default().push(span);
        }
        Self {
            pages: pages
                .into_iter()
                .map(|(number, spans)| PageSpans { number, spans })
                .collect(),
        }
    }

    /// Decode a span dump from a JSON string.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(data)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Decode a span dump from a reader.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: Self = serde_json::from_reader(reader)?;
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&self) -> Result<()> {
        let mut last = 0u32;
        for page in &self.pages {
            if page.number == 0 {
                return Err(Error::InvalidDocument(
                    "page numbers are 1-indexed".to_string(),
                ));
            }
            if page.number <= last {
                return Err(Error::InvalidDocument(format!(
                    "pages out of order at page {}",
                    page.number
                )));
            }
            last = page.number;
        }
        Ok(())
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Look up a page by its page number.
    pub fn page(&self, number: u32) -> Option<&PageSpans> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// The first page of the document, if any.
    pub fn first_page(&self) -> Option<&PageSpans> {
        self.pages.first()
    }

    /// Check if the document has no pages at all.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over all spans across all pages.
    pub fn all_spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.pages.iter().flat_map(|p| p.spans.iter())
    }
}

/// One or more spans merged by baseline continuity into a candidate line.
#[derive(Debug, Clone)]
pub struct LogicalLine {
    /// Combined text of the constituent spans
    pub text: String,
    /// Font name of the dominant (longest) constituent span
    pub font_name: String,
    /// Dominant font size, weighted by text length
    pub font_size: f32,
    /// Page this line belongs to (1-indexed)
    pub page_number: u32,
    /// Baseline Y position
    pub y: f32,
}

impl LogicalLine {
    /// Build a line from spans already known to share a baseline.
    ///
    /// Spans are sorted by X, the dominant font size is weighted by text
    /// length (a short bold run should not dominate a long body run), and
    /// the font name comes from the longest span.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Option<Self> {
        spans.retain(TextSpan::is_well_formed);
        if spans.is_empty() {
            return None;
        }

        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        let total_chars: usize = spans.iter().map(|s| s.text.chars().count()).sum();
        let weighted_size: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.chars().count() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted_size / total_chars as f32
        } else {
            spans[0].font_size
        };

        let dominant = spans
            .iter()
            .max_by_key(|s| s.text.chars().count())
            .map(|s| s.font_name.clone())
            .unwrap_or_default();

        let mut text = String::new();
        for (i, span) in spans.iter().enumerate() {
            let piece = span.text.trim();
            if i > 0 && !text.is_empty() && !piece.is_empty() {
                text.push(' ');
            }
            text.push_str(piece);
        }

        Some(Self {
            text,
            font_name: dominant,
            font_size,
            page_number: spans[0].page_number,
            y: spans[0].y,
        })
    }
}
