//! # untoc
//!
//! Infers a document's logical structure — a title and a ranked sequence of
//! headings with page numbers — from raw per-page text spans and their
//! typographic attributes (font name, size, position).
//!
//! Spans come from an external PDF decoder; this library is the inference
//! pipeline: corpus-wide font statistics, text normalization, pattern and
//! style based heading classification, hierarchy repair, and a
//! dual-strategy orchestration with a latency-driven fallback.
//!
//! ## Quick Start
//!
//! ```
//! use untoc::{extract_outline, SpanDocument, TextSpan};
//!
//! let doc = SpanDocument::from_spans(vec![
//!     TextSpan::new("User Guide", "Helvetica", 24.0, 1, 72.0, 720.0),
//!     TextSpan::new("1. Introduction", "Helvetica", 14.0, 1, 72.0, 680.0),
//!     TextSpan::new("Welcome to the guide.", "Times", 11.0, 1, 72.0, 660.0),
//!     TextSpan::new("1.1 Getting Started", "Helvetica", 12.0, 2, 72.0, 720.0),
//!     TextSpan::new("Install the package first.", "Times", 11.0, 2, 72.0, 700.0),
//! ]);
//!
//! let outline = extract_outline(&doc);
//! assert_eq!(outline.title, "User Guide");
//! assert_eq!(outline.outline[0].text, "Introduction");
//! ```
//!
//! ## Features
//!
//! - **Self-calibrating**: thresholds are ratios against each document's
//!   own median font size, never global constants
//! - **Pattern-first**: explicit numbering outranks font size, which
//!   outranks boldness
//! - **Deterministic**: output order depends only on page numbers and
//!   within-page order, never on worker count
//! - **Bounded latency**: a sampled fast path takes over for large
//!   documents or when the standard path runs over budget

pub mod analyze;
pub mod error;
pub mod extract;
pub mod model;

pub use analyze::{
    DocumentFontProfile, FontLookup, HeadingClassifier, PatternClassifier, PatternLookup,
    RuleSet, TextNormalizer,
};
pub use error::{Error, Result};
pub use extract::{
    ExtractOptions, ExtractionOrchestrator, ExtractionStrategy, FastStrategy, PageProcessor,
    PageResult, StandardStrategy, StrategyOutcome,
};
pub use model::{
    HeadingCandidate, HeadingLevel, HeadingSource, LogicalLine, Outline, OutlineEntry, PageSpans,
    SpanDocument, TextSpan,
};

/// Infer the outline of a span document with default options.
///
/// Never fails: malformed pages are skipped and a document with no usable
/// spans yields a fallback title and an empty heading list.
pub fn extract_outline(doc: &SpanDocument) -> Outline {
    ExtractionOrchestrator::new().extract(doc)
}

/// Infer the outline with custom options.
///
/// # Example
///
/// ```
/// use untoc::{extract_outline_with_options, ExtractOptions, SpanDocument};
///
/// let options = ExtractOptions::new().sequential().with_fast_page_threshold(100);
/// let outline = extract_outline_with_options(&SpanDocument::new(), options);
/// assert_eq!(outline.title, "Untitled");
/// ```
pub fn extract_outline_with_options(doc: &SpanDocument, options: ExtractOptions) -> Outline {
    ExtractionOrchestrator::with_options(options).extract(doc)
}

/// Decode a span dump from JSON and infer its outline.
pub fn extract_outline_from_json(data: &str) -> Result<Outline> {
    let doc = SpanDocument::from_json_str(data)?;
    Ok(extract_outline(&doc))
}
