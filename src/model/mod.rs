//! Data model for span input and outline output.

mod outline;
mod span;

pub use outline::{HeadingCandidate, HeadingLevel, HeadingSource, Outline, OutlineEntry};
pub use span::{LogicalLine, PageSpans, SpanDocument, TextSpan};
