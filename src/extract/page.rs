//! Per-page span merging and classification.

use crate::analyze::{FontLookup, HeadingClassifier, PatternLookup, RuleSet};
use crate::model::{HeadingCandidate, HeadingLevel, LogicalLine, PageSpans, TextSpan};

/// Spans whose baselines differ by no more than this merge into one line.
const BASELINE_TOLERANCE: f32 = 3.0;

/// Result of processing a single page.
#[derive(Debug, Default)]
pub struct PageResult {
    /// Page number (1-indexed)
    pub page: u32,
    /// Title candidate; only ever present for page 1
    pub title_candidate: Option<HeadingCandidate>,
    /// Heading candidates in top-of-page-first order
    pub headings: Vec<HeadingCandidate>,
}

impl PageResult {
    fn empty(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }
}

/// Merges raw spans into logical lines and classifies them.
pub struct PageProcessor<'a> {
    classifier: HeadingClassifier<'a>,
}

impl<'a> PageProcessor<'a> {
    /// Create a processor over the document's lookups.
    pub fn new(patterns: &'a dyn PatternLookup, fonts: &'a dyn FontLookup, rules: RuleSet) -> Self {
        Self {
            classifier: HeadingClassifier::new(patterns, fonts).with_rules(rules),
        }
    }

    /// Process one page into heading candidates.
    ///
    /// A page with malformed span data yields an empty result rather than
    /// aborting the document; bad spans are dropped during line merging.
    pub fn process_page(&self, page: &PageSpans) -> PageResult {
        if page.is_empty() {
            log::debug!("page {}: no spans", page.number);
            return PageResult::empty(page.number);
        }

        let lines = merge_into_lines(&page.spans);
        if lines.is_empty() {
            log::warn!(
                "page {}: no usable lines from {} spans",
                page.number,
                page.spans.len()
            );
            return PageResult::empty(page.number);
        }

        let mut headings: Vec<HeadingCandidate> = Vec::new();
        for line in &lines {
            if let Some(candidate) = self.classifier.classify(line) {
                headings.push(candidate);
            }
        }

        let title_candidate = if page.number == 1 {
            take_title_candidate(&mut headings)
        } else {
            None
        };

        PageResult {
            page: page.number,
            title_candidate,
            headings,
        }
    }
}

/// Merge spans into logical lines by baseline continuity.
///
/// Lines come out top-of-page first (decoder Y grows upward), spans within
/// a line left-to-right; this is the within-page discovery order the final
/// outline preserves.
pub fn merge_into_lines(spans: &[TextSpan]) -> Vec<LogicalLine> {
    let mut sorted: Vec<&TextSpan> = spans.iter().filter(|s| s.is_well_formed()).collect();
    sorted.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y = f32::INFINITY;

    for span in sorted {
        if current.is_empty() || (current_y - span.y).abs() <= BASELINE_TOLERANCE {
            if current.is_empty() {
                current_y = span.y;
            }
            current.push(span.clone());
        } else {
            if let Some(line) = LogicalLine::from_spans(std::mem::take(&mut current)) {
                lines.push(line);
            }
            current_y = span.y;
            current.push(span.clone());
        }
    }
    if let Some(line) = LogicalLine::from_spans(current) {
        lines.push(line);
    }

    lines
}

/// Pick and remove the page-1 title candidate.
///
/// A TITLE-level candidate wins outright (the first one; any further
/// TITLE-level candidates are demoted to H1 and stay in the heading list).
/// Otherwise the largest-font heading is taken, earliest on a tie. The
/// chosen candidate is removed so the title is never repeated in the
/// outline.
fn take_title_candidate(headings: &mut Vec<HeadingCandidate>) -> Option<HeadingCandidate> {
    if let Some(pos) = headings.iter().position(|c| c.level == HeadingLevel::Title) {
        let title = headings.remove(pos);
        for c in headings.iter_mut() {
            if c.level == HeadingLevel::Title {
                c.level = HeadingLevel::H1;
            }
        }
        return Some(title);
    }

    let mut best: Option<usize> = None;
    for (i, c) in headings.iter().enumerate() {
        let better = match best {
            None => true,
            Some(b) => c.raw_font_size > headings[b].raw_font_size,
        };
        if better {
            best = Some(i);
        }
    }
    best.map(|i| headings.remove(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{DocumentFontProfile, PatternClassifier};
    use crate::model::SpanDocument;

    fn span(text: &str, size: f32, page: u32, x: f32, y: f32) -> TextSpan {
        TextSpan::new(text, "Serif", size, page, x, y)
    }

    #[test]
    fn test_merge_groups_by_baseline() {
        let spans = vec![
            span("world", 12.0, 1, 60.0, 700.2),
            span("hello", 12.0, 1, 10.0, 700.0),
            span("next line", 12.0, 1, 10.0, 680.0),
        ];
        let lines = merge_into_lines(&spans);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "hello world");
        assert_eq!(lines[1].text, "next line");
    }

    #[test]
    fn test_merge_skips_malformed_spans() {
        let spans = vec![
            span("good", 12.0, 1, 10.0, 700.0),
            TextSpan::new("", "F", 12.0, 1, 20.0, 700.0),
            TextSpan::new("nan", "F", f32::NAN, 1, 30.0, 700.0),
        ];
        let lines = merge_into_lines(&spans);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "good");
    }

    #[test]
    fn test_page_one_title_from_title_level() {
        let doc = SpanDocument::from_spans(vec![
            span("Annual Report", 18.0, 1, 10.0, 720.0),
            span("body text one", 10.0, 1, 10.0, 700.0),
            span("body text two", 10.0, 1, 10.0, 690.0),
            span("body text three", 10.0, 1, 10.0, 680.0),
        ]);
        let profile = DocumentFontProfile::build(&doc);
        let patterns = PatternClassifier::new();
        let processor = PageProcessor::new(&patterns, &profile, RuleSet::Full);

        let result = processor.process_page(&doc.pages[0]);
        let title = result.title_candidate.expect("title candidate");
        assert_eq!(title.level, HeadingLevel::Title);
        assert_eq!(title.text, "Annual Report");
        assert!(result.headings.iter().all(|h| h.text != "Annual Report"));
    }

    #[test]
    fn test_no_title_candidate_off_page_one() {
        let doc = SpanDocument::from_spans(vec![
            span("filler", 10.0, 1, 10.0, 700.0),
            span("2. Methods", 10.0, 2, 10.0, 700.0),
        ]);
        let profile = DocumentFontProfile::build(&doc);
        let patterns = PatternClassifier::new();
        let processor = PageProcessor::new(&patterns, &profile, RuleSet::Full);

        let result = processor.process_page(doc.page(2).unwrap());
        assert!(result.title_candidate.is_none());
        assert_eq!(result.headings.len(), 1);
    }

    #[test]
    fn test_empty_page_yields_empty_result() {
        let profile = DocumentFontProfile::build(&SpanDocument::new());
        let patterns = PatternClassifier::new();
        let processor = PageProcessor::new(&patterns, &profile, RuleSet::Full);
        let result = processor.process_page(&PageSpans::new(4));
        assert_eq!(result.page, 4);
        assert!(result.title_candidate.is_none());
        assert!(result.headings.is_empty());
    }
}
