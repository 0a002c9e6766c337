//! End-to-end tests for the outline inference pipeline.

use untoc::{
    extract_outline, extract_outline_with_options, DocumentFontProfile, ExtractOptions,
    HeadingClassifier, HeadingLevel, HeadingSource, LogicalLine, PatternClassifier, SpanDocument,
    TextNormalizer, TextSpan,
};

fn span(text: &str, font: &str, size: f32, page: u32, y: f32) -> TextSpan {
    TextSpan::new(text, font, size, page, 72.0, y)
}

/// The sample hierarchy document: numbered sections down to six dot
/// segments, then roman and lettered markers.
fn hierarchy_doc() -> SpanDocument {
    let mut spans = vec![
        span("Sample Hierarchy Guide", "Helvetica", 24.0, 1, 760.0),
        span("1. Introduction", "Helvetica", 14.0, 1, 720.0),
        span("This report walks through nested sections.", "Times", 11.0, 1, 700.0),
        span("1.1 Background", "Helvetica", 13.0, 1, 680.0),
        span("Prior work is summarized below.", "Times", 11.0, 1, 660.0),
        span("1.1.1 Historical Context", "Helvetica", 12.0, 1, 640.0),
        span("1.1.1.1 Early Period", "Helvetica", 12.0, 1, 620.0),
        span("1.1.1.1.1 First Decade", "Helvetica", 11.0, 1, 600.0),
        span("1.1.1.1.1.1 Opening Year", "Helvetica", 11.0, 1, 580.0),
        span("1.1.1.1.1.1.1 Deepest Note", "Helvetica", 11.0, 1, 560.0),
    ];
    spans.extend([
        span("IV. Discussion", "Times", 11.0, 2, 720.0),
        span("A. Observations", "Times", 11.0, 2, 700.0),
        span("a) first remark", "Times", 11.0, 2, 680.0),
        span("ii) further detail", "Times", 11.0, 2, 660.0),
        span("Closing body paragraph with nothing special.", "Times", 11.0, 2, 640.0),
    ]);
    // Enough body text to pin the median at 11pt.
    for i in 0..12 {
        spans.push(span(
            "plain body filler line for the median",
            "Times",
            11.0,
            2,
            600.0 - 20.0 * i as f32,
        ));
    }
    SpanDocument::from_spans(spans)
}

#[test]
fn test_end_to_end_hierarchy_sample() {
    let outline = extract_outline(&hierarchy_doc());

    assert_eq!(outline.title, "Sample Hierarchy Guide");

    let find = |text: &str| {
        outline
            .outline
            .iter()
            .find(|e| e.text == text)
            .unwrap_or_else(|| panic!("missing heading {text:?}"))
    };

    assert_eq!(find("Introduction").level, HeadingLevel::H1);
    assert_eq!(find("Background").level, HeadingLevel::H2);
    assert_eq!(find("Historical Context").level, HeadingLevel::H3);
    assert_eq!(find("Early Period").level, HeadingLevel::H4);
    assert_eq!(find("First Decade").level, HeadingLevel::H5);
    assert_eq!(find("Opening Year").level, HeadingLevel::H6);
    // 7+ dot segments cap at H6, never an undefined level.
    assert_eq!(find("Deepest Note").level, HeadingLevel::H6);
    // Roman numeral rule fires regardless of font size (body-sized here).
    assert_eq!(find("Discussion").level, HeadingLevel::H1);
}

#[test]
fn test_monotonic_nesting_after_repair() {
    let outline = extract_outline(&hierarchy_doc());

    let mut open: Vec<u8> = Vec::new();
    for entry in &outline.outline {
        let depth = entry.level.depth();
        let deepest = open.last().copied().unwrap_or(0);
        assert!(
            depth <= deepest + 1,
            "{:?} at depth {} after deepest open {}",
            entry.text,
            depth,
            deepest
        );
        while open.last().is_some_and(|&d| d >= depth) {
            open.pop();
        }
        open.push(depth);
    }
}

#[test]
fn test_determinism_across_worker_counts() {
    // More than 10 pages so the standard strategy takes the parallel path.
    let mut spans = Vec::new();
    for p in 1..=16u32 {
        spans.push(span(&format!("{p}. Chapter {p}"), "Helvetica", 14.0, p, 720.0));
        spans.push(span("body paragraph", "Times", 11.0, p, 700.0));
        spans.push(span(&format!("{p}.1 Detail"), "Helvetica", 12.0, p, 680.0));
        spans.push(span("more body text here", "Times", 11.0, p, 660.0));
    }
    let doc = SpanDocument::from_spans(spans);

    let outputs: Vec<String> = [1usize, 2, 8]
        .iter()
        .map(|&workers| {
            let options = ExtractOptions::new().with_max_workers(workers);
            extract_outline_with_options(&doc, options)
                .to_json(false)
                .unwrap()
        })
        .collect();

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
}

#[test]
fn test_degenerate_uniform_document() {
    let doc = SpanDocument::from_spans(vec![
        span("Meeting notes for the week", "Times", 11.0, 1, 720.0),
        span("Everyone attended on time.", "Times", 11.0, 1, 700.0),
        span("Nothing else to report.", "Times", 11.0, 1, 680.0),
    ]);
    let outline = extract_outline(&doc);
    assert!(outline.outline.is_empty());
    assert_eq!(outline.title, "Meeting notes for the week");
}

#[test]
fn test_threshold_boundaries_inclusive() {
    let patterns = PatternClassifier::new();
    // Median pinned to 10pt by the profile below.
    let doc = SpanDocument::from_spans(
        (0..9)
            .map(|i| span("median filler", "Times", 10.0, 1, 700.0 - 10.0 * i as f32))
            .collect(),
    );
    let profile = DocumentFontProfile::build(&doc);
    let classifier = HeadingClassifier::new(&patterns, &profile);

    let classify = |size: f32, page: u32| {
        classifier
            .classify(&LogicalLine {
                text: "Unmarked heading text".to_string(),
                font_name: "Times".to_string(),
                font_size: size,
                page_number: page,
                y: 700.0,
            })
            .map(|c| c.level)
    };

    // Exactly at each threshold, inclusive.
    assert_eq!(classify(10.5, 2), Some(HeadingLevel::H3));
    assert_eq!(classify(11.5, 2), Some(HeadingLevel::H2));
    assert_eq!(classify(13.0, 2), Some(HeadingLevel::H1));
    assert_eq!(classify(15.0, 1), Some(HeadingLevel::Title));
    // Just below each threshold.
    assert_eq!(classify(10.4, 2), None);
    assert_eq!(classify(11.4, 2), Some(HeadingLevel::H3));
    assert_eq!(classify(12.9, 2), Some(HeadingLevel::H2));
    assert_eq!(classify(14.9, 1), Some(HeadingLevel::H1));
}

#[test]
fn test_pattern_precedence_over_font() {
    let patterns = PatternClassifier::new();
    let doc = SpanDocument::from_spans(
        (0..9)
            .map(|i| span("median filler", "Times", 10.0, 1, 700.0 - 10.0 * i as f32))
            .collect(),
    );
    let profile = DocumentFontProfile::build(&doc);
    let classifier = HeadingClassifier::new(&patterns, &profile);

    // 10.5pt against a 10pt median would be H3 by font alone; the explicit
    // numbering pattern must win.
    let candidate = classifier
        .classify(&LogicalLine {
            text: "4.1 Student Portal".to_string(),
            font_name: "Times".to_string(),
            font_size: 10.5,
            page_number: 3,
            y: 700.0,
        })
        .expect("pattern heading");
    assert_eq!(candidate.source, HeadingSource::Pattern);
    assert_eq!(candidate.level, HeadingLevel::H2);
    assert_eq!(candidate.text, "Student Portal");
}

#[test]
fn test_clean_idempotence_over_samples() {
    let normalizer = TextNormalizer::new();
    let samples = [
        "4.1.2 System Design",
        "(iii) Scope and Limits",
        "• bulleted heading",
        "一、概要",
        "3.第一章",
        "Already stripped text",
        "IV. Discussion",
        "[12] Reference heading",
        "a) sub marker",
        "",
    ];
    for s in samples {
        let once = normalizer.clean(s);
        assert_eq!(normalizer.clean(&once), once, "clean not idempotent for {s:?}");
    }
}

#[test]
fn test_outline_serialization_shape() {
    let outline = extract_outline(&hierarchy_doc());
    let json = outline.to_json(true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["title"].is_string());
    let entries = value["outline"].as_array().unwrap();
    assert!(!entries.is_empty());
    for entry in entries {
        let level = entry["level"].as_str().unwrap();
        assert!(level.starts_with('H'), "unexpected level {level}");
        assert!(entry["page"].as_u64().unwrap() >= 1);
        assert!(!entry["text"].as_str().unwrap().is_empty());
    }
}

#[test]
fn test_pages_with_no_spans_are_skipped() {
    let mut doc = SpanDocument::from_spans(vec![
        span("1. Only Heading", "Helvetica", 14.0, 1, 720.0),
        span("body line", "Times", 11.0, 1, 700.0),
        span("trailer body", "Times", 11.0, 3, 700.0),
    ]);
    // Page 2 exists but the decoder produced nothing for it.
    doc.pages.insert(1, untoc::PageSpans::new(2));
    let outline = extract_outline(&doc);
    assert_eq!(outline.title, "Only Heading");
    assert!(outline.outline.is_empty());
}
