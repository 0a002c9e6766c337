//! Per-line heading classification.
//!
//! Combines pattern hints, font-size ratio, and boldness into one decision
//! with fixed precedence. The classifier depends on lookup traits rather
//! than concrete implementations so tests can substitute stubs.

use crate::analyze::normalize::TextNormalizer;
use crate::model::{HeadingCandidate, HeadingLevel, HeadingSource, LogicalLine};

/// Size-ratio thresholds against the document median, inclusive.
const TITLE_RATIO: f32 = 1.5;
const H1_RATIO: f32 = 1.3;
const H2_RATIO: f32 = 1.15;
const H3_RATIO: f32 = 1.05;

/// Level-hint lookup from leading numbering/marker syntax.
pub trait PatternLookup: Sync {
    /// Level suggested by the line's leading marker, if any.
    fn level_hint(&self, text: &str) -> Option<HeadingLevel>;
}

/// Font-derived signals for a document.
pub trait FontLookup: Sync {
    /// Ratio of a font size to the document median (0.0 when unusable).
    fn size_ratio(&self, font_size: f32) -> f32;
    /// Lexical boldness check on a font name.
    fn is_bold(&self, font_name: &str) -> bool;
}

/// Which detection rules are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleSet {
    /// Pattern, font ratio, and boldness.
    #[default]
    Full,
    /// Pattern and font ratio only; used by the fast strategy, where the
    /// boldness pass is skipped to stay inside the latency ceiling.
    PatternAndFont,
}

/// Heading classifier for one document.
pub struct HeadingClassifier<'a> {
    patterns: &'a dyn PatternLookup,
    fonts: &'a dyn FontLookup,
    normalizer: TextNormalizer,
    rules: RuleSet,
}

impl<'a> HeadingClassifier<'a> {
    /// Create a classifier over the given lookups.
    pub fn new(patterns: &'a dyn PatternLookup, fonts: &'a dyn FontLookup) -> Self {
        Self {
            patterns,
            fonts,
            normalizer: TextNormalizer::new(),
            rules: RuleSet::Full,
        }
    }

    /// Restrict the active rules.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Classify one logical line.
    ///
    /// Precedence, first hit wins: pattern hint, then font-size ratio, then
    /// boldness. A line matching nothing is not a heading; there is no
    /// default level.
    pub fn classify(&self, line: &LogicalLine) -> Option<HeadingCandidate> {
        let raw = line.text.trim();
        if raw.chars().count() < 2 {
            return None;
        }
        // List items are body content, not headings.
        if raw.starts_with('-') || raw.starts_with('•') {
            return None;
        }

        let decision = self
            .pattern_level(raw)
            .or_else(|| self.font_level(line))
            .or_else(|| self.style_level(line))?;

        let text = self.normalizer.clean(raw);
        if text.is_empty() {
            return None;
        }

        Some(HeadingCandidate {
            text,
            level: decision.0,
            page: line.page_number,
            raw_font_size: line.font_size,
            source: decision.1,
        })
    }

    fn pattern_level(&self, raw: &str) -> Option<(HeadingLevel, HeadingSource)> {
        self.patterns
            .level_hint(raw)
            .map(|level| (level, HeadingSource::Pattern))
    }

    fn font_level(&self, line: &LogicalLine) -> Option<(HeadingLevel, HeadingSource)> {
        let ratio = self.fonts.size_ratio(line.font_size);
        let level = if ratio >= TITLE_RATIO && line.page_number == 1 {
            HeadingLevel::Title
        } else if ratio >= H1_RATIO {
            HeadingLevel::H1
        } else if ratio >= H2_RATIO {
            HeadingLevel::H2
        } else if ratio >= H3_RATIO {
            HeadingLevel::H3
        } else {
            return None;
        };
        Some((level, HeadingSource::Font))
    }

    fn style_level(&self, line: &LogicalLine) -> Option<(HeadingLevel, HeadingSource)> {
        if self.rules != RuleSet::Full {
            return None;
        }
        if self.fonts.is_bold(&line.font_name) {
            // Bold alone is the weakest signal and never promotes past H3.
            Some((HeadingLevel::H3, HeadingSource::Style))
        } else {
            None
        }
    }
}
