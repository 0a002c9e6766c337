//! Strategy selection and result aggregation.

use std::time::Instant;

use crate::analyze::{repair_hierarchy, DocumentFontProfile, TextNormalizer};
use crate::extract::options::ExtractOptions;
use crate::extract::page::{merge_into_lines, PageResult};
use crate::extract::strategy::{
    ExtractionStrategy, FastStrategy, StandardStrategy, StrategyOutcome,
};
use crate::model::{HeadingCandidate, Outline, OutlineEntry, SpanDocument};

/// Title used when a document yields no usable page-1 text at all.
const FALLBACK_TITLE: &str = "Untitled";

/// Selects a strategy, merges fallback results, and assembles the outline.
///
/// The outline is a pure function of page numbers and within-page discovery
/// order; worker count and completion order never affect it.
pub struct ExtractionOrchestrator {
    options: ExtractOptions,
}

impl ExtractionOrchestrator {
    /// Create an orchestrator with default options.
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    /// Create an orchestrator with the given options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Infer the outline of a span document.
    ///
    /// Never fails: a document with no usable spans produces a fallback
    /// title and an empty heading sequence.
    pub fn extract(&self, doc: &SpanDocument) -> Outline {
        let started = Instant::now();
        let profile = DocumentFontProfile::build(doc);
        let pages: Vec<u32> = doc.pages.iter().map(|p| p.number).collect();

        let mut outcome = if pages.len() > self.options.fast_page_threshold {
            log::info!(
                "document has {} pages (threshold {}), using fast strategy",
                pages.len(),
                self.options.fast_page_threshold
            );
            FastStrategy::new(self.options.clone()).process_pages(doc, &pages, &profile)
        } else {
            let standard = StandardStrategy::new(self.options.clone());
            let mut outcome = standard.process_pages(doc, &pages, &profile);
            if !outcome.unprocessed.is_empty() {
                log::info!(
                    "routing {} deferred pages through the fast strategy",
                    outcome.unprocessed.len()
                );
                let fast = FastStrategy::new(self.options.clone());
                let fallback = fast.process_pages(doc, &outcome.unprocessed, &profile);
                outcome.results.extend(fallback.results);
                outcome.unprocessed.clear();
            }
            outcome
        };

        outcome
            .results
            .sort_by_key(|r: &PageResult| r.page);

        let title = self.resolve_title(doc, &outcome);

        let mut candidates: Vec<HeadingCandidate> = Vec::new();
        for result in outcome.results {
            candidates.extend(result.headings);
        }
        // The title is chosen once from page 1 and never repeated below it.
        // Repeats are removed before repair so their children re-anchor
        // instead of ending up orphaned at a skipped depth.
        candidates.retain(|c| !(c.page == 1 && c.text == title));
        let entries: Vec<OutlineEntry> = repair_hierarchy(candidates)
            .into_iter()
            .map(OutlineEntry::from)
            .collect();

        log::info!(
            "extracted {} headings in {:.2?}",
            entries.len(),
            started.elapsed()
        );

        Outline {
            title,
            outline: entries,
        }
    }

    /// Title resolution chain: page-1 candidate from whichever strategy
    /// processed page 1, then the first non-empty normalized page-1 line,
    /// then a fixed fallback. Never empty.
    fn resolve_title(&self, doc: &SpanDocument, outcome: &StrategyOutcome) -> String {
        let first_page = match doc.first_page() {
            Some(page) => page,
            None => return FALLBACK_TITLE.to_string(),
        };

        if let Some(candidate) = outcome
            .results
            .iter()
            .find(|r| r.page == first_page.number)
            .and_then(|r| r.title_candidate.as_ref())
        {
            return candidate.text.clone();
        }

        let normalizer = TextNormalizer::new();
        for line in merge_into_lines(&first_page.spans) {
            let cleaned = normalizer.clean(&line.text);
            if !cleaned.is_empty() {
                return cleaned;
            }
        }

        FALLBACK_TITLE.to_string()
    }
}

impl Default for ExtractionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
