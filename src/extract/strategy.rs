//! Standard and fast extraction strategies.
//!
//! Both implement one shared trait; the orchestrator decides which runs and
//! merges their results. Concurrency never affects output ordering: chunk
//! results are reassembled strictly by page number, not completion order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::analyze::{DocumentFontProfile, PatternClassifier, RuleSet};
use crate::extract::options::ExtractOptions;
use crate::extract::page::{PageProcessor, PageResult};
use crate::model::SpanDocument;

/// Documents at or under this page count are processed sequentially.
const SEQUENTIAL_PAGE_LIMIT: usize = 10;

/// What a strategy produced for a requested page set.
#[derive(Debug, Default)]
pub struct StrategyOutcome {
    /// Per-page results, ascending by page number
    pub results: Vec<PageResult>,
    /// Pages given up at the soft deadline, for fallback routing
    pub unprocessed: Vec<u32>,
}

/// A processing strategy over a requested set of pages.
pub trait ExtractionStrategy {
    /// Process the given pages of the document.
    fn process_pages(
        &self,
        doc: &SpanDocument,
        pages: &[u32],
        profile: &DocumentFontProfile,
    ) -> StrategyOutcome;
}

enum ChunkMessage {
    Done(usize, Vec<PageResult>),
    Skipped(usize, Vec<u32>),
}

/// Full line-by-line processing of every requested page.
///
/// Documents over [`SEQUENTIAL_PAGE_LIMIT`] pages are split into contiguous
/// chunks handled by a bounded worker pool. The soft deadline is
/// cooperative: chunks already claimed by a worker run to completion, while
/// chunks not yet dispatched report themselves skipped so the orchestrator
/// can route them through the fast strategy.
pub struct StandardStrategy {
    options: ExtractOptions,
}

impl StandardStrategy {
    /// Create a standard strategy with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    fn process_sequential(
        &self,
        doc: &SpanDocument,
        pages: &[u32],
        profile: &DocumentFontProfile,
        started: Instant,
    ) -> StrategyOutcome {
        let patterns = PatternClassifier::new();
        let processor = PageProcessor::new(&patterns, profile, RuleSet::Full);

        let mut outcome = StrategyOutcome::default();
        for (i, &number) in pages.iter().enumerate() {
            if started.elapsed() > self.options.soft_deadline {
                log::warn!(
                    "soft deadline exceeded after {} of {} pages, deferring the rest",
                    i,
                    pages.len()
                );
                outcome.unprocessed.extend_from_slice(&pages[i..]);
                break;
            }
            if let Some(page) = doc.page(number) {
                outcome.results.push(processor.process_page(page));
            }
        }
        outcome
    }

    fn process_parallel(
        &self,
        doc: &SpanDocument,
        pages: &[u32],
        profile: &DocumentFontProfile,
        started: Instant,
    ) -> StrategyOutcome {
        let workers = self.options.worker_count();
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool,
            Err(e) => {
                log::warn!("worker pool unavailable ({e}), processing sequentially");
                return self.process_sequential(doc, pages, profile, started);
            }
        };

        let chunk_size = pages.len().div_ceil(workers).max(1);
        let chunks: Vec<&[u32]> = pages.chunks(chunk_size).collect();
        let chunk_count = chunks.len();

        let (tx, rx) = crossbeam_channel::unbounded::<ChunkMessage>();
        let cancelled = AtomicBool::new(false);
        let deadline_at = started + self.options.soft_deadline;

        let mut done: Vec<(usize, Vec<PageResult>)> = Vec::with_capacity(chunk_count);
        let mut skipped: Vec<(usize, Vec<u32>)> = Vec::new();

        pool.in_place_scope(|scope| {
            for (idx, chunk) in chunks.iter().copied().enumerate() {
                let tx = tx.clone();
                let cancelled = &cancelled;
                scope.spawn(move |_| {
                    if cancelled.load(Ordering::Relaxed) {
                        let _ = tx.send(ChunkMessage::Skipped(idx, chunk.to_vec()));
                        return;
                    }
                    let patterns = PatternClassifier::new();
                    let processor = PageProcessor::new(&patterns, profile, RuleSet::Full);
                    let results = chunk
                        .iter()
                        .filter_map(|n| doc.page(*n))
                        .map(|page| processor.process_page(page))
                        .collect();
                    let _ = tx.send(ChunkMessage::Done(idx, results));
                });
            }
            drop(tx);

            let mut received = 0;
            while received < chunk_count {
                let message = if cancelled.load(Ordering::Relaxed) {
                    rx.recv().ok()
                } else {
                    match rx.recv_deadline(deadline_at) {
                        Ok(message) => Some(message),
                        Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                            log::warn!(
                                "soft deadline exceeded with {} of {} chunks pending",
                                chunk_count - received,
                                chunk_count
                            );
                            cancelled.store(true, Ordering::Relaxed);
                            continue;
                        }
                        Err(crossbeam_channel::RecvTimeoutError::Disconnected) => None,
                    }
                };
                match message {
                    Some(ChunkMessage::Done(idx, results)) => done.push((idx, results)),
                    Some(ChunkMessage::Skipped(idx, numbers)) => skipped.push((idx, numbers)),
                    None => break,
                }
                received += 1;
            }
        });

        done.sort_by_key(|(idx, _)| *idx);
        skipped.sort_by_key(|(idx, _)| *idx);

        StrategyOutcome {
            results: done.into_iter().flat_map(|(_, r)| r).collect(),
            unprocessed: skipped.into_iter().flat_map(|(_, n)| n).collect(),
        }
    }
}

impl ExtractionStrategy for StandardStrategy {
    fn process_pages(
        &self,
        doc: &SpanDocument,
        pages: &[u32],
        profile: &DocumentFontProfile,
    ) -> StrategyOutcome {
        let started = Instant::now();
        let parallel = self.options.parallel
            && pages.len() > SEQUENTIAL_PAGE_LIMIT
            && self.options.worker_count() > 1;
        if parallel {
            self.process_parallel(doc, pages, profile, started)
        } else {
            self.process_sequential(doc, pages, profile, started)
        }
    }
}

/// Bounded-latency processing of an evenly spaced page sample.
///
/// Uses the reduced rule set (pattern and font-size only, boldness skipped)
/// and its own hard time ceiling. Pages outside the sample are deliberately
/// skipped, never deferred.
pub struct FastStrategy {
    options: ExtractOptions,
}

impl FastStrategy {
    /// Create a fast strategy with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Evenly spaced sample of the requested pages: the first page, a fixed
    /// stride through the remainder, and always the last page.
    fn sample(&self, pages: &[u32]) -> Vec<u32> {
        if pages.len() <= self.options.sample_target {
            return pages.to_vec();
        }
        let stride = (pages.len() / self.options.sample_target).max(2);
        let mut sampled: Vec<u32> = pages.iter().copied().step_by(stride).collect();
        if let Some(&last) = pages.last() {
            if sampled.last() != Some(&last) {
                sampled.push(last);
            }
        }
        sampled
    }
}

impl ExtractionStrategy for FastStrategy {
    fn process_pages(
        &self,
        doc: &SpanDocument,
        pages: &[u32],
        profile: &DocumentFontProfile,
    ) -> StrategyOutcome {
        let started = Instant::now();
        let patterns = PatternClassifier::new();
        let processor = PageProcessor::new(&patterns, profile, RuleSet::PatternAndFont);

        let sampled = self.sample(pages);
        log::debug!("fast strategy sampling {} of {} pages", sampled.len(), pages.len());

        let mut outcome = StrategyOutcome::default();
        for number in sampled {
            if started.elapsed() > self.options.hard_deadline {
                log::warn!("fast strategy hit the latency ceiling at page {number}");
                break;
            }
            if let Some(page) = doc.page(number) {
                outcome.results.push(processor.process_page(page));
            }
        }
        outcome
    }
}
