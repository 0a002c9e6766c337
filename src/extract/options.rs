//! Extraction options and configuration.

use std::time::Duration;

/// Options controlling strategy selection, parallelism, and deadlines.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Whether to use parallel processing for the standard strategy
    pub parallel: bool,

    /// Worker pool size cap (0 = min(available cores, 8))
    pub max_workers: usize,

    /// Page count above which the fast strategy is chosen upfront
    pub fast_page_threshold: usize,

    /// Soft deadline for the standard strategy; when exceeded, remaining
    /// pages fall back to the fast strategy
    pub soft_deadline: Duration,

    /// Overall ceiling, enforced by the fast strategy's own time check
    pub hard_deadline: Duration,

    /// Approximate number of pages the fast strategy samples
    pub sample_target: usize,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the worker pool size cap.
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers;
        self
    }

    /// Set the page count above which the fast strategy is chosen upfront.
    pub fn with_fast_page_threshold(mut self, pages: usize) -> Self {
        self.fast_page_threshold = pages;
        self
    }

    /// Set the soft deadline for the standard strategy.
    pub fn with_soft_deadline(mut self, deadline: Duration) -> Self {
        self.soft_deadline = deadline;
        self
    }

    /// Set the overall latency ceiling.
    pub fn with_hard_deadline(mut self, deadline: Duration) -> Self {
        self.hard_deadline = deadline;
        self
    }

    /// Set the approximate fast-strategy sample size.
    pub fn with_sample_target(mut self, pages: usize) -> Self {
        self.sample_target = pages.max(1);
        self
    }

    /// Effective worker count: the configured cap, or min(cores, 8).
    pub fn worker_count(&self) -> usize {
        if self.max_workers > 0 {
            return self.max_workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(8)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            max_workers: 0,
            fast_page_threshold: 50,
            soft_deadline: Duration::from_secs(8),
            hard_deadline: Duration::from_secs(10),
            sample_target: 20,
        }
    }
}
