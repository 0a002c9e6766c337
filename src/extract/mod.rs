//! Extraction orchestration: per-page processing, the standard and fast
//! strategies, and the deadline-aware orchestrator that combines them.

mod options;
mod orchestrator;
mod page;
mod strategy;

pub use options::ExtractOptions;
pub use orchestrator::ExtractionOrchestrator;
pub use page::{PageProcessor, PageResult};
pub use strategy::{ExtractionStrategy, FastStrategy, StandardStrategy, StrategyOutcome};
