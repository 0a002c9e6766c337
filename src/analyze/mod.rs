//! Classification core: font statistics, text normalization, pattern and
//! style rules, and the whole-document hierarchy repair pass.

mod classify;
mod fonts;
mod hierarchy;
mod normalize;
mod patterns;

pub use classify::{FontLookup, HeadingClassifier, PatternLookup, RuleSet};
pub use fonts::DocumentFontProfile;
pub use hierarchy::repair_hierarchy;
pub use normalize::TextNormalizer;
pub use patterns::PatternClassifier;
