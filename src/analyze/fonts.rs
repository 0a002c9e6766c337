//! Document-wide font statistics.
//!
//! The profile is the calibration baseline for ratio-based heading
//! detection: thresholds are always evaluated against the *current
//! document's* median font size, never a global constant.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::analyze::classify::FontLookup;
use crate::model::SpanDocument;

/// Font-name substrings that correlate with bold rendering.
///
/// This is a lexical heuristic, not a font-metrics check: it covers Latin
/// weight indicators and East-Asian family names historically used for
/// emphasis, and it will false-positive on fonts whose names merely contain
/// one of these substrings.
const BOLD_KEYWORDS: &[&str] = &[
    // Western weight indicators
    "bold", "heavy", "black", "semibold", "demibold", "demi", "extrabold", "ultra", "medium",
    // East-Asian family indicators
    "gothic", "maru", "futogo", "futomin", "hei", "mincho",
];

/// Per-document font profile: median body size plus a boldness memo.
///
/// Created before classification begins and discarded with the document's
/// outline; nothing persists across documents. The boldness cache is
/// read-mostly and race-tolerant: a duplicate computation on a concurrent
/// miss always produces the identical value.
#[derive(Debug)]
pub struct DocumentFontProfile {
    median_size: f32,
    bold_cache: RwLock<HashMap<String, bool>>,
}

impl DocumentFontProfile {
    /// Compute the profile over every span in the document (not just page 1).
    pub fn build(doc: &SpanDocument) -> Self {
        let mut sizes: Vec<f32> = doc
            .all_spans()
            .map(|s| s.font_size)
            .filter(|s| s.is_finite() && *s > 0.0)
            .collect();
        sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median_size = match sizes.len() {
            0 => 0.0,
            n if n % 2 == 1 => sizes[n / 2],
            n => (sizes[n / 2 - 1] + sizes[n / 2]) / 2.0,
        };

        Self {
            median_size,
            bold_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Document-wide median font size; 0.0 for a document with no usable spans.
    pub fn median_size(&self) -> f32 {
        self.median_size
    }
}

impl FontLookup for DocumentFontProfile {
    fn size_ratio(&self, font_size: f32) -> f32 {
        if self.median_size <= 0.0 || !font_size.is_finite() {
            return 0.0;
        }
        font_size / self.median_size
    }

    fn is_bold(&self, font_name: &str) -> bool {
        if font_name.is_empty() {
            return false;
        }
        if let Ok(cache) = self.bold_cache.read() {
            if let Some(&hit) = cache.get(font_name) {
                return hit;
            }
        }
        let lower = font_name.to_lowercase();
        let bold = BOLD_KEYWORDS.iter().any(|kw| lower.contains(kw));
        if let Ok(mut cache) = self.bold_cache.write() {
            cache.insert(font_name.to_string(), bold);
        }
        bold
    }
}
