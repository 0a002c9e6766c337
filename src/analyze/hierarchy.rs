//! Whole-document hierarchy repair.
//!
//! Classification is per-line and locally correct; this pass makes the
//! sequence globally consistent. It runs once over the full document, after
//! all pages are classified, because nesting context spans pages.

use std::collections::HashSet;

use crate::model::{HeadingCandidate, HeadingLevel};

/// Enforce monotonic nesting over an ordered candidate sequence.
///
/// A stack of open levels is maintained shallow-to-deep. A candidate more
/// than one step deeper than the deepest open level is demoted to exactly
/// one step deeper (no orphaned H4 right after an H1); a candidate at or
/// above an open level pops back to it. Exact duplicates of the same
/// (level, text, page) tuple are dropped. Levels are reassigned, never
/// invented: the output is a subsequence of the input with adjusted levels.
///
/// TITLE candidates are not expected here; the title is resolved separately
/// and any that slip through are passed along untouched.
pub fn repair_hierarchy(candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
    let mut repaired = Vec::with_capacity(candidates.len());
    let mut open: Vec<u8> = Vec::new();
    let mut seen: HashSet<(u8, String, u32)> = HashSet::new();

    for mut candidate in candidates {
        if candidate.level == HeadingLevel::Title {
            repaired.push(candidate);
            continue;
        }

        let mut depth = candidate.level.depth();
        let deepest = open.last().copied().unwrap_or(0);

        if depth > deepest + 1 {
            depth = deepest + 1;
            candidate.level = HeadingLevel::from_depth(depth);
        } else {
            while open.last().is_some_and(|&d| d >= depth) {
                open.pop();
            }
        }
        open.push(depth);

        if seen.insert((depth, candidate.text.clone(), candidate.page)) {
            repaired.push(candidate);
        }
    }

    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingSource;

    fn candidate(level: HeadingLevel, text: &str, page: u32) -> HeadingCandidate {
        HeadingCandidate {
            text: text.to_string(),
            level,
            page,
            raw_font_size: 12.0,
            source: HeadingSource::Pattern,
        }
    }

    fn levels(candidates: &[HeadingCandidate]) -> Vec<HeadingLevel> {
        candidates.iter().map(|c| c.level).collect()
    }

    #[test]
    fn test_valid_sequence_untouched() {
        let out = repair_hierarchy(vec![
            candidate(HeadingLevel::H1, "Intro", 1),
            candidate(HeadingLevel::H2, "Background", 1),
            candidate(HeadingLevel::H3, "History", 2),
            candidate(HeadingLevel::H2, "Methods", 3),
        ]);
        assert_eq!(
            levels(&out),
            vec![
                HeadingLevel::H1,
                HeadingLevel::H2,
                HeadingLevel::H3,
                HeadingLevel::H2
            ]
        );
    }

    #[test]
    fn test_skipped_level_demoted() {
        let out = repair_hierarchy(vec![
            candidate(HeadingLevel::H1, "Intro", 1),
            candidate(HeadingLevel::H4, "Orphan", 1),
        ]);
        assert_eq!(levels(&out), vec![HeadingLevel::H1, HeadingLevel::H2]);
    }

    #[test]
    fn test_first_candidate_demoted_to_h1() {
        let out = repair_hierarchy(vec![candidate(HeadingLevel::H3, "Deep start", 1)]);
        assert_eq!(levels(&out), vec![HeadingLevel::H1]);
    }

    #[test]
    fn test_monotonic_property_holds() {
        let out = repair_hierarchy(vec![
            candidate(HeadingLevel::H1, "A", 1),
            candidate(HeadingLevel::H6, "B", 1),
            candidate(HeadingLevel::H2, "C", 2),
            candidate(HeadingLevel::H5, "D", 2),
            candidate(HeadingLevel::H1, "E", 3),
            candidate(HeadingLevel::H4, "F", 3),
        ]);
        let mut deepest_open = 0u8;
        let mut stack: Vec<u8> = Vec::new();
        for c in &out {
            let d = c.level.depth();
            assert!(
                d <= deepest_open + 1,
                "{} jumps deeper than one step",
                c.text
            );
            while stack.last().is_some_and(|&t| t >= d) {
                stack.pop();
            }
            stack.push(d);
            deepest_open = *stack.last().unwrap();
        }
    }

    #[test]
    fn test_pop_back_to_shallower_level() {
        let out = repair_hierarchy(vec![
            candidate(HeadingLevel::H1, "A", 1),
            candidate(HeadingLevel::H2, "B", 1),
            candidate(HeadingLevel::H3, "C", 1),
            candidate(HeadingLevel::H1, "D", 2),
            candidate(HeadingLevel::H3, "E", 2),
        ]);
        // After popping back to H1, an H3 is again a skip and demotes to H2.
        assert_eq!(
            levels(&out),
            vec![
                HeadingLevel::H1,
                HeadingLevel::H2,
                HeadingLevel::H3,
                HeadingLevel::H1,
                HeadingLevel::H2
            ]
        );
    }

    #[test]
    fn test_exact_duplicates_dropped() {
        let out = repair_hierarchy(vec![
            candidate(HeadingLevel::H1, "Intro", 1),
            candidate(HeadingLevel::H1, "Intro", 1),
            candidate(HeadingLevel::H1, "Intro", 2),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(repair_hierarchy(Vec::new()).is_empty());
    }
}
