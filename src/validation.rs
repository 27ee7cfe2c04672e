//! Reference-oracle validation for prune results.
//!
//! Provides brute-force O(N²) pair oracles and report types comparing the
//! engine's output against them. Useful for debugging, testing, and fuzzing
//! harnesses; never called from the prune paths themselves.

use rustc_hash::FxHashSet;

use crate::types::Aabb;
use crate::{bipartite_prune, complete_prune};

/// All overlapping pairs of one set, by exhaustive testing. Pairs come out
/// as `(i, j)` with `i < j`.
pub fn brute_force_pairs(boxes: &[Aabb]) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for i in 0..boxes.len() {
        for j in i + 1..boxes.len() {
            if boxes[i].overlaps(&boxes[j]) {
                pairs.push((i as u32, j as u32));
            }
        }
    }
    pairs
}

/// All overlapping (A-index, B-index) pairs across two sets, by exhaustive
/// testing.
pub fn brute_force_bipartite(a: &[Aabb], b: &[Aabb]) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for (i, box_a) in a.iter().enumerate() {
        for (j, box_b) in b.iter().enumerate() {
            if box_a.overlaps(box_b) {
                pairs.push((i as u32, j as u32));
            }
        }
    }
    pairs
}

/// Comparison of a prune result against the brute-force oracle.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Total input boxes (both sets combined for bipartite checks).
    pub num_boxes: usize,
    /// Pair count the oracle expects.
    pub expected_pairs: usize,
    /// Pair count the engine reported.
    pub reported_pairs: usize,
    /// Oracle pairs the engine never reported.
    pub missing: usize,
    /// Reported pairs that do not overlap.
    pub spurious: usize,
    /// Reported pairs of a box with itself (complete prune only).
    pub self_pairs: usize,
    /// Pairs reported more than once.
    pub duplicate_pairs: usize,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.missing == 0 && self.spurious == 0 && self.self_pairs == 0 && self.duplicate_pairs == 0
    }

    /// Format a summary of any issues found.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return "Exact".to_string();
        }
        let mut issues = Vec::new();
        if self.missing > 0 {
            issues.push(format!("{} missing", self.missing));
        }
        if self.spurious > 0 {
            issues.push(format!("{} spurious", self.spurious));
        }
        if self.self_pairs > 0 {
            issues.push(format!("{} self-pairs", self.self_pairs));
        }
        if self.duplicate_pairs > 0 {
            issues.push(format!("{} duplicates", self.duplicate_pairs));
        }
        issues.join(", ")
    }
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CheckReport {{ boxes={}, expected={}, reported={}, {} }}",
            self.num_boxes,
            self.expected_pairs,
            self.reported_pairs,
            self.summary()
        )
    }
}

/// Run `complete_prune` and compare its pair set with the oracle's.
pub fn check_complete(boxes: &[Aabb]) -> CheckReport {
    let reported = complete_prune(boxes);
    let expected: FxHashSet<(u32, u32)> = brute_force_pairs(boxes).into_iter().collect();

    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
    let mut self_pairs = 0usize;
    let mut spurious = 0usize;
    let mut duplicate_pairs = 0usize;

    for (a, b) in reported.iter() {
        if a == b {
            self_pairs += 1;
            continue;
        }
        let key = (a.min(b), a.max(b));
        if !seen.insert(key) {
            duplicate_pairs += 1;
        } else if !expected.contains(&key) {
            spurious += 1;
        }
    }

    CheckReport {
        num_boxes: boxes.len(),
        expected_pairs: expected.len(),
        reported_pairs: reported.len(),
        missing: expected.difference(&seen).count(),
        spurious,
        self_pairs,
        duplicate_pairs,
    }
}

/// Run `bipartite_prune` and compare its pair set with the oracle's.
pub fn check_bipartite(a: &[Aabb], b: &[Aabb]) -> CheckReport {
    let reported = bipartite_prune(a, b);
    let expected: FxHashSet<(u32, u32)> = brute_force_bipartite(a, b).into_iter().collect();

    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
    let mut spurious = 0usize;
    let mut duplicate_pairs = 0usize;

    for pair in reported.iter() {
        if !seen.insert(pair) {
            duplicate_pairs += 1;
        } else if !expected.contains(&pair) {
            spurious += 1;
        }
    }

    CheckReport {
        num_boxes: a.len() + b.len(),
        expected_pairs: expected.len(),
        reported_pairs: reported.len(),
        missing: expected.difference(&seen).count(),
        spurious,
        self_pairs: 0,
        duplicate_pairs,
    }
}
