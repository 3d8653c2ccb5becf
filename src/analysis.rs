// 🔬 Analysis Pipeline - Evaluate, detect, score, rank
// One deterministic, side-effect-free pass over the whole batch: the seven
// row-local rules run first, then the two global reduces (duplicate key
// counts, quantile cutoff) complete the flag set, then entries are scored
// and ranked.

use crate::deduplication::DuplicateDetector;
use crate::entry::Entry;
use crate::outliers::OutlierDetector;
use crate::rules::{RuleEvaluator, RuleFlags};
use crate::scoring::{RuleWeights, ScoredEntry};

// ============================================================================
// ANALYZER
// ============================================================================

/// Runs the full scoring pipeline over a batch of entries.
pub struct Analyzer {
    evaluator: RuleEvaluator,
    duplicates: DuplicateDetector,
    outliers: OutlierDetector,
    weights: RuleWeights,
}

impl Analyzer {
    /// Create an analyzer with the standard rules, detectors, and weights.
    pub fn new() -> Self {
        Analyzer {
            evaluator: RuleEvaluator::new(),
            duplicates: DuplicateDetector::new(),
            outliers: OutlierDetector::new(),
            weights: RuleWeights::default(),
        }
    }

    /// The weight table in effect.
    pub fn weights(&self) -> &RuleWeights {
        &self.weights
    }

    /// Score and rank a batch of normalized entries.
    ///
    /// Running this twice on the same input yields identical output: the
    /// pipeline holds no state between calls and the sort is stable.
    pub fn analyze(&self, entries: Vec<Entry>) -> Vec<ScoredEntry> {
        // Row-local pass
        let mut flags: Vec<RuleFlags> =
            entries.iter().map(|e| self.evaluator.evaluate(e)).collect();

        // Global reduces must complete before the dependent flags are set
        let duplicate_flags = self.duplicates.detect(&entries);
        let outlier_flags = self.outliers.detect(&entries);

        for (i, flag_set) in flags.iter_mut().enumerate() {
            flag_set.duplicate = duplicate_flags[i];
            flag_set.top1pct = outlier_flags[i];
        }

        let mut scored: Vec<ScoredEntry> = entries
            .into_iter()
            .zip(flags)
            .map(|(entry, flag_set)| ScoredEntry::new(entry, flag_set, &self.weights))
            .collect();

        rank_entries(&mut scored);
        scored
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// RANKER
// ============================================================================

/// Sort by risk score, then absolute amount, both descending.
///
/// The sort is stable: entries with identical score and magnitude keep
/// their relative input order, with no further tie-break.
pub fn rank_entries(entries: &mut [ScoredEntry]) {
    entries.sort_by(|a, b| {
        b.risk_score
            .cmp(&a.risk_score)
            .then_with(|| b.abs_amount.total_cmp(&a.abs_amount))
    });
}

// ============================================================================
// TESTS
// ============================================================================
