// ⚖️ Scorer - Weighted sum of triggered flags
// Combines the nine heuristic flags into a risk score and an ordered list
// of trigger names. Purely row-local once all nine flags are known.

use crate::entry::Entry;
use crate::rules::RuleFlags;
use serde::Serialize;

/// Canonical rule order, used for reasons and everywhere rules are reported.
pub const RULE_ORDER: [&str; 9] = [
    "round_100",
    "round_1000",
    "cents_zero",
    "weekend",
    "late_night",
    "risky_memo",
    "manual_source",
    "duplicate",
    "top1pct",
];

// ============================================================================
// RULE WEIGHTS
// ============================================================================

/// Per-rule score weights. Fixed, process-wide configuration: constructed
/// once and passed by reference into the scorer, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleWeights {
    pub round_100: u32,
    pub round_1000: u32,
    pub cents_zero: u32,
    pub weekend: u32,
    pub late_night: u32,
    pub risky_memo: u32,
    pub manual_source: u32,
    pub duplicate: u32,
    pub top1pct: u32,
}

impl Default for RuleWeights {
    fn default() -> Self {
        RuleWeights {
            round_100: 1,
            round_1000: 2,
            cents_zero: 1,
            weekend: 1,
            late_night: 2,
            risky_memo: 2,
            manual_source: 2,
            duplicate: 3,
            top1pct: 2,
        }
    }
}

impl RuleWeights {
    /// All weights as (rule name, weight) pairs in canonical order.
    pub fn as_pairs(&self) -> [(&'static str, u32); 9] {
        [
            ("round_100", self.round_100),
            ("round_1000", self.round_1000),
            ("cents_zero", self.cents_zero),
            ("weekend", self.weekend),
            ("late_night", self.late_night),
            ("risky_memo", self.risky_memo),
            ("manual_source", self.manual_source),
            ("duplicate", self.duplicate),
            ("top1pct", self.top1pct),
        ]
    }

    /// Sum of the weights of the triggered flags. No rounding, no clamping.
    pub fn score(&self, flags: &RuleFlags) -> u32 {
        let mut total = 0;
        if flags.round_100 {
            total += self.round_100;
        }
        if flags.round_1000 {
            total += self.round_1000;
        }
        if flags.cents_zero {
            total += self.cents_zero;
        }
        if flags.weekend {
            total += self.weekend;
        }
        if flags.late_night {
            total += self.late_night;
        }
        if flags.risky_memo {
            total += self.risky_memo;
        }
        if flags.manual_source {
            total += self.manual_source;
        }
        if flags.duplicate {
            total += self.duplicate;
        }
        if flags.top1pct {
            total += self.top1pct;
        }
        total
    }
}

// ============================================================================
// SCORED ENTRY
// ============================================================================

/// An entry with its evaluated flags, score, and explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    pub entry: Entry,
    pub flags: RuleFlags,

    /// Weighted sum of triggered flags
    pub risk_score: u32,

    /// Names of the triggered rules, in canonical order
    pub reasons: Vec<&'static str>,

    /// Absolute amount (0.0 when null); used for ranking only
    pub abs_amount: f64,
}

impl ScoredEntry {
    /// Score one entry from its completed flag set.
    pub fn new(entry: Entry, flags: RuleFlags, weights: &RuleWeights) -> Self {
        let risk_score = weights.score(&flags);
        let reasons = flags.triggered();
        let abs_amount = entry.abs_amount();

        ScoredEntry {
            entry,
            flags,
            risk_score,
            reasons,
            abs_amount,
        }
    }

    /// Reasons as a comma-joined string, for CSV output.
    pub fn reasons_joined(&self) -> String {
        self.reasons.join(",")
    }
}

// ============================================================================
// TESTS
// ============================================================================
