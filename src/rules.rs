// 🏷️ Rule Evaluator - Row-local risk heuristics
// Seven independent boolean tests per entry; none reads another's result.
// The two batch-global flags (duplicate, top1pct) are filled in later by
// their detectors and stay false here.

use crate::entry::Entry;
use chrono::{Datelike, Timelike, Weekday};
use serde::Serialize;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Memo substrings that mark an entry as risky (matched case-insensitively).
pub const RISKY_MEMO_TERMS: [&str; 9] = [
    "manual override",
    "adjustment",
    "adj",
    "suspense",
    "top-side",
    "plug",
    "write-off",
    "reclass",
    "misc",
];

/// Hours counted as late-night posting time.
const LATE_NIGHT_HOURS: [u32; 8] = [22, 23, 0, 1, 2, 3, 4, 5];

// ============================================================================
// RULE FLAGS
// ============================================================================

/// The nine heuristic flags for one entry, in canonical order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuleFlags {
    pub round_100: bool,
    pub round_1000: bool,
    pub cents_zero: bool,
    pub weekend: bool,
    pub late_night: bool,
    pub risky_memo: bool,
    pub manual_source: bool,
    pub duplicate: bool,
    pub top1pct: bool,
}

impl RuleFlags {
    /// All nine flags as (rule name, value) pairs in canonical order.
    pub fn as_pairs(&self) -> [(&'static str, bool); 9] {
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

    /// Names of the triggered rules, in canonical order.
    pub fn triggered(&self) -> Vec<&'static str> {
        self.as_pairs()
            .iter()
            .filter(|(_, flag)| *flag)
            .map(|(name, _)| *name)
            .collect()
    }
}

// ============================================================================
// RULE EVALUATOR
// ============================================================================

/// Evaluates the seven row-local heuristics for an entry.
pub struct RuleEvaluator {
    /// Lowercased memo terms to match as substrings
    memo_terms: Vec<String>,
}

impl RuleEvaluator {
    /// Create an evaluator with the standard memo term list.
    pub fn new() -> Self {
        Self::with_terms(RISKY_MEMO_TERMS.iter().map(|t| t.to_string()).collect())
    }

    /// Create an evaluator with a custom memo term list.
    pub fn with_terms(terms: Vec<String>) -> Self {
        RuleEvaluator {
            memo_terms: terms.into_iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Evaluate the seven row-local rules for one entry.
    ///
    /// A null `amount` or `date` makes every rule that depends on it false.
    pub fn evaluate(&self, entry: &Entry) -> RuleFlags {
        RuleFlags {
            round_100: is_round_multiple(entry.amount, 100.0),
            round_1000: is_round_multiple(entry.amount, 1000.0),
            cents_zero: cents_zero(entry.amount),
            weekend: is_weekend(entry),
            late_night: is_late_night(entry),
            risky_memo: self.is_risky_memo(&entry.memo),
            manual_source: is_manual_source(&entry.source),
            duplicate: false,
            top1pct: false,
        }
    }

    fn is_risky_memo(&self, memo: &str) -> bool {
        let memo_lower = memo.to_lowercase();
        self.memo_terms.iter().any(|term| memo_lower.contains(term))
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// INDIVIDUAL RULES
// ============================================================================

/// True iff the amount is a whole multiple of `multiple`.
fn is_round_multiple(amount: Option<f64>, multiple: f64) -> bool {
    match amount {
        Some(a) => a.abs() % multiple == 0.0,
        None => false,
    }
}

/// True iff the sub-dollar remainder is zero cents.
///
/// The remainder `abs(a) * 100 mod 100` is rounded to 2 decimal places
/// before the comparison so that floating-point noise does not leak into
/// the flag.
fn cents_zero(amount: Option<f64>) -> bool {
    match amount {
        Some(a) => {
            let remainder = (a.abs() * 100.0) % 100.0;
            (remainder * 100.0).round() / 100.0 == 0.0
        }
        None => false,
    }
}

fn is_weekend(entry: &Entry) -> bool {
    match entry.date {
        Some(date) => matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        None => false,
    }
}

fn is_late_night(entry: &Entry) -> bool {
    match entry.date {
        Some(date) => LATE_NIGHT_HOURS.contains(&date.hour()),
        None => false,
    }
}

/// True iff the source is anything other than "SYSTEM" (case-insensitive).
fn is_manual_source(source: &str) -> bool {
    source.to_uppercase() != "SYSTEM"
}

// ============================================================================
// TESTS
// ============================================================================
