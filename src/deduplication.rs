// 🔍 Duplicate Detector - Batch-global repeated-entry detection
// Groups entries by a composite identity key (calendar day, account,
// amount rounded to cents, lowercased memo) and flags every member of a
// group that occurs at least twice.

use crate::entry::Entry;
use chrono::NaiveDate;
use std::collections::HashMap;

// ============================================================================
// DUPLICATE KEY
// ============================================================================

/// Composite identity key for duplicate detection.
///
/// A structured key rather than a delimited string, so field values that
/// happen to contain a delimiter character cannot collide two distinct
/// entries into one group. `entry_id`, `user`, and the time-of-day are
/// deliberately excluded: two entries posted by different users at
/// different times on the same day are still duplicates of each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    /// Calendar day; `None` for entries with an unparsable date
    pub day: Option<NaiveDate>,

    /// Ledger account, verbatim
    pub account: String,

    /// Amount rounded to 2 decimal places, in cents; `None` when null
    pub amount_cents: Option<i64>,

    /// Lowercased memo
    pub memo: String,
}

impl DuplicateKey {
    /// Build the key for one entry.
    pub fn for_entry(entry: &Entry) -> Self {
        DuplicateKey {
            day: entry.date.map(|d| d.date()),
            account: entry.account.clone(),
            amount_cents: entry.amount.map(|a| (a * 100.0).round() as i64),
            memo: entry.memo.to_lowercase(),
        }
    }
}

// ============================================================================
// DUPLICATE DETECTOR
// ============================================================================

/// Flags entries whose identity key repeats across the batch.
pub struct DuplicateDetector {
    /// Occurrence count at or above which a key counts as duplicated (default: 2)
    pub min_occurrences: usize,
}

impl DuplicateDetector {
    pub fn new() -> Self {
        DuplicateDetector { min_occurrences: 2 }
    }

    /// Count occurrences of every distinct key across the batch.
    ///
    /// This is the global reduce: it must complete before any entry's
    /// `duplicate` flag can be decided. Entries with a null date or amount
    /// still participate and group with each other.
    pub fn count_keys(&self, entries: &[Entry]) -> HashMap<DuplicateKey, usize> {
        let mut counts: HashMap<DuplicateKey, usize> = HashMap::new();

        for entry in entries {
            *counts.entry(DuplicateKey::for_entry(entry)).or_insert(0) += 1;
        }

        counts
    }

    /// Per-entry `duplicate` flags, aligned with the input order.
    pub fn detect(&self, entries: &[Entry]) -> Vec<bool> {
        let counts = self.count_keys(entries);

        entries
            .iter()
            .map(|entry| counts[&DuplicateKey::for_entry(entry)] >= self.min_occurrences)
            .collect()
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
