// 📒 Journal Entry Model
// Normalized journal rows with explicit nullable date/amount fields

use chrono::NaiveDateTime;
use serde::Serialize;

// ============================================================================
// ENTRY
// ============================================================================

/// One normalized journal entry.
///
/// Every column is guaranteed present after ingestion: string columns default
/// to empty, `date` and `amount` are `None` when the raw value was missing or
/// failed to parse. A `None` here is a value, not an error - every heuristic
/// that depends on the field evaluates to false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Opaque identifier from the source system; empty if absent
    pub entry_id: String,

    /// Posting timestamp; `None` if missing or unparsable
    pub date: Option<NaiveDateTime>,

    /// User who posted the entry; empty if absent
    pub user: String,

    /// Ledger account; empty if absent
    pub account: String,

    /// Originating system; empty input is normalized to "SYSTEM"
    pub source: String,

    /// Signed amount; `None` if missing or unparsable
    pub amount: Option<f64>,

    /// Free-text memo; empty if absent
    pub memo: String,
}

impl Entry {
    /// Absolute amount used for ranking; 0.0 when `amount` is null.
    pub fn abs_amount(&self) -> f64 {
        self.amount.map(f64::abs).unwrap_or(0.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
