// 📈 Outlier Detector - Quantile cutoff over amount magnitudes
// Flags entries whose absolute amount sits at or above a batch-wide
// quantile cutoff. Small batches use a lower quantile so the flag stays
// meaningful with few rows.

use crate::entry::Entry;

// ============================================================================
// QUANTILE
// ============================================================================

/// Compute the `q`-quantile (0.0 ..= 1.0) of a **sorted** slice using linear
/// interpolation between order statistics: rank = `q * (n - 1)`, interpolating
/// between the floor and ceiling ranks.
///
/// Returns 0.0 for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = q * (sorted.len() as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }

    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

// ============================================================================
// OUTLIER DETECTOR
// ============================================================================

/// Flags the largest-magnitude entries in a batch.
pub struct OutlierDetector {
    /// Quantile used when the batch has at least `small_batch_limit` rows (default: 0.99)
    pub high_quantile: f64,

    /// Quantile used for smaller batches (default: 0.95)
    pub low_quantile: f64,

    /// Row count at which the high quantile kicks in (default: 100)
    pub small_batch_limit: usize,
}

impl OutlierDetector {
    pub fn new() -> Self {
        OutlierDetector {
            high_quantile: 0.99,
            low_quantile: 0.95,
            small_batch_limit: 100,
        }
    }

    /// The magnitude cutoff for this batch.
    ///
    /// The quantile is computed over the non-null absolute amounts only, but
    /// the quantile *choice* counts every row in the batch. Returns `None`
    /// when no entry has a parsable amount.
    pub fn cutoff(&self, entries: &[Entry]) -> Option<f64> {
        let mut magnitudes: Vec<f64> = entries
            .iter()
            .filter_map(|e| e.amount)
            .map(f64::abs)
            .collect();

        if magnitudes.is_empty() {
            return None;
        }

        magnitudes.sort_by(|a, b| a.total_cmp(b));

        let q = if entries.len() >= self.small_batch_limit {
            self.high_quantile
        } else {
            self.low_quantile
        };

        Some(quantile(&magnitudes, q))
    }

    /// Per-entry `top1pct` flags, aligned with the input order.
    ///
    /// An entry qualifies iff its amount is non-null and its magnitude is at
    /// or above the cutoff (ties included). Null amounts are always false.
    pub fn detect(&self, entries: &[Entry]) -> Vec<bool> {
        match self.cutoff(entries) {
            Some(cutoff) => entries
                .iter()
                .map(|e| e.amount.map(|a| a.abs() >= cutoff).unwrap_or(false))
                .collect(),
            None => vec![false; entries.len()],
        }
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
