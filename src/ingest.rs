// 📂 Ingestion Normalizer - CSV → typed entry table
// Coerces rows with an arbitrary column set into entries with guaranteed
// columns and safe defaults. No row is ever dropped here.

use crate::entry::Entry;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::path::Path;

/// Timestamp shapes accepted for the `date` column (date plus optional
/// time-of-day, ISO and US order). Anything else becomes null.
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

// ============================================================================
// RAW RECORD
// ============================================================================

/// One raw CSV row before normalization.
///
/// Every field is optional so that a file missing any column (or carrying
/// extra unknown columns) still deserializes; `amount` and `date` stay as
/// strings here because their parsing must never fail the row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub entry_id: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub account: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub amount: Option<String>,

    #[serde(default)]
    pub memo: Option<String>,
}

// ============================================================================
// FIELD PARSERS
// ============================================================================

/// Parse an amount string into a signed decimal.
///
/// Strips `$` and thousands separators before parsing. Returns `None` for
/// missing, unparsable, or non-finite values.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return None;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Parse a timestamp string (date plus optional time-of-day).
///
/// Date-only values land at midnight. Returns `None` on failure.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    None
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Normalize one raw row into a well-typed entry.
///
/// Missing string columns become empty, unparsable `date`/`amount` become
/// null, and an empty `source` is rewritten to `"SYSTEM"`.
pub fn normalize(raw: &RawRecord) -> Entry {
    let source = raw.source.clone().unwrap_or_default();
    let source = if source.is_empty() {
        "SYSTEM".to_string()
    } else {
        source
    };

    Entry {
        entry_id: raw.entry_id.clone().unwrap_or_default(),
        date: raw.date.as_deref().and_then(parse_timestamp),
        user: raw.user.clone().unwrap_or_default(),
        account: raw.account.clone().unwrap_or_default(),
        source,
        amount: raw.amount.as_deref().and_then(parse_amount),
        memo: raw.memo.clone().unwrap_or_default(),
    }
}

/// Load and normalize all entries from a journals CSV.
///
/// A file that is missing, unreadable, or cannot be parsed as a table at all
/// is a fatal error; individual bad fields are not.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open journals CSV: {}", path.display()))?;

    let mut entries = Vec::new();

    for result in rdr.deserialize() {
        let raw: RawRecord = result
            .with_context(|| format!("Failed to read row from journals CSV: {}", path.display()))?;
        entries.push(normalize(&raw));
    }

    Ok(entries)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_amount_plain() {
        assert_eq!(parse_amount("123.45"), Some(123.45));
        assert_eq!(parse_amount("-500"), Some(-500.0));
    }

    #[test]
    fn test_parse_amount_currency_formatting() {
        assert_eq!(parse_amount("$1,234.56"), Some(1234.56));
        assert_eq!(parse_amount(" 2,000 "), Some(2000.0));
    }

    #[test]
    fn test_parse_amount_unparsable_is_none() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("12.3.4"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_parse_timestamp_iso_datetime() {
        let dt = parse_timestamp("2024-01-05 23:30:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-05 23:30:00");
    }

    #[test]
    fn test_parse_timestamp_date_only_lands_at_midnight() {
        let dt = parse_timestamp("2024-01-05").unwrap();
        assert_eq!(dt.to_string(), "2024-01-05 00:00:00");

        let dt = parse_timestamp("01/05/2024").unwrap();
        assert_eq!(dt.to_string(), "2024-01-05 00:00:00");
    }

    #[test]
    fn test_parse_timestamp_t_separator() {
        let dt = parse_timestamp("2024-01-05T10:15:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-05 10:15:00");
    }

    #[test]
    fn test_parse_timestamp_unparsable_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }

    #[test]
    fn test_normalize_missing_columns_default() {
        let raw = RawRecord::default();
        let entry = normalize(&raw);

        assert_eq!(entry.entry_id, "");
        assert_eq!(entry.user, "");
        assert_eq!(entry.account, "");
        assert_eq!(entry.memo, "");
        assert_eq!(entry.date, None);
        assert_eq!(entry.amount, None);
    }

    #[test]
    fn test_normalize_empty_source_becomes_system() {
        let raw = RawRecord::default();
        assert_eq!(normalize(&raw).source, "SYSTEM");

        let raw = RawRecord {
            source: Some("".to_string()),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&raw).source, "SYSTEM");

        let raw = RawRecord {
            source: Some("manual_entry".to_string()),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&raw).source, "manual_entry");
    }

    #[test]
    fn test_normalize_keeps_bad_fields_as_null() {
        let raw = RawRecord {
            entry_id: Some("JE-1".to_string()),
            date: Some("yesterday".to_string()),
            amount: Some("lots".to_string()),
            ..RawRecord::default()
        };
        let entry = normalize(&raw);

        assert_eq!(entry.entry_id, "JE-1");
        assert_eq!(entry.date, None);
        assert_eq!(entry.amount, None);
    }

    #[test]
    fn test_load_entries_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "entry_id,date,user,account,amount,memo").unwrap();
        writeln!(file, "JE-1,2024-01-05 10:00:00,amy,4000,100.00,plug").unwrap();
        writeln!(file, "JE-2,bad-date,bob,4100,not-a-number,").unwrap();

        let entries = load_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].entry_id, "JE-1");
        assert_eq!(entries[0].amount, Some(100.0));
        assert_eq!(entries[0].source, "SYSTEM");

        // Bad fields become null, the row survives
        assert_eq!(entries[1].date, None);
        assert_eq!(entries[1].amount, None);
    }

    #[test]
    fn test_load_entries_missing_file_is_fatal() {
        let result = load_entries(Path::new("/nonexistent/journals.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_entries_empty_batch_is_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "entry_id,date,user,account,amount,memo").unwrap();

        let entries = load_entries(file.path()).unwrap();
        assert!(entries.is_empty());
    }
}
