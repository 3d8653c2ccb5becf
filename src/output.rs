// 💾 Output Writers - Flagged CSV and summary files
// Thin file-writer shims around the analysis results: risky.csv in rank
// order, summary.md for humans, summary.json for machines.

use crate::report::SummaryReport;
use crate::scoring::ScoredEntry;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Column order of the flagged-entries CSV.
const FLAGGED_COLUMNS: [&str; 9] = [
    "entry_id", "date", "user", "account", "amount", "memo", "source", "risk_score", "reasons",
];

/// Timestamp format used for the `date` column.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write all outputs into `outdir`, creating the directory if absent.
pub fn write_outputs(outdir: &Path, flagged: &[&ScoredEntry], report: &SummaryReport) -> Result<()> {
    fs::create_dir_all(outdir)
        .with_context(|| format!("Failed to create output directory: {}", outdir.display()))?;

    write_flagged_csv(&outdir.join("risky.csv"), flagged)?;
    write_summary_markdown(&outdir.join("summary.md"), report)?;
    write_summary_json(&outdir.join("summary.json"), report)?;

    Ok(())
}

/// Write the flagged entries, one row each, in the order given.
///
/// Null `date`/`amount` serialize as empty fields; `reasons` is a
/// comma-joined string of rule names in canonical order.
pub fn write_flagged_csv(path: &Path, flagged: &[&ScoredEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create flagged CSV: {}", path.display()))?;

    wtr.write_record(FLAGGED_COLUMNS)
        .context("Failed to write flagged CSV header")?;

    for scored in flagged {
        let entry = &scored.entry;
        wtr.write_record([
            entry.entry_id.clone(),
            entry
                .date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            entry.user.clone(),
            entry.account.clone(),
            entry.amount.map(|a| a.to_string()).unwrap_or_default(),
            entry.memo.clone(),
            entry.source.clone(),
            scored.risk_score.to_string(),
            scored.reasons_joined(),
        ])
        .context("Failed to write flagged CSV row")?;
    }

    wtr.flush().context("Failed to flush flagged CSV")?;
    Ok(())
}

/// Write the human-readable summary.
pub fn write_summary_markdown(path: &Path, report: &SummaryReport) -> Result<()> {
    fs::write(path, report.render_markdown())
        .with_context(|| format!("Failed to write summary markdown: {}", path.display()))
}

/// Write the machine-readable summary.
pub fn write_summary_json(path: &Path, report: &SummaryReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize summary")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write summary JSON: {}", path.display()))
}

// ============================================================================
// TESTS
// ============================================================================
