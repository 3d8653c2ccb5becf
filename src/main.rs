use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use risky_journals::{load_entries, write_outputs, Analyzer, Reporter};

/// Flags potential risky journal entries using simple, explainable rules.
#[derive(Parser)]
#[command(name = "risky-journals", version)]
struct Cli {
    /// Path to the journals CSV
    #[arg(long)]
    csv: PathBuf,

    /// Output folder
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("📒 Risky Journals Sampler");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load and normalize
    println!("\n📂 Loading journals...");
    let entries = load_entries(&cli.csv)?;
    println!("✓ Loaded {} entries from {}", entries.len(), cli.csv.display());

    // 2. Score and rank
    println!("\n🔎 Scoring entries...");
    let analyzer = Analyzer::new();
    let scored = analyzer.analyze(entries);

    let reporter = Reporter::new();
    let report = reporter.summarize(&scored, analyzer.weights());
    println!(
        "✓ Flagged {} of {} entries (score ≥ {})",
        report.rows_flagged, report.rows_scanned, report.flag_threshold
    );

    // 3. Write outputs
    println!("\n💾 Writing outputs...");
    let flagged = reporter.flagged(&scored);
    write_outputs(&cli.out, &flagged, &report)?;
    println!(
        "✓ Wrote risky.csv, summary.md, summary.json to {}",
        cli.out.display()
    );

    Ok(())
}
