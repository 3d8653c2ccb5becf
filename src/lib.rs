// Risky Journals - Core Library
// Flags potential risky journal entries using simple, explainable rules

pub mod analysis;
pub mod deduplication;
pub mod entry;
pub mod ingest;
pub mod outliers;
pub mod output;
pub mod report;
pub mod rules;
pub mod scoring;

// Re-export commonly used types
pub use analysis::{rank_entries, Analyzer};
pub use deduplication::{DuplicateDetector, DuplicateKey};
pub use entry::Entry;
pub use ingest::{load_entries, normalize, parse_amount, parse_timestamp, RawRecord};
pub use outliers::{quantile, OutlierDetector};
pub use output::{write_flagged_csv, write_outputs, write_summary_json, write_summary_markdown};
pub use report::{RankedTotal, Reporter, SummaryReport, FLAG_THRESHOLD, TOP_N};
pub use rules::{RuleEvaluator, RuleFlags, RISKY_MEMO_TERMS};
pub use scoring::{RuleWeights, ScoredEntry, RULE_ORDER};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
