// 📋 Reporter - Flagged subset and summary aggregates
// Filters the scored table to the flagged entries and aggregates the
// top rule triggers, users, and accounts for the summary report.

use crate::scoring::{RuleWeights, ScoredEntry};
use serde::Serialize;

/// Score at or above which an entry is flagged. Fixed, not configurable.
pub const FLAG_THRESHOLD: u32 = 2;

/// How many rules/users/accounts each top-N list carries.
pub const TOP_N: usize = 5;

// ============================================================================
// SUMMARY REPORT
// ============================================================================

/// One name with its aggregated count or score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTotal {
    pub name: String,
    pub total: u64,
}

/// Aggregate statistics over the flagged subset of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    /// Total rows in the batch
    pub rows_scanned: usize,

    /// Rows with `risk_score >= flag_threshold`
    pub rows_flagged: usize,

    pub flag_threshold: u32,

    /// Top rule names by raw occurrence count across flagged reasons
    pub top_rules: Vec<RankedTotal>,

    /// Top users by aggregate flagged risk score
    pub top_users: Vec<RankedTotal>,

    /// Top accounts by aggregate flagged risk score
    pub top_accounts: Vec<RankedTotal>,

    /// The weight table in effect
    pub weights: RuleWeights,
}

impl SummaryReport {
    /// Render the report as human-readable markdown.
    pub fn render_markdown(&self) -> String {
        let mut md = Vec::new();

        md.push("# Risky Journals — Summary".to_string());
        md.push(format!("- Rows scanned: **{}**", self.rows_scanned));
        md.push(format!(
            "- Rows flagged (score ≥ {}): **{}**",
            self.flag_threshold, self.rows_flagged
        ));
        md.push(String::new());

        md.push("## Top rule triggers".to_string());
        push_ranked(&mut md, &self.top_rules);
        md.push(String::new());

        md.push("## Highest aggregate risk by user".to_string());
        push_ranked(&mut md, &self.top_users);
        md.push(String::new());

        md.push("## Highest aggregate risk by account".to_string());
        push_ranked(&mut md, &self.top_accounts);
        md.push(String::new());

        md.push("## How scoring works".to_string());
        for (rule, weight) in self.weights.as_pairs() {
            md.push(format!("- {}: {}", rule, weight));
        }
        md.push(String::new());

        md.push("> Heuristics only. Use as a starting point for investigation.".to_string());

        md.join("\n")
    }
}

fn push_ranked(md: &mut Vec<String>, totals: &[RankedTotal]) {
    if totals.is_empty() {
        md.push("- (none)".to_string());
    } else {
        for item in totals {
            md.push(format!("- {}: **{}**", item.name, item.total));
        }
    }
}

// ============================================================================
// REPORTER
// ============================================================================

/// Builds the flagged subset and its summary aggregates.
pub struct Reporter {
    pub flag_threshold: u32,
    pub top_n: usize,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter {
            flag_threshold: FLAG_THRESHOLD,
            top_n: TOP_N,
        }
    }

    /// The flagged subset, in the order given (rank order when the input is
    /// ranked).
    pub fn flagged<'a>(&self, scored: &'a [ScoredEntry]) -> Vec<&'a ScoredEntry> {
        scored
            .iter()
            .filter(|s| s.risk_score >= self.flag_threshold)
            .collect()
    }

    /// Aggregate the flagged subset into a summary report.
    ///
    /// Zero flagged rows is valid and yields empty top-N lists.
    pub fn summarize(&self, scored: &[ScoredEntry], weights: &RuleWeights) -> SummaryReport {
        let flagged = self.flagged(scored);

        let top_rules = tally(
            flagged
                .iter()
                .flat_map(|s| s.reasons.iter().map(|r| (r.to_string(), 1))),
            self.top_n,
        );

        let top_users = tally(
            flagged
                .iter()
                .map(|s| (s.entry.user.clone(), u64::from(s.risk_score))),
            self.top_n,
        );

        let top_accounts = tally(
            flagged
                .iter()
                .map(|s| (s.entry.account.clone(), u64::from(s.risk_score))),
            self.top_n,
        );

        SummaryReport {
            rows_scanned: scored.len(),
            rows_flagged: flagged.len(),
            flag_threshold: self.flag_threshold,
            top_rules,
            top_users,
            top_accounts,
            weights: weights.clone(),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulate totals by name, rank descending, keep the top `limit`.
///
/// Ties keep first-encountered order: accumulation preserves encounter
/// order and the descending sort is stable.
fn tally(items: impl Iterator<Item = (String, u64)>, limit: usize) -> Vec<RankedTotal> {
    let mut totals: Vec<RankedTotal> = Vec::new();

    for (name, value) in items {
        match totals.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.total += value,
            None => totals.push(RankedTotal { name, total: value }),
        }
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(limit);
    totals
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::rules::RuleFlags;

    fn make_scored(user: &str, account: &str, reasons: Vec<&'static str>, risk_score: u32) -> ScoredEntry {
        ScoredEntry {
            entry: Entry {
                entry_id: String::new(),
                date: None,
                user: user.to_string(),
                account: account.to_string(),
                source: "SYSTEM".to_string(),
                amount: Some(10.0),
                memo: String::new(),
            },
            flags: RuleFlags::default(),
            risk_score,
            reasons,
            abs_amount: 10.0,
        }
    }

    #[test]
    fn test_flagged_filters_at_threshold() {
        let scored = vec![
            make_scored("amy", "4000", vec!["duplicate"], 3),
            make_scored("bob", "4100", vec!["round_100"], 1),
            make_scored("cat", "4200", vec!["risky_memo"], 2),
            make_scored("dan", "4300", vec![], 0),
        ];

        let reporter = Reporter::new();
        let flagged = reporter.flagged(&scored);

        assert_eq!(flagged.len(), 2);
        assert_eq!(flagged[0].entry.user, "amy");
        assert_eq!(flagged[1].entry.user, "cat");
    }

    #[test]
    fn test_summarize_counts_and_totals() {
        let scored = vec![
            make_scored("amy", "4000", vec!["late_night", "duplicate"], 5),
            make_scored("amy", "4100", vec!["duplicate"], 3),
            make_scored("bob", "4000", vec!["risky_memo"], 2),
            make_scored("cat", "4200", vec!["round_100"], 1),
        ];

        let reporter = Reporter::new();
        let report = reporter.summarize(&scored, &RuleWeights::default());

        assert_eq!(report.rows_scanned, 4);
        assert_eq!(report.rows_flagged, 3);

        // duplicate appears twice, the others once each
        assert_eq!(report.top_rules[0].name, "duplicate");
        assert_eq!(report.top_rules[0].total, 2);

        // amy: 5 + 3 = 8, bob: 2; cat is below the threshold
        assert_eq!(
            report.top_users,
            vec![
                RankedTotal { name: "amy".to_string(), total: 8 },
                RankedTotal { name: "bob".to_string(), total: 2 },
            ]
        );

        // 4000: 5 + 2 = 7, 4100: 3
        assert_eq!(report.top_accounts[0].name, "4000");
        assert_eq!(report.top_accounts[0].total, 7);
        assert_eq!(report.top_accounts[1].name, "4100");
    }

    #[test]
    fn test_tie_break_is_first_encountered_order() {
        let scored = vec![
            make_scored("amy", "4000", vec!["late_night"], 2),
            make_scored("bob", "4100", vec!["risky_memo"], 2),
            make_scored("cat", "4200", vec!["weekend"], 2),
        ];

        let report = Reporter::new().summarize(&scored, &RuleWeights::default());

        // All tied at one occurrence / score 2: encounter order wins
        let rule_names: Vec<&str> = report.top_rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(rule_names, vec!["late_night", "risky_memo", "weekend"]);

        let user_names: Vec<&str> = report.top_users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(user_names, vec!["amy", "bob", "cat"]);
    }

    #[test]
    fn test_top_lists_truncate_to_five() {
        let scored: Vec<ScoredEntry> = (0..8)
            .map(|i| make_scored(&format!("user{i}"), &format!("acct{i}"), vec!["duplicate"], 3 + i))
            .collect();

        let report = Reporter::new().summarize(&scored, &RuleWeights::default());

        assert_eq!(report.top_users.len(), 5);
        assert_eq!(report.top_accounts.len(), 5);
        // Highest aggregate score first
        assert_eq!(report.top_users[0].name, "user7");
    }

    #[test]
    fn test_zero_flagged_rows_yield_empty_lists() {
        let scored = vec![
            make_scored("amy", "4000", vec!["round_100"], 1),
            make_scored("bob", "4100", vec![], 0),
        ];

        let report = Reporter::new().summarize(&scored, &RuleWeights::default());

        assert_eq!(report.rows_scanned, 2);
        assert_eq!(report.rows_flagged, 0);
        assert!(report.top_rules.is_empty());
        assert!(report.top_users.is_empty());
        assert!(report.top_accounts.is_empty());
    }

    #[test]
    fn test_empty_batch_report() {
        let report = Reporter::new().summarize(&[], &RuleWeights::default());

        assert_eq!(report.rows_scanned, 0);
        assert_eq!(report.rows_flagged, 0);
        assert!(report.top_rules.is_empty());

        let md = report.render_markdown();
        assert!(md.contains("Rows scanned: **0**"));
        assert!(md.contains("- (none)"));
    }

    #[test]
    fn test_render_markdown_sections() {
        let scored = vec![make_scored("amy", "4000", vec!["late_night", "duplicate"], 5)];
        let report = Reporter::new().summarize(&scored, &RuleWeights::default());
        let md = report.render_markdown();

        assert!(md.starts_with("# Risky Journals — Summary"));
        assert!(md.contains("Rows flagged (score ≥ 2): **1**"));
        assert!(md.contains("## Top rule triggers"));
        assert!(md.contains("- duplicate: **1**"));
        assert!(md.contains("## Highest aggregate risk by user"));
        assert!(md.contains("- amy: **5**"));
        assert!(md.contains("## Highest aggregate risk by account"));
        assert!(md.contains("## How scoring works"));
        assert!(md.contains("- duplicate: 3"));
        assert!(md.contains("> Heuristics only."));
    }
}
