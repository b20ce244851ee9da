use chrono::NaiveDate;
use std::path::PathBuf;

use crate::utils::filename::date_stamp;

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Produced { path: PathBuf, features: usize },
    /// Forecast export had too little data
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub network: String,
    pub date: NaiveDate,
    pub outcome: RunOutcome,
}

/// Outcome of every (network, date) run of a driver invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub runs: Vec<RunRecord>,
}

impl RunReport {
    pub fn record(&mut self, network: &str, date: NaiveDate, outcome: RunOutcome) {
        self.runs.push(RunRecord {
            network: network.to_string(),
            date,
            outcome,
        });
    }

    pub fn produced_count(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| matches!(r.outcome, RunOutcome::Produced { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| r.outcome == RunOutcome::Skipped)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RunRecord> {
        self.runs
            .iter()
            .filter(|r| matches!(r.outcome, RunOutcome::Failed(_)))
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn total_features(&self) -> usize {
        self.runs
            .iter()
            .map(|r| match r.outcome {
                RunOutcome::Produced { features, .. } => features,
                _ => 0,
            })
            .sum()
    }

    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Forecast Run Report ===\n");
        summary.push_str(&format!("Runs: {}\n", self.runs.len()));
        summary.push_str(&format!(
            "Produced: {} ({} features)\n",
            self.produced_count(),
            self.total_features()
        ));
        summary.push_str(&format!("Skipped (insufficient data): {}\n", self.skipped_count()));
        summary.push_str(&format!("Failed: {}\n", self.failed_count()));

        if self.failed_count() > 0 {
            summary.push_str("\nFailures:\n");
            for (i, run) in self.failures().enumerate() {
                if let RunOutcome::Failed(message) = &run.outcome {
                    summary.push_str(&format!(
                        "  {}. {} on {}: {}\n",
                        i + 1,
                        run.network,
                        date_stamp(run.date),
                        message
                    ));
                }
            }
        }

        summary
    }
}
