//! Balance report aggregation.

use super::strategy::Strategy;
use crate::core::state::SystemState;
use std::collections::BTreeMap;

/// Result of one automatically played session.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub scenario_id: String,
    pub score: i64,
    pub turns: u32,
    /// Ended in a critical state (as opposed to running out of turns)
    pub critical: bool,
    pub actions_taken: u32,
    pub actions_succeeded: u32,
    pub final_state: SystemState,
}

/// Aggregated results from multiple runs.
#[derive(Debug, Clone)]
pub struct BalanceReport {
    pub strategy: Strategy,
    pub num_runs: u32,
    pub runs_survived: u32,
    pub runs_critical: u32,

    pub avg_score: f64,
    pub min_score: i64,
    pub max_score: i64,
    pub avg_turns: f64,
    pub action_success_ratio: f64,

    /// Turn at which critical runs ended -> number of runs
    pub critical_turn_distribution: BTreeMap<u32, u32>,
    /// Scenario id -> (runs, critical runs)
    pub scenario_outcomes: BTreeMap<String, (u32, u32)>,

    pub run_stats: Vec<RunStats>,
}

impl BalanceReport {
    pub fn from_runs(runs: Vec<RunStats>, strategy: Strategy) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = f64::from(num_runs.max(1));
        let runs_critical = runs.iter().filter(|r| r.critical).count() as u32;

        let avg_score = runs.iter().map(|r| r.score as f64).sum::<f64>() / divisor;
        let min_score = runs.iter().map(|r| r.score).min().unwrap_or(0);
        let max_score = runs.iter().map(|r| r.score).max().unwrap_or(0);
        let avg_turns = runs.iter().map(|r| f64::from(r.turns)).sum::<f64>() / divisor;

        let taken: u32 = runs.iter().map(|r| r.actions_taken).sum();
        let succeeded: u32 = runs.iter().map(|r| r.actions_succeeded).sum();
        let action_success_ratio = if taken == 0 {
            0.0
        } else {
            f64::from(succeeded) / f64::from(taken)
        };

        let mut critical_turn_distribution = BTreeMap::new();
        for run in runs.iter().filter(|r| r.critical) {
            *critical_turn_distribution.entry(run.turns).or_insert(0) += 1;
        }

        let mut scenario_outcomes: BTreeMap<String, (u32, u32)> = BTreeMap::new();
        for run in &runs {
            let entry = scenario_outcomes.entry(run.scenario_id.clone()).or_default();
            entry.0 += 1;
            if run.critical {
                entry.1 += 1;
            }
        }

        Self {
            strategy,
            num_runs,
            runs_survived: num_runs - runs_critical,
            runs_critical,
            avg_score,
            min_score,
            max_score,
            avg_turns,
            action_success_ratio,
            critical_turn_distribution,
            scenario_outcomes,
            run_stats: runs,
        }
    }

    /// Fraction of runs that ended critical.
    pub fn critical_rate(&self) -> f64 {
        f64::from(self.runs_critical) / f64::from(self.num_runs.max(1))
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("===============================================================\n");
        report.push_str("                    BALANCE REPORT\n");
        report.push_str(&format!("               strategy: {}\n", self.strategy));
        report.push_str("===============================================================\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} survived, {} critical ({:.1}%)\n\n",
            self.num_runs,
            self.runs_survived,
            self.runs_critical,
            self.critical_rate() * 100.0
        ));

        report.push_str("-- SCORE ------------------------------------------------------\n");
        report.push_str(&format!("  Avg Score:           {:.1}\n", self.avg_score));
        report.push_str(&format!(
            "  Min / Max:           {} / {}\n",
            self.min_score, self.max_score
        ));
        report.push_str(&format!("  Avg Turns:           {:.1}\n", self.avg_turns));
        report.push_str(&format!(
            "  Action Success:      {:.1}%\n\n",
            self.action_success_ratio * 100.0
        ));

        if !self.critical_turn_distribution.is_empty() {
            report.push_str("-- CRITICAL BY TURN -------------------------------------------\n");
            for (turn, count) in &self.critical_turn_distribution {
                let pct = f64::from(*count) / f64::from(self.num_runs.max(1)) * 100.0;
                let bar = "#".repeat((pct / 5.0) as usize);
                report.push_str(&format!("  Turn {:2}: {:>5.1}% {}\n", turn, pct, bar));
            }
            report.push('\n');
        }

        report.push_str("-- SCENARIOS --------------------------------------------------\n");
        for (id, (runs, critical)) in &self.scenario_outcomes {
            report.push_str(&format!("  {:<8} runs {:>5}  critical {:>5}\n", id, runs, critical));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(id: &str, score: i64, turns: u32, critical: bool) -> RunStats {
        RunStats {
            scenario_id: id.to_string(),
            score,
            turns,
            critical,
            actions_taken: 4,
            actions_succeeded: 3,
            final_state: SystemState::default(),
        }
    }

    #[test]
    fn test_aggregates() {
        let report = BalanceReport::from_runs(
            vec![
                run("S001", 500, 11, false),
                run("S001", -100, 3, true),
                run("S002", 200, 3, true),
            ],
            Strategy::BestExpectation,
        );
        assert_eq!(report.num_runs, 3);
        assert_eq!(report.runs_critical, 2);
        assert_eq!(report.runs_survived, 1);
        assert!((report.avg_score - 200.0).abs() < 1e-9);
        assert_eq!(report.min_score, -100);
        assert_eq!(report.max_score, 500);
        assert!((report.action_success_ratio - 0.75).abs() < 1e-9);
        assert_eq!(report.critical_turn_distribution.get(&3), Some(&2));
        assert_eq!(report.scenario_outcomes.get("S001"), Some(&(2, 1)));
    }

    #[test]
    fn test_empty_report() {
        let report = BalanceReport::from_runs(Vec::new(), Strategy::Random);
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.avg_score, 0.0);
        assert_eq!(report.critical_rate(), 0.0);
    }

    #[test]
    fn test_text_report_mentions_strategy() {
        let runs = vec![run("S001", 500, 11, false)];
        let report = BalanceReport::from_runs(runs, Strategy::HighestSuccessRate);
        let text = report.to_text();
        assert!(text.contains("strategy: highest-success-rate"));
        assert!(text.contains("S001"));
    }
}
