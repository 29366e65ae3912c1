//! Cross-run divergence statistics.
//!
//! Callers that retrain and re-analyze a network several times (the
//! cross-validation workflow) feed each run's per-layer divergences here and
//! read back per-layer means and standard deviations. The retraining loop
//! itself lives with the caller.

use crate::report::NetworkEfficiencyReport;
use serde::Serialize;

/// Sum and sum-of-squares accumulator over repeated analysis runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrossRunSummary {
    runs: u64,
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl CrossRunSummary {
    /// Create an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one run's per-layer divergence sequence.
    ///
    /// Every run must cover the same layers; a run with a different layer
    /// count than the first is ignored and reported as `false`.
    pub fn record_run(&mut self, divergences: &[f64]) -> bool {
        if self.runs == 0 {
            self.sum = vec![0.0; divergences.len()];
            self.sum_sq = vec![0.0; divergences.len()];
        } else if divergences.len() != self.sum.len() {
            return false;
        }
        for (i, &d) in divergences.iter().enumerate() {
            self.sum[i] += d;
            self.sum_sq[i] += d * d;
        }
        self.runs += 1;
        true
    }

    /// Record a completed report's divergences.
    pub fn record_report(&mut self, report: &NetworkEfficiencyReport) -> bool {
        self.record_run(&report.divergences())
    }

    /// Number of recorded runs.
    #[must_use]
    pub const fn runs(&self) -> u64 {
        self.runs
    }

    /// Per-layer mean divergence across runs; empty before the first run.
    #[must_use]
    pub fn layer_means(&self) -> Vec<f64> {
        if self.runs == 0 {
            return Vec::new();
        }
        self.sum.iter().map(|s| s / self.runs as f64).collect()
    }

    /// Per-layer population standard deviation across runs.
    ///
    /// Computed as `sqrt(E[d^2] - E[d]^2)`, floored at zero against
    /// floating-point cancellation.
    #[must_use]
    pub fn layer_stdevs(&self) -> Vec<f64> {
        if self.runs == 0 {
            return Vec::new();
        }
        let n = self.runs as f64;
        self.sum
            .iter()
            .zip(&self.sum_sq)
            .map(|(s, sq)| {
                let mean = s / n;
                (sq / n - mean * mean).max(0.0).sqrt()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_means_and_stdevs_reference_scenario() {
        let mut summary = CrossRunSummary::new();
        assert!(summary.record_run(&[1.0, 2.0]));
        assert!(summary.record_run(&[3.0, 4.0]));
        assert_eq!(summary.runs(), 2);
        assert_eq!(summary.layer_means(), vec![2.0, 3.0]);
        let stdevs = summary.layer_stdevs();
        assert!((stdevs[0] - 1.0).abs() < 1e-12);
        assert!((stdevs[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_run_has_zero_stdev() {
        let mut summary = CrossRunSummary::new();
        summary.record_run(&[0.5, -0.25, 3.0]);
        assert_eq!(summary.layer_means(), vec![0.5, -0.25, 3.0]);
        assert_eq!(summary.layer_stdevs(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mismatched_run_is_rejected() {
        let mut summary = CrossRunSummary::new();
        assert!(summary.record_run(&[1.0, 2.0]));
        assert!(!summary.record_run(&[1.0]));
        assert_eq!(summary.runs(), 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = CrossRunSummary::new();
        assert_eq!(summary.runs(), 0);
        assert!(summary.layer_means().is_empty());
        assert!(summary.layer_stdevs().is_empty());
    }
}
