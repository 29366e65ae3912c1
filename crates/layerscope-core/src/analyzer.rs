//! The analysis driver and its two-state lifecycle.

use crate::aggregate::{arithmetic_mean, geometric_mean};
use crate::dataset::LabeledPoint;
use crate::divergence::analyze_layer;
use crate::error::AnalysisError;
use crate::histogram::{collect_histograms, LayerHistogram};
use crate::network::NetworkEvaluator;
use crate::reference::ReferenceDistribution;
use crate::report::{AnalysisWarning, LayerEfficiencyResult, NetworkEfficiencyReport};

#[derive(Debug, Default)]
enum AnalyzerState {
    #[default]
    Idle,
    Computed {
        histograms: Vec<LayerHistogram>,
        report: NetworkEfficiencyReport,
    },
}

/// Computes network inefficiency per layer via KL divergence of observed
/// activation-pattern histograms against a uniform reference.
///
/// The analyzer is either idle (freshly built, reset, or after a failed run)
/// or holds the results of one completed run. It owns all histograms and
/// results exclusively; a new run replaces them wholesale. Not meant for
/// concurrent use; give each analysis its own instance.
#[derive(Debug, Default)]
pub struct NetworkEfficiencyAnalyzer {
    state: AnalyzerState,
}

impl NetworkEfficiencyAnalyzer {
    /// Create an idle analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any prior histograms and results.
    pub fn reset(&mut self) {
        self.state = AnalyzerState::Idle;
    }

    /// True once a run has completed and results are readable.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        matches!(self.state, AnalyzerState::Computed { .. })
    }

    /// The last completed report, if any.
    #[must_use]
    pub fn report(&self) -> Option<&NetworkEfficiencyReport> {
        match &self.state {
            AnalyzerState::Computed { report, .. } => Some(report),
            AnalyzerState::Idle => None,
        }
    }

    /// Raw per-layer histograms of the last completed run, if any.
    #[must_use]
    pub fn histograms(&self) -> Option<&[LayerHistogram]> {
        match &self.state {
            AnalyzerState::Computed { histograms, .. } => Some(histograms),
            AnalyzerState::Idle => None,
        }
    }

    /// Run one full analysis: a single dataset pass building per-layer
    /// histograms, then the per-layer divergence/usage reduction, then the
    /// whole-network aggregation.
    ///
    /// `expected_samples` is a caller-side estimate used only in
    /// diagnostics; probabilities are normalized by observed per-label
    /// counts.
    ///
    /// # Errors
    /// [`AnalysisError::EmptyNetwork`] when there is no analyzable layer,
    /// [`AnalysisError::InvalidLayerWidth`] for a zero-width layer, and
    /// [`AnalysisError::DegenerateDataset`] when the ground truth contains
    /// only one class. Any failure leaves the analyzer idle.
    pub fn analyze<N: NetworkEvaluator + ?Sized>(
        &mut self,
        network: &N,
        dataset: &[LabeledPoint],
        expected_samples: u64,
    ) -> Result<&NetworkEfficiencyReport, AnalysisError> {
        self.state = AnalyzerState::Idle;

        let widths = network.layer_widths();
        if widths.is_empty() {
            return Err(AnalysisError::EmptyNetwork);
        }
        let references = widths
            .iter()
            .enumerate()
            .map(|(layer, &width)| ReferenceDistribution::for_layer_width(layer, width))
            .collect::<Result<Vec<_>, _>>()?;

        let (histograms, class_counts) = collect_histograms(network, dataset)?;
        if class_counts.total() != expected_samples {
            tracing::debug!(
                expected = expected_samples,
                observed = class_counts.total(),
                "evaluated sample count differs from caller estimate"
            );
        }

        let mut warnings = Vec::new();
        let mut layers = Vec::with_capacity(histograms.len());
        for (layer, (histogram, reference)) in histograms.iter().zip(&references).enumerate() {
            let (divergence, usage) = analyze_layer(histogram, reference, &class_counts);
            if divergence < 0.0 {
                tracing::warn!(layer, divergence, "layer divergence below zero");
                warnings.push(AnalysisWarning::NegativeDivergence { layer, divergence });
            }
            layers.push(LayerEfficiencyResult {
                layer,
                node_count: widths[layer],
                num_bins: reference.num_bins(),
                reference_prob: reference.prob_per_label(),
                divergence,
                usage,
            });
        }

        let divergences: Vec<f64> = layers.iter().map(|l| l.divergence).collect();
        let mean = arithmetic_mean(&divergences);
        let geometric = geometric_mean(&divergences);
        if geometric.is_none() {
            let product: f64 = divergences.iter().product();
            tracing::warn!(product, "geometric mean undefined for negative product");
            warnings.push(AnalysisWarning::GeometricMeanUndefined { product });
        }

        let report = NetworkEfficiencyReport {
            layers,
            class_counts,
            expected_samples,
            arithmetic_mean: mean,
            geometric_mean: geometric,
            warnings,
        };
        self.state = AnalyzerState::Computed { histograms, report };
        match &self.state {
            AnalyzerState::Computed { report, .. } => Ok(report),
            AnalyzerState::Idle => unreachable!("state set to Computed above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::InputFeature;
    use crate::key::Label;
    use crate::network::{DenseLayer, DenseNetwork};

    fn quadrant_network() -> DenseNetwork {
        // Hidden nodes track sign(x) and sign(y); output tracks sign(x).
        DenseNetwork::new(
            vec![InputFeature::X, InputFeature::Y],
            vec![
                DenseLayer::new(vec![vec![5.0, 0.0], vec![0.0, 5.0]], vec![0.0, 0.0]),
                DenseLayer::new(vec![vec![5.0], vec![0.0]], vec![0.0]),
            ],
        )
    }

    fn quadrant_dataset() -> Vec<LabeledPoint> {
        vec![
            LabeledPoint::new(1.0, 1.0, 1.0),
            LabeledPoint::new(1.0, -1.0, 1.0),
            LabeledPoint::new(-1.0, 1.0, -1.0),
            LabeledPoint::new(-1.0, -1.0, -1.0),
        ]
    }

    #[test]
    fn test_successful_run_reaches_computed() {
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        assert!(!analyzer.is_computed());
        let report = analyzer
            .analyze(&quadrant_network(), &quadrant_dataset(), 4)
            .expect("valid run");
        assert_eq!(report.layers.len(), 2);
        assert!(analyzer.is_computed());
        assert!(analyzer.report().is_some());
        assert_eq!(analyzer.histograms().map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_one_result_per_boundary_output_layer_included() {
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        let report = analyzer
            .analyze(&quadrant_network(), &quadrant_dataset(), 4)
            .expect("valid run");
        assert_eq!(report.layers[0].node_count, 2);
        assert_eq!(report.layers[0].num_bins, 4);
        assert_eq!(report.layers[1].node_count, 1);
        assert_eq!(report.layers[1].num_bins, 2);
        assert_eq!(report.layers[1].reference_prob, 1.0);
    }

    #[test]
    fn test_exactly_two_usage_records_per_layer() {
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        let report = analyzer
            .analyze(&quadrant_network(), &quadrant_dataset(), 4)
            .expect("valid run");
        for layer in &report.layers {
            assert_eq!(layer.usage.len(), 2);
            assert_eq!(layer.usage_for(Label::Negative).label, Label::Negative);
            assert_eq!(layer.usage_for(Label::Positive).label, Label::Positive);
        }
    }

    #[test]
    fn test_degenerate_dataset_leaves_idle() {
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        let one_sided: Vec<LabeledPoint> = (0..4)
            .map(|i| LabeledPoint::new(f64::from(i) + 1.0, 1.0, 1.0))
            .collect();
        let err = analyzer
            .analyze(&quadrant_network(), &one_sided, 4)
            .expect_err("degenerate");
        assert!(matches!(err, AnalysisError::DegenerateDataset { .. }));
        assert!(!analyzer.is_computed());
        assert!(analyzer.report().is_none());
        assert!(analyzer.histograms().is_none());
    }

    #[test]
    fn test_failed_run_discards_previous_results() {
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        analyzer
            .analyze(&quadrant_network(), &quadrant_dataset(), 4)
            .expect("valid run");
        assert!(analyzer.is_computed());
        let one_sided = vec![LabeledPoint::new(1.0, 1.0, 1.0)];
        let _ = analyzer
            .analyze(&quadrant_network(), &one_sided, 1)
            .expect_err("degenerate");
        assert!(!analyzer.is_computed());
    }

    #[test]
    fn test_empty_network_is_rejected() {
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        let net = DenseNetwork::new(vec![InputFeature::X], vec![]);
        let err = analyzer
            .analyze(&net, &quadrant_dataset(), 4)
            .expect_err("no layers");
        assert_eq!(err, AnalysisError::EmptyNetwork);
    }

    #[test]
    fn test_zero_width_layer_is_rejected() {
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        let net = DenseNetwork::new(
            vec![InputFeature::X],
            vec![DenseLayer::new(vec![vec![]], vec![])],
        );
        let err = analyzer
            .analyze(&net, &quadrant_dataset(), 4)
            .expect_err("zero width");
        assert_eq!(err, AnalysisError::InvalidLayerWidth { layer: 0, width: 0 });
        assert!(!analyzer.is_computed());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        analyzer
            .analyze(&quadrant_network(), &quadrant_dataset(), 4)
            .expect("valid run");
        analyzer.reset();
        assert!(!analyzer.is_computed());
        assert!(analyzer.report().is_none());
    }

    #[test]
    fn test_rerun_after_reset_is_idempotent() {
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        let first = analyzer
            .analyze(&quadrant_network(), &quadrant_dataset(), 4)
            .expect("valid run")
            .clone();
        let first_histograms = analyzer.histograms().expect("computed").to_vec();
        analyzer.reset();
        let second = analyzer
            .analyze(&quadrant_network(), &quadrant_dataset(), 4)
            .expect("valid run")
            .clone();
        assert_eq!(first, second);
        assert_eq!(first_histograms, analyzer.histograms().expect("computed"));
    }

    #[test]
    fn test_histogram_label_totals_match_prediction_counts() {
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        analyzer
            .analyze(&quadrant_network(), &quadrant_dataset(), 4)
            .expect("valid run");
        // The quadrant network predicts sign(x), which matches ground truth
        // here, so per-label histogram mass equals the class counts in every
        // layer.
        let report = analyzer.report().expect("computed");
        for histogram in analyzer.histograms().expect("computed") {
            for label in Label::ALL {
                assert_eq!(
                    histogram.label_total(label),
                    report.class_counts.count(label)
                );
            }
        }
    }

    /// Minimal engine whose hidden bit tracks `sign(y)` while the
    /// prediction tracks `sign(x)`, so one predicted label can spread over
    /// several hidden states.
    struct SplitStateNetwork {
        layers: usize,
    }

    impl NetworkEvaluator for SplitStateNetwork {
        fn layer_widths(&self) -> Vec<usize> {
            vec![1; self.layers]
        }

        fn evaluate_configurations(&self, x: f64, y: f64) -> Vec<crate::key::ActivationPattern> {
            let mut configs = vec![crate::key::ActivationPattern::from_activations(&[y])];
            configs.extend(
                (1..self.layers).map(|_| crate::key::ActivationPattern::from_activations(&[x])),
            );
            configs
        }

        fn evaluate_output(&self, x: f64, _y: f64) -> f64 {
            x
        }
    }

    #[test]
    fn test_negative_divergence_is_reported_not_clamped() {
        // Each label splits 50/50 over the hidden layer's two states with
        // reference probability 1.0, giving exactly -1 bit per label.
        let net = SplitStateNetwork { layers: 2 };
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        let report = analyzer.analyze(&net, &quadrant_dataset(), 4).expect("valid run");
        assert!((report.layers[0].divergence - (-2.0)).abs() < 1e-12);
        assert_eq!(report.layers[1].divergence, 0.0);
        assert!(report.warnings.contains(&AnalysisWarning::NegativeDivergence {
            layer: 0,
            divergence: report.layers[0].divergence,
        }));
    }

    #[test]
    fn test_negative_product_reports_undefined_geometric_mean() {
        let net = SplitStateNetwork { layers: 1 };
        let mut analyzer = NetworkEfficiencyAnalyzer::new();
        let report = analyzer.analyze(&net, &quadrant_dataset(), 4).expect("valid run");
        assert_eq!(report.geometric_mean, None);
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, AnalysisWarning::GeometricMeanUndefined { .. })));
    }
}
