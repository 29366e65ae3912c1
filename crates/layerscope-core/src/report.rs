//! Analysis output types consumed by the reporting layer.

use crate::histogram::ClassCounts;
use crate::key::Label;
use crate::usage::LabelUsage;
use serde::Serialize;
use std::fmt;

/// Non-fatal conditions surfaced alongside a completed report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// A layer's divergence came out negative, which signals that the layer
    /// cannot represent the class structure under the non-normalized
    /// reference. Reported as-is, never clamped.
    NegativeDivergence { layer: usize, divergence: f64 },
    /// The product of per-layer divergences was negative, so the geometric
    /// mean has no real value.
    GeometricMeanUndefined { product: f64 },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeDivergence { layer, divergence } => {
                write!(f, "layer {layer} divergence {divergence} is below zero")
            }
            Self::GeometricMeanUndefined { product } => {
                write!(
                    f,
                    "geometric mean undefined: divergence product {product} is negative"
                )
            }
        }
    }
}

/// Everything the analysis learned about one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerEfficiencyResult {
    /// Zero-based index among analyzed layers (input layer excluded).
    pub layer: usize,
    /// Node count of the layer.
    pub node_count: usize,
    /// `2^node_count`, the number of expressible activation patterns.
    pub num_bins: u64,
    /// Uniform reference probability per state, per label.
    pub reference_prob: f64,
    /// KL divergence of the layer, in bits.
    pub divergence: f64,
    /// Per-label state usage and extrema, indexed by [`Label::index`].
    pub usage: [LabelUsage; 2],
}

impl LayerEfficiencyResult {
    /// Usage record for one label.
    #[must_use]
    pub fn usage_for(&self, label: Label) -> &LabelUsage {
        &self.usage[label.index()]
    }
}

/// The complete, immutable result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkEfficiencyReport {
    /// One entry per analyzed layer, in network order.
    pub layers: Vec<LayerEfficiencyResult>,
    /// Ground-truth class balance of the evaluated dataset.
    pub class_counts: ClassCounts,
    /// Externally supplied expected sample count, diagnostics only.
    pub expected_samples: u64,
    /// Arithmetic mean of per-layer divergences.
    pub arithmetic_mean: f64,
    /// Geometric mean of per-layer divergences; `None` when undefined.
    pub geometric_mean: Option<f64>,
    /// Non-fatal conditions observed during the run.
    pub warnings: Vec<AnalysisWarning>,
}

impl NetworkEfficiencyReport {
    /// The per-layer divergence sequence.
    #[must_use]
    pub fn divergences(&self) -> Vec<f64> {
        self.layers.iter().map(|l| l.divergence).collect()
    }
}
