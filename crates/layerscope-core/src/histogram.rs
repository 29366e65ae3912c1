//! Per-layer configuration histograms and the dataset pass that fills them.

use crate::dataset::LabeledPoint;
use crate::error::AnalysisError;
use crate::key::{ConfigurationKey, Label};
use crate::network::NetworkEvaluator;
use serde::Serialize;
use std::collections::BTreeMap;

/// Ground-truth sample counts per class, accumulated during the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClassCounts {
    pub negatives: u64,
    pub positives: u64,
}

impl ClassCounts {
    /// Count for one label.
    #[must_use]
    pub const fn count(&self, label: Label) -> u64 {
        match label {
            Label::Negative => self.negatives,
            Label::Positive => self.positives,
        }
    }

    /// Total evaluated samples.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.negatives + self.positives
    }

    fn record(&mut self, label: Label) {
        match label {
            Label::Negative => self.negatives += 1,
            Label::Positive => self.positives += 1,
        }
    }
}

/// Occurrence counts of every configuration observed in one layer.
///
/// Keys are unique; repeats increment counts. Ordered storage keeps
/// serialized histograms deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct LayerHistogram {
    counts: BTreeMap<ConfigurationKey, u64>,
}

impl LayerHistogram {
    /// Record one occurrence of a configuration.
    pub fn record(&mut self, key: ConfigurationKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Occurrence count for a key, zero when never observed.
    #[must_use]
    pub fn count(&self, key: &ConfigurationKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct configurations observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no configuration was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate keys and counts in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigurationKey, u64)> + '_ {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    /// Sum of counts whose key carries the given predicted label.
    #[must_use]
    pub fn label_total(&self, label: Label) -> u64 {
        self.counts
            .iter()
            .filter(|(k, _)| k.label() == label)
            .map(|(_, &v)| v)
            .sum()
    }
}

/// One sequential pass over the dataset: fills one histogram per analyzed
/// layer and tallies ground-truth class counts.
///
/// # Errors
/// [`AnalysisError::DegenerateDataset`] when either class never occurs in
/// the ground truth; no histograms are returned in that case.
pub fn collect_histograms<N: NetworkEvaluator + ?Sized>(
    network: &N,
    dataset: &[LabeledPoint],
) -> Result<(Vec<LayerHistogram>, ClassCounts), AnalysisError> {
    let layer_count = network.layer_widths().len();
    let mut histograms = vec![LayerHistogram::default(); layer_count];
    let mut counts = ClassCounts::default();

    for point in dataset {
        let configurations = network.evaluate_configurations(point.x, point.y);
        let output = network.evaluate_output(point.x, point.y);
        let predicted = Label::from_output(output);
        counts.record(point.ground_truth());

        debug_assert_eq!(configurations.len(), layer_count);
        for (histogram, pattern) in histograms.iter_mut().zip(configurations) {
            histogram.record(ConfigurationKey::new(predicted, pattern));
        }
    }

    if counts.negatives == 0 || counts.positives == 0 {
        return Err(AnalysisError::DegenerateDataset {
            negatives: counts.negatives,
            positives: counts.positives,
        });
    }
    Ok((histograms, counts))
}
