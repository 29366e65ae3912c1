//! Per-layer KL divergence between observed and reference distributions.

use crate::histogram::{ClassCounts, LayerHistogram};
use crate::key::Label;
use crate::reference::ReferenceDistribution;
use crate::usage::{LabelUsage, UsageTracker};

/// Walk one layer's histogram once, producing the layer's KL divergence and
/// per-label usage/extrema in the same pass.
///
/// For every observed key with count `c` and predicted label `l`, the
/// empirical conditional probability is `c / count(l)` and its contribution
/// is `p * log2(p / ref)`, in bits. Only observed states appear as keys, so
/// `log2(0)` never arises. The sum can legitimately go negative because the
/// reference masses are not normalized to 1; callers report that, they do
/// not clamp it.
pub(crate) fn analyze_layer(
    histogram: &LayerHistogram,
    reference: &ReferenceDistribution,
    counts: &ClassCounts,
) -> (f64, [LabelUsage; 2]) {
    let mut divergence = 0.0;
    let mut negative = UsageTracker::new(Label::Negative);
    let mut positive = UsageTracker::new(Label::Positive);

    for (key, count) in histogram.iter() {
        let label = key.label();
        match label {
            Label::Negative => negative.observe(key, count),
            Label::Positive => positive.observe(key, count),
        }
        let prob = count as f64 / counts.count(label) as f64;
        divergence += prob * (prob / reference.prob_per_label()).log2();
    }

    (divergence, [negative.finish(), positive.finish()])
}
