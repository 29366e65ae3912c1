//! Error types for network inefficiency analysis.

use thiserror::Error;

/// Fatal conditions that abort an analysis run.
///
/// A failed run leaves the analyzer idle with no partial results; warnings
/// that do not abort the run live in the report instead
/// (see [`AnalysisWarning`](crate::report::AnalysisWarning)).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// One ground-truth class never occurred in the evaluated dataset, so a
    /// per-label histogram comparison is meaningless.
    #[error(
        "dataset contains only one ground-truth class (negatives: {negatives}, positives: {positives})"
    )]
    DegenerateDataset { negatives: u64, positives: u64 },

    /// A layer's node count admits no usable reference distribution.
    #[error("layer {layer} has unusable width {width}: reference distribution undefined")]
    InvalidLayerWidth { layer: usize, width: usize },

    /// The network exposes no analyzable layers at all.
    #[error("network has no analyzable layers")]
    EmptyNetwork,
}
