//! The theoretical reference distribution a layer is compared against.

use crate::error::AnalysisError;
use serde::Serialize;

/// Number of classes the analysis distinguishes.
pub const NUM_CLASSES: usize = 2;

/// Uniform per-state reference mass for one layer.
///
/// A layer of `k` nodes can express `2^k` distinct activation patterns.
/// Under a maximally efficient encoding each pattern is used equally often,
/// and each pattern could in principle encode either class, so the per-label
/// reference probability is `NUM_CLASSES / 2^k` for every state. The
/// reference is a fixed function of layer width and class count alone, never
/// of the data. Note that the per-label masses deliberately sum to
/// `NUM_CLASSES` rather than 1, which is what makes negative divergences
/// possible downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceDistribution {
    num_bins: u64,
    prob_per_label: f64,
}

impl ReferenceDistribution {
    /// Derive the reference for a layer of `width` nodes.
    ///
    /// # Errors
    /// [`AnalysisError::InvalidLayerWidth`] for zero-width layers (no
    /// reference exists) and for widths above 63 (the bin count would
    /// overflow; the interactive tool this models caps layers at 8 nodes).
    pub fn for_layer_width(layer: usize, width: usize) -> Result<Self, AnalysisError> {
        if width == 0 || width > 63 {
            return Err(AnalysisError::InvalidLayerWidth { layer, width });
        }
        let num_bins = 1u64 << width;
        let prob_per_label = NUM_CLASSES as f64 / num_bins as f64;
        debug_assert!(prob_per_label > 0.0);
        Ok(Self {
            num_bins,
            prob_per_label,
        })
    }

    /// Number of distinct activation patterns the layer can express.
    #[must_use]
    pub const fn num_bins(&self) -> u64 {
        self.num_bins
    }

    /// Reference probability applied uniformly to every state, per label.
    #[must_use]
    pub const fn prob_per_label(&self) -> f64 {
        self.prob_per_label
    }

    /// Maximum entropy of the layer in bits, `log2(num_bins)`.
    #[must_use]
    pub fn max_entropy_bits(&self) -> f64 {
        (self.num_bins as f64).log2()
    }
}
