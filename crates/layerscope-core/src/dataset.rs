//! Labeled 2-D input points.

use crate::key::Label;
use serde::{Deserialize, Serialize};

/// One dataset sample: a 2-D point with a ground-truth label in `{-1, +1}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub x: f64,
    pub y: f64,
    /// Ground-truth class, `-1.0` or `+1.0`.
    pub label: f64,
}

impl LabeledPoint {
    /// Create a new labeled point.
    #[must_use]
    pub const fn new(x: f64, y: f64, label: f64) -> Self {
        Self { x, y, label }
    }

    /// The ground-truth class, thresholded at zero like predictions are.
    #[must_use]
    pub fn ground_truth(&self) -> Label {
        Label::from_output(self.label)
    }
}
