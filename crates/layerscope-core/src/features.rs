//! Input feature construction.
//!
//! The network does not consume raw `(x, y)` coordinates directly; it
//! consumes a feature vector built by applying an ordered selection of
//! these seven functions to the point.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One selectable input feature function over a 2-D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFeature {
    X,
    Y,
    XSquared,
    YSquared,
    XTimesY,
    SinX,
    SinY,
}

impl InputFeature {
    /// Every feature, in canonical order.
    pub const ALL: [Self; 7] = [
        Self::X,
        Self::Y,
        Self::XSquared,
        Self::YSquared,
        Self::XTimesY,
        Self::SinX,
        Self::SinY,
    ];

    /// Evaluate the feature at a point.
    #[must_use]
    pub fn apply(self, x: f64, y: f64) -> f64 {
        match self {
            Self::X => x,
            Self::Y => y,
            Self::XSquared => x * x,
            Self::YSquared => y * y,
            Self::XTimesY => x * y,
            Self::SinX => x.sin(),
            Self::SinY => y.sin(),
        }
    }
}

impl fmt::Display for InputFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::XSquared => "x^2",
            Self::YSquared => "y^2",
            Self::XTimesY => "x*y",
            Self::SinX => "sin(x)",
            Self::SinY => "sin(y)",
        };
        write!(f, "{name}")
    }
}

/// Apply an ordered feature selection to a point, yielding the input vector.
#[must_use]
pub fn construct_input(features: &[InputFeature], x: f64, y: f64) -> Vec<f64> {
    features.iter().map(|f| f.apply(x, y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_definitions() {
        let (x, y) = (2.0, -3.0);
        assert_eq!(InputFeature::X.apply(x, y), 2.0);
        assert_eq!(InputFeature::Y.apply(x, y), -3.0);
        assert_eq!(InputFeature::XSquared.apply(x, y), 4.0);
        assert_eq!(InputFeature::YSquared.apply(x, y), 9.0);
        assert_eq!(InputFeature::XTimesY.apply(x, y), -6.0);
        assert!((InputFeature::SinX.apply(x, y) - 2.0_f64.sin()).abs() < 1e-15);
        assert!((InputFeature::SinY.apply(x, y) - (-3.0_f64).sin()).abs() < 1e-15);
    }

    #[test]
    fn test_construct_input_preserves_order() {
        let input = construct_input(&[InputFeature::Y, InputFeature::X], 1.0, 5.0);
        assert_eq!(input, vec![5.0, 1.0]);
    }

    #[test]
    fn test_feature_serde_tags() {
        let json = serde_json::to_string(&InputFeature::XSquared).expect("feature serializes");
        assert_eq!(json, "\"x_squared\"");
        let back: InputFeature = serde_json::from_str("\"sin_x\"").expect("feature deserializes");
        assert_eq!(back, InputFeature::SinX);
    }
}
