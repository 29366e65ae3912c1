//! Canonical keys for per-layer activation configurations.
//!
//! A [`ConfigurationKey`] identifies one observed network state: the hard
//! label the network predicted for an input point, together with the binary
//! activation pattern one layer produced for that point. Keys are structural
//! values with full equality and ordering, replacing ad-hoc string
//! concatenation of label tags and bit strings.

use bitvec::vec::BitVec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard class label, for both ground truth and thresholded predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// The `-1` class.
    Negative,
    /// The `+1` class.
    Positive,
}

impl Label {
    /// Both labels, in index order.
    pub const ALL: [Self; 2] = [Self::Negative, Self::Positive];

    /// Derive the hard label from the network's scalar output.
    ///
    /// An output of exactly zero counts as negative, matching the
    /// thresholding used when the label was assigned to training data.
    #[must_use]
    pub fn from_output(output: f64) -> Self {
        if output <= 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Stable index for two-element per-label tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }

    /// Single-character tag used in rendered keys.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Negative => 'N',
            Self::Positive => 'P',
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The binary output regimes of every node in one layer, for one input.
///
/// Bit `i` holds node `i`'s regime: `true` when the node's activation is
/// strictly positive. Patterns are ephemeral; they are produced during the
/// dataset pass and only survive inside [`ConfigurationKey`]s.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ActivationPattern {
    bits: BitVec,
}

impl ActivationPattern {
    /// Build a pattern from per-node boolean regimes, in node order.
    #[must_use]
    pub fn from_bits<I>(bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        Self {
            bits: bits.into_iter().collect(),
        }
    }

    /// Build a pattern from raw activations; the regime bit is `a > 0`.
    #[must_use]
    pub fn from_activations(activations: &[f64]) -> Self {
        Self::from_bits(activations.iter().map(|&a| a > 0.0))
    }

    /// Number of nodes in the pattern.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when the pattern covers zero nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Regime bit of node `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn bit(&self, index: usize) -> bool {
        self.bits[index]
    }
}

impl fmt::Display for ActivationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.bits.len() {
            write!(f, "{}", u8::from(self.bits[i]))?;
        }
        Ok(())
    }
}

/// Canonical composite key: (predicted label, layer activation pattern).
///
/// Two keys are equal exactly when both the label and every pattern bit
/// agree, so distinct network states can never collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigurationKey {
    label: Label,
    pattern: ActivationPattern,
}

impl ConfigurationKey {
    /// Create a key from a predicted label and a layer's pattern.
    #[must_use]
    pub const fn new(label: Label, pattern: ActivationPattern) -> Self {
        Self { label, pattern }
    }

    /// The predicted label component.
    #[must_use]
    pub const fn label(&self) -> Label {
        self.label
    }

    /// The activation pattern component.
    #[must_use]
    pub const fn pattern(&self) -> &ActivationPattern {
        &self.pattern
    }
}

impl fmt::Display for ConfigurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.label, self.pattern)
    }
}

impl Serialize for ConfigurationKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
