//! The network engine seam and a dense feed-forward reference engine.
//!
//! The analyzer never trains or inspects weights; it only needs two forward
//! evaluations per point, expressed by [`NetworkEvaluator`]. [`DenseNetwork`]
//! is the concrete engine the CLI and tests use: fully connected tanh layers
//! whose weights arrive via JSON import.

use crate::features::{construct_input, InputFeature};
use crate::key::ActivationPattern;
use serde::{Deserialize, Serialize};

/// Forward-evaluation interface the analyzer consumes.
///
/// Implementations must be pure with respect to their weights: repeated
/// evaluation of the same point yields identical results.
pub trait NetworkEvaluator {
    /// Node counts of the analyzed layers, in order. The input layer is not
    /// an analyzed layer; the final output layer is.
    fn layer_widths(&self) -> Vec<usize>;

    /// Per-layer binary activation configurations for one input point,
    /// one pattern per analyzed layer, in the same order as
    /// [`layer_widths`](Self::layer_widths).
    fn evaluate_configurations(&self, x: f64, y: f64) -> Vec<ActivationPattern>;

    /// Scalar prediction for one input point; its sign is the hard label.
    fn evaluate_output(&self, x: f64, y: f64) -> f64;
}

/// One fully connected layer: `weights[from][to]` plus one bias per node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

impl DenseLayer {
    /// Create a layer from a weight matrix and bias vector.
    #[must_use]
    pub fn new(weights: Vec<Vec<f64>>, biases: Vec<f64>) -> Self {
        Self { weights, biases }
    }

    /// Number of nodes in this layer.
    #[must_use]
    pub fn width(&self) -> usize {
        self.biases.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut out = self.biases.clone();
        for (from, row) in self.weights.iter().enumerate() {
            let Some(&x) = input.get(from) else { break };
            for (to, w) in row.iter().enumerate() {
                if to < out.len() {
                    out[to] += x * w;
                }
            }
        }
        for v in &mut out {
            *v = v.tanh();
        }
        out
    }
}

/// Dense tanh feed-forward network over constructed input features.
///
/// The scalar prediction is the single output node's activation; the final
/// layer is expected to have exactly one node, but the engine tolerates
/// wider outputs and reads node 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseNetwork {
    pub features: Vec<InputFeature>,
    pub layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Create a network from a feature selection and layer stack.
    #[must_use]
    pub fn new(features: Vec<InputFeature>, layers: Vec<DenseLayer>) -> Self {
        Self { features, layers }
    }

    /// Activations of every analyzed layer for one point.
    #[must_use]
    pub fn forward(&self, x: f64, y: f64) -> Vec<Vec<f64>> {
        let mut current = construct_input(&self.features, x, y);
        let mut activations = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            current = layer.forward(&current);
            activations.push(current.clone());
        }
        activations
    }
}

impl NetworkEvaluator for DenseNetwork {
    fn layer_widths(&self) -> Vec<usize> {
        self.layers.iter().map(DenseLayer::width).collect()
    }

    fn evaluate_configurations(&self, x: f64, y: f64) -> Vec<ActivationPattern> {
        self.forward(x, y)
            .iter()
            .map(|a| ActivationPattern::from_activations(a))
            .collect()
    }

    fn evaluate_output(&self, x: f64, y: f64) -> f64 {
        self.forward(x, y)
            .last()
            .and_then(|out| out.first())
            .copied()
            .unwrap_or(0.0)
    }
}
