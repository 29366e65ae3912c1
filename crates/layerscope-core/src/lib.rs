//! Network inefficiency analysis for small binary classifiers.
//!
//! Given a trained feed-forward network and a labeled 2-D dataset, this
//! crate quantifies how efficiently each layer uses its representational
//! capacity: it histograms the binary activation patterns each layer
//! produces (conditioned on the predicted label), compares the empirical
//! distribution against a uniform reference via per-layer KL divergence in
//! bits, and aggregates the per-layer values into arithmetic and geometric
//! means.
//!
//! The entry point is [`NetworkEfficiencyAnalyzer`]:
//!
//! ```
//! use layerscope_core::{
//!     DenseLayer, DenseNetwork, InputFeature, LabeledPoint, NetworkEfficiencyAnalyzer,
//! };
//!
//! let network = DenseNetwork::new(
//!     vec![InputFeature::X, InputFeature::Y],
//!     vec![
//!         DenseLayer::new(vec![vec![4.0, 0.0], vec![0.0, 4.0]], vec![0.0, 0.0]),
//!         DenseLayer::new(vec![vec![4.0], vec![0.0]], vec![0.0]),
//!     ],
//! );
//! let dataset = vec![
//!     LabeledPoint::new(1.0, 1.0, 1.0),
//!     LabeledPoint::new(-1.0, -1.0, -1.0),
//! ];
//!
//! let mut analyzer = NetworkEfficiencyAnalyzer::new();
//! let report = analyzer.analyze(&network, &dataset, 2).expect("balanced dataset");
//! assert_eq!(report.layers.len(), 2);
//! ```
//!
//! Custom engines plug in through [`NetworkEvaluator`]; the analyzer only
//! ever asks for per-layer activation configurations and a scalar output.

mod aggregate;
mod analyzer;
mod dataset;
mod divergence;
mod error;
mod features;
mod histogram;
mod key;
mod network;
mod reference;
mod report;
mod summary;
mod usage;

pub use aggregate::{arithmetic_mean, geometric_mean};
pub use analyzer::NetworkEfficiencyAnalyzer;
pub use dataset::LabeledPoint;
pub use error::AnalysisError;
pub use features::{construct_input, InputFeature};
pub use histogram::{collect_histograms, ClassCounts, LayerHistogram};
pub use key::{ActivationPattern, ConfigurationKey, Label};
pub use network::{DenseLayer, DenseNetwork, NetworkEvaluator};
pub use reference::{ReferenceDistribution, NUM_CLASSES};
pub use report::{AnalysisWarning, LayerEfficiencyResult, NetworkEfficiencyReport};
pub use summary::CrossRunSummary;
