//! Per-label state usage and extrema bookkeeping.

use crate::key::{ConfigurationKey, Label};
use serde::Serialize;

/// The most- and least-frequent configuration observed for one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateExtrema {
    pub max_key: ConfigurationKey,
    pub max_count: u64,
    pub min_key: ConfigurationKey,
    pub min_count: u64,
}

/// How one label used a layer's state space.
///
/// `extrema` is `None` exactly when the label never occurred in the layer's
/// histogram, replacing sentinel min/max integers with an explicit absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelUsage {
    pub label: Label,
    /// Number of distinct states the label occupied.
    pub states_used: u64,
    pub extrema: Option<StateExtrema>,
}

/// Accumulates [`LabelUsage`] for one label while a histogram is walked.
#[derive(Debug)]
pub(crate) struct UsageTracker {
    label: Label,
    states_used: u64,
    extrema: Option<StateExtrema>,
}

impl UsageTracker {
    pub(crate) const fn new(label: Label) -> Self {
        Self {
            label,
            states_used: 0,
            extrema: None,
        }
    }

    /// Feed one histogram entry; entries for other labels must be filtered
    /// out by the caller.
    pub(crate) fn observe(&mut self, key: &ConfigurationKey, count: u64) {
        debug_assert_eq!(key.label(), self.label);
        self.states_used += 1;
        match &mut self.extrema {
            None => {
                // First observation is both current max and min.
                self.extrema = Some(StateExtrema {
                    max_key: key.clone(),
                    max_count: count,
                    min_key: key.clone(),
                    min_count: count,
                });
            }
            Some(extrema) => {
                if count > extrema.max_count {
                    extrema.max_count = count;
                    extrema.max_key = key.clone();
                }
                if count < extrema.min_count {
                    extrema.min_count = count;
                    extrema.min_key = key.clone();
                }
            }
        }
    }

    pub(crate) fn finish(self) -> LabelUsage {
        LabelUsage {
            label: self.label,
            states_used: self.states_used,
            extrema: self.extrema,
        }
    }
}
