//! Whole-network reductions over per-layer divergence values.

/// Arithmetic mean of the per-layer divergences; zero for an empty slice.
#[must_use]
pub fn arithmetic_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Geometric mean of the per-layer divergences.
///
/// Individual layer divergences can be negative under the non-normalized
/// reference, so the product can be negative and the fractional power has no
/// real value. Policy: a negative product makes the geometric mean
/// undefined and yields `None`; a non-negative product is raised to the
/// `1/N` power as usual. Nothing is clamped and NaN is never produced.
#[must_use]
pub fn geometric_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let product: f64 = values.iter().product();
    if product < 0.0 {
        return None;
    }
    Some(product.powf(1.0 / values.len() as f64))
}
