//! Tensor statistics for the band editor

use ndarray::{Array2, ArrayView3, Axis};
use num_traits::Float;

/// Floor for RMS and standard deviation denominators
pub const STAT_EPSILON: f64 = 1e-6;

/// Convert an `f64` constant into the element type
#[inline]
pub(crate) fn cast<F: Float>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::nan)
}

/// Per-(time, band) RMS over the channel axis, floored at `eps`
pub fn channel_rms<F: Float>(x: ArrayView3<'_, F>, eps: F) -> Array2<F> {
    x.map_axis(Axis(2), |lane| {
        let n = lane.len();
        if n == 0 {
            return eps;
        }
        let sum_squares = lane.fold(F::zero(), |acc, &v| acc + v * v);
        (sum_squares / cast(n as f64)).sqrt().max(eps)
    })
}

/// Global mean and sample standard deviation (n - 1 denominator)
///
/// Tensors with fewer than two elements report a standard deviation of zero.
pub fn mean_std<F: Float>(x: ArrayView3<'_, F>) -> (F, F) {
    let n = x.len();
    if n == 0 {
        return (F::zero(), F::zero());
    }
    let mean = x.fold(F::zero(), |acc, &v| acc + v) / cast(n as f64);
    if n < 2 {
        return (mean, F::zero());
    }
    let sum_sq_dev = x.fold(F::zero(), |acc, &v| {
        let d = v - mean;
        acc + d * d
    });
    (mean, (sum_sq_dev / cast((n - 1) as f64)).sqrt())
}
