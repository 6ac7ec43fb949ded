//! Temporal EMA smoothing
//!
//! A causal one-pole low-pass over the time axis, applied independently to
//! every (band, channel) pair. Each step depends on the previous output, so
//! the time axis is scanned in order; all lanes within a step are independent.

use ndarray::{Array3, ArrayView3, ArrayViewMut2, Axis, Zip};
use num_traits::Float;

/// Exponentially smooth `x[t, b, c]` along the time axis
///
/// `out[0] = x[0]` and `out[t] = beta * out[t-1] + (1 - beta) * x[t]`.
/// With a single time step or `beta == 0` the input is returned unchanged.
pub fn ema_smooth<F: Float>(x: ArrayView3<'_, F>, beta: F) -> Array3<F> {
    let steps = x.len_of(Axis(0));
    if steps <= 1 || beta == F::zero() {
        return x.to_owned();
    }

    let one_minus = F::one() - beta;
    let mut out = Array3::zeros(x.raw_dim());
    // Scan: each output frame is written once, from the previous output frame
    // and the current input frame.
    x.outer_iter().zip(out.outer_iter_mut()).fold(
        None::<ArrayViewMut2<'_, F>>,
        |prev, (frame, mut row)| {
            match prev {
                None => row.assign(&frame),
                Some(prev) => Zip::from(&mut row)
                    .and(&prev)
                    .and(&frame)
                    .for_each(|s, &p, &v| *s = beta * p + one_minus * v),
            }
            Some(row)
        },
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{s, Array3};

    fn ramp(steps: usize) -> Array3<f64> {
        Array3::from_shape_fn((steps, 2, 3), |(t, _, _)| t as f64)
    }

    #[test]
    fn test_first_step_unsmoothed() {
        let x = ramp(4);
        let out = ema_smooth(x.view(), 0.9);
        assert_eq!(out.index_axis(Axis(0), 0), x.index_axis(Axis(0), 0));
    }

    #[test]
    fn test_recurrence() {
        let x = ramp(3);
        let out = ema_smooth(x.view(), 0.5);
        // s1 = 0.5 * 0 + 0.5 * 1 = 0.5, s2 = 0.5 * 0.5 + 0.5 * 2 = 1.25
        assert_abs_diff_eq!(out[[1, 0, 0]], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(out[[2, 1, 2]], 1.25, epsilon = 1e-12);
    }

    #[test]
    fn test_beta_zero_is_identity() {
        let x = ramp(5);
        assert_eq!(ema_smooth(x.view(), 0.0), x);
    }

    #[test]
    fn test_single_step_is_identity() {
        let x = Array3::from_elem((1, 5, 4), 3.0_f32);
        assert_eq!(ema_smooth(x.view(), 0.9), x);
    }

    #[test]
    fn test_empty_time_axis() {
        let x = Array3::<f32>::zeros((0, 5, 4));
        assert_eq!(ema_smooth(x.view(), 0.9).shape(), &[0, 5, 4]);
    }

    #[test]
    fn test_constant_input_unchanged() {
        let x = Array3::from_elem((6, 5, 4), 1.0_f32);
        let out = ema_smooth(x.view(), 0.9);
        for v in out.iter() {
            assert_abs_diff_eq!(*v, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_strided_input_view() {
        // Reversed time axis: the scan must follow the view's order, not memory order.
        let x = ramp(3);
        let reversed = x.slice(s![..;-1, .., ..]);
        let out = ema_smooth(reversed, 0.5);
        // s0 = 2, s1 = 0.5 * 2 + 0.5 * 1 = 1.5, s2 = 0.5 * 1.5 + 0.5 * 0 = 0.75
        assert_abs_diff_eq!(out[[0, 0, 0]], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[[1, 1, 1]], 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(out[[2, 0, 2]], 0.75, epsilon = 1e-12);
        assert_eq!(x[[2, 0, 0]], 2.0);
    }

    #[test]
    fn test_lanes_independent() {
        let mut x = Array3::<f64>::zeros((3, 2, 2));
        x[[1, 1, 0]] = 10.0;
        let out = ema_smooth(x.view(), 0.5);
        assert_abs_diff_eq!(out[[1, 1, 0]], 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[[2, 1, 0]], 2.5, epsilon = 1e-12);
        assert_eq!(out[[2, 0, 0]], 0.0);
        assert_eq!(out[[2, 1, 1]], 0.0);
    }
}
