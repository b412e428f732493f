//! Local polynomial (Savitzky–Golay style) smoothing.

use crate::math::matrix::MatrixHelper;
use ndarray::{Array1, Array2};

/// Fits a polynomial of `order` to `values` at positions centred on the
/// middle of the slice and returns the coefficients, lowest power first.
fn fit_centered(values: &[f64], order: usize) -> Option<Array1<f64>> {
    let centre = (values.len() / 2) as f64;
    let design = Array2::from_shape_fn((values.len(), order + 1), |(row, power)| {
        (row as f64 - centre).powi(power as i32)
    });
    let y = Array1::from_iter(values.iter().copied());
    MatrixHelper::least_squares(design.view(), y.view())
}

fn evaluate(coefficients: &Array1<f64>, x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Largest odd window not exceeding either `window` or `len`. Zero for an
/// empty series.
pub fn odd_window(window: usize, len: usize) -> usize {
    let w = window.min(len);
    if w == 0 {
        0
    } else if w % 2 == 0 {
        w - 1
    } else {
        w
    }
}

/// Smooths `values` with least-squares polynomial fits over a sliding window.
///
/// Interior points take the value of the fit centred on them. The first and
/// last half-window points are evaluated on the fit of the first and last
/// full window. The window shrinks to the largest odd size the series allows
/// and the order drops below the window size when necessary.
pub fn local_polynomial_smooth(values: &[f64], window: usize, order: usize) -> Vec<f64> {
    let n = values.len();
    let window = odd_window(window, n);
    if window <= 1 {
        return values.to_vec();
    }
    let order = order.min(window - 1);
    let half = window / 2;
    let mut smoothed = values.to_vec();

    for i in half..n - half {
        if let Some(fit) = fit_centered(&values[i - half..=i + half], order) {
            smoothed[i] = fit[0];
        }
    }

    if let Some(head) = fit_centered(&values[..window], order) {
        for (i, slot) in smoothed.iter_mut().enumerate().take(half) {
            *slot = evaluate(&head, i as f64 - half as f64);
        }
    }

    let tail_start = n - window;
    if let Some(tail) = fit_centered(&values[tail_start..], order) {
        for i in n - half..n {
            smoothed[i] = evaluate(&tail, (i - tail_start) as f64 - half as f64);
        }
    }

    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_window_shrinks_to_series() {
        assert_eq!(odd_window(5, 10), 5);
        assert_eq!(odd_window(5, 4), 3);
        assert_eq!(odd_window(5, 3), 3);
        assert_eq!(odd_window(5, 2), 1);
        assert_eq!(odd_window(5, 0), 0);
    }

    #[test]
    fn quadratic_signal_passes_through_unchanged() {
        let values: Vec<f64> = (0..9)
            .map(|i| {
                let x = i as f64;
                0.5 * x * x - 2.0 * x + 1.0
            })
            .collect();
        let smoothed = local_polynomial_smooth(&values, 5, 2);
        for (a, b) in values.iter().zip(&smoothed) {
            assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn interior_matches_classic_five_point_weights() {
        let values = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        let smoothed = local_polynomial_smooth(&values, 5, 2);
        // (-3, 12, 17, 12, -3) / 35 centred on index 3.
        let expected = (-3.0 * 1.0 + 12.0 * 0.0 + 17.0 * 1.0 + 12.0 * 0.0 - 3.0 * 1.0) / 35.0;
        assert!((smoothed[3] - expected).abs() < 1e-9);
    }

    #[test]
    fn tiny_series_are_returned_as_is() {
        assert_eq!(local_polynomial_smooth(&[2.0, 4.0], 5, 2), vec![2.0, 4.0]);
        assert!(local_polynomial_smooth(&[], 5, 2).is_empty());
    }
}
