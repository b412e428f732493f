use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub struct MatrixHelper;

impl MatrixHelper {
    pub fn multiply(lhs: ArrayView2<f64>, rhs: ArrayView2<f64>) -> Array2<f64> {
        lhs.dot(&rhs)
    }

    /// Solves `a * x = b` by Gaussian elimination with partial pivoting.
    /// Returns `None` for a singular (or non-square) system.
    pub fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
        let n = a.nrows();
        if a.ncols() != n || b.len() != n {
            return None;
        }

        for col in 0..n {
            let pivot = (col..n).max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))?;
            if a[[pivot, col]].abs() < 1e-12 {
                return None;
            }
            if pivot != col {
                for k in 0..n {
                    a.swap([pivot, k], [col, k]);
                }
                b.swap(pivot, col);
            }
            for row in col + 1..n {
                let factor = a[[row, col]] / a[[col, col]];
                for k in col..n {
                    a[[row, k]] -= factor * a[[col, k]];
                }
                b[row] -= factor * b[col];
            }
        }

        let mut x = Array1::<f64>::zeros(n);
        for row in (0..n).rev() {
            let tail: f64 = (row + 1..n).map(|k| a[[row, k]] * x[k]).sum();
            x[row] = (b[row] - tail) / a[[row, row]];
        }
        Some(x)
    }

    /// Least-squares coefficients for `design * c ≈ y` via the normal equations.
    pub fn least_squares(design: ArrayView2<f64>, y: ArrayView1<f64>) -> Option<Array1<f64>> {
        let gram = Self::multiply(design.t(), design);
        let rhs = design.t().dot(&y);
        Self::solve(gram, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn solve_recovers_known_solution() {
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let b = array![3.0, 5.0];
        let x = MatrixHelper::solve(a, b).unwrap();
        assert!((x[0] - 0.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn singular_system_yields_none() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        assert!(MatrixHelper::solve(a, array![1.0, 2.0]).is_none());
    }

    #[test]
    fn least_squares_fits_a_line() {
        let design = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
        let y = array![1.0, 3.0, 5.0];
        let c = MatrixHelper::least_squares(design.view(), y.view()).unwrap();
        assert!((c[0] - 1.0).abs() < 1e-9);
        assert!((c[1] - 2.0).abs() < 1e-9);
    }
}
