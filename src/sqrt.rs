//! Principal square root of a positive-definite matrix.
//!
//! Fixed-point scheme from "A New Algorithm for Computing the Square Root of
//! a Matrix" (Rochester Institute of Technology thesis, chapter three):
//! with S₀ = I, S₁ = C and Z = C − I, iterate
//!
//! ```text
//! S_{k+1} = 2·S_k + Z·S_{k−1}
//! ```
//!
//! until the iterate becomes too ill-conditioned or 100 steps have run. The
//! root is then S_{k+1}·S_k⁻¹ − I. Instead of inverting S_k explicitly, the
//! extraction solves the transposed system S_kᵗ·X = S_{k+1}ᵗ and takes
//! Xᵗ − I, which is numerically preferable.

use nalgebra::DMatrix;

use crate::error::DilationError;

/// Upper bound on the fixed-point iteration.
const MAX_ITERATIONS: usize = 100;

/// Growth threshold at which the iteration stops early.
const ILL_CONDITION_LIMIT: f64 = 1e15;

/// Computes the principal square root of a matrix the caller guarantees to
/// be positive definite.
pub trait SquareRoot {
    fn sqrt(&self, c: &DMatrix<f64>) -> Result<DMatrix<f64>, DilationError>;
}

/// Production square root based on the fixed-point iteration above.
#[derive(Debug, Clone, Copy, Default)]
pub struct IterativeSquareRoot;

impl SquareRoot for IterativeSquareRoot {
    fn sqrt(&self, c: &DMatrix<f64>) -> Result<DMatrix<f64>, DilationError> {
        let n = c.nrows();
        let eye = DMatrix::<f64>::identity(n, n);
        let z = c - &eye;

        let mut s_prev = eye.clone();
        let mut s_curr = c.clone();

        for _ in 0..MAX_ITERATIONS {
            let s_next = 2.0 * &s_curr + &z * &s_prev;
            s_prev = s_curr;
            s_curr = s_next;

            if is_ill_conditioned(&s_curr) {
                break;
            }
        }

        // S_{k+1}·S_k⁻¹ − I via the transposed solve.
        let x = s_prev
            .transpose()
            .lu()
            .solve(&s_curr.transpose())
            .ok_or(DilationError::LinearSolveFailed)?;

        Ok(x.transpose() - eye)
    }
}

/// Once max|S|^n overwhelms det(S) the S_k/S_{k+1} pair is too
/// ill-conditioned for the final solve to stay meaningful.
fn is_ill_conditioned(s: &DMatrix<f64>) -> bool {
    let max = s.amax();
    let det = s.determinant();

    max.powi(s.nrows() as i32) / det > ILL_CONDITION_LIMIT
}
