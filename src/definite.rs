//! Positive-definiteness test via eigenvalue classification.
//!
//! Deciding whether the defect-squared matrix I − T·Tᵗ is positive definite
//! is the operational proof that T is a genuine contraction (operator norm
//! strictly below 1).

use nalgebra::linalg::Schur;
use nalgebra::DMatrix;
use num_complex::Complex;

use crate::error::DilationError;

/// Iteration cap for the Schur factorization; exceeding it is surfaced as
/// [`DilationError::EigenDecompositionFailed`].
const SCHUR_MAX_ITER: usize = 1000;

/// Decides whether a symmetric matrix is positive definite.
pub trait DefiniteCheck {
    fn is_positive_definite(&self, candidate: &DMatrix<f64>) -> Result<bool, DilationError>;
}

/// Production check: symmetry test followed by eigenvalue classification
/// through a real Schur factorization.
#[derive(Debug, Clone, Copy, Default)]
pub struct EigenDefiniteCheck;

impl DefiniteCheck for EigenDefiniteCheck {
    fn is_positive_definite(&self, candidate: &DMatrix<f64>) -> Result<bool, DilationError> {
        // Asymmetry alone disqualifies; no eigenvalues needed.
        if candidate != &candidate.transpose() {
            return Ok(false);
        }

        let schur = Schur::try_new(candidate.clone(), f64::EPSILON, SCHUR_MAX_ITER).ok_or_else(
            || DilationError::EigenDecompositionFailed {
                candidate: candidate.clone(),
            },
        )?;

        let definite = schur
            .complex_eigenvalues()
            .iter()
            .all(|ev| on_open_positive_real_axis(*ev));

        Ok(definite)
    }
}

/// Positive definiteness requires every eigenvalue to sit on the open
/// positive real axis: polar phase exactly 0 and magnitude strictly
/// positive.
fn on_open_positive_real_axis(ev: Complex<f64>) -> bool {
    let (r, theta) = ev.to_polar();
    theta == 0.0 && r > 0.0
}
