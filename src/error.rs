//! Error types for the dilation pipeline.

use nalgebra::DMatrix;
use thiserror::Error;

/// Errors produced while computing a unitary n-dilation.
///
/// Every error is terminal: no stage retries, and no partial result is ever
/// returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DilationError {
    /// The input matrix is not square.
    #[error("matrix does not have square dimension: {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },

    /// The defect-squared matrix I − T·Tᵗ is not positive definite, i.e. the
    /// operator norm of T is not strictly below 1.
    #[error("input is not a contraction")]
    NotAContraction,

    /// The eigenvalue factorization of a symmetric candidate did not
    /// converge. Carries the offending matrix for diagnostics.
    #[error("eigendecomposition unsuccessful for matrix:\n{candidate}")]
    EigenDecompositionFailed { candidate: DMatrix<f64> },

    /// The linear solve in the final square-root extraction step failed.
    #[error("linear solve failed during square root extraction")]
    LinearSolveFailed,

    /// The block grid handed to the assembler is malformed.
    #[error("invalid block layout: {0}")]
    BlockLayout(String),
}
