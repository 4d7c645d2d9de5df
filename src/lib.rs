//! # unitary-dilation: unitary n-dilations of matrix contractions
//!
//! Computes a unitary dilation of degree n for a real square matrix
//! contraction T (operator norm strictly below 1), following the
//! construction of B. Szőkefalvi-Nagy: the returned matrix U is unitary, has
//! dimension `size(T)·(n + 1)` and carries T verbatim as its top-left block.
//!
//! The pipeline validates that T is a contraction by testing I − T·Tᵗ for
//! positive definiteness, computes the two defect operators via an iterative
//! matrix square root, and assembles the block-structured result.

pub mod block; // Grid-of-blocks to dense-matrix assembly
pub mod definite; // Positive-definiteness test
pub mod dilation; // Orchestrating engine
pub mod error;
pub mod sqrt; // Iterative principal square root

// Re-export commonly used types and traits
pub use block::{BlockAssembler, DenseBlockAssembler};
pub use definite::{DefiniteCheck, EigenDefiniteCheck};
pub use dilation::DilationEngine;
pub use error::DilationError;
pub use sqrt::{IterativeSquareRoot, SquareRoot};

// Re-export the matrix type of the public API for convenience
pub use nalgebra::DMatrix;

/// Returns a unitary `degree`-dilation for the square matrix contraction
/// `t`, or an error if `t` is not square or not a contraction.
pub fn unitary_n_dilation(t: &DMatrix<f64>, degree: usize) -> Result<DMatrix<f64>, DilationError> {
    DilationEngine::new().unitary_n_dilation(t, degree)
}
