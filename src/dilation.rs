//! Unitary n-dilation of a matrix contraction.
//!
//! The construction follows B. Sz.-Nagy, "Analyse harmonique des opérateurs
//! de l'espace de Hilbert" (1967); for the finite-dimensional block layout
//! see E. Levy and O. M. Shalit, "Dilation theory in finite dimensions: the
//! possible, the impossible and the unknown", Rocky Mountain J. Math.
//! 44(1):203-221, 2014.

use nalgebra::DMatrix;

use crate::block::{BlockAssembler, DenseBlockAssembler};
use crate::definite::{DefiniteCheck, EigenDefiniteCheck};
use crate::error::DilationError;
use crate::sqrt::{IterativeSquareRoot, SquareRoot};

/// Orchestrates contraction validation, defect-operator computation and
/// block assembly.
///
/// Generic over its three collaborators so each stage can be replaced by a
/// fake in unit tests; [`DilationEngine::new`] wires the production
/// implementations.
#[derive(Debug, Clone, Default)]
pub struct DilationEngine<P, S, B> {
    definite: P,
    sqrt: S,
    assembler: B,
}

impl DilationEngine<EigenDefiniteCheck, IterativeSquareRoot, DenseBlockAssembler> {
    /// Engine with the production collaborators.
    pub fn new() -> Self {
        Self::with_parts(EigenDefiniteCheck, IterativeSquareRoot, DenseBlockAssembler)
    }
}

impl<P, S, B> DilationEngine<P, S, B>
where
    P: DefiniteCheck,
    S: SquareRoot,
    B: BlockAssembler,
{
    pub fn with_parts(definite: P, sqrt: S, assembler: B) -> Self {
        Self {
            definite,
            sqrt,
            assembler,
        }
    }

    /// Returns a unitary `degree`-dilation of the square matrix contraction
    /// `t`, for `degree ≥ 1`.
    ///
    /// The result U has dimension `size(t)·(degree + 1)`, carries `t`
    /// verbatim as its top-left block and satisfies Uᵗ·U = U·Uᵗ = I up to
    /// numerical tolerance.
    pub fn unitary_n_dilation(
        &self,
        t: &DMatrix<f64>,
        degree: usize,
    ) -> Result<DMatrix<f64>, DilationError> {
        let (rows, cols) = t.shape();
        if rows != cols {
            return Err(DilationError::NonSquareMatrix { rows, cols });
        }

        let defect_squared = defect_operator_squared(t);
        if !self.definite.is_positive_definite(&defect_squared)? {
            return Err(DilationError::NotAContraction);
        }

        let defect_squared_of_transpose = defect_operator_squared(&t.transpose());

        // Both roots exist: I − T·Tᵗ is positive definite for a contraction
        // T, see Sz.-Nagy, "Harmonic Analysis of Operators on Hilbert
        // Space", chapter I, section 3.
        let defect = self.sqrt.sqrt(&defect_squared)?;
        let defect_of_transpose = self.sqrt.sqrt(&defect_squared_of_transpose)?;

        let grid = block_grid(t, degree, defect, defect_of_transpose);
        self.assembler.assemble(&grid)
    }
}

/// I − T·Tᵗ for square T.
fn defect_operator_squared(t: &DMatrix<f64>) -> DMatrix<f64> {
    let n = t.nrows();
    DMatrix::identity(n, n) - t * t.transpose()
}

/// −Tᵗ, computed element-wise.
fn negative_transpose(t: &DMatrix<f64>) -> DMatrix<f64> {
    let (rows, cols) = t.shape();
    DMatrix::from_fn(rows, cols, |i, j| -t[(j, i)])
}

/// Block layout of the dilation, `(degree + 1)²` blocks of size `size(t)`:
/// row 0 is `[t, 0, …, 0, D_{tᵗ}]`, row 1 is `[D_t, 0, …, 0, −tᵗ]`, and for
/// degree > 1 each further row i carries the identity in column i − 1,
/// forming a sub-diagonal shift on the extra dilation coordinates.
fn block_grid(
    t: &DMatrix<f64>,
    degree: usize,
    defect: DMatrix<f64>,
    defect_of_transpose: DMatrix<f64>,
) -> Vec<Vec<DMatrix<f64>>> {
    let n = t.nrows();
    let block_dim = degree + 1;
    let zeros = || DMatrix::<f64>::zeros(n, n);

    let mut first_row = Vec::with_capacity(block_dim);
    let mut second_row = Vec::with_capacity(block_dim);
    first_row.push(t.clone());
    second_row.push(defect);
    for _ in 1..block_dim.saturating_sub(1) {
        first_row.push(zeros());
        second_row.push(zeros());
    }
    first_row.push(defect_of_transpose);
    second_row.push(negative_transpose(t));

    let mut grid = vec![first_row, second_row];
    for i in 2..block_dim {
        let mut row = Vec::with_capacity(block_dim);
        for j in 0..block_dim {
            if j == i - 1 {
                row.push(DMatrix::identity(n, n));
            } else {
                row.push(zeros());
            }
        }
        grid.push(row);
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dmatrix;
    use std::cell::RefCell;

    struct FixedDefinite(bool);

    impl DefiniteCheck for FixedDefinite {
        fn is_positive_definite(&self, _: &DMatrix<f64>) -> Result<bool, DilationError> {
            Ok(self.0)
        }
    }

    struct FailingDefinite;

    impl DefiniteCheck for FailingDefinite {
        fn is_positive_definite(&self, candidate: &DMatrix<f64>) -> Result<bool, DilationError> {
            Err(DilationError::EigenDecompositionFailed {
                candidate: candidate.clone(),
            })
        }
    }

    /// Asserts it is handed the expected defect-squared matrices in order
    /// and returns a zero block, so grid expectations stay easy to write.
    struct ExpectingSqrt {
        expected: Vec<DMatrix<f64>>,
        calls: RefCell<usize>,
    }

    impl ExpectingSqrt {
        fn new(expected: Vec<DMatrix<f64>>) -> Self {
            Self {
                expected,
                calls: RefCell::new(0),
            }
        }
    }

    impl SquareRoot for ExpectingSqrt {
        fn sqrt(&self, c: &DMatrix<f64>) -> Result<DMatrix<f64>, DilationError> {
            let mut calls = self.calls.borrow_mut();
            assert_eq!(c, &self.expected[*calls], "unexpected sqrt input");
            *calls += 1;
            Ok(DMatrix::zeros(2, 2))
        }
    }

    struct FailingSqrt;

    impl SquareRoot for FailingSqrt {
        fn sqrt(&self, _: &DMatrix<f64>) -> Result<DMatrix<f64>, DilationError> {
            Err(DilationError::LinearSolveFailed)
        }
    }

    /// Asserts the grid it receives block by block.
    struct ExpectingAssembler {
        expected: Vec<Vec<DMatrix<f64>>>,
    }

    impl BlockAssembler for ExpectingAssembler {
        fn assemble(&self, rows: &[Vec<DMatrix<f64>>]) -> Result<DMatrix<f64>, DilationError> {
            assert_eq!(rows, self.expected.as_slice(), "unexpected block grid");
            Ok(DMatrix::zeros(1, 1))
        }
    }

    struct FailingAssembler;

    impl BlockAssembler for FailingAssembler {
        fn assemble(&self, _: &[Vec<DMatrix<f64>>]) -> Result<DMatrix<f64>, DilationError> {
            Err(DilationError::BlockLayout("ragged".to_string()))
        }
    }

    fn zero_block() -> DMatrix<f64> {
        DMatrix::zeros(2, 2)
    }

    #[test]
    fn builds_two_by_two_grid_for_degree_one() {
        let t = zero_block();
        let engine = DilationEngine::with_parts(
            FixedDefinite(true),
            ExpectingSqrt::new(vec![DMatrix::identity(2, 2), DMatrix::identity(2, 2)]),
            ExpectingAssembler {
                expected: vec![
                    vec![zero_block(), zero_block()],
                    vec![zero_block(), zero_block()],
                ],
            },
        );

        engine.unitary_n_dilation(&t, 1).unwrap();
    }

    #[test]
    fn places_negative_transpose_in_last_column() {
        let t = dmatrix![0.5, 0.5; 0.0, 0.5];
        let engine = DilationEngine::with_parts(
            FixedDefinite(true),
            ExpectingSqrt::new(vec![
                dmatrix![0.5, -0.25; -0.25, 0.75],
                dmatrix![0.75, -0.25; -0.25, 0.5],
            ]),
            ExpectingAssembler {
                expected: vec![
                    vec![t.clone(), zero_block()],
                    vec![zero_block(), dmatrix![-0.5, 0.0; -0.5, -0.5]],
                ],
            },
        );

        engine.unitary_n_dilation(&t, 1).unwrap();
    }

    #[test]
    fn builds_identity_shift_rows_for_higher_degree() {
        let t = dmatrix![0.5, 0.5; 0.0, 0.5];
        let eye = DMatrix::<f64>::identity(2, 2);
        let engine = DilationEngine::with_parts(
            FixedDefinite(true),
            ExpectingSqrt::new(vec![
                dmatrix![0.5, -0.25; -0.25, 0.75],
                dmatrix![0.75, -0.25; -0.25, 0.5],
            ]),
            ExpectingAssembler {
                expected: vec![
                    vec![
                        t.clone(),
                        zero_block(),
                        zero_block(),
                        zero_block(),
                        zero_block(),
                    ],
                    vec![
                        zero_block(),
                        zero_block(),
                        zero_block(),
                        zero_block(),
                        dmatrix![-0.5, 0.0; -0.5, -0.5],
                    ],
                    vec![
                        zero_block(),
                        eye.clone(),
                        zero_block(),
                        zero_block(),
                        zero_block(),
                    ],
                    vec![
                        zero_block(),
                        zero_block(),
                        eye.clone(),
                        zero_block(),
                        zero_block(),
                    ],
                    vec![
                        zero_block(),
                        zero_block(),
                        zero_block(),
                        eye.clone(),
                        zero_block(),
                    ],
                ],
            },
        );

        engine.unitary_n_dilation(&t, 4).unwrap();
    }

    #[test]
    fn rejects_non_square_input() {
        let engine = DilationEngine::new();
        let t = DMatrix::<f64>::zeros(2, 3);
        assert_eq!(
            engine.unitary_n_dilation(&t, 1),
            Err(DilationError::NonSquareMatrix { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn rejects_non_contraction() {
        let engine = DilationEngine::with_parts(
            FixedDefinite(false),
            FailingSqrt,
            FailingAssembler,
        );
        assert_eq!(
            engine.unitary_n_dilation(&zero_block(), 1),
            Err(DilationError::NotAContraction)
        );
    }

    #[test]
    fn surfaces_eigendecomposition_failure_distinctly() {
        // A failed factorization during contraction validation is not the
        // same thing as "not a contraction".
        let engine = DilationEngine::with_parts(FailingDefinite, FailingSqrt, FailingAssembler);
        let err = engine.unitary_n_dilation(&zero_block(), 1).unwrap_err();
        assert!(matches!(
            err,
            DilationError::EigenDecompositionFailed { .. }
        ));
    }

    #[test]
    fn propagates_square_root_failure() {
        let engine =
            DilationEngine::with_parts(FixedDefinite(true), FailingSqrt, FailingAssembler);
        assert_eq!(
            engine.unitary_n_dilation(&zero_block(), 1),
            Err(DilationError::LinearSolveFailed)
        );
    }

    #[test]
    fn propagates_assembler_failure_verbatim() {
        let engine = DilationEngine::with_parts(
            FixedDefinite(true),
            ExpectingSqrt::new(vec![DMatrix::identity(2, 2), DMatrix::identity(2, 2)]),
            FailingAssembler,
        );
        assert_eq!(
            engine.unitary_n_dilation(&zero_block(), 1),
            Err(DilationError::BlockLayout("ragged".to_string()))
        );
    }
}
