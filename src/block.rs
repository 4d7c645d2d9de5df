//! Assembly of a grid of equal-sized square blocks into one dense matrix.

use nalgebra::DMatrix;

use crate::error::DilationError;

/// Lays out a rectangular grid of square blocks, row-major, into a single
/// matrix.
pub trait BlockAssembler {
    fn assemble(&self, rows: &[Vec<DMatrix<f64>>]) -> Result<DMatrix<f64>, DilationError>;
}

/// Verbatim block copy: for block dimension `b`, block (i, j) lands at rows
/// `[i·b, (i+1)·b)` and columns `[j·b, (j+1)·b)` of the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseBlockAssembler;

impl BlockAssembler for DenseBlockAssembler {
    fn assemble(&self, rows: &[Vec<DMatrix<f64>>]) -> Result<DMatrix<f64>, DilationError> {
        let block_dim = validate_grid(rows)?;
        let grid_rows = rows.len();
        let grid_cols = rows[0].len();

        let mut assembled = DMatrix::<f64>::zeros(grid_rows * block_dim, grid_cols * block_dim);
        for (i, row) in rows.iter().enumerate() {
            for (j, block) in row.iter().enumerate() {
                assembled
                    .view_mut((i * block_dim, j * block_dim), (block_dim, block_dim))
                    .copy_from(block);
            }
        }

        Ok(assembled)
    }
}

/// Checks the grid is non-empty and rectangular with square blocks of one
/// common dimension, which it returns.
fn validate_grid(rows: &[Vec<DMatrix<f64>>]) -> Result<usize, DilationError> {
    let first = rows
        .first()
        .and_then(|row| row.first())
        .ok_or_else(|| DilationError::BlockLayout("empty block grid".to_string()))?;
    let block_dim = first.nrows();
    let grid_cols = rows[0].len();

    for (i, row) in rows.iter().enumerate() {
        if row.len() != grid_cols {
            return Err(DilationError::BlockLayout(format!(
                "row {} has {} blocks, expected {}",
                i,
                row.len(),
                grid_cols
            )));
        }
        for (j, block) in row.iter().enumerate() {
            if block.nrows() != block.ncols() {
                return Err(DilationError::BlockLayout(format!(
                    "block ({}, {}) is {}x{}, expected a square block",
                    i,
                    j,
                    block.nrows(),
                    block.ncols()
                )));
            }
            if block.nrows() != block_dim {
                return Err(DilationError::BlockLayout(format!(
                    "block ({}, {}) has dimension {}, expected {}",
                    i,
                    j,
                    block.nrows(),
                    block_dim
                )));
            }
        }
    }

    Ok(block_dim)
}
