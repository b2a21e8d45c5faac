//! Grid-to-CRS affine transforms.
//!
//! For a CRS whose axes are all regularly spaced, the mapping from integer
//! grid indices to CRS coordinates is a diagonal affine transform: each
//! axis contributes its increment as the scale and its first coordinate as
//! the offset. The transform is stored as an `(n+1)x(n+1)` homogeneous
//! matrix so that compound systems compose structurally.

use crate::axis::CoordinateAxis;
use crate::error::{CrsError, CrsResult};
use nalgebra::DMatrix;
use thiserror::Error;

/// Tolerance for the rounding correction in [`nice`].
const EPS: f64 = 1e-10;

/// Errors raised by a [`TransformFactory`].
#[derive(Debug, Error)]
pub enum TransformError {
    /// The matrix is not square.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// The bottom row is not `[0, ..., 0, 1]`.
    #[error("matrix is not affine: bottom row must be [0, ..., 0, 1]")]
    NotAffine,

    /// An element is NaN or infinite.
    #[error("matrix element ({row}, {col}) is not finite")]
    NotFinite { row: usize, col: usize },
}

/// An affine mapping from integer grid indices to CRS coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineTransform {
    matrix: DMatrix<f64>,
}

impl AffineTransform {
    /// The homogeneous `(n+1)x(n+1)` matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Number of dimensions mapped by this transform.
    pub fn dimension(&self) -> usize {
        self.matrix.nrows() - 1
    }

    /// Scale (sample spacing) along dimension `i`.
    pub fn scale(&self, i: usize) -> f64 {
        self.matrix[(i, i)]
    }

    /// Offset (start coordinate) along dimension `i`.
    pub fn offset(&self, i: usize) -> f64 {
        self.matrix[(i, self.dimension())]
    }

    /// Apply the transform to a grid index vector.
    ///
    /// Returns `None` when `grid` has the wrong length.
    pub fn apply(&self, grid: &[f64]) -> Option<Vec<f64>> {
        let n = self.dimension();
        if grid.len() != n {
            return None;
        }
        let mut out = vec![0.0; n];
        for (i, value) in out.iter_mut().enumerate() {
            let mut acc = self.matrix[(i, n)];
            for (j, g) in grid.iter().enumerate() {
                acc += self.matrix[(i, j)] * g;
            }
            *value = acc;
        }
        Some(out)
    }
}

/// Builds [`AffineTransform`]s from homogeneous matrices.
///
/// A failure here means the submitted matrix was malformed, which for
/// matrices assembled by [`build_grid_transform`] denotes a deeper
/// configuration fault; callers always propagate it.
pub trait TransformFactory: Send + Sync {
    fn from_matrix(&self, matrix: DMatrix<f64>) -> Result<AffineTransform, TransformError>;
}

/// Default factory: validates shape and affinity, then wraps the matrix.
#[derive(Debug, Default, Clone, Copy)]
pub struct MatrixTransformFactory;

impl TransformFactory for MatrixTransformFactory {
    fn from_matrix(&self, matrix: DMatrix<f64>) -> Result<AffineTransform, TransformError> {
        let (rows, cols) = matrix.shape();
        if rows != cols || rows == 0 {
            return Err(TransformError::NotSquare { rows, cols });
        }
        for row in 0..rows {
            for col in 0..cols {
                if !matrix[(row, col)].is_finite() {
                    return Err(TransformError::NotFinite { row, col });
                }
            }
        }
        for col in 0..cols {
            let expected = if col == cols - 1 { 1.0 } else { 0.0 };
            if matrix[(rows - 1, col)] != expected {
                return Err(TransformError::NotAffine);
            }
        }
        Ok(AffineTransform { matrix })
    }
}

/// Workaround for rounding errors found in netCDF files.
///
/// Common angular steps (a third of a degree and friends) have no exact
/// binary representation, so files store them slightly off. Values within
/// [`EPS`] of a multiple of 1/360 are snapped to the exact fraction.
pub fn nice(value: f64) -> f64 {
    let tf = value * 360.0;
    let ti = tf.round();
    if (tf - ti).abs() <= EPS {
        ti / 360.0
    } else {
        value
    }
}

/// Build the grid-to-CRS transform over `axes[lower..upper]`.
///
/// Returns `Ok(None)` when any axis in range is irregular or has a zero or
/// NaN increment: a transform must be total over its declared dimension
/// range or not exist at all, never partial.
///
/// # Errors
///
/// [`CrsError::InvalidDimensionRange`] when the range is out of bounds, and
/// [`CrsError::Transform`] when the factory rejects the assembled matrix.
pub fn build_grid_transform(
    axes: &[CoordinateAxis],
    lower: usize,
    upper: usize,
    factory: &dyn TransformFactory,
) -> CrsResult<Option<AffineTransform>> {
    if lower > upper || upper > axes.len() {
        return Err(CrsError::InvalidDimensionRange {
            lower,
            upper,
            dimension: axes.len(),
        });
    }
    let n = upper - lower;
    let mut matrix = DMatrix::identity(n + 1, n + 1);
    for i in 0..n {
        let axis = &axes[lower + i];
        if !axis.is_regular() {
            return Ok(None);
        }
        let scale = axis.increment();
        if scale.is_nan() || scale == 0.0 {
            return Ok(None);
        }
        matrix[(i, i)] = nice(scale);
        matrix[(i, n)] = nice(axis.start());
    }
    Ok(Some(factory.from_matrix(matrix)?))
}
