//! Error types for CRS construction and use.

use crate::time::DateUnitError;
use crate::transform::TransformError;
use thiserror::Error;

/// Result type alias using [`CrsError`].
pub type CrsResult<T> = Result<T, CrsError>;

/// Errors raised while building or using a CRS.
///
/// An unclassifiable axis layout is deliberately *not* represented here: it
/// is absorbed by the fallback construction path and never surfaces as an
/// error. Likewise an irregular axis yields an absent transform, not a
/// failure.
#[derive(Debug, Error)]
pub enum CrsError {
    /// A temporal axis carried a unit string that does not parse as a
    /// date-unit expression. A temporal CRS is unusable without a valid
    /// epoch, so this fails the whole construction eagerly.
    #[error("invalid temporal unit {unit:?} on axis {axis:?}: {source}")]
    InvalidTimeUnit {
        axis: String,
        unit: String,
        #[source]
        source: DateUnitError,
    },

    /// A transform was requested over a dimension range outside
    /// `0..=dimension`.
    #[error("invalid dimension range {lower}..{upper} for a {dimension}-dimensional system")]
    InvalidDimensionRange {
        lower: usize,
        upper: usize,
        dimension: usize,
    },

    /// The projected component's conversion was requested but no projection
    /// is configured (no parameters in the file, or no provider installed).
    #[error("projection is unspecified")]
    MissingProjection,

    /// The transform factory rejected a matrix this crate assembled. This
    /// denotes a configuration fault upstream, not a user error.
    #[error("affine transform construction failed: {0}")]
    Transform(#[from] TransformError),
}
