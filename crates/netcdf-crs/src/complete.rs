//! Calendar completion of temporal axes.

use crate::axis::CoordinateAxis;
use thiserror::Error;

/// Error returned by an [`AxisCompleter`].
#[derive(Debug, Error)]
#[error("axis completion failed: {0}")]
pub struct CompletionError(pub String);

/// Upgrades a generic time axis to a calendar-aware one.
///
/// Implementations typically consult the originating dataset file to resolve
/// the calendar attribute and may block on I/O. Failure is non-fatal by
/// contract: the builder logs a warning and keeps the original axis, and
/// implementations must report problems through the `Err` variant rather
/// than panicking across this boundary.
pub trait AxisCompleter: Send + Sync {
    /// Return a calendar-aware replacement for `axis`, or an error if the
    /// upgrade is impossible.
    fn complete(&self, axis: &CoordinateAxis) -> Result<CoordinateAxis, CompletionError>;
}
