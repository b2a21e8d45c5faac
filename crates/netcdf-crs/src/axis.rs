//! Coordinate axis model.
//!
//! A [`CoordinateAxis`] is the owned, decoded form of one 1-D coordinate
//! variable as handed over by the axis source (the file reader). Axes are
//! immutable after construction; the classifier and the transform builder
//! rely on that.

use crate::projection::ProjectionParameters;
use serde::{Deserialize, Serialize};

/// Relative tolerance for deciding that explicitly stored sample values
/// form an arithmetic progression. Matches the netCDF library's own
/// regularity test.
const REGULARITY_TOLERANCE: f64 = 5.0e-3;

/// Semantic kind of a coordinate axis.
///
/// This is the axis type vocabulary of netCDF coordinate variables, with CF
/// `axis`/`standard_name` attributes collapsed into a single tag by the axis
/// source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    /// Longitude in degrees east.
    Longitude,
    /// Latitude in degrees north.
    Latitude,
    /// Projected X (easting) in projection units.
    GenericX,
    /// Projected Y (northing) in projection units.
    GenericY,
    /// Height above a reference surface.
    Height,
    /// Atmospheric pressure level.
    Pressure,
    /// Vertical coordinate with no recognized reference surface.
    GenericVertical,
    /// Valid time.
    Time,
    /// Model run (reference) time.
    RunTime,
    /// No recognized semantic, or the file carried no axis type at all.
    Unknown,
}

impl AxisKind {
    /// True for the vertical kinds (pressure, height, generic vertical).
    pub fn is_vertical(&self) -> bool {
        matches!(
            self,
            AxisKind::Pressure | AxisKind::Height | AxisKind::GenericVertical
        )
    }

    /// True for the temporal kinds (time, run time).
    pub fn is_temporal(&self) -> bool {
        matches!(self, AxisKind::Time | AxisKind::RunTime)
    }

    /// True for latitude and longitude.
    pub fn is_geographic(&self) -> bool {
        matches!(self, AxisKind::Latitude | AxisKind::Longitude)
    }

    /// True for the generic projected horizontal kinds.
    pub fn is_generic_xy(&self) -> bool {
        matches!(self, AxisKind::GenericX | AxisKind::GenericY)
    }
}

/// Sample coordinates of a 1-D axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AxisValues {
    /// Arithmetic progression: sample `i` sits at `start + i * increment`.
    Regular {
        start: f64,
        increment: f64,
        count: usize,
    },
    /// Explicitly listed sample coordinates, in file order.
    Explicit(Vec<f64>),
}

/// A single 1-D coordinate axis decoded from a dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateAxis {
    name: String,
    kind: AxisKind,
    unit: String,
    values: AxisValues,
}

impl CoordinateAxis {
    /// Create an axis from its decoded parts.
    pub fn new(
        name: impl Into<String>,
        kind: AxisKind,
        unit: impl Into<String>,
        values: AxisValues,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            unit: unit.into(),
            values,
        }
    }

    /// Create a regularly spaced axis.
    pub fn regular(
        name: impl Into<String>,
        kind: AxisKind,
        unit: impl Into<String>,
        start: f64,
        increment: f64,
        count: usize,
    ) -> Self {
        Self::new(
            name,
            kind,
            unit,
            AxisValues::Regular {
                start,
                increment,
                count,
            },
        )
    }

    /// Create an axis from explicitly listed sample values.
    pub fn explicit(
        name: impl Into<String>,
        kind: AxisKind,
        unit: impl Into<String>,
        values: Vec<f64>,
    ) -> Self {
        Self::new(name, kind, unit, AxisValues::Explicit(values))
    }

    /// The coordinate variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The semantic kind tag.
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    /// The unit string, verbatim from the file.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// The sample values.
    pub fn values(&self) -> &AxisValues {
        &self.values
    }

    /// Number of samples along this axis.
    pub fn len(&self) -> usize {
        match &self.values {
            AxisValues::Regular { count, .. } => *count,
            AxisValues::Explicit(v) => v.len(),
        }
    }

    /// True when the axis has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The coordinate of sample `i`, or `None` past the end.
    pub fn value(&self, i: usize) -> Option<f64> {
        if i >= self.len() {
            return None;
        }
        match &self.values {
            AxisValues::Regular {
                start, increment, ..
            } => Some(start + i as f64 * increment),
            AxisValues::Explicit(v) => v.get(i).copied(),
        }
    }

    /// Whether the samples form an arithmetic progression.
    ///
    /// Regular descriptions are regular by construction. Explicit sample
    /// lists are probed against the spacing of their first two values with a
    /// relative tolerance; a single-sample axis counts as regular but has no
    /// derivable increment.
    pub fn is_regular(&self) -> bool {
        match &self.values {
            AxisValues::Regular { .. } => true,
            AxisValues::Explicit(v) => match v.len() {
                0 => false,
                1 => true,
                _ => {
                    let increment = v[1] - v[0];
                    if increment == 0.0 || !increment.is_finite() {
                        return false;
                    }
                    v.windows(2)
                        .all(|w| ((w[1] - w[0]) - increment).abs() <= REGULARITY_TOLERANCE * increment.abs())
                }
            },
        }
    }

    /// The coordinate of the first sample, or NaN for an empty axis.
    pub fn start(&self) -> f64 {
        match &self.values {
            AxisValues::Regular { start, .. } => *start,
            AxisValues::Explicit(v) => v.first().copied().unwrap_or(f64::NAN),
        }
    }

    /// The constant sample spacing, or NaN when none can be established.
    pub fn increment(&self) -> f64 {
        match &self.values {
            AxisValues::Regular { increment, .. } => *increment,
            AxisValues::Explicit(v) => {
                if v.len() >= 2 && self.is_regular() {
                    v[1] - v[0]
                } else {
                    f64::NAN
                }
            }
        }
    }
}

/// One dataset grid's coordinate system, as decoded by the axis source.
///
/// Axes are kept in file order, which by netCDF convention is
/// slow-varying-first (time, height, latitude, longitude).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystemSpec {
    name: String,
    axes: Vec<CoordinateAxis>,
    projection: Option<ProjectionParameters>,
}

impl CoordinateSystemSpec {
    /// Create a coordinate system with no projection attached.
    pub fn new(name: impl Into<String>, axes: Vec<CoordinateAxis>) -> Self {
        Self {
            name: name.into(),
            axes,
            projection: None,
        }
    }

    /// Attach the grid-mapping parameters recorded in the file.
    pub fn with_projection(mut self, projection: ProjectionParameters) -> Self {
        self.projection = Some(projection);
        self
    }

    /// The coordinate system name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The axes in file (slow-varying-first) order.
    pub fn axes(&self) -> &[CoordinateAxis] {
        &self.axes
    }

    /// The grid-mapping parameters, if the file recorded any.
    pub fn projection(&self) -> Option<&ProjectionParameters> {
        self.projection.as_ref()
    }

    /// Whether this system carries both a latitude and a longitude axis.
    ///
    /// Used as a catch-all when classification aborts: a system that has
    /// lat/lon axes can still be exposed as geographic over all its axes.
    pub fn is_lat_lon(&self) -> bool {
        self.axes.iter().any(|a| a.kind() == AxisKind::Latitude)
            && self.axes.iter().any(|a| a.kind() == AxisKind::Longitude)
    }

    /// Whether this system carries both generic X and Y axes.
    pub fn is_generic_xy(&self) -> bool {
        self.axes.iter().any(|a| a.kind() == AxisKind::GenericX)
            && self.axes.iter().any(|a| a.kind() == AxisKind::GenericY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_axis_values() {
        let axis = CoordinateAxis::regular("lon", AxisKind::Longitude, "degrees_east", 0.0, 0.25, 5);
        assert_eq!(axis.len(), 5);
        assert!(axis.is_regular());
        assert_eq!(axis.start(), 0.0);
        assert_eq!(axis.increment(), 0.25);
        assert_eq!(axis.value(4), Some(1.0));
        assert_eq!(axis.value(5), None);
    }

    #[test]
    fn test_explicit_regular_detection() {
        let axis = CoordinateAxis::explicit(
            "lat",
            AxisKind::Latitude,
            "degrees_north",
            vec![10.0, 12.5, 15.0, 17.5],
        );
        assert!(axis.is_regular());
        assert!((axis.increment() - 2.5).abs() < 1e-12);
        assert_eq!(axis.start(), 10.0);
    }

    #[test]
    fn test_explicit_irregular_detection() {
        let axis = CoordinateAxis::explicit(
            "level",
            AxisKind::Pressure,
            "hPa",
            vec![1000.0, 850.0, 500.0, 250.0],
        );
        assert!(!axis.is_regular());
        assert!(axis.increment().is_nan());
    }

    #[test]
    fn test_single_sample_axis() {
        let axis = CoordinateAxis::explicit("time", AxisKind::Time, "hours since 2024-01-01", vec![6.0]);
        assert!(axis.is_regular());
        assert!(axis.increment().is_nan());
        assert_eq!(axis.start(), 6.0);
    }

    #[test]
    fn test_empty_axis() {
        let axis = CoordinateAxis::explicit("z", AxisKind::Height, "m", vec![]);
        assert!(axis.is_empty());
        assert!(!axis.is_regular());
        assert!(axis.start().is_nan());
    }

    #[test]
    fn test_lat_lon_predicate() {
        let system = CoordinateSystemSpec::new(
            "grid",
            vec![
                CoordinateAxis::regular("lat", AxisKind::Latitude, "degrees_north", -90.0, 1.0, 181),
                CoordinateAxis::regular("lon", AxisKind::Longitude, "degrees_east", 0.0, 1.0, 360),
                CoordinateAxis::explicit("extra", AxisKind::Unknown, "", vec![0.0]),
            ],
        );
        assert!(system.is_lat_lon());
        assert!(!system.is_generic_xy());
    }
}
