//! CRS component model.
//!
//! Each component owns its axes and a memoized grid-to-CRS transform. The
//! concrete kinds (geographic, projected, vertical, temporal, compound, and
//! the fallback grid wrapper) share a [`CrsBase`] by composition and are
//! dispatched through the [`NetcdfCrs`] enum.
//!
//! # Axis order
//!
//! The order of axes exposed by [`NetcdfCrs::axis`] is reversed compared to
//! the order of axes in the source coordinate system. The netCDF convention
//! stores axes slow-varying-first (time, height, latitude, longitude), while
//! referencing frameworks use fast-varying-first (longitude, latitude,
//! height, time).

use crate::axis::{AxisKind, CoordinateAxis};
use crate::datum::{SphericalDatum, VerticalDatumKind, CODE_SPACE};
use crate::error::{CrsError, CrsResult};
use crate::projection::{Projection, ProjectionParameters, ProjectionProvider};
use crate::time::DateUnit;
use crate::transform::{build_grid_transform, AffineTransform, TransformFactory};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Shared state of every CRS component: identity, owned axes in reversed
/// (fast-varying-first) order, and the memoized whole-range transform.
pub(crate) struct CrsBase {
    name: String,
    axes: Vec<CoordinateAxis>,
    factory: Arc<dyn TransformFactory>,
    grid_to_crs: OnceLock<Option<AffineTransform>>,
}

impl fmt::Debug for CrsBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrsBase")
            .field("name", &self.name)
            .field("axes", &self.axes)
            .finish_non_exhaustive()
    }
}

impl CrsBase {
    /// Create a base over axes given in source (slow-varying-first) order.
    /// The axes are retained reversed, as documented in the module doc.
    fn new(
        name: impl Into<String>,
        source_axes: &[CoordinateAxis],
        factory: Arc<dyn TransformFactory>,
    ) -> Self {
        let mut axes = source_axes.to_vec();
        axes.reverse();
        Self {
            name: name.into(),
            axes,
            factory,
            grid_to_crs: OnceLock::new(),
        }
    }

    /// Create a base whose axes are the concatenation of the components'
    /// already-reversed axes, in component order.
    fn from_components(
        name: impl Into<String>,
        components: &[NetcdfCrs],
        factory: Arc<dyn TransformFactory>,
    ) -> Self {
        let axes = components
            .iter()
            .flat_map(|c| c.axes().iter().cloned())
            .collect();
        Self {
            name: name.into(),
            axes,
            factory,
            grid_to_crs: OnceLock::new(),
        }
    }

    fn dimension(&self) -> usize {
        self.axes.len()
    }

    fn axis(&self, dimension: usize) -> Option<&CoordinateAxis> {
        self.axes.get(dimension)
    }

    fn grid_to_crs(&self) -> CrsResult<Option<&AffineTransform>> {
        if self.grid_to_crs.get().is_none() {
            let transform =
                build_grid_transform(&self.axes, 0, self.axes.len(), self.factory.as_ref())?;
            // A concurrent computation may have won the race; both results
            // are identical, so losing the set is harmless.
            let _ = self.grid_to_crs.set(transform);
        }
        Ok(self.grid_to_crs.get().and_then(|t| t.as_ref()))
    }

    fn grid_to_crs_range(&self, lower: usize, upper: usize) -> CrsResult<Option<AffineTransform>> {
        build_grid_transform(&self.axes, lower, upper, self.factory.as_ref())
    }
}

/// Delegates the accessors every component shares to its [`CrsBase`].
macro_rules! impl_crs_common {
    ($type:ty) => {
        impl $type {
            /// The coordinate system name.
            pub fn name(&self) -> &str {
                &self.base.name
            }

            /// Number of dimensions.
            pub fn dimension(&self) -> usize {
                self.base.dimension()
            }

            /// The axes in reversed (fast-varying-first) order.
            pub fn axes(&self) -> &[CoordinateAxis] {
                &self.base.axes
            }

            /// The axis at the given dimension, in reversed order, or
            /// `None` out of bounds.
            pub fn axis(&self, dimension: usize) -> Option<&CoordinateAxis> {
                self.base.axis(dimension)
            }

            /// The transform from grid indices to CRS coordinates, or
            /// `None` if some axis is irregular. Computed on first request
            /// and memoized.
            pub fn grid_to_crs(&self) -> CrsResult<Option<&AffineTransform>> {
                self.base.grid_to_crs()
            }

            /// The grid-to-CRS transform restricted to dimensions
            /// `[lower, upper)`, or `None` if some axis in range is
            /// irregular.
            pub fn grid_to_crs_range(
                &self,
                lower: usize,
                upper: usize,
            ) -> CrsResult<Option<AffineTransform>> {
                self.base.grid_to_crs_range(lower, upper)
            }
        }
    };
}

/// Geographic CRS over a spherical datum.
///
/// Typically two-dimensional, but unusual files may put one or more than two
/// angular axes in a contiguous run, and the fallback construction path may
/// wrap a whole system here.
#[derive(Debug)]
pub struct GeographicCrs {
    base: CrsBase,
    datum: SphericalDatum,
}

impl_crs_common!(GeographicCrs);

impl GeographicCrs {
    pub(crate) fn new(
        name: impl Into<String>,
        source_axes: &[CoordinateAxis],
        datum: SphericalDatum,
        factory: Arc<dyn TransformFactory>,
    ) -> Self {
        Self {
            base: CrsBase::new(name, source_axes, factory),
            datum,
        }
    }

    /// The geodetic datum, always a sphere in this model.
    pub fn datum(&self) -> &SphericalDatum {
        &self.datum
    }
}

/// Projected CRS over a spherical datum.
pub struct ProjectedCrs {
    base: CrsBase,
    datum: SphericalDatum,
    base_crs: GeographicCrs,
    parameters: Option<ProjectionParameters>,
    provider: Option<Arc<dyn ProjectionProvider>>,
    projection: OnceLock<Arc<dyn Projection>>,
}

impl fmt::Debug for ProjectedCrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectedCrs")
            .field("base", &self.base)
            .field("datum", &self.datum)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl_crs_common!(ProjectedCrs);

impl ProjectedCrs {
    pub(crate) fn new(
        name: impl Into<String>,
        source_axes: &[CoordinateAxis],
        datum: SphericalDatum,
        parameters: Option<ProjectionParameters>,
        provider: Option<Arc<dyn ProjectionProvider>>,
        factory: Arc<dyn TransformFactory>,
    ) -> Self {
        // The base CRS is the datum's own geographic frame. Its canonical
        // axes carry no grid samples: they describe a referencing frame,
        // not a grid.
        let base_crs = GeographicCrs::new(
            datum.name,
            &[
                CoordinateAxis::explicit("latitude", AxisKind::Latitude, "degrees_north", vec![]),
                CoordinateAxis::explicit("longitude", AxisKind::Longitude, "degrees_east", vec![]),
            ],
            datum,
            factory.clone(),
        );
        Self {
            base: CrsBase::new(name, source_axes, factory),
            datum,
            base_crs,
            parameters,
            provider,
            projection: OnceLock::new(),
        }
    }

    /// The geodetic datum, always a sphere in this model. It is the same
    /// datum as the one of [`ProjectedCrs::base_crs`].
    pub fn datum(&self) -> &SphericalDatum {
        &self.datum
    }

    /// The base geographic CRS this projection converts from.
    pub fn base_crs(&self) -> &GeographicCrs {
        &self.base_crs
    }

    /// The grid-mapping parameters recorded in the file, if any.
    pub fn projection_parameters(&self) -> Option<&ProjectionParameters> {
        self.parameters.as_ref()
    }

    /// The conversion from the base geographic CRS.
    ///
    /// Resolved through the projection provider on first request and
    /// memoized. Other uses of this CRS are unaffected by a missing
    /// projection; only this accessor fails.
    ///
    /// # Errors
    ///
    /// [`CrsError::MissingProjection`] when the file recorded no projection
    /// parameters, no provider is installed, or the provider does not
    /// recognize the parameter set.
    pub fn conversion_from_base(&self) -> CrsResult<Arc<dyn Projection>> {
        if let Some(projection) = self.projection.get() {
            return Ok(projection.clone());
        }
        let parameters = self.parameters.as_ref().ok_or(CrsError::MissingProjection)?;
        let provider = self.provider.as_ref().ok_or(CrsError::MissingProjection)?;
        let resolved = provider
            .resolve(parameters)
            .ok_or(CrsError::MissingProjection)?;
        Ok(self.projection.get_or_init(|| resolved).clone())
    }
}

/// Vertical CRS over a single pressure, height or generic vertical axis.
#[derive(Debug)]
pub struct VerticalCrs {
    base: CrsBase,
    datum_kind: VerticalDatumKind,
}

impl_crs_common!(VerticalCrs);

impl VerticalCrs {
    pub(crate) fn new(
        name: impl Into<String>,
        axis: &CoordinateAxis,
        factory: Arc<dyn TransformFactory>,
    ) -> Self {
        let datum_kind = VerticalDatumKind::from_axis_kind(axis.kind());
        Self {
            base: CrsBase::new(name, std::slice::from_ref(axis), factory),
            datum_kind,
        }
    }

    /// Reference surface category derived from the axis kind.
    pub fn datum_kind(&self) -> VerticalDatumKind {
        self.datum_kind
    }
}

/// Temporal CRS over a single time or run-time axis.
#[derive(Debug)]
pub struct TemporalCrs {
    base: CrsBase,
    unit: DateUnit,
}

impl_crs_common!(TemporalCrs);

impl TemporalCrs {
    pub(crate) fn new(
        name: impl Into<String>,
        axis: CoordinateAxis,
        factory: Arc<dyn TransformFactory>,
    ) -> CrsResult<Self> {
        let unit = DateUnit::parse(axis.unit()).map_err(|source| CrsError::InvalidTimeUnit {
            axis: axis.name().to_string(),
            unit: axis.unit().to_string(),
            source,
        })?;
        Ok(Self {
            base: CrsBase::new(name, std::slice::from_ref(&axis), factory),
            unit,
        })
    }

    /// The date and time origin of the temporal datum.
    pub fn origin(&self) -> DateTime<Utc> {
        self.unit.origin()
    }

    /// The parsed date unit of the time axis.
    pub fn date_unit(&self) -> &DateUnit {
        &self.unit
    }

    /// The absolute instant of an axis coordinate value.
    pub fn instant(&self, value: f64) -> DateTime<Utc> {
        self.unit.instant(value)
    }
}

/// Compound CRS aggregating several components.
///
/// Purely structural: the axis list is the concatenation of the components'
/// axes in classification order, with no coordinate blending.
#[derive(Debug)]
pub struct CompoundCrs {
    base: CrsBase,
    components: Vec<NetcdfCrs>,
}

impl_crs_common!(CompoundCrs);

impl CompoundCrs {
    pub(crate) fn new(
        name: impl Into<String>,
        components: Vec<NetcdfCrs>,
        factory: Arc<dyn TransformFactory>,
    ) -> Self {
        Self {
            base: CrsBase::from_components(name, &components, factory),
            components,
        }
    }

    /// The components, in classification (fastest-varying-first) order.
    pub fn components(&self) -> &[NetcdfCrs] {
        &self.components
    }
}

/// Fallback whole-system wrapper used when the axes cannot be split into
/// semantic components. It exposes dimension, axes and (if possible) a grid
/// transform, but makes no geodetic claims.
#[derive(Debug)]
pub struct GridCrs {
    base: CrsBase,
}

impl_crs_common!(GridCrs);

impl GridCrs {
    pub(crate) fn new(
        name: impl Into<String>,
        source_axes: &[CoordinateAxis],
        factory: Arc<dyn TransformFactory>,
    ) -> Self {
        Self {
            base: CrsBase::new(name, source_axes, factory),
        }
    }
}

/// A coordinate reference system derived from one netCDF coordinate system.
#[derive(Debug)]
pub enum NetcdfCrs {
    Geographic(GeographicCrs),
    Projected(ProjectedCrs),
    Vertical(VerticalCrs),
    Temporal(TemporalCrs),
    Compound(CompoundCrs),
    Grid(GridCrs),
}

impl NetcdfCrs {
    fn base(&self) -> &CrsBase {
        match self {
            NetcdfCrs::Geographic(c) => &c.base,
            NetcdfCrs::Projected(c) => &c.base,
            NetcdfCrs::Vertical(c) => &c.base,
            NetcdfCrs::Temporal(c) => &c.base,
            NetcdfCrs::Compound(c) => &c.base,
            NetcdfCrs::Grid(c) => &c.base,
        }
    }

    /// The coordinate system name.
    pub fn name(&self) -> &str {
        &self.base().name
    }

    /// Number of dimensions. For a compound CRS this is the sum over its
    /// components.
    pub fn dimension(&self) -> usize {
        self.base().dimension()
    }

    /// The axes in reversed (fast-varying-first) order.
    pub fn axes(&self) -> &[CoordinateAxis] {
        &self.base().axes
    }

    /// The axis at the given dimension, in reversed order (see the module
    /// doc), or `None` out of bounds.
    pub fn axis(&self, dimension: usize) -> Option<&CoordinateAxis> {
        self.base().axis(dimension)
    }

    /// Number of samples along the given dimension.
    pub fn axis_len(&self, dimension: usize) -> Option<usize> {
        self.base().axis(dimension).map(|a| a.len())
    }

    /// The minimum inclusive grid coordinate along the given dimension,
    /// which is always zero.
    pub fn grid_low(&self, dimension: usize) -> Option<u64> {
        self.base().axis(dimension).map(|_| 0)
    }

    /// The maximum inclusive grid coordinate along the given dimension, or
    /// `None` for an out-of-bounds dimension or an empty axis.
    pub fn grid_high(&self, dimension: usize) -> Option<u64> {
        self.base()
            .axis(dimension)
            .and_then(|a| a.len().checked_sub(1))
            .map(|high| high as u64)
    }

    /// The transform from grid indices to CRS coordinates, or `None` if
    /// some axis is irregular. Computed on first request and memoized for
    /// the lifetime of this CRS.
    pub fn grid_to_crs(&self) -> CrsResult<Option<&AffineTransform>> {
        self.base().grid_to_crs()
    }

    /// The grid-to-CRS transform restricted to dimensions `[lower, upper)`.
    ///
    /// # Errors
    ///
    /// [`CrsError::InvalidDimensionRange`] when the range is not within
    /// `0..=dimension`.
    pub fn grid_to_crs_range(&self, lower: usize, upper: usize) -> CrsResult<Option<AffineTransform>> {
        self.base().grid_to_crs_range(lower, upper)
    }
}

impl fmt::Display for NetcdfCrs {
    /// Renders as `netCDF:<name>`, quoting names that contain spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name().trim();
        if name.contains(' ') {
            write!(f, "{}:\"{}\"", CODE_SPACE, name)
        } else {
            write!(f, "{}:{}", CODE_SPACE, name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisKind;
    use crate::datum::SPHERE;
    use crate::transform::MatrixTransformFactory;

    fn factory() -> Arc<dyn TransformFactory> {
        Arc::new(MatrixTransformFactory)
    }

    fn lat_lon() -> Vec<CoordinateAxis> {
        vec![
            CoordinateAxis::regular("lat", AxisKind::Latitude, "degrees_north", -90.0, 0.5, 361),
            CoordinateAxis::regular("lon", AxisKind::Longitude, "degrees_east", 0.0, 0.5, 720),
        ]
    }

    #[test]
    fn test_axes_are_reversed() {
        let crs = GeographicCrs::new("latlon", &lat_lon(), SPHERE, factory());
        assert_eq!(crs.dimension(), 2);
        assert_eq!(crs.axis(0).map(|a| a.name()), Some("lon"));
        assert_eq!(crs.axis(1).map(|a| a.name()), Some("lat"));
        assert!(crs.axis(2).is_none());
    }

    #[test]
    fn test_grid_envelope_accessors() {
        let crs = NetcdfCrs::Geographic(GeographicCrs::new("latlon", &lat_lon(), SPHERE, factory()));
        assert_eq!(crs.axis_len(0), Some(720));
        assert_eq!(crs.grid_low(0), Some(0));
        assert_eq!(crs.grid_high(0), Some(719));
        assert_eq!(crs.grid_high(1), Some(360));
        assert_eq!(crs.grid_high(2), None);
    }

    #[test]
    fn test_display_quotes_spaced_names() {
        let crs = NetcdfCrs::Geographic(GeographicCrs::new("latlon", &lat_lon(), SPHERE, factory()));
        assert_eq!(crs.to_string(), "netCDF:latlon");
        let spaced = NetcdfCrs::Geographic(GeographicCrs::new("my grid", &lat_lon(), SPHERE, factory()));
        assert_eq!(spaced.to_string(), "netCDF:\"my grid\"");
    }

    #[test]
    fn test_grid_to_crs_memoized() {
        let crs = NetcdfCrs::Geographic(GeographicCrs::new("latlon", &lat_lon(), SPHERE, factory()));
        let first: Vec<(f64, f64)> = {
            let t = crs.grid_to_crs().unwrap().unwrap();
            (0..2).map(|i| (t.scale(i), t.offset(i))).collect()
        };
        let second: Vec<(f64, f64)> = {
            let t = crs.grid_to_crs().unwrap().unwrap();
            (0..2).map(|i| (t.scale(i), t.offset(i))).collect()
        };
        assert_eq!(first, second);
        assert_eq!(first[0], (0.5, 0.0));
        assert_eq!(first[1], (0.5, -90.0));
    }

    #[test]
    fn test_missing_projection_is_illegal_state_at_accessor_only() {
        let axes = vec![
            CoordinateAxis::regular("y", AxisKind::GenericY, "m", 0.0, 1000.0, 100),
            CoordinateAxis::regular("x", AxisKind::GenericX, "m", 0.0, 1000.0, 100),
        ];
        let crs = ProjectedCrs::new("proj", &axes, SPHERE, None, None, factory());
        assert!(matches!(
            crs.conversion_from_base(),
            Err(CrsError::MissingProjection)
        ));
        // The rest of the CRS stays usable.
        assert_eq!(crs.dimension(), 2);
        assert!(crs.grid_to_crs().unwrap().is_some());
    }

    #[test]
    fn test_projected_base_crs_shares_datum() {
        let axes = vec![
            CoordinateAxis::regular("y", AxisKind::GenericY, "m", 0.0, 1000.0, 100),
            CoordinateAxis::regular("x", AxisKind::GenericX, "m", 0.0, 1000.0, 100),
        ];
        let crs = ProjectedCrs::new("proj", &axes, SPHERE, None, None, factory());
        assert_eq!(crs.base_crs().datum(), crs.datum());
        assert_eq!(crs.base_crs().dimension(), 2);
        assert_eq!(crs.base_crs().axis(0).map(|a| a.kind()), Some(AxisKind::Longitude));
    }
}
