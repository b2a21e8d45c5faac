//! Geodetic and vertical datum types.

use crate::axis::AxisKind;

/// Code space used in identifiers minted by this crate.
pub const CODE_SPACE: &str = "netCDF";

/// A spherical geodetic datum.
///
/// The netCDF projection framework uses spherical formulas, so geographic and
/// projected components assert a sphere rather than WGS84. The datum is a
/// plain value handed to [`crate::CrsBuilder::with_datum`]; substituting an
/// alternate sphere needs no global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalDatum {
    /// Human-readable datum name.
    pub name: &'static str,
    /// Sphere radius in meters.
    pub radius_m: f64,
}

/// Default spherical Earth, with the netCDF library's default radius.
pub const SPHERE: SphericalDatum = SphericalDatum {
    name: "Spherical Earth",
    radius_m: 6_371_229.0,
};

/// Reference surface category of a vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalDatumKind {
    /// Pressure levels.
    Barometric,
    /// Height above the geoid.
    Geoidal,
    /// Height above the ellipsoid.
    Ellipsoidal,
    /// Any other reference surface.
    OtherSurface,
}

impl VerticalDatumKind {
    /// Map an axis kind to its vertical datum category.
    ///
    /// Total: non-vertical kinds map to [`VerticalDatumKind::OtherSurface`].
    pub fn from_axis_kind(kind: AxisKind) -> Self {
        match kind {
            AxisKind::Pressure => VerticalDatumKind::Barometric,
            AxisKind::Height => VerticalDatumKind::Geoidal,
            AxisKind::GenericVertical => VerticalDatumKind::Ellipsoidal,
            _ => VerticalDatumKind::OtherSurface,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_datum_mapping() {
        assert_eq!(
            VerticalDatumKind::from_axis_kind(AxisKind::Pressure),
            VerticalDatumKind::Barometric
        );
        assert_eq!(
            VerticalDatumKind::from_axis_kind(AxisKind::Height),
            VerticalDatumKind::Geoidal
        );
        assert_eq!(
            VerticalDatumKind::from_axis_kind(AxisKind::GenericVertical),
            VerticalDatumKind::Ellipsoidal
        );
        assert_eq!(
            VerticalDatumKind::from_axis_kind(AxisKind::Time),
            VerticalDatumKind::OtherSurface
        );
    }

    #[test]
    fn test_default_sphere() {
        assert!((SPHERE.radius_m - 6_371_229.0).abs() < 1e-6);
    }
}
