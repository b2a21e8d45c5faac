//! Coordinate reference systems for netCDF coordinate systems.
//!
//! This crate takes the ordered, undifferentiated axis list of a netCDF
//! coordinate system and turns it into a semantically typed coordinate
//! reference system: geographic, vertical, temporal, projected, or a
//! compound of these. Where every axis in range is regularly spaced it also
//! derives the affine transform from integer grid indices to CRS
//! coordinates, with a rounding correction for the floating-point artifacts
//! common in angular step sizes stored in files.
//!
//! # Architecture
//!
//! ```text
//! CoordinateSystemSpec (axes in file order, slow-varying-first)
//!      │
//!      ▼
//! classify() ── Unclassifiable ──► fallback wrapper (Geographic / Projected / Grid)
//!      │
//!      └─ Grouped ──► CrsBuilder::build
//!                          │
//!                          ├─► one group: that component directly
//!                          │
//!                          └─► several groups: Compound, in scan order
//!                                   │
//!                                   ▼
//!                      NetcdfCrs::grid_to_crs()  (lazy, memoized)
//! ```
//!
//! # Example
//!
//! ```
//! use netcdf_crs::{AxisKind, CoordinateAxis, CoordinateSystemSpec, CrsBuilder, NetcdfCrs};
//!
//! let system = CoordinateSystemSpec::new(
//!     "gfs_surface",
//!     vec![
//!         CoordinateAxis::regular("lat", AxisKind::Latitude, "degrees_north", -90.0, 0.25, 721),
//!         CoordinateAxis::regular("lon", AxisKind::Longitude, "degrees_east", 0.0, 0.25, 1440),
//!     ],
//! );
//! let crs = CrsBuilder::new().build(&system)?;
//! assert!(matches!(crs, NetcdfCrs::Geographic(_)));
//!
//! // Axis order is reversed to fast-varying-first: longitude leads.
//! assert_eq!(crs.axis(0).map(|a| a.name()), Some("lon"));
//!
//! let transform = crs.grid_to_crs()?.expect("regular axes");
//! assert_eq!(transform.apply(&[4.0, 0.0]), Some(vec![1.0, -90.0]));
//! # Ok::<(), netcdf_crs::CrsError>(())
//! ```

pub mod axis;
pub mod builder;
pub mod classify;
pub mod complete;
pub mod crs;
pub mod datum;
pub mod error;
pub mod projection;
pub mod time;
pub mod transform;

// Re-export commonly used types at the crate root
pub use axis::{AxisKind, AxisValues, CoordinateAxis, CoordinateSystemSpec};
pub use builder::CrsBuilder;
pub use classify::{classify, AxisGroup, Classification, GroupKind};
pub use complete::{AxisCompleter, CompletionError};
pub use crs::{
    CompoundCrs, GeographicCrs, GridCrs, NetcdfCrs, ProjectedCrs, TemporalCrs, VerticalCrs,
};
pub use datum::{SphericalDatum, VerticalDatumKind, CODE_SPACE, SPHERE};
pub use error::{CrsError, CrsResult};
pub use projection::{Projection, ProjectionParameters, ProjectionProvider};
pub use time::{DateUnit, DateUnitError, TimeUnit};
pub use transform::{
    build_grid_transform, nice, AffineTransform, MatrixTransformFactory, TransformError,
    TransformFactory,
};
