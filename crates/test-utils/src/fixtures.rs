//! Common test fixtures: canned axes and coordinate systems.
//!
//! This module provides pre-defined test data representing the axis layouts
//! that show up in real model output.

use netcdf_crs::{AxisKind, CoordinateAxis, CoordinateSystemSpec};

/// A regular longitude axis in degrees east.
pub fn lon_axis(start: f64, increment: f64, count: usize) -> CoordinateAxis {
    CoordinateAxis::regular("lon", AxisKind::Longitude, "degrees_east", start, increment, count)
}

/// A regular latitude axis in degrees north.
pub fn lat_axis(start: f64, increment: f64, count: usize) -> CoordinateAxis {
    CoordinateAxis::regular("lat", AxisKind::Latitude, "degrees_north", start, increment, count)
}

/// A regular projected X (easting) axis in meters.
pub fn x_axis(start: f64, increment: f64, count: usize) -> CoordinateAxis {
    CoordinateAxis::regular("x", AxisKind::GenericX, "m", start, increment, count)
}

/// A regular projected Y (northing) axis in meters.
pub fn y_axis(start: f64, increment: f64, count: usize) -> CoordinateAxis {
    CoordinateAxis::regular("y", AxisKind::GenericY, "m", start, increment, count)
}

/// A regular height axis in meters.
pub fn height_axis(start: f64, increment: f64, count: usize) -> CoordinateAxis {
    CoordinateAxis::regular("height", AxisKind::Height, "m", start, increment, count)
}

/// An explicit pressure-level axis in hPa, irregular like real model levels.
pub fn pressure_levels() -> CoordinateAxis {
    CoordinateAxis::explicit(
        "isobaric",
        AxisKind::Pressure,
        "hPa",
        vec![1000.0, 925.0, 850.0, 700.0, 500.0, 300.0, 250.0, 100.0],
    )
}

/// A regular time axis with the given date-unit string.
pub fn time_axis(unit: &str, start: f64, increment: f64, count: usize) -> CoordinateAxis {
    CoordinateAxis::regular("time", AxisKind::Time, unit, start, increment, count)
}

/// An axis whose kind could not be recognized.
pub fn unknown_axis(name: &str) -> CoordinateAxis {
    CoordinateAxis::explicit(name, AxisKind::Unknown, "", vec![0.0, 1.0])
}

/// The canonical 4-D stack in file order: time, height, lat, lon.
pub fn time_height_lat_lon() -> CoordinateSystemSpec {
    CoordinateSystemSpec::new(
        "time_height_lat_lon",
        vec![
            time_axis("hours since 2024-01-01", 0.0, 6.0, 4),
            height_axis(0.0, 100.0, 10),
            lat_axis(-90.0, 1.0, 181),
            lon_axis(0.0, 1.0, 360),
        ],
    )
}

/// A plain 2-D lat/lon grid in file order: lat, lon.
pub fn lat_lon_grid() -> CoordinateSystemSpec {
    CoordinateSystemSpec::new(
        "lat_lon_grid",
        vec![lat_axis(-90.0, 0.25, 721), lon_axis(0.0, 0.25, 1440)],
    )
}
