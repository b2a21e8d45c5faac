//! Axis classification and grouping.
//!
//! The classifier scans a coordinate system's axis list once and partitions
//! it into contiguous groups of compatible kinds. Because the file stores
//! axes slow-varying-first (time, height, latitude, longitude), the scan
//! runs from the last element backward so that groups come out
//! fastest-varying first — the order in which CRS components are assembled.

use crate::axis::{AxisKind, CoordinateAxis};
use std::ops::Range;

/// Category resolved for a group of adjacent axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Latitude/longitude axes.
    Geographic,
    /// Generic X/Y axes of a projected horizontal plane.
    Projected,
    /// A single pressure, height or generic vertical axis.
    Vertical,
    /// A single time or run-time axis.
    Temporal,
}

/// A maximal contiguous run of axes sharing a compatible kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisGroup {
    /// The resolved category.
    pub kind: GroupKind,
    /// `[lower, upper)` range into the source (slow-varying-first) axis list.
    pub range: Range<usize>,
}

/// Outcome of one classification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Every axis was attributed to exactly one group, listed
    /// fastest-varying group first.
    Grouped(Vec<AxisGroup>),
    /// At least one axis carried no usable kind. Partial, un-attributable
    /// axes make any component boundary unsafe to assert, so the whole pass
    /// is discarded and the caller must fall back to whole-system handling.
    Unclassifiable,
}

/// Partition `axes` into CRS component groups.
///
/// Vertical and temporal axes each form a single-axis group. Latitude and
/// longitude axes are merged into one geographic group spanning the whole
/// contiguous lat/lon run; generic X/Y axes likewise form one projected
/// group. A single [`AxisKind::Unknown`] axis anywhere aborts the pass.
pub fn classify(axes: &[CoordinateAxis]) -> Classification {
    let mut groups = Vec::with_capacity(4);
    let mut i = axes.len();
    while i > 0 {
        i -= 1;
        match axes[i].kind() {
            AxisKind::Pressure | AxisKind::Height | AxisKind::GenericVertical => {
                groups.push(AxisGroup {
                    kind: GroupKind::Vertical,
                    range: i..i + 1,
                });
            }
            AxisKind::Time | AxisKind::RunTime => {
                groups.push(AxisGroup {
                    kind: GroupKind::Temporal,
                    range: i..i + 1,
                });
            }
            AxisKind::Latitude | AxisKind::Longitude => {
                let upper = i + 1;
                i = run_start(axes, i, AxisKind::Latitude, AxisKind::Longitude);
                groups.push(AxisGroup {
                    kind: GroupKind::Geographic,
                    range: i..upper,
                });
            }
            AxisKind::GenericX | AxisKind::GenericY => {
                let upper = i + 1;
                i = run_start(axes, i, AxisKind::GenericX, AxisKind::GenericY);
                groups.push(AxisGroup {
                    kind: GroupKind::Projected,
                    range: i..upper,
                });
            }
            AxisKind::Unknown => return Classification::Unclassifiable,
        }
    }
    Classification::Grouped(groups)
}

/// Lower index of the maximal run ending at `upper` (inclusive) whose axis
/// kinds are all `t1` or `t2`.
fn run_start(axes: &[CoordinateAxis], mut upper: usize, t1: AxisKind, t2: AxisKind) -> usize {
    while upper != 0 {
        let kind = axes[upper - 1].kind();
        if kind != t1 && kind != t2 {
            break;
        }
        upper -= 1;
    }
    upper
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::CoordinateAxis;

    fn axis(name: &str, kind: AxisKind) -> CoordinateAxis {
        CoordinateAxis::regular(name, kind, "", 0.0, 1.0, 4)
    }

    #[test]
    fn test_unknown_axis_aborts() {
        let axes = vec![
            axis("lat", AxisKind::Latitude),
            axis("lon", AxisKind::Longitude),
            axis("mystery", AxisKind::Unknown),
        ];
        assert_eq!(classify(&axes), Classification::Unclassifiable);
    }

    #[test]
    fn test_unknown_axis_aborts_even_after_groups_formed() {
        // The unknown axis is scanned last (it is slowest-varying), after a
        // geographic group has already been collected.
        let axes = vec![
            axis("mystery", AxisKind::Unknown),
            axis("lat", AxisKind::Latitude),
            axis("lon", AxisKind::Longitude),
        ];
        assert_eq!(classify(&axes), Classification::Unclassifiable);
    }

    #[test]
    fn test_lat_lon_run_forms_one_group() {
        let axes = vec![axis("lat", AxisKind::Latitude), axis("lon", AxisKind::Longitude)];
        let Classification::Grouped(groups) = classify(&axes) else {
            panic!("expected grouped result");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, GroupKind::Geographic);
        assert_eq!(groups[0].range, 0..2);
    }

    #[test]
    fn test_single_latitude_axis_still_geographic() {
        let axes = vec![axis("lat", AxisKind::Latitude)];
        let Classification::Grouped(groups) = classify(&axes) else {
            panic!("expected grouped result");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, GroupKind::Geographic);
        assert_eq!(groups[0].range, 0..1);
    }

    #[test]
    fn test_oversized_lat_lon_run_stays_contiguous() {
        // Unusual files may carry more than two angular axes; the whole run
        // still forms a single geographic group.
        let axes = vec![
            axis("lat0", AxisKind::Latitude),
            axis("lon0", AxisKind::Longitude),
            axis("lat1", AxisKind::Latitude),
        ];
        let Classification::Grouped(groups) = classify(&axes) else {
            panic!("expected grouped result");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].range, 0..3);
    }

    #[test]
    fn test_generic_xy_forms_projected_group() {
        let axes = vec![axis("y", AxisKind::GenericY), axis("x", AxisKind::GenericX)];
        let Classification::Grouped(groups) = classify(&axes) else {
            panic!("expected grouped result");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, GroupKind::Projected);
        assert_eq!(groups[0].range, 0..2);
    }

    #[test]
    fn test_full_stack_scan_order() {
        // time, height, lat, lon in file order: the scan visits lon first,
        // so the geographic group leads.
        let axes = vec![
            axis("time", AxisKind::Time),
            axis("height", AxisKind::Height),
            axis("lat", AxisKind::Latitude),
            axis("lon", AxisKind::Longitude),
        ];
        let Classification::Grouped(groups) = classify(&axes) else {
            panic!("expected grouped result");
        };
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].kind, GroupKind::Geographic);
        assert_eq!(groups[0].range, 2..4);
        assert_eq!(groups[1].kind, GroupKind::Vertical);
        assert_eq!(groups[1].range, 1..2);
        assert_eq!(groups[2].kind, GroupKind::Temporal);
        assert_eq!(groups[2].range, 0..1);
    }

    #[test]
    fn test_empty_axis_list() {
        assert_eq!(classify(&[]), Classification::Grouped(vec![]));
    }

    #[test]
    fn test_run_time_is_temporal() {
        let axes = vec![axis("reftime", AxisKind::RunTime)];
        let Classification::Grouped(groups) = classify(&axes) else {
            panic!("expected grouped result");
        };
        assert_eq!(groups[0].kind, GroupKind::Temporal);
    }
}
