//! CRS construction from classified axis groups.

use crate::axis::{CoordinateAxis, CoordinateSystemSpec};
use crate::classify::{classify, AxisGroup, Classification, GroupKind};
use crate::complete::AxisCompleter;
use crate::crs::{
    CompoundCrs, GeographicCrs, GridCrs, NetcdfCrs, ProjectedCrs, TemporalCrs, VerticalCrs,
};
use crate::datum::{SphericalDatum, SPHERE};
use crate::error::CrsResult;
use crate::projection::ProjectionProvider;
use crate::transform::{MatrixTransformFactory, TransformFactory};
use std::sync::Arc;
use tracing::warn;

/// Builds [`NetcdfCrs`] values from decoded coordinate systems.
///
/// The builder owns the injected collaborators: the geodetic datum, an
/// optional calendar completer for time axes, an optional projection
/// provider, and the transform factory. All are plain values or trait
/// objects; nothing is looked up through global state.
pub struct CrsBuilder {
    datum: SphericalDatum,
    completer: Option<Arc<dyn AxisCompleter>>,
    provider: Option<Arc<dyn ProjectionProvider>>,
    factory: Arc<dyn TransformFactory>,
}

impl Default for CrsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CrsBuilder {
    /// A builder with the default sphere, no collaborators, and the
    /// matrix-backed transform factory.
    pub fn new() -> Self {
        Self {
            datum: SPHERE,
            completer: None,
            provider: None,
            factory: Arc::new(MatrixTransformFactory),
        }
    }

    /// Substitute the geodetic datum used for geographic and projected
    /// components.
    pub fn with_datum(mut self, datum: SphericalDatum) -> Self {
        self.datum = datum;
        self
    }

    /// Install a calendar completer for time axes.
    pub fn with_completer(mut self, completer: Arc<dyn AxisCompleter>) -> Self {
        self.completer = Some(completer);
        self
    }

    /// Install a projection provider for projected components.
    pub fn with_projection_provider(mut self, provider: Arc<dyn ProjectionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Substitute the transform factory.
    pub fn with_transform_factory(mut self, factory: Arc<dyn TransformFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Build a CRS from one decoded coordinate system.
    ///
    /// Classification splits the axes into geographic, vertical, temporal
    /// and projected groups. A single group becomes that component
    /// directly; several groups are wrapped in a compound CRS; an
    /// unclassifiable layout falls back to a whole-system wrapper.
    ///
    /// # Errors
    ///
    /// [`crate::CrsError::InvalidTimeUnit`] when a temporal axis carries a
    /// unit string that does not parse as a date-unit expression. No other
    /// condition fails construction.
    pub fn build(&self, system: &CoordinateSystemSpec) -> CrsResult<NetcdfCrs> {
        let groups = match classify(system.axes()) {
            Classification::Grouped(groups) => groups,
            Classification::Unclassifiable => return Ok(self.build_fallback(system)),
        };
        let mut components = Vec::with_capacity(groups.len());
        for group in &groups {
            components.push(self.build_component(system, group)?);
        }
        match components.len() {
            // An empty axis list produces no groups; treat it like an
            // unclassifiable layout.
            0 => Ok(self.build_fallback(system)),
            1 => Ok(components.remove(0)),
            _ => Ok(NetcdfCrs::Compound(CompoundCrs::new(
                system.name(),
                components,
                self.factory.clone(),
            ))),
        }
    }

    fn build_component(
        &self,
        system: &CoordinateSystemSpec,
        group: &AxisGroup,
    ) -> CrsResult<NetcdfCrs> {
        let axes = &system.axes()[group.range.clone()];
        match group.kind {
            GroupKind::Geographic => Ok(NetcdfCrs::Geographic(GeographicCrs::new(
                system.name(),
                axes,
                self.datum,
                self.factory.clone(),
            ))),
            GroupKind::Projected => Ok(NetcdfCrs::Projected(ProjectedCrs::new(
                system.name(),
                axes,
                self.datum,
                system.projection().cloned(),
                self.provider.clone(),
                self.factory.clone(),
            ))),
            GroupKind::Vertical => Ok(NetcdfCrs::Vertical(VerticalCrs::new(
                system.name(),
                &axes[0],
                self.factory.clone(),
            ))),
            GroupKind::Temporal => {
                let axis = self.complete_time_axis(&axes[0]);
                Ok(NetcdfCrs::Temporal(TemporalCrs::new(
                    system.name(),
                    axis,
                    self.factory.clone(),
                )?))
            }
        }
    }

    /// Offer a time axis to the completer for a calendar upgrade. Failure
    /// is recovered locally: the anomaly is logged and the original axis
    /// retained.
    fn complete_time_axis(&self, axis: &CoordinateAxis) -> CoordinateAxis {
        let Some(completer) = &self.completer else {
            return axis.clone();
        };
        match completer.complete(axis) {
            Ok(upgraded) => upgraded,
            Err(error) => {
                warn!(
                    axis = axis.name(),
                    error = %error,
                    "time axis completion failed, keeping the original axis"
                );
                axis.clone()
            }
        }
    }

    /// Whole-system handling for layouts the classifier refused to split.
    /// The resulting CRS may not be valid in the ISO 19111 sense, but it
    /// preserves dimension and axis access.
    fn build_fallback(&self, system: &CoordinateSystemSpec) -> NetcdfCrs {
        if system.is_lat_lon() {
            NetcdfCrs::Geographic(GeographicCrs::new(
                system.name(),
                system.axes(),
                self.datum,
                self.factory.clone(),
            ))
        } else if system.is_generic_xy() {
            NetcdfCrs::Projected(ProjectedCrs::new(
                system.name(),
                system.axes(),
                self.datum,
                system.projection().cloned(),
                self.provider.clone(),
                self.factory.clone(),
            ))
        } else {
            NetcdfCrs::Grid(GridCrs::new(
                system.name(),
                system.axes(),
                self.factory.clone(),
            ))
        }
    }
}
