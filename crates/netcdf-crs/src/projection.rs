//! Projection provider interface.
//!
//! Building a map-projection evaluator from a grid-mapping parameter set is
//! deliberately outside this crate: the [`ProjectionProvider`] trait is the
//! seam where a projection library plugs in. A projected CRS stores the
//! parameters found in the file and resolves them lazily on first use.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Named parameter set describing a map projection, as recorded in a
/// dataset's grid-mapping variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    name: String,
    parameters: Vec<(String, f64)>,
}

impl ProjectionParameters {
    /// Create an empty parameter set for the named grid mapping,
    /// e.g. `"lambert_conformal_conic"`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Add one numeric parameter.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.parameters.push((key.into(), value));
        self
    }

    /// The grid-mapping name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All parameters, in insertion order.
    pub fn parameters(&self) -> &[(String, f64)] {
        &self.parameters
    }

    /// Look up one parameter by attribute name.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.parameters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }
}

/// A resolved map-projection evaluator.
///
/// Both directions return `None` off the projection domain (a point behind
/// the horizon of a geostationary view, outside a cone's aperture, and so
/// on) rather than extrapolating.
pub trait Projection: Send + Sync {
    /// The projection name.
    fn name(&self) -> &str;

    /// Convert geographic coordinates (longitude, latitude in degrees) to
    /// projected (x, y).
    fn to_projected(&self, lon: f64, lat: f64) -> Option<(f64, f64)>;

    /// Convert projected (x, y) to geographic coordinates
    /// (longitude, latitude in degrees).
    fn to_geographic(&self, x: f64, y: f64) -> Option<(f64, f64)>;
}

/// Resolves grid-mapping parameter sets to projection evaluators.
pub trait ProjectionProvider: Send + Sync {
    /// Returns `None` when no evaluator is configured for this parameter
    /// set.
    fn resolve(&self, params: &ProjectionParameters) -> Option<Arc<dyn Projection>>;
}
