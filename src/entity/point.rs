use crate::math::Point3;
use crate::render::{braced, fmt_real};

use super::EntityMeta;

slotmap::new_key_type! {
    /// Unique identifier for a point in the mesh registry.
    pub struct PointId;
}

/// A geometric point.
///
/// Rendered as `Point(<tag>) = {x, y, z[, lc]};`.
#[derive(Debug, Clone)]
pub struct Point {
    position: Point3,
    mesh_size: Option<f64>,
    pub(crate) meta: EntityMeta,
}

impl Point {
    /// Creates a point at `position`.
    #[must_use]
    pub fn new(position: Point3) -> Self {
        Self {
            position,
            mesh_size: None,
            meta: EntityMeta::default(),
        }
    }

    /// Creates a point from its three coordinates.
    #[must_use]
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Creates a point in the `z = 0` plane.
    #[must_use]
    pub fn planar(x: f64, y: f64) -> Self {
        Self::xyz(x, y, 0.0)
    }

    /// Sets the characteristic mesh length prescribed at this point.
    #[must_use]
    pub fn with_mesh_size(mut self, size: f64) -> Self {
        self.mesh_size = Some(size);
        self
    }

    /// Returns the position of the point.
    #[must_use]
    pub fn position(&self) -> &Point3 {
        &self.position
    }

    /// Moves the point.
    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    /// Returns the characteristic mesh length, if one is set.
    #[must_use]
    pub fn mesh_size(&self) -> Option<f64> {
        self.mesh_size
    }

    /// Renders the coordinate list, e.g. `{0, 1.5, 0}`.
    #[must_use]
    pub fn body(&self) -> String {
        let p = &self.position;
        let coords = [p.x, p.y, p.z].into_iter().chain(self.mesh_size);
        braced(coords.map(fmt_real))
    }
}
