use crate::error::RegistryError;
use crate::render::braced;

use super::surface::SurfaceId;
use super::{tags_of, EntityMeta, EntityRef, Resolve};

slotmap::new_key_type! {
    /// Unique identifier for a surface loop in the mesh registry.
    pub struct SurfaceLoopId;
}

/// A closed set of surfaces bounding a volume.
#[derive(Debug, Clone)]
pub struct SurfaceLoop {
    surfaces: Vec<SurfaceId>,
    pub(crate) meta: EntityMeta,
}

impl SurfaceLoop {
    /// Creates a surface loop.
    #[must_use]
    pub fn new(surfaces: Vec<SurfaceId>) -> Self {
        Self {
            surfaces,
            meta: EntityMeta::default(),
        }
    }

    /// Returns the surfaces of the loop.
    #[must_use]
    pub fn surfaces(&self) -> &[SurfaceId] {
        &self.surfaces
    }

    /// Replaces the surfaces of the loop.
    pub fn set_surfaces(&mut self, surfaces: Vec<SurfaceId>) {
        self.surfaces = surfaces;
    }

    #[must_use]
    pub fn references(&self) -> Vec<EntityRef> {
        self.surfaces.iter().map(|&s| s.into()).collect()
    }

    pub(crate) fn check(&self) -> Result<(), &'static str> {
        if self.surfaces.is_empty() {
            Err("a surface loop needs at least one surface")
        } else {
            Ok(())
        }
    }

    /// Renders the reference list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if a surface is not registered
    /// with `resolver`.
    pub fn body<R: Resolve + ?Sized>(&self, resolver: &R) -> Result<String, RegistryError> {
        Ok(braced(tags_of(resolver, self.surfaces.iter().copied())?))
    }
}
