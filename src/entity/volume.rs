use crate::error::RegistryError;
use crate::render::braced;

use super::surface_loop::SurfaceLoopId;
use super::{tags_of, EntityMeta, EntityRef, Resolve};

slotmap::new_key_type! {
    /// Unique identifier for a volume in the mesh registry.
    pub struct VolumeId;
}

/// The kind of a volume and the entities it is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeKind {
    /// A volume bounded by surface loops; the first is the outer shell,
    /// the others voids.
    Loops(Vec<SurfaceLoopId>),
    /// Several volumes meshed as one.
    Compound(Vec<VolumeId>),
}

/// A three-dimensional entity.
#[derive(Debug, Clone)]
pub struct Volume {
    kind: VolumeKind,
    pub(crate) meta: EntityMeta,
}

impl Volume {
    /// Creates a volume bounded by `loops`.
    #[must_use]
    pub fn new(loops: Vec<SurfaceLoopId>) -> Self {
        Self {
            kind: VolumeKind::Loops(loops),
            meta: EntityMeta::default(),
        }
    }

    /// Creates a compound volume.
    #[must_use]
    pub fn compound(volumes: Vec<VolumeId>) -> Self {
        Self {
            kind: VolumeKind::Compound(volumes),
            meta: EntityMeta::default(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &VolumeKind {
        &self.kind
    }

    pub fn set_kind(&mut self, kind: VolumeKind) {
        self.kind = kind;
    }

    /// Returns the `.geo` keyword for this volume.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self.kind {
            VolumeKind::Loops(_) => "Volume",
            VolumeKind::Compound(_) => "Compound Volume",
        }
    }

    #[must_use]
    pub fn references(&self) -> Vec<EntityRef> {
        match &self.kind {
            VolumeKind::Loops(loops) => loops.iter().map(|&l| l.into()).collect(),
            VolumeKind::Compound(volumes) => volumes.iter().map(|&v| v.into()).collect(),
        }
    }

    pub(crate) fn check(&self) -> Result<(), &'static str> {
        let empty = match &self.kind {
            VolumeKind::Loops(loops) => loops.is_empty(),
            VolumeKind::Compound(volumes) => volumes.is_empty(),
        };
        if empty {
            Err("a volume needs at least one boundary")
        } else {
            Ok(())
        }
    }

    /// Renders the reference list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if a referenced entity is not
    /// registered with `resolver`.
    pub fn body<R: Resolve + ?Sized>(&self, resolver: &R) -> Result<String, RegistryError> {
        Ok(braced(tags_of(resolver, self.references())?))
    }
}
