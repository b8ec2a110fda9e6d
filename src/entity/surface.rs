use crate::error::RegistryError;
use crate::render::braced;

use super::curve_loop::CurveLoopId;
use super::point::PointId;
use super::{tags_of, EntityMeta, EntityRef, Resolve};

slotmap::new_key_type! {
    /// Unique identifier for a surface in the mesh registry.
    pub struct SurfaceId;
}

/// The kind of a surface and the entities it is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceKind {
    /// A planar surface; the first loop is the outer boundary, the others holes.
    Plane(Vec<CurveLoopId>),
    /// A ruled surface, optionally constrained to a sphere around `sphere`.
    Ruled {
        loops: Vec<CurveLoopId>,
        sphere: Option<PointId>,
    },
    /// Several surfaces meshed as one.
    Compound(Vec<SurfaceId>),
}

/// A two-dimensional entity.
#[derive(Debug, Clone)]
pub struct Surface {
    kind: SurfaceKind,
    pub(crate) meta: EntityMeta,
}

impl Surface {
    /// Creates a surface of the given kind.
    #[must_use]
    pub fn new(kind: SurfaceKind) -> Self {
        Self {
            kind,
            meta: EntityMeta::default(),
        }
    }

    /// Creates a plane surface bounded by `loops`.
    #[must_use]
    pub fn plane(loops: Vec<CurveLoopId>) -> Self {
        Self::new(SurfaceKind::Plane(loops))
    }

    /// Creates a ruled surface bounded by `loops`.
    #[must_use]
    pub fn ruled(loops: Vec<CurveLoopId>) -> Self {
        Self::new(SurfaceKind::Ruled {
            loops,
            sphere: None,
        })
    }

    /// Creates a ruled surface lying on the sphere centred at `center`.
    #[must_use]
    pub fn ruled_in_sphere(loops: Vec<CurveLoopId>, center: PointId) -> Self {
        Self::new(SurfaceKind::Ruled {
            loops,
            sphere: Some(center),
        })
    }

    /// Creates a compound surface.
    #[must_use]
    pub fn compound(surfaces: Vec<SurfaceId>) -> Self {
        Self::new(SurfaceKind::Compound(surfaces))
    }

    /// Returns the surface's kind.
    #[must_use]
    pub fn kind(&self) -> &SurfaceKind {
        &self.kind
    }

    /// Replaces the surface's kind.
    pub fn set_kind(&mut self, kind: SurfaceKind) {
        self.kind = kind;
    }

    /// Returns the `.geo` keyword for this surface.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self.kind {
            SurfaceKind::Plane(_) => "Plane Surface",
            SurfaceKind::Ruled { .. } => "Ruled Surface",
            SurfaceKind::Compound(_) => "Compound Surface",
        }
    }

    /// Returns every entity this surface references.
    #[must_use]
    pub fn references(&self) -> Vec<EntityRef> {
        match &self.kind {
            SurfaceKind::Plane(loops) => loops.iter().map(|&l| l.into()).collect(),
            SurfaceKind::Ruled { loops, sphere } => loops
                .iter()
                .map(|&l| l.into())
                .chain(sphere.map(EntityRef::Point))
                .collect(),
            SurfaceKind::Compound(surfaces) => surfaces.iter().map(|&s| s.into()).collect(),
        }
    }

    pub(crate) fn check(&self) -> Result<(), &'static str> {
        let empty = match &self.kind {
            SurfaceKind::Plane(loops) | SurfaceKind::Ruled { loops, .. } => loops.is_empty(),
            SurfaceKind::Compound(surfaces) => surfaces.is_empty(),
        };
        if empty {
            Err("a surface needs at least one boundary")
        } else {
            Ok(())
        }
    }

    /// Renders the reference list, e.g. `{1, 2}` or `{1} In Sphere {5}`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if a referenced entity is not
    /// registered with `resolver`.
    pub fn body<R: Resolve + ?Sized>(&self, resolver: &R) -> Result<String, RegistryError> {
        match &self.kind {
            SurfaceKind::Plane(loops) => Ok(braced(tags_of(resolver, loops.iter().copied())?)),
            SurfaceKind::Ruled { loops, sphere } => {
                let mut body = braced(tags_of(resolver, loops.iter().copied())?);
                if let Some(center) = sphere {
                    let tag = resolver.tag_of((*center).into())?;
                    body.push_str(&format!(" In Sphere {{{tag}}}"));
                }
                Ok(body)
            }
            SurfaceKind::Compound(surfaces) => {
                Ok(braced(tags_of(resolver, surfaces.iter().copied())?))
            }
        }
    }
}
