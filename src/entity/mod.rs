pub mod curve;
pub mod curve_loop;
pub mod group;
pub mod point;
pub mod surface;
pub mod surface_loop;
pub mod volume;

pub use curve::{Curve, CurveId, CurveKind};
pub use curve_loop::{orient, CurveLoop, CurveLoopId, LoopCurves};
pub use group::{GroupId, MemberKind, PhysicalGroup};
pub use point::{Point, PointId};
pub use surface::{Surface, SurfaceId, SurfaceKind};
pub use surface_loop::{SurfaceLoop, SurfaceLoopId};
pub use volume::{Volume, VolumeId, VolumeKind};

use std::fmt;

use crate::error::RegistryError;
use crate::field::{Field, FieldId};

/// A gmsh entity number. Positive and unique within its [`Category`].
pub type Tag = u32;

/// The independent numbering spaces of a `.geo` script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Point,
    Curve,
    CurveLoop,
    Surface,
    SurfaceLoop,
    Volume,
    PhysicalGroup,
    Field,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Point => "point",
            Self::Curve => "curve",
            Self::CurveLoop => "curve loop",
            Self::Surface => "surface",
            Self::SurfaceLoop => "surface loop",
            Self::Volume => "volume",
            Self::PhysicalGroup => "physical group",
            Self::Field => "field",
        })
    }
}

/// Numbering metadata shared by every geometric entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityMeta {
    /// Tag requested by the caller; `None` lets the mesh number the entity.
    pub tag: Option<Tag>,
    /// Physical group the entity joins when it is registered.
    pub group: Option<GroupId>,
}

macro_rules! impl_entity_meta {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Requests an explicit tag instead of automatic numbering.
                #[must_use]
                pub fn with_tag(mut self, tag: $crate::entity::Tag) -> Self {
                    self.meta.tag = Some(tag);
                    self
                }

                /// Adds the entity to `group` when it is registered.
                #[must_use]
                pub fn in_group(mut self, group: $crate::entity::GroupId) -> Self {
                    self.meta.group = Some(group);
                    self
                }

                /// Returns the requested tag, if any.
                #[must_use]
                pub fn tag(&self) -> Option<$crate::entity::Tag> {
                    self.meta.tag
                }

                /// Returns the physical group this entity joins on registration.
                #[must_use]
                pub fn group(&self) -> Option<$crate::entity::GroupId> {
                    self.meta.group
                }
            }
        )*
    };
}

impl_entity_meta!(Point, Curve, CurveLoop, Surface, SurfaceLoop, Volume);

/// A handle to any registered geometric entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Point(PointId),
    Curve(CurveId),
    CurveLoop(CurveLoopId),
    Surface(SurfaceId),
    SurfaceLoop(SurfaceLoopId),
    Volume(VolumeId),
}

impl EntityRef {
    /// Returns the numbering category of the referenced entity.
    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Self::Point(_) => Category::Point,
            Self::Curve(_) => Category::Curve,
            Self::CurveLoop(_) => Category::CurveLoop,
            Self::Surface(_) => Category::Surface,
            Self::SurfaceLoop(_) => Category::SurfaceLoop,
            Self::Volume(_) => Category::Volume,
        }
    }
}

impl From<PointId> for EntityRef {
    fn from(id: PointId) -> Self {
        Self::Point(id)
    }
}

impl From<CurveId> for EntityRef {
    fn from(id: CurveId) -> Self {
        Self::Curve(id)
    }
}

impl From<CurveLoopId> for EntityRef {
    fn from(id: CurveLoopId) -> Self {
        Self::CurveLoop(id)
    }
}

impl From<SurfaceId> for EntityRef {
    fn from(id: SurfaceId) -> Self {
        Self::Surface(id)
    }
}

impl From<SurfaceLoopId> for EntityRef {
    fn from(id: SurfaceLoopId) -> Self {
        Self::SurfaceLoop(id)
    }
}

impl From<VolumeId> for EntityRef {
    fn from(id: VolumeId) -> Self {
        Self::Volume(id)
    }
}

/// Any value the mesh registry accepts.
#[derive(Debug, Clone)]
pub enum Entity {
    Point(Point),
    Curve(Curve),
    CurveLoop(CurveLoop),
    Surface(Surface),
    SurfaceLoop(SurfaceLoop),
    Volume(Volume),
    PhysicalGroup(PhysicalGroup),
    Field(Field),
}

impl Entity {
    /// Returns the numbering category of this entity.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Point(_) => Category::Point,
            Self::Curve(_) => Category::Curve,
            Self::CurveLoop(_) => Category::CurveLoop,
            Self::Surface(_) => Category::Surface,
            Self::SurfaceLoop(_) => Category::SurfaceLoop,
            Self::Volume(_) => Category::Volume,
            Self::PhysicalGroup(_) => Category::PhysicalGroup,
            Self::Field(_) => Category::Field,
        }
    }
}

impl From<Point> for Entity {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<Curve> for Entity {
    fn from(value: Curve) -> Self {
        Self::Curve(value)
    }
}

impl From<CurveLoop> for Entity {
    fn from(value: CurveLoop) -> Self {
        Self::CurveLoop(value)
    }
}

impl From<Surface> for Entity {
    fn from(value: Surface) -> Self {
        Self::Surface(value)
    }
}

impl From<SurfaceLoop> for Entity {
    fn from(value: SurfaceLoop) -> Self {
        Self::SurfaceLoop(value)
    }
}

impl From<Volume> for Entity {
    fn from(value: Volume) -> Self {
        Self::Volume(value)
    }
}

impl From<PhysicalGroup> for Entity {
    fn from(value: PhysicalGroup) -> Self {
        Self::PhysicalGroup(value)
    }
}

impl From<Field> for Entity {
    fn from(value: Field) -> Self {
        Self::Field(value)
    }
}

/// Handle returned when an [`Entity`] is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityHandle {
    Geometry(EntityRef),
    PhysicalGroup(GroupId),
    Field(FieldId),
}

/// Resolves handles into the tags they were numbered with.
///
/// Implemented by [`crate::mesh::Mesh`]; entities use it to render their
/// reference lists.
pub trait Resolve {
    /// Returns the tag of a registered geometric entity.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    fn tag_of(&self, entity: EntityRef) -> Result<Tag, RegistryError>;

    /// Returns the tag of a registered field.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    fn field_tag(&self, field: FieldId) -> Result<Tag, RegistryError>;

    /// Returns a registered curve.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    fn curve(&self, id: CurveId) -> Result<&Curve, RegistryError>;
}

/// Resolves `ids` into tags, in order.
pub(crate) fn tags_of<R, I>(resolver: &R, ids: I) -> Result<Vec<Tag>, RegistryError>
where
    R: Resolve + ?Sized,
    I: IntoIterator,
    I::Item: Into<EntityRef>,
{
    ids.into_iter()
        .map(|id| resolver.tag_of(id.into()))
        .collect()
}
