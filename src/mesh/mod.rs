mod table;

pub use table::Entry;

use std::path::Path;

use tracing::debug;

use crate::entity::{
    Category, Curve, CurveId, CurveLoop, CurveLoopId, Entity, EntityHandle, EntityMeta,
    EntityRef, GroupId, PhysicalGroup, Point, PointId, Resolve, Surface, SurfaceId,
    SurfaceLoop, SurfaceLoopId, Tag, Volume, VolumeId,
};
use crate::error::{RegistryError, Result};
use crate::field::{Field, FieldId};
use crate::io::GeoWriter;
use crate::options::Options;

use table::Table;

/// The registry owning every entity of a `.geo` script.
///
/// Each category has its own numbering space. Entities are numbered when
/// they are inserted, either with the tag they request or with one more
/// than the number of automatically numbered entities of their category.
/// Insertion order is kept and is the order of the generated script.
#[derive(Debug)]
pub struct Mesh {
    points: Table<PointId, Point>,
    curves: Table<CurveId, Curve>,
    curve_loops: Table<CurveLoopId, CurveLoop>,
    surfaces: Table<SurfaceId, Surface>,
    surface_loops: Table<SurfaceLoopId, SurfaceLoop>,
    volumes: Table<VolumeId, Volume>,
    groups: Table<GroupId, PhysicalGroup>,
    fields: Table<FieldId, Field>,
    options: Options,
    background_field: Option<FieldId>,
    boundary_layer_field: Option<FieldId>,
    coherence: bool,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Table::new(Category::Point),
            curves: Table::new(Category::Curve),
            curve_loops: Table::new(Category::CurveLoop),
            surfaces: Table::new(Category::Surface),
            surface_loops: Table::new(Category::SurfaceLoop),
            volumes: Table::new(Category::Volume),
            groups: Table::new(Category::PhysicalGroup),
            fields: Table::new(Category::Field),
            options: Options::default(),
            background_field: None,
            boundary_layer_field: None,
            coherence: false,
        }
    }

    /// Checks everything that can fail before a geometric entity is stored.
    fn admit(
        &self,
        category: Category,
        meta: EntityMeta,
        shape: std::result::Result<(), &'static str>,
        references: &[EntityRef],
    ) -> std::result::Result<(), RegistryError> {
        shape.map_err(|reason| RegistryError::InvalidEntity { category, reason })?;
        for &reference in references {
            self.tag_of(reference)?;
        }
        if let Some(group) = meta.group {
            self.groups.get(group)?;
        }
        Ok(())
    }

    /// Adds a freshly numbered entity to the group it asked for.
    fn join_group(&mut self, meta: EntityMeta, entity: EntityRef) -> Result<()> {
        if let Some(group) = meta.group {
            self.groups.get_mut(group)?.item.add_entity(entity)?;
        }
        Ok(())
    }

    // --- Point operations ---

    /// Numbers and inserts a point.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTag`] if the tag is taken, or a
    /// registry error if the requested group is not registered.
    pub fn add_point(&mut self, point: Point) -> Result<PointId> {
        let meta = point.meta;
        self.admit(Category::Point, meta, Ok(()), &[])?;
        let (id, tag) = self.points.insert(meta.tag, point)?;
        self.join_group(meta, id.into())?;
        debug!(category = %Category::Point, tag, "registered entity");
        Ok(id)
    }

    /// Returns a registered point.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn point(&self, id: PointId) -> Result<&Point> {
        Ok(&self.points.get(id)?.item)
    }

    /// Returns a mutable reference to a registered point.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn point_mut(&mut self, id: PointId) -> Result<&mut Point> {
        Ok(&mut self.points.get_mut(id)?.item)
    }

    /// Iterates over points as `(handle, tag, point)` in insertion order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, Tag, &Point)> {
        self.points.iter().map(|(id, e)| (id, e.tag, &e.item))
    }

    /// Returns the point numbered `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] if no point has that tag.
    pub fn point_from_tag(&self, tag: Tag) -> Result<PointId> {
        Ok(self.points.find(tag)?)
    }

    /// Resolves point tags into handles, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] for the first unknown tag.
    pub fn points_from_tags<I: IntoIterator<Item = Tag>>(&self, tags: I) -> Result<Vec<PointId>> {
        Ok(self.points.find_all(tags)?)
    }

    // --- Curve operations ---

    /// Numbers and inserts a curve.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidEntity`] for a degenerate curve,
    /// [`RegistryError::NotFound`] if a referenced point or curve is not
    /// registered, and [`RegistryError::DuplicateTag`] if the tag is taken.
    pub fn add_curve(&mut self, curve: Curve) -> Result<CurveId> {
        let meta = curve.meta;
        self.admit(Category::Curve, meta, curve.check(), &curve.references())?;
        let (id, tag) = self.curves.insert(meta.tag, curve)?;
        self.join_group(meta, id.into())?;
        debug!(category = %Category::Curve, tag, "registered entity");
        Ok(id)
    }

    /// Returns a registered curve.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn curve(&self, id: CurveId) -> Result<&Curve> {
        Ok(&self.curves.get(id)?.item)
    }

    /// Iterates over curves as `(handle, tag, curve)` in insertion order.
    pub fn curves(&self) -> impl Iterator<Item = (CurveId, Tag, &Curve)> {
        self.curves.iter().map(|(id, e)| (id, e.tag, &e.item))
    }

    /// Returns the curve numbered `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] if no curve has that tag.
    pub fn curve_from_tag(&self, tag: Tag) -> Result<CurveId> {
        Ok(self.curves.find(tag)?)
    }

    /// Resolves curve tags into handles, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] for the first unknown tag.
    pub fn curves_from_tags<I: IntoIterator<Item = Tag>>(&self, tags: I) -> Result<Vec<CurveId>> {
        Ok(self.curves.find_all(tags)?)
    }

    // --- Curve loop operations ---

    /// Numbers and inserts a curve loop.
    ///
    /// Orientation is not checked here; it is inferred when the script is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidEntity`] for an empty loop,
    /// [`RegistryError::NotFound`] if a curve is not registered, and
    /// [`RegistryError::DuplicateTag`] if the tag is taken.
    pub fn add_curve_loop(&mut self, curve_loop: CurveLoop) -> Result<CurveLoopId> {
        let meta = curve_loop.meta;
        self.admit(
            Category::CurveLoop,
            meta,
            curve_loop.check(),
            &curve_loop.references(),
        )?;
        let (id, tag) = self.curve_loops.insert(meta.tag, curve_loop)?;
        self.join_group(meta, id.into())?;
        debug!(category = %Category::CurveLoop, tag, "registered entity");
        Ok(id)
    }

    /// Returns a registered curve loop.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn curve_loop(&self, id: CurveLoopId) -> Result<&CurveLoop> {
        Ok(&self.curve_loops.get(id)?.item)
    }

    /// Iterates over curve loops in insertion order.
    pub fn curve_loops(&self) -> impl Iterator<Item = (CurveLoopId, Tag, &CurveLoop)> {
        self.curve_loops.iter().map(|(id, e)| (id, e.tag, &e.item))
    }

    /// Returns the curve loop numbered `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] if no curve loop has that tag.
    pub fn curve_loop_from_tag(&self, tag: Tag) -> Result<CurveLoopId> {
        Ok(self.curve_loops.find(tag)?)
    }

    /// Resolves curve loop tags into handles, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] for the first unknown tag.
    pub fn curve_loops_from_tags<I: IntoIterator<Item = Tag>>(
        &self,
        tags: I,
    ) -> Result<Vec<CurveLoopId>> {
        Ok(self.curve_loops.find_all(tags)?)
    }

    // --- Surface operations ---

    /// Numbers and inserts a surface.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidEntity`] for a surface without
    /// boundary, [`RegistryError::NotFound`] for unregistered references,
    /// and [`RegistryError::DuplicateTag`] if the tag is taken.
    pub fn add_surface(&mut self, surface: Surface) -> Result<SurfaceId> {
        let meta = surface.meta;
        self.admit(
            Category::Surface,
            meta,
            surface.check(),
            &surface.references(),
        )?;
        let (id, tag) = self.surfaces.insert(meta.tag, surface)?;
        self.join_group(meta, id.into())?;
        debug!(category = %Category::Surface, tag, "registered entity");
        Ok(id)
    }

    /// Returns a registered surface.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn surface(&self, id: SurfaceId) -> Result<&Surface> {
        Ok(&self.surfaces.get(id)?.item)
    }

    /// Iterates over surfaces in insertion order.
    pub fn surfaces(&self) -> impl Iterator<Item = (SurfaceId, Tag, &Surface)> {
        self.surfaces.iter().map(|(id, e)| (id, e.tag, &e.item))
    }

    /// Returns the surface numbered `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] if no surface has that tag.
    pub fn surface_from_tag(&self, tag: Tag) -> Result<SurfaceId> {
        Ok(self.surfaces.find(tag)?)
    }

    /// Resolves surface tags into handles, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] for the first unknown tag.
    pub fn surfaces_from_tags<I: IntoIterator<Item = Tag>>(
        &self,
        tags: I,
    ) -> Result<Vec<SurfaceId>> {
        Ok(self.surfaces.find_all(tags)?)
    }

    // --- Surface loop operations ---

    /// Numbers and inserts a surface loop.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidEntity`] for an empty loop,
    /// [`RegistryError::NotFound`] if a surface is not registered, and
    /// [`RegistryError::DuplicateTag`] if the tag is taken.
    pub fn add_surface_loop(&mut self, surface_loop: SurfaceLoop) -> Result<SurfaceLoopId> {
        let meta = surface_loop.meta;
        self.admit(
            Category::SurfaceLoop,
            meta,
            surface_loop.check(),
            &surface_loop.references(),
        )?;
        let (id, tag) = self.surface_loops.insert(meta.tag, surface_loop)?;
        self.join_group(meta, id.into())?;
        debug!(category = %Category::SurfaceLoop, tag, "registered entity");
        Ok(id)
    }

    /// Returns a registered surface loop.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn surface_loop(&self, id: SurfaceLoopId) -> Result<&SurfaceLoop> {
        Ok(&self.surface_loops.get(id)?.item)
    }

    /// Iterates over surface loops in insertion order.
    pub fn surface_loops(&self) -> impl Iterator<Item = (SurfaceLoopId, Tag, &SurfaceLoop)> {
        self.surface_loops.iter().map(|(id, e)| (id, e.tag, &e.item))
    }

    /// Returns the surface loop numbered `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] if no surface loop has that tag.
    pub fn surface_loop_from_tag(&self, tag: Tag) -> Result<SurfaceLoopId> {
        Ok(self.surface_loops.find(tag)?)
    }

    /// Resolves surface loop tags into handles, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] for the first unknown tag.
    pub fn surface_loops_from_tags<I: IntoIterator<Item = Tag>>(
        &self,
        tags: I,
    ) -> Result<Vec<SurfaceLoopId>> {
        Ok(self.surface_loops.find_all(tags)?)
    }

    // --- Volume operations ---

    /// Numbers and inserts a volume.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidEntity`] for a volume without
    /// boundary, [`RegistryError::NotFound`] for unregistered references,
    /// and [`RegistryError::DuplicateTag`] if the tag is taken.
    pub fn add_volume(&mut self, volume: Volume) -> Result<VolumeId> {
        let meta = volume.meta;
        self.admit(Category::Volume, meta, volume.check(), &volume.references())?;
        let (id, tag) = self.volumes.insert(meta.tag, volume)?;
        self.join_group(meta, id.into())?;
        debug!(category = %Category::Volume, tag, "registered entity");
        Ok(id)
    }

    /// Returns a registered volume.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn volume(&self, id: VolumeId) -> Result<&Volume> {
        Ok(&self.volumes.get(id)?.item)
    }

    /// Iterates over volumes in insertion order.
    pub fn volumes(&self) -> impl Iterator<Item = (VolumeId, Tag, &Volume)> {
        self.volumes.iter().map(|(id, e)| (id, e.tag, &e.item))
    }

    /// Returns the volume numbered `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] if no volume has that tag.
    pub fn volume_from_tag(&self, tag: Tag) -> Result<VolumeId> {
        Ok(self.volumes.find(tag)?)
    }

    /// Resolves volume tags into handles, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] for the first unknown tag.
    pub fn volumes_from_tags<I: IntoIterator<Item = Tag>>(&self, tags: I) -> Result<Vec<VolumeId>> {
        Ok(self.volumes.find_all(tags)?)
    }

    // --- Physical group operations ---

    /// Numbers and inserts a physical group.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTag`] if the tag is taken, or
    /// [`RegistryError::NotFound`] if the group already lists entities that
    /// are not registered here.
    pub fn add_group(&mut self, group: PhysicalGroup) -> Result<GroupId> {
        for (_, members) in group.buckets() {
            for member in members {
                self.tag_of(member)?;
            }
        }
        let (id, tag) = self.groups.insert(group.tag(), group)?;
        debug!(category = %Category::PhysicalGroup, tag, "registered entity");
        Ok(id)
    }

    /// Adds a registered entity to a registered group.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if either is not registered and
    /// [`crate::error::GroupError::DuplicateMember`] if the entity is
    /// already a member.
    pub fn add_to_group(&mut self, group: GroupId, entity: impl Into<EntityRef>) -> Result<()> {
        let entity = entity.into();
        self.tag_of(entity)?;
        self.groups.get_mut(group)?.item.add_entity(entity)?;
        Ok(())
    }

    /// Returns a registered physical group.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn group(&self, id: GroupId) -> Result<&PhysicalGroup> {
        Ok(&self.groups.get(id)?.item)
    }

    /// Returns the tag of a registered physical group.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn group_tag(&self, id: GroupId) -> Result<Tag> {
        Ok(self.groups.tag(id)?)
    }

    /// Iterates over physical groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, Tag, &PhysicalGroup)> {
        self.groups.iter().map(|(id, e)| (id, e.tag, &e.item))
    }

    /// Returns the physical group numbered `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] if no group has that tag.
    pub fn group_from_tag(&self, tag: Tag) -> Result<GroupId> {
        Ok(self.groups.find(tag)?)
    }

    /// Resolves physical group tags into handles, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] for the first unknown tag.
    pub fn groups_from_tags<I: IntoIterator<Item = Tag>>(&self, tags: I) -> Result<Vec<GroupId>> {
        Ok(self.groups.find_all(tags)?)
    }

    // --- Field operations ---

    /// Numbers and inserts a field.
    ///
    /// References held by the field's attributes are resolved when the
    /// script is written.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTag`] if the tag is taken.
    pub fn add_field(&mut self, field: Field) -> Result<FieldId> {
        let name = field.name();
        let (id, tag) = self.fields.insert(field.tag(), field)?;
        debug!(category = %Category::Field, tag, name, "registered entity");
        Ok(id)
    }

    /// Returns a registered field.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn field(&self, id: FieldId) -> Result<&Field> {
        Ok(&self.fields.get(id)?.item)
    }

    /// Returns a mutable reference to a registered field.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the handle is not registered.
    pub fn field_mut(&mut self, id: FieldId) -> Result<&mut Field> {
        Ok(&mut self.fields.get_mut(id)?.item)
    }

    /// Iterates over fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, Tag, &Field)> {
        self.fields.iter().map(|(id, e)| (id, e.tag, &e.item))
    }

    /// Returns the field numbered `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] if no field has that tag.
    pub fn field_from_tag(&self, tag: Tag) -> Result<FieldId> {
        Ok(self.fields.find(tag)?)
    }

    /// Resolves field tags into handles, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TagNotFound`] for the first unknown tag.
    pub fn fields_from_tags<I: IntoIterator<Item = Tag>>(&self, tags: I) -> Result<Vec<FieldId>> {
        Ok(self.fields.find_all(tags)?)
    }

    /// Makes a registered field the background mesh-size field.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the field is not registered.
    pub fn set_background_field(&mut self, field: FieldId) -> Result<()> {
        self.fields.get(field)?;
        self.background_field = Some(field);
        Ok(())
    }

    /// Registers `field` and makes it the background mesh-size field.
    ///
    /// # Errors
    ///
    /// See [`Mesh::add_field`].
    pub fn add_background_field(&mut self, field: Field) -> Result<FieldId> {
        let id = self.add_field(field)?;
        self.background_field = Some(id);
        Ok(id)
    }

    #[must_use]
    pub fn background_field(&self) -> Option<FieldId> {
        self.background_field
    }

    /// Makes a registered field the boundary-layer field.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the field is not registered.
    pub fn set_boundary_layer_field(&mut self, field: FieldId) -> Result<()> {
        self.fields.get(field)?;
        self.boundary_layer_field = Some(field);
        Ok(())
    }

    #[must_use]
    pub fn boundary_layer_field(&self) -> Option<FieldId> {
        self.boundary_layer_field
    }

    // --- Generic operations ---

    /// Inserts any entity, dispatching on its category.
    ///
    /// # Errors
    ///
    /// Returns the error of the category-specific insertion.
    pub fn add_entity(&mut self, entity: impl Into<Entity>) -> Result<EntityHandle> {
        Ok(match entity.into() {
            Entity::Point(p) => EntityHandle::Geometry(self.add_point(p)?.into()),
            Entity::Curve(c) => EntityHandle::Geometry(self.add_curve(c)?.into()),
            Entity::CurveLoop(l) => EntityHandle::Geometry(self.add_curve_loop(l)?.into()),
            Entity::Surface(s) => EntityHandle::Geometry(self.add_surface(s)?.into()),
            Entity::SurfaceLoop(l) => EntityHandle::Geometry(self.add_surface_loop(l)?.into()),
            Entity::Volume(v) => EntityHandle::Geometry(self.add_volume(v)?.into()),
            Entity::PhysicalGroup(g) => EntityHandle::PhysicalGroup(self.add_group(g)?),
            Entity::Field(f) => EntityHandle::Field(self.add_field(f)?),
        })
    }

    /// Inserts entities in order, stopping at the first failure.
    ///
    /// Entities inserted before the failure stay registered.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing insertion.
    pub fn add_entities<I>(&mut self, entities: I) -> Result<Vec<EntityHandle>>
    where
        I: IntoIterator,
        I::Item: Into<Entity>,
    {
        entities
            .into_iter()
            .map(|entity| self.add_entity(entity))
            .collect()
    }

    /// Resolves tags of a geometric category into entity references.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnsupportedCategory`] for physical groups and
    /// fields, and [`RegistryError::TagNotFound`] for the first unknown tag.
    pub fn entities_from_tags<I: IntoIterator<Item = Tag>>(
        &self,
        category: Category,
        tags: I,
    ) -> Result<Vec<EntityRef>> {
        fn refs<K: Into<EntityRef>>(keys: Vec<K>) -> Vec<EntityRef> {
            keys.into_iter().map(Into::into).collect()
        }
        Ok(match category {
            Category::Point => refs(self.points.find_all(tags)?),
            Category::Curve => refs(self.curves.find_all(tags)?),
            Category::CurveLoop => refs(self.curve_loops.find_all(tags)?),
            Category::Surface => refs(self.surfaces.find_all(tags)?),
            Category::SurfaceLoop => refs(self.surface_loops.find_all(tags)?),
            Category::Volume => refs(self.volumes.find_all(tags)?),
            Category::PhysicalGroup | Category::Field => {
                return Err(RegistryError::UnsupportedCategory(category).into())
            }
        })
    }

    /// Returns the number of registered items of `category`.
    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Point => self.points.len(),
            Category::Curve => self.curves.len(),
            Category::CurveLoop => self.curve_loops.len(),
            Category::Surface => self.surfaces.len(),
            Category::SurfaceLoop => self.surface_loops.len(),
            Category::Volume => self.volumes.len(),
            Category::PhysicalGroup => self.groups.len(),
            Category::Field => self.fields.len(),
        }
    }

    // --- Global settings ---

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Enables the trailing `Coherence;` directive, which merges duplicate
    /// entities.
    pub fn set_coherence(&mut self, coherence: bool) {
        self.coherence = coherence;
    }

    #[must_use]
    pub fn coherence(&self) -> bool {
        self.coherence
    }

    // --- Output ---

    /// Renders the mesh as `.geo` script text.
    ///
    /// # Errors
    ///
    /// Returns an error if a curve loop does not close or a reference is
    /// dangling.
    pub fn to_geo(&self) -> Result<String> {
        GeoWriter::new(self).render()
    }

    /// Writes the `.geo` script to `out`.
    ///
    /// # Errors
    ///
    /// See [`Mesh::to_geo`]; I/O failures are returned as
    /// [`crate::GeoscriptError::Io`].
    pub fn write_geo<W: std::io::Write>(&self, out: &mut W) -> Result<()> {
        GeoWriter::new(self).write(out)
    }

    /// Writes the `.geo` script to the file at `path`.
    ///
    /// The script is rendered before the file is created, so a rendering
    /// error leaves no partial file behind.
    ///
    /// # Errors
    ///
    /// See [`Mesh::write_geo`].
    pub fn write_geo_file(&self, path: impl AsRef<Path>) -> Result<()> {
        GeoWriter::new(self).write_file(path.as_ref())
    }
}

impl Resolve for Mesh {
    fn tag_of(&self, entity: EntityRef) -> std::result::Result<Tag, RegistryError> {
        match entity {
            EntityRef::Point(id) => self.points.tag(id),
            EntityRef::Curve(id) => self.curves.tag(id),
            EntityRef::CurveLoop(id) => self.curve_loops.tag(id),
            EntityRef::Surface(id) => self.surfaces.tag(id),
            EntityRef::SurfaceLoop(id) => self.surface_loops.tag(id),
            EntityRef::Volume(id) => self.volumes.tag(id),
        }
    }

    fn field_tag(&self, field: FieldId) -> std::result::Result<Tag, RegistryError> {
        self.fields.tag(field)
    }

    fn curve(&self, id: CurveId) -> std::result::Result<&Curve, RegistryError> {
        self.curves.get(id).map(|entry| &entry.item)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeoscriptError, GroupError};
    use crate::field::ThresholdField;

    fn unit_square(mesh: &mut Mesh) -> Vec<PointId> {
        [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .into_iter()
            .map(|(x, y)| mesh.add_point(Point::planar(x, y)).unwrap())
            .collect()
    }

    #[test]
    fn every_category_numbers_from_one() {
        let mut mesh = Mesh::new();
        let p = unit_square(&mut mesh);
        let lines: Vec<_> = (0..4)
            .map(|i| mesh.add_curve(Curve::line(p[i], p[(i + 1) % 4])).unwrap())
            .collect();
        let cl = mesh.add_curve_loop(CurveLoop::new(lines.clone())).unwrap();
        let s = mesh.add_surface(Surface::plane(vec![cl])).unwrap();
        let sl = mesh.add_surface_loop(SurfaceLoop::new(vec![s])).unwrap();
        let v = mesh.add_volume(Volume::new(vec![sl])).unwrap();
        let g = mesh.add_group(PhysicalGroup::new()).unwrap();
        let f = mesh.add_field(ThresholdField::default().into()).unwrap();

        let point_tags: Vec<_> = mesh.points().map(|(_, tag, _)| tag).collect();
        let curve_tags: Vec<_> = mesh.curves().map(|(_, tag, _)| tag).collect();
        assert_eq!(point_tags, [1, 2, 3, 4]);
        assert_eq!(curve_tags, [1, 2, 3, 4]);
        assert_eq!(mesh.tag_of(cl.into()).unwrap(), 1);
        assert_eq!(mesh.tag_of(s.into()).unwrap(), 1);
        assert_eq!(mesh.tag_of(sl.into()).unwrap(), 1);
        assert_eq!(mesh.tag_of(v.into()).unwrap(), 1);
        assert_eq!(mesh.group_tag(g).unwrap(), 1);
        assert_eq!(mesh.field_tag(f).unwrap(), 1);
    }

    #[test]
    fn duplicate_tag_is_rejected_regardless_of_content() {
        let mut mesh = Mesh::new();
        mesh.add_point(Point::xyz(0.0, 0.0, 0.0).with_tag(3)).unwrap();
        let err = mesh
            .add_point(Point::xyz(9.0, 9.0, 9.0).with_tag(3))
            .unwrap_err();
        assert!(matches!(
            err,
            GeoscriptError::Registry(RegistryError::DuplicateTag {
                category: Category::Point,
                tag: 3
            })
        ));
        assert_eq!(mesh.len(Category::Point), 1);
    }

    #[test]
    fn tag_spaces_are_independent() {
        let mut mesh = Mesh::new();
        let p = unit_square(&mut mesh);
        mesh.add_curve(Curve::line(p[0], p[1]).with_tag(1)).unwrap();
        mesh.add_group(PhysicalGroup::new().with_tag(1)).unwrap();
        assert_eq!(mesh.len(Category::Curve), 1);
        assert_eq!(mesh.len(Category::PhysicalGroup), 1);
    }

    #[test]
    fn entities_join_their_group_on_insertion() {
        let mut mesh = Mesh::new();
        let g = mesh.add_group(PhysicalGroup::named("wall")).unwrap();
        let p = mesh.add_point(Point::xyz(0.0, 0.0, 0.0).in_group(g)).unwrap();
        let q = mesh.add_point(Point::xyz(1.0, 0.0, 0.0)).unwrap();
        let l = mesh.add_curve(Curve::line(p, q).in_group(g)).unwrap();

        let group = mesh.group(g).unwrap();
        assert_eq!(group.points(), &[p]);
        assert_eq!(group.curves(), &[l]);

        let err = mesh.add_to_group(g, p).unwrap_err();
        assert!(matches!(
            err,
            GeoscriptError::Group(GroupError::DuplicateMember(Category::Point))
        ));
    }

    #[test]
    fn unknown_group_fails_before_numbering() {
        let mut other = Mesh::new();
        let foreign = other.add_group(PhysicalGroup::new()).unwrap();

        let mut mesh = Mesh::new();
        let err = mesh
            .add_point(Point::xyz(0.0, 0.0, 0.0).in_group(foreign))
            .unwrap_err();
        assert!(matches!(
            err,
            GeoscriptError::Registry(RegistryError::NotFound(Category::PhysicalGroup))
        ));
        assert_eq!(mesh.len(Category::Point), 0);

        let p = mesh.add_point(Point::xyz(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(mesh.tag_of(p.into()).unwrap(), 1);
    }

    #[test]
    fn degenerate_line_is_rejected() {
        let mut mesh = Mesh::new();
        let p = mesh.add_point(Point::xyz(0.0, 0.0, 0.0)).unwrap();
        let err = mesh.add_curve(Curve::line(p, p)).unwrap_err();
        assert!(matches!(
            err,
            GeoscriptError::Registry(RegistryError::InvalidEntity {
                category: Category::Curve,
                ..
            })
        ));
    }

    #[test]
    fn lookups_preserve_order_and_report_missing_tags() {
        let mut mesh = Mesh::new();
        let p = unit_square(&mut mesh);
        assert_eq!(mesh.points_from_tags([3, 1]).unwrap(), vec![p[2], p[0]]);
        assert_eq!(mesh.point_from_tag(4).unwrap(), p[3]);
        assert!(matches!(
            mesh.points_from_tags([1, 5]).unwrap_err(),
            GeoscriptError::Registry(RegistryError::TagNotFound {
                category: Category::Point,
                tag: 5
            })
        ));
        assert_eq!(
            mesh.entities_from_tags(Category::Point, [2]).unwrap(),
            vec![EntityRef::Point(p[1])]
        );
        assert!(matches!(
            mesh.entities_from_tags(Category::Field, [1]).unwrap_err(),
            GeoscriptError::Registry(RegistryError::UnsupportedCategory(Category::Field))
        ));
    }

    #[test]
    fn batch_insertion_stops_at_first_failure() {
        let mut mesh = Mesh::new();
        let entities: Vec<Entity> = vec![
            Point::xyz(0.0, 0.0, 0.0).into(),
            Point::xyz(1.0, 0.0, 0.0).with_tag(1).into(),
            Point::xyz(2.0, 0.0, 0.0).into(),
        ];
        assert!(mesh.add_entities(entities).is_err());
        assert_eq!(mesh.len(Category::Point), 1);
    }

    #[test]
    fn background_field_must_be_registered() {
        let mut mesh = Mesh::new();
        let f = mesh.add_background_field(ThresholdField::default().into()).unwrap();
        assert_eq!(mesh.background_field(), Some(f));

        let mut other = Mesh::new();
        assert!(other.set_background_field(f).is_err());
        assert!(other.background_field().is_none());
    }
}
