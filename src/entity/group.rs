use std::collections::HashSet;
use std::hash::Hash;

use crate::error::GroupError;

use super::{CurveId, EntityRef, PointId, SurfaceId, Tag, VolumeId};

slotmap::new_key_type! {
    /// Unique identifier for a physical group in the mesh registry.
    pub struct GroupId;
}

/// The entity kinds a physical group can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Point,
    Curve,
    Surface,
    Volume,
}

/// Members of one category: insertion order plus a set for lookups.
#[derive(Debug, Clone)]
struct Members<K> {
    order: Vec<K>,
    index: HashSet<K>,
}

impl<K> Default for Members<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            index: HashSet::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> Members<K> {
    fn contains(&self, member: K) -> bool {
        self.index.contains(&member)
    }

    /// Appends `member`; returns `false` if it was already present.
    fn insert(&mut self, member: K) -> bool {
        let added = self.index.insert(member);
        if added {
            self.order.push(member);
        }
        added
    }

    fn as_slice(&self) -> &[K] {
        &self.order
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A named bucket tagging entities for boundary conditions or regions.
///
/// Members are kept per category in insertion order. Curve loops and
/// surface loops are never members.
#[derive(Debug, Clone, Default)]
pub struct PhysicalGroup {
    tag: Option<Tag>,
    name: Option<String>,
    points: Members<PointId>,
    curves: Members<CurveId>,
    surfaces: Members<SurfaceId>,
    volumes: Members<VolumeId>,
}

impl PhysicalGroup {
    /// Creates an unnamed, empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty group with a display name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Requests an explicit tag instead of automatic numbering.
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Returns the requested tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<Tag> {
        self.tag
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn points(&self) -> &[PointId] {
        self.points.as_slice()
    }

    #[must_use]
    pub fn curves(&self) -> &[CurveId] {
        self.curves.as_slice()
    }

    #[must_use]
    pub fn surfaces(&self) -> &[SurfaceId] {
        self.surfaces.as_slice()
    }

    #[must_use]
    pub fn volumes(&self) -> &[VolumeId] {
        self.volumes.as_slice()
    }

    /// Returns whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self.curves.is_empty()
            && self.surfaces.is_empty()
            && self.volumes.is_empty()
    }

    /// Returns whether `entity` is a member.
    #[must_use]
    pub fn contains(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Point(id) => self.points.contains(id),
            EntityRef::Curve(id) => self.curves.contains(id),
            EntityRef::Surface(id) => self.surfaces.contains(id),
            EntityRef::Volume(id) => self.volumes.contains(id),
            EntityRef::CurveLoop(_) | EntityRef::SurfaceLoop(_) => false,
        }
    }

    /// Adds `entity` to the bucket of its category.
    ///
    /// Curve loops and surface loops are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::DuplicateMember`] if the entity is already a member.
    pub fn add_entity(&mut self, entity: EntityRef) -> Result<(), GroupError> {
        let added = match entity {
            EntityRef::Point(id) => self.points.insert(id),
            EntityRef::Curve(id) => self.curves.insert(id),
            EntityRef::Surface(id) => self.surfaces.insert(id),
            EntityRef::Volume(id) => self.volumes.insert(id),
            EntityRef::CurveLoop(_) | EntityRef::SurfaceLoop(_) => true,
        };
        if added {
            Ok(())
        } else {
            Err(GroupError::DuplicateMember(entity.category()))
        }
    }

    /// Adds each entity in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::DuplicateMember`] for the first repeated member.
    pub fn add_entities<I>(&mut self, entities: I) -> Result<(), GroupError>
    where
        I: IntoIterator,
        I::Item: Into<EntityRef>,
    {
        entities
            .into_iter()
            .try_for_each(|entity| self.add_entity(entity.into()))
    }

    /// Returns the non-empty member buckets as `(kind, members)`, in the
    /// order points, curves, surfaces, volumes.
    #[must_use]
    pub fn buckets(&self) -> Vec<(MemberKind, Vec<EntityRef>)> {
        let buckets = [
            (MemberKind::Point, refs(&self.points)),
            (MemberKind::Curve, refs(&self.curves)),
            (MemberKind::Surface, refs(&self.surfaces)),
            (MemberKind::Volume, refs(&self.volumes)),
        ];
        buckets
            .into_iter()
            .filter(|(_, members)| !members.is_empty())
            .collect()
    }
}

fn refs<K: Copy + Into<EntityRef>>(members: &Members<K>) -> Vec<EntityRef> {
    members.order.iter().map(|&member| member.into()).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entity::{Category, CurveLoopId, SurfaceLoopId};
    use slotmap::SlotMap;

    #[test]
    fn second_insertion_of_a_point_fails() {
        let mut points: SlotMap<PointId, ()> = SlotMap::with_key();
        let p = points.insert(());
        let mut group = PhysicalGroup::named("inlet");
        group.add_entity(p.into()).unwrap();
        assert_eq!(
            group.add_entity(p.into()),
            Err(GroupError::DuplicateMember(Category::Point))
        );
        assert_eq!(group.points(), &[p]);
    }

    #[test]
    fn loops_are_silently_ignored() {
        let mut loops: SlotMap<CurveLoopId, ()> = SlotMap::with_key();
        let mut shells: SlotMap<SurfaceLoopId, ()> = SlotMap::with_key();
        let mut group = PhysicalGroup::new();
        let l = loops.insert(());
        group.add_entity(l.into()).unwrap();
        group.add_entity(l.into()).unwrap();
        group.add_entity(shells.insert(()).into()).unwrap();
        assert!(group.is_empty());
        assert!(group.buckets().is_empty());
    }

    #[test]
    fn buckets_keep_category_order() {
        let mut points: SlotMap<PointId, ()> = SlotMap::with_key();
        let mut surfaces: SlotMap<SurfaceId, ()> = SlotMap::with_key();
        let s = surfaces.insert(());
        let p = points.insert(());
        let mut group = PhysicalGroup::new().with_tag(3);
        group.add_entities([EntityRef::Surface(s), EntityRef::Point(p)]).unwrap();

        let buckets = group.buckets();
        assert_eq!(group.tag(), Some(3));
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].0, MemberKind::Point);
        assert_eq!(buckets[1].0, MemberKind::Surface);
    }

    #[test]
    fn large_groups_keep_order_and_reject_repeats() {
        let mut points: SlotMap<PointId, ()> = SlotMap::with_key();
        let ids: Vec<_> = (0..50_000).map(|_| points.insert(())).collect();
        let mut group = PhysicalGroup::named("boundary");
        group.add_entities(ids.iter().copied()).unwrap();

        assert_eq!(group.points(), ids.as_slice());
        assert!(group.contains(ids[49_999].into()));
        assert_eq!(
            group.add_entity(ids[25_000].into()),
            Err(GroupError::DuplicateMember(Category::Point))
        );
        assert_eq!(group.points().len(), 50_000);
    }
}
