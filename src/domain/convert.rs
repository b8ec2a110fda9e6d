use std::collections::HashMap;

use tracing::info;

use crate::entity::{
    Curve, CurveId, CurveLoop, GroupId, PhysicalGroup, Point, PointId, Surface, SurfaceId,
    SurfaceLoop, Tag, Volume,
};
use crate::error::{DomainError, Result};
use crate::math::Point3;
use crate::mesh::Mesh;

use super::{Dimension, Domain};

/// Builds a [`Mesh`] from a [`Domain`].
///
/// Boundary tags become physical groups tagged with their flag. Vertices
/// become points, segments become lines, every facet cycle becomes a curve
/// loop over lines (reusing segment lines in either direction) and every
/// facet a plane surface. Each volume becomes one surface loop per facet
/// group and a volume over them.
pub struct DomainToMesh<'a> {
    domain: &'a Domain,
}

impl<'a> DomainToMesh<'a> {
    /// Creates a new `DomainToMesh` operation.
    #[must_use]
    pub fn new(domain: &'a Domain) -> Self {
        Self { domain }
    }

    /// Executes the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] for out-of-range indices, vertices with the
    /// wrong number of coordinates, or volumes referencing hole facets, and
    /// registry errors for degenerate items (empty facets, repeated
    /// consecutive vertices) or duplicate boundary tags.
    pub fn execute(&self) -> Result<Mesh> {
        let domain = self.domain;
        let mut mesh = Mesh::new();

        for (name, flag) in &domain.boundary_tags {
            mesh.add_group(PhysicalGroup::named(name.as_str()).with_tag(*flag))?;
        }

        let mut points = Vec::with_capacity(domain.vertices.len());
        for (index, vertex) in domain.vertices.iter().enumerate() {
            let mut point = Point::new(position(domain.dimension, index, vertex)?);
            if let Some(group) = flag_group(&mesh, &domain.vertex_flags, index) {
                point = point.in_group(group);
            }
            points.push(mesh.add_point(point)?);
        }

        let mut lines = LineIndex::default();
        for (index, &[a, b]) in domain.segments.iter().enumerate() {
            let mut line = Curve::line(vertex(&points, a)?, vertex(&points, b)?);
            if let Some(group) = flag_group(&mesh, &domain.segment_flags, index) {
                line = line.in_group(group);
            }
            let id = mesh.add_curve(line)?;
            lines.insert(a, b, id);
        }

        let mut surfaces: Vec<Option<SurfaceId>> = Vec::with_capacity(domain.facets.len());
        for (index, facet) in domain.facets.iter().enumerate() {
            if domain.is_hole(index) {
                surfaces.push(None);
                continue;
            }
            let mut loops = Vec::with_capacity(facet.len());
            for cycle in facet {
                let mut curves = Vec::with_capacity(cycle.len());
                for (k, &current) in cycle.iter().enumerate() {
                    let previous = cycle[(k + cycle.len() - 1) % cycle.len()];
                    curves.push(lines.get_or_add(&mut mesh, &points, previous, current)?);
                }
                loops.push(mesh.add_curve_loop(CurveLoop::new(curves))?);
            }
            let mut surface = Surface::plane(loops);
            if let Some(group) = flag_group(&mesh, &domain.facet_flags, index) {
                surface = surface.in_group(group);
            }
            surfaces.push(Some(mesh.add_surface(surface)?));
        }

        for (index, shells) in domain.volumes.iter().enumerate() {
            let mut surface_loops = Vec::with_capacity(shells.len());
            for shell in shells {
                let faces = shell
                    .iter()
                    .map(|&facet| facet_surface(&surfaces, facet))
                    .collect::<Result<Vec<_>>>()?;
                surface_loops.push(mesh.add_surface_loop(SurfaceLoop::new(faces))?);
            }
            let mut volume = Volume::new(surface_loops);
            if let Some(group) = flag_group(&mesh, &domain.region_flags, index) {
                volume = volume.in_group(group);
            }
            mesh.add_volume(volume)?;
        }

        info!(
            points = points.len(),
            lines = lines.len(),
            surfaces = surfaces.iter().flatten().count(),
            volumes = domain.volumes.len(),
            "converted domain"
        );
        Ok(mesh)
    }
}

/// Lines keyed by their unordered vertex pair.
#[derive(Default)]
struct LineIndex {
    lines: HashMap<(usize, usize), CurveId>,
}

impl LineIndex {
    fn key(a: usize, b: usize) -> (usize, usize) {
        (a.min(b), a.max(b))
    }

    fn insert(&mut self, a: usize, b: usize, line: CurveId) {
        self.lines.insert(Self::key(a, b), line);
    }

    fn get_or_add(
        &mut self,
        mesh: &mut Mesh,
        points: &[PointId],
        a: usize,
        b: usize,
    ) -> Result<CurveId> {
        if let Some(&line) = self.lines.get(&Self::key(a, b)) {
            return Ok(line);
        }
        let line = mesh.add_curve(Curve::line(vertex(points, a)?, vertex(points, b)?))?;
        self.insert(a, b, line);
        Ok(line)
    }

    fn len(&self) -> usize {
        self.lines.len()
    }
}

fn position(dimension: Dimension, index: usize, coordinates: &[f64]) -> Result<Point3> {
    match (dimension, coordinates) {
        (Dimension::Two, &[x, y]) => Ok(Point3::new(x, y, 0.0)),
        (Dimension::Three, &[x, y, z]) => Ok(Point3::new(x, y, z)),
        _ => Err(DomainError::VertexArity {
            index,
            expected: dimension.coordinates(),
            found: coordinates.len(),
        }
        .into()),
    }
}

fn vertex(points: &[PointId], index: usize) -> Result<PointId> {
    points.get(index).copied().ok_or_else(|| {
        DomainError::IndexOutOfRange {
            what: "vertex",
            index,
            len: points.len(),
        }
        .into()
    })
}

fn facet_surface(surfaces: &[Option<SurfaceId>], index: usize) -> Result<SurfaceId> {
    match surfaces.get(index) {
        Some(Some(surface)) => Ok(*surface),
        Some(None) => Err(DomainError::HoleFacet(index).into()),
        None => Err(DomainError::IndexOutOfRange {
            what: "facet",
            index,
            len: surfaces.len(),
        }
        .into()),
    }
}

/// Returns the group registered for the flag at `index`, if any.
fn flag_group(mesh: &Mesh, flags: &[Tag], index: usize) -> Option<GroupId> {
    flags
        .get(index)
        .and_then(|&flag| mesh.group_from_tag(flag).ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entity::Category;
    use crate::error::GeoscriptError;

    fn square_with_hole() -> Domain {
        let mut domain = Domain::planar();
        domain.vertices = vec![
            vec![0.0, 0.0],
            vec![4.0, 0.0],
            vec![4.0, 4.0],
            vec![0.0, 4.0],
            vec![1.0, 1.0],
            vec![3.0, 1.0],
            vec![3.0, 3.0],
            vec![1.0, 3.0],
        ];
        domain.segments = vec![[0, 1], [1, 2], [2, 3], [3, 0], [4, 5], [5, 6], [6, 7], [7, 4]];
        domain.segment_flags = vec![1, 1, 1, 1, 2, 2, 2, 2];
        domain.facets = vec![vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]], vec![vec![4, 5, 6, 7]]];
        domain.facet_flags = vec![3, 3];
        domain.holes = vec![1];
        domain.boundary_tags = vec![
            ("outer".to_string(), 1),
            ("inner".to_string(), 2),
            ("plate".to_string(), 3),
        ];
        domain
    }

    fn unit_cube() -> Domain {
        let mut domain = Domain::spatial();
        domain.vertices = vec![
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![1.0, 1.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0],
            vec![0.0, 1.0, 1.0],
        ];
        domain.facets = [
            [0, 1, 2, 3],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [1, 2, 6, 5],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
        ]
        .iter()
        .map(|cycle| vec![cycle.to_vec()])
        .collect();
        domain.volumes = vec![vec![(0..6).collect()]];
        domain.region_flags = vec![7];
        domain.boundary_tags = vec![("solid".to_string(), 7)];
        domain
    }

    #[test]
    fn planar_domain_skips_hole_facets() {
        let mesh = DomainToMesh::new(&square_with_hole()).execute().unwrap();

        assert_eq!(mesh.len(Category::Point), 8);
        assert_eq!(mesh.len(Category::Curve), 8);
        assert_eq!(mesh.len(Category::CurveLoop), 2);
        assert_eq!(mesh.len(Category::Surface), 1);
        assert_eq!(mesh.len(Category::PhysicalGroup), 3);

        let geo = mesh.to_geo().unwrap();
        assert!(geo.contains("Point(2) = {4, 0, 0};\n"));
        assert!(geo.contains("Curve Loop(1) = {4, 1, 2, 3};\n"));
        assert!(geo.contains("Plane Surface(1) = {1, 2};\n"));
        assert!(geo.contains("Physical Curve(\"outer\", 1) = {1, 2, 3, 4};\n"));
        assert!(geo.contains("Physical Surface(\"plate\", 3) = {1};\n"));
    }

    #[test]
    fn cube_shares_edges_between_faces() {
        let mesh = DomainToMesh::new(&unit_cube()).execute().unwrap();

        assert_eq!(mesh.len(Category::Curve), 12);
        assert_eq!(mesh.len(Category::CurveLoop), 6);
        assert_eq!(mesh.len(Category::Surface), 6);
        assert_eq!(mesh.len(Category::SurfaceLoop), 1);
        assert_eq!(mesh.len(Category::Volume), 1);

        let geo = mesh.to_geo().unwrap();
        assert!(geo.contains("Surface Loop(1) = {1, 2, 3, 4, 5, 6};\n"));
        assert!(geo.contains("Volume(1) = {1};\n"));
        assert!(geo.contains("Physical Volume(\"solid\", 7) = {1};\n"));
    }

    #[test]
    fn unknown_flags_leave_items_ungrouped() {
        let mut domain = unit_cube();
        domain.boundary_tags.clear();
        let mesh = DomainToMesh::new(&domain).execute().unwrap();
        assert_eq!(mesh.len(Category::PhysicalGroup), 0);
        assert!(!mesh.to_geo().unwrap().contains("Physical"));
    }

    #[test]
    fn wrong_vertex_arity_is_rejected() {
        let mut domain = Domain::planar();
        domain.vertices = vec![vec![0.0, 0.0], vec![1.0, 0.0, 0.0]];
        let err = DomainToMesh::new(&domain).execute().unwrap_err();
        assert!(matches!(
            err,
            GeoscriptError::Domain(DomainError::VertexArity {
                index: 1,
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn out_of_range_segment_is_rejected() {
        let mut domain = Domain::planar();
        domain.vertices = vec![vec![0.0, 0.0], vec![1.0, 0.0]];
        domain.segments = vec![[0, 2]];
        let err = DomainToMesh::new(&domain).execute().unwrap_err();
        assert!(matches!(
            err,
            GeoscriptError::Domain(DomainError::IndexOutOfRange {
                what: "vertex",
                index: 2,
                len: 2
            })
        ));
    }

    #[test]
    fn volume_over_hole_facet_is_rejected() {
        let mut domain = square_with_hole();
        domain.volumes = vec![vec![vec![0, 1]]];
        let err = DomainToMesh::new(&domain).execute().unwrap_err();
        assert!(matches!(
            err,
            GeoscriptError::Domain(DomainError::HoleFacet(1))
        ));
    }
}
