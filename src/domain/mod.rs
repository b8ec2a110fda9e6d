//! Planar and volumetric domain descriptions.
//!
//! A [`Domain`] lists vertices, segments, facets and volumes by index, with
//! optional integer flags naming the physical group of each item.
//! [`DomainToMesh`] turns it into a [`crate::mesh::Mesh`].

mod convert;

pub use convert::DomainToMesh;

use crate::entity::Tag;

/// Spatial dimension of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Vertices are `[x, y]` and lie in the `z = 0` plane.
    Two,
    /// Vertices are `[x, y, z]`.
    Three,
}

impl Dimension {
    /// Number of coordinates per vertex.
    #[must_use]
    pub fn coordinates(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// An index-based description of a geometric domain.
///
/// Flag arrays run parallel to the items they flag; a missing entry or a
/// flag without a matching boundary tag leaves the item ungrouped.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    pub dimension: Dimension,
    pub vertices: Vec<Vec<f64>>,
    pub vertex_flags: Vec<Tag>,
    /// Pairs of vertex indices.
    pub segments: Vec<[usize; 2]>,
    pub segment_flags: Vec<Tag>,
    /// Each facet is a list of vertex cycles: the outer boundary followed
    /// by its holes.
    pub facets: Vec<Vec<Vec<usize>>>,
    pub facet_flags: Vec<Tag>,
    /// Indices of facets that only describe holes (2-D only); they produce
    /// no surface.
    pub holes: Vec<usize>,
    /// Each volume is a list of facet-index groups, one per bounding shell.
    pub volumes: Vec<Vec<Vec<usize>>>,
    pub region_flags: Vec<Tag>,
    /// Physical group names and the flags they stand for, in output order.
    pub boundary_tags: Vec<(String, Tag)>,
}

impl Domain {
    /// Creates an empty domain of the given dimension.
    #[must_use]
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            vertices: Vec::new(),
            vertex_flags: Vec::new(),
            segments: Vec::new(),
            segment_flags: Vec::new(),
            facets: Vec::new(),
            facet_flags: Vec::new(),
            holes: Vec::new(),
            volumes: Vec::new(),
            region_flags: Vec::new(),
            boundary_tags: Vec::new(),
        }
    }

    /// Creates an empty 2-D domain.
    #[must_use]
    pub fn planar() -> Self {
        Self::new(Dimension::Two)
    }

    /// Creates an empty 3-D domain.
    #[must_use]
    pub fn spatial() -> Self {
        Self::new(Dimension::Three)
    }

    /// Returns whether facet `index` is a hole facet.
    #[must_use]
    pub fn is_hole(&self, index: usize) -> bool {
        self.dimension == Dimension::Two && self.holes.contains(&index)
    }
}
