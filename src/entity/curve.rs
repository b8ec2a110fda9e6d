use crate::error::RegistryError;
use crate::render::braced;

use super::point::PointId;
use super::{tags_of, EntityMeta, EntityRef, Resolve};

slotmap::new_key_type! {
    /// Unique identifier for a curve in the mesh registry.
    pub struct CurveId;
}

/// The shape of a curve and the entities it is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurveKind {
    /// A straight segment between two distinct points.
    Line { start: PointId, end: PointId },
    /// A circular arc, at most π wide.
    Circle {
        start: PointId,
        center: PointId,
        end: PointId,
    },
    /// An elliptic arc; `major_axis` is any point on the major axis.
    Ellipse {
        start: PointId,
        center: PointId,
        major_axis: PointId,
        end: PointId,
    },
    /// A B-spline through control points.
    BSpline(Vec<PointId>),
    /// An interpolating spline.
    Spline(Vec<PointId>),
    /// A Catmull-Rom spline.
    CatmullRom(Vec<PointId>),
    /// Several curves meshed as one.
    Compound(Vec<CurveId>),
}

/// A one-dimensional entity.
#[derive(Debug, Clone)]
pub struct Curve {
    kind: CurveKind,
    pub(crate) meta: EntityMeta,
}

impl Curve {
    /// Creates a curve of the given kind.
    #[must_use]
    pub fn new(kind: CurveKind) -> Self {
        Self {
            kind,
            meta: EntityMeta::default(),
        }
    }

    /// Creates a straight segment.
    #[must_use]
    pub fn line(start: PointId, end: PointId) -> Self {
        Self::new(CurveKind::Line { start, end })
    }

    /// Creates a circular arc from `start` to `end` around `center`.
    #[must_use]
    pub fn circle(start: PointId, center: PointId, end: PointId) -> Self {
        Self::new(CurveKind::Circle { start, center, end })
    }

    /// Creates an elliptic arc.
    #[must_use]
    pub fn ellipse(start: PointId, center: PointId, major_axis: PointId, end: PointId) -> Self {
        Self::new(CurveKind::Ellipse {
            start,
            center,
            major_axis,
            end,
        })
    }

    /// Creates a B-spline.
    #[must_use]
    pub fn bspline(points: Vec<PointId>) -> Self {
        Self::new(CurveKind::BSpline(points))
    }

    /// Creates an interpolating spline.
    #[must_use]
    pub fn spline(points: Vec<PointId>) -> Self {
        Self::new(CurveKind::Spline(points))
    }

    /// Creates a Catmull-Rom spline.
    #[must_use]
    pub fn catmull_rom(points: Vec<PointId>) -> Self {
        Self::new(CurveKind::CatmullRom(points))
    }

    /// Creates a compound curve.
    #[must_use]
    pub fn compound(curves: Vec<CurveId>) -> Self {
        Self::new(CurveKind::Compound(curves))
    }

    /// Returns the curve's shape.
    #[must_use]
    pub fn kind(&self) -> &CurveKind {
        &self.kind
    }

    /// Replaces the curve's shape.
    pub fn set_kind(&mut self, kind: CurveKind) {
        self.kind = kind;
    }

    /// Returns the `.geo` keyword for this curve.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self.kind {
            CurveKind::Line { .. } => "Line",
            CurveKind::Circle { .. } => "Circle",
            CurveKind::Ellipse { .. } => "Ellipse",
            CurveKind::BSpline(_) => "BSpline",
            CurveKind::Spline(_) => "Spline",
            CurveKind::CatmullRom(_) => "CatmullRom",
            CurveKind::Compound(_) => "Compound Curve",
        }
    }

    /// Returns the first and last point of the curve.
    ///
    /// Compound curves have no directly known endpoints.
    #[must_use]
    pub fn endpoints(&self) -> Option<(PointId, PointId)> {
        match &self.kind {
            CurveKind::Line { start, end }
            | CurveKind::Circle { start, end, .. }
            | CurveKind::Ellipse { start, end, .. } => Some((*start, *end)),
            CurveKind::BSpline(points) | CurveKind::Spline(points) | CurveKind::CatmullRom(points) => {
                Some((*points.first()?, *points.last()?))
            }
            CurveKind::Compound(_) => None,
        }
    }

    /// Returns every entity this curve references, in rendering order.
    #[must_use]
    pub fn references(&self) -> Vec<EntityRef> {
        match &self.kind {
            CurveKind::Line { start, end } => vec![(*start).into(), (*end).into()],
            CurveKind::Circle { start, center, end } => {
                vec![(*start).into(), (*center).into(), (*end).into()]
            }
            CurveKind::Ellipse {
                start,
                center,
                major_axis,
                end,
            } => vec![
                (*start).into(),
                (*center).into(),
                (*major_axis).into(),
                (*end).into(),
            ],
            CurveKind::BSpline(points) | CurveKind::Spline(points) | CurveKind::CatmullRom(points) => {
                points.iter().map(|&p| p.into()).collect()
            }
            CurveKind::Compound(curves) => curves.iter().map(|&c| c.into()).collect(),
        }
    }

    /// Checks the shape constraints a `.geo` statement needs.
    pub(crate) fn check(&self) -> Result<(), &'static str> {
        match &self.kind {
            CurveKind::Line { start, end } if start == end => {
                Err("a line needs two distinct points")
            }
            CurveKind::BSpline(points) | CurveKind::Spline(points) | CurveKind::CatmullRom(points)
                if points.len() < 2 =>
            {
                Err("a spline needs at least two points")
            }
            CurveKind::Compound(curves) if curves.is_empty() => {
                Err("a compound curve needs at least one curve")
            }
            _ => Ok(()),
        }
    }

    /// Renders the reference list, e.g. `{1, 2}`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if a referenced entity is not
    /// registered with `resolver`.
    pub fn body<R: Resolve + ?Sized>(&self, resolver: &R) -> Result<String, RegistryError> {
        Ok(braced(tags_of(resolver, self.references())?))
    }
}
