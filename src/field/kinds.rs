use crate::entity::{CurveId, PointId, SurfaceId, VolumeId};
use crate::render::Attr;

use super::FieldId;

/// An ordered list of `(gmsh attribute name, value if set)`.
pub type AttrList<'a> = Vec<(&'static str, Option<Attr<'a>>)>;

/// Boundary layer around curves (2-D) or surfaces (3-D).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryLayerField {
    pub hwall_t: Option<f64>,
    pub hwall_n: Option<f64>,
    pub ratio: Option<f64>,
    pub edges: Option<Vec<CurveId>>,
    pub faces: Option<Vec<SurfaceId>>,
    pub fan_nodes: Option<Vec<PointId>>,
    pub fans: Option<Vec<CurveId>>,
    pub intersect_metrics: Option<bool>,
    pub nodes: Option<Vec<PointId>>,
    pub quads: Option<bool>,
    pub hfar: Option<f64>,
    pub thickness: Option<f64>,
}

impl BoundaryLayerField {
    #[must_use]
    pub fn attributes(&self) -> AttrList<'_> {
        vec![
            ("hwall_t", self.hwall_t.map(Attr::Real)),
            ("hwall_n", self.hwall_n.map(Attr::Real)),
            ("ratio", self.ratio.map(Attr::Real)),
            ("EdgesList", self.edges.as_deref().map(Attr::Curves)),
            ("FacesList", self.faces.as_deref().map(Attr::Surfaces)),
            ("FanNodesList", self.fan_nodes.as_deref().map(Attr::Points)),
            ("FansList", self.fans.as_deref().map(Attr::Curves)),
            ("IntersectMetrics", self.intersect_metrics.map(Attr::Bool)),
            ("NodesList", self.nodes.as_deref().map(Attr::Points)),
            ("Quads", self.quads.map(Attr::Bool)),
            ("hfar", self.hfar.map(Attr::Real)),
            ("thickness", self.thickness.map(Attr::Real)),
        ]
    }
}

/// Constant size inside an axis-aligned box, another size outside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxField {
    pub v_in: Option<f64>,
    pub v_out: Option<f64>,
    pub x_max: Option<f64>,
    pub x_min: Option<f64>,
    pub y_max: Option<f64>,
    pub y_min: Option<f64>,
    pub z_max: Option<f64>,
    pub z_min: Option<f64>,
}

impl BoxField {
    #[must_use]
    pub fn attributes(&self) -> AttrList<'_> {
        vec![
            ("VIn", self.v_in.map(Attr::Real)),
            ("VOut", self.v_out.map(Attr::Real)),
            ("XMax", self.x_max.map(Attr::Real)),
            ("XMin", self.x_min.map(Attr::Real)),
            ("YMax", self.y_max.map(Attr::Real)),
            ("YMin", self.y_min.map(Attr::Real)),
            ("ZMax", self.z_max.map(Attr::Real)),
            ("ZMin", self.z_min.map(Attr::Real)),
        ]
    }
}

/// Size given by a math expression of `x`, `y`, `z`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MathEvalField {
    pub f: Option<String>,
}

impl MathEvalField {
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            f: Some(expression.into()),
        }
    }

    #[must_use]
    pub fn attributes(&self) -> AttrList<'_> {
        vec![("F", self.f.as_deref().map(Attr::Str))]
    }
}

/// Restricts another field to a set of entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestrictField {
    pub i_field: Option<FieldId>,
    pub edges: Option<Vec<CurveId>>,
    pub faces: Option<Vec<SurfaceId>>,
    pub regions: Option<Vec<VolumeId>>,
    pub vertices: Option<Vec<PointId>>,
}

impl RestrictField {
    #[must_use]
    pub fn attributes(&self) -> AttrList<'_> {
        vec![
            ("IField", self.i_field.map(Attr::Field)),
            ("EdgesList", self.edges.as_deref().map(Attr::Curves)),
            ("FacesList", self.faces.as_deref().map(Attr::Surfaces)),
            ("RegionsList", self.regions.as_deref().map(Attr::Volumes)),
            ("VerticesList", self.vertices.as_deref().map(Attr::Points)),
        ]
    }
}

/// Distance to a set of points, curves or surfaces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttractorField {
    pub edges: Option<Vec<CurveId>>,
    pub faces: Option<Vec<SurfaceId>>,
    pub field_x: Option<FieldId>,
    pub field_y: Option<FieldId>,
    pub field_z: Option<FieldId>,
    pub n_nodes_by_edge: Option<i64>,
    pub nodes: Option<Vec<PointId>>,
}

impl AttractorField {
    #[must_use]
    pub fn attributes(&self) -> AttrList<'_> {
        vec![
            ("EdgesList", self.edges.as_deref().map(Attr::Curves)),
            ("FacesList", self.faces.as_deref().map(Attr::Surfaces)),
            ("FieldX", self.field_x.map(Attr::Field)),
            ("FieldY", self.field_y.map(Attr::Field)),
            ("FieldZ", self.field_z.map(Attr::Field)),
            ("NNodesByEdge", self.n_nodes_by_edge.map(Attr::Int)),
            ("NodesList", self.nodes.as_deref().map(Attr::Points)),
        ]
    }
}

/// Interpolates between two sizes according to the value of another field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdField {
    pub dist_max: Option<f64>,
    pub dist_min: Option<f64>,
    pub i_field: Option<FieldId>,
    pub lc_max: Option<f64>,
    pub lc_min: Option<f64>,
    pub sigmoid: Option<bool>,
    pub stop_at_dist_max: Option<bool>,
}

impl ThresholdField {
    #[must_use]
    pub fn attributes(&self) -> AttrList<'_> {
        vec![
            ("DistMax", self.dist_max.map(Attr::Real)),
            ("DistMin", self.dist_min.map(Attr::Real)),
            ("IField", self.i_field.map(Attr::Field)),
            ("LcMax", self.lc_max.map(Attr::Real)),
            ("LcMin", self.lc_min.map(Attr::Real)),
            ("Sigmoid", self.sigmoid.map(Attr::Bool)),
            ("StopAtDistMax", self.stop_at_dist_max.map(Attr::Bool)),
        ]
    }
}

/// Constant size inside a ball.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BallField {
    pub radius: Option<f64>,
    pub v_in: Option<f64>,
    pub v_out: Option<f64>,
    pub x_center: Option<f64>,
    pub y_center: Option<f64>,
    pub z_center: Option<f64>,
}

impl BallField {
    #[must_use]
    pub fn attributes(&self) -> AttrList<'_> {
        vec![
            ("Radius", self.radius.map(Attr::Real)),
            ("VIn", self.v_in.map(Attr::Real)),
            ("VOut", self.v_out.map(Attr::Real)),
            ("XCenter", self.x_center.map(Attr::Real)),
            ("YCenter", self.y_center.map(Attr::Real)),
            ("ZCenter", self.z_center.map(Attr::Real)),
        ]
    }
}

/// Constant size inside a finite cylinder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CylinderField {
    pub radius: Option<f64>,
    pub v_in: Option<f64>,
    pub v_out: Option<f64>,
    pub x_center: Option<f64>,
    pub y_center: Option<f64>,
    pub z_center: Option<f64>,
    pub x_axis: Option<f64>,
    pub y_axis: Option<f64>,
    pub z_axis: Option<f64>,
}

impl CylinderField {
    #[must_use]
    pub fn attributes(&self) -> AttrList<'_> {
        vec![
            ("Radius", self.radius.map(Attr::Real)),
            ("VIn", self.v_in.map(Attr::Real)),
            ("VOut", self.v_out.map(Attr::Real)),
            ("XCenter", self.x_center.map(Attr::Real)),
            ("YCenter", self.y_center.map(Attr::Real)),
            ("ZCenter", self.z_center.map(Attr::Real)),
            ("XAxis", self.x_axis.map(Attr::Real)),
            ("YAxis", self.y_axis.map(Attr::Real)),
            ("ZAxis", self.z_axis.map(Attr::Real)),
        ]
    }
}

/// Minimum of other fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinField {
    pub fields: Option<Vec<FieldId>>,
}

impl MinField {
    #[must_use]
    pub fn new(fields: Vec<FieldId>) -> Self {
        Self {
            fields: Some(fields),
        }
    }

    #[must_use]
    pub fn attributes(&self) -> AttrList<'_> {
        vec![("FieldsList", self.fields.as_deref().map(Attr::Fields))]
    }
}
