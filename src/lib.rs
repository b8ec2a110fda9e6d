pub mod domain;
pub mod entity;
pub mod error;
pub mod field;
pub mod io;
pub mod math;
pub mod mesh;
pub mod options;
pub mod render;

pub use domain::{Dimension, Domain, DomainToMesh};
pub use entity::{
    Category, Curve, CurveId, CurveKind, CurveLoop, CurveLoopId, Entity, EntityHandle,
    EntityRef, GroupId, LoopCurves, MemberKind, PhysicalGroup, Point, PointId, Surface, SurfaceId,
    SurfaceKind, SurfaceLoop, SurfaceLoopId, Tag, Volume, VolumeId, VolumeKind,
};
pub use error::{GeoscriptError, Result};
pub use field::{Field, FieldId, FieldKind};
pub use io::GeoWriter;
pub use mesh::Mesh;
pub use options::{Color, Options};
