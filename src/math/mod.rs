/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;
