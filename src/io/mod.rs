pub mod geo;

pub use geo::GeoWriter;
