//! Writes a meshed unit plate with a circular hole as a `.geo` script.
//!
//! Usage:
//! ```text
//! cargo run --example square                 # print to stdout
//! cargo run --example square -- plate.geo    # write to a file
//! ```

use geoscript::field::MathEvalField;
use geoscript::{Curve, CurveLoop, Field, Mesh, PhysicalGroup, Point, Result, Surface};

fn main() -> Result<()> {
    // Default: WARN for everything, DEBUG for geoscript.
    // Override with RUST_LOG env var (e.g. RUST_LOG=geoscript=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("geoscript=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut mesh = Mesh::new();
    let walls = mesh.add_group(PhysicalGroup::named("walls"))?;
    let hole = mesh.add_group(PhysicalGroup::named("hole"))?;
    let plate = mesh.add_group(PhysicalGroup::named("plate"))?;

    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        .into_iter()
        .map(|(x, y)| mesh.add_point(Point::planar(x, y).with_mesh_size(0.05)))
        .collect::<Result<Vec<_>>>()?;
    let mut outer = Vec::with_capacity(corners.len());
    for (i, &start) in corners.iter().enumerate() {
        let end = corners[(i + 1) % corners.len()];
        outer.push(mesh.add_curve(Curve::line(start, end).in_group(walls))?);
    }

    // gmsh arcs must span less than half a turn.
    let center = mesh.add_point(Point::planar(0.5, 0.5))?;
    let rim = [(0.7, 0.5), (0.5, 0.7), (0.3, 0.5), (0.5, 0.3)]
        .into_iter()
        .map(|(x, y)| mesh.add_point(Point::planar(x, y)))
        .collect::<Result<Vec<_>>>()?;
    let mut arcs = Vec::with_capacity(rim.len());
    for (i, &start) in rim.iter().enumerate() {
        let end = rim[(i + 1) % rim.len()];
        arcs.push(mesh.add_curve(Curve::circle(start, center, end).in_group(hole))?);
    }

    let boundary = mesh.add_curve_loop(CurveLoop::new(outer))?;
    let cutout = mesh.add_curve_loop(CurveLoop::new(arcs))?;
    mesh.add_surface(Surface::plane(vec![boundary, cutout]).in_group(plate))?;

    mesh.add_background_field(Field::from(MathEvalField::new(
        "0.01 + 0.1 * Sqrt((x - 0.5)^2 + (y - 0.5)^2)",
    )))?;
    mesh.options_mut().mesh.characteristic_length_max = Some(0.1);
    mesh.options_mut().mesh.characteristic_length_from_points = Some(false);

    match std::env::args().nth(1) {
        Some(path) => mesh.write_geo_file(path)?,
        None => print!("{}", mesh.to_geo()?),
    }
    Ok(())
}
