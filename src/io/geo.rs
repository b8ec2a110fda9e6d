//! gmsh `.geo` script writer.
//!
//! Statements are emitted in a fixed order: points, curves, curve loops,
//! surfaces, surface loops, volumes, physical groups, fields, the
//! background and boundary-layer fields, global options and finally
//! `Coherence;`. Within a category the insertion order of the mesh is kept.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::entity::{tags_of, Category, MemberKind, Resolve, Tag};
use crate::error::Result;
use crate::mesh::Mesh;
use crate::render::{braced, quoted, set_attrs};

/// Serializes a [`Mesh`] into `.geo` text.
pub struct GeoWriter<'a> {
    mesh: &'a Mesh,
}

impl<'a> GeoWriter<'a> {
    /// Creates a writer for `mesh`.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Renders the whole script.
    ///
    /// # Errors
    ///
    /// Returns an error if a curve loop does not close or a reference does
    /// not resolve in the mesh.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.write_geometry(&mut out)?;
        self.write_groups(&mut out)?;
        self.write_fields(&mut out)?;
        self.write_settings(&mut out)?;
        Ok(out)
    }

    /// Renders the script and writes it to `out`.
    ///
    /// # Errors
    ///
    /// See [`GeoWriter::render`]; I/O failures are returned as well.
    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        let text = self.render()?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Renders the script and writes it to a new file at `path`.
    ///
    /// # Errors
    ///
    /// See [`GeoWriter::write`].
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let text = self.render()?;
        let mut file = BufWriter::new(File::create(path)?);
        file.write_all(text.as_bytes())?;
        file.flush()?;
        info!(path = %path.display(), bytes = text.len(), "wrote .geo script");
        Ok(())
    }

    fn write_geometry(&self, out: &mut String) -> Result<()> {
        let mesh = self.mesh;
        for (_, tag, point) in mesh.points() {
            statement(out, "Point", tag, &point.body());
        }
        for (_, tag, curve) in mesh.curves() {
            statement(out, curve.keyword(), tag, &curve.body(mesh)?);
        }
        for (_, tag, curve_loop) in mesh.curve_loops() {
            statement(out, "Curve Loop", tag, &curve_loop.body(tag, mesh)?);
        }
        for (_, tag, surface) in mesh.surfaces() {
            statement(out, surface.keyword(), tag, &surface.body(mesh)?);
        }
        for (_, tag, surface_loop) in mesh.surface_loops() {
            statement(out, "Surface Loop", tag, &surface_loop.body(mesh)?);
        }
        for (_, tag, volume) in mesh.volumes() {
            statement(out, volume.keyword(), tag, &volume.body(mesh)?);
        }
        debug!(
            points = mesh.len(Category::Point),
            curves = mesh.len(Category::Curve),
            surfaces = mesh.len(Category::Surface),
            volumes = mesh.len(Category::Volume),
            "wrote geometry"
        );
        Ok(())
    }

    fn write_groups(&self, out: &mut String) -> Result<()> {
        let mesh = self.mesh;
        if mesh.len(Category::PhysicalGroup) == 0 {
            return Ok(());
        }
        out.push_str("\n// Physical Groups\n");
        for (_, tag, group) in mesh.groups() {
            let label = match group.name() {
                Some(name) => format!("{}, {tag}", quoted(name)),
                None => tag.to_string(),
            };
            for (kind, members) in group.buckets() {
                let keyword = match kind {
                    MemberKind::Point => "Physical Point",
                    MemberKind::Curve => "Physical Curve",
                    MemberKind::Surface => "Physical Surface",
                    MemberKind::Volume => "Physical Volume",
                };
                let tags = tags_of(mesh, members)?;
                out.push_str(&format!("{keyword}({label}) = {};\n", braced(tags)));
            }
        }
        debug!(groups = mesh.len(Category::PhysicalGroup), "wrote physical groups");
        Ok(())
    }

    fn write_fields(&self, out: &mut String) -> Result<()> {
        let mesh = self.mesh;
        for (_, tag, field) in mesh.fields() {
            out.push_str(&format!("Field[{tag}] = {};\n", field.name()));
            for (name, value) in set_attrs(field.kind().attributes()) {
                out.push_str(&format!("Field[{tag}].{name} = {};\n", value.render(mesh)?));
            }
        }
        if let Some(field) = mesh.background_field() {
            out.push_str(&format!("Background Field = {};\n", mesh.field_tag(field)?));
        }
        if let Some(field) = mesh.boundary_layer_field() {
            out.push_str(&format!("BoundaryLayer Field = {};\n", mesh.field_tag(field)?));
        }
        Ok(())
    }

    fn write_settings(&self, out: &mut String) -> Result<()> {
        let mesh = self.mesh;
        for setting in mesh.options().settings() {
            out.push_str(&format!("{} = {};\n", setting.path(), setting.value.render(mesh)?));
        }
        if mesh.coherence() {
            out.push_str("Coherence;\n");
        }
        Ok(())
    }
}

fn statement(out: &mut String, keyword: &str, tag: Tag, body: &str) {
    out.push_str(&format!("{keyword}({tag}) = {body};\n"));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entity::{
        Curve, CurveLoop, PhysicalGroup, Point, PointId, Surface, SurfaceLoop, Volume,
    };
    use crate::error::{GeoscriptError, LoopError};
    use crate::field::{AttractorField, MathEvalField, MinField, ThresholdField};
    use crate::options::Color;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    fn points(mesh: &mut Mesh, coords: &[(f64, f64)]) -> Vec<PointId> {
        coords
            .iter()
            .map(|&(x, y)| mesh.add_point(Point::planar(x, y)).unwrap())
            .collect()
    }

    #[test]
    fn unit_square_end_to_end() {
        let mut mesh = Mesh::new();
        let group = mesh.add_group(PhysicalGroup::named("plate")).unwrap();
        let p = points(&mut mesh, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let edges: Vec<_> = (0..4)
            .map(|i| mesh.add_curve(Curve::line(p[i], p[(i + 1) % 4])).unwrap())
            .collect();
        let boundary = mesh.add_curve_loop(CurveLoop::new(edges)).unwrap();
        mesh.add_surface(Surface::plane(vec![boundary]).in_group(group))
            .unwrap();

        let geo = mesh.to_geo().unwrap();
        assert_eq!(
            lines(&geo),
            [
                "Point(1) = {0, 0, 0};",
                "Point(2) = {1, 0, 0};",
                "Point(3) = {1, 1, 0};",
                "Point(4) = {0, 1, 0};",
                "Line(1) = {1, 2};",
                "Line(2) = {2, 3};",
                "Line(3) = {3, 4};",
                "Line(4) = {4, 1};",
                "Curve Loop(1) = {1, 2, 3, 4};",
                "Plane Surface(1) = {1};",
                "",
                "// Physical Groups",
                "Physical Surface(\"plate\", 1) = {1};",
            ]
        );
    }

    #[test]
    fn loop_orientation_is_inferred_from_endpoints() {
        let mut mesh = Mesh::new();
        let p = points(&mut mesh, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let c1 = mesh.add_curve(Curve::line(p[0], p[1])).unwrap();
        let c2 = mesh.add_curve(Curve::line(p[2], p[1])).unwrap();
        let c3 = mesh.add_curve(Curve::line(p[0], p[2])).unwrap();
        mesh.add_curve_loop(CurveLoop::new(vec![c1, c2, c3])).unwrap();

        let geo = mesh.to_geo().unwrap();
        assert!(geo.contains("Curve Loop(1) = {1, -2, -3};\n"));
    }

    #[test]
    fn open_loop_fails_to_render() {
        let mut mesh = Mesh::new();
        let p = points(&mut mesh, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let c1 = mesh.add_curve(Curve::line(p[0], p[1])).unwrap();
        let c2 = mesh.add_curve(Curve::line(p[2], p[3])).unwrap();
        mesh.add_curve_loop(CurveLoop::new(vec![c1, c2]).with_tag(7))
            .unwrap();

        let err = mesh.to_geo().unwrap_err();
        assert!(matches!(
            err,
            GeoscriptError::Loop(LoopError::NotClosed {
                loop_tag: 7,
                curve_tag: 1
            })
        ));
    }

    #[test]
    fn signed_tag_loops_are_written_verbatim() {
        let mut mesh = Mesh::new();
        mesh.add_curve_loop(CurveLoop::from_signed_tags(vec![4, -2, 9]))
            .unwrap();
        assert_eq!(mesh.to_geo().unwrap(), "Curve Loop(1) = {4, -2, 9};\n");
    }

    #[test]
    fn surfaces_reference_assigned_loop_tags() {
        let mut mesh = Mesh::new();
        let p = points(&mut mesh, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let c: Vec<_> = (0..3)
            .map(|i| mesh.add_curve(Curve::line(p[i], p[(i + 1) % 3])).unwrap())
            .collect();
        let outer = mesh
            .add_curve_loop(CurveLoop::new(c.clone()).with_tag(5))
            .unwrap();
        let inner = mesh
            .add_curve_loop(CurveLoop::new(c).with_tag(6))
            .unwrap();
        mesh.add_surface(Surface::plane(vec![outer, inner]).with_tag(2))
            .unwrap();

        let geo = mesh.to_geo().unwrap();
        assert!(geo.contains("Plane Surface(2) = {5, 6};\n"));
    }

    #[test]
    fn curve_variants_render_their_point_lists() {
        let mut mesh = Mesh::new();
        let p = points(&mut mesh, &[(1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (2.0, 0.0)]);
        let arc = mesh.add_curve(Curve::circle(p[0], p[1], p[2])).unwrap();
        let ell = mesh
            .add_curve(Curve::ellipse(p[0], p[1], p[3], p[2]))
            .unwrap();
        mesh.add_curve(Curve::bspline(vec![p[0], p[3], p[2]])).unwrap();
        mesh.add_curve(Curve::compound(vec![arc, ell])).unwrap();

        let geo = mesh.to_geo().unwrap();
        assert!(geo.contains("Circle(1) = {1, 2, 3};\n"));
        assert!(geo.contains("Ellipse(2) = {1, 2, 4, 3};\n"));
        assert!(geo.contains("BSpline(3) = {1, 4, 3};\n"));
        assert!(geo.contains("Compound Curve(4) = {1, 2};\n"));
    }

    #[test]
    fn volumes_and_ruled_surfaces() {
        let mut mesh = Mesh::new();
        let p = points(&mut mesh, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let c: Vec<_> = (0..3)
            .map(|i| mesh.add_curve(Curve::line(p[i], p[(i + 1) % 3])).unwrap())
            .collect();
        let l = mesh.add_curve_loop(CurveLoop::new(c)).unwrap();
        let s = mesh
            .add_surface(Surface::ruled_in_sphere(vec![l], p[0]))
            .unwrap();
        let sl = mesh.add_surface_loop(SurfaceLoop::new(vec![s])).unwrap();
        let v = mesh.add_volume(Volume::new(vec![sl])).unwrap();
        mesh.add_volume(Volume::compound(vec![v])).unwrap();

        let geo = mesh.to_geo().unwrap();
        assert!(geo.contains("Ruled Surface(1) = {1} In Sphere {1};\n"));
        assert!(geo.contains("Surface Loop(1) = {1};\n"));
        assert!(geo.contains("Volume(1) = {1};\n"));
        assert!(geo.contains("Compound Volume(2) = {1};\n"));
    }

    #[test]
    fn groups_write_one_statement_per_non_empty_bucket() {
        let mut mesh = Mesh::new();
        let g = mesh.add_group(PhysicalGroup::new().with_tag(10)).unwrap();
        let p = points(&mut mesh, &[(0.0, 0.0), (1.0, 0.0)]);
        let c = mesh.add_curve(Curve::line(p[0], p[1])).unwrap();
        mesh.add_to_group(g, p[1]).unwrap();
        mesh.add_to_group(g, p[0]).unwrap();
        mesh.add_to_group(g, c).unwrap();

        let geo = mesh.to_geo().unwrap();
        assert!(geo.contains("Physical Point(10) = {2, 1};\n"));
        assert!(geo.contains("Physical Curve(10) = {1};\n"));
        assert!(!geo.contains("Physical Surface"));
    }

    #[test]
    fn quoted_text_is_escaped() {
        let mut mesh = Mesh::new();
        let g = mesh.add_group(PhysicalGroup::named(r#"say "hi""#)).unwrap();
        mesh.add_point(Point::planar(0.0, 0.0).in_group(g)).unwrap();
        mesh.add_field(MathEvalField::new(r"a\b").into()).unwrap();

        let geo = mesh.to_geo().unwrap();
        assert!(geo.contains(r#"Physical Point("say \"hi\"", 1) = {1};"#));
        assert!(geo.contains(r#"Field[1].F = "a\\b";"#));
    }

    #[test]
    fn fields_skip_unset_attributes_and_resolve_references() {
        let mut mesh = Mesh::new();
        let p = points(&mut mesh, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let attractor = mesh
            .add_field(
                AttractorField {
                    nodes: Some(p.clone()),
                    ..AttractorField::default()
                }
                .into(),
            )
            .unwrap();
        let threshold = mesh
            .add_field(
                ThresholdField {
                    i_field: Some(attractor),
                    lc_min: Some(0.05),
                    dist_max: None,
                    stop_at_dist_max: Some(true),
                    ..ThresholdField::default()
                }
                .into(),
            )
            .unwrap();
        let formula = mesh.add_field(MathEvalField::new("0.1*x").into()).unwrap();
        let min = mesh
            .add_field(MinField::new(vec![threshold, formula]).into())
            .unwrap();
        mesh.set_background_field(min).unwrap();
        mesh.set_boundary_layer_field(attractor).unwrap();

        let geo = mesh.to_geo().unwrap();
        let fields: Vec<_> = lines(&geo)
            .into_iter()
            .filter(|l| l.contains("Field"))
            .collect();
        assert_eq!(
            fields,
            [
                "Field[1] = Attractor;",
                "Field[1].NodesList = {1, 2, 3};",
                "Field[2] = Threshold;",
                "Field[2].IField = 1;",
                "Field[2].LcMin = 0.05;",
                "Field[2].StopAtDistMax = 1;",
                "Field[3] = MathEval;",
                "Field[3].F = \"0.1*x\";",
                "Field[4] = Min;",
                "Field[4].FieldsList = {2, 3};",
                "Background Field = 4;",
                "BoundaryLayer Field = 1;",
            ]
        );
        assert!(!geo.contains("].DistMax"));
    }

    #[test]
    fn options_and_coherence_close_the_script() {
        let mut mesh = Mesh::new();
        mesh.add_point(Point::xyz(0.0, 0.0, 0.0).with_mesh_size(0.1))
            .unwrap();
        mesh.options_mut().mesh.characteristic_length_max = Some(0.5);
        mesh.options_mut().geometry.color.points = Some(Color::Rgb(255, 0, 0));
        mesh.set_coherence(true);

        assert_eq!(
            lines(&mesh.to_geo().unwrap()),
            [
                "Point(1) = {0, 0, 0, 0.1};",
                "Geometry.Color.Points = {255, 0, 0};",
                "Mesh.CharacteristicLengthMax = 0.5;",
                "Coherence;",
            ]
        );
    }

    #[test]
    fn write_matches_render() {
        let mut mesh = Mesh::new();
        mesh.add_point(Point::xyz(1.0, 2.0, 3.0)).unwrap();
        let mut buf = Vec::new();
        mesh.write_geo(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), mesh.to_geo().unwrap());
    }

    #[test]
    fn file_output_round_trips_through_disk() {
        let mut mesh = Mesh::new();
        mesh.add_point(Point::xyz(1.0, 2.0, 3.0)).unwrap();
        let path = std::env::temp_dir().join(format!("geoscript-{}.geo", std::process::id()));
        mesh.write_geo_file(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text, "Point(1) = {1, 2, 3};\n");
    }
}
