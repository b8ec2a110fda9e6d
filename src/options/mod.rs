//! Global gmsh options.
//!
//! Every setting is optional; unset settings keep gmsh's default and are not
//! written. Set settings are rendered as `<Group>.<Name> = <value>;` and
//! colors as `<Group>.Color.<Name> = <value>;`.

use std::fmt;

use crate::render::Attr;

/// An option color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    /// Rendered as `{r, g, b}`.
    Rgb(u8, u8, u8),
    /// A gmsh color name such as `Red`, rendered bare.
    Named(String),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "{{{r}, {g}, {b}}}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// One set option, ready to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSetting<'a> {
    /// Option group, e.g. `Mesh`.
    pub group: &'static str,
    /// `true` for entries of the group's `Color` sub-bundle.
    pub color: bool,
    /// Option name, e.g. `CharacteristicLengthMax`.
    pub name: &'static str,
    pub value: Attr<'a>,
}

impl OptionSetting<'_> {
    /// Returns the dotted option path, e.g. `Mesh.Color.Points`.
    #[must_use]
    pub fn path(&self) -> String {
        if self.color {
            format!("{}.Color.{}", self.group, self.name)
        } else {
            format!("{}.{}", self.group, self.name)
        }
    }
}

type Entries<'a> = Vec<(&'static str, Option<Attr<'a>>)>;

/// Colors of the `General` group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralColors {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub text: Option<Color>,
    pub axes: Option<Color>,
}

impl GeneralColors {
    fn entries(&self) -> Entries<'_> {
        vec![
            ("Background", self.background.as_ref().map(Attr::Color)),
            ("Foreground", self.foreground.as_ref().map(Attr::Color)),
            ("Text", self.text.as_ref().map(Attr::Color)),
            ("Axes", self.axes.as_ref().map(Attr::Color)),
        ]
    }
}

/// Colors of geometric or mesh entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityColors {
    pub points: Option<Color>,
    pub lines: Option<Color>,
    pub surfaces: Option<Color>,
    pub volumes: Option<Color>,
}

impl EntityColors {
    fn entries(&self) -> Entries<'_> {
        vec![
            ("Points", self.points.as_ref().map(Attr::Color)),
            ("Lines", self.lines.as_ref().map(Attr::Color)),
            ("Surfaces", self.surfaces.as_ref().map(Attr::Color)),
            ("Volumes", self.volumes.as_ref().map(Attr::Color)),
        ]
    }
}

/// The `General` option group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralOptions {
    pub terminal: Option<bool>,
    pub verbosity: Option<i64>,
    pub num_threads: Option<i64>,
    pub axes: Option<i64>,
    pub small_axes: Option<bool>,
    pub expert_mode: Option<bool>,
    pub color: GeneralColors,
}

impl GeneralOptions {
    fn entries(&self) -> Entries<'_> {
        vec![
            ("Terminal", self.terminal.map(Attr::Bool)),
            ("Verbosity", self.verbosity.map(Attr::Int)),
            ("NumThreads", self.num_threads.map(Attr::Int)),
            ("Axes", self.axes.map(Attr::Int)),
            ("SmallAxes", self.small_axes.map(Attr::Bool)),
            ("ExpertMode", self.expert_mode.map(Attr::Bool)),
        ]
    }
}

/// The `Geometry` option group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryOptions {
    pub tolerance: Option<f64>,
    pub auto_coherence: Option<bool>,
    pub points: Option<bool>,
    pub lines: Option<bool>,
    pub surfaces: Option<bool>,
    pub volumes: Option<bool>,
    pub point_numbers: Option<bool>,
    pub line_numbers: Option<bool>,
    pub surface_numbers: Option<bool>,
    pub volume_numbers: Option<bool>,
    pub color: EntityColors,
}

impl GeometryOptions {
    fn entries(&self) -> Entries<'_> {
        vec![
            ("Tolerance", self.tolerance.map(Attr::Real)),
            ("AutoCoherence", self.auto_coherence.map(Attr::Bool)),
            ("Points", self.points.map(Attr::Bool)),
            ("Lines", self.lines.map(Attr::Bool)),
            ("Surfaces", self.surfaces.map(Attr::Bool)),
            ("Volumes", self.volumes.map(Attr::Bool)),
            ("PointNumbers", self.point_numbers.map(Attr::Bool)),
            ("LineNumbers", self.line_numbers.map(Attr::Bool)),
            ("SurfaceNumbers", self.surface_numbers.map(Attr::Bool)),
            ("VolumeNumbers", self.volume_numbers.map(Attr::Bool)),
        ]
    }
}

/// The `Mesh` option group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshOptions {
    pub algorithm: Option<i64>,
    pub algorithm_3d: Option<i64>,
    pub characteristic_length_min: Option<f64>,
    pub characteristic_length_max: Option<f64>,
    pub characteristic_length_factor: Option<f64>,
    pub characteristic_length_from_points: Option<bool>,
    pub characteristic_length_extend_from_boundary: Option<bool>,
    pub characteristic_length_from_curvature: Option<bool>,
    pub element_order: Option<i64>,
    pub recombine_all: Option<bool>,
    pub smoothing: Option<i64>,
    pub optimize: Option<bool>,
    pub optimize_netgen: Option<bool>,
    pub random_factor: Option<f64>,
    pub scaling_factor: Option<f64>,
    pub save_all: Option<bool>,
    pub msh_file_version: Option<f64>,
    pub format: Option<i64>,
    pub color: EntityColors,
}

impl MeshOptions {
    fn entries(&self) -> Entries<'_> {
        vec![
            ("Algorithm", self.algorithm.map(Attr::Int)),
            ("Algorithm3D", self.algorithm_3d.map(Attr::Int)),
            (
                "CharacteristicLengthMin",
                self.characteristic_length_min.map(Attr::Real),
            ),
            (
                "CharacteristicLengthMax",
                self.characteristic_length_max.map(Attr::Real),
            ),
            (
                "CharacteristicLengthFactor",
                self.characteristic_length_factor.map(Attr::Real),
            ),
            (
                "CharacteristicLengthFromPoints",
                self.characteristic_length_from_points.map(Attr::Bool),
            ),
            (
                "CharacteristicLengthExtendFromBoundary",
                self.characteristic_length_extend_from_boundary.map(Attr::Bool),
            ),
            (
                "CharacteristicLengthFromCurvature",
                self.characteristic_length_from_curvature.map(Attr::Bool),
            ),
            ("ElementOrder", self.element_order.map(Attr::Int)),
            ("RecombineAll", self.recombine_all.map(Attr::Bool)),
            ("Smoothing", self.smoothing.map(Attr::Int)),
            ("Optimize", self.optimize.map(Attr::Bool)),
            ("OptimizeNetgen", self.optimize_netgen.map(Attr::Bool)),
            ("RandomFactor", self.random_factor.map(Attr::Real)),
            ("ScalingFactor", self.scaling_factor.map(Attr::Real)),
            ("SaveAll", self.save_all.map(Attr::Bool)),
            ("MshFileVersion", self.msh_file_version.map(Attr::Real)),
            ("Format", self.format.map(Attr::Int)),
        ]
    }
}

/// All global option groups of a mesh script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub general: GeneralOptions,
    pub geometry: GeometryOptions,
    pub mesh: MeshOptions,
}

impl Options {
    /// Returns the set options in output order: `General`, `Geometry`,
    /// `Mesh`, each followed by its colors.
    #[must_use]
    pub fn settings(&self) -> Vec<OptionSetting<'_>> {
        let groups = [
            ("General", self.general.entries(), self.general.color.entries()),
            (
                "Geometry",
                self.geometry.entries(),
                self.geometry.color.entries(),
            ),
            ("Mesh", self.mesh.entries(), self.mesh.color.entries()),
        ];
        let mut settings = Vec::new();
        for (group, entries, colors) in groups {
            let plain = entries.into_iter().map(|entry| (false, entry));
            let colored = colors.into_iter().map(|entry| (true, entry));
            settings.extend(plain.chain(colored).filter_map(|(color, (name, value))| {
                value.map(|value| OptionSetting {
                    group,
                    color,
                    name,
                    value,
                })
            }));
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_write_nothing() {
        assert!(Options::default().settings().is_empty());
    }

    #[test]
    fn settings_are_grouped_and_dotted() {
        let mut options = Options::default();
        options.mesh.characteristic_length_max = Some(0.5);
        options.mesh.color.points = Some(Color::Rgb(255, 0, 0));
        options.general.terminal = Some(true);

        let rendered: Vec<_> = options
            .settings()
            .iter()
            .map(|s| (s.path(), s.value))
            .collect();
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0], ("General.Terminal".to_string(), Attr::Bool(true)));
        assert_eq!(rendered[1].0, "Mesh.CharacteristicLengthMax");
        assert_eq!(rendered[2].0, "Mesh.Color.Points");
    }

    #[test]
    fn colors_render_as_triples_or_names() {
        assert_eq!(Color::Rgb(0, 128, 255).to_string(), "{0, 128, 255}");
        assert_eq!(Color::Named("Red".into()).to_string(), "Red");
    }
}
