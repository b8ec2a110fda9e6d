//! Value formatting shared by entities, fields and options.

use std::fmt::Display;

use crate::entity::{tags_of, CurveId, PointId, Resolve, SurfaceId, VolumeId};
use crate::error::RegistryError;
use crate::field::FieldId;
use crate::options::Color;

/// Joins `items` into a brace-delimited list: `{a, b, c}`.
pub fn braced<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let inner: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("{{{}}}", inner.join(", "))
}

/// Formats a real number the way `.geo` statements carry it.
#[must_use]
pub fn fmt_real(value: f64) -> String {
    value.to_string()
}

/// Wraps `text` in double quotes, escaping `"` and `\\`.
#[must_use]
pub fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// The value of a field attribute or global option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attr<'a> {
    Int(i64),
    Real(f64),
    /// Rendered as `1` / `0`.
    Bool(bool),
    /// Rendered double-quoted.
    Str(&'a str),
    Color(&'a Color),
    Field(FieldId),
    Fields(&'a [FieldId]),
    Points(&'a [PointId]),
    Curves(&'a [CurveId]),
    Surfaces(&'a [SurfaceId]),
    Volumes(&'a [VolumeId]),
}

impl Attr<'_> {
    /// Renders the value, resolving references into tags.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if a referenced entity is not
    /// registered with `resolver`.
    pub fn render<R: Resolve + ?Sized>(&self, resolver: &R) -> Result<String, RegistryError> {
        Ok(match *self {
            Self::Int(v) => v.to_string(),
            Self::Real(v) => fmt_real(v),
            Self::Bool(v) => u8::from(v).to_string(),
            Self::Str(v) => quoted(v),
            Self::Color(c) => c.to_string(),
            Self::Field(id) => resolver.field_tag(id)?.to_string(),
            Self::Fields(ids) => braced(
                ids.iter()
                    .map(|&id| resolver.field_tag(id))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Self::Points(ids) => braced(tags_of(resolver, ids.iter().copied())?),
            Self::Curves(ids) => braced(tags_of(resolver, ids.iter().copied())?),
            Self::Surfaces(ids) => braced(tags_of(resolver, ids.iter().copied())?),
            Self::Volumes(ids) => braced(tags_of(resolver, ids.iter().copied())?),
        })
    }
}

/// Keeps the attributes that are set, in their listed order.
pub fn set_attrs<'a>(
    attrs: Vec<(&'static str, Option<Attr<'a>>)>,
) -> impl Iterator<Item = (&'static str, Attr<'a>)> {
    attrs
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn braced_lists_are_comma_separated() {
        assert_eq!(braced([1, -2, 3]), "{1, -2, 3}");
        assert_eq!(braced(Vec::<u32>::new()), "{}");
    }

    #[test]
    fn strings_escape_quotes_and_backslashes() {
        assert_eq!(quoted("inlet"), "\"inlet\"");
        assert_eq!(quoted(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn unset_attributes_are_skipped() {
        let attrs = vec![
            ("DistMin", Some(Attr::Real(0.5))),
            ("DistMax", None),
            ("Sigmoid", Some(Attr::Bool(true))),
        ];
        let names: Vec<_> = set_attrs(attrs).map(|(name, _)| name).collect();
        assert_eq!(names, ["DistMin", "Sigmoid"]);
    }
}
