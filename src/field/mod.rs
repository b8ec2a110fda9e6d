//! Mesh-size fields.
//!
//! A field is rendered as `Field[<tag>] = <Name>;` followed by one
//! `Field[<tag>].<Attr> = <value>;` line per attribute that is set.

mod kinds;

pub use kinds::{
    AttrList, AttractorField, BallField, BoundaryLayerField, BoxField, CylinderField,
    MathEvalField, MinField, RestrictField, ThresholdField,
};

use crate::entity::Tag;

slotmap::new_key_type! {
    /// Unique identifier for a field in the mesh registry.
    pub struct FieldId;
}

/// The variant of a field together with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    BoundaryLayer(BoundaryLayerField),
    Box(BoxField),
    MathEval(MathEvalField),
    Restrict(RestrictField),
    Attractor(AttractorField),
    Threshold(ThresholdField),
    Ball(BallField),
    Cylinder(CylinderField),
    Min(MinField),
}

impl FieldKind {
    /// Returns the gmsh type name of the field.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BoundaryLayer(_) => "BoundaryLayer",
            Self::Box(_) => "Box",
            Self::MathEval(_) => "MathEval",
            Self::Restrict(_) => "Restrict",
            Self::Attractor(_) => "Attractor",
            Self::Threshold(_) => "Threshold",
            Self::Ball(_) => "Ball",
            Self::Cylinder(_) => "Cylinder",
            Self::Min(_) => "Min",
        }
    }

    /// Returns every attribute of the field in output order, set or not.
    #[must_use]
    pub fn attributes(&self) -> AttrList<'_> {
        match self {
            Self::BoundaryLayer(f) => f.attributes(),
            Self::Box(f) => f.attributes(),
            Self::MathEval(f) => f.attributes(),
            Self::Restrict(f) => f.attributes(),
            Self::Attractor(f) => f.attributes(),
            Self::Threshold(f) => f.attributes(),
            Self::Ball(f) => f.attributes(),
            Self::Cylinder(f) => f.attributes(),
            Self::Min(f) => f.attributes(),
        }
    }
}

/// A mesh-size field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    tag: Option<Tag>,
    kind: FieldKind,
}

impl Field {
    /// Creates a field of the given kind.
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self { tag: None, kind }
    }

    /// Requests an explicit tag instead of automatic numbering.
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Returns the requested tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<Tag> {
        self.tag
    }

    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Gives mutable access to the attributes.
    pub fn kind_mut(&mut self) -> &mut FieldKind {
        &mut self.kind
    }

    /// Returns the gmsh type name of the field.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

macro_rules! impl_field_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldKind {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<$ty> for Field {
                fn from(value: $ty) -> Self {
                    Self::new(FieldKind::$variant(value))
                }
            }
        )*
    };
}

impl_field_from!(
    BoundaryLayer => BoundaryLayerField,
    Box => BoxField,
    MathEval => MathEvalField,
    Restrict => RestrictField,
    Attractor => AttractorField,
    Threshold => ThresholdField,
    Ball => BallField,
    Cylinder => CylinderField,
    Min => MinField,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{set_attrs, Attr};

    #[test]
    fn fresh_fields_have_no_set_attributes() {
        let kinds: [FieldKind; 4] = [
            BoundaryLayerField::default().into(),
            BoxField::default().into(),
            CylinderField::default().into(),
            MinField::default().into(),
        ];
        for kind in &kinds {
            assert!(!kind.attributes().is_empty());
            assert_eq!(set_attrs(kind.attributes()).count(), 0, "{}", kind.name());
        }
    }

    #[test]
    fn threshold_lists_attributes_in_gmsh_order() {
        let field = Field::from(ThresholdField {
            lc_min: Some(0.1),
            dist_max: Some(2.0),
            ..ThresholdField::default()
        });
        let set: Vec<_> = set_attrs(field.kind().attributes()).collect();
        assert_eq!(field.name(), "Threshold");
        assert_eq!(set, vec![("DistMax", Attr::Real(2.0)), ("LcMin", Attr::Real(0.1))]);
    }

    #[test]
    fn math_eval_carries_its_expression() {
        let field = Field::from(MathEvalField::new("0.1 + x*x")).with_tag(4);
        assert_eq!(field.tag(), Some(4));
        let set: Vec<_> = set_attrs(field.kind().attributes()).collect();
        assert_eq!(set, vec![("F", Attr::Str("0.1 + x*x"))]);
    }
}
