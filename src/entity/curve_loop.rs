use crate::error::{GeoscriptError, LoopError};
use crate::render::braced;

use super::curve::CurveId;
use super::{EntityMeta, EntityRef, Resolve, Tag};

slotmap::new_key_type! {
    /// Unique identifier for a curve loop in the mesh registry.
    pub struct CurveLoopId;
}

/// The members of a curve loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopCurves {
    /// Registered curves in any direction; orientation is inferred from
    /// shared endpoints when the loop is rendered.
    Curves(Vec<CurveId>),
    /// Signed curve tags emitted verbatim.
    Signed(Vec<i64>),
}

/// A closed chain of curves bounding a surface.
#[derive(Debug, Clone)]
pub struct CurveLoop {
    curves: LoopCurves,
    pub(crate) meta: EntityMeta,
}

impl CurveLoop {
    /// Creates a loop over registered curves.
    #[must_use]
    pub fn new(curves: Vec<CurveId>) -> Self {
        Self {
            curves: LoopCurves::Curves(curves),
            meta: EntityMeta::default(),
        }
    }

    /// Creates a loop from signed curve tags, skipping orientation inference.
    #[must_use]
    pub fn from_signed_tags(tags: Vec<i64>) -> Self {
        Self {
            curves: LoopCurves::Signed(tags),
            meta: EntityMeta::default(),
        }
    }

    /// Returns the loop members.
    #[must_use]
    pub fn curves(&self) -> &LoopCurves {
        &self.curves
    }

    /// Replaces the loop members.
    pub fn set_curves(&mut self, curves: LoopCurves) {
        self.curves = curves;
    }

    /// Returns the registered curves this loop references.
    #[must_use]
    pub fn references(&self) -> Vec<EntityRef> {
        match &self.curves {
            LoopCurves::Curves(curves) => curves.iter().map(|&c| c.into()).collect(),
            LoopCurves::Signed(_) => Vec::new(),
        }
    }

    pub(crate) fn check(&self) -> Result<(), &'static str> {
        let empty = match &self.curves {
            LoopCurves::Curves(curves) => curves.is_empty(),
            LoopCurves::Signed(tags) => tags.is_empty(),
        };
        if empty {
            Err("a curve loop needs at least one curve")
        } else {
            Ok(())
        }
    }

    /// Returns the signed, head-to-tail ordered curve tags of the loop.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError`] if the curves do not chain, and a registry
    /// error if a curve is not registered with `resolver`.
    pub fn signed_tags<R: Resolve + ?Sized>(
        &self,
        loop_tag: Tag,
        resolver: &R,
    ) -> Result<Vec<i64>, GeoscriptError> {
        let ids = match &self.curves {
            LoopCurves::Signed(tags) => return Ok(tags.clone()),
            LoopCurves::Curves(ids) => ids,
        };
        let mut chain = Vec::with_capacity(ids.len());
        for &id in ids {
            let tag = resolver.tag_of(id.into())?;
            let (start, end) = resolver.curve(id)?.endpoints().ok_or(LoopError::NoEndpoints {
                loop_tag,
                curve_tag: tag,
            })?;
            chain.push((tag, [start, end]));
        }
        Ok(orient(loop_tag, &chain)?)
    }

    /// Renders the signed reference list, e.g. `{1, -2, 3}`.
    ///
    /// # Errors
    ///
    /// See [`CurveLoop::signed_tags`].
    pub fn body<R: Resolve + ?Sized>(
        &self,
        loop_tag: Tag,
        resolver: &R,
    ) -> Result<String, GeoscriptError> {
        Ok(braced(self.signed_tags(loop_tag, resolver)?))
    }
}

/// Orients a cyclic sequence of curves given as `(tag, [start, end])`.
///
/// Each curve is compared with its cyclic predecessor; the first curve
/// compares with the last. The first matching rule wins:
///
/// 1. predecessor end == curve start → `+tag`
/// 2. predecessor end == curve end → `-tag`
/// 3. predecessor start == curve start → `+tag`
/// 4. predecessor start == curve end → `-tag`
///
/// # Errors
///
/// Returns [`LoopError::NotClosed`] if a curve shares no endpoint with its
/// predecessor.
pub fn orient<P: PartialEq>(loop_tag: Tag, curves: &[(Tag, [P; 2])]) -> Result<Vec<i64>, LoopError> {
    let n = curves.len();
    let mut signed = Vec::with_capacity(n);
    for (i, (tag, [start, end])) in curves.iter().enumerate() {
        let [prev_start, prev_end] = &curves[(i + n - 1) % n].1;
        let tag = i64::from(*tag);
        if prev_end == start {
            signed.push(tag);
        } else if prev_end == end {
            signed.push(-tag);
        } else if prev_start == start {
            signed.push(tag);
        } else if prev_start == end {
            signed.push(-tag);
        } else {
            return Err(LoopError::NotClosed {
                loop_tag,
                curve_tag: curves[i].0,
            });
        }
    }
    Ok(signed)
}
