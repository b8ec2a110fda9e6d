use thiserror::Error;

use crate::entity::{Category, Tag};

/// Top-level error type for geoscript.
#[derive(Debug, Error)]
pub enum GeoscriptError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Group(#[from] GroupError),

    #[error(transparent)]
    Loop(#[from] LoopError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to write .geo output: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the mesh registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{category} {tag} already exists")]
    DuplicateTag { category: Category, tag: Tag },

    #[error("no {category} with tag {tag}")]
    TagNotFound { category: Category, tag: Tag },

    /// The handle names no slot of the mesh. Handles are not stamped with
    /// their mesh, so one taken from another mesh may still name a slot here.
    #[error("no {0} is registered under this handle")]
    NotFound(Category),

    #[error("{0} cannot be looked up as a geometric entity")]
    UnsupportedCategory(Category),

    #[error("tag 0 is not a valid {0} tag")]
    InvalidTag(Category),

    #[error("invalid {category}: {reason}")]
    InvalidEntity {
        category: Category,
        reason: &'static str,
    },
}

/// Errors raised by physical group membership.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("{0} is already a member of this physical group")]
    DuplicateMember(Category),
}

/// Errors raised while orienting the curves of a curve loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoopError {
    #[error("curve loop {loop_tag}: curve {curve_tag} shares no endpoint with its predecessor")]
    NotClosed { loop_tag: Tag, curve_tag: Tag },

    #[error("curve loop {loop_tag}: curve {curve_tag} has no known endpoints")]
    NoEndpoints { loop_tag: Tag, curve_tag: Tag },
}

/// Errors raised while converting a domain description.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{what} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("facet {0} is a hole and has no surface")]
    HoleFacet(usize),

    #[error("vertex {index} has {found} coordinates, expected {expected}")]
    VertexArity {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Convenience type alias for results using [`GeoscriptError`].
pub type Result<T> = std::result::Result<T, GeoscriptError>;
