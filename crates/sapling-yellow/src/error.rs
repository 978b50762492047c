use std::fmt;

use thiserror::Error;

/// Failure of a construction or editing operation.
///
/// The receiver of a failed call is never modified.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TreeError {
    #[error("leaf `{kind}` was constructed without a text payload")]
    NullPayload { kind: String },
    #[error("invalid children for `{kind}`: {reason}")]
    InvalidChildren { kind: String, reason: ChildrenError },
    #[error("node is not a descendant of the receiver")]
    NodeNotFound,
}

impl TreeError {
    pub(crate) fn null_payload(kind: impl fmt::Debug) -> Self {
        Self::NullPayload { kind: format!("{kind:?}") }
    }

    pub(crate) fn invalid_children(kind: impl fmt::Debug, reason: ChildrenError) -> Self {
        Self::InvalidChildren { kind: format!("{kind:?}"), reason }
    }
}

/// Why a composite rejected a set of children.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ChildrenError {
    #[error("expected {expected} children, found {found}")]
    Arity { expected: usize, found: usize },
    #[error("child {index} should be `{expected}`, found `{found}`")]
    UnexpectedKind { index: usize, expected: String, found: String },
    #[error("leaves cannot have children")]
    LeafHasChildren,
    #[error("child {index} is already a child of this node")]
    DuplicateChild { index: usize },
}

impl ChildrenError {
    /// Reports a child of the wrong kind at `index`.
    pub fn unexpected_kind(index: usize, expected: impl fmt::Debug, found: impl fmt::Debug) -> Self {
        Self::UnexpectedKind { index, expected: format!("{expected:?}"), found: format!("{found:?}") }
    }
}
