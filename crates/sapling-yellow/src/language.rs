//! Per-language hooks that turn raw kinds into concrete node types.

use std::fmt;
use std::hash::Hash;

use crate::{ChildrenError, GreenNode};

/// How a composite renders its children.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Layout {
    /// Children are concatenated as they are.
    #[default]
    Verbatim,
    /// `{`, the children joined by a single space, `}`.
    Braced,
}

/// A family of node kinds sharing one tree representation.
///
/// Every hook has a permissive default, so a language only spells out the
/// constraints it actually has.
pub trait Language: Sized + Copy + fmt::Debug + Eq + Hash + Send + Sync + 'static {
    type Kind: Copy + fmt::Debug + Eq + Hash + Send + Sync + 'static;

    /// Kind of the leaves synthesized for text with no original counterpart.
    const CHANGE: Self::Kind;

    /// Kind of the composites synthesized around reassembled children.
    ///
    /// Nodes of this kind are built without consulting [`Language::check_children`].
    const CHANGE_LIST: Self::Kind;

    /// Validates the children of a composite of `kind`.
    fn check_children(kind: Self::Kind, children: &[GreenNode<Self>]) -> Result<(), ChildrenError> {
        let _ = (kind, children);
        Ok(())
    }

    fn layout(kind: Self::Kind) -> Layout {
        let _ = kind;
        Layout::Verbatim
    }

    /// Whether trivia takes part in structural equality for `kind`.
    fn trivia_is_significant(kind: Self::Kind) -> bool {
        let _ = kind;
        true
    }
}

/// Accepts exactly one child per slot, each of the slot's kind.
pub fn check_slots<L: Language>(
    children: &[GreenNode<L>],
    slots: &[L::Kind],
) -> Result<(), ChildrenError> {
    if children.len() != slots.len() {
        return Err(ChildrenError::Arity { expected: slots.len(), found: children.len() });
    }

    for (index, (child, &slot)) in children.iter().zip(slots).enumerate() {
        if child.kind() != slot {
            return Err(ChildrenError::unexpected_kind(index, slot, child.kind()));
        }
    }

    Ok(())
}
