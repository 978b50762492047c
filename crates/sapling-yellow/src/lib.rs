//! Immutable, structurally shared syntax trees.
//!
//! Green nodes own content and length and know nothing about where they sit.
//! Red nodes are lazily materialized views over green nodes that add parent,
//! position and owning-tree context. A [`SyntaxTree`] binds a root to an
//! identity; every "edit" produces a new tree that shares the untouched
//! subtrees of the old one.

/// Typed wrappers around red nodes and trees.
pub mod ast;
mod builder;
mod cursor;
mod error;
mod green;
mod language;
mod red;
mod tree;
mod trivia;

#[cfg(test)]
mod tests;

/// Event-style builder for green trees.
pub use builder::{Builder, Checkpoint};
/// Preorder traversal over red nodes.
pub use cursor::{Preorder, WalkEvent};
/// Construction and editing failures.
pub use error::{ChildrenError, TreeError};
/// Position-independent storage.
pub use green::{GreenNode, Leaves};
/// Hooks that give kinds their node semantics.
pub use language::{Language, Layout, check_slots};
/// Position-aware views.
pub use red::{RedChildren, RedNode};
pub use text_size::{TextLen, TextRange, TextSize};
/// Tree identity.
pub use tree::SyntaxTree;
/// Trivia attached to nodes.
pub use trivia::{GreenTrivia, TriviaPiece, TriviaPieceKind};
