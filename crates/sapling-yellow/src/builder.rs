//! Event-style builder for green trees.

use crate::{GreenNode, GreenTrivia, Language, TreeError};

struct Opened<L: Language> {
    kind: L::Kind,
    leading: GreenTrivia,
    first_child: usize,
}

/// Position in the child stack, used to wrap already-built children later.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Checkpoint(usize);

/// Builds a green tree from `start_node` / `token` / `finish_node` events.
///
/// Composites are validated by the language as they are finished.
pub struct Builder<L: Language> {
    opened: Vec<Opened<L>>,
    children: Vec<GreenNode<L>>,
}

const DEFAULT_TREE_DEPTH: usize = 32;
const DEFAULT_CHILDREN_LEN: usize = 64;

impl<L: Language> Drop for Builder<L> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

impl<L: Language> Default for Builder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Language> Builder<L> {
    pub fn new() -> Self {
        Self {
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children: Vec::with_capacity(DEFAULT_CHILDREN_LEN),
        }
    }

    /// Starts a new composite of the given kind.
    pub fn start_node(&mut self, kind: L::Kind) {
        self.start_node_with_trivia(kind, GreenTrivia::empty());
    }

    pub fn start_node_with_trivia(&mut self, kind: L::Kind, leading: GreenTrivia) {
        self.opened.push(Opened { kind, leading, first_child: self.children.len() });
    }

    /// Starts a composite that adopts every child added since `checkpoint`.
    #[track_caller]
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: L::Kind) {
        let Checkpoint(first_child) = checkpoint;
        assert!(
            first_child <= self.children.len(),
            "checkpoint no longer valid, was `finish_node` called early?"
        );
        if let Some(parent) = self.opened.last() {
            assert!(
                first_child >= parent.first_child,
                "checkpoint no longer valid, was an unmatched `start_node` called?"
            );
        }
        self.opened.push(Opened { kind, leading: GreenTrivia::empty(), first_child });
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Adds a leaf to the current composite.
    pub fn token(&mut self, kind: L::Kind, text: &str) {
        self.children.push(GreenNode::token(kind, text));
    }

    pub fn token_with_trivia(
        &mut self,
        kind: L::Kind,
        leading: GreenTrivia,
        text: &str,
        trailing: GreenTrivia,
    ) {
        self.children.push(GreenNode::token_with_trivia(kind, leading, text, trailing));
    }

    /// Adds an already-built subtree, shared by reference.
    pub fn push(&mut self, green: GreenNode<L>) {
        self.children.push(green);
    }

    /// Finishes the most recently started composite.
    pub fn finish_node(&mut self) -> Result<(), TreeError> {
        self.finish_node_with_trivia(GreenTrivia::empty())
    }

    #[track_caller]
    pub fn finish_node_with_trivia(&mut self, trailing: GreenTrivia) -> Result<(), TreeError> {
        let Opened { kind, leading, first_child } =
            self.opened.pop().expect("no opened nodes?");
        let children = self.children.drain(first_child..);
        match GreenNode::node_with_trivia(kind, leading, children, trailing) {
            Ok(node) => {
                self.children.push(node);
                Ok(())
            }
            Err(error) => {
                // Leave the builder balanced so it can still be dropped.
                self.opened.clear();
                self.children.clear();
                Err(error)
            }
        }
    }

    /// Returns the single root that was built.
    #[track_caller]
    pub fn finish(mut self) -> GreenNode<L> {
        assert!(self.opened.is_empty(), "unfinished nodes left in the builder");
        assert_eq!(self.children.len(), 1, "a tree has exactly one root");
        self.children.pop().expect("checked above")
    }
}
