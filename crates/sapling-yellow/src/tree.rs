use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::red::WeakRedNode;
use crate::{GreenNode, Language, RedNode};

/// Immutable tree binding a root to an identity.
///
/// Equality compares the roots structurally; use [`SyntaxTree::ptr_eq`] for
/// identity.
pub struct SyntaxTree<L: Language> {
    ptr: Arc<TreeData<L>>,
}

struct TreeData<L: Language> {
    green: GreenNode<L>,
    root: Mutex<WeakRedNode<L>>,
}

impl<L: Language> SyntaxTree<L> {
    pub fn new(green: GreenNode<L>) -> Self {
        Self { ptr: Arc::new(TreeData { green, root: Mutex::new(WeakRedNode::new()) }) }
    }

    pub fn root_green(&self) -> &GreenNode<L> {
        &self.ptr.green
    }

    /// The root red node, whose parent is `None` and whose tree is `self`.
    ///
    /// The same instance is returned for as long as somebody holds it.
    pub fn root(&self) -> RedNode<L> {
        let mut root = self.ptr.root.lock();
        if let Some(node) = root.upgrade() {
            return node;
        }

        let node = RedNode::new_in_tree(self.ptr.green.clone(), self.clone());
        *root = node.downgrade();
        node
    }

    /// Rendered text of the whole tree.
    pub fn text(&self) -> String {
        self.ptr.green.render()
    }

    /// A new tree around `root`'s green node; `self` is left untouched.
    pub fn set_root(&self, root: &RedNode<L>) -> Self {
        Self::new(root.green().clone())
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ptr, &other.ptr)
    }
}

impl<L: Language> Clone for SyntaxTree<L> {
    fn clone(&self) -> Self {
        Self { ptr: Arc::clone(&self.ptr) }
    }
}

impl<L: Language> PartialEq for SyntaxTree<L> {
    fn eq(&self, other: &Self) -> bool {
        self.root_green() == other.root_green()
    }
}

impl<L: Language> Eq for SyntaxTree<L> {}

impl<L: Language> fmt::Debug for SyntaxTree<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.root(), f)
    }
}
