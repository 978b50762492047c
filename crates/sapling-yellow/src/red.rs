//! Position-aware views over green nodes.
//!
//! A child keeps its parent alive; a parent only remembers its materialized
//! children weakly, so there are no reference cycles. A child that is still
//! held somewhere is handed out again as the very same instance.

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::Mutex;
use text_size::{TextRange, TextSize};

use crate::cursor::{Preorder, WalkEvent};
use crate::{GreenNode, Language, SyntaxTree, TreeError};

/// Lazily materialized, position-aware view over a [`GreenNode`].
///
/// `==` compares the wrapped green nodes structurally, ignoring position,
/// parent and tree. Use [`RedNode::ptr_eq`] for identity.
pub struct RedNode<L: Language> {
    ptr: Arc<RedNodeData<L>>,
}

struct RedNodeData<L: Language> {
    green: GreenNode<L>,
    origin: Origin<L>,
    position: OnceLock<TextSize>,
    tree: OnceLock<Option<SyntaxTree<L>>>,
    children: OnceLock<Box<[Mutex<Weak<RedNodeData<L>>>]>>,
}

/// Where a red node is attached.
enum Origin<L: Language> {
    Detached,
    Root(SyntaxTree<L>),
    Child { parent: RedNode<L>, index: usize },
}

impl<L: Language> Clone for Origin<L> {
    fn clone(&self) -> Self {
        match self {
            Self::Detached => Self::Detached,
            Self::Root(tree) => Self::Root(tree.clone()),
            Self::Child { parent, index } => Self::Child { parent: parent.clone(), index: *index },
        }
    }
}

/// Weak handle used by caches that must not keep a red node alive.
pub(crate) struct WeakRedNode<L: Language> {
    ptr: Weak<RedNodeData<L>>,
}

impl<L: Language> WeakRedNode<L> {
    pub(crate) fn new() -> Self {
        Self { ptr: Weak::new() }
    }

    pub(crate) fn upgrade(&self) -> Option<RedNode<L>> {
        self.ptr.upgrade().map(|ptr| RedNode { ptr })
    }
}

impl<L: Language> RedNode<L> {
    /// Wraps `green` as a standalone node with no parent and no tree.
    pub fn new_root(green: GreenNode<L>) -> Self {
        Self::alloc(green, Origin::Detached)
    }

    pub(crate) fn new_in_tree(green: GreenNode<L>, tree: SyntaxTree<L>) -> Self {
        Self::alloc(green, Origin::Root(tree))
    }

    fn new_child(parent: &Self, index: usize, green: GreenNode<L>) -> Self {
        Self::alloc(green, Origin::Child { parent: parent.clone(), index })
    }

    fn alloc(green: GreenNode<L>, origin: Origin<L>) -> Self {
        let position = OnceLock::new();
        if matches!(origin, Origin::Detached | Origin::Root(_)) {
            let _ = position.set(TextSize::new(0));
        }

        Self {
            ptr: Arc::new(RedNodeData {
                green,
                origin,
                position,
                tree: OnceLock::new(),
                children: OnceLock::new(),
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> WeakRedNode<L> {
        WeakRedNode { ptr: Arc::downgrade(&self.ptr) }
    }

    pub fn green(&self) -> &GreenNode<L> {
        &self.ptr.green
    }

    pub fn kind(&self) -> L::Kind {
        self.green().kind()
    }

    pub fn is_leaf(&self) -> bool {
        self.green().is_leaf()
    }

    pub fn text_len(&self) -> TextSize {
        self.green().text_len()
    }

    /// Rendered text of the wrapped green node.
    pub fn text(&self) -> String {
        self.green().render()
    }

    pub fn parent(&self) -> Option<Self> {
        match &self.ptr.origin {
            Origin::Child { parent, .. } => Some(parent.clone()),
            Origin::Detached | Origin::Root(_) => None,
        }
    }

    /// Slot of this node among its parent's children.
    pub fn index(&self) -> Option<usize> {
        match self.ptr.origin {
            Origin::Child { index, .. } => Some(index),
            Origin::Detached | Origin::Root(_) => None,
        }
    }

    /// The tree this node belongs to, resolved through its ancestors once.
    pub fn tree(&self) -> Option<SyntaxTree<L>> {
        self.ptr
            .tree
            .get_or_init(|| match &self.ptr.origin {
                Origin::Detached => None,
                Origin::Root(tree) => Some(tree.clone()),
                Origin::Child { parent, .. } => parent.tree(),
            })
            .clone()
    }

    /// The parent's position plus the lengths of the preceding siblings.
    ///
    /// Preceding siblings are measured on the parent's green node without
    /// materializing them. Composite trivia is not counted; see [`Self::offset`].
    pub fn position(&self) -> TextSize {
        *self.ptr.position.get_or_init(|| match &self.ptr.origin {
            Origin::Detached | Origin::Root(_) => TextSize::new(0),
            Origin::Child { parent, index } => parent.position() + preceding(parent, *index),
        })
    }

    /// Offset of this node's text inside its root, past the leading trivia of
    /// every enclosing composite.
    pub fn offset(&self) -> TextSize {
        match &self.ptr.origin {
            Origin::Detached | Origin::Root(_) => TextSize::new(0),
            Origin::Child { parent, index } => {
                parent.offset() + parent.green().leading().len() + preceding(parent, *index)
            }
        }
    }

    /// Range of this node's text inside its root, trivia included.
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset(), self.text_len())
    }

    pub fn children(&self) -> RedChildren<'_, L> {
        RedChildren { parent: self }
    }

    pub fn first_child(&self) -> Option<Self> {
        self.children().get(0)
    }

    pub fn last_child(&self) -> Option<Self> {
        self.children().len().checked_sub(1).and_then(|index| self.children().get(index))
    }

    pub fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        parent.children().get(self.index()? + 1)
    }

    pub fn prev_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        parent.children().get(self.index()?.checked_sub(1)?)
    }

    /// This node followed by its parent, grandparent and so on.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<L> {
        std::iter::successors(Some(self.clone()), Self::parent)
    }

    pub fn preorder(&self) -> Preorder<L> {
        Preorder::new(self.clone())
    }

    /// This node and every node below it, in document order.
    pub fn descendants(&self) -> impl Iterator<Item = Self> + use<L> {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }

    pub fn leaves(&self) -> impl Iterator<Item = Self> + use<L> {
        self.descendants().filter(Self::is_leaf)
    }

    /// The leaf whose text range contains `offset`.
    pub fn leaf_at_offset(&self, offset: TextSize) -> Option<Self> {
        if !self.text_range().contains(offset) {
            return None;
        }

        let mut node = self.clone();
        while !node.is_leaf() {
            let child = node.children().iter().find(|child| child.text_range().contains(offset))?;
            node = child;
        }
        Some(node)
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ptr, &other.ptr)
    }

    /// Returns a node where `old` is replaced by `new`.
    ///
    /// `old` must be this node or one of its descendants, identified by the
    /// identity of the green nodes on the path down to it. Every subtree off
    /// that path is shared with this node. Replacing this node itself re-attaches
    /// `new` in this node's slot; otherwise the result is a detached root.
    pub fn replace_node(&self, old: &Self, new: &Self) -> Result<Self, TreeError> {
        let path = self.path_to(old).ok_or(TreeError::NodeNotFound)?;

        if path.is_empty() {
            return Ok(Self::alloc(new.green().clone(), self.ptr.origin.clone()));
        }

        let mut ancestors = Vec::with_capacity(path.len());
        let mut green = self.green();
        for &index in &path {
            ancestors.push(green);
            green = &green.children()[index];
        }

        let mut replacement = new.green().clone();
        for (ancestor, &index) in ancestors.into_iter().zip(&path).rev() {
            replacement = ancestor.replace_child(index, replacement)?;
        }

        Ok(Self::new_root(replacement))
    }

    /// Child indices leading from this node down to `target`.
    fn path_to(&self, target: &Self) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        for node in target.ancestors() {
            if node.ptr_eq(self) {
                path.reverse();
                return Some(path);
            }
            match node.index() {
                Some(index) => path.push(index),
                None => break,
            }
        }

        path.clear();
        find_green(self.green(), target.green(), &mut path).then_some(path)
    }
}

/// Summed length of the children of `parent` before `index`.
fn preceding<L: Language>(parent: &RedNode<L>, index: usize) -> TextSize {
    parent.green().children()[..index].iter().map(GreenNode::text_len).sum()
}

/// Depth-first search for `target` by identity.
fn find_green<L: Language>(
    node: &GreenNode<L>,
    target: &GreenNode<L>,
    path: &mut Vec<usize>,
) -> bool {
    if node.ptr_eq(target) {
        return true;
    }

    for (index, child) in node.children().iter().enumerate() {
        path.push(index);
        if find_green(child, target, path) {
            return true;
        }
        path.pop();
    }

    false
}

impl<L: Language> Clone for RedNode<L> {
    fn clone(&self) -> Self {
        Self { ptr: Arc::clone(&self.ptr) }
    }
}

impl<L: Language> PartialEq for RedNode<L> {
    fn eq(&self, other: &Self) -> bool {
        self.green() == other.green()
    }
}

impl<L: Language> Eq for RedNode<L> {}

impl<L: Language> fmt::Display for RedNode<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.green(), f)
    }
}

/// One line per node, `KIND@start..end`, leaves followed by their quoted text.
impl<L: Language> fmt::Debug for RedNode<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0;
        for event in self.preorder() {
            match event {
                WalkEvent::Enter(node) => {
                    let indent = depth * 2;
                    write!(f, "{:indent$}{:?}@{:?}", "", node.kind(), node.text_range())?;
                    if node.is_leaf() {
                        write!(f, " {:?}", node.text())?;
                    }
                    writeln!(f)?;
                    depth += 1;
                }
                WalkEvent::Leave(_) => depth -= 1,
            }
        }
        Ok(())
    }
}

/// Index-stable, lazily materialized view of a node's children.
#[derive(Clone, Copy)]
pub struct RedChildren<'a, L: Language> {
    parent: &'a RedNode<L>,
}

impl<'a, L: Language> RedChildren<'a, L> {
    pub fn len(self) -> usize {
        self.parent.green().children().len()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Materializes the child at `index` on first access.
    ///
    /// While the returned node is alive, every later call yields the same
    /// instance, even across threads.
    pub fn get(self, index: usize) -> Option<RedNode<L>> {
        (index < self.len()).then(|| self.materialize(index))
    }

    pub fn iter(self) -> impl DoubleEndedIterator<Item = RedNode<L>> + ExactSizeIterator + 'a {
        (0..self.len()).map(move |index| self.materialize(index))
    }

    fn materialize(self, index: usize) -> RedNode<L> {
        let slots = self
            .parent
            .ptr
            .children
            .get_or_init(|| (0..self.len()).map(|_| Mutex::new(Weak::new())).collect());

        let mut slot = slots[index].lock();
        if let Some(ptr) = slot.upgrade() {
            return RedNode { ptr };
        }

        let green = self.parent.green().children()[index].clone();
        let child = RedNode::new_child(self.parent, index, green);
        *slot = Arc::downgrade(&child.ptr);
        child
    }
}
