use std::fmt;

use rustc_hash::FxHashSet;
use text_size::{TextLen as _, TextSize};
use triomphe::Arc;

use crate::{ChildrenError, GreenTrivia, Language, Layout, TreeError};

/// Immutable, position-independent node.
///
/// Cloning is a reference count bump. `==` compares structure, [`GreenNode::ptr_eq`]
/// compares identity; the two are never interchangeable.
#[derive(Clone)]
pub struct GreenNode<L: Language> {
    ptr: Arc<GreenNodeData<L>>,
}

struct GreenNodeData<L: Language> {
    kind: L::Kind,
    leading: GreenTrivia,
    trailing: GreenTrivia,
    text_len: TextSize,
    body: Body<L>,
}

enum Body<L: Language> {
    Leaf(Box<str>),
    Composite(Box<[GreenNode<L>]>),
}

impl<L: Language> GreenNode<L> {
    /// Creates a leaf without trivia.
    pub fn token(kind: L::Kind, text: &str) -> Self {
        Self::token_with_trivia(kind, GreenTrivia::empty(), text, GreenTrivia::empty())
    }

    pub fn token_with_trivia(
        kind: L::Kind,
        leading: GreenTrivia,
        text: &str,
        trailing: GreenTrivia,
    ) -> Self {
        let text_len = leading.len() + text.text_len() + trailing.len();
        Self::alloc(kind, leading, trailing, text_len, Body::Leaf(text.into()))
    }

    /// Creates a leaf from a payload that may be absent.
    pub fn try_token(kind: L::Kind, text: Option<impl AsRef<str>>) -> Result<Self, TreeError> {
        match text {
            Some(text) => Ok(Self::token(kind, text.as_ref())),
            None => Err(TreeError::null_payload(kind)),
        }
    }

    /// Creates a composite after the language accepted `children`.
    pub fn node(kind: L::Kind, children: impl IntoIterator<Item = Self>) -> Result<Self, TreeError> {
        Self::node_with_trivia(kind, GreenTrivia::empty(), children, GreenTrivia::empty())
    }

    pub fn node_with_trivia(
        kind: L::Kind,
        leading: GreenTrivia,
        children: impl IntoIterator<Item = Self>,
        trailing: GreenTrivia,
    ) -> Result<Self, TreeError> {
        let children: Box<[Self]> = children.into_iter().collect();
        check_distinct(&children)
            .and_then(|()| L::check_children(kind, &children))
            .map_err(|reason| TreeError::invalid_children(kind, reason))?;
        Ok(Self::composite(kind, leading, children, trailing))
    }

    /// Creates a leaf of [`Language::CHANGE`] carrying `text` verbatim.
    pub fn change(text: &str) -> Self {
        Self::token(L::CHANGE, text)
    }

    /// Creates a composite of [`Language::CHANGE_LIST`]; any children are accepted.
    pub fn change_list(
        leading: GreenTrivia,
        children: impl IntoIterator<Item = Self>,
        trailing: GreenTrivia,
    ) -> Self {
        Self::composite(L::CHANGE_LIST, leading, children.into_iter().collect(), trailing)
    }

    fn composite(
        kind: L::Kind,
        leading: GreenTrivia,
        children: Box<[Self]>,
        trailing: GreenTrivia,
    ) -> Self {
        let children_len: TextSize = children.iter().map(Self::text_len).sum();
        let text_len = leading.len() + children_len + trailing.len();
        Self::alloc(kind, leading, trailing, text_len, Body::Composite(children))
    }

    fn alloc(
        kind: L::Kind,
        leading: GreenTrivia,
        trailing: GreenTrivia,
        text_len: TextSize,
        body: Body<L>,
    ) -> Self {
        Self { ptr: Arc::new(GreenNodeData { kind, leading, trailing, text_len, body }) }
    }

    pub fn kind(&self) -> L::Kind {
        self.ptr.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.ptr.body, Body::Leaf(_))
    }

    /// Length including trivia on both edges.
    pub fn text_len(&self) -> TextSize {
        self.ptr.text_len
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.ptr.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.ptr.trailing
    }

    /// Children in order; empty for leaves.
    pub fn children(&self) -> &[Self] {
        match &self.ptr.body {
            Body::Leaf(_) => &[],
            Body::Composite(children) => children,
        }
    }

    /// Leaf text without trivia; `None` for composites.
    pub fn payload(&self) -> Option<&str> {
        match &self.ptr.body {
            Body::Leaf(text) => Some(text),
            Body::Composite(_) => None,
        }
    }

    /// Same content with different trivia on both edges.
    pub fn with_trivia(&self, leading: GreenTrivia, trailing: GreenTrivia) -> Self {
        match &self.ptr.body {
            Body::Leaf(text) => Self::token_with_trivia(self.kind(), leading, text, trailing),
            Body::Composite(children) => {
                Self::composite(self.kind(), leading, children.clone(), trailing)
            }
        }
    }

    /// Rebuilds this node around new children, keeping kind and trivia.
    ///
    /// Leaves only accept an empty set of children.
    pub fn rebuild_with_children(
        &self,
        children: impl IntoIterator<Item = Self>,
    ) -> Result<Self, TreeError> {
        let mut children = children.into_iter().peekable();
        match &self.ptr.body {
            Body::Leaf(_) if children.peek().is_some() => {
                Err(TreeError::invalid_children(self.kind(), ChildrenError::LeafHasChildren))
            }
            Body::Leaf(_) => Ok(self.clone()),
            Body::Composite(_) => Self::node_with_trivia(
                self.kind(),
                self.leading().clone(),
                children,
                self.trailing().clone(),
            ),
        }
    }

    /// Rebuilds this node with the child at `index` swapped for `child`.
    pub fn replace_child(&self, index: usize, child: Self) -> Result<Self, TreeError> {
        let mut children = self.children().to_vec();
        match children.get_mut(index) {
            Some(slot) => *slot = child,
            None => return Err(TreeError::NodeNotFound),
        }
        self.rebuild_with_children(children)
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ptr, &other.ptr)
    }

    /// Leaves of this subtree in document order, this node included if it is one.
    pub fn leaves(&self) -> Leaves<'_, L> {
        Leaves { root: Some(self), stack: Vec::new() }
    }

    /// Text this node represents.
    pub fn render(&self) -> String {
        let mut text = String::with_capacity(usize::from(self.text_len()));
        self.write_to(&mut text).expect("writing to a `String` never fails");
        text
    }

    /// Leaf text without trivia, or the rendered text of a composite's children.
    pub fn text_trimmed(&self) -> String {
        match &self.ptr.body {
            Body::Leaf(text) => text.to_string(),
            Body::Composite(_) => {
                let mut text = String::new();
                self.write_body(&mut text).expect("writing to a `String` never fails");
                text
            }
        }
    }

    fn write_to(&self, out: &mut impl fmt::Write) -> fmt::Result {
        out.write_str(self.leading().text())?;
        self.write_body(out)?;
        out.write_str(self.trailing().text())
    }

    fn write_body(&self, out: &mut impl fmt::Write) -> fmt::Result {
        match &self.ptr.body {
            Body::Leaf(text) => out.write_str(text),
            Body::Composite(children) => match L::layout(self.kind()) {
                Layout::Verbatim => children.iter().try_for_each(|child| child.write_to(out)),
                Layout::Braced => {
                    out.write_char('{')?;
                    for (index, child) in children.iter().enumerate() {
                        if index > 0 {
                            out.write_char(' ')?;
                        }
                        child.write_to(out)?;
                    }
                    out.write_char('}')
                }
            },
        }
    }
}

/// Rejects a node instance appearing twice among `children`.
fn check_distinct<L: Language>(children: &[GreenNode<L>]) -> Result<(), ChildrenError> {
    let mut seen = FxHashSet::default();
    match children.iter().position(|child| !seen.insert(child.ptr.as_ptr())) {
        Some(index) => Err(ChildrenError::DuplicateChild { index }),
        None => Ok(()),
    }
}

impl<L: Language> PartialEq for GreenNode<L> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        if self.kind() != other.kind() {
            return false;
        }

        if L::trivia_is_significant(self.kind())
            && (self.text_len() != other.text_len()
                || self.leading() != other.leading()
                || self.trailing() != other.trailing())
        {
            return false;
        }

        match (&self.ptr.body, &other.ptr.body) {
            (Body::Leaf(lhs), Body::Leaf(rhs)) => lhs == rhs,
            (Body::Composite(lhs), Body::Composite(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl<L: Language> Eq for GreenNode<L> {}

impl<L: Language> fmt::Display for GreenNode<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

impl<L: Language> fmt::Debug for GreenNode<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("GreenNode");
        debug.field("kind", &self.kind()).field("text_len", &self.text_len());
        if !self.leading().is_empty() {
            debug.field("leading", &self.leading().text());
        }
        match &self.ptr.body {
            Body::Leaf(text) => debug.field("text", text),
            Body::Composite(children) => debug.field("children", children),
        };
        if !self.trailing().is_empty() {
            debug.field("trailing", &self.trailing().text());
        }
        debug.finish()
    }
}

/// Depth-first iterator over the leaves of a green subtree.
pub struct Leaves<'a, L: Language> {
    root: Option<&'a GreenNode<L>>,
    stack: Vec<std::slice::Iter<'a, GreenNode<L>>>,
}

impl<'a, L: Language> Iterator for Leaves<'a, L> {
    type Item = &'a GreenNode<L>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            if root.is_leaf() {
                return Some(root);
            }
            self.stack.push(root.children().iter());
        }

        loop {
            let children = self.stack.last_mut()?;
            match children.next() {
                Some(node) if node.is_leaf() => return Some(node),
                Some(node) => self.stack.push(node.children().iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
