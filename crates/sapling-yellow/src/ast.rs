use crate::{Language, RedNode, SyntaxTree};

/// A red node of one specific kind (or family of kinds).
pub trait AstNode<L: Language> {
    fn can_cast(kind: L::Kind) -> bool;

    fn cast(syntax: RedNode<L>) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &RedNode<L>;
}

/// A tree whose root has a known shape.
pub trait AstTree<L: Language> {
    type Root: AstNode<L>;

    /// Wraps an untyped tree; the "clone with a different root" factory.
    fn from_syntax(tree: SyntaxTree<L>) -> Self
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxTree<L>;

    /// The typed root, or `None` if the root has another kind.
    fn root(&self) -> Option<Self::Root> {
        Self::Root::cast(self.syntax().root())
    }

    /// Same as [`SyntaxTree::set_root`], keeping the concrete tree type.
    fn set_root(&self, root: &RedNode<L>) -> Self
    where
        Self: Sized,
    {
        Self::from_syntax(self.syntax().set_root(root))
    }
}

/// Children of `parent` that cast to `N`.
pub fn children<L: Language, N: AstNode<L>>(
    parent: &RedNode<L>,
) -> impl Iterator<Item = N> + use<L, N> {
    let parent = parent.clone();
    (0..parent.children().len())
        .filter_map(move |index| parent.children().get(index).and_then(N::cast))
}
