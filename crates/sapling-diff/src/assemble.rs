use std::vec;

use sapling_yellow::{GreenNode, GreenTrivia, Language, Layout, TextRange};

use crate::segment::Alignment;

/// Rebuilds the original tree around the alignment of its segments.
pub(crate) struct Assembler<'a> {
    text: &'a str,
    alignments: vec::IntoIter<Alignment>,
    pub(crate) changes: Vec<TextRange>,
    pub(crate) reused: usize,
}

impl<'a> Assembler<'a> {
    pub(crate) fn new(text: &'a str, alignments: Vec<Alignment>) -> Self {
        Self { text, alignments: alignments.into_iter(), changes: Vec::new(), reused: 0 }
    }

    /// The new root. `tail` is the unmatched text after the last match.
    pub(crate) fn root<L: Language>(
        &mut self,
        root: &GreenNode<L>,
        tail: TextRange,
    ) -> GreenNode<L> {
        let parts = if root.is_leaf() {
            let mut parts = self.leaf(root);
            parts.extend(self.change(tail));
            parts
        } else {
            self.composite(root, Some(tail))
        };

        match <[_; 1]>::try_from(parts) {
            Ok([root]) => root,
            Err(parts) => GreenNode::change_list(GreenTrivia::empty(), parts, GreenTrivia::empty()),
        }
    }

    fn next(&mut self) -> Alignment {
        // Segments and nodes are visited in the same order.
        self.alignments.next().unwrap_or(Alignment::Skipped)
    }

    /// A change leaf for `range`, if it is not empty.
    fn change<L: Language>(&mut self, range: TextRange) -> Option<GreenNode<L>> {
        if range.is_empty() {
            return None;
        }
        self.changes.push(range);
        Some(GreenNode::change(&self.text[range]))
    }

    /// Consumes one segment; `None` if it was skipped, else the gap before it.
    fn segment<L: Language>(&mut self) -> Option<Option<GreenNode<L>>> {
        match self.next() {
            Alignment::Matched { gap } => Some(self.change(gap)),
            Alignment::Skipped => None,
        }
    }

    fn node<L: Language>(&mut self, node: &GreenNode<L>) -> Vec<GreenNode<L>> {
        if node.is_leaf() { self.leaf(node) } else { self.composite(node, None) }
    }

    fn leaf<L: Language>(&mut self, leaf: &GreenNode<L>) -> Vec<GreenNode<L>> {
        let Some(gap) = self.segment() else {
            return Vec::new();
        };
        self.reused += 1;
        gap.into_iter().chain([leaf.clone()]).collect()
    }

    /// `tail` is only passed for the root, which is never dropped.
    fn composite<L: Language>(
        &mut self,
        node: &GreenNode<L>,
        tail: Option<TextRange>,
    ) -> Vec<GreenNode<L>> {
        let mut parts = Vec::new();

        let leading = self.trivia(node.leading(), &mut parts);

        let mut children = Vec::with_capacity(node.children().len());
        for child in node.children() {
            children.extend(self.node(child));
        }

        let trailing = self.trivia(node.trailing(), &mut children);

        // Text after trailing trivia that survived has to go outside the node.
        let mut outside = None;
        if let Some(tail) = tail {
            if trailing.is_empty() {
                children.extend(self.change(tail));
            } else {
                outside = self.change(tail);
            }
        }

        // Braces of other layouts are not segments, so only verbatim nodes
        // can render the same text again.
        let unchanged = L::layout(node.kind()) == Layout::Verbatim
            && leading == *node.leading()
            && trailing == *node.trailing()
            && children.len() == node.children().len()
            && children.iter().zip(node.children()).all(|(new, old)| new.ptr_eq(old));

        let empty = children.is_empty() && leading.is_empty() && trailing.is_empty();
        if unchanged {
            parts.push(node.clone());
        } else if !empty || tail.is_some() {
            parts.push(rebuild(node, leading, children, trailing));
        }

        parts.extend(outside);
        parts
    }

    /// Consumes the segment of non-empty trivia; the gap before it goes to `out`.
    fn trivia<L: Language>(
        &mut self,
        trivia: &GreenTrivia,
        out: &mut Vec<GreenNode<L>>,
    ) -> GreenTrivia {
        if trivia.is_empty() {
            return GreenTrivia::empty();
        }
        match self.segment() {
            Some(gap) => {
                out.extend(gap);
                trivia.clone()
            }
            None => GreenTrivia::empty(),
        }
    }
}

/// `node` around new children, or a change list if it cannot hold them.
fn rebuild<L: Language>(
    node: &GreenNode<L>,
    leading: GreenTrivia,
    children: Vec<GreenNode<L>>,
    trailing: GreenTrivia,
) -> GreenNode<L> {
    if L::layout(node.kind()) != Layout::Verbatim {
        return GreenNode::change_list(leading, children, trailing);
    }

    let rebuilt = if leading == *node.leading() && trailing == *node.trailing() {
        node.rebuild_with_children(children.iter().cloned())
    } else {
        let (kind, children) = (node.kind(), children.iter().cloned());
        GreenNode::node_with_trivia(kind, leading.clone(), children, trailing.clone())
    };

    match rebuilt {
        Ok(rebuilt) => rebuilt,
        Err(error) => {
            tracing::trace!("`{:?}` falls back to a change list: {error}", node.kind());
            GreenNode::change_list(leading, children, trailing)
        }
    }
}
