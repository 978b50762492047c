//! Derives a new tree from edited text, reusing the leaves of an old tree.
//!
//! The old tree's rendered text is cut into segments (leaves and composite
//! trivia) that are aligned greedily against the new text. Aligned leaves are
//! reused by reference; the text between them becomes change leaves.

mod assemble;
mod segment;


use sapling_yellow::{GreenNode, GreenTrivia, Language, SyntaxTree, TextRange, TextSize};

use crate::assemble::Assembler;

/// Outcome of [`find_changes`].
#[derive(Debug)]
pub struct DiffResult<L: Language> {
    pub original: Option<SyntaxTree<L>>,
    pub new_tree: SyntaxTree<L>,
    /// Some text was synthesized or some original segment was dropped.
    pub has_changes: bool,
    /// Ranges of the change leaves in the new text, in order.
    pub changes: Vec<TextRange>,
    /// Leaves shared with the original tree.
    pub reused: usize,
}

/// Builds a tree for `new_text` that shares as many leaves as possible with
/// `original`.
///
/// The new tree always renders to exactly `new_text`.
pub fn find_changes<L: Language>(
    original: Option<&SyntaxTree<L>>,
    new_text: &str,
) -> DiffResult<L> {
    let _span = tracing::debug_span!("find_changes", len = new_text.len()).entered();

    let Some(tree) = original else {
        tracing::debug!("no original tree");
        return from_scratch(new_text);
    };

    let root = tree.root_green();
    let segments = segment::flatten(root);
    let aligned = segment::align(&segments, new_text);
    let matched = aligned.matched();
    let skipped = segments.len() - matched;
    tracing::debug!(segments = segments.len(), matched, skipped);

    let mut assembler = Assembler::new(new_text, aligned.alignments);
    let new_root = assembler.root(root, aligned.tail);
    tracing::trace!(changes = assembler.changes.len(), reused = assembler.reused);

    // A braced composite is restructured even when every segment matched.
    let restructured = !new_root.ptr_eq(root);
    DiffResult {
        original: Some(tree.clone()),
        new_tree: SyntaxTree::new(new_root),
        has_changes: skipped > 0 || !assembler.changes.is_empty() || restructured,
        changes: assembler.changes,
        reused: assembler.reused,
    }
}

/// Without a tree: one change leaf, or an empty change list for empty text.
fn from_scratch<L: Language>(new_text: &str) -> DiffResult<L> {
    let (root, changes) = if new_text.is_empty() {
        (GreenNode::change_list(GreenTrivia::empty(), [], GreenTrivia::empty()), Vec::new())
    } else {
        (GreenNode::change(new_text), vec![TextRange::up_to(TextSize::of(new_text))])
    };

    let has_changes = !changes.is_empty();
    DiffResult { original: None, new_tree: SyntaxTree::new(root), has_changes, changes, reused: 0 }
}
