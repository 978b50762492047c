use std::borrow::Cow;

use sapling_yellow::{GreenNode, Language, TextRange, TextSize};

/// Rendered text of the original tree, cut into the pieces that can be reused.
///
/// Order: a composite's leading trivia, its children, its trailing trivia.
/// Empty trivia are not segments. [`crate::assemble`] walks the tree in the
/// same order.
pub(crate) fn flatten<L: Language>(root: &GreenNode<L>) -> Vec<Cow<'_, str>> {
    let mut segments = Vec::new();
    push_segments(root, &mut segments);
    segments
}

fn push_segments<'a, L: Language>(node: &'a GreenNode<L>, segments: &mut Vec<Cow<'a, str>>) {
    if let Some(payload) = node.payload() {
        let text = if node.leading().is_empty() && node.trailing().is_empty() {
            Cow::Borrowed(payload)
        } else {
            Cow::Owned(node.render())
        };
        segments.push(text);
        return;
    }

    if !node.leading().is_empty() {
        segments.push(Cow::Borrowed(node.leading().text()));
    }
    for child in node.children() {
        push_segments(child, segments);
    }
    if !node.trailing().is_empty() {
        segments.push(Cow::Borrowed(node.trailing().text()));
    }
}

/// Where a segment landed in the new text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Alignment {
    /// Found; `gap` is the unmatched text right before it, possibly empty.
    Matched { gap: TextRange },
    Skipped,
}

/// Alignments in segment order, plus the unmatched text after the last match.
#[derive(Debug)]
pub(crate) struct Aligned {
    pub(crate) alignments: Vec<Alignment>,
    pub(crate) tail: TextRange,
}

impl Aligned {
    pub(crate) fn matched(&self) -> usize {
        self.alignments.iter().filter(|it| matches!(it, Alignment::Matched { .. })).count()
    }
}

/// Greedy, order-preserving alignment: every segment takes the earliest
/// occurrence at or after the end of the previous match.
pub(crate) fn align(segments: &[Cow<'_, str>], text: &str) -> Aligned {
    let mut cursor = 0;
    let alignments = segments
        .iter()
        .map(|segment| match text[cursor..].find(segment.as_ref()) {
            Some(found) => {
                let start = cursor + found;
                let gap = span(text, cursor, start);
                cursor = start + segment.len();
                Alignment::Matched { gap }
            }
            None => Alignment::Skipped,
        })
        .collect();

    Aligned { alignments, tail: span(text, cursor, text.len()) }
}

/// `start..end` of `text`, both on char boundaries.
fn span(text: &str, start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::of(&text[..start]), TextSize::of(&text[..end]))
}
