//! Trivia attached to the edges of green nodes.

use std::fmt;
use std::hash::{Hash, Hasher};

use text_size::{TextLen as _, TextSize};
use triomphe::Arc;

/// Kinds of trivia recognized inside a trivia span.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Whitespace,
    Newline,
    SingleLineComment,
    Other,
}

/// A trivia fragment with its kind and length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    /// Creates a new trivia piece with the given kind and length.
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }
}

struct TriviaData {
    text: Box<str>,
    pieces: Box<[TriviaPiece]>,
}

/// An opaque text span on the leading or trailing edge of a node.
///
/// Equality and hashing look at the text only.
#[derive(Clone)]
pub struct GreenTrivia {
    ptr: Option<Arc<TriviaData>>,
}

impl GreenTrivia {
    pub fn new(text: &str) -> Self {
        if text.is_empty() {
            return Self::empty();
        }

        let pieces = classify(text).into_boxed_slice();
        Self { ptr: Some(Arc::new(TriviaData { text: text.into(), pieces })) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn len(&self) -> TextSize {
        self.text().text_len()
    }

    pub fn text(&self) -> &str {
        match &self.ptr {
            None => "",
            Some(ptr) => &ptr.text,
        }
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.pieces,
        }
    }
}

impl Default for GreenTrivia {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for GreenTrivia {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
    }
}

impl Eq for GreenTrivia {}

impl Hash for GreenTrivia {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text().hash(state);
    }
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenTrivia")
            .field("text", &self.text())
            .field("pieces", &self.pieces())
            .finish()
    }
}

fn classify(text: &str) -> Vec<TriviaPiece> {
    let mut pieces = Vec::new();
    let mut rest = text;

    while let Some(first) = rest.chars().next() {
        let (kind, len) = if rest.starts_with("\r\n") {
            (TriviaPieceKind::Newline, 2)
        } else if first == '\n' {
            (TriviaPieceKind::Newline, 1)
        } else if rest.starts_with("//") {
            (TriviaPieceKind::SingleLineComment, rest.find(['\r', '\n']).unwrap_or(rest.len()))
        } else if first.is_whitespace() {
            let len = rest
                .find(|c: char| !c.is_whitespace() || c == '\n' || c == '\r')
                .unwrap_or(rest.len())
                .max(first.len_utf8());
            (TriviaPieceKind::Whitespace, len)
        } else {
            (TriviaPieceKind::Other, rest.find(char::is_whitespace).unwrap_or(rest.len()))
        };

        let (piece, tail) = rest.split_at(len);
        pieces.push(TriviaPiece::new(kind, piece.text_len()));
        rest = tail;
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(trivia: &GreenTrivia) -> Vec<TriviaPieceKind> {
        trivia.pieces().iter().map(|piece| piece.kind).collect()
    }

    #[test]
    fn empty_text_is_empty_trivia() {
        let trivia = GreenTrivia::new("");
        assert!(trivia.is_empty());
        assert_eq!(trivia.len(), TextSize::new(0));
        assert_eq!(trivia, GreenTrivia::empty());
    }

    #[test]
    fn pieces_cover_the_text() {
        let trivia = GreenTrivia::new(" \t// note\r\n\n  x");
        assert_eq!(
            kinds(&trivia),
            vec![
                TriviaPieceKind::Whitespace,
                TriviaPieceKind::SingleLineComment,
                TriviaPieceKind::Newline,
                TriviaPieceKind::Newline,
                TriviaPieceKind::Whitespace,
                TriviaPieceKind::Other,
            ]
        );

        let total: TextSize = trivia.pieces().iter().map(|piece| piece.len).sum();
        assert_eq!(total, trivia.len());
    }

    #[test]
    fn lone_carriage_return_is_whitespace() {
        let trivia = GreenTrivia::new("\r");
        assert_eq!(kinds(&trivia), vec![TriviaPieceKind::Whitespace]);
        assert_eq!(trivia.len(), TextSize::new(1));
    }

    #[test]
    fn equality_is_textual() {
        assert_eq!(GreenTrivia::new("  "), GreenTrivia::new("  "));
        assert_ne!(GreenTrivia::new("  "), GreenTrivia::new(" "));
    }
}
