//! Plain text as a tree: a document of lines of words.
//!
//! Any text parses, and the tree renders back to exactly that text.

mod cursor;
mod tokenizer;

#[cfg(test)]
mod tests;

use sapling_yellow::{Builder, ChildrenError, GreenNode, Language, SyntaxTree, TreeError};
pub use tokenizer::{Token, Tokenizer};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PlainText {}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u16)]
pub enum PlainKind {
    WORD,
    NEWLINE,
    CHANGE,
    EOF,

    LINE,
    DOCUMENT,
    CHANGE_LIST,
}

impl Language for PlainText {
    type Kind = PlainKind;

    const CHANGE: PlainKind = PlainKind::CHANGE;
    const CHANGE_LIST: PlainKind = PlainKind::CHANGE_LIST;

    fn check_children(kind: PlainKind, children: &[GreenNode<Self>]) -> Result<(), ChildrenError> {
        match kind {
            PlainKind::DOCUMENT => only(children, PlainKind::LINE),
            PlainKind::LINE => match children.split_last() {
                // A line break can only end a line.
                Some((last, words)) if last.kind() == PlainKind::NEWLINE => {
                    only(words, PlainKind::WORD)
                }
                _ => only(children, PlainKind::WORD),
            },
            _ => Ok(()),
        }
    }
}

/// Every child is of `expected` kind or came out of a diff.
fn only(children: &[GreenNode<PlainText>], expected: PlainKind) -> Result<(), ChildrenError> {
    let unexpected = |kind: PlainKind| {
        kind != expected && !matches!(kind, PlainKind::CHANGE | PlainKind::CHANGE_LIST)
    };
    match children.iter().enumerate().find(|(_, child)| unexpected(child.kind())) {
        Some((index, child)) => Err(ChildrenError::unexpected_kind(index, expected, child.kind())),
        None => Ok(()),
    }
}

/// Parses `text` into a `DOCUMENT`.
pub fn parse(text: &str) -> Result<SyntaxTree<PlainText>, TreeError> {
    parse_green(text).map(SyntaxTree::new)
}

pub fn parse_green(text: &str) -> Result<GreenNode<PlainText>, TreeError> {
    let mut tokenizer = Tokenizer::new(text);
    let mut builder = Builder::new();

    builder.start_node(PlainKind::DOCUMENT);
    let mut token = tokenizer.next_token();
    while token.kind != PlainKind::EOF {
        builder.start_node(PlainKind::LINE);
        loop {
            let Token { leading, kind, kind_range, trailing } = token;
            builder.token_with_trivia(kind, leading, tokenizer.text(kind_range), trailing);
            token = tokenizer.next_token();
            if kind == PlainKind::NEWLINE || token.kind == PlainKind::EOF {
                break;
            }
        }
        builder.finish_node()?;
    }
    builder.finish_node_with_trivia(token.leading)?;

    Ok(builder.finish())
}
