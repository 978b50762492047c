use sapling_yellow::{GreenTrivia, TextRange};

use crate::PlainKind::{self, *};
use crate::cursor::Cursor;

#[derive(Debug, Clone)]
pub struct Token {
    pub leading: GreenTrivia,
    pub kind: PlainKind,
    pub kind_range: TextRange,
    pub trailing: GreenTrivia,
}

/// Splits text into words and line breaks.
///
/// Spaces before the first word of a line are its leading trivia, spaces after
/// a word are that word's trailing trivia. Whatever is left after the last
/// line break is the leading trivia of the [`PlainKind::EOF`] token.
pub struct Tokenizer<'text> {
    text: &'text str,
    cursor: Cursor<'text>,
}

impl<'text> Tokenizer<'text> {
    pub fn new(text: &'text str) -> Self {
        Self { text, cursor: Cursor::new(text) }
    }

    /// Text of a range produced by this tokenizer.
    pub fn text(&self, range: TextRange) -> &'text str {
        &self.text[range]
    }

    pub fn next_token(&mut self) -> Token {
        let leading = self.whitespace();

        let start = self.cursor.offset();
        let kind = match (self.cursor.peek(), self.cursor.second()) {
            (None, _) => EOF,
            (Some('\n'), _) => {
                self.cursor.advance();
                NEWLINE
            }
            (Some('\r'), Some('\n')) => {
                self.cursor.advance();
                self.cursor.advance();
                NEWLINE
            }
            _ => {
                self.cursor.advance_while(|_, ch| !ch.is_whitespace());
                WORD
            }
        };
        let kind_range = TextRange::new(start, self.cursor.offset());

        let trailing = if kind == WORD { self.whitespace() } else { GreenTrivia::empty() };
        Token { leading, kind, kind_range, trailing }
    }

    fn whitespace(&mut self) -> GreenTrivia {
        let start = self.cursor.offset();
        self.cursor.advance_while(|cursor, ch| match ch {
            '\n' => false,
            '\r' => cursor.second() != Some('\n'),
            ch => ch.is_whitespace(),
        });
        GreenTrivia::new(&self.text[TextRange::new(start, self.cursor.offset())])
    }
}
