use std::str::Chars;

use sapling_yellow::{TextLen as _, TextSize};

pub(crate) struct Cursor<'text> {
    chars: Chars<'text>,
    len: TextSize,
}

impl<'text> Cursor<'text> {
    pub(crate) fn new(text: &'text str) -> Self {
        Self { chars: text.chars(), len: text.text_len() }
    }

    /// Bytes left to read.
    pub(crate) fn remaining(&self) -> TextSize {
        self.chars.as_str().text_len()
    }

    pub(crate) fn offset(&self) -> TextSize {
        self.len - self.remaining()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub(crate) fn second(&self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        self.chars.next()
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(&Self, char) -> bool) {
        while let Some(ch) = self.peek() {
            if !f(self, ch) {
                break;
            }
            self.advance();
        }
    }
}
