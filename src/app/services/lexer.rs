//! Quote-aware token scanner for record bodies
//!
//! Splits a body on whitespace, except inside single-quoted strings where
//! whitespace is content. Tokens borrow from the body and carry their byte
//! span so callers can slice the text between two tokens verbatim.
//!
//! Inside a quoted string a doubled apostrophe (`''`) followed by more
//! string content is a literal apostrophe; `''` standing alone is an empty
//! string.

use crate::constants::QUOTE;
use std::borrow::Cow;

/// One whitespace-delimited token of a record body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token text as written, quotes included
    pub text: &'a str,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn is_quoted(&self) -> bool {
        self.text.len() >= 2 && self.text.starts_with(QUOTE) && self.text.ends_with(QUOTE)
    }

    /// Text with surrounding quotes removed and doubled apostrophes collapsed
    pub fn unquoted(&self) -> Cow<'a, str> {
        if !self.is_quoted() {
            return Cow::Borrowed(self.text);
        }
        let inner = &self.text[1..self.text.len() - 1];
        if inner.contains("''") {
            Cow::Owned(inner.replace("''", "'"))
        } else {
            Cow::Borrowed(inner)
        }
    }
}

/// Iterator over the tokens of a body
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    body: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(body: &'a str) -> Self {
        Self { body, pos: 0 }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.body[self.pos..];
        let skipped = rest.len() - rest.trim_start().len();
        let start = self.pos + skipped;
        if start >= self.body.len() {
            self.pos = self.body.len();
            return None;
        }

        let mut in_quote = false;
        let mut end = self.body.len();
        let mut chars = self.body[start..].char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            if c == QUOTE {
                if in_quote && chars.peek().is_some_and(|&(_, next)| next == QUOTE) {
                    // `''` inside a string: literal apostrophe unless it closes an empty string
                    let after = self.body[start + offset + 2..].chars().next();
                    if after.is_some_and(|a| !a.is_whitespace()) {
                        chars.next();
                        continue;
                    }
                }
                in_quote = !in_quote;
            } else if c.is_whitespace() && !in_quote {
                end = start + offset;
                break;
            }
        }

        self.pos = end;
        Some(Token {
            text: &self.body[start..end],
            start,
            end,
        })
    }
}

/// Collect all tokens of a body
pub fn tokenize(body: &str) -> Vec<Token<'_>> {
    Lexer::new(body).collect()
}
