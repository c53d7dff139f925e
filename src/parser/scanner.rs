//! Position-based text scanner.
//!
//! A [`Scanner`] walks a borrowed string with explicit peek/advance calls and
//! knows how DELTA comments nest, so callers can read "up to the next `/`
//! outside any comment" without hand-tracking depth.

use text_size::TextSize;

use crate::base::{COMMENT_CLOSE, COMMENT_OPEN, scan_integer, scan_number};
use crate::parser::errors::{DeltaError, Result};

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Byte offset of the cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Unread remainder of the text.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn at(&self, c: char) -> bool {
        self.peek() == Some(c)
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `c` if it is next.
    pub fn eat(&mut self, c: char) -> bool {
        if self.at(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn skip_blanks(&mut self) {
        self.skip_while(|c| c == ' ' || c == '\t');
    }

    pub fn skip_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    pub fn take_while(&mut self, pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.pos;
        self.skip_while(pred);
        &self.text[start..self.pos]
    }

    /// Advance to the first character contained in `stops` (not consumed),
    /// or to the end.
    pub fn skip_until(&mut self, stops: &[char]) {
        self.skip_while(|c| !stops.contains(&c));
    }

    /// Read a lenient decimal number (see [`scan_number`]).
    pub fn number(&mut self) -> f64 {
        let (value, len) = scan_number(self.rest());
        self.pos += len;
        value
    }

    /// Read a lenient decimal integer (see [`scan_integer`]).
    pub fn integer(&mut self) -> i64 {
        let (value, len) = scan_integer(self.rest());
        self.pos += len;
        value
    }

    /// Read a `<...>` comment starting at the cursor and return its inner
    /// text. Nested comments are kept verbatim inside the returned text.
    ///
    /// # Errors
    /// [`DeltaError::UnterminatedComment`] when the closing `>` is missing.
    pub fn comment(&mut self) -> Result<&'a str> {
        let open = self.pos;
        debug_assert!(self.at(COMMENT_OPEN));
        self.pos += COMMENT_OPEN.len_utf8();
        let inner_start = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.bump() {
            match c {
                COMMENT_OPEN => depth += 1,
                COMMENT_CLOSE if depth == 0 => {
                    let inner_end = self.pos - COMMENT_CLOSE.len_utf8();
                    return Ok(&self.text[inner_start..inner_end]);
                }
                COMMENT_CLOSE => depth -= 1,
                _ => {}
            }
        }
        Err(DeltaError::UnterminatedComment {
            offset: TextSize::new(open as u32),
        })
    }
}

/// Split `text` on characters matching `is_separator` that lie outside any
/// `<...>` comment. Separators inside comments are ordinary text.
pub fn split_outside_comments(text: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (offset, c) in text.char_indices() {
        match c {
            COMMENT_OPEN => depth += 1,
            COMMENT_CLOSE if depth > 0 => depth -= 1,
            _ if depth == 0 && is_separator(c) => {
                pieces.push(&text[start..offset]);
                start = offset + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_eat() {
        let mut s = Scanner::new("(1-)");
        assert!(s.at('('));
        assert!(s.eat('('));
        assert!(!s.eat('('));
        assert_eq!(s.number(), 1.0);
        assert_eq!(s.rest(), "-)");
    }

    #[test]
    fn test_comment_nested() {
        let mut s = Scanner::new("<a <b> c>rest");
        assert_eq!(s.comment().unwrap(), "a <b> c");
        assert_eq!(s.rest(), "rest");
    }

    #[test]
    fn test_comment_unterminated() {
        let mut s = Scanner::new("12<open <inner>");
        s.skip_until(&['<']);
        let err = s.comment().unwrap_err();
        assert!(matches!(
            err,
            DeltaError::UnterminatedComment { offset } if offset == TextSize::new(2)
        ));
    }

    #[test]
    fn test_split_outside_comments_respects_nesting() {
        let pieces = split_outside_comments("1<a/b <c/d>>/2/3", |c| c == '/');
        assert_eq!(pieces, vec!["1<a/b <c/d>>", "2", "3"]);
    }

    #[test]
    fn test_split_on_whitespace() {
        let pieces = split_outside_comments("1,2 3<in comment> 4,5", char::is_whitespace);
        assert_eq!(pieces, vec!["1,2", "3<in comment>", "4,5"]);
    }
}
