//! Logos-based lexer for specification directive bodies
//!
//! The bodies of `CHARACTER TYPES`, `IMPLICIT VALUES` and
//! `DEPENDENT CHARACTERS` are small numeric languages:
//!
//! ```text
//! 1-3,UM 5,RN             character types
//! 2,1 7-9,1:2             implicit values
//! 4,1/2:5-8:11 6,3:7      dependent characters
//! ```
//!
//! Whitespace separates clauses, so it is kept as a token.

use logos::Logos;
use text_size::TextSize;

/// Kind of a directive token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Whitespace,
    Number,
    Word,
    Minus,
    Comma,
    Colon,
    Slash,
    Error,
}

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[A-Za-z]+")]
    Word,

    #[token("-")]
    Minus,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("/")]
    Slash,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => Self::Whitespace,
            LogosToken::Number => Self::Number,
            LogosToken::Word => Self::Word,
            LogosToken::Minus => Self::Minus,
            LogosToken::Comma => Self::Comma,
            LogosToken::Colon => Self::Colon,
            LogosToken::Slash => Self::Slash,
        }
    }
}

/// Cursor over the tokens of one directive body.
pub struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: tokenize(input),
            pos: 0,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.eat(TokenKind::Whitespace) {}
    }

    /// Consume a number token. `None` when the next token is not a number
    /// or the number does not fit.
    pub fn number(&mut self) -> Option<usize> {
        let value = self
            .peek()
            .filter(|t| t.kind == TokenKind::Number)
            .and_then(|t| t.text.parse().ok())?;
        self.pos += 1;
        Some(value)
    }

    /// Text of the remaining tokens up to the next whitespace, for messages.
    pub fn clause_text(&self) -> String {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .take_while(|t| t.kind != TokenKind::Whitespace)
            .map(|t| t.text)
            .collect()
    }
}
