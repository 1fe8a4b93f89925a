//! The token stream the parser reads from.
//!
//! The parser only depends on [`TokenStream`]; [`TokenBuffer`] is the
//! implementation used by [`Parser::new`](crate::Parser::new), backed by a
//! fully tokenized source.

use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Opaque snapshot of a stream's read cursor.
///
/// A checkpoint is only meaningful for the stream that produced it, and only
/// for the duration of one speculative attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl Checkpoint {
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    pub const fn position(self) -> usize {
        self.0
    }
}

/// Ordered, classified tokens with lookahead and rollback.
pub trait TokenStream {
    /// The token `offset` positions ahead of the cursor (0 is the current
    /// token). Past the end this keeps returning the end-of-input token.
    fn peek(&self, offset: usize) -> &Token;

    /// Consume and return the current token.
    fn advance(&mut self) -> Token;

    /// Snapshot the read cursor.
    fn checkpoint(&self) -> Checkpoint;

    /// Restore a snapshot taken by [`checkpoint`](Self::checkpoint).
    fn rollback(&mut self, checkpoint: Checkpoint);
}

/// A [`TokenStream`] over a pre-tokenized buffer.
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    /// Never empty; the last token is always EOF.
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenBuffer {
    /// Tokenize `source` into a buffer.
    pub fn new(source: &str) -> Self {
        Self::from_tokens(Lexer::tokenize(source))
    }

    /// Wrap already produced tokens. An EOF token is appended when the input
    /// does not end with one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof) {
            let end = tokens.last().map_or(0, |token| token.span.end);
            tokens.push(Token::new(TokenKind::Eof, Span::empty(end), false));
        }
        Self { tokens, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    fn last_index(&self) -> usize {
        self.tokens.len() - 1
    }
}

impl TokenStream for TokenBuffer {
    #[inline]
    fn peek(&self, offset: usize) -> &Token {
        let index = (self.cursor + offset).min(self.last_index());
        &self.tokens[index]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.cursor].clone();
        if self.cursor < self.last_index() {
            self.cursor += 1;
        }
        token
    }

    #[inline]
    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.cursor)
    }

    #[inline]
    fn rollback(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.position().min(self.last_index());
    }
}
