//! Streaming token cursor over a single source buffer
//!
//! A [`Cursor`] holds exactly two tokens of state: the current token and the
//! one before it. The previous token is what lets the scan loops tell an
//! annotation marker apart from the `#define` that introduces it, and an
//! `#include` path apart from a stray identifier.

use super::lexer::{self, Token, TokenKind};

/// Token cursor: a borrowed source buffer, a byte position, and the
/// current/previous token pair.
///
/// Freshly created cursors hold [`TokenKind::None`] placeholders; nothing is
/// lexed until the first [`advance`](Cursor::advance).
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    token: Token<'a>,
    prev: Token<'a>,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            token: Token::none(),
            prev: Token::none(),
        }
    }

    /// Step to the next token.
    ///
    /// The current token becomes the previous one. Once the current token is
    /// end-of-file this is a no-op: the previous token freezes and the cursor
    /// stays at end-of-file forever, so scan loops never run off the buffer.
    pub fn advance(&mut self) {
        if self.token.is_eof() {
            return;
        }
        let (token, pos) = lexer::next_token(self.src, self.pos);
        self.prev = self.token;
        self.token = token;
        self.pos = pos;
    }

    pub fn token(&self) -> Token<'a> {
        self.token
    }

    pub fn prev(&self) -> Token<'a> {
        self.prev
    }

    pub fn at_eof(&self) -> bool {
        self.token.is_eof()
    }

    /// Does the current token spell exactly `literal`?
    pub fn matches(&self, literal: &str) -> bool {
        self.token.matches(literal)
    }

    /// Does the previous token spell exactly `literal`?
    pub fn prev_matches(&self, literal: &str) -> bool {
        self.prev.matches(literal)
    }

    /// Is the current token of the given kind?
    pub fn is(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    /// Advance past the current token if it is of the given kind.
    ///
    /// Returns whether the token was consumed.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.token.kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }
}
