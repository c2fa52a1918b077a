//! Structural skipping for composite bodies
//!
//! Mutually recursive routines that move a [`Cursor`] past a struct, union or
//! enum declaration without recording any field identities. Both passes lean
//! on these: the alias scan uses them to step over a typedef's nested body on
//! the way to the alias name, and the emitter uses them to swallow union
//! fields, which are never destructured.
//!
//! Entry convention: the keyword-level routines expect the cursor to sit on
//! the `struct`/`union`/`enum` keyword itself. The body-level routines expect
//! it to sit on the opening brace. On return the cursor sits on the first
//! token after whatever was skipped; only [`skip_enum`] consumes an optional
//! trailing `;`, so a `typedef`'s alias name after a closing brace is always
//! still there for the caller.

use super::cursor::Cursor;
use super::lexer::TokenKind;

/// Skip `struct`, an optional tag, and an optional braced body.
pub fn skip_struct(cursor: &mut Cursor) {
    cursor.advance();
    if cursor.is(TokenKind::Ident) {
        cursor.advance();
    }
    if cursor.is(TokenKind::LBrace) {
        skip_record_body(cursor);
    }
}

/// Skip `union`, an optional tag, and an optional braced body.
pub fn skip_union(cursor: &mut Cursor) {
    cursor.advance();
    if cursor.is(TokenKind::Ident) {
        cursor.advance();
    }
    if cursor.is(TokenKind::LBrace) {
        skip_record_body(cursor);
    }
}

/// Skip `enum`, an optional tag, an optional braced body, and an optional
/// trailing `;`.
pub fn skip_enum(cursor: &mut Cursor) {
    cursor.advance();
    if cursor.is(TokenKind::Ident) {
        cursor.advance();
    }
    if cursor.is(TokenKind::LBrace) {
        skip_enum_body(cursor);
    }
    cursor.eat(TokenKind::Semicolon);
}

/// Skip a braced struct/union body, member by member.
///
/// The cursor must sit on the opening brace. Each member is first offered to
/// the nested-composite routines and otherwise treated as a plain field
/// declaration. Stops after the closing brace, or at end of input for a
/// truncated body.
pub fn skip_record_body(cursor: &mut Cursor) {
    cursor.advance();
    while !cursor.at_eof() && !cursor.is(TokenKind::RBrace) {
        if cursor.matches("union") {
            skip_union(cursor);
        } else if cursor.matches("struct") {
            skip_struct(cursor);
        } else if cursor.matches("enum") {
            skip_enum(cursor);
        } else {
            skip_field(cursor);
        }
    }
    cursor.eat(TokenKind::RBrace);
}

/// Skip a braced enum body verbatim.
///
/// Enumerator lists have no nested structure worth recursing into, so this
/// consumes tokens until the closing brace.
pub fn skip_enum_body(cursor: &mut Cursor) {
    cursor.advance();
    while !cursor.at_eof() && !cursor.is(TokenKind::RBrace) {
        cursor.advance();
    }
    cursor.eat(TokenKind::RBrace);
}

/// Skip a single field declaration through its `;`, inclusive.
///
/// Array suffixes, stray qualifiers and anything else before the separator
/// are consumed without inspection; only the separator position matters. A
/// closing brace is left unconsumed so an enclosing body loop can end.
pub fn skip_field(cursor: &mut Cursor) {
    while !cursor.at_eof() {
        if cursor.is(TokenKind::Semicolon) {
            cursor.advance();
            return;
        }
        if cursor.is(TokenKind::RBrace) {
            return;
        }
        cursor.advance();
    }
}
