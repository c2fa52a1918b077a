//! Annotated-struct detection and printer emission
//!
//! Pass 2 scans each file for the annotation marker and, for every marked
//! struct, writes the C source of a `print_<name>` function to the output.
//! Fields are classified by their alias-resolved base type; anything that is
//! not a known scalar becomes a call into the sibling printer for that type,
//! which is assumed to exist by naming convention.
//!
//! Generated functions never write past their capacity argument: every
//! `snprintf` receives the remaining space, and the running offset is clamped
//! back into range after each add because `snprintf` reports the length it
//! wanted rather than the length it wrote.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::parser::aliases::AliasTable;
use crate::parser::cursor::Cursor;
use crate::parser::lexer::TokenKind;
use crate::parser::skip;
use crate::ANNOTATION;

/// How a scalar field is formatted: its conversion specifier and whether a
/// pointer to it must be dereferenced for the value argument.
struct ScalarSpec {
    fmt: &'static str,
    deref: bool,
}

/// Classify a resolved base type as a formattable scalar.
///
/// Char pointers format the pointed-at text, so they are never dereferenced.
/// Returns `None` for aggregates, which go through a sibling printer instead.
fn scalar_spec(base: &str, is_enum: bool, is_pointer: bool) -> Option<ScalarSpec> {
    if base == "char" {
        let fmt = if is_pointer { "%s" } else { "%c" };
        return Some(ScalarSpec { fmt, deref: false });
    }
    if is_enum || base == "int" || base == "short" {
        return Some(ScalarSpec { fmt: "%d", deref: true });
    }
    if base == "float" || base == "double" {
        return Some(ScalarSpec { fmt: "%f", deref: true });
    }
    if base == "size_t" || base == "long" {
        return Some(ScalarSpec { fmt: "%ld", deref: true });
    }
    None
}

/// Pass-2 scan of one file: emit a printer for every annotated struct.
///
/// The marker only triggers when it is not preceded by `define` (so its own
/// `#define` line is inert) and is followed by the `struct` keyword.
pub fn scan_annotated<W: Write>(src: &str, aliases: &AliasTable, out: &mut W) -> io::Result<()> {
    let mut cursor = Cursor::new(src);
    cursor.advance();
    while !cursor.at_eof() {
        if cursor.matches(ANNOTATION) && !cursor.prev_matches("define") {
            cursor.advance();
            if cursor.matches("struct") {
                emit_struct(&mut cursor, aliases, out)?;
            } else if cursor.matches("union") || cursor.matches("enum") {
                warn!(
                    "annotation on {} is not supported; only structs generate printers",
                    cursor.token()
                );
            }
            continue;
        }
        cursor.advance();
    }
    Ok(())
}

/// Emit one printer function. The cursor sits on the `struct` keyword.
fn emit_struct<W: Write>(cursor: &mut Cursor, aliases: &AliasTable, out: &mut W) -> io::Result<()> {
    cursor.advance();
    if !cursor.is(TokenKind::Ident) {
        warn!(
            "annotated struct without a name near {}; nothing emitted",
            cursor.token()
        );
        return Ok(());
    }
    let name = cursor.token().text;
    cursor.advance();
    if !cursor.is(TokenKind::LBrace) {
        warn!("annotated struct '{}' has no body; nothing emitted", name);
        return Ok(());
    }
    debug!("emitting print_{}", name);

    writeln!(out, "int print_{}(char *dest, int n, struct {} *src)", name, name)?;
    writeln!(out, "{{")?;
    writeln!(out, "    if (!dest || !src || n <= 0) return 0;")?;
    writeln!(out, "    int written = 0;")?;
    writeln!(out, "    int tmp = 0;")?;

    loop {
        cursor.advance();
        if !cursor.is(TokenKind::Ident) {
            break;
        }
        emit_field(cursor, aliases, out)?;
    }
    if !cursor.is(TokenKind::RBrace) {
        warn!("body of '{}' ended unexpectedly at {}", name, cursor.token());
    }

    writeln!(out, "    dest[written] = 0;")?;
    writeln!(out, "    return written;")?;
    writeln!(out, "}}")?;
    Ok(())
}

/// Emit the formatting block for one field declaration.
///
/// The cursor sits on the first token of the declaration and is left on the
/// field separator (or on whatever ended a malformed declaration early).
fn emit_field<W: Write>(cursor: &mut Cursor, aliases: &AliasTable, out: &mut W) -> io::Result<()> {
    if cursor.matches("const") {
        cursor.advance();
    }
    if cursor.matches("union") {
        skip::skip_union(cursor);
        return emit_union_stub(cursor, out);
    }
    if cursor.matches("struct") {
        cursor.advance();
    }
    let mut is_enum = cursor.matches("enum");
    if is_enum {
        cursor.advance();
    }
    if cursor.matches("unsigned") {
        cursor.advance();
    }
    if cursor.matches("signed") {
        cursor.advance();
    }

    let declared = cursor.token();
    cursor.advance();
    let resolved = aliases.resolve(declared.text);
    if resolved.is_union {
        debug!("field type '{}' resolves to union '{}'", declared.text, resolved.name);
        return emit_union_stub(cursor, out);
    }
    is_enum = is_enum || resolved.is_enum;
    let base = resolved.name;

    let mut is_pointer = cursor.eat(TokenKind::Star);
    let name_tok = cursor.token();
    if name_tok.kind != TokenKind::Ident {
        warn!("could not read a field name near {}; field skipped", name_tok);
        seek_separator(cursor);
        return Ok(());
    }
    let name = name_tok.text;
    cursor.advance();
    let mut is_array = cursor.is(TokenKind::LBracket);
    seek_separator(cursor);

    // A fixed char array prints as a bounded string, not element by element.
    if !is_pointer && is_array && base == "char" {
        is_array = false;
        is_pointer = true;
    }

    let idx = if is_array { "[i]" } else { "" };
    if is_array {
        writeln!(
            out,
            "    for (size_t i = 0; i < sizeof(src->{}) / sizeof(*(src->{})); i++)",
            name, name
        )?;
    }
    writeln!(out, "    {{")?;
    writeln!(out, "    tmp = 0;")?;

    match scalar_spec(base, is_enum, is_pointer) {
        Some(spec) => {
            let deref = if is_pointer && spec.deref { "*" } else { "" };
            if is_pointer {
                writeln!(out, "    if (src->{}{})", name, idx)?;
                writeln!(
                    out,
                    "        tmp = snprintf(dest + written, n - written, \"{}: {}\\n\", {}src->{}{});",
                    name, spec.fmt, deref, name, idx
                )?;
                writeln!(out, "    else")?;
                writeln!(
                    out,
                    "        tmp = snprintf(dest + written, n - written, \"{}: NULL\\n\");",
                    name
                )?;
            } else {
                writeln!(
                    out,
                    "    tmp = snprintf(dest + written, n - written, \"{}: {}\\n\", src->{}{});",
                    name, spec.fmt, name, idx
                )?;
            }
        }
        None => {
            // Aggregate: a dotted label, then a call into the sibling
            // printer. The null guard wraps only the label; the callee's own
            // null check covers the call itself.
            if is_pointer {
                writeln!(out, "    if (src->{}{})", name, idx)?;
                writeln!(
                    out,
                    "        tmp = snprintf(dest + written, n - written, \"{}.\");",
                    name
                )?;
                writeln!(out, "    else")?;
                writeln!(
                    out,
                    "        tmp = snprintf(dest + written, n - written, \"{}: NULL\\n\");",
                    name
                )?;
            } else {
                writeln!(
                    out,
                    "    tmp = snprintf(dest + written, n - written, \"{}.\");",
                    name
                )?;
            }
            writeln!(out, "    if (tmp > 0) written += tmp;")?;
            writeln!(out, "    if (written > n - 1) written = n - 1;")?;
            let amp = if is_pointer { "" } else { "&" };
            writeln!(
                out,
                "    tmp = print_{}(dest + written, n - written, {}src->{}{});",
                base, amp, name, idx
            )?;
        }
    }

    writeln!(out, "    if (tmp > 0) written += tmp;")?;
    writeln!(out, "    if (written > n - 1) written = n - 1;")?;
    writeln!(out, "    }}")?;
    Ok(())
}

/// Consume the rest of a union field and emit its comment stub.
///
/// The union's keyword, tag and body (or its aliased type name) are already
/// consumed; the cursor sits on an optional star or the field name. Unions
/// are never destructured, so nothing executable is emitted.
fn emit_union_stub<W: Write>(cursor: &mut Cursor, out: &mut W) -> io::Result<()> {
    cursor.eat(TokenKind::Star);
    if cursor.is(TokenKind::Ident) {
        let name = cursor.token().text;
        cursor.advance();
        seek_separator(cursor);
        writeln!(out, "    // {}: union (not printed)", name)?;
    } else {
        warn!("union field without a name near {}", cursor.token());
        seek_separator(cursor);
        writeln!(out, "    // unnamed union field (not printed)")?;
    }
    Ok(())
}

/// Advance to the field separator without consuming it.
///
/// Stops early at a closing brace or end of input so a malformed declaration
/// cannot drag the cursor out of the enclosing body.
fn seek_separator(cursor: &mut Cursor) {
    while !cursor.at_eof() && !cursor.is(TokenKind::Semicolon) && !cursor.is(TokenKind::RBrace) {
        cursor.advance();
    }
}
