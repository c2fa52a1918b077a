//! Typedef alias table
//!
//! Pass 1 walks every input file looking for `typedef` declarations and
//! records each one as an [`AliasEntry`]. The table spans the whole run: an
//! alias declared in one file resolves while any later file is emitted. It is
//! append-only while scanning and read-only afterwards.
//!
//! [`AliasTable::resolve`] follows chains transitively, so an alias of an
//! alias of `int` classifies exactly like `int`. The union/enum shape is
//! re-derived on every hop rather than frozen at registration, which keeps a
//! two-hop alias of a union classified as a union.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::cursor::Cursor;
use super::lexer::{Token, TokenKind};
use super::skip;
use crate::ANNOTATION;

/// One recorded `typedef`: the parent type it names, the alias it declares,
/// and whether the parent was union- or enum-shaped at the declaration site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub parent: String,
    pub alias: String,
    pub is_union: bool,
    pub is_enum: bool,
}

/// The terminal concrete type behind a name, with its resolved shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedType<'a> {
    pub name: &'a str,
    pub is_union: bool,
    pub is_enum: bool,
}

/// Ordered alias storage with an exact-name lookup index.
///
/// Entries are append-only; redeclaring an alias points the index at the
/// newest entry without disturbing earlier ones.
#[derive(Default)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    index: FxHashMap<String, usize>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry and point the lookup index at it.
    pub fn register(&mut self, parent: &str, alias: &str, is_union: bool, is_enum: bool) {
        debug!("alias '{}' -> '{}' (union: {}, enum: {})", alias, parent, is_union, is_enum);
        let at = self.entries.len();
        self.entries.push(AliasEntry {
            parent: parent.to_owned(),
            alias: alias.to_owned(),
            is_union,
            is_enum,
        });
        self.index.insert(alias.to_owned(), at);
    }

    /// Resolve `name` through the table to its terminal concrete type.
    ///
    /// A name with no entry is already terminal and comes back unchanged with
    /// no shape flags. Hops are bounded by the entry count so a declaration
    /// cycle degrades into a warning instead of looping.
    pub fn resolve<'r>(&'r self, name: &'r str) -> ResolvedType<'r> {
        let mut current = name;
        let mut is_union = false;
        let mut is_enum = false;
        let mut hops = 0;
        while let Some(&at) = self.index.get(current) {
            let entry = &self.entries[at];
            is_union = entry.is_union;
            is_enum = entry.is_enum;
            current = &entry.parent;
            hops += 1;
            if hops > self.entries.len() {
                warn!("alias cycle while resolving '{}'; stopping at '{}'", name, current);
                break;
            }
        }
        ResolvedType {
            name: current,
            is_union,
            is_enum,
        }
    }
}

/// Pass-1 scan of one file: register every top-level `typedef`.
pub fn scan_typedefs(src: &str, table: &mut AliasTable) {
    let mut cursor = Cursor::new(src);
    cursor.advance();
    while !cursor.at_eof() {
        if cursor.matches("typedef") {
            register_typedef(&mut cursor, table);
        } else {
            cursor.advance();
        }
    }
}

/// Record the `typedef` the cursor sits on.
///
/// Record-shaped declarations capture the tag as the parent and step over an
/// inline body with the structural skipper, leaving the alias name as the
/// next token. Plain declarations take the last two identifiers before the
/// separator, so multi-word parents like `unsigned long` keep their final,
/// classifying word. Anything else is reported and left unregistered.
fn register_typedef(cursor: &mut Cursor, table: &mut AliasTable) {
    cursor.advance();

    // The annotation marker may sit between `typedef` and the record
    // keyword when the declaration itself requests generation.
    if cursor.matches(ANNOTATION) {
        cursor.advance();
    }

    let is_union = cursor.matches("union");
    let is_enum = cursor.matches("enum");
    if is_union || is_enum || cursor.matches("struct") {
        cursor.advance();
        let parent = if cursor.is(TokenKind::Ident) {
            let tag = cursor.token().text.to_owned();
            cursor.advance();
            tag
        } else {
            String::new()
        };
        if cursor.is(TokenKind::LBrace) {
            if is_enum {
                skip::skip_enum_body(cursor);
            } else {
                skip::skip_record_body(cursor);
            }
        }
        let alias = cursor.token();
        if parent.is_empty() || alias.kind != TokenKind::Ident {
            warn!("unsupported record typedef near {}; not registered", alias);
            return;
        }
        table.register(&parent, alias.text, is_union, is_enum);
        return;
    }

    let mut parent = Token::none();
    let mut alias = Token::none();
    while !cursor.at_eof() && !cursor.is(TokenKind::Semicolon) {
        parent = alias;
        alias = cursor.token();
        cursor.advance();
    }
    if parent.kind != TokenKind::Ident || alias.kind != TokenKind::Ident {
        warn!("unsupported typedef near {}; not registered", alias);
        return;
    }
    table.register(parent.text, alias.text, false, false);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_from(src: &str) -> AliasTable {
        let mut table = AliasTable::new();
        scan_typedefs(src, &mut table);
        table
    }

    #[test]
    fn test_unaliased_name_is_terminal() {
        let table = AliasTable::new();
        let resolved = table.resolve("int");
        assert_eq!(resolved.name, "int");
        assert!(!resolved.is_union);
        assert!(!resolved.is_enum);
    }

    #[test]
    fn test_single_hop() {
        let table = table_from("typedef int custom_type;");
        assert_eq!(table.resolve("custom_type").name, "int");
    }

    #[test]
    fn test_two_hop_chain() {
        let table = table_from(
            "typedef int custom_type;\n\
             typedef custom_type yet_another_custom_type;\n",
        );
        assert_eq!(table.resolve("yet_another_custom_type").name, "int");
    }

    #[test]
    fn test_struct_typedef_without_body() {
        let table = table_from("typedef struct struct_as_type st;");
        let resolved = table.resolve("st");
        assert_eq!(resolved.name, "struct_as_type");
        assert!(!resolved.is_union);
        assert!(!resolved.is_enum);
    }

    #[test]
    fn test_struct_typedef_with_inline_body() {
        let table = table_from("typedef struct tag { int x; char *s; } alias;");
        assert_eq!(table.resolve("alias").name, "tag");
    }

    #[test]
    fn test_annotated_typedef_struct() {
        let table = table_from("typedef generate_properties struct inline_struct { int baz; } is;");
        assert_eq!(table.resolve("is").name, "inline_struct");
    }

    #[test]
    fn test_enum_typedef_sets_flag() {
        let table = table_from("typedef enum color shade;");
        let resolved = table.resolve("shade");
        assert_eq!(resolved.name, "color");
        assert!(resolved.is_enum);
        assert!(!resolved.is_union);
    }

    #[test]
    fn test_union_flag_survives_two_hops() {
        let table = table_from(
            "typedef union u_tag shallow;\n\
             typedef shallow deep;\n",
        );
        let resolved = table.resolve("deep");
        assert_eq!(resolved.name, "u_tag");
        assert!(resolved.is_union);
    }

    #[test]
    fn test_enum_typedef_with_body() {
        let table = table_from("typedef enum { RED, GREEN } color_t;");
        // Anonymous parent: reported, not registered.
        assert!(table.is_empty());
        let table = table_from("typedef enum color { RED, GREEN } color_t;");
        let resolved = table.resolve("color_t");
        assert_eq!(resolved.name, "color");
        assert!(resolved.is_enum);
    }

    #[test]
    fn test_multi_word_parent_keeps_last_word() {
        let table = table_from("typedef unsigned long ull;");
        assert_eq!(table.resolve("ull").name, "long");
    }

    #[test]
    fn test_pointer_typedef_is_not_registered() {
        let table = table_from("typedef int *int_ptr;");
        assert!(table.is_empty());
        assert_eq!(table.resolve("int_ptr").name, "int_ptr");
    }

    #[test]
    fn test_degenerate_typedef_does_not_swallow_next_declaration() {
        let table = table_from("typedef orphan;\ntypedef int custom_type;\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("custom_type").name, "int");
    }

    #[test]
    fn test_last_writer_wins_without_corrupting_entries() {
        let mut table = AliasTable::new();
        table.register("int", "value_t", false, false);
        table.register("long", "value_t", false, false);
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("value_t").name, "long");
    }

    #[test]
    fn test_cycle_terminates() {
        let mut table = AliasTable::new();
        table.register("a", "b", false, false);
        table.register("b", "a", false, false);
        let resolved = table.resolve("a");
        assert!(resolved.name == "a" || resolved.name == "b");
    }

    #[test]
    fn test_table_accumulates_across_files() {
        let mut table = AliasTable::new();
        scan_typedefs("typedef int custom_type;", &mut table);
        scan_typedefs("typedef custom_type from_other_file;", &mut table);
        assert_eq!(table.resolve("from_other_file").name, "int");
    }

    #[test]
    fn test_commented_typedef_is_ignored() {
        let table = table_from("// typedef int ghost;\nint x;\n");
        assert!(table.is_empty());
    }
}
