//! Two-pass generation over an ordered input file list
//!
//! Pass 1 reads every file and accumulates typedefs into one run-wide
//! [`AliasTable`]. Pass 2 reads every file again and emits printers against
//! the completed table, so an alias declared in one file resolves while any
//! other file is emitted. Each pass re-reads the file fresh; no parse state
//! is shared between passes beyond the table itself.

use std::fs;
use std::io::{self, Write};

use tracing::{debug, warn};

use super::emit;
use crate::parser::aliases::{scan_typedefs, AliasTable};

/// Declarations the generated functions depend on. Written once, before any
/// per-file output.
pub const PREAMBLE: &str = "#include <stddef.h>\n#include <stdio.h>\n";

/// Run both passes over `paths` in order, writing generated C to `out`.
///
/// A file that cannot be read never aborts the run: pass 1 logs and moves
/// on, pass 2 leaves a diagnostic comment in the output in the position the
/// file's functions would have taken.
pub fn generate<W: Write>(paths: &[String], out: &mut W) -> io::Result<()> {
    out.write_all(PREAMBLE.as_bytes())?;

    let mut aliases = AliasTable::new();
    for path in paths {
        match fs::read_to_string(path) {
            Ok(src) => scan_typedefs(&src, &mut aliases),
            Err(err) => warn!("could not read '{}' during the alias pass: {}", path, err),
        }
    }
    debug!("alias table holds {} entries", aliases.len());

    for path in paths {
        match fs::read_to_string(path) {
            Ok(src) => emit::scan_annotated(&src, &aliases, out)?,
            Err(err) => {
                warn!("could not read '{}': {}", path, err);
                writeln!(out, "// file: {} was not able to be processed.", path)?;
            }
        }
    }
    Ok(())
}
