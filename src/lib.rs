//! # Introduction
//!
//! creflect generates reflection-style printers for C structs. C has no
//! native reflection, so the tool reads headers ahead of compilation, finds
//! structs marked with the [`ANNOTATION`] identifier, and writes the C source
//! of a `print_<name>` function for each one. The generated function formats
//! every field as `name: value` lines into a caller-supplied buffer, safely
//! bounded by the buffer's capacity.
//!
//! ## Generation pipeline
//!
//! ```text
//! Headers → Lexer → Cursor → pass 1: Alias Table
//!                          → pass 2: Field classification → Generated C
//! ```
//!
//! 1. [`parser`] — tokenises declaration text behind a streaming cursor,
//!    skips composite bodies structurally, and resolves typedef chains to
//!    their terminal concrete types.
//! 2. [`codegen`] — detects annotated structs, classifies each field by its
//!    alias-resolved base type, and emits the printer functions plus the
//!    two-line include preamble to standard output.
//!
//! ## Supported C subset
//!
//! Structs with scalar fields (`char`, `short`, `int`, `long`, `float`,
//! `double`, `size_t`), enums, pointers, fixed-size arrays, typedef chains,
//! and nested structs via sibling printers. Unions are stepped over and
//! stubbed; bit-fields, function pointers and multi-dimensional arrays are
//! out of scope.

pub mod codegen;
pub mod parser;

use std::sync::Once;

/// The annotation identifier that marks a struct for generation.
///
/// Inputs are expected to define it away for the real compiler, typically
/// with an empty `#define`; that definition line itself never triggers
/// generation.
pub const ANNOTATION: &str = "generate_properties";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=creflect=debug` or `RUST_LOG=creflect=trace`.
/// Log lines go to standard error; standard output carries only the
/// generated C.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
