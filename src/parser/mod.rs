//! C header scanning
//!
//! This module reads C declaration text without building a syntax tree:
//! - [`lexer`]: Tokenization (source text → one token at a time)
//! - [`cursor`]: Streaming cursor holding the current/previous token pair
//! - [`skip`]: Structural skipping over composite bodies
//! - [`aliases`]: Typedef registration and transitive resolution
//!
//! # Supported C Subset
//!
//! The scan understands just enough declaration syntax to classify struct
//! fields:
//! - Records: `struct`, `union`, `enum`, with tags and braced bodies
//! - Fields: qualifiers (`const`, `unsigned`, `signed`), one pointer star,
//!   one fixed-length array suffix
//! - Typedefs: plain aliases, alias chains, record-shaped aliases with
//!   inline bodies
//! - No preprocessor evaluation (directive tokens are stepped over), no
//!   bit-fields, no function pointers, no multi-dimensional arrays
//!
//! # Implementation
//!
//! Hand-written single-token-lookahead scanning over a streaming cursor.
//! No external parser generator dependencies.

pub mod aliases;
pub mod cursor;
pub mod lexer;
pub mod skip;
