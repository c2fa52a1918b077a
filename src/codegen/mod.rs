//! C source emission
//!
//! Turns scanned declarations into generated C text:
//! - [`emit`]: Annotated-struct detection, field classification, and the
//!   text of each `print_<name>` function
//! - [`driver`]: Two-pass orchestration over the input file list
//!
//! Output is append-only: the preamble, then per input file either its
//! generated functions or a diagnostic comment, in file order. Nothing
//! already written is revised.

pub mod driver;
pub mod emit;
