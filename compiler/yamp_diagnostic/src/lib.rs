//! Diagnostics for parse and evaluation failures.
//!
//! Every failure a query can produce maps to a stable [`ErrorCode`]. A
//! [`Diagnostic`] bundles the code with a message, an optional primary span
//! and free-form notes; [`emitter::render`] turns it into plain text with a
//! caret under the offending input.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
