//! Evaluator for the YAMP expression language.
//!
//! Executes parsed statements against a mutable [`Environment`] and a
//! read-only [`Library`] of registered functions and constants.
//!
//! # Architecture
//!
//! - [`Environment`]: the variable namespace, a stack of scopes whose
//!   outermost scope belongs to the session
//! - [`Library`]: functions (each a list of [`Overload`]s) and constants;
//!   [`Library::standard`] registers the stock set
//! - [`overload`]: parameter descriptors and best-candidate selection
//! - [`Interpreter`]: the tree walker, with closure calls, indexing and
//!   resource [`Limits`]
//!
//! Evaluation is single-threaded per environment. A `Library` is immutable
//! after construction and can be shared between threads.

mod builtins;
mod environment;
mod interpreter;
mod library;
mod limits;
pub mod overload;

pub use environment::{Environment, Scope};
pub use interpreter::Interpreter;
pub use library::Library;
pub use limits::{Limits, DEFAULT_RECURSION_LIMIT};
pub use overload::{
    resolve, select, Arguments, CallContext, NativeFn, Overload, Param, ParamKind, Signature,
    Variadic,
};

#[cfg(test)]
mod tests;
