//! Runtime values for the YAMP expression language.
//!
//! This crate owns everything the evaluator computes with:
//!
//! - [`Value`]: the closed set of runtime variants (scalar, matrix, string,
//!   range, set, function, plot)
//! - [`Complex`] and [`Matrix`]: the numeric core
//! - [`evaluate_binary`] / [`evaluate_unary`] / [`make_range`]: operator
//!   semantics across variant pairs
//! - [`index`] / [`assign_index`]: 1-based indexing and growing assignment
//! - [`EvalError`]: the typed error every fallible operation returns
//!
//! The crate is independent of parsing. Lambdas hold a [`yamp_ir::SharedArena`]
//! with their body, so a function value can be stored, serialized and called
//! long after the query that created it.

mod complex;
mod errors;
mod function;
mod index;
mod matrix;
mod ops;
mod plot;
mod range;
mod serialize;
mod set;
mod value;

pub use complex::Complex;
pub use errors::{
    ambiguous_overload, argument_range, argument_value, budget_exceeded, dimension_mismatch,
    duplicate_registration, index_out_of_bounds, invalid_signature, no_matching_overload,
    not_callable, recursion_limit_exceeded, serialization_failed, symbol_missing,
    unsupported_operation, unsupported_unary, EvalError, EvalErrorKind,
    EvalResult,
};
pub use function::{FunctionValue, Lambda};
pub use index::{assign_index, index, IndexArg};
pub use matrix::{element_count, Matrix, MAX_ELEMENTS};
pub use ops::{evaluate_binary, evaluate_unary, factorial, make_range, scalar_op};
pub use plot::{PlotSeries, PlotValue};
pub use range::{RangeEnd, RangeValue};
pub use set::{SetElement, SetValue};
pub use value::{Heap, Value, ValueKind};
