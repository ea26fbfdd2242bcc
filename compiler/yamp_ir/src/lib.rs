//! Expression tree types for the YAMP expression language.
//!
//! The parser produces a flat, arena-allocated tree: every node lives in an
//! [`ExprArena`] and refers to its children through [`ExprId`] indices. A
//! parsed query is the arena plus an ordered list of [`Stmt`]s.
//!
//! # Architecture
//!
//! - [`Span`]: byte range into the query text, used by diagnostics
//! - [`ExprArena`] / [`SharedArena`]: owned and shared node storage
//! - [`ExprKind`]: the node variants (literals, symbols, operators,
//!   assignment, calls, blocks, conditionals, loops, lambdas)
//! - [`BinaryOp`] / [`UnaryOp`]: operator tags shared by parser and evaluator
//!
//! Trees are immutable once parsed. Closures extract their body into a
//! private arena with [`ExprArena::extract`] so the closure value owns
//! exactly the nodes it needs.

mod arena;
pub mod ast;
mod span;

pub use arena::{BrokenLink, ExprArena, SharedArena};
pub use ast::{BinaryOp, Expr, ExprId, ExprKind, Stmt, UnaryOp};
pub use span::Span;
