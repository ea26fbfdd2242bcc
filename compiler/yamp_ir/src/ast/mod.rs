//! Expression tree node definitions.

mod expr;
mod operators;

pub use expr::{Expr, ExprId, ExprKind, Stmt};
pub use operators::{BinaryOp, UnaryOp};
