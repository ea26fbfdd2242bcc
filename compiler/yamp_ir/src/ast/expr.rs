//! Expression nodes.
//!
//! Children are referenced by [`ExprId`]; each id appears exactly once as a
//! child, so the tree has exclusive ownership and no cycles even though the
//! storage is flat.

use std::fmt;

use super::{BinaryOp, UnaryOp};
use crate::Span;

/// Index into an [`ExprArena`](crate::ExprArena).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Sentinel for absent optional children (e.g. a missing `else`).
    pub const INVALID: ExprId = ExprId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_present(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            write!(f, "ExprId({})", self.0)
        } else {
            write!(f, "ExprId::INVALID")
        }
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// A node together with its source span.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// One statement of a statement sequence.
///
/// A muted statement (terminated by `;`) is still evaluated but reports no
/// output value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub expr: ExprId,
    pub muted: bool,
}

/// Expression node variants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    // Literals
    /// Real numeric literal: `2`, `.5`, `1e-3`.
    Real(f64),
    /// Imaginary literal: `2i`, `3.5i`.
    Imaginary(f64),
    /// String literal with escapes already decoded.
    Str(String),

    /// Symbol reference (variable, constant or function name).
    Ident(String),

    /// The `end` keyword: open range bound, or last index inside an index list.
    End,

    /// Bare `:` inside an argument list: select every index of that dimension.
    SelectAll,

    Unary {
        op: UnaryOp,
        operand: ExprId,
    },

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `start:end`, where either side may itself be a range (`a:b:c`).
    Range {
        left: ExprId,
        right: ExprId,
    },

    /// `target = value` or compound `target op= value`.
    ///
    /// The target is an identifier, an index expression `x(i, j)` or a
    /// matrix literal of identifiers for multi-assignment.
    Assign {
        target: ExprId,
        op: Option<BinaryOp>,
        value: ExprId,
    },

    /// `callee(args)`: function call or indexing, decided at run time.
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },

    /// Matrix literal, rows of element expressions.
    Matrix(Vec<Vec<ExprId>>),

    /// Parenthesised list with a count other than one: `()`, `(x, y)`.
    /// Only valid as a lambda parameter list.
    Tuple(Vec<ExprId>),

    /// `params => body`.
    Lambda {
        params: Vec<String>,
        body: ExprId,
    },

    /// `{ stmt; stmt }`.
    Block(Vec<Stmt>),

    /// `if (cond) then else otherwise`; `else_branch` may be `INVALID`.
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },

    /// `while (cond) body`.
    While {
        cond: ExprId,
        body: ExprId,
    },

    /// `for (init; cond; step) body`; any header part may be `INVALID`,
    /// a missing `cond` meaning always true.
    For {
        init: ExprId,
        cond: ExprId,
        step: ExprId,
        body: ExprId,
    },
}

impl ExprKind {
    /// Control-flow forms end a statement without an explicit terminator.
    pub fn is_control_flow(&self) -> bool {
        matches!(
            self,
            ExprKind::Block(_) | ExprKind::If { .. } | ExprKind::While { .. } | ExprKind::For { .. }
        )
    }

    /// Human-readable node name for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            ExprKind::Real(_) | ExprKind::Imaginary(_) => "number",
            ExprKind::Str(_) => "string",
            ExprKind::Ident(_) => "identifier",
            ExprKind::End => "`end`",
            ExprKind::SelectAll => "`:`",
            ExprKind::Unary { .. } => "unary expression",
            ExprKind::Binary { .. } => "binary expression",
            ExprKind::Range { .. } => "range",
            ExprKind::Assign { .. } => "assignment",
            ExprKind::Call { .. } => "call",
            ExprKind::Matrix(_) => "matrix literal",
            ExprKind::Tuple(_) => "parameter list",
            ExprKind::Lambda { .. } => "lambda",
            ExprKind::Block(_) => "block",
            ExprKind::If { .. } => "`if`",
            ExprKind::While { .. } => "`while`",
            ExprKind::For { .. } => "`for`",
        }
    }
}
