//! Flat node storage for expression trees.

use std::fmt;
use std::sync::Arc;

use crate::ast::{Expr, ExprId, ExprKind, Stmt};

/// Owner of every node of one parsed query (or one closure body).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node and return its id.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let index = u32::try_from(self.exprs.len()).unwrap_or(u32::MAX - 1);
        self.exprs.push(expr);
        ExprId::new(index)
    }

    /// Look up a node.
    ///
    /// Ids are only produced by this arena, so an out-of-range id is a
    /// logic error and panics.
    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.get_expr(id).kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Every node, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &Expr> {
        self.exprs.iter()
    }

    #[inline]
    pub fn contains(&self, id: ExprId) -> bool {
        id.index() < self.exprs.len()
    }

    /// Check that every child link points at an earlier node and that only
    /// optional slots are empty.
    ///
    /// Children are always allocated before their parent, so arenas built
    /// by the parser or by [`extract`](Self::extract) pass. Arenas decoded
    /// from bytes must pass before [`get_expr`](Self::get_expr) is safe.
    pub fn check_links(&self) -> Result<(), BrokenLink> {
        for (index, expr) in self.exprs.iter().enumerate() {
            let mut broken = None;
            visit_children(&expr.kind, |child, optional| {
                let fine = if child.is_present() {
                    child.index() < index
                } else {
                    optional
                };
                if !fine && broken.is_none() {
                    broken = Some(child);
                }
            });
            if let Some(child) = broken {
                return Err(BrokenLink {
                    parent: index,
                    child,
                });
            }
        }
        Ok(())
    }

    /// Copy the subtree rooted at `root` into a fresh arena.
    ///
    /// Used for closures: the resulting arena holds only the body, so a
    /// function value does not keep the whole query alive.
    pub fn extract(&self, root: ExprId) -> (ExprArena, ExprId) {
        let mut out = ExprArena::new();
        let id = self.copy_into(root, &mut out);
        (out, id)
    }

    fn copy_into(&self, id: ExprId, out: &mut ExprArena) -> ExprId {
        if !id.is_present() {
            return ExprId::INVALID;
        }
        let expr = self.get_expr(id);
        let kind = match &expr.kind {
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op: *op,
                operand: self.copy_into(*operand, out),
            },
            ExprKind::Binary { op, left, right } => ExprKind::Binary {
                op: *op,
                left: self.copy_into(*left, out),
                right: self.copy_into(*right, out),
            },
            ExprKind::Range { left, right } => ExprKind::Range {
                left: self.copy_into(*left, out),
                right: self.copy_into(*right, out),
            },
            ExprKind::Assign { target, op, value } => ExprKind::Assign {
                target: self.copy_into(*target, out),
                op: *op,
                value: self.copy_into(*value, out),
            },
            ExprKind::Call { callee, args } => ExprKind::Call {
                callee: self.copy_into(*callee, out),
                args: self.copy_all(args, out),
            },
            ExprKind::Matrix(rows) => ExprKind::Matrix(
                rows.iter()
                    .map(|row| self.copy_all(row, out))
                    .collect(),
            ),
            ExprKind::Tuple(items) => ExprKind::Tuple(self.copy_all(items, out)),
            ExprKind::Lambda { params, body } => ExprKind::Lambda {
                params: params.clone(),
                body: self.copy_into(*body, out),
            },
            ExprKind::Block(stmts) => ExprKind::Block(
                stmts
                    .iter()
                    .map(|s| Stmt {
                        expr: self.copy_into(s.expr, out),
                        muted: s.muted,
                    })
                    .collect(),
            ),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => ExprKind::If {
                cond: self.copy_into(*cond, out),
                then_branch: self.copy_into(*then_branch, out),
                else_branch: self.copy_into(*else_branch, out),
            },
            ExprKind::While { cond, body } => ExprKind::While {
                cond: self.copy_into(*cond, out),
                body: self.copy_into(*body, out),
            },
            ExprKind::For {
                init,
                cond,
                step,
                body,
            } => ExprKind::For {
                init: self.copy_into(*init, out),
                cond: self.copy_into(*cond, out),
                step: self.copy_into(*step, out),
                body: self.copy_into(*body, out),
            },
            leaf @ (ExprKind::Real(_)
            | ExprKind::Imaginary(_)
            | ExprKind::Str(_)
            | ExprKind::Ident(_)
            | ExprKind::End
            | ExprKind::SelectAll) => leaf.clone(),
        };
        out.alloc_expr(Expr::new(kind, expr.span))
    }

    fn copy_all(&self, ids: &[ExprId], out: &mut ExprArena) -> Vec<ExprId> {
        ids.iter().map(|&id| self.copy_into(id, out)).collect()
    }
}

/// A child id that does not resolve to an earlier node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BrokenLink {
    /// Index of the node holding the link.
    pub parent: usize,
    pub child: ExprId,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {} links to missing child {:?}", self.parent, self.child)
    }
}

impl std::error::Error for BrokenLink {}

/// Call `f(child, optional)` for every child slot of `kind`.
fn visit_children(kind: &ExprKind, mut f: impl FnMut(ExprId, bool)) {
    match kind {
        ExprKind::Unary { operand, .. } => f(*operand, false),
        ExprKind::Binary { left, right, .. } | ExprKind::Range { left, right } => {
            f(*left, false);
            f(*right, false);
        }
        ExprKind::Assign { target, value, .. } => {
            f(*target, false);
            f(*value, false);
        }
        ExprKind::Call { callee, args } => {
            f(*callee, false);
            args.iter().for_each(|&arg| f(arg, false));
        }
        ExprKind::Matrix(rows) => rows.iter().flatten().for_each(|&id| f(id, false)),
        ExprKind::Tuple(items) => items.iter().for_each(|&id| f(id, false)),
        ExprKind::Lambda { body, .. } => f(*body, false),
        ExprKind::Block(stmts) => stmts.iter().for_each(|s| f(s.expr, false)),
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            f(*cond, false);
            f(*then_branch, false);
            f(*else_branch, true);
        }
        ExprKind::While { cond, body } => {
            f(*cond, false);
            f(*body, false);
        }
        ExprKind::For {
            init,
            cond,
            step,
            body,
        } => {
            f(*init, true);
            f(*cond, true);
            f(*step, true);
            f(*body, false);
        }
        ExprKind::Real(_)
        | ExprKind::Imaginary(_)
        | ExprKind::Str(_)
        | ExprKind::Ident(_)
        | ExprKind::End
        | ExprKind::SelectAll => {}
    }
}

/// Thread-safe shared reference to an [`ExprArena`].
///
/// Parsed queries and closure bodies carry this so that evaluation can
/// resolve `ExprId`s without copying the tree.
#[derive(Clone, Debug)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        Self(Arc::new(arena))
    }
}

impl std::ops::Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for SharedArena {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SharedArena {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SharedArena {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ExprArena::deserialize(deserializer).map(SharedArena::new)
    }
}
