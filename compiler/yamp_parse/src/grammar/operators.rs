//! Operator builders and the standard operator table.

use yamp_ir::{BinaryOp, ExprId, ExprKind, Span, UnaryOp};

use super::{Assoc, OperatorDef};
use crate::context::Mode;
use crate::error::{invalid_assignment_target, invalid_lambda_params, ErrorContext, ParseError};
use crate::parser::Parser;

/// Standard precedence levels; higher binds tighter.
pub mod prec {
    pub const ASSIGN: u8 = 1;
    pub const LAMBDA: u8 = 2;
    pub const OR: u8 = 3;
    pub const AND: u8 = 4;
    pub const COMPARISON: u8 = 5;
    pub const ADDITIVE: u8 = 6;
    pub const RANGE: u8 = 7;
    pub const MULTIPLICATIVE: u8 = 8;
    /// Operand level of prefix `-`, `+`, `!`, `~`.
    pub const PREFIX: u8 = 9;
    pub const POWER: u8 = 10;
    pub const POSTFIX: u8 = 11;
    pub const CALL: u8 = 12;
}

/// Infix operator producing `ExprKind::Binary`.
pub fn binary(symbol: &str, precedence: u8, assoc: Assoc, op: BinaryOp) -> OperatorDef {
    OperatorDef::infix(symbol, precedence, assoc, move |_, left, right| {
        Ok(ExprKind::Binary { op, left, right })
    })
}

/// Postfix operator producing `ExprKind::Unary`.
pub fn postfix_unary(symbol: &str, op: UnaryOp) -> OperatorDef {
    OperatorDef::postfix(symbol, prec::POSTFIX, move |_, operand, _| {
        Ok(ExprKind::Unary { op, operand })
    })
}

/// `=` (with `op == None`) or a compound assignment such as `+=`.
pub fn assignment(symbol: &str, op: Option<BinaryOp>) -> OperatorDef {
    OperatorDef::infix(symbol, prec::ASSIGN, Assoc::Right, move |p, target, value| {
        check_assignment_target(p, target, op.is_some())?;
        Ok(ExprKind::Assign { target, op, value })
    })
}

/// Valid targets: `x`, `x(i, ..)`, and for plain `=` a single-row matrix
/// of identifiers `[a, b]`.
fn check_assignment_target(p: &Parser<'_>, target: ExprId, compound: bool) -> Result<(), ParseError> {
    let arena = p.arena();
    let expr = arena.get_expr(target);
    let valid = match &expr.kind {
        ExprKind::Ident(_) => true,
        ExprKind::Call { callee, .. } => matches!(arena.kind(*callee), ExprKind::Ident(_)),
        ExprKind::Matrix(rows) if !compound => {
            rows.len() == 1
                && !rows[0].is_empty()
                && rows[0]
                    .iter()
                    .all(|&id| matches!(arena.kind(id), ExprKind::Ident(_)))
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(invalid_assignment_target(expr.span, expr.kind.describe()))
    }
}

/// `x => body`, `(x, y) => body`, `() => body`.
pub fn lambda() -> OperatorDef {
    OperatorDef::infix("=>", prec::LAMBDA, Assoc::Right, |p, head, body| {
        let arena = p.arena();
        let ident = |id: ExprId| match arena.kind(id) {
            ExprKind::Ident(name) => Some(name.clone()),
            _ => None,
        };
        let names = match arena.kind(head) {
            ExprKind::Ident(name) => Some(vec![name.clone()]),
            ExprKind::Tuple(items) => items.iter().map(|&id| ident(id)).collect(),
            _ => None,
        };
        let params = names.ok_or_else(|| invalid_lambda_params(arena.get_expr(head).span))?;
        Ok(ExprKind::Lambda { params, body })
    })
}

pub fn range() -> OperatorDef {
    OperatorDef::infix(":", prec::RANGE, Assoc::Right, |_, left, right| {
        Ok(ExprKind::Range { left, right })
    })
}

/// `callee(args)`; the argument list allows `:` and `end`.
pub fn call() -> OperatorDef {
    OperatorDef::postfix("(", prec::CALL, |p, callee, open: Span| {
        let args = p.parse_delimited(Mode::Arguments, open, '(', ')', ErrorContext::Arguments)?;
        Ok(ExprKind::Call { callee, args })
    })
}

/// Every operator of the standard grammar.
pub(super) fn standard() -> Vec<OperatorDef> {
    use BinaryOp as B;

    vec![
        assignment("=", None),
        assignment("+=", Some(B::Add)),
        assignment("-=", Some(B::Sub)),
        assignment("*=", Some(B::Mul)),
        assignment("/=", Some(B::Div)),
        assignment("^=", Some(B::Pow)),
        lambda(),
        binary("||", prec::OR, Assoc::Left, B::Or),
        binary("&&", prec::AND, Assoc::Left, B::And),
        binary("==", prec::COMPARISON, Assoc::Left, B::Eq),
        binary("~=", prec::COMPARISON, Assoc::Left, B::NotEq),
        binary("!=", prec::COMPARISON, Assoc::Left, B::NotEq),
        binary("<", prec::COMPARISON, Assoc::Left, B::Lt),
        binary("<=", prec::COMPARISON, Assoc::Left, B::LtEq),
        binary(">", prec::COMPARISON, Assoc::Left, B::Gt),
        binary(">=", prec::COMPARISON, Assoc::Left, B::GtEq),
        binary("+", prec::ADDITIVE, Assoc::Left, B::Add),
        binary("-", prec::ADDITIVE, Assoc::Left, B::Sub),
        range(),
        binary("*", prec::MULTIPLICATIVE, Assoc::Left, B::Mul),
        binary("/", prec::MULTIPLICATIVE, Assoc::Left, B::Div),
        binary("\\", prec::MULTIPLICATIVE, Assoc::Left, B::LeftDiv),
        binary(".*", prec::MULTIPLICATIVE, Assoc::Left, B::ElemMul),
        binary("./", prec::MULTIPLICATIVE, Assoc::Left, B::ElemDiv),
        binary("^", prec::POWER, Assoc::Right, B::Pow),
        binary(".^", prec::POWER, Assoc::Right, B::ElemPow),
        postfix_unary("'", UnaryOp::Transpose),
        postfix_unary("!", UnaryOp::Factorial),
        call(),
    ]
}
