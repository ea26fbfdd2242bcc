//! Cross-module tests: tree printing helpers and grammar extension.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use yamp_ir::{BinaryOp, ExprArena, ExprId, ExprKind, Stmt};

use crate::grammar::forms::starts_with_keyword;
use crate::grammar::operators::binary;
use crate::{parse, Assoc, ExpressionForm, Grammar, OperatorDef, ParseError, ParseFlags, Parser};

/// Render a subtree as an S-expression.
pub(crate) fn sexp(arena: &ExprArena, id: ExprId) -> String {
    if !id.is_present() {
        return "_".to_string();
    }
    let list = |ids: &[ExprId]| {
        ids.iter()
            .map(|&id| sexp(arena, id))
            .collect::<Vec<_>>()
            .join(" ")
    };
    match arena.kind(id) {
        ExprKind::Real(x) => format!("{x}"),
        ExprKind::Imaginary(x) => format!("{x}i"),
        ExprKind::Str(s) => format!("{s:?}"),
        ExprKind::Ident(name) => name.clone(),
        ExprKind::End => "end".to_string(),
        ExprKind::SelectAll => ":".to_string(),
        ExprKind::Unary { op, operand } => format!("({op:?} {})", sexp(arena, *operand)),
        ExprKind::Binary { op, left, right } => format!(
            "({} {} {})",
            op.as_symbol(),
            sexp(arena, *left),
            sexp(arena, *right)
        ),
        ExprKind::Range { left, right } => {
            format!("(: {} {})", sexp(arena, *left), sexp(arena, *right))
        }
        ExprKind::Assign { target, op, value } => format!(
            "({}= {} {})",
            op.map_or("", BinaryOp::as_symbol),
            sexp(arena, *target),
            sexp(arena, *value)
        ),
        ExprKind::Call { callee, args } => {
            let args = list(args);
            if args.is_empty() {
                format!("(call {})", sexp(arena, *callee))
            } else {
                format!("(call {} {args})", sexp(arena, *callee))
            }
        }
        ExprKind::Matrix(rows) => {
            let rows: Vec<String> = rows.iter().map(|row| list(row)).collect();
            format!("[{}]", rows.join("; "))
        }
        ExprKind::Tuple(items) => format!("(tuple {})", list(items)),
        ExprKind::Lambda { params, body } => {
            format!("(=> ({}) {})", params.join(" "), sexp(arena, *body))
        }
        ExprKind::Block(stmts) => format!("{{{}}}", statements(arena, stmts)),
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => format!(
            "(if {} {} {})",
            sexp(arena, *cond),
            sexp(arena, *then_branch),
            sexp(arena, *else_branch)
        ),
        ExprKind::While { cond, body } => {
            format!("(while {} {})", sexp(arena, *cond), sexp(arena, *body))
        }
        ExprKind::For {
            init,
            cond,
            step,
            body,
        } => format!(
            "(for {} {} {} {})",
            sexp(arena, *init),
            sexp(arena, *cond),
            sexp(arena, *step),
            sexp(arena, *body)
        ),
    }
}

/// Statements joined by `; `, muted ones suffixed with `;`.
pub(crate) fn statements(arena: &ExprArena, stmts: &[Stmt]) -> String {
    stmts
        .iter()
        .map(|s| {
            let text = sexp(arena, s.expr);
            if s.muted {
                format!("{text};")
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse with the standard grammar and print every statement.
pub(crate) fn render(source: &str) -> String {
    let grammar = Grammar::standard();
    let output = parse(&grammar, source).unwrap_or_else(|e| panic!("{source:?}: {e}"));
    statements(&output.arena, &output.statements)
}

pub(crate) fn parse_err(source: &str) -> ParseError {
    let grammar = Grammar::standard();
    match parse(&grammar, source) {
        Ok(output) => panic!(
            "{source:?} parsed as {}",
            statements(&output.arena, &output.statements)
        ),
        Err(err) => err,
    }
}

/// `x %% y`: a host-registered operator.
#[test]
fn test_register_custom_operator() {
    let mut grammar = Grammar::standard();
    grammar
        .register_operator(binary("%%", 8, Assoc::Left, BinaryOp::ElemMul))
        .unwrap();
    let output = parse(&grammar, "1 + 2 %% 3").unwrap();
    assert_eq!(
        statements(&output.arena, &output.statements),
        "(+ 1 (.* 2 3))"
    );
}

#[test]
fn test_duplicate_operator_rejected() {
    let mut grammar = Grammar::standard();
    let err = grammar
        .register_operator(binary("+", 6, Assoc::Left, BinaryOp::Add))
        .unwrap_err();
    assert_eq!(err.to_string(), "operator `+` is already registered");
}

/// `nil` keyword evaluating to an empty matrix literal.
struct NilForm;

impl ExpressionForm for NilForm {
    fn name(&self) -> &'static str {
        "nil"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        starts_with_keyword(input, "nil")
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        p.cursor_mut().advance(3);
        Ok(p.alloc_from(ExprKind::Matrix(Vec::new()), start))
    }
}

#[test]
fn test_register_custom_form_with_priority() {
    let mut grammar = Grammar::standard();
    // Above identifiers, so `nil` never reads as a variable.
    grammar.register_expression(650, NilForm).unwrap();
    let output = parse(&grammar, "x = nil").unwrap();
    assert_eq!(statements(&output.arena, &output.statements), "(= x [])");
    let output = parse(&grammar, "nile").unwrap();
    assert_eq!(statements(&output.arena, &output.statements), "nile");
    assert!(grammar.register_expression(1, NilForm).is_err());
}

#[test]
fn test_custom_postfix_operator() {
    let mut grammar = Grammar::standard();
    grammar
        .register_operator(OperatorDef::postfix("%", 11, |_, operand, _| {
            Ok(ExprKind::Unary {
                op: yamp_ir::UnaryOp::Plus,
                operand,
            })
        }))
        .unwrap();
    let output = parse(&grammar, "5% + 1").unwrap();
    assert_eq!(
        statements(&output.arena, &output.statements),
        "(+ (Plus 5) 1)"
    );
}
