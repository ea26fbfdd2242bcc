#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use yamp_ir::{Expr, ExprArena, ExprKind, SharedArena, Span};

use crate::complex::Complex;
use crate::errors::EvalErrorKind;
use crate::function::{FunctionValue, Lambda};
use crate::matrix::Matrix;
use crate::plot::{PlotSeries, PlotValue};
use crate::range::RangeValue;
use crate::set::{SetElement, SetValue};
use crate::value::Value;

fn round_trip(value: &Value) -> Value {
    Value::from_bytes(&value.to_bytes().unwrap()).unwrap()
}

fn square_lambda() -> FunctionValue {
    let mut arena = ExprArena::new();
    let x = arena.alloc_expr(Expr::new(ExprKind::Ident("x".into()), Span::new(5, 6)));
    let body = arena.alloc_expr(Expr::new(
        ExprKind::Binary {
            op: yamp_ir::BinaryOp::Mul,
            left: x,
            right: x,
        },
        Span::new(5, 9),
    ));
    FunctionValue::Lambda(Lambda {
        params: vec!["x".into()],
        body,
        arena: SharedArena::new(arena),
        captures: vec![("k".into(), Value::real(2.0))],
    })
}

#[test]
fn test_round_trip_scalars() {
    for v in [
        Value::real(3.5),
        Value::complex(-1.0, 2.0),
        Value::real(f64::INFINITY),
    ] {
        assert_eq!(round_trip(&v), v);
    }
    let nan = round_trip(&Value::real(f64::NAN));
    assert!(nan.as_real().is_some_and(f64::is_nan));
}

#[test]
fn test_round_trip_containers() {
    let matrix = Value::matrix(Matrix::from_reals(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap());
    let range = Value::Range(RangeValue::open(1.0, 2.0).unwrap());
    let mut set = SetValue::new("s", true);
    set.insert(SetElement::Number(Complex::real(3.0)));
    set.insert(SetElement::Text("a".into()));
    for v in [matrix, range, Value::string("text"), Value::set(set), Value::empty_matrix()] {
        assert_eq!(round_trip(&v), v);
    }
}

#[test]
fn test_round_trip_lambda() {
    let f = Value::function(square_lambda());
    assert_eq!(round_trip(&f), f);
    let named = Value::function(FunctionValue::Named("sin".into()));
    assert_eq!(round_trip(&named), named);
}

#[test]
fn test_round_trip_plot_with_function_series() {
    let plot = PlotValue::new(vec![PlotSeries::Function {
        function: square_lambda(),
        from: 0.0,
        to: 1.0,
    }])
    .with_title("squares");
    let v = Value::plot(plot);
    assert_eq!(round_trip(&v), v);
}

/// `bytes` with the first occurrence of `from` overwritten by `to`.
fn patched(bytes: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let at = bytes
        .windows(from.len())
        .position(|w| w == from)
        .expect("pattern present");
    let mut out = bytes.to_vec();
    out[at..at + to.len()].copy_from_slice(to);
    out
}

fn assert_rejected(bytes: &[u8]) {
    let err = Value::from_bytes(bytes).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Serialization { .. }), "{err:?}");
}

#[test]
fn test_zero_step_range_is_rejected() {
    let range = Value::Range(RangeValue::bounded(1.0, 2.0, 3.0).unwrap());
    let bytes = range.to_bytes().unwrap();
    assert_rejected(&patched(&bytes, &2.0f64.to_le_bytes(), &0.0f64.to_le_bytes()));
}

#[test]
fn test_nested_matrix_shape_is_checked() {
    let points = PlotSeries::Points {
        x: Matrix::from_reals(1, 2, &[5.0, 6.0]).unwrap(),
        y: Matrix::from_reals(1, 2, &[7.0, 8.0]).unwrap(),
    };
    let bytes = Value::plot(PlotValue::new(vec![points])).to_bytes().unwrap();
    let shape = [1u64.to_le_bytes(), 2u64.to_le_bytes()].concat();
    let wrong = [2u64.to_le_bytes(), 2u64.to_le_bytes()].concat();
    assert_rejected(&patched(&bytes, &shape, &wrong));
}

#[test]
fn test_lambda_body_outside_arena_is_rejected() {
    let FunctionValue::Lambda(mut lambda) = square_lambda() else {
        unreachable!()
    };
    lambda.body = yamp_ir::ExprId::new(9);
    let bytes = Value::function(FunctionValue::Lambda(lambda)).to_bytes().unwrap();
    assert_rejected(&bytes);
}

#[test]
fn test_lambda_with_dangling_child_is_rejected() {
    let mut arena = ExprArena::new();
    let body = arena.alloc_expr(Expr::new(
        ExprKind::Unary {
            op: yamp_ir::UnaryOp::Neg,
            operand: yamp_ir::ExprId::new(4),
        },
        Span::new(0, 2),
    ));
    let lambda = Lambda {
        params: vec!["x".into()],
        body,
        arena: SharedArena::new(arena),
        captures: Vec::new(),
    };
    let bytes = Value::function(FunctionValue::Lambda(lambda)).to_bytes().unwrap();
    assert_rejected(&bytes);
}

#[test]
fn test_unsorted_ordered_set_is_rejected() {
    let mut set = SetValue::new("s", true);
    set.insert(SetElement::Number(Complex::real(1.0)));
    set.insert(SetElement::Number(Complex::real(2.0)));
    let bytes = Value::set(set).to_bytes().unwrap();
    assert_rejected(&patched(&bytes, &1.0f64.to_le_bytes(), &3.0f64.to_le_bytes()));
}

#[test]
fn test_garbage_is_rejected() {
    let err = Value::from_bytes(&[0xFF, 0xFF, 0xFF]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Serialization { .. }));
}
