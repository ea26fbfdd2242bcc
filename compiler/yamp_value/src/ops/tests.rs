#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::errors::EvalErrorKind;
use crate::set::SetElement;

fn m(rows: usize, cols: usize, values: &[f64]) -> Value {
    Value::matrix(Matrix::from_reals(rows, cols, values).unwrap())
}

fn bin(op: BinaryOp, l: &Value, r: &Value) -> Value {
    evaluate_binary(op, l, r).unwrap()
}

#[test]
fn test_scalar_arithmetic() {
    let two = Value::real(2.0);
    let three = Value::real(3.0);
    assert_eq!(bin(BinaryOp::Sub, &two, &three), Value::real(-1.0));
    assert_eq!(bin(BinaryOp::Pow, &two, &three), Value::real(8.0));
    assert_eq!(bin(BinaryOp::LeftDiv, &two, &Value::real(4.0)), Value::real(2.0));
}

#[test]
fn test_scalar_division_by_zero_is_infinite() {
    let q = bin(BinaryOp::Div, &Value::real(1.0), &Value::real(0.0));
    assert_eq!(q.as_real(), Some(f64::INFINITY));
}

#[test]
fn test_complex_equality_rules() {
    let a = Value::complex(2.0, 1.0);
    let b = Value::complex(2.0, -1.0);
    assert_eq!(bin(BinaryOp::Eq, &a, &b), Value::real(0.0));
    let c = Value::complex(3.0, -1.0);
    assert_eq!(bin(BinaryOp::NotEq, &c, &Value::real(4.0)), Value::real(1.0));
    assert_eq!(bin(BinaryOp::Eq, &c, &Value::real(3.0)), Value::real(1.0));
}

#[test]
fn test_comparison_uses_real_parts() {
    assert_eq!(
        bin(BinaryOp::Gt, &Value::real(17.0), &Value::real(12.0)),
        Value::real(1.0)
    );
    assert_eq!(
        bin(BinaryOp::Lt, &Value::complex(1.0, 9.0), &Value::real(2.0)),
        Value::real(1.0)
    );
}

#[test]
fn test_matrix_scalar_broadcast() {
    let a = m(1, 3, &[1.0, 2.0, 3.0]);
    assert_eq!(bin(BinaryOp::Mul, &a, &Value::real(2.0)), m(1, 3, &[2.0, 4.0, 6.0]));
    assert_eq!(bin(BinaryOp::Sub, &Value::real(1.0), &a), m(1, 3, &[0.0, -1.0, -2.0]));
    assert_eq!(bin(BinaryOp::Lt, &a, &Value::real(3.0)), m(1, 3, &[1.0, 1.0, 0.0]));
}

#[test]
fn test_scalar_power_of_range() {
    let r = make_range(&Value::real(0.0), Some(&Value::real(2.0))).unwrap();
    assert_eq!(bin(BinaryOp::Pow, &Value::real(2.0), &r), m(3, 1, &[1.0, 2.0, 4.0]));
}

#[test]
fn test_row_times_column() {
    let row = m(1, 3, &[3.0, 2.0, 1.0]);
    let col = m(3, 1, &[1.0, 2.0, 3.0]);
    assert_eq!(bin(BinaryOp::Mul, &row, &col), Value::real(10.0));
}

#[test]
fn test_matrix_addition_requires_same_shape() {
    let a = m(2, 2, &[1.0; 4]);
    let b = m(1, 2, &[1.0; 2]);
    let err = evaluate_binary(BinaryOp::Add, &a, &b).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::DimensionMismatch { .. }));
}

#[test]
fn test_one_by_one_matrix_broadcasts_as_scalar() {
    let one = m(1, 1, &[2.0]);
    let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(bin(BinaryOp::Mul, &one, &a), m(2, 2, &[2.0, 4.0, 6.0, 8.0]));
}

#[test]
fn test_matrix_power_and_division() {
    let a = m(2, 2, &[1.0, 1.0, 0.0, 1.0]);
    assert_eq!(bin(BinaryOp::Pow, &a, &Value::real(2.0)), m(2, 2, &[1.0, 2.0, 0.0, 1.0]));
    let q = bin(BinaryOp::Div, &a, &a);
    assert_eq!(q, m(2, 2, &[1.0, 0.0, 0.0, 1.0]));
    let err = evaluate_binary(BinaryOp::Pow, &a, &Value::real(0.5)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::UnsupportedOperation { .. }));
}

#[test]
fn test_string_times_matrix_unsupported() {
    let err = evaluate_binary(BinaryOp::Mul, &Value::string("a"), &m(1, 1, &[1.0])).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedOperation {
            op: "*".into(),
            left: ValueKind::String,
            right: Some(ValueKind::Matrix),
        }
    );
}

#[test]
fn test_string_concatenation_and_equality() {
    let s = bin(BinaryOp::Add, &Value::string("x = "), &Value::real(4.0));
    assert_eq!(s, Value::string("x = 4"));
    assert_eq!(
        bin(BinaryOp::Eq, &Value::string("a"), &Value::string("a")),
        Value::real(1.0)
    );
}

#[test]
fn test_set_operators() {
    let mut a = SetValue::new("a", false);
    a.insert(SetElement::Number(Complex::real(1.0)));
    let mut b = SetValue::new("b", false);
    b.insert(SetElement::Number(Complex::real(2.0)));
    let u = bin(BinaryOp::Add, &Value::set(a.clone()), &Value::set(b));
    let Value::Set(u) = u else { panic!("expected set") };
    assert_eq!(u.len(), 2);
    assert_eq!(u.name(), "(a+b)");
    assert!(evaluate_binary(BinaryOp::Sub, &Value::set(a.clone()), &Value::set(a)).is_err());
}

#[test]
fn test_unary_operators() {
    let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(evaluate_unary(UnaryOp::Transpose, &a).unwrap(), m(2, 2, &[1.0, 3.0, 2.0, 4.0]));
    assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::real(2.0)).unwrap(), Value::real(-2.0));
    assert_eq!(
        evaluate_unary(UnaryOp::Transpose, &Value::complex(1.0, 2.0)).unwrap(),
        Value::complex(1.0, -2.0)
    );
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::real(0.0)).unwrap(), Value::real(1.0));
    assert!(evaluate_unary(UnaryOp::Neg, &Value::string("s")).is_err());
}

#[test]
fn test_factorial() {
    assert_eq!(evaluate_unary(UnaryOp::Factorial, &Value::real(5.0)).unwrap(), Value::real(120.0));
    assert_eq!(evaluate_unary(UnaryOp::Factorial, &Value::real(0.0)).unwrap(), Value::real(1.0));
    let err = evaluate_unary(UnaryOp::Factorial, &Value::real(2.5)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ArgumentValue { .. }));
}

#[test]
fn test_abs_variants() {
    let abs = |v: &Value| evaluate_unary(UnaryOp::Abs, v).unwrap();
    assert_eq!(abs(&Value::complex(3.0, 4.0)), Value::real(5.0));
    assert_eq!(abs(&m(1, 2, &[3.0, 4.0])), Value::real(5.0));
    assert_eq!(abs(&m(2, 2, &[0.0, -2.0, 2.0, 0.0])), Value::real(4.0));
    assert_eq!(abs(&Value::string("abc")), Value::real(3.0));
}

#[test]
fn test_range_defaults() {
    let r = make_range(&Value::real(1.0), Some(&Value::real(3.0))).unwrap();
    assert_eq!(r, Value::Range(RangeValue::bounded(1.0, 1.0, 3.0).unwrap()));
    let r = make_range(&Value::real(5.0), Some(&Value::real(1.0))).unwrap();
    let Value::Range(r) = r else { panic!("expected range") };
    assert_eq!(r.values().unwrap(), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
}

#[test]
fn test_range_chained_from_right() {
    let inner = make_range(&Value::real(1.0), Some(&Value::real(3.0))).unwrap();
    let r = make_range(&Value::real(1.0), Some(&inner)).unwrap();
    let plain = make_range(&Value::real(1.0), Some(&Value::real(3.0))).unwrap();
    assert_eq!(r, plain);

    let inner = make_range(&Value::real(-1.0), Some(&Value::real(1.0))).unwrap();
    let Value::Range(r) = make_range(&Value::real(5.0), Some(&inner)).unwrap() else {
        panic!("expected range")
    };
    assert_eq!(r.values().unwrap(), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
}

#[test]
fn test_range_chained_from_left() {
    let first = make_range(&Value::real(0.0), Some(&Value::real(2.0))).unwrap();
    let Value::Range(r) = make_range(&first, Some(&Value::real(6.0))).unwrap() else {
        panic!("expected range")
    };
    assert_eq!(r.values().unwrap(), vec![0.0, 2.0, 4.0, 6.0]);
}

#[test]
fn test_open_range() {
    let Value::Range(r) = make_range(&Value::real(2.0), None).unwrap() else {
        panic!("expected range")
    };
    assert!(r.is_open());
    assert_eq!(r.step(), 1.0);
    let err = evaluate_binary(BinaryOp::Add, &Value::Range(r), &Value::real(1.0)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::UnsupportedOperation { .. }));
}

#[test]
fn test_range_rejects_strings() {
    assert!(make_range(&Value::string("a"), Some(&Value::real(1.0))).is_err());
}

fn small() -> impl Strategy<Value = f64> {
    -1.0e3..1.0e3
}

proptest! {
    #[test]
    fn test_scalar_commutativity(a in small(), b in small(), c in small(), d in small()) {
        let x = Value::complex(a, b);
        let y = Value::complex(c, d);
        prop_assert_eq!(bin(BinaryOp::Add, &x, &y), bin(BinaryOp::Add, &y, &x));
        prop_assert_eq!(bin(BinaryOp::Mul, &x, &y), bin(BinaryOp::Mul, &y, &x));
    }
}
