//! Operator semantics over values.
//!
//! Dispatch is on the pair of operand variants:
//!
//! - scalar with scalar: complex arithmetic, never failing
//! - string involved: concatenation and text comparison
//! - set with set: union, intersection, equality
//! - numeric (scalar, matrix, bounded range) otherwise: element-wise
//!   broadcasting with a scalar, linear algebra between matrices
//!
//! Everything else is an `UnsupportedOperation`.

use std::borrow::Cow;

use yamp_ir::{BinaryOp, UnaryOp};

use crate::complex::Complex;
use crate::errors::{argument_value, unsupported_operation, unsupported_unary, EvalError, EvalResult};
use crate::matrix::Matrix;
use crate::range::{RangeEnd, RangeValue};
use crate::set::SetValue;
use crate::value::{Value, ValueKind};

/// Scalar or matrix view of a numeric operand. 1x1 matrices and
/// single-element ranges are viewed as scalars.
enum Numeric<'a> {
    Scalar(Complex),
    Matrix(Cow<'a, Matrix>),
}

fn numeric(value: &Value) -> Option<Numeric<'_>> {
    match value {
        Value::Scalar(z) => Some(Numeric::Scalar(*z)),
        Value::Matrix(m) => Some(match m.as_scalar() {
            Some(z) => Numeric::Scalar(z),
            None => Numeric::Matrix(Cow::Borrowed(&**m)),
        }),
        Value::Range(r) => r.to_matrix().map(|m| match m.as_scalar() {
            Some(z) => Numeric::Scalar(z),
            None => Numeric::Matrix(Cow::Owned(m)),
        }),
        _ => None,
    }
}

fn truth(b: bool) -> Complex {
    if b {
        Complex::ONE
    } else {
        Complex::ZERO
    }
}

/// Equality compares imaginary parts only when both sides have one.
fn scalar_eq(a: Complex, b: Complex) -> bool {
    if a.im != 0.0 && b.im != 0.0 {
        a.re == b.re && a.im == b.im
    } else {
        a.re == b.re
    }
}

/// Scalar operator table; total over every `BinaryOp`.
pub fn scalar_op(op: BinaryOp, a: Complex, b: Complex) -> Complex {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul | BinaryOp::ElemMul => a * b,
        BinaryOp::Div | BinaryOp::ElemDiv => a / b,
        BinaryOp::LeftDiv => b / a,
        BinaryOp::Pow | BinaryOp::ElemPow => a.pow(b),
        BinaryOp::Eq => truth(scalar_eq(a, b)),
        BinaryOp::NotEq => truth(!scalar_eq(a, b)),
        BinaryOp::Lt => truth(a.re < b.re),
        BinaryOp::LtEq => truth(a.re <= b.re),
        BinaryOp::Gt => truth(a.re > b.re),
        BinaryOp::GtEq => truth(a.re >= b.re),
        BinaryOp::And => truth(a.re != 0.0 && b.re != 0.0),
        BinaryOp::Or => truth(a.re != 0.0 || b.re != 0.0),
    }
}

/// Apply a binary operator.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(scalar_op(op, *a, *b))),
        (Value::Str(_), _) | (_, Value::Str(_)) => string_binary(op, left, right),
        (Value::Set(a), Value::Set(b)) => set_binary(op, a, b),
        _ => match (numeric(left), numeric(right)) {
            (Some(l), Some(r)) => numeric_binary(op, l, r),
            _ => Err(unsupported_operation(
                op.as_symbol(),
                left.kind(),
                right.kind(),
            )),
        },
    }
}

fn numeric_binary(op: BinaryOp, left: Numeric<'_>, right: Numeric<'_>) -> EvalResult {
    match (left, right) {
        (Numeric::Scalar(a), Numeric::Scalar(b)) => Ok(Value::Scalar(scalar_op(op, a, b))),
        (Numeric::Matrix(m), Numeric::Scalar(b)) => matrix_scalar(op, &m, b),
        (Numeric::Scalar(a), Numeric::Matrix(m)) => {
            Ok(Value::matrix(m.map(|z| scalar_op(op, a, z))))
        }
        (Numeric::Matrix(a), Numeric::Matrix(b)) => matrix_matrix(op, &a, &b),
    }
}

fn matrix_scalar(op: BinaryOp, m: &Matrix, b: Complex) -> EvalResult {
    match op {
        BinaryOp::Pow => {
            if !b.is_integer() {
                return Err(unsupported_operation(
                    "^",
                    ValueKind::Matrix,
                    ValueKind::Scalar,
                ));
            }
            m.powi(b.re as i64).map(Value::matrix)
        }
        BinaryOp::LeftDiv => Ok(Value::matrix(m.inverse()?.map(|z| z * b))),
        _ => Ok(Value::matrix(m.map(|z| scalar_op(op, z, b)))),
    }
}

fn matrix_matrix(op: BinaryOp, a: &Matrix, b: &Matrix) -> EvalResult {
    let symbol = op.as_symbol();
    match op {
        BinaryOp::Mul => a.matmul(b).map(Value::matrix),
        BinaryOp::Div => a.matmul(&b.inverse()?).map(Value::matrix),
        BinaryOp::LeftDiv => a.inverse()?.matmul(b).map(Value::matrix),
        BinaryOp::Pow => Err(unsupported_operation(
            symbol,
            ValueKind::Matrix,
            ValueKind::Matrix,
        )),
        _ => a
            .zip_with(b, symbol, |x, y| scalar_op(op, x, y))
            .map(Value::matrix),
    }
}

fn string_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (op, left.as_str(), right.as_str()) {
        (BinaryOp::Add, _, _) => Ok(Value::string(format!("{left}{right}"))),
        (BinaryOp::Eq, Some(a), Some(b)) => Ok(Value::boolean(a == b)),
        (BinaryOp::NotEq, Some(a), Some(b)) => Ok(Value::boolean(a != b)),
        (BinaryOp::Lt, Some(a), Some(b)) => Ok(Value::boolean(a < b)),
        (BinaryOp::LtEq, Some(a), Some(b)) => Ok(Value::boolean(a <= b)),
        (BinaryOp::Gt, Some(a), Some(b)) => Ok(Value::boolean(a > b)),
        (BinaryOp::GtEq, Some(a), Some(b)) => Ok(Value::boolean(a >= b)),
        _ => Err(unsupported_operation(
            op.as_symbol(),
            left.kind(),
            right.kind(),
        )),
    }
}

fn set_binary(op: BinaryOp, a: &SetValue, b: &SetValue) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::set(a.union(b))),
        BinaryOp::Mul => Ok(Value::set(a.intersect(b))),
        BinaryOp::Eq => Ok(Value::boolean(a == b)),
        BinaryOp::NotEq => Ok(Value::boolean(a != b)),
        _ => Err(unsupported_operation(
            op.as_symbol(),
            ValueKind::Set,
            ValueKind::Set,
        )),
    }
}

/// Apply a unary operator.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    let unsupported = || unsupported_unary(op.as_symbol(), operand.kind());
    match op {
        UnaryOp::Abs => abs(operand).ok_or_else(unsupported),
        UnaryOp::Plus => match operand {
            Value::Scalar(_) | Value::Matrix(_) | Value::Range(_) => Ok(operand.clone()),
            _ => Err(unsupported()),
        },
        UnaryOp::Factorial => match numeric(operand).ok_or_else(unsupported)? {
            Numeric::Scalar(z) => factorial(z).map(Value::Scalar),
            Numeric::Matrix(m) => {
                let data = m
                    .data()
                    .iter()
                    .map(|&z| factorial(z))
                    .collect::<Result<Vec<_>, _>>()?;
                Matrix::new(m.rows(), m.cols(), data).map(Value::matrix)
            }
        },
        UnaryOp::Neg | UnaryOp::Not | UnaryOp::Transpose => {
            let f: fn(Complex) -> Complex = match op {
                UnaryOp::Neg => |z| -z,
                UnaryOp::Not => |z| truth(z.re == 0.0),
                _ => Complex::conj,
            };
            match numeric(operand).ok_or_else(unsupported)? {
                Numeric::Scalar(z) => Ok(Value::Scalar(f(z))),
                Numeric::Matrix(m) if op == UnaryOp::Transpose => Ok(Value::matrix(m.adjoint())),
                Numeric::Matrix(m) => Ok(Value::matrix(m.map(f))),
            }
        }
    }
}

/// `n!` for non-negative integers; overflows to infinity past `170!`.
pub fn factorial(z: Complex) -> Result<Complex, EvalError> {
    if !z.is_integer() || z.re < 0.0 {
        return Err(argument_value(format!(
            "factorial is only defined for non-negative integers, got {z}"
        )));
    }
    let n = z.re as u64;
    if n > 170 {
        return Ok(Complex::real(f64::INFINITY));
    }
    Ok(Complex::real((2..=n).map(|k| k as f64).product()))
}

/// `|x|`: modulus of a scalar, norm of a vector, determinant of a square
/// matrix, Frobenius norm otherwise; length of a string, size of a set.
fn abs(value: &Value) -> Option<Value> {
    match value {
        Value::Str(s) => Some(Value::real(s.chars().count() as f64)),
        Value::Set(s) => Some(Value::real(s.len() as f64)),
        _ => match numeric(value)? {
            Numeric::Scalar(z) => Some(Value::real(z.norm())),
            Numeric::Matrix(m) if m.is_vector() || !m.is_square() => {
                Some(Value::real(m.frobenius()))
            }
            Numeric::Matrix(m) => m.det().ok().map(Value::Scalar),
        },
    }
}

/// Bound of a range operand: a real scalar.
fn range_bound(value: &Value, other: Option<&Value>) -> Result<f64, EvalError> {
    match value.as_scalar() {
        Some(z) if z.is_real() => Ok(z.re),
        Some(z) => Err(argument_value(format!(
            "range bounds must be real, got {z}"
        ))),
        None => Err(unsupported_operation(
            ":",
            value.kind(),
            other.map_or(ValueKind::Scalar, Value::kind),
        )),
    }
}

/// Combine the operands of `left:right`; `right == None` is the open-end
/// marker.
///
/// A bounded range on the left contributes its start and, as the step, its
/// end (`(a:b):c` is `a:b:c`). A range on the right contributes its start
/// as the step and its end as the end (`a:(b:c)` is `a:b:c`, the shape the
/// right-associative operator produces). Without an explicit step, a
/// bounded end below the start steps by `-1`.
pub fn make_range(left: &Value, right: Option<&Value>) -> EvalResult {
    let (start, mut step) = match left {
        Value::Range(r) => match r.end() {
            RangeEnd::Bounded(end) => (r.start(), Some(end)),
            RangeEnd::Open => {
                return Err(argument_value("an open range cannot start another range"))
            }
        },
        other => (range_bound(other, right)?, None),
    };
    let end = match right {
        None => RangeEnd::Open,
        Some(Value::Range(r)) => {
            step = Some(r.start());
            r.end()
        }
        Some(other) => RangeEnd::Bounded(range_bound(other, Some(left))?),
    };
    let step = step.unwrap_or(match end {
        RangeEnd::Bounded(e) if e < start => -1.0,
        _ => 1.0,
    });
    RangeValue::new(start, step, end).map(Value::Range)
}

#[cfg(test)]
mod tests;
