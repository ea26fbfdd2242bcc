//! Runtime values.
//!
//! `Value` is a closed tagged union. Heap-backed variants go through
//! [`Heap`], so cloning a value never deep-copies a matrix and mutation is
//! copy-on-write.
//!
//! A 1x1 matrix and a scalar are interchangeable: [`Value::as_scalar`]
//! accepts both and `==` treats them as equal. No other matrix shape ever
//! converts to a scalar.

mod heap;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use heap::Heap;

use crate::complex::Complex;
use crate::function::FunctionValue;
use crate::matrix::Matrix;
use crate::plot::PlotValue;
use crate::range::RangeValue;
use crate::set::SetValue;

/// Variant tag, used in error messages and overload descriptors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Matrix,
    String,
    Range,
    Set,
    Function,
    Plot,
}

impl ValueKind {
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Scalar => "scalar",
            ValueKind::Matrix => "matrix",
            ValueKind::String => "string",
            ValueKind::Range => "range",
            ValueKind::Set => "set",
            ValueKind::Function => "function",
            ValueKind::Plot => "plot",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime value.
#[derive(Clone, Serialize, Deserialize)]
pub enum Value {
    Scalar(Complex),
    Matrix(Heap<Matrix>),
    Str(Heap<String>),
    Range(RangeValue),
    Set(Heap<SetValue>),
    Function(Heap<FunctionValue>),
    Plot(Heap<PlotValue>),
}

impl Value {
    // Factories

    #[inline]
    pub fn real(re: f64) -> Self {
        Value::Scalar(Complex::real(re))
    }

    #[inline]
    pub fn complex(re: f64, im: f64) -> Self {
        Value::Scalar(Complex::new(re, im))
    }

    /// `1` for true, `0` for false.
    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::real(if b { 1.0 } else { 0.0 })
    }

    pub fn matrix(m: Matrix) -> Self {
        Value::Matrix(Heap::new(m))
    }

    /// Matrix, unwrapped to a scalar when it is 1x1.
    pub fn matrix_or_scalar(m: Matrix) -> Self {
        match m.as_scalar() {
            Some(z) => Value::Scalar(z),
            None => Value::matrix(m),
        }
    }

    pub fn empty_matrix() -> Self {
        Value::matrix(Matrix::empty())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn set(s: SetValue) -> Self {
        Value::Set(Heap::new(s))
    }

    pub fn function(f: FunctionValue) -> Self {
        Value::Function(Heap::new(f))
    }

    pub fn plot(p: PlotValue) -> Self {
        Value::Plot(Heap::new(p))
    }

    // Inspection

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Matrix(_) => ValueKind::Matrix,
            Value::Str(_) => ValueKind::String,
            Value::Range(_) => ValueKind::Range,
            Value::Set(_) => ValueKind::Set,
            Value::Function(_) => ValueKind::Function,
            Value::Plot(_) => ValueKind::Plot,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// The scalar held by a `Scalar` or a 1x1 `Matrix`.
    pub fn as_scalar(&self) -> Option<Complex> {
        match self {
            Value::Scalar(z) => Some(*z),
            Value::Matrix(m) => m.as_scalar(),
            _ => None,
        }
    }

    /// Real part of a scalar-like value with zero imaginary part.
    pub fn as_real(&self) -> Option<f64> {
        self.as_scalar().filter(|z| z.is_real()).map(|z| z.re)
    }

    /// Non-negative integral scalar, e.g. a dimension argument.
    pub fn as_count(&self) -> Option<usize> {
        self.as_real()
            .filter(|x| *x >= 0.0 && x.fract() == 0.0 && x.is_finite())
            .map(|x| x as usize)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Matrix view: matrices, scalars as 1x1, bounded ranges as column
    /// vectors.
    pub fn to_matrix(&self) -> Option<Matrix> {
        match self {
            Value::Scalar(z) => Some(Matrix::scalar(*z)),
            Value::Matrix(m) => Some((**m).clone()),
            Value::Range(r) => r.to_matrix(),
            _ => None,
        }
    }

    /// Condition truthiness: scalars with a non-zero real part, non-empty
    /// matrices with no zero element, non-empty strings and sets. Functions
    /// and plots are always true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Scalar(z) => z.re != 0.0,
            Value::Matrix(m) => !m.is_empty() && m.data().iter().all(|z| z.re != 0.0),
            Value::Str(s) => !s.is_empty(),
            Value::Range(r) => !r.is_empty(),
            Value::Set(s) => !s.is_empty(),
            Value::Function(_) | Value::Plot(_) => true,
        }
    }

    /// Extent that `end` and `:` bind to at index `position` of a
    /// `count`-argument index list.
    ///
    /// A single index is linear over every element; two indices address
    /// rows and columns.
    pub fn index_extent(&self, position: usize, count: usize) -> Option<usize> {
        let (rows, cols) = match self {
            Value::Scalar(_) => (1, 1),
            Value::Matrix(m) => m.dims(),
            Value::Str(s) => (1, s.chars().count()),
            Value::Range(r) => (r.len()?, 1),
            _ => return None,
        };
        match (count, position) {
            (1, 0) => Some(rows * cols),
            (2, 0) => Some(rows),
            (2, 1) => Some(cols),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => a == b,
            (Value::Matrix(a), Value::Matrix(b)) => a == b,
            (Value::Scalar(z), Value::Matrix(m)) | (Value::Matrix(m), Value::Scalar(z)) => {
                m.as_scalar() == Some(*z)
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Plot(a), Value::Plot(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(z) => write!(f, "Scalar({z})"),
            Value::Matrix(m) => write!(f, "Matrix{:?}{m}", m.dims()),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Range(r) => write!(f, "Range({r})"),
            Value::Set(s) => write!(f, "Set({s})"),
            Value::Function(func) => write!(f, "Function({func})"),
            Value::Plot(p) => write!(f, "Plot({p})"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(z) => write!(f, "{z}"),
            Value::Matrix(m) => write!(f, "{m}"),
            Value::Str(s) => write!(f, "{}", s.as_str()),
            Value::Range(r) => write!(f, "{r}"),
            Value::Set(s) => write!(f, "{s}"),
            Value::Function(func) => write!(f, "{func}"),
            Value::Plot(p) => write!(f, "{p}"),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::real(x)
    }
}

impl From<Complex> for Value {
    fn from(z: Complex) -> Self {
        Value::Scalar(z)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::matrix(m)
    }
}
