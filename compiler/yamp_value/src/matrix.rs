//! Dense complex matrices.
//!
//! Storage is row-major. Dimensions are fixed per instance; operations that
//! change shape (transpose, concatenation, growth on index assignment)
//! build a new matrix.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::errors::{argument_range, argument_value, dimension_mismatch, EvalError};

/// Largest element count any matrix may hold.
pub const MAX_ELEMENTS: usize = 1 << 27;

/// `rows * cols`, rejecting shapes that overflow or exceed [`MAX_ELEMENTS`].
pub fn element_count(rows: usize, cols: usize) -> Result<usize, EvalError> {
    match rows.checked_mul(cols) {
        Some(count) if count <= MAX_ELEMENTS => Ok(count),
        _ => Err(argument_range(format!(
            "a {rows}x{cols} matrix exceeds the limit of {MAX_ELEMENTS} elements"
        ))),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixParts")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex>,
}

/// Decoded fields, checked by [`Matrix::new`].
#[derive(Deserialize)]
struct MatrixParts {
    rows: usize,
    cols: usize,
    data: Vec<Complex>,
}

impl TryFrom<MatrixParts> for Matrix {
    type Error = EvalError;

    fn try_from(parts: MatrixParts) -> Result<Self, EvalError> {
        Matrix::new(parts.rows, parts.cols, parts.data)
    }
}

impl Matrix {
    /// Build from row-major `data`; fails when the length disagrees with
    /// `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<Complex>) -> Result<Self, EvalError> {
        let count = element_count(rows, cols)?;
        if data.len() != count {
            return Err(argument_value(format!(
                "a {rows}x{cols} matrix needs {count} elements, got {}",
                data.len()
            )));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// The 0x0 matrix `[]`.
    pub fn empty() -> Self {
        Matrix::default()
    }

    pub fn filled(rows: usize, cols: usize, value: Complex) -> Result<Self, EvalError> {
        let count = element_count(rows, cols)?;
        Ok(Matrix {
            rows,
            cols,
            data: vec![value; count],
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self, EvalError> {
        Self::filled(rows, cols, Complex::ZERO)
    }

    pub fn identity(rows: usize, cols: usize) -> Result<Self, EvalError> {
        Self::from_fn(rows, cols, |r, c| {
            if r == c {
                Complex::ONE
            } else {
                Complex::ZERO
            }
        })
    }

    /// Build from a 0-based `(row, col)` generator.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        f: impl FnMut(usize, usize) -> Complex,
    ) -> Result<Self, EvalError> {
        element_count(rows, cols)?;
        Ok(Self::generate(rows, cols, f))
    }

    /// Unchecked [`from_fn`](Self::from_fn) for shapes no larger than an
    /// existing matrix.
    fn generate(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Complex) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Matrix { rows, cols, data }
    }

    pub fn scalar(value: Complex) -> Self {
        Matrix {
            rows: 1,
            cols: 1,
            data: vec![value],
        }
    }

    pub fn row_vector(data: Vec<Complex>) -> Self {
        Matrix {
            rows: usize::from(!data.is_empty()),
            cols: data.len(),
            data,
        }
    }

    pub fn column_vector(data: Vec<Complex>) -> Self {
        Matrix {
            rows: data.len(),
            cols: usize::from(!data.is_empty()),
            data,
        }
    }

    pub fn from_reals(rows: usize, cols: usize, values: &[f64]) -> Result<Self, EvalError> {
        Self::new(rows, cols, values.iter().copied().map(Complex::real).collect())
    }

    /// Build from nested rows; ragged input is a dimension mismatch.
    pub fn from_rows(rows: Vec<Vec<Complex>>) -> Result<Self, EvalError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        let count = rows.len();
        for row in rows {
            if row.len() != cols {
                return Err(dimension_mismatch(";", (1, cols), (1, row.len())));
            }
            data.extend(row);
        }
        Ok(Matrix {
            rows: if cols == 0 { 0 } else { count },
            cols,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major elements.
    #[inline]
    pub fn data(&self) -> &[Complex] {
        &self.data
    }

    pub fn into_data(self) -> Vec<Complex> {
        self.data
    }

    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_real(&self) -> bool {
        self.data.iter().all(|z| z.is_real())
    }

    /// The single element of a 1x1 matrix.
    pub fn as_scalar(&self) -> Option<Complex> {
        if self.rows == 1 && self.cols == 1 {
            self.data.first().copied()
        } else {
            None
        }
    }

    /// Element at 0-based `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Complex> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> Complex {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: Complex) {
        self.data[row * self.cols + col] = value;
    }

    /// Copy into a larger `rows x cols` matrix padded with zeros.
    pub fn resized(&self, rows: usize, cols: usize) -> Result<Matrix, EvalError> {
        Matrix::from_fn(rows, cols, |r, c| {
            self.get(r, c).unwrap_or(Complex::ZERO)
        })
    }

    #[must_use]
    pub fn map(&self, f: impl Fn(Complex) -> Complex) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Element-wise combination of two equally shaped matrices.
    pub fn zip_with(
        &self,
        other: &Matrix,
        op: &str,
        f: impl Fn(Complex, Complex) -> Complex,
    ) -> Result<Matrix, EvalError> {
        if self.dims() != other.dims() {
            return Err(dimension_mismatch(op, self.dims(), other.dims()));
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    #[must_use]
    pub fn transpose(&self) -> Matrix {
        Matrix::generate(self.cols, self.rows, |r, c| self.at(c, r))
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn adjoint(&self) -> Matrix {
        Matrix::generate(self.cols, self.rows, |r, c| self.at(c, r).conj())
    }

    /// Row-by-column product.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix, EvalError> {
        if self.cols != other.rows {
            return Err(dimension_mismatch("*", self.dims(), other.dims()));
        }
        Matrix::from_fn(self.rows, other.cols, |r, c| {
            (0..self.cols).fold(Complex::ZERO, |acc, k| acc + self.at(r, k) * other.at(k, c))
        })
    }

    fn require_square(&self, op: &str) -> Result<(), EvalError> {
        if self.is_square() {
            Ok(())
        } else {
            Err(dimension_mismatch(op, self.dims(), self.dims()))
        }
    }

    /// Determinant by Gaussian elimination with partial pivoting.
    pub fn det(&self) -> Result<Complex, EvalError> {
        self.require_square("det")?;
        let n = self.rows;
        let mut work = self.clone();
        let mut det = Complex::ONE;
        for col in 0..n {
            let Some(pivot) = (col..n).max_by(|&a, &b| {
                work.at(a, col).norm().total_cmp(&work.at(b, col).norm())
            }) else {
                break;
            };
            if work.at(pivot, col).is_zero() {
                return Ok(Complex::ZERO);
            }
            if pivot != col {
                work.swap_rows(pivot, col);
                det = -det;
            }
            let p = work.at(col, col);
            det = det * p;
            for r in col + 1..n {
                let factor = work.at(r, col) / p;
                for c in col..n {
                    let v = work.at(r, c) - factor * work.at(col, c);
                    work.set(r, c, v);
                }
            }
        }
        Ok(det)
    }

    /// Inverse by Gauss-Jordan elimination; singular input is an argument
    /// value error.
    pub fn inverse(&self) -> Result<Matrix, EvalError> {
        self.require_square("inv")?;
        let n = self.rows;
        let mut work = self.clone();
        let mut inv = Matrix::identity(n, n)?;
        for col in 0..n {
            let Some(pivot) = (col..n).max_by(|&a, &b| {
                work.at(a, col).norm().total_cmp(&work.at(b, col).norm())
            }) else {
                break;
            };
            if work.at(pivot, col).norm() < f64::EPSILON {
                return Err(argument_value("matrix is singular"));
            }
            work.swap_rows(pivot, col);
            inv.swap_rows(pivot, col);
            let p = work.at(col, col);
            for c in 0..n {
                work.set(col, c, work.at(col, c) / p);
                inv.set(col, c, inv.at(col, c) / p);
            }
            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = work.at(r, col);
                if factor.is_zero() {
                    continue;
                }
                for c in 0..n {
                    work.set(r, c, work.at(r, c) - factor * work.at(col, c));
                    inv.set(r, c, inv.at(r, c) - factor * inv.at(col, c));
                }
            }
        }
        Ok(inv)
    }

    /// Integer matrix power; negative exponents invert first.
    pub fn powi(&self, exponent: i64) -> Result<Matrix, EvalError> {
        self.require_square("^")?;
        let base = if exponent < 0 {
            self.inverse()?
        } else {
            self.clone()
        };
        let mut result = Matrix::identity(self.rows, self.cols)?;
        let mut square = base;
        let mut n = exponent.unsigned_abs();
        while n > 0 {
            if n & 1 == 1 {
                result = result.matmul(&square)?;
            }
            square = square.matmul(&square)?;
            n >>= 1;
        }
        Ok(result)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }

    /// Side-by-side concatenation; empty operands are skipped.
    pub fn hcat(&self, other: &Matrix) -> Result<Matrix, EvalError> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.rows != other.rows {
            return Err(dimension_mismatch(",", self.dims(), other.dims()));
        }
        Matrix::from_fn(self.rows, self.cols + other.cols, |r, c| {
            if c < self.cols {
                self.at(r, c)
            } else {
                other.at(r, c - self.cols)
            }
        })
    }

    /// Top-to-bottom concatenation; empty operands are skipped.
    pub fn vcat(&self, other: &Matrix) -> Result<Matrix, EvalError> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.cols != other.cols {
            return Err(dimension_mismatch(";", self.dims(), other.dims()));
        }
        element_count(self.rows + other.rows, self.cols)?;
        let mut data = self.data.clone();
        data.extend_from_slice(&other.data);
        Ok(Matrix {
            rows: self.rows + other.rows,
            cols: self.cols,
            data,
        })
    }

    /// Euclidean norm over all elements (Frobenius for 2-D shapes).
    pub fn frobenius(&self) -> f64 {
        self.data
            .iter()
            .map(|z| z.re * z.re + z.im * z.im)
            .sum::<f64>()
            .sqrt()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        write!(f, "[")?;
        for r in 0..self.rows {
            if r > 0 {
                write!(f, "; ")?;
            }
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.at(r, c))?;
            }
        }
        write!(f, "]")
    }
}

mod eigen;
