//! Eigenvalues by shifted QR iteration, eigenvectors by inverse iteration.
//!
//! Both work in complex arithmetic throughout, so real matrices with
//! complex conjugate eigenvalue pairs need no special casing.

use super::Matrix;
use crate::complex::Complex;
use crate::errors::{argument_value, EvalError};

/// QR sweeps allowed per deflated eigenvalue.
const MAX_SWEEPS: usize = 300;

/// Sweeps between exceptional shifts when an eigenvalue stalls.
const EXCEPTIONAL_EVERY: usize = 11;

/// Inverse iteration rounds per eigenvector.
const REFINEMENT_ROUNDS: usize = 3;

impl Matrix {
    /// Eigenvalues ordered by real part, then imaginary part.
    pub fn eigenvalues(&self) -> Result<Vec<Complex>, EvalError> {
        self.require_square("eig")?;
        let scale = self.frobenius();
        let tolerance = f64::EPSILON * scale.max(f64::MIN_POSITIVE);
        let mut work = self.clone();
        let mut active = work.rows;
        let mut values = Vec::with_capacity(active);
        let mut sweeps = 0;
        while active > 0 {
            let last = active - 1;
            let residue: f64 = (0..last).map(|c| work.at(last, c).norm()).sum();
            if active == 1 || residue <= tolerance {
                values.push(work.at(last, last));
                active -= 1;
                sweeps = 0;
                continue;
            }
            if sweeps == MAX_SWEEPS {
                return Err(argument_value("the eigenvalue iteration did not converge"));
            }
            sweeps += 1;
            let shift = if sweeps % EXCEPTIONAL_EVERY == 0 {
                work.at(last, last) + Complex::real(residue)
            } else {
                work.trailing_shift(active)
            };
            work.qr_step(active, shift);
        }
        for value in &mut values {
            if value.im.abs() <= tolerance * 8.0 {
                value.im = 0.0;
            }
        }
        values.sort_by(Complex::total_cmp);
        Ok(values)
    }

    /// Unit eigenvectors as columns, one per entry of `values`.
    ///
    /// Vectors for a repeated eigenvalue are made orthogonal to each other.
    pub fn eigenvectors(&self, values: &[Complex]) -> Result<Matrix, EvalError> {
        self.require_square("ev")?;
        let n = self.rows;
        let floor = f64::EPSILON * self.frobenius().max(1.0);
        let mut found: Vec<(Complex, Vec<Complex>)> = Vec::with_capacity(values.len());
        for (k, &lambda) in values.iter().enumerate() {
            let mut x: Vec<Complex> = (0..n)
                .map(|j| Complex::real(if j == k { 2.0 } else { 1.0 }))
                .collect();
            for _ in 0..REFINEMENT_ROUNDS {
                x = self.solve_shifted(lambda, &x, floor);
                let repeated = found
                    .iter()
                    .filter(|(mu, _)| (*mu - lambda).norm() <= floor * 1e4);
                for (_, previous) in repeated {
                    let overlap = dot(previous, &x);
                    for (xi, &pi) in x.iter_mut().zip(previous) {
                        *xi = *xi - overlap * pi;
                    }
                }
                normalize(&mut x);
            }
            found.push((lambda, x));
        }
        Matrix::from_fn(n, found.len(), |r, c| found[c].1[r])
    }

    /// Eigenvalue of the trailing 2x2 block of the active window closest to
    /// its bottom-right element.
    fn trailing_shift(&self, active: usize) -> Complex {
        let (i, j) = (active - 2, active - 1);
        let (a, b, c, d) = (self.at(i, i), self.at(i, j), self.at(j, i), self.at(j, j));
        let half = Complex::real(0.5);
        let mean = (a + d) * half;
        let gap = (a - d) * half;
        let root = (gap * gap + b * c).sqrt();
        let (first, second) = (mean + root, mean - root);
        if (first - d).norm() <= (second - d).norm() {
            first
        } else {
            second
        }
    }

    /// One `A - shift = QR`, `A <- RQ + shift` step over the leading
    /// `active x active` block, using Givens rotations.
    fn qr_step(&mut self, active: usize, shift: Complex) {
        for k in 0..active {
            let v = self.at(k, k) - shift;
            self.set(k, k, v);
        }
        let mut rotations = Vec::new();
        for col in 0..active {
            for row in col + 1..active {
                let (x, y) = (self.at(col, col), self.at(row, col));
                let r = (x.norm().powi(2) + y.norm().powi(2)).sqrt();
                if r == 0.0 || y.is_zero() {
                    continue;
                }
                let (c, s) = (x / Complex::real(r), y / Complex::real(r));
                for k in 0..active {
                    let (top, bottom) = (self.at(col, k), self.at(row, k));
                    self.set(col, k, c.conj() * top + s.conj() * bottom);
                    self.set(row, k, c * bottom - s * top);
                }
                rotations.push((col, row, c, s));
            }
        }
        for (col, row, c, s) in rotations {
            for k in 0..active {
                let (left, right) = (self.at(k, col), self.at(k, row));
                self.set(k, col, left * c + right * s);
                self.set(k, row, right * c.conj() - left * s.conj());
            }
        }
        for k in 0..active {
            let v = self.at(k, k) + shift;
            self.set(k, k, v);
        }
    }

    /// Solve `(A - lambda) x = rhs` by elimination with partial pivoting,
    /// lifting vanishing pivots to `floor` so an exact eigenvalue still
    /// yields a finite solution.
    fn solve_shifted(&self, lambda: Complex, rhs: &[Complex], floor: f64) -> Vec<Complex> {
        let n = self.rows;
        let mut work = self.clone();
        let mut x = rhs.to_vec();
        for k in 0..n {
            let v = work.at(k, k) - lambda;
            work.set(k, k, v);
        }
        for col in 0..n {
            let pivot = (col + 1..n).fold(col, |best, r| {
                if work.at(r, col).norm() > work.at(best, col).norm() {
                    r
                } else {
                    best
                }
            });
            work.swap_rows(pivot, col);
            x.swap(pivot, col);
            if work.at(col, col).norm() < floor {
                work.set(col, col, Complex::real(floor));
            }
            let p = work.at(col, col);
            for r in col + 1..n {
                let factor = work.at(r, col) / p;
                if factor.is_zero() {
                    continue;
                }
                for c in col..n {
                    work.set(r, c, work.at(r, c) - factor * work.at(col, c));
                }
                x[r] = x[r] - factor * x[col];
            }
        }
        for row in (0..n).rev() {
            let tail = (row + 1..n).fold(Complex::ZERO, |acc, c| acc + work.at(row, c) * x[c]);
            x[row] = (x[row] - tail) / work.at(row, row);
        }
        x
    }
}

/// `<a, b>` with `a` conjugated.
fn dot(a: &[Complex], b: &[Complex]) -> Complex {
    a.iter()
        .zip(b)
        .fold(Complex::ZERO, |acc, (&x, &y)| acc + x.conj() * y)
}

fn normalize(x: &mut [Complex]) {
    let length = x.iter().map(|z| z.norm().powi(2)).sum::<f64>().sqrt();
    if length > 0.0 && length.is_finite() {
        let inverse = Complex::real(1.0 / length);
        for z in x {
            *z = *z * inverse;
        }
    }
}

#[cfg(test)]
mod tests;
