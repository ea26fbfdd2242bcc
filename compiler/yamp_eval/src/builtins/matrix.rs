//! Matrix construction and inspection.
//!
//! Reductions (`sum`, `max`, `min`) collapse a vector to a scalar and a
//! matrix to a row vector of per-column results, as do column sorts.

use std::cmp::Ordering;

use yamp_value::{argument_value, element_count, Complex, EvalError, EvalResult, Matrix, Value};

use super::fixed;
use crate::library::Library;
use crate::overload::{Arguments, ParamKind, Signature};

type Builder = fn(usize, usize) -> Result<Matrix, EvalError>;

const SHAPED: &[(&str, Builder)] = &[
    ("eye", Matrix::identity),
    ("ones", |rows, cols| Matrix::filled(rows, cols, Complex::ONE)),
    ("zeros", Matrix::zeros),
];

pub(super) fn register(lib: &mut Library) {
    for &(name, build) in SHAPED {
        lib.insert(name, Signature::new(), move |_, _| {
            build(1, 1).map(Value::matrix_or_scalar)
        });
        lib.insert(name, fixed(&[ParamKind::Scalar]), move |_, args| {
            let n = args.count(0)?;
            build(n, n).map(Value::matrix_or_scalar)
        });
        lib.insert(
            name,
            fixed(&[ParamKind::Scalar, ParamKind::Scalar]),
            move |_, args| build(args.count(0)?, args.count(1)?).map(Value::matrix_or_scalar),
        );
    }

    register_shape(lib);
    register_reductions(lib);
    register_algebra(lib);
}

fn register_shape(lib: &mut Library) {
    lib.insert("length", fixed(&[ParamKind::Matrix]), |_, args| {
        let (rows, cols) = args.matrix(0)?.dims();
        let length = if rows == 0 || cols == 0 { 0 } else { rows.max(cols) };
        Ok(Value::real(length as f64))
    });
    lib.insert("length", fixed(&[ParamKind::String]), |_, args| {
        Ok(Value::real(args.str(0)?.chars().count() as f64))
    });
    lib.insert("length", fixed(&[ParamKind::Set]), |_, args| {
        Ok(Value::real(args.set(0)?.len() as f64))
    });
    lib.insert("length", fixed(&[ParamKind::Range]), |_, args| {
        let Some(Value::Range(range)) = args.get(0) else {
            return Err(argument_value("argument 1 must be a range"));
        };
        range
            .len()
            .map(|n| Value::real(n as f64))
            .ok_or_else(|| argument_value("an open range has no length"))
    });

    lib.insert("size", fixed(&[ParamKind::Matrix]), |_, args| {
        let (rows, cols) = args.matrix(0)?.dims();
        Ok(dims_value(rows, cols))
    });
    lib.insert("size", fixed(&[ParamKind::String]), |_, args| {
        Ok(dims_value(1, args.str(0)?.chars().count()))
    });
}

fn dims_value(rows: usize, cols: usize) -> Value {
    Value::matrix(Matrix::row_vector(vec![
        Complex::real(rows as f64),
        Complex::real(cols as f64),
    ]))
}

fn register_reductions(lib: &mut Library) {
    lib.insert("sum", fixed(&[ParamKind::Matrix]), |_, args| {
        let m = args.matrix(0)?;
        if m.is_empty() {
            return Ok(Value::real(0.0));
        }
        Ok(reduce(m, |column| {
            column.iter().fold(Complex::ZERO, |acc, &z| acc + z)
        }))
    });

    for (name, wanted) in [("max", Ordering::Greater), ("min", Ordering::Less)] {
        let pick = move |column: &[Complex]| {
            column
                .iter()
                .copied()
                .reduce(|best, z| if z.total_cmp(&best) == wanted { z } else { best })
                .unwrap_or(Complex::ZERO)
        };
        lib.insert(name, fixed(&[ParamKind::Matrix]), move |_, args| {
            let m = args.matrix(0)?;
            if m.is_empty() {
                return Ok(Value::empty_matrix());
            }
            Ok(reduce(m, pick))
        });
        lib.insert(
            name,
            Signature::new()
                .param(ParamKind::Scalar)
                .variadic(ParamKind::Scalar, 1, None, 1),
            move |_, args| {
                let mut values = vec![args.scalar(0)?];
                values.extend(args.rest().iter().filter_map(Value::as_scalar));
                Ok(Value::Scalar(pick(&values)))
            },
        );
    }

    lib.insert("sort", fixed(&[ParamKind::Matrix]), |_, args| sort(args));
}

/// Apply `f` to a whole vector, or to each column of a matrix.
fn reduce(m: &Matrix, f: impl Fn(&[Complex]) -> Complex) -> Value {
    if m.is_vector() {
        return Value::Scalar(f(m.data()));
    }
    let results = columns(m).iter().map(|column| f(column)).collect();
    Value::matrix(Matrix::row_vector(results))
}

fn columns(m: &Matrix) -> Vec<Vec<Complex>> {
    (0..m.cols())
        .map(|c| (0..m.rows()).filter_map(|r| m.get(r, c)).collect())
        .collect()
}

/// Ascending sort of a vector, or of each column of a matrix.
fn sort(args: &Arguments) -> EvalResult {
    let m = args.matrix(0)?;
    if m.is_vector() {
        let mut data = m.data().to_vec();
        data.sort_by(Complex::total_cmp);
        return Matrix::new(m.rows(), m.cols(), data).map(Value::matrix_or_scalar);
    }
    let mut sorted = columns(m);
    for column in &mut sorted {
        column.sort_by(Complex::total_cmp);
    }
    Matrix::from_fn(m.rows(), m.cols(), |r, c| sorted[c][r]).map(Value::matrix)
}

fn register_algebra(lib: &mut Library) {
    lib.insert("det", fixed(&[ParamKind::Matrix]), |_, args| {
        args.matrix(0)?.det().map(Value::Scalar)
    });
    lib.insert("inv", fixed(&[ParamKind::Matrix]), |_, args| {
        args.matrix(0)?.inverse().map(Value::matrix_or_scalar)
    });
    lib.insert("trace", fixed(&[ParamKind::Matrix]), |_, args| {
        let m = args.matrix(0)?;
        if !m.is_square() {
            let (rows, cols) = m.dims();
            return Err(argument_value(format!(
                "trace needs a square matrix, got {rows}x{cols}"
            )));
        }
        let diagonal = (0..m.rows()).filter_map(|k| m.get(k, k));
        Ok(Value::Scalar(diagonal.fold(Complex::ZERO, |acc, z| acc + z)))
    });
    lib.insert("transpose", fixed(&[ParamKind::Matrix]), |_, args| {
        Ok(Value::matrix_or_scalar(args.matrix(0)?.transpose()))
    });

    for name in ["eig", "eigval"] {
        lib.insert(name, fixed(&[ParamKind::Matrix]), |_, args| {
            let values = args.matrix(0)?.eigenvalues()?;
            Ok(Value::matrix_or_scalar(Matrix::column_vector(values)))
        });
    }
    for name in ["ev", "eigvec"] {
        lib.insert(name, fixed(&[ParamKind::Matrix]), |_, args| {
            let m = args.matrix(0)?;
            let values = m.eigenvalues()?;
            m.eigenvectors(&values).map(Value::matrix_or_scalar)
        });
    }

    lib.insert("magic", fixed(&[ParamKind::Scalar]), |_, args| {
        magic(args.count(0)?).map(Value::matrix_or_scalar)
    });
}

/// Magic square of order `n`: every row, column and both diagonals sum to
/// `n (n^2 + 1) / 2`.
fn magic(n: usize) -> Result<Matrix, EvalError> {
    if n == 2 {
        return Err(argument_value("there is no magic square of order 2"));
    }
    element_count(n, n)?;
    let cells = if n % 2 == 1 {
        magic_odd(n)
    } else if n % 4 == 0 {
        magic_doubly_even(n)
    } else {
        magic_singly_even(n)
    };
    Matrix::from_fn(n, n, |r, c| Complex::real(cells[r * n + c] as f64))
}

/// Siamese construction, row-major.
fn magic_odd(n: usize) -> Vec<usize> {
    (0..n * n)
        .map(|k| {
            let (r, c) = (k / n, k % n);
            n * ((r + c + 1 + n / 2) % n) + (r + 2 * c + 1) % n + 1
        })
        .collect()
}

fn magic_doubly_even(n: usize) -> Vec<usize> {
    (0..n * n)
        .map(|k| {
            let (r, c) = (k / n, k % n);
            if (r + 1) % 4 / 2 == (c + 1) % 4 / 2 {
                n * n - k
            } else {
                k + 1
            }
        })
        .collect()
}

/// Four odd quadrants, then column swaps between the top and bottom halves.
fn magic_singly_even(n: usize) -> Vec<usize> {
    let p = n / 2;
    let quadrant = magic_odd(p);
    let mut cells = vec![0; n * n];
    for r in 0..p {
        for c in 0..p {
            let a = quadrant[r * p + c];
            cells[r * n + c] = a;
            cells[r * n + c + p] = a + 2 * p * p;
            cells[(r + p) * n + c] = a + 3 * p * p;
            cells[(r + p) * n + c + p] = a + p * p;
        }
    }
    let k = (n - 2) / 4;
    let swapped = (0..k).chain(n - k + 1..n);
    for c in swapped {
        for r in 0..p {
            cells.swap(r * n + c, (r + p) * n + c);
        }
    }
    for c in [0, k] {
        cells.swap(k * n + c, (k + p) * n + c);
    }
    cells
}
