//! Indexing `x(i)`, `x(i, j)` and indexed assignment `x(i, j) = v`.
//!
//! Indices are 1-based. A single index addresses elements linearly in
//! row-major order; two indices address rows and columns. `end` is
//! resolved to a number by the caller before indexing; open ranges
//! (`2:end`) and `:` are resolved here against the addressed extent.

use crate::complex::Complex;
use crate::errors::{
    argument_range, argument_value, index_out_of_bounds, unsupported_unary, EvalError,
    EvalResult,
};
use crate::matrix::{Matrix, MAX_ELEMENTS};
use crate::value::Value;

/// One argument of an index expression.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexArg {
    /// `:` selects the whole extent.
    All,
    Value(Value),
}

/// 0-based positions addressed by `arg` within `extent`.
///
/// Positions past `extent` are returned as-is; readers reject them,
/// writers grow the target.
fn positions(arg: &IndexArg, extent: usize) -> Result<Vec<usize>, EvalError> {
    let numbers = match arg {
        IndexArg::All => return Ok((0..extent).collect()),
        IndexArg::Value(Value::Scalar(z)) => vec![*z],
        IndexArg::Value(Value::Matrix(m)) => m.data().to_vec(),
        IndexArg::Value(Value::Range(r)) => r
            .resolve(extent as f64)?
            .values()
            .unwrap_or_default()
            .into_iter()
            .map(Complex::real)
            .collect(),
        IndexArg::Value(other) => {
            return Err(argument_value(format!(
                "indices must be numeric, got a {}",
                other.kind()
            )))
        }
    };
    numbers
        .into_iter()
        .map(|z| {
            if !z.is_integer() {
                Err(argument_value(format!(
                    "index {z} is invalid; indices must be integers"
                )))
            } else if z.re < 1.0 {
                Err(argument_range(format!(
                    "index {z} is invalid; indices must be positive"
                )))
            } else if z.re > MAX_ELEMENTS as f64 {
                Err(argument_range(format!(
                    "index {z} exceeds the limit of {MAX_ELEMENTS} elements"
                )))
            } else {
                Ok(z.re as usize - 1)
            }
        })
        .collect()
}

fn check_bounds(positions: &[usize], extent: usize) -> Result<(), EvalError> {
    match positions.iter().find(|&&p| p >= extent) {
        Some(&p) => Err(index_out_of_bounds((p + 1) as f64, extent)),
        None => Ok(()),
    }
}

fn indexable_matrix(target: &Value) -> Result<Matrix, EvalError> {
    target
        .to_matrix()
        .ok_or_else(|| unsupported_unary("()", target.kind()))
}

/// Read `target(args...)`.
pub fn index(target: &Value, args: &[IndexArg]) -> EvalResult {
    if let Value::Str(s) = target {
        return index_string(s, args);
    }
    let m = indexable_matrix(target)?;
    match args {
        [arg] => {
            let picked = positions(arg, m.numel())?;
            check_bounds(&picked, m.numel())?;
            let data: Vec<Complex> = picked.iter().map(|&p| m.data()[p]).collect();
            let result = if m.cols() == 1 && m.rows() > 1 {
                Matrix::column_vector(data)
            } else {
                Matrix::row_vector(data)
            };
            Ok(Value::matrix_or_scalar(result))
        }
        [row_arg, col_arg] => {
            let rows = positions(row_arg, m.rows())?;
            let cols = positions(col_arg, m.cols())?;
            check_bounds(&rows, m.rows())?;
            check_bounds(&cols, m.cols())?;
            let result = Matrix::from_fn(rows.len(), cols.len(), |r, c| m.at(rows[r], cols[c]))?;
            Ok(Value::matrix_or_scalar(result))
        }
        _ => Err(argument_range(format!(
            "expected one or two indices, got {}",
            args.len()
        ))),
    }
}

fn index_string(s: &str, args: &[IndexArg]) -> EvalResult {
    let chars: Vec<char> = s.chars().collect();
    let arg = match args {
        [arg] => arg,
        [row, arg] => {
            let rows = positions(row, 1)?;
            check_bounds(&rows, 1)?;
            arg
        }
        _ => {
            return Err(argument_range(format!(
                "expected one or two indices, got {}",
                args.len()
            )))
        }
    };
    let picked = positions(arg, chars.len())?;
    check_bounds(&picked, chars.len())?;
    Ok(Value::string(picked.iter().map(|&p| chars[p]).collect::<String>()))
}

/// Source of assigned elements: one value broadcast, or one per position.
fn assigned_elements(value: &Value, count: usize) -> Result<Vec<Complex>, EvalError> {
    let m = value.to_matrix().ok_or_else(|| {
        argument_value(format!("cannot assign a {} into a matrix", value.kind()))
    })?;
    if let Some(z) = m.as_scalar() {
        return Ok(vec![z; count]);
    }
    if m.numel() != count {
        return Err(argument_value(format!(
            "cannot assign {} elements to {count} positions",
            m.numel()
        )));
    }
    Ok(m.into_data())
}

/// Perform `target(args...) = value`, growing `target` with zeros when
/// the indices reach past its current size.
pub fn assign_index(target: &mut Value, args: &[IndexArg], value: &Value) -> Result<(), EvalError> {
    let mut m = indexable_matrix(target)?;
    match args {
        [arg] => {
            let picked = positions(arg, m.numel())?;
            let needed = picked.iter().map(|&p| p + 1).max().unwrap_or(0);
            if needed > m.numel() {
                m = if m.is_empty() || m.rows() == 1 {
                    m.resized(1, needed)?
                } else if m.cols() == 1 {
                    m.resized(needed, 1)?
                } else {
                    return Err(index_out_of_bounds(needed as f64, m.numel()));
                };
            }
            let elements = assigned_elements(value, picked.len())?;
            let cols = m.cols();
            for (&p, z) in picked.iter().zip(elements) {
                m.set(p / cols, p % cols, z);
            }
        }
        [row_arg, col_arg] => {
            let rows = positions(row_arg, m.rows())?;
            let cols = positions(col_arg, m.cols())?;
            let new_rows = rows.iter().map(|&r| r + 1).max().unwrap_or(0).max(m.rows());
            let new_cols = cols.iter().map(|&c| c + 1).max().unwrap_or(0).max(m.cols());
            if (new_rows, new_cols) != m.dims() {
                m = m.resized(new_rows, new_cols)?;
            }
            let elements = assigned_elements(value, rows.len() * cols.len())?;
            let mut elements = elements.into_iter();
            for &r in &rows {
                for &c in &cols {
                    if let Some(z) = elements.next() {
                        m.set(r, c, z);
                    }
                }
            }
        }
        _ => {
            return Err(argument_range(format!(
                "expected one or two indices, got {}",
                args.len()
            )))
        }
    }
    *target = Value::matrix_or_scalar(m);
    Ok(())
}
