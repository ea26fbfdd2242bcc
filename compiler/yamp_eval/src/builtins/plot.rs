//! Plot construction. Rendering is left to the host.

use yamp_value::{
    argument_value, dimension_mismatch, Complex, EvalError, Matrix, PlotSeries, PlotValue, Value,
};

use super::fixed;
use crate::library::Library;
use crate::overload::{ParamKind, Signature};

/// `1, 2, .., n` as a row vector.
fn positions(n: usize) -> Matrix {
    Matrix::row_vector((1..=n).map(|k| Complex::real(k as f64)).collect())
}

fn as_row(m: &Matrix) -> Matrix {
    Matrix::row_vector(m.data().to_vec())
}

/// Column `c` of `m` laid out as a row vector.
fn column(m: &Matrix, c: usize) -> Matrix {
    Matrix::row_vector((0..m.rows()).filter_map(|r| m.get(r, c)).collect())
}

/// Series of `y` against `x`: one for a vector, one per column of a matrix
/// whose row count matches `x`.
fn series(x: &Matrix, y: &Matrix) -> Result<Vec<PlotSeries>, EvalError> {
    if y.is_vector() && y.numel() == x.numel() {
        return Ok(vec![PlotSeries::Points {
            x: as_row(x),
            y: as_row(y),
        }]);
    }
    if y.rows() != x.numel() {
        return Err(dimension_mismatch("plot", x.dims(), y.dims()));
    }
    let columns = (0..y.cols())
        .map(|c| PlotSeries::Points {
            x: as_row(x),
            y: column(y, c),
        })
        .collect();
    Ok(columns)
}

pub(super) fn register(lib: &mut Library) {
    lib.insert("plot", fixed(&[ParamKind::Matrix]), |_, args| {
        let y = args.matrix(0)?;
        if y.is_vector() {
            return Ok(Value::plot(PlotValue::new(series(&positions(y.numel()), y)?)));
        }
        // The first column holds the abscissae of every other column.
        let x = column(y, 0);
        let all = (1..y.cols())
            .map(|c| PlotSeries::Points {
                x: x.clone(),
                y: column(y, c),
            })
            .collect();
        Ok(Value::plot(PlotValue::new(all)))
    });

    lib.insert(
        "plot",
        Signature::new()
            .param(ParamKind::Matrix)
            .variadic(ParamKind::Matrix, 1, None, 1),
        |_, args| {
            let x = args.matrix(0)?;
            let mut all = Vec::new();
            for y in args.rest() {
                let Value::Matrix(y) = y else {
                    return Err(argument_value(format!("cannot plot a {}", y.kind())));
                };
                all.extend(series(x, y)?);
            }
            Ok(Value::plot(PlotValue::new(all)))
        },
    );

    lib.insert(
        "plot",
        fixed(&[ParamKind::Function, ParamKind::Scalar, ParamKind::Scalar]),
        |_, args| {
            let Some(Value::Function(function)) = args.get(0) else {
                return Err(argument_value("argument 1 must be a function"));
            };
            let (from, to) = (args.real(1)?, args.real(2)?);
            if from >= to {
                return Err(argument_value(format!(
                    "the plot interval {from} to {to} is empty"
                )));
            }
            Ok(Value::plot(PlotValue::new(vec![PlotSeries::Function {
                function: (**function).clone(),
                from,
                to,
            }])))
        },
    );

    lib.insert("title", fixed(&[ParamKind::Plot, ParamKind::String]), |_, args| {
        let plot = args.plot(0)?.clone().with_title(args.str(1)?);
        Ok(Value::plot(plot))
    });
}
