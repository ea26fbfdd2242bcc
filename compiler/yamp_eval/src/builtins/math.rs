//! Element-wise math over scalars and matrices.

use yamp_value::{factorial, Complex, EvalError, Matrix, Value};

use super::fixed;
use crate::library::Library;
use crate::overload::ParamKind;

type ScalarFn = fn(Complex) -> Complex;

const ELEMENTWISE: &[(&str, ScalarFn)] = &[
    ("abs", |z| Complex::real(z.norm())),
    ("sqrt", Complex::sqrt),
    ("exp", Complex::exp),
    ("ln", Complex::ln),
    ("log", log10),
    ("sin", Complex::sin),
    ("cos", Complex::cos),
    ("tan", Complex::tan),
    ("cot", |z| Complex::ONE / z.tan()),
    ("floor", |z| Complex::new(z.re.floor(), z.im.floor())),
    ("ceil", |z| Complex::new(z.re.ceil(), z.im.ceil())),
    ("round", |z| Complex::new(z.re.round(), z.im.round())),
    ("real", |z| Complex::real(z.re)),
    ("imag", |z| Complex::real(z.im)),
    ("conj", Complex::conj),
    ("arg", |z| Complex::real(z.arg())),
    ("isnan", |z| Complex::real(if z.is_nan() { 1.0 } else { 0.0 })),
];

fn log10(z: Complex) -> Complex {
    if z.is_real() && z.re > 0.0 {
        return Complex::real(z.re.log10());
    }
    z.ln() / Complex::real(std::f64::consts::LN_10)
}

pub(super) fn register(lib: &mut Library) {
    for &(name, f) in ELEMENTWISE {
        lib.insert(name, fixed(&[ParamKind::Scalar]), move |_, args| {
            Ok(Value::Scalar(f(args.scalar(0)?)))
        });
        lib.insert(name, fixed(&[ParamKind::Matrix]), move |_, args| {
            Ok(Value::matrix(args.matrix(0)?.map(f)))
        });
    }

    lib.insert("factorial", fixed(&[ParamKind::Scalar]), |_, args| {
        factorial(args.scalar(0)?).map(Value::Scalar)
    });
    lib.insert("factorial", fixed(&[ParamKind::Matrix]), |_, args| {
        let m = args.matrix(0)?;
        let data = m
            .data()
            .iter()
            .map(|&z| factorial(z))
            .collect::<Result<Vec<_>, EvalError>>()?;
        Matrix::new(m.rows(), m.cols(), data).map(Value::matrix)
    });
}
