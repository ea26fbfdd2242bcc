//! Shared helpers for evaluator tests, plus tests that exercise the library
//! and interpreter together.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use yamp_parse::{parse, Grammar};
use yamp_value::{EvalError, EvalErrorKind, Matrix, Value};

use crate::{Environment, Interpreter, Library, Limits, ParamKind, Signature};

/// Parse and run `source` in `env`; the results of every statement.
pub(crate) fn run_with(
    library: &Library,
    env: &mut Environment,
    limits: Limits,
    source: &str,
) -> Result<Vec<Option<Value>>, EvalError> {
    let grammar = Grammar::standard();
    let output = parse(&grammar, source).unwrap_or_else(|e| panic!("{source:?}: {e}"));
    Interpreter::new(&output.arena, env, library)
        .with_limits(limits)
        .run(&output.statements)
}

/// Run in `env` with the standard library; the last un-muted value.
pub(crate) fn eval_in(env: &mut Environment, source: &str) -> Value {
    let library = Library::standard();
    let outputs = run_with(&library, env, Limits::default(), source)
        .unwrap_or_else(|e| panic!("{source:?}: {e}"));
    outputs
        .into_iter()
        .flatten()
        .last()
        .unwrap_or_else(|| panic!("{source:?} produced no output"))
}

/// Run setup statements in `env`, ignoring their output.
pub(crate) fn exec(env: &mut Environment, source: &str) {
    let library = Library::standard();
    run_with(&library, env, Limits::default(), source)
        .unwrap_or_else(|e| panic!("{source:?}: {e}"));
}

pub(crate) fn eval(source: &str) -> Value {
    eval_in(&mut Environment::new(), source)
}

pub(crate) fn eval_err(source: &str) -> EvalError {
    let library = Library::standard();
    match run_with(&library, &mut Environment::new(), Limits::default(), source) {
        Ok(outputs) => panic!("{source:?} evaluated to {outputs:?}"),
        Err(err) => err,
    }
}

/// Real matrix from rows.
pub(crate) fn real_matrix(rows: &[&[f64]]) -> Value {
    let cols = rows.first().map_or(0, |r| r.len());
    let data: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Value::matrix(Matrix::from_reals(rows.len(), cols, &data).unwrap())
}

#[test]
fn test_host_function_callable_from_query() {
    let mut library = Library::standard();
    library
        .register(
            "twice",
            Signature::new().param(ParamKind::Scalar),
            |_, args| Ok(Value::Scalar(args.scalar(0)? + args.scalar(0)?)),
        )
        .unwrap();
    let mut env = Environment::new();
    let outputs = run_with(&library, &mut env, Limits::default(), "twice(21)").unwrap();
    assert_eq!(outputs, vec![Some(Value::real(42.0))]);
}

#[test]
fn test_host_constant_visible() {
    let mut library = Library::standard();
    library.register_constant("g", Value::real(9.81)).unwrap();
    let mut env = Environment::new();
    let outputs = run_with(&library, &mut env, Limits::default(), "2 * g").unwrap();
    assert_eq!(outputs, vec![Some(Value::real(19.62))]);
}

#[test]
fn test_named_function_passed_as_value() {
    assert_eq!(eval("apply = (f, x) => f(x); apply(sqrt, 16)"), Value::real(4.0));
}

#[test]
fn test_variable_shadows_library_function() {
    let mut env = Environment::new();
    assert_eq!(eval_in(&mut env, "sin = [10, 20, 30]; sin(2)"), Value::real(20.0));
}

#[test]
fn test_unknown_function_is_symbol_missing() {
    let err = eval_err("nosuchfn(1)");
    assert_eq!(
        err.kind,
        EvalErrorKind::SymbolMissing {
            name: "nosuchfn".to_string()
        }
    );
}

#[test]
fn test_constants_resolve() {
    assert_eq!(eval("pi"), Value::real(std::f64::consts::PI));
    assert_eq!(eval("i * i"), Value::real(-1.0));
    assert_eq!(eval("isnan(nan)"), Value::real(1.0));
}
