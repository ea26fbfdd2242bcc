#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use yamp_value::EvalErrorKind;

use super::*;
use crate::overload::ParamKind;

fn constant_one(_: &mut CallContext<'_>, _: &Arguments) -> EvalResult {
    Ok(Value::real(1.0))
}

#[test]
fn test_register_and_call() {
    let mut lib = Library::new();
    lib.register("one", Signature::new(), constant_one).unwrap();
    let mut env = Environment::new();
    assert_eq!(lib.call("one", &mut env, vec![]).unwrap(), Value::real(1.0));
}

#[test]
fn test_overloads_with_distinct_shapes() {
    let mut lib = Library::new();
    lib.register("f", Signature::new(), constant_one).unwrap();
    lib.register("f", Signature::new().param(ParamKind::Scalar), constant_one)
        .unwrap();
    assert_eq!(lib.overloads("f").len(), 2);
}

#[test]
fn test_duplicate_shape_rejected() {
    let mut lib = Library::new();
    let shape = Signature::new().param(ParamKind::Scalar);
    lib.register("f", shape.clone(), constant_one).unwrap();
    let err = lib.register("f", shape, constant_one).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::DuplicateRegistration {
            name: "f(scalar)".to_string()
        }
    );
}

#[test]
fn test_constant_and_function_cannot_share_name() {
    let mut lib = Library::new();
    lib.register_constant("k", Value::real(2.0)).unwrap();
    assert!(lib.register("k", Signature::new(), constant_one).is_err());
    lib.register("g", Signature::new(), constant_one).unwrap();
    assert!(lib.register_constant("g", Value::real(2.0)).is_err());
    assert!(lib.register_constant("k", Value::real(3.0)).is_err());
}

#[test]
fn test_invalid_signature_rejected() {
    let mut lib = Library::new();
    let bad = Signature::new().variadic(ParamKind::Scalar, 0, None, 0);
    let err = lib.register("f", bad, constant_one).unwrap_err();
    assert_eq!(err.code(), yamp_diagnostic::ErrorCode::E2002);
    assert!(!lib.has_function("f"));
}

#[test]
fn test_unknown_function_call() {
    let lib = Library::new();
    let mut env = Environment::new();
    let err = lib.call("missing", &mut env, vec![]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::SymbolMissing {
            name: "missing".to_string()
        }
    );
}

#[test]
fn test_standard_constants() {
    let lib = Library::standard();
    assert_eq!(lib.constant("pi"), Some(&Value::real(std::f64::consts::PI)));
    assert_eq!(lib.constant("e"), Some(&Value::real(std::f64::consts::E)));
    assert_eq!(lib.constant("i"), Some(&Value::complex(0.0, 1.0)));
    assert_eq!(lib.constant("inf"), Some(&Value::real(f64::INFINITY)));
    assert!(lib.constant("nan").is_some());
}

#[test]
fn test_standard_functions_registered() {
    let lib = Library::standard();
    let names = lib.function_names();
    for name in [
        "abs", "sqrt", "exp", "ln", "log", "sin", "cos", "tan", "cot", "floor", "ceil", "round",
        "real", "imag", "conj", "arg", "isnan", "factorial", "eye", "ones", "zeros", "length",
        "size", "sum", "max", "min", "sort", "det", "inv", "trace", "transpose", "clear",
        "exists", "newset", "newsortedset", "union", "intersect", "tassort", "plot", "title",
    ] {
        assert!(names.contains(&name), "{name} is not registered");
    }
}

#[test]
fn test_standard_signatures_are_valid_and_unique() {
    let lib = Library::standard();
    for name in lib.function_names() {
        let overloads = lib.overloads(name);
        for (i, overload) in overloads.iter().enumerate() {
            overload.signature.validate(name).unwrap();
            assert!(
                overloads[..i]
                    .iter()
                    .all(|o| o.signature != overload.signature),
                "{name}{} is registered twice",
                overload.signature
            );
        }
    }
}

#[test]
fn test_debug_lists_names() {
    let mut lib = Library::new();
    lib.register("f", Signature::new(), constant_one).unwrap();
    lib.register_constant("k", Value::real(1.0)).unwrap();
    assert_eq!(
        format!("{lib:?}"),
        r#"Library { functions: ["f"], constants: ["k"] }"#
    );
}
