#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use yamp_value::{EvalErrorKind, Matrix, RangeValue, ValueKind};

use super::*;

/// Overload whose implementation reports which one ran.
fn tagged(signature: Signature, tag: &'static str) -> Overload {
    Overload {
        signature,
        func: Box::new(move |_, _| Ok(Value::string(tag))),
    }
}

fn one(kind: ParamKind) -> Signature {
    Signature::new().param(kind)
}

fn selected(overloads: &[Overload], args: &[Value]) -> Signature {
    select("f", overloads, args).unwrap().signature.clone()
}

fn one_by_one(z: f64) -> Value {
    Value::matrix(Matrix::scalar(Complex::real(z)))
}

// Selection

#[test]
fn test_exact_match_beats_coercion() {
    let overloads = [
        tagged(one(ParamKind::Scalar), "scalar"),
        tagged(one(ParamKind::Matrix), "matrix"),
    ];
    assert_eq!(selected(&overloads, &[Value::real(2.0)]), one(ParamKind::Scalar));
    assert_eq!(selected(&overloads, &[one_by_one(2.0)]), one(ParamKind::Matrix));
}

#[test]
fn test_one_by_one_matrix_coerces_to_scalar() {
    let overloads = [tagged(one(ParamKind::Scalar), "scalar")];
    assert_eq!(selected(&overloads, &[one_by_one(2.0)]), one(ParamKind::Scalar));
}

#[test]
fn test_larger_matrix_never_fits_scalar() {
    let overloads = [
        tagged(one(ParamKind::Scalar), "scalar"),
        tagged(one(ParamKind::Matrix), "matrix"),
    ];
    let m = Value::matrix(Matrix::from_reals(1, 2, &[1.0, 2.0]).unwrap());
    assert_eq!(selected(&overloads, &[m.clone()]), one(ParamKind::Matrix));

    let scalar_only = [tagged(one(ParamKind::Scalar), "scalar")];
    let err = select("f", &scalar_only, &[m]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NoMatchingOverload {
            name: "f".to_string(),
            args: vec![ValueKind::Matrix],
        }
    );
}

#[test]
fn test_bounded_range_widens_to_matrix() {
    let overloads = [tagged(one(ParamKind::Matrix), "matrix")];
    let bounded = Value::Range(RangeValue::bounded(1.0, 1.0, 3.0).unwrap());
    assert!(select("f", &overloads, &[bounded]).is_ok());
    let open = Value::Range(RangeValue::open(1.0, 1.0).unwrap());
    assert!(select("f", &overloads, &[open]).is_err());
}

#[test]
fn test_tie_is_ambiguous() {
    let overloads = [
        tagged(
            Signature::new().param(ParamKind::Scalar).param(ParamKind::Any),
            "left",
        ),
        tagged(
            Signature::new().param(ParamKind::Any).param(ParamKind::Scalar),
            "right",
        ),
    ];
    let err = select("f", &overloads, &[Value::real(1.0), Value::real(2.0)]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::AmbiguousOverload {
            name: "f".to_string(),
            args: vec![ValueKind::Scalar, ValueKind::Scalar],
            candidates: 2,
        }
    );
}

#[test]
fn test_coercion_count_does_not_rank() {
    let both = Signature::new().param(ParamKind::Scalar).param(ParamKind::Scalar);
    let first = Signature::new().param(ParamKind::Scalar).param(ParamKind::Matrix);
    let overloads = [tagged(both, "both"), tagged(first, "first")];
    let err = select("f", &overloads, &[one_by_one(1.0), one_by_one(2.0)]).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::AmbiguousOverload { candidates: 2, .. }
    ));
}

#[test]
fn test_variadic_coercion_keeps_exact_rank() {
    let fixed = Signature::new().param(ParamKind::Matrix).param(ParamKind::Matrix);
    let spread = Signature::new()
        .param(ParamKind::Scalar)
        .variadic(ParamKind::Scalar, 1, Some(1), 1);
    let overloads = [tagged(fixed, "fixed"), tagged(spread.clone(), "spread")];
    // The second argument is coerced only inside the variadic slot.
    assert_eq!(
        selected(&overloads, &[Value::real(1.0), one_by_one(2.0)]),
        spread
    );
}

#[test]
fn test_narrower_variadic_window_wins() {
    let fixed = Signature::new().param(ParamKind::Scalar).param(ParamKind::Scalar);
    let bounded = Signature::new().variadic(ParamKind::Scalar, 1, Some(3), 1);
    let unbounded = Signature::new().variadic(ParamKind::Scalar, 0, None, 1);
    let overloads = [
        tagged(unbounded.clone(), "unbounded"),
        tagged(bounded.clone(), "bounded"),
        tagged(fixed.clone(), "fixed"),
    ];
    let two = [Value::real(1.0), Value::real(2.0)];
    assert_eq!(selected(&overloads, &two), fixed);
    let three = [Value::real(1.0), Value::real(2.0), Value::real(3.0)];
    assert_eq!(selected(&overloads, &three), bounded);
    let five = vec![Value::real(0.0); 5];
    assert_eq!(selected(&overloads, &five), unbounded);
}

#[test]
fn test_arity_mismatch_is_no_match() {
    let overloads = [tagged(one(ParamKind::Scalar), "scalar")];
    assert!(select("f", &overloads, &[]).is_err());
    assert!(select("f", &overloads, &[Value::real(1.0), Value::real(2.0)]).is_err());
}

// Binding

#[test]
fn test_bind_splits_fixed_and_variadic() {
    let signature = Signature::new()
        .param(ParamKind::String)
        .variadic(ParamKind::Scalar, 0, None, 1)
        .param(ParamKind::String);
    let args = signature.bind(vec![
        Value::string("a"),
        Value::real(1.0),
        Value::real(2.0),
        Value::string("b"),
    ]);
    assert_eq!(args.len(), 2);
    assert_eq!(args.str(0).unwrap(), "a");
    assert_eq!(args.str(1).unwrap(), "b");
    assert_eq!(args.rest(), &[Value::real(1.0), Value::real(2.0)]);
}

#[test]
fn test_bind_applies_coercion() {
    let signature = one(ParamKind::Matrix);
    let args = signature.bind(vec![Value::real(5.0)]);
    assert_eq!(args.matrix(0).unwrap().dims(), (1, 1));
}

#[test]
fn test_wrong_kind_accessor_message() {
    let args = one(ParamKind::Any).bind(vec![Value::real(1.0)]);
    let err = args.str(0).unwrap_err();
    assert_eq!(err.message, "argument 1 must be a string, got a scalar");
    let err = args.scalar(3).unwrap_err();
    assert_eq!(err.message, "argument 4 must be a scalar, got nothing");
}

#[test]
fn test_resolve_invokes_selected() {
    let overloads = [
        tagged(one(ParamKind::Scalar), "scalar"),
        tagged(one(ParamKind::String), "string"),
    ];
    let mut env = Environment::new();
    let mut ctx = CallContext::new("f", &mut env);
    let result = resolve("f", &overloads, &mut ctx, vec![Value::string("x")]).unwrap();
    assert_eq!(result, Value::string("string"));
}

// Descriptors

#[test]
fn test_signature_display() {
    let signature = Signature::new()
        .param(ParamKind::String)
        .variadic(ParamKind::Any, 0, None, 1);
    assert_eq!(signature.to_string(), "(string, any...)");
    assert_eq!(Signature::new().to_string(), "()");
}

#[test]
fn test_validate_rejects_malformed() {
    let two = Signature::new()
        .variadic(ParamKind::Scalar, 0, None, 1)
        .variadic(ParamKind::Scalar, 0, None, 1);
    assert!(matches!(
        two.validate("f").unwrap_err().kind,
        EvalErrorKind::InvalidSignature { .. }
    ));
    let zero_step = Signature::new().variadic(ParamKind::Scalar, 0, None, 0);
    assert!(zero_step.validate("f").is_err());
    let inverted = Signature::new().variadic(ParamKind::Scalar, 3, Some(1), 1);
    assert!(inverted.validate("f").is_err());
    assert!(Signature::new().variadic(ParamKind::Scalar, 1, Some(1), 1).validate("f").is_ok());
}

#[test]
fn test_variadic_bounds() {
    let v = Variadic {
        kind: ParamKind::Scalar,
        min: 1,
        max: Some(3),
        step: 1,
    };
    assert!(!v.accepts_count(0));
    assert!(v.accepts_count(1));
    assert!(v.accepts_count(3));
    assert!(!v.accepts_count(4));
    assert_eq!(v.window(), 2);
}

proptest! {
    #[test]
    fn prop_step_two_accepts_even_counts(count in 0usize..64) {
        let v = Variadic {
            kind: ParamKind::Any,
            min: 0,
            max: None,
            step: 2,
        };
        prop_assert_eq!(v.accepts_count(count), count % 2 == 0);
    }

    #[test]
    fn prop_scalar_and_one_by_one_interchangeable(x in -1e6f64..1e6) {
        let scalar_only = [tagged(one(ParamKind::Scalar), "scalar")];
        let matrix_only = [tagged(one(ParamKind::Matrix), "matrix")];
        prop_assert!(select("f", &scalar_only, &[one_by_one(x)]).is_ok());
        prop_assert!(select("f", &matrix_only, &[Value::real(x)]).is_ok());
    }
}
