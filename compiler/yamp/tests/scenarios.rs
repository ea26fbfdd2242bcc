// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end query tests: text in, values and session state out.

use std::time::Duration;

use pretty_assertions::assert_eq;
use yamp::{QueryError, Session, Value};
use yamp_diagnostic::ErrorCode;
use yamp_ir::Span;

fn value_of(text: &str) -> Value {
    let mut session = Session::new();
    let output = session
        .query(text)
        .unwrap_or_else(|e| panic!("{text:?}: {}", e.render(text)));
    output
        .value()
        .cloned()
        .unwrap_or_else(|| panic!("{text:?} produced no value"))
}

fn error_of(text: &str) -> QueryError {
    match Session::new().query(text) {
        Ok(output) => panic!("{text:?} succeeded with {output:?}"),
        Err(err) => err,
    }
}

// Core scenarios

#[test]
fn test_left_associative_subtraction() {
    assert_eq!(value_of("2-3-4"), Value::real(-5.0));
}

#[test]
fn test_nested_assignment_updates_session() {
    let mut session = Session::new();
    let output = session.query("x=(y=5)+2").unwrap();
    assert_eq!(output.outputs(), &[Some(Value::real(7.0))]);
    assert_eq!(session.get("y"), Some(&Value::real(5.0)));
    let y = session.query("y").unwrap();
    assert_eq!(y.value(), Some(&Value::real(5.0)));
}

#[test]
fn test_index_into_matrix_literal() {
    assert_eq!(value_of("[1,2,3;4,5,6;7,8,9](2,3)"), Value::real(6.0));
}

#[test]
fn test_power_tower() {
    assert_eq!(value_of("2^2^2^2"), Value::real(65536.0));
}

#[test]
fn test_trailing_operator_is_parse_error() {
    let err = error_of("2+");
    assert!(err.is_parse());
    assert_eq!(err.code(), ErrorCode::E1002);
    assert_eq!(err.span(), Some(Span::point(2)));
}

// Query surface

#[test]
fn test_parse_once_execute_twice() {
    let mut first = Session::new().with_bindings([("n", Value::real(2.0))]);
    let mut second = Session::new().with_bindings([("n", Value::real(10.0))]);
    let query = first.parse("m = n * 3; m + 1").unwrap();
    assert_eq!(query.statements().len(), 2);

    let a = first.execute(&query).unwrap();
    let b = second.execute(&query).unwrap();
    assert_eq!(a.outputs(), &[None, Some(Value::real(7.0))]);
    assert_eq!(b.value(), Some(&Value::real(31.0)));
    assert_eq!(first.execute(&query).unwrap(), a);
}

#[test]
fn test_query_with_bindings() {
    let mut session = Session::new();
    let output = session
        .query_with("a * b", [("a", Value::real(6.0)), ("b", Value::real(7.0))])
        .unwrap();
    assert_eq!(output.value(), Some(&Value::real(42.0)));
    assert_eq!(session.get("a"), Some(&Value::real(6.0)));
}

#[test]
fn test_variables_listed_sorted() {
    let mut session = Session::new();
    session.query("b = 2; a = 1; c = [1, 2]").unwrap();
    let names: Vec<&str> = session.variables().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_muted_query_has_no_value() {
    let mut session = Session::new();
    let output = session.query("x = 3;").unwrap();
    assert_eq!(output.value(), None);
    assert_eq!(session.get("x"), Some(&Value::real(3.0)));
}

#[test]
fn test_failure_keeps_committed_statements() {
    let mut session = Session::new();
    let err = session.query("a = 1; b = missing + 1; c = 3").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6001);
    assert_eq!(err.message(), "The symbol missing could not be found.");
    assert_eq!(session.get("a"), Some(&Value::real(1.0)));
    assert_eq!(session.get("c"), None);
}

#[test]
fn test_time_budget() {
    let mut session = Session::builder()
        .time_budget(Duration::from_millis(20))
        .build();
    let err = session.query("k = 0; while (1) { k += 1 }").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6009);
    assert!(session.get("k").is_some());
}

#[test]
fn test_render_points_at_failure() {
    let text = "1 + nope";
    let err = error_of(text);
    let rendered = err.render(text);
    assert!(rendered.starts_with("error[E6001]"), "{rendered}");
    assert!(rendered.contains("1 + nope"), "{rendered}");
    assert!(rendered.contains("    ^^^^"), "{rendered}");
}

// Surface language

#[test]
fn test_ranges() {
    assert_eq!(value_of("sum(1:1:3) == sum(1:3)"), Value::real(1.0));
    let Value::Range(r) = value_of("5:1") else {
        panic!("expected a range");
    };
    assert_eq!(r.values(), Some(vec![5.0, 4.0, 3.0, 2.0, 1.0]));
}

#[test]
fn test_matrix_algebra() {
    let mut session = Session::new();
    session.query("A = [1, 2; 3, 4];").unwrap();
    let check = |session: &mut Session, text: &str| {
        session.query(text).unwrap().value().cloned().unwrap()
    };
    assert_eq!(check(&mut session, "A * eye(2) == A"), value_of("[1, 1; 1, 1]"));
    assert_eq!(check(&mut session, "(A')' == A"), value_of("[1, 1; 1, 1]"));
    assert_eq!(check(&mut session, "A(2, :)"), value_of("[3, 4]"));
}

#[test]
fn test_strings() {
    assert_eq!(value_of("\"n = \" + 3"), Value::string("n = 3"));
    assert_eq!(value_of("s = \"hello\"; s(1)"), Value::string("h"));
    assert_eq!(value_of("\"a\" == \"a\""), Value::real(1.0));
}

#[test]
fn test_closures_and_higher_order() {
    assert_eq!(
        value_of("compose = (f, g) => x => f(g(x)); h = compose(sqrt, abs); h(-16)"),
        Value::real(4.0)
    );
    assert_eq!(
        value_of("fib = n => if (n < 2) { n } else { fib(n - 1) + fib(n - 2) }; fib(10)"),
        Value::real(55.0)
    );
}

#[test]
fn test_multiline_program() {
    let text = "total = 0\nfor (k = 1; k <= 10; k += 1) {\n  total += k // running sum\n}\ntotal";
    assert_eq!(value_of(text), Value::real(55.0));
}

#[test]
fn test_sets_end_to_end() {
    let mut session = Session::new();
    session
        .query("a = newset(\"a\", 1, 2, 3); b = newset(\"b\", 3, 4);")
        .unwrap();
    let Value::Set(u) = session.query("union(a, b)").unwrap().value().cloned().unwrap() else {
        panic!("expected a set");
    };
    assert_eq!(u.name(), "(a+b)");
    assert_eq!(u.len(), 4);
}

#[test]
fn test_values_survive_serialization() {
    let mut session = Session::new();
    let output = session.query("[1, 2; 3, 4 + 1i]").unwrap();
    let value = output.value().unwrap();
    let bytes = value.to_bytes().unwrap();
    assert_eq!(&Value::from_bytes(&bytes).unwrap(), value);
}

#[test]
fn test_ranges_concatenate_as_columns() {
    assert_eq!(
        value_of("sum([0:10, 2^(0:2:20), 2^(1:2:21)](:,1))"),
        Value::real(55.0)
    );
    let r = "-pi/4:0.1:pi/4";
    let Value::Matrix(m) = value_of(&format!("[sin({r}), cos({r}), tan({r})]")) else {
        panic!("expected a matrix");
    };
    assert_eq!(m.dims(), (16, 3));
    assert_eq!(value_of(&format!("length({r})")), Value::real(16.0));
}

#[test]
fn test_scalar_multi_assignment_broadcasts() {
    assert_eq!(value_of("[a,b,c]=12.0;b"), Value::real(12.0));
}

#[test]
fn test_eigenvalues_end_to_end() {
    let Value::Scalar(z) = value_of("e = eig([1,2;4,5]); e(1)") else {
        panic!("expected a scalar");
    };
    assert!((z.re - (3.0 - 12.0f64.sqrt())).abs() < 1e-12);
    assert_eq!(value_of("sum(magic(4))"), value_of("[34, 34, 34, 34]"));
}

#[test]
fn test_oversized_requests_are_range_errors() {
    for text in ["x(1e300)=1", "zeros(4294967296,4294967296)", "length(1:1e300)", "sum(1:1e300)"] {
        assert_eq!(error_of(text).code(), ErrorCode::E6006, "{text}");
    }
    let mut session = Session::new();
    session.query("x = [1, 2]").unwrap();
    assert!(session.query("x(1e300) = 1").is_err());
    assert_eq!(session.get("x"), Some(&value_of("[1, 2]")));
}
