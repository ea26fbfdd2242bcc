#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::matrix::Matrix;

fn num(x: f64) -> SetElement {
    SetElement::Number(Complex::real(x))
}

#[test]
fn test_duplicates_are_ignored() {
    let mut s = SetValue::new("a", false);
    assert!(s.insert(num(1.0)));
    assert!(!s.insert(num(1.0)));
    assert!(s.insert(SetElement::Text("x".into())));
    assert_eq!(s.len(), 2);
}

#[test]
fn test_negative_zero_equals_zero() {
    let mut s = SetValue::new("z", false);
    s.insert(num(0.0));
    assert!(!s.insert(num(-0.0)));
}

#[test]
fn test_ordered_set_stays_sorted() {
    let mut s = SetValue::new("s", true);
    for x in [5.0, 1.0, 3.0] {
        s.insert(num(x));
    }
    s.insert(SetElement::Text("b".into()));
    s.insert(SetElement::Text("a".into()));
    assert_eq!(s.to_string(), "s: {1, 3, 5, \"a\", \"b\"}");
}

#[test]
fn test_unordered_equality_ignores_insertion_order() {
    let mut a = SetValue::new("n", false);
    let mut b = SetValue::new("n", false);
    a.insert(num(1.0));
    a.insert(num(2.0));
    b.insert(num(2.0));
    b.insert(num(1.0));
    assert_eq!(a, b);
}

#[test]
fn test_insert_matrix_value() {
    let mut s = SetValue::new("m", false);
    let m = Matrix::from_reals(1, 3, &[1.0, 2.0, 2.0]).unwrap();
    s.insert_value(&Value::matrix(m.clone())).unwrap();
    assert_eq!(s.len(), 2);

    let mut sorted = SetValue::new("m", true);
    assert!(sorted.insert_value(&Value::matrix(m)).is_err());
    sorted.insert_value(&Value::real(4.0)).unwrap();
    assert_eq!(sorted.len(), 1);
}

#[test]
fn test_union_and_intersect_names() {
    let mut a = SetValue::new("a", false);
    let mut b = SetValue::new("b", false);
    a.insert(num(1.0));
    a.insert(num(2.0));
    b.insert(num(2.0));
    b.insert(num(3.0));
    let u = a.union(&b);
    assert_eq!(u.name(), "(a+b)");
    assert_eq!(u.len(), 3);
    let i = a.intersect(&b);
    assert_eq!(i.name(), "(a*b)");
    assert_eq!(i.len(), 1);
    assert!(i.contains(&num(2.0)));
}

#[test]
fn test_sorted_copy() {
    let mut a = SetValue::new("a", false);
    a.insert(num(3.0));
    a.insert(num(1.0));
    let s = a.sorted();
    assert!(s.is_ordered());
    assert_eq!(s.to_string(), "a: {1, 3}");
    assert!(!a.is_ordered());
}
