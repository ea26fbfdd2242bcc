#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::errors::EvalErrorKind;

fn m(rows: usize, cols: usize, values: &[f64]) -> Matrix {
    Matrix::from_reals(rows, cols, values).unwrap()
}

fn close(a: Complex, b: Complex) -> bool {
    (a - b).norm() < 1e-9
}

/// `A v = lambda v` for every column of `vectors`.
fn assert_eigenpairs(a: &Matrix, values: &[Complex], vectors: &Matrix) {
    for (c, &lambda) in values.iter().enumerate() {
        let v: Vec<Complex> = (0..a.rows()).map(|r| vectors.get(r, c).unwrap()).collect();
        let length: f64 = v.iter().map(|z| z.norm().powi(2)).sum::<f64>().sqrt();
        assert!((length - 1.0).abs() < 1e-9, "column {c} has length {length}");
        for r in 0..a.rows() {
            let av = (0..a.cols()).fold(Complex::ZERO, |acc, k| acc + a.get(r, k).unwrap() * v[k]);
            assert!(close(av, lambda * v[r]), "row {r} of eigenpair {c}");
        }
    }
}

#[test]
fn test_real_eigenvalues_ascending() {
    let a = m(2, 2, &[1.0, 2.0, 4.0, 5.0]);
    let values = a.eigenvalues().unwrap();
    let root = 12.0f64.sqrt();
    assert!(close(values[0], Complex::real(3.0 - root)), "{values:?}");
    assert!(close(values[1], Complex::real(3.0 + root)), "{values:?}");
    assert_eigenpairs(&a, &values, &a.eigenvectors(&values).unwrap());
}

#[test]
fn test_rotation_has_conjugate_pair() {
    let a = m(2, 2, &[0.0, -1.0, 1.0, 0.0]);
    let values = a.eigenvalues().unwrap();
    assert!(close(values[0], Complex::new(0.0, -1.0)), "{values:?}");
    assert!(close(values[1], Complex::new(0.0, 1.0)), "{values:?}");
    assert_eigenpairs(&a, &values, &a.eigenvectors(&values).unwrap());
}

#[test]
fn test_symmetric_three_by_three() {
    let a = m(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
    let values = a.eigenvalues().unwrap();
    let s = 2.0f64.sqrt();
    for (got, want) in values.iter().zip([2.0 - s, 2.0, 2.0 + s]) {
        assert!(close(*got, Complex::real(want)), "{values:?}");
    }
    assert_eigenpairs(&a, &values, &a.eigenvectors(&values).unwrap());
}

#[test]
fn test_repeated_eigenvalue_gets_orthogonal_vectors() {
    let a = Matrix::identity(2, 2).unwrap();
    let values = a.eigenvalues().unwrap();
    assert_eq!(values, vec![Complex::ONE, Complex::ONE]);
    let vectors = a.eigenvectors(&values).unwrap();
    assert_eigenpairs(&a, &values, &vectors);
    let overlap = vectors.get(0, 0).unwrap() * vectors.get(0, 1).unwrap()
        + vectors.get(1, 0).unwrap() * vectors.get(1, 1).unwrap();
    assert!(overlap.norm() < 1e-9);
}

#[test]
fn test_triangular_and_trivial_shapes() {
    let a = m(3, 3, &[1.0, 5.0, 7.0, 0.0, 3.0, 2.0, 0.0, 0.0, -2.0]);
    let values = a.eigenvalues().unwrap();
    assert_eq!(values, vec![Complex::real(-2.0), Complex::real(1.0), Complex::real(3.0)]);
    assert_eq!(m(1, 1, &[4.0]).eigenvalues().unwrap(), vec![Complex::real(4.0)]);
    assert_eq!(Matrix::empty().eigenvalues().unwrap(), Vec::new());
}

#[test]
fn test_non_square_rejected() {
    let err = m(1, 2, &[1.0, 2.0]).eigenvalues().unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::DimensionMismatch { .. }));
}
