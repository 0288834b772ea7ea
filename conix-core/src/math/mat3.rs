//! 3×3 matrix primitives used by the conic routines, on top of `nalgebra`.

use itertools::iproduct;
use log::trace;
use nalgebra::{Matrix3, Vector3};
use roots::{find_roots_cubic, find_roots_quadratic};

use crate::tolerance::Tolerance;

pub type M3 = Matrix3<f64>;
pub type V3 = Vector3<f64>;

/// A matrix entry: `(row, column, value)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// `[v]×`, the matrix satisfying `[v]× w = v × w`.
pub fn skew(v: &V3) -> M3 {
    v.cross_matrix()
}

/// Transpose of the cofactor matrix; equals `det(m) · m⁻¹` when `m` is invertible, and is still defined when it isn't.
pub fn adjugate(m: &M3) -> M3 {
    let minor = |r0: usize, c0: usize, r1: usize, c1: usize| m[(r0, c0)] * m[(r1, c1)] - m[(r0, c1)] * m[(r1, c0)];
    M3::new(
         minor(1, 1, 2, 2), -minor(0, 1, 2, 2),  minor(0, 1, 1, 2),
        -minor(1, 0, 2, 2),  minor(0, 0, 2, 2), -minor(0, 0, 1, 2),
         minor(1, 0, 2, 1), -minor(0, 0, 2, 1),  minor(0, 0, 1, 1),
    )
}

/// Number of singular values above `epsilon`, relative to the largest one (or to 1, for matrices with small entries).
pub fn rank(m: &M3, epsilon: f64) -> usize {
    let singular_values = m.singular_values();
    let max = singular_values.max();
    let threshold = epsilon * max.max(1.);
    let rank = singular_values.iter().filter(|s| **s > threshold).count();
    trace!("rank: singular values {:?}, threshold {:e} → {}", singular_values.as_slice(), threshold, rank);
    rank
}

/// Entry with the largest absolute value; ties resolve to the first in row-major order.
pub fn largest_abs_element(m: &M3) -> Entry {
    let mut best = Entry { row: 0, col: 0, value: m[(0, 0)] };
    for row in 0..3 {
        for col in 0..3 {
            let value = m[(row, col)];
            if value.abs() > best.value.abs() {
                best = Entry { row, col, value };
            }
        }
    }
    best
}

/// First entry, in row-major order, that is not numerically zero.
pub fn first_nonvanishing(m: &M3, tol: Tolerance) -> Option<Entry> {
    iproduct!(0..3, 0..3)
        .map(|(row, col)| Entry { row, col, value: m[(row, col)] })
        .find(|e| !tol.is_zero(e.value))
}

pub fn row(m: &M3, i: usize) -> V3 {
    m.row(i).transpose()
}

pub fn column(m: &M3, j: usize) -> V3 {
    m.column(j).into_owned()
}

/// Real eigenvalues of `m`, as the real roots of its characteristic polynomial `λ³ − tr·λ² + m₂·λ − det`.
///
/// The closed-form cubic solver can lose a double root to rounding (reporting one real root where there are three,
/// two of them coincident); stationary points of the polynomial that are also numerical roots are added back.
pub fn real_eigenvalues(m: &M3, tol: Tolerance) -> Vec<f64> {
    let trace = m.trace();
    let principal_minors =
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]
        + m[(0, 0)] * m[(2, 2)] - m[(0, 2)] * m[(2, 0)]
        + m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)];
    let det = m.determinant();
    let mut eigenvalues = find_roots_cubic(1., -trace, principal_minors, -det).as_ref().to_vec();
    if eigenvalues.len() < 3 {
        let characteristic = |x: f64| ((x - trace) * x + principal_minors) * x - det;
        let scale = 1f64.max(trace.abs().powi(3)).max(principal_minors.abs().powf(1.5)).max(det.abs());
        let min_separation = tol.epsilon.sqrt();
        for x in find_roots_quadratic(3., -2. * trace, principal_minors).as_ref() {
            let x = *x;
            let is_root = characteristic(x).abs() < tol.epsilon * scale;
            let is_new = eigenvalues.iter().all(|e| (e - x).abs() > min_separation * x.abs().max(1.));
            if is_root && is_new {
                trace!("real_eigenvalues: recovered double root {}", x);
                eigenvalues.push(x);
            }
        }
    }
    eigenvalues
}
