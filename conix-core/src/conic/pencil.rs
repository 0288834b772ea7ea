//! Conic–conic intersection through the pencil `Q1 + λ Q2`.
//!
//! Every conic of the pencil passes through the (up to four) common points of `Q1` and `Q2`. A degenerate member
//! (`det(Q1 + λ Q2) = 0`) is a pair of lines, so intersecting those lines with `Q1` and `Q2` recovers the common points.
//! All of this happens in the [`Frame`] of the tighter curve, where rank decisions at a fixed epsilon hold up far from
//! the origin too.

use std::cmp::Reverse;

use log::debug;
use ordered_float::OrderedFloat;

use crate::{
    conic::{frame::Frame, line::intersect_line_conic},
    error::{ConicError, Result},
    math::mat3::{adjugate, column, largest_abs_element, rank, real_eigenvalues, row, skew, M3, V3},
    r2::R2,
    tolerance::Tolerance,
};

/// Whether two conic matrices describe the same curve: equal up to a (possibly negative) scale factor.
pub fn proportional(q1: &M3, q2: &M3, tol: Tolerance) -> bool {
    let (n1, n2) = (q1.norm(), q2.norm());
    if n1 == 0. || n2 == 0. {
        return n1 == n2;
    }
    let (u, v) = (q1 / n1, q2 / n2);
    let same = |d: M3| d.iter().all(|x| tol.is_zero(*x));
    same(u - v) || same(u + v)
}

/// Degenerate members of the pencil to try, most promising first.
///
/// A singular `Q2` is itself the degenerate member at `λ = ∞`. Otherwise the finite degenerate members sit at the real
/// eigenvalues of `Q1 (−Q2)⁻¹`; the largest is tried first, the rest serve as fallbacks when rounding leaves the first
/// one numerically nondegenerate.
fn degenerate_members(q1: &M3, q2: &M3, tol: Tolerance) -> Result<Vec<M3>> {
    if rank(q2, tol.epsilon) < 3 {
        debug!("pencil: Q2 is singular, using it as the degenerate member");
        return Ok(vec![*q2]);
    }
    let Some(inverse) = (-q2).try_inverse() else {
        return Ok(vec![*q2]);
    };
    let j = q1 * inverse;
    let mut eigenvalues = real_eigenvalues(&j, tol);
    if eigenvalues.is_empty() {
        return Err(ConicError::NoRealEigenvalues);
    }
    eigenvalues.sort_by_key(|λ| Reverse(OrderedFloat(*λ)));
    debug!("pencil: eigenvalues {:?}", eigenvalues);
    Ok(eigenvalues.into_iter().map(|λ| q1 + q2 * λ).collect())
}

/// The line(s) making up a degenerate conic, or `None` when `c` is not (numerically) degenerate or is identically zero.
pub fn degenerate_lines(c: &M3, tol: Tolerance) -> Option<Vec<V3>> {
    let c_rank = rank(c, tol.epsilon);
    let c = match c_rank {
        0 => return None,
        1 => *c,
        2 => {
            let adj = adjugate(c);
            let entry = largest_abs_element(&adj);
            let scale = entry.value.abs().sqrt();
            let p = column(&adj, entry.col).map(|x| tol.clamp_to_zero(x / scale));
            c + skew(&p)
        }
        _ => return None,
    };
    let entry = largest_abs_element(&c);
    let l = row(&c, entry.row);
    let m = column(&c, entry.col);
    let (ln, mn) = (l / l.norm(), m / m.norm());
    let lines = if tol.vectors_are_equal(&ln, &mn) || tol.vectors_are_equal(&ln, &-mn) {
        vec![l]
    } else {
        vec![l, m]
    };
    debug!("pencil: rank {} member splits into {:?}", c_rank, lines.iter().map(|l| l.as_slice().to_vec()).collect::<Vec<_>>());
    Some(lines)
}

/// Polish a candidate common point with a few Newton steps on `(pᵀQ1p, pᵀQ2p) = 0`.
///
/// Points where the curves meet tangentially (near-parallel gradients) are returned as is, as is any point whose
/// correction would move it further than `√ε` relative to its magnitude.
fn refine(q1: &M3, q2: &M3, p: R2<f64>, tol: Tolerance) -> R2<f64> {
    let limit = tol.epsilon.sqrt();
    let mut p = p;
    for _ in 0..3 {
        let h = p.homogeneous();
        let (g1, g2) = (q1 * h, q2 * h);
        let (f1, f2) = (h.dot(&g1), h.dot(&g2));
        let (g1, g2) = (R2::new(2. * g1.x, 2. * g1.y), R2::new(2. * g2.x, 2. * g2.y));
        let det = g1.x * g2.y - g1.y * g2.x;
        let norms = g1.norm() * g2.norm();
        if norms == 0. || det.abs() <= limit * norms {
            break;
        }
        let step = R2::new((f2 * g1.y - f1 * g2.y) / det, (f1 * g2.x - f2 * g1.x) / det);
        if !(step.norm() <= limit * p.x.abs().max(p.y.abs()).max(1.)) {
            break;
        }
        p = p + step;
        if step.x == 0. && step.y == 0. {
            break;
        }
    }
    p
}

/// Common points of two conic matrices that pass `accept`.
///
/// Proportional matrices fail with [`ConicError::Coincident`]; a pencil whose characteristic cubic has no real root
/// fails with [`ConicError::NoRealEigenvalues`]. Disjoint conics yield `Ok` with no points.
pub fn intersect_conics<F>(q1: &M3, q2: &M3, tol: Tolerance, accept: F) -> Result<Vec<R2<f64>>>
where
    F: Fn(&R2<f64>) -> bool,
{
    if proportional(q1, q2, tol) {
        return Err(ConicError::Coincident);
    }
    let frame = Frame::around_pair(q1, q2, tol);
    let (Some(f1), Some(f2)) = (frame.normalized(q1), frame.normalized(q2)) else {
        debug!("pencil: zero conic, no points");
        return Ok(vec![]);
    };
    debug!("pencil: {:?}", frame);
    for member in degenerate_members(&f1, &f2, tol)? {
        let Some(lines) = degenerate_lines(&member, tol) else {
            debug!("pencil: member is not degenerate, skipping");
            continue;
        };
        let mut candidates = vec![];
        for line in lines {
            let n = line / line.norm();
            if tol.is_zero(n.x) && tol.is_zero(n.y) {
                debug!("pencil: skipping line at infinity");
                continue;
            }
            candidates.extend(intersect_line_conic(&f1, &line, tol));
            candidates.extend(intersect_line_conic(&f2, &line, tol));
        }
        let points: Vec<R2<f64>> = candidates
            .into_iter()
            .map(|p| frame.to_original(refine(&f1, &f2, p, tol)))
            .filter(|p| accept(p))
            .collect();
        let points = tol.select_distinct(points);
        debug!("pencil: {} point(s) {:?}", points.len(), points);
        if !points.is_empty() {
            return Ok(points);
        }
    }
    Ok(vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn circle(h: f64, k: f64, r: f64) -> M3 {
        M3::new(
            1., 0., -h,
            0., 1., -k,
            -h, -k, h * h + k * k - r * r,
        )
    }

    fn on(q: &M3, p: &R2<f64>) -> f64 {
        let v = p.homogeneous();
        (v.transpose() * q * v)[(0, 0)]
    }

    #[test]
    fn two_circles() {
        let (q1, q2) = (circle(0., 0., 1.), circle(1., 0., 1.));
        let tol = Tolerance::default();
        let mut points = intersect_conics(&q1, &q2, tol, |p| tol.is_zero(on(&q1, p)) && tol.is_zero(on(&q2, p))).unwrap();
        points.sort_by(|a, b| a.y.total_cmp(&b.y));
        assert_eq!(points.len(), 2);
        let h = 3f64.sqrt() / 2.;
        assert_relative_eq!(points[0], R2::new(0.5, -h), epsilon = 1e-10);
        assert_relative_eq!(points[1], R2::new(0.5, h), epsilon = 1e-10);
    }

    #[test]
    fn far_from_origin() {
        let tol = Tolerance::default();
        let on_circle = |c: R2<f64>, r: f64| move |p: &R2<f64>| tol.is_zero(p.distance(&c) - r);
        let pairs = [
            ((R2::new(1000., 1000.), 10.), (R2::new(1010., 1000.), 10.)),
            ((R2::new(-769., 885.), 546.), (R2::new(255., 526.), 900.)),
            ((R2::new(-95., -476.), 975.), (R2::new(796., 423.), 355.)),
        ];
        for ((c1, r1), (c2, r2)) in pairs {
            let (a, b) = (on_circle(c1, r1), on_circle(c2, r2));
            let mut points =
                intersect_conics(&circle(c1.x, c1.y, r1), &circle(c2.x, c2.y, r2), tol, |p| a(p) && b(p)).unwrap();
            assert_eq!(points.len(), 2, "{:?}", points);
            if c1 == R2::new(1000., 1000.) {
                points.sort_by(|a, b| a.y.total_cmp(&b.y));
                let h = 75f64.sqrt();
                assert_relative_eq!(points[0], R2::new(1005., 1000. - h), epsilon = 1e-9);
                assert_relative_eq!(points[1], R2::new(1005., 1000. + h), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn disjoint_circles() {
        let (q1, q2) = (circle(0., 0., 1.), circle(5., 0., 1.));
        let tol = Tolerance::default();
        let points = intersect_conics(&q1, &q2, tol, |p| tol.is_zero(on(&q1, p)) && tol.is_zero(on(&q2, p))).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn coincident() {
        let q = circle(1., 2., 3.);
        assert_eq!(intersect_conics(&q, &(q * -2.), Tolerance::default(), |_| true), Err(ConicError::Coincident));
    }

    #[test]
    fn proportionality() {
        let tol = Tolerance::default();
        let q = circle(1., 2., 3.);
        assert!(proportional(&q, &(q * 4.), tol));
        assert!(proportional(&q, &(q * -0.5), tol));
        assert!(!proportional(&q, &circle(1., 2., 3.1), tol));
    }

    #[test]
    fn singular_second_conic() {
        // unit circle against the line pair x² − y² = 0 (y = ±x)
        let q1 = circle(0., 0., 1.);
        let q2 = M3::from_diagonal(&V3::new(1., -1., 0.));
        let tol = Tolerance::default();
        let points = intersect_conics(&q1, &q2, tol, |p| tol.is_zero(on(&q1, p)) && tol.is_zero(on(&q2, p))).unwrap();
        assert_eq!(points.len(), 4);
        let r = std::f64::consts::FRAC_1_SQRT_2;
        for p in points {
            assert_relative_eq!(p.x.abs(), r, epsilon = 1e-10);
            assert_relative_eq!(p.y.abs(), r, epsilon = 1e-10);
        }
    }

    #[test]
    fn line_pair_members() {
        let tol = Tolerance::default();
        // y = ±x
        let lines = degenerate_lines(&M3::from_diagonal(&V3::new(1., -1., 0.)), tol).unwrap();
        assert_eq!(lines.len(), 2);
        // double line x = 1
        let g = V3::new(1., 0., -1.);
        let lines = degenerate_lines(&(g * g.transpose()), tol).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].cross(&g).norm() < 1e-12);
        assert_eq!(degenerate_lines(&circle(0., 0., 1.), tol), None);
        assert_eq!(degenerate_lines(&M3::zeros(), tol), None);
    }
}
