//! Intersection of a conic (symmetric matrix) with a line (coefficient triple), without solving a quadratic in
//! affine coordinates.
//!
//! With `L = [l]×`, the points of the line are exactly `L y` for arbitrary `y`, so `B = Lᵗ Q L` restricted to the line
//! is the conic's quadratic form there. `B` is symmetric of rank ≤ 2; adding the right multiple of the (antisymmetric)
//! `L` makes it rank 1, `P = p qᵗ`, and `p`, `q` are the two intersection points.

use log::debug;

use crate::{
    conic::frame::Frame,
    math::mat3::{column, largest_abs_element, rank, row, skew, M3, V3},
    r2::R2,
    tolerance::Tolerance,
};

/// Homogeneous coordinate used to build the 2×2 minor: prefer `l₃`, then `l₁`, then `l₂`.
fn pivot(l: &V3, tol: Tolerance) -> usize {
    if !tol.is_zero(l.z) {
        2
    } else if !tol.is_zero(l.x) {
        0
    } else {
        1
    }
}

/// Affine points where the line `l` meets the conic `q`: 0, 1 (tangency) or 2 points.
///
/// Candidates are not checked against either curve here; callers filter with their own membership predicates.
pub fn intersect_line_conic(q: &M3, l: &V3, tol: Tolerance) -> Vec<R2<f64>> {
    if tol.is_zero(l.x) && tol.is_zero(l.y) {
        debug!("intersect_line_conic: line at infinity {:?}", l.as_slice());
        return vec![];
    }
    let frame = Frame::along_line(q, l, tol);
    let Some(q) = frame.normalized(q) else {
        return vec![];
    };
    let l = frame.matrix().transpose() * l;
    let l = l / l.xy().norm();
    debug!("intersect_line_conic: {:?}", frame);
    let points = intersect_in_frame(&q, &l, tol)
        .into_iter()
        .map(|p| frame.to_original(p))
        .collect();
    tol.select_distinct(points)
}

fn intersect_in_frame(q: &M3, l: &V3, tol: Tolerance) -> Vec<R2<f64>> {
    let m = skew(l);
    let b = m.transpose() * q * m;
    let b_rank = rank(&b, tol.epsilon);
    let p = if b_rank >= 2 {
        let i = pivot(l, tol);
        let (j, k) = match i {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };
        let b_jj = tol.clamp_to_zero(b[(j, j)]);
        let b_kk = tol.clamp_to_zero(b[(k, k)]);
        let b_jk = tol.clamp_to_zero(b[(j, k)]);
        let det = tol.clamp_to_zero(b_jj * b_kk - b_jk * b_jk);
        if det > 0. {
            debug!("intersect_line_conic: minor det {:e} > 0, no real intersection", det);
            return vec![];
        }
        let alpha = (-det).sqrt() / l[i];
        b + m * alpha
    } else {
        b
    };
    let entry = largest_abs_element(&p);
    debug!("intersect_line_conic: rank(B) {}, largest |P| entry {:?}", b_rank, entry);
    if entry.value == 0. {
        // line contained in a degenerate conic, or nothing to extract
        return vec![];
    }
    let candidates = [row(&p, entry.row), column(&p, entry.col)];
    let points = candidates
        .iter()
        .filter_map(|v| {
            let v = v / v.norm();
            if tol.is_zero(v.z) {
                debug!("intersect_line_conic: dropping point at infinity {:?}", v.as_slice());
                None
            } else {
                R2::from_homogeneous(&v)
            }
        })
        .collect();
    tol.select_distinct(points)
}
