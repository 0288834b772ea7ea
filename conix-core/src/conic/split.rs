use log::debug;

use crate::{
    error::{ConicError, Result},
    math::mat3::{adjugate, column, first_nonvanishing, largest_abs_element, row, skew, Entry, M3, V3},
    tolerance::Tolerance,
};

/// Split a degenerate conic `D ∝ g hᵗ + h gᵗ` (rank ≤ 2) into its two lines `(g, h)`.
///
/// `D` is rescaled to unit max-norm first, so the tolerance applies to its shape rather than its magnitude. A rank-2
/// matrix yields two distinct lines; a matrix whose adjugate vanishes on the diagonal (zero, double line, or anything
/// that isn't a line pair) fails with [`ConicError::NotSplittable`].
pub fn split_degenerate(d: &M3, tol: Tolerance) -> Result<(V3, V3)> {
    let scale = largest_abs_element(d).value.abs();
    if scale == 0. || !scale.is_finite() {
        return Err(ConicError::NotSplittable);
    }
    let d = d / scale;
    let adj = adjugate(&d);
    let i = (0..3).find(|&i| !tol.is_zero(adj[(i, i)])).ok_or(ConicError::NotSplittable)?;
    let p = column(&adj, i) / adj[(i, i)].abs().sqrt();
    let c = skew(&p) + d;
    let Entry { row: r, col, .. } = first_nonvanishing(&c, tol).ok_or(ConicError::NotSplittable)?;
    let g = row(&c, r);
    let h = column(&c, col);
    debug!("split_degenerate: adj diagonal {}, p {:?}, g {:?}, h {:?}", i, p.as_slice(), g.as_slice(), h.as_slice());
    Ok((g, h))
}
