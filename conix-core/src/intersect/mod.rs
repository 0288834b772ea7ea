//! Capabilities shared by the curve types, and the one conic–conic intersection path they all reduce to.

use log::{debug, warn};

use crate::{
    conic::{line::intersect_line_conic, pencil::intersect_conics, Conic},
    error::Result,
    geometry::line::InfiniteLine,
    r2::R2,
    tolerance::Tolerance,
};

/// Curves with an implicit quadratic equation.
pub trait ToConic {
    fn to_conic(&self) -> Conic;
}

pub trait PointMembership {
    fn is_point_on(&self, p: &R2<f64>, tol: Tolerance) -> bool;
}

pub trait IntersectWithLine {
    fn intersect_with_line(&self, line: &InfiniteLine, tol: Tolerance) -> Vec<R2<f64>>;
}

/// Candidates from the line–conic intersector, kept when both the line and the curve's own membership test accept them.
impl<T: ToConic + PointMembership + ?Sized> IntersectWithLine for T {
    fn intersect_with_line(&self, line: &InfiniteLine, tol: Tolerance) -> Vec<R2<f64>> {
        intersect_line_conic(&self.to_conic().as_matrix(), &line.triple(), tol)
            .into_iter()
            .filter(|p| {
                let accepted = line.is_point_on(p, tol) && self.is_point_on(p, tol);
                if !accepted {
                    warn!("intersect_with_line: rejecting candidate {}", p);
                }
                accepted
            })
            .collect()
    }
}

/// Intersect two curves through their conic matrices, keeping only points that each curve's own membership test
/// accepts.
pub fn intersect_curves<A, B>(a: &A, b: &B, tol: Tolerance) -> Result<Vec<R2<f64>>>
where
    A: ToConic + PointMembership + ?Sized,
    B: ToConic + PointMembership + ?Sized,
{
    let (ca, cb) = (a.to_conic(), b.to_conic());
    debug!("intersect_curves: {} ∩ {}", ca, cb);
    let points = intersect_conics(&ca.as_matrix(), &cb.as_matrix(), tol, |p| {
        let accepted = a.is_point_on(p, tol) && b.is_point_on(p, tol);
        if !accepted {
            warn!("intersect_curves: rejecting candidate {} (on first: {}, on second: {})", p, a.is_point_on(p, tol), b.is_point_on(p, tol));
        }
        accepted
    })?;
    Ok(tol.select_distinct(points))
}

pub trait CurveIntersect: ToConic + PointMembership {
    fn intersect_with_curve<O: ToConic + PointMembership>(&self, other: &O, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        intersect_curves(self, other, tol)
    }
}

impl<T: ToConic + PointMembership + ?Sized> CurveIntersect for T {}

/// Object-safe bundle of the curve capabilities, for dispatch over heterogeneous shapes.
pub trait Curve: ToConic + PointMembership {}

impl<T: ToConic + PointMembership> Curve for T {}

impl ToConic for Conic {
    fn to_conic(&self) -> Conic {
        *self
    }
}

impl PointMembership for Conic {
    fn is_point_on(&self, p: &R2<f64>, tol: Tolerance) -> bool {
        tol.is_zero(self.evaluate(p))
    }
}

#[cfg(test)]
mod tests;
