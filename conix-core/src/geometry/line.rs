use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    conic::Conic,
    error::{ConicError, Result},
    geometry::circle::Circle,
    intersect::{IntersectWithLine, PointMembership},
    math::mat3::V3,
    r2::R2,
    tolerance::Tolerance,
};

/// Unbounded line through `point`, running along the unit vector `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInfiniteLine")]
pub struct InfiniteLine {
    pub point: R2<f64>,
    pub direction: R2<f64>,
}

#[derive(Deserialize)]
struct RawInfiniteLine {
    point: R2<f64>,
    direction: R2<f64>,
}

impl TryFrom<RawInfiniteLine> for InfiniteLine {
    type Error = ConicError;
    fn try_from(raw: RawInfiniteLine) -> Result<Self> {
        InfiniteLine::new(raw.point, raw.direction)
    }
}

impl InfiniteLine {
    pub fn new(point: R2<f64>, direction: R2<f64>) -> Result<Self> {
        let norm = direction.norm();
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(ConicError::InvalidShape(format!("line point {} is not finite", point)));
        }
        if norm == 0. || !norm.is_finite() {
            return Err(ConicError::InvalidShape(format!("line direction {} must be finite and nonzero", direction)));
        }
        Ok(InfiniteLine { point, direction: direction / norm })
    }

    /// Line `l₁ x + l₂ y + l₃ = 0`; the line at infinity (`l₁ = l₂ = 0`) is rejected.
    pub fn from_triple(l: &V3) -> Result<Self> {
        let normal = R2::new(l.x, l.y);
        let scale = normal.norm();
        if scale == 0. || !scale.is_finite() || !l.z.is_finite() {
            return Err(ConicError::InvalidShape(format!("line triple {:?} has no affine points", l.as_slice())));
        }
        let normal = normal / scale;
        let point = normal * (-l.z / scale);
        InfiniteLine::new(point, R2::new(normal.y, -normal.x))
    }

    /// Line through two distinct points, directed from `p` to `q`.
    pub fn through(p: R2<f64>, q: R2<f64>) -> Result<Self> {
        InfiniteLine::new(p, q - p)
    }

    /// Unit normal, pointing to the left of `direction`.
    pub fn normal(&self) -> R2<f64> {
        R2::new(-self.direction.y, self.direction.x)
    }

    /// Homogeneous coefficients `(l₁, l₂, l₃)`, with `(l₁, l₂)` the unit normal.
    pub fn triple(&self) -> V3 {
        let n = self.normal();
        V3::new(n.x, n.y, -n.dot(&self.point))
    }

    pub fn point_on_line(&self) -> R2<f64> {
        self.point
    }

    /// Positive to the left of `direction`, negative to the right.
    pub fn signed_distance_to(&self, p: &R2<f64>) -> f64 {
        self.normal().dot(&(*p - self.point))
    }

    pub fn distance_to(&self, p: &R2<f64>) -> f64 {
        self.signed_distance_to(p).abs()
    }

    pub fn closest_point_to_point(&self, p: &R2<f64>) -> R2<f64> {
        let along = self.direction.dot(&(*p - self.point));
        self.point + self.direction * along
    }

    /// Crossing point with another line; `None` for parallel (or coincident) lines.
    pub fn intersect_with_line(&self, other: &InfiniteLine, tol: Tolerance) -> Option<R2<f64>> {
        let denominator = self.direction.cross(&other.direction);
        if tol.is_zero(denominator) {
            return None;
        }
        let s = (other.point - self.point).cross(&other.direction) / denominator;
        Some(self.point + self.direction * s)
    }

    pub fn intersect_with_circle(&self, circle: &Circle, tol: Tolerance) -> Vec<R2<f64>> {
        circle.intersect_with_line(self, tol)
    }

    pub fn intersect_with_conic(&self, conic: &Conic, tol: Tolerance) -> Vec<R2<f64>> {
        conic.intersect_with_line(self, tol)
    }
}

impl PointMembership for InfiniteLine {
    fn is_point_on(&self, p: &R2<f64>, tol: Tolerance) -> bool {
        tol.is_zero(self.signed_distance_to(p))
    }
}

impl Display for InfiniteLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Line({} + t{})", self.point, self.direction)
    }
}
