use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    conic::Conic,
    error::{ConicError, Result},
    geometry::ellipse::Ellipse,
    intersect::{intersect_curves, PointMembership, ToConic},
    r2::R2,
    tolerance::Tolerance,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCircle")]
pub struct Circle {
    pub c: R2<f64>,
    pub r: f64,
}

#[derive(Deserialize)]
struct RawCircle {
    c: R2<f64>,
    r: f64,
}

impl TryFrom<RawCircle> for Circle {
    type Error = ConicError;
    fn try_from(raw: RawCircle) -> Result<Self> {
        Circle::new(raw.c, raw.r)
    }
}

impl Circle {
    pub fn new(c: R2<f64>, r: f64) -> Result<Self> {
        if !c.x.is_finite() || !c.y.is_finite() {
            return Err(ConicError::InvalidShape(format!("circle center {} is not finite", c)));
        }
        if !r.is_finite() || r <= 0. {
            return Err(ConicError::InvalidShape(format!("circle radius {} must be finite and positive", r)));
        }
        Ok(Circle { c, r })
    }

    /// Nearest point of the circle to `p`; for the center itself (equidistant from every point), the point at angle 0.
    pub fn closest_point_to_point(&self, p: &R2<f64>) -> R2<f64> {
        let offset = *p - self.c;
        let norm = offset.norm();
        if norm == 0. {
            self.c + R2::new(self.r, 0.)
        } else {
            self.c + offset * (self.r / norm)
        }
    }

    pub fn intersect_with_circle(&self, other: &Circle, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        intersect_curves(self, other, tol)
    }

    pub fn intersect_with_ellipse(&self, ellipse: &Ellipse, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        intersect_curves(self, ellipse, tol)
    }

    pub fn intersect_with_conic(&self, conic: &Conic, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        intersect_curves(self, conic, tol)
    }
}

impl ToConic for Circle {
    fn to_conic(&self) -> Conic {
        let R2 { x: h, y: k } = self.c;
        Conic::new(1., 0., 1., -2. * h, -2. * k, h * h + k * k - self.r * self.r)
    }
}

impl PointMembership for Circle {
    fn is_point_on(&self, p: &R2<f64>, tol: Tolerance) -> bool {
        tol.is_zero(p.distance(&self.c) - self.r)
    }
}

impl Display for Circle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Circle({}, {:.3})", self.c, self.r)
    }
}
