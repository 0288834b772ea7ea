//! The generalized conic `A x² + B x y + C y² + D x + E y + F = 0`, and its matrix form
//!
//! ```text
//!     ⎡ A   B/2 D/2 ⎤
//! Q = ⎢ B/2 C   E/2 ⎥
//!     ⎣ D/2 E/2 F   ⎦
//! ```
//!
//! over homogeneous points `(x, y, 1)`.

pub mod frame;
pub mod line;
pub mod pencil;
pub mod split;

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    geometry::line::InfiniteLine,
    intersect::PointMembership,
    math::mat3::M3,
    r2::R2,
    tolerance::Tolerance,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Conic {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Conic { a, b, c, d, e, f }
    }

    pub fn as_matrix(&self) -> M3 {
        let Conic { a, b, c, d, e, f } = *self;
        M3::new(
            a,      b / 2., d / 2.,
            b / 2., c,      e / 2.,
            d / 2., e / 2., f,
        )
    }

    /// Coefficients of the quadratic form `xᵗ Q x`; only the symmetric part of `q` contributes.
    pub fn from_matrix(q: &M3) -> Self {
        Conic {
            a: q[(0, 0)],
            b: q[(0, 1)] + q[(1, 0)],
            c: q[(1, 1)],
            d: q[(0, 2)] + q[(2, 0)],
            e: q[(1, 2)] + q[(2, 1)],
            f: q[(2, 2)],
        }
    }

    /// Value of the implicit equation at `p`; zero on the curve.
    pub fn evaluate(&self, p: &R2<f64>) -> f64 {
        let Conic { a, b, c, d, e, f } = *self;
        let R2 { x, y } = *p;
        a * x * x + b * x * y + c * y * y + d * x + e * y + f
    }

    pub fn is_point_on(&self, p: &R2<f64>, tol: Tolerance) -> bool {
        tol.is_zero(self.evaluate(p))
    }

    pub fn intersect_with_line(&self, line: &InfiniteLine, tol: Tolerance) -> Vec<R2<f64>> {
        line::intersect_line_conic(&self.as_matrix(), &line.triple(), tol)
            .into_iter()
            .filter(|p| line.is_point_on(p, tol) && self.is_point_on(p, tol))
            .collect()
    }

    pub fn intersect_with_conic(&self, other: &Conic, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        pencil::intersect_conics(
            &self.as_matrix(),
            &other.as_matrix(),
            tol,
            |p| self.is_point_on(p, tol) && other.is_point_on(p, tol),
        )
    }
}

impl Display for Conic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x² + {}xy + {}y² + {}x + {}y + {} = 0", self.a, self.b, self.c, self.d, self.e, self.f)
    }
}
