use std::{f64::consts::{FRAC_PI_2, PI}, fmt::{self, Display, Formatter}};

use log::debug;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{
    conic::{split::split_degenerate, Conic},
    error::{ConicError, Result},
    geometry::{circle::Circle, line::InfiniteLine},
    intersect::{intersect_curves, PointMembership, ToConic},
    math::{bisect::{bisect, Bisection}, mat3::{adjugate, skew, V3}},
    r2::R2,
    tolerance::Tolerance,
};

/// Ellipse centered at `c`, with semi-axes `a` (along the rotated x-axis) and `b`, rotated counterclockwise by `t`.
///
/// `t` is stored modulo π, since an ellipse is symmetric under a half-turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEllipse")]
pub struct Ellipse {
    pub c: R2<f64>,
    pub a: f64,
    pub b: f64,
    pub t: f64,
}

#[derive(Deserialize)]
struct RawEllipse {
    c: R2<f64>,
    a: f64,
    b: f64,
    #[serde(default)]
    t: f64,
}

impl TryFrom<RawEllipse> for Ellipse {
    type Error = ConicError;
    fn try_from(raw: RawEllipse) -> Result<Self> {
        Ellipse::new(raw.c, raw.a, raw.b, raw.t)
    }
}

fn sign(x: f64) -> f64 {
    if x < 0. { -1. } else { 1. }
}

impl Ellipse {
    pub fn new(c: R2<f64>, a: f64, b: f64, t: f64) -> Result<Self> {
        if !c.x.is_finite() || !c.y.is_finite() {
            return Err(ConicError::InvalidShape(format!("ellipse center {} is not finite", c)));
        }
        if !a.is_finite() || !b.is_finite() || a <= 0. || b <= 0. {
            return Err(ConicError::InvalidShape(format!("ellipse semi-axes ({}, {}) must be finite and positive", a, b)));
        }
        if !t.is_finite() {
            return Err(ConicError::InvalidShape(format!("ellipse rotation {} is not finite", t)));
        }
        Ok(Ellipse { c, a, b, t: t.rem_euclid(PI) })
    }

    /// Point at parameter `theta`: `c + R(t)·(a cos θ, b sin θ)`.
    pub fn point_at(&self, theta: f64) -> R2<f64> {
        let (sin, cos) = theta.sin_cos();
        self.c + R2::new(self.a * cos, self.b * sin).rotate(self.t)
    }

    /// Nearest point of the ellipse to `p`.
    ///
    /// Moves `p` into the frame where the ellipse is axis-aligned with its major axis along x, reflects it into the first
    /// quadrant, and solves there: on an axis in closed form, otherwise by bisecting for the root of
    ///
    /// ```text
    /// f(s) = (e₀y₀ / (s + e₀²))² + (e₁y₁ / (s + e₁²))² − 1
    /// ```
    ///
    /// which is strictly decreasing on the bracket used.
    pub fn closest_point_to_point(&self, p: &R2<f64>) -> R2<f64> {
        let (e0, e1, beta) = if self.a >= self.b {
            (self.a, self.b, self.t)
        } else {
            (self.b, self.a, self.t + FRAC_PI_2)
        };
        let y = (*p - self.c).rotate(-beta);
        let (s0, s1) = (sign(y.x), sign(y.y));
        let (y0, y1) = (y.x.abs(), y.y.abs());
        let (e0_2, e1_2) = (e0 * e0, e1 * e1);
        let (x0, x1) = if y1 > 0. {
            if y0 > 0. {
                let (z0, z1) = (e0 * y0, e1 * y1);
                let f = |s: f64| {
                    let r0 = z0 / (s + e0_2);
                    let r1 = z1 / (s + e1_2);
                    r0 * r0 + r1 * r1 - 1.
                };
                let bracket = Bisection::new(-e1_2 + z1, -e1_2 + (z0 * z0 + z1 * z1).sqrt());
                let s = bisect(f, bracket);
                (e0_2 * y0 / (s + e0_2), e1_2 * y1 / (s + e1_2))
            } else {
                (0., e1)
            }
        } else {
            let numerator = e0_2 - e1_2;
            if y0 < numerator / e0 {
                let x0 = e0_2 * y0 / numerator;
                let ratio = x0 / e0;
                (x0, e1 * (1. - ratio * ratio).sqrt())
            } else {
                (e0, 0.)
            }
        };
        R2::new(x0 * s0, x1 * s1).rotate(beta) + self.c
    }

    /// Point of the ellipse nearest to `line`, found among the two points whose tangents are parallel to it.
    ///
    /// In the dual plane, tangent lines of the ellipse form the conic `adj(Q)`. Tangents parallel to `line` pass through
    /// its point at infinity `p∞`; restricting `adj(Q)` to the pencil of lines through `p∞` gives the degenerate
    /// `[p∞]×ᵗ adj(Q) [p∞]×`, which splits into those two tangents. Their poles `adj(Q)·g`, `adj(Q)·h` are the points of
    /// tangency. A line crossing the ellipse gets the nearer of the two as well; its distance is not zero.
    pub fn closest_point_to_line(&self, line: &InfiniteLine, tol: Tolerance) -> Result<R2<f64>> {
        let q = self.to_conic().as_matrix();
        let dual = adjugate(&q);
        let l = line.triple();
        let at_infinity = V3::new(-l.y, l.x, 0.);
        let m = skew(&at_infinity);
        let tangents = m.transpose() * dual * m;
        let (g, h) = split_degenerate(&tangents, tol)?;
        let points: Vec<R2<f64>> = [g, h]
            .iter()
            .filter_map(|tangent| R2::from_homogeneous(&(dual * tangent)))
            .collect();
        debug!("closest_point_to_line: tangent points {:?}", points);
        points
            .into_iter()
            .min_by_key(|p| OrderedFloat(line.distance_to(p)))
            .ok_or(ConicError::NotSplittable)
    }

    pub fn intersect_with_circle(&self, circle: &Circle, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        intersect_curves(self, circle, tol)
    }

    pub fn intersect_with_ellipse(&self, other: &Ellipse, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        intersect_curves(self, other, tol)
    }

    pub fn intersect_with_conic(&self, conic: &Conic, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        intersect_curves(self, conic, tol)
    }
}

impl ToConic for Ellipse {
    fn to_conic(&self) -> Conic {
        let Ellipse { c: R2 { x: h, y: k }, a, b, t } = *self;
        let (sin, cos) = t.sin_cos();
        let sin2 = (2. * t).sin();
        let (a2, b2) = (a * a, b * b);
        let ca = (a * sin).powi(2) + (b * cos).powi(2);
        let cb = (b2 - a2) * sin2;
        let cc = (a * cos).powi(2) + (b * sin).powi(2);
        let cd = (a2 - b2) * k * sin2 - 2. * h * ca;
        let ce = (a2 - b2) * h * sin2 - 2. * k * cc;
        let cf = (a2 * h * h + b2 * k * k) * sin * sin
            + (a2 * k * k + b2 * h * h) * cos * cos
            + h * k * (b2 - a2) * sin2
            - a2 * b2;
        Conic::new(ca, cb, cc, cd, ce, cf)
    }
}

impl PointMembership for Ellipse {
    /// Canonical form in the ellipse's own frame: `u²/a² + v²/b² = 1`.
    fn is_point_on(&self, p: &R2<f64>, tol: Tolerance) -> bool {
        let R2 { x: u, y: v } = (*p - self.c).rotate(-self.t);
        let value = (u / self.a).powi(2) + (v / self.b).powi(2) - 1.;
        tol.is_zero(value)
    }
}

impl Display for Ellipse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Ellipse({}, {:.3}, {:.3}, {:.3})", self.c, self.a, self.b, self.t)
    }
}
