use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    conic::Conic,
    error::{ConicError, Result},
    geometry::{circle::Circle, line::InfiniteLine},
    intersect::{intersect_curves, PointMembership, ToConic},
    r2::R2,
    tolerance::Tolerance,
};

/// Points equidistant from `focus` and `directrix`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParabola")]
pub struct Parabola {
    pub focus: R2<f64>,
    pub directrix: InfiniteLine,
}

#[derive(Deserialize)]
struct RawParabola {
    focus: R2<f64>,
    directrix: InfiniteLine,
}

impl TryFrom<RawParabola> for Parabola {
    type Error = ConicError;
    fn try_from(raw: RawParabola) -> Result<Self> {
        Parabola::new(raw.focus, raw.directrix)
    }
}

impl Parabola {
    /// Rejects a focus within the default epsilon (1e-10) of the directrix; see [`Parabola::with_tolerance`].
    pub fn new(focus: R2<f64>, directrix: InfiniteLine) -> Result<Self> {
        Parabola::with_tolerance(focus, directrix, Tolerance::default())
    }

    /// Rejects a focus within `tol` of the directrix.
    pub fn with_tolerance(focus: R2<f64>, directrix: InfiniteLine, tol: Tolerance) -> Result<Self> {
        if !focus.x.is_finite() || !focus.y.is_finite() {
            return Err(ConicError::InvalidShape(format!("parabola focus {} is not finite", focus)));
        }
        if tol.is_zero(directrix.distance_to(&focus)) {
            return Err(ConicError::InvalidShape(format!("parabola focus {} lies on its directrix", focus)));
        }
        Ok(Parabola { focus, directrix })
    }

    /// Midpoint between the focus and its foot on the directrix.
    pub fn vertex(&self) -> R2<f64> {
        (self.focus + self.directrix.closest_point_to_point(&self.focus)) / 2.
    }

    pub fn intersect_with_circle(&self, circle: &Circle, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        intersect_curves(self, circle, tol)
    }

    pub fn intersect_with_conic(&self, conic: &Conic, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        intersect_curves(self, conic, tol)
    }
}

impl ToConic for Parabola {
    /// Expands `u·|p − focus|² = (a x + b y + c)²`, with `(a, b, c)` the directrix and `u = a² + b²`.
    fn to_conic(&self) -> Conic {
        let l = self.directrix.triple();
        let (a, b, c) = (l.x, l.y, l.z);
        let R2 { x: h, y: k } = self.focus;
        let u = a * a + b * b;
        Conic::new(
            u - a * a,
            -2. * a * b,
            u - b * b,
            -2. * u * h - 2. * a * c,
            -2. * u * k - 2. * b * c,
            u * (h * h + k * k) - c * c,
        )
    }
}

impl PointMembership for Parabola {
    fn is_point_on(&self, p: &R2<f64>, tol: Tolerance) -> bool {
        tol.numbers_are_equal(p.distance(&self.focus), self.directrix.distance_to(p))
    }
}

impl Display for Parabola {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Parabola({}, {})", self.focus, self.directrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersect::IntersectWithLine;
    use test_log::test;

    /// Focus (1, 1), directrix x + y = 0.
    fn parabola() -> Parabola {
        let directrix = InfiniteLine::new(R2::new(0., 0.), R2::new(-1., 1.)).unwrap();
        Parabola::new(R2::new(1., 1.), directrix).unwrap()
    }

    fn sorted(mut points: Vec<R2<f64>>) -> Vec<R2<f64>> {
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        points
    }

    #[test]
    fn validation() {
        let directrix = InfiniteLine::new(R2::new(0., 0.), R2::new(1., 0.)).unwrap();
        assert!(matches!(Parabola::new(R2::new(3., 0.), directrix), Err(ConicError::InvalidShape(_))));
        assert!(Parabola::new(R2::new(3., 1e-11), directrix).is_err());
        assert!(Parabola::new(R2::new(3., 1e-9), directrix).is_ok());
        let loose = Tolerance::new(1e-6);
        assert!(Parabola::with_tolerance(R2::new(3., 1e-9), directrix, loose).is_err());
        assert!(Parabola::with_tolerance(R2::new(3., 1e-3), directrix, loose).is_ok());
    }

    #[test]
    fn conic_coefficients() {
        let conic = parabola().to_conic();
        assert_relative_eq!(conic.a, 0.5, epsilon = 1e-12);
        assert_relative_eq!(conic.b, -1., epsilon = 1e-12);
        assert_relative_eq!(conic.c, 0.5, epsilon = 1e-12);
        assert_relative_eq!(conic.d, -2., epsilon = 1e-12);
        assert_relative_eq!(conic.e, -2., epsilon = 1e-12);
        assert_relative_eq!(conic.f, 2., epsilon = 1e-12);
    }

    #[test]
    fn vertex() {
        let p = parabola();
        assert_relative_eq!(p.vertex(), R2::new(0.5, 0.5), epsilon = 1e-15);
        assert!(p.is_point_on(&p.vertex(), Tolerance::default()));
    }

    #[test]
    fn secant() {
        let tol = Tolerance::default();
        let line = InfiniteLine::through(R2::new(0., 2.), R2::new(2., 0.)).unwrap();
        let points = sorted(parabola().intersect_with_line(&line, tol));
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0], R2::new(0., 2.), epsilon = 1e-10);
        assert_relative_eq!(points[1], R2::new(2., 0.), epsilon = 1e-10);
    }

    #[test]
    fn tangent() {
        let tol = Tolerance::default();
        let line = InfiniteLine::new(R2::new(0., 0.), R2::new(1., 0.)).unwrap();
        let points = parabola().intersect_with_line(&line, tol);
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0], R2::new(2., 0.), epsilon = 1e-10);
    }

    #[test]
    fn miss() {
        let line = InfiniteLine::new(R2::new(0., -0.5), R2::new(1., 0.)).unwrap();
        assert!(parabola().intersect_with_line(&line, Tolerance::default()).is_empty());
    }

    #[test]
    fn circle() {
        let tol = Tolerance::default();
        let circle = Circle::new(R2::new(2., 2.), 2.).unwrap();
        let points = parabola().intersect_with_circle(&circle, tol).unwrap();
        assert_eq!(points.len(), 2);
        for p in &points {
            assert!(parabola().is_point_on(p, tol) && circle.is_point_on(p, tol));
        }
    }

    #[test]
    fn conic() {
        // x-axis-symmetric parabola y² = 4x (focus (1, 0), directrix x = −1) against the circle x² + y² = 5:
        // x² + 4x − 5 = 0 → x = 1, y = ±2
        let tol = Tolerance::default();
        let directrix = InfiniteLine::new(R2::new(-1., 0.), R2::new(0., 1.)).unwrap();
        let p = Parabola::new(R2::new(1., 0.), directrix).unwrap();
        let circle = Conic::new(1., 0., 1., 0., 0., -5.);
        let mut points = p.intersect_with_conic(&circle, tol).unwrap();
        points.sort_by(|a, b| a.y.total_cmp(&b.y));
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0], R2::new(1., -2.), epsilon = 1e-10);
        assert_relative_eq!(points[1], R2::new(1., 2.), epsilon = 1e-10);
    }
}
