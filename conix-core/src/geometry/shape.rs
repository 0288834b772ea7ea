use derive_more::{Display, From};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    conic::Conic,
    error::{ConicError, Result},
    geometry::{circle::Circle, ellipse::Ellipse, line::InfiniteLine, parabola::Parabola},
    intersect::{intersect_curves, Curve, IntersectWithLine, PointMembership},
    r2::R2,
    tolerance::Tolerance,
};

#[derive(Debug, Display, Clone, Copy, From, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Shape {
    Line(InfiniteLine),
    Circle(Circle),
    Ellipse(Ellipse),
    Parabola(Parabola),
    Conic(Conic),
}

pub fn line(px: f64, py: f64, dx: f64, dy: f64) -> Result<Shape> {
    Ok(Shape::Line(InfiniteLine::new(R2::new(px, py), R2::new(dx, dy))?))
}
pub fn circle(cx: f64, cy: f64, r: f64) -> Result<Shape> {
    Ok(Shape::Circle(Circle::new(R2::new(cx, cy), r)?))
}
pub fn ellipse(cx: f64, cy: f64, a: f64, b: f64, t: f64) -> Result<Shape> {
    Ok(Shape::Ellipse(Ellipse::new(R2::new(cx, cy), a, b, t)?))
}
pub fn parabola(focus: R2<f64>, directrix: InfiniteLine) -> Result<Shape> {
    Ok(Shape::Parabola(Parabola::new(focus, directrix)?))
}
pub fn conic(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Shape {
    Shape::Conic(Conic::new(a, b, c, d, e, f))
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Line(_) => "Line",
            Shape::Circle(_) => "Circle",
            Shape::Ellipse(_) => "Ellipse",
            Shape::Parabola(_) => "Parabola",
            Shape::Conic(_) => "Conic",
        }
    }

    /// The shape as a degree-2 curve; `None` for lines.
    pub fn curve(&self) -> Option<&dyn Curve> {
        match self {
            Shape::Line(_) => None,
            Shape::Circle(c) => Some(c as &dyn Curve),
            Shape::Ellipse(e) => Some(e as &dyn Curve),
            Shape::Parabola(p) => Some(p as &dyn Curve),
            Shape::Conic(c) => Some(c as &dyn Curve),
        }
    }

    pub fn to_conic(&self) -> Option<Conic> {
        self.curve().map(|c| c.to_conic())
    }

    pub fn is_point_on(&self, p: &R2<f64>, tol: Tolerance) -> bool {
        match self {
            Shape::Line(l) => l.is_point_on(p, tol),
            _ => self.curve().is_some_and(|c| c.is_point_on(p, tol)),
        }
    }

    /// Common points of two shapes.
    ///
    /// Lines go through the line-specific paths (a 2×2 solve against another line, the line–conic intersector against a
    /// curve); any other pair goes through the pencil of their conics. Overlapping lines and identical curves fail with
    /// [`ConicError::Coincident`].
    pub fn intersect(&self, other: &Shape, tol: Tolerance) -> Result<Vec<R2<f64>>> {
        debug!("intersect: {} ∩ {}", self, other);
        match (self, other) {
            (Shape::Line(a), Shape::Line(b)) => match a.intersect_with_line(b, tol) {
                Some(p) => Ok(vec![p]),
                None if a.is_point_on(&b.point, tol) => Err(ConicError::Coincident),
                None => Ok(vec![]),
            },
            (Shape::Line(line), shape) | (shape, Shape::Line(line)) => {
                Ok(shape.curve().map(|curve| curve.intersect_with_line(line, tol)).unwrap_or_default())
            }
            (a, b) => match (a.curve(), b.curve()) {
                (Some(a), Some(b)) => intersect_curves(a, b, tol),
                _ => Ok(vec![]),
            },
        }
    }

    /// Nearest point of the shape to `p`, for shapes that support it (lines, circles, ellipses).
    pub fn closest_point_to_point(&self, p: &R2<f64>) -> Option<R2<f64>> {
        match self {
            Shape::Line(l) => Some(l.closest_point_to_point(p)),
            Shape::Circle(c) => Some(c.closest_point_to_point(p)),
            Shape::Ellipse(e) => Some(e.closest_point_to_point(p)),
            Shape::Parabola(_) | Shape::Conic(_) => None,
        }
    }

    /// Point of the shape nearest to `line`, for ellipses and circles; `Ok(None)` for other shapes.
    pub fn closest_point_to_line(&self, line: &InfiniteLine, tol: Tolerance) -> Result<Option<R2<f64>>> {
        let ellipse = match self {
            Shape::Ellipse(e) => *e,
            Shape::Circle(c) => Ellipse::new(c.c, c.r, c.r, 0.)?,
            _ => return Ok(None),
        };
        ellipse.closest_point_to_line(line, tol).map(Some)
    }
}
