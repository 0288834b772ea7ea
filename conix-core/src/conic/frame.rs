//! Translated, uniformly scaled coordinate frames for conic computations.
//!
//! Far from the origin a conic's matrix mixes entries of order one with a constant term of order `|c|²`, and rank
//! decisions taken at a fixed epsilon stop meaning anything. Moving the origin next to the curve and the unit length to
//! its extent brings every entry back to order one; points found there map back with [`Frame::to_original`].

use crate::{
    math::mat3::{M3, V3},
    r2::R2,
    tolerance::Tolerance,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: R2<f64>,
    pub scale: f64,
}

/// Center of a central conic (ellipse, circle, hyperbola), `None` for parabolas and other conics without one.
pub fn center(q: &M3, tol: Tolerance) -> Option<R2<f64>> {
    let (a, b, c) = (q[(0, 0)], q[(0, 1)], q[(1, 1)]);
    let quad = a.abs().max(b.abs()).max(c.abs());
    let det = a * c - b * b;
    if quad > 0. && det.abs() > tol.epsilon * quad * quad {
        Some(R2::new((b * q[(1, 2)] - c * q[(0, 2)]) / det, (b * q[(0, 2)] - a * q[(1, 2)]) / det))
    } else {
        None
    }
}

impl Frame {
    /// Frame at `origin`, with unit length matched to the extent of `q` around it (never below 1).
    pub fn sized(q: &M3, origin: R2<f64>) -> Frame {
        let shifted = Frame { origin, scale: 1. }.transform(q);
        let quad = shifted[(0, 0)].abs().max(shifted[(0, 1)].abs()).max(shifted[(1, 1)].abs());
        let scale = if quad > 0. {
            let linear = shifted[(0, 2)].abs().max(shifted[(1, 2)].abs()) / quad;
            let constant = (shifted[(2, 2)].abs() / quad).sqrt();
            1f64.max(linear).max(constant)
        } else {
            1.
        };
        Frame { origin, scale }
    }

    /// Origin at the foot of the conic's center on the line `l` (of the coordinate origin, for conics without a
    /// center).
    pub fn along_line(q: &M3, l: &V3, tol: Tolerance) -> Frame {
        let c = center(q, tol).unwrap_or(R2::new(0., 0.));
        let t = (l.x * c.x + l.y * c.y + l.z) / (l.x * l.x + l.y * l.y);
        Frame::sized(q, R2::new(c.x - t * l.x, c.y - t * l.y))
    }

    /// Frame of whichever central conic of the pair is tighter; the coordinate origin when neither has a center.
    pub fn around_pair(q1: &M3, q2: &M3, tol: Tolerance) -> Frame {
        [q1, q2]
            .into_iter()
            .filter_map(|q| center(q, tol).map(|c| Frame::sized(q, c)))
            .min_by(|a, b| a.scale.total_cmp(&b.scale))
            .unwrap_or_else(|| Frame::sized(q1, R2::new(0., 0.)))
    }

    /// Maps frame coordinates to the original ones.
    pub fn matrix(&self) -> M3 {
        let Frame { origin, scale } = *self;
        M3::new(
            scale, 0.,    origin.x,
            0.,    scale, origin.y,
            0.,    0.,    1.,
        )
    }

    /// `q` expressed in this frame.
    pub fn transform(&self, q: &M3) -> M3 {
        let t = self.matrix();
        t.transpose() * q * t
    }

    /// `q` expressed in this frame, divided by its largest entry; `None` for a zero or non-finite result.
    pub fn normalized(&self, q: &M3) -> Option<M3> {
        let q = self.transform(q);
        let q_max = q.amax();
        if q_max == 0. || !q_max.is_finite() {
            None
        } else {
            Some(q / q_max)
        }
    }

    pub fn to_original(&self, p: R2<f64>) -> R2<f64> {
        self.origin + p * self.scale
    }
}
