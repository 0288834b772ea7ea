//! Epsilon-based numeric comparisons.
//!
//! Every comparison-sensitive operation in this crate takes a [`Tolerance`] argument instead of consulting a global, so that
//! callers can tighten or loosen precision per query (and tests can do so without affecting each other).

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::r2::R2;

pub const DEFAULT_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub epsilon: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance { epsilon: DEFAULT_EPSILON }
    }
}

impl Tolerance {
    pub const TIGHT: Tolerance = Tolerance { epsilon: 1e-12 };

    pub fn new(epsilon: f64) -> Self {
        Tolerance { epsilon }
    }

    pub fn is_zero(&self, x: f64) -> bool {
        x.abs() < self.epsilon
    }
    pub fn is_gt_zero(&self, x: f64) -> bool {
        x >= self.epsilon
    }
    pub fn is_lt_zero(&self, x: f64) -> bool {
        x <= -self.epsilon
    }
    pub fn numbers_are_equal(&self, x: f64, y: f64) -> bool {
        self.is_zero(x - y)
    }
    pub fn clamp_to_zero(&self, x: f64) -> f64 {
        if self.is_zero(x) { 0. } else { x }
    }
    pub fn points_are_equal(&self, p: &R2<f64>, q: &R2<f64>) -> bool {
        self.is_zero(p.x - q.x) && self.is_zero(p.y - q.y)
    }
    pub fn vectors_are_equal(&self, u: &Vector3<f64>, v: &Vector3<f64>) -> bool {
        self.is_zero(u.x - v.x) && self.is_zero(u.y - v.y) && self.is_zero(u.z - v.z)
    }

    /// Drop near-duplicate points, keeping the first occurrence of each.
    ///
    /// Quadratic in the number of points; only ever applied to intersection sets of at most a handful of points.
    pub fn select_distinct(&self, points: Vec<R2<f64>>) -> Vec<R2<f64>> {
        let mut distinct: Vec<R2<f64>> = Vec::with_capacity(points.len());
        for p in points {
            if !distinct.iter().any(|q| self.points_are_equal(&p, q)) {
                distinct.push(p);
            }
        }
        distinct
    }
}
