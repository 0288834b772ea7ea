use log::trace;
use serde::{Deserialize, Serialize};

/// Enough halvings to exhaust an `f64` bracket.
pub const DEFAULT_MAX_ITERATIONS: usize = 1074;
pub const DEFAULT_ROOT_TOLERANCE: f64 = 1e-15;

/// Bracket and stopping criteria for [`bisect`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bisection {
    pub lower: f64,
    pub upper: f64,
    pub max_iterations: usize,
    pub root_tolerance: f64,
}

impl Bisection {
    pub fn new(lower: f64, upper: f64) -> Self {
        Bisection {
            lower,
            upper,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            root_tolerance: DEFAULT_ROOT_TOLERANCE,
        }
    }
}

/// Root of `f` inside `[lower, upper]`, where `f` changes sign across the bracket.
///
/// Stops once the bracket is narrower than `root_tolerance`, `|f(mid)|` is below it, the midpoint stops moving, or after
/// `max_iterations` halvings; returns the last midpoint.
pub fn bisect<F: Fn(f64) -> f64>(f: F, params: Bisection) -> f64 {
    let Bisection { mut lower, mut upper, max_iterations, root_tolerance } = params;
    let f_lower = f(lower);
    if f_lower.abs() < root_tolerance {
        return lower;
    }
    let lower_positive = f_lower > 0.;
    let mut mid = (lower + upper) / 2.;
    for iteration in 0..max_iterations {
        mid = (lower + upper) / 2.;
        if mid == lower || mid == upper || upper - lower < root_tolerance {
            trace!("bisect: bracket collapsed after {} iterations at {}", iteration, mid);
            break;
        }
        let f_mid = f(mid);
        if f_mid.abs() < root_tolerance {
            trace!("bisect: root {} after {} iterations (f = {:e})", mid, iteration, f_mid);
            break;
        }
        if (f_mid > 0.) == lower_positive {
            lower = mid;
        } else {
            upper = mid;
        }
    }
    mid
}
