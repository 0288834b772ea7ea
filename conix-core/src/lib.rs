#![allow(mixed_script_confusables)]

#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

pub mod conic;
pub mod error;
pub mod geometry;
pub mod intersect;
pub mod math;
pub mod tolerance;

pub use geometry::circle;
pub use geometry::ellipse;
pub use geometry::line;
pub use geometry::parabola;
pub use geometry::r2;
pub use geometry::shape;

pub use circle::Circle;
pub use conic::Conic;
pub use ellipse::Ellipse;
pub use error::{ConicError, Result};
pub use intersect::{intersect_curves, CurveIntersect, IntersectWithLine, PointMembership, ToConic};
pub use line::InfiniteLine;
pub use parabola::Parabola;
pub use r2::R2;
pub use shape::Shape;
pub use tolerance::Tolerance;

/// Parse a log level string into LevelFilter; unrecognized levels fall back to `Info`.
pub fn parse_log_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("off") => log::LevelFilter::Off,
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("info") | Some("") | None => log::LevelFilter::Info,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        Some(level) => {
            log::warn!("invalid log level {:?}, using info", level);
            log::LevelFilter::Info
        }
    }
}
