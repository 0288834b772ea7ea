//! WASM bindings for conix.
//!
//! Exposes shape intersection and closest-point queries to JavaScript. Shapes are passed as plain objects in the same
//! tagged form the core crate serializes (`{ kind: "Circle", c: { x, y }, r }`), and points come back as `{ x, y }`.

use conix_core::{InfiniteLine, Shape, Tolerance, R2};
use log::{debug, error, info};
use serde::Deserialize;
use tsify::declare;
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

/// A point in the plane.
#[declare]
struct Point {
    pub x: f64,
    pub y: f64,
}

/// An infinite line through `point`, along `direction` (normalized on input).
#[declare]
struct Line {
    pub point: Point,
    pub direction: Point,
}

#[declare]
type Points = Vec<Point>;

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "off", "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty, null, or unrecognized.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) {
    let level: Option<String> = serde_wasm_bindgen::from_value(level).unwrap_or_default();
    let level = conix_core::parse_log_level(level.as_deref());
    log::set_max_level(level);
}

fn tolerance(epsilon: Option<f64>) -> Result<Tolerance, String> {
    match epsilon {
        None => Ok(Tolerance::default()),
        Some(e) if e > 0. => Ok(Tolerance::new(e)),
        Some(e) => Err(format!("epsilon must be positive, got {}", e)),
    }
}

fn parse<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

/// Closest-point query: a line when the object carries a `direction`, a point otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Query {
    Line { point: R2<f64>, direction: R2<f64> },
    Point(R2<f64>),
}

fn closest(shape: &Shape, query: Query, tol: Tolerance) -> Result<Option<R2<f64>>, String> {
    match query {
        Query::Line { point, direction } => {
            let line = InfiniteLine::new(point, direction).map_err(|e| format!("Invalid query line: {}", e))?;
            shape.closest_point_to_line(&line, tol).map_err(|e| e.to_string())
        }
        Query::Point(p) => Ok(shape.closest_point_to_point(&p)),
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

/// Computes the intersection points of two shapes.
///
/// # Arguments
/// * `a`, `b` - Shapes (`Line`, `Circle`, `Ellipse`, `Parabola` or `Conic`).
/// * `epsilon` - Optional comparison tolerance (default 1e-10).
///
/// # Returns
/// Array of distinct [`Points`]; empty when the shapes don't meet. Throws for invalid shapes and for shapes that
/// coincide (infinitely many common points).
#[wasm_bindgen]
pub fn intersect(a: JsValue, b: JsValue, epsilon: Option<f64>) -> Result<JsValue, JsValue> {
    let tol = tolerance(epsilon).map_err(|e| JsValue::from_str(&e))?;
    let a: Shape = parse(a, "first shape")?;
    let b: Shape = parse(b, "second shape")?;
    let points = a.intersect(&b, tol).map_err(|e| JsValue::from_str(&e.to_string()))?;
    debug!("intersect: {} ∩ {}: {:?}", a, b, points);
    to_js(&points)
}

/// Finds the point of a shape nearest to a query.
///
/// # Arguments
/// * `shape` - Line, circle or ellipse.
/// * `query` - Either a point `{ x, y }`, or (for circles and ellipses) a [`Line`].
/// * `epsilon` - Optional comparison tolerance (default 1e-10).
///
/// # Returns
/// The nearest point, or `undefined` when the shape doesn't support the query.
#[wasm_bindgen]
pub fn closest_point(shape: JsValue, query: JsValue, epsilon: Option<f64>) -> Result<JsValue, JsValue> {
    let tol = tolerance(epsilon).map_err(|e| JsValue::from_str(&e))?;
    let shape: Shape = parse(shape, "shape")?;
    let query: Query = parse(query, "query point or line")?;
    let closest = closest(&shape, query, tol).map_err(|e| JsValue::from_str(&e))?;
    to_js(&closest)
}
