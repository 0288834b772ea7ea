//! Batch intersection of shape pairs.

use std::fs;

use anyhow::{Context, Result};
use log::warn;
use rayon::prelude::*;
use serde::Serialize;

use conix_core::{Shape, Tolerance, R2};

/// Outcome for one pair: its points, or the error that stopped it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PairResult {
    Points(Vec<R2<f64>>),
    Error { error: String },
}

pub fn load_pairs(path: &str) -> Result<Vec<(Shape, Shape)>> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    serde_json::from_str(&json).with_context(|| format!("parsing shape pairs from {}", path))
}

/// Intersect each pair independently; results keep the input order.
pub fn intersect_pairs(pairs: &[(Shape, Shape)], tol: Tolerance) -> Vec<PairResult> {
    pairs
        .par_iter()
        .enumerate()
        .map(|(idx, (a, b))| match a.intersect(b, tol) {
            Ok(points) => PairResult::Points(points),
            Err(e) => {
                warn!("pair {}: {} ∩ {}: {}", idx, a, b, e);
                PairResult::Error { error: e.to_string() }
            }
        })
        .collect()
}
