//! Command-line front end for the conix intersection engine.
//!
//! Provides:
//! - Intersection points of two shapes given as JSON
//! - Closest point on a shape to a point or a line
//! - Parallel batch intersection of shape pairs read from a file

mod batch;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};

use conix_core::{tolerance::DEFAULT_EPSILON, InfiniteLine, Shape, Tolerance, R2};

#[derive(Parser)]
#[command(name = "conix")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CONIX_BUILD_SHA"), ")"))]
#[command(about = "Intersections and closest points of lines, circles, ellipses, parabolas and conics", long_about = None)]
struct Cli {
    /// Comparison tolerance for membership tests and deduplication
    #[arg(short, long, global = true, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the intersection points of two shapes
    Intersect {
        /// First shape (JSON, e.g. '{"kind":"Circle","c":{"x":0,"y":0},"r":1}')
        a: String,
        /// Second shape (JSON)
        b: String,
    },

    /// Print the point of a shape nearest to a point or a line
    Closest {
        /// Shape (JSON)
        shape: String,

        /// Query point, as "X,Y"
        #[arg(short, long, allow_hyphen_values = true, value_parser = parse_point, conflicts_with = "line", required_unless_present = "line")]
        point: Option<R2<f64>>,

        /// Query line (JSON, e.g. '{"point":{"x":0,"y":2},"direction":{"x":1,"y":0}}')
        #[arg(short, long)]
        line: Option<String>,
    },

    /// Intersect every `[A, B]` pair in a JSON file, in parallel
    Batch {
        /// JSON array of shape pairs
        file: String,

        /// Output file for results (JSON); stdout if omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn parse_point(s: &str) -> std::result::Result<R2<f64>, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got {:?}", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("x coordinate {:?}: {}", x, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("y coordinate {:?}: {}", y, e))?;
    Ok(R2::new(x, y))
}

fn parse_shape(json: &str) -> Result<Shape> {
    serde_json::from_str(json).with_context(|| format!("parsing shape {}", json))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    if cli.epsilon.is_nan() || cli.epsilon <= 0. {
        bail!("epsilon must be positive, got {}", cli.epsilon);
    }
    let tol = Tolerance::new(cli.epsilon);
    debug!("tolerance: {:?}", tol);

    match cli.command {
        Commands::Intersect { a, b } => {
            let (a, b) = (parse_shape(&a)?, parse_shape(&b)?);
            let points = a.intersect(&b, tol).with_context(|| format!("intersecting {} and {}", a, b))?;
            info!("{} ∩ {}: {} point(s)", a, b, points.len());
            println!("{}", serde_json::to_string(&points)?);
        }
        Commands::Closest { shape, point, line } => {
            let shape = parse_shape(&shape)?;
            let closest = match (point, line) {
                (Some(p), _) => shape
                    .closest_point_to_point(&p)
                    .ok_or_else(|| anyhow!("{} shapes have no closest point to a point", shape.kind()))?,
                (None, Some(line)) => {
                    let line: InfiniteLine = serde_json::from_str(&line).with_context(|| format!("parsing line {}", line))?;
                    shape
                        .closest_point_to_line(&line, tol)
                        .with_context(|| format!("closest point of {} to {}", shape, line))?
                        .ok_or_else(|| anyhow!("{} shapes have no closest point to a line", shape.kind()))?
                }
                (None, None) => bail!("one of --point or --line is required"),
            };
            println!("{}", serde_json::to_string(&closest)?);
        }
        Commands::Batch { file, output } => {
            let pairs = batch::load_pairs(&file)?;
            info!("Intersecting {} pair(s) from {}", pairs.len(), file);
            let results = batch::intersect_pairs(&pairs, tol);
            let json = serde_json::to_string_pretty(&results)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json).with_context(|| format!("writing {}", path))?;
                    info!("Wrote {} result(s) to {}", results.len(), path);
                }
                None => println!("{}", json),
            }
        }
    }
    Ok(())
}
