//! Cluster two-dimensional points and print the assignment of every point.
//!
//! Without arguments the reference data set is used: ten points on the
//! diagonal, (0,0) through (9,9), split into 3 clusters.
//!
//! Usage: `kmeans2d [<input.npy> [k [seed]]]`
//!
//! The input file must hold an `(n, 2)` array of `f64`. Set `RUST_LOG=debug`
//! to trace every iteration.

use kmeans2d::{points_from_array, report, KMeans, KMeansConfig, Point};
use ndarray::Array2;
use ndarray_npy::ReadNpyExt;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_K: usize = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 4 {
        eprintln!("Usage: {} [<input.npy> [k [seed]]]", args[0]);
        std::process::exit(1);
    }

    let points = match args.get(1) {
        Some(input_path) => {
            let reader = BufReader::new(File::open(input_path)?);
            let data: Array2<f64> = Array2::read_npy(reader)?;
            points_from_array(&data.view())?
        }
        None => (0..10).map(|i| Point::new(i as f64, i as f64)).collect(),
    };

    let k: usize = match args.get(2) {
        Some(k) => k.parse()?,
        None => DEFAULT_K,
    };

    let mut config = KMeansConfig::new(k);
    if let Some(seed) = args.get(3) {
        config = config.with_seed(seed.parse()?);
    }

    let mut kmeans = KMeans::with_config(config);
    let labels = kmeans.fit_predict(&points)?;

    if let Some(summary) = kmeans.last_run() {
        tracing::info!(
            iterations = summary.n_iterations,
            converged = summary.converged,
            seed = summary.seed,
            "clustering finished"
        );
    }

    let stdout = io::stdout();
    report::write_report(&mut stdout.lock(), &points, &labels.to_vec())?;

    Ok(())
}
