//! Basic example demonstrating kmeans2d usage
//!
//! Run with: cargo run --example basic --release

use kmeans2d::{report, KMeans, KMeansConfig, Point};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn main() {
    println!("=== kmeans2d example ===\n");

    let n_samples = 300;
    let n_clusters = 3;

    println!("Generating {} samples around {} centers...", n_samples, n_clusters);

    let centers = [
        Point::new(-5.0, -5.0),
        Point::new(0.0, 5.0),
        Point::new(5.0, -5.0),
    ];

    let noise = Array2::random((n_samples, 2), Uniform::new(-1.0f64, 1.0));
    let points: Vec<Point> = (0..n_samples)
        .map(|i| {
            let center = centers[i % 3];
            Point::new(center.x + noise[[i, 0]], center.y + noise[[i, 1]])
        })
        .collect();

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center.x, center.y);
    }
    println!();

    let config = KMeansConfig::new(n_clusters).with_seed(42);

    println!("Running k-means with k={}...\n", n_clusters);

    let mut kmeans = KMeans::with_config(config);
    let labels = kmeans.fit_predict(&points).expect("Training failed");

    if let Some(summary) = kmeans.last_run() {
        println!(
            "Finished after {} iterations (converged: {}, inertia: {:.4})\n",
            summary.n_iterations, summary.converged, summary.inertia
        );
    }

    println!("Learned centroids:");
    for (i, c) in kmeans.centroids().unwrap_or(&[]).iter().enumerate() {
        println!("  Centroid {}: ({:.4}, {:.4})", i, c.x, c.y);
    }
    println!();

    let mut cluster_counts = vec![0usize; n_clusters];
    for &label in labels.iter() {
        cluster_counts[label as usize] += 1;
    }

    println!("Cluster distribution:");
    for (i, count) in cluster_counts.iter().enumerate() {
        println!(
            "  Cluster {}: {} samples ({:.1}%)",
            i,
            count,
            (*count as f64 / n_samples as f64) * 100.0
        );
    }
    println!();

    println!("First 10 sample assignments:");
    for i in 0..10 {
        println!("  {}", report::format_assignment(&points[i], labels[i]));
    }

    println!("\n=== Done! ===");
}
