use crate::config::{EmptyClusterPolicy, KMeansConfig};
use crate::distance::{
    assign_points, assign_points_serial, centroid_shift, centroids_equal, inertia, UNASSIGNED,
};
use crate::error::{DegenerateCluster, KMeansError};
use crate::init::CentroidInitializer;
use crate::point::Point;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How a run ended and what happened along the way
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of assignment passes performed
    pub n_iterations: usize,
    /// True when the last update reproduced the current centroids
    /// (or moved them less than the configured tolerance)
    pub converged: bool,
    /// Seed of the run's random generator
    pub seed: u64,
    /// Clusters that came up empty, in the order they were repaired
    pub degenerate_clusters: Vec<DegenerateCluster>,
    /// Sum of squared distances from each point to its centroid
    pub inertia: f64,
}

/// Result of the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Centroids the final labels were computed against
    pub centroids: Vec<Point>,
    pub labels: Vec<i64>,
    pub summary: RunSummary,
}

/// Recompute each centroid as the mean of the points assigned to it.
///
/// Clusters with no points come back as `None`. Accumulation runs serially in
/// point order so repeated runs produce bit-identical centroids.
///
/// # Panics
///
/// Panics if a label lies outside `0..k`, including [`UNASSIGNED`]: run an
/// assignment step first.
pub fn compute_centroids(points: &[Point], assignments: &[i64], k: usize) -> Vec<Option<Point>> {
    let mut sums = vec![(0.0f64, 0.0f64); k];
    let mut counts = vec![0usize; k];

    for (point, &label) in points.iter().zip(assignments) {
        assert!(
            (0..k as i64).contains(&label),
            "label {} is not a cluster id in 0..{}",
            label,
            k
        );
        let cluster = label as usize;
        sums[cluster].0 += point.x;
        sums[cluster].1 += point.y;
        counts[cluster] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .map(|((sx, sy), count)| {
            (count > 0).then(|| Point::new(sx / count as f64, sy / count as f64))
        })
        .collect()
}

/// Run Lloyd's algorithm on `points`.
///
/// `seed` drives the generator used to reseed empty clusters; the initializer
/// brings its own randomness.
pub fn kmeans_lloyd(
    points: &[Point],
    config: &KMeansConfig,
    initializer: &mut dyn CentroidInitializer,
    seed: u64,
) -> Result<KMeansResult, KMeansError> {
    config.validate(points.len())?;

    let n_points = points.len();
    let k = config.k;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(1);

    let mut centroids = initializer.init_centroids(points, k)?;
    if centroids.len() != k {
        return Err(KMeansError::InvalidConfig(format!(
            "Initializer returned {} centroids, expected {}",
            centroids.len(),
            k
        )));
    }

    info!(n_points, k, seed, max_iters = config.max_iters, "training k-means");

    let mut labels = vec![UNASSIGNED; n_points];
    let mut degenerate_clusters = Vec::new();
    let mut n_iterations = 0;

    let converged = loop {
        let iter_start = Instant::now();
        n_iterations += 1;

        if config.parallel {
            assign_points(points, &centroids, &mut labels);
        } else {
            assign_points_serial(points, &centroids, &mut labels);
        }

        let mut new_centroids = Vec::with_capacity(k);
        for (cluster, centroid) in compute_centroids(points, &labels, k)
            .into_iter()
            .enumerate()
        {
            let centroid = match centroid {
                Some(c) => c,
                None => {
                    degenerate_clusters.push(DegenerateCluster {
                        iteration: n_iterations,
                        cluster,
                    });
                    let repaired = match config.empty_cluster {
                        EmptyClusterPolicy::KeepPrevious => centroids[cluster],
                        EmptyClusterPolicy::Reseed => points[rng.gen_range(0..n_points)],
                    };
                    warn!(
                        iteration = n_iterations,
                        cluster,
                        policy = ?config.empty_cluster,
                        "cluster has no points, repaired centroid"
                    );
                    repaired
                }
            };
            new_centroids.push(centroid);
        }

        let shift = centroid_shift(&centroids, &new_centroids);
        debug!(
            iteration = n_iterations,
            shift,
            elapsed_s = iter_start.elapsed().as_secs_f64(),
            "k-means iteration"
        );

        if centroids_equal(&centroids, &new_centroids)
            || config.tol.is_some_and(|tol| shift < tol)
        {
            break true;
        }

        if n_iterations >= config.max_iters {
            break false;
        }

        centroids = new_centroids;
    };

    let inertia = inertia(points, &centroids, &labels);
    if converged {
        info!(n_iterations, inertia, "k-means converged");
    } else {
        info!(
            n_iterations,
            inertia, "k-means stopped at the iteration cap without converging"
        );
    }

    Ok(KMeansResult {
        centroids,
        labels,
        summary: RunSummary {
            n_iterations,
            converged,
            seed,
            degenerate_clusters,
            inertia,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{FixedInit, RandomInit};
    use approx::assert_relative_eq;

    fn diagonal(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, i as f64)).collect()
    }

    #[test]
    fn test_compute_centroids() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(10.0, 0.0),
        ];
        let centroids = compute_centroids(&points, &[0, 0, 1], 3);

        assert_eq!(centroids[0], Some(Point::new(1.0, 1.0)));
        assert_eq!(centroids[1], Some(Point::new(10.0, 0.0)));
        assert_eq!(centroids[2], None);
    }

    #[test]
    #[should_panic(expected = "label -1 is not a cluster id in 0..1")]
    fn test_compute_centroids_rejects_unassigned() {
        let _ = compute_centroids(&[Point::new(0.0, 0.0)], &[UNASSIGNED], 1);
    }

    #[test]
    #[should_panic(expected = "label 2 is not a cluster id in 0..2")]
    fn test_compute_centroids_rejects_label_past_k() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let _ = compute_centroids(&points, &[0, 2], 2);
    }

    #[test]
    fn test_kmeans_basic() {
        let points = diagonal(50);
        let config = KMeansConfig::new(4).with_seed(42);
        let mut init = RandomInit::new(42);

        let result = kmeans_lloyd(&points, &config, &mut init, 42).unwrap();

        assert_eq!(result.centroids.len(), 4);
        assert_eq!(result.labels.len(), 50);
        for &label in &result.labels {
            assert!((0..4).contains(&label));
        }
        assert!(result.summary.n_iterations <= 100);
    }

    #[test]
    fn test_fixed_init_converges_in_five_passes() {
        // Boundaries move 0.5 -> 2.5 -> 3.5 -> 4 (tie goes to cluster 0) -> 4.5 -> stable
        let points = diagonal(10);
        let config = KMeansConfig::new(2);
        let mut init = FixedInit::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);

        let result = kmeans_lloyd(&points, &config, &mut init, 0).unwrap();

        assert!(result.summary.converged);
        assert_eq!(result.summary.n_iterations, 5);
        assert_eq!(result.labels, vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
        assert_eq!(
            result.centroids,
            vec![Point::new(2.0, 2.0), Point::new(7.0, 7.0)]
        );
        assert_relative_eq!(result.summary.inertia, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_iteration_cap() {
        let points = diagonal(10);
        let config = KMeansConfig::new(2).with_max_iters(3);
        let mut init = FixedInit::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);

        let result = kmeans_lloyd(&points, &config, &mut init, 0).unwrap();

        assert!(!result.summary.converged);
        assert_eq!(result.summary.n_iterations, 3);
        // Third pass ran against (1,1) and (6,6)
        assert_eq!(
            result.centroids,
            vec![Point::new(1.0, 1.0), Point::new(6.0, 6.0)]
        );
        assert_eq!(result.labels, vec![0, 0, 0, 0, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_tolerance_stops_early() {
        let points = diagonal(10);
        let config = KMeansConfig::new(2).with_tol(Some(1e9));
        let mut init = FixedInit::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);

        let result = kmeans_lloyd(&points, &config, &mut init, 0).unwrap();

        assert!(result.summary.converged);
        assert_eq!(result.summary.n_iterations, 1);
    }

    #[test]
    fn test_empty_cluster_keeps_previous() {
        // Both centroids start on the same point: cluster 1 never wins a tie
        let points = diagonal(4);
        let config = KMeansConfig::new(2);
        let start = Point::new(0.0, 0.0);
        let mut init = FixedInit::new(vec![start, start]);

        let result = kmeans_lloyd(&points, &config, &mut init, 0).unwrap();

        assert_eq!(
            result.summary.degenerate_clusters[0],
            DegenerateCluster {
                iteration: 1,
                cluster: 1
            }
        );
        for c in &result.centroids {
            assert!(c.x.is_finite() && c.y.is_finite());
        }
        assert_eq!(result.centroids[1], start);
    }

    #[test]
    fn test_empty_cluster_reseed() {
        let points = diagonal(4);
        let config = KMeansConfig::new(2).with_empty_cluster(EmptyClusterPolicy::Reseed);
        let start = Point::new(0.0, 0.0);
        let mut init = FixedInit::new(vec![start, start]);

        let result = kmeans_lloyd(&points, &config, &mut init, 3).unwrap();

        assert!(!result.summary.degenerate_clusters.is_empty());
        for c in &result.centroids {
            assert!(c.x.is_finite() && c.y.is_finite());
        }
        for &label in &result.labels {
            assert!((0..2).contains(&label));
        }
    }

    #[test]
    fn test_initializer_count_mismatch() {
        let points = diagonal(4);
        let config = KMeansConfig::new(3);
        let mut init = FixedInit::new(vec![Point::new(0.0, 0.0)]);

        let result = kmeans_lloyd(&points, &config, &mut init, 0);
        assert!(matches!(result, Err(KMeansError::InvalidConfig(_))));
    }
}
