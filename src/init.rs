use crate::error::KMeansError;
use crate::point::Point;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Produces the starting centroid set of a run.
pub trait CentroidInitializer {
    /// Return exactly `k` centroids for `points`.
    ///
    /// Callers guarantee `points` is non-empty and `1 <= k <= points.len()`.
    fn init_centroids(&mut self, points: &[Point], k: usize) -> Result<Vec<Point>, KMeansError>;
}

/// Samples each centroid independently and uniformly from the point set
/// (with replacement, so two centroids may start on the same point).
#[derive(Debug, Clone)]
pub struct RandomInit {
    rng: ChaCha8Rng,
}

impl RandomInit {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_rng(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl CentroidInitializer for RandomInit {
    fn init_centroids(&mut self, points: &[Point], k: usize) -> Result<Vec<Point>, KMeansError> {
        if points.is_empty() {
            return Err(KMeansError::EmptyPointSet);
        }

        Ok((0..k)
            .map(|_| points[self.rng.gen_range(0..points.len())])
            .collect())
    }
}

/// Hands out a caller-supplied centroid set.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedInit {
    centroids: Vec<Point>,
}

impl FixedInit {
    pub fn new(centroids: Vec<Point>) -> Self {
        Self { centroids }
    }
}

impl CentroidInitializer for FixedInit {
    fn init_centroids(&mut self, _points: &[Point], k: usize) -> Result<Vec<Point>, KMeansError> {
        if self.centroids.len() != k {
            return Err(KMeansError::InvalidConfig(format!(
                "Expected {} initial centroids, got {}",
                k,
                self.centroids.len()
            )));
        }
        Ok(self.centroids.clone())
    }
}

/// Seed derived from the system clock
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
        .unwrap_or(0)
}
