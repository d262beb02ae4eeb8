use crate::error::KMeansError;

/// Default cap on assignment/update passes
pub const DEFAULT_MAX_ITERS: usize = 100;

/// What to do with a cluster that ends an update step with no points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Keep the centroid the cluster had before the update
    #[default]
    KeepPrevious,
    /// Move the centroid onto a uniformly drawn input point
    Reseed,
}

/// Configuration for the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of assignment passes
    pub max_iters: usize,

    /// Optional convergence tolerance on the total centroid shift.
    /// `None` stops only when two consecutive centroid sets are exactly equal.
    pub tol: Option<f64>,

    /// Random seed for centroid initialization and reseeding.
    /// `None` derives a seed from the system clock when a run starts.
    pub seed: Option<u64>,

    /// Recovery applied to clusters left without points
    pub empty_cluster: EmptyClusterPolicy,

    /// Run the assignment step on the rayon thread pool
    pub parallel: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 3,
            max_iters: DEFAULT_MAX_ITERS,
            tol: None,
            seed: None,
            empty_cluster: EmptyClusterPolicy::default(),
            parallel: true,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: Option<f64>) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the empty cluster policy
    pub fn with_empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }

    /// Enable or disable the parallel assignment step
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the configuration against a point set of `n_points` points.
    pub(crate) fn validate(&self, n_points: usize) -> Result<(), KMeansError> {
        if n_points == 0 {
            return Err(KMeansError::EmptyPointSet);
        }
        if self.k == 0 || self.k > n_points {
            return Err(KMeansError::InvalidClusterCount {
                k: self.k,
                n_points,
            });
        }
        if self.max_iters == 0 {
            return Err(KMeansError::InvalidConfig(
                "max_iters must be greater than 0".to_string(),
            ));
        }
        if let Some(tol) = self.tol {
            if tol.is_nan() || tol < 0.0 {
                return Err(KMeansError::InvalidConfig(format!(
                    "tol must be a non-negative number, got {}",
                    tol
                )));
            }
        }
        Ok(())
    }
}
