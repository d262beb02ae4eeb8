use thiserror::Error;

/// Error types for the kmeans2d library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansError {
    /// No points were supplied
    #[error("Empty point set: at least one point is required")]
    EmptyPointSet,

    /// The number of clusters must satisfy 1 <= k <= number of points
    #[error("Invalid cluster count: k = {k} with {n_points} points (need 1 <= k <= n_points)")]
    InvalidClusterCount { k: usize, n_points: usize },

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call train() or fit() first.")]
    NotFitted,

    /// Array input does not describe two-dimensional points
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),
}

/// A cluster that received no points during an update step.
///
/// This is not fatal: the driving loop repairs the centroid according to
/// [`EmptyClusterPolicy`](crate::EmptyClusterPolicy) and records the event on
/// the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateCluster {
    /// Assignment pass (1-based) in which the cluster came up empty
    pub iteration: usize,
    /// Cluster id
    pub cluster: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KMeansError::InvalidClusterCount { k: 5, n_points: 3 };
        assert_eq!(
            err.to_string(),
            "Invalid cluster count: k = 5 with 3 points (need 1 <= k <= n_points)"
        );
        assert!(KMeansError::EmptyPointSet.to_string().contains("Empty point set"));
    }
}
