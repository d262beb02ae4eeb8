//! # kmeans2d
//!
//! Lloyd's k-means clustering for points in the plane.
//!
//! ## Features
//!
//! - **Parallel assignment**: the nearest-centroid step runs on rayon, one
//!   task per point, with lowest-index tie-breaking preserved
//! - **Reproducible runs**: every run owns its own ChaCha8 generator; fix the
//!   seed or plug in your own [`CentroidInitializer`]
//! - **Exact convergence**: stops when two consecutive centroid sets are
//!   bit-identical, or at the iteration cap (100 by default). An optional
//!   tolerance is available through [`KMeansConfig::with_tol`]
//! - **No NaN centroids**: empty clusters are repaired according to
//!   [`EmptyClusterPolicy`] and reported on the run summary
//!
//! ## Example
//!
//! ```rust
//! use kmeans2d::{cluster, Point};
//!
//! let points: Vec<Point> = (0..10).map(|i| Point::new(i as f64, i as f64)).collect();
//!
//! let labels = cluster(&points, 3).unwrap();
//! assert_eq!(labels.len(), 10);
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use kmeans2d::{EmptyClusterPolicy, KMeans, KMeansConfig, Point};
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.5, 0.2),
//!     Point::new(8.0, 8.0),
//!     Point::new(8.5, 7.5),
//! ];
//!
//! let config = KMeansConfig::new(2)
//!     .with_seed(42)
//!     .with_max_iters(50)
//!     .with_empty_cluster(EmptyClusterPolicy::Reseed);
//!
//! let mut kmeans = KMeans::with_config(config);
//! let labels = kmeans.fit_predict(&points).unwrap();
//! assert_eq!(labels.len(), 4);
//! println!("{:?}", kmeans.last_run());
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod init;
mod kmeans;
mod point;
pub mod report;

pub use algorithm::{compute_centroids, kmeans_lloyd, KMeansResult, RunSummary};
pub use config::{EmptyClusterPolicy, KMeansConfig, DEFAULT_MAX_ITERS};
pub use distance::{
    assign_points, assign_points_serial, centroid_shift, centroids_equal, distance, inertia,
    nearest_centroid, UNASSIGNED,
};
pub use error::{DegenerateCluster, KMeansError};
pub use init::{time_seed, CentroidInitializer, FixedInit, RandomInit};
pub use kmeans::{cluster, KMeans};
pub use point::{points_from_array, Point};
