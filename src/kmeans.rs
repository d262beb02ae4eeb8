use crate::algorithm::{kmeans_lloyd, KMeansResult, RunSummary};
use crate::config::KMeansConfig;
use crate::distance::{assign_points, assign_points_serial, UNASSIGNED};
use crate::error::KMeansError;
use crate::init::{time_seed, CentroidInitializer, RandomInit};
use crate::point::{points_from_array, Point};
use ndarray::{Array1, ArrayView2};

/// Lloyd's k-means over two-dimensional points.
///
/// The API follows FAISS and scikit-learn: `train()`/`fit()` learn centroids,
/// `predict()` labels points against them.
///
/// # Example
///
/// ```
/// use kmeans2d::{KMeans, KMeansConfig, Point};
///
/// let points: Vec<Point> = (0..10).map(|i| Point::new(i as f64, i as f64)).collect();
///
/// let mut kmeans = KMeans::with_config(KMeansConfig::new(3).with_seed(42));
/// kmeans.train(&points).unwrap();
///
/// let labels = kmeans.predict(&points).unwrap();
/// assert_eq!(labels.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Trained centroids (None if not yet fitted)
    centroids: Option<Vec<Point>>,

    /// Summary of the most recent training run
    last_run: Option<RunSummary>,
}

impl KMeans {
    /// Create a new model with default configuration and `k` clusters.
    ///
    /// `k` is checked against the data when training starts.
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a new model with custom configuration.
    pub fn with_config(config: KMeansConfig) -> Self {
        Self {
            config,
            centroids: None,
            last_run: None,
        }
    }

    /// Train the model, drawing the initial centroids at random from `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `points` is empty
    /// - `k` is 0 or larger than the number of points
    /// - the configuration is invalid
    pub fn train(&mut self, points: &[Point]) -> Result<(), KMeansError> {
        self.run(points, None).map(|_| ())
    }

    /// Fit the model to the data.
    ///
    /// Equivalent to `train()`, returning `&mut Self` for method chaining.
    pub fn fit(&mut self, points: &[Point]) -> Result<&mut Self, KMeansError> {
        self.train(points)?;
        Ok(self)
    }

    /// Fit the model starting from the centroids produced by `initializer`.
    pub fn fit_with(
        &mut self,
        points: &[Point],
        initializer: &mut dyn CentroidInitializer,
    ) -> Result<&mut Self, KMeansError> {
        self.run(points, Some(initializer))?;
        Ok(self)
    }

    /// Predict cluster assignments for new points.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::NotFitted`] if the model has not been fitted yet.
    pub fn predict(&self, points: &[Point]) -> Result<Array1<i64>, KMeansError> {
        let centroids = self.centroids.as_ref().ok_or(KMeansError::NotFitted)?;

        let mut labels = vec![UNASSIGNED; points.len()];
        if self.config.parallel {
            assign_points(points, centroids, &mut labels);
        } else {
            assign_points_serial(points, centroids, &mut labels);
        }

        Ok(Array1::from(labels))
    }

    /// Predict cluster assignments for an `(n_samples, 2)` array.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the array does not
    /// have exactly two columns.
    pub fn predict_array(&self, data: &ArrayView2<f64>) -> Result<Array1<i64>, KMeansError> {
        if self.centroids.is_none() {
            return Err(KMeansError::NotFitted);
        }
        let points = points_from_array(data)?;
        self.predict(&points)
    }

    /// Fit the model and return the labels of the final assignment pass.
    pub fn fit_predict(&mut self, points: &[Point]) -> Result<Array1<i64>, KMeansError> {
        let result = self.run(points, None)?;
        Ok(Array1::from(result.labels))
    }

    /// Get the centroids of the fitted model.
    pub fn centroids(&self) -> Option<&[Point]> {
        self.centroids.as_deref()
    }

    /// Get the summary of the most recent training run.
    pub fn last_run(&self) -> Option<&RunSummary> {
        self.last_run.as_ref()
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    fn run(
        &mut self,
        points: &[Point],
        initializer: Option<&mut dyn CentroidInitializer>,
    ) -> Result<KMeansResult, KMeansError> {
        let seed = self.config.seed.unwrap_or_else(time_seed);

        let result = match initializer {
            Some(init) => kmeans_lloyd(points, &self.config, init, seed)?,
            None => {
                let mut init = RandomInit::new(seed);
                kmeans_lloyd(points, &self.config, &mut init, seed)?
            }
        };

        self.centroids = Some(result.centroids.clone());
        self.last_run = Some(result.summary.clone());
        Ok(result)
    }
}

/// Cluster `points` into `k` groups with the default configuration.
///
/// Returns one cluster id per input point, in input order.
pub fn cluster(points: &[Point], k: usize) -> Result<Array1<i64>, KMeansError> {
    KMeans::new(k).fit_predict(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::FixedInit;
    use ndarray::array;

    fn diagonal(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, i as f64)).collect()
    }

    #[test]
    fn test_kmeans_new() {
        let kmeans = KMeans::new(10);
        assert_eq!(kmeans.k(), 10);
        assert!(kmeans.centroids().is_none());
        assert!(kmeans.last_run().is_none());
    }

    #[test]
    fn test_kmeans_train() {
        let points = diagonal(20);
        let mut kmeans = KMeans::with_config(KMeansConfig::new(5).with_seed(1));

        kmeans.train(&points).unwrap();

        assert_eq!(kmeans.centroids().unwrap().len(), 5);
        assert_eq!(kmeans.last_run().unwrap().seed, 1);
    }

    #[test]
    fn test_kmeans_fit_with() {
        let points = diagonal(10);
        let mut init = FixedInit::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        let mut kmeans = KMeans::new(2);

        kmeans.fit_with(&points, &mut init).unwrap();

        assert_eq!(
            kmeans.centroids().unwrap(),
            &[Point::new(2.0, 2.0), Point::new(7.0, 7.0)]
        );
        let summary = kmeans.last_run().unwrap();
        assert!(summary.converged);
        assert_eq!(summary.n_iterations, 5);
    }

    #[test]
    fn test_kmeans_predict() {
        let points = diagonal(10);
        let mut init = FixedInit::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        let mut kmeans = KMeans::new(2);
        kmeans.fit_with(&points, &mut init).unwrap();

        let labels = kmeans
            .predict(&[Point::new(-3.0, 0.0), Point::new(100.0, 90.0)])
            .unwrap();
        assert_eq!(labels, array![0, 1]);
    }

    #[test]
    fn test_kmeans_predict_array() {
        let points = diagonal(10);
        let mut init = FixedInit::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        let mut kmeans = KMeans::new(2);
        kmeans.fit_with(&points, &mut init).unwrap();

        let labels = kmeans.predict_array(&array![[1.0, 1.0], [8.0, 8.0]].view()).unwrap();
        assert_eq!(labels, array![0, 1]);

        let result = kmeans.predict_array(&array![[1.0, 1.0, 1.0]].view());
        assert!(matches!(result, Err(KMeansError::InvalidDimensions(_))));
    }

    #[test]
    fn test_kmeans_predict_before_fit() {
        let kmeans = KMeans::new(2);
        let result = kmeans.predict(&diagonal(3));
        assert_eq!(result, Err(KMeansError::NotFitted));
    }

    #[test]
    fn test_kmeans_k_zero() {
        let mut kmeans = KMeans::new(0);
        let result = kmeans.train(&diagonal(3));
        assert_eq!(
            result,
            Err(KMeansError::InvalidClusterCount { k: 0, n_points: 3 })
        );
        assert!(kmeans.centroids().is_none());
    }

    #[test]
    fn test_cluster() {
        let labels = cluster(&diagonal(10), 3).unwrap();
        assert_eq!(labels.len(), 10);
        assert!(labels.iter().all(|&l| (0..3).contains(&l)));
    }
}
