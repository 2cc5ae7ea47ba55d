//! Seeded k-means partitioning (linfa)

use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use ndarray::{Array1, Array2};
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use std::collections::HashSet;

use super::{ClusterError, Clustering};
use crate::config::AnalysisConfig;

/// k-means parameters; a fixed seed makes every run reproducible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeansSettings {
    pub seed: u64,
    /// Independent restarts; the lowest-inertia run is kept
    pub restarts: usize,
    pub max_iterations: u64,
    pub tolerance: f64,
}

impl Default for KMeansSettings {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

impl From<&AnalysisConfig> for KMeansSettings {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            seed: config.seed,
            restarts: config.restarts.max(1),
            max_iterations: config.max_iterations.max(1),
            tolerance: config.tolerance,
        }
    }
}

/// Partition `points` into `k` clusters
///
/// `k` is capped at the number of points. When there are fewer distinct
/// points than clusters, only as many clusters as distinct points are fitted
/// and the remaining ones stay empty (their centroids repeat the first one).
pub fn partition(
    points: &Array2<f64>,
    k: usize,
    settings: &KMeansSettings,
) -> Result<Clustering, ClusterError> {
    let n = points.nrows();
    if n == 0 {
        return Err(ClusterError::NoPoints);
    }
    let k = k.clamp(1, n);
    let fitted_k = k.min(count_distinct(points));

    let rng = Xoshiro256Plus::seed_from_u64(settings.seed);
    let dataset = DatasetBase::from(points.clone());
    let model = KMeans::params_with_rng(fitted_k, rng)
        .n_runs(settings.restarts)
        .max_n_iterations(settings.max_iterations)
        .tolerance(settings.tolerance)
        .fit(&dataset)
        .map_err(|e| ClusterError::KMeans {
            k,
            reason: e.to_string(),
        })?;

    let labels: Array1<usize> = model.predict(points);
    let fitted = model.centroids();

    let mut centroids = Array2::<f64>::zeros((k, points.ncols()));
    for (c, mut row) in centroids.rows_mut().into_iter().enumerate() {
        row.assign(&fitted.row(if c < fitted_k { c } else { 0 }));
    }

    Ok(Clustering {
        k,
        labels: labels.to_vec(),
        centroids,
    })
}

fn count_distinct(points: &Array2<f64>) -> usize {
    points
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|v| v.to_bits()).collect::<Vec<u64>>())
        .collect::<HashSet<_>>()
        .len()
}
