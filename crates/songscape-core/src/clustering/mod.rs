//! Cluster count selection and partitioning of projected points
//!
//! In automatic mode every candidate k is partitioned with seeded k-means and
//! scored by mean silhouette; the best-scoring k wins. A candidate that cannot
//! be scored gets 0 and the sweep carries on. Manual mode uses the caller's k,
//! clamped to the number of points.

mod kmeans;
mod silhouette;

pub use kmeans::{partition, KMeansSettings};
pub use silhouette::silhouette_score;

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AnalysisConfig;
use crate::types::round_to;

/// Default k when no candidate can be evaluated
pub const FALLBACK_K: usize = 2;

/// Errors that can occur while clustering
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClusterError {
    #[error("Cannot cluster an empty point set")]
    NoPoints,

    #[error("k-means failed for k={k}: {reason}")]
    KMeans { k: usize, reason: String },

    #[error("Silhouette undefined for {clusters} distinct clusters over {points} points")]
    Degenerate { clusters: usize, points: usize },
}

/// How the number of clusters is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterMode {
    /// Sweep candidate k values and keep the best silhouette
    Automatic,
    /// Use the given k
    Manual(usize),
}

impl ClusterMode {
    pub fn from_request(auto_k: bool, manual_k: usize) -> Self {
        if auto_k {
            ClusterMode::Automatic
        } else {
            ClusterMode::Manual(manual_k)
        }
    }
}

/// Partition of n points into k clusters
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    pub k: usize,
    /// Cluster index in `[0, k)` for every point, in point order
    pub labels: Vec<usize>,
    /// k × 2 centroid coordinates
    pub centroids: Array2<f64>,
}

impl Clustering {
    /// Number of points in each cluster
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Silhouette score of one candidate k
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KScore {
    pub k: usize,
    pub score: f64,
}

/// Outcome of cluster selection
#[derive(Debug, Clone)]
pub struct ClusterSelection {
    /// Chosen number of clusters
    pub k: usize,
    /// Every automatic candidate with its score (empty in manual mode)
    pub scores: Vec<KScore>,
    pub clustering: Clustering,
}

/// Choose k and partition `points`
pub fn select_clusters(
    points: &Array2<f64>,
    mode: ClusterMode,
    config: &AnalysisConfig,
) -> Result<ClusterSelection, ClusterError> {
    let n = points.nrows();
    if n == 0 {
        return Err(ClusterError::NoPoints);
    }
    let settings = KMeansSettings::from(config);

    let (requested_k, scores) = match mode {
        ClusterMode::Automatic => {
            let scores = score_candidates(points, config.k_min, config.k_max, &settings);
            (best_k(&scores), scores)
        }
        ClusterMode::Manual(k) => (clamp_manual_k(k, n), Vec::new()),
    };

    let clustering = partition(points, requested_k, &settings)?;
    log::info!(
        "select_clusters: {:?} mode chose k={} for {} points",
        mode,
        clustering.k,
        n
    );

    Ok(ClusterSelection {
        k: clustering.k,
        scores,
        clustering,
    })
}

/// Manual k: at least 1, and `max(2, n)` when it exceeds the point count
fn clamp_manual_k(k: usize, n: usize) -> usize {
    let k = k.max(1);
    if k > n {
        FALLBACK_K.max(n)
    } else {
        k
    }
}

/// Score every k in `[k_min, min(k_max, n - 1)]`
fn score_candidates(
    points: &Array2<f64>,
    k_min: usize,
    k_max: usize,
    settings: &KMeansSettings,
) -> Vec<KScore> {
    let upper = k_max.min(points.nrows().saturating_sub(1));
    if k_min > upper {
        return Vec::new();
    }

    (k_min..=upper)
        .into_par_iter()
        .map(|k| {
            let score = match evaluate_candidate(points, k, settings) {
                Ok(score) => round_to(score, 4),
                Err(e) => {
                    log::debug!("score_candidates: k={} scored 0 ({})", k, e);
                    0.0
                }
            };
            log::debug!("score_candidates: k={} silhouette={:.4}", k, score);
            KScore { k, score }
        })
        .collect()
}

fn evaluate_candidate(
    points: &Array2<f64>,
    k: usize,
    settings: &KMeansSettings,
) -> Result<f64, ClusterError> {
    let clustering = partition(points, k, settings)?;
    silhouette_score(points, &clustering.labels)
}

/// Highest score wins; the smallest k wins ties
fn best_k(scores: &[KScore]) -> usize {
    let mut best: Option<&KScore> = None;
    for candidate in scores {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best.map(|b| b.k).unwrap_or(FALLBACK_K)
}
