//! Configuration sections

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::{default_data_dir, default_home};
use crate::types::Language;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SongscapeConfig {
    /// Where the song collections and feature table live
    pub data: DataConfig,
    /// Thresholds and clustering parameters
    pub analysis: AnalysisConfig,
    /// Where submitted session payloads are written
    pub session: SessionConfig,
}

/// Data file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the data files
    pub data_dir: PathBuf,
    /// Ground-truth song collection (JSON array of song records)
    pub ground_truth_file: String,
    /// Model-predicted song collection (JSON array of song records)
    pub predicted_file: String,
    /// Audio feature table (JSON array of feature rows)
    pub features_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            ground_truth_file: String::from("songs_gt.json"),
            predicted_file: String::from("songs_pred.json"),
            features_file: String::from("audio_features.json"),
        }
    }
}

impl DataConfig {
    pub fn ground_truth_path(&self) -> PathBuf {
        self.data_dir.join(&self.ground_truth_file)
    }

    pub fn predicted_path(&self) -> PathBuf {
        self.data_dir.join(&self.predicted_file)
    }

    pub fn features_path(&self) -> PathBuf {
        self.data_dir.join(&self.features_file)
    }
}

/// Analysis configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum |r| for a feature to label an axis
    /// Default: 0.25
    pub correlation_threshold: f64,
    /// Features within this |r| of the strongest one share the label
    /// Default: 0.10
    pub tie_band: f64,
    /// Smallest k tried in automatic mode
    pub k_min: usize,
    /// Largest k tried in automatic mode (further capped at n - 1)
    pub k_max: usize,
    /// Seed for k-means initialization
    pub seed: u64,
    /// Number of k-means restarts; the lowest-inertia run is kept
    pub restarts: usize,
    /// Iteration cap per k-means run
    pub max_iterations: u64,
    /// Convergence tolerance for k-means
    pub tolerance: f64,
    /// How many ranked correlations are reported per axis
    pub top_correlations: usize,
    /// Language of the reported ranked correlations
    pub default_language: Language,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: 0.25,
            tie_band: 0.10,
            k_min: 2,
            k_max: 6,
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
            top_correlations: 5,
            default_language: Language::En,
        }
    }
}

impl AnalysisConfig {
    /// Clamp values to usable ranges
    pub fn validate(&mut self) {
        self.correlation_threshold = self.correlation_threshold.clamp(0.0, 1.0);
        self.tie_band = self.tie_band.clamp(0.0, 1.0);

        // Silhouette needs at least two clusters
        self.k_min = self.k_min.max(2);
        if self.k_max < self.k_min {
            self.k_max = self.k_min;
        }

        self.restarts = self.restarts.max(1);
        self.max_iterations = self.max_iterations.max(1);
        if !(self.tolerance > 0.0) {
            self.tolerance = 1e-4;
        }
    }
}

/// Session persistence section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory that receives submitted session payloads
    pub results_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            results_dir: default_home().join("results"),
        }
    }
}
