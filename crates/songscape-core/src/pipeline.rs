//! End-to-end analysis of one genre/emotion subset
//!
//! filter → project → select clusters → representatives, with both projected
//! axes interpreted in parallel. The result serializes to the JSON document
//! consumed by front ends.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::clustering::{select_clusters, ClusterError, ClusterMode, KScore};
use crate::config::AnalysisConfig;
use crate::context::AnalysisContext;
use crate::dataset::{filter_subset, CatalogSummary, FeatureTable};
use crate::interpret::{interpret_axis, AxisInterpretation, Polarity, RankedFeature};
use crate::projection::{project, ProjectionError};
use crate::representatives::{find_representatives, ClusterRepresentative};
use crate::types::{cluster_color, Axis, DatasetSource, PerLanguage, MIN_SUBSET_SIZE};

/// Errors that refuse a request outright
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Data not loaded")]
    DataUnavailable,

    #[error("Data source not available: {0}")]
    SourceUnavailable(DatasetSource),

    #[error("Audio feature table not available")]
    FeaturesUnavailable,

    #[error("Projection failed: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Clustering failed: {0}")]
    Clustering(#[from] ClusterError),
}

fn default_auto_k() -> bool {
    true
}

fn default_manual_k() -> usize {
    3
}

/// Parameters of one analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub genre: String,
    /// Matched as a substring of each song's emotion field
    pub emotion: String,
    /// Blind version name, e.g. "A" or "B"
    pub version: String,
    /// Version name → source label ("GT" for ground truth)
    #[serde(default)]
    pub version_mapping: HashMap<String, String>,
    #[serde(default = "default_auto_k")]
    pub auto_k: bool,
    #[serde(default = "default_manual_k")]
    pub manual_k: usize,
}

impl AnalysisRequest {
    pub fn new(genre: impl Into<String>, emotion: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
            emotion: emotion.into(),
            version: String::from("A"),
            version_mapping: HashMap::new(),
            auto_k: default_auto_k(),
            manual_k: default_manual_k(),
        }
    }

    /// Collection the requested version maps to; unmapped versions read ground truth
    pub fn source(&self) -> DatasetSource {
        self.version_mapping
            .get(&self.version)
            .map_or(DatasetSource::GroundTruth, |label| DatasetSource::from_label(label))
    }

    pub fn mode(&self) -> ClusterMode {
        ClusterMode::from_request(self.auto_k, self.manual_k)
    }
}

/// One projected song
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub cluster: usize,
    pub color: &'static str,
}

/// Label, strength and polarity of one axis in every language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSummary {
    pub label: PerLanguage<String>,
    /// Strength of the label, `None` when no feature explains the axis
    pub r: Option<f64>,
    pub polarity: PerLanguage<Polarity>,
}

impl AxisSummary {
    fn from_interpretation(axis: Axis, interpretation: &AxisInterpretation) -> Self {
        let label = PerLanguage::from_fn(|lang| {
            interpretation
                .labels
                .get(lang)
                .as_ref()
                .map_or_else(|| axis.fallback_label().to_string(), |l| l.label.clone())
        });
        let polarity = PerLanguage::from_fn(|lang| {
            interpretation
                .labels
                .get(lang)
                .as_ref()
                .map(|l| l.polarity.clone())
                .unwrap_or_default()
        });

        Self {
            label,
            r: interpretation.strength(),
            polarity,
        }
    }
}

/// A value per projected axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisPair<T> {
    pub x: T,
    pub y: T,
}

/// Complete analysis of a subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub count: usize,
    pub k: usize,
    pub k_scores: Vec<KScore>,
    pub points: Vec<ProjectedPoint>,
    pub cluster_reps: Vec<ClusterRepresentative>,
    pub axis: AxisPair<AxisSummary>,
    /// Top ranked correlations per axis in the default language
    pub correlations: AxisPair<Vec<RankedFeature>>,
}

/// What a request produces when the data is available
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    /// Too few songs matched to analyze
    InsufficientData { error: String, count: usize },
    Complete(AnalysisResult),
}

impl AnalysisOutcome {
    fn insufficient(count: usize) -> Self {
        AnalysisOutcome::InsufficientData {
            error: format!("Too few songs ({}). Need at least {}.", count, MIN_SUBSET_SIZE),
            count,
        }
    }
}

/// Run the full analysis for `request`
pub fn run_analysis(
    context: &AnalysisContext,
    request: &AnalysisRequest,
    config: &AnalysisConfig,
) -> Result<AnalysisOutcome, AnalysisError> {
    let store = context.store().ok_or(AnalysisError::DataUnavailable)?;
    let source = request.source();
    let collection = store
        .collection(source)
        .ok_or(AnalysisError::SourceUnavailable(source))?;
    let features = store.features.as_ref().ok_or(AnalysisError::FeaturesUnavailable)?;

    let subset = filter_subset(collection, &request.genre, &request.emotion);
    log::info!(
        "run_analysis: genre={:?} emotion={:?} source={} matched {} songs",
        request.genre,
        request.emotion,
        source,
        subset.len()
    );
    if subset.len() < MIN_SUBSET_SIZE {
        return Ok(AnalysisOutcome::insufficient(subset.len()));
    }

    let coords = project(subset.embeddings())?;
    let selection = select_clusters(&coords, request.mode(), config)?;
    let labels = &selection.clustering.labels;
    let centroids = &selection.clustering.centroids;
    let cluster_reps = find_representatives(&coords, labels, subset.ids(), centroids);

    let (x_axis, y_axis) = rayon::join(
        || interpret_column(&coords, Axis::X, subset.ids(), features, config),
        || interpret_column(&coords, Axis::Y, subset.ids(), features, config),
    );

    let points = subset
        .ids()
        .iter()
        .zip(coords.rows())
        .zip(labels)
        .map(|((id, row), &cluster)| ProjectedPoint {
            id: id.clone(),
            x: row[0],
            y: row[1],
            cluster,
            color: cluster_color(cluster),
        })
        .collect();

    let top = |interpretation: &AxisInterpretation| -> Vec<RankedFeature> {
        interpretation
            .ranked
            .get(config.default_language)
            .iter()
            .take(config.top_correlations)
            .cloned()
            .collect()
    };

    Ok(AnalysisOutcome::Complete(AnalysisResult {
        count: subset.len(),
        k: selection.k,
        k_scores: selection.scores,
        points,
        cluster_reps,
        axis: AxisPair {
            x: AxisSummary::from_interpretation(Axis::X, &x_axis),
            y: AxisSummary::from_interpretation(Axis::Y, &y_axis),
        },
        correlations: AxisPair {
            x: top(&x_axis),
            y: top(&y_axis),
        },
    }))
}

fn interpret_column(
    coords: &Array2<f64>,
    axis: Axis,
    ids: &[String],
    features: &FeatureTable,
    config: &AnalysisConfig,
) -> AxisInterpretation {
    let values = coords.column(axis.index()).to_vec();
    interpret_axis(&values, ids, features, config)
}

/// Genres and emotions available in the ground-truth collection
pub fn catalog_summary(context: &AnalysisContext) -> Result<CatalogSummary, AnalysisError> {
    let store = context.store().ok_or(AnalysisError::DataUnavailable)?;
    let collection = store
        .collection(DatasetSource::GroundTruth)
        .ok_or(AnalysisError::SourceUnavailable(DatasetSource::GroundTruth))?;
    Ok(CatalogSummary::from_collection(collection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DataStore;
    use crate::dataset::{FeatureRecord, SongCollection, SongRecord};

    fn song(id: &str, embedding: [f64; 2], genre: &str, emotion: &str) -> SongRecord {
        SongRecord {
            id: id.to_string(),
            embedding: embedding.to_vec(),
            genre: genre.to_string(),
            emotion: emotion.to_string(),
        }
    }

    /// Four pop songs spread along the first dimension (wide) and the second
    /// (narrow), uncorrelated, plus a small rock subset
    fn songs() -> SongCollection {
        SongCollection::from_records(vec![
            song("p1", [-3.0, 1.0], "pop", "happy"),
            song("p2", [-1.0, -1.0], "pop", "happy,calm"),
            song("r1", [0.0, 0.0], "rock", "angry"),
            song("p3", [1.0, -1.0], "pop", "sad,happy"),
            song("p4", [3.0, 1.0], "pop", "happy"),
            song("r2", [5.0, 5.0], "rock", "angry"),
        ])
        .unwrap()
    }

    /// Brightness tracks the first embedding dimension, energy the second
    fn features_for(collection: &SongCollection) -> FeatureTable {
        let rows = collection
            .songs()
            .iter()
            .map(|s| {
                FeatureRecord::new(s.id.clone())
                    .with_value("spectral_centroid", 1000.0 + 100.0 * s.embedding[0])
                    .with_value("energy", 0.5 + 0.1 * s.embedding[1])
            })
            .collect();
        FeatureTable::from_records(rows)
    }

    fn features() -> FeatureTable {
        features_for(&songs())
    }

    fn context() -> AnalysisContext {
        let store = DataStore::new(Some(songs()), Some(songs()), Some(features()));
        AnalysisContext::with_store(store)
    }

    fn analyze(
        context: &AnalysisContext,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        run_analysis(context, request, &AnalysisConfig::default())
    }

    fn complete(outcome: AnalysisOutcome) -> AnalysisResult {
        match outcome {
            AnalysisOutcome::Complete(result) => result,
            other => panic!("expected a complete result, got {other:?}"),
        }
    }

    #[test]
    fn test_pop_happy_subset() {
        let result = complete(analyze(&context(), &AnalysisRequest::new("pop", "happy")).unwrap());

        assert_eq!(result.count, 4);
        let ids: Vec<_> = result.points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3", "p4"]);

        let ks: Vec<_> = result.k_scores.iter().map(|s| s.k).collect();
        assert_eq!(ks, vec![2, 3]);
        assert!(result.points.iter().all(|p| p.cluster < result.k));
        assert!(result.points.iter().all(|p| p.color == cluster_color(p.cluster)));
        assert!(!result.cluster_reps.is_empty() && result.cluster_reps.len() <= result.k);
    }

    #[test]
    fn test_three_song_subset() {
        let collection = SongCollection::from_records(vec![
            song("a", [0.0, 0.0], "pop", "happy"),
            song("b", [1.0, 0.0], "pop", "happy"),
            song("c", [5.0, 5.0], "pop", "happy"),
        ])
        .unwrap();
        let features = features_for(&collection);
        let store = DataStore::new(Some(collection), None, Some(features));
        let context = AnalysisContext::with_store(store);
        let result = complete(analyze(&context, &AnalysisRequest::new("pop", "happy")).unwrap());

        assert_eq!(result.count, 3);
        assert_eq!(result.points.len(), 3);
        let ks: Vec<_> = result.k_scores.iter().map(|s| s.k).collect();
        assert_eq!(ks, vec![2]);
        assert_eq!(result.k, 2);
        assert_eq!(result.cluster_reps.len(), 2);

        // c sits far from a and b, so the first component follows both features
        assert_ne!(result.axis.x.label.en, "PC1");
        assert!(result.axis.x.r.is_some_and(|r| r >= 0.25));
        assert!(!result.correlations.x.is_empty());

        let y = &result.axis.y;
        assert!(y.label.en == "PC2" || y.r.is_some_and(|r| r >= 0.25));
    }

    #[test]
    fn test_axes_are_labeled_from_features() {
        let result = complete(analyze(&context(), &AnalysisRequest::new("pop", "happy")).unwrap());

        assert_eq!(result.axis.x.label.en, "Brightness");
        assert_eq!(result.axis.x.label.zh, "明亮度");
        assert_eq!(result.axis.x.r, Some(1.0));
        assert_eq!(result.axis.y.label.en, "Intensity");
        assert_eq!(result.axis.y.label.ja, "強度");

        assert_eq!(result.correlations.x[0].feature, "spectral_centroid");
        assert_eq!(result.correlations.x[0].abs_r, 1.0);
        assert!(result.correlations.x.len() <= 5);
    }

    #[test]
    fn test_unexplained_axes_fall_back() {
        let store = DataStore::new(Some(songs()), None, Some(FeatureTable::default()));
        let context = AnalysisContext::with_store(store);
        let result = complete(analyze(&context, &AnalysisRequest::new("pop", "happy")).unwrap());

        assert_eq!(result.axis.x.label.en, "PC1");
        assert_eq!(result.axis.y.label.ja, "PC2");
        assert_eq!(result.axis.x.r, None);
        assert_eq!(result.axis.y.polarity.zh, Polarity::default());
        assert!(result.correlations.x.is_empty());
    }

    #[test]
    fn test_two_songs_is_insufficient() {
        let outcome = analyze(&context(), &AnalysisRequest::new("rock", "angry")).unwrap();
        assert_eq!(
            outcome,
            AnalysisOutcome::InsufficientData {
                error: String::from("Too few songs (2). Need at least 3."),
                count: 2,
            }
        );

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Too few songs (2). Need at least 3.", "count": 2})
        );
    }

    #[test]
    fn test_manual_k_clamped_to_song_count() {
        let mut request = AnalysisRequest::new("pop", "happy");
        request.auto_k = false;
        request.manual_k = 10;

        let result = complete(analyze(&context(), &request).unwrap());
        assert_eq!(result.k, 4);
        assert!(result.k_scores.is_empty());
        assert_eq!(result.cluster_reps.len(), 4);
    }

    #[test]
    fn test_uninitialized_context_refuses() {
        let context = AnalysisContext::new();
        let err = analyze(&context, &AnalysisRequest::new("pop", "happy")).unwrap_err();
        assert!(matches!(err, AnalysisError::DataUnavailable));
        assert!(matches!(catalog_summary(&context), Err(AnalysisError::DataUnavailable)));
    }

    #[test]
    fn test_missing_source_and_features_refuse() {
        let store = DataStore::new(Some(songs()), None, Some(features()));
        let context = AnalysisContext::with_store(store);
        let mut request = AnalysisRequest::new("pop", "happy");
        request.version = String::from("B");
        request.version_mapping.insert(String::from("B"), String::from("Model"));
        let err = analyze(&context, &request).unwrap_err();
        assert!(matches!(err, AnalysisError::SourceUnavailable(DatasetSource::Predicted)));

        let context = AnalysisContext::with_store(DataStore::new(Some(songs()), None, None));
        let err = analyze(&context, &AnalysisRequest::new("pop", "happy")).unwrap_err();
        assert!(matches!(err, AnalysisError::FeaturesUnavailable));
    }

    #[test]
    fn test_version_mapping() {
        let mut request = AnalysisRequest::new("pop", "happy");
        assert_eq!(request.source(), DatasetSource::GroundTruth);

        request.version_mapping.insert(String::from("A"), String::from("Model"));
        request.version_mapping.insert(String::from("B"), String::from("GT"));
        assert_eq!(request.source(), DatasetSource::Predicted);
        request.version = String::from("B");
        assert_eq!(request.source(), DatasetSource::GroundTruth);
    }

    #[test]
    fn test_request_defaults_from_json() {
        let json = r#"{"genre": "pop", "emotion": "happy", "version": "A"}"#;
        let request: AnalysisRequest = serde_json::from_str(json).unwrap();
        assert!(request.auto_k);
        assert_eq!(request.manual_k, 3);
        assert!(request.version_mapping.is_empty());
    }

    #[test]
    fn test_result_json_shape() {
        let outcome = analyze(&context(), &AnalysisRequest::new("pop", "happy")).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["count"], 4);
        assert!(json["k_scores"][0]["score"].is_number());
        assert_eq!(json["points"][0]["id"], "p1");
        assert!(json["points"][0]["color"].is_string());
        assert!(json["cluster_reps"][0]["id"].is_string());
        assert_eq!(json["axis"]["x"]["label"]["en"], "Brightness");
        assert!(json["axis"]["y"]["polarity"]["zh"]["low"].is_string());
        assert_eq!(json["correlations"]["x"][0]["feature"], "spectral_centroid");
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let context = context();
        let request = AnalysisRequest::new("pop", "happy");
        let config = AnalysisConfig::default();
        let a = run_analysis(&context, &request, &config).unwrap();
        let b = run_analysis(&context, &request, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_catalog_summary() {
        let summary = catalog_summary(&context()).unwrap();
        assert_eq!(summary.genres, vec!["pop", "rock"]);
        assert_eq!(summary.emotions, vec!["angry", "calm", "happy", "sad"]);
    }
}
