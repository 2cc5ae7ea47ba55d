//! Read-only analysis context
//!
//! The song collections and feature table are loaded once, before any
//! request is served, and shared by reference afterwards. There is no writer
//! after initialization, so concurrent requests read without locking.

use std::sync::OnceLock;

use crate::config::DataConfig;
use crate::dataset::{load_features, load_songs, FeatureTable, LoadError, SongCollection};
use crate::types::DatasetSource;

/// Everything a request reads
#[derive(Debug, Default)]
pub struct DataStore {
    pub ground_truth: Option<SongCollection>,
    pub predicted: Option<SongCollection>,
    pub features: Option<FeatureTable>,
}

impl DataStore {
    pub fn new(
        ground_truth: Option<SongCollection>,
        predicted: Option<SongCollection>,
        features: Option<FeatureTable>,
    ) -> Self {
        Self { ground_truth, predicted, features }
    }

    /// Load all data files named by `config`
    ///
    /// A missing file is logged and left absent; requests that need it are
    /// refused later. Unreadable or malformed files are errors.
    pub fn load(config: &DataConfig) -> Result<Self, LoadError> {
        log::info!("DataStore::load: Loading data from {:?}", config.data_dir);

        let ground_truth = load_optional(&config.ground_truth_path(), load_songs)?;
        let predicted = load_optional(&config.predicted_path(), load_songs)?;
        let features = load_optional(&config.features_path(), load_features)?;

        Ok(Self { ground_truth, predicted, features })
    }

    pub fn collection(&self, source: DatasetSource) -> Option<&SongCollection> {
        match source {
            DatasetSource::GroundTruth => self.ground_truth.as_ref(),
            DatasetSource::Predicted => self.predicted.as_ref(),
        }
    }
}

fn load_optional<T>(
    path: &std::path::Path,
    load: impl FnOnce(&std::path::Path) -> Result<T, LoadError>,
) -> Result<Option<T>, LoadError> {
    if !path.exists() {
        log::warn!("DataStore::load: File not found: {:?}", path);
        return Ok(None);
    }
    load(path).map(Some)
}

/// Shared, initialize-once holder for the [`DataStore`]
#[derive(Debug, Default)]
pub struct AnalysisContext {
    store: OnceLock<DataStore>,
}

impl AnalysisContext {
    /// Create an uninitialized context
    pub const fn new() -> Self {
        Self { store: OnceLock::new() }
    }

    /// Create a context that is already initialized with `store`
    pub fn with_store(store: DataStore) -> Self {
        let context = Self::new();
        let _ = context.store.set(store);
        context
    }

    /// Initialize from `load` unless already initialized
    ///
    /// Idempotent: once a store is in place later calls return it without
    /// running `load`.
    pub fn initialize<F>(&self, load: F) -> Result<&DataStore, LoadError>
    where
        F: FnOnce() -> Result<DataStore, LoadError>,
    {
        if let Some(store) = self.store.get() {
            return Ok(store);
        }
        let store = load()?;
        Ok(self.store.get_or_init(|| store))
    }

    pub fn is_ready(&self) -> bool {
        self.store.get().is_some()
    }

    /// The loaded store, or `None` before initialization
    pub fn store(&self) -> Option<&DataStore> {
        self.store.get()
    }
}
