//! Song and feature record types

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::load::LoadError;
use crate::semantics::{AxisSemantics, AXIS_SEMANTICS};

/// Song identifiers may be stored as strings or integers
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

fn unknown_emotion() -> String {
    String::from("Unknown")
}

/// One song in a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub embedding: Vec<f64>,
    pub genre: String,
    /// Comma-separated emotion labels, or "Unknown"
    #[serde(default = "unknown_emotion")]
    pub emotion: String,
}

/// An immutable song collection with a fixed embedding dimension
#[derive(Debug, Clone, Default)]
pub struct SongCollection {
    songs: Vec<SongRecord>,
    dimension: usize,
}

impl SongCollection {
    /// Build a collection, checking every embedding has the same length
    pub fn from_records(songs: Vec<SongRecord>) -> Result<Self, LoadError> {
        let dimension = songs.first().map(|s| s.embedding.len()).unwrap_or(0);

        if let Some(bad) = songs.iter().find(|s| s.embedding.len() != dimension) {
            return Err(LoadError::InconsistentDimension {
                id: bad.id.clone(),
                expected: dimension,
                found: bad.embedding.len(),
            });
        }

        Ok(Self { songs, dimension })
    }

    pub fn songs(&self) -> &[SongRecord] {
        &self.songs
    }

    /// Embedding length shared by every song
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// One row of the audio feature table
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub id: String,
    /// Row was flagged as failed during feature extraction
    pub has_error: bool,
    /// Feature values by column; `None` marks a missing value
    pub values: BTreeMap<String, Option<f64>>,
}

impl FeatureRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            has_error: false,
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, feature: &str, value: f64) -> Self {
        self.values.insert(feature.to_string(), Some(value));
        self
    }

    pub fn with_missing(mut self, feature: &str) -> Self {
        self.values.insert(feature.to_string(), None);
        self
    }

    pub fn with_error(mut self) -> Self {
        self.has_error = true;
        self
    }

    pub fn value(&self, feature: &str) -> Option<f64> {
        self.values.get(feature).copied().flatten()
    }

    /// Values for `columns` in order, or `None` if this row cannot be used
    ///
    /// A row is unusable when it carries an error marker or lacks a finite
    /// value for any of the columns.
    pub fn usable_values(&self, columns: &[&'static AxisSemantics]) -> Option<Vec<f64>> {
        if self.has_error {
            return None;
        }
        columns
            .iter()
            .map(|c| self.value(c.feature).filter(|v| v.is_finite()))
            .collect()
    }
}

/// The audio feature table, indexed by song id
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    rows: Vec<FeatureRecord>,
    index: HashMap<String, usize>,
    columns: Vec<&'static AxisSemantics>,
}

impl FeatureTable {
    /// Build the table; the first row wins when an id repeats
    pub fn from_records(rows: Vec<FeatureRecord>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            index.entry(row.id.clone()).or_insert(i);
        }

        let columns = AXIS_SEMANTICS
            .iter()
            .filter(|s| rows.iter().any(|r| r.values.contains_key(s.feature)))
            .collect();

        Self { rows, index, columns }
    }

    pub fn get(&self, id: &str) -> Option<&FeatureRecord> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    /// Interpretable feature columns present in the table, in semantics-table order
    pub fn columns(&self) -> &[&'static AxisSemantics] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
