//! JSON loaders for song collections and the feature table

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::records::{FeatureRecord, FeatureTable, SongCollection, SongRecord};

/// Errors that can occur while loading data files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read data file: {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse data file: {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Song '{id}' has embedding length {found}, expected {expected}")]
    InconsistentDimension {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("Feature row {row} has no usable id")]
    MissingFeatureId { row: usize },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a song collection from a JSON array of song records
pub fn load_songs(path: &Path) -> Result<SongCollection, LoadError> {
    let songs: Vec<SongRecord> = read_json(path)?;
    let collection = SongCollection::from_records(songs)?;
    log::info!(
        "load_songs: Loaded {} songs ({} dims) from {:?}",
        collection.len(),
        collection.dimension(),
        path
    );
    Ok(collection)
}

/// Load the feature table from a JSON array of objects
///
/// Each object carries an `id`, an optional `error` marker and one key per
/// feature column. `null` or non-numeric values count as missing.
pub fn load_features(path: &Path) -> Result<FeatureTable, LoadError> {
    let rows: Vec<Map<String, Value>> = read_json(path)?;
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| feature_record_from_row(i, row))
        .collect::<Result<Vec<_>, _>>()?;

    let table = FeatureTable::from_records(records);
    log::info!(
        "load_features: Loaded {} rows with {} interpretable columns from {:?}",
        table.len(),
        table.columns().len(),
        path
    );
    Ok(table)
}

fn feature_record_from_row(
    row: usize,
    mut fields: Map<String, Value>,
) -> Result<FeatureRecord, LoadError> {
    let id = match fields.remove("id") {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(LoadError::MissingFeatureId { row }),
    };

    let has_error = fields.remove("error").map(is_error_marker).unwrap_or(false);

    let values = fields
        .into_iter()
        .map(|(name, value)| (name, value.as_f64().filter(|v| v.is_finite())))
        .collect();

    Ok(FeatureRecord { id, has_error, values })
}

/// Any non-empty, non-false value in the `error` column marks a failed row
fn is_error_marker(value: Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}
