//! Song collections, audio feature table and subset filtering
//!
//! Two parallel song collections exist (ground truth and model predicted)
//! over the same song universe. Both are read once at startup together with
//! the audio feature table and are never mutated afterwards.

mod catalog;
mod filter;
mod load;
mod records;

pub use catalog::CatalogSummary;
pub use filter::{filter_subset, Subset};
pub use load::{load_features, load_songs, LoadError};
pub use records::{FeatureRecord, FeatureTable, SongCollection, SongRecord};
