//! Genre and emotion vocabulary of a collection

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::records::SongCollection;

/// Distinct genres and emotion tokens available for querying
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub genres: Vec<String>,
    pub emotions: Vec<String>,
}

impl CatalogSummary {
    /// Collect sorted genres and sorted emotion tokens
    ///
    /// Emotion fields are split on ',' and trimmed; "Unknown" and empty
    /// tokens are left out.
    pub fn from_collection(collection: &SongCollection) -> Self {
        let genres: BTreeSet<&str> = collection.songs().iter().map(|s| s.genre.as_str()).collect();

        let emotions: BTreeSet<&str> = collection
            .songs()
            .iter()
            .filter(|s| !s.emotion.is_empty() && s.emotion != "Unknown")
            .flat_map(|s| s.emotion.split(','))
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            genres: genres.into_iter().map(String::from).collect(),
            emotions: emotions.into_iter().map(String::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SongRecord;

    fn song(genre: &str, emotion: &str) -> SongRecord {
        SongRecord {
            id: format!("{genre}-{emotion}"),
            embedding: vec![0.0],
            genre: genre.to_string(),
            emotion: emotion.to_string(),
        }
    }

    #[test]
    fn test_summary_sorted_and_deduplicated() {
        let collection = SongCollection::from_records(vec![
            song("rock", "sad, angry"),
            song("pop", "happy"),
            song("pop", "Unknown"),
            song("jazz", "calm,happy,"),
        ])
        .unwrap();

        let summary = CatalogSummary::from_collection(&collection);
        assert_eq!(summary.genres, vec!["jazz", "pop", "rock"]);
        assert_eq!(summary.emotions, vec!["angry", "calm", "happy", "sad"]);
    }
}
