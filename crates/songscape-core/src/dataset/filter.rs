//! Genre/emotion subset selection

use ndarray::{Array2, ArrayView1};

use super::records::SongCollection;

/// Songs matching a query, as parallel ids and embedding rows
///
/// Row `i` of `embeddings` belongs to `ids[i]`; both keep the source
/// collection's order.
#[derive(Debug, Clone)]
pub struct Subset {
    ids: Vec<String>,
    embeddings: Array2<f64>,
    mask: Vec<bool>,
}

impl Subset {
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// n × d embedding matrix
    pub fn embeddings(&self) -> &Array2<f64> {
        &self.embeddings
    }

    /// Membership flag for every song of the source collection
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Select songs whose genre equals `genre` and whose emotion field contains `emotion`
///
/// Genre matching is exact and case-sensitive. Emotion matching is a plain
/// substring test on the raw comma-separated field, so "sad" also matches
/// inside "sadness".
pub fn filter_subset(collection: &SongCollection, genre: &str, emotion: &str) -> Subset {
    let mask: Vec<bool> = collection
        .songs()
        .iter()
        .map(|s| s.genre == genre && s.emotion.contains(emotion))
        .collect();

    let selected: Vec<_> = collection
        .songs()
        .iter()
        .zip(&mask)
        .filter(|(_, keep)| **keep)
        .map(|(song, _)| song)
        .collect();

    let mut embeddings = Array2::<f64>::zeros((selected.len(), collection.dimension()));
    for (mut row, song) in embeddings.rows_mut().into_iter().zip(&selected) {
        row.assign(&ArrayView1::from(song.embedding.as_slice()));
    }

    let ids = selected.iter().map(|s| s.id.clone()).collect();

    log::debug!(
        "filter_subset: genre={:?} emotion={:?} matched {} of {}",
        genre,
        emotion,
        selected.len(),
        collection.len()
    );

    Subset { ids, embeddings, mask }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SongRecord;

    fn song(id: &str, genre: &str, emotion: &str, embedding: Vec<f64>) -> SongRecord {
        SongRecord {
            id: id.to_string(),
            embedding,
            genre: genre.to_string(),
            emotion: emotion.to_string(),
        }
    }

    fn collection() -> SongCollection {
        SongCollection::from_records(vec![
            song("1", "pop", "happy", vec![1.0, 0.0]),
            song("2", "rock", "happy", vec![2.0, 0.0]),
            song("3", "pop", "sad,happy", vec![3.0, 0.0]),
            song("4", "Pop", "happy", vec![4.0, 0.0]),
            song("5", "pop", "Unknown", vec![5.0, 0.0]),
            song("6", "pop", "unhappy", vec![6.0, 0.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_filter_genre_exact_and_emotion_substring() {
        let subset = filter_subset(&collection(), "pop", "happy");

        assert_eq!(subset.ids(), &["1", "3", "6"]);
        assert_eq!(subset.mask(), &[true, false, true, false, false, true]);
        assert_eq!(subset.embeddings().dim(), (3, 2));
        assert_eq!(subset.embeddings()[[1, 0]], 3.0);
        assert_eq!(subset.embeddings()[[2, 0]], 6.0);
    }

    #[test]
    fn test_filter_no_match_is_empty() {
        let subset = filter_subset(&collection(), "jazz", "happy");
        assert!(subset.is_empty());
        assert_eq!(subset.embeddings().dim(), (0, 2));
        assert!(subset.mask().iter().all(|&m| !m));
    }

    #[test]
    fn test_ids_and_rows_stay_parallel() {
        let subset = filter_subset(&collection(), "pop", "");
        assert_eq!(subset.len(), 4);
        assert_eq!(subset.embeddings().nrows(), subset.ids().len());
        for (row, id) in subset.embeddings().rows().into_iter().zip(subset.ids()) {
            assert_eq!(row[0], id.parse::<f64>().unwrap());
        }
    }
}
