//! Cluster representatives: the member closest to each centroid

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// The song standing in for one cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRepresentative {
    pub cluster: usize,
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Pick one representative per non-empty cluster
///
/// `coords`, `labels` and `ids` are aligned by point index. Distance ties go
/// to the earlier point. Output is ordered by cluster index.
pub fn find_representatives(
    coords: &Array2<f64>,
    labels: &[usize],
    ids: &[String],
    centroids: &Array2<f64>,
) -> Vec<ClusterRepresentative> {
    let mut best: Vec<Option<(usize, f64)>> = vec![None; centroids.nrows()];

    for (i, &cluster) in labels.iter().enumerate() {
        let Some(slot) = best.get_mut(cluster) else {
            log::warn!("find_representatives: label {} has no centroid", cluster);
            continue;
        };
        let dist = distance(coords.row(i), centroids.row(cluster));
        if slot.map_or(true, |(_, d)| dist < d) {
            *slot = Some((i, dist));
        }
    }

    best.into_iter()
        .enumerate()
        .filter_map(|(cluster, slot)| {
            slot.map(|(i, _)| ClusterRepresentative {
                cluster,
                id: ids[i].clone(),
                x: coords[[i, 0]],
                y: coords[[i, 1]],
            })
        })
        .collect()
}

fn distance(p: ArrayView1<f64>, q: ArrayView1<f64>) -> f64 {
    p.iter().zip(q.iter()).map(|(a, b)| (a - b) * (a - b)).sum::<f64>().sqrt()
}
