//! Mean silhouette coefficient

use ndarray::{Array2, ArrayView1};

use super::ClusterError;

/// Mean silhouette over all points, Euclidean distance
///
/// For point i with own-cluster mean distance a and nearest other-cluster
/// mean distance b, s = (b - a) / max(a, b). Points alone in their cluster
/// score 0. Defined only for 2 ≤ distinct labels ≤ n - 1.
pub fn silhouette_score(points: &Array2<f64>, labels: &[usize]) -> Result<f64, ClusterError> {
    let n = points.nrows();
    if n == 0 {
        return Err(ClusterError::NoPoints);
    }

    let num_labels = labels.iter().max().map_or(0, |&m| m + 1);
    let mut sizes = vec![0usize; num_labels];
    for &label in labels {
        sizes[label] += 1;
    }
    let clusters = sizes.iter().filter(|&&s| s > 0).count();
    if clusters < 2 || clusters >= n {
        return Err(ClusterError::Degenerate { clusters, points: n });
    }

    let mut total = 0.0;
    let mut sums = vec![0.0f64; num_labels];
    for i in 0..n {
        sums.iter_mut().for_each(|s| *s = 0.0);
        for j in 0..n {
            if i != j {
                sums[labels[j]] += distance(points.row(i), points.row(j));
            }
        }

        let own = labels[i];
        if sizes[own] <= 1 {
            continue;
        }
        let a = sums[own] / (sizes[own] - 1) as f64;
        let b = (0..num_labels)
            .filter(|&c| c != own && sizes[c] > 0)
            .map(|c| sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    Ok(total / n as f64)
}

fn distance(p: ArrayView1<f64>, q: ArrayView1<f64>) -> f64 {
    p.iter().zip(q.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}
