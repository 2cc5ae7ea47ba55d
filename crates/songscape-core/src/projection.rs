//! Principal component projection to two dimensions
//!
//! The embeddings are centered and projected onto their two directions of
//! largest variance, taken from a thin SVD of the centered matrix
//! (scores = U·Σ). Each component's sign is fixed so that its
//! largest-magnitude score is positive, which keeps repeated runs identical.

use faer::Mat;
use ndarray::{Array1, Array2, Axis};
use thiserror::Error;

/// Number of output components
pub const NUM_COMPONENTS: usize = 2;

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("Projection needs at least 2 samples, got {0}")]
    TooFewSamples(usize),

    #[error("Embeddings have zero dimensions")]
    NoDimensions,
}

/// Project `embeddings` (n × d) onto the top two principal components (n × 2)
///
/// Components that do not exist (d = 1, or all variance on one direction)
/// come out as zeros.
pub fn project(embeddings: &Array2<f64>) -> Result<Array2<f64>, ProjectionError> {
    let (n, d) = embeddings.dim();
    if n < 2 {
        return Err(ProjectionError::TooFewSamples(n));
    }
    if d == 0 {
        return Err(ProjectionError::NoDimensions);
    }

    let centered = center(embeddings);
    let mut scores = principal_scores(&centered);
    fix_signs(&mut scores);

    log::debug!("project: {} samples × {} dims → {} components", n, d, NUM_COMPONENTS);
    Ok(scores)
}

fn center(x: &Array2<f64>) -> Array2<f64> {
    let mean = x.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(x.ncols()));
    x - &mean
}

/// First two columns of U·Σ; numerically zero singular values give zero columns
fn principal_scores(centered: &Array2<f64>) -> Array2<f64> {
    let (n, d) = centered.dim();
    let matrix = Mat::<f64>::from_fn(n, d, |i, j| centered[[i, j]]);
    let svd = matrix.thin_svd();
    let u = svd.u();
    let sigma = svd.s_diagonal();

    let rank = sigma.nrows();
    let largest = if rank > 0 { sigma.read(0) } else { 0.0 };
    let cutoff = largest * f64::EPSILON * n.max(d) as f64;

    let mut scores = Array2::<f64>::zeros((n, NUM_COMPONENTS));
    for component in 0..NUM_COMPONENTS.min(rank) {
        let s = sigma.read(component);
        if s <= cutoff {
            continue;
        }
        for i in 0..n {
            scores[[i, component]] = u.read(i, component) * s;
        }
    }
    scores
}

/// Make the largest-magnitude score of every component positive
fn fix_signs(scores: &mut Array2<f64>) {
    for mut column in scores.columns_mut() {
        let mut pivot = 0.0f64;
        for &v in column.iter() {
            if v.abs() > pivot.abs() {
                pivot = v;
            }
        }
        if pivot < 0.0 {
            column.mapv_inplace(|v| -v);
        }
    }
}
