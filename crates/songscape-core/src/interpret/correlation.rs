//! Pearson correlation of an axis against feature columns

use thiserror::Error;

use crate::dataset::FeatureTable;
use crate::semantics::AxisSemantics;
use crate::types::MIN_JOINED_ROWS;

/// Why a feature's correlation could not be computed
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SkipReason {
    #[error("series lengths differ")]
    LengthMismatch,

    #[error("fewer than two samples")]
    TooFewSamples,

    #[error("zero variance")]
    ZeroVariance,

    #[error("non-finite result")]
    NonFinite,
}

/// A computed correlation between an axis and one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureCorrelation {
    pub feature: &'static AxisSemantics,
    pub r: f64,
}

/// Per-feature result of correlating an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrelationOutcome {
    Computed(FeatureCorrelation),
    Skipped {
        feature: &'static AxisSemantics,
        reason: SkipReason,
    },
}

impl CorrelationOutcome {
    pub fn computed(&self) -> Option<&FeatureCorrelation> {
        match self {
            CorrelationOutcome::Computed(c) => Some(c),
            CorrelationOutcome::Skipped { .. } => None,
        }
    }
}

/// Pearson product-moment correlation coefficient
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, SkipReason> {
    if x.len() != y.len() {
        return Err(SkipReason::LengthMismatch);
    }
    if x.len() < 2 {
        return Err(SkipReason::TooFewSamples);
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Err(SkipReason::ZeroVariance);
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    if !r.is_finite() {
        return Err(SkipReason::NonFinite);
    }
    Ok(r.clamp(-1.0, 1.0))
}

/// Correlate axis `values` (aligned with `ids`) against every feature column
///
/// Songs without a usable feature row are dropped first. Returns nothing when
/// fewer than [`MIN_JOINED_ROWS`] songs remain.
pub fn correlate_axis(
    values: &[f64],
    ids: &[String],
    features: &FeatureTable,
) -> Vec<CorrelationOutcome> {
    let columns = features.columns();

    let mut axis = Vec::with_capacity(values.len());
    let mut rows = Vec::with_capacity(values.len());
    for (&value, id) in values.iter().zip(ids) {
        if let Some(row) = features.get(id).and_then(|r| r.usable_values(columns)) {
            axis.push(value);
            rows.push(row);
        }
    }

    if rows.len() < MIN_JOINED_ROWS {
        log::debug!(
            "correlate_axis: only {} of {} songs joined to features",
            rows.len(),
            ids.len()
        );
        return Vec::new();
    }

    columns
        .iter()
        .enumerate()
        .map(|(j, &feature)| {
            let column: Vec<f64> = rows.iter().map(|row| row[j]).collect();
            match pearson(&axis, &column) {
                Ok(r) => CorrelationOutcome::Computed(FeatureCorrelation { feature, r }),
                Err(reason) => {
                    log::debug!("correlate_axis: skipped {} ({})", feature.feature, reason);
                    CorrelationOutcome::Skipped { feature, reason }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FeatureRecord;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_pearson_perfect() {
        assert!((pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_known_value() {
        // sxy = 6, sxx = 10, syy = 6
        let r = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]).unwrap();
        assert!((r - 0.7745966692414834).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_failures() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), Err(SkipReason::ZeroVariance));
        assert_eq!(pearson(&[1.0], &[1.0]), Err(SkipReason::TooFewSamples));
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), Err(SkipReason::LengthMismatch));
    }

    #[test]
    fn test_unusable_rows_dropped() {
        let table = FeatureTable::from_records(vec![
            FeatureRecord::new("0").with_value("bpm", 100.0),
            FeatureRecord::new("1").with_value("bpm", 110.0),
            FeatureRecord::new("2").with_value("bpm", 999.0).with_error(),
            FeatureRecord::new("3").with_missing("bpm"),
            FeatureRecord::new("4").with_value("bpm", 120.0),
        ]);
        let values = [0.0, 1.0, -50.0, 7.0, 2.0];
        let outcomes = correlate_axis(&values, &ids(5), &table);

        assert_eq!(outcomes.len(), 1);
        let computed = outcomes[0].computed().unwrap();
        assert_eq!(computed.feature.feature, "bpm");
        assert!((computed.r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_joined_rows() {
        let table = FeatureTable::from_records(vec![
            FeatureRecord::new("0").with_value("bpm", 100.0),
            FeatureRecord::new("1").with_value("bpm", 110.0),
        ]);
        assert!(correlate_axis(&[0.0, 1.0, 2.0], &ids(3), &table).is_empty());
    }

    #[test]
    fn test_constant_feature_is_skipped() {
        let table = FeatureTable::from_records(
            (0..4)
                .map(|i| {
                    FeatureRecord::new(i.to_string())
                        .with_value("energy", 0.5)
                        .with_value("bpm", 100.0 + i as f64)
                })
                .collect(),
        );
        let outcomes = correlate_axis(&[0.0, 1.0, 2.0, 3.0], &ids(4), &table);

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes[0],
            CorrelationOutcome::Skipped { reason: SkipReason::ZeroVariance, .. }
        ));
        assert!(outcomes[1].computed().is_some());
    }
}
