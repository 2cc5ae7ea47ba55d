//! Localized ranking of computed correlations

use serde::Serialize;

use super::correlation::CorrelationOutcome;
use crate::types::{round_to, Language};

/// One feature's correlation with an axis, localized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFeature {
    pub feature: &'static str,
    pub label: &'static str,
    pub low: &'static str,
    pub high: &'static str,
    /// Rounded to 3 decimals
    pub r: f64,
    /// Rounded to 3 decimals
    pub abs_r: f64,
}

/// Computed correlations sorted by descending |r|
///
/// Skipped features are left out. The sort is stable, so equal |r| keep the
/// feature table order.
pub fn rank_for_language(
    outcomes: &[CorrelationOutcome],
    language: Language,
) -> Vec<RankedFeature> {
    let mut ranked: Vec<RankedFeature> = outcomes
        .iter()
        .filter_map(CorrelationOutcome::computed)
        .map(|c| {
            let (low, high) = c.feature.poles(language);
            RankedFeature {
                feature: c.feature.feature,
                label: c.feature.label(language),
                low,
                high,
                r: round_to(c.r, 3),
                abs_r: round_to(c.r.abs(), 3),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.abs_r.total_cmp(&a.abs_r));
    ranked
}
