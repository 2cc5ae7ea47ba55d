//! Axis interpretation against audio features
//!
//! Each projected axis is correlated with every interpretable audio feature.
//! Correlations are computed once per axis and then localized, so r-values
//! are identical in every language. The strongest features (within a tie
//! band) are merged into one composite label with polarity words.

mod correlation;
mod label;
mod ranking;

pub use correlation::{correlate_axis, pearson, CorrelationOutcome, FeatureCorrelation, SkipReason};
pub use label::{best_label, AxisLabel, Polarity};
pub use ranking::{rank_for_language, RankedFeature};

use crate::config::AnalysisConfig;
use crate::dataset::FeatureTable;
use crate::types::{Language, PerLanguage};

/// Ranked features and best label of one axis, in every language
#[derive(Debug, Clone, Default)]
pub struct AxisInterpretation {
    pub ranked: PerLanguage<Vec<RankedFeature>>,
    pub labels: PerLanguage<Option<AxisLabel>>,
}

impl AxisInterpretation {
    /// Strength of the label, shared across languages
    pub fn strength(&self) -> Option<f64> {
        self.labels.en.as_ref().map(|l| l.strength)
    }
}

/// Interpret one axis for every language
pub fn interpret_axis(
    values: &[f64],
    ids: &[String],
    features: &FeatureTable,
    config: &AnalysisConfig,
) -> AxisInterpretation {
    let outcomes = correlate_axis(values, ids, features);
    let ranked = PerLanguage::from_fn(|lang| rank_for_language(&outcomes, lang));
    let labels = PerLanguage::from_fn(|lang: Language| {
        best_label(ranked.get(lang), config.correlation_threshold, config.tie_band)
    });
    AxisInterpretation { ranked, labels }
}

/// Ranked correlations of one axis in a single language
pub fn analyze_axis(
    values: &[f64],
    ids: &[String],
    features: &FeatureTable,
    language: Language,
) -> Vec<RankedFeature> {
    rank_for_language(&correlate_axis(values, ids, features), language)
}
