//! Composite axis label from ranked correlations

use serde::{Deserialize, Serialize};

use super::ranking::RankedFeature;
use crate::types::round_to;

/// Absorbs float noise in the tie-band comparison
const TIE_EPSILON: f64 = 1e-9;

/// Words for the two ends of an axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polarity {
    /// Newline-joined words for the negative end
    pub low: String,
    /// Newline-joined words for the positive end
    pub high: String,
    /// Features that contributed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

/// Label chosen for one axis in one language
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    /// Feature labels joined with " / "
    pub label: String,
    /// Strongest |r|, rounded to 2 decimals
    pub strength: f64,
    pub polarity: Polarity,
}

/// Merge the strongest features of `ranked` into one label
///
/// `ranked` must be sorted by descending |r|. Features below `threshold` are
/// ignored; of the rest, all within `tie_band` of the strongest are merged.
/// The sign of the strongest r orients the polarity words for the whole group.
pub fn best_label(ranked: &[RankedFeature], threshold: f64, tie_band: f64) -> Option<AxisLabel> {
    let top = ranked.iter().find(|f| f.abs_r >= threshold)?;
    let reference = top.abs_r;

    let group: Vec<&RankedFeature> = ranked
        .iter()
        .filter(|f| f.abs_r >= threshold && reference - f.abs_r <= tie_band + TIE_EPSILON)
        .collect();

    let positive = top.r > 0.0;
    let (low, high): (Vec<&str>, Vec<&str>) = group
        .iter()
        .map(|f| if positive { (f.low, f.high) } else { (f.high, f.low) })
        .unzip();

    Some(AxisLabel {
        label: group.iter().map(|f| f.label).collect::<Vec<_>>().join(" / "),
        strength: round_to(reference, 2),
        polarity: Polarity {
            low: low.join("\n"),
            high: high.join("\n"),
            features: group.iter().map(|f| f.feature.to_string()).collect(),
        },
    })
}
