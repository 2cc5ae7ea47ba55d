//! Common types for Songscape
//!
//! Languages, projected axes, dataset sources and the fixed constants shared
//! across the analysis pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of matched songs before a subset is analyzed
pub const MIN_SUBSET_SIZE: usize = 3;

/// Minimum number of feature-joined rows before an axis is interpreted
pub const MIN_JOINED_ROWS: usize = 3;

/// Number of supported display languages
pub const NUM_LANGUAGES: usize = 3;

/// Point colours, cycled by cluster index
pub const CLUSTER_PALETTE: [&str; 6] = [
    "#667eea", "#f59e0b", "#10b981", "#ef4444", "#8b5cf6", "#06b6d4",
];

/// Colour for a cluster index (wraps around the palette)
pub fn cluster_color(cluster: usize) -> &'static str {
    CLUSTER_PALETTE[cluster % CLUSTER_PALETTE.len()]
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Display language for axis labels and polarity words
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(usize)]
pub enum Language {
    #[default]
    En = 0,
    Zh = 1,
    Ja = 2,
}

impl Language {
    /// All languages in table order
    pub const ALL: [Language; NUM_LANGUAGES] = [Language::En, Language::Zh, Language::Ja];

    /// Index into per-language tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a language code, falling back to English for unknown codes
    pub fn from_code(code: &str) -> Self {
        match code {
            "zh" => Language::Zh,
            "ja" => Language::Ja,
            _ => Language::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Ja => "ja",
        }
    }
}

/// One value per supported language
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerLanguage<T> {
    pub en: T,
    pub zh: T,
    pub ja: T,
}

impl<T> PerLanguage<T> {
    /// Build by evaluating `f` once per language
    pub fn from_fn(mut f: impl FnMut(Language) -> T) -> Self {
        Self {
            en: f(Language::En),
            zh: f(Language::Zh),
            ja: f(Language::Ja),
        }
    }

    pub fn get(&self, language: Language) -> &T {
        match language {
            Language::En => &self.en,
            Language::Zh => &self.zh,
            Language::Ja => &self.ja,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerLanguage<U> {
        PerLanguage {
            en: f(self.en),
            zh: f(self.zh),
            ja: f(self.ja),
        }
    }
}

/// Projected axis (first or second principal component)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Axis {
    X = 0,
    Y = 1,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Column index in the projection matrix
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label shown when no audio feature explains the axis
    pub fn fallback_label(&self) -> &'static str {
        match self {
            Axis::X => "PC1",
            Axis::Y => "PC2",
        }
    }
}

/// Which of the two parallel song collections to analyze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetSource {
    /// Human-annotated embeddings and labels
    GroundTruth,
    /// Model-predicted embeddings and labels
    Predicted,
}

impl DatasetSource {
    /// Map a source label from a version mapping ("GT" is ground truth, anything else predicted)
    pub fn from_label(label: &str) -> Self {
        if label == "GT" {
            DatasetSource::GroundTruth
        } else {
            DatasetSource::Predicted
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::GroundTruth => write!(f, "ground truth"),
            DatasetSource::Predicted => write!(f, "predicted"),
        }
    }
}
