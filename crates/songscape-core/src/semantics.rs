//! Axis semantics table
//!
//! Maps raw audio feature names to human-readable labels and the words used
//! for the low and high ends of an axis, in every supported language.

use crate::types::{Language, NUM_LANGUAGES};

/// Localized vocabulary for one audio feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSemantics {
    /// Raw feature column name
    pub feature: &'static str,
    /// Display label, indexed by [`Language::index`]
    pub labels: [&'static str; NUM_LANGUAGES],
    /// Word for the low end of the feature
    pub low: [&'static str; NUM_LANGUAGES],
    /// Word for the high end of the feature
    pub high: [&'static str; NUM_LANGUAGES],
}

impl AxisSemantics {
    pub fn label(&self, language: Language) -> &'static str {
        self.labels[language.index()]
    }

    /// (low word, high word) in natural order
    pub fn poles(&self, language: Language) -> (&'static str, &'static str) {
        (self.low[language.index()], self.high[language.index()])
    }
}

const fn entry(
    feature: &'static str,
    labels: [&'static str; NUM_LANGUAGES],
    low: [&'static str; NUM_LANGUAGES],
    high: [&'static str; NUM_LANGUAGES],
) -> AxisSemantics {
    AxisSemantics { feature, labels, low, high }
}

/// Every interpretable feature, in ranking order for equal correlations
pub static AXIS_SEMANTICS: [AxisSemantics; 15] = [
    entry(
        "energy",
        ["Intensity", "强度", "強度"],
        ["Soft", "柔和", "ソフト"],
        ["Powerful", "强劲", "パワフル"],
    ),
    entry(
        "rms",
        ["Loudness", "响度", "音量"],
        ["Quiet", "安静", "静か"],
        ["Loud", "响亮", "大きい"],
    ),
    entry(
        "energy_std",
        ["Dynamic Range", "动态范围", "ダイナミクス"],
        ["Flat", "平坦", "平坦"],
        ["Dynamic", "起伏", "ダイナミック"],
    ),
    entry("bpm", ["Tempo", "速度", "テンポ"], ["Slow", "慢", "遅い"], ["Fast", "快", "速い"]),
    entry(
        "danceability",
        ["Groove", "律动感", "グルーヴ"],
        ["Still", "静止", "静か"],
        ["Danceable", "适合跳舞", "ダンサブル"],
    ),
    entry(
        "beats_loudness",
        ["Beat Strength", "节拍强度", "ビート強度"],
        ["Weak", "弱", "弱い"],
        ["Strong", "强", "強い"],
    ),
    entry(
        "onset_rate",
        ["Note Density", "音符密度", "音符密度"],
        ["Sparse", "稀疏", "疎"],
        ["Dense", "密集", "密"],
    ),
    entry(
        "spectral_centroid",
        ["Brightness", "明亮度", "明るさ"],
        ["Dark", "暗沉", "暗い"],
        ["Bright", "明亮", "明るい"],
    ),
    entry(
        "hfc",
        ["High-Frequency", "高频", "高周波"],
        ["Muffled", "沉闷", "こもった"],
        ["Crisp", "清脆", "クリア"],
    ),
    entry(
        "spectral_rolloff",
        ["Sharpness", "锐度", "シャープさ"],
        ["Warm", "温暖", "温かい"],
        ["Sharp", "尖锐", "鋭い"],
    ),
    entry(
        "spectral_flux",
        ["Timbre Variation", "音色变化", "音色変化"],
        ["Stable", "稳定", "安定"],
        ["Varying", "多变", "変化"],
    ),
    entry(
        "spectral_entropy",
        ["Instrumentation", "配器复杂度", "楽器構成"],
        ["Simple", "简单", "シンプル"],
        ["Complex", "复杂", "複雑"],
    ),
    entry(
        "spectral_flatness_db",
        ["Sound Texture", "声音质感", "音質感"],
        ["Pure", "纯净", "純粋"],
        ["Noisy", "嘈杂", "ノイジー"],
    ),
    entry(
        "dissonance",
        ["Tension", "紧张感", "緊張感"],
        ["Consonant", "和谐", "協和"],
        ["Dissonant", "不和谐", "不協和"],
    ),
    entry(
        "key_strength",
        ["Tonal Clarity", "调性清晰度", "調性の明確さ"],
        ["Ambiguous", "模糊", "曖昧"],
        ["Clear", "清晰", "明確"],
    ),
];

/// Look up the semantics for a feature column
pub fn lookup(feature: &str) -> Option<&'static AxisSemantics> {
    AXIS_SEMANTICS.iter().find(|s| s.feature == feature)
}

/// Whether a column name is an interpretable feature
pub fn is_known_feature(feature: &str) -> bool {
    lookup(feature).is_some()
}
