use serde::{Deserialize, Serialize};

/// Individual component scores cached by the composite scorer. Every
/// component lies in [0.0, 1.0]; `None` means the scorer has not run (or a
/// component had no usable inputs and recorded its neutral default).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBreakdown {
    pub quality_avg: Option<f64>,
    pub aesthetics: Option<f64>,
    pub people: Option<f64>,
    pub content: Option<f64>,
    pub density: Option<f64>,
    pub novelty: Option<f64>,
    pub holiday: Option<f64>,
    pub recency: Option<f64>,
    pub location_score: Option<f64>,
    pub poi_score: Option<f64>,
    pub temporal_score: Option<f64>,
    pub liveliness: Option<f64>,
}

impl ScoreBreakdown {
    /// All components with their stable param keys, for iteration in tests
    /// and telemetry.
    pub fn components(&self) -> [(&'static str, Option<f64>); 12] {
        [
            ("quality_avg", self.quality_avg),
            ("aesthetics", self.aesthetics),
            ("people", self.people),
            ("content", self.content),
            ("density", self.density),
            ("novelty", self.novelty),
            ("holiday", self.holiday),
            ("recency", self.recency),
            ("location_score", self.location_score),
            ("poi_score", self.poi_score),
            ("temporal_score", self.temporal_score),
            ("liveliness", self.liveliness),
        ]
    }
}
