//! Core data model types for cogrisk.
//!
//! These are the measurement inputs the scorer consumes and the assessment
//! record it produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;
use crate::weights::{DEFAULT_DOMAIN_SCORE, DEFAULT_SPEECH_METRICS};

/// Per-domain cognitive sub-scores, each on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveScores {
    pub memory: f64,
    pub attention: f64,
    pub language: f64,
    pub executive: f64,
    pub visuospatial: f64,
}

impl Default for CognitiveScores {
    fn default() -> Self {
        Self {
            memory: DEFAULT_DOMAIN_SCORE,
            attention: DEFAULT_DOMAIN_SCORE,
            language: DEFAULT_DOMAIN_SCORE,
            executive: DEFAULT_DOMAIN_SCORE,
            visuospatial: DEFAULT_DOMAIN_SCORE,
        }
    }
}

impl CognitiveScores {
    /// Return a copy with every sub-score clamped to [0, 100].
    pub fn clamped(&self) -> Self {
        Self {
            memory: clamp_percent(self.memory),
            attention: clamp_percent(self.attention),
            language: clamp_percent(self.language),
            executive: clamp_percent(self.executive),
            visuospatial: clamp_percent(self.visuospatial),
        }
    }
}

/// Measurements extracted from a speech recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechMetrics {
    /// Words per minute.
    pub speech_rate: f64,
    /// Pauses per minute.
    pub pause_frequency: f64,
    /// Tremor severity, 0–100 (higher is worse).
    pub voice_tremor_score: f64,
    pub articulation_clarity: f64,
    pub semantic_fluency_score: f64,
    pub phonemic_fluency_score: f64,
}

impl Default for SpeechMetrics {
    fn default() -> Self {
        DEFAULT_SPEECH_METRICS
    }
}

impl SpeechMetrics {
    /// Return a copy with the percentage fields clamped to [0, 100] and the
    /// rate fields floored at zero.
    pub fn clamped(&self) -> Self {
        Self {
            speech_rate: floor_zero(self.speech_rate),
            pause_frequency: floor_zero(self.pause_frequency),
            voice_tremor_score: clamp_percent(self.voice_tremor_score),
            articulation_clarity: clamp_percent(self.articulation_clarity),
            semantic_fluency_score: clamp_percent(self.semantic_fluency_score),
            phonemic_fluency_score: clamp_percent(self.phonemic_fluency_score),
        }
    }
}

/// Optional demographic factors that contribute risk factors on their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalFactors {
    /// Age in whole years.
    #[serde(default)]
    pub age: Option<u32>,
    /// Education level tag, e.g. "low" or "college".
    #[serde(default)]
    pub education_level: Option<String>,
}

/// Categorical risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" | "medium" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            other => Err(InputError::UnknownRiskLevel(other.to_string())),
        }
    }
}

/// Result of the overall risk calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallRisk {
    /// 0–100, higher means more risk.
    pub score: u8,
    pub level: RiskLevel,
    /// Self-reported certainty in [0, 1], two decimals.
    pub confidence: f64,
}

/// The full outcome of scoring one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub cognitive_score: u8,
    pub speech_score: u8,
    pub memory_score: u8,
    pub overall_risk_score: u8,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub confidence_level: f64,
}

/// Clamp a percentage to [0, 100]. NaN maps to 0.
pub(crate) fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn floor_zero(value: f64) -> f64 {
    if value.is_nan() {
        value
    } else {
        value.max(0.0)
    }
}

/// Round half-up and clamp into a 0–100 score.
pub(crate) fn to_score(value: f64) -> u8 {
    let rounded = (value + 0.5).floor();
    clamp_percent(rounded) as u8
}
