//! Weight tables, threshold ladders, and fixed texts used by the scorer.
//!
//! Every weighted group sums to 1.0.

use crate::model::{RiskLevel, SpeechMetrics};

/// Weights for combining the five cognitive domains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CognitiveWeights {
    pub memory: f64,
    pub attention: f64,
    pub language: f64,
    pub executive: f64,
    pub visuospatial: f64,
}

pub const COGNITIVE_WEIGHTS: CognitiveWeights = CognitiveWeights {
    memory: 0.35,
    attention: 0.15,
    language: 0.20,
    executive: 0.20,
    visuospatial: 0.10,
};

/// Weights for combining normalized speech measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechWeights {
    pub speech_rate: f64,
    pub pause_frequency: f64,
    pub voice_tremor: f64,
    pub articulation: f64,
    pub semantic_fluency: f64,
    pub phonemic_fluency: f64,
}

pub const SPEECH_WEIGHTS: SpeechWeights = SpeechWeights {
    speech_rate: 0.20,
    pause_frequency: 0.15,
    voice_tremor: 0.10,
    articulation: 0.25,
    semantic_fluency: 0.15,
    phonemic_fluency: 0.15,
};

/// Weights applied to the deficits (100 - score) in the overall risk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallWeights {
    pub cognitive: f64,
    pub speech: f64,
    pub memory: f64,
}

pub const OVERALL_WEIGHTS: OverallWeights = OverallWeights {
    cognitive: 0.5,
    speech: 0.3,
    memory: 0.2,
};

/// Overall scores strictly below this classify as low.
pub const LOW_RISK_BELOW: u8 = 30;
/// Overall scores strictly below this (and not low) classify as moderate.
pub const MODERATE_RISK_BELOW: u8 = 60;

/// A goodness band: values in `[min, max]` map to `score`, with optional
/// open ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub min_inclusive: bool,
    pub max: f64,
    pub max_inclusive: bool,
    pub score: f64,
}

impl Band {
    const fn closed(min: f64, max: f64, score: f64) -> Self {
        Self {
            min,
            min_inclusive: true,
            max,
            max_inclusive: true,
            score,
        }
    }

    const fn below(min: f64, max: f64, score: f64) -> Self {
        Self {
            min,
            min_inclusive: true,
            max,
            max_inclusive: false,
            score,
        }
    }

    const fn above(min: f64, max: f64, score: f64) -> Self {
        Self {
            min,
            min_inclusive: false,
            max,
            max_inclusive: true,
            score,
        }
    }

    /// Whether `value` falls inside this band. NaN never does.
    pub fn contains(&self, value: f64) -> bool {
        let lower = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        let upper = if self.max_inclusive {
            value <= self.max
        } else {
            value < self.max
        };
        lower && upper
    }
}

/// A piecewise band table with a fallback score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTable {
    pub bands: &'static [Band],
    pub otherwise: f64,
}

impl BandTable {
    /// Score for the first band containing `value`, or the fallback.
    pub fn score(&self, value: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| band.contains(value))
            .map(|band| band.score)
            .unwrap_or(self.otherwise)
    }
}

/// Speech rate (words/min), optimal 120–150.
pub const SPEECH_RATE_BANDS: BandTable = BandTable {
    bands: &[
        Band::closed(120.0, 150.0, 100.0),
        Band::below(100.0, 120.0, 80.0),
        Band::above(150.0, 170.0, 80.0),
        Band::below(80.0, 100.0, 60.0),
        Band::above(170.0, 200.0, 60.0),
    ],
    otherwise: 40.0,
};

/// Pause frequency (pauses/min), optimal 5–10.
pub const PAUSE_FREQUENCY_BANDS: BandTable = BandTable {
    bands: &[
        Band::closed(5.0, 10.0, 100.0),
        Band::below(3.0, 5.0, 80.0),
        Band::above(10.0, 15.0, 70.0),
        Band::below(1.0, 3.0, 60.0),
        Band::above(15.0, 20.0, 50.0),
    ],
    otherwise: 30.0,
};

/// Score used for a cognitive domain with no recorded tasks.
pub const DEFAULT_DOMAIN_SCORE: f64 = 75.0;

/// Measurements assumed when no speech analysis was recorded.
pub const DEFAULT_SPEECH_METRICS: SpeechMetrics = SpeechMetrics {
    speech_rate: 120.0,
    pause_frequency: 8.0,
    voice_tremor_score: 20.0,
    articulation_clarity: 85.0,
    semantic_fluency_score: 80.0,
    phonemic_fluency_score: 75.0,
};

/// A two-tier threshold ladder for one score category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorLadder {
    pub severe_below: u8,
    pub severe: &'static str,
    pub mild_below: u8,
    pub mild: &'static str,
}

impl FactorLadder {
    /// The most severe factor triggered by `score`, if any.
    pub fn factor(&self, score: u8) -> Option<&'static str> {
        if score < self.severe_below {
            Some(self.severe)
        } else if score < self.mild_below {
            Some(self.mild)
        } else {
            None
        }
    }
}

pub const COGNITIVE_LADDER: FactorLadder = FactorLadder {
    severe_below: 70,
    severe: "Significant cognitive impairment detected",
    mild_below: 85,
    mild: "Mild cognitive decline observed",
};

pub const MEMORY_LADDER: FactorLadder = FactorLadder {
    severe_below: 60,
    severe: "Severe memory impairment",
    mild_below: 75,
    mild: "Moderate memory difficulties",
};

pub const SPEECH_LADDER: FactorLadder = FactorLadder {
    severe_below: 65,
    severe: "Significant speech and language abnormalities",
    mild_below: 80,
    mild: "Mild speech pattern irregularities",
};

/// Ages strictly above this add an age risk factor.
pub const ADVANCED_AGE_ABOVE: u32 = 75;
pub const ADVANCED_AGE_FACTOR: &str = "Advanced age (>75 years)";

/// Education level tag that adds an education risk factor.
pub const LIMITED_EDUCATION_LEVEL: &str = "low";
pub const LIMITED_EDUCATION_FACTOR: &str = "Limited educational background";

/// Base recommendations for each risk level.
pub fn base_recommendations(level: RiskLevel) -> &'static [&'static str; 4] {
    match level {
        RiskLevel::High => &[
            "Immediate consultation with a neurologist or geriatrician recommended",
            "Comprehensive neuropsychological evaluation advised",
            "Consider brain imaging (MRI) to rule out structural abnormalities",
            "Family members should be informed and involved in care planning",
        ],
        RiskLevel::Moderate => &[
            "Follow-up assessment in 6 months recommended",
            "Consultation with healthcare provider to discuss findings",
            "Consider cognitive training exercises and mental stimulation",
            "Monitor for changes in daily functioning",
        ],
        RiskLevel::Low => &[
            "Continue regular health check-ups",
            "Maintain cognitive engagement through reading, puzzles, and social activities",
            "Follow-up screening in 12-24 months",
            "Maintain healthy lifestyle with regular exercise and balanced diet",
        ],
    }
}

/// Substring that marks a memory-related risk factor.
pub const MEMORY_KEYWORD: &str = "memory";
pub const MEMORY_RECOMMENDATION: &str = "Memory training exercises and strategies may be beneficial";

/// Substring that marks a speech-related risk factor.
pub const SPEECH_KEYWORD: &str = "speech";
pub const SPEECH_RECOMMENDATION: &str = "Speech therapy evaluation may be helpful";

/// Half-open confidence band `[min, max)` for a risk level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBand {
    pub min: f64,
    pub max: f64,
}

impl ConfidenceBand {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Confidence band for each risk level.
pub fn confidence_band(level: RiskLevel) -> ConfidenceBand {
    match level {
        RiskLevel::Low => ConfidenceBand {
            min: 0.85,
            max: 0.95,
        },
        RiskLevel::Moderate => ConfidenceBand {
            min: 0.75,
            max: 0.90,
        },
        RiskLevel::High => ConfidenceBand {
            min: 0.80,
            max: 0.95,
        },
    }
}
