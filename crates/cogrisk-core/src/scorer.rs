//! Dementia-risk scoring.
//!
//! Turns per-domain cognitive scores and speech measurements into a
//! [`RiskAssessment`]. Everything here is pure apart from the confidence
//! draw, which goes through the scorer's [`ConfidenceSource`].

use tracing::debug;

use crate::model::{
    to_score, AdditionalFactors, CognitiveScores, OverallRisk, RiskAssessment, RiskLevel,
    SpeechMetrics,
};
use crate::traits::{ConfidenceSource, MidpointConfidence, RandomConfidence};
use crate::weights::{
    base_recommendations, confidence_band, ADVANCED_AGE_ABOVE, ADVANCED_AGE_FACTOR,
    COGNITIVE_LADDER, COGNITIVE_WEIGHTS, LIMITED_EDUCATION_FACTOR, LIMITED_EDUCATION_LEVEL,
    LOW_RISK_BELOW, MEMORY_KEYWORD, MEMORY_LADDER, MEMORY_RECOMMENDATION, MODERATE_RISK_BELOW,
    OVERALL_WEIGHTS, PAUSE_FREQUENCY_BANDS, SPEECH_KEYWORD, SPEECH_LADDER,
    SPEECH_RATE_BANDS, SPEECH_RECOMMENDATION, SPEECH_WEIGHTS,
};

/// Weighted cognitive score over the five domains.
pub fn calculate_cognitive_score(scores: &CognitiveScores) -> u8 {
    let s = scores.clamped();
    let w = COGNITIVE_WEIGHTS;
    to_score(
        s.memory * w.memory
            + s.attention * w.attention
            + s.language * w.language
            + s.executive * w.executive
            + s.visuospatial * w.visuospatial,
    )
}

/// Weighted speech score after mapping each measurement onto a 0–100
/// goodness scale.
pub fn calculate_speech_score(metrics: &SpeechMetrics) -> u8 {
    let m = metrics.clamped();
    let w = SPEECH_WEIGHTS;

    let rate = SPEECH_RATE_BANDS.score(m.speech_rate);
    let pauses = PAUSE_FREQUENCY_BANDS.score(m.pause_frequency);
    let tremor = 100.0 - m.voice_tremor_score;

    to_score(
        rate * w.speech_rate
            + pauses * w.pause_frequency
            + tremor * w.voice_tremor
            + m.articulation_clarity * w.articulation
            + m.semantic_fluency_score * w.semantic_fluency
            + m.phonemic_fluency_score * w.phonemic_fluency,
    )
}

/// Risk factors in fixed order: cognition, memory, speech, age, education.
///
/// At most one tier fires per score category.
pub fn identify_risk_factors(
    cognitive_score: u8,
    speech_score: u8,
    memory_score: u8,
    additional: Option<&AdditionalFactors>,
) -> Vec<String> {
    let mut factors: Vec<String> = [
        COGNITIVE_LADDER.factor(cognitive_score),
        MEMORY_LADDER.factor(memory_score),
        SPEECH_LADDER.factor(speech_score),
    ]
    .into_iter()
    .flatten()
    .map(str::to_string)
    .collect();

    if let Some(extra) = additional {
        if extra.age.is_some_and(|age| age > ADVANCED_AGE_ABOVE) {
            factors.push(ADVANCED_AGE_FACTOR.to_string());
        }
        if extra.education_level.as_deref() == Some(LIMITED_EDUCATION_LEVEL) {
            factors.push(LIMITED_EDUCATION_FACTOR.to_string());
        }
    }

    factors
}

/// Four base recommendations for the level, then memory and speech
/// follow-ups when a matching risk factor is present.
pub fn generate_recommendations(level: RiskLevel, risk_factors: &[String]) -> Vec<String> {
    let mut recommendations: Vec<String> = base_recommendations(level)
        .iter()
        .map(|r| r.to_string())
        .collect();

    if risk_factors.iter().any(|f| f.contains(MEMORY_KEYWORD)) {
        recommendations.push(MEMORY_RECOMMENDATION.to_string());
    }
    if risk_factors.iter().any(|f| f.contains(SPEECH_KEYWORD)) {
        recommendations.push(SPEECH_RECOMMENDATION.to_string());
    }

    recommendations
}

/// Deficit-weighted overall risk score (0–100, higher is worse).
///
/// Sub-scores passed in directly may exceed 100; those count as no deficit.
pub fn overall_risk_score(cognitive_score: u8, speech_score: u8, memory_score: u8) -> u8 {
    let deficit = |score: u8| 100.0 - f64::from(score.min(100));
    let w = OVERALL_WEIGHTS;
    to_score(
        deficit(cognitive_score) * w.cognitive
            + deficit(speech_score) * w.speech
            + deficit(memory_score) * w.memory,
    )
}

/// Classify an overall risk score.
pub fn classify_risk(score: u8) -> RiskLevel {
    if score < LOW_RISK_BELOW {
        RiskLevel::Low
    } else if score < MODERATE_RISK_BELOW {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

/// Overall score, level, and a confidence drawn from the level's band.
pub fn calculate_overall_risk<C: ConfidenceSource + ?Sized>(
    cognitive_score: u8,
    speech_score: u8,
    memory_score: u8,
    confidence: &mut C,
) -> OverallRisk {
    let score = overall_risk_score(cognitive_score, speech_score, memory_score);
    let level = classify_risk(score);
    OverallRisk {
        score,
        level,
        confidence: confidence.sample(confidence_band(level)),
    }
}

/// Scores assessments with a fixed confidence source.
#[derive(Debug, Clone)]
pub struct RiskScorer<C = RandomConfidence> {
    confidence: C,
}

impl Default for RiskScorer<RandomConfidence> {
    fn default() -> Self {
        Self::new(RandomConfidence::from_entropy())
    }
}

impl RiskScorer<MidpointConfidence> {
    /// A scorer whose output is fully deterministic.
    pub fn deterministic() -> Self {
        Self::new(MidpointConfidence)
    }
}

impl<C: ConfidenceSource> RiskScorer<C> {
    pub fn new(confidence: C) -> Self {
        Self { confidence }
    }

    /// Name of the underlying confidence source.
    pub fn confidence_source(&self) -> &str {
        self.confidence.name()
    }

    /// See [`calculate_overall_risk`].
    pub fn calculate_overall_risk(
        &mut self,
        cognitive_score: u8,
        speech_score: u8,
        memory_score: u8,
    ) -> OverallRisk {
        calculate_overall_risk(
            cognitive_score,
            speech_score,
            memory_score,
            &mut self.confidence,
        )
    }

    /// Run every scoring step and assemble the assessment.
    pub fn generate_full_assessment(
        &mut self,
        cognitive_scores: &CognitiveScores,
        speech_metrics: &SpeechMetrics,
        additional: Option<&AdditionalFactors>,
    ) -> RiskAssessment {
        let cognitive_score = calculate_cognitive_score(cognitive_scores);
        let speech_score = calculate_speech_score(speech_metrics);
        let memory_score = to_score(cognitive_scores.memory);
        debug!(cognitive_score, speech_score, memory_score, "computed sub-scores");

        let risk_factors =
            identify_risk_factors(cognitive_score, speech_score, memory_score, additional);
        let overall = self.calculate_overall_risk(cognitive_score, speech_score, memory_score);
        debug!(
            score = overall.score,
            level = %overall.level,
            confidence = overall.confidence,
            factors = risk_factors.len(),
            "classified overall risk"
        );

        let recommendations = generate_recommendations(overall.level, &risk_factors);

        RiskAssessment {
            cognitive_score,
            speech_score,
            memory_score,
            overall_risk_score: overall.score,
            risk_level: overall.level,
            risk_factors,
            recommendations,
            confidence_level: overall.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::confidence_band;

    fn uniform(value: f64) -> CognitiveScores {
        CognitiveScores {
            memory: value,
            attention: value,
            language: value,
            executive: value,
            visuospatial: value,
        }
    }

    #[test]
    fn cognitive_extremes() {
        assert_eq!(calculate_cognitive_score(&uniform(100.0)), 100);
        assert_eq!(calculate_cognitive_score(&uniform(0.0)), 0);
        assert_eq!(calculate_cognitive_score(&CognitiveScores::default()), 75);
    }

    #[test]
    fn cognitive_weights_applied() {
        let scores = CognitiveScores {
            memory: 100.0,
            attention: 0.0,
            language: 0.0,
            executive: 0.0,
            visuospatial: 0.0,
        };
        assert_eq!(calculate_cognitive_score(&scores), 35);

        let scores = CognitiveScores {
            memory: 0.0,
            visuospatial: 100.0,
            ..scores
        };
        assert_eq!(calculate_cognitive_score(&scores), 10);
    }

    #[test]
    fn cognitive_score_is_linear() {
        let a = CognitiveScores {
            memory: 40.0,
            attention: 90.0,
            language: 60.0,
            executive: 70.0,
            visuospatial: 20.0,
        };
        let b = CognitiveScores {
            memory: 80.0,
            attention: 50.0,
            language: 100.0,
            executive: 30.0,
            visuospatial: 60.0,
        };
        let t = 0.25;
        let mix = |x: f64, y: f64| t * x + (1.0 - t) * y;
        let blended = CognitiveScores {
            memory: mix(a.memory, b.memory),
            attention: mix(a.attention, b.attention),
            language: mix(a.language, b.language),
            executive: mix(a.executive, b.executive),
            visuospatial: mix(a.visuospatial, b.visuospatial),
        };
        let expected = mix(
            f64::from(calculate_cognitive_score(&a)),
            f64::from(calculate_cognitive_score(&b)),
        );
        let actual = f64::from(calculate_cognitive_score(&blended));
        assert!((actual - expected).abs() <= 1.0, "{actual} vs {expected}");
    }

    #[test]
    fn cognitive_out_of_range_is_clamped() {
        assert_eq!(calculate_cognitive_score(&uniform(150.0)), 100);
        assert_eq!(calculate_cognitive_score(&uniform(-20.0)), 0);
    }

    #[test]
    fn default_speech_tuple_scores_88() {
        assert_eq!(calculate_speech_score(&SpeechMetrics::default()), 88);
    }

    #[test]
    fn speech_score_uses_bands_and_inversion() {
        let metrics = SpeechMetrics {
            speech_rate: 60.0,
            pause_frequency: 25.0,
            voice_tremor_score: 100.0,
            articulation_clarity: 0.0,
            semantic_fluency_score: 0.0,
            phonemic_fluency_score: 0.0,
        };
        // 40*0.20 + 30*0.15 = 12.5
        assert_eq!(calculate_speech_score(&metrics), 13);

        let perfect = SpeechMetrics {
            speech_rate: 135.0,
            pause_frequency: 7.0,
            voice_tremor_score: 0.0,
            articulation_clarity: 100.0,
            semantic_fluency_score: 100.0,
            phonemic_fluency_score: 100.0,
        };
        assert_eq!(calculate_speech_score(&perfect), 100);
    }

    #[test]
    fn speech_out_of_range_stays_bounded() {
        let metrics = SpeechMetrics {
            speech_rate: -50.0,
            pause_frequency: f64::NAN,
            voice_tremor_score: -40.0,
            articulation_clarity: 300.0,
            semantic_fluency_score: 300.0,
            phonemic_fluency_score: 300.0,
        };
        let score = calculate_speech_score(&metrics);
        // 40*0.20 + 30*0.15 + 100*0.10 + 100*0.55 = 77.5
        assert_eq!(score, 78);
    }

    #[test]
    fn no_factors_for_healthy_scores() {
        assert!(identify_risk_factors(90, 90, 90, None).is_empty());
        assert!(identify_risk_factors(90, 90, 90, Some(&AdditionalFactors::default())).is_empty());
    }

    #[test]
    fn only_most_severe_tier_fires() {
        let factors = identify_risk_factors(50, 50, 50, None);
        assert_eq!(
            factors,
            vec![
                "Significant cognitive impairment detected",
                "Severe memory impairment",
                "Significant speech and language abnormalities",
            ]
        );
    }

    #[test]
    fn mild_tiers_and_demographics() {
        let extra = AdditionalFactors {
            age: Some(80),
            education_level: Some("low".into()),
        };
        let factors = identify_risk_factors(80, 70, 70, Some(&extra));
        assert_eq!(
            factors,
            vec![
                "Mild cognitive decline observed",
                "Moderate memory difficulties",
                "Mild speech pattern irregularities",
                "Advanced age (>75 years)",
                "Limited educational background",
            ]
        );
    }

    #[test]
    fn demographic_edges() {
        let at_75 = AdditionalFactors {
            age: Some(75),
            education_level: Some("college".into()),
        };
        assert!(identify_risk_factors(90, 90, 90, Some(&at_75)).is_empty());

        let upper_case = AdditionalFactors {
            age: None,
            education_level: Some("LOW".into()),
        };
        assert!(identify_risk_factors(90, 90, 90, Some(&upper_case)).is_empty());
    }

    #[test]
    fn recommendations_base_sets() {
        for level in [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High] {
            let recs = generate_recommendations(level, &[]);
            assert_eq!(recs.len(), 4);
        }
        let high = generate_recommendations(RiskLevel::High, &[]);
        assert!(high[0].contains("neurologist"));
        let low = generate_recommendations(RiskLevel::Low, &[]);
        assert_eq!(low[0], "Continue regular health check-ups");
    }

    #[test]
    fn recommendations_follow_factors() {
        let factors = identify_risk_factors(50, 50, 50, None);
        let recs = generate_recommendations(RiskLevel::High, &factors);
        assert_eq!(recs.len(), 6);
        assert_eq!(recs[4], MEMORY_RECOMMENDATION);
        assert_eq!(recs[5], SPEECH_RECOMMENDATION);

        let speech_only = vec!["Mild speech pattern irregularities".to_string()];
        let recs = generate_recommendations(RiskLevel::Moderate, &speech_only);
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[4], SPEECH_RECOMMENDATION);
    }

    #[test]
    fn overall_risk_low() {
        let risk = calculate_overall_risk(90, 90, 90, &mut RandomConfidence::seeded(1));
        assert_eq!(risk.score, 10);
        assert_eq!(risk.level, RiskLevel::Low);
        assert!((0.85..0.95).contains(&risk.confidence));
    }

    #[test]
    fn overall_risk_high() {
        let risk = calculate_overall_risk(20, 20, 20, &mut RandomConfidence::seeded(1));
        assert_eq!(risk.score, 80);
        assert_eq!(risk.level, RiskLevel::High);
        assert!((0.80..0.95).contains(&risk.confidence));
    }

    #[test]
    fn overall_risk_weights() {
        // 40*0.5 + 0 + 0
        assert_eq!(overall_risk_score(60, 100, 100), 20);
        // 0 + 50*0.3 + 50*0.2
        assert_eq!(overall_risk_score(100, 50, 50), 25);
        assert_eq!(overall_risk_score(0, 0, 0), 100);
        assert_eq!(overall_risk_score(100, 100, 100), 0);
    }

    #[test]
    fn scores_above_100_count_as_full() {
        // 0 + 100*0.3 + 100*0.2; the 255 must not offset the other deficits.
        assert_eq!(overall_risk_score(255, 0, 0), 50);
        assert_eq!(overall_risk_score(200, 200, 200), 0);
        assert!(identify_risk_factors(200, 255, 101, None).is_empty());
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify_risk(29), RiskLevel::Low);
        assert_eq!(classify_risk(30), RiskLevel::Moderate);
        assert_eq!(classify_risk(59), RiskLevel::Moderate);
        assert_eq!(classify_risk(60), RiskLevel::High);
    }

    #[test]
    fn moderate_confidence_band() {
        // 40*0.5 + 40*0.3 + 40*0.2 = 40
        let mut scorer = RiskScorer::new(RandomConfidence::seeded(9));
        for _ in 0..100 {
            let risk = scorer.calculate_overall_risk(60, 60, 60);
            assert_eq!(risk.level, RiskLevel::Moderate);
            let band = confidence_band(RiskLevel::Moderate);
            assert!(risk.confidence >= band.min && risk.confidence < band.max);
        }
    }

    #[test]
    fn full_assessment_with_defaults() {
        let mut scorer = RiskScorer::deterministic();
        let assessment = scorer.generate_full_assessment(
            &CognitiveScores::default(),
            &SpeechMetrics::default(),
            None,
        );
        assert_eq!(assessment.cognitive_score, 75);
        assert_eq!(assessment.speech_score, 88);
        assert_eq!(assessment.memory_score, 75);
        // 25*0.5 + 12*0.3 + 25*0.2 = 21.1
        assert_eq!(assessment.overall_risk_score, 21);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(
            assessment.risk_factors,
            vec!["Mild cognitive decline observed"]
        );
        assert_eq!(assessment.recommendations.len(), 4);
        assert_eq!(assessment.confidence_level, 0.9);
    }

    #[test]
    fn full_assessment_is_stable_in_non_random_fields() {
        let scores = CognitiveScores {
            memory: 55.0,
            attention: 70.0,
            language: 62.0,
            executive: 58.0,
            visuospatial: 80.0,
        };
        let speech = SpeechMetrics {
            speech_rate: 95.0,
            pause_frequency: 14.0,
            voice_tremor_score: 45.0,
            articulation_clarity: 70.0,
            semantic_fluency_score: 60.0,
            phonemic_fluency_score: 55.0,
        };
        let extra = AdditionalFactors {
            age: Some(78),
            education_level: None,
        };

        let mut scorer: RiskScorer = RiskScorer::default();
        let first = scorer.generate_full_assessment(&scores, &speech, Some(&extra));
        let second = scorer.generate_full_assessment(&scores, &speech, Some(&extra));

        assert_eq!(first.cognitive_score, second.cognitive_score);
        assert_eq!(first.speech_score, second.speech_score);
        assert_eq!(first.memory_score, second.memory_score);
        assert_eq!(first.overall_risk_score, second.overall_risk_score);
        assert_eq!(first.risk_level, second.risk_level);
        assert_eq!(first.risk_factors, second.risk_factors);
        assert_eq!(first.recommendations, second.recommendations);

        let band = confidence_band(first.risk_level);
        for c in [first.confidence_level, second.confidence_level] {
            assert!(c >= band.min && c < band.max);
        }
        assert!(first
            .risk_factors
            .contains(&"Advanced age (>75 years)".to_string()));
    }

    #[test]
    fn memory_score_is_rounded_input() {
        let scores = CognitiveScores {
            memory: 64.5,
            ..CognitiveScores::default()
        };
        let assessment = RiskScorer::deterministic().generate_full_assessment(
            &scores,
            &SpeechMetrics::default(),
            None,
        );
        assert_eq!(assessment.memory_score, 65);
    }
}
