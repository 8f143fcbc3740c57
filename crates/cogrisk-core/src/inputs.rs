//! Preparation of raw assessment records into scorer inputs.
//!
//! Task results are averaged per cognitive domain, speech measurements get
//! per-field defaults, and the participant's age is derived from a birth
//! date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InputError;
use crate::model::{to_score, AdditionalFactors, CognitiveScores, SpeechMetrics};
use crate::weights::{DEFAULT_DOMAIN_SCORE, DEFAULT_SPEECH_METRICS};

/// A cognitive domain and the task type that feeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CognitiveDomain {
    Memory,
    Attention,
    Language,
    Executive,
    Visuospatial,
}

impl CognitiveDomain {
    pub const ALL: [CognitiveDomain; 5] = [
        CognitiveDomain::Memory,
        CognitiveDomain::Attention,
        CognitiveDomain::Language,
        CognitiveDomain::Executive,
        CognitiveDomain::Visuospatial,
    ];

    /// The task type tag recorded for tasks in this domain.
    pub fn task_type(&self) -> &'static str {
        match self {
            CognitiveDomain::Memory => "memory_recall",
            CognitiveDomain::Attention => "attention",
            CognitiveDomain::Language => "language",
            CognitiveDomain::Executive => "executive_function",
            CognitiveDomain::Visuospatial => "visuospatial",
        }
    }

    /// The domain for a task type tag, if it belongs to one.
    pub fn from_task_type(task_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.task_type() == task_type)
    }
}

impl fmt::Display for CognitiveDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CognitiveDomain::Memory => write!(f, "memory"),
            CognitiveDomain::Attention => write!(f, "attention"),
            CognitiveDomain::Language => write!(f, "language"),
            CognitiveDomain::Executive => write!(f, "executive"),
            CognitiveDomain::Visuospatial => write!(f, "visuospatial"),
        }
    }
}

/// Task types recorded by speech tasks. They feed no cognitive domain.
pub const SPEECH_TASK_TYPES: [&str; 4] = ["reading", "description", "fluency", "conversation"];

/// One recorded task result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_type: String,
    /// Score out of 100. A task without a score counts as 0.
    #[serde(default)]
    pub user_score: Option<f64>,
}

/// One speech analysis entry. Absent measurements fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechRecord {
    #[serde(default)]
    pub speech_rate: Option<f64>,
    #[serde(default)]
    pub pause_frequency: Option<f64>,
    #[serde(default)]
    pub voice_tremor_score: Option<f64>,
    #[serde(default)]
    pub articulation_clarity: Option<f64>,
    #[serde(default)]
    pub semantic_fluency_score: Option<f64>,
    #[serde(default)]
    pub phonemic_fluency_score: Option<f64>,
}

/// Average score over the tasks of one domain, or the default when the
/// domain has no tasks.
pub fn domain_score(tasks: &[TaskRecord], domain: CognitiveDomain) -> f64 {
    let scores: Vec<f64> = tasks
        .iter()
        .filter(|t| t.task_type == domain.task_type())
        .map(|t| t.user_score.unwrap_or(0.0))
        .collect();

    if scores.is_empty() {
        return DEFAULT_DOMAIN_SCORE;
    }

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    f64::from(to_score(mean))
}

/// Build all five domain scores from a set of task records.
pub fn cognitive_scores_from_tasks(tasks: &[TaskRecord]) -> CognitiveScores {
    CognitiveScores {
        memory: domain_score(tasks, CognitiveDomain::Memory),
        attention: domain_score(tasks, CognitiveDomain::Attention),
        language: domain_score(tasks, CognitiveDomain::Language),
        executive: domain_score(tasks, CognitiveDomain::Executive),
        visuospatial: domain_score(tasks, CognitiveDomain::Visuospatial),
    }
}

/// Speech metrics from a recorded entry, substituting defaults field by
/// field. No entry yields the full default tuple.
pub fn speech_metrics_from(record: Option<&SpeechRecord>) -> Result<SpeechMetrics, InputError> {
    let Some(record) = record else {
        return Ok(DEFAULT_SPEECH_METRICS);
    };
    let d = DEFAULT_SPEECH_METRICS;

    Ok(SpeechMetrics {
        speech_rate: measurement("speech_rate", record.speech_rate, d.speech_rate)?,
        pause_frequency: measurement(
            "pause_frequency",
            record.pause_frequency,
            d.pause_frequency,
        )?,
        voice_tremor_score: measurement(
            "voice_tremor_score",
            record.voice_tremor_score,
            d.voice_tremor_score,
        )?,
        articulation_clarity: measurement(
            "articulation_clarity",
            record.articulation_clarity,
            d.articulation_clarity,
        )?,
        semantic_fluency_score: measurement(
            "semantic_fluency_score",
            record.semantic_fluency_score,
            d.semantic_fluency_score,
        )?,
        phonemic_fluency_score: measurement(
            "phonemic_fluency_score",
            record.phonemic_fluency_score,
            d.phonemic_fluency_score,
        )?,
    })
}

fn measurement(field: &'static str, value: Option<f64>, default: f64) -> Result<f64, InputError> {
    match value {
        Some(v) if !v.is_finite() => Err(InputError::NonFiniteMeasurement { field }),
        Some(v) => Ok(v),
        None => Ok(default),
    }
}

/// The most recent speech entry. Records are kept in recording order.
pub fn latest_speech_record(records: &[SpeechRecord]) -> Option<&SpeechRecord> {
    records.last()
}

/// Age in whole years as calendar-year difference.
pub fn age_from_birth_date(birth_date: NaiveDate, assessed_on: NaiveDate) -> Result<u32, InputError> {
    let years = assessed_on.year() - birth_date.year();
    u32::try_from(years).map_err(|_| InputError::BirthDateInFuture {
        birth_date,
        assessed_on,
    })
}

/// Participant details that feed the demographic risk factors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Used to derive the age when present.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Age in years, used when no birth date is recorded.
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub education_level: Option<String>,
}

/// Everything recorded for one assessment, before scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentInput {
    /// Unique identifier for this assessment.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Date of the assessment. Defaults to the day it is scored.
    #[serde(default)]
    pub assessed_on: Option<NaiveDate>,
    #[serde(default)]
    pub participant: Option<Participant>,
    /// Task results in any order.
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    /// Speech analyses in recording order.
    #[serde(default)]
    pub speech: Vec<SpeechRecord>,
}

/// Scorer inputs derived from an [`AssessmentInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedInputs {
    pub cognitive_scores: CognitiveScores,
    pub speech_metrics: SpeechMetrics,
    pub additional_factors: AdditionalFactors,
}

impl AssessmentInput {
    /// Derive scorer inputs. `today` stands in for a missing assessment date.
    pub fn prepare(&self, today: NaiveDate) -> Result<PreparedInputs, InputError> {
        let cognitive_scores = cognitive_scores_from_tasks(&self.tasks);
        let speech_metrics = speech_metrics_from(latest_speech_record(&self.speech))?;

        let assessed_on = self.assessed_on.unwrap_or(today);
        let additional_factors = match &self.participant {
            Some(p) => AdditionalFactors {
                age: match p.birth_date {
                    Some(birth_date) => Some(age_from_birth_date(birth_date, assessed_on)?),
                    None => p.age,
                },
                education_level: p.education_level.clone(),
            },
            None => AdditionalFactors::default(),
        };

        Ok(PreparedInputs {
            cognitive_scores,
            speech_metrics,
            additional_factors,
        })
    }
}
