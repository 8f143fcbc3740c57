//! TOML assessment input parser.
//!
//! Loads assessment inputs from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::inputs::{
    AssessmentInput, CognitiveDomain, Participant, SpeechRecord, TaskRecord, SPEECH_TASK_TYPES,
};

/// Intermediate TOML structure for parsing assessment files.
#[derive(Debug, Deserialize)]
struct TomlAssessmentFile {
    assessment: TomlAssessmentHeader,
    #[serde(default)]
    participant: Option<TomlParticipant>,
    #[serde(default)]
    tasks: Vec<TaskRecord>,
    #[serde(default)]
    speech: Vec<SpeechRecord>,
}

#[derive(Debug, Deserialize)]
struct TomlAssessmentHeader {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    assessed_on: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlParticipant {
    #[serde(default)]
    birth_date: Option<String>,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    education_level: Option<String>,
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    value
        .trim()
        .parse::<NaiveDate>()
        .with_context(|| format!("invalid {field} '{value}', expected YYYY-MM-DD"))
}

/// Parse a single TOML file into an `AssessmentInput`.
pub fn parse_assessment_input(path: &Path) -> Result<AssessmentInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read assessment file: {}", path.display()))?;

    parse_assessment_input_str(&content, path)
}

/// Parse a TOML string into an `AssessmentInput` (useful for testing).
pub fn parse_assessment_input_str(content: &str, source_path: &Path) -> Result<AssessmentInput> {
    let parsed: TomlAssessmentFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let assessed_on = parsed
        .assessment
        .assessed_on
        .as_deref()
        .map(|d| parse_date("assessed_on", d))
        .transpose()?;

    let participant = parsed
        .participant
        .map(|p| -> Result<Participant> {
            Ok(Participant {
                birth_date: p
                    .birth_date
                    .as_deref()
                    .map(|d| parse_date("birth_date", d))
                    .transpose()?,
                age: p.age,
                education_level: p.education_level,
            })
        })
        .transpose()?;

    Ok(AssessmentInput {
        id: parsed.assessment.id,
        name: parsed.assessment.name,
        assessed_on,
        participant,
        tasks: parsed.tasks,
        speech: parsed.speech,
    })
}

/// Recursively load all `.toml` assessment files from a directory.
pub fn load_input_directory(dir: &Path) -> Result<Vec<AssessmentInput>> {
    let mut inputs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            inputs.extend(load_input_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_assessment_input(&path) {
                Ok(input) => inputs.push(input),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(inputs)
}

/// Load a single file or every input under a directory.
pub fn load_inputs(path: &Path) -> Result<Vec<AssessmentInput>> {
    if path.is_dir() {
        load_input_directory(path)
    } else {
        Ok(vec![parse_assessment_input(path)?])
    }
}

/// A warning from assessment input validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Where the issue is (e.g. "tasks[2]"), if it is specific.
    pub location: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn at(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            message: message.into(),
        }
    }

    fn general(message: impl Into<String>) -> Self {
        Self {
            location: None,
            message: message.into(),
        }
    }
}

/// Validate an assessment input for values the scorer will clamp or default.
pub fn validate_assessment_input(input: &AssessmentInput) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if input.id.trim().is_empty() {
        warnings.push(ValidationWarning::general("assessment id is empty"));
    }

    for (i, task) in input.tasks.iter().enumerate() {
        let location = format!("tasks[{i}]");
        if CognitiveDomain::from_task_type(&task.task_type).is_none()
            && !SPEECH_TASK_TYPES.contains(&task.task_type.as_str())
        {
            warnings.push(ValidationWarning::at(
                &location,
                format!("unknown task type '{}' will be ignored", task.task_type),
            ));
        }
        match task.user_score {
            Some(score) if !(0.0..=100.0).contains(&score) => {
                warnings.push(ValidationWarning::at(
                    &location,
                    format!("user_score {score} is outside 0-100"),
                ));
            }
            None => {
                warnings.push(ValidationWarning::at(
                    &location,
                    "user_score is missing and counts as 0",
                ));
            }
            _ => {}
        }
    }

    for domain in CognitiveDomain::ALL {
        if !input.tasks.iter().any(|t| t.task_type == domain.task_type()) {
            warnings.push(ValidationWarning::general(format!(
                "no {} tasks recorded, default score will be used",
                domain
            )));
        }
    }

    if input.speech.is_empty() {
        warnings.push(ValidationWarning::general(
            "no speech analysis recorded, default speech metrics will be used",
        ));
    }

    for (i, record) in input.speech.iter().enumerate() {
        let location = format!("speech[{i}]");
        let percentages = [
            ("voice_tremor_score", record.voice_tremor_score),
            ("articulation_clarity", record.articulation_clarity),
            ("semantic_fluency_score", record.semantic_fluency_score),
            ("phonemic_fluency_score", record.phonemic_fluency_score),
        ];
        for (field, value) in percentages {
            if let Some(v) = value {
                if !(0.0..=100.0).contains(&v) {
                    warnings.push(ValidationWarning::at(
                        &location,
                        format!("{field} {v} is outside 0-100"),
                    ));
                }
            }
        }
        let rates = [
            ("speech_rate", record.speech_rate),
            ("pause_frequency", record.pause_frequency),
        ];
        for (field, value) in rates {
            if let Some(v) = value {
                if v.is_nan() || v < 0.0 {
                    warnings.push(ValidationWarning::at(
                        &location,
                        format!("{field} {v} is negative or not a number"),
                    ));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[assessment]
id = "baseline"
name = "Baseline screening"
assessed_on = "2024-05-01"

[participant]
birth_date = "1946-03-12"
education_level = "low"

[[tasks]]
task_type = "memory_recall"
user_score = 62

[[tasks]]
task_type = "attention"
user_score = 80

[[tasks]]
task_type = "language"
user_score = 74

[[tasks]]
task_type = "executive_function"
user_score = 70

[[tasks]]
task_type = "visuospatial"
user_score = 85

[[tasks]]
task_type = "reading"
user_score = 81

[[speech]]
speech_rate = 105.0
pause_frequency = 12.0
voice_tremor_score = 35.0
articulation_clarity = 81.0
semantic_fluency_score = 70.0
phonemic_fluency_score = 66.0
"#;

    #[test]
    fn parse_valid_toml() {
        let input = parse_assessment_input_str(VALID_TOML, &PathBuf::from("a.toml")).unwrap();
        assert_eq!(input.id, "baseline");
        assert_eq!(input.name, "Baseline screening");
        assert_eq!(input.assessed_on, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(input.tasks.len(), 6);
        assert_eq!(input.tasks[0].user_score, Some(62.0));
        assert_eq!(input.speech.len(), 1);
        let participant = input.participant.unwrap();
        assert_eq!(participant.education_level.as_deref(), Some("low"));
        assert_eq!(participant.birth_date, NaiveDate::from_ymd_opt(1946, 3, 12));
    }

    #[test]
    fn valid_input_has_no_warnings() {
        let input = parse_assessment_input_str(VALID_TOML, &PathBuf::from("a.toml")).unwrap();
        let warnings = validate_assessment_input(&input);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn parse_minimal_input() {
        let toml = r#"
[assessment]
id = "minimal"
"#;
        let input = parse_assessment_input_str(toml, &PathBuf::from("m.toml")).unwrap();
        assert!(input.tasks.is_empty());
        assert!(input.participant.is_none());
        assert!(input.assessed_on.is_none());

        let warnings = validate_assessment_input(&input);
        assert_eq!(warnings.len(), 6);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("default speech metrics")));
    }

    #[test]
    fn validate_flags_out_of_range_values() {
        let toml = r#"
[assessment]
id = "noisy"

[[tasks]]
task_type = "memory_recall"
user_score = 140

[[tasks]]
task_type = "balance"
user_score = 50

[[tasks]]
task_type = "attention"

[[speech]]
voice_tremor_score = 120.0
speech_rate = -3.0
"#;
        let input = parse_assessment_input_str(toml, &PathBuf::from("n.toml")).unwrap();
        let warnings = validate_assessment_input(&input);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("user_score 140")));
        assert!(messages.iter().any(|m| m.contains("unknown task type 'balance'")));
        assert!(messages.iter().any(|m| m.contains("counts as 0")));
        assert!(messages.iter().any(|m| m.contains("voice_tremor_score 120")));
        assert!(messages.iter().any(|m| m.contains("speech_rate -3")));
        assert_eq!(
            warnings
                .iter()
                .find(|w| w.message.contains("balance"))
                .and_then(|w| w.location.as_deref()),
            Some("tasks[1]")
        );
    }

    #[test]
    fn parse_bad_date() {
        let toml = r#"
[assessment]
id = "bad-date"
assessed_on = "01/05/2024"
"#;
        let err = parse_assessment_input_str(toml, &PathBuf::from("b.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("assessed_on"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_assessment_input_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml [").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("b.toml"), "[assessment]\nid = \"nested\"\n").unwrap();

        let inputs = load_input_directory(dir.path()).unwrap();
        let ids: Vec<&str> = inputs.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["baseline", "nested"]);
    }

    #[test]
    fn load_inputs_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.toml");
        std::fs::write(&path, VALID_TOML).unwrap();
        let inputs = load_inputs(&path).unwrap();
        assert_eq!(inputs.len(), 1);
        assert!(load_inputs(&dir.path().join("missing.toml")).is_err());
    }
}
