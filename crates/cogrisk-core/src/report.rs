//! Assessment report types with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::inputs::{AssessmentInput, PreparedInputs};
use crate::model::RiskAssessment;

/// Scoring model version recorded with every report.
pub const DEFAULT_MODEL_VERSION: &str = "v1.0.0";

/// A scored assessment together with the inputs it was scored from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Identifier of the scored assessment.
    pub assessment_id: String,
    /// Human-readable assessment name.
    #[serde(default)]
    pub assessment_name: String,
    /// Version of the scoring model.
    pub model_version: String,
    /// Confidence source used for the confidence level.
    #[serde(default)]
    pub confidence_source: String,
    /// Inputs after defaults were applied.
    pub inputs: PreparedInputs,
    /// The scored result.
    pub assessment: RiskAssessment,
}

impl AssessmentReport {
    /// Wrap a scored assessment in a new report.
    pub fn new(
        input: &AssessmentInput,
        inputs: PreparedInputs,
        assessment: RiskAssessment,
        model_version: impl Into<String>,
        confidence_source: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            assessment_id: input.id.clone(),
            assessment_name: input.name.clone(),
            model_version: model_version.into(),
            confidence_source: confidence_source.into(),
            inputs,
            assessment,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Save the markdown rendering to a file.
    pub fn save_markdown(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_markdown())
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Title used in rendered output.
    pub fn title(&self) -> &str {
        if self.assessment_name.is_empty() {
            &self.assessment_id
        } else {
            &self.assessment_name
        }
    }

    /// Generate a markdown summary of the assessment.
    pub fn to_markdown(&self) -> String {
        let a = &self.assessment;
        let mut md = String::new();

        md.push_str(&format!("## Risk assessment: {}\n\n", self.title()));
        md.push_str(&format!(
            "Assessment `{}` scored {} with model {}.\n\n",
            self.assessment_id,
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.model_version
        ));

        md.push_str("| Measure | Value |\n|---|---|\n");
        md.push_str(&format!("| Cognitive score | {} |\n", a.cognitive_score));
        md.push_str(&format!("| Speech score | {} |\n", a.speech_score));
        md.push_str(&format!("| Memory score | {} |\n", a.memory_score));
        md.push_str(&format!("| Overall risk score | {} |\n", a.overall_risk_score));
        md.push_str(&format!("| Risk level | **{}** |\n", a.risk_level));
        md.push_str(&format!(
            "| Confidence | {:.0}% |\n",
            a.confidence_level * 100.0
        ));

        md.push_str("\n### Risk factors\n\n");
        if a.risk_factors.is_empty() {
            md.push_str("None identified.\n");
        } else {
            for factor in &a.risk_factors {
                md.push_str(&format!("- {factor}\n"));
            }
        }

        md.push_str("\n### Recommendations\n\n");
        for (i, rec) in a.recommendations.iter().enumerate() {
            md.push_str(&format!("{}. {rec}\n", i + 1));
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskLevel;
    use crate::scorer::RiskScorer;

    fn make_report() -> AssessmentReport {
        let input = AssessmentInput {
            id: "baseline".into(),
            name: "Baseline screening".into(),
            assessed_on: None,
            participant: None,
            tasks: vec![],
            speech: vec![],
        };
        let prepared = input
            .prepare(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .unwrap();
        let mut scorer = RiskScorer::deterministic();
        let assessment = scorer.generate_full_assessment(
            &prepared.cognitive_scores,
            &prepared.speech_metrics,
            Some(&prepared.additional_factors),
        );
        AssessmentReport::new(
            &input,
            prepared,
            assessment,
            DEFAULT_MODEL_VERSION,
            scorer.confidence_source(),
        )
    }

    #[test]
    fn json_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.json");
        let report = make_report();
        report.save_json(&path).unwrap();

        let loaded = AssessmentReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.assessment, report.assessment);
        assert_eq!(loaded.inputs, report.inputs);
        assert_eq!(loaded.confidence_source, "midpoint");
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AssessmentReport::load_json(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn markdown_lists_factors_and_recommendations() {
        let report = make_report();
        assert_eq!(report.assessment.risk_level, RiskLevel::Low);
        let md = report.to_markdown();
        assert!(md.contains("## Risk assessment: Baseline screening"));
        assert!(md.contains("| Risk level | **low** |"));
        assert!(md.contains("| Confidence | 90% |"));
        assert!(md.contains("- Mild cognitive decline observed"));
        assert!(md.contains("1. Continue regular health check-ups"));
        assert!(md.contains("4. Maintain healthy lifestyle"));
    }

    #[test]
    fn title_falls_back_to_id() {
        let mut report = make_report();
        report.assessment_name.clear();
        assert_eq!(report.title(), "baseline");
    }
}
