//! The `cogrisk show` command.

use std::path::PathBuf;

use anyhow::Result;

use cogrisk_core::report::AssessmentReport;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = AssessmentReport::load_json(&report_path)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            let a = &report.assessment;
            println!(
                "{}: {} risk (score {}, confidence {:.2})",
                report.title(),
                a.risk_level,
                a.overall_risk_score,
                a.confidence_level
            );
            println!(
                "  cognitive {} | speech {} | memory {}",
                a.cognitive_score, a.speech_score, a.memory_score
            );

            if !a.risk_factors.is_empty() {
                println!("\nRisk factors:");
                for factor in &a.risk_factors {
                    println!("  - {factor}");
                }
            }

            println!("\nRecommendations:");
            for rec in &a.recommendations {
                println!("  - {rec}");
            }
        }
    }

    Ok(())
}
