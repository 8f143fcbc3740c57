//! The `cogrisk assess` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};

use cogrisk_core::config::{create_confidence_source, load_config_from, ConfidenceMode};
use cogrisk_core::parser;
use cogrisk_core::report::AssessmentReport;
use cogrisk_core::scorer::RiskScorer;

pub fn execute(
    input_path: PathBuf,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    midpoint: bool,
) -> Result<()> {
    let formats: Vec<&str> = if format == "all" {
        vec!["json", "markdown"]
    } else {
        format.split(',').map(|f| f.trim()).collect()
    };
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "json" | "markdown" | "md"),
            "unknown format '{fmt}', expected json, markdown, or all"
        );
    }

    // Load config and apply flag overrides
    let mut config = load_config_from(config_path.as_deref())?;
    if seed.is_some() {
        config.seed = seed;
    }
    if midpoint {
        config.confidence = ConfidenceMode::Midpoint;
    }
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let inputs = parser::load_inputs(&input_path)?;
    anyhow::ensure!(
        !inputs.is_empty(),
        "no assessment inputs found at {}",
        input_path.display()
    );

    let mut scorer = RiskScorer::new(create_confidence_source(&config));
    let today = chrono::Local::now().date_naive();

    eprintln!(
        "cogrisk v{}: scoring {} assessment(s) with {} confidence",
        env!("CARGO_PKG_VERSION"),
        inputs.len(),
        scorer.confidence_source()
    );

    let mut reports = Vec::with_capacity(inputs.len());
    let mut written_stems = HashSet::new();
    let mut failed = 0usize;

    for input in &inputs {
        let prepared = match input.prepare(today) {
            Ok(prepared) => prepared,
            Err(e) => {
                eprintln!("  ERROR: {}: {e}", input.id);
                failed += 1;
                continue;
            }
        };

        let assessment = scorer.generate_full_assessment(
            &prepared.cognitive_scores,
            &prepared.speech_metrics,
            Some(&prepared.additional_factors),
        );
        tracing::info!(
            assessment = %input.id,
            overall = assessment.overall_risk_score,
            level = %assessment.risk_level,
            "assessment scored"
        );

        let report = AssessmentReport::new(
            input,
            prepared,
            assessment,
            config.model_version.clone(),
            scorer.confidence_source(),
        );

        let mut stem = report_stem(&report.assessment_id);
        if !written_stems.insert(stem.clone()) {
            let short = report.id.simple().to_string();
            let unique = format!("{stem}-{}", &short[..8]);
            tracing::warn!(
                assessment = %input.id,
                "report name {stem} already used in this run, writing {unique} instead"
            );
            written_stems.insert(unique.clone());
            stem = unique;
        }

        std::fs::create_dir_all(&output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        for fmt in &formats {
            match *fmt {
                "json" => {
                    let path = output.join(format!("{stem}.json"));
                    report.save_json(&path)?;
                    eprintln!("Report saved to: {}", path.display());
                }
                _ => {
                    let path = output.join(format!("{stem}.md"));
                    report.save_markdown(&path)?;
                    eprintln!("Markdown report: {}", path.display());
                }
            }
        }

        reports.push(report);
    }

    if !reports.is_empty() {
        print_summary(&reports);
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} assessment(s) could not be scored", inputs.len());
    }

    Ok(())
}

/// Report file name without extension, with the assessment id made
/// filename-safe. Distinct ids may share a stem.
fn report_stem(assessment_id: &str) -> String {
    let safe: String = assessment_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("report-{safe}")
}

fn print_summary(reports: &[AssessmentReport]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Assessment",
        "Cognitive",
        "Speech",
        "Memory",
        "Overall Risk",
        "Level",
        "Confidence",
        "Factors",
    ]);

    for report in reports {
        let a = &report.assessment;
        table.add_row(vec![
            Cell::new(report.title()),
            Cell::new(a.cognitive_score),
            Cell::new(a.speech_score),
            Cell::new(a.memory_score),
            Cell::new(a.overall_risk_score),
            Cell::new(a.risk_level),
            Cell::new(format!("{:.2}", a.confidence_level)),
            Cell::new(a.risk_factors.len()),
        ]);
    }

    println!("{table}");
}
