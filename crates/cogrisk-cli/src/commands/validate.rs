//! The `cogrisk validate` command.

use std::path::PathBuf;

use anyhow::Result;

use cogrisk_core::parser::{load_inputs, validate_assessment_input};

pub fn execute(input_path: PathBuf) -> Result<()> {
    let inputs = load_inputs(&input_path)?;

    let mut total_warnings = 0;

    for input in &inputs {
        println!(
            "Assessment: {} ({} tasks, {} speech records)",
            input.id,
            input.tasks.len(),
            input.speech.len()
        );

        let warnings = validate_assessment_input(input);
        for w in &warnings {
            let prefix = w
                .location
                .as_ref()
                .map(|loc| format!("  [{loc}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All assessment inputs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
