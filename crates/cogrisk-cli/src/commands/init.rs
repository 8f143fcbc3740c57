//! The `cogrisk init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create cogrisk.toml
    if std::path::Path::new("cogrisk.toml").exists() {
        println!("cogrisk.toml already exists, skipping.");
    } else {
        std::fs::write("cogrisk.toml", SAMPLE_CONFIG)?;
        println!("Created cogrisk.toml");
    }

    // Create example assessment input
    std::fs::create_dir_all("assessments")?;
    let example_path = std::path::Path::new("assessments/example.toml");
    if example_path.exists() {
        println!("assessments/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ASSESSMENT)?;
        println!("Created assessments/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Record task scores and speech measurements in assessments/");
    println!("  2. Run: cogrisk validate --input assessments/example.toml");
    println!("  3. Run: cogrisk assess --input assessments/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# cogrisk configuration

# "random" draws the confidence level inside the risk level's band,
# "midpoint" always reports the band midpoint.
confidence = "random"
# seed = 42

model_version = "v1.0.0"
output_dir = "./cogrisk-reports"
"#;

const EXAMPLE_ASSESSMENT: &str = r#"[assessment]
id = "example"
name = "Example screening"
assessed_on = "2024-05-01"

[participant]
birth_date = "1947-08-19"
education_level = "high_school"

[[tasks]]
task_type = "memory_recall"
user_score = 70

[[tasks]]
task_type = "attention"
user_score = 82

[[tasks]]
task_type = "language"
user_score = 77

[[tasks]]
task_type = "executive_function"
user_score = 71

[[tasks]]
task_type = "visuospatial"
user_score = 88

[[speech]]
speech_rate = 112.0
pause_frequency = 11.0
voice_tremor_score = 28.0
articulation_clarity = 80.0
semantic_fluency_score = 74.0
phonemic_fluency_score = 69.0
"#;
