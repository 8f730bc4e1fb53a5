//! The `neuroeval init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("neuroeval.toml").exists() {
        println!("neuroeval.toml already exists, skipping.");
    } else {
        std::fs::write("neuroeval.toml", SAMPLE_CONFIG)?;
        println!("Created neuroeval.toml");
    }

    std::fs::create_dir_all("cohorts")?;
    let example_path = Path::new("cohorts/example.toml");
    if example_path.exists() {
        println!("cohorts/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_COHORT)?;
        println!("Created cohorts/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit cohorts/example.toml with your students");
    println!("  2. Run: neuroeval validate --cohort cohorts/example.toml");
    println!("  3. Run: neuroeval batch --cohort cohorts/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# neuroeval configuration

# Defuzzification sampling step over [0, 100]
resolution = 1.0

# Maximum entries kept by `evaluate --history`
history_limit = 50

# Score points a student must move before `compare` reports it
regression_threshold = 5.0

output_dir = "./neuroeval-results"

# json, html, markdown or all
default_format = "json"
"#;

const EXAMPLE_COHORT: &str = r#"[cohort]
id = "example"
name = "Example Cohort"
description = "A small cohort to get started"

[[students]]
id = "s001"
name = "Ada"
attendance = 100
assignment = 100
exam = 100
participation = 100
tags = ["section-a"]

[[students]]
id = "s002"
name = "Brian"
attendance = 75
assignment = 60
exam = 65
participation = 70
tags = ["section-a"]

[[students]]
id = "s003"
name = "Chen"
attendance = 30
assignment = 50
exam = 20
participation = 90
tags = ["section-b"]
"#;
