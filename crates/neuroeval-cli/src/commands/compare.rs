//! The `neuroeval compare` command.

use std::path::PathBuf;

use anyhow::Result;

use neuroeval_core::report::{CohortReport, ScoreChange};

use crate::config::load_config_from;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: Option<f64>,
    fail_on_regression: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let threshold = match threshold {
        Some(t) => t,
        None => load_config_from(config_path.as_deref())?.regression_threshold,
    };
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = CohortReport::load_json(&baseline_path)?;
    let current = CohortReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            print_changes("Regressions", &report.regressions);
            print_changes("Improvements", &report.improvements);

            if !report.category_changes.is_empty() {
                println!("\nCategory changes:");
                for c in &report.category_changes {
                    println!("  {}: {} -> {}", c.student_id, c.from, c.to);
                }
            }

            if report.new_students > 0 {
                println!("\n{} new student(s)", report.new_students);
            }
            if report.removed_students > 0 {
                println!("{} removed student(s)", report.removed_students);
            }
            if !report.duplicate_ids.is_empty() {
                println!(
                    "Not compared (duplicate IDs): {}",
                    report.duplicate_ids.join(", ")
                );
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_changes(title: &str, changes: &[ScoreChange]) {
    if changes.is_empty() {
        return;
    }
    println!("\n{title}:");
    for c in changes {
        println!(
            "  {} {:.1} -> {:.1} ({:+.1})",
            c.student_id, c.baseline_score, c.current_score, c.delta
        );
    }
}
