//! The `neuroeval batch` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Table};

use neuroeval_core::engine::{CohortEngine, EngineConfig, ProgressReporter};
use neuroeval_core::model::Category;
use neuroeval_core::parser;
use neuroeval_core::report::CohortReport;
use neuroeval_core::results::StudentResult;
use neuroeval_report::html::write_html_report;

use crate::config::load_config_from;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_student_start(&self, _student_id: &str) {}

    fn on_student_complete(&self, result: &StudentResult) {
        eprintln!(
            "  {} {:<24} {:>6.2}  {}",
            result.student_id,
            result.name,
            result.score(),
            result.category()
        );
    }

    fn on_cohort_complete(&self, total: usize, evaluated: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {evaluated}/{total} students evaluated ({:.1}ms)",
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

pub fn execute(
    cohort_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    filter: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.default_format.clone());

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "markdown"]
    } else {
        format.split(',').map(str::trim).collect()
    };
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "json" | "html" | "markdown" | "md"),
            "unknown format '{fmt}' (expected json, html, markdown or all)"
        );
    }

    let cohorts = parser::load_cohorts(&cohort_path)?;
    anyhow::ensure!(
        !cohorts.is_empty(),
        "no cohorts found in {}",
        cohort_path.display()
    );
    for cohort in &cohorts {
        for student in &cohort.students {
            if let Some((variable, value)) = student.inputs.non_finite() {
                anyhow::bail!(
                    "cohort {}: student {} has non-finite {variable} ({value})",
                    cohort.id,
                    student.id
                );
            }
        }
    }

    let tag_filter = filter
        .map(|f| f.split(',').map(|s| s.trim().to_string()).collect())
        .unwrap_or_default();
    let engine = CohortEngine::new(EngineConfig {
        resolution: config.resolution,
        tag_filter,
    });

    for cohort in &cohorts {
        eprintln!(
            "neuroeval v{}: evaluating {} ({} students)",
            env!("CARGO_PKG_VERSION"),
            cohort.name,
            cohort.students.len()
        );
        eprintln!();

        let report = engine.run(cohort, &ConsoleReporter);
        print_summary(&report);

        std::fs::create_dir_all(&output)?;
        let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
        let stem = format!("{}-{timestamp}", cohort.id);

        for fmt in &formats {
            match *fmt {
                "json" => {
                    let path = output.join(format!("{stem}.json"));
                    report.save_json(&path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                "html" => {
                    let path = output.join(format!("{stem}.html"));
                    write_html_report(&report, &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
                _ => {
                    let path = output.join(format!("{stem}.md"));
                    std::fs::write(&path, report.to_markdown())?;
                    eprintln!("Markdown report: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn print_summary(report: &CohortReport) {
    let stats = &report.stats;

    let mut table = Table::new();
    table.set_header(vec!["Students", "Mean", "Median", "Min", "Max", "Std dev"]);
    table.add_row(vec![
        Cell::new(stats.count),
        Cell::new(format!("{:.2}", stats.mean_score)),
        Cell::new(format!("{:.2}", stats.median_score)),
        Cell::new(format!("{:.2}", stats.min_score)),
        Cell::new(format!("{:.2}", stats.max_score)),
        Cell::new(format!("{:.2}", stats.std_dev)),
    ]);
    eprintln!("\n{table}");

    let mut categories = Table::new();
    categories.set_header(vec!["Category", "Students", "Share"]);
    for category in Category::ALL.iter().rev() {
        categories.add_row(vec![
            Cell::new(category),
            Cell::new(stats.category_counts.get(category).copied().unwrap_or(0)),
            Cell::new(format!("{:.1}%", stats.category_share(*category) * 100.0)),
        ]);
    }
    eprintln!("{categories}");
}
