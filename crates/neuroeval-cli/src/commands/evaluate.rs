//! The `neuroeval evaluate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use neuroeval_core::history::History;
use neuroeval_core::registry::InputVariable;
use neuroeval_core::rules::RULES;
use neuroeval_core::{CrispInput, EvaluationResult, Evaluator};

use crate::config::load_config_from;

pub fn execute(
    values: [f64; 4],
    format: String,
    history_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let [attendance, assignment, exam, participation] = values;
    let inputs = CrispInput::new(attendance, assignment, exam, participation);
    if let Some((variable, value)) = inputs.non_finite() {
        anyhow::bail!("{variable} must be a finite number, got {value}");
    }

    let result = Evaluator::new(config.resolution).evaluate(&inputs);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "text" => print_text(&inputs, &result),
        other => anyhow::bail!("unknown format '{other}' (expected text or json)"),
    }

    if let Some(path) = history_path {
        record_history(&path, inputs, &result, config.history_limit)?;
    }

    Ok(())
}

fn record_history(
    path: &Path,
    inputs: CrispInput,
    result: &EvaluationResult,
    limit: usize,
) -> Result<()> {
    let mut history = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read history from {}", path.display()))?;
        let mut history = serde_json::from_str::<History>(&content)
            .with_context(|| format!("failed to parse history {}", path.display()))?;
        history.set_limit(limit);
        history
    } else {
        History::with_limit(limit)
    };

    if history.record(inputs, result) {
        eprintln!("Recorded in history ({} entries)", history.len());
    } else {
        eprintln!("Same inputs as the latest history entry, not recorded");
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&history)?)
        .with_context(|| format!("failed to write history to {}", path.display()))?;
    Ok(())
}

fn print_text(inputs: &CrispInput, result: &EvaluationResult) {
    println!("Score: {:.2}", result.score);
    println!("Category: {}", result.category);

    let mut fuzzy = Table::new();
    fuzzy.set_header(vec!["Variable", "Value", "Memberships"]);
    for variable in InputVariable::ALL {
        let degrees: Vec<String> = result
            .fuzzy_inputs
            .variable(variable)
            .iter()
            .map(|(term, degree)| format!("{term} {degree:.3}"))
            .collect();
        fuzzy.add_row(vec![
            Cell::new(variable),
            Cell::new(inputs.get(variable)),
            Cell::new(degrees.join(", ")),
        ]);
    }
    println!("\n{fuzzy}");

    let mut rules = Table::new();
    rules.set_header(vec!["#", "Rule", "Strength"]);
    for (i, (rule, firing)) in RULES.iter().zip(&result.rules).enumerate() {
        rules.add_row(vec![
            Cell::new(i + 1),
            Cell::new(rule),
            Cell::new(format!("{:.3}", firing.strength)),
        ]);
    }
    println!("\n{rules}");

    let mut aggregated = Table::new();
    aggregated.set_header(vec!["Output", "Strength"]);
    for (term, strength) in result.aggregated.iter() {
        aggregated.add_row(vec![Cell::new(term), Cell::new(format!("{strength:.3}"))]);
    }
    println!("\n{aggregated}");
}
