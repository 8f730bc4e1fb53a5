//! TOML cohort parser.
//!
//! Loads cohorts from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Cohort, CrispInput, Student};
use crate::registry::{InputVariable, UNIVERSE_MAX, UNIVERSE_MIN};

/// Intermediate TOML structure for parsing cohort files.
#[derive(Debug, Deserialize)]
struct TomlCohortFile {
    cohort: TomlCohortHeader,
    #[serde(default)]
    students: Vec<TomlStudent>,
}

#[derive(Debug, Deserialize)]
struct TomlCohortHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    id: String,
    #[serde(default)]
    name: String,
    attendance: f64,
    assignment: f64,
    exam: f64,
    participation: f64,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a single TOML file into a `Cohort`.
pub fn parse_cohort(path: &Path) -> Result<Cohort> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read cohort file: {}", path.display()))?;

    parse_cohort_str(&content, path)
}

/// Parse a TOML string into a `Cohort`.
pub fn parse_cohort_str(content: &str, source_path: &Path) -> Result<Cohort> {
    let parsed: TomlCohortFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let students = parsed
        .students
        .into_iter()
        .map(|s| Student {
            id: s.id,
            name: s.name,
            inputs: CrispInput::new(s.attendance, s.assignment, s.exam, s.participation),
            tags: s.tags,
        })
        .collect();

    Ok(Cohort {
        id: parsed.cohort.id,
        name: parsed.cohort.name,
        description: parsed.cohort.description,
        students,
    })
}

/// Recursively load all `.toml` cohort files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_cohort_directory(dir: &Path) -> Result<Vec<Cohort>> {
    let mut cohorts = Vec::new();

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
            cohorts.extend(load_cohort_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_cohort(&path) {
                Ok(cohort) => cohorts.push(cohort),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(cohorts)
}

/// Load a cohort file, or every cohort under a directory.
pub fn load_cohorts(path: &Path) -> Result<Vec<Cohort>> {
    if path.is_dir() {
        load_cohort_directory(path)
    } else {
        Ok(vec![parse_cohort(path)?])
    }
}

/// A warning from cohort validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The student ID (if applicable).
    pub student_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a cohort for common data-entry issues.
///
/// Out-of-range metrics are still evaluated; they are only flagged here.
pub fn validate_cohort(cohort: &Cohort) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if cohort.students.is_empty() {
        warnings.push(ValidationWarning {
            student_id: None,
            message: "cohort has no students".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for student in &cohort.students {
        if !seen_ids.insert(&student.id) {
            warnings.push(ValidationWarning {
                student_id: Some(student.id.clone()),
                message: format!("duplicate student ID: {}", student.id),
            });
        }
    }

    for student in &cohort.students {
        for (variable, value) in student.inputs.iter() {
            if let Some(message) = check_metric(variable, value) {
                warnings.push(ValidationWarning {
                    student_id: Some(student.id.clone()),
                    message,
                });
            }
        }
    }

    warnings
}

fn check_metric(variable: InputVariable, value: f64) -> Option<String> {
    if !value.is_finite() {
        Some(format!("{variable} is not a finite number ({value})"))
    } else if !(UNIVERSE_MIN..=UNIVERSE_MAX).contains(&value) {
        Some(format!(
            "{variable} = {value} is outside [{UNIVERSE_MIN}, {UNIVERSE_MAX}]"
        ))
    } else {
        None
    }
}
