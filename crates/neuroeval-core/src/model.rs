//! Core data model types for neuroeval.
//!
//! These are the values that flow in and out of an evaluation: the crisp
//! metrics of one student, the resulting category, and the full evaluation
//! record handed to charting, history and report consumers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::fuzzifier::FuzzifiedInput;
use crate::registry::InputVariable;
use crate::rules::{AggregatedOutput, RuleFiring};

/// The four crisp metrics of one student, each nominally a percentage.
///
/// Values outside `[0, 100]` are accepted; membership saturates at the
/// boundary terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrispInput {
    pub attendance: f64,
    pub assignment: f64,
    pub exam: f64,
    pub participation: f64,
}

impl CrispInput {
    pub fn new(attendance: f64, assignment: f64, exam: f64, participation: f64) -> Self {
        Self {
            attendance,
            assignment,
            exam,
            participation,
        }
    }

    /// Crisp value for one input variable.
    pub fn get(&self, variable: InputVariable) -> f64 {
        match variable {
            InputVariable::Attendance => self.attendance,
            InputVariable::Assignment => self.assignment,
            InputVariable::Exam => self.exam,
            InputVariable::Participation => self.participation,
        }
    }

    /// Build an input from `(name, value)` pairs.
    ///
    /// Names are matched case-insensitively. Every variable must be present;
    /// a later pair for the same name overrides an earlier one.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, EvalError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut values: [Option<f64>; 4] = [None; 4];
        for (name, value) in pairs {
            let variable: InputVariable = name.parse()?;
            values[variable as usize] = Some(value);
        }

        let mut resolved = [0.0; 4];
        for variable in InputVariable::ALL {
            resolved[variable as usize] = values[variable as usize]
                .ok_or_else(|| EvalError::MissingInput(variable.name().to_string()))?;
        }

        let [attendance, assignment, exam, participation] = resolved;
        Ok(Self::new(attendance, assignment, exam, participation))
    }

    /// `(variable, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (InputVariable, f64)> + '_ {
        InputVariable::ALL.into_iter().map(|v| (v, self.get(v)))
    }

    /// The first NaN or infinite value. JSON has no encoding for these.
    pub fn non_finite(&self) -> Option<(InputVariable, f64)> {
        self.iter().find(|(_, value)| !value.is_finite())
    }
}

/// The discrete label derived from the crisp score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Poor,
    Average,
    Good,
    Excellent,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Poor,
        Category::Average,
        Category::Good,
        Category::Excellent,
    ];

    /// Threshold a crisp score: 80+ Excellent, 60+ Good, 40+ Average, else Poor.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Category::Excellent
        } else if score >= 60.0 {
            Category::Good
        } else if score >= 40.0 {
            Category::Average
        } else {
            Category::Poor
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Poor => write!(f, "Poor"),
            Category::Average => write!(f, "Average"),
            Category::Good => write!(f, "Good"),
            Category::Excellent => write!(f, "Excellent"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "poor" => Ok(Category::Poor),
            "average" => Ok(Category::Average),
            "good" => Ok(Category::Good),
            "excellent" => Ok(Category::Excellent),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Everything one evaluation produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Defuzzified score in `[0, 100]`.
    pub score: f64,
    /// Category thresholded from `score`.
    pub category: Category,
    /// Membership degree of every input term.
    pub fuzzy_inputs: FuzzifiedInput,
    /// Strength of each output term after max-aggregation.
    pub aggregated: AggregatedOutput,
    /// Firing strength of each rule, in rule order.
    pub rules: Vec<RuleFiring>,
}

/// One student in a cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier within the cohort.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The student's four metrics.
    pub inputs: CrispInput,
    /// Tags for filtering (section, term, ...).
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A named group of students evaluated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cohort {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub students: Vec<Student>,
}
