//! Per-student results produced by a cohort run.

use serde::{Deserialize, Serialize};

use crate::model::{Category, CrispInput, EvaluationResult, Student};

/// The evaluation of one student in a cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResult {
    pub student_id: String,
    #[serde(default)]
    pub name: String,
    pub inputs: CrispInput,
    pub evaluation: EvaluationResult,
}

impl StudentResult {
    pub fn new(student: &Student, evaluation: EvaluationResult) -> Self {
        Self {
            student_id: student.id.clone(),
            name: student.name.clone(),
            inputs: student.inputs,
            evaluation,
        }
    }

    pub fn score(&self) -> f64 {
        self.evaluation.score
    }

    pub fn category(&self) -> Category {
        self.evaluation.category
    }
}
