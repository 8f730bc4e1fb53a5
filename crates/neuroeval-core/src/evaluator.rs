//! The evaluation pipeline: fuzzify, fire rules, defuzzify, categorize.

use crate::defuzzify::{centroid, Resolution};
use crate::fuzzifier::fuzzify;
use crate::model::{Category, CrispInput, EvaluationResult};
use crate::rules::evaluate_rules;

/// Runs the pipeline at a chosen defuzzification resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evaluator {
    resolution: Resolution,
}

impl Evaluator {
    pub fn new(resolution: Resolution) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn evaluate(&self, input: &CrispInput) -> EvaluationResult {
        let fuzzy_inputs = fuzzify(input);
        let inference = evaluate_rules(&fuzzy_inputs);
        let score = centroid(&inference.aggregated, self.resolution);
        let category = Category::from_score(score);

        tracing::debug!(
            score,
            %category,
            attendance = input.attendance,
            assignment = input.assignment,
            exam = input.exam,
            participation = input.participation,
            "evaluated"
        );

        EvaluationResult {
            score,
            category,
            fuzzy_inputs,
            aggregated: inference.aggregated,
            rules: inference.rules,
        }
    }
}

/// Evaluate one student at the reference unit resolution.
pub fn evaluate(input: &CrispInput) -> EvaluationResult {
    Evaluator::default().evaluate(input)
}
