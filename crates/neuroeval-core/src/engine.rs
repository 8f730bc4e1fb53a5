//! Cohort evaluation orchestrator.
//!
//! Runs every student of a cohort through the evaluator, reports progress,
//! and assembles a [`CohortReport`] with aggregate statistics.

use std::time::{Duration, Instant};

use chrono::Utc;
use uuid::Uuid;

use crate::defuzzify::Resolution;
use crate::evaluator::Evaluator;
use crate::model::Cohort;
use crate::report::{CohortReport, CohortSummary};
use crate::results::StudentResult;
use crate::statistics::compute_cohort_stats;

/// Configuration for the cohort engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Defuzzification sampling step.
    pub resolution: Resolution,
    /// Only evaluate students carrying at least one of these tags (empty = all).
    pub tag_filter: Vec<String>,
}

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_student_start(&self, student_id: &str);
    fn on_student_complete(&self, result: &StudentResult);
    fn on_cohort_complete(&self, total: usize, evaluated: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_student_start(&self, _: &str) {}
    fn on_student_complete(&self, _: &StudentResult) {}
    fn on_cohort_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// Evaluates whole cohorts.
#[derive(Debug, Clone, Default)]
pub struct CohortEngine {
    config: EngineConfig,
}

impl CohortEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn selected(&self, tags: &[String]) -> bool {
        self.config.tag_filter.is_empty()
            || tags.iter().any(|t| self.config.tag_filter.contains(t))
    }

    /// Evaluate every selected student of `cohort`.
    pub fn run(&self, cohort: &Cohort, progress: &dyn ProgressReporter) -> CohortReport {
        let start = Instant::now();
        let evaluator = Evaluator::new(self.config.resolution);

        tracing::info!(
            cohort = %cohort.id,
            students = cohort.students.len(),
            "evaluating cohort"
        );

        let mut results = Vec::new();
        for student in cohort.students.iter().filter(|s| self.selected(&s.tags)) {
            progress.on_student_start(&student.id);
            let evaluation = evaluator.evaluate(&student.inputs);
            tracing::debug!(
                student = %student.id,
                score = evaluation.score,
                category = %evaluation.category,
                "student evaluated"
            );
            let result = StudentResult::new(student, evaluation);
            progress.on_student_complete(&result);
            results.push(result);
        }

        let elapsed = start.elapsed();
        progress.on_cohort_complete(cohort.students.len(), results.len(), elapsed);
        tracing::info!(
            cohort = %cohort.id,
            evaluated = results.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "cohort complete"
        );

        let stats = compute_cohort_stats(&results);
        CohortReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            cohort: CohortSummary {
                id: cohort.id.clone(),
                name: cohort.name.clone(),
                student_count: cohort.students.len(),
            },
            resolution: self.config.resolution,
            results,
            stats,
            duration_ms: elapsed.as_millis() as u64,
        }
    }
}
